use crate::aggregate::AggregateEligibilityRequest;
use crate::enums::{HouseholdMemberType, IncomeType, LivingRentalType};
use crate::rules::{threshold_no_extrapolation, RuleDescriptor};

const RENTAL_ASSISTANCE_INCOME_TYPES: [IncomeType; 13] = [
    IncomeType::Wages,
    IncomeType::SelfEmployment,
    IncomeType::Pension,
    IncomeType::SSRetirement,
    IncomeType::SSDisability,
    IncomeType::SSSurvivor,
    IncomeType::Unemployment,
    IncomeType::WorkersComp,
    IncomeType::Veteran,
    IncomeType::Rental,
    IncomeType::Investment,
    IncomeType::Alimony,
    IncomeType::ChildSupport,
];

fn head<'a>(ctx: &'a AggregateEligibilityRequest<'a>) -> Option<&'a crate::model::Person> {
    ctx.request
        .person
        .iter()
        .find(|p| p.household_member_type == Some(HouseholdMemberType::HeadOfHousehold))
}

fn rental_assistance(ctx: &AggregateEligibilityRequest) -> bool {
    let household = ctx.request.household();
    if !household.living_renting {
        return false;
    }
    let rental_type_ok = matches!(
        household.living_rental_type,
        Some(LivingRentalType::RentControlled)
            | Some(LivingRentalType::HDFC)
            | Some(LivingRentalType::MitchellLama)
            | Some(LivingRentalType::Section213)
    );
    if !rental_type_ok {
        return false;
    }
    let Some(head) = head(ctx) else { return false };
    if !(head.age >= 18 && head.living_rental_on_lease) {
        return false;
    }
    let has_qualifying_income = head
        .incomes
        .iter()
        .any(|inc| RENTAL_ASSISTANCE_INCOME_TYPES.contains(&inc.kind));

    has_qualifying_income && ctx.aggregate.income_household_total_yearly <= 50_000.0
}

fn nyc_housing_lottery(ctx: &AggregateEligibilityRequest) -> bool {
    if head(ctx).is_none_or(|h| h.age < 18) {
        return false;
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 54350.0),
        (2, 62150.0),
        (3, 69900.0),
        (4, 77650.0),
        (5, 83850.0),
        (6, 90050.0),
        (7, 96300.0),
        (8, 102500.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

fn scrie(ctx: &AggregateEligibilityRequest) -> bool {
    let household = ctx.request.household();
    if !household.living_renting {
        return false;
    }
    let rental_type_ok = matches!(
        household.living_rental_type,
        Some(LivingRentalType::RentControlled)
            | Some(LivingRentalType::HDFC)
            | Some(LivingRentalType::RentRegulatedHotel)
            | Some(LivingRentalType::MitchellLama)
            | Some(LivingRentalType::Section213)
    );
    if !rental_type_ok {
        return false;
    }
    let Some(head) = head(ctx) else { return false };
    if !(head.age >= 62 && head.living_rental_on_lease) {
        return false;
    }
    let bundle = &ctx.aggregate;
    let metric = bundle.income_household_total_yearly
        - bundle.income_household_total_monthly_less_gifts * 12.0;
    metric <= 50_000.0
}

fn nycha_resident_employment(ctx: &AggregateEligibilityRequest) -> bool {
    let household = ctx.request.household();
    household.living_renting
        && household.living_rental_type == Some(LivingRentalType::NYCHA)
        && ctx.request.person.iter().any(|p| p.age >= 18)
}

fn fair_fares(ctx: &AggregateEligibilityRequest) -> bool {
    if !ctx.request.person.iter().any(|p| (18..=64).contains(&p.age)) {
        return false;
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 21837.0),
        (2, 29638.0),
        (3, 37439.0),
        (4, 45240.0),
        (5, 53041.0),
        (6, 60842.0),
        (7, 68643.0),
        (8, 76444.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

const FAMILY_RELATION_TYPES: [HouseholdMemberType; 11] = [
    HouseholdMemberType::Spouse,
    HouseholdMemberType::Child,
    HouseholdMemberType::FosterChild,
    HouseholdMemberType::Parent,
    HouseholdMemberType::Grandparent,
    HouseholdMemberType::FosterParent,
    HouseholdMemberType::SisterBrother,
    HouseholdMemberType::DomesticPartner,
    HouseholdMemberType::StepChild,
    HouseholdMemberType::StepParent,
    HouseholdMemberType::StepSisterStepBrother,
];

fn public_housing(ctx: &AggregateEligibilityRequest) -> bool {
    let persons = &ctx.request.person;
    let has_family_relations = persons
        .iter()
        .any(|p| p.household_member_type.is_some_and(|k| FAMILY_RELATION_TYPES.contains(&k)));

    if has_family_relations {
        let Some(head) = head(ctx) else { return false };
        if head.age < 18 {
            return false;
        }
        let has_minor_spouse_or_partner = persons.iter().any(|p| {
            matches!(
                p.household_member_type,
                Some(HouseholdMemberType::Spouse) | Some(HouseholdMemberType::DomesticPartner)
            ) && p.age < 18
        });
        if has_minor_spouse_or_partner {
            return false;
        }
        let size = persons.len().max(2);
        const TABLE: [(usize, f64); 7] = [
            (2, 99_550.0),
            (3, 111_950.0),
            (4, 124_400.0),
            (5, 134_350.0),
            (6, 144_300.0),
            (7, 154_250.0),
            (8, 164_200.0),
        ];
        return match threshold_no_extrapolation(&TABLE, size) {
            Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
            None => false,
        };
    }

    let all_adults = ctx.aggregate.household_all_adults;
    all_adults
        && persons
            .iter()
            .enumerate()
            .any(|(i, _)| ctx.aggregate.income_person_yearly.get(&i).copied().unwrap_or(0.0) <= 87_100.0)
}

fn lifeline(ctx: &AggregateEligibilityRequest) -> bool {
    let persons = &ctx.request.person;
    if persons.iter().any(|p| p.benefits_medicaid || p.benefits_medicaid_disability) {
        return true;
    }
    if ctx.aggregate.income_household_has_benefit {
        return true;
    }
    let household = ctx.request.household();
    if household.living_renting && household.living_rental_type == Some(LivingRentalType::NYCHA) {
        return true;
    }
    let size = persons.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 20_331.0),
        (2, 27_594.0),
        (3, 34_857.0),
        (4, 42_120.0),
        (5, 49_383.0),
        (6, 56_646.0),
        (7, 63_909.0),
        (8, 71_172.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

fn nycha_connected(ctx: &AggregateEligibilityRequest) -> bool {
    let household = ctx.request.household();
    household.living_renting && household.living_rental_type == Some(LivingRentalType::NYCHA)
}

fn nyc_housing_connect(ctx: &AggregateEligibilityRequest) -> bool {
    if !ctx.request.person.iter().any(|p| p.age >= 18) {
        return false;
    }
    if let Some(cash_on_hand) = ctx.request.household().cash_on_hand {
        if cash_on_hand > 256_245.0 {
            return false;
        }
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 179_355.0),
        (2, 205_095.0),
        (3, 230_670.0),
        (4, 256_245.0),
        (5, 276_705.0),
        (6, 297_165.0),
        (7, 317_790.0),
        (8, 338_250.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        code: "S2R005",
        description: "Rental Assistance",
        predicate: rental_assistance,
    },
    RuleDescriptor {
        code: "S2R013",
        description: "NYC Housing Lottery",
        predicate: nyc_housing_lottery,
    },
    RuleDescriptor {
        code: "S2R015",
        description: "Senior Citizen Rent Increase Exemption",
        predicate: scrie,
    },
    RuleDescriptor {
        code: "S2R024",
        description: "NYCHA Resident Employment",
        predicate: nycha_resident_employment,
    },
    RuleDescriptor {
        code: "S2R034",
        description: "Fair Fares",
        predicate: fair_fares,
    },
    RuleDescriptor {
        code: "S2R035",
        description: "Public Housing",
        predicate: public_housing,
    },
    RuleDescriptor {
        code: "S2R043",
        description: "Lifeline",
        predicate: lifeline,
    },
    RuleDescriptor {
        code: "S2R054",
        description: "NYCHA Connected Internet",
        predicate: nycha_connected,
    },
    RuleDescriptor {
        code: "S2R055",
        description: "NYC Housing Connect",
        predicate: nyc_housing_connect,
    },
];
