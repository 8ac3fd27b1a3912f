use crate::aggregate::AggregateEligibilityRequest;
use crate::enums::{HouseholdMemberType, IncomeType};
use crate::model::Person;
use crate::rules::{threshold_no_extrapolation, RuleDescriptor};

fn infants_and_toddlers(ctx: &AggregateEligibilityRequest) -> bool {
    let persons = &ctx.request.person;
    persons.iter().enumerate().filter(|(_, p)| p.age < 3).any(|(i, p)| {
        if p.household_member_type == Some(HouseholdMemberType::FosterChild) {
            return true;
        }
        let hoh_or_spouse_has_support = persons.iter().any(|m| {
            matches!(
                m.household_member_type,
                Some(HouseholdMemberType::HeadOfHousehold) | Some(HouseholdMemberType::Spouse)
            ) && m
                .incomes
                .iter()
                .any(|inc| matches!(inc.kind, IncomeType::SSI | IncomeType::CashAssistance))
        });
        if hoh_or_spouse_has_support {
            return true;
        }
        if matches!(
            p.household_member_type,
            Some(HouseholdMemberType::Child) | Some(HouseholdMemberType::StepChild)
        ) {
            let size = persons.len() + ctx.aggregate.members_pregnant;
            let threshold = if size < 2 {
                return false;
            } else {
                const TABLE: [(usize, f64); 7] = [
                    (2, 5_624.0),
                    (3, 6_948.0),
                    (4, 8_271.0),
                    (5, 9_594.0),
                    (6, 10_918.0),
                    (7, 11_166.0),
                    (8, 11_414.0),
                ];
                threshold_no_extrapolation(&TABLE, size.min(8)).unwrap_or(5_624.0)
            };
            ctx.aggregate.income_adults_children_total_monthly <= threshold
        } else {
            ctx.aggregate.income_person_monthly.get(&i).copied().unwrap_or(0.0) <= 4_301.0
        }
    })
}

const HEAD_START_TABLE: [(usize, f64); 8] = [
    (1, 15_060.0),
    (2, 20_440.0),
    (3, 25_820.0),
    (4, 31_200.0),
    (5, 36_580.0),
    (6, 41_960.0),
    (7, 47_340.0),
    (8, 52_720.0),
];

fn head_start(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    if bundle.foster_children > 0 {
        return true;
    }
    if bundle.income_household_has_cash_assistance || bundle.income_household_has_ssi {
        return true;
    }
    if !ctx.request.person.iter().any(|p| p.age > 2 && p.age < 5) {
        return false;
    }
    let size = ctx.request.person.len();
    match threshold_no_extrapolation(&HEAD_START_TABLE, size) {
        Some(threshold) => bundle.income_household_total_yearly <= threshold,
        None => false,
    }
}

fn school_meals(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| (5..=21).contains(&p.age) && p.student)
}

fn pre_k(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| (3..5).contains(&p.age))
}

fn summer_meals(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| p.age < 19)
}

fn youth_program_pathway(ctx: &AggregateEligibilityRequest, youth: &[&Person]) -> bool {
    if youth.is_empty() {
        return false;
    }
    if ctx.request.household().living_shelter {
        return true;
    }
    if youth
        .iter()
        .any(|y| y.household_member_type == Some(HouseholdMemberType::FosterChild))
    {
        return true;
    }
    let has_foster_parent = ctx
        .request
        .person
        .iter()
        .any(|p| p.household_member_type == Some(HouseholdMemberType::FosterParent));
    if has_foster_parent
        && youth
            .iter()
            .any(|y| y.household_member_type == Some(HouseholdMemberType::HeadOfHousehold))
    {
        return true;
    }
    if youth.iter().any(|y| y.blind || y.disabled) {
        return true;
    }
    let has_child_present = ctx.request.person.iter().any(|p| {
        matches!(
            p.household_member_type,
            Some(HouseholdMemberType::Child) | Some(HouseholdMemberType::StepChild)
        )
    });
    let pregnant_or_parenting = youth.iter().any(|y| y.pregnant)
        || (has_child_present
            && youth
                .iter()
                .any(|y| y.household_member_type == Some(HouseholdMemberType::HeadOfHousehold)));
    if pregnant_or_parenting {
        return true;
    }
    if ctx.aggregate.income_household_has_cash_assistance || ctx.aggregate.income_household_has_ssi {
        return true;
    }
    let size = ctx.request.person.len();
    match threshold_no_extrapolation(&HEAD_START_TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

fn learn_and_earn(ctx: &AggregateEligibilityRequest) -> bool {
    let youth: Vec<&Person> = ctx.request.person.iter().filter(|p| (14..=21).contains(&p.age)).collect();
    youth_program_pathway(ctx, &youth)
}

fn youth_workforce_development(ctx: &AggregateEligibilityRequest) -> bool {
    let youth: Vec<&Person> = ctx
        .request
        .person
        .iter()
        .filter(|p| (16..=24).contains(&p.age) && !p.student && p.unemployed)
        .collect();
    youth_program_pathway(ctx, &youth)
}

fn nurse_family_partnership(ctx: &AggregateEligibilityRequest) -> bool {
    if !ctx.request.person.iter().any(|p| p.pregnant) {
        return false;
    }
    let size = ctx.aggregate.members_plus_pregnant;
    const TABLE: [(usize, f64); 7] = [
        (2, 2_960.0),
        (3, 3_733.0),
        (4, 4_606.0),
        (5, 5_280.0),
        (6, 6_053.0),
        (7, 6_826.0),
        (8, 7_599.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_monthly <= threshold,
        None => false,
    }
}

fn syep(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| (14..=24).contains(&p.age))
}

fn idnyc(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| p.age >= 10)
}

fn nyc_free_tax_prep_household_variant(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    let size = ctx.request.person.len();
    if size == 1 {
        return bundle.income_household_total_yearly <= 59_000.0;
    }
    let has_child = ctx.request.person.iter().any(|p| {
        matches!(
            p.household_member_type,
            Some(HouseholdMemberType::Child) | Some(HouseholdMemberType::StepChild)
        )
    });
    has_child && bundle.income_household_total_yearly <= 85_000.0
}

fn child_care_voucher(ctx: &AggregateEligibilityRequest) -> bool {
    let has_eligible_dependent = ctx.request.person.iter().any(|p| {
        p.age <= 12
            || (p.age <= 17 && (p.disabled || p.blind))
            || (p.age == 18 && p.student_fulltime && (p.disabled || p.blind))
    });
    if !has_eligible_dependent {
        return false;
    }
    let size = ctx.aggregate.child_care_voucher_household_members;
    const TABLE: [(usize, f64); 7] = [
        (2, 6_156.0),
        (3, 7_604.0),
        (4, 9_053.0),
        (5, 10_501.0),
        (6, 11_949.0),
        (7, 12_221.0),
        (8, 12_493.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_child_care_voucher_total_monthly <= threshold,
        None => false,
    }
}

fn program_for_three_year_olds(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| p.age == 3)
}

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        code: "S2R003",
        description: "Infants and Toddlers",
        predicate: infants_and_toddlers,
    },
    RuleDescriptor {
        code: "S2R008",
        description: "Head Start",
        predicate: head_start,
    },
    RuleDescriptor {
        code: "S2R009",
        description: "School Meals",
        predicate: school_meals,
    },
    RuleDescriptor {
        code: "S2R016",
        description: "Pre-K for All",
        predicate: pre_k,
    },
    RuleDescriptor {
        code: "S2R023",
        description: "Summer Meals",
        predicate: summer_meals,
    },
    RuleDescriptor {
        code: "S2R028",
        description: "Learn and Earn",
        predicate: learn_and_earn,
    },
    RuleDescriptor {
        code: "S2R029",
        description: "Nurse-Family Partnership",
        predicate: nurse_family_partnership,
    },
    RuleDescriptor {
        code: "S2R030",
        description: "Summer Youth Employment Program",
        predicate: syep,
    },
    RuleDescriptor {
        code: "S2R032",
        description: "IDNYC",
        predicate: idnyc,
    },
    RuleDescriptor {
        code: "S2R036",
        description: "Youth Workforce Development",
        predicate: youth_workforce_development,
    },
    RuleDescriptor {
        code: "S2R039",
        description: "NYC Free Tax Prep (household size variant)",
        predicate: nyc_free_tax_prep_household_variant,
    },
    RuleDescriptor {
        code: "S2R040",
        description: "Child Care Voucher",
        predicate: child_care_voucher,
    },
    RuleDescriptor {
        code: "S2R085",
        description: "3-K for All",
        predicate: program_for_three_year_olds,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::compute_aggregates;
    use crate::model::{EligibilityRequest, Household};

    fn person(age: u16, kind: Option<HouseholdMemberType>) -> Person {
        Person {
            age,
            student: false,
            student_fulltime: false,
            pregnant: false,
            unemployed: false,
            unemployed_worked_last_18_months: false,
            blind: false,
            disabled: false,
            veteran: false,
            benefits_medicaid: false,
            benefits_medicaid_disability: false,
            living_owner_on_deed: false,
            living_rental_on_lease: false,
            incomes: Vec::new(),
            expenses: Vec::new(),
            household_member_type: kind,
        }
    }

    fn household(living_shelter: bool) -> Household {
        Household {
            case_id: None,
            cash_on_hand: None,
            living_rental_type: None,
            living_renting: false,
            living_owner: false,
            living_staying_with_friend: false,
            living_hotel: false,
            living_shelter,
            living_prefer_not_to_say: false,
        }
    }

    fn ctx(request: &EligibilityRequest) -> AggregateEligibilityRequest<'_> {
        AggregateEligibilityRequest {
            aggregate: compute_aggregates(request),
            request,
        }
    }

    #[test]
    fn three_k_requires_a_child_of_exactly_three() {
        let request = EligibilityRequest {
            withhold_payload: false,
            household: vec![household(false)],
            person: vec![person(3, Some(HouseholdMemberType::Child))],
        };
        assert!(program_for_three_year_olds(&ctx(&request)));
        let request = EligibilityRequest {
            withhold_payload: false,
            household: vec![household(false)],
            person: vec![person(4, Some(HouseholdMemberType::Child))],
        };
        assert!(!program_for_three_year_olds(&ctx(&request)));
    }

    #[test]
    fn learn_and_earn_qualifies_via_shelter_regardless_of_income() {
        let head = person(18, Some(HouseholdMemberType::HeadOfHousehold));
        let request = EligibilityRequest {
            withhold_payload: false,
            household: vec![household(true)],
            person: vec![head],
        };
        assert!(learn_and_earn(&ctx(&request)));
    }

    #[test]
    fn nurse_family_partnership_requires_a_pregnant_member() {
        let head = person(30, Some(HouseholdMemberType::HeadOfHousehold));
        let request = EligibilityRequest {
            withhold_payload: false,
            household: vec![household(false)],
            person: vec![head],
        };
        assert!(!nurse_family_partnership(&ctx(&request)));
    }
}
