use crate::aggregate::AggregateEligibilityRequest;
use crate::enums::{HouseholdMemberType, IncomeType};
use crate::rules::RuleDescriptor;

fn child_dependent_care_tax_credit(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    let has_qualifying_dependent = ctx
        .request
        .person
        .iter()
        .any(|p| p.age < 13 || p.disabled || p.blind);

    has_qualifying_dependent
        && bundle.expense_household_has_child_or_dependent_care
        && bundle.income_head_and_spouse_earned_yearly > 0.0
}

fn child_tax_credit(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    let has_young_child = ctx.request.person.iter().any(|p| p.age < 17);
    let ceiling = if bundle.head_of_household_married {
        400_000.0
    } else {
        200_000.0
    };

    has_young_child && (2500.0..=ceiling).contains(&bundle.income_household_total_yearly)
}

const EITC_CHILDLESS_INDIVIDUAL_THRESHOLD: f64 = 17_640.0;

fn eitc_threshold(married: bool, children: usize) -> f64 {
    match (married, children.min(3)) {
        (true, 0) => 24_210.0,
        (true, 1) => 53_120.0,
        (true, 2) => 59_478.0,
        (true, _) => 63_398.0,
        (false, 0) => 17_640.0,
        (false, 1) => 46_560.0,
        (false, 2) => 52_918.0,
        (false, _) => 56_838.0,
    }
}

fn earned_income_tax_credit(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    let investment_total_yearly: f64 = bundle.income_person_investment_yearly.values().sum();
    if investment_total_yearly >= 11_000.0 {
        return false;
    }

    let children = bundle.children_student_blind_disabled_eitc;
    let persons = &ctx.request.person;
    let head_entry = persons
        .iter()
        .enumerate()
        .find(|(_, p)| p.household_member_type == Some(HouseholdMemberType::HeadOfHousehold));

    if let Some((head_index, head)) = head_entry {
        if bundle.head_of_household_married {
            let combined_earned = bundle.income_head_and_spouse_earned_yearly;
            let threshold = eitc_threshold(true, children);

            if children == 0 {
                let spouse = persons
                    .iter()
                    .find(|p| p.household_member_type == Some(HouseholdMemberType::Spouse));
                let age_ok =
                    (25..=64).contains(&head.age) && spouse.is_some_and(|s| (25..=64).contains(&s.age));
                if !age_ok {
                    return individual_eitc_eligibility(ctx);
                }
            }

            if combined_earned > 0.0 && combined_earned <= threshold {
                return true;
            }
        } else {
            let threshold = eitc_threshold(false, children);

            if children == 0 && !(25..=64).contains(&head.age) {
                return individual_eitc_eligibility(ctx);
            }

            let head_earned = bundle.income_person_earned_yearly.get(&head_index).copied().unwrap_or(0.0);
            if head_earned > 0.0 && head_earned <= threshold {
                return true;
            }
        }
    }

    individual_eitc_eligibility(ctx)
}

fn individual_eitc_eligibility(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    ctx.request.person.iter().enumerate().any(|(i, p)| {
        !matches!(
            p.household_member_type,
            Some(HouseholdMemberType::HeadOfHousehold) | Some(HouseholdMemberType::Spouse)
        ) && (25..=64).contains(&p.age)
            && bundle
                .income_person_earned_yearly
                .get(&i)
                .copied()
                .is_some_and(|v| v > 0.0 && v <= EITC_CHILDLESS_INDIVIDUAL_THRESHOLD)
    })
}

fn star_exemption(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.household().living_owner && ctx.aggregate.income_owners_total_yearly <= 500_000.0
}

fn sche(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.household().living_owner
        && ctx.aggregate.income_owners_total_yearly <= 58_399.0
        && ctx.request.person.iter().any(|p| p.living_owner_on_deed && p.age >= 65)
}

fn disabled_blind_homeowner_exemption(ctx: &AggregateEligibilityRequest) -> bool {
    let household = ctx.request.household();
    if !household.living_owner || ctx.aggregate.income_owners_total_yearly > 58_399.0 {
        return false;
    }
    ctx.request.person.iter().any(|p| {
        p.living_owner_on_deed
            && (p.blind
                || p.disabled
                || p.incomes
                    .iter()
                    .any(|inc| matches!(inc.kind, IncomeType::SSI | IncomeType::SSDisability)))
    })
}

fn veterans_property_tax_exemption(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.household().living_owner
        && ctx.request.person.iter().any(|p| p.living_owner_on_deed && p.veteran)
}

fn nyc_free_tax_prep_age_gate(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| p.age >= 18)
}

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        code: "S2R001",
        description: "Child and Dependent Care Tax Credit",
        predicate: child_dependent_care_tax_credit,
    },
    RuleDescriptor {
        code: "S2R004",
        description: "Child Tax Credit",
        predicate: child_tax_credit,
    },
    RuleDescriptor {
        code: "S2R006",
        description: "Earned Income Tax Credit",
        predicate: earned_income_tax_credit,
    },
    RuleDescriptor {
        code: "S2R012",
        description: "School Tax Relief (STAR)",
        predicate: star_exemption,
    },
    RuleDescriptor {
        code: "S2R014",
        description: "Senior Citizen Homeowner Exemption",
        predicate: sche,
    },
    RuleDescriptor {
        code: "S2R017",
        description: "Disabled Homeowner's Exemption",
        predicate: disabled_blind_homeowner_exemption,
    },
    RuleDescriptor {
        code: "S2R018",
        description: "Veterans' Property Tax Exemption",
        predicate: veterans_property_tax_exemption,
    },
    RuleDescriptor {
        code: "S2R045",
        description: "NYC Free Tax Prep",
        predicate: nyc_free_tax_prep_age_gate,
    },
];
