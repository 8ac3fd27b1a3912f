use crate::aggregate::AggregateEligibilityRequest;
use crate::enums::IncomeType;
use crate::rules::{threshold_no_extrapolation, threshold_with_extrapolation, RuleDescriptor};

fn snap(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    let persons = &ctx.request.person;
    let size = persons.len() + bundle.members_pregnant;

    let categorical = !persons.is_empty()
        && persons.iter().all(|p| {
            p.incomes
                .iter()
                .any(|inc| matches!(inc.kind, IncomeType::SSI | IncomeType::CashAssistance))
        });
    if categorical {
        return true;
    }

    let earned = bundle.income_household_wage_self_employment_monthly;
    let earned_for_deduction = earned + bundle.income_household_boarder_monthly;
    let gross = earned + bundle.income_household_boarder_monthly + bundle.income_household_unearned_monthly
        - bundle.expense_household_child_support_monthly;

    let standard_deduction = match size {
        0..=3 => 198.0,
        4 => 208.0,
        5 => 244.0,
        _ => 279.0,
    };
    let homeless_deduction = if ctx.request.household().living_shelter {
        179.66
    } else {
        0.0
    };
    let medical_deduction = (bundle.expense_household_medical_monthly - 35.0).max(0.0);
    let deductions = 0.20 * earned_for_deduction
        + standard_deduction
        + homeless_deduction
        + bundle.expense_household_child_dependent_care_monthly
        + medical_deduction;

    let adjusted = (gross - deductions).max(0.0);
    let excess_shelter = ((bundle.expense_household_rent_mortgage_monthly + 992.0) - adjusted / 2.0).max(0.0);
    let net = (adjusted - excess_shelter).max(0.0);

    let has_elderly_or_disabled = persons.iter().any(|p| p.age >= 60 || p.disabled || p.blind);
    let multiplier = if bundle.expense_household_child_dependent_care_monthly > 0.0 || has_elderly_or_disabled {
        2.0
    } else if earned_for_deduction > 0.0 {
        1.5
    } else {
        1.3
    };

    const FPL_BASE: [(usize, f64); 8] = [
        (1, 1255.0),
        (2, 1704.0),
        (3, 2152.0),
        (4, 2600.0),
        (5, 3049.0),
        (6, 3497.0),
        (7, 3945.0),
        (8, 4394.0),
    ];
    let fpl = threshold_with_extrapolation(&FPL_BASE, 449.0, size.max(1));

    net <= fpl * multiplier
}

fn cash_assistance(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    let size = ctx.request.person.len() + bundle.members_pregnant;
    let has_child_or_pregnant = ctx.request.person.iter().any(|p| p.age <= 18 || p.pregnant);

    const CHILD_TABLE: [(usize, f64); 8] = [
        (1, 460.10),
        (2, 574.50),
        (3, 789.00),
        (4, 951.70),
        (5, 1119.70),
        (6, 1238.20),
        (7, 1357.70),
        (8, 1455.20),
    ];
    const GENERAL_TABLE: [(usize, f64); 8] = [
        (1, 398.10),
        (2, 541.50),
        (3, 675.00),
        (4, 813.70),
        (5, 955.70),
        (6, 1063.20),
        (7, 1214.70),
        (8, 1330.20),
    ];

    let threshold = if has_child_or_pregnant {
        threshold_with_extrapolation(&CHILD_TABLE, 119.50, size)
    } else {
        threshold_with_extrapolation(&GENERAL_TABLE, 115.50, size)
    };

    bundle.income_household_monthly_ca_minus_work_expense < threshold
}

fn nys_unemployment_insurance(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request
        .person
        .iter()
        .any(|p| p.unemployed && p.unemployed_worked_last_18_months)
}

fn older_adult_employment_program(ctx: &AggregateEligibilityRequest) -> bool {
    let bundle = &ctx.aggregate;
    if !ctx.request.person.iter().any(|p| p.age >= 55 && p.unemployed) {
        return false;
    }
    let size = ctx.request.person.len() + bundle.members_pregnant;
    const TABLE: [(usize, f64); 8] = [
        (1, 18825.0),
        (2, 25550.0),
        (3, 32275.0),
        (4, 39000.0),
        (5, 45725.0),
        (6, 52450.0),
        (7, 59175.0),
        (8, 65900.0),
    ];
    bundle.income_household_total_yearly <= threshold_with_extrapolation(&TABLE, 6725.0, size)
}

fn workforce1(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| p.age >= 18)
}

fn csfp(ctx: &AggregateEligibilityRequest) -> bool {
    if !ctx.request.person.iter().any(|p| p.age >= 60) {
        return false;
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 19578.0),
        (2, 26572.0),
        (3, 33566.0),
        (4, 40560.0),
        (5, 47554.0),
        (6, 54548.0),
        (7, 61542.0),
        (8, 68536.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        code: "S2R007",
        description: "Supplemental Nutrition Assistance Program",
        predicate: snap,
    },
    RuleDescriptor {
        code: "S2R010",
        description: "Cash Assistance",
        predicate: cash_assistance,
    },
    RuleDescriptor {
        code: "S2R021",
        description: "NYS Unemployment Insurance",
        predicate: nys_unemployment_insurance,
    },
    RuleDescriptor {
        code: "S2R025",
        description: "Older Adult Employment Program",
        predicate: older_adult_employment_program,
    },
    RuleDescriptor {
        code: "S2R026",
        description: "Workforce1 Career Centers",
        predicate: workforce1,
    },
    RuleDescriptor {
        code: "S2R027",
        description: "Commodity Supplemental Food Program",
        predicate: csfp,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::compute_aggregates;
    use crate::enums::{Frequency, HouseholdMemberType};
    use crate::model::{EligibilityRequest, Household, Income, Person};

    fn base_person(age: u16, kind: Option<HouseholdMemberType>) -> Person {
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

    fn request_with(persons: Vec<Person>, living_shelter: bool) -> EligibilityRequest {
        EligibilityRequest {
            withhold_payload: false,
            household: vec![Household {
                case_id: None,
                cash_on_hand: None,
                living_rental_type: None,
                living_renting: false,
                living_owner: false,
                living_staying_with_friend: false,
                living_hotel: false,
                living_shelter,
                living_prefer_not_to_say: false,
            }],
            person: persons,
        }
    }

    fn ctx(request: &EligibilityRequest) -> AggregateEligibilityRequest<'_> {
        AggregateEligibilityRequest {
            aggregate: compute_aggregates(request),
            request,
        }
    }

    #[test]
    fn snap_categorical_path_needs_no_income_test() {
        let mut head = base_person(40, Some(HouseholdMemberType::HeadOfHousehold));
        head.incomes.push(Income {
            amount: 500.0,
            kind: IncomeType::SSI,
            frequency: Frequency::Monthly,
        });
        let request = request_with(vec![head], false);
        assert!(snap(&ctx(&request)));
    }

    #[test]
    fn nys_ui_requires_both_unemployed_flags() {
        let mut head = base_person(40, Some(HouseholdMemberType::HeadOfHousehold));
        head.unemployed = true;
        let request = request_with(vec![head], false);
        assert!(!nys_unemployment_insurance(&ctx(&request)));
    }

    #[test]
    fn csfp_requires_a_senior_in_the_household() {
        let head = base_person(30, Some(HouseholdMemberType::HeadOfHousehold));
        let request = request_with(vec![head], false);
        assert!(!csfp(&ctx(&request)));
    }
}
