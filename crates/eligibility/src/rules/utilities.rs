use crate::aggregate::AggregateEligibilityRequest;
use crate::rules::{threshold_no_extrapolation, RuleDescriptor};

fn has_vulnerable_member(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request
        .person
        .iter()
        .any(|p| p.age <= 6 || p.age >= 60 || p.disabled || p.blind)
}

fn heating_assistance(ctx: &AggregateEligibilityRequest) -> bool {
    if !has_vulnerable_member(ctx) {
        return false;
    }
    if ctx.aggregate.income_household_has_cash_assistance {
        return true;
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 3_322.0),
        (2, 4_345.0),
        (3, 5_367.0),
        (4, 6_390.0),
        (5, 7_412.0),
        (6, 8_434.0),
        (7, 8_626.0),
        (8, 8_818.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_adults_total_monthly <= threshold,
        None => false,
    }
}

fn cooling_assistance(ctx: &AggregateEligibilityRequest) -> bool {
    if !has_vulnerable_member(ctx) {
        return false;
    }
    let bundle = &ctx.aggregate;
    if bundle.income_household_has_cash_assistance {
        return true;
    }
    let size = ctx.request.person.len();
    if size == 1 && bundle.income_household_has_ssi {
        return true;
    }
    const TABLE: [(usize, f64); 8] = [
        (1, 3_035.0),
        (2, 3_970.0),
        (3, 4_904.0),
        (4, 5_838.0),
        (5, 6_772.0),
        (6, 7_706.0),
        (7, 7_881.0),
        (8, 8_056.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => bundle.income_household_total_monthly <= threshold,
        None => false,
    }
}

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        code: "S2R019",
        description: "Home Energy Assistance Program (Heating)",
        predicate: heating_assistance,
    },
    RuleDescriptor {
        code: "S2R033",
        description: "Home Energy Assistance Program (Cooling)",
        predicate: cooling_assistance,
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::compute_aggregates;
    use crate::enums::HouseholdMemberType;
    use crate::model::{EligibilityRequest, Household, Person};

    fn person(age: u16) -> Person {
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
            household_member_type: Some(HouseholdMemberType::HeadOfHousehold),
        }
    }

    fn household() -> Household {
        Household {
            case_id: None,
            cash_on_hand: None,
            living_rental_type: None,
            living_renting: false,
            living_owner: false,
            living_staying_with_friend: false,
            living_hotel: false,
            living_shelter: false,
            living_prefer_not_to_say: false,
        }
    }

    #[test]
    fn heating_assistance_requires_a_vulnerable_member() {
        let request = EligibilityRequest {
            withhold_payload: false,
            household: vec![household()],
            person: vec![person(30)],
        };
        let ctx = AggregateEligibilityRequest {
            aggregate: compute_aggregates(&request),
            request: &request,
        };
        assert!(!heating_assistance(&ctx));
    }
}
