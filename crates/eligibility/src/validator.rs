//! Request validation: parsing plus the five cross-field invariants from the
//! data model. `validate` either returns a canonical, immutable
//! [`EligibilityRequest`] or a non-empty list of `path -> diagnostic`
//! messages; no partial request is ever returned on failure.

use crate::enums::HouseholdMemberType;
use crate::model::EligibilityRequest;
use serde_json::Value;

const CASE_ID_MAX_LEN: usize = 64;
const MAX_AMOUNT: f64 = 999_999_999_999.99;
const MAX_CASH_ON_HAND: f64 = 9_999_999.99;
const MAX_PERSONS: usize = 8;
const MAX_AGE: u16 = 150;

pub fn validate(raw: &Value) -> Result<EligibilityRequest, Vec<String>> {
    let request: EligibilityRequest = match serde_json::from_value(raw.clone()) {
        Ok(request) => request,
        Err(err) => return Err(vec![format!("body -> {err}")]),
    };

    let mut errors = Vec::new();
    check_cardinality(&request, &mut errors);
    check_age_fields(&request, &mut errors);
    check_amount_fields(&request, &mut errors);
    check_case_id(&request, &mut errors);
    check_invariants(&request, &mut errors);

    if errors.is_empty() {
        Ok(request)
    } else {
        Err(errors)
    }
}

fn check_cardinality(request: &EligibilityRequest, errors: &mut Vec<String>) {
    if request.household.len() != 1 {
        errors.push("household -> exactly one household is required".to_string());
    }
    if request.person.is_empty() {
        errors.push("person -> at least one person is required".to_string());
    } else if request.person.len() > MAX_PERSONS {
        errors.push(format!("person -> at most {MAX_PERSONS} persons are allowed"));
    }
}

fn check_age_fields(request: &EligibilityRequest, errors: &mut Vec<String>) {
    for (i, person) in request.person.iter().enumerate() {
        if person.age > MAX_AGE {
            errors.push(format!("person[{i}].age -> must be between 0 and {MAX_AGE}"));
        }
    }
}

fn has_at_most_two_decimals(amount: f64) -> bool {
    ((amount * 100.0).round() / 100.0 - amount).abs() < 1e-9
}

fn check_amount(path: String, amount: f64, errors: &mut Vec<String>) {
    if !(0.0..=MAX_AMOUNT).contains(&amount) {
        errors.push(format!("{path} -> amount must be between 0 and {MAX_AMOUNT}"));
    } else if !has_at_most_two_decimals(amount) {
        errors.push(format!("{path} -> amount cannot have more than 2 decimal places"));
    }
}

fn check_amount_fields(request: &EligibilityRequest, errors: &mut Vec<String>) {
    if let Some(cash_on_hand) = request.household.first().and_then(|h| h.cash_on_hand) {
        if !(0.0..=MAX_CASH_ON_HAND).contains(&cash_on_hand) {
            errors.push(format!(
                "household[0].cashOnHand -> must be between 0 and {MAX_CASH_ON_HAND}"
            ));
        } else if !has_at_most_two_decimals(cash_on_hand) {
            errors.push("household[0].cashOnHand -> cannot have more than 2 decimal places".to_string());
        }
    }

    for (i, person) in request.person.iter().enumerate() {
        for (j, income) in person.incomes.iter().enumerate() {
            check_amount(format!("person[{i}].incomes[{j}].amount"), income.amount, errors);
        }
        for (j, expense) in person.expenses.iter().enumerate() {
            check_amount(format!("person[{i}].expenses[{j}].amount"), expense.amount, errors);
        }
    }
}

fn check_case_id(request: &EligibilityRequest, errors: &mut Vec<String>) {
    let Some(case_id) = request.household.first().and_then(|h| h.case_id.as_ref()) else {
        return;
    };
    let valid_charset = case_id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '.' | '-'));
    if !valid_charset || case_id.len() > CASE_ID_MAX_LEN {
        errors.push(format!(
            "household[0].caseId -> must match [A-Za-z0-9/.-]* and be at most {CASE_ID_MAX_LEN} characters"
        ));
    }
}

fn check_invariants(request: &EligibilityRequest, errors: &mut Vec<String>) {
    if request.household.is_empty() || request.person.is_empty() {
        return;
    }
    let household = request.household();

    let head_count = request
        .person
        .iter()
        .filter(|p| p.household_member_type == Some(HouseholdMemberType::HeadOfHousehold))
        .count();
    if head_count != 1 {
        errors.push(
            "person -> exactly one person's householdMemberType must be HeadOfHousehold".to_string(),
        );
    }

    if household.living_rental_type.is_some() && !household.living_renting {
        errors.push(
            "household[0].livingRentalType -> household.livingRenting must be true if livingRentalType is specified"
                .to_string(),
        );
    }

    if household.living_prefer_not_to_say {
        let other_flags = household.living_renting
            || household.living_owner
            || household.living_staying_with_friend
            || household.living_hotel
            || household.living_shelter;
        if other_flags {
            errors.push(
                "household[0].livingPreferNotToSay -> other living flags must be false when set".to_string(),
            );
        }
    }

    if !household.living_renting && request.person.iter().any(|p| p.living_rental_on_lease) {
        errors.push(
            "person -> livingRentalOnLease cannot be true when household.livingRenting is false"
                .to_string(),
        );
    }

    if !household.living_owner && request.person.iter().any(|p| p.living_owner_on_deed) {
        errors.push(
            "person -> livingOwnerOnDeed cannot be true when household.livingOwner is false".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base_request() -> Value {
        json!({
            "household": [{ "livingRenting": false }],
            "person": [{ "age": 30, "householdMemberType": "HeadOfHousehold" }]
        })
    }

    #[test]
    fn accepts_a_minimal_valid_request() {
        let result = validate(&base_request());
        assert!(result.is_ok(), "{:?}", result.err());
    }

    #[test]
    fn accepts_canonical_and_alias_field_names_identically() {
        let canonical = validate(&base_request()).unwrap();
        let mut aliased = base_request();
        let value = aliased["person"][0]
            .as_object_mut()
            .unwrap()
            .remove("householdMemberType")
            .unwrap();
        aliased["person"][0]["household_member_type"] = value;
        let from_alias = validate(&aliased).unwrap();
        assert_eq!(
            from_alias.person[0].household_member_type,
            canonical.person[0].household_member_type
        );
    }

    #[test]
    fn rejects_zero_heads_of_household() {
        let mut raw = base_request();
        raw["person"][0]["householdMemberType"] = json!("Child");
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("HeadOfHousehold")));
    }

    #[test]
    fn rejects_two_heads_of_household() {
        let mut raw = base_request();
        raw["person"]
            .as_array_mut()
            .unwrap()
            .push(json!({ "age": 40, "householdMemberType": "HeadOfHousehold" }));
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("HeadOfHousehold")));
    }

    #[test]
    fn rejects_rental_type_without_renting_flag() {
        let mut raw = base_request();
        raw["household"][0]["livingRentalType"] = json!("NYCHA");
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("livingRentalType")));
    }

    #[test]
    fn rejects_prefer_not_to_say_with_other_flags() {
        let mut raw = base_request();
        raw["household"][0]["livingPreferNotToSay"] = json!(true);
        raw["household"][0]["livingRenting"] = json!(true);
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("livingPreferNotToSay")));
    }

    #[test]
    fn rejects_rental_on_lease_when_not_renting() {
        let mut raw = base_request();
        raw["person"][0]["livingRentalOnLease"] = json!(true);
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("livingRentalOnLease")));
    }

    #[test]
    fn rejects_owner_on_deed_when_not_owner() {
        let mut raw = base_request();
        raw["person"][0]["livingOwnerOnDeed"] = json!(true);
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("livingOwnerOnDeed")));
    }

    #[test]
    fn rejects_amounts_with_more_than_two_decimal_places() {
        let mut raw = base_request();
        raw["person"][0]["incomes"] = json!([
            { "amount": 100.123, "type": "Wages", "frequency": "Monthly" }
        ]);
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("decimal places")));
    }

    #[test]
    fn rejects_age_above_150() {
        let mut raw = base_request();
        raw["person"][0]["age"] = json!(9000);
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("age")));
    }

    #[test]
    fn rejects_more_than_eight_persons() {
        let mut raw = base_request();
        let persons = raw["person"].as_array_mut().unwrap();
        for _ in 0..8 {
            persons.push(json!({ "age": 10 }));
        }
        let errors = validate(&raw).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("at most 8 persons")));
    }
}
