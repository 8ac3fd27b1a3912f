//! Legacy Drools-format ingestion shim.
//!
//! Some upstream callers still POST a `{"commands": [...]}` payload shaped
//! after the old Drools working-memory inserts rather than the canonical
//! request body. `convert` detects that shape and rewrites it into the
//! canonical JSON; anything else passes through untouched.

use serde_json::{Map, Value};

const BOOLEAN_PERSON_FIELDS: [&str; 12] = [
    "student",
    "pregnant",
    "studentFulltime",
    "blind",
    "disabled",
    "veteran",
    "unemployed",
    "unemployedWorkedLast18Months",
    "benefitsMedicaid",
    "benefitsMedicaidDisability",
    "livingOwnerOnDeed",
    "livingRentalOnLease",
];

const BOOLEAN_HOUSEHOLD_FIELDS: [&str; 6] = [
    "livingPreferNotToSay",
    "livingRenting",
    "livingOwner",
    "livingStayingWithFriend",
    "livingHotel",
    "livingShelter",
];

/// Returns `Some(canonical_body)` if `raw` was a Drools command list and could
/// be converted, `None` if it wasn't in that shape at all (caller should pass
/// `raw` through untouched), or an error string if it looked like a Drools
/// payload but carried no usable household/person objects.
pub fn convert_if_legacy(raw: &Value) -> Option<Result<Value, String>> {
    let commands = raw.get("commands")?.as_array()?;

    let mut household = None;
    let mut persons = Vec::new();

    for command in commands {
        let Some(object) = command
            .get("insert")
            .and_then(|i| i.get("object"))
            .and_then(Value::as_object)
        else {
            continue;
        };
        if let Some(fields) = object.get("accessnyc.request.Household") {
            household = Some(convert_household(fields));
        } else if let Some(fields) = object.get("accessnyc.request.Person") {
            persons.push(convert_person(fields));
        }
    }

    if household.is_none() && persons.is_empty() {
        return Some(Err("Failed to convert Drools format payload".to_string()));
    }

    let mut body = Map::new();
    let household_array = match household {
        Some(household) => vec![household],
        None => Vec::new(),
    };
    body.insert("household".to_string(), Value::Array(household_array));
    body.insert("person".to_string(), Value::Array(persons));
    body.insert("withholdPayload".to_string(), Value::Bool(true));
    Some(Ok(Value::Object(body)))
}

fn convert_boolean_string(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn convert_to_number(value: Option<&Value>) -> Option<f64> {
    match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if !s.is_empty() => s.parse::<f64>().ok(),
        _ => None,
    }
}

fn convert_household(object: &Value) -> Value {
    let mut out = Map::new();

    if let Some(amount) = convert_to_number(object.get("cashOnHand")) {
        out.insert("cashOnHand".to_string(), serde_json::json!(amount));
    }
    if let Some(Value::String(rental_type)) = object.get("livingRentalType") {
        out.insert("livingRentalType".to_string(), Value::String(rental_type.clone()));
    }
    for field in BOOLEAN_HOUSEHOLD_FIELDS {
        out.insert(field.to_string(), Value::Bool(convert_boolean_string(object.get(field))));
    }

    Value::Object(out)
}

fn convert_person(object: &Value) -> Value {
    let mut out = Map::new();

    if let Some(age) = convert_to_number(object.get("age")) {
        out.insert("age".to_string(), serde_json::json!(age as i64));
    }

    let applicant = object.get("applicant");
    let head_of_household = object.get("headOfHousehold");
    if applicant.is_some() || head_of_household.is_some() {
        let is_head = convert_boolean_string(applicant) || convert_boolean_string(head_of_household);
        out.insert(
            "householdMemberType".to_string(),
            Value::String(if is_head { "HeadOfHousehold" } else { "HouseholdMember" }.to_string()),
        );
    }

    for field in BOOLEAN_PERSON_FIELDS {
        out.insert(field.to_string(), Value::Bool(convert_boolean_string(object.get(field))));
    }

    if let Some(incomes) = object.get("incomes").and_then(Value::as_array) {
        let converted: Vec<Value> = incomes.iter().filter_map(convert_income_expense).collect();
        if !converted.is_empty() {
            out.insert("incomes".to_string(), Value::Array(converted));
        }
    }
    if let Some(expenses) = object.get("expenses").and_then(Value::as_array) {
        let converted: Vec<Value> = expenses.iter().filter_map(convert_income_expense).collect();
        if !converted.is_empty() {
            out.insert("expenses".to_string(), Value::Array(converted));
        }
    }

    Value::Object(out)
}

fn convert_income_expense(entry: &Value) -> Option<Value> {
    let amount = convert_to_number(entry.get("amount"))?;
    let kind = entry.get("type")?.as_str()?.to_string();
    let frequency = entry
        .get("frequency")
        .and_then(Value::as_str)
        .map(capitalize)
        .unwrap_or_default();

    Some(serde_json::json!({ "amount": amount, "type": kind, "frequency": frequency }))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_ascii_lowercase(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn passes_through_non_legacy_payloads() {
        let raw = json!({ "household": [{}], "person": [{ "age": 30 }] });
        assert!(convert_if_legacy(&raw).is_none());
    }

    #[test]
    fn converts_a_minimal_command_list() {
        let raw = json!({
            "commands": [
                { "insert": { "object": {
                    "accessnyc.request.Household": {
                        "livingRenting": "true",
                        "cashOnHand": "500"
                    }
                }}},
                { "insert": { "object": {
                    "accessnyc.request.Person": {
                        "age": "34",
                        "applicant": "true"
                    }
                }}}
            ]
        });
        let converted = convert_if_legacy(&raw).unwrap().unwrap();
        assert_eq!(converted["withholdPayload"], json!(true));
        assert_eq!(converted["household"][0]["livingRenting"], json!(true));
        assert_eq!(converted["household"][0]["cashOnHand"], json!(500.0));
        assert_eq!(converted["person"][0]["householdMemberType"], json!("HeadOfHousehold"));
    }

    #[test]
    fn person_only_payload_yields_an_empty_household_array() {
        let raw = json!({
            "commands": [
                { "insert": { "object": {
                    "accessnyc.request.Person": { "age": "30", "applicant": "true" }
                }}}
            ]
        });
        let converted = convert_if_legacy(&raw).unwrap().unwrap();
        assert_eq!(converted["household"], json!([]));
        assert_eq!(converted["person"][0]["age"], json!(30));
        assert_eq!(converted["person"][0]["householdMemberType"], json!("HeadOfHousehold"));
        assert_eq!(converted["withholdPayload"], json!(true));
    }

    #[test]
    fn reports_failure_when_nothing_extractable() {
        let raw = json!({ "commands": [{ "insert": { "object": { "other.Thing": {} }}}] });
        let result = convert_if_legacy(&raw).unwrap();
        assert!(result.is_err());
    }

    #[test]
    fn capitalizes_frequency_strings() {
        let entry = json!({ "amount": "100", "type": "Wages", "frequency": "MONTHLY" });
        let converted = convert_income_expense(&entry).unwrap();
        assert_eq!(converted["frequency"], json!("Monthly"));
    }
}
