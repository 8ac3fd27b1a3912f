//! Orchestrates the full screening pipeline: legacy shim, validation,
//! aggregation, then the rule catalog. Each rule is evaluated behind
//! `catch_unwind` so one faulty predicate can't take down the others.

use crate::aggregate::AggregateEligibilityRequest;
use crate::rules;
use crate::shim;
use crate::validator;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningOutcome {
    pub success: bool,
    pub eligible_programs: Vec<String>,
    pub total_programs_eligible: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreeningFailure {
    pub success: bool,
    pub errors: Vec<String>,
}

impl ScreeningFailure {
    fn new(errors: Vec<String>) -> Self {
        Self { success: false, errors }
    }
}

/// Runs the full pipeline against a raw JSON body. A legacy Drools command
/// list is rewritten before validation; everything else is passed through
/// unchanged. Rule faults are isolated and logged, never propagated.
pub fn screen(raw: &Value) -> Result<ScreeningOutcome, ScreeningFailure> {
    let canonical = match shim::convert_if_legacy(raw) {
        Some(Ok(body)) => body,
        Some(Err(message)) => return Err(ScreeningFailure::new(vec![message])),
        None => raw.clone(),
    };

    let request = validator::validate(&canonical).map_err(ScreeningFailure::new)?;
    let aggregated = AggregateEligibilityRequest::build(&request);

    let mut eligible = Vec::new();
    let mut seen = HashSet::new();

    for rule in rules::rules() {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (rule.predicate)(&aggregated)));
        match outcome {
            Ok(true) => {
                if seen.insert(rule.code) {
                    eligible.push(rule.code.to_string());
                }
            }
            Ok(false) => {}
            Err(_) => {
                tracing::warn!(
                    program = rule.code,
                    description = rule.description,
                    "rule raised an exception during evaluation"
                );
            }
        }
    }

    Ok(ScreeningOutcome {
        success: true,
        total_programs_eligible: eligible.len(),
        eligible_programs: eligible,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn a_minimal_household_is_screened_successfully() {
        let body = json!({
            "household": [{ "livingRenting": false }],
            "person": [{ "age": 30, "householdMemberType": "HeadOfHousehold" }]
        });
        let outcome = screen(&body).unwrap();
        assert!(outcome.success);
        assert!(outcome.eligible_programs.contains(&"S2R011".to_string()));
        assert_eq!(outcome.total_programs_eligible, outcome.eligible_programs.len());
    }

    #[test]
    fn closed_program_never_appears() {
        let body = json!({
            "household": [{ "livingRenting": false }],
            "person": [{ "age": 30, "householdMemberType": "HeadOfHousehold" }]
        });
        let outcome = screen(&body).unwrap();
        assert!(!outcome.eligible_programs.contains(&"S2R053".to_string()));
    }

    #[test]
    fn eligible_programs_has_no_duplicates() {
        let body = json!({
            "household": [{ "livingRenting": false }],
            "person": [{ "age": 30, "householdMemberType": "HeadOfHousehold" }]
        });
        let outcome = screen(&body).unwrap();
        let unique: HashSet<_> = outcome.eligible_programs.iter().collect();
        assert_eq!(unique.len(), outcome.eligible_programs.len());
    }

    #[test]
    fn invalid_requests_return_validation_errors_not_a_panic() {
        let body = json!({ "household": [{}], "person": [] });
        let failure = screen(&body).unwrap_err();
        assert!(!failure.success);
        assert!(!failure.errors.is_empty());
    }

    #[test]
    fn legacy_drools_payloads_are_converted_before_validation() {
        let body = json!({
            "commands": [
                { "insert": { "object": {
                    "accessnyc.request.Household": {
                        "livingRenting": "false"
                    }
                }}},
                { "insert": { "object": {
                    "accessnyc.request.Person": {
                        "age": "40",
                        "applicant": "true"
                    }
                }}}
            ]
        });
        let outcome = screen(&body).unwrap();
        assert!(outcome.success);
    }
}
