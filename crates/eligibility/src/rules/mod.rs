//! The rule catalog: an append-only, insertion-ordered registry of
//! independent predicates, one per program. Each predicate reads only the
//! aggregate bundle and the validated request; none may mutate state or
//! depend on another rule's outcome.

pub mod health;
pub mod housing;
pub mod income_support;
pub mod tax_credits;
pub mod universal;
pub mod utilities;
pub mod youth_education;

use crate::aggregate::AggregateEligibilityRequest;

/// One entry in the catalog: a program code, a human label, and the pure
/// predicate that decides membership.
pub struct RuleDescriptor {
    pub code: &'static str,
    pub description: &'static str,
    pub predicate: fn(&AggregateEligibilityRequest) -> bool,
}

/// All registered rules, in catalog order. Grouped by theme module but the
/// order here is what the driver iterates and reports against.
pub fn rules() -> Vec<&'static RuleDescriptor> {
    let mut all = Vec::with_capacity(48);
    all.extend(universal::RULES.iter());
    all.extend(tax_credits::RULES.iter());
    all.extend(income_support::RULES.iter());
    all.extend(housing::RULES.iter());
    all.extend(health::RULES.iter());
    all.extend(utilities::RULES.iter());
    all.extend(youth_education::RULES.iter());
    all
}

/// Looks up a size-keyed threshold table, extrapolating past its largest
/// entry at `delta` per additional person.
pub(crate) fn threshold_with_extrapolation(table: &[(usize, f64)], delta: f64, size: usize) -> f64 {
    let (max_size, max_value) = table
        .iter()
        .copied()
        .max_by_key(|(s, _)| *s)
        .expect("threshold table must not be empty");
    if size <= max_size {
        table
            .iter()
            .find(|(s, _)| *s == size)
            .map(|(_, v)| *v)
            .unwrap_or(max_value)
    } else {
        max_value + delta * (size - max_size) as f64
    }
}

/// Looks up a size-keyed threshold table with no extrapolation: sizes absent
/// from the table have no threshold, matching the source's behavior of the
/// membership test simply failing.
pub(crate) fn threshold_no_extrapolation(table: &[(usize, f64)], size: usize) -> Option<f64> {
    table.iter().find(|(s, _)| *s == size).map(|(_, v)| *v)
}
