//! Programs with no eligibility test, plus the one program that is
//! permanently closed to new applicants.

use crate::aggregate::AggregateEligibilityRequest;
use crate::rules::RuleDescriptor;

fn universal_benefit_info(_ctx: &AggregateEligibilityRequest) -> bool {
    true
}

fn library_card(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| p.age >= 5)
}

/// Closed February 8 2024. No household ever qualifies, regardless of the
/// eligibility rules that applied while the program was open.
fn affordable_connectivity_program(_ctx: &AggregateEligibilityRequest) -> bool {
    false
}

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        code: "S2R011",
        description: "Universal Benefit Information",
        predicate: universal_benefit_info,
    },
    RuleDescriptor {
        code: "S2R056",
        description: "Universal Benefit Information (duplicate)",
        predicate: universal_benefit_info,
    },
    RuleDescriptor {
        code: "S2R046",
        description: "NYC Library Card",
        predicate: library_card,
    },
    RuleDescriptor {
        code: "S2R053",
        description: "Affordable Connectivity Program",
        predicate: affordable_connectivity_program,
    },
];
