use crate::aggregate::AggregateEligibilityRequest;
use crate::enums::IncomeType;
use crate::rules::{threshold_no_extrapolation, RuleDescriptor};

fn wic(ctx: &AggregateEligibilityRequest) -> bool {
    if !ctx.request.person.iter().any(|p| p.pregnant || p.age < 5) {
        return false;
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 27_861.0),
        (2, 37_814.0),
        (3, 47_767.0),
        (4, 57_720.0),
        (5, 67_673.0),
        (6, 77_626.0),
        (7, 87_579.0),
        (8, 97_532.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

fn nyc_care(ctx: &AggregateEligibilityRequest) -> bool {
    if !ctx
        .request
        .person
        .iter()
        .any(|p| !(p.benefits_medicaid || p.benefits_medicaid_disability))
    {
        return false;
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 2_799.0),
        (2, 3_799.0),
        (3, 4_799.0),
        (4, 5_598.0),
        (5, 6_798.0),
        (6, 7_798.0),
        (7, 8_798.0),
        (8, 9_798.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_monthly <= threshold,
        None => false,
    }
}

fn home_care_services_program(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| p.benefits_medicaid)
}

fn medicaid_for_pregnant_women(ctx: &AggregateEligibilityRequest) -> bool {
    if !ctx.request.person.iter().any(|p| p.pregnant) {
        return false;
    }
    let size = ctx.request.person.len();
    const TABLE: [(usize, f64); 8] = [
        (1, 33_584.0),
        (2, 45_581.0),
        (3, 57_579.0),
        (4, 69_576.0),
        (5, 81_573.0),
        (6, 93_571.0),
        (7, 105_568.0),
        (8, 117_566.0),
    ];
    match threshold_no_extrapolation(&TABLE, size) {
        Some(threshold) => ctx.aggregate.income_household_total_yearly <= threshold,
        None => false,
    }
}

fn ny_connects(ctx: &AggregateEligibilityRequest) -> bool {
    ctx.request.person.iter().any(|p| {
        p.blind
            || p.disabled
            || p.benefits_medicaid_disability
            || p.incomes.iter().any(|inc| inc.kind == IncomeType::DisabilityMedicaid)
    })
}

pub static RULES: &[RuleDescriptor] = &[
    RuleDescriptor {
        code: "S2R022",
        description: "Women, Infants, and Children (WIC)",
        predicate: wic,
    },
    RuleDescriptor {
        code: "S2R031",
        description: "NYC Care",
        predicate: nyc_care,
    },
    RuleDescriptor {
        code: "S2R037",
        description: "Home Care Services Program",
        predicate: home_care_services_program,
    },
    RuleDescriptor {
        code: "S2R038",
        description: "Medicaid for Pregnant Women",
        predicate: medicaid_for_pregnant_women,
    },
    RuleDescriptor {
        code: "S2R047",
        description: "NY Connects",
        predicate: ny_connects,
    },
];
