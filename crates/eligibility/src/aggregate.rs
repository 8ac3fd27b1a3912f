//! Pure derivation of the aggregate bundle from a validated request.
//!
//! Frequency factors and the member/income type groupings below are the
//! contract: every program rule reads its inputs from here, never from the
//! raw request.

use crate::enums::{ExpenseType, Frequency, HouseholdMemberType, IncomeType};
use crate::model::EligibilityRequest;
use std::collections::HashMap;

fn frequency_to_monthly(frequency: Frequency) -> f64 {
    match frequency {
        Frequency::Weekly => 4.3333333333333,
        Frequency::Biweekly => 2.166666666667,
        Frequency::Semimonthly => 2.0,
        Frequency::Monthly => 1.0,
        Frequency::Yearly => 1.0 / 12.0,
    }
}

fn to_monthly(amount: f64, frequency: Frequency) -> f64 {
    amount * frequency_to_monthly(frequency)
}

fn to_yearly(amount: f64, frequency: Frequency) -> f64 {
    to_monthly(amount, frequency) * 12.0
}

const NUCLEAR_FAMILY_TYPES: [HouseholdMemberType; 4] = [
    HouseholdMemberType::HeadOfHousehold,
    HouseholdMemberType::Spouse,
    HouseholdMemberType::Child,
    HouseholdMemberType::StepChild,
];

const CHILD_TYPES: [HouseholdMemberType; 2] =
    [HouseholdMemberType::Child, HouseholdMemberType::StepChild];

const ISY_EXCLUDED_INCOME_TYPES: [IncomeType; 5] = [
    IncomeType::ChildSupport,
    IncomeType::CashAssistance,
    IncomeType::SSSurvivor,
    IncomeType::SSI,
    IncomeType::Unemployment,
];

const EARNED_INCOME_TYPES: [IncomeType; 2] = [IncomeType::Wages, IncomeType::SelfEmployment];

const CASH_ASSISTANCE_INCOME_TYPES: [IncomeType; 18] = [
    IncomeType::Alimony,
    IncomeType::Boarder,
    IncomeType::CashAssistance,
    IncomeType::ChildSupport,
    IncomeType::Gifts,
    IncomeType::Investment,
    IncomeType::Pension,
    IncomeType::Rental,
    IncomeType::SelfEmployment,
    IncomeType::SSDependent,
    IncomeType::SSDisability,
    IncomeType::SSRetirement,
    IncomeType::SSSurvivor,
    IncomeType::SSI,
    IncomeType::Unemployment,
    IncomeType::Veteran,
    IncomeType::Wages,
    IncomeType::WorkersComp,
];

const BENEFIT_INCOME_TYPES: [IncomeType; 5] = [
    IncomeType::Veteran,
    IncomeType::SSI,
    IncomeType::SSRetirement,
    IncomeType::SSDisability,
    IncomeType::SSSurvivor,
];

/// Immutable snapshot of every derived field the rule catalog reads.
/// Built once per request and shared read-only with all rules.
#[derive(Debug, Clone, Default)]
pub struct AggregateBundle {
    pub head_of_household_married: bool,
    pub members_nuclear_only: usize,
    pub foster_children: usize,
    pub members_pregnant: usize,
    pub members_pregnant_not_foster: usize,
    pub members_plus_pregnant_minus_foster: i64,
    pub members_plus_pregnant: usize,
    pub children_student_blind_disabled_eitc: usize,
    pub child_care_voucher_household_members: usize,
    pub household_all_adults: bool,

    pub income_person_wage_self_employment_monthly: HashMap<usize, f64>,
    pub income_person_wage_self_employment_boarder_monthly: HashMap<usize, f64>,
    pub income_person_earned_yearly: HashMap<usize, f64>,
    pub income_person_investment_yearly: HashMap<usize, f64>,
    pub income_person_gifts_monthly: HashMap<usize, f64>,
    pub income_person_monthly: HashMap<usize, f64>,
    pub income_person_yearly: HashMap<usize, f64>,
    pub income_person_isy_monthly: HashMap<usize, f64>,
    pub income_person_isy_yearly: HashMap<usize, f64>,
    pub income_person_ses_monthly: HashMap<usize, f64>,

    pub income_household_total_monthly: f64,
    pub income_household_total_yearly: f64,
    pub income_household_total_monthly_less_foster: f64,
    pub income_household_total_monthly_less_gifts: f64,
    pub income_household_wage_self_employment_monthly: f64,
    pub income_household_unearned_monthly: f64,
    pub income_household_boarder_monthly: f64,
    pub income_household_nuclear_isy_yearly: f64,
    pub income_household_monthly_ca: f64,
    pub income_household_monthly_ca_minus_work_expense: f64,

    pub income_head_earned_yearly: f64,
    pub income_head_and_spouse_earned_yearly: f64,
    pub income_head_and_spouse_ses_monthly: f64,
    pub income_owners_total_yearly: f64,
    pub income_adults_children_total_monthly: f64,
    pub income_child_care_voucher_total_monthly: f64,
    pub income_adults_total_monthly: f64,

    pub income_household_has_cash_assistance: bool,
    pub income_household_has_ui: bool,
    pub income_household_has_benefit: bool,
    pub income_household_has_ssi: bool,

    pub expense_household_child_dependent_care_monthly: f64,
    pub expense_household_medical_monthly: f64,
    pub expense_household_rent_mortgage_monthly: f64,
    pub expense_household_rent_monthly: f64,
    pub expense_household_child_support_monthly: f64,
    pub expense_household_has_heating: bool,
    pub expense_household_has_dependent_care: bool,
    pub expense_household_has_child_or_dependent_care: bool,
}

/// Wraps a validated request together with its derived aggregate bundle;
/// this is what rule predicates see.
pub struct AggregateEligibilityRequest<'a> {
    pub request: &'a EligibilityRequest,
    pub aggregate: AggregateBundle,
}

impl<'a> AggregateEligibilityRequest<'a> {
    pub fn build(request: &'a EligibilityRequest) -> Self {
        Self {
            aggregate: compute_aggregates(request),
            request,
        }
    }
}

pub fn compute_aggregates(request: &EligibilityRequest) -> AggregateBundle {
    let persons = &request.person;
    let mut bundle = AggregateBundle::default();

    let head_index = persons
        .iter()
        .position(|p| p.household_member_type == Some(HouseholdMemberType::HeadOfHousehold));
    let spouse_index = persons
        .iter()
        .position(|p| p.household_member_type == Some(HouseholdMemberType::Spouse));

    bundle.head_of_household_married = spouse_index.is_some();
    bundle.members_nuclear_only = persons
        .iter()
        .filter(|p| matches_any(p.household_member_type, &NUCLEAR_FAMILY_TYPES))
        .count();
    bundle.foster_children = persons
        .iter()
        .filter(|p| p.household_member_type == Some(HouseholdMemberType::FosterChild))
        .count();
    bundle.members_pregnant = persons.iter().filter(|p| p.pregnant).count();
    bundle.members_pregnant_not_foster = persons
        .iter()
        .filter(|p| p.pregnant && p.household_member_type != Some(HouseholdMemberType::FosterChild))
        .count();

    let total_members = persons.len();
    bundle.members_plus_pregnant_minus_foster =
        total_members as i64 + bundle.members_pregnant as i64 - bundle.foster_children as i64;
    bundle.members_plus_pregnant = total_members + bundle.members_pregnant;

    bundle.children_student_blind_disabled_eitc = persons
        .iter()
        .filter(|p| {
            matches_any(p.household_member_type, &CHILD_TYPES)
                && (p.age < 19 || (p.age < 24 && p.student) || p.blind || p.disabled)
        })
        .count();

    bundle.child_care_voucher_household_members = total_members - bundle.foster_children;
    bundle.household_all_adults = persons.iter().all(|p| p.age >= 18);

    for (i, person) in persons.iter().enumerate() {
        let mut wage_self_employment_monthly = 0.0;
        let mut boarder_monthly = 0.0;
        let mut investment_yearly = 0.0;
        let mut gifts_monthly = 0.0;
        let mut total_monthly = 0.0;

        for income in &person.incomes {
            let monthly = to_monthly(income.amount, income.frequency);
            let yearly = to_yearly(income.amount, income.frequency);
            total_monthly += monthly;

            if EARNED_INCOME_TYPES.contains(&income.kind) {
                wage_self_employment_monthly += monthly;
            } else if income.kind == IncomeType::Boarder {
                boarder_monthly += monthly;
            } else if matches!(income.kind, IncomeType::Investment | IncomeType::Rental) {
                investment_yearly += yearly;
            } else if income.kind == IncomeType::Gifts {
                gifts_monthly += monthly;
            }
        }

        bundle
            .income_person_wage_self_employment_monthly
            .insert(i, wage_self_employment_monthly);
        bundle
            .income_person_wage_self_employment_boarder_monthly
            .insert(i, wage_self_employment_monthly + boarder_monthly);
        bundle
            .income_person_earned_yearly
            .insert(i, wage_self_employment_monthly * 12.0);
        bundle.income_person_investment_yearly.insert(i, investment_yearly);
        bundle.income_person_gifts_monthly.insert(i, gifts_monthly);
        bundle.income_person_monthly.insert(i, total_monthly);
        bundle.income_person_yearly.insert(i, total_monthly * 12.0);

        let isy_monthly: f64 = person
            .incomes
            .iter()
            .filter(|inc| !ISY_EXCLUDED_INCOME_TYPES.contains(&inc.kind))
            .map(|inc| to_monthly(inc.amount, inc.frequency))
            .sum();
        bundle.income_person_isy_monthly.insert(i, isy_monthly);
        bundle.income_person_isy_yearly.insert(i, isy_monthly * 12.0);

        let ses_monthly: f64 = person
            .incomes
            .iter()
            .map(|inc| {
                let monthly = to_monthly(inc.amount, inc.frequency);
                if matches!(inc.kind, IncomeType::SSRetirement | IncomeType::SSSurvivor) {
                    monthly * 0.75
                } else {
                    monthly
                }
            })
            .sum();
        bundle.income_person_ses_monthly.insert(i, ses_monthly);
    }

    bundle.income_household_total_monthly = bundle.income_person_monthly.values().sum();
    bundle.income_household_total_yearly = bundle.income_household_total_monthly * 12.0;

    bundle.income_household_total_monthly_less_foster = persons
        .iter()
        .enumerate()
        .filter(|(_, p)| p.household_member_type != Some(HouseholdMemberType::FosterChild))
        .map(|(i, _)| bundle.income_person_monthly.get(&i).copied().unwrap_or(0.0))
        .sum();

    bundle.income_household_total_monthly_less_gifts = persons
        .iter()
        .enumerate()
        .map(|(i, _)| {
            bundle.income_person_monthly.get(&i).copied().unwrap_or(0.0)
                - bundle.income_person_gifts_monthly.get(&i).copied().unwrap_or(0.0)
        })
        .sum();

    bundle.income_household_wage_self_employment_monthly = bundle
        .income_person_wage_self_employment_monthly
        .values()
        .sum();

    bundle.income_household_unearned_monthly = persons
        .iter()
        .flat_map(|p| p.incomes.iter())
        .filter(|inc| {
            !matches!(
                inc.kind,
                IncomeType::Wages | IncomeType::SelfEmployment | IncomeType::Boarder
            )
        })
        .map(|inc| to_monthly(inc.amount, inc.frequency))
        .sum();

    bundle.income_household_boarder_monthly = persons
        .iter()
        .flat_map(|p| p.incomes.iter())
        .filter(|inc| inc.kind == IncomeType::Boarder)
        .map(|inc| to_monthly(inc.amount, inc.frequency))
        .sum();

    bundle.income_household_nuclear_isy_yearly = persons
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_any(p.household_member_type, &NUCLEAR_FAMILY_TYPES))
        .map(|(i, _)| bundle.income_person_isy_yearly.get(&i).copied().unwrap_or(0.0))
        .sum();

    let mut ca_monthly = 0.0;
    let mut employed_persons = 0;
    for person in persons {
        let mut person_ca_income = 0.0;
        let mut has_employment = false;
        for income in &person.incomes {
            if CASH_ASSISTANCE_INCOME_TYPES.contains(&income.kind) {
                person_ca_income += to_monthly(income.amount, income.frequency);
            }
            if EARNED_INCOME_TYPES.contains(&income.kind) {
                has_employment = true;
            }
        }
        ca_monthly += person_ca_income;
        if has_employment {
            employed_persons += 1;
        }
    }
    bundle.income_household_monthly_ca = ca_monthly;
    bundle.income_household_monthly_ca_minus_work_expense = ca_monthly - 150.0 * employed_persons as f64;

    bundle.income_head_earned_yearly = head_index
        .and_then(|i| bundle.income_person_earned_yearly.get(&i).copied())
        .unwrap_or(0.0);

    let mut head_spouse_earned = bundle.income_head_earned_yearly;
    if let Some(i) = spouse_index {
        head_spouse_earned += bundle.income_person_earned_yearly.get(&i).copied().unwrap_or(0.0);
    }
    bundle.income_head_and_spouse_earned_yearly = head_spouse_earned;

    let mut head_spouse_ses = 0.0;
    if let Some(i) = head_index {
        head_spouse_ses += bundle.income_person_ses_monthly.get(&i).copied().unwrap_or(0.0);
    }
    if let Some(i) = spouse_index {
        head_spouse_ses += bundle.income_person_ses_monthly.get(&i).copied().unwrap_or(0.0);
    }
    bundle.income_head_and_spouse_ses_monthly = head_spouse_ses;

    bundle.income_owners_total_yearly = persons
        .iter()
        .enumerate()
        .filter(|(_, p)| p.living_owner_on_deed)
        .map(|(i, _)| bundle.income_person_yearly.get(&i).copied().unwrap_or(0.0))
        .sum();

    bundle.income_adults_children_total_monthly = persons
        .iter()
        .enumerate()
        .filter(|(_, p)| matches_any(p.household_member_type, &NUCLEAR_FAMILY_TYPES))
        .map(|(i, _)| bundle.income_person_monthly.get(&i).copied().unwrap_or(0.0))
        .sum();

    bundle.income_child_care_voucher_total_monthly = persons
        .iter()
        .enumerate()
        .filter(|(_, p)| p.household_member_type != Some(HouseholdMemberType::FosterChild))
        .map(|(i, _)| bundle.income_person_monthly.get(&i).copied().unwrap_or(0.0))
        .sum();

    let mut adults_total = bundle.income_household_total_monthly;
    for (i, person) in persons.iter().enumerate() {
        if matches_any(person.household_member_type, &CHILD_TYPES) {
            adults_total -= bundle
                .income_person_wage_self_employment_monthly
                .get(&i)
                .copied()
                .unwrap_or(0.0);
        }
    }
    bundle.income_adults_total_monthly = adults_total;

    let all_incomes = || persons.iter().flat_map(|p| p.incomes.iter());
    bundle.income_household_has_cash_assistance =
        all_incomes().any(|inc| inc.kind == IncomeType::CashAssistance);
    bundle.income_household_has_ui = all_incomes().any(|inc| inc.kind == IncomeType::Unemployment);
    bundle.income_household_has_benefit =
        all_incomes().any(|inc| BENEFIT_INCOME_TYPES.contains(&inc.kind));
    bundle.income_household_has_ssi = all_incomes().any(|inc| inc.kind == IncomeType::SSI);

    let mut child_dependent_care_monthly = 0.0;
    let mut medical_monthly = 0.0;
    let mut rent_mortgage_monthly = 0.0;
    let mut rent_monthly = 0.0;
    let mut child_support_monthly = 0.0;
    let mut has_heating = false;
    let mut has_dependent_care = false;

    for person in persons {
        for expense in &person.expenses {
            let monthly = to_monthly(expense.amount, expense.frequency);
            if matches!(expense.kind, ExpenseType::ChildCare | ExpenseType::DependentCare) {
                child_dependent_care_monthly += monthly;
            }
            if expense.kind == ExpenseType::Medical {
                medical_monthly += monthly;
            }
            if matches!(expense.kind, ExpenseType::Rent | ExpenseType::Mortgage) {
                rent_mortgage_monthly += monthly;
            }
            if expense.kind == ExpenseType::Rent {
                rent_monthly += monthly;
            }
            if expense.kind == ExpenseType::ChildSupport {
                child_support_monthly += monthly;
            }
            if expense.kind == ExpenseType::Heating {
                has_heating = true;
            }
            if expense.kind == ExpenseType::DependentCare {
                has_dependent_care = true;
            }
        }
    }

    bundle.expense_household_child_dependent_care_monthly = child_dependent_care_monthly;
    bundle.expense_household_medical_monthly = medical_monthly;
    bundle.expense_household_rent_mortgage_monthly = rent_mortgage_monthly;
    bundle.expense_household_rent_monthly = rent_monthly;
    bundle.expense_household_child_support_monthly = child_support_monthly;
    bundle.expense_household_has_heating = has_heating;
    bundle.expense_household_has_dependent_care = has_dependent_care;
    bundle.expense_household_has_child_or_dependent_care = child_dependent_care_monthly > 0.0;

    bundle
}

fn matches_any(kind: Option<HouseholdMemberType>, set: &[HouseholdMemberType]) -> bool {
    kind.is_some_and(|k| set.contains(&k))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Household, Income, Person};

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

    fn request_with(persons: Vec<Person>) -> EligibilityRequest {
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
                living_shelter: false,
                living_prefer_not_to_say: false,
            }],
            person: persons,
        }
    }

    #[test]
    fn yearly_is_always_twelve_times_monthly() {
        let mut head = person(40, Some(HouseholdMemberType::HeadOfHousehold));
        head.incomes.push(Income {
            amount: 100.0,
            kind: IncomeType::Wages,
            frequency: Frequency::Weekly,
        });
        let request = request_with(vec![head]);
        let bundle = compute_aggregates(&request);

        assert!(
            (bundle.income_household_total_yearly - bundle.income_household_total_monthly * 12.0).abs()
                < 1e-6
        );
        let expected_monthly = 100.0 * 4.3333333333333;
        assert!((bundle.income_household_total_monthly - expected_monthly).abs() < 1e-6);
    }

    #[test]
    fn foster_child_income_does_not_affect_less_foster_total() {
        let head = person(40, Some(HouseholdMemberType::HeadOfHousehold));
        let mut foster = person(10, Some(HouseholdMemberType::FosterChild));
        foster.incomes.push(Income {
            amount: 500.0,
            kind: IncomeType::Gifts,
            frequency: Frequency::Monthly,
        });
        let request = request_with(vec![head, foster]);
        let bundle = compute_aggregates(&request);

        assert_eq!(bundle.income_household_total_monthly_less_foster, 0.0);
    }

    #[test]
    fn increasing_wages_never_decreases_household_totals() {
        let mut head = person(40, Some(HouseholdMemberType::HeadOfHousehold));
        head.incomes.push(Income {
            amount: 1000.0,
            kind: IncomeType::Wages,
            frequency: Frequency::Monthly,
        });
        let lower = compute_aggregates(&request_with(vec![head.clone()]));

        head.incomes[0].amount = 2000.0;
        let higher = compute_aggregates(&request_with(vec![head]));

        assert!(
            higher.income_household_wage_self_employment_monthly
                >= lower.income_household_wage_self_employment_monthly
        );
        assert!(higher.income_household_total_monthly >= lower.income_household_total_monthly);
    }
}
