//! Canonical request shape. Field names are the canonical `snake_case` form;
//! the wire alias (the `camelCase` name accepted on input) is attached via
//! `#[serde(alias = "...")]` so both spellings parse to the same field.

use crate::enums::{ExpenseType, Frequency, HouseholdMemberType, IncomeType, LivingRentalType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Income {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: IncomeType,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: ExpenseType,
    pub frequency: Frequency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub age: u16,
    #[serde(default)]
    pub student: bool,
    #[serde(default, alias = "studentFulltime")]
    pub student_fulltime: bool,
    #[serde(default)]
    pub pregnant: bool,
    #[serde(default)]
    pub unemployed: bool,
    #[serde(default, alias = "unemployedWorkedLast18Months")]
    pub unemployed_worked_last_18_months: bool,
    #[serde(default)]
    pub blind: bool,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub veteran: bool,
    #[serde(default, alias = "benefitsMedicaid")]
    pub benefits_medicaid: bool,
    #[serde(default, alias = "benefitsMedicaidDisability")]
    pub benefits_medicaid_disability: bool,
    #[serde(default, alias = "livingOwnerOnDeed")]
    pub living_owner_on_deed: bool,
    #[serde(default, alias = "livingRentalOnLease")]
    pub living_rental_on_lease: bool,
    #[serde(default)]
    pub incomes: Vec<Income>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default, alias = "householdMemberType")]
    pub household_member_type: Option<HouseholdMemberType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Household {
    #[serde(default, alias = "caseId")]
    pub case_id: Option<String>,
    #[serde(default, alias = "cashOnHand")]
    pub cash_on_hand: Option<f64>,
    #[serde(default, alias = "livingRentalType")]
    pub living_rental_type: Option<LivingRentalType>,
    #[serde(default, alias = "livingRenting")]
    pub living_renting: bool,
    #[serde(default, alias = "livingOwner")]
    pub living_owner: bool,
    #[serde(default, alias = "livingStayingWithFriend")]
    pub living_staying_with_friend: bool,
    #[serde(default, alias = "livingHotel")]
    pub living_hotel: bool,
    #[serde(default, alias = "livingShelter")]
    pub living_shelter: bool,
    #[serde(default, alias = "livingPreferNotToSay")]
    pub living_prefer_not_to_say: bool,
}

/// A validated request. Construction is only possible through
/// [`crate::validator::validate`], which enforces every per-field and
/// cross-field constraint before handing back this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityRequest {
    #[serde(default, alias = "withholdPayload")]
    pub withhold_payload: bool,
    pub household: Vec<Household>,
    pub person: Vec<Person>,
}

impl EligibilityRequest {
    pub fn household(&self) -> &Household {
        &self.household[0]
    }
}
