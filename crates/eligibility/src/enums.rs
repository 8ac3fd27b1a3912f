//! Closed value sets shared by the request model and the rule catalog.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Weekly,
    Biweekly,
    Semimonthly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncomeType {
    Wages,
    SelfEmployment,
    Unemployment,
    CashAssistance,
    ChildSupport,
    DisabilityMedicaid,
    SSI,
    SSDependent,
    SSDisability,
    SSSurvivor,
    SSRetirement,
    NYSDisability,
    Veteran,
    Pension,
    DeferredComp,
    WorkersComp,
    Alimony,
    Boarder,
    Gifts,
    Rental,
    Investment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseType {
    ChildCare,
    ChildSupport,
    DependentCare,
    Rent,
    Medical,
    Heating,
    Cooling,
    Mortgage,
    Utilities,
    Telephone,
    InsurancePremiums,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HouseholdMemberType {
    HeadOfHousehold,
    Child,
    FosterChild,
    StepChild,
    Grandchild,
    Spouse,
    Parent,
    FosterParent,
    StepParent,
    Grandparent,
    SisterBrother,
    StepSisterStepBrother,
    BoyfriendGirlfriend,
    DomesticPartner,
    Unrelated,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LivingRentalType {
    NYCHA,
    MarketRate,
    RentControlled,
    RentRegulatedHotel,
    Section213,
    LimitedDividendDevelopment,
    MitchellLama,
    RedevelopmentCompany,
    HDFC,
    FamilyHome,
    Condo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn income_type_round_trips_wire_spelling() {
        let value = serde_json::to_string(&IncomeType::SelfEmployment).unwrap();
        assert_eq!(value, "\"SelfEmployment\"");
        let parsed: IncomeType = serde_json::from_str("\"SelfEmployment\"").unwrap();
        matches!(parsed, IncomeType::SelfEmployment);
    }

    #[test]
    fn living_rental_type_pins_acronym_casing() {
        let value = serde_json::to_string(&LivingRentalType::NYCHA).unwrap();
        assert_eq!(value, "\"NYCHA\"");
        let value = serde_json::to_string(&LivingRentalType::HDFC).unwrap();
        assert_eq!(value, "\"HDFC\"");
    }

    #[test]
    fn unknown_enum_string_is_rejected() {
        let parsed: Result<Frequency, _> = serde_json::from_str("\"Fortnightly\"");
        assert!(parsed.is_err());
    }
}
