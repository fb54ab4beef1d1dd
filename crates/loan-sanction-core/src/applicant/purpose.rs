use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::LoanError;

/// Declared use of the loan funds
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanPurpose {
    #[serde(alias = "Debt Consolidation")]
    DebtConsolidation,
    #[serde(alias = "Home Renovation")]
    HomeRenovation,
    #[serde(alias = "Medical Expenses")]
    MedicalExpenses,
    #[serde(alias = "Education")]
    Education,
    #[serde(alias = "Business")]
    Business,
    #[serde(alias = "Wedding")]
    Wedding,
    #[serde(alias = "Travel")]
    Travel,
    #[serde(alias = "Vehicle Purchase")]
    VehiclePurchase,
    #[default]
    #[serde(alias = "Others")]
    Others,
}

impl LoanPurpose {
    pub const ALL: [LoanPurpose; 9] = [
        LoanPurpose::DebtConsolidation,
        LoanPurpose::HomeRenovation,
        LoanPurpose::MedicalExpenses,
        LoanPurpose::Education,
        LoanPurpose::Business,
        LoanPurpose::Wedding,
        LoanPurpose::Travel,
        LoanPurpose::VehiclePurchase,
        LoanPurpose::Others,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LoanPurpose::DebtConsolidation => "Debt Consolidation",
            LoanPurpose::HomeRenovation => "Home Renovation",
            LoanPurpose::MedicalExpenses => "Medical Expenses",
            LoanPurpose::Education => "Education",
            LoanPurpose::Business => "Business",
            LoanPurpose::Wedding => "Wedding",
            LoanPurpose::Travel => "Travel",
            LoanPurpose::VehiclePurchase => "Vehicle Purchase",
            LoanPurpose::Others => "Others",
        }
    }
}

impl fmt::Display for LoanPurpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for LoanPurpose {
    type Err = LoanError;

    /// Matches labels loosely: case, spaces, `-` and `_` are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = |text: &str| -> String {
            text.chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .map(|c| c.to_ascii_lowercase())
                .collect()
        };
        let wanted = key(s);
        LoanPurpose::ALL
            .into_iter()
            .find(|p| key(p.label()) == wanted)
            .ok_or_else(|| LoanError::invalid("purpose", format!("unknown loan purpose '{s}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_is_lenient() {
        assert_eq!("home-renovation".parse::<LoanPurpose>().unwrap(), LoanPurpose::HomeRenovation);
        assert_eq!("Vehicle Purchase".parse::<LoanPurpose>().unwrap(), LoanPurpose::VehiclePurchase);
        assert_eq!("EDUCATION".parse::<LoanPurpose>().unwrap(), LoanPurpose::Education);
        assert!("yacht".parse::<LoanPurpose>().is_err());
    }

    #[test]
    fn test_serde_accepts_label_and_snake_case() {
        let a: LoanPurpose = serde_json::from_str(r#""medical_expenses""#).unwrap();
        let b: LoanPurpose = serde_json::from_str(r#""Medical Expenses""#).unwrap();
        assert_eq!(a, b);
        assert_eq!(serde_json::to_string(&a).unwrap(), r#""medical_expenses""#);
    }
}
