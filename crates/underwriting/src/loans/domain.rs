use std::fmt;

use serde::{Deserialize, Serialize};

/// Property use declared on the application.
///
/// Values outside the three recognized buckets are kept verbatim so they can be persisted and
/// reported; they carry no occupancy-specific credit or LTV limits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Occupancy {
    Primary,
    Secondary,
    Investment,
    Unrecognized(String),
}

impl Occupancy {
    pub fn as_str(&self) -> &str {
        match self {
            Occupancy::Primary => "primary",
            Occupancy::Secondary => "secondary",
            Occupancy::Investment => "investment",
            Occupancy::Unrecognized(raw) => raw,
        }
    }

    /// Secondary homes and investment properties share the stricter limits.
    pub fn is_non_owner_occupied(&self) -> bool {
        matches!(self, Occupancy::Secondary | Occupancy::Investment)
    }
}

impl From<String> for Occupancy {
    fn from(value: String) -> Self {
        match value.as_str() {
            "primary" => Occupancy::Primary,
            "secondary" => Occupancy::Secondary,
            "investment" => Occupancy::Investment,
            _ => Occupancy::Unrecognized(value),
        }
    }
}

impl From<&str> for Occupancy {
    fn from(value: &str) -> Self {
        Occupancy::from(value.to_string())
    }
}

impl From<Occupancy> for String {
    fn from(value: Occupancy) -> Self {
        match value {
            Occupancy::Unrecognized(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Applicant financial profile submitted for a single underwriting decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplication {
    #[serde(rename = "name", alias = "borrower_name")]
    pub borrower_name: String,
    pub monthly_income: f64,
    pub monthly_debts: f64,
    pub loan_amount: f64,
    pub property_value: f64,
    pub credit_score: i32,
    pub occupancy: Occupancy,
}

impl LoanApplication {
    /// Rejects amounts that cannot describe a real profile before any ratio is computed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let amounts = [
            ("monthly_income", self.monthly_income),
            ("monthly_debts", self.monthly_debts),
            ("loan_amount", self.loan_amount),
            ("property_value", self.property_value),
        ];

        for (field, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(ValidationError::NegativeAmount { field });
            }
        }

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must be a non-negative amount")]
    NegativeAmount { field: &'static str },
}
