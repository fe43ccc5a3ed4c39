use serde::{Deserialize, Serialize};

use super::domain::LoanApplication;

/// Inputs the ratio calculator refuses: zero denominators and quotients that overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RatioError {
    #[error("monthly income cannot be zero")]
    ZeroMonthlyIncome,
    #[error("property value cannot be zero")]
    ZeroPropertyValue,
    #[error("result is not a finite number")]
    NonFinite { ratio: &'static str },
}

impl RatioError {
    pub const fn ratio_label(self) -> &'static str {
        match self {
            RatioError::ZeroMonthlyIncome => "DTI",
            RatioError::ZeroPropertyValue => "LTV",
            RatioError::NonFinite { ratio } => ratio,
        }
    }
}

/// Debt-to-income: monthly obligations over monthly income, unrounded.
pub fn compute_dti(monthly_debts: f64, monthly_income: f64) -> Result<f64, RatioError> {
    if monthly_income == 0.0 {
        return Err(RatioError::ZeroMonthlyIncome);
    }
    finite("DTI", monthly_debts / monthly_income)
}

/// Loan-to-value: loan amount over appraised property value, unrounded.
pub fn compute_ltv(loan_amount: f64, property_value: f64) -> Result<f64, RatioError> {
    if property_value == 0.0 {
        return Err(RatioError::ZeroPropertyValue);
    }
    finite("LTV", loan_amount / property_value)
}

/// Tiny non-zero denominators can still overflow to infinity.
fn finite(ratio: &'static str, value: f64) -> Result<f64, RatioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(RatioError::NonFinite { ratio })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RatioResult {
    pub dti: f64,
    pub ltv: f64,
}

impl RatioResult {
    /// DTI is checked first, so an application with both denominators at zero reports income.
    pub fn for_application(application: &LoanApplication) -> Result<Self, RatioError> {
        let dti = compute_dti(application.monthly_debts, application.monthly_income)?;
        let ltv = compute_ltv(application.loan_amount, application.property_value)?;
        Ok(Self { dti, ltv })
    }
}
