use std::str::FromStr;

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use crate::loans::{LoanOutcome, LoanRecord, Occupancy, RepositoryError};

#[derive(Debug, Clone, FromRow)]
pub struct LoanRecordRow {
    pub id: i64,
    pub borrower_name: String,
    pub monthly_income: f64,
    pub monthly_debts: f64,
    pub loan_amount: f64,
    pub property_value: f64,
    pub credit_score: i32,
    pub occupancy: String,
    pub decision: String,
    pub dti: f64,
    pub ltv: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl TryFrom<LoanRecordRow> for LoanRecord {
    type Error = RepositoryError;

    fn try_from(row: LoanRecordRow) -> Result<Self, Self::Error> {
        let decision = LoanOutcome::from_str(&row.decision).map_err(|err| {
            RepositoryError::Corrupt {
                id: row.id,
                detail: err.to_string(),
            }
        })?;

        Ok(LoanRecord {
            id: row.id,
            borrower_name: row.borrower_name,
            monthly_income: row.monthly_income,
            monthly_debts: row.monthly_debts,
            loan_amount: row.loan_amount,
            property_value: row.property_value,
            credit_score: row.credit_score,
            occupancy: Occupancy::from(row.occupancy),
            decision,
            dti: row.dti,
            ltv: row.ltv,
            reason: row.reason,
            created_at: row.created_at,
        })
    }
}
