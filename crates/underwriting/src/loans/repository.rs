use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::decision::{Decision, LoanOutcome};
use super::domain::{LoanApplication, Occupancy};
use super::ratios::RatioResult;

/// Decision history entry awaiting an identifier and timestamp from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLoanRecord {
    pub borrower_name: String,
    pub monthly_income: f64,
    pub monthly_debts: f64,
    pub loan_amount: f64,
    pub property_value: f64,
    pub credit_score: i32,
    pub occupancy: Occupancy,
    pub decision: LoanOutcome,
    pub dti: f64,
    pub ltv: f64,
    pub reason: String,
}

impl NewLoanRecord {
    pub fn new(application: LoanApplication, ratios: RatioResult, decision: Decision) -> Self {
        let LoanApplication {
            borrower_name,
            monthly_income,
            monthly_debts,
            loan_amount,
            property_value,
            credit_score,
            occupancy,
        } = application;

        Self {
            borrower_name,
            monthly_income,
            monthly_debts,
            loan_amount,
            property_value,
            credit_score,
            occupancy,
            decision: decision.outcome(),
            dti: ratios.dti,
            ltv: ratios.ltv,
            reason: decision.reason().to_string(),
        }
    }

    pub fn into_stored(self, id: i64, created_at: DateTime<Utc>) -> LoanRecord {
        LoanRecord {
            id,
            borrower_name: self.borrower_name,
            monthly_income: self.monthly_income,
            monthly_debts: self.monthly_debts,
            loan_amount: self.loan_amount,
            property_value: self.property_value,
            credit_score: self.credit_score,
            occupancy: self.occupancy,
            decision: self.decision,
            dti: self.dti,
            ltv: self.ltv,
            reason: self.reason,
            created_at,
        }
    }
}

/// Persisted decision. Records are append-only and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: i64,
    #[serde(rename = "name")]
    pub borrower_name: String,
    pub monthly_income: f64,
    pub monthly_debts: f64,
    pub loan_amount: f64,
    pub property_value: f64,
    pub credit_score: i32,
    pub occupancy: Occupancy,
    pub decision: LoanOutcome,
    pub dti: f64,
    pub ltv: f64,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction so the service can run against Postgres or memory.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Persist a record, assigning its identifier and creation time.
    async fn append(&self, record: NewLoanRecord) -> Result<LoanRecord, RepositoryError>;
    /// Every stored record, newest first.
    async fn history(&self) -> Result<Vec<LoanRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("stored record {id} is unreadable: {detail}")]
    Corrupt { id: i64, detail: String },
}
