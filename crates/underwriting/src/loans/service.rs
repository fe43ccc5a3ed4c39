use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::decision::{Decision, DecisionEngine, LoanOutcome, UnderwritingFacts, UnderwritingRule};
use super::domain::{LoanApplication, ValidationError};
use super::ratios::{RatioError, RatioResult};
use super::repository::{LoanRecord, NewLoanRecord, RecordStore, RepositoryError};
use super::writer::RecordWriter;

/// Response returned to the caller once a decision is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderwritingResponse {
    pub decision: LoanOutcome,
    pub dti: f64,
    pub ltv: f64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub reason: String,
    #[serde(skip)]
    pub rule: Option<UnderwritingRule>,
}

impl UnderwritingResponse {
    fn new(ratios: RatioResult, decision: Decision) -> Self {
        Self {
            decision: decision.outcome(),
            dti: ratios.dti,
            ltv: ratios.ltv,
            reason: decision.reason().to_string(),
            rule: Some(decision.rule),
        }
    }
}

/// Service composing ratio calculation, the decision engine, and record persistence.
pub struct UnderwritingService<S: ?Sized> {
    store: Arc<S>,
    writer: RecordWriter,
    engine: DecisionEngine,
}

impl<S> UnderwritingService<S>
where
    S: RecordStore + ?Sized + 'static,
{
    pub fn new(store: Arc<S>, writer: RecordWriter) -> Self {
        Self {
            store,
            writer,
            engine: DecisionEngine::new(),
        }
    }

    /// Decide an application and queue its record. Persistence runs in the background and
    /// cannot change the returned decision.
    pub fn evaluate(
        &self,
        application: LoanApplication,
    ) -> Result<UnderwritingResponse, UnderwritingError> {
        let (ratios, decision) = underwrite(&self.engine, &application)?;

        info!(
            decision = %decision.outcome(),
            rule = decision.rule.id(),
            occupancy = %application.occupancy,
            "loan application decided"
        );

        if let Err(err) = self
            .writer
            .submit(NewLoanRecord::new(application, ratios, decision))
        {
            err.log_dropped();
        }

        Ok(UnderwritingResponse::new(ratios, decision))
    }

    /// Decision history, newest first.
    pub async fn history(&self) -> Result<Vec<LoanRecord>, UnderwritingError> {
        let records = self.store.history().await?;
        Ok(records)
    }
}

/// Decide an application without persisting it.
pub fn decide_application(
    application: &LoanApplication,
) -> Result<UnderwritingResponse, UnderwritingError> {
    let (ratios, decision) = underwrite(&DecisionEngine::new(), application)?;
    Ok(UnderwritingResponse::new(ratios, decision))
}

/// Ratio failures abort before the rule table is consulted.
fn underwrite(
    engine: &DecisionEngine,
    application: &LoanApplication,
) -> Result<(RatioResult, Decision), UnderwritingError> {
    application.validate()?;
    let ratios = RatioResult::for_application(application)?;

    let decision = engine.decide(&UnderwritingFacts {
        credit_score: application.credit_score,
        dti: ratios.dti,
        ltv: ratios.ltv,
        occupancy: &application.occupancy,
        loan_amount: application.loan_amount,
        property_value: application.property_value,
    });

    Ok((ratios, decision))
}

/// Error raised by the underwriting service.
#[derive(Debug, thiserror::Error)]
pub enum UnderwritingError {
    #[error("Error calculating {}: {}", .0.ratio_label(), .0)]
    Ratio(#[from] RatioError),
    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
    #[error("Error retrieving loan records: {0}")]
    Repository(#[from] RepositoryError),
}

impl UnderwritingError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            UnderwritingError::Ratio(_) | UnderwritingError::Validation(_)
        )
    }
}
