use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use chrono::{Duration, TimeZone, Utc};
use serde_json::Value;
use tokio::task::JoinHandle;

use crate::loans::decision::UnderwritingFacts;
use crate::loans::domain::{LoanApplication, Occupancy};
use crate::loans::repository::{LoanRecord, NewLoanRecord, RecordStore, RepositoryError};
use crate::loans::service::UnderwritingService;
use crate::loans::writer::RecordWriter;

pub(super) fn application() -> LoanApplication {
    LoanApplication {
        borrower_name: "Jordan Reyes".to_string(),
        monthly_income: 10_000.0,
        monthly_debts: 4_200.0,
        loan_amount: 85_000.0,
        property_value: 100_000.0,
        credit_score: 720,
        occupancy: Occupancy::Primary,
    }
}

pub(super) fn facts(
    credit_score: i32,
    dti: f64,
    ltv: f64,
    occupancy: &Occupancy,
    loan_amount: f64,
    property_value: f64,
) -> UnderwritingFacts<'_> {
    UnderwritingFacts {
        credit_score,
        dti,
        ltv,
        occupancy,
        loan_amount,
        property_value,
    }
}

/// Clock starts at a fixed instant and advances one minute per append so ordering is stable.
#[derive(Default)]
pub(super) struct MemoryStore {
    sequence: AtomicI64,
    pub(super) records: Mutex<Vec<LoanRecord>>,
}

impl MemoryStore {
    pub(super) fn stored(&self) -> Vec<LoanRecord> {
        self.records.lock().expect("store mutex poisoned").clone()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn append(&self, record: NewLoanRecord) -> Result<LoanRecord, RepositoryError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let created_at =
            Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap() + Duration::minutes(id);
        let stored = record.into_stored(id, created_at);
        self.records
            .lock()
            .expect("store mutex poisoned")
            .push(stored.clone());
        Ok(stored)
    }

    async fn history(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        let mut records = self.stored();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }
}

pub(super) struct UnavailableStore;

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn append(&self, _record: NewLoanRecord) -> Result<LoanRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    async fn history(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn build_service() -> (
    UnderwritingService<MemoryStore>,
    Arc<MemoryStore>,
    JoinHandle<()>,
) {
    let store = Arc::new(MemoryStore::default());
    let (writer, worker) = RecordWriter::spawn(store.clone(), 16);
    let service = UnderwritingService::new(store.clone(), writer);
    (service, store, worker)
}

pub(super) fn build_unavailable_service() -> (UnderwritingService<UnavailableStore>, JoinHandle<()>)
{
    let store = Arc::new(UnavailableStore);
    let (writer, worker) = RecordWriter::spawn(store.clone(), 16);
    (UnderwritingService::new(store, writer), worker)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
