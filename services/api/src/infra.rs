use async_trait::async_trait;
use chrono::Utc;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::info;
use underwriting::config::DatabaseConfig;
use underwriting::db::PgRecordStore;
use underwriting::error::AppError;
use underwriting::loans::{LoanRecord, NewLoanRecord, RecordStore, RepositoryError};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Process-local history used when no database is configured.
#[derive(Default)]
pub(crate) struct InMemoryRecordStore {
    sequence: AtomicI64,
    records: Mutex<Vec<LoanRecord>>,
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn append(&self, record: NewLoanRecord) -> Result<LoanRecord, RepositoryError> {
        let id = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = record.into_stored(id, Utc::now());
        let mut guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store lock poisoned".to_string()))?;
        guard.push(stored.clone());
        Ok(stored)
    }

    async fn history(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        let guard = self
            .records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("record store lock poisoned".to_string()))?;
        let mut records = guard.clone();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(records)
    }
}

/// Store selected at startup from the database configuration.
pub(crate) enum RecordBackend {
    Memory(InMemoryRecordStore),
    Postgres(PgRecordStore),
}

impl RecordBackend {
    pub(crate) async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        match &config.url {
            Some(url) => Ok(Self::Postgres(PgRecordStore::connect(url, config).await?)),
            None => {
                info!("no database configured; loan history is kept in memory");
                Ok(Self::Memory(InMemoryRecordStore::default()))
            }
        }
    }

    pub(crate) async fn close(&self) {
        if let Self::Postgres(store) = self {
            store.close().await;
        }
    }
}

#[async_trait]
impl RecordStore for RecordBackend {
    async fn append(&self, record: NewLoanRecord) -> Result<LoanRecord, RepositoryError> {
        match self {
            Self::Memory(store) => store.append(record).await,
            Self::Postgres(store) => store.append(record).await,
        }
    }

    async fn history(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        match self {
            Self::Memory(store) => store.history().await,
            Self::Postgres(store) => store.history().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use underwriting::loans::{LoanOutcome, Occupancy};

    fn record(name: &str) -> NewLoanRecord {
        NewLoanRecord {
            borrower_name: name.to_string(),
            monthly_income: 8000.0,
            monthly_debts: 2400.0,
            loan_amount: 150000.0,
            property_value: 200000.0,
            credit_score: 705,
            occupancy: Occupancy::Secondary,
            decision: LoanOutcome::Approve,
            dti: 0.3,
            ltv: 0.75,
            reason: "Meets standard approval criteria".to_string(),
        }
    }

    #[tokio::test]
    async fn memory_store_assigns_ids_and_lists_newest_first() {
        let store = InMemoryRecordStore::default();

        let first = store.append(record("first")).await.expect("append");
        let second = store.append(record("second")).await.expect("append");
        assert_eq!((first.id, second.id), (1, 2));

        let history = store.history().await.expect("history");
        let names: Vec<_> = history.iter().map(|r| r.borrower_name.as_str()).collect();
        assert_eq!(names, vec!["second", "first"]);
    }

    #[tokio::test]
    async fn backend_without_url_uses_memory() {
        let config = DatabaseConfig {
            url: None,
            max_connections: 5,
        };

        let backend = RecordBackend::connect(&config).await.expect("memory backend");
        assert!(matches!(backend, RecordBackend::Memory(_)));
        backend.append(record("only")).await.expect("append");
        assert_eq!(backend.history().await.expect("history").len(), 1);
    }
}
