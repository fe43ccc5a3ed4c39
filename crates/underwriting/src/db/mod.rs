//! Postgres-backed decision history.

pub mod connection;
pub mod models;
pub mod queries;
pub mod schema;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

use crate::config::DatabaseConfig;
use crate::loans::{LoanRecord, NewLoanRecord, RecordStore, RepositoryError};

/// [`RecordStore`] writing to the `loan_records` table.
#[derive(Debug, Clone)]
pub struct PgRecordStore {
    pool: PgPool,
}

impl PgRecordStore {
    /// Connects and makes sure the schema exists.
    pub async fn connect(url: &str, config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = connection::create_pool(url, config).await?;
        schema::init_schema(&pool).await?;
        info!(max_connections = config.max_connections, "database connection established");
        Ok(Self { pool })
    }

    pub async fn close(&self) {
        info!("closing database connection");
        self.pool.close().await;
    }
}

#[async_trait]
impl RecordStore for PgRecordStore {
    async fn append(&self, record: NewLoanRecord) -> Result<LoanRecord, RepositoryError> {
        let row = queries::insert_loan_record(&self.pool, &record)
            .await
            .map_err(unavailable)?;
        LoanRecord::try_from(row)
    }

    async fn history(&self) -> Result<Vec<LoanRecord>, RepositoryError> {
        let rows = queries::get_all_loan_records(&self.pool)
            .await
            .map_err(unavailable)?;
        rows.into_iter().map(LoanRecord::try_from).collect()
    }
}

fn unavailable(err: sqlx::Error) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}
