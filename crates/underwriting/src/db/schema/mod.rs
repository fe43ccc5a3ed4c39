use sqlx::{postgres::PgPool, Executor};

pub async fn init_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.execute(include_str!("loan_records.sql")).await?;

    // History reads are always newest first.
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_loan_records_created_at
        ON loan_records(created_at DESC, id DESC);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
