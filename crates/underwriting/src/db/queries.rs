use sqlx::PgPool;

use super::models::LoanRecordRow;
use crate::loans::NewLoanRecord;

const RECORD_COLUMNS: &str = "id, borrower_name, monthly_income, monthly_debts, loan_amount, \
     property_value, credit_score, occupancy, decision, dti, ltv, reason, created_at";

pub async fn insert_loan_record(
    pool: &PgPool,
    record: &NewLoanRecord,
) -> Result<LoanRecordRow, sqlx::Error> {
    let query = format!(
        r#"
        INSERT INTO loan_records (
            borrower_name, monthly_income, monthly_debts, loan_amount, property_value,
            credit_score, occupancy, decision, dti, ltv, reason
        )
        VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11)
        RETURNING {RECORD_COLUMNS}
        "#
    );

    sqlx::query_as::<_, LoanRecordRow>(&query)
        .bind(&record.borrower_name)
        .bind(record.monthly_income)
        .bind(record.monthly_debts)
        .bind(record.loan_amount)
        .bind(record.property_value)
        .bind(record.credit_score)
        .bind(record.occupancy.as_str())
        .bind(record.decision.label())
        .bind(record.dti)
        .bind(record.ltv)
        .bind(&record.reason)
        .fetch_one(pool)
        .await
}

pub async fn get_all_loan_records(pool: &PgPool) -> Result<Vec<LoanRecordRow>, sqlx::Error> {
    let query = format!(
        r#"
        SELECT {RECORD_COLUMNS}
        FROM loan_records
        ORDER BY created_at DESC, id DESC
        "#
    );

    sqlx::query_as::<_, LoanRecordRow>(&query)
        .fetch_all(pool)
        .await
}
