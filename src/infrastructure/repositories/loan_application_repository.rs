//! Loan Application Repository Implementation
//!
//! PostgreSQL implementation of the LoanApplicationRepository trait.
//! Maps between the database schema and the domain LoanApplication entity.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    LoanApplication, LoanApplicationChanges, LoanApplicationId, LoanApplicationRepository,
    NewLoanApplication,
};
use crate::shared::error::AppError;

const COLUMNS: &str = "id, name, email, address, reason_for_loan, loan_amount, guarantor_name, \
                       disbursed_amount, loan_status, created_at, updated_at";

/// Database row representation matching the loan_applications table schema.
#[derive(Debug, sqlx::FromRow)]
struct LoanApplicationRow {
    id: Uuid,
    name: String,
    email: String,
    address: String,
    reason_for_loan: String,
    loan_amount: f64,
    guarantor_name: String,
    disbursed_amount: Option<f64>,
    loan_status: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl LoanApplicationRow {
    /// Convert database row to domain LoanApplication entity.
    fn into_application(self) -> LoanApplication {
        LoanApplication {
            id: LoanApplicationId::from(self.id),
            name: self.name,
            email: self.email,
            address: self.address,
            reason_for_loan: self.reason_for_loan,
            loan_amount: self.loan_amount,
            guarantor_name: self.guarantor_name,
            disbursed_amount: self.disbursed_amount,
            loan_status: self.loan_status,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL loan application repository implementation.
#[derive(Clone)]
pub struct PgLoanApplicationRepository {
    pool: PgPool,
}

impl PgLoanApplicationRepository {
    /// Create a new PgLoanApplicationRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoanApplicationRepository for PgLoanApplicationRepository {
    async fn insert(&self, new: &NewLoanApplication) -> Result<LoanApplication, AppError> {
        let id = LoanApplicationId::generate();

        let row = sqlx::query_as::<_, LoanApplicationRow>(&format!(
            r#"
            INSERT INTO loan_applications
                (id, name, email, address, reason_for_loan, loan_amount, guarantor_name)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.address)
        .bind(&new.reason_for_loan)
        .bind(new.loan_amount)
        .bind(&new.guarantor_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_application())
    }

    async fn find_all(&self) -> Result<Vec<LoanApplication>, AppError> {
        let rows = sqlx::query_as::<_, LoanApplicationRow>(&format!(
            "SELECT {COLUMNS} FROM loan_applications ORDER BY created_at, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LoanApplicationRow::into_application).collect())
    }

    async fn find_by_id(
        &self,
        id: LoanApplicationId,
    ) -> Result<Option<LoanApplication>, AppError> {
        let row = sqlx::query_as::<_, LoanApplicationRow>(&format!(
            "SELECT {COLUMNS} FROM loan_applications WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LoanApplicationRow::into_application))
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<LoanApplication>, AppError> {
        let rows = sqlx::query_as::<_, LoanApplicationRow>(&format!(
            "SELECT {COLUMNS} FROM loan_applications WHERE name = $1 ORDER BY created_at, id"
        ))
        .bind(name)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(LoanApplicationRow::into_application).collect())
    }

    /// Update the provided columns; `loan_status` is OR-ed so it never drops back to false.
    async fn update(
        &self,
        id: LoanApplicationId,
        changes: &LoanApplicationChanges,
    ) -> Result<Option<LoanApplication>, AppError> {
        let row = sqlx::query_as::<_, LoanApplicationRow>(&format!(
            r#"
            UPDATE loan_applications
            SET name = COALESCE($2, name),
                email = COALESCE($3, email),
                address = COALESCE($4, address),
                reason_for_loan = COALESCE($5, reason_for_loan),
                loan_amount = COALESCE($6, loan_amount),
                guarantor_name = COALESCE($7, guarantor_name),
                disbursed_amount = COALESCE($8, disbursed_amount),
                loan_status = loan_status OR COALESCE($9, FALSE),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(id.as_uuid())
        .bind(&changes.name)
        .bind(&changes.email)
        .bind(&changes.address)
        .bind(&changes.reason_for_loan)
        .bind(changes.loan_amount)
        .bind(&changes.guarantor_name)
        .bind(changes.disbursed_amount)
        .bind(changes.loan_status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(LoanApplicationRow::into_application))
    }

    async fn delete(&self, id: LoanApplicationId) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM loan_applications WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
