//! Loan Service
//!
//! Handles loan application submission, lookup and the state changes an
//! application goes through: applicant-details edits, approval, disbursement
//! and removal.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::{
    LoanApplication, LoanApplicationChanges, LoanApplicationId, LoanApplicationRepository,
    NewLoanApplication,
};

/// Loan service trait
#[async_trait]
pub trait LoanService: Send + Sync {
    /// Store a new, unapproved application
    async fn apply(&self, application: NewLoanApplication) -> Result<LoanApplication, LoanError>;

    /// List every application
    async fn list(&self) -> Result<Vec<LoanApplication>, LoanError>;

    /// Get an application by ID
    async fn get(&self, id: &str) -> Result<LoanApplication, LoanError>;

    /// Applications whose applicant name matches exactly; empty when no name is given
    async fn search_by_name(&self, name: Option<&str>) -> Result<Vec<LoanApplication>, LoanError>;

    /// Edit applicant details. The loan amount cannot drop below an amount
    /// already disbursed.
    async fn update_details(
        &self,
        id: &str,
        update: UpdateDetailsDto,
    ) -> Result<LoanApplication, LoanError>;

    /// Mark the loan as approved. Approving twice is not an error.
    async fn approve(&self, id: &str) -> Result<LoanApplication, LoanError>;

    /// Record the amount paid out on an approved loan
    async fn record_disbursement(&self, id: &str, amount: f64)
        -> Result<LoanApplication, LoanError>;

    /// Remove an application
    async fn delete(&self, id: &str) -> Result<(), LoanError>;

    /// Check that the record store is reachable
    async fn check_store(&self) -> Result<(), LoanError>;
}

/// Applicant details that may be edited after submission.
///
/// Status and disbursement are not part of this update; they change only
/// through [`LoanService::approve`] and [`LoanService::record_disbursement`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateDetailsDto {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub reason_for_loan: Option<String>,
    pub loan_amount: Option<f64>,
    pub guarantor_name: Option<String>,
}

impl From<UpdateDetailsDto> for LoanApplicationChanges {
    fn from(update: UpdateDetailsDto) -> Self {
        Self {
            name: update.name,
            email: update.email,
            address: update.address,
            reason_for_loan: update.reason_for_loan,
            loan_amount: update.loan_amount,
            guarantor_name: update.guarantor_name,
            ..Self::default()
        }
    }
}

/// Loan service errors
#[derive(Debug, thiserror::Error)]
pub enum LoanError {
    #[error("Loan application not found")]
    NotFound,

    #[error("{0}")]
    Validation(String),

    #[error("Loan has not been approved")]
    NotApproved,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// LoanService implementation
pub struct LoanServiceImpl<R>
where
    R: LoanApplicationRepository + ?Sized,
{
    repo: Arc<R>,
}

impl<R> LoanServiceImpl<R>
where
    R: LoanApplicationRepository + ?Sized,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

/// Identifiers that do not parse cannot match any record.
fn parse_id(id: &str) -> Result<LoanApplicationId, LoanError> {
    LoanApplicationId::parse(id).ok_or(LoanError::NotFound)
}

#[async_trait]
impl<R> LoanService for LoanServiceImpl<R>
where
    R: LoanApplicationRepository + ?Sized + 'static,
{
    async fn apply(&self, application: NewLoanApplication) -> Result<LoanApplication, LoanError> {
        let created = self
            .repo
            .insert(&application)
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?;

        tracing::info!(id = %created.id, "Loan application submitted");
        Ok(created)
    }

    async fn list(&self) -> Result<Vec<LoanApplication>, LoanError> {
        self.repo
            .find_all()
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))
    }

    async fn get(&self, id: &str) -> Result<LoanApplication, LoanError> {
        let id = parse_id(id)?;

        self.repo
            .find_by_id(id)
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?
            .ok_or(LoanError::NotFound)
    }

    async fn search_by_name(&self, name: Option<&str>) -> Result<Vec<LoanApplication>, LoanError> {
        let Some(name) = name else {
            return Ok(Vec::new());
        };

        let found = self
            .repo
            .find_by_name(name)
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?;

        tracing::debug!(name, count = found.len(), "Searched loan applications");
        Ok(found)
    }

    async fn update_details(
        &self,
        id: &str,
        update: UpdateDetailsDto,
    ) -> Result<LoanApplication, LoanError> {
        let id = parse_id(id)?;

        if let Some(loan_amount) = update.loan_amount {
            let current = self
                .repo
                .find_by_id(id)
                .await
                .map_err(|e| LoanError::Internal(e.to_string()))?
                .ok_or(LoanError::NotFound)?;

            if current.disbursed_amount.is_some_and(|paid| paid > loan_amount) {
                return Err(LoanError::Validation(
                    "loanAmount: Loan amount cannot be less than the disbursed amount".into(),
                ));
            }
        }

        let changes = LoanApplicationChanges::from(update);

        self.repo
            .update(id, &changes)
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?
            .ok_or(LoanError::NotFound)
    }

    async fn approve(&self, id: &str) -> Result<LoanApplication, LoanError> {
        let id = parse_id(id)?;

        let approved = self
            .repo
            .update(id, &LoanApplicationChanges::approval())
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?
            .ok_or(LoanError::NotFound)?;

        tracing::info!(id = %approved.id, "Loan approved");
        Ok(approved)
    }

    async fn record_disbursement(
        &self,
        id: &str,
        amount: f64,
    ) -> Result<LoanApplication, LoanError> {
        let id = parse_id(id)?;

        if !amount.is_finite() || amount <= 0.0 {
            return Err(LoanError::Validation(
                "disbursedAmount: Disbursed amount must be greater than zero".into(),
            ));
        }

        let application = self
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?
            .ok_or(LoanError::NotFound)?;

        if !application.is_approved() {
            return Err(LoanError::NotApproved);
        }

        if amount > application.loan_amount {
            return Err(LoanError::Validation(
                "disbursedAmount: Disbursed amount cannot exceed the requested loan amount".into(),
            ));
        }

        let disbursed = self
            .repo
            .update(id, &LoanApplicationChanges::disbursement(amount))
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?
            .ok_or(LoanError::NotFound)?;

        tracing::info!(id = %disbursed.id, amount, "Disbursement recorded");
        Ok(disbursed)
    }

    async fn delete(&self, id: &str) -> Result<(), LoanError> {
        let id = parse_id(id)?;

        let removed = self
            .repo
            .delete(id)
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))?;

        if !removed {
            return Err(LoanError::NotFound);
        }

        tracing::info!(%id, "Loan application deleted");
        Ok(())
    }

    async fn check_store(&self) -> Result<(), LoanError> {
        self.repo
            .ping()
            .await
            .map_err(|e| LoanError::Internal(e.to_string()))
    }
}
