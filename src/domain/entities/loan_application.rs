//! Loan application entity and repository trait.
//!
//! Maps to the `loan_applications` table in the database schema.

use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Identifier of a loan application.
///
/// Generated by the record store at insert time (UUID v7, so identifiers sort
/// by creation time) and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoanApplicationId(Uuid);

impl LoanApplicationId {
    /// Generate a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7())
    }

    /// Parse an identifier received from a client.
    ///
    /// Returns `None` when the text is not a valid identifier; callers treat
    /// that the same as an identifier that matches no record.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for LoanApplicationId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for LoanApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A loan application as stored and as returned by the API.
///
/// Maps to the `loan_applications` table:
/// - id: UUID PRIMARY KEY
/// - name: TEXT NOT NULL
/// - email: TEXT NOT NULL
/// - address: TEXT NOT NULL
/// - reason_for_loan: TEXT NOT NULL
/// - loan_amount: DOUBLE PRECISION NOT NULL
/// - guarantor_name: TEXT NOT NULL
/// - disbursed_amount: DOUBLE PRECISION NULL
/// - loan_status: BOOLEAN NOT NULL DEFAULT FALSE
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanApplication {
    pub id: LoanApplicationId,

    /// Applicant name
    pub name: String,

    pub email: String,

    pub address: String,

    pub reason_for_loan: String,

    /// Requested amount
    pub loan_amount: f64,

    pub guarantor_name: String,

    /// Amount paid out, absent until a disbursement is recorded
    pub disbursed_amount: Option<f64>,

    /// `false` while pending, `true` once approved
    pub loan_status: bool,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl LoanApplication {
    /// Build a freshly submitted application: unapproved, nothing disbursed.
    pub fn from_new(id: LoanApplicationId, new: NewLoanApplication, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: new.name,
            email: new.email,
            address: new.address,
            reason_for_loan: new.reason_for_loan,
            loan_amount: new.loan_amount,
            guarantor_name: new.guarantor_name,
            disbursed_amount: None,
            loan_status: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_approved(&self) -> bool {
        self.loan_status
    }
}

/// The validated fields of a new submission.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLoanApplication {
    pub name: String,
    pub email: String,
    pub address: String,
    pub reason_for_loan: String,
    pub loan_amount: f64,
    pub guarantor_name: String,
}

/// Attributes to overwrite on an existing application.
///
/// `None` leaves the stored value unchanged. `loan_status` can only be raised,
/// and a recorded disbursement cannot be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoanApplicationChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub reason_for_loan: Option<String>,
    pub loan_amount: Option<f64>,
    pub guarantor_name: Option<String>,
    pub disbursed_amount: Option<f64>,
    pub loan_status: Option<bool>,
}

impl LoanApplicationChanges {
    /// Changes that mark the loan as approved.
    pub fn approval() -> Self {
        Self {
            loan_status: Some(true),
            ..Self::default()
        }
    }

    /// Changes that record a paid-out amount.
    pub fn disbursement(amount: f64) -> Self {
        Self {
            disbursed_amount: Some(amount),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the changes in place and bump `updated_at`.
    pub fn apply_to(&self, application: &mut LoanApplication, now: DateTime<Utc>) {
        if let Some(name) = &self.name {
            application.name = name.clone();
        }
        if let Some(email) = &self.email {
            application.email = email.clone();
        }
        if let Some(address) = &self.address {
            application.address = address.clone();
        }
        if let Some(reason) = &self.reason_for_loan {
            application.reason_for_loan = reason.clone();
        }
        if let Some(amount) = self.loan_amount {
            application.loan_amount = amount;
        }
        if let Some(guarantor) = &self.guarantor_name {
            application.guarantor_name = guarantor.clone();
        }
        if let Some(disbursed) = self.disbursed_amount {
            application.disbursed_amount = Some(disbursed);
        }
        if let Some(status) = self.loan_status {
            application.loan_status = application.loan_status || status;
        }
        application.updated_at = now;
    }
}

/// Repository trait for loan application data access operations.
///
/// Implementations own identifier generation and timestamps.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoanApplicationRepository: Send + Sync {
    /// Persist a new application and return the stored record.
    async fn insert(&self, new: &NewLoanApplication) -> Result<LoanApplication, AppError>;

    /// Every stored application, oldest first.
    async fn find_all(&self) -> Result<Vec<LoanApplication>, AppError>;

    /// Find an application by its identifier.
    async fn find_by_id(&self, id: LoanApplicationId)
        -> Result<Option<LoanApplication>, AppError>;

    /// All applications whose applicant name equals `name` exactly.
    async fn find_by_name(&self, name: &str) -> Result<Vec<LoanApplication>, AppError>;

    /// Apply `changes` and return the updated record, or `None` if absent.
    async fn update(
        &self,
        id: LoanApplicationId,
        changes: &LoanApplicationChanges,
    ) -> Result<Option<LoanApplication>, AppError>;

    /// Remove an application. Returns `false` if nothing was removed.
    async fn delete(&self, id: LoanApplicationId) -> Result<bool, AppError>;

    /// Check that the store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}
