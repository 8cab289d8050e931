//! Response DTOs
//!
//! Data structures for API response bodies. Stored applications are
//! returned as [`LoanApplication`] directly.

use serde::Serialize;

use crate::domain::{LoanApplication, LoanApplicationId};

pub const APPLIED_MESSAGE: &str = "You have successfully Applied For The Loan";
pub const APPROVED_MESSAGE: &str = "User Loan approved successfully";
pub const DELETED_MESSAGE: &str = "User deleted successfully";

/// Plain confirmation body
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Submission confirmation, carrying the new application's identifier
#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub message: String,
    pub id: LoanApplicationId,
}

impl From<&LoanApplication> for ApplyResponse {
    fn from(application: &LoanApplication) -> Self {
        Self {
            message: APPLIED_MESSAGE.into(),
            id: application.id,
        }
    }
}

/// Approval confirmation with the updated application
#[derive(Debug, Serialize)]
pub struct ApproveResponse {
    pub message: String,
    pub user: LoanApplication,
}

impl From<LoanApplication> for ApproveResponse {
    fn from(application: LoanApplication) -> Self {
        Self {
            message: APPROVED_MESSAGE.into(),
            user: application,
        }
    }
}
