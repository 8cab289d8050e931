//! Request DTOs
//!
//! Data structures for API request bodies and query strings.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::UpdateDetailsDto;
use crate::domain::NewLoanApplication;
use crate::shared::error::AppError;
use crate::shared::validation::validation_error;

/// Message returned when a submission lacks any required field
pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";

/// Amounts must be present and non-zero to count as provided.
fn is_provided_amount(amount: f64) -> bool {
    amount != 0.0 && !amount.is_nan()
}

/// Loan application submission
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplyRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    pub address: Option<String>,

    #[validate(required, length(min = 1))]
    pub reason_for_loan: Option<String>,

    #[validate(required)]
    pub loan_amount: Option<f64>,

    #[validate(required, length(min = 1))]
    pub guarantor_name: Option<String>,
}

impl ApplyRequest {
    /// Check that all six fields are present and non-empty.
    pub fn into_new_application(self) -> Result<NewLoanApplication, AppError> {
        let missing = || AppError::Validation(MISSING_FIELDS_MESSAGE.into());

        self.validate().map_err(|_| missing())?;

        match self {
            ApplyRequest {
                name: Some(name),
                email: Some(email),
                address: Some(address),
                reason_for_loan: Some(reason_for_loan),
                loan_amount: Some(loan_amount),
                guarantor_name: Some(guarantor_name),
            } if is_provided_amount(loan_amount) => Ok(NewLoanApplication {
                name,
                email,
                address,
                reason_for_loan,
                loan_amount,
                guarantor_name,
            }),
            _ => Err(missing()),
        }
    }
}

/// Applicant-details update
///
/// Unknown fields are rejected, so `loanStatus` and `disbursedAmount` cannot
/// be written through this request.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateApplicationRequest {
    #[validate(length(min = 1, message = "Name must not be empty"))]
    pub name: Option<String>,

    #[validate(length(min = 1, message = "Email must not be empty"))]
    pub email: Option<String>,

    #[validate(length(min = 1, message = "Address must not be empty"))]
    pub address: Option<String>,

    #[validate(length(min = 1, message = "Reason for loan must not be empty"))]
    pub reason_for_loan: Option<String>,

    pub loan_amount: Option<f64>,

    #[validate(length(min = 1, message = "Guarantor name must not be empty"))]
    pub guarantor_name: Option<String>,
}

impl UpdateApplicationRequest {
    pub fn into_dto(self) -> Result<UpdateDetailsDto, AppError> {
        self.validate().map_err(validation_error)?;

        if let Some(amount) = self.loan_amount {
            if !is_provided_amount(amount) {
                return Err(AppError::Validation(
                    "loanAmount: Loan amount must not be zero".into(),
                ));
            }
        }

        Ok(UpdateDetailsDto {
            name: self.name,
            email: self.email,
            address: self.address,
            reason_for_loan: self.reason_for_loan,
            loan_amount: self.loan_amount,
            guarantor_name: self.guarantor_name,
        })
    }
}

/// Disbursement of an approved loan
///
/// The amount is checked against the stored loan by the service.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisbursementRequest {
    pub disbursed_amount: f64,
}

/// Search query parameters
#[derive(Debug, Default, Deserialize)]
pub struct SearchQueryParams {
    pub name: Option<String>,
}
