//! # Domain Entities
//!
//! - **LoanApplication**: one applicant's request for a loan, together with
//!   its approval flag and disbursement
//!
//! The same typed record is used for validation output, persistence and API
//! responses. Its repository trait is implemented in the infrastructure layer.

mod loan_application;

pub use loan_application::{
    LoanApplication, LoanApplicationChanges, LoanApplicationId, LoanApplicationRepository,
    NewLoanApplication,
};

#[cfg(test)]
pub use loan_application::MockLoanApplicationRepository;
