//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **LoanService**: Submission, lookup, update, approval, disbursement and
//!   removal of loan applications

pub mod loan_service;

pub use loan_service::{LoanError, LoanService, LoanServiceImpl, UpdateDetailsDto};
