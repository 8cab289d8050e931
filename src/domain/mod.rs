//! # Domain Layer
//!
//! The domain layer contains the loan application record and the contract
//! for storing it. It is independent of any external frameworks or
//! infrastructure concerns.
//!
//! ## Structure
//!
//! - **entities**: The `LoanApplication` record, its insert and change shapes,
//!   and the repository trait implemented by the infrastructure layer

pub mod entities;

// Re-export commonly used types
pub use entities::*;
