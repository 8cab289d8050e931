//! Repository Implementations
//!
//! Implementations of the domain's `LoanApplicationRepository` trait.
//!
//! ## Available Repositories
//!
//! - **PgLoanApplicationRepository** - PostgreSQL-backed store used in production
//! - **InMemoryLoanApplicationRepository** - process-local store used by tests
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::PgLoanApplicationRepository;
//!
//! fn setup_repository(pool: PgPool) -> PgLoanApplicationRepository {
//!     PgLoanApplicationRepository::new(pool)
//! }
//! ```

pub mod loan_application_repository;
pub mod memory_repository;

pub use loan_application_repository::PgLoanApplicationRepository;
pub use memory_repository::InMemoryLoanApplicationRepository;
