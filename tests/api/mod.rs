//! REST API endpoint tests

mod health_tests;
mod loan_tests;
