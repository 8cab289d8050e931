//! In-Memory Loan Application Repository
//!
//! Keeps applications in insertion order behind a single lock. Stands in
//! for PostgreSQL in the test suite.

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;

use crate::domain::{
    LoanApplication, LoanApplicationChanges, LoanApplicationId, LoanApplicationRepository,
    NewLoanApplication,
};
use crate::shared::error::AppError;

/// Process-local loan application store
#[derive(Default)]
pub struct InMemoryLoanApplicationRepository {
    applications: RwLock<Vec<LoanApplication>>,
}

impl InMemoryLoanApplicationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored applications
    pub fn len(&self) -> usize {
        self.applications.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.applications.read().is_empty()
    }
}

#[async_trait]
impl LoanApplicationRepository for InMemoryLoanApplicationRepository {
    async fn insert(&self, new: &NewLoanApplication) -> Result<LoanApplication, AppError> {
        let application =
            LoanApplication::from_new(LoanApplicationId::generate(), new.clone(), Utc::now());
        self.applications.write().push(application.clone());
        Ok(application)
    }

    async fn find_all(&self) -> Result<Vec<LoanApplication>, AppError> {
        Ok(self.applications.read().clone())
    }

    async fn find_by_id(
        &self,
        id: LoanApplicationId,
    ) -> Result<Option<LoanApplication>, AppError> {
        Ok(self
            .applications
            .read()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<LoanApplication>, AppError> {
        Ok(self
            .applications
            .read()
            .iter()
            .filter(|a| a.name == name)
            .cloned()
            .collect())
    }

    async fn update(
        &self,
        id: LoanApplicationId,
        changes: &LoanApplicationChanges,
    ) -> Result<Option<LoanApplication>, AppError> {
        let mut applications = self.applications.write();
        Ok(applications.iter_mut().find(|a| a.id == id).map(|application| {
            changes.apply_to(application, Utc::now());
            application.clone()
        }))
    }

    async fn delete(&self, id: LoanApplicationId) -> Result<bool, AppError> {
        let mut applications = self.applications.write();
        let before = applications.len();
        applications.retain(|a| a.id != id);
        Ok(applications.len() < before)
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
