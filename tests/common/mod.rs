//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use loan_applications::domain::{
    LoanApplication, LoanApplicationChanges, LoanApplicationId, LoanApplicationRepository,
    NewLoanApplication,
};
use loan_applications::infrastructure::repositories::InMemoryLoanApplicationRepository;
use loan_applications::shared::error::AppError;
use loan_applications::startup::{build_router, AppState};

/// Test application builder
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryLoanApplicationRepository>,
}

impl TestApp {
    /// Create a test application backed by an empty in-memory store
    pub fn new() -> Self {
        let store = Arc::new(InMemoryLoanApplicationRepository::new());
        let router = build_router(AppState::new(store.clone()));
        Self { router, store }
    }

    /// Create a test application whose store fails every call
    pub fn with_failing_store() -> Router {
        build_router(AppState::new(Arc::new(FailingRepository)))
    }

    async fn send(&self, request: Request<Body>) -> Response {
        send(&self.router, request).await
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> Response {
        self.send(empty_request("GET", uri)).await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response {
        self.send(json_request("POST", uri, body)).await
    }

    /// Make a PUT request with JSON body
    pub async fn put_json(&self, uri: &str, body: &Value) -> Response {
        self.send(json_request("PUT", uri, body)).await
    }

    /// Make a PATCH request without a body
    pub async fn patch(&self, uri: &str) -> Response {
        self.send(empty_request("PATCH", uri)).await
    }

    /// Make a DELETE request
    pub async fn delete(&self, uri: &str) -> Response {
        self.send(empty_request("DELETE", uri)).await
    }

    /// Submit an application and return its identifier
    pub async fn submit(&self, body: &Value) -> String {
        let response = self.post_json("/apply", body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        json["id"].as_str().unwrap().to_string()
    }
}

pub async fn send(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON
pub async fn json_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Read a response body as text
pub async fn text_body(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// A valid submission body
pub fn application_body(name: &str) -> Value {
    json!({
        "name": name,
        "email": "a@x.com",
        "address": "Addr",
        "reasonForLoan": "school",
        "loanAmount": 500,
        "guarantorName": "B"
    })
}

/// Identifier that is well-formed but never stored
pub fn unknown_id() -> String {
    LoanApplicationId::generate().to_string()
}

/// Store whose every operation fails, standing in for an unreachable database
pub struct FailingRepository;

fn unreachable_store() -> AppError {
    AppError::Internal("connection refused".into())
}

#[async_trait]
impl LoanApplicationRepository for FailingRepository {
    async fn insert(&self, _new: &NewLoanApplication) -> Result<LoanApplication, AppError> {
        Err(unreachable_store())
    }

    async fn find_all(&self) -> Result<Vec<LoanApplication>, AppError> {
        Err(unreachable_store())
    }

    async fn find_by_id(
        &self,
        _id: LoanApplicationId,
    ) -> Result<Option<LoanApplication>, AppError> {
        Err(unreachable_store())
    }

    async fn find_by_name(&self, _name: &str) -> Result<Vec<LoanApplication>, AppError> {
        Err(unreachable_store())
    }

    async fn update(
        &self,
        _id: LoanApplicationId,
        _changes: &LoanApplicationChanges,
    ) -> Result<Option<LoanApplication>, AppError> {
        Err(unreachable_store())
    }

    async fn delete(&self, _id: LoanApplicationId) -> Result<bool, AppError> {
        Err(unreachable_store())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Err(unreachable_store())
    }
}
