//! Loan Application Handlers
//!
//! Each handler performs one service call. Store failures are logged and
//! answered with the route's fixed 500 message.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::application::dto::request::{
    ApplyRequest, DisbursementRequest, SearchQueryParams, UpdateApplicationRequest,
    MISSING_FIELDS_MESSAGE,
};
use crate::application::dto::response::{
    ApplyResponse, ApproveResponse, MessageResponse, DELETED_MESSAGE,
};
use crate::application::services::LoanError;
use crate::domain::LoanApplication;
use crate::shared::error::{rejected_body, AppError};
use crate::startup::AppState;

pub const NOT_FOUND_MESSAGE: &str = "User not found";

const APPLY_FAILED: &str = "Failed To Apply For Loan";
const LIST_FAILED: &str = "Failed to retrieve users";
const GET_FAILED: &str = "Failed to retrieve user";
const SEARCH_FAILED: &str = "Failed to search users";
const UPDATE_FAILED: &str = "Failed to update user";
const DELETE_FAILED: &str = "Failed to delete user";
const DISBURSE_FAILED: &str = "Failed to record disbursement";

/// Map a service error to its HTTP form, using `failure` as the 500 message.
fn into_app_error(err: LoanError, failure: &'static str) -> AppError {
    match err {
        LoanError::NotFound => AppError::NotFound(NOT_FOUND_MESSAGE.into()),
        LoanError::Validation(msg) => AppError::Validation(msg),
        LoanError::NotApproved => AppError::Conflict(LoanError::NotApproved.to_string()),
        LoanError::Internal(detail) => {
            tracing::error!(error = %detail, "{}", failure);
            AppError::Internal(failure.into())
        }
    }
}

/// Greeting at the root path
pub async fn index() -> &'static str {
    "Hello, World!"
}

/// Submit a loan application
///
/// A body that cannot be read as JSON counts as one with no fields.
pub async fn apply(
    State(state): State<AppState>,
    payload: Result<Json<ApplyRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApplyResponse>), AppError> {
    let Json(body) = payload.map_err(|e| rejected_body(e, MISSING_FIELDS_MESSAGE))?;
    let new = body.into_new_application()?;

    let created = state
        .loans
        .apply(new)
        .await
        .map_err(|e| into_app_error(e, APPLY_FAILED))?;

    Ok((StatusCode::CREATED, Json(ApplyResponse::from(&created))))
}

/// List every application
pub async fn list_applications(
    State(state): State<AppState>,
) -> Result<Json<Vec<LoanApplication>>, AppError> {
    let applications = state
        .loans
        .list()
        .await
        .map_err(|e| into_app_error(e, LIST_FAILED))?;

    Ok(Json(applications))
}

/// Get one application by ID
pub async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LoanApplication>, AppError> {
    let application = state
        .loans
        .get(&id)
        .await
        .map_err(|e| into_app_error(e, GET_FAILED))?;

    Ok(Json(application))
}

/// Search applications by exact applicant name
pub async fn search_applications(
    State(state): State<AppState>,
    Query(params): Query<SearchQueryParams>,
) -> Result<Json<Vec<LoanApplication>>, AppError> {
    let applications = state
        .loans
        .search_by_name(params.name.as_deref())
        .await
        .map_err(|e| into_app_error(e, SEARCH_FAILED))?;

    Ok(Json(applications))
}

/// Update applicant details
pub async fn update_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateApplicationRequest>, JsonRejection>,
) -> Result<Json<LoanApplication>, AppError> {
    let Json(body) = payload?;
    let update = body.into_dto()?;

    let application = state
        .loans
        .update_details(&id, update)
        .await
        .map_err(|e| into_app_error(e, UPDATE_FAILED))?;

    Ok(Json(application))
}

/// Approve a loan
pub async fn approve_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApproveResponse>, AppError> {
    let application = state
        .loans
        .approve(&id)
        .await
        .map_err(|e| into_app_error(e, UPDATE_FAILED))?;

    Ok(Json(ApproveResponse::from(application)))
}

/// Record the amount paid out on an approved loan
pub async fn record_disbursement(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<DisbursementRequest>, JsonRejection>,
) -> Result<Json<LoanApplication>, AppError> {
    let Json(body) = payload?;

    let application = state
        .loans
        .record_disbursement(&id, body.disbursed_amount)
        .await
        .map_err(|e| into_app_error(e, DISBURSE_FAILED))?;

    Ok(Json(application))
}

/// Delete an application
pub async fn delete_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, AppError> {
    state
        .loans
        .delete(&id)
        .await
        .map_err(|e| into_app_error(e, DELETE_FAILED))?;

    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}
