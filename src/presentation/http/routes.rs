//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::loan::index))
        .route("/apply", post(handlers::loan::apply))
        .route("/search", get(handlers::loan::search_applications))
        .merge(user_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        .with_state(state)
}

/// Loan application record routes
fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(handlers::loan::list_applications))
        .route(
            "/users/{id}",
            get(handlers::loan::get_application)
                .put(handlers::loan::update_application)
                .patch(handlers::loan::approve_application)
                .delete(handlers::loan::delete_application),
        )
        .route(
            "/users/{id}/disbursement",
            post(handlers::loan::record_disbursement),
        )
}
