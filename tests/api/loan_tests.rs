//! Loan Application API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use test_case::test_case;

use crate::common::*;

#[tokio::test]
async fn test_root_greets() {
    let app = TestApp::new();

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(text_body(response).await, "Hello, World!");
}

#[tokio::test]
async fn test_apply_with_all_fields_creates_pending_application() {
    let app = TestApp::new();

    let response = app.post_json("/apply", &application_body("A")).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["message"], "You have successfully Applied For The Loan");

    let id = json["id"].as_str().unwrap();
    let response = app.get(&format!("/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let stored = json_body(response).await;
    assert_eq!(stored["id"], id);
    assert_eq!(stored["name"], "A");
    assert_eq!(stored["email"], "a@x.com");
    assert_eq!(stored["address"], "Addr");
    assert_eq!(stored["reasonForLoan"], "school");
    assert_eq!(stored["loanAmount"], 500.0);
    assert_eq!(stored["guarantorName"], "B");
    assert_eq!(stored["loanStatus"], false);
    assert!(stored["disbursedAmount"].is_null());
}

#[test_case("name")]
#[test_case("email")]
#[test_case("address")]
#[test_case("reasonForLoan")]
#[test_case("loanAmount")]
#[test_case("guarantorName")]
#[tokio::test]
async fn test_apply_without_field_is_rejected(field: &str) {
    let app = TestApp::new();
    let mut body = application_body("A");
    body.as_object_mut().unwrap().remove(field);

    let response = app.post_json("/apply", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "All fields are required" })
    );
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_apply_with_empty_string_is_rejected() {
    let app = TestApp::new();
    let mut body = application_body("A");
    body["guarantorName"] = json!("");

    let response = app.post_json("/apply", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_apply_with_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = send(
        &app.router,
        axum::http::Request::builder()
            .method("POST")
            .uri("/apply")
            .header("Content-Type", "application/json")
            .body(axum::body::Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "All fields are required" })
    );
}

#[tokio::test]
async fn test_apply_without_json_content_type_counts_as_empty() {
    let app = TestApp::new();

    let response = send(
        &app.router,
        axum::http::Request::builder()
            .method("POST")
            .uri("/apply")
            .body(axum::body::Body::from(application_body("A").to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "All fields are required" })
    );
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_apply_with_mistyped_amount_hides_parser_detail() {
    let app = TestApp::new();
    let mut body = application_body("A");
    body["loanAmount"] = json!("500");

    let response = app.post_json("/apply", &body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "All fields are required" })
    );
}

#[tokio::test]
async fn test_list_returns_every_application() {
    let app = TestApp::new();
    assert_eq!(json_body(app.get("/users").await).await, json!([]));

    app.submit(&application_body("A")).await;
    app.submit(&application_body("B")).await;

    let response = app.get("/users").await;
    assert_eq!(response.status(), StatusCode::OK);
    let names: Vec<_> = json_body(response)
        .await
        .as_array()
        .unwrap()
        .iter()
        .map(|a| a["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["A", "B"]);
}

#[tokio::test]
async fn test_search_returns_exact_matches() {
    let app = TestApp::new();
    app.submit(&application_body("Ada")).await;
    app.submit(&application_body("Ada")).await;
    app.submit(&application_body("Grace")).await;

    let many = json_body(app.get("/search?name=Ada").await).await;
    assert_eq!(many.as_array().unwrap().len(), 2);

    let one = json_body(app.get("/search?name=Grace").await).await;
    assert_eq!(one.as_array().unwrap().len(), 1);
    assert_eq!(one[0]["name"], "Grace");
}

#[tokio::test]
async fn test_search_without_matches_is_empty_ok() {
    let app = TestApp::new();
    app.submit(&application_body("Ada")).await;

    let response = app.get("/search?name=Nobody").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));

    let response = app.get("/search").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!([]));
}

#[tokio::test]
async fn test_update_changes_only_given_fields() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;

    let response = app
        .put_json(
            &format!("/users/{id}"),
            &json!({ "address": "New Addr", "loanAmount": 750 }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["address"], "New Addr");
    assert_eq!(updated["loanAmount"], 750.0);
    assert_eq!(updated["name"], "A");
    assert_eq!(updated["loanStatus"], false);
}

#[tokio::test]
async fn test_update_cannot_set_status() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;

    let response = app
        .put_json(&format!("/users/{id}"), &json!({ "loanStatus": true }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "Invalid request body" })
    );

    let stored = json_body(app.get(&format!("/users/{id}")).await).await;
    assert_eq!(stored["loanStatus"], false);
}

#[tokio::test]
async fn test_update_cannot_lower_amount_below_disbursement() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;
    app.patch(&format!("/users/{id}")).await;
    let response = app
        .post_json(
            &format!("/users/{id}/disbursement"),
            &json!({ "disbursedAmount": 300 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .put_json(&format!("/users/{id}"), &json!({ "loanAmount": 100 }))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "loanAmount: Loan amount cannot be less than the disbursed amount" })
    );

    let stored = json_body(app.get(&format!("/users/{id}")).await).await;
    assert_eq!(stored["loanAmount"], 500.0);
    assert_eq!(stored["disbursedAmount"], 300.0);
}

#[tokio::test]
async fn test_update_amount_may_still_cover_disbursement() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;
    app.patch(&format!("/users/{id}")).await;
    app.post_json(
        &format!("/users/{id}/disbursement"),
        &json!({ "disbursedAmount": 300 }),
    )
    .await;

    let response = app
        .put_json(&format!("/users/{id}"), &json!({ "loanAmount": 300 }))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = json_body(response).await;
    assert_eq!(updated["loanAmount"], 300.0);
    assert_eq!(updated["disbursedAmount"], 300.0);
}

#[tokio::test]
async fn test_approve_sets_status_and_is_idempotent() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;

    for _ in 0..2 {
        let response = app.patch(&format!("/users/{id}")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["message"], "User Loan approved successfully");
        assert_eq!(json["user"]["loanStatus"], true);
        assert_eq!(json["user"]["id"], id.as_str());
    }
}

#[tokio::test]
async fn test_delete_removes_application() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;

    let response = app.delete(&format!("/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "User deleted successfully" })
    );

    let response = app.get(&format!("/users/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(app.store.is_empty());
}

#[tokio::test]
async fn test_disbursement_after_approval() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;

    let response = app
        .post_json(
            &format!("/users/{id}/disbursement"),
            &json!({ "disbursedAmount": 300 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    app.patch(&format!("/users/{id}")).await;

    let response = app
        .post_json(
            &format!("/users/{id}/disbursement"),
            &json!({ "disbursedAmount": 900 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json(
            &format!("/users/{id}/disbursement"),
            &json!({ "disbursedAmount": 300 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["disbursedAmount"], 300.0);
    assert_eq!(json["loanStatus"], true);
}

#[tokio::test]
async fn test_disbursement_rejects_zero() {
    let app = TestApp::new();
    let id = app.submit(&application_body("A")).await;
    app.patch(&format!("/users/{id}")).await;

    let response = app
        .post_json(
            &format!("/users/{id}/disbursement"),
            &json!({ "disbursedAmount": 0 }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "disbursedAmount: Disbursed amount must be greater than zero" })
    );
}

#[tokio::test]
async fn test_unknown_id_is_not_found_for_every_route() {
    let app = TestApp::new();
    let uri = format!("/users/{}", unknown_id());

    let responses = vec![
        app.get(&uri).await,
        app.put_json(&uri, &json!({ "name": "X" })).await,
        app.patch(&uri).await,
        app.delete(&uri).await,
    ];

    for response in responses {
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            json_body(response).await,
            json!({ "message": "User not found" })
        );
    }
}

#[test_case("GET", "/users/not-an-id", None ; "get")]
#[test_case("PUT", "/users/not-an-id", Some(json!({ "name": "X" })) ; "update")]
#[test_case("PATCH", "/users/not-an-id", None ; "approve")]
#[test_case("DELETE", "/users/not-an-id", None ; "delete")]
#[test_case("POST", "/users/not-an-id/disbursement", Some(json!({ "disbursedAmount": 0 })) ; "disbursement")]
#[tokio::test]
async fn test_malformed_id_is_not_found(method: &str, uri: &str, body: Option<Value>) {
    let app = TestApp::new();
    let request = match body {
        Some(body) => json_request(method, uri, &body),
        None => empty_request(method, uri),
    };

    let response = send(&app.router, request).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({ "message": "User not found" })
    );
}

#[test_case("POST", "/apply", Some(application_body("A")), "Failed To Apply For Loan" ; "apply")]
#[test_case("GET", "/users", None, "Failed to retrieve users" ; "list")]
#[test_case("GET", "/users/{id}", None, "Failed to retrieve user" ; "get")]
#[test_case("GET", "/search?name=A", None, "Failed to search users" ; "search")]
#[test_case("PUT", "/users/{id}", Some(json!({ "name": "X" })), "Failed to update user" ; "update")]
#[test_case("PATCH", "/users/{id}", None, "Failed to update user" ; "approve")]
#[test_case("DELETE", "/users/{id}", None, "Failed to delete user" ; "delete")]
#[test_case("POST", "/users/{id}/disbursement", Some(json!({ "disbursedAmount": 100 })), "Failed to record disbursement" ; "disbursement")]
#[tokio::test]
async fn test_store_failure_maps_to_fixed_message(
    method: &str,
    uri: &str,
    body: Option<Value>,
    message: &str,
) {
    let router = TestApp::with_failing_store();
    let uri = uri.replace("{id}", &unknown_id());
    let request = match body {
        Some(body) => json_request(method, &uri, &body),
        None => empty_request(method, &uri),
    };

    let response = send(&router, request).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json_body(response).await, json!({ "message": message }));
}
