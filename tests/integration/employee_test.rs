//! Integration tests for employee administration.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_manager_manages_employees() {
    let app = TestApp::seeded().await;
    let token = app.login("m001@example.com").await;

    let created = app
        .request(
            "POST",
            "/api/employees",
            Some(json!({
                "employeeId": "T002",
                "firstName": "Kamal",
                "lastName": "Perera",
                "email": "kamal@example.com",
                "password": PASSWORD,
                "position": "Transport Officer",
                "role": "tto"
            })),
            Some(&token),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.body["role"], "ROLE_TTO");

    let list = app.request("GET", "/api/employees", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body.as_array().map(Vec::len), Some(5));

    let updated = app
        .request(
            "PUT",
            "/api/employees/T002",
            Some(json!({ "department": "Fleet", "role": "manager" })),
            Some(&token),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["department"], "Fleet");
    assert_eq!(updated.body["role"], "ROLE_MANAGER");
    assert_eq!(updated.body["lastName"], "Perera");

    let deleted = app
        .request("DELETE", "/api/employees/T002", None, Some(&token))
        .await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);

    let gone = app
        .request("GET", "/api/employees/T002", None, Some(&token))
        .await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_user_cannot_administer_employees() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let list = app.request("GET", "/api/employees", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);
    assert_eq!(list.body["error"], "AUTHORIZATION");

    let create = app
        .request(
            "POST",
            "/api/employees",
            Some(json!({ "employeeId": "X1", "email": "x1@example.com", "password": PASSWORD })),
            Some(&token),
        )
        .await;
    assert_eq!(create.status, StatusCode::FORBIDDEN);

    let delete = app
        .request("DELETE", "/api/employees/E002", None, Some(&token))
        .await;
    assert_eq!(delete.status, StatusCode::FORBIDDEN);

    // Single-employee lookups are open to every role.
    let one = app
        .request("GET", "/api/employees/E002", None, Some(&token))
        .await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body["email"], "e002@example.com");
}

#[tokio::test]
async fn test_tto_cannot_list_employees() {
    let app = TestApp::seeded().await;
    let token = app.login("t001@example.com").await;

    let list = app.request("GET", "/api/employees", None, Some(&token)).await;
    assert_eq!(list.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_anonymous_is_unauthorized() {
    let app = TestApp::seeded().await;

    let list = app.request("GET", "/api/employees", None, None).await;
    assert_eq!(list.status, StatusCode::UNAUTHORIZED);

    let one = app.request("GET", "/api/employees/E001", None, None).await;
    assert_eq!(one.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_email_conflict_and_unknown_targets() {
    let app = TestApp::seeded().await;
    let token = app.login("m001@example.com").await;

    let conflict = app
        .request(
            "PUT",
            "/api/employees/E001",
            Some(json!({ "email": "e002@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(conflict.status, StatusCode::CONFLICT);
    assert_eq!(conflict.body["message"], "Error: New email is already in use!");

    let unchanged = app
        .request(
            "PUT",
            "/api/employees/E001",
            Some(json!({ "email": "E001@example.com" })),
            Some(&token),
        )
        .await;
    assert_eq!(unchanged.status, StatusCode::OK);

    let missing = app
        .request(
            "PUT",
            "/api/employees/E404",
            Some(json!({ "department": "x" })),
            Some(&token),
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let delete_missing = app
        .request("DELETE", "/api/employees/E404", None, Some(&token))
        .await;
    assert_eq!(delete_missing.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_rejects_invalid_input() {
    let app = TestApp::seeded().await;
    let token = app.login("m001@example.com").await;

    let bad_email = app
        .request(
            "POST",
            "/api/employees",
            Some(json!({ "employeeId": "E100", "email": "not-an-email", "password": PASSWORD })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_email.status, StatusCode::BAD_REQUEST);

    let missing_id = app
        .request(
            "POST",
            "/api/employees",
            Some(json!({ "email": "e100@example.com", "password": PASSWORD })),
            Some(&token),
        )
        .await;
    assert_eq!(missing_id.status, StatusCode::BAD_REQUEST);

    let bad_role = app
        .request(
            "PUT",
            "/api/employees/E001",
            Some(json!({ "role": "superuser" })),
            Some(&token),
        )
        .await;
    assert_eq!(bad_role.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_accepts_blank_email() {
    let app = TestApp::seeded().await;
    let token = app.login("m001@example.com").await;

    let cleared = app
        .request(
            "PUT",
            "/api/employees/E002",
            Some(json!({ "email": "" })),
            Some(&token),
        )
        .await;
    assert_eq!(cleared.status, StatusCode::OK);
    assert_eq!(cleared.body["email"], "");
    assert_eq!(cleared.body["firstName"], "E002");

    let malformed = app
        .request(
            "PUT",
            "/api/employees/E001",
            Some(json!({ "email": "not-an-email" })),
            Some(&token),
        )
        .await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
}
