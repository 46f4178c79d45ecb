//! Integration tests for registration, login, sessions, and route protection.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::{PASSWORD, TestApp};

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");

    // A bad token is ignored on public routes.
    let response = app
        .request("GET", "/api/health", None, Some("not-a-token"))
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_register_creates_user_role_employee() {
    let app = TestApp::new().await;

    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "employeeId": "E100",
                "firstName": "Nimal",
                "email": "nimal@example.com",
                "password": PASSWORD,
                "jobStartDate": "2023-04-01"
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Employee registered successfully!");
    let employee = &response.body["employee"];
    assert_eq!(employee["employeeId"], "E100");
    assert_eq!(employee["role"], "ROLE_USER");
    assert_eq!(employee["jobStartDate"], "2023-04-01");
    assert!(employee.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_conflicts_and_validation() {
    let app = TestApp::seeded().await;

    let duplicate_id = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "employeeId": "E001", "email": "new@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(duplicate_id.status, StatusCode::CONFLICT);
    assert_eq!(duplicate_id.body["message"], "Error: Employee ID is already taken!");

    let duplicate_email = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "employeeId": "E100", "email": "E001@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(duplicate_email.status, StatusCode::CONFLICT);
    assert_eq!(duplicate_email.body["message"], "Error: Email is already in use!");

    let short_password = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "employeeId": "E100", "email": "e100@example.com", "password": "short" })),
            None,
        )
        .await;
    assert_eq!(short_password.status, StatusCode::BAD_REQUEST);

    let unknown_role = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({
                "employeeId": "E100",
                "email": "e100@example.com",
                "password": PASSWORD,
                "role": "ROLE_ADMIN"
            })),
            None,
        )
        .await;
    assert_eq!(unknown_role.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::seeded().await;

    let response = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "m001@example.com", "password": PASSWORD })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["message"], "Login successful!");
    assert!(response.body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(response.body["expiresAt"].is_string());
    assert_eq!(response.body["employee"]["role"], "ROLE_MANAGER");
}

#[tokio::test]
async fn test_login_failures_share_one_message() {
    let app = TestApp::seeded().await;

    for body in [
        json!({ "email": "e001@example.com", "password": "wrongpassword" }),
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    ] {
        let response = app.request("POST", "/api/auth/login", Some(body), None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], "Error: Invalid email or password.");
    }
}

#[tokio::test]
async fn test_me_requires_authentication() {
    let app = TestApp::seeded().await;

    let anonymous = app.request("GET", "/api/auth/me", None, None).await;
    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(anonymous.body["error"], "AUTHENTICATION");

    let forged = app
        .request("GET", "/api/auth/me", None, Some("forged.token.value"))
        .await;
    assert_eq!(forged.status, StatusCode::UNAUTHORIZED);

    let token = app.login("e001@example.com").await;
    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["employeeId"], "E001");
}

#[tokio::test]
async fn test_logout_invalidates_token() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let response = app
        .request("POST", "/api/auth/logout", None, Some(&token))
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let after = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(after.status, StatusCode::UNAUTHORIZED);

    // A fresh login still works.
    let token = app.login("e001@example.com").await;
    let again = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_own_profile() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let response = app
        .request(
            "PUT",
            "/api/auth/me",
            Some(json!({ "phoneNumber": "0771234567", "department": "Transport" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["phoneNumber"], "0771234567");
    assert_eq!(response.body["department"], "Transport");
    assert_eq!(response.body["firstName"], "E001");

    let escalate = app
        .request(
            "PUT",
            "/api/auth/me",
            Some(json!({ "role": "ROLE_MANAGER" })),
            Some(&token),
        )
        .await;
    assert_eq!(escalate.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_password_change_through_profile() {
    let app = TestApp::seeded().await;
    let token = app.login("e002@example.com").await;

    let response = app
        .request(
            "PUT",
            "/api/auth/me",
            Some(json!({ "password": "a-new-password" })),
            Some(&token),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let old = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "e002@example.com", "password": PASSWORD })),
            None,
        )
        .await;
    assert_eq!(old.status, StatusCode::UNAUTHORIZED);

    let new = app
        .request(
            "POST",
            "/api/auth/login",
            Some(json!({ "email": "e002@example.com", "password": "a-new-password" })),
            None,
        )
        .await;
    assert_eq!(new.status, StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new().await;

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();
    let response: helpers::TestResponse = app.send(req).await.into();

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
}
