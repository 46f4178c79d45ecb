//! Integration tests for the tire request lifecycle and its images.

mod helpers;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};

use helpers::{PNG, TestApp, TestResponse, multipart_body, multipart_content_type, tire_form};

/// Submits one request for E001 with two images and returns its JSON.
async fn submit_with_images(app: &TestApp, token: &str) -> Value {
    let response = app
        .submit(
            &tire_form("E001"),
            &[("front.png", PNG), ("rear.jpg", &b"not really a jpeg"[..])],
            token,
        )
        .await;
    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);
    response.body
}

fn image_names(request: &Value) -> Vec<String> {
    request["imagePaths"]
        .as_array()
        .expect("imagePaths")
        .iter()
        .map(|v| v.as_str().expect("name").to_string())
        .collect()
}

#[tokio::test]
async fn test_submit_stores_images_under_request_dir() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let created = submit_with_images(&app, &token).await;
    assert_eq!(created["status"], "Pending");
    assert_eq!(created["officerServiceNo"], "E001");
    assert_eq!(created["vehicleNo"], "CAB-1234");
    assert!(created["approvedBy"].is_null());
    assert_eq!(created["comments"][0]["text"], "Front tires worn");

    let names = image_names(&created);
    assert_eq!(names.len(), 2);
    assert!(names[0].ends_with(".png"));
    assert!(names[1].ends_with(".jpg"));

    let dir = app.upload_root.join(created["id"].as_str().unwrap());
    for name in &names {
        assert!(dir.join(name).is_file(), "{name} missing on disk");
    }
}

#[tokio::test]
async fn test_submit_skips_empty_image_parts() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let response = app
        .submit(&tire_form("E001"), &[("empty.png", &b""[..]), ("ok.gif", &b"GIF89a"[..])], &token)
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(image_names(&response.body).len(), 1);
}

#[tokio::test]
async fn test_invalid_image_type_rolls_back_everything() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let response = app
        .submit(
            &tire_form("E001"),
            &[("front.png", PNG), ("scan.bmp", &b"BM...."[..])],
            &token,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
    let message = response.body["message"].as_str().unwrap();
    assert!(message.starts_with("Failed to store image scan.bmp"), "{message}");

    let manager = app.login("m001@example.com").await;
    let all = app
        .request("GET", "/api/tire-requests", None, Some(&manager))
        .await;
    assert_eq!(all.body, json!([]));

    let leftovers = std::fs::read_dir(&app.upload_root).unwrap().count();
    assert_eq!(leftovers, 0);
}

#[tokio::test]
async fn test_single_disallowed_image_is_bad_request() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let response = app
        .submit(&tire_form("E001"), &[("notes.txt", &b"just text"[..])], &token)
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"], "VALIDATION");
    let message = response.body["message"].as_str().unwrap();
    assert!(
        message.starts_with("Failed to store image notes.txt: Invalid file type."),
        "{message}"
    );
    assert_eq!(std::fs::read_dir(&app.upload_root).unwrap().count(), 0);
}

#[tokio::test]
async fn test_submit_rejects_bad_forms() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    let unknown_owner = app.submit(&tire_form("E999"), &[], &token).await;
    assert_eq!(unknown_owner.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        unknown_owner.body["message"],
        "Invalid or missing officerServiceNo."
    );

    let mut long_vehicle = tire_form("E001");
    long_vehicle["vehicleNo"] = json!("ABCDEFGHIJKLMNOP");
    let response = app.submit(&long_vehicle, &[], &token).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let mut km_backwards = tire_form("E001");
    km_backwards["presentKm"] = json!("1000");
    let response = app.submit(&km_backwards, &[], &token).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let req = Request::builder()
        .method("POST")
        .uri("/api/tire-requests")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from(multipart_body(None, &[("a.png", PNG)])))
        .unwrap();
    let missing_part: TestResponse = app.send(req).await.into();
    assert_eq!(missing_part.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        missing_part.body["message"],
        "Required part 'tireRequest' is not present."
    );
}

#[tokio::test]
async fn test_submit_requires_authentication() {
    let app = TestApp::seeded().await;
    let req = Request::builder()
        .method("POST")
        .uri("/api/tire-requests")
        .header(header::CONTENT_TYPE, multipart_content_type())
        .body(Body::from(multipart_body(Some(&tire_form("E001")), &[])))
        .unwrap();
    let response = app.send(req).await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_listing_rules() {
    let app = TestApp::seeded().await;
    let user = app.login("e001@example.com").await;
    let tto = app.login("t001@example.com").await;

    let created = submit_with_images(&app, &user).await;
    let id = created["id"].as_str().unwrap();

    let all_as_user = app.request("GET", "/api/tire-requests", None, Some(&user)).await;
    assert_eq!(all_as_user.status, StatusCode::FORBIDDEN);

    let all = app.request("GET", "/api/tire-requests", None, Some(&tto)).await;
    assert_eq!(all.status, StatusCode::OK);
    assert_eq!(all.body.as_array().map(Vec::len), Some(1));

    let one = app
        .request("GET", &format!("/api/tire-requests/{id}"), None, Some(&user))
        .await;
    assert_eq!(one.status, StatusCode::OK);
    assert_eq!(one.body["id"], id);

    let mine = app
        .request("GET", "/api/tire-requests/user/E001", None, Some(&user))
        .await;
    assert_eq!(mine.body.as_array().map(Vec::len), Some(1));

    let none = app
        .request("GET", "/api/tire-requests/user/E002", None, Some(&user))
        .await;
    assert_eq!(none.status, StatusCode::OK);
    assert_eq!(none.body, json!([]));

    let unknown = app
        .request("GET", "/api/tire-requests/user/E999", None, Some(&user))
        .await;
    assert_eq!(unknown.status, StatusCode::NOT_FOUND);

    let pending = app
        .request("GET", "/api/tire-requests/status/pending", None, Some(&tto))
        .await;
    assert_eq!(pending.body.as_array().map(Vec::len), Some(1));

    let bogus = app
        .request("GET", "/api/tire-requests/status/archived", None, Some(&tto))
        .await;
    assert_eq!(bogus.status, StatusCode::BAD_REQUEST);

    let by_vehicle = app
        .request("GET", "/api/tire-requests/vehicle/CAB-1234", None, Some(&tto))
        .await;
    assert_eq!(by_vehicle.body.as_array().map(Vec::len), Some(1));

    let by_vehicle_as_user = app
        .request("GET", "/api/tire-requests/vehicle/CAB-1234", None, Some(&user))
        .await;
    assert_eq!(by_vehicle_as_user.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_unknown_and_malformed_ids_are_not_found() {
    let app = TestApp::seeded().await;
    let token = app.login("e001@example.com").await;

    for path in [
        "/api/tire-requests/not-a-uuid",
        "/api/tire-requests/00000000-0000-0000-0000-000000000000",
    ] {
        let response = app.request("GET", path, None, Some(&token)).await;
        assert_eq!(response.status, StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_approve_then_second_decision_conflicts() {
    let app = TestApp::seeded().await;
    let user = app.login("e001@example.com").await;
    let tto = app.login("t001@example.com").await;
    let created = submit_with_images(&app, &user).await;
    let path = format!("/api/tire-requests/{}/status", created["id"].as_str().unwrap());

    let approved = app
        .request(
            "PUT",
            &path,
            Some(json!({ "status": "approved", "approvedBy": "M001", "comments": "Go ahead" })),
            Some(&tto),
        )
        .await;
    assert_eq!(approved.status, StatusCode::OK, "{:?}", approved.body);
    assert_eq!(approved.body["status"], "Approved");
    assert_eq!(approved.body["approvedBy"], "M001");
    assert!(approved.body["approvedDate"].is_string());
    assert!(approved.body["rejectedDate"].is_null());
    let comments = approved.body["comments"].as_array().unwrap();
    assert_eq!(
        comments.last().unwrap()["text"],
        "Status update (Approved): Go ahead"
    );

    let again = app
        .request("PUT", &path, Some(json!({ "status": "Rejected" })), Some(&tto))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let stored = app
        .request("GET", &path.replace("/status", ""), None, Some(&tto))
        .await;
    assert_eq!(stored.body["status"], "Approved");
}

#[tokio::test]
async fn test_reject_defaults_approver_to_caller() {
    let app = TestApp::seeded().await;
    let user = app.login("e001@example.com").await;
    let manager = app.login("m001@example.com").await;
    let created = submit_with_images(&app, &user).await;
    let path = format!("/api/tire-requests/{}/status", created["id"].as_str().unwrap());

    let rejected = app
        .request("PUT", &path, Some(json!({ "status": "Rejected" })), Some(&manager))
        .await;
    assert_eq!(rejected.status, StatusCode::OK);
    assert_eq!(rejected.body["status"], "Rejected");
    assert_eq!(rejected.body["approvedBy"], "M001");
    assert!(rejected.body["rejectedDate"].is_string());
    assert!(rejected.body["approvedDate"].is_null());
}

#[tokio::test]
async fn test_invalid_transitions_leave_request_pending() {
    let app = TestApp::seeded().await;
    let user = app.login("e001@example.com").await;
    let tto = app.login("t001@example.com").await;
    let created = submit_with_images(&app, &user).await;
    let path = format!("/api/tire-requests/{}/status", created["id"].as_str().unwrap());

    let by_user = app
        .request("PUT", &path, Some(json!({ "status": "Approved" })), Some(&user))
        .await;
    assert_eq!(by_user.status, StatusCode::FORBIDDEN);

    let bad_status = app
        .request("PUT", &path, Some(json!({ "status": "Pending" })), Some(&tto))
        .await;
    assert_eq!(bad_status.status, StatusCode::BAD_REQUEST);

    let bad_approver = app
        .request(
            "PUT",
            &path,
            Some(json!({ "status": "Approved", "approvedBy": "X999" })),
            Some(&tto),
        )
        .await;
    assert_eq!(bad_approver.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        bad_approver.body["message"],
        "Invalid or missing approvedBy employee ID."
    );

    let stored = app
        .request("GET", &path.replace("/status", ""), None, Some(&tto))
        .await;
    assert_eq!(stored.body["status"], "Pending");
    assert_eq!(stored.body["comments"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_images_are_served_publicly() {
    let app = TestApp::seeded().await;
    let user = app.login("e001@example.com").await;
    let created = submit_with_images(&app, &user).await;
    let id = created["id"].as_str().unwrap();
    let names = image_names(&created);

    let req = Request::builder()
        .uri(format!("/api/tire-requests/images/{id}/{}", names[0]))
        .body(Body::empty())
        .unwrap();
    let png = app.send(req).await;
    assert_eq!(png.status, StatusCode::OK);
    assert_eq!(png.headers[header::CONTENT_TYPE], "image/png");
    assert_eq!(
        png.headers[header::CONTENT_DISPOSITION],
        format!("inline; filename=\"{}\"", names[0]).as_str()
    );
    assert_eq!(png.body.as_ref(), PNG);

    // Content type comes from the bytes, not the extension.
    let req = Request::builder()
        .uri(format!("/api/tire-requests/images/{id}/{}", names[1]))
        .body(Body::empty())
        .unwrap();
    let fake_jpeg = app.send(req).await;
    assert_eq!(fake_jpeg.status, StatusCode::OK);
    assert_eq!(
        fake_jpeg.headers[header::CONTENT_TYPE],
        "application/octet-stream"
    );
}

#[tokio::test]
async fn test_image_lookup_failures() {
    let app = TestApp::seeded().await;
    let user = app.login("e001@example.com").await;
    let created = submit_with_images(&app, &user).await;
    let id = created["id"].as_str().unwrap();

    let missing = app
        .request(
            "GET",
            &format!("/api/tire-requests/images/{id}/nothing.png"),
            None,
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let traversal = app
        .request(
            "GET",
            &format!("/api/tire-requests/images/{id}/..%2F..%2Fsecret.png"),
            None,
            None,
        )
        .await;
    assert_eq!(traversal.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_owner_detaches_image() {
    let app = TestApp::seeded().await;
    let user = app.login("e001@example.com").await;
    let created = submit_with_images(&app, &user).await;
    let id = created["id"].as_str().unwrap();
    let names = image_names(&created);

    let response = app
        .request(
            "DELETE",
            &format!("/api/tire-requests/{id}/images/{}", names[0]),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body["message"],
        format!("File deleted successfully: {}", names[0])
    );
    assert!(!app.upload_root.join(id).join(&names[0]).exists());
    assert!(app.upload_root.join(id).join(&names[1]).exists());

    let stored = app
        .request("GET", &format!("/api/tire-requests/{id}"), None, Some(&user))
        .await;
    assert_eq!(image_names(&stored.body), vec![names[1].clone()]);

    let again = app
        .request(
            "DELETE",
            &format!("/api/tire-requests/{id}/images/{}", names[0]),
            None,
            Some(&user),
        )
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
    assert_eq!(
        again.body["message"],
        "Filename not associated with this TireRequest."
    );
}

#[tokio::test]
async fn test_detach_ownership() {
    let app = TestApp::seeded().await;
    let owner = app.login("e001@example.com").await;
    let other = app.login("e002@example.com").await;
    let manager = app.login("m001@example.com").await;
    let created = submit_with_images(&app, &owner).await;
    let id = created["id"].as_str().unwrap();
    let names = image_names(&created);

    let stranger = app
        .request(
            "DELETE",
            &format!("/api/tire-requests/{id}/images/{}", names[0]),
            None,
            Some(&other),
        )
        .await;
    assert_eq!(stranger.status, StatusCode::FORBIDDEN);
    assert!(app.upload_root.join(id).join(&names[0]).exists());

    let by_manager = app
        .request(
            "DELETE",
            &format!("/api/tire-requests/{id}/images/{}", names[0]),
            None,
            Some(&manager),
        )
        .await;
    assert_eq!(by_manager.status, StatusCode::OK);
}
