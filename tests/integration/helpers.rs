//! Shared test helpers for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use tirehub_api::{AppState, Repositories, build_router, build_state};
use tirehub_core::config::AppConfig;
use tirehub_entity::Employee;
use tirehub_service::NewEmployee;

/// Password every seeded employee signs in with.
pub const PASSWORD: &str = "password123";

const BOUNDARY: &str = "----tirehub-test-boundary";

/// 1x1 transparent PNG.
pub const PNG: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F,
    0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0A, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00,
    0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00, 0x00, 0x00, 0x49,
    0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// Test application context backed by in-memory repositories and a
/// temporary upload directory.
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Shared state, for seeding through the services
    pub state: AppState,
    /// Where uploaded images land
    pub upload_root: PathBuf,
    _upload_dir: TempDir,
}

impl TestApp {
    /// Create a new test application with no employees.
    pub async fn new() -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");

        let mut config = AppConfig::default();
        config.storage.upload_dir = upload_dir.path().to_string_lossy().into_owned();
        config.auth.jwt_secret = "integration-test-secret".to_string();

        let state = build_state(config, Repositories::in_memory())
            .await
            .expect("Failed to build state");
        let router = build_router(state.clone());

        Self {
            router,
            state,
            upload_root: upload_dir.path().to_path_buf(),
            _upload_dir: upload_dir,
        }
    }

    /// Create a new test application seeded with users `E001` and `E002`,
    /// manager `M001` and transport officer `T001`.
    pub async fn seeded() -> Self {
        let app = Self::new().await;
        app.create_employee("E001", "e001@example.com", "ROLE_USER").await;
        app.create_employee("E002", "e002@example.com", "ROLE_USER").await;
        app.create_employee("M001", "m001@example.com", "ROLE_MANAGER").await;
        app.create_employee("T001", "t001@example.com", "ROLE_TTO").await;
        app
    }

    /// Create an employee directly through the service layer.
    pub async fn create_employee(&self, id: &str, email: &str, role: &str) -> Employee {
        self.state
            .employee_service
            .create(NewEmployee {
                employee_id: id.to_string(),
                email: email.to_string(),
                password: PASSWORD.to_string(),
                role: Some(role.to_string()),
                first_name: Some(id.to_string()),
                ..Default::default()
            })
            .await
            .expect("Failed to create test employee")
    }

    /// Login and return the bearer token
    pub async fn login(&self, email: &str) -> String {
        let response = self
            .request(
                "POST",
                "/api/auth/login",
                Some(serde_json::json!({ "email": email, "password": PASSWORD })),
                None,
            )
            .await;

        assert_eq!(
            response.status,
            StatusCode::OK,
            "Login failed: {:?}",
            response.body
        );

        response.body["token"]
            .as_str()
            .expect("No token in login response")
            .to_string()
    }

    /// Make a JSON request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(token) = token {
            req = req.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await.into()
    }

    /// Submit a tire request as multipart: the `tireRequest` JSON part plus
    /// one `images` part per `(file_name, bytes)`.
    pub async fn submit(
        &self,
        form: &Value,
        images: &[(&str, &[u8])],
        token: &str,
    ) -> TestResponse {
        let req = Request::builder()
            .method("POST")
            .uri("/api/tire-requests")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(multipart_body(Some(form), images)))
            .expect("Failed to build request");

        self.send(req).await.into()
    }

    /// Send a prepared request and collect the raw response.
    pub async fn send(&self, req: Request<Body>) -> RawResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("Failed to read body");

        RawResponse {
            status,
            headers,
            body,
        }
    }
}

/// Build a multipart body. `form` is omitted when `None`.
pub fn multipart_body(form: Option<&Value>, images: &[(&str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();

    if let Some(form) = form {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"tireRequest\"\r\n\
                 Content-Type: application/json\r\n\r\n{form}\r\n"
            )
            .as_bytes(),
        );
    }

    for (file_name, data) in images {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"images\"; \
                 filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

/// Content type header value matching [`multipart_body`].
pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

/// A minimal valid submission owned by `officer`.
pub fn tire_form(officer: &str) -> Value {
    serde_json::json!({
        "vehicleNo": "CAB-1234",
        "vehicleType": "Van",
        "vehicleBrand": "Toyota",
        "vehicleModel": "HiAce",
        "userSection": "Logistics",
        "replacementDate": "2024-01-15",
        "existingMake": "Bridgestone",
        "tireSize": "195/70R15",
        "noOfTires": "4",
        "noOfTubes": "0",
        "costCenter": "CC-100",
        "presentKm": "45000",
        "previousKm": "20000",
        "wearIndicator": "Yes",
        "wearPattern": "Even",
        "officerServiceNo": officer,
        "comments": "Front tires worn"
    })
}

/// Response from a JSON test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body (`Null` when empty or not JSON)
    pub body: Value,
}

/// Response with headers and unparsed body
#[derive(Debug)]
pub struct RawResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl From<RawResponse> for TestResponse {
    fn from(raw: RawResponse) -> Self {
        Self {
            status: raw.status,
            body: serde_json::from_slice(&raw.body).unwrap_or(Value::Null),
        }
    }
}
