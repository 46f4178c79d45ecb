//! Auth handlers: register, login, logout, and the caller's own profile.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use tirehub_core::error::AppError;
use tirehub_entity::Employee;

use crate::dto::request::{EmployeeRequest, LoginRequest, UpdateEmployeeRequest};
use crate::dto::response::{AuthResponse, LoginResponse, MessageResponse};
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<EmployeeRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), AppError> {
    let employee = state.employee_service.register(req.into()).await?;
    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            message: "Employee registered successfully!".to_string(),
            employee,
        }),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let result = state.session_manager.login(&req.email, &req.password).await?;
    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        token: result.token,
        expires_at: result.expires_at,
        employee: result.employee,
    }))
}

/// POST /api/auth/logout
pub async fn logout(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Json<MessageResponse> {
    state.session_manager.logout(&auth.session_id).await;
    Json(MessageResponse::new("Logged out successfully"))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employee_service.get(&auth.employee_id).await?))
}

/// PUT /api/auth/me
pub async fn update_me(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(req): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    let employee = state
        .employee_service
        .update_profile(auth.principal(), req.into())
        .await?;
    Ok(Json(employee))
}
