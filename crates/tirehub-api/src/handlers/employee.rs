//! Employee administration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

use tirehub_core::error::AppError;
use tirehub_entity::Employee;

use crate::dto::request::{EmployeeRequest, UpdateEmployeeRequest};
use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// POST /api/employees
pub async fn create_employee(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<EmployeeRequest>,
) -> Result<(StatusCode, Json<Employee>), AppError> {
    let employee = state.employee_service.create(req.into()).await?;
    Ok((StatusCode::CREATED, Json(employee)))
}

/// GET /api/employees
pub async fn list_employees(
    State(state): State<AppState>,
) -> Result<Json<Vec<Employee>>, AppError> {
    Ok(Json(state.employee_service.list().await?))
}

/// GET /api/employees/{id}
pub async fn get_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employee_service.get(&id).await?))
}

/// PUT /api/employees/{id}
pub async fn update_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateEmployeeRequest>,
) -> Result<Json<Employee>, AppError> {
    Ok(Json(state.employee_service.update(&id, req.into()).await?))
}

/// DELETE /api/employees/{id}
pub async fn delete_employee(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.employee_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
