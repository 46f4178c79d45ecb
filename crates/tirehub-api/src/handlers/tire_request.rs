//! Tire request handlers: multipart submission, lookups, decisions, and
//! image serving/detaching.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use tracing::info;

use tirehub_core::error::AppError;
use tirehub_core::traits::Attachment;
use tirehub_entity::TireRequest;

use crate::dto::request::{StatusUpdateRequest, TireRequestForm};
use crate::dto::response::MessageResponse;
use crate::extractors::path::parse_request_id;
use crate::extractors::validated::validate;
use crate::extractors::{AuthUser, ValidatedJson};
use crate::state::AppState;

/// POST /api/tire-requests
///
/// Multipart with one `tireRequest` JSON part and any number of `images` parts.
pub async fn create_tire_request(
    State(state): State<AppState>,
    auth: AuthUser,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<TireRequest>), AppError> {
    let mut form: Option<TireRequestForm> = None;
    let mut attachments = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "tireRequest" => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                let parsed = serde_json::from_slice(&data).map_err(|e| {
                    AppError::validation(format!("Malformed tireRequest part: {e}"))
                })?;
                form = Some(parsed);
            }
            "images" => {
                let file_name = field.file_name().map(String::from);
                let content_type = field.content_type().map(String::from);
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                attachments.push(Attachment {
                    file_name,
                    content_type,
                    data,
                });
            }
            _ => {}
        }
    }

    let form = form
        .ok_or_else(|| AppError::validation("Required part 'tireRequest' is not present."))?;
    validate(&form)?;
    form.check_numbers()?;

    info!(
        employee_id = %auth.employee_id,
        images = attachments.len(),
        "Tire request submission received"
    );
    let created = state
        .tire_request_service
        .create(form.into(), attachments)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/tire-requests
pub async fn list_tire_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<TireRequest>>, AppError> {
    Ok(Json(state.tire_request_service.list_all().await?))
}

/// GET /api/tire-requests/{id}
pub async fn get_tire_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TireRequest>, AppError> {
    let id = parse_request_id(&id)?;
    Ok(Json(state.tire_request_service.get(&id).await?))
}

/// GET /api/tire-requests/user/{officer_service_no}
pub async fn list_by_owner(
    State(state): State<AppState>,
    Path(officer_service_no): Path<String>,
) -> Result<Json<Vec<TireRequest>>, AppError> {
    Ok(Json(
        state
            .tire_request_service
            .list_by_owner(&officer_service_no)
            .await?,
    ))
}

/// GET /api/tire-requests/status/{status}
pub async fn list_by_status(
    State(state): State<AppState>,
    Path(status): Path<String>,
) -> Result<Json<Vec<TireRequest>>, AppError> {
    Ok(Json(state.tire_request_service.list_by_status(&status).await?))
}

/// GET /api/tire-requests/vehicle/{vehicle_no}
pub async fn list_by_vehicle(
    State(state): State<AppState>,
    Path(vehicle_no): Path<String>,
) -> Result<Json<Vec<TireRequest>>, AppError> {
    Ok(Json(
        state.tire_request_service.list_by_vehicle(&vehicle_no).await?,
    ))
}

/// PUT /api/tire-requests/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<StatusUpdateRequest>,
) -> Result<Json<TireRequest>, AppError> {
    let id = parse_request_id(&id)?;
    let updated = state
        .tire_request_service
        .transition(auth.principal(), &id, req.into())
        .await?;
    Ok(Json(updated))
}

/// GET /api/tire-requests/images/{id}/{filename}
///
/// Streams the stored file inline with its sniffed content type.
pub async fn serve_image(
    State(state): State<AppState>,
    Path((id, filename)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let image = state
        .tire_request_service
        .open_image(&id, &filename)
        .await?;

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, image.content_type)
        .header(header::CONTENT_LENGTH, image.size_bytes)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}\"", image.file_name),
        )
        .body(Body::from_stream(image.stream))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// DELETE /api/tire-requests/{id}/images/{filename}
pub async fn delete_image(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((id, filename)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, AppError> {
    let id = parse_request_id(&id)?;
    state
        .tire_request_service
        .detach_image(auth.principal(), &id, &filename)
        .await?;
    Ok(Json(MessageResponse::new(format!(
        "File deleted successfully: {filename}"
    ))))
}
