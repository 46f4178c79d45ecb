//! Route definitions for the TireHub HTTP API.
//!
//! All routes are mounted under `/api`. Every request passes through the
//! authorization middleware before reaching a handler.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let max_upload = usize::try_from(state.config.storage.max_upload_size_bytes)
        .unwrap_or(usize::MAX);

    let api_routes = Router::new()
        .merge(auth_routes())
        .merge(employee_routes())
        .merge(tire_request_routes())
        .route("/health", get(handlers::health::health));

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::authorize,
        ))
        .layer(DefaultBodyLimit::max(max_upload))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Registration, login, logout, and the caller's own profile
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route(
            "/auth/me",
            get(handlers::auth::me).put(handlers::auth::update_me),
        )
}

/// Employee administration
fn employee_routes() -> Router<AppState> {
    use handlers::employee::*;

    Router::new()
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/{id}",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
}

/// Tire request lifecycle and images
fn tire_request_routes() -> Router<AppState> {
    use handlers::tire_request::*;

    Router::new()
        .route(
            "/tire-requests",
            get(list_tire_requests).post(create_tire_request),
        )
        .route("/tire-requests/{id}", get(get_tire_request))
        .route("/tire-requests/{id}/status", put(update_status))
        .route("/tire-requests/user/{officer_service_no}", get(list_by_owner))
        .route("/tire-requests/status/{status}", get(list_by_status))
        .route("/tire-requests/vehicle/{vehicle_no}", get(list_by_vehicle))
        .route("/tire-requests/images/{id}/{filename}", get(serve_image))
        .route(
            "/tire-requests/{id}/images/{filename}",
            delete(delete_image),
        )
}
