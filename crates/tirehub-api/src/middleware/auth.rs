//! Per-request authentication and route authorization.
//!
//! Every request passes through [`authorize`]: a bearer token, when present,
//! is resolved to its live session and the resulting [`Principal`] is stored
//! in the request extensions for the [`AuthUser`](crate::extractors::AuthUser)
//! extractor. The route table then decides whether the caller may proceed.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Bearer;
use axum_extra::headers::{Authorization, HeaderMapExt};
use tracing::warn;

use tirehub_auth::Access;
use tirehub_core::error::AppError;
use tirehub_service::Principal;

use crate::state::AppState;

/// Resolves the caller and enforces the route authorization table.
///
/// A bad token on a public route is ignored; anywhere else it fails with 401.
pub async fn authorize(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let access = state
        .rbac
        .access_for(request.method().as_str(), request.uri().path());

    let bearer: Option<Authorization<Bearer>> = request.headers().typed_get();
    let principal = match bearer {
        Some(bearer) => {
            match state.session_manager.authenticate(bearer.token()).await {
                Ok(session) => Some(Principal::from(session)),
                Err(_) if access == Access::Public => None,
                Err(e) => {
                    warn!(path = %request.uri().path(), error = %e, "Rejected bearer token");
                    return Err(e);
                }
            }
        }
        None => None,
    };

    if let Err(e) = state.rbac.check(access, principal.as_ref().map(|p| p.role)) {
        warn!(
            method = %request.method(),
            path = %request.uri().path(),
            employee_id = principal.as_ref().map(|p| p.employee_id.as_str()),
            "Access denied"
        );
        return Err(e);
    }

    if let Some(principal) = principal {
        request.extensions_mut().insert(principal);
    }
    Ok(next.run(request).await)
}
