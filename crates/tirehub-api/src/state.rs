//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use tirehub_auth::{RbacEnforcer, SessionManager};
use tirehub_core::config::AppConfig;
use tirehub_service::{EmployeeService, TireRequestService};

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Login, token authentication and logout
    pub session_manager: Arc<SessionManager>,
    /// Route authorization table
    pub rbac: Arc<RbacEnforcer>,
    /// Employee directory
    pub employee_service: Arc<EmployeeService>,
    /// Tire request lifecycle
    pub tire_request_service: Arc<TireRequestService>,
}
