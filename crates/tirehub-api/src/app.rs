//! Application builder: wires repositories, storage, auth and services into
//! an [`AppState`] and serves it.

use std::sync::Arc;

use tracing::{error, info};

use tirehub_auth::{PasswordHasher, PasswordValidator, RbacEnforcer, SessionManager};
use tirehub_core::config::{AppConfig, DatabaseConfig, DatabaseProvider};
use tirehub_core::error::AppError;
use tirehub_core::result::AppResult;
use tirehub_core::traits::ImageStore;
use tirehub_database::memory::{MemoryEmployeeRepository, MemoryTireRequestRepository};
use tirehub_database::migration::run_migrations;
use tirehub_database::repositories::{PgEmployeeRepository, PgTireRequestRepository};
use tirehub_database::{DatabasePool, EmployeeRepository, TireRequestRepository};
use tirehub_service::{EmployeeService, TireRequestService};
use tirehub_storage::LocalImageStore;

use crate::router::build_router;
use crate::state::AppState;

/// The persistence backend the services run against.
#[derive(Debug, Clone)]
pub struct Repositories {
    /// Employee rows.
    pub employees: Arc<dyn EmployeeRepository>,
    /// Tire request rows.
    pub tire_requests: Arc<dyn TireRequestRepository>,
}

impl Repositories {
    /// Process-local repositories.
    pub fn in_memory() -> Self {
        Self {
            employees: Arc::new(MemoryEmployeeRepository::new()),
            tire_requests: Arc::new(MemoryTireRequestRepository::new()),
        }
    }

    /// Repositories for the configured provider. PostgreSQL is migrated
    /// before use.
    pub async fn connect(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Memory => {
                info!("Using in-memory repositories");
                Ok(Self::in_memory())
            }
            DatabaseProvider::Postgres => {
                let db = DatabasePool::connect(config).await?;
                run_migrations(&db).await?;
                Ok(Self {
                    employees: Arc::new(PgEmployeeRepository::new(db.pool().clone())),
                    tire_requests: Arc::new(PgTireRequestRepository::new(db.pool().clone())),
                })
            }
        }
    }
}

/// Builds the shared state. Fails when the upload directory is unusable.
pub async fn build_state(config: AppConfig, repos: Repositories) -> AppResult<AppState> {
    let images: Arc<dyn ImageStore> =
        Arc::new(LocalImageStore::new(&config.storage.upload_dir).await?);

    let hasher = Arc::new(PasswordHasher::new());
    let session_manager = Arc::new(SessionManager::new(
        Arc::clone(&repos.employees),
        Arc::clone(&hasher),
        &config.auth,
    ));
    let employee_service = Arc::new(EmployeeService::new(
        Arc::clone(&repos.employees),
        hasher,
        PasswordValidator::new(&config.auth),
    ));
    let tire_request_service = Arc::new(TireRequestService::new(
        repos.tire_requests,
        repos.employees,
        images,
    ));

    Ok(AppState {
        config: Arc::new(config),
        session_manager,
        rbac: Arc::new(RbacEnforcer::new()),
        employee_service,
        tire_request_service,
    })
}

/// Binds the configured address and serves until Ctrl+C.
pub async fn serve(state: AppState) -> AppResult<()> {
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    info!("TireHub server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    info!("TireHub server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}
