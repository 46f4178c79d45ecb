//! TireHub Server: tire replacement requests for a vehicle fleet.
//!
//! Main entry point that loads configuration, initializes logging, wires the
//! crates together and starts the server.

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt};

use tirehub_api::{Repositories, build_state, serve};
use tirehub_core::config::AppConfig;
use tirehub_core::error::AppError;

/// Command-line arguments for the server binary.
#[derive(Debug, Parser)]
#[command(name = "tirehub-server", version, about = "TireHub HTTP server")]
struct Args {
    /// Configuration overlay to load from `config/{env}.toml`.
    #[arg(long, env = "TIREHUB_ENV", default_value = "development")]
    env: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let config = match AppConfig::load(&args.env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &args.env).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    if config.logging.is_json() {
        fmt()
            .json()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(true)
            .init();
    } else {
        fmt()
            .pretty()
            .with_env_filter(filter)
            .with_target(true)
            .init();
    }
}

async fn run(config: AppConfig, env: &str) -> Result<(), AppError> {
    tracing::info!(
        env,
        provider = ?config.database.provider,
        upload_dir = %config.storage.upload_dir,
        "Starting TireHub v{}",
        env!("CARGO_PKG_VERSION")
    );

    let repos = Repositories::connect(&config.database).await?;
    let state = build_state(config, repos).await?;
    serve(state).await
}
