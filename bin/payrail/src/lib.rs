pub mod utility;

pub use payrail_primitives::error::ApiError;

use crate::utility::db_pool::create_db_pool;
use crate::utility::logging::setup_logging;
use crate::utility::reconciliation::spawn_background_tasks;
use crate::utility::server::serve;
use crate::utility::tasks::{build_router, load_env};
use eyre::Report;
use payrail_core::app_state::AppState;
use payrail_primitives::models::AppConfig;
use tracing::info;

pub async fn run() -> Result<(), Report> {
    // 1. load environment variables
    load_env();

    // 2. initialize logging first (so we can log everything else)
    setup_logging();

    info!("Starting Payrail application...");

    // 3. load configuration
    let config = AppConfig::from_env()?;

    // 4. create database connection pool
    let pool = create_db_pool()?;

    // 5. build application state
    let state = AppState::new(pool, config)?;

    // 6. start background reconciliation tasks
    spawn_background_tasks(state.clone());

    // 7. build axum router (metrics and CORS included)
    let app = build_router(state.clone())?;

    // 8. start HTTP server
    serve(app, &state.config).await?;

    info!("Payrail application shut down gracefully");
    Ok(())
}
