use axum::routing::get;
use axum::Router;
use axum_prometheus::PrometheusMetricLayer;
use eyre::Report;
use http::HeaderValue;
use payrail_core::app_state::AppState;
use std::env;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub fn build_cors() -> Result<CorsLayer, Report> {
    let origins = env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into());

    let allowed_origins = origins
        .split(',')
        .map(|s| s.trim().parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| eyre::eyre!("Invalid CORS origin: {}", e))?;

    Ok(CorsLayer::new()
        .allow_methods(Any)
        .allow_headers(Any)
        .allow_origin(allowed_origins))
}

pub fn load_env() {
    if dotenvy::dotenv().is_ok() {
        info!("Loaded .env file");
    } else {
        info!("No .env file found, using system environment");
    }
}

pub fn build_router(state: Arc<AppState>) -> Result<Router, Report> {
    let cors = build_cors()?;
    let (metric_layer, metric_handle) = PrometheusMetricLayer::pair();

    Ok(payrail_api::create_router(state)
        .route("/metrics", get(|| async move { metric_handle.render() }))
        .layer(metric_layer)
        .layer(cors))
}
