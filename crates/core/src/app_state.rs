use crate::events::{EventSink, LogEventSink};
use crate::providers::registry::ProviderRegistry;
use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::PgConnection;
use eyre::Result;
use payrail_primitives::error::ApiError;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing::error;

pub use payrail_primitives::models::app_state::AppConfig;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConn = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub http_client: Client,
    pub config: AppConfig,
    pub providers: Arc<ProviderRegistry>,
    pub events: Arc<dyn EventSink>,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Result<Arc<Self>> {
        Self::with_events(db, config, Arc::new(LogEventSink))
    }

    pub fn with_events(
        db: DbPool,
        config: AppConfig,
        events: Arc<dyn EventSink>,
    ) -> Result<Arc<Self>> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.xpress_details.request_timeout_secs))
            .build()?;

        let providers = Arc::new(ProviderRegistry::new(http.clone(), config.clone()));

        Ok(Arc::new(Self {
            db,
            http_client: http,
            config,
            providers,
            events,
        }))
    }

    pub fn db_conn(&self) -> Result<DbConn, ApiError> {
        self.db.get().map_err(|e| {
            error!(error = %e, "Failed to acquire database connection");
            ApiError::DatabaseConnection(e.to_string())
        })
    }
}
