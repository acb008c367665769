use crate::models::app_state::xpress_details::XpressInfo;
use eyre::Report;
use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    pub app_url: String,

    /// Provider chosen when a request does not name one.
    pub default_provider: String,

    /// How long a cached wallet balance stays fresh.
    pub balance_ttl_secs: i64,

    /// Maximum outbound attempts per provider call.
    pub provider_max_attempts: u32,

    pub xpress_details: XpressInfo,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),

            port: env::var("PORT").unwrap_or_else(|_| "8080".into()).parse()?,

            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),

            default_provider: env::var("DEFAULT_PROVIDER").unwrap_or_else(|_| "xpress".into()),

            balance_ttl_secs: env::var("BALANCE_TTL_SECS")
                .unwrap_or_else(|_| "300".into())
                .parse()?,

            provider_max_attempts: env::var("PROVIDER_MAX_ATTEMPTS")
                .unwrap_or_else(|_| "3".into())
                .parse()?,

            xpress_details: XpressInfo::from_env()?,
        })
    }

    /// Socket address the HTTP server binds.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
