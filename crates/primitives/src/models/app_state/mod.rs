pub mod app_config;
pub mod xpress_details;

pub use app_config::AppConfig;
pub use xpress_details::XpressInfo;
