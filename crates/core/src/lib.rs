pub mod app_state;
pub mod events;
pub mod providers;
pub mod repositories;
pub mod services;

pub use app_state::AppState;
pub use providers::registry::ProviderRegistry;
pub use providers::WalletProvider;
