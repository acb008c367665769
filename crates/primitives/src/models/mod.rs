pub mod app_state;
pub mod dtos;
pub mod entities;

pub use app_state::{AppConfig, XpressInfo};
pub use dtos::provider_dto::*;
pub use dtos::request_dto::*;
pub use dtos::response_dto::*;
pub use dtos::webhook_dto::*;
pub use entities::customer::{Customer, NewCustomer};
pub use entities::enum_types::*;
pub use entities::transaction::{NewTransaction, Transaction};
pub use entities::wallet::{NewWallet, Wallet};
