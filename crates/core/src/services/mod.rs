pub mod bank_service;
pub mod customer_service;
pub mod transfer_service;
pub mod wallet_service;
pub mod webhook_service;
