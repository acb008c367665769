pub mod customer_repository;
pub mod transaction_repository;
pub mod wallet_repository;
