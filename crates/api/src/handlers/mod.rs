pub mod all_banks;
pub mod create_customer;
pub mod create_customer_wallet;
pub mod create_wallet;
pub mod customer_wallets;
pub mod get_balance;
pub mod get_customer;
pub mod get_transaction;
pub mod get_wallet;
pub mod health;
pub mod resolve_account;
pub mod transaction_history;
pub mod transfer;
pub mod xpress_webhook;
