pub mod db_pool;
pub mod logging;
pub mod reconciliation;
pub mod server;
pub mod tasks;
