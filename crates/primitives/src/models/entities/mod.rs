pub mod customer;
pub mod enum_types;
pub mod transaction;
pub mod wallet;
