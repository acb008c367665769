use crate::models::entities::enum_types::{CurrencyCode, DestinationType, TransactionStatus};
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Local record of one transfer attempt. `reference` is the caller-supplied
/// (or orchestrator-generated) idempotency key and is globally unique.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(belongs_to(crate::models::entities::wallet::Wallet))]
pub struct Transaction {
    pub id: Uuid,
    pub provider: String,
    pub provider_transaction_id: Option<String>,
    pub reference: String,
    pub wallet_id: Uuid,
    pub destination_type: DestinationType,
    pub destination_id: String,
    pub destination_bank_code: Option<String>,
    pub destination_account_name: Option<String>,
    pub amount: i64,
    pub fee: i64,
    pub total: i64,
    pub currency: CurrencyCode,
    pub status: TransactionStatus,
    pub narration: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransaction<'a> {
    pub provider: &'a str,
    pub provider_transaction_id: Option<&'a str>,
    pub reference: &'a str,
    pub wallet_id: Uuid,
    pub destination_type: DestinationType,
    pub destination_id: &'a str,
    pub destination_bank_code: Option<&'a str>,
    pub destination_account_name: Option<&'a str>,
    pub amount: i64,
    pub fee: i64,
    pub total: i64,
    pub currency: CurrencyCode,
    pub status: TransactionStatus,
    pub narration: Option<&'a str>,
}
