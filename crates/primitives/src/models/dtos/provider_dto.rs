//! Provider-agnostic types exchanged across the wallet-provider contract.
//! No partner field name is allowed past this boundary; adapters translate
//! to and from their partner's vocabulary.

use crate::models::entities::enum_types::{
    CurrencyCode, CustomerStatus, KycStatus, TransactionStatus, WalletStatus, WalletType,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProviderCustomer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    /// BVN-equivalent identity number required by the partner's KYC.
    pub identity_number: String,
    pub date_of_birth: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderCustomerUpdate {
    pub email: Option<String>,
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderCustomer {
    pub provider_customer_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub kyc_status: KycStatus,
    pub kyc_tier: i32,
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderWallet {
    pub provider_wallet_id: String,
    pub provider_customer_id: String,
    pub currency: CurrencyCode,
    pub wallet_type: WalletType,
    pub status: WalletStatus,
    pub available_balance: i64,
    pub ledger_balance: i64,
    pub reserved_balance: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WalletBalance {
    pub available: i64,
    pub ledger: i64,
    pub reserved: i64,
    pub currency: CurrencyCode,
}

/// Where a transfer is routed. The partner routes money by customer
/// identity, so a wallet destination must carry the destination customer's
/// partner-side id by the time it reaches an adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TransferDestination {
    Wallet { customer_id: Option<String> },
    Bank {
        bank_code: String,
        account_number: String,
        account_name: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTransferRequest {
    pub source_customer_id: String,
    pub destination: TransferDestination,
    /// Minor units (kobo/cents).
    pub amount: i64,
    pub reference: String,
    pub narration: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderTransaction {
    pub provider_transaction_id: Option<String>,
    pub reference: String,
    pub amount: i64,
    pub fee: i64,
    pub total: i64,
    pub status: TransactionStatus,
    pub narration: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderBank {
    pub name: String,
    pub bank_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedAccount {
    pub account_name: String,
    pub account_number: String,
    pub bank_code: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryQuery {
    pub page: i64,
    pub per_page: i64,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub customer_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: i64,
    pub per_page: i64,
    pub total: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerSearch {
    pub query: String,
    pub page: i64,
    pub per_page: i64,
}
