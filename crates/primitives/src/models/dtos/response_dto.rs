use crate::models::dtos::provider_dto::WalletBalance;
use crate::models::entities::customer::Customer;
use crate::models::entities::enum_types::{
    CurrencyCode, CustomerStatus, DestinationType, KycStatus, TransactionStatus, WalletStatus,
    WalletType,
};
use crate::models::entities::transaction::Transaction;
use crate::models::entities::wallet::Wallet;
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Uniform JSON envelope for every inbound-surface response.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerDto {
    pub id: Uuid,
    pub provider: String,
    pub provider_customer_id: String,
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub kyc_status: KycStatus,
    pub kyc_tier: i32,
    pub status: CustomerStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Customer> for CustomerDto {
    fn from(c: Customer) -> Self {
        Self {
            id: c.id,
            provider: c.provider,
            provider_customer_id: c.provider_customer_id,
            user_id: c.user_id,
            first_name: c.first_name,
            last_name: c.last_name,
            email: c.email,
            phone_number: c.phone_number,
            kyc_status: c.kyc_status,
            kyc_tier: c.kyc_tier,
            status: c.status,
            created_at: c.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WalletDto {
    pub id: Uuid,
    pub provider: String,
    pub provider_wallet_id: String,
    pub customer_id: Uuid,
    pub currency: CurrencyCode,
    pub wallet_type: WalletType,
    pub status: WalletStatus,
    pub available_balance: i64,
    pub ledger_balance: i64,
    pub reserved_balance: i64,
    pub balance_refreshed_at: Option<DateTime<Utc>>,
}

impl From<Wallet> for WalletDto {
    fn from(w: Wallet) -> Self {
        Self {
            id: w.id,
            provider: w.provider,
            provider_wallet_id: w.provider_wallet_id,
            customer_id: w.customer_id,
            currency: w.currency,
            wallet_type: w.wallet_type,
            status: w.status,
            available_balance: w.available_balance,
            ledger_balance: w.ledger_balance,
            reserved_balance: w.reserved_balance,
            balance_refreshed_at: w.balance_refreshed_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CustomerWalletDto {
    pub customer: CustomerDto,
    pub wallet: WalletDto,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceDto {
    pub wallet_id: Uuid,
    pub available: i64,
    pub ledger: i64,
    pub reserved: i64,
    pub currency: CurrencyCode,
    pub refreshed_at: DateTime<Utc>,
    /// True when this response was served from the local cache.
    pub cached: bool,
}

impl BalanceDto {
    pub fn from_cache(wallet: &Wallet) -> Self {
        Self {
            wallet_id: wallet.id,
            available: wallet.available_balance,
            ledger: wallet.ledger_balance,
            reserved: wallet.reserved_balance,
            currency: wallet.currency,
            refreshed_at: wallet.balance_refreshed_at.unwrap_or(wallet.updated_at),
            cached: true,
        }
    }

    pub fn from_provider(wallet_id: Uuid, balance: WalletBalance, refreshed_at: DateTime<Utc>) -> Self {
        Self {
            wallet_id,
            available: balance.available,
            ledger: balance.ledger,
            reserved: balance.reserved,
            currency: balance.currency,
            refreshed_at,
            cached: false,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionDto {
    pub id: Uuid,
    pub provider: String,
    pub provider_transaction_id: Option<String>,
    pub reference: String,
    pub wallet_id: Uuid,
    pub destination_type: DestinationType,
    pub destination_id: String,
    pub amount: i64,
    pub fee: i64,
    pub total: i64,
    pub currency: CurrencyCode,
    pub status: TransactionStatus,
    pub narration: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionDto {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id,
            provider: t.provider,
            provider_transaction_id: t.provider_transaction_id,
            reference: t.reference,
            wallet_id: t.wallet_id,
            destination_type: t.destination_type,
            destination_id: t.destination_id,
            amount: t.amount,
            fee: t.fee,
            total: t.total,
            currency: t.currency,
            status: t.status,
            narration: t.narration,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransactionListDto {
    pub transactions: Vec<TransactionDto>,
    pub page: i64,
    pub per_page: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BankDto {
    pub name: String,
    pub bank_code: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ResolvedAccountDto {
    pub account_name: String,
    pub account_number: String,
    pub bank_code: String,
}
