use crate::models::entities::enum_types::{CurrencyCode, DestinationType};
use chrono::{DateTime, NaiveDate, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

lazy_static! {
    static ref PHONE_RE: Regex = Regex::new(r"^\+?\d{10,15}$").expect("Invalid phone regex");
    static ref ACCOUNT_NUMBER_RE: Regex =
        Regex::new(r"^\d{10}$").expect("Invalid account number regex");
    static ref BANK_CODE_RE: Regex = Regex::new(r"^\d{3,9}$").expect("Invalid bank code regex");
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCustomerRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 100))]
    pub first_name: String,

    #[validate(length(min = 1, max = 100))]
    pub last_name: String,

    #[validate(email)]
    pub email: String,

    #[validate(regex(path = *PHONE_RE))]
    pub phone_number: String,

    #[validate(length(equal = 11))]
    pub identity_number: String,

    pub date_of_birth: Option<NaiveDate>,

    pub provider: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCustomerWalletRequest {
    #[validate(nested)]
    #[serde(flatten)]
    pub customer: CreateCustomerRequest,

    pub currency: CurrencyCode,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateWalletRequest {
    pub customer_id: Uuid,
    pub currency: CurrencyCode,
}

/// Transfer initiation. The routing identifier for bank destinations may be
/// supplied under either the internal name (`bank_code`) or the partner's
/// (`sort_code`); both spell the same value.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct TransferRequest {
    /// Local id of the source wallet.
    pub wallet_id: Uuid,

    /// Minor units (kobo/cents).
    #[validate(range(min = 100, max = 100_000_000))]
    pub amount: i64,

    pub destination_type: DestinationType,

    /// Local id of the destination wallet (wallet destinations only).
    pub destination_wallet_id: Option<Uuid>,

    #[validate(regex(path = *ACCOUNT_NUMBER_RE))]
    pub account_number: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub account_name: Option<String>,

    #[serde(default, alias = "bankCode")]
    #[validate(regex(path = *BANK_CODE_RE))]
    pub bank_code: Option<String>,

    #[serde(default, alias = "sortCode")]
    #[validate(regex(path = *BANK_CODE_RE))]
    pub sort_code: Option<String>,

    /// Idempotency reference; generated when absent.
    #[validate(length(min = 8, max = 64))]
    pub reference: Option<String>,

    #[validate(length(max = 200))]
    pub narration: Option<String>,

    pub provider: Option<String>,
}

impl TransferRequest {
    /// The single routing identifier regardless of which name the caller
    /// used. `bank_code` wins when both are present.
    pub fn routing_code(&self) -> Option<&str> {
        self.bank_code
            .as_deref()
            .or(self.sort_code.as_deref())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BalanceQuery {
    #[serde(default)]
    pub force_refresh: bool,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct HistoryParams {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    pub wallet_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ValidateAccountParams {
    #[serde(default, alias = "bankCode")]
    pub bank_code: Option<String>,

    #[serde(default, alias = "sortCode")]
    pub sort_code: Option<String>,

    #[validate(regex(path = *ACCOUNT_NUMBER_RE))]
    pub account_number: String,

    pub provider: Option<String>,
}

impl ValidateAccountParams {
    pub fn routing_code(&self) -> Option<&str> {
        self.bank_code
            .as_deref()
            .or(self.sort_code.as_deref())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CustomerLookupParams {
    pub user_id: Uuid,
    pub provider: Option<String>,
}
