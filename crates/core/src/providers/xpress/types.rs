//! Wire shapes of the Xpress partner API. These types never leave the
//! adapter; `mapping` translates them into the provider-agnostic model.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpressCustomer {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    /// KYC tier; tier 0 means unverified.
    #[serde(default)]
    pub tier: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpressWalletData {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub currency: Option<String>,
    /// Absent for the partner's default virtual wallets.
    #[serde(default)]
    pub wallet_type: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Major units (naira), the partner's convention.
    #[serde(default)]
    pub available_balance: Option<f64>,
    #[serde(default)]
    pub booked_balance: Option<f64>,
    #[serde(default)]
    pub reserved_balance: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpressTransaction {
    #[serde(default)]
    pub transaction_id: Option<String>,
    pub reference: String,
    pub amount: f64,
    #[serde(default)]
    pub charges: Option<f64>,
    #[serde(default)]
    pub total: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    /// "00" is the partner's unconditional-success code.
    #[serde(default)]
    pub response_code: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpressBank {
    pub name: String,
    pub sort_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct XpressAccount {
    pub account_name: String,
    pub account_number: String,
    pub sort_code: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct XpressPageMeta {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub per_page: Option<i64>,
    #[serde(default)]
    pub total: Option<i64>,
}
