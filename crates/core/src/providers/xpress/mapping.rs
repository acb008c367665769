//! Normalization between the partner's vocabulary and the internal model.
//! Every function here is total: any partner payload maps to a valid
//! internal value, falling back to a safe default instead of failing.

use crate::providers::xpress::types::{
    XpressAccount, XpressBank, XpressCustomer, XpressTransaction, XpressWalletData,
};
use payrail_primitives::models::{
    CurrencyCode, CustomerStatus, KycStatus, ProviderBank, ProviderCustomer, ProviderTransaction,
    ProviderWallet, ResolvedAccount, TransactionStatus, WalletStatus, WalletType,
};

/// Partner success code on transfer responses.
const RESPONSE_CODE_SUCCESS: &str = "00";

/// Partner amounts are major units (naira); internal amounts are minor
/// units (kobo).
pub fn minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub fn major_units(amount: i64) -> f64 {
    amount as f64 / 100.0
}

/// Tier 0 (or absent) means the partner has not verified the customer yet;
/// any higher tier means verified.
pub fn kyc_from_tier(tier: Option<i64>) -> (KycStatus, i32) {
    match tier {
        Some(t) if t > 0 => (KycStatus::Verified, t.clamp(0, i32::MAX as i64) as i32),
        _ => (KycStatus::Pending, 0),
    }
}

pub fn customer_status_from(status: Option<&str>) -> CustomerStatus {
    match status.map(str::to_lowercase).as_deref() {
        Some("suspended") | Some("barred") | Some("blocked") => CustomerStatus::Suspended,
        Some("closed") | Some("deleted") => CustomerStatus::Closed,
        _ => CustomerStatus::Active,
    }
}

/// The partner omits the wallet type for its default virtual wallets.
pub fn wallet_type_from(wallet_type: Option<&str>) -> WalletType {
    match wallet_type.map(str::to_lowercase).as_deref() {
        Some("merchant") => WalletType::Merchant,
        _ => WalletType::Customer,
    }
}

pub fn wallet_status_from(status: Option<&str>) -> WalletStatus {
    match status.map(str::to_lowercase).as_deref() {
        Some("frozen") | Some("blocked") | Some("barred") => WalletStatus::Frozen,
        Some("closed") | Some("deleted") => WalletStatus::Closed,
        _ => WalletStatus::Active,
    }
}

pub fn currency_from(currency: Option<&str>) -> CurrencyCode {
    currency
        .and_then(|c| CurrencyCode::parse(c).ok())
        .unwrap_or(CurrencyCode::NGN)
}

/// Transaction status from either an explicit status string or the
/// response code; `"00"` means unconditional success.
pub fn transaction_status_from(
    status: Option<&str>,
    response_code: Option<&str>,
) -> TransactionStatus {
    if response_code == Some(RESPONSE_CODE_SUCCESS) {
        return TransactionStatus::Completed;
    }

    match status.map(str::to_lowercase).as_deref() {
        Some("success") | Some("successful") | Some("completed") => TransactionStatus::Completed,
        Some("failed") | Some("error") | Some("declined") => TransactionStatus::Failed,
        Some("reversed") => TransactionStatus::Reversed,
        Some("processing") => TransactionStatus::Processing,
        _ => TransactionStatus::Pending,
    }
}

pub fn map_customer(customer: XpressCustomer) -> ProviderCustomer {
    let (kyc_status, kyc_tier) = kyc_from_tier(customer.tier);
    ProviderCustomer {
        provider_customer_id: customer.id,
        first_name: customer.first_name,
        last_name: customer.last_name,
        email: customer.email.unwrap_or_default(),
        phone_number: customer.phone_number.unwrap_or_default(),
        kyc_status,
        kyc_tier,
        status: customer_status_from(customer.status.as_deref()),
    }
}

pub fn map_wallet(wallet: XpressWalletData) -> ProviderWallet {
    ProviderWallet {
        provider_wallet_id: wallet.id,
        provider_customer_id: wallet.customer_id,
        currency: currency_from(wallet.currency.as_deref()),
        wallet_type: wallet_type_from(wallet.wallet_type.as_deref()),
        status: wallet_status_from(wallet.status.as_deref()),
        available_balance: minor_units(wallet.available_balance.unwrap_or(0.0)),
        ledger_balance: minor_units(wallet.booked_balance.unwrap_or(0.0)),
        reserved_balance: minor_units(wallet.reserved_balance.unwrap_or(0.0)),
    }
}

pub fn map_transaction(txn: XpressTransaction) -> ProviderTransaction {
    let amount = minor_units(txn.amount);
    let fee = minor_units(txn.charges.unwrap_or(0.0));
    ProviderTransaction {
        provider_transaction_id: txn.transaction_id,
        reference: txn.reference,
        amount,
        fee,
        total: txn.total.map(minor_units).unwrap_or(amount + fee),
        status: transaction_status_from(txn.status.as_deref(), txn.response_code.as_deref()),
        narration: txn.description,
        created_at: txn.created_at,
    }
}

/// The partner calls the routing identifier a sort code; internally it is a
/// bank code. Same value, different name.
pub fn map_bank(bank: XpressBank) -> ProviderBank {
    ProviderBank {
        name: bank.name,
        bank_code: bank.sort_code,
    }
}

pub fn map_account(account: XpressAccount) -> ResolvedAccount {
    ResolvedAccount {
        account_name: account.account_name,
        account_number: account.account_number,
        bank_code: account.sort_code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_zero_is_pending_higher_tiers_verified() {
        assert_eq!(kyc_from_tier(None), (KycStatus::Pending, 0));
        assert_eq!(kyc_from_tier(Some(0)), (KycStatus::Pending, 0));
        assert_eq!(kyc_from_tier(Some(1)), (KycStatus::Verified, 1));
        assert_eq!(kyc_from_tier(Some(3)), (KycStatus::Verified, 3));
    }

    #[test]
    fn wallet_type_defaults_to_customer() {
        assert_eq!(wallet_type_from(None), WalletType::Customer);
        assert_eq!(wallet_type_from(Some("virtual")), WalletType::Customer);
        assert_eq!(wallet_type_from(Some("MERCHANT")), WalletType::Merchant);
    }

    #[test]
    fn response_code_00_wins_over_status_string() {
        assert_eq!(
            transaction_status_from(Some("pending"), Some("00")),
            TransactionStatus::Completed
        );
        assert_eq!(
            transaction_status_from(Some("successful"), None),
            TransactionStatus::Completed
        );
        assert_eq!(
            transaction_status_from(Some("failed"), Some("99")),
            TransactionStatus::Failed
        );
    }

    #[test]
    fn unknown_statuses_fall_back_to_pending() {
        assert_eq!(
            transaction_status_from(Some("weird-partner-value"), None),
            TransactionStatus::Pending
        );
        assert_eq!(transaction_status_from(None, None), TransactionStatus::Pending);
    }

    #[test]
    fn amounts_round_trip_between_unit_conventions() {
        assert_eq!(minor_units(150.25), 15025);
        assert_eq!(minor_units(0.0), 0);
        assert_eq!(major_units(15025), 150.25);
    }

    #[test]
    fn unknown_currency_defaults_to_ngn() {
        assert_eq!(currency_from(Some("NGN")), CurrencyCode::NGN);
        assert_eq!(currency_from(Some("usd")), CurrencyCode::USD);
        assert_eq!(currency_from(Some("???")), CurrencyCode::NGN);
        assert_eq!(currency_from(None), CurrencyCode::NGN);
    }

    #[test]
    fn sort_code_becomes_bank_code() {
        let bank = map_bank(XpressBank {
            name: "Guaranty Trust Bank".into(),
            sort_code: "000013".into(),
        });
        assert_eq!(bank.bank_code, "000013");
    }
}
