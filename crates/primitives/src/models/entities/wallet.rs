use crate::models::entities::enum_types::{CurrencyCode, WalletStatus, WalletType};
use chrono::{DateTime, Utc};
use diesel::{Associations, Identifiable, Insertable, Queryable};
use serde::Serialize;
use uuid::Uuid;

/// Provider-backed account. Balance columns are a cache of the partner's
/// view, stamped with `balance_refreshed_at`; only the balance-refresh and
/// transfer-completion paths mutate them.
#[derive(Debug, Clone, Queryable, Identifiable, Associations, Serialize)]
#[diesel(table_name = crate::schema::wallets)]
#[diesel(belongs_to(crate::models::entities::customer::Customer))]
pub struct Wallet {
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// True when the cached balance was refreshed within `ttl_secs`.
    pub fn balance_is_fresh(&self, now: DateTime<Utc>, ttl_secs: i64) -> bool {
        match self.balance_refreshed_at {
            Some(refreshed_at) => (now - refreshed_at).num_seconds() < ttl_secs,
            None => false,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::wallets)]
pub struct NewWallet<'a> {
    pub provider: &'a str,
    pub provider_wallet_id: &'a str,
    pub customer_id: Uuid,
    pub currency: CurrencyCode,
    pub wallet_type: WalletType,
    pub status: WalletStatus,
    pub available_balance: i64,
    pub ledger_balance: i64,
    pub reserved_balance: i64,
    pub balance_refreshed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn wallet_refreshed_at(refreshed_at: Option<DateTime<Utc>>) -> Wallet {
        Wallet {
            id: Uuid::new_v4(),
            provider: "xpress".into(),
            provider_wallet_id: "wal_1".into(),
            customer_id: Uuid::new_v4(),
            currency: CurrencyCode::NGN,
            wallet_type: WalletType::Customer,
            status: WalletStatus::Active,
            available_balance: 10_000,
            ledger_balance: 10_000,
            reserved_balance: 0,
            balance_refreshed_at: refreshed_at,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn balance_fresh_within_ttl() {
        let now = Utc::now();
        let wallet = wallet_refreshed_at(Some(now - Duration::seconds(200)));
        assert!(wallet.balance_is_fresh(now, 300));
    }

    #[test]
    fn balance_stale_after_ttl_or_without_refresh() {
        let now = Utc::now();
        let stale = wallet_refreshed_at(Some(now - Duration::seconds(301)));
        assert!(!stale.balance_is_fresh(now, 300));

        let never = wallet_refreshed_at(None);
        assert!(!never.balance_is_fresh(now, 300));
    }
}
