use chrono::{DateTime, Utc};
use diesel::prelude::*;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::dtos::provider_dto::WalletBalance;
use payrail_primitives::models::entities::wallet::{NewWallet, Wallet};
use payrail_primitives::schema::wallets;
use uuid::Uuid;

pub struct WalletRepository;

impl WalletRepository {
    pub fn insert(conn: &mut PgConnection, wallet: NewWallet) -> Result<Wallet, ApiError> {
        diesel::insert_into(wallets::table)
            .values(&wallet)
            .get_result::<Wallet>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Option<Wallet>, ApiError> {
        wallets::table
            .find(id)
            .first::<Wallet>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    pub fn find_by_customer(
        conn: &mut PgConnection,
        customer_id: Uuid,
    ) -> Result<Vec<Wallet>, ApiError> {
        wallets::table
            .filter(wallets::customer_id.eq(customer_id))
            .order(wallets::created_at.asc())
            .load::<Wallet>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_provider_wallet_id(
        conn: &mut PgConnection,
        provider: &str,
        provider_wallet_id: &str,
    ) -> Result<Option<Wallet>, ApiError> {
        wallets::table
            .filter(wallets::provider.eq(provider))
            .filter(wallets::provider_wallet_id.eq(provider_wallet_id))
            .first::<Wallet>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    /// Write back a fresh provider balance and stamp the refresh time.
    /// Only this path and transfer completion touch the balance columns.
    pub fn update_balance(
        conn: &mut PgConnection,
        wallet_id: Uuid,
        balance: &WalletBalance,
        refreshed_at: DateTime<Utc>,
    ) -> Result<Wallet, ApiError> {
        diesel::update(wallets::table.find(wallet_id))
            .set((
                wallets::available_balance.eq(balance.available),
                wallets::ledger_balance.eq(balance.ledger),
                wallets::reserved_balance.eq(balance.reserved),
                wallets::balance_refreshed_at.eq(Some(refreshed_at)),
                wallets::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<Wallet>(conn)
            .map_err(ApiError::Database)
    }
}
