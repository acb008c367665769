use crate::app_state::AppState;
use crate::events::DomainEvent;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::wallet_repository::WalletRepository;
use chrono::Utc;
use diesel::Connection;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{
    BalanceDto, CreateCustomerWalletRequest, CreateWalletRequest, CustomerWalletDto, CustomerDto,
    NewCustomer, NewProviderCustomer, NewWallet, Wallet, WalletDto,
};
use tracing::{info, warn};
use uuid::Uuid;

pub struct WalletService;

impl WalletService {
    /// Create a customer and their first wallet. Uses the provider's
    /// combined call when it has one, two sequential calls otherwise; both
    /// local rows land in one unit of work either way. The network call and
    /// the local write are not atomic with each other — a crash in between
    /// leaves the partner-side objects unrecorded locally.
    pub async fn create_customer_wallet(
        state: &AppState,
        req: CreateCustomerWalletRequest,
    ) -> Result<CustomerWalletDto, ApiError> {
        let provider = state.providers.resolve(req.customer.provider.as_deref())?;

        {
            let mut conn = state.db_conn()?;
            if CustomerRepository::find_by_user(&mut conn, provider.name(), req.customer.user_id)?
                .is_some()
            {
                return Err(ApiError::Conflict(format!(
                    "Customer already exists for user {} on provider {}",
                    req.customer.user_id,
                    provider.name()
                )));
            }
        }

        let new_customer = NewProviderCustomer {
            first_name: req.customer.first_name.clone(),
            last_name: req.customer.last_name.clone(),
            email: req.customer.email.clone(),
            phone_number: req.customer.phone_number.clone(),
            identity_number: req.customer.identity_number.clone(),
            date_of_birth: req.customer.date_of_birth,
        };

        // create_customer_wallet falls back to sequential calls inside the
        // adapter when the partner has no combined endpoint.
        let (created_customer, created_wallet) = if provider.supports_combined_create() {
            provider
                .create_customer_wallet(&new_customer, req.currency)
                .await?
        } else {
            let customer = provider.create_customer(&new_customer).await?;
            let wallet = provider
                .create_wallet(&customer.provider_customer_id, req.currency)
                .await?;
            (customer, wallet)
        };

        info!(
            provider = provider.name(),
            provider_customer_id = %created_customer.provider_customer_id,
            provider_wallet_id = %created_wallet.provider_wallet_id,
            "Provider customer and wallet created"
        );

        let now = Utc::now();
        let mut conn = state.db_conn()?;
        let (customer, wallet) = conn.transaction::<_, ApiError, _>(|conn| {
            let customer = CustomerRepository::insert(
                conn,
                NewCustomer {
                    provider: provider.name(),
                    provider_customer_id: &created_customer.provider_customer_id,
                    user_id: req.customer.user_id,
                    first_name: &req.customer.first_name,
                    last_name: &req.customer.last_name,
                    email: &req.customer.email,
                    phone_number: &req.customer.phone_number,
                    kyc_status: created_customer.kyc_status,
                    kyc_tier: created_customer.kyc_tier,
                    status: created_customer.status,
                },
            )?;

            let wallet = WalletRepository::insert(
                conn,
                NewWallet {
                    provider: provider.name(),
                    provider_wallet_id: &created_wallet.provider_wallet_id,
                    customer_id: customer.id,
                    currency: created_wallet.currency,
                    wallet_type: created_wallet.wallet_type,
                    status: created_wallet.status,
                    available_balance: created_wallet.available_balance,
                    ledger_balance: created_wallet.ledger_balance,
                    reserved_balance: created_wallet.reserved_balance,
                    balance_refreshed_at: Some(now),
                },
            )?;

            Ok((customer, wallet))
        })?;

        state.events.publish(DomainEvent::wallet_created(&wallet));

        Ok(CustomerWalletDto {
            customer: CustomerDto::from(customer),
            wallet: WalletDto::from(wallet),
        })
    }

    /// Add a wallet to an existing customer.
    pub async fn create_wallet(
        state: &AppState,
        req: CreateWalletRequest,
    ) -> Result<WalletDto, ApiError> {
        let customer = {
            let mut conn = state.db_conn()?;
            CustomerRepository::find_by_id(&mut conn, req.customer_id)?.ok_or_else(|| {
                ApiError::NotFound(format!("Customer {} not found", req.customer_id))
            })?
        };

        let provider = state.providers.get(&customer.provider)?;
        let created = provider
            .create_wallet(&customer.provider_customer_id, req.currency)
            .await?;

        let mut conn = state.db_conn()?;
        let wallet = WalletRepository::insert(
            &mut conn,
            NewWallet {
                provider: &customer.provider,
                provider_wallet_id: &created.provider_wallet_id,
                customer_id: customer.id,
                currency: created.currency,
                wallet_type: created.wallet_type,
                status: created.status,
                available_balance: created.available_balance,
                ledger_balance: created.ledger_balance,
                reserved_balance: created.reserved_balance,
                balance_refreshed_at: Some(Utc::now()),
            },
        )?;

        state.events.publish(DomainEvent::wallet_created(&wallet));

        Ok(WalletDto::from(wallet))
    }

    pub fn get_wallet(state: &AppState, wallet_id: Uuid) -> Result<WalletDto, ApiError> {
        let mut conn = state.db_conn()?;
        let wallet = WalletRepository::find_by_id(&mut conn, wallet_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Wallet {} not found", wallet_id)))?;
        Ok(WalletDto::from(wallet))
    }

    pub fn list_wallets(state: &AppState, customer_id: Uuid) -> Result<Vec<WalletDto>, ApiError> {
        let mut conn = state.db_conn()?;
        if CustomerRepository::find_by_id(&mut conn, customer_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "Customer {} not found",
                customer_id
            )));
        }
        let wallets = WalletRepository::find_by_customer(&mut conn, customer_id)?;
        Ok(wallets.into_iter().map(WalletDto::from).collect())
    }

    /// Balance read with a staleness budget: the cached value is good for
    /// `balance_ttl_secs` unless the caller forces a refresh.
    pub async fn get_balance(
        state: &AppState,
        wallet_id: Uuid,
        force_refresh: bool,
    ) -> Result<BalanceDto, ApiError> {
        let wallet = {
            let mut conn = state.db_conn()?;
            WalletRepository::find_by_id(&mut conn, wallet_id)?
                .ok_or_else(|| ApiError::NotFound(format!("Wallet {} not found", wallet_id)))?
        };

        let now = Utc::now();
        if !force_refresh && wallet.balance_is_fresh(now, state.config.balance_ttl_secs) {
            return Ok(BalanceDto::from_cache(&wallet));
        }

        Self::refresh_balance(state, &wallet).await
    }

    /// Fetch the provider's balance and write it through the local cache.
    pub async fn refresh_balance(state: &AppState, wallet: &Wallet) -> Result<BalanceDto, ApiError> {
        let provider = state.providers.get(&wallet.provider)?;
        let balance = provider.get_balance(&wallet.provider_wallet_id).await?;

        let refreshed_at = Utc::now();
        let mut conn = state.db_conn()?;
        WalletRepository::update_balance(&mut conn, wallet.id, &balance, refreshed_at)?;

        state.events.publish(DomainEvent::balance_updated(
            wallet.id,
            &wallet.provider,
            &balance,
        ));

        Ok(BalanceDto::from_provider(wallet.id, balance, refreshed_at))
    }

    /// Best-effort refresh after a transfer: the transfer already
    /// succeeded, so a failed refresh only means the cache stays stale
    /// within its TTL.
    pub async fn refresh_balance_or_warn(state: &AppState, wallet: &Wallet) {
        if let Err(err) = Self::refresh_balance(state, wallet).await {
            warn!(
                wallet_id = %wallet.id,
                error = %err,
                "Post-transfer balance refresh failed; cache remains stale"
            );
        }
    }
}
