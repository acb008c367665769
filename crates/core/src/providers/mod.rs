pub mod client;
pub mod registry;
pub mod retry;
pub mod xpress;

use async_trait::async_trait;
use payrail_primitives::error::ProviderError;
use payrail_primitives::models::{
    CurrencyCode, CustomerSearch, HistoryQuery, NewProviderCustomer, Paginated, ProviderBank,
    ProviderCustomer, ProviderCustomerUpdate, ProviderTransaction, ProviderTransferRequest,
    ProviderWallet, ResolvedAccount, WalletBalance,
};

/// Normalized contract every banking backend must satisfy. All parameters
/// and results are provider-agnostic; partner vocabulary stops at the
/// adapter implementing this trait.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the partner offers a single call creating a customer and a
    /// wallet together. Orchestrators prefer it when available.
    fn supports_combined_create(&self) -> bool {
        false
    }

    /// Establish (or re-establish) a session with the partner.
    async fn authenticate(&self) -> Result<(), ProviderError>;

    async fn create_customer(
        &self,
        req: &NewProviderCustomer,
    ) -> Result<ProviderCustomer, ProviderError>;

    async fn get_customer(
        &self,
        provider_customer_id: &str,
    ) -> Result<ProviderCustomer, ProviderError>;

    async fn update_customer(
        &self,
        provider_customer_id: &str,
        update: &ProviderCustomerUpdate,
    ) -> Result<ProviderCustomer, ProviderError>;

    async fn search_customers(
        &self,
        search: &CustomerSearch,
    ) -> Result<Paginated<ProviderCustomer>, ProviderError>;

    /// Optional direct lookup by phone number. Adapters without partner
    /// support return `None` rather than erroring.
    async fn find_customer_by_phone(
        &self,
        _phone_number: &str,
    ) -> Result<Option<ProviderCustomer>, ProviderError> {
        Ok(None)
    }

    async fn create_wallet(
        &self,
        provider_customer_id: &str,
        currency: CurrencyCode,
    ) -> Result<ProviderWallet, ProviderError>;

    /// Combined customer+wallet creation. The default falls back to two
    /// sequential calls for partners without a combined endpoint.
    async fn create_customer_wallet(
        &self,
        req: &NewProviderCustomer,
        currency: CurrencyCode,
    ) -> Result<(ProviderCustomer, ProviderWallet), ProviderError> {
        let customer = self.create_customer(req).await?;
        let wallet = self
            .create_wallet(&customer.provider_customer_id, currency)
            .await?;
        Ok((customer, wallet))
    }

    async fn get_wallet(&self, provider_wallet_id: &str) -> Result<ProviderWallet, ProviderError>;

    async fn list_wallets(
        &self,
        provider_customer_id: &str,
    ) -> Result<Vec<ProviderWallet>, ProviderError>;

    async fn get_balance(&self, provider_wallet_id: &str) -> Result<WalletBalance, ProviderError>;

    async fn initiate_transfer(
        &self,
        req: &ProviderTransferRequest,
    ) -> Result<ProviderTransaction, ProviderError>;

    async fn get_transaction(&self, reference: &str)
        -> Result<ProviderTransaction, ProviderError>;

    async fn transaction_history(
        &self,
        query: &HistoryQuery,
    ) -> Result<Paginated<ProviderTransaction>, ProviderError>;

    async fn list_banks(&self) -> Result<Vec<ProviderBank>, ProviderError>;

    async fn validate_account(
        &self,
        bank_code: &str,
        account_number: &str,
    ) -> Result<ResolvedAccount, ProviderError>;
}
