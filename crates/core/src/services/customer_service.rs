use crate::app_state::AppState;
use crate::repositories::customer_repository::CustomerRepository;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{
    CreateCustomerRequest, CustomerDto, NewCustomer, NewProviderCustomer,
};
use tracing::info;
use uuid::Uuid;

pub struct CustomerService;

impl CustomerService {
    /// Create a partner-side customer and mirror it locally. One customer
    /// per (provider, owning user).
    pub async fn create_customer(
        state: &AppState,
        req: CreateCustomerRequest,
    ) -> Result<CustomerDto, ApiError> {
        let provider = state.providers.resolve(req.provider.as_deref())?;

        {
            let mut conn = state.db_conn()?;
            if CustomerRepository::find_by_user(&mut conn, provider.name(), req.user_id)?
                .is_some()
            {
                return Err(ApiError::Conflict(format!(
                    "Customer already exists for user {} on provider {}",
                    req.user_id,
                    provider.name()
                )));
            }
        }

        let created = provider
            .create_customer(&NewProviderCustomer {
                first_name: req.first_name.clone(),
                last_name: req.last_name.clone(),
                email: req.email.clone(),
                phone_number: req.phone_number.clone(),
                identity_number: req.identity_number.clone(),
                date_of_birth: req.date_of_birth,
            })
            .await?;

        info!(
            provider = provider.name(),
            provider_customer_id = %created.provider_customer_id,
            user_id = %req.user_id,
            "Provider customer created"
        );

        let mut conn = state.db_conn()?;
        let customer = CustomerRepository::insert(
            &mut conn,
            NewCustomer {
                provider: provider.name(),
                provider_customer_id: &created.provider_customer_id,
                user_id: req.user_id,
                first_name: &req.first_name,
                last_name: &req.last_name,
                email: &req.email,
                phone_number: &req.phone_number,
                kyc_status: created.kyc_status,
                kyc_tier: created.kyc_tier,
                status: created.status,
            },
        )?;

        Ok(CustomerDto::from(customer))
    }

    /// Local read by owning user; serves the gateway's customer lookup.
    pub fn get_customer_by_user(
        state: &AppState,
        provider_name: Option<&str>,
        user_id: Uuid,
    ) -> Result<CustomerDto, ApiError> {
        let provider = state.providers.resolve(provider_name)?;
        let mut conn = state.db_conn()?;

        let customer = CustomerRepository::find_by_user(&mut conn, provider.name(), user_id)?
            .ok_or_else(|| {
                ApiError::NotFound(format!("No customer found for user {}", user_id))
            })?;

        Ok(CustomerDto::from(customer))
    }

    /// Re-read the partner's view of a customer and sync the mutable mirror
    /// fields (KYC progress, lifecycle status).
    pub async fn sync_customer(state: &AppState, customer_id: Uuid) -> Result<CustomerDto, ApiError> {
        let local = {
            let mut conn = state.db_conn()?;
            CustomerRepository::find_by_id(&mut conn, customer_id)?.ok_or_else(|| {
                ApiError::NotFound(format!("Customer {} not found", customer_id))
            })?
        };

        let provider = state.providers.get(&local.provider)?;
        let remote = provider.get_customer(&local.provider_customer_id).await?;

        let mut conn = state.db_conn()?;
        let updated = CustomerRepository::update_profile(
            &mut conn,
            local.id,
            remote.kyc_status,
            remote.kyc_tier,
            remote.status,
        )?;

        Ok(CustomerDto::from(updated))
    }
}
