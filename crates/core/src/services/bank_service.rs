use crate::app_state::AppState;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{BankDto, ResolvedAccountDto, ValidateAccountParams};

pub struct BankService;

impl BankService {
    pub async fn list_banks(
        state: &AppState,
        provider_name: Option<&str>,
    ) -> Result<Vec<BankDto>, ApiError> {
        let provider = state.providers.resolve(provider_name)?;
        let banks = provider.list_banks().await?;
        Ok(banks
            .into_iter()
            .map(|b| BankDto {
                name: b.name,
                bank_code: b.bank_code,
            })
            .collect())
    }

    /// Resolve an account name before a bank transfer. The routing code may
    /// arrive under either of its two names; both produce the same provider
    /// call.
    pub async fn validate_account(
        state: &AppState,
        params: &ValidateAccountParams,
    ) -> Result<ResolvedAccountDto, ApiError> {
        let bank_code = params.routing_code().ok_or_else(|| {
            ApiError::BadRequest("bank_code (or sort_code) is required".into())
        })?;

        let provider = state.providers.resolve(params.provider.as_deref())?;
        let account = provider
            .validate_account(bank_code, &params.account_number)
            .await?;

        Ok(ResolvedAccountDto {
            account_name: account.account_name,
            account_number: account.account_number,
            bank_code: account.bank_code,
        })
    }
}
