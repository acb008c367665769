use axum::{
    extract::{Query, State},
    Json,
};
use payrail_core::app_state::AppState;
use payrail_core::services::bank_service::BankService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, ResolvedAccountDto, ValidateAccountParams};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    get,
    path = "/api/resolve_account",
    params(
        ("account_number" = String, Query, description = "Account number (10 digits)"),
        ("bank_code" = Option<String>, Query, description = "Routing code; `sort_code` is accepted as an alias"),
        ("provider" = Option<String>, Query, description = "Provider name, defaults to the configured provider")
    ),
    responses(
        (status = 200, description = "Account resolved", body = ApiResponse<ResolvedAccountDto>),
        (status = 400, description = "Missing or invalid routing code or account number"),
    ),
    tag = "Banks"
)]
pub async fn resolve_account(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ValidateAccountParams>,
) -> Result<Json<ApiResponse<ResolvedAccountDto>>, ApiError> {
    params.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let account = BankService::validate_account(&state, &params).await?;
    Ok(Json(ApiResponse::ok(account)))
}
