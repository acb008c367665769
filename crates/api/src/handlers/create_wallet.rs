use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use payrail_core::app_state::AppState;
use payrail_core::services::wallet_service::WalletService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, CreateWalletRequest, WalletDto};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/wallets",
    request_body = CreateWalletRequest,
    responses(
        (status = 201, description = "Wallet created", body = ApiResponse<WalletDto>),
        (status = 404, description = "Customer not found"),
        (status = 422, description = "Invalid input"),
    ),
    tag = "Wallets"
)]
pub async fn create_wallet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateWalletRequest>,
) -> Result<(StatusCode, Json<ApiResponse<WalletDto>>), ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let wallet = WalletService::create_wallet(&state, req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(wallet))))
}
