use axum::{
    extract::{Path, State},
    Json,
};
use payrail_core::app_state::AppState;
use payrail_core::services::wallet_service::WalletService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, WalletDto};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/wallets/{wallet_id}",
    params(("wallet_id" = Uuid, Path, description = "Local wallet id")),
    responses(
        (status = 200, description = "Wallet found", body = ApiResponse<WalletDto>),
        (status = 404, description = "Wallet not found"),
    ),
    tag = "Wallets"
)]
pub async fn get_wallet(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<Uuid>,
) -> Result<Json<ApiResponse<WalletDto>>, ApiError> {
    let wallet = WalletService::get_wallet(&state, wallet_id)?;
    Ok(Json(ApiResponse::ok(wallet)))
}
