use axum::{
    extract::{Path, Query, State},
    Json,
};
use payrail_core::app_state::AppState;
use payrail_core::services::wallet_service::WalletService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, BalanceDto, BalanceQuery};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/wallets/{wallet_id}/balance",
    params(
        ("wallet_id" = Uuid, Path, description = "Local wallet id"),
        ("force_refresh" = Option<bool>, Query, description = "Bypass the cached balance")
    ),
    responses(
        (status = 200, description = "Wallet balance", body = ApiResponse<BalanceDto>),
        (status = 404, description = "Wallet not found"),
    ),
    tag = "Wallets"
)]
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(wallet_id): Path<Uuid>,
    Query(query): Query<BalanceQuery>,
) -> Result<Json<ApiResponse<BalanceDto>>, ApiError> {
    let balance = WalletService::get_balance(&state, wallet_id, query.force_refresh).await?;
    Ok(Json(ApiResponse::ok(balance)))
}
