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
    path = "/api/customers/{customer_id}/wallets",
    params(("customer_id" = Uuid, Path, description = "Local customer id")),
    responses(
        (status = 200, description = "Wallets for the customer", body = ApiResponse<Vec<WalletDto>>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Wallets"
)]
pub async fn customer_wallets(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<WalletDto>>>, ApiError> {
    let wallets = WalletService::list_wallets(&state, customer_id)?;
    Ok(Json(ApiResponse::ok(wallets)))
}
