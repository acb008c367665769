use axum::{
    extract::{Query, State},
    Json,
};
use payrail_core::app_state::AppState;
use payrail_core::services::transfer_service::TransferService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, HistoryParams, TransactionListDto};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/transactions",
    params(
        ("wallet_id" = Option<Uuid>, Query, description = "Filter by source wallet"),
        ("from" = Option<String>, Query, description = "Earliest creation time (RFC 3339)"),
        ("to" = Option<String>, Query, description = "Latest creation time (RFC 3339)"),
        ("page" = Option<i64>, Query, description = "Page number, 1-based"),
        ("per_page" = Option<i64>, Query, description = "Page size, capped at 100")
    ),
    responses(
        (status = 200, description = "Transaction page", body = ApiResponse<TransactionListDto>),
    ),
    tag = "Transfers"
)]
pub async fn transaction_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<ApiResponse<TransactionListDto>>, ApiError> {
    let page = TransferService::transaction_history(&state, params)?;
    Ok(Json(ApiResponse::ok(page)))
}
