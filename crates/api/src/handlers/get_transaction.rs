use axum::{
    extract::{Path, State},
    Json,
};
use payrail_core::app_state::AppState;
use payrail_core::services::transfer_service::TransferService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, TransactionDto};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/transactions/{id_or_reference}",
    params(("id_or_reference" = String, Path, description = "Local transaction id or transfer reference")),
    responses(
        (status = 200, description = "Transaction found", body = ApiResponse<TransactionDto>),
        (status = 404, description = "Transaction not found"),
    ),
    tag = "Transfers"
)]
pub async fn get_transaction(
    State(state): State<Arc<AppState>>,
    Path(id_or_reference): Path<String>,
) -> Result<Json<ApiResponse<TransactionDto>>, ApiError> {
    let transaction = TransferService::get_transaction(&state, &id_or_reference).await?;
    Ok(Json(ApiResponse::ok(transaction)))
}
