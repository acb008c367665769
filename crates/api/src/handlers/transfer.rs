use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use payrail_core::app_state::AppState;
use payrail_core::services::transfer_service::TransferService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, TransactionDto, TransferRequest};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/transfers",
    request_body = TransferRequest,
    responses(
        (status = 201, description = "Transfer initiated", body = ApiResponse<TransactionDto>),
        (status = 400, description = "Missing destination fields"),
        (status = 402, description = "Insufficient funds"),
        (status = 404, description = "Source or destination wallet not found"),
        (status = 409, description = "Duplicate transfer reference"),
        (status = 422, description = "Invalid input"),
    ),
    tag = "Transfers"
)]
pub async fn transfer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TransferRequest>,
) -> Result<(StatusCode, Json<ApiResponse<TransactionDto>>), ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let transaction = TransferService::initiate_transfer(&state, req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(transaction))))
}
