use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use payrail_core::app_state::AppState;
use payrail_core::services::wallet_service::WalletService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, CreateCustomerWalletRequest, CustomerWalletDto};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/customers/with-wallet",
    request_body = CreateCustomerWalletRequest,
    responses(
        (status = 201, description = "Customer and wallet created", body = ApiResponse<CustomerWalletDto>),
        (status = 409, description = "Customer already exists for this user"),
        (status = 422, description = "Invalid input"),
    ),
    tag = "Customers"
)]
pub async fn create_customer_wallet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCustomerWalletRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerWalletDto>>), ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let created = WalletService::create_customer_wallet(&state, req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(created))))
}
