use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use payrail_core::app_state::AppState;
use payrail_core::services::customer_service::CustomerService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, CreateCustomerRequest, CustomerDto};
use std::sync::Arc;
use tracing::error;
use validator::Validate;

#[utoipa::path(
    post,
    path = "/api/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = ApiResponse<CustomerDto>),
        (status = 409, description = "Customer already exists for this user"),
        (status = 422, description = "Invalid input"),
    ),
    tag = "Customers"
)]
pub async fn create_customer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CustomerDto>>), ApiError> {
    req.validate().map_err(|e| {
        error!("Validation error: {}", e);
        ApiError::Validation(e)
    })?;

    let customer = CustomerService::create_customer(&state, req).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(customer))))
}
