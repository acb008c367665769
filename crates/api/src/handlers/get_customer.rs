use axum::{
    extract::{Path, Query, State},
    Json,
};
use payrail_core::app_state::AppState;
use payrail_core::services::customer_service::CustomerService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, CustomerDto, CustomerLookupParams};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/customers",
    params(
        ("user_id" = Uuid, Query, description = "Owning user id"),
        ("provider" = Option<String>, Query, description = "Provider name, defaults to the configured provider")
    ),
    responses(
        (status = 200, description = "Customer found", body = ApiResponse<CustomerDto>),
        (status = 404, description = "No customer for this user"),
    ),
    tag = "Customers"
)]
pub async fn get_customer(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CustomerLookupParams>,
) -> Result<Json<ApiResponse<CustomerDto>>, ApiError> {
    let customer =
        CustomerService::get_customer_by_user(&state, params.provider.as_deref(), params.user_id)?;
    Ok(Json(ApiResponse::ok(customer)))
}

#[utoipa::path(
    post,
    path = "/api/customers/{customer_id}/sync",
    params(("customer_id" = Uuid, Path, description = "Local customer id")),
    responses(
        (status = 200, description = "Customer re-synced from the provider", body = ApiResponse<CustomerDto>),
        (status = 404, description = "Customer not found"),
    ),
    tag = "Customers"
)]
pub async fn sync_customer(
    State(state): State<Arc<AppState>>,
    Path(customer_id): Path<Uuid>,
) -> Result<Json<ApiResponse<CustomerDto>>, ApiError> {
    let customer = CustomerService::sync_customer(&state, customer_id).await?;
    Ok(Json(ApiResponse::ok(customer)))
}
