use axum::{
    extract::{Query, State},
    Json,
};
use payrail_core::app_state::AppState;
use payrail_core::services::bank_service::BankService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ApiResponse, BankDto};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct BankListParams {
    pub provider: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/banks",
    params(("provider" = Option<String>, Query, description = "Provider name, defaults to the configured provider")),
    responses(
        (status = 200, description = "Supported banks", body = ApiResponse<Vec<BankDto>>),
    ),
    tag = "Banks"
)]
pub async fn all_banks(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BankListParams>,
) -> Result<Json<ApiResponse<Vec<BankDto>>>, ApiError> {
    let banks = BankService::list_banks(&state, params.provider.as_deref()).await?;
    Ok(Json(ApiResponse::ok(banks)))
}
