use axum::body::Bytes;
use axum::{extract::State, http::StatusCode};
use payrail_core::app_state::AppState;
use payrail_core::services::webhook_service::WebhookService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::ProviderWebhook;
use secrecy::ExposeSecret;
use std::sync::Arc;
use tracing::info;

#[utoipa::path(
    post,
    path = "/webhooks/xpress",
    request_body = ProviderWebhook,
    responses(
        (status = 200, description = "Webhook processed"),
        (status = 400, description = "Invalid signature or payload"),
    ),
    tag = "Webhooks"
)]
pub async fn xpress_webhook(
    State(state): State<Arc<AppState>>,
    headers: axum::http::HeaderMap,
    body: Bytes,
) -> Result<StatusCode, ApiError> {
    let signature = headers
        .get("x-xpress-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Webhook("Missing webhook signature".into()))?;

    WebhookService::verify_signature(
        state.config.xpress_details.webhook_secret.expose_secret(),
        &body,
        signature,
    )?;

    let payload: ProviderWebhook = serde_json::from_slice(&body)
        .map_err(|_| ApiError::Webhook("Invalid webhook payload".into()))?;

    info!(event = %payload.event, reference = %payload.data.reference, "Webhook received");

    WebhookService::handle_event(&state, &payload)?;

    Ok(StatusCode::OK)
}
