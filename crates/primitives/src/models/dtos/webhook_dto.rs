use serde::Deserialize;
use utoipa::ToSchema;

/// Partner webhook delivery for transfer lifecycle events.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProviderWebhook {
    pub event: String,
    pub data: ProviderWebhookData,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProviderWebhookData {
    pub reference: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}
