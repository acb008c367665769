use crate::app_state::AppState;
use crate::events::DomainEvent;
use crate::providers::xpress::mapping;
use crate::repositories::transaction_repository::TransactionRepository;
use diesel::Connection;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{ProviderWebhook, Transaction, TransactionStatus};
use tracing::info;

pub struct WebhookService;

impl WebhookService {
    /// Apply a partner transfer-lifecycle delivery. Status moves only
    /// forward; duplicate or late deliveries are acknowledged and ignored.
    pub fn handle_event(state: &AppState, payload: &ProviderWebhook) -> Result<(), ApiError> {
        let event = payload.event.as_str();

        if !matches!(
            event,
            "transfer.success" | "transfer.failed" | "transfer.reversed" | "transfer.pending"
        ) {
            return Ok(());
        }

        let next = Self::status_for_event(event, payload.data.status.as_deref());

        let mut conn = state.db_conn()?;
        let updated: Option<Transaction> = conn.transaction(|conn| {
            let Some(tx) =
                TransactionRepository::find_by_reference(conn, &payload.data.reference)?
            else {
                return Err(ApiError::NotFound(format!(
                    "Transaction {} not found",
                    payload.data.reference
                )));
            };

            if !tx.status.can_transition_to(next) {
                info!(
                    reference = %tx.reference,
                    current = %tx.status,
                    "Ignoring duplicate or stale webhook delivery"
                );
                return Ok(None);
            }

            TransactionRepository::advance_status(
                conn,
                &tx,
                next,
                payload.data.transaction_id.as_deref(),
            )
            .map(Some)
        })?;

        if let Some(tx) = updated {
            if tx.status == TransactionStatus::Completed {
                state.events.publish(DomainEvent::transfer_completed(&tx));
            }
        }

        Ok(())
    }

    fn status_for_event(event: &str, status: Option<&str>) -> TransactionStatus {
        match event {
            "transfer.success" => TransactionStatus::Completed,
            "transfer.failed" => TransactionStatus::Failed,
            "transfer.reversed" => TransactionStatus::Reversed,
            _ => mapping::transaction_status_from(status, None),
        }
    }

    /// Constant-time HMAC-SHA256 signature check on the raw request body.
    pub fn verify_signature(
        secret: &str,
        payload: &[u8],
        actual_signature: &str,
    ) -> Result<(), ApiError> {
        use hmac::{Hmac, Mac};
        use sha2::Sha256;
        use subtle::ConstantTimeEq;

        type HmacSha256 = Hmac<Sha256>;

        let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
            .map_err(|_| ApiError::Internal("Invalid webhook secret".into()))?;

        mac.update(payload);
        let expected = hex::encode(mac.finalize().into_bytes());

        if expected
            .as_bytes()
            .ct_eq(actual_signature.as_bytes())
            .unwrap_u8()
            != 1
        {
            return Err(ApiError::Webhook("Invalid webhook signature".into()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    fn sign(secret: &str, payload: &[u8]) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(payload);
        hex::encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_accepted() {
        let payload = br#"{"event":"transfer.success","data":{"reference":"pyr_1"}}"#;
        let signature = sign("secret", payload);
        assert!(WebhookService::verify_signature("secret", payload, &signature).is_ok());
    }

    #[test]
    fn tampered_payload_rejected() {
        let signature = sign("secret", b"original");
        assert!(WebhookService::verify_signature("secret", b"tampered", &signature).is_err());
    }

    #[test]
    fn wrong_secret_rejected() {
        let payload = b"payload";
        let signature = sign("other-secret", payload);
        assert!(WebhookService::verify_signature("secret", payload, &signature).is_err());
    }

    #[test]
    fn event_names_map_to_terminal_statuses() {
        assert_eq!(
            WebhookService::status_for_event("transfer.success", None),
            TransactionStatus::Completed
        );
        assert_eq!(
            WebhookService::status_for_event("transfer.failed", None),
            TransactionStatus::Failed
        );
        assert_eq!(
            WebhookService::status_for_event("transfer.reversed", None),
            TransactionStatus::Reversed
        );
        assert_eq!(
            WebhookService::status_for_event("transfer.pending", Some("processing")),
            TransactionStatus::Processing
        );
    }
}
