//! Domain events emitted after local state changes. The core only produces
//! well-formed payloads; the transport that carries them to the event bus
//! lives outside this crate.

use chrono::{DateTime, Utc};
use payrail_primitives::models::{Transaction, Wallet, WalletBalance};
use serde_json::{json, Value};
use std::sync::Mutex;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct DomainEvent {
    pub name: &'static str,
    pub occurred_at: DateTime<Utc>,
    pub payload: Value,
}

impl DomainEvent {
    fn new(name: &'static str, payload: Value) -> Self {
        Self {
            name,
            occurred_at: Utc::now(),
            payload,
        }
    }

    pub fn wallet_created(wallet: &Wallet) -> Self {
        Self::new(
            "wallet.created",
            json!({
                "wallet_id": wallet.id,
                "customer_id": wallet.customer_id,
                "provider": wallet.provider,
                "provider_wallet_id": wallet.provider_wallet_id,
                "currency": wallet.currency,
                "wallet_type": wallet.wallet_type,
            }),
        )
    }

    pub fn balance_updated(wallet_id: Uuid, provider: &str, balance: &WalletBalance) -> Self {
        Self::new(
            "wallet.balance_updated",
            json!({
                "wallet_id": wallet_id,
                "provider": provider,
                "available": balance.available,
                "ledger": balance.ledger,
                "reserved": balance.reserved,
                "currency": balance.currency,
            }),
        )
    }

    pub fn transfer_completed(transaction: &Transaction) -> Self {
        Self::new(
            "transfer.completed",
            json!({
                "transaction_id": transaction.id,
                "reference": transaction.reference,
                "provider": transaction.provider,
                "provider_transaction_id": transaction.provider_transaction_id,
                "wallet_id": transaction.wallet_id,
                "amount": transaction.amount,
                "fee": transaction.fee,
                "total": transaction.total,
                "currency": transaction.currency,
                "status": transaction.status,
            }),
        )
    }
}

pub trait EventSink: Send + Sync {
    fn publish(&self, event: DomainEvent);
}

/// Default sink: structured log records. Deployments wire a real bus
/// producer behind the same trait.
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn publish(&self, event: DomainEvent) {
        tracing::info!(
            event = event.name,
            payload = %event.payload,
            "Domain event emitted"
        );
    }
}

/// Captures events in memory; test support.
#[derive(Default)]
pub struct MemoryEventSink {
    events: Mutex<Vec<DomainEvent>>,
}

impl MemoryEventSink {
    pub fn names(&self) -> Vec<&'static str> {
        self.events
            .lock()
            .expect("event sink lock poisoned")
            .iter()
            .map(|e| e.name)
            .collect()
    }

    pub fn take(&self) -> Vec<DomainEvent> {
        std::mem::take(&mut *self.events.lock().expect("event sink lock poisoned"))
    }
}

impl EventSink for MemoryEventSink {
    fn publish(&self, event: DomainEvent) {
        self.events
            .lock()
            .expect("event sink lock poisoned")
            .push(event);
    }
}
