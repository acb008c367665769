use chrono::{Duration as ChronoDuration, Utc};
use payrail_core::app_state::AppState;
use payrail_core::repositories::transaction_repository::TransactionRepository;
use payrail_core::services::transfer_service::TransferService;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, warn};

const SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 5);
const STALE_AFTER_SECS: i64 = 60 * 10;
const SWEEP_BATCH_SIZE: i64 = 50;

pub fn spawn_background_tasks(state: Arc<AppState>) {
    tokio::spawn(async move {
        info!("Starting transaction reconciliation sweep");
        reconcile_pending_transactions(state).await;
    });

    info!("Background maintenance tasks spawned");
}

/// Poll the provider for transactions stuck in a non-terminal status. Picks
/// up settlements whose webhook delivery was missed.
async fn reconcile_pending_transactions(state: Arc<AppState>) {
    let mut interval = interval(SWEEP_INTERVAL);
    interval.tick().await;

    loop {
        interval.tick().await;

        let Ok(mut conn) = state.db.get() else {
            error!("Reconciliation sweep: DB connection failed");
            continue;
        };

        let cutoff = Utc::now() - ChronoDuration::seconds(STALE_AFTER_SECS);
        let stale = match TransactionRepository::find_stale_pending(
            &mut conn,
            cutoff,
            SWEEP_BATCH_SIZE,
        ) {
            Ok(stale) => stale,
            Err(e) => {
                error!("Reconciliation sweep query failed: {}", e);
                continue;
            }
        };
        drop(conn);

        if stale.is_empty() {
            continue;
        }

        info!("Reconciling {} stale transactions", stale.len());
        for tx in stale {
            // get_transaction polls the provider and advances the local
            // status when the remote side has moved on.
            if let Err(e) = TransferService::get_transaction(&state, &tx.reference).await {
                warn!(reference = %tx.reference, "Reconciliation poll failed: {}", e);
            }
        }
    }
}
