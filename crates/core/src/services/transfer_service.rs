use crate::app_state::AppState;
use crate::events::DomainEvent;
use crate::repositories::customer_repository::CustomerRepository;
use crate::repositories::transaction_repository::TransactionRepository;
use crate::repositories::wallet_repository::WalletRepository;
use crate::services::wallet_service::WalletService;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::{
    Customer, DestinationType, HistoryParams, NewTransaction, ProviderTransferRequest,
    TransactionDto, TransactionListDto, TransactionStatus, TransferDestination, TransferRequest,
    Wallet,
};
use tracing::{info, warn};
use uuid::Uuid;

const DEFAULT_PAGE_SIZE: i64 = 20;
const MAX_PAGE_SIZE: i64 = 100;

/// A transfer resolved against the local store, ready for the adapter.
struct ResolvedTransfer {
    source_wallet: Wallet,
    destination: TransferDestination,
    destination_id: String,
    destination_bank_code: Option<String>,
    destination_account_name: Option<String>,
}

pub struct TransferService;

impl TransferService {
    /// Initiate a transfer. The adapter contract routes by partner customer
    /// id, so both the source and (for wallet destinations) the destination
    /// must be resolved through the local wallet → customer → provider-
    /// customer-id chain before anything goes over the wire.
    pub async fn initiate_transfer(
        state: &AppState,
        req: TransferRequest,
    ) -> Result<TransactionDto, ApiError> {
        let reference = req
            .reference
            .clone()
            .unwrap_or_else(|| format!("pyr_{}", Uuid::new_v4().simple()));

        let resolved = {
            let mut conn = state.db_conn()?;

            // Duplicate idempotency references are rejected before any
            // network call; the unique constraint backstops this check.
            if TransactionRepository::find_by_reference(&mut conn, &reference)?.is_some() {
                return Err(ApiError::Conflict(format!(
                    "Duplicate transfer reference: {}",
                    reference
                )));
            }

            Self::resolve(&mut conn, &req)?
        };

        let source_customer = {
            let mut conn = state.db_conn()?;
            Self::customer_for_wallet(&mut conn, &resolved.source_wallet)?
        };

        let provider = state.providers.get(&resolved.source_wallet.provider)?;
        let provider_request = ProviderTransferRequest {
            source_customer_id: source_customer.provider_customer_id.clone(),
            destination: resolved.destination.clone(),
            amount: req.amount,
            reference: reference.clone(),
            narration: req.narration.clone(),
        };

        let provider_txn = provider.initiate_transfer(&provider_request).await?;
        let amount = Self::settled_amount(provider_txn.amount, req.amount, &reference);

        info!(
            provider = provider.name(),
            reference = %reference,
            provider_transaction_id = ?provider_txn.provider_transaction_id,
            status = %provider_txn.status,
            "Provider transfer accepted"
        );

        let transaction = {
            let mut conn = state.db_conn()?;
            TransactionRepository::insert(
                &mut conn,
                NewTransaction {
                    provider: &resolved.source_wallet.provider,
                    provider_transaction_id: provider_txn.provider_transaction_id.as_deref(),
                    reference: &reference,
                    wallet_id: resolved.source_wallet.id,
                    destination_type: req.destination_type,
                    destination_id: &resolved.destination_id,
                    destination_bank_code: resolved.destination_bank_code.as_deref(),
                    destination_account_name: resolved.destination_account_name.as_deref(),
                    amount,
                    fee: provider_txn.fee,
                    total: provider_txn.total,
                    currency: resolved.source_wallet.currency,
                    status: provider_txn.status,
                    narration: req.narration.as_deref(),
                },
            )?
        };

        if transaction.status == TransactionStatus::Completed {
            state
                .events
                .publish(DomainEvent::transfer_completed(&transaction));
        }

        // The transfer moved money; the cached source balance is stale now.
        WalletService::refresh_balance_or_warn(state, &resolved.source_wallet).await;

        Ok(TransactionDto::from(transaction))
    }

    /// Local read, with a provider poll to move non-terminal statuses
    /// forward. Poll failures degrade to the stored view.
    pub async fn get_transaction(
        state: &AppState,
        id_or_reference: &str,
    ) -> Result<TransactionDto, ApiError> {
        let transaction = {
            let mut conn = state.db_conn()?;
            TransactionRepository::find_by_id_or_reference(&mut conn, id_or_reference)?
                .ok_or_else(|| {
                    ApiError::NotFound(format!("Transaction {} not found", id_or_reference))
                })?
        };

        if transaction.status.is_terminal() {
            return Ok(TransactionDto::from(transaction));
        }

        let provider = state.providers.get(&transaction.provider)?;
        match provider.get_transaction(&transaction.reference).await {
            Ok(remote) => {
                let mut conn = state.db_conn()?;
                let updated = TransactionRepository::advance_status(
                    &mut conn,
                    &transaction,
                    remote.status,
                    remote.provider_transaction_id.as_deref(),
                )?;

                if transaction.status != TransactionStatus::Completed
                    && updated.status == TransactionStatus::Completed
                {
                    state
                        .events
                        .publish(DomainEvent::transfer_completed(&updated));
                }

                Ok(TransactionDto::from(updated))
            }
            Err(err) => {
                warn!(
                    reference = %transaction.reference,
                    error = %err,
                    "Provider transaction poll failed; serving local status"
                );
                Ok(TransactionDto::from(transaction))
            }
        }
    }

    pub fn transaction_history(
        state: &AppState,
        params: HistoryParams,
    ) -> Result<TransactionListDto, ApiError> {
        let page = params.page.unwrap_or(1).max(1);
        let per_page = params
            .per_page
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        let mut conn = state.db_conn()?;
        let transactions = TransactionRepository::list(
            &mut conn,
            params.wallet_id,
            params.from,
            params.to,
            page,
            per_page,
        )?;

        Ok(TransactionListDto {
            transactions: transactions.into_iter().map(TransactionDto::from).collect(),
            page,
            per_page,
        })
    }

    /// The provider's settled amount is authoritative; fall back to the
    /// requested amount only when the provider omits one. A disagreement is
    /// recorded, not masked.
    fn settled_amount(provider_amount: i64, requested: i64, reference: &str) -> i64 {
        if provider_amount <= 0 {
            return requested;
        }
        if provider_amount != requested {
            warn!(
                reference,
                provider_amount, requested, "Provider settled amount differs from requested amount"
            );
        }
        provider_amount
    }

    fn customer_for_wallet(
        conn: &mut diesel::PgConnection,
        wallet: &Wallet,
    ) -> Result<Customer, ApiError> {
        CustomerRepository::find_by_id(conn, wallet.customer_id)?.ok_or_else(|| {
            ApiError::NotFound(format!("Customer not found for wallet {}", wallet.id))
        })
    }

    /// Resolve both ends of the transfer against the local store. There is
    /// no fallback lookup against the provider when the destination wallet
    /// is unknown locally; such transfers fail with a not-found error.
    fn resolve(
        conn: &mut diesel::PgConnection,
        req: &TransferRequest,
    ) -> Result<ResolvedTransfer, ApiError> {
        let source_wallet = WalletRepository::find_by_id(conn, req.wallet_id)?
            .ok_or_else(|| ApiError::NotFound(format!("Wallet {} not found", req.wallet_id)))?;

        match req.destination_type {
            DestinationType::Wallet => {
                let destination_wallet_id = req.destination_wallet_id.ok_or_else(|| {
                    ApiError::BadRequest(
                        "destination_wallet_id is required for wallet transfers".into(),
                    )
                })?;

                if destination_wallet_id == source_wallet.id {
                    return Err(ApiError::BadRequest(
                        "Cannot transfer to the source wallet".into(),
                    ));
                }

                let destination_wallet = WalletRepository::find_by_id(conn, destination_wallet_id)?
                    .ok_or_else(|| {
                        ApiError::NotFound(format!(
                            "Destination wallet {} is not known locally",
                            destination_wallet_id
                        ))
                    })?;

                let destination_customer =
                    Self::customer_for_wallet(conn, &destination_wallet)?;

                Ok(ResolvedTransfer {
                    source_wallet,
                    destination: TransferDestination::Wallet {
                        customer_id: Some(destination_customer.provider_customer_id),
                    },
                    destination_id: destination_wallet.id.to_string(),
                    destination_bank_code: None,
                    destination_account_name: None,
                })
            }
            DestinationType::Bank => {
                let bank_code = req.routing_code().ok_or_else(|| {
                    ApiError::BadRequest(
                        "bank_code (or sort_code) is required for bank transfers".into(),
                    )
                })?;
                let account_number = req.account_number.as_deref().ok_or_else(|| {
                    ApiError::BadRequest("account_number is required for bank transfers".into())
                })?;
                let account_name = req.account_name.as_deref().ok_or_else(|| {
                    ApiError::BadRequest("account_name is required for bank transfers".into())
                })?;

                Ok(ResolvedTransfer {
                    source_wallet,
                    destination: TransferDestination::Bank {
                        bank_code: bank_code.to_string(),
                        account_number: account_number.to_string(),
                        account_name: account_name.to_string(),
                    },
                    destination_id: account_number.to_string(),
                    destination_bank_code: Some(bank_code.to_string()),
                    destination_account_name: Some(account_name.to_string()),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_settled_amount_wins_over_requested() {
        assert_eq!(TransferService::settled_amount(50_100, 50_000, "pyr_x"), 50_100);
        assert_eq!(TransferService::settled_amount(50_000, 50_000, "pyr_x"), 50_000);
    }

    #[test]
    fn requested_amount_used_when_provider_omits_one() {
        assert_eq!(TransferService::settled_amount(0, 50_000, "pyr_x"), 50_000);
        assert_eq!(TransferService::settled_amount(-1, 50_000, "pyr_x"), 50_000);
    }
}
