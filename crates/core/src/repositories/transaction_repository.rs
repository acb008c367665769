use chrono::{DateTime, Utc};
use diesel::prelude::*;
use payrail_primitives::error::ApiError;
use payrail_primitives::models::entities::enum_types::TransactionStatus;
use payrail_primitives::models::entities::transaction::{NewTransaction, Transaction};
use payrail_primitives::schema::transactions;
use tracing::warn;
use uuid::Uuid;

pub struct TransactionRepository;

impl TransactionRepository {
    pub fn insert(
        conn: &mut PgConnection,
        transaction: NewTransaction,
    ) -> Result<Transaction, ApiError> {
        diesel::insert_into(transactions::table)
            .values(&transaction)
            .get_result::<Transaction>(conn)
            .map_err(ApiError::Database)
    }

    pub fn find_by_reference(
        conn: &mut PgConnection,
        reference: &str,
    ) -> Result<Option<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::reference.eq(reference))
            .first::<Transaction>(conn)
            .optional()
            .map_err(ApiError::Database)
    }

    /// Lookup by local id when the input parses as a UUID, by idempotency
    /// reference otherwise.
    pub fn find_by_id_or_reference(
        conn: &mut PgConnection,
        id_or_ref: &str,
    ) -> Result<Option<Transaction>, ApiError> {
        if let Ok(id) = Uuid::parse_str(id_or_ref) {
            let by_id = transactions::table
                .find(id)
                .first::<Transaction>(conn)
                .optional()
                .map_err(ApiError::Database)?;
            if by_id.is_some() {
                return Ok(by_id);
            }
        }
        Self::find_by_reference(conn, id_or_ref)
    }

    pub fn list(
        conn: &mut PgConnection,
        wallet_id: Option<Uuid>,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        page: i64,
        per_page: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        let mut query = transactions::table.into_boxed();

        if let Some(wallet_id) = wallet_id {
            query = query.filter(transactions::wallet_id.eq(wallet_id));
        }
        if let Some(from) = from {
            query = query.filter(transactions::created_at.ge(from));
        }
        if let Some(to) = to {
            query = query.filter(transactions::created_at.le(to));
        }

        query
            .order(transactions::created_at.desc())
            .limit(per_page)
            .offset((page - 1).max(0) * per_page)
            .load::<Transaction>(conn)
            .map_err(ApiError::Database)
    }

    /// Non-terminal transactions that have not been touched since `cutoff`,
    /// oldest first. Feeds the reconciliation sweep.
    pub fn find_stale_pending(
        conn: &mut PgConnection,
        cutoff: DateTime<Utc>,
        limit: i64,
    ) -> Result<Vec<Transaction>, ApiError> {
        transactions::table
            .filter(transactions::status.eq_any(TransactionStatus::open_statuses()))
            .filter(transactions::updated_at.lt(cutoff))
            .order(transactions::updated_at.asc())
            .limit(limit)
            .load::<Transaction>(conn)
            .map_err(ApiError::Database)
    }

    /// Advance a transaction's status, enforcing the forward-only state
    /// machine. Returns the unchanged row when the transition is not
    /// allowed; settled transactions are never reopened.
    pub fn advance_status(
        conn: &mut PgConnection,
        transaction: &Transaction,
        next: TransactionStatus,
        provider_transaction_id: Option<&str>,
    ) -> Result<Transaction, ApiError> {
        if !transaction.status.can_transition_to(next) {
            warn!(
                reference = %transaction.reference,
                current = %transaction.status,
                requested = %next,
                "Ignoring disallowed transaction status transition"
            );
            return Ok(transaction.clone());
        }

        diesel::update(transactions::table.find(transaction.id))
            .set((
                transactions::status.eq(next),
                transactions::provider_transaction_id.eq(provider_transaction_id
                    .map(str::to_string)
                    .or_else(|| transaction.provider_transaction_id.clone())),
                transactions::updated_at.eq(diesel::dsl::now),
            ))
            .get_result::<Transaction>(conn)
            .map_err(ApiError::Database)
    }
}
