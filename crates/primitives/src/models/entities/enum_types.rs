use crate::error::ApiError;
use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumString};
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::CurrencyCode"]
#[DbValueStyle = "UPPERCASE"]
#[strum(serialize_all = "UPPERCASE")]
pub enum CurrencyCode {
    NGN,
    USD,
    GBP,
    EUR,
    GHS,
    KES,
    ZAR,
    CAD,
}

impl CurrencyCode {
    pub fn parse(input: &str) -> Result<Self, ApiError> {
        let normalized = input.trim().to_uppercase();

        CurrencyCode::from_str(&normalized)
            .map_err(|_| ApiError::BadRequest(format!("Unsupported currency: {}", input)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::KycStatus"]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Pending,
    Verified,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::CustomerStatus"]
#[serde(rename_all = "snake_case")]
pub enum CustomerStatus {
    Active,
    Suspended,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::WalletType"]
#[serde(rename_all = "snake_case")]
pub enum WalletType {
    /// Virtual wallet owned by an end customer. The default when a partner
    /// payload omits an explicit type.
    Customer,
    Merchant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::WalletStatus"]
#[serde(rename_all = "snake_case")]
pub enum WalletStatus {
    Active,
    Frozen,
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, ToSchema)]
#[ExistingTypePath = "crate::schema::sql_types::DestinationType"]
#[serde(rename_all = "snake_case")]
pub enum DestinationType {
    Wallet,
    Bank,
}

/// Lifecycle of a transfer attempt. Transitions are forward-only: a settled
/// transaction is never reopened, and the only move out of `Completed` is a
/// provider-initiated `Reversed`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, DbEnum, Display, EnumString, ToSchema,
)]
#[ExistingTypePath = "crate::schema::sql_types::TransactionStatus"]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransactionStatus {
    Initiated,
    Pending,
    Processing,
    Completed,
    Failed,
    Reversed,
}

impl TransactionStatus {
    fn rank(self) -> u8 {
        match self {
            TransactionStatus::Initiated => 0,
            TransactionStatus::Pending => 1,
            TransactionStatus::Processing => 2,
            TransactionStatus::Completed
            | TransactionStatus::Failed
            | TransactionStatus::Reversed => 3,
        }
    }

    pub fn is_terminal(self) -> bool {
        self.rank() == 3
    }

    /// Statuses a settlement poll can still move forward. Drives the
    /// reconciliation sweep over stale transactions.
    pub fn open_statuses() -> [TransactionStatus; 3] {
        [
            TransactionStatus::Initiated,
            TransactionStatus::Pending,
            TransactionStatus::Processing,
        ]
    }

    pub fn can_transition_to(self, next: TransactionStatus) -> bool {
        if self == next {
            return false;
        }
        match self {
            TransactionStatus::Completed => next == TransactionStatus::Reversed,
            TransactionStatus::Failed | TransactionStatus::Reversed => false,
            _ => next.rank() > self.rank(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_moves_forward_only() {
        use TransactionStatus::*;

        assert!(Initiated.can_transition_to(Pending));
        assert!(Initiated.can_transition_to(Completed));
        assert!(Pending.can_transition_to(Processing));
        assert!(Processing.can_transition_to(Failed));

        assert!(!Pending.can_transition_to(Initiated));
        assert!(!Processing.can_transition_to(Pending));
        assert!(!Completed.can_transition_to(Pending));
        assert!(!Failed.can_transition_to(Processing));
    }

    #[test]
    fn settled_transactions_never_reopen() {
        use TransactionStatus::*;

        for next in [Initiated, Pending, Processing, Completed] {
            assert!(!Failed.can_transition_to(next));
            assert!(!Reversed.can_transition_to(next));
        }
        // The single allowed post-settlement move.
        assert!(Completed.can_transition_to(Reversed));
        assert!(!Completed.can_transition_to(Failed));
    }

    #[test]
    fn open_statuses_are_exactly_the_non_terminal_ones() {
        use TransactionStatus::*;

        let open = TransactionStatus::open_statuses();
        for status in open {
            assert!(!status.is_terminal());
        }
        for status in [Completed, Failed, Reversed] {
            assert!(status.is_terminal());
            assert!(!open.contains(&status));
        }
    }

    #[test]
    fn currency_parse_normalizes_case() {
        assert_eq!(CurrencyCode::parse(" ngn ").unwrap(), CurrencyCode::NGN);
        assert!(CurrencyCode::parse("XXX").is_err());
    }
}
