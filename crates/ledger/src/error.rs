use thiserror::Error;

use splitledger_core::{ExpenseId, GroupId, Money, SettlementId, UserId};

/// Record that caused a ledger failure.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RecordRef {
    Expense(ExpenseId),
    Settlement(SettlementId),
}

impl core::fmt::Display for RecordRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordRef::Expense(id) => write!(f, "expense {id}"),
            RecordRef::Settlement(id) => write!(f, "settlement {id}"),
        }
    }
}

/// Hard failures of a balance computation.
///
/// Any of these aborts the whole computation: a partially folded ledger no
/// longer sums to zero, so no partial result is ever returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("{record} references user {user_id} outside the group's members")]
    InvalidMemberReference { record: RecordRef, user_id: UserId },

    #[error("{record} belongs to group {found}, expected {expected}")]
    ForeignRecord {
        record: RecordRef,
        expected: GroupId,
        found: GroupId,
    },

    #[error("{record} has invalid amount {amount}: {reason}")]
    InvalidAmount {
        record: RecordRef,
        amount: Money,
        reason: &'static str,
    },

    #[error("{record} is paid and received by the same member {user_id}")]
    SelfSettlement { record: RecordRef, user_id: UserId },

    #[error("amount overflow while applying {record}")]
    AmountOverflow { record: RecordRef },

    #[error("amount overflow while netting {debtor} and {creditor}")]
    NettingOverflow { debtor: UserId, creditor: UserId },

    #[error("ledger totals do not sum to zero (sum={sum})")]
    ConservationViolated { sum: i128 },
}
