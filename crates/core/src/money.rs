//! Monetary amounts in the group's single implicit currency.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};
use crate::value_object::ValueObject;

/// Signed amount in **integer minor units** (e.g. cents).
///
/// Used for split shares, settlement payments, matrix cells and net totals.
/// Integer arithmetic keeps the ledger's zero-sum property exact.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(i64);

impl ValueObject for Money {}

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_minor(minor: i64) -> Self {
        Self(minor)
    }

    pub const fn minor(self) -> i64 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Checked addition; `DomainError::Overflow` on overflow.
    pub fn checked_add(self, rhs: Money) -> DomainResult<Money> {
        self.0.checked_add(rhs.0).map(Money).ok_or(DomainError::Overflow)
    }

    /// Checked subtraction; `DomainError::Overflow` on overflow.
    pub fn checked_sub(self, rhs: Money) -> DomainResult<Money> {
        self.0.checked_sub(rhs.0).map(Money).ok_or(DomainError::Overflow)
    }

    /// Checked negation (`i64::MIN` has no positive counterpart).
    pub fn checked_neg(self) -> DomainResult<Money> {
        self.0.checked_neg().map(Money).ok_or(DomainError::Overflow)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{sign}{}.{:02}", abs / 100, abs % 100)
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}
