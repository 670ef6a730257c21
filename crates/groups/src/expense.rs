use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use splitledger_core::{Entity, ExpenseId, GroupId, Money, UserId};

/// How the expense was divided when it was recorded.
///
/// Informational: by the time an expense reaches the ledger every split
/// already carries its resolved amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitType {
    #[default]
    Equal,
    Percentage,
    Exact,
}

/// A member's share of one expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Split {
    pub user_id: UserId,
    /// Non-negative share in minor units.
    pub amount: Money,
    /// Already settled outside the ledger; contributes nothing.
    #[serde(default)]
    pub paid: bool,
}

impl Split {
    pub fn new(user_id: UserId, amount: Money) -> Self {
        Self {
            user_id,
            amount,
            paid: false,
        }
    }

    pub fn paid(mut self) -> Self {
        self.paid = true;
        self
    }
}

/// A recorded group expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: ExpenseId,
    pub group_id: GroupId,
    #[serde(default)]
    pub description: String,
    /// Total amount paid by `paid_by_user_id`.
    pub amount: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub date: DateTime<Utc>,
    pub paid_by_user_id: UserId,
    #[serde(default)]
    pub split_type: SplitType,
    pub splits: Vec<Split>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
}

impl Expense {
    /// Splits that move money in the ledger: neither the payer's own share nor
    /// already-paid shares.
    pub fn owing_splits(&self) -> impl Iterator<Item = &Split> + '_ {
        self.splits
            .iter()
            .filter(move |s| s.user_id != self.paid_by_user_id && !s.paid)
    }
}

impl Entity for Expense {
    type Id = ExpenseId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
