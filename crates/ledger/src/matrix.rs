//! Accumulation state of one balance computation: the member universe, the
//! pairwise debt matrix and the per-member totals vector.
//!
//! Everything here lives for a single computation and is dropped once the
//! balance views are built.

use splitledger_core::{Money, UserId};
use splitledger_groups::Group;

/// The closed, ordered set of member ids a ledger is allowed to mention.
///
/// Ids are kept sorted (byte-wise UUID order) and deduplicated; a member's
/// position in this list is its row/column in [`LedgerMatrix`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberUniverse {
    ids: Vec<UserId>,
}

impl MemberUniverse {
    pub fn new(ids: impl IntoIterator<Item = UserId>) -> Self {
        let mut ids: Vec<UserId> = ids.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self { ids }
    }

    /// Universe made of every user on the group's roster.
    pub fn from_group(group: &Group) -> Self {
        Self::new(group.member_ids())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: UserId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: UserId) -> Option<usize> {
        self.ids.binary_search(&id).ok()
    }

    pub fn ids(&self) -> &[UserId] {
        &self.ids
    }
}

/// Square `debtor -> creditor -> amount` matrix over a [`MemberUniverse`].
///
/// The diagonal is never read or written: every accessor returns `None` for
/// `debtor == creditor`. Cells may be negative between folding and netting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerMatrix {
    universe: MemberUniverse,
    cells: Vec<Money>,
}

impl LedgerMatrix {
    pub fn new(universe: MemberUniverse) -> Self {
        let n = universe.len();
        Self {
            universe,
            cells: vec![Money::ZERO; n * n],
        }
    }

    pub fn universe(&self) -> &MemberUniverse {
        &self.universe
    }

    /// Amount `debtor` owes `creditor`; `None` for ids outside the universe or
    /// for the diagonal.
    pub fn get(&self, debtor: UserId, creditor: UserId) -> Option<Money> {
        let d = self.universe.index_of(debtor)?;
        let c = self.universe.index_of(creditor)?;
        if d == c {
            return None;
        }
        Some(self.cells[self.offset(d, c)])
    }

    /// Positive amounts owed *by* `debtor`, ascending by creditor id.
    pub fn debts_of(&self, debtor: UserId) -> Vec<(UserId, Money)> {
        let Some(d) = self.universe.index_of(debtor) else {
            return Vec::new();
        };
        self.universe
            .ids()
            .iter()
            .enumerate()
            .filter(|(c, _)| *c != d)
            .map(|(c, id)| (*id, self.cells[self.offset(d, c)]))
            .filter(|(_, amount)| amount.is_positive())
            .collect()
    }

    /// Positive amounts owed *to* `creditor`, ascending by debtor id.
    pub fn credits_of(&self, creditor: UserId) -> Vec<(UserId, Money)> {
        let Some(c) = self.universe.index_of(creditor) else {
            return Vec::new();
        };
        self.universe
            .ids()
            .iter()
            .enumerate()
            .filter(|(d, _)| *d != c)
            .map(|(d, id)| (*id, self.cells[self.offset(d, c)]))
            .filter(|(_, amount)| amount.is_positive())
            .collect()
    }

    /// All off-diagonal cells as `(debtor, creditor, amount)`, row-major.
    pub fn entries(&self) -> impl Iterator<Item = (UserId, UserId, Money)> + '_ {
        let ids = self.universe.ids();
        ids.iter().enumerate().flat_map(move |(d, debtor)| {
            ids.iter()
                .enumerate()
                .filter(move |(c, _)| *c != d)
                .map(move |(c, creditor)| (*debtor, *creditor, self.cells[self.offset(d, c)]))
        })
    }

    pub(crate) fn cell(&self, debtor: usize, creditor: usize) -> Money {
        debug_assert_ne!(debtor, creditor, "diagonal cell accessed");
        self.cells[self.offset(debtor, creditor)]
    }

    pub(crate) fn set_cell(&mut self, debtor: usize, creditor: usize, amount: Money) {
        debug_assert_ne!(debtor, creditor, "diagonal cell written");
        let offset = self.offset(debtor, creditor);
        self.cells[offset] = amount;
    }

    fn offset(&self, debtor: usize, creditor: usize) -> usize {
        debtor * self.universe.len() + creditor
    }
}

/// Net position per member: positive means the group owes the member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Totals {
    universe: MemberUniverse,
    values: Vec<Money>,
}

impl Totals {
    pub fn new(universe: MemberUniverse) -> Self {
        let n = universe.len();
        Self {
            universe,
            values: vec![Money::ZERO; n],
        }
    }

    pub fn get(&self, member: UserId) -> Option<Money> {
        self.universe.index_of(member).map(|i| self.values[i])
    }

    /// Sum over all members. Zero for every consistent ledger.
    pub fn sum(&self) -> i128 {
        self.values.iter().map(|m| i128::from(m.minor())).sum()
    }

    pub(crate) fn value(&self, member: usize) -> Money {
        self.values[member]
    }

    pub(crate) fn set_value(&mut self, member: usize, amount: Money) {
        self.values[member] = amount;
    }
}

/// Matrix + totals before netting. Expenses and settlements fold into this in
/// any order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerState {
    pub(crate) matrix: LedgerMatrix,
    pub(crate) totals: Totals,
}

impl LedgerState {
    /// All totals at zero, every off-diagonal cell at zero.
    pub fn new(universe: MemberUniverse) -> Self {
        Self {
            matrix: LedgerMatrix::new(universe.clone()),
            totals: Totals::new(universe),
        }
    }

    pub fn universe(&self) -> &MemberUniverse {
        self.matrix.universe()
    }

    pub fn matrix(&self) -> &LedgerMatrix {
        &self.matrix
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }
}
