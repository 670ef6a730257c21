//! Pairwise netting of the debt matrix.

use splitledger_core::Money;

use crate::error::LedgerError;
use crate::matrix::{LedgerMatrix, LedgerState, Totals};

/// Ledger after netting.
///
/// For every unordered pair at most one direction is non-zero, and that value
/// is strictly positive. Only this type can be projected into balance views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NettedLedger {
    matrix: LedgerMatrix,
    totals: Totals,
}

impl NettedLedger {
    pub fn matrix(&self) -> &LedgerMatrix {
        &self.matrix
    }

    pub fn totals(&self) -> &Totals {
        &self.totals
    }
}

impl LedgerState {
    /// Collapse each `{a, b}` pair into a single direction.
    ///
    /// Pairs are visited once each, `a < b` in member-id order:
    /// `diff = ledger[a][b] - ledger[b][a]` ends up on `a -> b` when positive,
    /// on `b -> a` when negative, and both cells are cleared when zero.
    pub fn net(self) -> Result<NettedLedger, LedgerError> {
        let LedgerState { mut matrix, totals } = self;
        let n = matrix.universe().len();

        for a in 0..n {
            for b in (a + 1)..n {
                let (ab, ba) = net_pair(matrix.cell(a, b), matrix.cell(b, a)).ok_or_else(|| {
                    let ids = matrix.universe().ids();
                    LedgerError::NettingOverflow {
                        debtor: ids[a],
                        creditor: ids[b],
                    }
                })?;
                matrix.set_cell(a, b, ab);
                matrix.set_cell(b, a, ba);
            }
        }

        Ok(NettedLedger { matrix, totals })
    }
}

/// Net two opposite cells; `None` when the difference is not representable.
fn net_pair(ab: Money, ba: Money) -> Option<(Money, Money)> {
    let diff = ab.checked_sub(ba).ok()?;
    if diff.is_positive() {
        Some((diff, Money::ZERO))
    } else if diff.is_negative() {
        Some((Money::ZERO, diff.checked_neg().ok()?))
    } else {
        Some((Money::ZERO, Money::ZERO))
    }
}
