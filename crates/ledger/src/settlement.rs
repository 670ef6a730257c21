//! Folding settlement payments into the ledger.

use splitledger_core::DomainError;
use splitledger_groups::Settlement;

use crate::error::{LedgerError, RecordRef};
use crate::matrix::LedgerState;

impl LedgerState {
    pub fn apply_settlements<'a>(
        &mut self,
        settlements: impl IntoIterator<Item = &'a Settlement>,
    ) -> Result<(), LedgerError> {
        for settlement in settlements {
            self.apply_settlement(settlement)?;
        }
        Ok(())
    }

    /// Fold one payment: the payer's total rises, the receiver's falls, and
    /// `ledger[payer][receiver]` is reduced by the amount.
    ///
    /// The cell may go negative (over-payment, or paying someone who owed the
    /// payer). Netting folds that back into the opposite direction.
    pub fn apply_settlement(&mut self, settlement: &Settlement) -> Result<(), LedgerError> {
        let record = RecordRef::Settlement(settlement.id);

        let payer = self.member_index(record, settlement.paid_by_user_id)?;
        let receiver = self.member_index(record, settlement.received_by_user_id)?;
        if payer == receiver {
            return Err(LedgerError::SelfSettlement {
                record,
                user_id: settlement.paid_by_user_id,
            });
        }
        if !settlement.amount.is_positive() {
            return Err(LedgerError::InvalidAmount {
                record,
                amount: settlement.amount,
                reason: "settlement amount must be positive",
            });
        }

        let overflow = |_: DomainError| LedgerError::AmountOverflow { record };
        let amount = settlement.amount;
        let payer_total = self.totals.value(payer).checked_add(amount).map_err(overflow)?;
        let receiver_total = self.totals.value(receiver).checked_sub(amount).map_err(overflow)?;
        let cell = self.matrix.cell(payer, receiver).checked_sub(amount).map_err(overflow)?;

        self.totals.set_value(payer, payer_total);
        self.totals.set_value(receiver, receiver_total);
        self.matrix.set_cell(payer, receiver, cell);

        tracing::trace!(settlement_id = %settlement.id, amount = %amount, "settlement applied");
        Ok(())
    }
}
