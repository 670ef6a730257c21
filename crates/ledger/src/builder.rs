//! Folding expenses into the ledger.

use std::collections::BTreeMap;

use splitledger_core::{Money, UserId};
use splitledger_groups::Expense;

use crate::error::{LedgerError, RecordRef};
use crate::matrix::LedgerState;

impl LedgerState {
    /// Fold every expense, stopping at the first invalid one.
    pub fn apply_expenses<'a>(
        &mut self,
        expenses: impl IntoIterator<Item = &'a Expense>,
    ) -> Result<(), LedgerError> {
        for expense in expenses {
            self.apply_expense(expense)?;
        }
        Ok(())
    }

    /// Fold one expense: each owing split moves `amount` from the debtor to the
    /// payer in `totals` and adds it to `ledger[debtor][payer]`.
    ///
    /// The payer's own split and `paid` splits contribute nothing. The expense
    /// is validated and staged first; on error the state is left untouched.
    pub fn apply_expense(&mut self, expense: &Expense) -> Result<(), LedgerError> {
        let record = RecordRef::Expense(expense.id);
        let universe = self.universe();

        let payer = self.member_index(record, expense.paid_by_user_id)?;
        for split in &expense.splits {
            self.member_index(record, split.user_id)?;
            if split.amount.is_negative() {
                return Err(LedgerError::InvalidAmount {
                    record,
                    amount: split.amount,
                    reason: "split amount must not be negative",
                });
            }
        }

        // Aggregate per debtor so that two splits for the same user touch the
        // same cell once.
        let overflow = || LedgerError::AmountOverflow { record };
        let mut per_debtor: BTreeMap<usize, Money> = BTreeMap::new();
        let mut credited = Money::ZERO;
        for split in expense.owing_splits() {
            let Some(debtor) = universe.index_of(split.user_id) else {
                continue;
            };
            let slot = per_debtor.entry(debtor).or_insert(Money::ZERO);
            *slot = slot.checked_add(split.amount).map_err(|_| overflow())?;
            credited = credited.checked_add(split.amount).map_err(|_| overflow())?;
        }

        if per_debtor.is_empty() {
            tracing::trace!(expense_id = %expense.id, "expense has no owing splits");
            return Ok(());
        }

        let payer_total = self
            .totals
            .value(payer)
            .checked_add(credited)
            .map_err(|_| overflow())?;
        let mut staged = Vec::with_capacity(per_debtor.len());
        for (debtor, amount) in per_debtor {
            let total = self
                .totals
                .value(debtor)
                .checked_sub(amount)
                .map_err(|_| overflow())?;
            let cell = self
                .matrix
                .cell(debtor, payer)
                .checked_add(amount)
                .map_err(|_| overflow())?;
            staged.push((debtor, total, cell));
        }

        self.totals.set_value(payer, payer_total);
        for (debtor, total, cell) in staged {
            self.totals.set_value(debtor, total);
            self.matrix.set_cell(debtor, payer, cell);
        }

        tracing::trace!(expense_id = %expense.id, credited = %credited, "expense applied");
        Ok(())
    }

    pub(crate) fn member_index(&self, record: RecordRef, user_id: UserId) -> Result<usize, LedgerError> {
        self.universe()
            .index_of(user_id)
            .ok_or(LedgerError::InvalidMemberReference { record, user_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::MemberUniverse;
    use chrono::Utc;
    use proptest::prelude::*;
    use splitledger_core::{ExpenseId, GroupId};
    use splitledger_groups::{Split, SplitType};

    fn user(n: u128) -> UserId {
        UserId::from_u128(n)
    }

    fn money(minor: i64) -> Money {
        Money::from_minor(minor)
    }

    fn expense(id: u128, payer: UserId, splits: Vec<Split>) -> Expense {
        let amount = splits.iter().map(|s| s.amount.minor()).sum();
        Expense {
            id: ExpenseId::from_u128(id),
            group_id: GroupId::from_u128(1),
            description: format!("expense {id}"),
            amount: money(amount),
            category: None,
            date: Utc::now(),
            paid_by_user_id: payer,
            split_type: SplitType::Exact,
            splits,
            created_by: Some(payer),
        }
    }

    fn three_members() -> LedgerState {
        LedgerState::new(MemberUniverse::new([user(1), user(2), user(3)]))
    }

    #[test]
    fn even_split_credits_payer_and_debits_others() {
        let mut state = three_members();
        let dinner = expense(
            1,
            user(1),
            vec![
                Split::new(user(1), money(20)),
                Split::new(user(2), money(20)),
                Split::new(user(3), money(20)),
            ],
        );

        state.apply_expense(&dinner).unwrap();

        assert_eq!(state.totals().get(user(1)), Some(money(40)));
        assert_eq!(state.totals().get(user(2)), Some(money(-20)));
        assert_eq!(state.totals().get(user(3)), Some(money(-20)));
        assert_eq!(state.matrix().get(user(2), user(1)), Some(money(20)));
        assert_eq!(state.matrix().get(user(3), user(1)), Some(money(20)));
        assert_eq!(state.matrix().get(user(1), user(2)), Some(Money::ZERO));
        assert_eq!(state.totals().sum(), 0);
    }

    #[test]
    fn payer_and_paid_splits_have_no_effect() {
        let mut state = three_members();
        let taxi = expense(
            1,
            user(1),
            vec![
                Split::new(user(1), money(500)),
                Split::new(user(2), money(700)).paid(),
            ],
        );

        state.apply_expense(&taxi).unwrap();

        assert_eq!(state, three_members());
    }

    #[test]
    fn outside_reference_rejects_whole_expense() {
        let mut state = three_members();
        let bad = expense(
            7,
            user(1),
            vec![Split::new(user(2), money(10)), Split::new(user(9), money(10))],
        );

        let err = state.apply_expense(&bad).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InvalidMemberReference {
                record: RecordRef::Expense(ExpenseId::from_u128(7)),
                user_id: user(9),
            }
        );
        assert_eq!(state, three_members());
    }

    #[test]
    fn outside_payer_is_rejected() {
        let mut state = three_members();
        let bad = expense(8, user(42), vec![Split::new(user(2), money(10))]);

        assert!(matches!(
            state.apply_expense(&bad),
            Err(LedgerError::InvalidMemberReference { user_id, .. }) if user_id == user(42)
        ));
    }

    #[test]
    fn negative_split_is_rejected() {
        let mut state = three_members();
        let bad = expense(2, user(1), vec![Split::new(user(2), money(-1))]);

        assert!(matches!(
            state.apply_expense(&bad),
            Err(LedgerError::InvalidAmount { .. })
        ));
        assert_eq!(state, three_members());
    }

    #[test]
    fn overflow_leaves_state_untouched() {
        let mut state = three_members();
        state
            .apply_expense(&expense(1, user(1), vec![Split::new(user(2), money(i64::MAX))]))
            .unwrap();
        let before = state.clone();

        let err = state
            .apply_expense(&expense(2, user(1), vec![Split::new(user(3), money(1))]))
            .unwrap_err();

        assert_eq!(err, LedgerError::AmountOverflow { record: RecordRef::Expense(ExpenseId::from_u128(2)) });
        assert_eq!(state, before);
    }

    #[test]
    fn repeated_debtor_splits_accumulate() {
        let mut state = three_members();
        let shared = expense(
            3,
            user(2),
            vec![Split::new(user(3), money(5)), Split::new(user(3), money(7))],
        );

        state.apply_expense(&shared).unwrap();

        assert_eq!(state.matrix().get(user(3), user(2)), Some(money(12)));
        assert_eq!(state.totals().get(user(2)), Some(money(12)));
    }

    fn arb_expense() -> impl Strategy<Value = Expense> {
        (
            1u128..=4,
            prop::collection::vec((1u128..=4, 0i64..100_000, any::<bool>()), 0..6),
            any::<u128>(),
        )
            .prop_map(|(payer, splits, id)| {
                let splits = splits
                    .into_iter()
                    .map(|(u, amount, paid)| Split {
                        user_id: user(u),
                        amount: money(amount),
                        paid,
                    })
                    .collect();
                expense(id, user(payer), splits)
            })
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: folding any set of valid expenses keeps totals at zero sum.
        #[test]
        fn expenses_conserve_money(expenses in prop::collection::vec(arb_expense(), 0..20)) {
            let mut state = LedgerState::new(MemberUniverse::new((1..=4).map(user)));
            state.apply_expenses(&expenses).unwrap();

            prop_assert_eq!(state.totals().sum(), 0);
            for (_, _, amount) in state.matrix().entries() {
                prop_assert!(!amount.is_negative());
            }
        }

        /// Property: a split that is paid, or belongs to the payer, never moves money.
        #[test]
        fn excluded_splits_are_inert(mut e in arb_expense()) {
            for split in &mut e.splits {
                if split.user_id != e.paid_by_user_id {
                    split.paid = true;
                }
            }
            let empty = LedgerState::new(MemberUniverse::new((1..=4).map(user)));
            let mut state = empty.clone();
            state.apply_expense(&e).unwrap();
            prop_assert_eq!(state, empty);
        }
    }
}
