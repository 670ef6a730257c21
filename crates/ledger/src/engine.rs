//! Entry point: one stateless balance computation over a group snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use splitledger_core::{GroupId, UserId};
use splitledger_groups::{Expense, Group, GroupSummary, MemberProfile, Settlement};

use crate::error::{LedgerError, RecordRef};
use crate::matrix::{LedgerState, MemberUniverse};
use crate::projector::{BalanceView, project};
use crate::resolver::{UserDirectory, resolve_members};

/// Everything one computation reads, taken from a single consistent read of
/// the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupSnapshot {
    pub group: Group,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub settlements: Vec<Settlement>,
}

/// Computed view of a group's finances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBalances {
    pub group: GroupSummary,
    /// Roster members with an identity record.
    pub members: Vec<MemberProfile>,
    pub expenses: Vec<Expense>,
    pub settlements: Vec<Settlement>,
    pub balances: Vec<BalanceView>,
    pub user_lookup_map: BTreeMap<UserId, MemberProfile>,
    /// Roster ids without an identity record: counted in the arithmetic but
    /// absent from `members`, `balances` and `user_lookup_map`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub missing_members: Vec<UserId>,
}

/// Resolve members, fold expenses and settlements, net, and project.
///
/// Fails closed: any invalid record aborts the computation and nothing
/// partial is returned. Missing identity records are not errors.
#[instrument(
    skip_all,
    fields(
        group_id = %snapshot.group.id,
        expenses = snapshot.expenses.len(),
        settlements = snapshot.settlements.len()
    ),
    err
)]
pub fn compute_group_balances<D>(
    snapshot: &GroupSnapshot,
    directory: &D,
) -> Result<GroupBalances, LedgerError>
where
    D: UserDirectory + ?Sized,
{
    let group = &snapshot.group;
    ensure_same_group(group.id, snapshot)?;

    let resolved = resolve_members(group, directory);

    let universe = MemberUniverse::from_group(group);
    tracing::debug!(members = universe.len(), "ledger initialised");

    let mut state = LedgerState::new(universe);
    state.apply_expenses(&snapshot.expenses)?;
    state.apply_settlements(&snapshot.settlements)?;

    let sum = state.totals().sum();
    if sum != 0 {
        return Err(LedgerError::ConservationViolated { sum });
    }

    let netted = state.net()?;
    let projection = project(&resolved.members, &netted);

    tracing::debug!(
        balances = projection.balances.len(),
        missing = resolved.missing.len(),
        "group balances computed"
    );

    Ok(GroupBalances {
        group: group.summary(),
        members: resolved.members.iter().map(MemberProfile::from).collect(),
        expenses: snapshot.expenses.clone(),
        settlements: snapshot.settlements.clone(),
        balances: projection.balances,
        user_lookup_map: projection.user_lookup_map,
        missing_members: resolved.missing.iter().map(|m| m.user_id).collect(),
    })
}

fn ensure_same_group(expected: GroupId, snapshot: &GroupSnapshot) -> Result<(), LedgerError> {
    let expenses = snapshot
        .expenses
        .iter()
        .map(|e| (RecordRef::Expense(e.id), e.group_id));
    let settlements = snapshot
        .settlements
        .iter()
        .map(|s| (RecordRef::Settlement(s.id), s.group_id));

    for (record, found) in expenses.chain(settlements) {
        if found != expected {
            return Err(LedgerError::ForeignRecord {
                record,
                expected,
                found,
            });
        }
    }
    Ok(())
}
