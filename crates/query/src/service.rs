use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use splitledger_auth::{AccessError, Principal, authorize_group, visible_groups};
use splitledger_core::{GroupId, UserId};
use splitledger_groups::{GroupListing, Member};
use splitledger_ledger::{GroupBalances, LedgerError, compute_group_balances, resolve_members};

use crate::store::GroupStore;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// A group with its resolved member details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectedGroup {
    pub id: GroupId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<UserId>,
    pub members: Vec<Member>,
}

/// The caller's groups, plus one group in detail when requested.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupOverview {
    pub selected_group: Option<SelectedGroup>,
    pub groups: Vec<GroupListing>,
}

/// Read-side queries over a [`GroupStore`].
///
/// Every query takes the caller explicitly and checks membership before any
/// group data is returned.
#[derive(Debug)]
pub struct GroupQueries<S> {
    store: S,
}

impl<S> GroupQueries<S>
where
    S: GroupStore,
{
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Expenses, settlements and computed balances of one group.
    #[instrument(skip(self), fields(user_id = %principal.user_id()), err)]
    pub fn group_expenses(
        &self,
        principal: &Principal,
        group_id: GroupId,
    ) -> Result<GroupBalances, QueryError> {
        let snapshot = self
            .store
            .snapshot(group_id)
            .ok_or(AccessError::GroupNotFound(group_id))?;
        authorize_group(principal, group_id, Some(&snapshot.group))?;

        Ok(compute_group_balances(&snapshot, &self.store)?)
    }

    /// The caller's groups with member counts; with `group_id`, also that
    /// group's resolved members.
    #[instrument(skip(self), fields(user_id = %principal.user_id()), err)]
    pub fn group_or_members(
        &self,
        principal: &Principal,
        group_id: Option<GroupId>,
    ) -> Result<GroupOverview, QueryError> {
        let all = self.store.groups();
        let groups = visible_groups(principal, &all)
            .into_iter()
            .map(|g| g.listing())
            .collect();

        let selected_group = match group_id {
            None => None,
            Some(id) => {
                let found = self.store.group(id);
                let group = authorize_group(principal, id, found.as_ref())?;
                let resolved = resolve_members(group, &self.store);
                Some(SelectedGroup {
                    id: group.id,
                    name: group.name.clone(),
                    description: group.description.clone(),
                    created_by: group.created_by,
                    members: resolved.members,
                })
            }
        };

        Ok(GroupOverview {
            selected_group,
            groups,
        })
    }
}
