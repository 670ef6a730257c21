use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockWriteGuard};

use splitledger_core::{GroupId, UserId};
use splitledger_groups::{Expense, Group, Settlement, UserRecord};
use splitledger_ledger::{GroupSnapshot, UserDirectory};

/// Read access to the hosted group data.
///
/// `snapshot` must return the group, its expenses and its settlements from a
/// single consistent read; the ledger never sees a torn view.
pub trait GroupStore: UserDirectory {
    fn group(&self, group_id: GroupId) -> Option<Group>;
    fn groups(&self) -> Vec<Group>;
    fn snapshot(&self, group_id: GroupId) -> Option<GroupSnapshot>;
}

impl<S> GroupStore for Arc<S>
where
    S: GroupStore + ?Sized,
{
    fn group(&self, group_id: GroupId) -> Option<Group> {
        (**self).group(group_id)
    }

    fn groups(&self) -> Vec<Group> {
        (**self).groups()
    }

    fn snapshot(&self, group_id: GroupId) -> Option<GroupSnapshot> {
        (**self).snapshot(group_id)
    }
}

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, UserRecord>,
    groups: HashMap<GroupId, Group>,
    expenses: HashMap<GroupId, Vec<Expense>>,
    settlements: HashMap<GroupId, Vec<Settlement>>,
}

/// In-memory store for tests/dev.
///
/// One lock guards every table, so a snapshot is always consistent.
#[derive(Debug, Default)]
pub struct InMemoryGroupStore {
    inner: RwLock<Tables>,
}

impl InMemoryGroupStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upsert_user(&self, user: UserRecord) {
        if let Some(mut tables) = self.write("upsert_user") {
            tables.users.insert(user.id, user);
        }
    }

    pub fn remove_user(&self, user_id: UserId) {
        if let Some(mut tables) = self.write("remove_user") {
            tables.users.remove(&user_id);
        }
    }

    pub fn upsert_group(&self, group: Group) {
        if let Some(mut tables) = self.write("upsert_group") {
            tables.groups.insert(group.id, group);
        }
    }

    pub fn add_expense(&self, expense: Expense) {
        if let Some(mut tables) = self.write("add_expense") {
            tables.expenses.entry(expense.group_id).or_default().push(expense);
        }
    }

    pub fn add_settlement(&self, settlement: Settlement) {
        if let Some(mut tables) = self.write("add_settlement") {
            tables
                .settlements
                .entry(settlement.group_id)
                .or_default()
                .push(settlement);
        }
    }

    /// Write guard, or `None` (logged) when a writer panicked mid-update.
    fn write(&self, op: &'static str) -> Option<RwLockWriteGuard<'_, Tables>> {
        match self.inner.write() {
            Ok(tables) => Some(tables),
            Err(_) => {
                tracing::warn!(op, "store lock poisoned; write dropped");
                None
            }
        }
    }
}

impl UserDirectory for InMemoryGroupStore {
    fn user(&self, id: UserId) -> Option<UserRecord> {
        let tables = self.inner.read().ok()?;
        tables.users.get(&id).cloned()
    }
}

impl GroupStore for InMemoryGroupStore {
    fn group(&self, group_id: GroupId) -> Option<Group> {
        let tables = self.inner.read().ok()?;
        tables.groups.get(&group_id).cloned()
    }

    fn groups(&self) -> Vec<Group> {
        let tables = match self.inner.read() {
            Ok(t) => t,
            Err(_) => return vec![],
        };
        let mut groups: Vec<Group> = tables.groups.values().cloned().collect();
        groups.sort_by_key(|g| g.id);
        groups
    }

    fn snapshot(&self, group_id: GroupId) -> Option<GroupSnapshot> {
        let tables = self.inner.read().ok()?;
        let group = tables.groups.get(&group_id)?.clone();
        Some(GroupSnapshot {
            group,
            expenses: tables.expenses.get(&group_id).cloned().unwrap_or_default(),
            settlements: tables.settlements.get(&group_id).cloned().unwrap_or_default(),
        })
    }
}
