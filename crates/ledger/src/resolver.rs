//! Member resolution: roster user ids -> displayable member records.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;

use thiserror::Error;

use splitledger_core::UserId;
use splitledger_groups::{Group, Member, UserRecord};

/// Source of user identity records (the hosted user table).
///
/// Lookups are expected to read from the same consistent snapshot as the
/// group's expenses and settlements.
pub trait UserDirectory: Send + Sync {
    fn user(&self, id: UserId) -> Option<UserRecord>;
}

impl<D> UserDirectory for Arc<D>
where
    D: UserDirectory + ?Sized,
{
    fn user(&self, id: UserId) -> Option<UserRecord> {
        (**self).user(id)
    }
}

impl<D> UserDirectory for &D
where
    D: UserDirectory + ?Sized,
{
    fn user(&self, id: UserId) -> Option<UserRecord> {
        (**self).user(id)
    }
}

impl UserDirectory for HashMap<UserId, UserRecord> {
    fn user(&self, id: UserId) -> Option<UserRecord> {
        self.get(&id).cloned()
    }
}

impl UserDirectory for BTreeMap<UserId, UserRecord> {
    fn user(&self, id: UserId) -> Option<UserRecord> {
        self.get(&id).cloned()
    }
}

impl UserDirectory for [UserRecord] {
    fn user(&self, id: UserId) -> Option<UserRecord> {
        self.iter().find(|u| u.id == id).cloned()
    }
}

impl UserDirectory for Vec<UserRecord> {
    fn user(&self, id: UserId) -> Option<UserRecord> {
        self.as_slice().user(id)
    }
}

/// A roster entry with no identity record (e.g. a deleted user).
///
/// Non-fatal: the member is left out of the displayed members but keeps
/// participating in ledger arithmetic under their id.
#[derive(Debug, Error, Copy, Clone, PartialEq, Eq)]
#[error("no identity record for group member {user_id}")]
pub struct MissingMemberError {
    pub user_id: UserId,
}

/// Result of resolving a group's roster.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ResolvedMembers {
    /// One record per distinct resolvable roster id, in roster order.
    pub members: Vec<Member>,
    pub missing: Vec<MissingMemberError>,
}

/// Resolve every roster entry through `directory`.
///
/// Duplicate roster entries collapse to the first one (its role wins).
pub fn resolve_members<D>(group: &Group, directory: &D) -> ResolvedMembers
where
    D: UserDirectory + ?Sized,
{
    let mut seen = BTreeSet::new();
    let mut resolved = ResolvedMembers::default();

    for entry in &group.members {
        if !seen.insert(entry.user_id) {
            tracing::debug!(group_id = %group.id, user_id = %entry.user_id, "duplicate roster entry ignored");
            continue;
        }

        match directory.user(entry.user_id) {
            Some(record) => resolved.members.push(Member::from_record(&record, entry.role)),
            None => {
                let err = MissingMemberError {
                    user_id: entry.user_id,
                };
                tracing::warn!(group_id = %group.id, "{err}");
                resolved.missing.push(err);
            }
        }
    }

    resolved
}
