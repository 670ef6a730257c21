use thiserror::Error;

use splitledger_core::{GroupId, UserId};
use splitledger_groups::Group;

use crate::Principal;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("group {0} not found")]
    GroupNotFound(GroupId),

    #[error("user {user_id} is not a member of group {group_id}")]
    NotAMember { group_id: GroupId, user_id: UserId },
}

/// Authorize a principal to read a group.
///
/// - No IO
/// - No panics
/// - Pure membership check over the loaded roster
pub fn authorize_group<'g>(
    principal: &Principal,
    group_id: GroupId,
    group: Option<&'g Group>,
) -> Result<&'g Group, AccessError> {
    let group = group.ok_or(AccessError::GroupNotFound(group_id))?;

    if group.is_member(principal.user_id()) {
        Ok(group)
    } else {
        tracing::debug!(group_id = %group_id, user_id = %principal.user_id(), "group access denied");
        Err(AccessError::NotAMember {
            group_id,
            user_id: principal.user_id(),
        })
    }
}

/// Groups whose roster includes the principal, in input order.
pub fn visible_groups<'g>(
    principal: &Principal,
    groups: impl IntoIterator<Item = &'g Group>,
) -> Vec<&'g Group> {
    groups
        .into_iter()
        .filter(|g| g.is_member(principal.user_id()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use splitledger_groups::{GroupMembership, MemberRole};

    fn group(id: u128, members: &[u128]) -> Group {
        Group {
            id: GroupId::from_u128(id),
            name: format!("group {id}"),
            description: None,
            created_by: None,
            members: members
                .iter()
                .map(|&m| GroupMembership::new(UserId::from_u128(m), MemberRole::Member))
                .collect(),
        }
    }

    #[test]
    fn member_is_authorized() {
        let g = group(1, &[1, 2]);
        let principal = Principal::new(UserId::from_u128(2));
        assert_eq!(authorize_group(&principal, g.id, Some(&g)), Ok(&g));
    }

    #[test]
    fn missing_group_is_not_found() {
        let principal = Principal::new(UserId::from_u128(1));
        let err = authorize_group(&principal, GroupId::from_u128(5), None).unwrap_err();
        assert_eq!(err, AccessError::GroupNotFound(GroupId::from_u128(5)));
    }

    #[test]
    fn outsider_is_rejected() {
        let g = group(1, &[1, 2]);
        let principal = Principal::new(UserId::from_u128(3));
        let err = authorize_group(&principal, g.id, Some(&g)).unwrap_err();
        assert_eq!(
            err,
            AccessError::NotAMember {
                group_id: g.id,
                user_id: UserId::from_u128(3),
            }
        );
    }

    #[test]
    fn only_member_groups_are_visible() {
        let groups = vec![group(1, &[1, 2]), group(2, &[3]), group(3, &[2, 3])];
        let principal = Principal::new(UserId::from_u128(2));

        let ids: Vec<GroupId> = visible_groups(&principal, &groups).iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![GroupId::from_u128(1), GroupId::from_u128(3)]);
    }
}
