//! Per-member balance views over a netted ledger.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use splitledger_core::{Money, UserId};
use splitledger_groups::{Member, MemberProfile};

use crate::netting::NettedLedger;

/// "I owe `to` this much."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owes {
    pub to: UserId,
    pub amount: Money,
}

/// "`from` owes me this much."
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwedBy {
    pub from: UserId,
    pub amount: Money,
}

/// A member's position in the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceView {
    #[serde(flatten)]
    pub member: MemberProfile,
    /// Positive: the group owes this member. Negative: the member owes the group.
    pub total_balance: Money,
    pub owes: Vec<Owes>,
    pub owed_by: Vec<OwedBy>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    pub balances: Vec<BalanceView>,
    pub user_lookup_map: BTreeMap<UserId, MemberProfile>,
}

/// Build one balance view per member, in the order given.
///
/// Pure assembly: no arithmetic beyond reading the netted cells. `owes` and
/// `owed_by` are ascending by counterpart id.
pub fn project(members: &[Member], ledger: &NettedLedger) -> Projection {
    let balances = members
        .iter()
        .map(|member| BalanceView {
            member: MemberProfile::from(member),
            total_balance: ledger.totals().get(member.id).unwrap_or(Money::ZERO),
            owes: ledger
                .matrix()
                .debts_of(member.id)
                .into_iter()
                .map(|(to, amount)| Owes { to, amount })
                .collect(),
            owed_by: ledger
                .matrix()
                .credits_of(member.id)
                .into_iter()
                .map(|(from, amount)| OwedBy { from, amount })
                .collect(),
        })
        .collect();

    let user_lookup_map = members
        .iter()
        .map(|m| (m.id, MemberProfile::from(m)))
        .collect();

    Projection {
        balances,
        user_lookup_map,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::{LedgerState, MemberUniverse};
    use splitledger_groups::MemberRole;

    fn user(n: u128) -> UserId {
        UserId::from_u128(n)
    }

    fn member(n: u128, name: &str) -> Member {
        Member {
            id: user(n),
            name: name.to_string(),
            email: None,
            image_url: None,
            role: MemberRole::Member,
        }
    }

    fn netted() -> NettedLedger {
        let mut state = LedgerState::new(MemberUniverse::new([user(1), user(2), user(3)]));
        // user(2) owes user(1) 20, user(3) owes user(1) 20.
        state.matrix.set_cell(1, 0, Money::from_minor(20));
        state.matrix.set_cell(2, 0, Money::from_minor(20));
        state.totals.set_value(0, Money::from_minor(40));
        state.totals.set_value(1, Money::from_minor(-20));
        state.totals.set_value(2, Money::from_minor(-20));
        state.net().unwrap()
    }

    #[test]
    fn builds_owes_and_owed_by() {
        let members = vec![member(1, "Ana"), member(2, "Ben"), member(3, "Cy")];
        let projection = project(&members, &netted());

        let ana = &projection.balances[0];
        assert_eq!(ana.total_balance, Money::from_minor(40));
        assert!(ana.owes.is_empty());
        assert_eq!(
            ana.owed_by,
            vec![
                OwedBy { from: user(2), amount: Money::from_minor(20) },
                OwedBy { from: user(3), amount: Money::from_minor(20) },
            ]
        );

        let ben = &projection.balances[1];
        assert_eq!(ben.owes, vec![Owes { to: user(1), amount: Money::from_minor(20) }]);
        assert!(ben.owed_by.is_empty());

        assert_eq!(projection.user_lookup_map.len(), 3);
        assert_eq!(projection.user_lookup_map[&user(3)].name, "Cy");
    }

    #[test]
    fn projection_is_repeatable() {
        let members = vec![member(3, "Cy"), member(1, "Ana")];
        let ledger = netted();
        assert_eq!(project(&members, &ledger), project(&members, &ledger));
    }

    #[test]
    fn unlisted_member_still_appears_as_counterpart() {
        // user(3) has no identity record and is not displayed.
        let members = vec![member(1, "Ana"), member(2, "Ben")];
        let projection = project(&members, &netted());

        assert_eq!(projection.balances.len(), 2);
        assert_eq!(projection.balances[0].owed_by.len(), 2);
        assert!(!projection.user_lookup_map.contains_key(&user(3)));
    }

    #[test]
    fn balance_view_serializes_flat() {
        let mut ben = member(2, "Ben");
        ben.email = Some("ben@example.com".to_string());
        let projection = project(&[ben], &netted());
        let json = serde_json::to_value(&projection.balances[0]).unwrap();

        assert_eq!(json["name"], "Ben");
        assert!(json.get("email").is_none());
        assert_eq!(json["totalBalance"], -20);
        assert_eq!(json["owes"][0]["amount"], 20);
        assert!(json["owedBy"].as_array().unwrap().is_empty());
    }
}
