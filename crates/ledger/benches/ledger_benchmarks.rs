use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use splitledger_core::{ExpenseId, GroupId, Money, SettlementId, UserId};
use splitledger_groups::{
    Expense, Group, GroupMembership, MemberRole, Settlement, Split, SplitType, UserRecord,
};
use splitledger_ledger::{GroupSnapshot, compute_group_balances};

/// Group of `members` users where every member pays one expense split evenly
/// across everybody, `rounds` times over, plus one settlement per member.
fn build_snapshot(members: u128, rounds: u128) -> (GroupSnapshot, Vec<UserRecord>) {
    let group_id = GroupId::from_u128(1);
    let users: Vec<UserId> = (1..=members).map(UserId::from_u128).collect();

    let directory = users
        .iter()
        .map(|&id| UserRecord {
            id,
            name: id.to_string(),
            email: None,
            image_url: None,
        })
        .collect();

    let mut expenses = Vec::new();
    for round in 0..rounds {
        for (i, &payer) in users.iter().enumerate() {
            let splits: Vec<Split> = users
                .iter()
                .map(|&u| Split::new(u, Money::from_minor(100 + (round as i64 % 7))))
                .collect();
            expenses.push(Expense {
                id: ExpenseId::from_u128(round * members + i as u128 + 1),
                group_id,
                description: String::new(),
                amount: Money::from_minor(splits.iter().map(|s| s.amount.minor()).sum()),
                category: None,
                date: Utc::now(),
                paid_by_user_id: payer,
                split_type: SplitType::Equal,
                splits,
                created_by: Some(payer),
            });
        }
    }

    let settlements = users
        .iter()
        .zip(users.iter().cycle().skip(1))
        .enumerate()
        .map(|(i, (&from, &to))| Settlement {
            id: SettlementId::from_u128(i as u128 + 1),
            group_id,
            date: Utc::now(),
            paid_by_user_id: from,
            received_by_user_id: to,
            amount: Money::from_minor(50),
            note: None,
            created_by: Some(from),
        })
        .collect();

    let group = Group {
        id: group_id,
        name: "bench".to_string(),
        description: None,
        created_by: users.first().copied(),
        members: users
            .iter()
            .map(|&u| GroupMembership::new(u, MemberRole::Member))
            .collect(),
    };

    (
        GroupSnapshot {
            group,
            expenses,
            settlements,
        },
        directory,
    )
}

fn bench_compute_balances(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_group_balances");

    for &members in &[4u128, 16, 64] {
        let (snapshot, directory) = build_snapshot(members, 10);
        group.throughput(Throughput::Elements(snapshot.expenses.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(members), &snapshot, |b, snap| {
            b.iter(|| compute_group_balances(black_box(snap), &directory))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_balances);
criterion_main!(benches);
