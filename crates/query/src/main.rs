use std::io::Read;

use anyhow::Context;
use serde::Deserialize;

use splitledger_groups::UserRecord;
use splitledger_ledger::{GroupBalances, GroupSnapshot, compute_group_balances};

/// Stdin document: a group snapshot plus the user records it refers to.
#[derive(Debug, Deserialize)]
struct Input {
    #[serde(flatten)]
    snapshot: GroupSnapshot,
    #[serde(default)]
    users: Vec<UserRecord>,
}

fn balances_from_document(raw: &str) -> anyhow::Result<GroupBalances> {
    let input: Input = serde_json::from_str(raw).context("invalid snapshot document")?;
    tracing::info!(group_id = %input.snapshot.group.id, "computing group balances");

    Ok(compute_group_balances(&input.snapshot, &input.users)?)
}

fn main() -> anyhow::Result<()> {
    splitledger_observability::init();

    let mut raw = String::new();
    std::io::stdin()
        .read_to_string(&mut raw)
        .context("failed to read snapshot from stdin")?;

    let balances = balances_from_document(&raw)?;

    let out = serde_json::to_string_pretty(&balances)?;
    println!("{out}");
    Ok(())
}
