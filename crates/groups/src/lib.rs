//! Group records: rosters, expenses with resolved splits, settlements.
//!
//! Plain data only. These records are read from the hosted store and handed
//! to the ledger engine whole; nothing here mutates or persists them.

pub mod expense;
pub mod group;
pub mod member;
pub mod settlement;

pub use expense::{Expense, Split, SplitType};
pub use group::{Group, GroupListing, GroupMembership, GroupSummary};
pub use member::{Member, MemberProfile, MemberRole, UserRecord};
pub use settlement::Settlement;
