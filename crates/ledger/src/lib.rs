//! Multi-party debt ledger engine.
//!
//! Pure domain logic only: no IO, no persistence, no shared state. Each call
//! to [`compute_group_balances`] re-derives a group's balances from scratch:
//!
//! 1. resolve roster members ([`resolver`])
//! 2. fold expenses ([`builder`]) and settlements ([`settlement`]) into a
//!    pairwise debt matrix and a zero-sum totals vector
//! 3. net each member pair to a single direction ([`netting`])
//! 4. project per-member balance views ([`projector`])

pub mod builder;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod netting;
pub mod projector;
pub mod resolver;
pub mod settlement;

pub use engine::{GroupBalances, GroupSnapshot, compute_group_balances};
pub use error::{LedgerError, RecordRef};
pub use matrix::{LedgerMatrix, LedgerState, MemberUniverse, Totals};
pub use netting::NettedLedger;
pub use projector::{BalanceView, OwedBy, Owes, Projection, project};
pub use resolver::{MissingMemberError, ResolvedMembers, UserDirectory, resolve_members};
