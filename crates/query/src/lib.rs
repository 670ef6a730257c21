//! Query-serving layer: loads a consistent group snapshot, checks the
//! caller's membership, and runs the ledger engine.

pub mod service;
pub mod store;

pub use service::{GroupOverview, GroupQueries, QueryError, SelectedGroup};
pub use store::{GroupStore, InMemoryGroupStore};
