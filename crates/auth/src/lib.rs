//! `splitledger-auth` — group access boundary.
//!
//! Decoupled from transport and storage: callers load the group, then ask
//! whether the explicit [`Principal`] may read it.

pub mod authorize;
pub mod principal;

pub use authorize::{AccessError, authorize_group, visible_groups};
pub use principal::Principal;
