use serde::{Deserialize, Serialize};

use splitledger_core::UserId;

/// The authenticated caller of a query.
///
/// Passed explicitly into every group query; there is no ambient "current
/// user". How the identity was authenticated is the transport's concern.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Principal {
    user_id: UserId,
}

impl Principal {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}
