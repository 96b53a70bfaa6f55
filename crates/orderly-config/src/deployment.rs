//! Which services a process hosts.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The set of services a single process runs.
///
/// The user and order services can be deployed as separate processes, in
/// which case the order service reaches the user service over HTTP, or
/// together, in which case the order service resolves users in-process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ServiceSet {
    /// Both services in a single process.
    #[default]
    All,
    /// User service only.
    User,
    /// Order service only.
    Order,
}

impl ServiceSet {
    /// Returns true if this process runs the user service.
    #[must_use]
    pub const fn has_user(&self) -> bool {
        matches!(self, Self::All | Self::User)
    }

    /// Returns true if this process runs the order service.
    #[must_use]
    pub const fn has_order(&self) -> bool {
        matches!(self, Self::All | Self::Order)
    }
}

impl fmt::Display for ServiceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::User => write!(f, "user"),
            Self::Order => write!(f, "order"),
        }
    }
}
