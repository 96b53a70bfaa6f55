//! Typed ID wrappers for domain entities.
//!
//! Ids are assigned by the store as 64-bit integers. The wrappers keep a user
//! id from being passed where an order id is expected.

use crate::{OrderlyError, OrderlyResult};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::str::FromStr;

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident, $entity:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Wraps a raw store id.
            #[must_use]
            pub const fn new(id: i64) -> Self {
                Self(id)
            }

            /// Returns the raw store id.
            #[must_use]
            pub const fn get(self) -> i64 {
                self.0
            }

            /// Rejects ids the store could never have assigned.
            pub fn ensure_positive(self) -> OrderlyResult<Self> {
                if self.0 > 0 {
                    Ok(self)
                } else {
                    Err(OrderlyError::invalid_argument(format!(
                        "{} id must be positive, got {}",
                        $entity, self.0
                    )))
                }
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = OrderlyError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self).map_err(|_| {
                    OrderlyError::invalid_argument(format!("invalid {} id: {s:?}", $entity))
                })
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

store_id!(
    /// A strongly-typed wrapper for user IDs.
    UserId,
    "user"
);

store_id!(
    /// A strongly-typed wrapper for order IDs.
    OrderId,
    "order"
);
