//! Stable integer identifiers.
//!
//! Every entity lives in a `Vec` owned by [`crate::world::World`] and is
//! addressed by its creation index, so ids double as arena indices.

use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub usize);

        impl $name {
            #[inline]
            pub fn index(self) -> usize {
                self.0
            }
        }

        impl From<usize> for $name {
            fn from(value: usize) -> Self {
                Self(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Index of a port in creation order.
    PortId
);
entity_id!(
    /// Index of a ship in creation order.
    ShipId
);
entity_id!(
    /// Index of a container in creation order.
    ContainerId
);
