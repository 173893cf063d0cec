//! Newtype ID types for actions, journeys, events, and persisted tries.
//!
//! Each ID wraps its raw representation to prevent cross-type confusion.
//! A `JourneyId` cannot be accidentally used where an `EventId` is expected.

use lasso::Spur;
use serde::{Deserialize, Serialize};

/// Interned action label identifier.
///
/// Wraps a `lasso::Spur`; resolve it back to the label through the
/// `ActionInterner` that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionId(pub Spur);

impl ActionId {
    /// Create a new ID from a `Spur`.
    pub fn new(spur: Spur) -> Self {
        Self(spur)
    }

    /// Get the inner `Spur`.
    pub fn inner(self) -> Spur {
        self.0
    }
}

impl From<Spur> for ActionId {
    fn from(spur: Spur) -> Self {
        Self(spur)
    }
}

impl From<ActionId> for Spur {
    fn from(id: ActionId) -> Self {
        id.0
    }
}

macro_rules! define_row_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        pub struct $name(pub i64);

        impl $name {
            /// Create a new ID from a raw value.
            pub fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Get the raw value.
            pub fn raw(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_row_id!(
    /// Journey identifier, assigned by the journey source.
    JourneyId
);

define_row_id!(
    /// Event identifier, unique across all journeys of one population.
    EventId
);

define_row_id!(
    /// Row id of a persisted trie.
    TrieId
);
