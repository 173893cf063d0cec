//! Forest category tags.

use serde::{Deserialize, Serialize};

/// Tag partitioning independently built forests.
///
/// The persisted schema lets multiple forests coexist; the category selects
/// which one an enumeration or destroy operation addresses. Round-trips
/// through its string form for persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ForestCategory {
    /// The continuation-mining forest: one trie per trigger action.
    Continuations,
    /// Caller-defined category for additional forests.
    Custom(String),
}

impl ForestCategory {
    /// The string form stored in the `tries.category` column.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Continuations => "continuations",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for ForestCategory {
    fn from(s: &str) -> Self {
        match s {
            "continuations" => Self::Continuations,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for ForestCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
