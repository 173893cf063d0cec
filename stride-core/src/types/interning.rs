//! String interning for action labels.
//!
//! Uses `lasso::ThreadedRodeo` so one interner can be shared across the
//! worker threads that build or mine independent tries of a forest.

use lasso::ThreadedRodeo;

use super::identifiers::ActionId;

/// Thread-safe interner mapping action labels to `ActionId`s.
///
/// One interner per forest; every trie of the forest resolves its labels
/// through the same instance.
#[derive(Debug)]
pub struct ActionInterner {
    inner: ThreadedRodeo,
}

impl ActionInterner {
    /// Create a new action interner.
    pub fn new() -> Self {
        Self {
            inner: ThreadedRodeo::default(),
        }
    }

    /// Intern an action label, returning its ID.
    pub fn get_or_intern(&self, label: &str) -> ActionId {
        ActionId::new(self.inner.get_or_intern(label))
    }

    /// Look up a previously interned label without inserting.
    pub fn get(&self, label: &str) -> Option<ActionId> {
        self.inner.get(label).map(ActionId::new)
    }

    /// Resolve an `ActionId` back to its label.
    pub fn resolve(&self, id: ActionId) -> &str {
        self.inner.resolve(&id.inner())
    }

    /// Number of distinct labels interned so far.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns true if no labels have been interned.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl Default for ActionInterner {
    fn default() -> Self {
        Self::new()
    }
}
