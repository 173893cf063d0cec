//! Forest building: journey sources, the builder, and the built forest.

pub mod builder;
pub mod source;

pub use builder::ForestBuilder;
pub use source::{
    JourneyActions, JourneyEvent, JourneySource, OrderedJourneySource, VecJourneySource,
};

use std::sync::Arc;

use rayon::prelude::*;

use stride_core::types::collections::FxHashMap;
use stride_core::types::{ActionId, ActionInterner, ForestCategory};

use crate::mine::{Pattern, PatternMiner, SupportMode};
use crate::trie::Trie;

/// The per-anchor tries produced by one build, sharing a category and
/// support base.
pub struct Forest {
    tries: FxHashMap<ActionId, Trie>,
    interner: Arc<ActionInterner>,
    category: ForestCategory,
    support_base: u64,
}

impl Forest {
    pub(crate) fn new(
        tries: FxHashMap<ActionId, Trie>,
        interner: Arc<ActionInterner>,
        category: ForestCategory,
        support_base: u64,
    ) -> Self {
        Self {
            tries,
            interner,
            category,
            support_base,
        }
    }

    pub fn category(&self) -> &ForestCategory {
        &self.category
    }

    /// Size of the journey population the forest was built from.
    pub fn support_base(&self) -> u64 {
        self.support_base
    }

    /// The interner resolving every action label in this forest.
    pub fn interner(&self) -> &Arc<ActionInterner> {
        &self.interner
    }

    /// Number of tries (distinct anchor actions).
    pub fn len(&self) -> usize {
        self.tries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tries.is_empty()
    }

    /// Look up the trie anchored at the given action label.
    pub fn get(&self, label: &str) -> Option<&Trie> {
        self.interner.get(label).and_then(|id| self.tries.get(&id))
    }

    /// Iterate over every trie in the forest.
    pub fn tries(&self) -> impl Iterator<Item = &Trie> {
        self.tries.values()
    }

    /// Mine every trie at the same threshold.
    ///
    /// Tries share no mutable state and mining is read-only, so the
    /// fan-out is per-trie. Pattern order is unspecified.
    pub fn mine_all(&self, threshold: f64, mode: SupportMode) -> Vec<Pattern> {
        self.tries
            .par_iter()
            .flat_map_iter(|(_, trie)| PatternMiner::mine(trie, threshold, mode))
            .collect()
    }
}
