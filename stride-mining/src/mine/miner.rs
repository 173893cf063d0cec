//! Bottom-up pattern mining over a completed trie.

use serde::{Deserialize, Serialize};
use tracing::debug;

use stride_core::types::collections::{BTreeSet, FxHashMap};
use stride_core::types::JourneyId;

use super::Pattern;
use crate::trie::{NodeId, Trie};

/// Which population the support threshold is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportMode {
    /// Fraction of the whole journey population the forest was built from.
    Absolute,
    /// Fraction of only the journeys containing the anchor.
    Relative,
}

/// Exact frequent-pattern extraction via one post-order pass.
pub struct PatternMiner;

impl PatternMiner {
    /// Mine every pattern whose supporting journey set reaches `threshold`.
    ///
    /// Mining is read-only; any number of concurrent minings against the
    /// same trie are safe. Thresholds outside `(0, 1]` produce degenerate
    /// results rather than errors. Emitted order is unspecified.
    pub fn mine(trie: &Trie, threshold: f64, mode: SupportMode) -> Vec<Pattern> {
        let base = match mode {
            SupportMode::Absolute => trie.support_base(),
            SupportMode::Relative => trie.journey_count(),
        };
        let min_support = base as f64 * threshold;

        let mut rolling: FxHashMap<NodeId, BTreeSet<JourneyId>> = FxHashMap::default();
        let mut patterns = Vec::new();
        for node in trie.postorder() {
            Self::fold_node(trie, node, min_support, &mut rolling, &mut patterns);
        }

        debug!(
            threshold,
            min_support,
            patterns = patterns.len(),
            "trie mined"
        );
        patterns
    }

    /// Emit or roll up a single node. Called exactly once per node, in
    /// post-order, so every descendant's contribution is already in
    /// `rolling` when its ancestor is visited.
    fn fold_node(
        trie: &Trie,
        node: NodeId,
        min_support: f64,
        rolling: &mut FxHashMap<NodeId, BTreeSet<JourneyId>>,
        out: &mut Vec<Pattern>,
    ) {
        let mut support = rolling.remove(&node).unwrap_or_default();
        support.extend(trie.node(node).own_journeys().iter().copied());

        if support.len() as f64 >= min_support {
            out.push(Pattern::new(
                trie.path_from(node),
                support,
                trie.support_base(),
                trie.journey_count(),
            ));
            return;
        }

        // Sub-threshold: fold into the parent, unless the parent is the
        // root. The anchor alone is not a continuation pattern, so support
        // reaching the root is dropped, never folded into the anchor.
        match trie.node(node).parent() {
            Some(parent) if parent != NodeId::ROOT => {
                rolling.entry(parent).or_default().extend(support);
            }
            _ => {}
        }
    }
}
