//! Two-pass forest construction.

use std::sync::Arc;

use tracing::{debug, info};

use stride_core::errors::BuildError;
use stride_core::types::collections::{FxHashMap, FxHashSet};
use stride_core::types::{ActionId, ActionInterner, EventId, ForestCategory, JourneyId};

use super::source::JourneySource;
use super::Forest;
use crate::trie::Trie;

/// Builds a forest of per-anchor tries from an ordered journey population.
///
/// The population is resolved up front and each journey is fetched exactly
/// once; both passes run over the captured snapshot. Serializing builds per
/// category is the caller's responsibility, as is destroying any prior
/// forest of the same category first.
pub struct ForestBuilder {
    category: ForestCategory,
    continuation_limit: usize,
}

impl ForestBuilder {
    pub fn new(category: ForestCategory, continuation_limit: usize) -> Self {
        Self {
            category,
            continuation_limit,
        }
    }

    /// Build one trie per distinct action label in the population.
    ///
    /// An empty source yields an empty forest.
    pub fn build(&self, source: &mut dyn JourneySource) -> Result<Forest, BuildError> {
        let interner = Arc::new(ActionInterner::new());

        let ids = source.journey_ids()?;
        let support_base = ids.len() as u64;
        debug!(category = %self.category, journeys = support_base, "journey snapshot captured");

        let mut journeys: Vec<(JourneyId, Vec<(EventId, ActionId)>)> =
            Vec::with_capacity(ids.len());
        for id in ids {
            let events = source.actions(id)?;
            let actions = events
                .into_iter()
                .map(|e| (e.event, interner.get_or_intern(&e.action)))
                .collect();
            journeys.push((id, actions));
        }

        // Pre-pass: distinct journeys containing each action.
        let mut journey_counts: FxHashMap<ActionId, u64> = FxHashMap::default();
        for (_, actions) in &journeys {
            let mut seen: FxHashSet<ActionId> = FxHashSet::default();
            for &(_, action) in actions {
                if seen.insert(action) {
                    *journey_counts.entry(action).or_insert(0) += 1;
                }
            }
        }

        // Main pass: one continuation per non-overlapping anchor occurrence.
        let mut tries: FxHashMap<ActionId, Trie> = FxHashMap::default();
        let mut last_window: FxHashMap<ActionId, FxHashSet<EventId>> = FxHashMap::default();
        let mut inserted = 0u64;
        let mut suppressed = 0u64;

        for (journey, actions) in &journeys {
            for (pos, &(_, action)) in actions.iter().enumerate() {
                let trie = tries.entry(action).or_insert_with(|| {
                    Trie::new(
                        action,
                        self.category.clone(),
                        support_base,
                        journey_counts.get(&action).copied().unwrap_or(0),
                    )
                });

                let end = (pos + 1 + self.continuation_limit).min(actions.len());
                let continuation = &actions[pos + 1..end];

                // Overlap suppression: a continuation sharing any event with
                // the previously inserted one for this label is skipped, so
                // a tight cluster of the same trigger within one journey
                // contributes a single window.
                if let Some(window) = last_window.get(&action) {
                    if continuation.iter().any(|(event, _)| window.contains(event)) {
                        suppressed += 1;
                        continue;
                    }
                }

                let labels: Vec<ActionId> = continuation.iter().map(|&(_, a)| a).collect();
                trie.insert(&labels, *journey);
                inserted += 1;
                last_window.insert(action, continuation.iter().map(|&(e, _)| e).collect());
            }
        }

        info!(
            category = %self.category,
            journeys = support_base,
            tries = tries.len(),
            inserted,
            suppressed,
            "forest build complete"
        );

        Ok(Forest::new(
            tries,
            interner,
            self.category.clone(),
            support_base,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::source::VecJourneySource;

    fn build(source: &mut VecJourneySource, limit: usize) -> Forest {
        ForestBuilder::new(ForestCategory::Continuations, limit)
            .build(source)
            .unwrap()
    }

    #[test]
    fn test_empty_source_yields_empty_forest() {
        let mut source = VecJourneySource::new();
        let forest = build(&mut source, 3);
        assert!(forest.is_empty());
        assert_eq!(forest.support_base(), 0);
    }

    #[test]
    fn test_one_trie_per_distinct_action() {
        let mut source = VecJourneySource::new();
        source.push_journey(1, &["a", "b", "a"]);
        source.push_journey(2, &["b", "c"]);

        let forest = build(&mut source, 3);
        assert_eq!(forest.len(), 3);
        assert!(forest.get("a").is_some());
        assert!(forest.get("b").is_some());
        assert!(forest.get("c").is_some());
        assert!(forest.get("d").is_none());
    }

    #[test]
    fn test_support_base_and_journey_counts() {
        let mut source = VecJourneySource::new();
        source.push_journey(1, &["a", "b"]);
        source.push_journey(2, &["b", "b", "c"]);
        source.push_journey(3, &["c"]);

        let forest = build(&mut source, 3);
        let a = forest.get("a").unwrap();
        assert_eq!(a.support_base(), 3);
        assert_eq!(a.journey_count(), 1);

        // Repeats within one journey count once.
        let b = forest.get("b").unwrap();
        assert_eq!(b.support_base(), 3);
        assert_eq!(b.journey_count(), 2);

        let c = forest.get("c").unwrap();
        assert_eq!(c.journey_count(), 2);
    }

    #[test]
    fn test_continuation_length_limit() {
        let mut source = VecJourneySource::new();
        source.push_journey(1, &["x", "a", "b", "c", "d", "e"]);

        let forest = build(&mut source, 2);
        let trie = forest.get("x").unwrap();
        // Longest path below the anchor is the 2-symbol window.
        let deepest = trie
            .postorder()
            .map(|n| trie.path_from(n).len())
            .max()
            .unwrap();
        assert_eq!(deepest, 3);
    }

    #[test]
    fn test_overlap_suppression() {
        // A tightly repeated trigger yields exactly one recorded
        // continuation for that action in that journey.
        let mut source = VecJourneySource::new();
        source.push_journey(1, &["x", "x", "y", "z"]);

        let forest = build(&mut source, 3);
        let trie = forest.get("x").unwrap();
        assert_eq!(trie.journeys().len(), 1);

        // Exactly one inserted window: x,y,z from the first occurrence.
        let nodes: Vec<_> = trie.postorder().collect();
        assert_eq!(nodes.len(), 1);
        let path = trie.path_from(nodes[0]);
        let expected: Vec<ActionId> = ["x", "x", "y", "z"]
            .iter()
            .map(|l| forest.interner().get(l).unwrap())
            .collect();
        assert_eq!(path, expected);
    }

    #[test]
    fn test_disjoint_windows_both_inserted() {
        // Far-apart occurrences have disjoint windows; both are recorded.
        let mut source = VecJourneySource::new();
        source.push_journey(1, &["x", "a", "b", "x", "c", "d"]);

        let forest = build(&mut source, 2);
        let trie = forest.get("x").unwrap();
        let paths: Vec<Vec<ActionId>> =
            trie.postorder().map(|n| trie.path_from(n)).collect();
        let to_labels = |path: &Vec<ActionId>| -> Vec<String> {
            path.iter()
                .map(|&a| forest.interner().resolve(a).to_string())
                .collect()
        };
        let labels: Vec<Vec<String>> = paths.iter().map(to_labels).collect();
        assert!(labels.contains(&vec!["x".into(), "a".into(), "b".into()]));
        assert!(labels.contains(&vec!["x".into(), "c".into(), "d".into()]));
    }

    #[test]
    fn test_missing_journey_is_an_error() {
        struct BrokenSource;
        impl OrderedJourneySource for BrokenSource {
            fn journey_ids(&mut self) -> Result<Vec<JourneyId>, BuildError> {
                Ok(vec![JourneyId::new(1)])
            }
        }
        impl crate::forest::source::JourneyActions for BrokenSource {
            fn actions(
                &mut self,
                journey: JourneyId,
            ) -> Result<Vec<crate::forest::source::JourneyEvent>, BuildError> {
                Err(BuildError::JourneyRead {
                    journey: journey.raw(),
                    message: "gone".to_string(),
                })
            }
        }
        use crate::forest::source::OrderedJourneySource;

        let result = ForestBuilder::new(ForestCategory::Continuations, 3)
            .build(&mut BrokenSource);
        assert!(matches!(result, Err(BuildError::JourneyRead { .. })));
    }
}
