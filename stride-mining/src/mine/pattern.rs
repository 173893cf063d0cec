//! Mined pattern types.

use serde::{Deserialize, Serialize};

use stride_core::types::collections::BTreeSet;
use stride_core::types::{ActionId, ActionInterner, JourneyId};

/// A frequent continuation pattern anchored at a trigger action.
///
/// `actions` runs from the anchor to the mined node; `journeys` is the
/// exact supporting journey set. Immutable once emitted.
#[derive(Debug, Clone)]
pub struct Pattern {
    actions: Vec<ActionId>,
    journeys: BTreeSet<JourneyId>,
    absolute_support_base: u64,
    relative_support_base: u64,
}

impl Pattern {
    pub(crate) fn new(
        actions: Vec<ActionId>,
        journeys: BTreeSet<JourneyId>,
        absolute_support_base: u64,
        relative_support_base: u64,
    ) -> Self {
        Self {
            actions,
            journeys,
            absolute_support_base,
            relative_support_base,
        }
    }

    /// Action path from the anchor to the mined node.
    pub fn actions(&self) -> &[ActionId] {
        &self.actions
    }

    /// The exact supporting journey set.
    pub fn journeys(&self) -> &BTreeSet<JourneyId> {
        &self.journeys
    }

    /// Number of distinct supporting journeys.
    pub fn support(&self) -> u64 {
        self.journeys.len() as u64
    }

    /// Size of the whole journey population the forest was built from.
    pub fn absolute_support_base(&self) -> u64 {
        self.absolute_support_base
    }

    /// Number of journeys containing the anchor at least once.
    pub fn relative_support_base(&self) -> u64 {
        self.relative_support_base
    }

    /// How many leading actions equal `anchor`.
    ///
    /// Downstream consumers average this across an anchor's patterns to
    /// detect self-repeating triggers such as churn-prone repeated actions.
    pub fn leading_anchor_run(&self, anchor: ActionId) -> usize {
        self.actions.iter().take_while(|&&a| a == anchor).count()
    }

    /// Resolve interned ids into a serializable record.
    pub fn resolve(&self, interner: &ActionInterner) -> PatternRecord {
        PatternRecord {
            actions: self
                .actions
                .iter()
                .map(|&a| interner.resolve(a).to_string())
                .collect(),
            support: self.support(),
            absolute_support_base: self.absolute_support_base,
            relative_support_base: self.relative_support_base,
            journeys: self.journeys.iter().map(|j| j.raw()).collect(),
        }
    }
}

// Pattern identity is (actions, journeys); the bases are derived metadata.
impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.actions == other.actions && self.journeys == other.journeys
    }
}

impl Eq for Pattern {}

impl std::hash::Hash for Pattern {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.actions.hash(state);
        self.journeys.hash(state);
    }
}

/// Wire form of a mined pattern with labels resolved to strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    pub actions: Vec<String>,
    pub support: u64,
    pub absolute_support_base: u64,
    pub relative_support_base: u64,
    pub journeys: Vec<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(interner: &ActionInterner, labels: &[&str], journeys: &[i64]) -> Pattern {
        Pattern::new(
            labels.iter().map(|l| interner.get_or_intern(l)).collect(),
            journeys.iter().map(|&j| JourneyId::new(j)).collect(),
            10,
            4,
        )
    }

    #[test]
    fn test_equality_ignores_bases() {
        let interner = ActionInterner::new();
        let a = pattern(&interner, &["x", "y"], &[1, 2]);
        let mut b = pattern(&interner, &["x", "y"], &[2, 1]);
        b.absolute_support_base = 99;
        assert_eq!(a, b);

        let c = pattern(&interner, &["x", "y"], &[1, 3]);
        assert_ne!(a, c);
    }

    #[test]
    fn test_leading_anchor_run() {
        let interner = ActionInterner::new();
        let x = interner.get_or_intern("x");
        let p = pattern(&interner, &["x", "x", "y", "x"], &[1]);
        assert_eq!(p.leading_anchor_run(x), 2);

        let q = pattern(&interner, &["y", "x"], &[1]);
        assert_eq!(q.leading_anchor_run(x), 0);
    }

    #[test]
    fn test_record_serialization_shape() {
        let interner = ActionInterner::new();
        let p = pattern(&interner, &["login", "browse"], &[3, 1]);
        let record = p.resolve(&interner);
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["actions"], serde_json::json!(["login", "browse"]));
        assert_eq!(json["support"], 2);
        assert_eq!(json["absolute_support_base"], 10);
        assert_eq!(json["relative_support_base"], 4);
        // Journey ids serialize in ascending order.
        assert_eq!(json["journeys"], serde_json::json!([1, 3]));
    }
}
