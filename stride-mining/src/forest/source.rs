//! Journey source collaborators.
//!
//! Event-to-journey assembly, filtering, ordering, limit/offset, and action
//! exclusion rules all live with the caller; the builder only consumes the
//! resulting snapshot.

use stride_core::errors::BuildError;
use stride_core::types::{EventId, JourneyId};

/// One action occurrence within a journey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JourneyEvent {
    pub event: EventId,
    pub action: String,
}

impl JourneyEvent {
    pub fn new(event: impl Into<EventId>, action: impl Into<String>) -> Self {
        Self {
            event: event.into(),
            action: action.into(),
        }
    }
}

/// Supplies the ordered journey population for one build.
///
/// The builder captures the returned ids once, before any journey is read,
/// and never re-sorts them.
pub trait OrderedJourneySource {
    fn journey_ids(&mut self) -> Result<Vec<JourneyId>, BuildError>;
}

/// Supplies the chronologically ordered actions of a single journey.
pub trait JourneyActions {
    fn actions(&mut self, journey: JourneyId) -> Result<Vec<JourneyEvent>, BuildError>;
}

/// Combined source trait, blanket-implemented for any type providing both.
pub trait JourneySource: OrderedJourneySource + JourneyActions {}

impl<T: OrderedJourneySource + JourneyActions> JourneySource for T {}

/// In-memory journey source for tests and small populations.
#[derive(Debug, Clone, Default)]
pub struct VecJourneySource {
    journeys: Vec<(JourneyId, Vec<JourneyEvent>)>,
    next_event: i64,
}

impl VecJourneySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a journey with the given action labels; event ids are
    /// assigned sequentially across the whole source.
    pub fn push_journey(&mut self, journey: impl Into<JourneyId>, actions: &[&str]) {
        let events = actions
            .iter()
            .map(|action| {
                let event = JourneyEvent::new(self.next_event, *action);
                self.next_event += 1;
                event
            })
            .collect();
        self.journeys.push((journey.into(), events));
    }

    /// Append a journey with explicit events.
    pub fn push_journey_events(
        &mut self,
        journey: impl Into<JourneyId>,
        events: Vec<JourneyEvent>,
    ) {
        self.journeys.push((journey.into(), events));
    }
}

impl OrderedJourneySource for VecJourneySource {
    fn journey_ids(&mut self) -> Result<Vec<JourneyId>, BuildError> {
        Ok(self.journeys.iter().map(|(id, _)| *id).collect())
    }
}

impl JourneyActions for VecJourneySource {
    fn actions(&mut self, journey: JourneyId) -> Result<Vec<JourneyEvent>, BuildError> {
        self.journeys
            .iter()
            .find(|(id, _)| *id == journey)
            .map(|(_, events)| events.clone())
            .ok_or_else(|| BuildError::JourneyRead {
                journey: journey.raw(),
                message: "unknown journey id".to_string(),
            })
    }
}
