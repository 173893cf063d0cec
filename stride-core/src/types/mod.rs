//! Data structures and string interning for Stride.
//! FxHashMap, SmallVec, lasso-based interning, newtype ID types.

pub mod category;
pub mod collections;
pub mod identifiers;
pub mod interning;

pub use category::ForestCategory;
pub use collections::{FxHashMap, FxHashSet};
pub use identifiers::{ActionId, EventId, JourneyId, TrieId};
pub use interning::ActionInterner;
