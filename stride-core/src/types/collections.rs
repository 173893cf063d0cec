//! Re-exports of performance-oriented collection types.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec optimized for trie edges and child lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;

/// SmallVec optimized for continuation windows (usually <8).
pub type SmallVec8<T> = SmallVec<[T; 8]>;
