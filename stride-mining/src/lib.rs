//! stride-mining: the algorithmic core of Stride.
//!
//! - `trie`: compressed prefix trees over action sequences, one per anchor
//! - `forest`: two-pass construction of per-anchor tries from journeys
//! - `mine`: bottom-up extraction of frequent continuation patterns

pub mod forest;
pub mod mine;
pub mod trie;

pub use forest::{
    Forest, ForestBuilder, JourneyActions, JourneyEvent, JourneySource, OrderedJourneySource,
    VecJourneySource,
};
pub use mine::{Pattern, PatternMiner, PatternRecord, SupportMode};
pub use trie::{NodeId, Trie, TrieNode};
