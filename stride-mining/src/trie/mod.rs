//! Compressed prefix tree over action-label sequences.
//!
//! One trie per trigger action. Nodes live in an arena (`Vec<TrieNode>`)
//! indexed by `NodeId`; parent links are plain indexes, so the structure is
//! a strict tree with no cyclic ownership. Branching is on whole symbols,
//! not characters.

pub mod postorder;

pub use postorder::Postorder;

use stride_core::types::collections::{FxHashSet, SmallVec4};
use stride_core::types::{ActionId, ForestCategory, JourneyId};

/// Index of a node in the trie arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// The root node of every trie.
    pub const ROOT: NodeId = NodeId(0);

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// A single node: the compressed edge from its parent plus the journeys
/// whose insertion terminated exactly here.
#[derive(Debug, Clone)]
pub struct TrieNode {
    edge: SmallVec4<ActionId>,
    own_journeys: FxHashSet<JourneyId>,
    parent: Option<NodeId>,
    children: SmallVec4<NodeId>,
}

impl TrieNode {
    fn new(parent: NodeId, edge: SmallVec4<ActionId>) -> Self {
        Self {
            edge,
            own_journeys: FxHashSet::default(),
            parent: Some(parent),
            children: SmallVec4::new(),
        }
    }

    /// The edge label from the parent. Empty only on the root.
    pub fn edge(&self) -> &[ActionId] {
        &self.edge
    }

    /// Journeys whose insertion terminated exactly at this node.
    /// Not a cumulative descendant count.
    pub fn own_journeys(&self) -> &FxHashSet<JourneyId> {
        &self.own_journeys
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child node ids. Sibling edges never share a first symbol.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// A compressed prefix tree holding every continuation recorded for one
/// trigger action.
#[derive(Debug, Clone)]
pub struct Trie {
    anchor: ActionId,
    category: ForestCategory,
    support_base: u64,
    journey_count: u64,
    nodes: Vec<TrieNode>,
}

impl Trie {
    /// Create an empty trie anchored at `anchor`.
    pub fn new(
        anchor: ActionId,
        category: ForestCategory,
        support_base: u64,
        journey_count: u64,
    ) -> Self {
        let root = TrieNode {
            edge: SmallVec4::new(),
            own_journeys: FxHashSet::default(),
            parent: None,
            children: SmallVec4::new(),
        };
        Self {
            anchor,
            category,
            support_base,
            journey_count,
            nodes: vec![root],
        }
    }

    /// The trigger action this trie is rooted under.
    pub fn anchor(&self) -> ActionId {
        self.anchor
    }

    pub fn category(&self) -> &ForestCategory {
        &self.category
    }

    /// Size of the journey population the forest was built from.
    pub fn support_base(&self) -> u64 {
        self.support_base
    }

    /// Distinct journeys containing the anchor at least once.
    pub fn journey_count(&self) -> u64 {
        self.journey_count
    }

    pub fn node(&self, id: NodeId) -> &TrieNode {
        &self.nodes[id.index()]
    }

    pub fn root(&self) -> &TrieNode {
        &self.nodes[0]
    }

    /// Number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if no continuation has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Insert a continuation for `journey`. Empty input is a no-op.
    ///
    /// Descends the trie consuming `symbols`, splitting an existing edge
    /// when the match ends partway through it. A given journey ends up in
    /// `own_journeys` of at most one node per call.
    pub fn insert(&mut self, symbols: &[ActionId], journey: JourneyId) {
        if symbols.is_empty() {
            return;
        }

        let mut current = NodeId::ROOT;
        let mut remaining = symbols;
        loop {
            // At most one child can share a first symbol with `remaining`.
            let matched = self
                .node(current)
                .children
                .iter()
                .copied()
                .find(|&c| self.nodes[c.index()].edge[0] == remaining[0]);

            let Some(child) = matched else {
                let id = self.push_node(current, SmallVec4::from_slice(remaining));
                self.nodes[current.index()].children.push(id);
                self.nodes[id.index()].own_journeys.insert(journey);
                return;
            };

            let shared = common_prefix_len(&self.nodes[child.index()].edge, remaining);
            if shared == self.nodes[child.index()].edge.len() {
                if shared == remaining.len() {
                    self.nodes[child.index()].own_journeys.insert(journey);
                    return;
                }
                current = child;
                remaining = &remaining[shared..];
            } else {
                // Partial overlap: split the child edge at `shared`.
                let mid = self.split_edge(current, child, shared);
                if shared == remaining.len() {
                    self.nodes[mid.index()].own_journeys.insert(journey);
                    return;
                }
                current = mid;
                remaining = &remaining[shared..];
            }
        }
    }

    /// Attach a pre-built child node, used when rehydrating a persisted trie.
    ///
    /// The caller supplies edges that already satisfy the trie invariants:
    /// `edge` is non-empty and does not share a first symbol with any
    /// existing sibling under `parent`.
    pub fn attach_child(
        &mut self,
        parent: NodeId,
        edge: SmallVec4<ActionId>,
        journeys: impl IntoIterator<Item = JourneyId>,
    ) -> NodeId {
        let id = self.push_node(parent, edge);
        self.nodes[parent.index()].children.push(id);
        self.nodes[id.index()].own_journeys.extend(journeys);
        id
    }

    /// Reconstruct the full action path for `node`: the anchor label
    /// followed by every edge from the root down to `node`.
    pub fn path_from(&self, node: NodeId) -> Vec<ActionId> {
        let mut chain: Vec<NodeId> = Vec::new();
        let mut cursor = Some(node);
        while let Some(id) = cursor {
            if id == NodeId::ROOT {
                break;
            }
            chain.push(id);
            cursor = self.nodes[id.index()].parent;
        }

        let mut path = vec![self.anchor];
        for id in chain.iter().rev() {
            path.extend_from_slice(&self.nodes[id.index()].edge);
        }
        path
    }

    /// Walk all non-root nodes, every descendant before its ancestors.
    pub fn postorder(&self) -> Postorder<'_> {
        Postorder::new(self)
    }

    /// Union of `own_journeys` across every node: the exact set of journey
    /// ids ever inserted.
    pub fn journeys(&self) -> FxHashSet<JourneyId> {
        let mut all = FxHashSet::default();
        for node in &self.nodes {
            all.extend(node.own_journeys.iter().copied());
        }
        all
    }

    fn push_node(&mut self, parent: NodeId, edge: SmallVec4<ActionId>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TrieNode::new(parent, edge));
        id
    }

    /// Split `child`'s edge at `at`, interposing a new node under `parent`.
    /// The new node takes the shared prefix; `child` keeps the tail and is
    /// reparented under it, replacing its slot in `parent`'s child list.
    fn split_edge(&mut self, parent: NodeId, child: NodeId, at: usize) -> NodeId {
        let prefix: SmallVec4<ActionId> =
            self.nodes[child.index()].edge[..at].iter().copied().collect();
        let mid = self.push_node(parent, prefix);

        let node = &mut self.nodes[child.index()];
        node.edge.drain(..at);
        node.parent = Some(mid);

        if let Some(slot) = self.nodes[parent.index()]
            .children
            .iter_mut()
            .find(|c| **c == child)
        {
            *slot = mid;
        }
        self.nodes[mid.index()].children.push(child);
        mid
    }
}

fn common_prefix_len(a: &[ActionId], b: &[ActionId]) -> usize {
    a.iter().zip(b).take_while(|(x, y)| x == y).count()
}
