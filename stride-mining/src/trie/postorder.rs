//! Post-order traversal over trie nodes.

use super::{NodeId, Trie};

/// Lazy post-order iterator over all non-root nodes.
///
/// Every descendant is yielded before its ancestors, which is the visit
/// order the miner's roll-up depends on. Finite and non-restartable.
pub struct Postorder<'a> {
    trie: &'a Trie,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> Postorder<'a> {
    pub(crate) fn new(trie: &'a Trie) -> Self {
        Self {
            trie,
            stack: vec![(NodeId::ROOT, 0)],
        }
    }
}

impl Iterator for Postorder<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        while let Some(&(id, cursor)) = self.stack.last() {
            let children = self.trie.node(id).children();
            if cursor < children.len() {
                if let Some(top) = self.stack.last_mut() {
                    top.1 += 1;
                }
                self.stack.push((children[cursor], 0));
            } else {
                self.stack.pop();
                if id != NodeId::ROOT {
                    return Some(id);
                }
            }
        }
        None
    }
}
