//! Search nodes and the arena that owns them.

use crate::catalogue::{MovieId, PersonId};

/// Position of a [`SearchNode`] inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn from_raw(index: usize) -> Self {
        Self(index)
    }
}

/// A person reached during a search, with the movie and node they were
/// reached from. The root node has neither.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchNode {
    pub person: PersonId,
    pub via: Option<MovieId>,
    pub parent: Option<NodeIndex>,
}

impl SearchNode {
    pub fn root(person: PersonId) -> Self {
        Self {
            person,
            via: None,
            parent: None,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Append-only node storage. Nodes are never moved or changed once pushed,
/// so a parent index stays valid for the lifetime of the arena.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: SearchNode) -> NodeIndex {
        self.nodes.push(node);
        NodeIndex(self.nodes.len() - 1)
    }

    pub fn get(&self, index: NodeIndex) -> Option<&SearchNode> {
        self.nodes.get(index.0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Test hook for building arenas with broken parent links.
    #[cfg(test)]
    pub(crate) fn set_parent(&mut self, index: NodeIndex, parent: Option<NodeIndex>) {
        self.nodes[index.0].parent = parent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_returns_sequential_indices() {
        let mut arena = NodeArena::new();
        let root = arena.push(SearchNode::root("A".into()));
        let child = arena.push(SearchNode {
            person: "B".into(),
            via: Some("M1".into()),
            parent: Some(root),
        });
        assert_eq!(root.index(), 0);
        assert_eq!(child.index(), 1);
        assert!(arena.get(root).unwrap().is_root());
        assert_eq!(arena.get(child).unwrap().parent, Some(root));
        assert_eq!(arena.len(), 2);
    }
}
