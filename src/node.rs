//! Node identity and the child-sequence view.

use std::fmt;
use std::iter::FusedIterator;

use crate::store::TrieStore;

/// Opaque handle to a node inside a trie store.
///
/// A `NodeId` is an index into the store's slot array, never an address.
/// Any mutating call on the store may move or free the node it names, so
/// ids must be re-resolved after every insert or remove.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the slot index this id refers to.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// Lazy sequence of a node's children, in ascending mapped-element order.
///
/// Follows `first_child` then `next_child` links. A clone continues from the
/// same position; [`Children::new`] restarts from the first child.
pub struct Children<'a, S> {
    store: &'a S,
    next: Option<NodeId>,
}

impl<'a, S: TrieStore> Children<'a, S> {
    /// Creates a view over the children of `node`.
    #[must_use]
    pub fn new(store: &'a S, node: NodeId) -> Self {
        Self {
            store,
            next: store.first_child(node),
        }
    }
}

impl<S> Clone for Children<'_, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            next: self.next,
        }
    }
}

impl<S: TrieStore> Iterator for Children<'_, S> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.next?;
        self.next = self.store.next_child(node);
        Some(node)
    }
}

impl<S: TrieStore> FusedIterator for Children<'_, S> {}

impl<S> fmt::Debug for Children<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Children")
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}
