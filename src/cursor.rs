//! Read-only node cursors.

use std::fmt;

use crate::node::{Children, NodeId};
use crate::ops::get::find_from;
use crate::store::TrieStore;

/// A borrowed view of one node, for walking a trie by hand.
pub struct NodeRef<'a, S> {
    store: &'a S,
    id: NodeId,
}

impl<'a, S: TrieStore> NodeRef<'a, S> {
    pub(crate) const fn new(store: &'a S, id: NodeId) -> Self {
        Self { store, id }
    }

    const fn at(&self, id: NodeId) -> Self {
        Self::new(self.store, id)
    }

    /// Returns the id of this node.
    #[must_use]
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Returns the value held here, if any.
    #[must_use]
    pub fn value(&self) -> Option<&'a S::Value> {
        self.store.value(self.id)
    }

    /// Returns `true` if a key ends at this node.
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value().is_some()
    }

    /// Returns the parent, or `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.store.parent(self.id).map(|id| self.at(id))
    }

    /// Returns the child with the smallest element.
    #[must_use]
    pub fn first_child(&self) -> Option<Self> {
        self.store.first_child(self.id).map(|id| self.at(id))
    }

    /// Returns the next sibling in element order.
    #[must_use]
    pub fn next_child(&self) -> Option<Self> {
        self.store.next_child(self.id).map(|id| self.at(id))
    }

    /// Returns the ids of this node's children in element order.
    #[must_use]
    pub fn children(&self) -> Children<'a, S> {
        Children::new(self.store, self.id)
    }

    /// Descends along `path` from this node.
    ///
    /// An empty path returns this node.
    #[must_use]
    pub fn find(&self, path: &[S::Elem]) -> Option<Self> {
        find_from(self.store, self.id, path).map(|id| self.at(id))
    }
}

impl<S> Clone for NodeRef<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for NodeRef<'_, S> {}

impl<S> PartialEq for NodeRef<'_, S> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.store, other.store) && self.id == other.id
    }
}

impl<S> Eq for NodeRef<'_, S> {}

impl<S> fmt::Debug for NodeRef<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
