//! Iterator types for trie maps.

use std::fmt;
use std::iter::FusedIterator;
use std::marker::PhantomData;

use crate::node::NodeId;
use crate::store::TrieStore;

/// Iterator over references to key-value pairs of a [`Trie`](crate::Trie),
/// in key order.
///
/// Walks the store in pre-order without allocating: first child if any,
/// otherwise the next sibling of the nearest ancestor that has one. The walk
/// never climbs above its boundary node.
pub struct Iter<'a, K, V, S> {
    store: &'a S,
    next: Option<NodeId>,
    top: NodeId,
    _marker: PhantomData<&'a (K, V)>,
}

impl<'a, K, V, S: TrieStore<Value = (K, V)>> Iter<'a, K, V, S> {
    /// Creates an iterator starting at `start` and confined to the subtree
    /// of `top`. `start` must lie inside that subtree.
    pub(crate) const fn new(store: &'a S, start: Option<NodeId>, top: NodeId) -> Self {
        Self {
            store,
            next: start,
            top,
            _marker: PhantomData,
        }
    }

    fn successor(&self, node: NodeId) -> Option<NodeId> {
        if let Some(child) = self.store.first_child(node) {
            return Some(child);
        }
        let mut cur = node;
        while cur != self.top {
            if let Some(sibling) = self.store.next_child(cur) {
                return Some(sibling);
            }
            cur = self.store.parent(cur)?;
        }
        None
    }
}

impl<'a, K, V, S: TrieStore<Value = (K, V)>> Iterator for Iter<'a, K, V, S> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.next {
            self.next = self.successor(node);
            if let Some((key, value)) = self.store.value(node) {
                return Some((key, value));
            }
        }
        None
    }
}

impl<K, V, S: TrieStore<Value = (K, V)>> FusedIterator for Iter<'_, K, V, S> {}

impl<K, V, S> Clone for Iter<'_, K, V, S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store,
            next: self.next,
            top: self.top,
            _marker: PhantomData,
        }
    }
}

impl<K, V, S> fmt::Debug for Iter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("next", &self.next)
            .field("top", &self.top)
            .finish_non_exhaustive()
    }
}
