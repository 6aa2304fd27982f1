//! Lookup: descends the trie along a key.

use crate::node::NodeId;
use crate::store::TrieStore;

/// Returns the node whose path spells exactly `key`, valued or not.
pub fn find_node<S: TrieStore>(store: &S, key: &[S::Elem]) -> Option<NodeId> {
    find_from(store, store.root(), key)
}

/// Like [`find_node`], but starting below `node` instead of the root.
pub fn find_from<S: TrieStore>(store: &S, mut node: NodeId, key: &[S::Elem]) -> Option<NodeId> {
    let mut rest = key;
    while !rest.is_empty() {
        let (child, used) = store.find_child(node, rest)?;
        node = child;
        rest = &rest[used..];
    }
    Some(node)
}

/// Returns the topmost node whose path starts with `prefix`.
///
/// Every key stored below the returned node (itself included) has `prefix`
/// as a prefix, and no other key does.
pub fn find_prefix<S: TrieStore>(store: &S, prefix: &[S::Elem]) -> Option<NodeId> {
    let mut node = store.root();
    let mut rest = prefix;
    while !rest.is_empty() {
        let (child, used) = store.find_prefix(node, rest)?;
        node = child;
        rest = &rest[used..];
    }
    Some(node)
}
