//! Removal: takes a value out and prunes the branch left empty.

use crate::node::NodeId;
use crate::store::TrieStore;

/// Takes the value stored at `node` and prunes the nodes that become dead.
pub fn remove_node<S: TrieStore>(store: &mut S, node: NodeId) -> Option<S::Value> {
    let value = store.take_value(node)?;
    prune(store, node);
    Some(value)
}

/// Detaches `node` and its ancestors for as long as they hold no value and
/// have no children. The root is never detached.
pub fn prune<S: TrieStore>(store: &mut S, mut node: NodeId) {
    while store.value(node).is_none() && store.first_child(node).is_none() {
        let Some(parent) = store.parent(node) else {
            break;
        };
        store.remove_child(parent, node);
        node = parent;
    }
}
