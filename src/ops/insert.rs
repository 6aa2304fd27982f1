//! Insertion: walks a key down the trie, creating missing nodes.

use crate::error::Result;
use crate::node::NodeId;
use crate::ops::remove::prune;
use crate::store::TrieStore;

/// Returns the node for `key`, creating every missing node on its path.
///
/// On failure the nodes created by this call are pruned again, so the
/// store holds the same keys and the same node count as before.
pub fn descend_or_create<S: TrieStore>(store: &mut S, key: &[S::Elem]) -> Result<NodeId> {
    let mut node = store.root();
    let mut rest = key;
    while !rest.is_empty() {
        match store.make_child(node, rest) {
            Ok((child, used)) => {
                node = child;
                rest = &rest[used..];
            }
            Err(err) => {
                log::debug!("insert failed after {} of {} elements: {err}", key.len() - rest.len(), key.len());
                prune(store, node);
                return Err(err);
            }
        }
    }
    Ok(node)
}
