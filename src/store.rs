//! Storage abstraction for trie operations.

use crate::error::Result;
use crate::key::KeyElement;
use crate::node::NodeId;

/// Node contract shared by every trie backend.
///
/// The generic [`Trie`](crate::Trie) container, its iterator and its
/// cursors are written against this trait only. A store owns every node;
/// callers address nodes through [`NodeId`]s handed out by the store.
///
/// Navigation methods take the remaining key as a slice so that backends
/// with multi-element edges can consume more than one element per step.
/// They return the child together with the number of elements consumed,
/// which is always at least one. Passing an empty key is a contract
/// violation.
pub trait TrieStore: Sized {
    /// Key element type.
    type Elem: KeyElement;
    /// Payload held in a node's value slot.
    type Value;

    /// Creates an empty store holding only the root node.
    ///
    /// # Errors
    ///
    /// Returns [`TrieError::EmptyAlphabet`](crate::TrieError::EmptyAlphabet)
    /// when `Elem::MAPPED_RANGE` is zero, or an allocation error.
    fn try_new() -> Result<Self>;

    /// Returns the root node. The root is never removed.
    fn root(&self) -> NodeId;

    /// Finds the child of `node` matching the start of `key`.
    fn find_child(&self, node: NodeId, key: &[Self::Elem]) -> Option<(NodeId, usize)>;

    /// Finds the child of `node` matching the start of `key`, or creates it.
    ///
    /// `node` itself keeps its id; every other id obtained before this call
    /// (siblings, descendants) may be stale afterwards.
    ///
    /// # Errors
    ///
    /// Fails when node storage cannot grow. The store is left unchanged.
    fn make_child(&mut self, node: NodeId, key: &[Self::Elem]) -> Result<(NodeId, usize)>;

    /// Like [`find_child`](Self::find_child), but also accepts a `key` that
    /// ends inside a multi-element edge, returning the node below that edge.
    fn find_prefix(&self, node: NodeId, key: &[Self::Elem]) -> Option<(NodeId, usize)> {
        self.find_child(node, key)
    }

    /// Returns the child of `node` with the smallest mapped element.
    fn first_child(&self, node: NodeId) -> Option<NodeId>;

    /// Returns the next sibling of `node` in mapped-element order.
    fn next_child(&self, node: NodeId) -> Option<NodeId>;

    /// Returns the parent of `node`, or `None` for the root.
    fn parent(&self, node: NodeId) -> Option<NodeId>;

    /// Detaches `child` from `parent` and reclaims its storage.
    ///
    /// `child` must hold no value and have no children.
    fn remove_child(&mut self, parent: NodeId, child: NodeId);

    /// Returns the value held by `node`, if any.
    fn value(&self, node: NodeId) -> Option<&Self::Value>;

    /// Returns the value slot of `node` for filling or replacing.
    fn value_slot_mut(&mut self, node: NodeId) -> &mut Option<Self::Value>;

    /// Takes the value out of `node`.
    ///
    /// Backends that merge nodes may restructure around `node` here; `node`
    /// stays valid, other ids may not.
    fn take_value(&mut self, node: NodeId) -> Option<Self::Value> {
        self.value_slot_mut(node).take()
    }

    /// Returns the number of live nodes, root included.
    fn node_count(&self) -> usize;
}
