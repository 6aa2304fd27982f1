//! Sorted-children trie store.
//!
//! One node per key element. Each node keeps its children as a list of ids
//! sorted by mapped element, searched by bisection.

use std::fmt;
use std::marker::PhantomData;

use slab::Slab;

use crate::error::{Result, TrieError};
use crate::key::KeyElement;
use crate::node::NodeId;
use crate::store::TrieStore;

struct SortedNode<T> {
    parent: Option<NodeId>,
    /// Mapped element on the edge from the parent; 0 for the root.
    mapped: usize,
    children: Vec<NodeId>,
    value: Option<T>,
}

/// Store keeping each node's children in a sorted index list.
///
/// Nodes live in a [`Slab`], so a removed node's slot is reused by the next
/// insert. Node allocation is infallible and aborts on OOM like the std
/// collections; only the child lists report `TrieError::Allocation`.
pub struct SortedChildren<E, T> {
    nodes: Slab<SortedNode<T>>,
    root: NodeId,
    _elem: PhantomData<fn() -> E>,
}

impl<E: KeyElement, T> SortedChildren<E, T> {
    #[inline]
    fn node(&self, id: NodeId) -> &SortedNode<T> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut SortedNode<T> {
        &mut self.nodes[id.index()]
    }

    fn search(&self, node: NodeId, c: usize) -> std::result::Result<usize, usize> {
        self.node(node)
            .children
            .binary_search_by_key(&c, |&child| self.node(child).mapped)
    }

    /// Asserts ordering, parent links and the absence of dead nodes.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        let mut reached = 0;
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            reached += 1;
            let current = self.node(node);
            if node != self.root {
                assert!(
                    current.value.is_some() || !current.children.is_empty(),
                    "dead node {node:?} left behind"
                );
            }
            let mut last = None;
            for &child in &current.children {
                let below = self.node(child);
                assert_eq!(below.parent, Some(node), "{child:?} does not point back to {node:?}");
                assert!(below.mapped < E::MAPPED_RANGE);
                assert!(last.is_none_or(|l| l < below.mapped), "children of {node:?} out of order");
                last = Some(below.mapped);
                stack.push(child);
            }
        }
        assert_eq!(reached, self.nodes.len(), "nodes unreachable from the root");
    }
}

impl<E: KeyElement, T> TrieStore for SortedChildren<E, T> {
    type Elem = E;
    type Value = T;

    fn try_new() -> Result<Self> {
        if E::MAPPED_RANGE == 0 {
            return Err(TrieError::EmptyAlphabet);
        }
        let mut nodes = Slab::new();
        let root = NodeId::new(nodes.insert(SortedNode {
            parent: None,
            mapped: 0,
            children: Vec::new(),
            value: None,
        }));
        Ok(Self {
            nodes,
            root,
            _elem: PhantomData,
        })
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn find_child(&self, node: NodeId, key: &[E]) -> Option<(NodeId, usize)> {
        let at = self.search(node, key[0].mapped()).ok()?;
        Some((self.node(node).children[at], 1))
    }

    fn make_child(&mut self, node: NodeId, key: &[E]) -> Result<(NodeId, usize)> {
        let c = key[0].mapped();
        let at = match self.search(node, c) {
            Ok(at) => return Ok((self.node(node).children[at], 1)),
            Err(at) => at,
        };
        self.node_mut(node).children.try_reserve(1)?;
        let child = NodeId::new(self.nodes.insert(SortedNode {
            parent: Some(node),
            mapped: c,
            children: Vec::new(),
            value: None,
        }));
        self.node_mut(node).children.insert(at, child);
        Ok((child, 1))
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.first().copied()
    }

    fn next_child(&self, node: NodeId) -> Option<NodeId> {
        let current = self.node(node);
        let parent = current.parent?;
        let at = self.search(parent, current.mapped).ok()?;
        self.node(parent).children.get(at + 1).copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let c = self.node(child).mapped;
        if let Ok(at) = self.search(parent, c) {
            debug_assert_eq!(self.node(parent).children[at], child);
            self.node_mut(parent).children.remove(at);
        }
        let removed = self.nodes.remove(child.index());
        debug_assert!(removed.value.is_none() && removed.children.is_empty());
    }

    fn value(&self, node: NodeId) -> Option<&T> {
        self.node(node).value.as_ref()
    }

    fn value_slot_mut(&mut self, node: NodeId) -> &mut Option<T> {
        &mut self.node_mut(node).value
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<E, T> fmt::Debug for SortedChildren<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SortedChildren")
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
