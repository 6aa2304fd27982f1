//! Path-compressed (patricia) trie store.
//!
//! Edges carry labels of one or more elements. Labels live in an append-only
//! [`Arena`] and are never edited in place: splitting a label yields two
//! views into the same run, and fusing two labels appends a fresh run.
//!
//! Runs left behind by fusion and removal are garbage. Once garbage outweighs
//! the live labels, the arena is rebuilt with only the live runs, so it never
//! holds more than twice the live total after a removal.

use std::fmt;
use std::mem;

use safe_bump::{Arena, Idx};
use slab::Slab;
use smallvec::SmallVec;

use crate::error::{Result, TrieError};
use crate::key::KeyElement;
use crate::node::NodeId;
use crate::store::TrieStore;

/// A run of `len` elements starting at `start` in the label arena.
struct Label<E> {
    start: Idx<E>,
    len: usize,
}

impl<E> Clone for Label<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Label<E> {}

impl<E> Label<E> {
    const EMPTY: Self = Self {
        start: Idx::from_raw(0),
        len: 0,
    };

    const fn split_at(self, at: usize) -> (Self, Self) {
        let head = Self {
            start: self.start,
            len: at,
        };
        let tail = Self {
            start: offset(self.start, at),
            len: self.len - at,
        };
        (head, tail)
    }
}

const fn offset<E>(base: Idx<E>, n: usize) -> Idx<E> {
    Idx::from_raw(base.into_raw() + n)
}

struct PatriciaNode<E, T> {
    parent: Option<NodeId>,
    /// Empty only for the root.
    label: Label<E>,
    /// Sorted by the mapped first element of each child's label.
    children: Vec<NodeId>,
    value: Option<T>,
}

/// Store compressing single-child chains into labelled edges.
///
/// Node allocation goes through a [`Slab`] and aborts on OOM like the std
/// collections; child lists report `TrieError::Allocation`.
pub struct Patricia<E, T> {
    nodes: Slab<PatriciaNode<E, T>>,
    labels: Arena<E>,
    /// Sum of the label lengths of all live nodes.
    live_labels: usize,
    root: NodeId,
}

impl<E: KeyElement, T> Patricia<E, T> {
    #[inline]
    fn node(&self, id: NodeId) -> &PatriciaNode<E, T> {
        &self.nodes[id.index()]
    }

    #[inline]
    fn node_mut(&mut self, id: NodeId) -> &mut PatriciaNode<E, T> {
        &mut self.nodes[id.index()]
    }

    #[inline]
    fn label_at(&self, label: Label<E>, i: usize) -> E {
        debug_assert!(i < label.len);
        *self.labels.get(offset(label.start, i))
    }

    fn label_elements(&self, label: Label<E>) -> impl Iterator<Item = E> + '_ {
        (0..label.len).map(move |i| self.label_at(label, i))
    }

    fn alloc_label(&mut self, elements: &[E]) -> Label<E> {
        debug_assert!(!elements.is_empty());
        self.labels
            .alloc_extend(elements.iter().copied())
            .map_or(Label::EMPTY, |start| Label {
                start,
                len: elements.len(),
            })
    }

    /// Mapped first element of the edge into `node`.
    fn head(&self, node: NodeId) -> usize {
        self.label_at(self.node(node).label, 0).mapped()
    }

    fn search(&self, node: NodeId, c: usize) -> std::result::Result<usize, usize> {
        self.node(node)
            .children
            .binary_search_by_key(&c, |&child| self.head(child))
    }

    /// Length of the common prefix of `label` and `key`.
    fn common_prefix(&self, label: Label<E>, key: &[E]) -> usize {
        key.iter()
            .take(label.len)
            .enumerate()
            .take_while(|&(i, &e)| self.label_at(label, i) == e)
            .count()
    }

    /// Child of `node` whose label starts like `key`, with the shared length.
    fn matching_child(&self, node: NodeId, key: &[E]) -> Option<(NodeId, Label<E>, usize)> {
        let at = self.search(node, key[0].mapped()).ok()?;
        let child = self.node(node).children[at];
        let label = self.node(child).label;
        Some((child, label, self.common_prefix(label, key)))
    }

    fn new_leaf(&mut self, parent: NodeId, elements: &[E]) -> NodeId {
        let label = self.alloc_label(elements);
        self.live_labels += label.len;
        NodeId::new(self.nodes.insert(PatriciaNode {
            parent: Some(parent),
            label,
            children: Vec::new(),
            value: None,
        }))
    }

    /// Merges the only child of `node` into it.
    fn fuse(&mut self, node: NodeId) {
        let only = self.node(node).children[0];
        let joined: SmallVec<[E; 32]> = self
            .label_elements(self.node(node).label)
            .chain(self.label_elements(self.node(only).label))
            .collect();
        let label = self.alloc_label(&joined);
        let absorbed = self.nodes.remove(only.index());
        for &grandchild in &absorbed.children {
            self.node_mut(grandchild).parent = Some(node);
        }
        log::trace!("fused {only:?} into {node:?}, label now {} elements", joined.len());

        let target = self.node_mut(node);
        target.label = label;
        target.children = absorbed.children;
        target.value = absorbed.value;
    }

    /// Rebuilds the label arena once orphaned runs outnumber live elements.
    fn compact_labels(&mut self) {
        let garbage = self.labels.len() - self.live_labels;
        if garbage <= self.live_labels {
            return;
        }
        let old = mem::replace(&mut self.labels, Arena::with_capacity(self.live_labels));
        for (_, node) in &mut self.nodes {
            let label = node.label;
            if label.len == 0 {
                continue;
            }
            let elements = (0..label.len).map(|i| *old.get(offset(label.start, i)));
            node.label = self
                .labels
                .alloc_extend(elements)
                .map_or(Label::EMPTY, |start| Label {
                    start,
                    len: label.len,
                });
        }
        log::debug!(
            "compacted label arena from {} to {} elements",
            old.len(),
            self.labels.len()
        );
    }

    /// Asserts label, ordering and minimality invariants.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        let mut reached = 0;
        let mut stack = vec![self.root];
        while let Some(node) = stack.pop() {
            reached += 1;
            let current = self.node(node);
            if node == self.root {
                assert!(current.parent.is_none());
                assert_eq!(current.label.len, 0, "root carries a label");
            } else {
                assert!(current.label.len > 0, "empty label on {node:?}");
                assert!(
                    current.value.is_some() || current.children.len() >= 2,
                    "{node:?} should have been fused or pruned"
                );
            }
            let mut last = None;
            for &child in &current.children {
                assert_eq!(
                    self.node(child).parent,
                    Some(node),
                    "{child:?} does not point back to {node:?}"
                );
                let head = self.head(child);
                assert!(last.is_none_or(|l| l < head), "children of {node:?} out of order");
                last = Some(head);
                stack.push(child);
            }
        }
        assert_eq!(reached, self.nodes.len(), "nodes unreachable from the root");
        let labelled: usize = self.nodes.iter().map(|(_, n)| n.label.len).sum();
        assert_eq!(labelled, self.live_labels, "live label total drifted");
        assert!(self.labels.len() >= self.live_labels);
    }

    /// Returns the number of elements held by the label arena, including
    /// orphaned runs not yet compacted away.
    #[must_use]
    pub fn label_arena_len(&self) -> usize {
        self.labels.len()
    }
}

impl<E: KeyElement, T> TrieStore for Patricia<E, T> {
    type Elem = E;
    type Value = T;

    fn try_new() -> Result<Self> {
        if E::MAPPED_RANGE == 0 {
            return Err(TrieError::EmptyAlphabet);
        }
        let mut nodes = Slab::new();
        let root = NodeId::new(nodes.insert(PatriciaNode {
            parent: None,
            label: Label::EMPTY,
            children: Vec::new(),
            value: None,
        }));
        Ok(Self {
            nodes,
            labels: Arena::new(),
            live_labels: 0,
            root,
        })
    }

    fn root(&self) -> NodeId {
        self.root
    }

    fn find_child(&self, node: NodeId, key: &[E]) -> Option<(NodeId, usize)> {
        let (child, label, common) = self.matching_child(node, key)?;
        (common == label.len).then_some((child, common))
    }

    fn find_prefix(&self, node: NodeId, key: &[E]) -> Option<(NodeId, usize)> {
        let (child, label, common) = self.matching_child(node, key)?;
        (common == label.len || common == key.len()).then_some((child, common))
    }

    fn make_child(&mut self, node: NodeId, key: &[E]) -> Result<(NodeId, usize)> {
        debug_assert!(!key.is_empty());
        self.node_mut(node).children.try_reserve(1)?;

        let Some((child, label, common)) = self.matching_child(node, key) else {
            let at = self.search(node, key[0].mapped()).unwrap_or_else(|at| at);
            let leaf = self.new_leaf(node, key);
            self.node_mut(node).children.insert(at, leaf);
            return Ok((leaf, key.len()));
        };
        if common == label.len {
            return Ok((child, common));
        }

        let mut children = Vec::new();
        children.try_reserve_exact(2)?;
        children.push(child);

        let (head, tail) = label.split_at(common);
        let at = self.search(node, key[0].mapped()).unwrap_or_else(|at| at);
        let mid = NodeId::new(self.nodes.insert(PatriciaNode {
            parent: Some(node),
            label: head,
            children,
            value: None,
        }));
        {
            let moved = self.node_mut(child);
            moved.parent = Some(mid);
            moved.label = tail;
        }
        self.node_mut(node).children[at] = mid;
        log::trace!("split edge into {child:?} after {common} of {} elements", label.len);

        if common == key.len() {
            return Ok((mid, common));
        }
        let rest = &key[common..];
        let tail_head = self.label_at(tail, 0).mapped();
        let leaf = self.new_leaf(mid, rest);
        let siblings = &mut self.node_mut(mid).children;
        if rest[0].mapped() < tail_head {
            siblings.insert(0, leaf);
        } else {
            siblings.push(leaf);
        }
        Ok((leaf, key.len()))
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).children.first().copied()
    }

    fn next_child(&self, node: NodeId) -> Option<NodeId> {
        let parent = self.node(node).parent?;
        let at = self.search(parent, self.head(node)).ok()?;
        self.node(parent).children.get(at + 1).copied()
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.node(node).parent
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        if let Ok(at) = self.search(parent, self.head(child)) {
            debug_assert_eq!(self.node(parent).children[at], child);
            self.node_mut(parent).children.remove(at);
        }
        let removed = self.nodes.remove(child.index());
        debug_assert!(removed.value.is_none() && removed.children.is_empty());
        self.live_labels -= removed.label.len;

        let remaining = self.node(parent);
        if parent != self.root && remaining.value.is_none() && remaining.children.len() == 1 {
            self.fuse(parent);
        }
        self.compact_labels();
    }

    fn value(&self, node: NodeId) -> Option<&T> {
        self.node(node).value.as_ref()
    }

    fn value_slot_mut(&mut self, node: NodeId) -> &mut Option<T> {
        &mut self.node_mut(node).value
    }

    fn take_value(&mut self, node: NodeId) -> Option<T> {
        let value = self.node_mut(node).value.take()?;
        if node != self.root && self.node(node).children.len() == 1 {
            self.fuse(node);
            self.compact_labels();
        }
        Some(value)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl<E, T> fmt::Debug for Patricia<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Patricia")
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}
