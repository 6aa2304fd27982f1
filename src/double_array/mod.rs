//! Dynamic double-array trie store.
//!
//! Every node lives in one slot of a single growable array. A node's
//! children are found at `base + mapped(c)` and recognised by their parent
//! back-pointer, so descending one element is a single indexed load.
//!
//! Inserting a child whose slot already belongs to another node moves the
//! whole child set of the inserting node to a fresh base (relocation). When
//! no base fits inside the current array, the array grows. Unused slots are
//! threaded on a sorted free ring anchored at slot 0; the root sits at slot 1.

mod config;
mod free_ring;
mod relocate;
mod slot;

use std::fmt;
use std::marker::PhantomData;

pub use config::DoubleArrayConfig;
use slot::{ROOT, SENTINEL, Slot, Used};

use crate::error::{Result, TrieError};
use crate::key::KeyElement;
use crate::node::NodeId;
use crate::store::TrieStore;

/// Double-array store holding values of type `T` keyed by elements `E`.
pub struct DoubleArray<E, T> {
    slots: Vec<Slot<T>>,
    /// Used slots, root included.
    used: usize,
    config: DoubleArrayConfig,
    _elem: PhantomData<fn() -> E>,
}

impl<E: KeyElement, T> DoubleArray<E, T> {
    /// Creates an empty store sized by `config`.
    ///
    /// # Errors
    ///
    /// [`TrieError::EmptyAlphabet`] when `E::MAPPED_RANGE` is zero,
    /// [`TrieError::CapacityExhausted`] when the initial size already exceeds
    /// `config.max_slots`, or an allocation error.
    pub fn with_config(config: DoubleArrayConfig) -> Result<Self> {
        let window = E::MAPPED_RANGE;
        if window == 0 {
            return Err(TrieError::EmptyAlphabet);
        }
        let initial = window.saturating_add(ROOT + 1).saturating_add(config.slack);
        if let Some(limit) = config.max_slots
            && initial > limit
        {
            return Err(TrieError::CapacityExhausted {
                requested: initial,
                limit,
            });
        }

        let mut slots = Vec::new();
        slots.try_reserve_exact(initial)?;
        slots.push(Slot::Free {
            next: SENTINEL,
            prev: SENTINEL,
        });

        let mut array = Self {
            slots,
            used: 0,
            config,
            _elem: PhantomData,
        };
        array.append_free(initial - 1);
        array.claim(ROOT, Used::leaf(SENTINEL, ROOT + 1));
        Ok(array)
    }

    /// Returns the configuration the store was built with.
    #[must_use]
    pub const fn config(&self) -> DoubleArrayConfig {
        self.config
    }

    /// Returns the current number of slots, free or used.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots on the free ring.
    #[must_use]
    pub const fn free_slots(&self) -> usize {
        self.slots.len() - 1 - self.used
    }

    fn used(&self, pos: usize) -> &Used<T> {
        match &self.slots[pos] {
            Slot::Used(used) => used,
            Slot::Free { .. } => panic!("stale node id: slot {pos} is free"),
        }
    }

    fn used_mut(&mut self, pos: usize) -> &mut Used<T> {
        match &mut self.slots[pos] {
            Slot::Used(used) => used,
            Slot::Free { .. } => panic!("stale node id: slot {pos} is free"),
        }
    }

    #[inline]
    fn mapped_head(key: &[E]) -> usize {
        debug_assert!(!key.is_empty(), "descending with an empty key");
        let c = key[0].mapped();
        debug_assert!(c < E::MAPPED_RANGE);
        c
    }

    /// Asserts every array and free-ring invariant.
    #[cfg(test)]
    pub(crate) fn validate(&self) {
        use crate::node::Children;

        let len = self.slots.len();
        let window = E::MAPPED_RANGE;

        let mut on_ring = vec![false; len];
        let mut prev = SENTINEL;
        for pos in self.free_ring() {
            assert!(!on_ring[pos], "slot {pos} appears twice on the free ring");
            assert!(pos > prev, "free ring out of order at slot {pos}");
            assert_eq!(self.prev_free(pos), prev, "broken back link at slot {pos}");
            on_ring[pos] = true;
            prev = pos;
        }
        assert_eq!(self.prev_free(SENTINEL), prev, "ring tail mismatch");

        let used = (1..len).filter(|&pos| !on_ring[pos]).count();
        for pos in (1..len).filter(|&pos| !on_ring[pos]) {
            assert!(!self.slots[pos].is_free(), "free slot {pos} is off the ring");
        }
        assert_eq!(used, self.used, "used slot counter drifted");

        let mut reached = 0;
        let mut stack = vec![ROOT];
        while let Some(node) = stack.pop() {
            reached += 1;
            let base = self.used(node).base;
            assert!(base > ROOT, "slot {node} has base {base}");
            assert!(base + window <= len, "child window of slot {node} out of bounds");
            let mut last = None;
            for child in Children::new(self, NodeId::new(node)) {
                let pos = child.index();
                assert!(
                    pos >= base && pos - base < window,
                    "slot {pos} outside the window of slot {node}"
                );
                assert!(
                    self.slots[pos].is_child_of(node),
                    "slot {pos} does not point back to slot {node}"
                );
                let c = pos - base;
                assert!(
                    last.is_none_or(|l| l < c),
                    "children of slot {node} out of order"
                );
                last = Some(c);
                stack.push(pos);
            }
        }
        assert_eq!(reached, self.used, "used slots unreachable from the root");
    }
}

impl<E: KeyElement, T> TrieStore for DoubleArray<E, T> {
    type Elem = E;
    type Value = T;

    fn try_new() -> Result<Self> {
        Self::with_config(DoubleArrayConfig::default())
    }

    fn root(&self) -> NodeId {
        NodeId::new(ROOT)
    }

    fn find_child(&self, node: NodeId, key: &[E]) -> Option<(NodeId, usize)> {
        let parent = node.index();
        let pos = self.used(parent).base + Self::mapped_head(key);
        self.slots[pos]
            .is_child_of(parent)
            .then_some((NodeId::new(pos), 1))
    }

    fn make_child(&mut self, node: NodeId, key: &[E]) -> Result<(NodeId, usize)> {
        let parent = node.index();
        let c = Self::mapped_head(key);
        let pos = self.used(parent).base + c;

        if self.slots[pos].is_child_of(parent) {
            return Ok((NodeId::new(pos), 1));
        }
        if self.slots[pos].is_free() {
            return Ok((NodeId::new(self.attach_child(parent, c)), 1));
        }

        let base = self.find_base(parent, c)?;
        self.relocate(parent, base);
        Ok((NodeId::new(self.attach_child(parent, c)), 1))
    }

    fn first_child(&self, node: NodeId) -> Option<NodeId> {
        let used = self.used(node.index());
        used.first_child.map(|c| NodeId::new(used.base + c))
    }

    fn next_child(&self, node: NodeId) -> Option<NodeId> {
        let pos = node.index();
        let offset = self.used(pos).next;
        (offset != 0).then_some(NodeId::new(pos + offset))
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        let pos = node.index();
        if pos == ROOT {
            return None;
        }
        Some(NodeId::new(self.used(pos).parent))
    }

    fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let (parent, pos) = (parent.index(), child.index());
        debug_assert!(self.slots[pos].is_child_of(parent));
        debug_assert_ne!(pos, ROOT);

        let (base, first) = {
            let used = self.used(parent);
            (used.base, used.first_child)
        };
        let c = pos - base;
        let after = {
            let used = self.used(pos);
            debug_assert!(used.value.is_none() && used.first_child.is_none());
            used.next
        };

        if first == Some(c) {
            self.used_mut(parent).first_child = (after != 0).then_some(c + after);
        } else {
            let mut cur = first;
            while let Some(sibling) = cur {
                let offset = self.used(base + sibling).next;
                if offset != 0 && sibling + offset == c {
                    self.used_mut(base + sibling).next = if after == 0 { 0 } else { offset + after };
                    break;
                }
                cur = (offset != 0).then_some(sibling + offset);
            }
        }
        self.release(pos, SENTINEL);
    }

    fn value(&self, node: NodeId) -> Option<&T> {
        self.used(node.index()).value.as_ref()
    }

    fn value_slot_mut(&mut self, node: NodeId) -> &mut Option<T> {
        &mut self.used_mut(node.index()).value
    }

    fn node_count(&self) -> usize {
        self.used
    }
}

impl<E, T> fmt::Debug for DoubleArray<E, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DoubleArray")
            .field("capacity", &self.slots.len())
            .field("nodes", &self.used)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
