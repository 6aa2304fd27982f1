//! Child placement: sorted sibling linking, base search and relocation.

use smallvec::SmallVec;

use super::DoubleArray;
use super::slot::{ROOT, SENTINEL, Used};
use crate::error::Result;
use crate::key::KeyElement;
use crate::node::{Children, NodeId};

/// Mapped elements of one node's children. Most nodes have few.
type ChildSet = SmallVec<[usize; 16]>;

impl<E: KeyElement, T> DoubleArray<E, T> {
    fn child_elements(&self, node: usize) -> ChildSet {
        let base = self.used(node).base;
        Children::new(self, NodeId::new(node))
            .map(|child| child.index() - base)
            .collect()
    }

    /// Claims `base + c` for a new child of `node` and links it into the
    /// sibling chain in ascending element order. The slot must be free.
    pub(super) fn attach_child(&mut self, node: usize, c: usize) -> usize {
        let (base, first) = {
            let used = self.used(node);
            (used.base, used.first_child)
        };
        let pos = base + c;
        debug_assert!(self.slots[pos].is_free());

        let mut prev = None;
        let mut cur = first;
        while let Some(sibling) = cur {
            debug_assert_ne!(sibling, c);
            if sibling > c {
                break;
            }
            prev = Some(sibling);
            let offset = self.used(base + sibling).next;
            cur = (offset != 0).then_some(sibling + offset);
        }

        let next = match prev {
            None => {
                self.used_mut(node).first_child = Some(c);
                first.map_or(0, |f| f - c)
            }
            Some(p) => {
                let before = self.used_mut(base + p);
                let next = if before.next == 0 {
                    0
                } else {
                    p + before.next - c
                };
                before.next = c - p;
                next
            }
        };

        let mut child = Used::leaf(node, base);
        child.next = next;
        self.claim(pos, child);
        pos
    }

    /// Finds a base at which every current child of `node`, plus a new child
    /// `c`, lands on a free slot. Grows the array when no such base exists.
    pub(super) fn find_base(&mut self, node: usize, c: usize) -> Result<usize> {
        let existing = self.child_elements(node);
        let window = E::MAPPED_RANGE;
        let len = self.slots.len();

        for free in self.free_ring() {
            if free <= ROOT + c {
                continue;
            }
            let candidate = free - c;
            if candidate + window > len {
                // The ring is sorted, later candidates only move further out.
                break;
            }
            if existing
                .iter()
                .all(|&ci| self.slots[candidate + ci].is_free())
            {
                return Ok(candidate);
            }
        }
        self.grow()
    }

    /// Moves every child of `node` to `new_base`, keeping their state and
    /// re-parenting their own children.
    pub(super) fn relocate(&mut self, node: usize, new_base: usize) {
        let old_base = self.used(node).base;
        let moved = self.child_elements(node);
        log::trace!(
            "relocating {} children of slot {node} from base {old_base} to {new_base}",
            moved.len()
        );

        let mut hint = SENTINEL;
        for c in moved {
            let from = old_base + c;
            let to = new_base + c;
            let grandchildren: SmallVec<[NodeId; 16]> =
                Children::new(&*self, NodeId::new(from)).collect();
            for grandchild in grandchildren {
                self.used_mut(grandchild.index()).parent = to;
            }
            let state = self.release(from, hint);
            self.claim(to, state);
            hint = from;
        }
        self.used_mut(node).base = new_base;
    }
}
