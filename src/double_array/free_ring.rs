//! Free-ring bookkeeping: claiming, releasing and growing slots.
//!
//! Free slots form a circular doubly-linked ring through [`SENTINEL`],
//! kept sorted by position so that base searches find the lowest window
//! first and can stop once a window would run past the end of the array.

use std::iter::FusedIterator;

use super::DoubleArray;
use super::slot::{SENTINEL, Slot, Used};
use crate::error::{Result, TrieError};
use crate::key::KeyElement;

impl<E: KeyElement, T> DoubleArray<E, T> {
    fn free_links(&self, pos: usize) -> (usize, usize) {
        match self.slots[pos] {
            Slot::Free { next, prev } => (next, prev),
            Slot::Used(_) => unreachable!("slot {pos} is not on the free ring"),
        }
    }

    #[inline]
    pub(super) fn next_free(&self, pos: usize) -> usize {
        self.free_links(pos).0
    }

    #[inline]
    pub(super) fn prev_free(&self, pos: usize) -> usize {
        self.free_links(pos).1
    }

    fn set_next_free(&mut self, pos: usize, to: usize) {
        match &mut self.slots[pos] {
            Slot::Free { next, .. } => *next = to,
            Slot::Used(_) => unreachable!("slot {pos} is not on the free ring"),
        }
    }

    fn set_prev_free(&mut self, pos: usize, to: usize) {
        match &mut self.slots[pos] {
            Slot::Free { prev, .. } => *prev = to,
            Slot::Used(_) => unreachable!("slot {pos} is not on the free ring"),
        }
    }

    /// Iterates free positions in ascending order, anchor excluded.
    pub(super) fn free_ring(&self) -> FreeRing<'_, T> {
        FreeRing {
            slots: &self.slots,
            pos: self.next_free(SENTINEL),
        }
    }

    /// Unlinks the free slot at `pos` and stores `node` in it.
    pub(super) fn claim(&mut self, pos: usize, node: Used<T>) {
        debug_assert_ne!(pos, SENTINEL);
        let (next, prev) = self.free_links(pos);
        self.set_next_free(prev, next);
        self.set_prev_free(next, prev);
        self.slots[pos] = Slot::Used(node);
        self.used += 1;
    }

    /// Returns the used slot at `pos` to the ring and hands back its state.
    ///
    /// `hint` is a free position below `pos` to start the ordered search
    /// from, or [`SENTINEL`] to search from the start of the ring.
    pub(super) fn release(&mut self, pos: usize, hint: usize) -> Used<T> {
        debug_assert!(hint < pos);
        let mut next = if hint == SENTINEL {
            self.next_free(SENTINEL)
        } else {
            hint
        };
        while next != SENTINEL && next < pos {
            next = self.next_free(next);
        }
        let prev = self.prev_free(next);

        let old = std::mem::replace(&mut self.slots[pos], Slot::Free { next, prev });
        self.set_next_free(prev, pos);
        self.set_prev_free(next, pos);
        self.used -= 1;

        match old {
            Slot::Used(node) => node,
            Slot::Free { .. } => unreachable!("slot {pos} released twice"),
        }
    }

    /// Appends `extra` free slots at the tail of the array and the ring.
    ///
    /// Storage must already be reserved.
    pub(super) fn append_free(&mut self, extra: usize) {
        if extra == 0 {
            return;
        }
        let start = self.slots.len();
        let end = start + extra - 1;
        let tail = self.prev_free(SENTINEL);

        self.slots.extend((start..=end).map(|pos| Slot::Free {
            next: pos + 1,
            prev: pos - 1,
        }));

        self.set_prev_free(start, tail);
        self.set_next_free(tail, start);
        self.set_next_free(end, SENTINEL);
        self.set_prev_free(SENTINEL, end);
    }

    /// Grows the array so that a full child window fits past the old end.
    ///
    /// Returns the old length, which is a valid base for any child set.
    /// On failure the array is left untouched.
    pub(super) fn grow(&mut self) -> Result<usize> {
        let old_len = self.slots.len();
        let window = E::MAPPED_RANGE;
        let mut extra = old_len.max(window);

        if let Some(limit) = self.config.max_slots {
            let room = limit.saturating_sub(old_len);
            if room < window {
                log::debug!("double array at {old_len} slots cannot fit another window under {limit}");
                return Err(TrieError::CapacityExhausted {
                    requested: old_len + window,
                    limit,
                });
            }
            extra = extra.min(room);
        }

        self.slots.try_reserve_exact(extra)?;
        self.append_free(extra);
        log::debug!("double array grown from {old_len} to {} slots", self.slots.len());
        Ok(old_len)
    }
}

/// Ascending walk over the free ring.
pub struct FreeRing<'a, T> {
    slots: &'a [Slot<T>],
    pos: usize,
}

impl<T> Iterator for FreeRing<'_, T> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.pos == SENTINEL {
            return None;
        }
        let pos = self.pos;
        self.pos = match self.slots[pos] {
            Slot::Free { next, .. } => next,
            Slot::Used(_) => unreachable!("slot {pos} is not on the free ring"),
        };
        Some(pos)
    }
}

impl<T> FusedIterator for FreeRing<'_, T> {}
