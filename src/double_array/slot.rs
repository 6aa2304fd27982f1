//! Slot layout of the double array.

/// Position of the free-ring anchor. Never claimed.
pub const SENTINEL: usize = 0;

/// Position of the root node. Never released or relocated.
pub const ROOT: usize = 1;

/// One cell of the double array: either threaded on the free ring or a node.
pub enum Slot<T> {
    /// Unused cell, linked into the circular free ring by position.
    Free {
        /// Next free position (or [`SENTINEL`]).
        next: usize,
        /// Previous free position (or [`SENTINEL`]).
        prev: usize,
    },
    /// Cell holding a trie node.
    Used(Used<T>),
}

/// Node state of a used slot.
///
/// Children of the node live at `base + mapped(c)`. Siblings are chained by
/// relative offsets so that moving a whole child window keeps the chain
/// intact.
pub struct Used<T> {
    /// Position of the parent node; [`SENTINEL`] for the root.
    pub parent: usize,
    /// Base index children are addressed from.
    pub base: usize,
    /// Mapped element of the first child, if any.
    pub first_child: Option<usize>,
    /// Offset from this slot to the next sibling; 0 when last.
    pub next: usize,
    /// Stored payload.
    pub value: Option<T>,
}

impl<T> Used<T> {
    /// A childless, valueless node under `parent`, sharing its base.
    pub const fn leaf(parent: usize, base: usize) -> Self {
        Self {
            parent,
            base,
            first_child: None,
            next: 0,
            value: None,
        }
    }
}

impl<T> Slot<T> {
    #[inline]
    pub const fn is_free(&self) -> bool {
        matches!(self, Self::Free { .. })
    }

    /// Returns `true` if this slot is a node whose parent sits at `parent`.
    #[inline]
    pub const fn is_child_of(&self, parent: usize) -> bool {
        match self {
            Self::Used(used) => used.parent == parent,
            Self::Free { .. } => false,
        }
    }
}
