//! Double-array sizing knobs.

/// Sizing configuration for a [`DoubleArray`](super::DoubleArray).
///
/// The array always starts with `2 + MAPPED_RANGE` slots (anchor, root and
/// the root's child window). `slack` adds free slots on top of that, and
/// `max_slots` bounds how far growth may go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DoubleArrayConfig {
    /// Extra free slots allocated at construction.
    pub slack: usize,
    /// Upper bound on the slot count, `None` for unbounded.
    pub max_slots: Option<usize>,
}

impl DoubleArrayConfig {
    /// Unbounded array with no slack.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slack: 0,
            max_slots: None,
        }
    }

    /// Sets the number of extra free slots allocated up front.
    #[must_use]
    pub const fn with_slack(mut self, slack: usize) -> Self {
        self.slack = slack;
        self
    }

    /// Caps the slot count; growth past it fails with
    /// [`TrieError::CapacityExhausted`](crate::TrieError::CapacityExhausted).
    #[must_use]
    pub const fn with_max_slots(mut self, max_slots: usize) -> Self {
        self.max_slots = Some(max_slots);
        self
    }
}
