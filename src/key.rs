//! Key traits: how key elements map onto array offsets.

use std::fmt;

/// A fixed-width code unit that keys are made of.
///
/// `mapped` must be pure and return a value in `[0, MAPPED_RANGE)`. The
/// double array lays out one slot per mapped value below every base index,
/// so `MAPPED_RANGE` is the width of a node's child window.
pub trait KeyElement: Copy + Eq + fmt::Debug {
    /// Number of distinct mapped codes.
    const MAPPED_RANGE: usize;

    /// Returns the mapped code of this element.
    fn mapped(self) -> usize;
}

impl KeyElement for u8 {
    const MAPPED_RANGE: usize = 1 << u8::BITS;

    #[inline]
    fn mapped(self) -> usize {
        usize::from(self)
    }
}

impl KeyElement for u16 {
    const MAPPED_RANGE: usize = 1 << u16::BITS;

    #[inline]
    fn mapped(self) -> usize {
        usize::from(self)
    }
}

/// A key viewed as a sequence of elements.
pub trait Key {
    /// Element type of the sequence.
    type Elem: KeyElement;

    /// Returns the elements of the key, in order.
    fn elements(&self) -> &[Self::Elem];
}

impl Key for str {
    type Elem = u8;

    fn elements(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Key for String {
    type Elem = u8;

    fn elements(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl Key for [u8] {
    type Elem = u8;

    fn elements(&self) -> &[u8] {
        self
    }
}

impl Key for Vec<u8> {
    type Elem = u8;

    fn elements(&self) -> &[u8] {
        self
    }
}

impl Key for [u16] {
    type Elem = u16;

    fn elements(&self) -> &[u16] {
        self
    }
}

impl Key for Vec<u16> {
    type Elem = u16;

    fn elements(&self) -> &[u16] {
        self
    }
}
