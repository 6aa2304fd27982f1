mod basic;
mod equivalence;
mod patricia;

use crate::{DoubleArray, KeyElement, Patricia, SortedChildren};

/// Full structural check of a store, run by tests after mutations.
pub trait Validate {
    fn validate_all(&self);
}

impl<E: KeyElement, T> Validate for DoubleArray<E, T> {
    fn validate_all(&self) {
        self.validate();
    }
}

impl<E: KeyElement, T> Validate for SortedChildren<E, T> {
    fn validate_all(&self) {
        self.validate();
    }
}

impl<E: KeyElement, T> Validate for Patricia<E, T> {
    fn validate_all(&self) {
        self.validate();
    }
}

/// Keys of the reference scenario with their values.
pub const SCENARIO: [(&str, i32); 6] = [
    ("test", 8),
    ("etre", 4),
    ("testera", 10),
    ("tester", 20),
    ("tertre", 40),
    ("tertrer", 48),
];

/// The scenario keys in ascending order.
pub const SCENARIO_SORTED: [&str; 6] = ["etre", "tertre", "tertrer", "test", "tester", "testera"];
