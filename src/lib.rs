//! Ordered trie maps over interchangeable node stores.
//!
//! A [`Trie`] maps keys made of fixed-width elements (bytes of a `str`,
//! `u16` code units, ...) to values. All trie algorithms are written once,
//! against the [`TrieStore`] contract, and run over any of three backends:
//!
//! - [`DoubleArray`]: every node is a slot in one growable array. A child is
//!   found at `base + element` with a single indexed load; inserting into an
//!   occupied slot relocates the inserting node's children.
//! - [`SortedChildren`]: one heap node per element with a bisected child list.
//! - [`Patricia`]: path-compressed edges whose labels live in an append-only
//!   [`safe_bump::Arena`].
//!
//! # Key properties
//!
//! - **Ordered**: iteration is lexicographic by mapped element
//! - **No silent overwrite**: `insert` keeps an existing value
//! - **Fallible growth**: every growing operation has a `try_` form
//! - **Zero `unsafe`**: enforced by `#![forbid(unsafe_code)]`
//!
//! # Example
//!
//! ```
//! use darray_trie::DoubleArrayTrie;
//!
//! let mut trie: DoubleArrayTrie<String, u32> = DoubleArrayTrie::new();
//! assert!(trie.insert("apple".to_owned(), 1).1);
//! assert!(!trie.insert("apple".to_owned(), 9).1);
//! assert_eq!(trie.get("apple"), Some(&1));
//!
//! *trie.get_or_insert_default("apricot".to_owned()) += 2;
//! trie.insert("banana".to_owned(), 3);
//!
//! let keys: Vec<&str> = trie.prefixed("ap").map(|(k, _)| k.as_str()).collect();
//! assert_eq!(keys, ["apple", "apricot"]);
//! assert_eq!(trie.remove("banana"), Some(3));
//! assert_eq!(trie.len(), 2);
//! ```
//!
//! # References
//!
//! - Aoe, 1989: "An Efficient Digital Search Algorithm by Using a
//!   Double-Array Structure", IEEE Transactions on Software Engineering
//! - Morrison, 1968: "PATRICIA: Practical Algorithm To Retrieve
//!   Information Coded in Alphanumeric"

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod cursor;
pub mod double_array;
pub mod error;
pub mod iter;
pub mod key;
pub mod node;
pub mod patricia;
pub mod sorted;
pub mod store;

mod map;
mod ops;

#[cfg(test)]
mod tests;

pub use cursor::NodeRef;
pub use double_array::{DoubleArray, DoubleArrayConfig};
pub use error::{Result, TrieError};
pub use key::{Key, KeyElement};
pub use map::Trie;
pub use node::{Children, NodeId};
pub use patricia::Patricia;
pub use sorted::SortedChildren;
pub use store::TrieStore;

/// Trie map backed by a [`DoubleArray`].
pub type DoubleArrayTrie<K, V> = Trie<K, V, DoubleArray<<K as Key>::Elem, (K, V)>>;

/// Trie map backed by [`SortedChildren`].
pub type SortedTrie<K, V> = Trie<K, V, SortedChildren<<K as Key>::Elem, (K, V)>>;

/// Trie map backed by a [`Patricia`] store.
pub type PatriciaTrie<K, V> = Trie<K, V, Patricia<<K as Key>::Elem, (K, V)>>;
