//! Backend-independent trie algorithms, written against [`TrieStore`](crate::store::TrieStore).

pub mod get;
pub mod insert;
pub mod remove;
