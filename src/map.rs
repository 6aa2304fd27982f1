//! Generic trie map over any [`TrieStore`].

use std::borrow::Borrow;
use std::fmt;
use std::marker::PhantomData;
use std::ops;

use crate::cursor::NodeRef;
use crate::error::Result;
use crate::iter::Iter;
use crate::key::Key;
use crate::node::{Children, NodeId};
use crate::ops::get::{find_node, find_prefix};
use crate::ops::insert::descend_or_create;
use crate::ops::remove::remove_node;
use crate::store::TrieStore;

/// Ordered map from element-sequence keys to values.
///
/// Each node of the backing store `S` holds at most one `(key, value)` pair.
/// Iteration visits keys in lexicographic order of their mapped elements.
///
/// Inserting an existing key never overwrites; use
/// [`get_or_insert_default`](Self::get_or_insert_default) or
/// [`get_mut`](Self::get_mut) to replace a value.
pub struct Trie<K, V, S> {
    store: S,
    size: usize,
    _marker: PhantomData<fn() -> (K, V)>,
}

// ---------------------------------------------------------------------------
// Construction & accessors
// ---------------------------------------------------------------------------

impl<K, V, S> Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    /// Creates an empty trie with a default-configured store.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot be created; see [`try_new`](Self::try_new).
    #[must_use]
    pub fn new() -> Self {
        Self::try_new().unwrap_or_else(|err| panic!("failed to create trie store: {err}"))
    }

    /// Creates an empty trie with a default-configured store.
    ///
    /// # Errors
    ///
    /// Fails when the key alphabet is empty or the initial allocation fails.
    pub fn try_new() -> Result<Self> {
        S::try_new().map(Self::with_store)
    }

    /// Wraps an empty, already configured store.
    #[must_use]
    pub fn with_store(store: S) -> Self {
        debug_assert_eq!(store.node_count(), 1, "store must hold only its root");
        Self {
            store,
            size: 0,
            _marker: PhantomData,
        }
    }

    /// Builds a trie from pairs, keeping the first value seen for each key.
    ///
    /// # Errors
    ///
    /// Fails on the first pair that cannot be stored.
    pub fn try_from_pairs<I: IntoIterator<Item = (K, V)>>(pairs: I) -> Result<Self> {
        let mut trie = Self::try_new()?;
        for (key, value) in pairs {
            trie.try_insert(key, value)?;
        }
        Ok(trie)
    }

    /// Returns the backing store.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Returns the number of stored keys.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if no key is stored.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }
}

// ---------------------------------------------------------------------------
// Write operations
// ---------------------------------------------------------------------------

impl<K, V, S> Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    /// Inserts `key` with `value` unless the key is already present.
    ///
    /// Returns the key's node and `true` if the pair was stored, or the
    /// existing node and `false` if the key was present; in that case the
    /// stored value is left untouched and `value` is dropped.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot grow; see [`try_insert`](Self::try_insert).
    pub fn insert(&mut self, key: K, value: V) -> (NodeId, bool) {
        self.try_insert(key, value)
            .unwrap_or_else(|err| panic!("trie insert failed: {err}"))
    }

    /// Fallible [`insert`](Self::insert).
    ///
    /// # Errors
    ///
    /// Fails when the store cannot grow. Nodes created on the way are
    /// removed again, so the trie is unchanged.
    pub fn try_insert(&mut self, key: K, value: V) -> Result<(NodeId, bool)> {
        let node = descend_or_create(&mut self.store, key.elements())?;
        let slot = self.store.value_slot_mut(node);
        if slot.is_some() {
            return Ok((node, false));
        }
        *slot = Some((key, value));
        self.size += 1;
        Ok((node, true))
    }

    /// Returns the value for `key`, inserting `V::default()` first if absent.
    ///
    /// # Panics
    ///
    /// Panics if the store cannot grow.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.try_get_or_insert_default(key)
            .unwrap_or_else(|err| panic!("trie insert failed: {err}"))
    }

    /// Fallible [`get_or_insert_default`](Self::get_or_insert_default).
    ///
    /// # Errors
    ///
    /// Fails when the store cannot grow; the trie is unchanged.
    pub fn try_get_or_insert_default(&mut self, key: K) -> Result<&mut V>
    where
        V: Default,
    {
        let node = descend_or_create(&mut self.store, key.elements())?;
        let slot = self.store.value_slot_mut(node);
        if slot.is_none() {
            self.size += 1;
        }
        let (_, value) = slot.get_or_insert_with(|| (key, V::default()));
        Ok(value)
    }

    /// Removes `key`, returning its value.
    ///
    /// Nodes left without a value and without children are detached, up to
    /// but never including the root. Removing an absent key is a no-op.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        let node = find_node(&self.store, key.elements())?;
        let (_, value) = remove_node(&mut self.store, node)?;
        self.size -= 1;
        Some(value)
    }

    /// Returns a mutable reference to the value for `key`.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        let node = find_node(&self.store, key.elements())?;
        self.store
            .value_slot_mut(node)
            .as_mut()
            .map(|(_, value)| value)
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

impl<K, V, S> Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    /// Returns the node holding `key`, or `None` if the key is not stored.
    #[must_use]
    pub fn find<Q>(&self, key: &Q) -> Option<NodeId>
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        find_node(&self.store, key.elements()).filter(|&node| self.store.value(node).is_some())
    }

    /// Returns a reference to the value for `key`.
    #[must_use]
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        self.get_key_value(key).map(|(_, value)| value)
    }

    /// Returns the stored key and value for `key`.
    #[must_use]
    pub fn get_key_value<Q>(&self, key: &Q) -> Option<(&K, &V)>
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        let node = find_node(&self.store, key.elements())?;
        self.entry_at(node)
    }

    /// Returns `true` if `key` is stored.
    #[must_use]
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns the pair stored at `node`, if it holds one.
    ///
    /// `node` must come from this trie and must not have been invalidated by
    /// a later insert or remove.
    #[must_use]
    pub fn entry_at(&self, node: NodeId) -> Option<(&K, &V)> {
        self.store.value(node).map(|(key, value)| (key, value))
    }

    /// Returns an iterator over all pairs in key order.
    #[must_use]
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        let root = self.store.root();
        Iter::new(&self.store, Some(root), root)
    }

    /// Continues key-order iteration from `node`, itself included.
    #[must_use]
    pub fn iter_from(&self, node: NodeId) -> Iter<'_, K, V, S> {
        Iter::new(&self.store, Some(node), self.store.root())
    }

    /// Returns an iterator over the pairs whose key starts with `prefix`.
    #[must_use]
    pub fn prefixed<Q>(&self, prefix: &Q) -> Iter<'_, K, V, S>
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        let top = find_prefix(&self.store, prefix.elements());
        Iter::new(&self.store, top, top.unwrap_or_else(|| self.store.root()))
    }

    /// Returns a cursor at the root node.
    #[must_use]
    pub fn root(&self) -> NodeRef<'_, S> {
        NodeRef::new(&self.store, self.store.root())
    }

    /// Returns a cursor at `node`.
    #[must_use]
    pub const fn node(&self, node: NodeId) -> NodeRef<'_, S> {
        NodeRef::new(&self.store, node)
    }

    /// Returns a cursor at the node whose path spells `key`, valued or not.
    ///
    /// Returns `None` if no node ends exactly there, which for path-compressed
    /// stores includes a `key` ending inside an edge.
    #[must_use]
    pub fn subtrie<Q>(&self, key: &Q) -> Option<NodeRef<'_, S>>
    where
        K: Borrow<Q>,
        Q: Key<Elem = K::Elem> + ?Sized,
    {
        find_node(&self.store, key.elements()).map(|node| NodeRef::new(&self.store, node))
    }

    /// Returns the children of `node` in key order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> Children<'_, S> {
        Children::new(&self.store, node)
    }
}

// ---------------------------------------------------------------------------
// Trait impls
// ---------------------------------------------------------------------------

impl<K, V, S> Default for Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> fmt::Debug for Trie<K, V, S>
where
    K: Key + fmt::Debug,
    V: fmt::Debug,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S, T> PartialEq<Trie<K, V, T>> for Trie<K, V, S>
where
    K: Key + PartialEq,
    V: PartialEq,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
    T: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    fn eq(&self, other: &Trie<K, V, T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K, V, S> Eq for Trie<K, V, S>
where
    K: Key + Eq,
    V: Eq,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
}

impl<K, V, S> Extend<(K, V)> for Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut trie = Self::new();
        trie.extend(iter);
        trie
    }
}

impl<K, V, S, const N: usize> From<[(K, V); N]> for Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    fn from(pairs: [(K, V); N]) -> Self {
        Self::from_iter(pairs)
    }
}

impl<K, V, S, Q> ops::Index<&Q> for Trie<K, V, S>
where
    K: Key + Borrow<Q>,
    Q: Key<Elem = K::Elem> + ?Sized,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not found")
    }
}

impl<'a, K, V, S> IntoIterator for &'a Trie<K, V, S>
where
    K: Key,
    S: TrieStore<Elem = K::Elem, Value = (K, V)>,
{
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Iter<'a, K, V, S> {
        self.iter()
    }
}
