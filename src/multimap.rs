//! A map from keys to collections of values, generic over the value
//! collection flavor.
//!
//! One generic [`Multimap`] implements every flavor; what varies is the
//! [`ValueCollection`] chosen for the `C` parameter. The collection type
//! decides duplicate handling, value ordering and the flavor tag, and the
//! multimap derives everything else: total size tracking, per-key insertion
//! and removal, flattened iteration, and the map-like view.
//!
//! Three flavors are provided as aliases:
//! * [`ListMultimap`] — `Vec` values, duplicates kept in insertion order.
//! * [`SetMultimap`] — hashed values, duplicates rejected.
//! * [`SortedSetMultimap`] — deduplicated values kept sorted by an
//!   [`Ordering`] comparator.
//!
//! # Invariants
//! * No key ever maps to an empty collection: removing the last value for a
//!   key removes the key itself.
//! * `len()` always equals the sum of the per-key collection sizes.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::iter::{self, FromIterator};
use std::ops::{Deref, DerefMut};

// 'fnv' for fast hashing on small keys, 'ordermap' for the key-insertion-
// ordered backing map (its `remove` preserves the order of remaining keys)
use fnv::FnvBuildHasher;
use ordermap::OrderMap;

use crate::ordering::{Natural, Ordering};

/// Hashed value collection used by [`SetMultimap`].
pub type FnvHashSet<V> = hashbrown::HashSet<V, FnvBuildHasher>;

/// A multimap whose values form insertion-ordered lists.
pub type ListMultimap<K, V> = Multimap<K, Vec<V>>;

/// A multimap whose values form hashed sets.
pub type SetMultimap<K, V> = Multimap<K, FnvHashSet<V>>;

/// A multimap whose values form sets sorted by a comparator.
pub type SortedSetMultimap<K, V, O = Natural> = Multimap<K, SortedValues<V, O>>;

/// The flavor of a value collection, determining its duplicate and
/// ordering semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    /// Duplicates allowed, insertion order significant.
    List,
    /// Duplicates rejected, iteration order incidental.
    Set,
    /// Duplicates rejected, values iterated in comparator order.
    SortedSet,
}

impl ValueKind {
    /// Whether this flavor keeps duplicate values. Flavors that disagree
    /// here have incomparable per-key semantics: multimaps of such flavors
    /// only ever compare equal when both are empty.
    pub fn allows_duplicates(self) -> bool {
        matches!(self, ValueKind::List)
    }
}

/// The per-key collection strategy of a [`Multimap`].
///
/// Implementing this for a collection type is all it takes to define a new
/// multimap flavor; the multimap itself never needs to know which flavor it
/// holds. The [`ValueCollection::create`] hook makes the fresh-collection
/// choice explicit at the one place the multimap materializes a new entry.
pub trait ValueCollection:
    Default + IntoIterator<Item = <Self as ValueCollection>::Value> + Extend<<Self as ValueCollection>::Value>
{
    /// The element type stored per key.
    type Value;

    /// The flavor tag, used for cross-flavor equality decisions.
    const KIND: ValueKind;

    /// Creates the empty collection a fresh key starts with.
    fn create() -> Self {
        Self::default()
    }

    /// Inserts a value. Returns `true` if the collection changed (list
    /// flavors always change; set flavors reject duplicates).
    fn insert_value(&mut self, value: Self::Value) -> bool;

    /// Number of values held.
    fn len(&self) -> usize;

    /// Returns `true` if no value is held.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `value` is held at least once.
    fn contains_value(&self, value: &Self::Value) -> bool;

    /// Removes one occurrence of `value`. Returns `true` if one was found.
    fn remove_value(&mut self, value: &Self::Value) -> bool;

    /// Iterates the values in this flavor's order.
    fn iter_values(&self) -> impl Iterator<Item = &Self::Value>;
}

/// List flavor: every insertion is kept, in order.
impl<V: PartialEq> ValueCollection for Vec<V> {
    type Value = V;

    const KIND: ValueKind = ValueKind::List;

    fn insert_value(&mut self, value: V) -> bool {
        self.push(value);
        true
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn contains_value(&self, value: &V) -> bool {
        self.contains(value)
    }

    fn remove_value(&mut self, value: &V) -> bool {
        match self.iter().position(|held| held == value) {
            Some(index) => {
                // first occurrence only; later duplicates survive
                self.remove(index);
                true
            }
            None => false,
        }
    }

    fn iter_values(&self) -> impl Iterator<Item = &V> {
        self.iter()
    }
}

/// Set flavor: duplicates rejected, hashed storage.
impl<V: Eq + Hash> ValueCollection for FnvHashSet<V> {
    type Value = V;

    const KIND: ValueKind = ValueKind::Set;

    fn insert_value(&mut self, value: V) -> bool {
        self.insert(value)
    }

    fn len(&self) -> usize {
        FnvHashSet::len(self)
    }

    fn contains_value(&self, value: &V) -> bool {
        self.contains(value)
    }

    fn remove_value(&mut self, value: &V) -> bool {
        self.remove(value)
    }

    fn iter_values(&self) -> impl Iterator<Item = &V> {
        self.iter()
    }
}

// --- Sorted value collection ---

/// A deduplicated `Vec` kept sorted by an [`Ordering`] comparator.
///
/// Backs [`SortedSetMultimap`]. Insertion and lookup are binary searches
/// against the comparator, so "duplicate" means *compares equal*, not
/// `==` — an [`crate::ordering::AllEqual`] comparator collapses everything
/// to at most one value.
pub struct SortedValues<V, O: Ordering<V> = Natural> {
    values: Vec<V>,
    comparator: O,
}

impl<V, O: Ordering<V>> SortedValues<V, O> {
    /// Creates an empty collection ordered by `comparator`.
    pub fn with_comparator(comparator: O) -> Self {
        SortedValues {
            values: Vec::new(),
            comparator,
        }
    }

    /// The comparator ordering these values.
    pub fn value_comparator(&self) -> &O {
        &self.comparator
    }

    /// Views the values as a sorted slice.
    pub fn as_slice(&self) -> &[V] {
        &self.values
    }

    fn search(&self, value: &V) -> Result<usize, usize> {
        self.values
            .binary_search_by(|held| self.comparator.compare(held, value))
    }
}

impl<V, O: Ordering<V> + Default> Default for SortedValues<V, O> {
    fn default() -> Self {
        SortedValues::with_comparator(O::default())
    }
}

impl<V: Clone, O: Ordering<V> + Clone> Clone for SortedValues<V, O> {
    fn clone(&self) -> Self {
        SortedValues {
            values: self.values.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<V, O: Ordering<V>> IntoIterator for SortedValues<V, O> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

impl<V, O: Ordering<V> + Default> Extend<V> for SortedValues<V, O> {
    fn extend<I: IntoIterator<Item = V>>(&mut self, iter: I) {
        for value in iter {
            self.insert_value(value);
        }
    }
}

impl<V, O: Ordering<V> + Default> ValueCollection for SortedValues<V, O> {
    type Value = V;

    const KIND: ValueKind = ValueKind::SortedSet;

    fn insert_value(&mut self, value: V) -> bool {
        match self.search(&value) {
            Ok(_) => false, // compares equal to a held value
            Err(position) => {
                self.values.insert(position, value);
                true
            }
        }
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn contains_value(&self, value: &V) -> bool {
        self.search(value).is_ok()
    }

    fn remove_value(&mut self, value: &V) -> bool {
        match self.search(value) {
            Ok(position) => {
                self.values.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    fn iter_values(&self) -> impl Iterator<Item = &V> {
        self.values.iter()
    }
}

impl<V: PartialEq, O: Ordering<V>> PartialEq for SortedValues<V, O> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl<V: Eq, O: Ordering<V>> Eq for SortedValues<V, O> {}

impl<V: Debug, O: Ordering<V>> Debug for SortedValues<V, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.values.iter()).finish()
    }
}

// --- The multimap itself ---

/// A map from keys to non-empty collections of values.
///
/// Keys iterate in first-insertion order (removal preserves the order of
/// the remaining keys). The flavor is the `C` type parameter; see the
/// module docs for the provided aliases.
pub struct Multimap<K, C: ValueCollection> {
    map: OrderMap<K, C, FnvBuildHasher>,
    /// Sum of all per-key collection sizes.
    total: usize,
}

impl<K: Eq + Hash, C: ValueCollection> Multimap<K, C> {
    /// Creates an empty multimap.
    pub fn new() -> Self {
        Multimap {
            map: OrderMap::default(),
            total: 0,
        }
    }

    /// Total number of key-value pairs (not distinct keys).
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    /// Number of distinct keys.
    #[inline]
    pub fn distinct_keys(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if the multimap holds no pairs.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Inserts a key-value pair. Returns `true` if the multimap changed —
    /// always for the list flavor, only for new values in the set flavors.
    pub fn put(&mut self, key: K, value: C::Value) -> bool {
        let collection = self.map.entry(key).or_insert_with(C::create);
        let added = collection.insert_value(value);
        if added {
            self.total += 1;
        } else if collection.is_empty() {
            // insert into a fresh collection always succeeds, so a reject
            // here means the collection pre-existed and is non-empty
            unreachable!("fresh value collection rejected its first value");
        }
        self.debug_assert_invariants();
        added
    }

    /// Inserts every value under `key`. Returns `true` if the multimap
    /// changed. An empty `values` sequence is a no-op that creates nothing.
    pub fn put_all(&mut self, key: K, values: impl IntoIterator<Item = C::Value>) -> bool {
        let mut values = values.into_iter();
        // Only touch the map once a first value is known to exist, so an
        // empty input cannot leave an empty collection behind.
        let Some(first) = values.next() else {
            return false;
        };
        let collection = self.map.entry(key).or_insert_with(C::create);
        let mut changed = false;
        for value in iter::once(first).chain(values) {
            if collection.insert_value(value) {
                self.total += 1;
                changed = true;
            }
        }
        self.debug_assert_invariants();
        changed
    }

    /// The collection of values under `key`, or `None` if the key is
    /// absent. Never returns an empty collection.
    pub fn get<Q>(&self, key: &Q) -> Option<&C>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.get(key)
    }

    /// Iterates the values under `key`; empty if the key is absent.
    pub fn values_of<'a, Q>(&'a self, key: &Q) -> impl Iterator<Item = &'a C::Value>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).into_iter().flat_map(|c| c.iter_values())
    }

    /// Mutable access to the values under `key`, through a guard that
    /// repairs the multimap's bookkeeping when dropped.
    ///
    /// The guard materializes an empty collection for an absent key so
    /// values can be inserted through it; if the collection is empty when
    /// the guard drops, the key is removed again. The pair-count is
    /// re-synced from the collection's final size on drop.
    pub fn get_mut(&mut self, key: K) -> ValuesMut<'_, K, C>
    where
        K: Clone,
    {
        let entry_len = self
            .map
            .entry(key.clone())
            .or_insert_with(C::create)
            .len();
        ValuesMut {
            multimap: self,
            key,
            entry_len,
        }
    }

    /// Removes one occurrence of `value` under `key`. Returns `true` if a
    /// pair was removed; the key disappears with its last value.
    pub fn remove<Q>(&mut self, key: &Q, value: &C::Value) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(collection) = self.map.get_mut(key) else {
            return false;
        };
        let removed = collection.remove_value(value);
        if removed {
            self.total -= 1;
            if collection.is_empty() {
                self.map.remove(key);
            }
        }
        self.debug_assert_invariants();
        removed
    }

    /// Removes every value under `key`, returning them as a detached
    /// collection — later mutations of the multimap cannot affect it. An
    /// absent key yields an empty collection.
    pub fn remove_all<Q>(&mut self, key: &Q) -> C
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let removed = self.map.remove(key).unwrap_or_default();
        self.total -= removed.len();
        self.debug_assert_invariants();
        removed
    }

    /// Replaces the values under `key` with `values`, returning the old
    /// values as a detached collection. Replacing with an empty sequence
    /// is equivalent to [`Multimap::remove_all`].
    pub fn replace_values(&mut self, key: K, values: impl IntoIterator<Item = C::Value>) -> C {
        let old = self.remove_all(&key);
        self.put_all(key, values);
        old
    }

    /// Returns `true` if any value is mapped under `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    /// Returns `true` if `value` is mapped under `key`.
    pub fn contains_entry<Q>(&self, key: &Q, value: &C::Value) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some_and(|c| c.contains_value(value))
    }

    /// Iterates the distinct keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.map.keys()
    }

    /// Iterates every key-value pair, grouped by key in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&K, &C::Value)> {
        self.map
            .iter()
            .flat_map(|(key, collection)| collection.iter_values().map(move |value| (key, value)))
    }

    /// The key-to-collection view. Every collection in it is non-empty.
    pub fn as_map(&self) -> &OrderMap<K, C, FnvBuildHasher> {
        &self.map
    }

    /// Removes all pairs.
    pub fn clear(&mut self) {
        self.map.clear();
        self.total = 0;
    }

    fn debug_assert_invariants(&self) {
        debug_assert!(
            self.map.values().all(|collection| !collection.is_empty()),
            "multimap retained a key with an empty value collection"
        );
        debug_assert_eq!(
            self.total,
            self.map.values().map(|c| c.len()).sum::<usize>(),
            "multimap pair-count diverged from its value collections"
        );
    }
}

impl<K: Eq + Hash, V, O: Ordering<V> + Default> SortedSetMultimap<K, V, O> {
    /// The comparator ordering every value collection of this multimap.
    pub fn value_comparator(&self) -> O {
        O::default()
    }
}

impl<K: Eq + Hash, C: ValueCollection> Default for Multimap<K, C> {
    fn default() -> Self {
        Multimap::new()
    }
}

impl<K: Clone + Eq + Hash, C: ValueCollection + Clone> Clone for Multimap<K, C> {
    fn clone(&self) -> Self {
        Multimap {
            map: self.map.clone(),
            total: self.total,
        }
    }
}

impl<K: Eq + Hash, C: ValueCollection> FromIterator<(K, C::Value)> for Multimap<K, C> {
    fn from_iter<I: IntoIterator<Item = (K, C::Value)>>(iter: I) -> Self {
        let mut multimap = Multimap::new();
        multimap.extend(iter);
        multimap
    }
}

impl<K: Eq + Hash, C: ValueCollection> Extend<(K, C::Value)> for Multimap<K, C> {
    fn extend<I: IntoIterator<Item = (K, C::Value)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

/// Cross-flavor equality.
///
/// Flavors with matching duplicate semantics compare per key: list against
/// list is an ordered comparison, set-like against set-like is containment
/// (so a hashed and a sorted set multimap holding the same pairs are
/// equal). A list flavor and a set flavor have incomparable semantics and
/// are equal only when both are empty.
impl<K, C1, C2> PartialEq<Multimap<K, C2>> for Multimap<K, C1>
where
    K: Eq + Hash,
    C1: ValueCollection,
    C2: ValueCollection<Value = C1::Value>,
    C1::Value: PartialEq,
{
    fn eq(&self, other: &Multimap<K, C2>) -> bool {
        if C1::KIND.allows_duplicates() != C2::KIND.allows_duplicates() {
            return self.is_empty() && other.is_empty();
        }
        if self.total != other.total || self.map.len() != other.map.len() {
            return false;
        }
        self.map.iter().all(|(key, mine)| {
            let Some(theirs) = other.map.get(key) else {
                return false;
            };
            if mine.len() != theirs.len() {
                return false;
            }
            if C1::KIND.allows_duplicates() {
                mine.iter_values()
                    .zip(theirs.iter_values())
                    .all(|(a, b)| a == b)
            } else {
                mine.iter_values().all(|value| theirs.contains_value(value))
            }
        })
    }
}

impl<K: Eq + Hash, C: ValueCollection> Eq for Multimap<K, C> where C::Value: Eq {}

impl<K: Eq + Hash + Debug, C: ValueCollection + Debug> Debug for Multimap<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.map.iter()).finish()
    }
}

// --- Mutable value guard ---

/// Mutable access to one key's value collection, handed out by
/// [`Multimap::get_mut`].
///
/// Dereferences to the collection. On drop it restores the multimap's
/// invariants: the pair-count is re-synced, and a key left with no values
/// is removed.
pub struct ValuesMut<'a, K: Eq + Hash, C: ValueCollection> {
    multimap: &'a mut Multimap<K, C>,
    key: K,
    /// Collection size when the guard was created.
    entry_len: usize,
}

impl<K: Eq + Hash, C: ValueCollection> Deref for ValuesMut<'_, K, C> {
    type Target = C;

    fn deref(&self) -> &C {
        match self.multimap.map.get(&self.key) {
            Some(collection) => collection,
            None => unreachable!("guarded key was inserted when the guard was created"),
        }
    }
}

impl<K: Eq + Hash, C: ValueCollection> DerefMut for ValuesMut<'_, K, C> {
    fn deref_mut(&mut self) -> &mut C {
        match self.multimap.map.get_mut(&self.key) {
            Some(collection) => collection,
            None => unreachable!("guarded key was inserted when the guard was created"),
        }
    }
}

impl<K: Eq + Hash, C: ValueCollection> Drop for ValuesMut<'_, K, C> {
    fn drop(&mut self) {
        let final_len = self.multimap.map.get(&self.key).map_or(0, C::len);
        self.multimap.total = self.multimap.total - self.entry_len + final_len;
        if final_len == 0 {
            self.multimap.map.remove(&self.key);
        }
        self.multimap.debug_assert_invariants();
    }
}

// --- Tests ---
