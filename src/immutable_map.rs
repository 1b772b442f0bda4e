//! An immutable map with cardinality- and key-specialized representations.
//!
//! [`ImmutableMap`] canonicalizes its backing representation at
//! construction: zero entries use the `Empty` repr, one entry the
//! `Singleton` repr, and two or more either the table-indexed `Regular`
//! repr or — for enum-like keys built through
//! [`ImmutableMap::from_enum_entries`] — a dense, ordinal-indexed repr with
//! a `bitvec` presence bitmap. Equality compares logical content, never the
//! backing representation.
//!
//! The [`Keys`], [`Entries`] and [`Values`] views reflect the owning map
//! without copying it; materializing a key list goes through a lazily
//! initialized per-map cache.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::Index;
use std::slice;
use std::sync::{Arc, OnceLock};

// 'bitvec' for the dense presence bitmap of the enum-keyed representation
use bitvec::boxed::BitBox;
use bitvec::order::Lsb0;
use bitvec::vec::BitVec;
// 'hashbrown' for the low-level HashTable index
use hashbrown::hash_table::{Entry as TableEntry, HashTable};

use crate::immutable_list::ImmutableList;
use crate::immutable_set::fnv_hash;

/// A key type with a dense, zero-based ordinal — the shape of a fieldless
/// enum. Implementations must guarantee `ordinal() < CARDINALITY` and that
/// equal keys have equal ordinals.
pub trait EnumOrdinal: Copy {
    /// Number of distinct key values.
    const CARDINALITY: usize;

    /// This key's position in `0..CARDINALITY`.
    fn ordinal(self) -> usize;
}

/// Which backing representation an [`ImmutableMap`] currently uses.
///
/// Purely introspective; two maps with equal content always compare equal
/// regardless of kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MapKind {
    Empty,
    Singleton,
    Regular,
    EnumDense,
}

enum MapRepr<K, V> {
    Empty,
    Singleton {
        key: K,
        value: V,
    },
    Regular {
        /// Entries in first-insertion order.
        entries: Arc<[(K, V)]>,
        /// FNV-hashed index into `entries` by key.
        table: HashTable<usize>,
    },
    EnumDense {
        /// Bit `i` is set iff a key with ordinal `i` is present.
        present: BitBox<usize, Lsb0>,
        /// Entries in ascending ordinal order; the entry for ordinal `i`
        /// sits at the popcount of `present` below `i`.
        entries: Arc<[(K, V)]>,
    },
}

struct MapCore<K, V> {
    repr: MapRepr<K, V>,
    /// Lazily materialized key list; computed once on first access.
    key_list: OnceLock<ImmutableList<K>>,
}

/// An immutable map from `K` to `V`.
///
/// # Invariants
/// * Size is fixed at construction; no operation mutates observable content.
/// * Iteration order is first-insertion order (ordinal order for the
///   enum-dense repr) and stable across traversals.
///
/// Cloning is an `Arc` bump.
pub struct ImmutableMap<K, V> {
    core: Arc<MapCore<K, V>>,
}

impl<K: Eq + Hash, V> ImmutableMap<K, V> {
    /// Creates the canonical empty map.
    pub fn new() -> Self {
        ImmutableMap::from_repr(MapRepr::Empty)
    }

    /// Creates a map holding exactly one entry.
    pub fn of(key: K, value: V) -> Self {
        ImmutableMap::from_repr(MapRepr::Singleton { key, value })
    }

    fn from_repr(repr: MapRepr<K, V>) -> Self {
        ImmutableMap {
            core: Arc::new(MapCore {
                repr,
                key_list: OnceLock::new(),
            }),
        }
    }

    /// Builds a map from `(key, value)` pairs, canonicalizing the
    /// representation by entry count.
    ///
    /// # Panics
    /// Panics if the same key appears twice.
    pub fn from_entries(iter: impl IntoIterator<Item = (K, V)>) -> Self {
        let mut entries: Vec<(K, V)> = Vec::new();
        let mut table: HashTable<usize> = HashTable::new();
        for (key, value) in iter {
            let hash = fnv_hash(&key);
            match table.entry(
                hash,
                |&i| entries[i].0 == key,
                |&i| fnv_hash(&entries[i].0),
            ) {
                TableEntry::Occupied(_) => panic!("duplicate key in ImmutableMap construction"),
                TableEntry::Vacant(slot) => {
                    slot.insert(entries.len());
                    entries.push((key, value));
                }
            }
        }
        match entries.len() {
            0 => ImmutableMap::new(),
            1 => match entries.pop() {
                Some((key, value)) => ImmutableMap::of(key, value),
                None => unreachable!("length was checked to be 1"),
            },
            _ => ImmutableMap::from_repr(MapRepr::Regular {
                entries: entries.into(),
                table,
            }),
        }
    }

    /// Builds a map from enum-like keys, backed by a dense ordinal-indexed
    /// representation when it holds two or more entries.
    ///
    /// An empty input yields the canonical empty map and a one-entry input
    /// the canonical singleton map — the dense backing is only used for
    /// two or more entries. Iteration order is ascending ordinal order.
    ///
    /// # Panics
    /// Panics if the same key appears twice, or if a key reports an ordinal
    /// outside `0..K::CARDINALITY`.
    pub fn from_enum_entries(iter: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: EnumOrdinal,
    {
        let mut slots: Vec<Option<(K, V)>> = Vec::new();
        slots.resize_with(K::CARDINALITY, || None);
        for (key, value) in iter {
            let ordinal = key.ordinal();
            assert!(
                ordinal < K::CARDINALITY,
                "ordinal {} out of range for cardinality {}",
                ordinal,
                K::CARDINALITY
            );
            if slots[ordinal].replace((key, value)).is_some() {
                panic!("duplicate key in ImmutableMap construction");
            }
        }

        let mut present: BitVec<usize, Lsb0> = BitVec::repeat(false, K::CARDINALITY);
        let mut entries: Vec<(K, V)> = Vec::new();
        for (ordinal, slot) in slots.into_iter().enumerate() {
            if let Some(entry) = slot {
                present.set(ordinal, true);
                entries.push(entry);
            }
        }
        match entries.len() {
            0 => ImmutableMap::new(),
            1 => match entries.pop() {
                Some((key, value)) => ImmutableMap::of(key, value),
                None => unreachable!("length was checked to be 1"),
            },
            _ => ImmutableMap::from_repr(MapRepr::EnumDense {
                present: present.into_boxed_bitslice(),
                entries: entries.into(),
            }),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        match &self.core.repr {
            MapRepr::Empty => 0,
            MapRepr::Singleton { .. } => 1,
            MapRepr::Regular { entries, .. } | MapRepr::EnumDense { entries, .. } => entries.len(),
        }
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        matches!(self.core.repr, MapRepr::Empty)
    }

    /// Which backing representation this map uses.
    pub fn map_kind(&self) -> MapKind {
        match &self.core.repr {
            MapRepr::Empty => MapKind::Empty,
            MapRepr::Singleton { .. } => MapKind::Singleton,
            MapRepr::Regular { .. } => MapKind::Regular,
            MapRepr::EnumDense { .. } => MapKind::EnumDense,
        }
    }

    /// Returns the value for `key`, or `None` if absent.
    ///
    /// Generic over `Q` so that e.g. `String` keys can be looked up with a
    /// `&str`. The enum-dense repr answers borrowed-key lookups by scanning
    /// its (at most `CARDINALITY`) entries; [`ImmutableMap::get_by_ordinal`]
    /// is the constant-time path for owned enum keys.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match &self.core.repr {
            MapRepr::Empty => None,
            MapRepr::Singleton { key: k, value } => (k.borrow() == key).then_some(value),
            MapRepr::Regular { entries, table } => table
                .find(fnv_hash(key), |&i| entries[i].0.borrow() == key)
                .map(|&i| &entries[i].1),
            MapRepr::EnumDense { entries, .. } => entries
                .iter()
                .find(|(k, _)| k.borrow() == key)
                .map(|(_, v)| v),
        }
    }

    /// Constant-time lookup through the key's ordinal.
    ///
    /// On the enum-dense repr this tests the presence bit and ranks into
    /// the entry array by popcount; on every other repr it behaves like
    /// [`ImmutableMap::get`].
    pub fn get_by_ordinal(&self, key: K) -> Option<&V>
    where
        K: EnumOrdinal,
    {
        match &self.core.repr {
            MapRepr::EnumDense { present, entries } => {
                let ordinal = key.ordinal();
                if ordinal >= present.len() || !present[ordinal] {
                    return None;
                }
                let rank = present[..ordinal].count_ones();
                Some(&entries[rank].1)
            }
            _ => self.get(&key),
        }
    }

    /// Returns `true` if the map contains `key`.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).is_some()
    }

    /// Returns `true` if any entry maps to `value`. O(n).
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.iter().any(|(_, v)| v == value)
    }

    /// Returns an iterator over `(key, value)` pairs in iteration order.
    pub fn iter(&self) -> MapIter<'_, K, V> {
        match &self.core.repr {
            MapRepr::Empty => MapIter::Singleton(None),
            MapRepr::Singleton { key, value } => MapIter::Singleton(Some((key, value))),
            MapRepr::Regular { entries, .. } | MapRepr::EnumDense { entries, .. } => {
                MapIter::Slice(entries.iter())
            }
        }
    }

    /// The set-like view of this map's keys.
    pub fn keys(&self) -> Keys<K, V> {
        Keys { map: self.clone() }
    }

    /// The set-like view of this map's entries.
    pub fn entries(&self) -> Entries<K, V> {
        Entries { map: self.clone() }
    }

    /// The view of this map's values, in iteration order.
    pub fn values(&self) -> Values<K, V> {
        Values { map: self.clone() }
    }
}

impl<K, V> Clone for ImmutableMap<K, V> {
    fn clone(&self) -> Self {
        ImmutableMap {
            core: Arc::clone(&self.core),
        }
    }
}

impl<K: Eq + Hash, V> Default for ImmutableMap<K, V> {
    fn default() -> Self {
        ImmutableMap::new()
    }
}

/// Builds through [`ImmutableMap::from_entries`].
///
/// # Panics
/// Panics if the same key appears twice.
impl<K: Eq + Hash, V> FromIterator<(K, V)> for ImmutableMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ImmutableMap::from_entries(iter)
    }
}

/// Read access via `map[&key]`.
///
/// # Panics
/// Panics if the key is not present.
impl<K, V, Q> Index<&Q> for ImmutableMap<K, V>
where
    K: Eq + Hash + Borrow<Q>,
    Q: Hash + Eq + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

/// Iterator over the entries of an [`ImmutableMap`].
pub enum MapIter<'a, K, V> {
    Singleton(Option<(&'a K, &'a V)>),
    Slice(slice::Iter<'a, (K, V)>),
}

impl<'a, K, V> Iterator for MapIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            MapIter::Singleton(entry) => entry.take(),
            MapIter::Slice(iter) => iter.next().map(|(k, v)| (k, v)),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            MapIter::Singleton(entry) => usize::from(entry.is_some()),
            MapIter::Slice(iter) => iter.len(),
        };
        (len, Some(len))
    }
}

impl<K, V> ExactSizeIterator for MapIter<'_, K, V> {}

impl<'a, K: Eq + Hash, V> IntoIterator for &'a ImmutableMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = MapIter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Logical content equality, independent of backing representation: an
/// enum-dense map equals a regular map with the same entries.
impl<K: Eq + Hash, V: PartialEq> PartialEq for ImmutableMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl<K: Eq + Hash, V: Eq> Eq for ImmutableMap<K, V> {}

/// Order- and representation-independent hash: the wrapping sum of
/// per-entry `hash(key) ^ hash(value)`.
impl<K: Eq + Hash, V: Hash> Hash for ImmutableMap<K, V> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sum = 0u64;
        for (k, v) in self.iter() {
            sum = sum.wrapping_add(fnv_hash(k) ^ fnv_hash(v));
        }
        state.write_u64(sum);
        state.write_usize(self.len());
    }
}

impl<K: Eq + Hash + Debug, V: Debug> Debug for ImmutableMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

// --- Derived Views ---

/// Set-like view of a map's keys. Holds a handle to the owner; never copies
/// the keys until [`Keys::as_list`] materializes them (once per map).
pub struct Keys<K, V> {
    map: ImmutableMap<K, V>,
}

impl<K: Eq + Hash, V> Keys<K, V> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.map.contains_key(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> + '_ {
        self.map.iter().map(|(k, _)| k)
    }

    /// Materializes the keys as an [`ImmutableList`], in iteration order.
    ///
    /// Built once per owning map and cached; concurrent first calls
    /// initialize it exactly once.
    pub fn as_list(&self) -> ImmutableList<K>
    where
        K: Clone,
    {
        self.map
            .core
            .key_list
            .get_or_init(|| self.iter().cloned().collect())
            .clone()
    }

    /// Always `true`: this view wraps the map's storage rather than owning
    /// its own.
    pub fn is_partial_view(&self) -> bool {
        true
    }
}

impl<K: Eq + Hash + Debug, V> Debug for Keys<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Set-like view of a map's entries.
pub struct Entries<K, V> {
    map: ImmutableMap<K, V>,
}

impl<K: Eq + Hash, V> Entries<K, V> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Entry membership checks both key presence and value equality
    /// against the owning map.
    pub fn contains(&self, key: &K, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.get(key) == Some(value)
    }

    pub fn iter(&self) -> MapIter<'_, K, V> {
        self.map.iter()
    }

    /// Materializes the entries as an [`ImmutableList`] of pairs.
    ///
    /// The table-backed and enum-dense reprs already hold their entries as
    /// a shared slice, so the returned list wraps that storage directly (a
    /// partial view); the smaller reprs clone their single entry.
    pub fn as_list(&self) -> ImmutableList<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        match &self.map.core.repr {
            MapRepr::Empty => ImmutableList::new(),
            MapRepr::Singleton { key, value } => {
                ImmutableList::of((key.clone(), value.clone()))
            }
            MapRepr::Regular { entries, .. } | MapRepr::EnumDense { entries, .. } => {
                ImmutableList::from_shared(Arc::clone(entries))
            }
        }
    }

    /// Always `true`: this view wraps the map's storage rather than owning
    /// its own.
    pub fn is_partial_view(&self) -> bool {
        true
    }
}

impl<K: Eq + Hash + Debug, V: Debug> Debug for Entries<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// View of a map's values, in iteration order.
pub struct Values<K, V> {
    map: ImmutableMap<K, V>,
}

impl<K: Eq + Hash, V> Values<K, V> {
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn contains(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.map.contains_value(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &V> + '_ {
        self.map.iter().map(|(_, v)| v)
    }

    /// Always `true`: this view wraps the map's storage rather than owning
    /// its own.
    pub fn is_partial_view(&self) -> bool {
        true
    }
}

impl<K: Eq + Hash, V: Debug> Debug for Values<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    enum Color {
        Red,
        Green,
        Blue,
    }

    impl EnumOrdinal for Color {
        const CARDINALITY: usize = 3;

        fn ordinal(self) -> usize {
            self as usize
        }
    }

    // --- 1. Canonical Representations ---
    #[test]
    fn test_canonicalization_by_cardinality() {
        let empty: ImmutableMap<i32, i32> = ImmutableMap::from_entries(vec![]);
        assert_eq!(empty.map_kind(), MapKind::Empty);

        let one = ImmutableMap::from_entries(vec![(1, 10)]);
        assert_eq!(one.map_kind(), MapKind::Singleton);

        let many = ImmutableMap::from_entries(vec![(1, 10), (2, 20)]);
        assert_eq!(many.map_kind(), MapKind::Regular);
    }

    #[test]
    fn test_enum_map_canonicalization() {
        let empty: ImmutableMap<Color, i32> = ImmutableMap::from_enum_entries(vec![]);
        assert_eq!(empty.map_kind(), MapKind::Empty);

        // A one-entry enum map is the singleton kind, not the dense kind
        let one = ImmutableMap::from_enum_entries(vec![(Color::Red, 1)]);
        assert_eq!(one.map_kind(), MapKind::Singleton);
        assert_eq!(one, ImmutableMap::of(Color::Red, 1));

        let two = ImmutableMap::from_enum_entries(vec![(Color::Blue, 3), (Color::Red, 1)]);
        assert_eq!(two.map_kind(), MapKind::EnumDense);
    }

    #[test]
    #[should_panic(expected = "duplicate key")]
    fn test_duplicate_key_rejected() {
        let _ = ImmutableMap::from_entries(vec![(1, 10), (1, 11)]);
    }

    #[test]
    #[should_panic(expected = "duplicate key")]
    fn test_enum_duplicate_key_rejected() {
        let _ = ImmutableMap::from_enum_entries(vec![(Color::Red, 1), (Color::Red, 2)]);
    }

    // --- 2. Lookups ---
    #[test]
    fn test_get_across_reprs() {
        let one = ImmutableMap::of("a".to_string(), 1);
        assert_eq!(one.get("a"), Some(&1)); // &str lookup on String keys
        assert_eq!(one.get("b"), None);

        let many: ImmutableMap<String, i32> =
            vec![("a".to_string(), 1), ("b".to_string(), 2)].into_iter().collect();
        assert_eq!(many.get("b"), Some(&2));
        assert_eq!(many["a"], 1);
        assert!(many.contains_key("a"));
        assert!(many.contains_value(&2));
        assert!(!many.contains_value(&3));
    }

    #[test]
    fn test_enum_dense_lookup() {
        let map = ImmutableMap::from_enum_entries(vec![(Color::Blue, 3), (Color::Red, 1)]);
        assert_eq!(map.get(&Color::Red), Some(&1));
        assert_eq!(map.get(&Color::Blue), Some(&3));
        assert_eq!(map.get(&Color::Green), None);

        // Ordinal fast path agrees with the generic lookup
        assert_eq!(map.get_by_ordinal(Color::Red), Some(&1));
        assert_eq!(map.get_by_ordinal(Color::Green), None);
        assert_eq!(map.get_by_ordinal(Color::Blue), Some(&3));
    }

    #[test]
    fn test_enum_dense_iterates_in_ordinal_order() {
        let map = ImmutableMap::from_enum_entries(vec![(Color::Blue, 3), (Color::Red, 1)]);
        let keys: Vec<Color> = map.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![Color::Red, Color::Blue]);
    }

    // --- 3. Equality Across Representations ---
    #[test]
    fn test_logical_equality_ignores_repr() {
        let dense = ImmutableMap::from_enum_entries(vec![(Color::Red, 1), (Color::Blue, 3)]);
        let regular = ImmutableMap::from_entries(vec![(Color::Blue, 3), (Color::Red, 1)]);
        assert_eq!(dense.map_kind(), MapKind::EnumDense);
        assert_eq!(regular.map_kind(), MapKind::Regular);
        assert_eq!(dense, regular);

        use std::hash::{BuildHasher, RandomState};
        let s = RandomState::new();
        assert_eq!(s.hash_one(&dense), s.hash_one(&regular));
    }

    // --- 4. Views ---
    #[test]
    fn test_keys_view() {
        let map: ImmutableMap<&str, i32> = vec![("a", 1), ("b", 2)].into_iter().collect();
        let keys = map.keys();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"a"));
        assert!(!keys.contains(&"z"));
        assert!(keys.is_partial_view());

        let list = keys.as_list();
        assert_eq!(list, vec!["a", "b"]);
        // Cached materialization: a second access through a fresh view
        // hands back the same backing allocation, not a rebuilt list
        let again = map.keys().as_list();
        assert_eq!(again, list);
        assert_eq!(again.as_slice().as_ptr(), list.as_slice().as_ptr());
    }

    #[test]
    fn test_entries_view_checks_key_and_value() {
        let map: ImmutableMap<&str, i32> = vec![("a", 1), ("b", 2)].into_iter().collect();
        let entries = map.entries();
        assert_eq!(entries.len(), 2);
        assert!(entries.contains(&"a", &1));
        assert!(!entries.contains(&"a", &2)); // right key, wrong value
        assert!(!entries.contains(&"z", &1)); // absent key
        assert!(entries.is_partial_view());
    }

    #[test]
    fn test_entries_as_list_shares_storage() {
        let map: ImmutableMap<&str, i32> = vec![("a", 1), ("b", 2)].into_iter().collect();
        let list = map.entries().as_list();
        assert_eq!(list, vec![("a", 1), ("b", 2)]);
        assert!(list.is_partial_view()); // wraps the map's entry slice

        let one = ImmutableMap::of("a", 1).entries().as_list();
        assert_eq!(one, vec![("a", 1)]);
        assert!(!one.is_partial_view());
    }

    #[test]
    fn test_values_view() {
        let map: ImmutableMap<&str, i32> = vec![("a", 1), ("b", 2)].into_iter().collect();
        let values = map.values();
        assert_eq!(values.len(), 2);
        assert!(values.contains(&1));
        assert!(!values.contains(&9));
        let collected: Vec<i32> = values.iter().copied().collect();
        assert_eq!(collected, vec![1, 2]);
    }

    // --- 5. Read Stability ---
    #[test]
    fn test_size_and_self_equality_stable() {
        let map: ImmutableMap<i32, i32> = vec![(1, 10), (2, 20)].into_iter().collect();
        for _ in 0..3 {
            assert_eq!(map.len(), 2);
            assert_eq!(map.get(&1), Some(&10));
            assert_eq!(map, map);
        }
    }
}
