//! An immutable bidirectional map.
//!
//! [`ImmutableBiMap`] keys and values are both unique, so the mapping can
//! be read in either direction. The inverse direction is not built at
//! construction: the first call to [`ImmutableBiMap::inverse`] constructs
//! it and caches it in the shared core, so every later call (and every
//! clone of this map) sees the same inverse instance.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::Hash;
use std::iter::FromIterator;
use std::sync::{Arc, OnceLock};

use crate::immutable_map::{ImmutableMap, MapKind};
use crate::immutable_set::ImmutableSet;

struct BiMapCore<K, V> {
    forward: ImmutableMap<K, V>,
    /// Lazily constructed inverse; initialized at most once per core.
    inverse: OnceLock<ImmutableBiMap<V, K>>,
}

/// An immutable map whose values are as unique as its keys.
///
/// Cloning is an `Arc` bump; clones share the lazily cached inverse.
pub struct ImmutableBiMap<K, V> {
    core: Arc<BiMapCore<K, V>>,
}

impl<K: Eq + Hash, V: Eq + Hash> ImmutableBiMap<K, V> {
    /// Creates the canonical empty bimap.
    pub fn new() -> Self {
        ImmutableBiMap::wrap(ImmutableMap::new())
    }

    /// Creates a bimap holding exactly one pair.
    pub fn of(key: K, value: V) -> Self {
        ImmutableBiMap::wrap(ImmutableMap::of(key, value))
    }

    fn wrap(forward: ImmutableMap<K, V>) -> Self {
        ImmutableBiMap {
            core: Arc::new(BiMapCore {
                forward,
                inverse: OnceLock::new(),
            }),
        }
    }

    /// Builds a bimap from `(key, value)` pairs, canonicalizing the
    /// representation by entry count.
    ///
    /// # Panics
    /// Panics if the same key or the same value appears twice — both sides
    /// of a bidirectional map must be unique.
    pub fn from_entries(iter: impl IntoIterator<Item = (K, V)>) -> Self {
        let forward = ImmutableMap::from_entries(iter);
        let distinct_values: ImmutableSet<&V> = forward.iter().map(|(_, v)| v).collect();
        assert!(
            distinct_values.len() == forward.len(),
            "duplicate value in ImmutableBiMap construction"
        );
        ImmutableBiMap::wrap(forward)
    }

    /// Returns the number of pairs.
    pub fn len(&self) -> usize {
        self.core.forward.len()
    }

    /// Returns `true` if the bimap holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.core.forward.is_empty()
    }

    /// Which backing representation the forward direction uses.
    pub fn map_kind(&self) -> MapKind {
        self.core.forward.map_kind()
    }

    /// Returns the value for `key`, or `None` if absent.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.forward.get(key)
    }

    /// Returns the key mapping to `value`, or `None` if absent. O(n); use
    /// [`ImmutableBiMap::inverse`] for repeated reverse lookups.
    pub fn get_by_value(&self, value: &V) -> Option<&K> {
        self.iter().find(|(_, v)| *v == value).map(|(k, _)| k)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.core.forward.contains_key(key)
    }

    pub fn contains_value(&self, value: &V) -> bool {
        self.get_by_value(value).is_some()
    }

    /// Returns an iterator over `(key, value)` pairs in iteration order.
    pub fn iter(&self) -> crate::immutable_map::MapIter<'_, K, V> {
        self.core.forward.iter()
    }

    /// The forward direction as an [`ImmutableMap`].
    pub fn as_map(&self) -> &ImmutableMap<K, V> {
        &self.core.forward
    }

    /// The inverse view, mapping each value back to its key.
    ///
    /// Constructed on first access and cached in the shared core, so all
    /// clones observe the same inverse. Concurrent first calls initialize
    /// it exactly once. The inverse's own `inverse()` builds a map equal
    /// to (though not sharing storage with) this one.
    pub fn inverse(&self) -> ImmutableBiMap<V, K>
    where
        K: Clone,
        V: Clone,
    {
        self.core
            .inverse
            .get_or_init(|| {
                // Uniqueness of both sides was checked at construction, so
                // the flipped pairs cannot collide.
                let flipped = self.iter().map(|(k, v)| (v.clone(), k.clone()));
                ImmutableBiMap::wrap(ImmutableMap::from_entries(flipped))
            })
            .clone()
    }
}

impl<K, V> Clone for ImmutableBiMap<K, V> {
    fn clone(&self) -> Self {
        ImmutableBiMap {
            core: Arc::clone(&self.core),
        }
    }
}

impl<K: Eq + Hash, V: Eq + Hash> Default for ImmutableBiMap<K, V> {
    fn default() -> Self {
        ImmutableBiMap::new()
    }
}

/// Builds through [`ImmutableBiMap::from_entries`].
///
/// # Panics
/// Panics if the same key or the same value appears twice.
impl<K: Eq + Hash, V: Eq + Hash> FromIterator<(K, V)> for ImmutableBiMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        ImmutableBiMap::from_entries(iter)
    }
}

impl<K: Eq + Hash, V: Eq + Hash> PartialEq for ImmutableBiMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.core.forward == other.core.forward
    }
}

impl<K: Eq + Hash, V: Eq + Hash> Eq for ImmutableBiMap<K, V> {}

impl<K: Eq + Hash + Debug, V: Eq + Hash + Debug> Debug for ImmutableBiMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.core.forward.fmt(f)
    }
}

// --- Tests ---
