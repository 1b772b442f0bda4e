//! Serde representations for every container in the crate.
//!
//! Enabled by the `serde` feature. Wire forms are the obvious ones: lists
//! and sets serialize as sequences, maps and bimaps as maps, multisets as
//! element-to-count maps, and multimaps as key-to-sequence maps.
//!
//! Deserialization re-establishes each container's construction-time
//! invariants, reporting violations as deserialization errors rather than
//! panicking: a duplicate set element, map key or bimap value, a zero
//! multiset count, or an empty multimap value sequence all reject the
//! payload. Representation choices are re-made on the way in — a one-pair
//! map round-trips back to the singleton representation, while an
//! enum-dense map comes back as a regular hashed map.

use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};

use crate::immutable_bimap::ImmutableBiMap;
use crate::immutable_list::ImmutableList;
use crate::immutable_map::ImmutableMap;
use crate::immutable_set::ImmutableSet;
use crate::multimap::{FnvHashSet, Multimap, ValueCollection};
use crate::multiset::{HashMultiset, MultisetView, TreeMultiset};

/// Counts distinct values by reference, without cloning.
fn distinct_count<'a, T: Eq + Hash + 'a>(items: impl Iterator<Item = &'a T>) -> usize {
    let mut seen: FnvHashSet<&T> = FnvHashSet::default();
    for item in items {
        seen.insert(item);
    }
    seen.len()
}

// --- ImmutableList ---

impl<T: Serialize> Serialize for ImmutableList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for ImmutableList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        Ok(ImmutableList::from(values))
    }
}

// --- ImmutableSet ---

impl<T: Eq + Hash + Serialize> Serialize for ImmutableSet<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T: Eq + Hash + Deserialize<'de>> Deserialize<'de> for ImmutableSet<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<T>::deserialize(deserializer)?;
        if distinct_count(values.iter()) != values.len() {
            return Err(de::Error::custom("duplicate element in set payload"));
        }
        Ok(values.into_iter().collect())
    }
}

// --- ImmutableMap ---

impl<K, V> Serialize for ImmutableMap<K, V>
where
    K: Eq + Hash + Serialize,
    V: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

struct MapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for MapVisitor<K, V>
where
    K: Eq + Hash + Deserialize<'de>,
    V: Deserialize<'de>,
{
    type Value = ImmutableMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with distinct keys")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs: Vec<(K, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(pair) = access.next_entry()? {
            pairs.push(pair);
        }
        // checked here so construction below cannot panic
        if distinct_count(pairs.iter().map(|(k, _)| k)) != pairs.len() {
            return Err(de::Error::custom("duplicate key in map payload"));
        }
        Ok(ImmutableMap::from_entries(pairs))
    }
}

impl<'de, K, V> Deserialize<'de> for ImmutableMap<K, V>
where
    K: Eq + Hash + Deserialize<'de>,
    V: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MapVisitor(PhantomData))
    }
}

// --- ImmutableBiMap ---

impl<K, V> Serialize for ImmutableBiMap<K, V>
where
    K: Eq + Hash + Serialize,
    V: Eq + Hash + Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

struct BiMapVisitor<K, V>(PhantomData<(K, V)>);

impl<'de, K, V> Visitor<'de> for BiMapVisitor<K, V>
where
    K: Eq + Hash + Deserialize<'de>,
    V: Eq + Hash + Deserialize<'de>,
{
    type Value = ImmutableBiMap<K, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map with distinct keys and distinct values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut pairs: Vec<(K, V)> = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some(pair) = access.next_entry()? {
            pairs.push(pair);
        }
        if distinct_count(pairs.iter().map(|(k, _)| k)) != pairs.len() {
            return Err(de::Error::custom("duplicate key in bidirectional map payload"));
        }
        if distinct_count(pairs.iter().map(|(_, v)| v)) != pairs.len() {
            return Err(de::Error::custom(
                "duplicate value in bidirectional map payload",
            ));
        }
        Ok(ImmutableBiMap::from_entries(pairs))
    }
}

impl<'de, K, V> Deserialize<'de> for ImmutableBiMap<K, V>
where
    K: Eq + Hash + Deserialize<'de>,
    V: Eq + Hash + Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BiMapVisitor(PhantomData))
    }
}

// --- Multisets ---

impl<T: Eq + Hash + Serialize> Serialize for HashMultiset<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entry_iter())
    }
}

struct HashMultisetVisitor<T>(PhantomData<T>);

impl<'de, T: Eq + Hash + Deserialize<'de>> Visitor<'de> for HashMultisetVisitor<T> {
    type Value = HashMultiset<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from element to positive occurrence count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut multiset = HashMultiset::new();
        while let Some((element, count)) = access.next_entry::<T, usize>()? {
            if count == 0 {
                return Err(de::Error::custom("zero occurrence count in multiset payload"));
            }
            if multiset.contains(&element) {
                return Err(de::Error::custom("duplicate element in multiset payload"));
            }
            multiset.add_n(element, count);
        }
        Ok(multiset)
    }
}

impl<'de, T: Eq + Hash + Deserialize<'de>> Deserialize<'de> for HashMultiset<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(HashMultisetVisitor(PhantomData))
    }
}

impl<T: Ord + Serialize> Serialize for TreeMultiset<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entry_iter())
    }
}

struct TreeMultisetVisitor<T>(PhantomData<T>);

impl<'de, T: Ord + Deserialize<'de>> Visitor<'de> for TreeMultisetVisitor<T> {
    type Value = TreeMultiset<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from element to positive occurrence count")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut multiset = TreeMultiset::new();
        while let Some((element, count)) = access.next_entry::<T, usize>()? {
            if count == 0 {
                return Err(de::Error::custom("zero occurrence count in multiset payload"));
            }
            if multiset.contains(&element) {
                return Err(de::Error::custom("duplicate element in multiset payload"));
            }
            multiset.add_n(element, count);
        }
        Ok(multiset)
    }
}

impl<'de, T: Ord + Deserialize<'de>> Deserialize<'de> for TreeMultiset<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(TreeMultisetVisitor(PhantomData))
    }
}

// --- Multimap ---

/// Serializes one value collection as a sequence.
struct ValueSeq<'a, C>(&'a C);

impl<C: ValueCollection> Serialize for ValueSeq<'_, C>
where
    C::Value: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter_values())
    }
}

impl<K, C> Serialize for Multimap<K, C>
where
    K: Eq + Hash + Serialize,
    C: ValueCollection,
    C::Value: Serialize,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.as_map().iter().map(|(key, values)| (key, ValueSeq(values))))
    }
}

struct MultimapVisitor<K, C>(PhantomData<(K, C)>);

impl<'de, K, C> Visitor<'de> for MultimapVisitor<K, C>
where
    K: Eq + Hash + Deserialize<'de>,
    C: ValueCollection,
    C::Value: Deserialize<'de>,
{
    type Value = Multimap<K, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map from key to non-empty value sequence")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut multimap = Multimap::new();
        while let Some((key, values)) = access.next_entry::<K, VecSeed<C::Value>>()? {
            if values.0.is_empty() {
                return Err(de::Error::custom("empty value sequence in multimap payload"));
            }
            if multimap.contains_key(&key) {
                return Err(de::Error::custom("duplicate key in multimap payload"));
            }
            multimap.put_all(key, values.0);
        }
        Ok(multimap)
    }
}

/// Newtype so the value sequences deserialize through a plain `Vec`
/// regardless of the target collection flavor.
struct VecSeed<V>(Vec<V>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for VecSeed<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SeqVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for SeqVisitor<V> {
            type Value = VecSeed<V>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of values")
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(value) = access.next_element()? {
                    values.push(value);
                }
                Ok(VecSeed(values))
            }
        }

        deserializer.deserialize_seq(SeqVisitor(PhantomData))
    }
}

impl<'de, K, C> Deserialize<'de> for Multimap<K, C>
where
    K: Eq + Hash + Deserialize<'de>,
    C: ValueCollection,
    C::Value: Deserialize<'de>,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(MultimapVisitor(PhantomData))
    }
}
