//! Wire round-trips and payload validation for the `serde` feature.
#![cfg(feature = "serde")]

use multi_collections::{
    EnumOrdinal, HashMultiset, ImmutableBiMap, ImmutableList, ImmutableMap, ImmutableSet,
    ListMultimap, MapKind, Multimap, MultisetView, SetMultimap, TreeMultiset,
};
use serde::{Deserialize, Serialize};

// --- 1. Round-trips ---

#[test]
fn list_round_trip() {
    let list = ImmutableList::from(vec![3, 1, 2]);
    let json = serde_json::to_string(&list).unwrap();
    assert_eq!(json, "[3,1,2]");
    let back: ImmutableList<i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, list);
}

#[test]
fn sub_list_serializes_as_its_window() {
    let list = ImmutableList::from(vec![1, 2, 3, 4]);
    let json = serde_json::to_string(&list.sub_list(1..3)).unwrap();
    assert_eq!(json, "[2,3]");
}

#[test]
fn set_round_trip() {
    let set: ImmutableSet<String> = vec!["a".to_string(), "b".to_string()].into_iter().collect();
    let json = serde_json::to_string(&set).unwrap();
    let back: ImmutableSet<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, set);
}

#[test]
fn map_round_trip_respecializes_by_cardinality() {
    let map = ImmutableMap::from_entries(vec![("a".to_string(), 1)]);
    let json = serde_json::to_string(&map).unwrap();
    let back: ImmutableMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
    // One pair comes back in the singleton representation
    assert_eq!(back.map_kind(), MapKind::Singleton);

    let empty: ImmutableMap<String, i32> = serde_json::from_str("{}").unwrap();
    assert_eq!(empty.map_kind(), MapKind::Empty);
}

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
enum Channel {
    Red,
    Green,
    Blue,
}

impl EnumOrdinal for Channel {
    const CARDINALITY: usize = 3;

    fn ordinal(self) -> usize {
        self as usize
    }
}

#[test]
fn enum_dense_map_comes_back_hashed() {
    let map = ImmutableMap::from_enum_entries(vec![(Channel::Red, 1), (Channel::Blue, 2)]);
    assert_eq!(map.map_kind(), MapKind::EnumDense);

    let json = serde_json::to_string(&map).unwrap();
    let back: ImmutableMap<Channel, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, map);
    // The dense layout is a construction-time choice, not a wire property
    assert_eq!(back.map_kind(), MapKind::Regular);
}

#[test]
fn bimap_round_trip() {
    let bimap = ImmutableBiMap::from_entries(vec![("a".to_string(), 1), ("b".to_string(), 2)]);
    let json = serde_json::to_string(&bimap).unwrap();
    let back: ImmutableBiMap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bimap);
    assert_eq!(back.inverse().get(&2), Some(&"b".to_string()));
}

#[test]
fn multiset_round_trip() {
    let mut multiset: HashMultiset<String> = HashMultiset::new();
    multiset.add_n("x".to_string(), 3);
    multiset.add("y".to_string());

    let json = serde_json::to_string(&multiset).unwrap();
    let back: HashMultiset<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, multiset);
    assert_eq!(back.count_of("x"), 3);

    let tree: TreeMultiset<String> = serde_json::from_str(&json).unwrap();
    assert_eq!(tree.len(), 4);
    assert_eq!(tree, back);
}

#[test]
fn multimap_round_trip() {
    let mut multimap: ListMultimap<String, i32> = Multimap::new();
    multimap.put_all("a".to_string(), vec![1, 1, 2]);
    multimap.put("b".to_string(), 3);

    let json = serde_json::to_string(&multimap).unwrap();
    assert_eq!(json, r#"{"a":[1,1,2],"b":[3]}"#);
    let back: ListMultimap<String, i32> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, multimap);
}

#[test]
fn multimap_flavor_is_applied_on_read() {
    // The same payload lands differently per flavor: the set flavor
    // collapses the duplicate value.
    let json = r#"{"a":[1,1,2]}"#;
    let list: ListMultimap<String, i32> = serde_json::from_str(json).unwrap();
    assert_eq!(list.len(), 3);
    let set: SetMultimap<String, i32> = serde_json::from_str(json).unwrap();
    assert_eq!(set.len(), 2);
}

// --- 2. Invalid Payloads ---

#[test]
fn duplicate_set_element_rejected() {
    let result: Result<ImmutableSet<String>, _> = serde_json::from_str(r#"["a","a"]"#);
    assert!(result.unwrap_err().to_string().contains("duplicate element"));
}

#[test]
fn duplicate_map_key_rejected() {
    let result: Result<ImmutableMap<String, i32>, _> = serde_json::from_str(r#"{"a":1,"a":2}"#);
    assert!(result.unwrap_err().to_string().contains("duplicate key"));
}

#[test]
fn duplicate_bimap_value_rejected() {
    let result: Result<ImmutableBiMap<String, i32>, _> = serde_json::from_str(r#"{"a":1,"b":1}"#);
    assert!(result.unwrap_err().to_string().contains("duplicate value"));
}

#[test]
fn zero_multiset_count_rejected() {
    let result: Result<HashMultiset<String>, _> = serde_json::from_str(r#"{"x":0}"#);
    assert!(result.unwrap_err().to_string().contains("zero occurrence count"));
}

#[test]
fn empty_multimap_value_sequence_rejected() {
    let result: Result<ListMultimap<String, i32>, _> = serde_json::from_str(r#"{"a":[]}"#);
    assert!(result.unwrap_err().to_string().contains("empty value sequence"));
}

#[test]
fn duplicate_multimap_key_rejected() {
    let result: Result<ListMultimap<String, i32>, _> =
        serde_json::from_str(r#"{"a":[1],"a":[2]}"#);
    assert!(result.unwrap_err().to_string().contains("duplicate key"));
}
