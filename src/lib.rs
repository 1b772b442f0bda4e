//! # Multi Collections
//!
//! Immutable containers and keyed multi-value collections: lists, sets, maps
//! and bidirectional maps that never change after construction, plus mutable
//! multimaps and multisets for counting and grouping.
//!
//! ## Key Features
//!
//! * **Cardinality-specialized storage:** Immutable sets and maps pick their
//!   representation at construction — a dedicated empty form, a singleton
//!   form, or a hashed backing for two or more entries — so tiny containers
//!   carry no table overhead.
//! * **Cheap sharing:** Cloning an immutable container is an `Arc` bump, and
//!   [`ImmutableList::sub_list`](immutable_list::ImmutableList::sub_list)
//!   windows the parent's storage instead of copying.
//! * **Lazy cached views:** A set's list view and a bimap's inverse are built
//!   on first access and cached, so every clone observes the same instance.
//! * **One multimap, three flavors:** [`Multimap`](multimap::Multimap) is
//!   generic over its per-key [`ValueCollection`](multimap::ValueCollection);
//!   list, hashed-set and comparator-sorted flavors are provided, and new
//!   flavors need only implement the collection trait.
//! * **Performance:** Uses `FnvHasher` internally for extremely fast hashing
//!   on small keys, and insertion-ordered key storage for deterministic
//!   iteration.
//! * **Serde:** The optional `serde` feature round-trips every container and
//!   re-validates construction invariants on the way in.
//!
//! ## Examples
//!
//! ### ImmutableList
//!
//! ```rust
//! use multi_collections::ImmutableList;
//!
//! let list = ImmutableList::from(vec![1, 2, 3, 4]);
//!
//! // A sub-list is a window over the same storage, not a copy.
//! let middle = list.sub_list(1..3);
//! assert_eq!(middle, vec![2, 3]);
//! assert!(middle.is_partial_view());
//! ```
//!
//! ### ListMultimap
//!
//! ```rust
//! use multi_collections::{ListMultimap, Multimap};
//!
//! let mut groups: ListMultimap<&str, i32> = Multimap::new();
//! groups.put("odd", 1);
//! groups.put("even", 2);
//! groups.put("odd", 3);
//!
//! let odds: Vec<i32> = groups.values_of("odd").copied().collect();
//! assert_eq!(odds, vec![1, 3]);
//! assert_eq!(groups.len(), 3);
//!
//! // Removing the last value for a key removes the key itself.
//! groups.remove("even", &2);
//! assert!(!groups.contains_key("even"));
//! ```
//!
//! ### HashMultiset
//!
//! ```rust
//! use multi_collections::{HashMultiset, MultisetView};
//!
//! let mut tally: HashMultiset<&str> = HashMultiset::new();
//! tally.add_n("x", 3);
//! tally.add("y");
//!
//! assert_eq!(tally.count_of("x"), 3);
//! assert_eq!(tally.len(), 4);
//! assert_eq!(tally.distinct_len(), 2);
//! ```

// --- Module Declarations ---

pub mod immutable_bimap;
pub mod immutable_list;
pub mod immutable_map;
pub mod immutable_set;
pub mod multimap;
pub mod multiset;
pub mod ordering;

#[cfg(feature = "serde")]
mod ser;

// --- Re-exports ---

pub use immutable_bimap::ImmutableBiMap;
pub use immutable_list::ImmutableList;
pub use immutable_map::{EnumOrdinal, ImmutableMap, MapKind};
pub use immutable_set::ImmutableSet;
pub use multimap::{
    FnvHashSet, ListMultimap, Multimap, SetMultimap, SortedSetMultimap, SortedValues,
    ValueCollection, ValueKind, ValuesMut,
};
pub use multiset::{HashMultiset, MultisetView, TreeMultiset};
pub use ordering::{AllEqual, ByKey, Comparing, Natural, Ordering, Reverse, by_key};
