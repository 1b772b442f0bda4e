//! An immutable set with cardinality-specialized representations.
//!
//! [`ImmutableSet`] stores zero elements, one element, or an
//! insertion-ordered unique slice indexed by a FNV-hashed
//! [`hashbrown::HashTable`]. Construction canonicalizes: an empty input
//! yields the `Empty` repr and a one-element input the `Singleton` repr —
//! the table-backed repr only ever holds two or more elements.

use std::borrow::Borrow;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::sync::{Arc, OnceLock};

// 'hashbrown' for the low-level HashTable API (index entries by position,
// store each element exactly once in the shared slice)
use hashbrown::hash_table::{Entry as TableEntry, HashTable};
// 'fnv' for fast hashing on small keys
use fnv::FnvHasher;

use crate::immutable_list::ImmutableList;

/// Hashes a value with FNV. All hash-indexed containers in this crate use
/// the same deterministic hasher so borrowed-key lookups stay consistent.
pub(crate) fn fnv_hash<T: Hash + ?Sized>(value: &T) -> u64 {
    let mut hasher = FnvHasher::default();
    value.hash(&mut hasher);
    hasher.finish()
}

enum SetRepr<T> {
    Empty,
    Singleton(T),
    Regular {
        /// Unique elements in first-insertion order.
        entries: Arc<[T]>,
        /// FNV-hashed index into `entries`.
        table: HashTable<usize>,
    },
}

struct SetCore<T> {
    repr: SetRepr<T>,
    /// Lazily materialized list view; computed once on first access.
    as_list: OnceLock<ImmutableList<T>>,
}

/// An immutable set of `T`.
///
/// # Invariants
/// * Size is fixed at construction; no operation mutates observable content.
/// * Iteration order is first-insertion order and stable across traversals.
///
/// Cloning is an `Arc` bump. Equality and hashing are order-independent.
pub struct ImmutableSet<T> {
    core: Arc<SetCore<T>>,
}

impl<T: Eq + Hash> ImmutableSet<T> {
    /// Creates the canonical empty set.
    pub fn new() -> Self {
        ImmutableSet::from_repr(SetRepr::Empty)
    }

    /// Creates a set holding exactly one element.
    pub fn of(value: T) -> Self {
        ImmutableSet::from_repr(SetRepr::Singleton(value))
    }

    fn from_repr(repr: SetRepr<T>) -> Self {
        ImmutableSet {
            core: Arc::new(SetCore {
                repr,
                as_list: OnceLock::new(),
            }),
        }
    }

    /// Returns the number of elements.
    pub fn len(&self) -> usize {
        match &self.core.repr {
            SetRepr::Empty => 0,
            SetRepr::Singleton(_) => 1,
            SetRepr::Regular { entries, .. } => entries.len(),
        }
    }

    /// Returns `true` if the set holds no elements.
    pub fn is_empty(&self) -> bool {
        matches!(self.core.repr, SetRepr::Empty)
    }

    /// Returns `true` if the set contains `value`.
    ///
    /// Generic over `Q` so that e.g. a `String` element can be looked up
    /// with a `&str`, exactly like the standard map types.
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        match &self.core.repr {
            SetRepr::Empty => false,
            SetRepr::Singleton(element) => element.borrow() == value,
            SetRepr::Regular { entries, table } => table
                .find(fnv_hash(value), |&i| entries[i].borrow() == value)
                .is_some(),
        }
    }

    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> SetIter<'_, T> {
        match &self.core.repr {
            SetRepr::Empty => SetIter::Singleton(None),
            SetRepr::Singleton(element) => SetIter::Singleton(Some(element)),
            SetRepr::Regular { entries, .. } => SetIter::Slice(entries.iter()),
        }
    }

    /// Returns this set's elements as an [`ImmutableList`], in iteration
    /// order.
    ///
    /// The list is built once on first access and cached; concurrent first
    /// calls initialize it exactly once. For the table-backed repr the list
    /// shares the set's storage and reports itself as a partial view.
    pub fn as_list(&self) -> ImmutableList<T>
    where
        T: Clone,
    {
        self.core
            .as_list
            .get_or_init(|| match &self.core.repr {
                SetRepr::Empty => ImmutableList::new(),
                SetRepr::Singleton(element) => ImmutableList::of(element.clone()),
                SetRepr::Regular { entries, .. } => ImmutableList::from_shared(Arc::clone(entries)),
            })
            .clone()
    }
}

impl<T> Clone for ImmutableSet<T> {
    fn clone(&self) -> Self {
        ImmutableSet {
            core: Arc::clone(&self.core),
        }
    }
}

impl<T: Eq + Hash> Default for ImmutableSet<T> {
    fn default() -> Self {
        ImmutableSet::new()
    }
}

/// Duplicates in the input are dropped, keeping the first occurrence.
impl<T: Eq + Hash> FromIterator<T> for ImmutableSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut entries: Vec<T> = Vec::new();
        let mut table: HashTable<usize> = HashTable::new();
        for value in iter {
            let hash = fnv_hash(&value);
            match table.entry(hash, |&i| entries[i] == value, |&i| fnv_hash(&entries[i])) {
                TableEntry::Occupied(_) => {} // first occurrence wins
                TableEntry::Vacant(slot) => {
                    slot.insert(entries.len());
                    entries.push(value);
                }
            }
        }
        match entries.len() {
            0 => ImmutableSet::new(),
            1 => match entries.pop() {
                Some(only) => ImmutableSet::of(only),
                None => unreachable!("length was checked to be 1"),
            },
            _ => ImmutableSet::from_repr(SetRepr::Regular {
                entries: entries.into(),
                table,
            }),
        }
    }
}

/// Iterator over the elements of an [`ImmutableSet`].
pub enum SetIter<'a, T> {
    Singleton(Option<&'a T>),
    Slice(std::slice::Iter<'a, T>),
}

impl<'a, T> Iterator for SetIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            SetIter::Singleton(element) => element.take(),
            SetIter::Slice(iter) => iter.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = match self {
            SetIter::Singleton(element) => usize::from(element.is_some()),
            SetIter::Slice(iter) => iter.len(),
        };
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for SetIter<'_, T> {}

impl<'a, T: Eq + Hash> IntoIterator for &'a ImmutableSet<T> {
    type Item = &'a T;
    type IntoIter = SetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Order-independent equality: same size and mutual containment.
impl<T: Eq + Hash> PartialEq for ImmutableSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Eq + Hash> Eq for ImmutableSet<T> {}

/// Order-independent hash: the wrapping sum of per-element FNV hashes, so
/// two equal sets hash alike regardless of insertion order.
impl<T: Eq + Hash> Hash for ImmutableSet<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let mut sum = 0u64;
        for element in self.iter() {
            sum = sum.wrapping_add(fnv_hash(element));
        }
        state.write_u64(sum);
        state.write_usize(self.len());
    }
}

impl<T: Eq + Hash + Debug> Debug for ImmutableSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

// --- Tests ---

#[cfg(test)]
mod tests {
    use super::*;

    fn repr_name<T>(set: &ImmutableSet<T>) -> &'static str {
        match set.core.repr {
            SetRepr::Empty => "empty",
            SetRepr::Singleton(_) => "singleton",
            SetRepr::Regular { .. } => "regular",
        }
    }

    // --- 1. Canonical Representations ---
    #[test]
    fn test_canonicalization_by_cardinality() {
        let empty: ImmutableSet<i32> = std::iter::empty().collect();
        assert_eq!(repr_name(&empty), "empty");

        let one: ImmutableSet<i32> = vec![5].into_iter().collect();
        assert_eq!(repr_name(&one), "singleton");

        let many: ImmutableSet<i32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(repr_name(&many), "regular");
    }

    #[test]
    fn test_duplicates_collapse_to_singleton() {
        let set: ImmutableSet<i32> = vec![7, 7, 7].into_iter().collect();
        assert_eq!(repr_name(&set), "singleton");
        assert_eq!(set.len(), 1);
    }

    // --- 2. Singleton Behavior ---
    #[test]
    fn test_singleton_contract() {
        let set = ImmutableSet::of(5);
        assert_eq!(set.len(), 1);
        assert!(set.contains(&5));
        assert!(!set.contains(&6));
        assert_eq!(set.as_list(), ImmutableList::of(5));
    }

    // --- 3. Membership & Iteration ---
    #[test]
    fn test_contains_and_iteration_order() {
        let set: ImmutableSet<String> =
            vec!["b".to_string(), "a".to_string(), "b".to_string(), "c".to_string()]
                .into_iter()
                .collect();
        assert_eq!(set.len(), 3);
        // Borrowed-key lookup without allocating a String
        assert!(set.contains("a"));
        assert!(!set.contains("z"));

        // First-insertion order, stable across traversals
        let order: Vec<&String> = set.iter().collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        let again: Vec<&String> = set.iter().collect();
        assert_eq!(order, again);
    }

    #[test]
    fn test_iterator_len() {
        let set: ImmutableSet<i32> = vec![1, 2, 3].into_iter().collect();
        assert_eq!(set.iter().len(), 3);
        assert_eq!(ImmutableSet::of(1).iter().len(), 1);
    }

    // --- 4. List View & Caching ---
    #[test]
    fn test_as_list_shares_storage_and_caches() {
        let set: ImmutableSet<i32> = vec![1, 2, 3].into_iter().collect();
        let list = set.as_list();
        assert_eq!(list, vec![1, 2, 3]);
        // The regular repr's list view wraps the set's own storage
        assert!(list.is_partial_view());

        // Cached: a second call hands back the same backing allocation,
        // not a rebuilt list
        let list2 = set.as_list();
        assert_eq!(list, list2);
        assert_eq!(list.as_slice().as_ptr(), list2.as_slice().as_ptr());
    }

    #[test]
    fn test_singleton_as_list_owns_storage() {
        let list = ImmutableSet::of(9).as_list();
        assert!(!list.is_partial_view());
        assert_eq!(list, vec![9]);
    }

    // --- 5. Equality & Hash (order-independent) ---
    #[test]
    fn test_equality_ignores_order() {
        let a: ImmutableSet<i32> = vec![1, 2, 3].into_iter().collect();
        let b: ImmutableSet<i32> = vec![3, 2, 1].into_iter().collect();
        assert_eq!(a, b);

        use std::hash::{BuildHasher, RandomState};
        let s = RandomState::new();
        assert_eq!(s.hash_one(&a), s.hash_one(&b));

        let c: ImmutableSet<i32> = vec![1, 2].into_iter().collect();
        assert_ne!(a, c);
    }

    #[test]
    fn test_self_equality_stable_under_reads() {
        let set: ImmutableSet<i32> = vec![4, 5].into_iter().collect();
        for _ in 0..3 {
            assert!(set.contains(&4));
            assert_eq!(set.len(), 2);
            assert_eq!(set, set);
        }
    }
}
