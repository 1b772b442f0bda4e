//! Multisets: collections tracking a positive occurrence count per element.
//!
//! The read side is the [`MultisetView`] trait — a skeletal layer deriving
//! every query operation (length, containment, occurrence iteration,
//! equality, hashing) from three primitives: `entry_iter`, `distinct_len`
//! and `count`. Concrete backings implement just those primitives:
//! [`HashMultiset`] for O(1) counting and [`TreeMultiset`] for sorted
//! element iteration. Mutation lives on the concrete types only; the view
//! trait itself cannot modify anything.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::iter::{self, FromIterator};

// 'hashbrown' + 'fnv': same fast-hashing pairing as the immutable containers
use fnv::FnvBuildHasher;
use hashbrown::HashMap;

use crate::immutable_set::fnv_hash;

/// The read-only contract of a multiset, derived from three primitives.
///
/// Equality and hashing are *defined* here, not chosen per implementation:
/// two multisets are equal iff they have the same distinct-element count
/// and, for every element, the same occurrence count — regardless of
/// iteration order or backing structure.
pub trait MultisetView<T> {
    /// One `(element, count)` pair per distinct element. Counts are always
    /// positive; a zero-count entry never appears.
    fn entry_iter(&self) -> Box<dyn Iterator<Item = (&T, usize)> + '_>;

    /// Number of distinct elements.
    fn distinct_len(&self) -> usize;

    /// Occurrences of `element`, zero if absent.
    fn count(&self, element: &T) -> usize;

    /// Total number of occurrences: the sum of all entry counts.
    fn len(&self) -> usize {
        self.entry_iter().map(|(_, n)| n).sum()
    }

    /// Returns `true` if no element is present.
    fn is_empty(&self) -> bool {
        self.distinct_len() == 0
    }

    /// Returns `true` if `element` occurs at least once.
    fn contains(&self, element: &T) -> bool {
        self.count(element) > 0
    }

    /// Iterates each distinct element once.
    fn elements(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.entry_iter().map(|(element, _)| element))
    }

    /// Iterates each element as many times as it occurs.
    fn iter_occurrences(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(
            self.entry_iter()
                .flat_map(|(element, n)| iter::repeat(element).take(n)),
        )
    }

    /// Multiset equality: same distinct count, same per-element counts.
    fn eq_multiset(&self, other: &impl MultisetView<T>) -> bool
    where
        T: Eq,
    {
        self.distinct_len() == other.distinct_len()
            && self.entry_iter().all(|(element, n)| other.count(element) == n)
    }

    /// Order-independent hash over the entry set, so equal multisets hash
    /// alike regardless of backing.
    fn multiset_hash(&self) -> u64
    where
        T: Hash,
    {
        let mut sum = 0u64;
        for (element, n) in self.entry_iter() {
            sum = sum.wrapping_add(fnv_hash(element) ^ (n as u64));
        }
        sum
    }
}

// --- Hash-backed multiset ---

/// A mutable multiset backed by a FNV-hashed map from element to count.
///
/// The total occurrence count is tracked alongside the entry map; the two
/// are kept consistent by every mutation (checked by debug assertions).
pub struct HashMultiset<T> {
    counts: HashMap<T, usize, FnvBuildHasher>,
    total: usize,
}

impl<T: Eq + Hash> HashMultiset<T> {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        HashMultiset {
            counts: HashMap::default(),
            total: 0,
        }
    }

    /// Total number of occurrences.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    /// Returns `true` if no element is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Occurrences of `element`, zero if absent. Generic over `Q` for
    /// borrowed-key lookups.
    pub fn count_of<Q>(&self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.counts.get(element).copied().unwrap_or(0)
    }

    /// Adds one occurrence. Returns the count *before* the addition.
    pub fn add(&mut self, element: T) -> usize {
        self.add_n(element, 1)
    }

    /// Adds `occurrences` occurrences. Returns the count before the
    /// addition; adding zero occurrences is a no-op that still reports it.
    pub fn add_n(&mut self, element: T, occurrences: usize) -> usize {
        if occurrences == 0 {
            return self.count_of(&element);
        }
        let slot = self.counts.entry(element).or_insert(0);
        let old = *slot;
        *slot += occurrences;
        self.total += occurrences;
        self.debug_assert_invariants();
        old
    }

    /// Removes one occurrence. Returns `true` if the element was present.
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.remove_n(element, 1) > 0
    }

    /// Removes up to `occurrences` occurrences. Returns the count before
    /// the removal; the entry disappears entirely when its count reaches
    /// zero.
    pub fn remove_n<Q>(&mut self, element: &Q, occurrences: usize) -> usize
    where
        T: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let Some(current) = self.counts.get_mut(element) else {
            return 0;
        };
        let old = *current;
        let removed = occurrences.min(old);
        if removed == old {
            self.counts.remove(element);
        } else {
            *current -= removed;
        }
        self.total -= removed;
        self.debug_assert_invariants();
        old
    }

    /// Sets the count of `element` to exactly `count`, deriving the change
    /// from the add/remove delta. Returns the previous count.
    pub fn set_count(&mut self, element: T, count: usize) -> usize {
        let old = self.count_of(&element);
        if count > old {
            self.add_n(element, count - old)
        } else if count < old {
            self.remove_n(&element, old - count)
        } else {
            old
        }
    }

    /// Compare-and-set: sets the count to `new_count` only if the current
    /// count is exactly `expected`. Returns whether the count was set.
    pub fn set_count_if(&mut self, element: T, expected: usize, new_count: usize) -> bool {
        if self.count_of(&element) == expected {
            self.set_count(element, new_count);
            true
        } else {
            false
        }
    }

    /// Merges another multiset in, entry by entry — the efficient bulk
    /// path when the argument is itself a multiset.
    pub fn add_all(&mut self, other: &impl MultisetView<T>)
    where
        T: Clone,
    {
        for (element, n) in other.entry_iter() {
            self.add_n(element.clone(), n);
        }
    }

    /// Removes every occurrence counted by `other` (entry-wise merge).
    pub fn remove_all_occurrences(&mut self, other: &impl MultisetView<T>) {
        for (element, n) in other.entry_iter() {
            self.remove_n(element, n);
        }
    }

    /// Keeps only the entries for which the predicate returns `true`.
    pub fn retain_entries(&mut self, mut keep: impl FnMut(&T, usize) -> bool) {
        let mut removed = 0;
        self.counts.retain(|element, n| {
            if keep(element, *n) {
                true
            } else {
                removed += *n;
                false
            }
        });
        self.total -= removed;
        self.debug_assert_invariants();
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }

    /// Entry-count/total consistency guard; a divergence here is a bug in
    /// this type, not a user error.
    fn debug_assert_invariants(&self) {
        debug_assert!(
            self.counts.values().all(|&n| n > 0),
            "multiset stored a zero-count entry"
        );
        debug_assert_eq!(
            self.total,
            self.counts.values().sum::<usize>(),
            "multiset total diverged from entry counts"
        );
    }
}

impl<T: Eq + Hash> MultisetView<T> for HashMultiset<T> {
    fn entry_iter(&self) -> Box<dyn Iterator<Item = (&T, usize)> + '_> {
        Box::new(self.counts.iter().map(|(element, &n)| (element, n)))
    }

    fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    fn count(&self, element: &T) -> usize {
        self.count_of(element)
    }

    fn len(&self) -> usize {
        self.total
    }
}

impl<T: Eq + Hash> Default for HashMultiset<T> {
    fn default() -> Self {
        HashMultiset::new()
    }
}

impl<T: Eq + Hash + Clone> Clone for HashMultiset<T> {
    fn clone(&self) -> Self {
        HashMultiset {
            counts: self.counts.clone(),
            total: self.total,
        }
    }
}

impl<T: Eq + Hash> FromIterator<T> for HashMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = HashMultiset::new();
        multiset.extend(iter);
        multiset
    }
}

/// Per-element fallback bulk addition for non-multiset sources.
impl<T: Eq + Hash> Extend<T> for HashMultiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Eq + Hash> PartialEq for HashMultiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_multiset(other)
    }
}

impl<T: Eq + Hash> Eq for HashMultiset<T> {}

impl<T: Eq + Hash> PartialEq<TreeMultiset<T>> for HashMultiset<T>
where
    T: Ord,
{
    fn eq(&self, other: &TreeMultiset<T>) -> bool {
        self.eq_multiset(other)
    }
}

impl<T: Eq + Hash> Hash for HashMultiset<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.multiset_hash());
        state.write_usize(self.distinct_len());
    }
}

impl<T: Eq + Hash + Debug> Debug for HashMultiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entry_iter()).finish()
    }
}

// --- Tree-backed multiset ---

/// A mutable multiset backed by a `BTreeMap`, iterating elements in sorted
/// order. Implements the same [`MultisetView`] primitives as
/// [`HashMultiset`] — every derived operation is shared, not re-coded.
pub struct TreeMultiset<T> {
    counts: BTreeMap<T, usize>,
    total: usize,
}

impl<T: Ord> TreeMultiset<T> {
    /// Creates an empty multiset.
    pub fn new() -> Self {
        TreeMultiset {
            counts: BTreeMap::new(),
            total: 0,
        }
    }

    /// Total number of occurrences.
    #[inline]
    pub fn len(&self) -> usize {
        self.total
    }

    /// Returns `true` if no element is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Occurrences of `element`, zero if absent.
    pub fn count_of<Q>(&self, element: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(element).copied().unwrap_or(0)
    }

    /// Adds one occurrence. Returns the count before the addition.
    pub fn add(&mut self, element: T) -> usize {
        self.add_n(element, 1)
    }

    /// Adds `occurrences` occurrences. Returns the count before.
    pub fn add_n(&mut self, element: T, occurrences: usize) -> usize {
        if occurrences == 0 {
            return self.count_of(&element);
        }
        let slot = self.counts.entry(element).or_insert(0);
        let old = *slot;
        *slot += occurrences;
        self.total += occurrences;
        self.debug_assert_invariants();
        old
    }

    /// Removes one occurrence. Returns `true` if the element was present.
    pub fn remove<Q>(&mut self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.remove_n(element, 1) > 0
    }

    /// Removes up to `occurrences` occurrences. Returns the count before.
    pub fn remove_n<Q>(&mut self, element: &Q, occurrences: usize) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let Some(current) = self.counts.get_mut(element) else {
            return 0;
        };
        let old = *current;
        let removed = occurrences.min(old);
        if removed == old {
            self.counts.remove(element);
        } else {
            *current -= removed;
        }
        self.total -= removed;
        self.debug_assert_invariants();
        old
    }

    /// Sets the count of `element` to exactly `count`, deriving the change
    /// from the add/remove delta. Returns the previous count.
    pub fn set_count(&mut self, element: T, count: usize) -> usize {
        let old = self.count_of(&element);
        if count > old {
            self.add_n(element, count - old)
        } else if count < old {
            self.remove_n(&element, old - count)
        } else {
            old
        }
    }

    /// Compare-and-set: sets the count to `new_count` only if the current
    /// count is exactly `expected`. Returns whether the count was set.
    pub fn set_count_if(&mut self, element: T, expected: usize, new_count: usize) -> bool {
        if self.count_of(&element) == expected {
            self.set_count(element, new_count);
            true
        } else {
            false
        }
    }

    /// Merges another multiset in, entry by entry.
    pub fn add_all(&mut self, other: &impl MultisetView<T>)
    where
        T: Clone,
    {
        for (element, n) in other.entry_iter() {
            self.add_n(element.clone(), n);
        }
    }

    /// Removes every occurrence counted by `other` (entry-wise merge).
    pub fn remove_all_occurrences(&mut self, other: &impl MultisetView<T>) {
        for (element, n) in other.entry_iter() {
            self.remove_n(element, n);
        }
    }

    /// Keeps only the entries for which the predicate returns `true`.
    pub fn retain_entries(&mut self, mut keep: impl FnMut(&T, usize) -> bool) {
        let mut removed = 0;
        self.counts.retain(|element, n| {
            if keep(element, *n) {
                true
            } else {
                removed += *n;
                false
            }
        });
        self.total -= removed;
        self.debug_assert_invariants();
    }

    /// The least element, if any.
    pub fn first(&self) -> Option<&T> {
        self.counts.keys().next()
    }

    /// The greatest element, if any.
    pub fn last(&self) -> Option<&T> {
        self.counts.keys().next_back()
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.counts.clear();
        self.total = 0;
    }

    fn debug_assert_invariants(&self) {
        debug_assert!(
            self.counts.values().all(|&n| n > 0),
            "multiset stored a zero-count entry"
        );
        debug_assert_eq!(
            self.total,
            self.counts.values().sum::<usize>(),
            "multiset total diverged from entry counts"
        );
    }
}

impl<T: Ord> MultisetView<T> for TreeMultiset<T> {
    fn entry_iter(&self) -> Box<dyn Iterator<Item = (&T, usize)> + '_> {
        Box::new(self.counts.iter().map(|(element, &n)| (element, n)))
    }

    fn distinct_len(&self) -> usize {
        self.counts.len()
    }

    fn count(&self, element: &T) -> usize {
        self.count_of(element)
    }

    fn len(&self) -> usize {
        self.total
    }
}

impl<T: Ord> Default for TreeMultiset<T> {
    fn default() -> Self {
        TreeMultiset::new()
    }
}

impl<T: Ord> FromIterator<T> for TreeMultiset<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut multiset = TreeMultiset::new();
        multiset.extend(iter);
        multiset
    }
}

/// Per-element fallback bulk addition for non-multiset sources.
impl<T: Ord> Extend<T> for TreeMultiset<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T: Ord> PartialEq for TreeMultiset<T> {
    fn eq(&self, other: &Self) -> bool {
        self.eq_multiset(other)
    }
}

impl<T: Ord> Eq for TreeMultiset<T> {}

impl<T: Ord + Eq + Hash> PartialEq<HashMultiset<T>> for TreeMultiset<T> {
    fn eq(&self, other: &HashMultiset<T>) -> bool {
        self.eq_multiset(other)
    }
}

impl<T: Ord + Debug> Debug for TreeMultiset<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.entry_iter()).finish()
    }
}

// --- Tests ---
