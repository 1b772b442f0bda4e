//! Composable comparator values behind a uniform [`Ordering`] trait.
//!
//! A comparator here is a plain value, not a trait object: `Natural` compares
//! through `Ord`, [`Reverse`] flips an inner comparator, [`ByKey`] compares by
//! an extracted key, [`Comparing`] wraps a comparison function, and
//! [`AllEqual`] treats every pair as equal. The sorted multimap flavor stores
//! one of these per value collection (see [`crate::multimap::SortedValues`]).

use std::cmp::Ordering as CmpOrdering;
use std::fmt::{self, Debug};
use std::ptr;

/// A total order over values of type `T`.
///
/// `compare(a, b)` must be antisymmetric and transitive to the same degree as
/// the wrapped comparison. All other methods are derived from `compare`.
pub trait Ordering<T> {
    /// Compares two values.
    fn compare(&self, a: &T, b: &T) -> CmpOrdering;

    /// Returns a sorted copy of `items`.
    ///
    /// The sort is **stable**: items that compare equal keep their input
    /// order. The input is consumed; the result is always a fresh `Vec`.
    fn sorted_copy(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let mut copy: Vec<T> = items.into_iter().collect();
        copy.sort_by(|a, b| self.compare(a, b));
        copy
    }

    /// Returns `true` if `items` is in non-descending order under this
    /// ordering.
    fn is_ordered(&self, items: &[T]) -> bool {
        items
            .windows(2)
            .all(|pair| self.compare(&pair[0], &pair[1]) != CmpOrdering::Greater)
    }

    /// Returns the greatest element, or `None` if `items` is empty.
    ///
    /// Ties are broken in favor of the earliest element.
    fn max_of<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> Option<&'a T>
    where
        T: 'a,
    {
        items.into_iter().reduce(|best, next| {
            if self.compare(next, best) == CmpOrdering::Greater {
                next
            } else {
                best
            }
        })
    }

    /// Returns the least element, or `None` if `items` is empty.
    ///
    /// Ties are broken in favor of the earliest element.
    fn min_of<'a>(&self, items: impl IntoIterator<Item = &'a T>) -> Option<&'a T>
    where
        T: 'a,
    {
        items.into_iter().reduce(|best, next| {
            if self.compare(next, best) == CmpOrdering::Less {
                next
            } else {
                best
            }
        })
    }

    /// Wraps this ordering so every comparison is flipped.
    fn reverse(self) -> Reverse<Self>
    where
        Self: Sized,
    {
        Reverse(self)
    }
}

/// The natural order of `T: Ord`.
///
/// Also serves as the explicit "natural order" sentinel returned by
/// `SortedSetMultimap::value_comparator`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Natural;

impl<T: Ord> Ordering<T> for Natural {
    fn compare(&self, a: &T, b: &T) -> CmpOrdering {
        a.cmp(b)
    }
}

/// An ordering that flips every comparison of the inner ordering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Reverse<O>(pub O);

impl<T, O: Ordering<T>> Ordering<T> for Reverse<O> {
    fn compare(&self, a: &T, b: &T) -> CmpOrdering {
        self.0.compare(b, a)
    }
}

/// A degenerate ordering that treats all values as equal.
///
/// Sorting under it is a no-op that preserves input order. `sorted_copy`
/// returns a plain copy rather than running a sort at all, so the input
/// sequence is never reordered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AllEqual;

impl<T> Ordering<T> for AllEqual {
    fn compare(&self, _a: &T, _b: &T) -> CmpOrdering {
        CmpOrdering::Equal
    }

    fn sorted_copy(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items.into_iter().collect()
    }
}

/// An ordering defined by an arbitrary comparison function.
#[derive(Clone, Copy, Debug)]
pub struct Comparing<F>(F);

impl<F> Comparing<F> {
    pub fn new<T>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> CmpOrdering,
    {
        Comparing(compare)
    }
}

impl<T, F: Fn(&T, &T) -> CmpOrdering> Ordering<T> for Comparing<F> {
    fn compare(&self, a: &T, b: &T) -> CmpOrdering {
        (self.0)(a, b)
    }
}

/// An ordering that compares values by a key extracted from them:
/// `compare(a, b) = inner.compare(key(a), key(b))`.
///
/// The extractor is a plain `fn` pointer so that two `ByKey` values can be
/// compared structurally: they are equal iff both the extraction function and
/// the inner ordering are equal. This is what lets memoized comparators be
/// deduplicated by callers.
pub struct ByKey<T, K, O> {
    key: fn(&T) -> K,
    inner: O,
}

impl<T, K, O> ByKey<T, K, O> {
    pub fn new(key: fn(&T) -> K, inner: O) -> Self {
        ByKey { key, inner }
    }

    /// The inner ordering applied to extracted keys.
    pub fn inner(&self) -> &O {
        &self.inner
    }
}

impl<T, K, O: Ordering<K>> Ordering<T> for ByKey<T, K, O> {
    fn compare(&self, a: &T, b: &T) -> CmpOrdering {
        self.inner.compare(&(self.key)(a), &(self.key)(b))
    }
}

// Manual impls: deriving would wrongly require `T: Clone` / `K: Clone` even
// though only the fn pointer and the inner ordering are stored.
impl<T, K, O: Clone> Clone for ByKey<T, K, O> {
    fn clone(&self) -> Self {
        ByKey {
            key: self.key,
            inner: self.inner.clone(),
        }
    }
}

impl<T, K, O: Copy> Copy for ByKey<T, K, O> {}

impl<T, K, O: Debug> Debug for ByKey<T, K, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ByKey")
            .field("key", &self.key)
            .field("inner", &self.inner)
            .finish()
    }
}

impl<T, K, O: PartialEq> PartialEq for ByKey<T, K, O> {
    fn eq(&self, other: &Self) -> bool {
        ptr::fn_addr_eq(self.key, other.key) && self.inner == other.inner
    }
}

impl<T, K, O: Eq> Eq for ByKey<T, K, O> {}

/// Shorthand for [`ByKey::new`].
pub fn by_key<T, K, O: Ordering<K>>(key: fn(&T) -> K, inner: O) -> ByKey<T, K, O> {
    ByKey::new(key, inner)
}

// --- Tests ---
