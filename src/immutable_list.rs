//! An immutable, randomly-accessible list with shared backing storage.
//!
//! [`ImmutableList`] never changes after construction. Cloning is an `Arc`
//! bump, and [`ImmutableList::sub_list`] produces a window over the same
//! backing allocation instead of copying — the sub-list is a *partial view*
//! of its parent and keeps the whole allocation alive.

use std::fmt::{self, Debug};
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::ops::{Index, Range};
use std::slice;
use std::sync::Arc;

/// An immutable list of `T`.
///
/// # Invariants
/// * Size is fixed at construction; no operation mutates observable content.
/// * Iteration order is the construction order and is stable across
///   traversals.
///
/// # Representation
/// A shared `Arc<[T]>` plus a `[start, end)` window. A full-range list owns
/// its window; a proper sub-range (or a list derived from another container)
/// is a partial view sharing the parent's storage.
pub struct ImmutableList<T> {
    backing: Arc<[T]>,
    start: usize,
    end: usize,
    partial: bool,
}

impl<T> ImmutableList<T> {
    /// Creates the canonical empty list.
    pub fn new() -> Self {
        ImmutableList {
            backing: Arc::from(Vec::new()),
            start: 0,
            end: 0,
            partial: false,
        }
    }

    /// Creates a list holding exactly one element.
    pub fn of(value: T) -> Self {
        ImmutableList::from(vec![value])
    }

    /// Wraps storage shared with another container.
    ///
    /// Used by the set/map view methods; the resulting list reports itself
    /// as a partial view because it does not exclusively own the backing.
    pub(crate) fn from_shared(backing: Arc<[T]>) -> Self {
        let end = backing.len();
        ImmutableList {
            backing,
            start: 0,
            end,
            partial: true,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns the element at `index`, or `None` if out of bounds.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Returns the first element, or `None` if empty.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Returns the last element, or `None` if empty.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Views the list as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.backing[self.start..self.end]
    }

    /// Returns an iterator over the elements in order.
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns the sub-list covering `range`.
    ///
    /// * The full range returns this list itself (no allocation).
    /// * An empty range returns the canonical empty list.
    /// * Any other range returns a partial view sharing this list's backing
    ///   storage.
    ///
    /// # Panics
    /// Panics if the range is out of bounds or inverted.
    pub fn sub_list(&self, range: Range<usize>) -> ImmutableList<T> {
        let len = self.len();
        assert!(
            range.start <= range.end && range.end <= len,
            "sub_list range {}..{} out of bounds for length {}",
            range.start,
            range.end,
            len
        );
        if range.start == 0 && range.end == len {
            return self.clone();
        }
        if range.start == range.end {
            return ImmutableList::new();
        }
        ImmutableList {
            backing: Arc::clone(&self.backing),
            start: self.start + range.start,
            end: self.start + range.end,
            partial: true,
        }
    }

    /// Returns `true` if this list wraps storage it does not exclusively
    /// own (a sub-list window or a view derived from another container).
    ///
    /// Callers performing deep-copy optimizations may copy a non-partial
    /// list by reference but must materialize a partial one.
    pub fn is_partial_view(&self) -> bool {
        self.partial
    }
}

impl<T> Clone for ImmutableList<T> {
    fn clone(&self) -> Self {
        ImmutableList {
            backing: Arc::clone(&self.backing),
            start: self.start,
            end: self.end,
            partial: self.partial,
        }
    }
}

impl<T> Default for ImmutableList<T> {
    fn default() -> Self {
        ImmutableList::new()
    }
}

impl<T> From<Vec<T>> for ImmutableList<T> {
    fn from(values: Vec<T>) -> Self {
        let backing: Arc<[T]> = values.into();
        let end = backing.len();
        ImmutableList {
            backing,
            start: 0,
            end,
            partial: false,
        }
    }
}

impl<T> FromIterator<T> for ImmutableList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        ImmutableList::from(iter.into_iter().collect::<Vec<T>>())
    }
}

/// Read access via `list[index]`.
///
/// # Panics
/// Panics if `index` is out of bounds.
impl<T> Index<usize> for ImmutableList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<'a, T> IntoIterator for &'a ImmutableList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: PartialEq> PartialEq for ImmutableList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for ImmutableList<T> {}

impl<T: PartialEq> PartialEq<[T]> for ImmutableList<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq> PartialEq<Vec<T>> for ImmutableList<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Hash> Hash for ImmutableList<T> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_slice().hash(state);
    }
}

impl<T: Debug> Debug for ImmutableList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

// --- Tests ---
