//! Insertion-ordered set with first-seen-wins semantics
//!
//! Merged document fields (identifier lists, name lists, unions of registry
//! fields) must be deduplicated without losing the order entries were first
//! encountered in, since the first entry in canonical order is the one that
//! wins. A plain `HashSet` loses that order, so this keeps a sequence
//! alongside the membership set.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

/// An insertion-ordered set: duplicates are ignored, first occurrence wins
#[derive(Debug, Clone, Default)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    seen: HashSet<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    /// Create an empty set
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Insert a value, returning true if it was not already present
    pub fn insert(&mut self, value: T) -> bool {
        if self.seen.insert(value.clone()) {
            self.items.push(value);
            true
        } else {
            false
        }
    }

    /// Check membership
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.seen.contains(value)
    }

    /// Iterate values in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Values in insertion order
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the set, yielding values in insertion order
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// First value in insertion order
    pub fn first(&self) -> Option<&T> {
        self.items.first()
    }
}

impl<T: Eq + Hash + Clone> Extend<T> for OrderedSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<T: Eq + Hash + Clone> FromIterator<T> for OrderedSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> IntoIterator for OrderedSet<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: Eq + Hash> PartialEq for OrderedSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl<T: Eq + Hash> Eq for OrderedSet<T> {}
