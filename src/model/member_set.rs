//! Unordered set of guild member identifiers.

use std::collections::hash_set::{IntoIter, Iter};
use std::collections::HashSet;
use std::hash::Hash;

/// Unordered collection of comparable identifiers.
///
/// Used to represent "who holds the managed role" and "who is in a voice channel". Two sets
/// are equal when they contain the same elements, regardless of insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberSet<T: Eq + Hash> {
    members: HashSet<T>,
}

impl<T: Eq + Hash> MemberSet<T> {
    pub fn new() -> Self {
        Self {
            members: HashSet::new(),
        }
    }

    /// Inserts an element. Adding an element that is already present is a no-op.
    pub fn add(&mut self, member: T) {
        self.members.insert(member);
    }

    pub fn contains(&self, member: &T) -> bool {
        self.members.contains(member)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.members.iter()
    }
}

impl<T: Eq + Hash + Clone> MemberSet<T> {
    /// Adds every element of `other` to this set.
    pub fn union(&mut self, other: &MemberSet<T>) {
        self.members.extend(other.members.iter().cloned());
    }

    /// Returns the elements of this set that are absent from `other`.
    ///
    /// Asymmetric: `a.diff(&b)` and `b.diff(&a)` generally differ. Neither set is modified.
    pub fn diff(&self, other: &MemberSet<T>) -> MemberSet<T> {
        self.members
            .iter()
            .filter(|member| !other.contains(member))
            .cloned()
            .collect()
    }
}

impl<T: Eq + Hash> Default for MemberSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Eq + Hash> FromIterator<T> for MemberSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            members: iter.into_iter().collect(),
        }
    }
}

impl<T: Eq + Hash, const N: usize> From<[T; N]> for MemberSet<T> {
    fn from(members: [T; N]) -> Self {
        members.into_iter().collect()
    }
}

impl<T: Eq + Hash> Extend<T> for MemberSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.members.extend(iter);
    }
}

impl<T: Eq + Hash> IntoIterator for MemberSet<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a, T: Eq + Hash> IntoIterator for &'a MemberSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
