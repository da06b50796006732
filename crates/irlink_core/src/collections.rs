//! Insertion-ordered collections used throughout the linker.
//!
//! Everything the dependency index hands back to downstream linking must be
//! reproducible run over run, so these types never expose hash order.

use indexmap::IndexMap;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::hash::Hash;

/// A duplicate-free set that iterates in first-insertion order.
#[derive(Debug, Clone)]
pub struct OrderedSet<T> {
    items: Vec<T>,
    index: FxHashSet<T>,
}

impl<T: Eq + Hash + Clone> OrderedSet<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: FxHashSet::default(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            index: FxHashSet::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Insert a value, returning `true` if it was not already present.
    /// Re-inserting keeps the original position.
    pub fn insert(&mut self, value: T) -> bool {
        if !self.index.insert(value.clone()) {
            return false;
        }
        self.items.push(value);
        true
    }

    /// Remove a value, preserving the relative order of the rest.
    pub fn remove(&mut self, value: &T) -> bool {
        if !self.index.remove(value) {
            return false;
        }
        self.items.retain(|item| item != value);
        true
    }

    pub fn contains(&self, value: &T) -> bool {
        self.index.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Copy the current contents out, so the set can be mutated while the
    /// copy is walked.
    pub fn snapshot(&self) -> Vec<T> {
        self.items.clone()
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }
}

impl<T: Eq + Hash + Clone> Default for OrderedSet<T> {
    fn default() -> Self {
        Self::new()
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

impl<'a, T> IntoIterator for &'a OrderedSet<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// An ordered map from a key to an ordered set of members.
///
/// Keys keep the order in which they were first grouped; members of each
/// group keep their own first-insertion order.
#[derive(Debug, Clone)]
pub struct OrderedGroups<K, V> {
    groups: IndexMap<K, OrderedSet<V>, FxBuildHasher>,
}

impl<K: Eq + Hash, V: Eq + Hash + Clone> OrderedGroups<K, V> {
    pub fn new() -> Self {
        Self {
            groups: IndexMap::with_hasher(FxBuildHasher),
        }
    }

    /// Add `value` to the group for `key`, creating the group on first use.
    /// Returns `true` if the value was new to that group.
    pub fn insert(&mut self, key: K, value: V) -> bool {
        self.groups.entry(key).or_default().insert(value)
    }

    /// Members of a group, or an empty slice if the key was never grouped.
    pub fn get(&self, key: &K) -> &[V] {
        self.groups.get(key).map(OrderedSet::as_slice).unwrap_or(&[])
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.groups.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.groups.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[V])> {
        self.groups.iter().map(|(k, v)| (k, v.as_slice()))
    }

    /// Drop a whole group, keeping the order of the remaining keys.
    pub fn remove_group(&mut self, key: &K) -> Option<OrderedSet<V>> {
        self.groups.shift_remove(key)
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of members across all groups.
    pub fn member_count(&self) -> usize {
        self.groups.values().map(OrderedSet::len).sum()
    }
}

impl<K: Eq + Hash, V: Eq + Hash + Clone> Default for OrderedGroups<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordered_set_preserves_first_insertion() {
        let mut set = OrderedSet::new();
        assert!(set.insert("c"));
        assert!(set.insert("a"));
        assert!(set.insert("b"));
        assert!(!set.insert("c"));

        assert_eq!(set.as_slice(), &["c", "a", "b"]);
    }

    #[test]
    fn test_ordered_set_remove_keeps_order() {
        let mut set: OrderedSet<u32> = [5, 1, 9, 3].into_iter().collect();
        assert!(set.remove(&1));
        assert!(!set.remove(&1));
        assert_eq!(set.as_slice(), &[5, 9, 3]);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut set: OrderedSet<u32> = [1, 2].into_iter().collect();
        let snapshot = set.snapshot();
        set.insert(3);
        assert_eq!(snapshot, vec![1, 2]);
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_ordered_groups() {
        let mut groups = OrderedGroups::new();
        assert!(groups.insert("b", 1));
        assert!(groups.insert("a", 2));
        assert!(groups.insert("b", 3));
        assert!(!groups.insert("b", 1));

        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(groups.get(&"b"), &[1, 3]);
        assert_eq!(groups.get(&"missing"), &[] as &[i32]);
        assert_eq!(groups.member_count(), 3);
    }

    #[test]
    fn test_remove_group() {
        let mut groups = OrderedGroups::new();
        groups.insert(1, 'x');
        groups.insert(2, 'y');
        groups.insert(3, 'z');
        assert!(groups.remove_group(&2).is_some());
        assert_eq!(groups.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
    }
}
