// Copyright 2026 the Stratum Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A deliberately naive tag map for a dozen entries.
//!
//! The differentiator needs a scratch `Tag → value` lookup per tree level. The
//! live set is tiny (the number of children that moved or appeared), and the
//! dominant operation is insertion when a batch of views appears for the first
//! time. A hash map pays for hashing, buckets, and rehashing; [`TinyMap`] pays
//! for nothing but a linear scan over an inline array.
//!
//! - [`insert`](TinyMap::insert) appends.
//! - [`find`](TinyMap::find) scans from the front.
//! - [`erase`](TinyMap::erase) overwrites the key with `0` (a tombstone)
//!   instead of compacting, so slot positions of the remaining entries stay
//!   valid.
//!
//! Zero is never a valid tag.

use smallvec::SmallVec;

use crate::node::Tag;

/// Number of entries stored inline before spilling to the heap.
pub const INLINE_CAPACITY: usize = 16;

/// Tombstone key of an erased slot.
const ERASED: Tag = 0;

/// Linear-scan map from non-zero tags to values.
#[derive(Clone, Debug)]
pub struct TinyMap<V> {
    entries: SmallVec<[(Tag, V); INLINE_CAPACITY]>,
}

impl<V> Default for TinyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> TinyMap<V> {
    /// Creates an empty map.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: SmallVec::new(),
        }
    }

    /// Appends an entry.
    ///
    /// Duplicate keys are not detected; [`find`](Self::find) returns the
    /// earliest live one.
    ///
    /// # Panics
    ///
    /// Panics if `key` is zero.
    #[inline]
    pub fn insert(&mut self, key: Tag, value: V) {
        assert!(key != ERASED, "zero is not a valid tag");
        self.entries.push((key, value));
    }

    /// Returns the slot position of the first live entry with `key`.
    #[inline]
    #[must_use]
    pub fn find(&self, key: Tag) -> Option<usize> {
        if key == ERASED {
            return None;
        }
        self.entries.iter().position(|(k, _)| *k == key)
    }

    /// Returns the value of the first live entry with `key`.
    #[inline]
    #[must_use]
    pub fn get(&self, key: Tag) -> Option<&V> {
        self.find(key).map(|slot| &self.entries[slot].1)
    }

    /// Returns `true` if a live entry with `key` exists.
    #[inline]
    #[must_use]
    pub fn contains_key(&self, key: Tag) -> bool {
        self.find(key).is_some()
    }

    /// Returns the value stored at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    #[must_use]
    pub fn value(&self, slot: usize) -> &V {
        &self.entries[slot].1
    }

    /// Tombstones the entry at `slot`.
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range.
    #[inline]
    pub fn erase(&mut self, slot: usize) {
        self.entries[slot].0 = ERASED;
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|(k, _)| *k != ERASED).count()
    }

    /// Returns `true` if there are no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of slots, including tombstones.
    #[must_use]
    pub fn slots(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over live entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (Tag, &V)> + '_ {
        self.entries
            .iter()
            .filter(|(k, _)| *k != ERASED)
            .map(|(k, v)| (*k, v))
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::*;

    #[test]
    fn insert_and_find() {
        let mut map = TinyMap::new();
        map.insert(10, 'a');
        map.insert(20, 'b');
        assert_eq!(map.find(10), Some(0));
        assert_eq!(map.find(20), Some(1));
        assert_eq!(map.get(20), Some(&'b'));
        assert_eq!(map.find(30), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn erase_tombstones_without_shifting() {
        let mut map = TinyMap::new();
        map.insert(1, 100);
        map.insert(2, 200);
        map.insert(3, 300);

        let slot = map.find(2).unwrap();
        map.erase(slot);

        assert!(!map.contains_key(2));
        assert_eq!(map.find(3), Some(2), "later slots keep their position");
        assert_eq!(*map.value(2), 300);
        assert_eq!(map.len(), 2);
        assert_eq!(map.slots(), 3);
        assert_eq!(map.iter().map(|(k, _)| k).collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn zero_is_never_found() {
        let mut map = TinyMap::new();
        map.insert(5, ());
        map.erase(0);
        assert_eq!(map.find(0), None);
        assert!(map.is_empty());
    }

    #[test]
    fn spills_past_inline_capacity() {
        let mut map = TinyMap::new();
        for tag in 1..=40 {
            map.insert(tag, tag * 2);
        }
        assert_eq!(map.len(), 40);
        assert_eq!(map.get(33), Some(&66));
    }

    #[test]
    #[should_panic(expected = "zero is not a valid tag")]
    fn zero_key_panics() {
        let mut map = TinyMap::new();
        map.insert(0, ());
    }
}
