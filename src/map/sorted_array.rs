//! Map backed by a sorted array and binary search.
//!
//! [`SortedArrayMap`] stores its pairs in one [`DynamicSequence`] kept in
//! strictly ascending key order. Lookups are O(log n); insertions and
//! removals shift the tail of the array and are O(n).

use std::cmp::Ordering;
use std::fmt;

use super::Map;
use crate::error::ContainerError;
use crate::sequence::DynamicSequence;

/// An ordered map stored as a sorted array of `(key, value)` pairs.
///
/// # Time Complexity
///
/// | Operation     | Complexity   |
/// |---------------|--------------|
/// | `at`          | O(log n)     |
/// | `contains`    | O(log n)     |
/// | `insert`      | O(n)         |
/// | `erase`       | O(n)         |
/// | `find_keys`   | O(log n + k) |
/// | `sorted_keys` | O(n)         |
///
/// # Examples
///
/// ```rust
/// use mapkit::map::SortedArrayMap;
///
/// let mut map = SortedArrayMap::new();
/// map.insert(5, "a");
/// map.insert(2, "b");
/// map.insert(8, "c");
/// map.insert(1, "d");
///
/// assert_eq!(map.sorted_keys().as_slice(), &[1, 2, 5, 8]);
/// assert_eq!(map.find_keys(&2, &8).as_slice(), &[2, 5, 8]);
/// assert_eq!(map.at(&8), Ok(&"c"));
/// ```
#[derive(Clone)]
pub struct SortedArrayMap<K, V> {
    pairs: DynamicSequence<(K, V)>,
}

impl<K, V> SortedArrayMap<K, V> {
    /// Creates a new empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            pairs: DynamicSequence::new(),
        }
    }

    /// Creates a new empty map with room for `capacity` pairs.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pairs: DynamicSequence::with_capacity(capacity),
        }
    }

    /// Returns the number of stored pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Returns `true` if no pairs are stored.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Moves the pairs out, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            pairs: self.pairs.take(),
        }
    }
}

impl<K: Ord, V> SortedArrayMap<K, V> {
    /// Binary searches the pairs for `key`.
    ///
    /// Returns `Ok(index)` with the position of the matching pair, or
    /// `Err(index)` with the position of the last pair compared against.
    /// The insertion point for `key` is either that position or the one
    /// after it. An empty map yields `Err(0)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapkit::map::SortedArrayMap;
    ///
    /// let map: SortedArrayMap<i32, ()> = [10, 20, 30].into_iter().map(|key| (key, ())).collect();
    /// assert_eq!(map.bin_search(&20), Ok(1));
    /// assert_eq!(map.bin_search(&25), Err(2));
    /// assert_eq!(map.bin_search(&5), Err(0));
    /// ```
    pub fn bin_search(&self, key: &K) -> Result<usize, usize> {
        let pairs = self.pairs.as_slice();
        let mut start = 0;
        let mut end = pairs.len();
        let mut probe = 0;
        while start < end {
            probe = start + (end - 1 - start) / 2;
            match key.cmp(&pairs[probe].0) {
                Ordering::Equal => return Ok(probe),
                Ordering::Less => end = probe,
                Ordering::Greater => start = probe + 1,
            }
        }
        Err(probe)
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn at(&self, key: &K) -> Result<&V, ContainerError> {
        let index = self
            .bin_search(key)
            .map_err(|_| ContainerError::KeyNotFound)?;
        self.pairs.at(index).map(|(_, value)| value)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, ContainerError> {
        let index = self
            .bin_search(key)
            .map_err(|_| ContainerError::KeyNotFound)?;
        self.pairs.at_mut(index).map(|(_, value)| value)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.bin_search(key).is_ok()
    }

    /// Inserts `(key, value)` at its sorted position.
    ///
    /// The key must not already be present. If it is, the new pair is
    /// placed directly after the existing one and the map no longer has
    /// strictly ascending keys.
    pub fn insert(&mut self, key: K, value: V) {
        let index = match self.bin_search(&key) {
            Ok(found) => found + 1,
            Err(probe) => {
                let probed_is_greater = self
                    .pairs
                    .as_slice()
                    .get(probe)
                    .is_none_or(|(probed, _)| *probed > key);
                if probed_is_greater { probe } else { probe + 1 }
            }
        };
        if self.pairs.insert((key, value), index).is_err() {
            unreachable!("binary search probe lies within the pairs");
        }
    }

    /// Removes the pair stored under `key` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn erase(&mut self, key: &K) -> Result<V, ContainerError> {
        let index = self
            .bin_search(key)
            .map_err(|_| ContainerError::KeyNotFound)?;
        self.pairs.erase(index).map(|(_, value)| value)
    }

    /// Returns the first index whose key is not below `low`.
    fn lower_bound(&self, low: &K) -> usize {
        match self.bin_search(low) {
            Ok(found) => found,
            Err(probe) => match self.pairs.as_slice().get(probe) {
                Some((probed, _)) if probed < low => probe + 1,
                _ => probe,
            },
        }
    }

    /// Returns the first index whose key is above `high`.
    fn upper_bound(&self, high: &K) -> usize {
        match self.bin_search(high) {
            Ok(found) => found + 1,
            Err(probe) => match self.pairs.as_slice().get(probe) {
                Some((probed, _)) if probed > high => probe,
                Some(_) => probe + 1,
                None => probe,
            },
        }
    }
}

impl<K: Ord + Clone, V> SortedArrayMap<K, V> {
    /// Returns the keys `k` with `low <= k <= high` in ascending order.
    ///
    /// Binary search locates both ends of the range; the pairs in between
    /// are then scanned linearly.
    pub fn find_keys(&self, low: &K, high: &K) -> DynamicSequence<K> {
        let mut keys = DynamicSequence::new();
        if self.is_empty() || low > high {
            return keys;
        }
        let start = self.lower_bound(low);
        let end = self.upper_bound(high);
        if start < end {
            keys.extend(self.pairs.as_slice()[start..end].iter().map(|(key, _)| key.clone()));
        }
        keys
    }

    /// Returns every key in ascending order.
    pub fn sorted_keys(&self) -> DynamicSequence<K> {
        self.pairs
            .as_slice()
            .iter()
            .map(|(key, _)| key.clone())
            .collect()
    }
}

// =============================================================================
// Map Contract
// =============================================================================

impl<K: Ord + Clone, V> Map<K, V> for SortedArrayMap<K, V> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn at(&self, key: &K) -> Result<&V, ContainerError> {
        Self::at(self, key)
    }

    fn at_mut(&mut self, key: &K) -> Result<&mut V, ContainerError> {
        Self::at_mut(self, key)
    }

    fn insert(&mut self, key: K, value: V) {
        Self::insert(self, key, value);
    }

    fn erase(&mut self, key: &K) -> Result<V, ContainerError> {
        Self::erase(self, key)
    }

    fn contains(&self, key: &K) -> bool {
        Self::contains(self, key)
    }

    fn find_keys(&self, low: &K, high: &K) -> DynamicSequence<K> {
        Self::find_keys(self, low, high)
    }

    fn sorted_keys(&self) -> DynamicSequence<K> {
        Self::sorted_keys(self)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for SortedArrayMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for SortedArrayMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for SortedArrayMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SortedArrayMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.pairs.as_slice().iter().map(|(key, value)| (key, value)))
            .finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for SortedArrayMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.pairs.as_slice().iter().map(|(key, value)| (key, value)))
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for SortedArrayMap<K, V>
where
    K: serde::Deserialize<'de> + Ord + Clone,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(super::serde_support::MapVisitor::new("a sorted array map"))
    }
}

// =============================================================================
// Tests
// =============================================================================
