//! Key-value maps sharing one contract.
//!
//! This module provides the [`Map`] contract and three interchangeable
//! implementations that differ only in representation and complexity:
//!
//! - [`SortedArrayMap`]: pairs kept in ascending key order in a
//!   [`DynamicSequence`], located by binary search
//! - [`TreeMap`]: unbalanced binary search tree of owned nodes
//! - [`HashMap`]: separate-chaining hash table with load-factor driven
//!   growth
//!
//! None of the maps checks for an existing key on `insert`; callers are
//! responsible for key uniqueness.
//!
//! # Examples
//!
//! ```rust
//! use mapkit::map::{HashMap, Map, SortedArrayMap, TreeMap};
//!
//! fn fill<M: Map<i32, &'static str>>(map: &mut M) {
//!     map.insert(5, "a");
//!     map.insert(2, "b");
//!     map.insert(8, "c");
//!     map.insert(1, "d");
//! }
//!
//! let mut sorted = SortedArrayMap::new();
//! let mut tree = TreeMap::new();
//! let mut hash: HashMap<i32, &str> = HashMap::new();
//! fill(&mut sorted);
//! fill(&mut tree);
//! fill(&mut hash);
//!
//! assert_eq!(sorted.sorted_keys().as_slice(), &[1, 2, 5, 8]);
//! assert_eq!(tree.sorted_keys(), sorted.sorted_keys());
//! assert_eq!(hash.sorted_keys(), sorted.sorted_keys());
//! assert_eq!(sorted.find_keys(&2, &8).as_slice(), &[2, 5, 8]);
//! ```

use crate::error::ContainerError;
use crate::sequence::DynamicSequence;

mod config;
mod hash;
#[cfg(feature = "serde")]
mod serde_support;
mod sorted_array;
mod tree;

pub use config::HashMapConfig;
pub use hash::DefaultHashBuilder;
pub use hash::HashMap;
pub use sorted_array::SortedArrayMap;
pub use tree::TreeMap;

/// An associative container from keys to values.
///
/// Keys are totally ordered so every implementation can answer range and
/// ordered-key queries, whatever its internal layout.
pub trait Map<K, V> {
    /// Returns the number of stored pairs.
    fn len(&self) -> usize;

    /// Returns `true` if no pairs are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    fn at(&self, key: &K) -> Result<&V, ContainerError>;

    /// Returns a mutable reference to the value stored under `key`, allowing
    /// it to be updated in place.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    fn at_mut(&mut self, key: &K) -> Result<&mut V, ContainerError>;

    /// Adds the pair `(key, value)`.
    ///
    /// The key must not already be present; no duplicate check is performed.
    fn insert(&mut self, key: K, value: V);

    /// Removes the pair stored under `key` and returns its value.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent; the map
    /// is not modified.
    fn erase(&mut self, key: &K) -> Result<V, ContainerError>;

    /// Returns `true` if `key` is present.
    fn contains(&self, key: &K) -> bool;

    /// Returns every key `k` with `low <= k <= high`, each exactly once.
    fn find_keys(&self, low: &K, high: &K) -> DynamicSequence<K>;

    /// Returns every key in strictly ascending order.
    fn sorted_keys(&self) -> DynamicSequence<K>;
}
