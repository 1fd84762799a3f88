//! Map backed by a separate-chaining hash table.
//!
//! [`HashMap`] keeps a table of slots, each the head of a singly linked
//! chain of nodes. A pair lives in slot `hash(key) % capacity`; new pairs are
//! prepended to their chain.
//!
//! - O(1) average `at`, `insert`, `erase`
//! - O(n) `find_keys`, O(n log n) `sorted_keys`
//!
//! # Growth
//!
//! Before an insert would bring the load factor (`len / capacity`) to the
//! configured threshold (0.60 by default), the capacity doubles and every
//! stored node is moved to the slot its hash selects in the larger table.
//! Chain order is not preserved across growth.
//!
//! # Hashing
//!
//! The default hasher is [`DefaultHashBuilder`]: the standard library's
//! deterministic `DefaultHasher`, or `rustc-hash`'s Fx hasher with the
//! `fxhash` feature, or `ahash` with the `ahash` feature.

use std::fmt;
use std::hash::{BuildHasher, Hash};
use std::iter;
use std::mem;

use super::Map;
use super::config::HashMapConfig;
use crate::error::{ConfigError, ContainerError};
use crate::sequence::DynamicSequence;

// =============================================================================
// Hasher Selection
// =============================================================================

/// Hash builder used when none is given.
#[cfg(feature = "fxhash")]
pub type DefaultHashBuilder = rustc_hash::FxBuildHasher;

/// Hash builder used when none is given.
#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub type DefaultHashBuilder = ahash::RandomState;

/// Hash builder used when none is given.
#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub type DefaultHashBuilder =
    std::hash::BuildHasherDefault<std::collections::hash_map::DefaultHasher>;

// =============================================================================
// Chain Definition
// =============================================================================

type Chain<K, V> = Option<Box<ChainNode<K, V>>>;

#[derive(Clone)]
struct ChainNode<K, V> {
    key: K,
    value: V,
    next: Chain<K, V>,
}

fn empty_table<K, V>(capacity: usize) -> Vec<Chain<K, V>> {
    iter::repeat_with(|| None).take(capacity).collect()
}

/// Unlinks every chain node by node, so a long chain is not dropped
/// recursively.
fn release_chains<K, V>(table: &mut [Chain<K, V>]) {
    for chain in table {
        let mut next = chain.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
    }
}

fn chain_nodes<K, V>(chain: &Chain<K, V>) -> impl Iterator<Item = &ChainNode<K, V>> {
    iter::successors(chain.as_deref(), |node| node.next.as_deref())
}

// =============================================================================
// HashMap Definition
// =============================================================================

/// A hash map with separate chaining and incremental doubling.
///
/// `insert` never checks whether the key is already present. Inserting an
/// existing key prepends a second node that shadows the first: lookups see
/// the newer value, `len` counts both, and erasing the newer node exposes
/// the older one again.
///
/// # Time Complexity
///
/// | Operation     | Average        | Worst      |
/// |---------------|----------------|------------|
/// | `at`          | O(1)           | O(n)       |
/// | `insert`      | O(1) amortized | O(n)       |
/// | `erase`       | O(1)           | O(n)       |
/// | `find_keys`   | O(n + m)       | O(n + m)   |
/// | `sorted_keys` | O(n log n + m) | O(n log n + m) |
///
/// where `m` is the capacity.
///
/// # Examples
///
/// ```rust
/// use mapkit::map::HashMap;
///
/// let mut map: HashMap<&str, i32> = HashMap::new();
/// map.insert("one", 1);
/// map.insert("two", 2);
///
/// assert_eq!(map.at(&"one"), Ok(&1));
/// *map.at_mut(&"two").unwrap() += 40;
/// assert_eq!(map.at(&"two"), Ok(&42));
/// assert_eq!(map.sorted_keys().as_slice(), &["one", "two"]);
/// ```
#[derive(Clone)]
pub struct HashMap<K, V, S = DefaultHashBuilder> {
    /// Slot heads; the capacity is `table.len()`
    table: Vec<Chain<K, V>>,
    /// Number of nodes across every chain
    length: usize,
    config: HashMapConfig,
    hash_builder: S,
}

impl<K, V> HashMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map with 16 slots and a 0.60 load factor threshold.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }

    /// Creates an empty map sized by `config`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`HashMapConfig::validate`].
    pub fn with_config(config: HashMapConfig) -> Result<Self, ConfigError> {
        Self::with_config_and_hasher(config, DefaultHashBuilder::default())
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty map with the default configuration that hashes keys
    /// with `hash_builder`.
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::build(HashMapConfig::default(), hash_builder)
    }

    /// Creates an empty map sized by `config` that hashes keys with
    /// `hash_builder`.
    ///
    /// # Errors
    ///
    /// Returns the [`ConfigError`] reported by [`HashMapConfig::validate`].
    pub fn with_config_and_hasher(
        config: HashMapConfig,
        hash_builder: S,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, hash_builder))
    }

    fn build(config: HashMapConfig, hash_builder: S) -> Self {
        Self {
            table: empty_table(config.initial_capacity),
            length: 0,
            config,
            hash_builder,
        }
    }

    /// Returns the number of stored pairs, shadowed duplicates included.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no pairs are stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of slots.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.table.len()
    }

    /// Returns `len / capacity`.
    #[allow(clippy::cast_precision_loss)]
    pub fn load_factor(&self) -> f64 {
        self.length as f64 / self.table.len() as f64
    }

    /// Returns the configuration this map was built with.
    pub const fn config(&self) -> &HashMapConfig {
        &self.config
    }

    /// Returns the hash builder.
    pub const fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Drops every pair and shrinks the table back to its initial capacity.
    pub fn clear(&mut self) {
        release_chains(&mut self.table);
        self.table = empty_table(self.config.initial_capacity);
        self.length = 0;
    }

    /// Moves the table out, leaving `self` empty at its initial capacity.
    #[must_use]
    pub fn take(&mut self) -> Self
    where
        S: Clone,
    {
        let fresh = Self::build(self.config, self.hash_builder.clone());
        mem::replace(self, fresh)
    }

    /// Returns the length of the shortest non-empty chain, or 0 when every
    /// slot is empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapkit::map::HashMap;
    ///
    /// let mut map: HashMap<i32, ()> = HashMap::new();
    /// assert_eq!(map.min_chain_length(), 0);
    /// map.insert(7, ());
    /// assert_eq!(map.min_chain_length(), 1);
    /// ```
    pub fn min_chain_length(&self) -> usize {
        self.chain_lengths()
            .filter(|&length| length > 0)
            .min()
            .unwrap_or(0)
    }

    /// Returns the length of the longest chain.
    pub fn max_chain_length(&self) -> usize {
        self.chain_lengths().max().unwrap_or(0)
    }

    /// Returns the number of pairs divided by the number of non-empty slots,
    /// or 0.0 when every slot is empty.
    #[allow(clippy::cast_precision_loss)]
    pub fn avg_chain_length(&self) -> f64 {
        let (nodes, occupied) = self
            .chain_lengths()
            .filter(|&length| length > 0)
            .fold((0_usize, 0_usize), |(nodes, occupied), length| {
                (nodes + length, occupied + 1)
            });
        if occupied == 0 {
            0.0
        } else {
            nodes as f64 / occupied as f64
        }
    }

    fn chain_lengths(&self) -> impl Iterator<Item = usize> + '_ {
        self.table.iter().map(|chain| chain_nodes(chain).count())
    }

    /// Visits every node in table order, each chain newest first.
    fn nodes(&self) -> impl Iterator<Item = &ChainNode<K, V>> {
        self.table.iter().flat_map(chain_nodes)
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> HashMap<K, V, S> {
    #[allow(clippy::cast_possible_truncation)]
    fn slot_of(&self, key: &K) -> usize {
        // The remainder is below the table length, so it fits in usize.
        (self.hash_builder.hash_one(key) % self.table.len() as u64) as usize
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn at(&self, key: &K) -> Result<&V, ContainerError> {
        chain_nodes(&self.table[self.slot_of(key)])
            .find(|node| node.key == *key)
            .map(|node| &node.value)
            .ok_or(ContainerError::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, ContainerError> {
        let slot = self.slot_of(key);
        let mut cursor = self.table[slot].as_deref_mut();
        while let Some(node) = cursor {
            if node.key == *key {
                return Ok(&mut node.value);
            }
            cursor = node.next.as_deref_mut();
        }
        Err(ContainerError::KeyNotFound)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.at(key).is_ok()
    }

    /// Prepends `(key, value)` to the chain of its slot, growing the table
    /// first if the insert would reach the load factor threshold.
    ///
    /// The key must not already be present; see the type-level docs for what
    /// happens if it is.
    pub fn insert(&mut self, key: K, value: V) {
        if self.reaches_threshold(self.length + 1, self.table.len()) {
            self.grow();
        }
        let slot = self.slot_of(&key);
        let next = self.table[slot].take();
        self.table[slot] = Some(Box::new(ChainNode { key, value, next }));
        self.length += 1;
    }

    /// Unlinks the first node of `key`'s chain that holds `key` and returns
    /// its value.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if no node of that chain holds
    /// `key`.
    pub fn erase(&mut self, key: &K) -> Result<V, ContainerError> {
        let slot = self.slot_of(key);
        let mut cursor = &mut self.table[slot];
        while cursor.as_ref().is_some_and(|node| node.key != *key) {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }
        let node = cursor.take().ok_or(ContainerError::KeyNotFound)?;
        let ChainNode { value, next, .. } = *node;
        *cursor = next;
        self.length -= 1;
        Ok(value)
    }

    #[allow(clippy::cast_precision_loss)]
    fn reaches_threshold(&self, length: usize, capacity: usize) -> bool {
        length as f64 / capacity as f64 >= self.config.load_factor_threshold
    }

    /// Doubles the capacity until the next insert stays below the threshold,
    /// then moves every node into the slot it hashes to in the new table.
    fn grow(&mut self) {
        let previous_capacity = self.table.len();
        let mut capacity = previous_capacity * 2;
        while self.reaches_threshold(self.length + 1, capacity) {
            capacity *= 2;
        }

        let previous_table = mem::replace(&mut self.table, empty_table(capacity));
        for mut chain in previous_table {
            while let Some(mut node) = chain {
                chain = node.next.take();
                let slot = self.slot_of(&node.key);
                node.next = self.table[slot].take();
                self.table[slot] = Some(node);
            }
        }

        tracing::debug!(
            from = previous_capacity,
            to = capacity,
            length = self.length,
            "grew hash table and rehashed every pair"
        );
    }
}

impl<K: Hash + Ord + Clone, V, S: BuildHasher> HashMap<K, V, S> {
    /// Returns the keys `k` with `low <= k <= high`, in table order.
    pub fn find_keys(&self, low: &K, high: &K) -> DynamicSequence<K> {
        self.nodes()
            .filter(|node| *low <= node.key && node.key <= *high)
            .map(|node| node.key.clone())
            .collect()
    }

    /// Returns every key in ascending order.
    ///
    /// Keys are gathered from every chain and then merge sorted.
    pub fn sorted_keys(&self) -> DynamicSequence<K> {
        let mut keys: DynamicSequence<K> = self.nodes().map(|node| node.key.clone()).collect();
        keys.merge_sort();
        keys
    }
}

// =============================================================================
// Map Contract
// =============================================================================

impl<K: Hash + Ord + Clone, V, S: BuildHasher> Map<K, V> for HashMap<K, V, S> {
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

impl<K, V, S> Drop for HashMap<K, V, S> {
    fn drop(&mut self) {
        release_chains(&mut self.table);
    }
}

impl<K, V, S: Default> Default for HashMap<K, V, S> {
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K: Hash + Eq, V, S: BuildHasher + Default> FromIterator<(K, V)> for HashMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::default();
        map.extend(iter);
        map
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> Extend<(K, V)> for HashMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashMap<K, V, S> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_map()
            .entries(self.nodes().map(|node| (&node.key, &node.value)))
            .finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V, S> serde::Serialize for HashMap<K, V, S>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: serde::Serializer,
    {
        serializer.collect_map(self.nodes().map(|node| (&node.key, &node.value)))
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V, S> serde::Deserialize<'de> for HashMap<K, V, S>
where
    K: serde::Deserialize<'de> + Hash + Ord + Clone,
    V: serde::Deserialize<'de>,
    S: BuildHasher + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(super::serde_support::MapVisitor::new("a hash map"))
    }
}

// =============================================================================
// Tests
// =============================================================================
