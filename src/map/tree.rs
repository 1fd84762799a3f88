//! Map backed by an unbalanced binary search tree.
//!
//! [`TreeMap`] owns its nodes hierarchically: every node owns its two
//! optional subtrees, and dropping a node drops the whole subtree. No
//! rebalancing is performed, so the shape of the tree, and therefore the
//! cost of every operation, depends on the insertion order.
//!
//! # Internal Structure
//!
//! For every node, all keys in the left subtree are `<=` its key and all
//! keys in the right subtree are `>=` its key. Insertion routes ties to the
//! left.

use std::cmp::Ordering;
use std::fmt;
use std::mem;

use super::Map;
use crate::error::ContainerError;
use crate::sequence::DynamicSequence;

// =============================================================================
// Node Definition
// =============================================================================

type Link<K, V> = Option<Box<Node<K, V>>>;

#[derive(Clone)]
struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
}

impl<K, V> Node<K, V> {
    const fn leaf(key: K, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
        }
    }
}

// =============================================================================
// TreeMap Definition
// =============================================================================

/// An ordered map stored as an unbalanced binary search tree.
///
/// # Time Complexity
///
/// | Operation     | Average    | Worst |
/// |---------------|------------|-------|
/// | `at`          | O(log n)   | O(n)  |
/// | `insert`      | O(log n)   | O(n)  |
/// | `erase`       | O(log n)   | O(n)  |
/// | `find_keys`   | O(n)       | O(n)  |
/// | `sorted_keys` | O(n)       | O(n)  |
/// | `height`      | O(n)       | O(n)  |
///
/// # Examples
///
/// ```rust
/// use mapkit::map::TreeMap;
///
/// let mut map = TreeMap::new();
/// for key in [5, 3, 8, 1, 4, 7, 9] {
///     map.insert(key, key * 10);
/// }
///
/// assert_eq!(map.height(), 3);
/// assert_eq!(map.sorted_keys().as_slice(), &[1, 3, 4, 5, 7, 8, 9]);
///
/// map.erase(&5).unwrap();
/// assert_eq!(map.sorted_keys().as_slice(), &[1, 3, 4, 7, 8, 9]);
/// ```
#[derive(Clone)]
pub struct TreeMap<K, V> {
    /// Root node of the tree
    root: Link<K, V>,
    /// Number of nodes
    length: usize,
}

impl<K, V> TreeMap<K, V> {
    /// Creates a new empty map.
    #[inline]
    pub const fn new() -> Self {
        Self {
            root: None,
            length: 0,
        }
    }

    /// Returns the number of stored pairs.
    #[inline]
    pub const fn len(&self) -> usize {
        self.length
    }

    /// Returns `true` if no pairs are stored.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Returns the number of nodes on the longest root-to-leaf path.
    ///
    /// An empty tree has height 0 and a single leaf has height 1.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapkit::map::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.height(), 0);
    /// map.insert(1, ());
    /// assert_eq!(map.height(), 1);
    /// map.insert(2, ());
    /// map.insert(3, ());
    /// assert_eq!(map.height(), 3);
    /// ```
    pub fn height(&self) -> usize {
        Self::height_of(self.root.as_deref())
    }

    fn height_of(node: Option<&Node<K, V>>) -> usize {
        node.map_or(0, |node| {
            1 + Self::height_of(node.left.as_deref()).max(Self::height_of(node.right.as_deref()))
        })
    }

    /// Moves the tree out, leaving `self` empty.
    #[must_use]
    pub fn take(&mut self) -> Self {
        mem::take(self)
    }

    /// Drops every node.
    pub fn clear(&mut self) {
        *self = Self::new();
    }
}

// Nodes are released from an explicit stack so that a degenerate tree does
// not recurse once per level while being dropped.
impl<K, V> Drop for TreeMap<K, V> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<K, V>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Attaches `(key, value)` as a new leaf.
    ///
    /// The walk goes right while `key` is greater than the visited key and
    /// left otherwise. The key must not already be present: a duplicate is
    /// stored in the left subtree of the existing node, where lookups never
    /// reach it.
    pub fn insert(&mut self, key: K, value: V) {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            cursor = if key > node.key {
                &mut node.right
            } else {
                &mut node.left
            };
        }
        *cursor = Some(Box::new(Node::leaf(key, value)));
        self.length += 1;
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn at(&self, key: &K) -> Result<&V, ContainerError> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Equal => return Ok(&node.value),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Less => node.left.as_deref(),
            };
        }
        Err(ContainerError::KeyNotFound)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn at_mut(&mut self, key: &K) -> Result<&mut V, ContainerError> {
        let mut cursor = self.root.as_deref_mut();
        while let Some(node) = cursor {
            cursor = match key.cmp(&node.key) {
                Ordering::Equal => return Ok(&mut node.value),
                Ordering::Greater => node.right.as_deref_mut(),
                Ordering::Less => node.left.as_deref_mut(),
            };
        }
        Err(ContainerError::KeyNotFound)
    }

    /// Returns `true` if `key` is present.
    pub fn contains(&self, key: &K) -> bool {
        self.at(key).is_ok()
    }

    /// Removes the pair stored under `key` and returns its value.
    ///
    /// A node with at most one child is replaced by that child. A node with
    /// two children takes over the key and value of its in-order successor,
    /// whose own node is then removed instead.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::KeyNotFound`] if `key` is absent.
    pub fn erase(&mut self, key: &K) -> Result<V, ContainerError> {
        let value = Self::erase_from(&mut self.root, key)?;
        self.length -= 1;
        Ok(value)
    }

    fn erase_from(link: &mut Link<K, V>, key: &K) -> Result<V, ContainerError> {
        let Some(node) = link else {
            return Err(ContainerError::KeyNotFound);
        };
        match key.cmp(&node.key) {
            Ordering::Less => Self::erase_from(&mut node.left, key),
            Ordering::Greater => Self::erase_from(&mut node.right, key),
            Ordering::Equal => Self::unlink(link).ok_or(ContainerError::KeyNotFound),
        }
    }

    /// Removes the node at `link` and returns its value.
    fn unlink(link: &mut Link<K, V>) -> Option<V> {
        let node = link.as_mut()?;
        if node.left.is_some() && node.right.is_some() {
            let (key, value) = Self::unlink_leftmost(&mut node.right)?;
            node.key = key;
            return Some(mem::replace(&mut node.value, value));
        }
        let node = link.take()?;
        let Node {
            value, left, right, ..
        } = *node;
        *link = left.or(right);
        Some(value)
    }

    /// Removes the leftmost node of the subtree at `link`, splicing its right
    /// child into its place.
    fn unlink_leftmost(link: &mut Link<K, V>) -> Option<(K, V)> {
        if link.as_ref()?.left.is_some() {
            return Self::unlink_leftmost(&mut link.as_mut()?.left);
        }
        let node = link.take()?;
        let Node {
            key, value, right, ..
        } = *node;
        *link = right;
        Some((key, value))
    }
}

impl<K: Ord + Clone, V> TreeMap<K, V> {
    /// Returns the keys `k` with `low <= k <= high` in ascending order.
    pub fn find_keys(&self, low: &K, high: &K) -> DynamicSequence<K> {
        let mut keys = DynamicSequence::new();
        Self::collect_range(self.root.as_deref(), low, high, &mut keys);
        keys
    }

    fn collect_range(node: Option<&Node<K, V>>, low: &K, high: &K, keys: &mut DynamicSequence<K>) {
        let Some(node) = node else {
            return;
        };
        Self::collect_range(node.left.as_deref(), low, high, keys);
        if *low <= node.key && node.key <= *high {
            keys.push(node.key.clone());
        }
        Self::collect_range(node.right.as_deref(), low, high, keys);
    }

    /// Returns every key in ascending order.
    pub fn sorted_keys(&self) -> DynamicSequence<K> {
        let mut keys = DynamicSequence::with_capacity(self.length);
        Self::collect_in_order(self.root.as_deref(), &mut keys);
        keys
    }

    fn collect_in_order(node: Option<&Node<K, V>>, keys: &mut DynamicSequence<K>) {
        let Some(node) = node else {
            return;
        };
        Self::collect_in_order(node.left.as_deref(), keys);
        keys.push(node.key.clone());
        Self::collect_in_order(node.right.as_deref(), keys);
    }
}

impl<K, V> TreeMap<K, V> {
    fn visit_in_order<'a>(node: Option<&'a Node<K, V>>, visit: &mut impl FnMut(&'a K, &'a V)) {
        let Some(node) = node else {
            return;
        };
        Self::visit_in_order(node.left.as_deref(), visit);
        visit(&node.key, &node.value);
        Self::visit_in_order(node.right.as_deref(), visit);
    }
}

// =============================================================================
// Map Contract
// =============================================================================

impl<K: Ord + Clone, V> Map<K, V> for TreeMap<K, V> {
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

impl<K, V> Default for TreeMap<K, V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = formatter.debug_map();
        Self::visit_in_order(self.root.as_deref(), &mut |key, value| {
            map.entry(key, value);
        });
        map.finish()
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<K, V> serde::Serialize for TreeMap<K, V>
where
    K: serde::Serialize,
    V: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.length))?;
        let mut outcome = Ok(());
        Self::visit_in_order(self.root.as_deref(), &mut |key, value| {
            if outcome.is_ok() {
                outcome = map.serialize_entry(key, value);
            }
        });
        outcome?;
        map.end()
    }
}

#[cfg(feature = "serde")]
impl<'de, K, V> serde::Deserialize<'de> for TreeMap<K, V>
where
    K: serde::Deserialize<'de> + Ord + Clone,
    V: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_map(super::serde_support::MapVisitor::new("a tree map"))
    }
}

// =============================================================================
// Tests
// =============================================================================
