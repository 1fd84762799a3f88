//! Growable array sequence with merge sort and quicksort.
//!
//! [`DynamicSequence`] owns a contiguous buffer whose capacity is tracked
//! explicitly. Whenever an insertion would exceed the capacity, a new buffer
//! of twice the size (or of size 1 when the capacity is 0) is allocated, the
//! elements are moved over, and the old buffer is released.
//!
//! - O(1) amortized append
//! - O(n) insert and erase at arbitrary positions
//! - O(n log n) stable [`merge_sort`](DynamicSequence::merge_sort)
//! - O(n log n) average, O(n²) worst case [`quick_sort`](DynamicSequence::quick_sort)

use std::fmt;

use super::Sequence;
use crate::error::ContainerError;

// =============================================================================
// DynamicSequence Definition
// =============================================================================

/// A growable, index-addressable sequence.
///
/// # Time Complexity
///
/// | Operation    | Complexity         |
/// |--------------|--------------------|
/// | `at`         | O(1)               |
/// | `push`       | O(1) amortized     |
/// | `insert`     | O(n)               |
/// | `erase`      | O(n)               |
/// | `contains`   | O(n)               |
/// | `merge_sort` | O(n log n)         |
/// | `quick_sort` | O(n log n) average |
///
/// # Examples
///
/// ```rust
/// use mapkit::sequence::DynamicSequence;
///
/// let mut sequence = DynamicSequence::new();
/// sequence.insert("b", 0).unwrap();
/// sequence.insert("a", 0).unwrap();
/// sequence.insert("c", 2).unwrap();
///
/// assert_eq!(sequence.as_slice(), &["a", "b", "c"]);
/// assert!(sequence.insert("z", 9).is_err());
/// ```
#[derive(Clone)]
pub struct DynamicSequence<T> {
    /// Initialized elements, `elements.len()` is the count
    elements: Vec<T>,
    /// Number of slots the current buffer was allocated for
    capacity: usize,
}

impl<T> DynamicSequence<T> {
    /// Creates a new empty sequence with capacity 0.
    #[inline]
    pub const fn new() -> Self {
        Self {
            elements: Vec::new(),
            capacity: 0,
        }
    }

    /// Creates a new empty sequence whose buffer holds `capacity` elements.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            elements: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the sequence holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the number of elements the current buffer can hold.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapkit::sequence::DynamicSequence;
    ///
    /// let mut sequence = DynamicSequence::new();
    /// assert_eq!(sequence.capacity(), 0);
    /// sequence.push(1);
    /// assert_eq!(sequence.capacity(), 1);
    /// sequence.push(2);
    /// sequence.push(3);
    /// assert_eq!(sequence.capacity(), 4);
    /// ```
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn at(&self, index: usize) -> Result<&T, ContainerError> {
        let length = self.len();
        self.elements
            .get(index)
            .ok_or(ContainerError::IndexOutOfRange { index, length })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, ContainerError> {
        let length = self.len();
        self.elements
            .get_mut(index)
            .ok_or(ContainerError::IndexOutOfRange { index, length })
    }

    /// Inserts `value` at `index`, shifting the elements at and after
    /// `index` one position right. `index == len()` appends.
    ///
    /// The buffer grows before the shift when it is full.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index > len()`. The
    /// sequence is left untouched in that case.
    pub fn insert(&mut self, value: T, index: usize) -> Result<(), ContainerError> {
        let length = self.len();
        if index > length {
            return Err(ContainerError::IndexOutOfRange { index, length });
        }
        if length == self.capacity {
            self.grow();
        }
        self.elements.insert(index, value);
        Ok(())
    }

    /// Appends `value` after the last element.
    pub fn push(&mut self, value: T) {
        if self.len() == self.capacity {
            self.grow();
        }
        self.elements.push(value);
    }

    /// Removes and returns the element at `index`, shifting the elements
    /// after it one position left.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> Result<T, ContainerError> {
        let length = self.len();
        if index >= length {
            return Err(ContainerError::IndexOutOfRange { index, length });
        }
        Ok(self.elements.remove(index))
    }

    /// Returns `true` if an element equal to `value` is present.
    ///
    /// This is a linear scan.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.elements.iter().any(|element| element == value)
    }

    /// Drops every element and releases the buffer. The capacity becomes 0.
    pub fn clear(&mut self) {
        self.elements = Vec::new();
        self.capacity = 0;
    }

    /// Moves the contents out, leaving `self` empty with capacity 0.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapkit::sequence::DynamicSequence;
    ///
    /// let mut source: DynamicSequence<i32> = (1..=3).collect();
    /// let target = source.take();
    ///
    /// assert_eq!(target.len(), 3);
    /// assert!(source.is_empty());
    /// assert_eq!(source.capacity(), 0);
    /// ```
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Returns the elements in storage order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.elements
    }

    /// Returns the elements in storage order, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.elements
    }

    /// Consumes the sequence and returns its elements.
    pub fn into_vec(self) -> Vec<T> {
        self.elements
    }

    /// Reallocates the buffer at twice the capacity, or 1 from empty.
    fn grow(&mut self) {
        let capacity = if self.capacity == 0 {
            1
        } else {
            self.capacity * 2
        };
        let mut storage = Vec::with_capacity(capacity);
        storage.append(&mut self.elements);
        self.elements = storage;
        tracing::trace!(
            from = self.capacity,
            to = capacity,
            "grew dynamic sequence buffer"
        );
        self.capacity = capacity;
    }
}

// =============================================================================
// Sorting
// =============================================================================

impl<T: PartialOrd> DynamicSequence<T> {
    /// Sorts the elements in ascending order with a stable top-down merge
    /// sort.
    ///
    /// Each range `[start, end]` is split at `mid = (start + end) / 2`, both
    /// halves are sorted recursively and then merged through an auxiliary
    /// buffer sized to the range. Equal elements keep their relative order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mapkit::sequence::DynamicSequence;
    ///
    /// let mut sequence: DynamicSequence<(i32, char)> =
    ///     [(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')].into_iter().collect();
    /// sequence.merge_sort();
    /// // Tuples compare lexicographically; the sort is stable either way.
    /// assert_eq!(sequence.as_slice(), &[(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
    /// ```
    pub fn merge_sort(&mut self)
    where
        T: Clone,
    {
        merge_sort_slice(&mut self.elements);
    }

    /// Sorts the elements in ascending order with an in-place quicksort.
    ///
    /// The first element of every range is the pivot. Elements smaller than
    /// the pivot are swapped into a growing front partition, then the pivot
    /// is swapped into its final position and both sides are sorted
    /// recursively. The sort is not stable, and already sorted or reverse
    /// sorted input degrades to O(n²).
    pub fn quick_sort(&mut self) {
        quick_sort_slice(&mut self.elements);
    }
}

fn merge_sort_slice<T: PartialOrd + Clone>(elements: &mut [T]) {
    if elements.len() < 2 {
        return;
    }
    let mid = (elements.len() - 1) / 2;
    merge_sort_slice(&mut elements[..=mid]);
    merge_sort_slice(&mut elements[mid + 1..]);

    let mut merged = Vec::with_capacity(elements.len());
    let (mut left, mut right) = (0, mid + 1);
    while left <= mid && right < elements.len() {
        // Taking from the left on ties keeps the sort stable.
        if elements[right] < elements[left] {
            merged.push(elements[right].clone());
            right += 1;
        } else {
            merged.push(elements[left].clone());
            left += 1;
        }
    }
    merged.extend_from_slice(&elements[left..=mid]);
    merged.extend_from_slice(&elements[right..]);
    elements.clone_from_slice(&merged);
}

fn quick_sort_slice<T: PartialOrd>(elements: &mut [T]) {
    if elements.len() < 2 {
        return;
    }
    // The pivot stays at index 0 until the scan is done.
    let mut boundary = 0;
    for index in 1..elements.len() {
        if elements[index] < elements[0] {
            boundary += 1;
            elements.swap(index, boundary);
        }
    }
    elements.swap(0, boundary);

    let (smaller, rest) = elements.split_at_mut(boundary);
    quick_sort_slice(smaller);
    quick_sort_slice(&mut rest[1..]);
}

// =============================================================================
// Sequence Contract
// =============================================================================

impl<T> Sequence<T> for DynamicSequence<T> {
    fn len(&self) -> usize {
        Self::len(self)
    }

    fn at(&self, index: usize) -> Result<&T, ContainerError> {
        Self::at(self, index)
    }

    fn at_mut(&mut self, index: usize) -> Result<&mut T, ContainerError> {
        Self::at_mut(self, index)
    }

    fn insert(&mut self, value: T, index: usize) -> Result<(), ContainerError> {
        Self::insert(self, value, index)
    }

    fn erase(&mut self, index: usize) -> Result<T, ContainerError> {
        Self::erase(self, index)
    }

    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        Self::contains(self, value)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T> Default for DynamicSequence<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for DynamicSequence<T> {
    fn from(elements: Vec<T>) -> Self {
        let capacity = elements.len();
        Self { elements, capacity }
    }
}

impl<T> FromIterator<T> for DynamicSequence<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut sequence = Self::new();
        sequence.extend(iter);
        sequence
    }
}

impl<T> Extend<T> for DynamicSequence<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<T: PartialEq> PartialEq for DynamicSequence<T> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T: Eq> Eq for DynamicSequence<T> {}

impl<T: fmt::Debug> fmt::Debug for DynamicSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_list().entries(&self.elements).finish()
    }
}

impl<T: fmt::Display> fmt::Display for DynamicSequence<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for element in &self.elements {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        Ok(())
    }
}

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize> serde::Serialize for DynamicSequence<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(&self.elements)
    }
}

#[cfg(feature = "serde")]
impl<'de, T: serde::Deserialize<'de>> serde::Deserialize<'de> for DynamicSequence<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        <Vec<T> as serde::Deserialize<'de>>::deserialize(deserializer).map(Self::from)
    }
}

// =============================================================================
// Tests
// =============================================================================
