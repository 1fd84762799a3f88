//! Index-addressable sequences.
//!
//! This module provides the [`Sequence`] contract and its growable
//! implementation [`DynamicSequence`], which every map in
//! [`crate::map`] uses either as primary storage or as the result type of
//! its snapshot queries.
//!
//! # Examples
//!
//! ```rust
//! use mapkit::sequence::DynamicSequence;
//!
//! let mut sequence: DynamicSequence<i32> = [5, 1, 4].into_iter().collect();
//! sequence.push(2);
//! sequence.quick_sort();
//! assert_eq!(sequence.as_slice(), &[1, 2, 4, 5]);
//! assert_eq!(sequence.to_string(), "1, 2, 4, 5");
//! ```

use crate::error::ContainerError;

mod dynamic;

pub use dynamic::DynamicSequence;

/// A finite sequence of elements addressed by position.
///
/// Positions run from `0` to `len() - 1`. Insertion accepts `len()` as well,
/// which appends.
pub trait Sequence<T> {
    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the sequence holds no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    fn at(&self, index: usize) -> Result<&T, ContainerError>;

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    fn at_mut(&mut self, index: usize) -> Result<&mut T, ContainerError>;

    /// Inserts `value` at `index`, shifting later elements one position right.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index > len()`.
    fn insert(&mut self, value: T, index: usize) -> Result<(), ContainerError>;

    /// Removes and returns the element at `index`, shifting later elements
    /// one position left.
    ///
    /// # Errors
    ///
    /// Returns [`ContainerError::IndexOutOfRange`] if `index >= len()`.
    fn erase(&mut self, index: usize) -> Result<T, ContainerError>;

    /// Returns `true` if an element equal to `value` is present.
    fn contains(&self, value: &T) -> bool
    where
        T: PartialEq;
}
