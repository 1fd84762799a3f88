//! # mapkit
//!
//! Associative containers behind one key-value contract, plus the growable
//! sequence they are built on.
//!
//! ## Overview
//!
//! - **Sequence**: [`DynamicSequence`](sequence::DynamicSequence), a growable
//!   array with explicit doubling capacity, merge sort and quicksort
//! - **Maps**: the [`Map`](map::Map) contract with three implementations
//!   - [`SortedArrayMap`](map::SortedArrayMap): binary search over sorted pairs
//!   - [`TreeMap`](map::TreeMap): unbalanced binary search tree
//!   - [`HashMap`](map::HashMap): separate-chaining hash table
//! - **Errors**: [`ContainerError`](error::ContainerError) and
//!   [`ConfigError`](error::ConfigError)
//!
//! ## Feature Flags
//!
//! - `serde`: `Serialize`/`Deserialize` for every container and the hash map
//!   configuration
//! - `fxhash`: use `rustc-hash` as the default `HashMap` hasher
//! - `ahash`: use `ahash` as the default `HashMap` hasher
//! - `full`: enable `serde`
//!
//! ## Example
//!
//! ```rust
//! use mapkit::prelude::*;
//!
//! let mut map = TreeMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! map.insert(2, "two");
//!
//! assert_eq!(map.at(&2), Ok(&"two"));
//! assert_eq!(map.erase(&4), Err(ContainerError::KeyNotFound));
//! assert_eq!(map.sorted_keys().to_string(), "1, 2, 3");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the contracts, the containers and the error types.
///
/// # Usage
///
/// ```rust
/// use mapkit::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{ConfigError, ContainerError};
    pub use crate::map::{HashMap, HashMapConfig, Map, SortedArrayMap, TreeMap};
    pub use crate::sequence::{DynamicSequence, Sequence};
}

pub mod error;
pub mod map;
pub mod sequence;
