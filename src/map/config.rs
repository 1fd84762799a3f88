//! Sizing policy for [`HashMap`](super::HashMap).

use crate::error::ConfigError;

/// Slot count of a freshly created table.
pub(super) const DEFAULT_INITIAL_CAPACITY: usize = 16;

/// Load factor at which an insert grows the table first.
pub(super) const DEFAULT_LOAD_FACTOR_THRESHOLD: f64 = 0.60;

/// Initial size and growth threshold of a [`HashMap`](super::HashMap).
///
/// An insert that would bring `len / capacity` to the threshold or above
/// doubles the capacity and rehashes every stored pair before the new pair
/// is added.
///
/// # Examples
///
/// ```rust
/// use mapkit::map::{HashMap, HashMapConfig};
///
/// let config = HashMapConfig::default()
///     .with_initial_capacity(4)
///     .with_load_factor_threshold(0.75);
/// let map: HashMap<u32, u32> = HashMap::with_config(config).unwrap();
/// assert_eq!(map.capacity(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HashMapConfig {
    /// Number of slots allocated up front.
    pub initial_capacity: usize,
    /// Highest load factor the table may reach after an insert, exclusive.
    pub load_factor_threshold: f64,
}

impl HashMapConfig {
    /// Returns this configuration with a different initial slot count.
    #[must_use]
    pub const fn with_initial_capacity(mut self, initial_capacity: usize) -> Self {
        self.initial_capacity = initial_capacity;
        self
    }

    /// Returns this configuration with a different growth threshold.
    #[must_use]
    pub const fn with_load_factor_threshold(mut self, load_factor_threshold: f64) -> Self {
        self.load_factor_threshold = load_factor_threshold;
        self
    }

    /// Checks that the table can be built and can grow.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] for an initial capacity of 0 and
    /// [`ConfigError::InvalidLoadFactor`] for a threshold that is not a
    /// finite positive number.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.load_factor_threshold.is_finite() || self.load_factor_threshold <= 0.0 {
            return Err(ConfigError::InvalidLoadFactor(self.load_factor_threshold));
        }
        Ok(())
    }
}

impl Default for HashMapConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            load_factor_threshold: DEFAULT_LOAD_FACTOR_THRESHOLD,
        }
    }
}
