//! Error types for the containers.
//!
//! Every fallible container operation reports one of the
//! [`ContainerError`] variants synchronously to its caller. A failed
//! operation leaves the container exactly as it was before the call.
//! [`ConfigError`] is returned when a [`HashMapConfig`](crate::map::HashMapConfig)
//! is rejected.

use std::fmt;

/// Represents errors reported by sequence and map operations.
///
/// # Examples
///
/// ```rust
/// use mapkit::error::ContainerError;
/// use mapkit::sequence::DynamicSequence;
///
/// let sequence: DynamicSequence<i32> = DynamicSequence::new();
/// assert_eq!(
///     sequence.at(0),
///     Err(ContainerError::IndexOutOfRange { index: 0, length: 0 })
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerError {
    /// A sequence index was outside the valid range.
    IndexOutOfRange {
        /// The index that was requested.
        index: usize,
        /// The length of the sequence at the time of the call.
        length: usize,
    },
    /// A map lookup, update, or erase named a key that is not stored.
    KeyNotFound,
}

impl fmt::Display for ContainerError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, length } => write!(
                formatter,
                "index out of range: the length is {length} but the index is {index}"
            ),
            Self::KeyNotFound => write!(formatter, "key not found"),
        }
    }
}

impl std::error::Error for ContainerError {}

/// Represents a rejected hash table configuration.
///
/// # Examples
///
/// ```rust
/// use mapkit::error::ConfigError;
/// use mapkit::map::HashMapConfig;
///
/// let config = HashMapConfig::default().with_initial_capacity(0);
/// assert_eq!(config.validate(), Err(ConfigError::ZeroCapacity));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    /// The initial slot count was zero.
    ZeroCapacity,
    /// The load factor threshold was not a finite positive number.
    InvalidLoadFactor(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroCapacity => write!(formatter, "initial capacity must be at least 1"),
            Self::InvalidLoadFactor(threshold) => write!(
                formatter,
                "load factor threshold must be finite and positive, got {threshold}"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_index_out_of_range_display() {
        let error = ContainerError::IndexOutOfRange {
            index: 4,
            length: 2,
        };
        assert_eq!(
            format!("{error}"),
            "index out of range: the length is 2 but the index is 4"
        );
    }

    #[rstest]
    fn test_key_not_found_display() {
        assert_eq!(format!("{}", ContainerError::KeyNotFound), "key not found");
    }

    #[rstest]
    #[case(ConfigError::ZeroCapacity, "initial capacity must be at least 1")]
    #[case(
        ConfigError::InvalidLoadFactor(-0.5),
        "load factor threshold must be finite and positive, got -0.5"
    )]
    fn test_config_error_display(#[case] error: ConfigError, #[case] expected: &str) {
        assert_eq!(format!("{error}"), expected);
    }

    #[rstest]
    fn test_errors_are_std_errors() {
        let boxed: Box<dyn std::error::Error> = Box::new(ContainerError::KeyNotFound);
        assert_eq!(boxed.to_string(), "key not found");
    }
}
