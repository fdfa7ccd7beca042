//! Error types for lrupool

use std::fmt;

/// Result type alias for lrupool operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while constructing a cache
///
/// Once built, `update` and `resolve` never fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Capacity of zero slots
    ZeroCapacity,

    /// Load factor of zero buckets per slot
    ZeroLoadFactor,

    /// Capacity does not fit the `u32` slot index space
    CapacityTooLarge(usize),

    /// `capacity * load_factor` does not fit the `u32` bucket index space
    TableTooLarge {
        /// Requested slot count
        capacity: usize,
        /// Requested buckets per slot
        load_factor: usize,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ZeroCapacity => write!(f, "Capacity must be greater than 0"),
            Error::ZeroLoadFactor => write!(f, "Load factor must be greater than 0"),
            Error::CapacityTooLarge(capacity) => {
                write!(f, "Capacity too large: {} slots (max {})", capacity, u32::MAX - 1)
            }
            Error::TableTooLarge {
                capacity,
                load_factor,
            } => write!(
                f,
                "Bucket table too large: {} slots x {} buckets per slot",
                capacity, load_factor
            ),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::ZeroCapacity.to_string(),
            "Capacity must be greater than 0"
        );
        assert_eq!(
            Error::TableTooLarge {
                capacity: 10,
                load_factor: 3
            }
            .to_string(),
            "Bucket table too large: 10 slots x 3 buckets per slot"
        );
    }
}
