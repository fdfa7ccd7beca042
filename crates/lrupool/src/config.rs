//! Cache sizing configuration

use crate::error::{Error, Result};

/// Default number of bucket-table entries per pool slot
pub const DEFAULT_LOAD_FACTOR: usize = 4;

/// Default pool size used by [`CacheConfig::default`]
pub const DEFAULT_CAPACITY: usize = 1024;

/// Sizing for an [`LruCache`](crate::LruCache)
///
/// The bucket table holds `capacity * load_factor` entries, so the expected
/// chain length is about `1 / load_factor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Number of pool slots (maximum live entries)
    pub capacity: usize,
    /// Bucket-table entries per pool slot
    pub load_factor: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            load_factor: DEFAULT_LOAD_FACTOR,
        }
    }
}

impl CacheConfig {
    /// Config with the given capacity and the default load factor
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            ..Self::default()
        }
    }

    /// Check that the pool and bucket table fit the `u32` index space
    pub fn validate(&self) -> Result<()> {
        self.bucket_count().map(|_| ())
    }

    /// Size of the bucket table, validated
    pub(crate) fn bucket_count(&self) -> Result<usize> {
        if self.capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        if self.load_factor == 0 {
            return Err(Error::ZeroLoadFactor);
        }
        // u32::MAX is reserved as the "no slot" / "no bucket" sentinel
        if self.capacity >= u32::MAX as usize {
            return Err(Error::CapacityTooLarge(self.capacity));
        }

        match self.capacity.checked_mul(self.load_factor) {
            Some(buckets) if buckets <= u32::MAX as usize => Ok(buckets),
            _ => Err(Error::TableTooLarge {
                capacity: self.capacity,
                load_factor: self.load_factor,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = CacheConfig::default();
        assert_eq!(config.capacity, 1024);
        assert_eq!(config.load_factor, 4);
        assert_eq!(config.bucket_count(), Ok(4096));
    }

    #[test]
    fn test_config_rejects_zero() {
        assert_eq!(
            CacheConfig::with_capacity(0).validate(),
            Err(Error::ZeroCapacity)
        );

        let config = CacheConfig {
            capacity: 8,
            load_factor: 0,
        };
        assert_eq!(config.validate(), Err(Error::ZeroLoadFactor));
    }

    #[test]
    fn test_config_rejects_oversized_table() {
        let config = CacheConfig {
            capacity: usize::MAX / 2,
            load_factor: 4,
        };
        assert!(config.validate().is_err());

        let config = CacheConfig {
            capacity: 1 << 20,
            load_factor: 1 << 13,
        };
        assert_eq!(
            config.validate(),
            Err(Error::TableTooLarge {
                capacity: 1 << 20,
                load_factor: 1 << 13,
            })
        );
    }
}
