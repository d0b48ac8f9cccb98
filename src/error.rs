use thiserror::Error;

/// Errors returned when building a cache.
///
/// Once a cache exists none of its operations can fail; a missing key is
/// reported as `None`, not as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CacheError {
    /// The requested capacity cannot hold a single entry.
    #[error("cache capacity must be positive, got {capacity}")]
    InvalidCapacity { capacity: usize },
}

pub type Result<T> = std::result::Result<T, CacheError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_capacity_message() {
        let err = CacheError::InvalidCapacity { capacity: 0 };
        assert_eq!(err.to_string(), "cache capacity must be positive, got 0");
    }
}
