//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! The cache has no recoverable runtime failures: lookups report absence
//! through `Option`, never through errors. The only failure mode is an
//! invalid configuration, rejected at construction time before any internal
//! structure is built.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Configuration rejected at construction time
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

// == Result Type Alias ==
/// Convenience Result type for the cache.
pub type Result<T> = std::result::Result<T, CacheError>;
