//! Error types for the Galaxy3D BVH
//!
//! Frame-time operations (culling, ray casts, updates) never return errors:
//! they follow the assertion / no-op / sentinel contract documented on `Bvh`.
//! These errors only cover the fallible setup paths.

use std::fmt;

/// Result type for Galaxy3D BVH operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D BVH errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Configuration rejected by `BvhConfig::validate`
    InvalidConfig(String),

    /// Query issued before `build` (or after `clear`)
    NotBuilt,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            Error::NotBuilt => write!(f, "BVH hasn't been built yet"),
        }
    }
}

impl std::error::Error for Error {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
