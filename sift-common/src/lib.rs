//! Common types and utilities shared across Sift crates.
//!
//! The shared error type and the logging setup used by the Sift workspace.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`SiftError`] and [`Result`]: Shared error handling
//!
//! # Examples
//!
//! ```rust
//! use sift_common::SiftError;
//!
//! let err = SiftError::Config("unknown entity label: FOO".into());
//! assert_eq!(err.to_string(), "Configuration error: unknown entity label: FOO");
//! ```

pub mod observability;

/// Error types used across the Sift system.
#[derive(thiserror::Error, Debug)]
pub enum SiftError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The segmentation or entity-recognition model faulted.
    #[error("Model error: {0}")]
    Model(String),
}

/// Convenient alias for results that use [`SiftError`].
pub type Result<T> = std::result::Result<T, SiftError>;
