//! Error types for the WASM API
//!
//! The editing core itself cannot fail; these errors describe bad input
//! arriving from JavaScript before it reaches the core.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Range start after its end
    #[error("Invalid range: from {from} > to {to}")]
    InvalidRange { from: usize, to: usize },

    /// Offset past the end of the text
    #[error("Offset {offset} out of bounds (text length {len})")]
    OffsetOutOfBounds { offset: usize, len: usize },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Invalid log level: {0:?}")]
    InvalidLogLevel(String),
}
