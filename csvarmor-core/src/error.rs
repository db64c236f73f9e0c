//! Error types for the translation engine

use std::io;
use thiserror::Error;

/// Engine error type
#[derive(Error, Debug)]
pub enum Error {
    /// A configured byte collides with a reserved sentinel value
    #[error("{role} byte {byte:#04x} is a reserved sentinel value")]
    SentinelCollision {
        /// Which configured byte collided (delimiter, quote, ...)
        role: &'static str,
        /// The colliding byte value
        byte: u8,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, Error>;
