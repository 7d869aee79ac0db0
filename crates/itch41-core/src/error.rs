//! Typed error definitions for the ITCH 4.1 feed toolkit.
//!
//! Provides [`ItchError`] for domain-specific errors that are more informative
//! than plain `anyhow::Error` strings. All variants implement `std::error::Error`
//! via `thiserror`, so they integrate seamlessly with `anyhow::Result`.
//!
//! End-of-stream is deliberately NOT an error: the frame reader signals it by
//! returning `Ok(None)`.

use thiserror::Error;

/// Domain-specific errors for the ITCH 4.1 feed toolkit.
#[derive(Debug, Error)]
pub enum ItchError {
    /// Type code byte does not match any registered message type.
    #[error("unknown message type code: {0:#04x}")]
    UnknownType(u8),

    /// Declared frame length exceeds the bytes actually available.
    #[error("truncated frame: {0}")]
    TruncatedFrame(String),

    /// A required field is missing from the encode mapping, or a requested
    /// field is not part of the schema.
    #[error("layout error: {0}")]
    Layout(String),

    /// A fixed-width value does not fit its slot and has no padding rule.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Source or sink I/O failure in the frame reader / feed writer.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
