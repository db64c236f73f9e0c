//! Translation configuration
//!
//! A `Config` is the immutable set of single-byte parameters for one run:
//! delimiter, quote, record separator, optional escape byte, and the chosen
//! direction. The two sentinel values are fixed; any configured byte that
//! collides with them is rejected before processing starts.

use crate::error::{Error, Result};

/// Sentinel substituted for a delimiter found inside a quoted field
pub const FIELD_SENTINEL: u8 = 0x1F;

/// Sentinel substituted for a record separator found inside a quoted field
pub const RECORD_SENTINEL: u8 = 0x1E;

/// Translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Replace structural bytes inside quoted fields with sentinels
    #[default]
    Sanitize,
    /// Map sentinels back to the original structural bytes
    Restore,
}

/// Byte-level parameters for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Field delimiter (default `,`)
    pub delimiter: u8,
    /// Field quoting byte (default `"`)
    pub quote: u8,
    /// Record separator (default `\n`)
    pub record_sep: u8,
    /// Escape byte; quote-open/close detection is suppressed for the byte
    /// following an unescaped occurrence. Disabled when `None`.
    pub escape: Option<u8>,
    /// Translation direction
    pub mode: Mode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            record_sep: b'\n',
            escape: None,
            mode: Mode::Sanitize,
        }
    }
}

impl Config {
    /// Check that no configured byte collides with a sentinel value.
    ///
    /// A collision would make sanitized output ambiguous on restore.
    pub fn validate(&self) -> Result<()> {
        let roles = [
            ("delimiter", Some(self.delimiter)),
            ("quote", Some(self.quote)),
            ("record separator", Some(self.record_sep)),
            ("escape", self.escape),
        ];
        for (role, byte) in roles {
            if let Some(byte) = byte {
                if byte == FIELD_SENTINEL || byte == RECORD_SENTINEL {
                    return Err(Error::SentinelCollision { role, byte });
                }
            }
        }
        Ok(())
    }
}
