//! Command-line interface
//!
//! Defines the clap argument surface and the decoding of byte-valued
//! arguments into a validated engine [`Config`].

use std::fmt;
use std::path::PathBuf;

use clap::Parser;
use csvarmor_core::{Config, Mode};

/// CLI arguments for csvarmor
#[derive(Parser, Debug, Clone)]
#[command(name = "csvarmor")]
#[command(version)]
#[command(
    about = "Replace structural bytes inside quoted CSV fields with sentinels, and back",
    long_about = "Intended for the start and end of a text processing pipeline, so that \
                  line/field-oriented tools (cut, head, sort, ...) can handle CSV data \
                  containing delimiters and newlines inside quoted fields.\n\n\
                  Typical usage:\n    \
                  csvarmor data.csv | cut -d ',' -f 2,5 | csvarmor -u"
)]
pub struct CliArgs {
    /// Restore the original bytes instead of sanitizing
    #[arg(short = 'u', long = "restore")]
    pub restore: bool,

    /// Sanitize mode (the default; overrides an earlier --restore)
    #[arg(short = 's', long = "sanitize", conflicts_with = "restore")]
    pub sanitize: bool,

    /// Field delimiter byte
    #[arg(short, long, value_name = "CHAR", default_value = ",")]
    pub delimiter: String,

    /// Use tab as the field delimiter (overrides --delimiter)
    #[arg(short, long)]
    pub tab: bool,

    /// Field quoting byte
    #[arg(short, long, value_name = "CHAR", default_value = "\"")]
    pub quote: String,

    /// Record separator byte
    #[arg(short, long, value_name = "CHAR", default_value = "\\n")]
    pub record_sep: String,

    /// Treat CHAR as an escape byte suppressing quote significance of the
    /// next byte (CHAR defaults to backslash)
    #[arg(
        short,
        long,
        value_name = "CHAR",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "\\\\"
    )]
    pub escape: Option<String>,

    /// Print the 1-based index of each field in the first record, then exit
    #[arg(short = 'H', long)]
    pub header: bool,

    /// Line-buffer standard output
    #[arg(short = 'b', long)]
    pub line_buffered: bool,

    /// Input files; read standard input when none are given
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,
}

/// Byte-argument decoding error
#[derive(Debug, Clone)]
pub struct ArgError {
    pub message: String,
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid argument: {}", self.message)
    }
}

impl std::error::Error for ArgError {}

/// Decode a byte-valued argument: a single byte, or one of the escape
/// spellings `\t` `\n` `\r` `\0` `\\`
pub fn parse_byte(arg: &str, role: &str) -> Result<u8, ArgError> {
    match arg.as_bytes() {
        [byte] => Ok(*byte),
        [b'\\', b't'] => Ok(b'\t'),
        [b'\\', b'n'] => Ok(b'\n'),
        [b'\\', b'r'] => Ok(b'\r'),
        [b'\\', b'0'] => Ok(0),
        [b'\\', b'\\'] => Ok(b'\\'),
        _ => Err(ArgError {
            message: format!("{role} must be a single byte, got {arg:?}"),
        }),
    }
}

impl CliArgs {
    /// Build the engine configuration from the parsed arguments
    pub fn to_config(&self) -> Result<Config, ArgError> {
        let delimiter = if self.tab {
            b'\t'
        } else {
            parse_byte(&self.delimiter, "delimiter")?
        };
        let quote = parse_byte(&self.quote, "quote")?;
        let record_sep = parse_byte(&self.record_sep, "record separator")?;
        let escape = self
            .escape
            .as_deref()
            .map(|arg| parse_byte(arg, "escape"))
            .transpose()?;

        // Header mode always works on sanitized bytes; --sanitize itself
        // never needs checking because clap rejects it next to --restore
        let mode = if self.restore && !self.sanitize && !self.header {
            Mode::Restore
        } else {
            Mode::Sanitize
        };

        Ok(Config {
            delimiter,
            quote,
            record_sep,
            escape,
            mode,
        })
    }
}
