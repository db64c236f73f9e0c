//! csvarmor-core - quote-aware byte translation for pipeline-safe CSV
//!
//! This crate implements the engine behind the `csvarmor` tool. It replaces
//! field-delimiter and record-separator bytes that occur *inside quoted
//! fields* with reserved sentinel bytes, so that line/field-oriented tools
//! (cut, head, sort, ...) can process the data safely, and later reverses
//! the substitution exactly.
//!
//! The engine is designed to:
//! - Handle arbitrary chunk boundaries (streaming)
//! - Preserve input length exactly (position-wise substitution, no insertion)
//! - Track quoting context across reads, including doubled quotes and an
//!   optional escape byte
//! - Guarantee `restore(sanitize(x)) == x` for sentinel-free input

mod config;
mod error;
mod scan;
mod state;
mod stream;
mod translate;

pub use config::{Config, Mode, FIELD_SENTINEL, RECORD_SENTINEL};
pub use error::{Error, Result};
pub use scan::QuoteScanner;
pub use state::{QuoteState, StreamState};
pub use stream::{StreamCopier, READ_BUFFER_SIZE};
pub use translate::{Restorer, Sanitizer, Translator};
