//! Quote-context tracking
//!
//! The state is an explicit value threaded through each translation step,
//! never hidden module state, so the engine stays reentrant and can drive
//! multiple independent streams within one process.

/// Quoting context at the current stream position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    /// Between fields or inside an unquoted field
    #[default]
    Unquoted,
    /// Inside a quoted field
    Quoted,
    /// A quote byte was just seen inside a quoted field. Whether it closed
    /// the field or starts a doubled literal quote is decided by the next
    /// byte (one-byte decision lag).
    QuotePending,
}

/// Sanitize-side stream state: quoting context plus the escape flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreamState {
    /// Current quoting context
    pub quote: QuoteState,
    /// The previous byte was an unescaped escape byte; the current byte
    /// cannot open or close a quoted region
    pub escape_armed: bool,
}

impl StreamState {
    /// State at the start of a logical stream
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the start-of-stream state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
