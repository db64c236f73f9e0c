//! Byte translation
//!
//! Implements both translation directions over single bytes:
//!
//! - Sanitize: a per-byte automaton that tracks quoting context and replaces
//!   delimiter/record-separator bytes inside quoted fields with sentinels.
//! - Restore: a stateless 256-entry table mapping sentinels back to the
//!   configured bytes. No quote tracking is needed because sanitize already
//!   resolved all ambiguity.
//!
//! Translation is position-wise: one byte in, one byte out, never more or
//! less. The byte substitution itself cannot fail.

use crate::config::{Config, Mode, FIELD_SENTINEL, RECORD_SENTINEL};
use crate::error::Result;
use crate::scan::QuoteScanner;
use crate::state::{QuoteState, StreamState};

/// Sanitize-direction translator
///
/// Holds only the configured bytes; the stream state is passed into and
/// returned from [`Sanitizer::step`] explicitly.
#[derive(Debug, Clone, Copy)]
pub struct Sanitizer {
    delimiter: u8,
    quote: u8,
    record_sep: u8,
    escape: Option<u8>,
}

impl Sanitizer {
    /// Build a sanitizer from the configured bytes
    pub fn new(config: &Config) -> Self {
        Self {
            delimiter: config.delimiter,
            quote: config.quote,
            record_sep: config.record_sep,
            escape: config.escape,
        }
    }

    /// Translate one byte, threading the stream state through explicitly
    pub fn step(&self, state: StreamState, byte: u8) -> (StreamState, u8) {
        let escaped = state.escape_armed;
        let mut next = state;

        // The escape flag re-arms only on an unescaped escape byte, so a
        // doubled escape does not arm for the byte after it.
        next.escape_armed = match self.escape {
            Some(e) => byte == e && !escaped,
            None => false,
        };

        let mut out = byte;
        next.quote = match state.quote {
            QuoteState::Unquoted => self.unquoted(byte, escaped),
            QuoteState::Quoted => {
                if byte == self.quote && !escaped {
                    QuoteState::QuotePending
                } else {
                    if byte == self.delimiter {
                        out = FIELD_SENTINEL;
                    } else if byte == self.record_sep {
                        out = RECORD_SENTINEL;
                    }
                    QuoteState::Quoted
                }
            }
            QuoteState::QuotePending => {
                if byte == self.quote && !escaped {
                    // Doubled quote: both bytes are literal content
                    QuoteState::Quoted
                } else {
                    // The pending quote closed the field; the current byte
                    // is evaluated under the unquoted rules
                    self.unquoted(byte, escaped)
                }
            }
        };

        (next, out)
    }

    fn unquoted(&self, byte: u8, escaped: bool) -> QuoteState {
        if byte == self.quote && !escaped {
            QuoteState::Quoted
        } else {
            QuoteState::Unquoted
        }
    }

    /// Translate a whole buffer in place, returning the state after it
    pub fn translate(&self, mut state: StreamState, buf: &mut [u8]) -> StreamState {
        for byte in buf.iter_mut() {
            let (next, out) = self.step(state, *byte);
            state = next;
            *byte = out;
        }
        state
    }
}

/// Restore-direction translator
#[derive(Clone)]
pub struct Restorer {
    table: [u8; 256],
}

impl Restorer {
    /// Build the sentinel-to-byte translation table
    pub fn new(config: &Config) -> Self {
        let mut table = [0u8; 256];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        table[FIELD_SENTINEL as usize] = config.delimiter;
        table[RECORD_SENTINEL as usize] = config.record_sep;
        Self { table }
    }

    /// Translate one byte
    pub fn step(&self, byte: u8) -> u8 {
        self.table[byte as usize]
    }

    /// Translate a whole buffer in place
    pub fn translate(&self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = self.table[*byte as usize];
        }
    }
}

impl std::fmt::Debug for Restorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Restorer").finish_non_exhaustive()
    }
}

/// Streaming translator, selected once from the configured mode
///
/// The strategy is a tagged variant chosen at configuration time, not a
/// per-byte dispatch. Sanitizing without an escape byte uses the
/// memchr-accelerated scanner; an escape byte forces the per-byte automaton
/// because the suppression rule needs the one-byte lag.
#[derive(Debug, Clone)]
pub enum Translator {
    /// Per-byte sanitize automaton
    Sanitize(Sanitizer, StreamState),
    /// Bulk-scan sanitize (no escape byte configured)
    SanitizeFast(QuoteScanner),
    /// Stateless sentinel mapping
    Restore(Restorer),
}

impl Translator {
    /// Select the translation strategy for a validated configuration
    pub fn new(config: &Config) -> Result<Self> {
        config.validate()?;
        Ok(match config.mode {
            Mode::Restore => Translator::Restore(Restorer::new(config)),
            Mode::Sanitize if config.escape.is_none() => {
                Translator::SanitizeFast(QuoteScanner::new(config))
            }
            Mode::Sanitize => Translator::Sanitize(Sanitizer::new(config), StreamState::new()),
        })
    }

    /// Translation direction of this strategy
    pub fn mode(&self) -> Mode {
        match self {
            Translator::Restore(_) => Mode::Restore,
            _ => Mode::Sanitize,
        }
    }

    /// Translate one chunk in place. Output length equals input length.
    pub fn translate(&mut self, buf: &mut [u8]) {
        match self {
            Translator::Sanitize(engine, state) => {
                *state = engine.translate(*state, buf);
            }
            Translator::SanitizeFast(scanner) => scanner.translate(buf),
            Translator::Restore(restorer) => restorer.translate(buf),
        }
    }

    /// Drop carried quoting context at the start of a new logical stream
    pub fn reset(&mut self) {
        match self {
            Translator::Sanitize(_, state) => state.reset(),
            Translator::SanitizeFast(scanner) => scanner.reset(),
            Translator::Restore(_) => {}
        }
    }
}
