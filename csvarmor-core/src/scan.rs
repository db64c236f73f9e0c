//! Bulk-scan sanitize path
//!
//! Instead of inspecting every byte, locate quote bytes with `memchr` to
//! find the quoted runs, then substitute delimiter/record-separator bytes
//! only inside those runs. This is the same automaton expressed as quote
//! toggling: a doubled quote encloses zero bytes, so toggling out and back
//! in substitutes exactly what the one-byte-lag automaton does.
//!
//! Not usable when an escape byte is configured; the suppression rule needs
//! the per-byte automaton. Output is differential-tested against it.

use memchr::{memchr, memchr2};

use crate::config::{Config, FIELD_SENTINEL, RECORD_SENTINEL};

/// memchr-accelerated sanitizer
#[derive(Debug, Clone)]
pub struct QuoteScanner {
    delimiter: u8,
    quote: u8,
    record_sep: u8,
    /// Carried across chunks: the current position is inside a quoted field
    in_quotes: bool,
}

impl QuoteScanner {
    /// Build a scanner from the configured bytes
    pub fn new(config: &Config) -> Self {
        Self {
            delimiter: config.delimiter,
            quote: config.quote,
            record_sep: config.record_sep,
            in_quotes: false,
        }
    }

    /// Drop carried quoting context at the start of a new logical stream
    pub fn reset(&mut self) {
        self.in_quotes = false;
    }

    /// Sanitize one chunk in place
    pub fn translate(&mut self, buf: &mut [u8]) {
        let mut pos = 0;
        while pos < buf.len() {
            if self.in_quotes {
                // Substitute structural bytes up to the closing quote, or to
                // the end of the chunk if the field continues past it
                let end = match memchr(self.quote, &buf[pos..]) {
                    Some(i) => pos + i,
                    None => buf.len(),
                };
                self.substitute(buf, pos, end);
                if end == buf.len() {
                    pos = end;
                } else {
                    self.in_quotes = false;
                    pos = end + 1;
                }
            } else {
                match memchr(self.quote, &buf[pos..]) {
                    Some(i) => {
                        self.in_quotes = true;
                        pos += i + 1;
                    }
                    None => pos = buf.len(),
                }
            }
        }
    }

    fn substitute(&self, buf: &mut [u8], start: usize, end: usize) {
        let mut pos = start;
        while let Some(i) = memchr2(self.delimiter, self.record_sep, &buf[pos..end]) {
            let hit = pos + i;
            buf[hit] = if buf[hit] == self.delimiter {
                FIELD_SENTINEL
            } else {
                RECORD_SENTINEL
            };
            pos = hit + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StreamState;
    use crate::translate::Sanitizer;

    fn scan(input: &[u8]) -> Vec<u8> {
        let mut scanner = QuoteScanner::new(&Config::default());
        let mut buf = input.to_vec();
        scanner.translate(&mut buf);
        buf
    }

    fn naive(input: &[u8]) -> Vec<u8> {
        let engine = Sanitizer::new(&Config::default());
        let mut buf = input.to_vec();
        engine.translate(StreamState::new(), &mut buf);
        buf
    }

    #[test]
    fn test_masks_quoted_delimiters() {
        assert_eq!(scan(b"a,\"b,c\",d\n"), b"a,\"b\x1fc\",d\n");
        assert_eq!(scan(b"\"a\nb\",c\n"), b"\"a\x1eb\",c\n");
    }

    #[test]
    fn test_no_quotes_untouched() {
        assert_eq!(scan(b"a,b,c\n1,2,3\n"), b"a,b,c\n1,2,3\n");
    }

    #[test]
    fn test_agrees_with_automaton() {
        let cases: [&[u8]; 8] = [
            b"",
            b"a,b,c\n",
            b"a,\"b,c\",d\n",
            b"\"a\"\"b\",c\n",
            b"\"a\"\",\"\"b\",c\n",
            b"\"unterminated,field\nwith newline",
            b"\",\",\",\"",
            b"\"\"\"\"\"\n,\"",
        ];
        for case in cases {
            assert_eq!(scan(case), naive(case), "input {case:?}");
        }
    }

    #[test]
    fn test_quoted_state_carries_across_chunks() {
        let mut scanner = QuoteScanner::new(&Config::default());

        let mut first = b"a,\"b".to_vec();
        scanner.translate(&mut first);
        assert_eq!(first, b"a,\"b");

        // Still inside the quoted field opened in the previous chunk
        let mut second = b",c\",d\n".to_vec();
        scanner.translate(&mut second);
        assert_eq!(second, b"\x1fc\",d\n");
    }

    #[test]
    fn test_chunked_agrees_with_whole_buffer() {
        let input = b"\"a,b\",\"c\nd\",\"e\"\"f,g\"\nplain,row\n";
        let whole = scan(input);

        for chunk_size in [1usize, 2, 3, 7] {
            let mut scanner = QuoteScanner::new(&Config::default());
            let mut out = Vec::new();
            for chunk in input.chunks(chunk_size) {
                let mut chunk = chunk.to_vec();
                scanner.translate(&mut chunk);
                out.extend_from_slice(&chunk);
            }
            assert_eq!(out, whole, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_reset_clears_quoted_state() {
        let mut scanner = QuoteScanner::new(&Config::default());
        let mut buf = b"\"open".to_vec();
        scanner.translate(&mut buf);

        scanner.reset();
        let mut buf = b",still unquoted\n".to_vec();
        scanner.translate(&mut buf);
        assert_eq!(buf, b",still unquoted\n");
    }
}
