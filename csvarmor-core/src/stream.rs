//! Stream copier
//!
//! Drives the read -> translate -> write loop over one logical input
//! stream. Chunks are translated in place and written before the next read;
//! the only thing carried between reads is the translator's quoting state.

use std::io::{ErrorKind, Read, Write};

use memchr::memchr2;

use crate::config::{Mode, FIELD_SENTINEL, RECORD_SENTINEL};
use crate::error::Result;
use crate::translate::Translator;

/// Size of the read window
pub const READ_BUFFER_SIZE: usize = 64 * 1024;

/// Copies one or more logical streams through a translator
#[derive(Debug)]
pub struct StreamCopier {
    translator: Translator,
    buf: Vec<u8>,
    warned_sentinel: bool,
}

impl StreamCopier {
    /// Create a copier around a configured translator
    pub fn new(translator: Translator) -> Self {
        Self {
            translator,
            buf: vec![0; READ_BUFFER_SIZE],
            warned_sentinel: false,
        }
    }

    /// Start a new logical stream: carried quoting context is dropped
    pub fn reset(&mut self) {
        self.translator.reset();
        self.warned_sentinel = false;
    }

    /// Copy `reader` to `writer`, translating every byte in stream order.
    ///
    /// The writer is flushed when input is exhausted and on the error path.
    /// A short write is a fatal error for the run. Returns the number of
    /// bytes copied.
    pub fn copy<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let result = self.copy_inner(reader, writer);
        match result {
            Ok(total) => {
                writer.flush()?;
                Ok(total)
            }
            Err(e) => {
                // Push out what was already translated; the original error
                // is the one reported
                let _ = writer.flush();
                Err(e)
            }
        }
    }

    fn copy_inner<R, W>(&mut self, reader: &mut R, writer: &mut W) -> Result<u64>
    where
        R: Read + ?Sized,
        W: Write + ?Sized,
    {
        let mut total = 0u64;
        loop {
            let n = match reader.read(&mut self.buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            let chunk = &mut self.buf[..n];

            if !self.warned_sentinel
                && self.translator.mode() == Mode::Sanitize
                && memchr2(FIELD_SENTINEL, RECORD_SENTINEL, chunk).is_some()
            {
                log::warn!("input already contains sentinel bytes; restore will rewrite them");
                self.warned_sentinel = true;
            }

            self.translator.translate(chunk);
            writer.write_all(chunk)?;
            total += n as u64;
        }
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::io::{self, Cursor};

    /// Reader that hands out at most `chunk` bytes per read call
    struct ChunkedReader {
        data: Vec<u8>,
        pos: usize,
        chunk: usize,
    }

    impl ChunkedReader {
        fn new(data: &[u8], chunk: usize) -> Self {
            Self {
                data: data.to_vec(),
                pos: 0,
                chunk,
            }
        }
    }

    impl Read for ChunkedReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }
    }

    /// Writer whose write and flush calls can be made to fail
    struct FailingWriter {
        written: Vec<u8>,
        fail_after: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() >= self.fail_after {
                return Err(io::Error::new(io::ErrorKind::Other, "sink full"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn copier() -> StreamCopier {
        StreamCopier::new(Translator::new(&Config::default()).unwrap())
    }

    fn sanitize_stream(input: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        copier()
            .copy(&mut Cursor::new(input.to_vec()), &mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_copy_translates() {
        assert_eq!(sanitize_stream(b"a,\"b,c\",d\n"), b"a,\"b\x1fc\",d\n");
    }

    #[test]
    fn test_copy_reports_length() {
        let mut out = Vec::new();
        let copied = copier()
            .copy(&mut Cursor::new(b"a,b\n".to_vec()), &mut out)
            .unwrap();
        assert_eq!(copied, 4);
        assert_eq!(out.len(), 4);
    }

    #[test]
    fn test_chunk_boundary_invariance() {
        let input = b"a,\"b,c\",\"d\ne\",\"f\"\"g,h\"\nlast,row\n";
        let whole = sanitize_stream(input);

        for chunk_size in [1usize, 7, 65536] {
            let mut reader = ChunkedReader::new(input, chunk_size);
            let mut out = Vec::new();
            copier().copy(&mut reader, &mut out).unwrap();
            assert_eq!(out, whole, "chunk size {chunk_size}");
        }
    }

    #[test]
    fn test_state_resets_between_files() {
        let mut copier = copier();
        let mut out = Vec::new();

        // First file ends inside an open quoted field
        copier
            .copy(&mut Cursor::new(b"\"a".to_vec()), &mut out)
            .unwrap();

        // Each file is an independent stream: after the reset, the comma in
        // the second file is structural again
        copier.reset();
        copier
            .copy(&mut Cursor::new(b",b\n".to_vec()), &mut out)
            .unwrap();
        assert_eq!(out, b"\"a,b\n");
    }

    #[test]
    fn test_without_reset_state_carries_over() {
        let mut copier = copier();
        let mut out = Vec::new();

        copier
            .copy(&mut Cursor::new(b"\"a".to_vec()), &mut out)
            .unwrap();
        copier
            .copy(&mut Cursor::new(b",b\n".to_vec()), &mut out)
            .unwrap();
        assert_eq!(out, b"\"a\x1fb\x1e");
    }

    #[test]
    fn test_write_failure_is_fatal() {
        let mut writer = FailingWriter {
            written: Vec::new(),
            fail_after: 0,
        };
        let result = copier().copy(&mut Cursor::new(b"a,b\n".to_vec()), &mut writer);
        assert!(result.is_err());
    }

    #[test]
    fn test_read_failure_is_fatal() {
        struct BrokenReader;
        impl Read for BrokenReader {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
            }
        }
        let mut out = Vec::new();
        assert!(copier().copy(&mut BrokenReader, &mut out).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_stream(b""), b"");
    }
}
