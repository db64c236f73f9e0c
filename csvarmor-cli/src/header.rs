//! Header inspection
//!
//! Prints the 1-based index and name of every field in the first record, so
//! the right column numbers can be handed to cut/awk further down the
//! pipeline. Works on sanitized bytes: the first record-separator byte that
//! survives translation is a real record boundary, and sentinels inside
//! field names are mapped back to the raw bytes for display.

use std::io::{ErrorKind, Read, Write};

use csvarmor_core::{
    Config, Result, Translator, FIELD_SENTINEL, READ_BUFFER_SIZE, RECORD_SENTINEL,
};

/// Read the first record from `input` and write one `index: name` line per
/// field to `output`
pub fn print_header<R, W>(input: &mut R, output: &mut W, config: &Config) -> Result<()>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut translator = Translator::new(config)?;
    let mut fields: Vec<Vec<u8>> = Vec::new();
    let mut current: Vec<u8> = Vec::new();
    let mut buf = vec![0u8; READ_BUFFER_SIZE];

    'record: loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };
        let chunk = &mut buf[..n];
        translator.translate(chunk);

        for &byte in chunk.iter() {
            if byte == config.record_sep {
                break 'record;
            }
            if byte == config.delimiter {
                fields.push(std::mem::take(&mut current));
                continue;
            }
            match byte {
                FIELD_SENTINEL => current.push(config.delimiter),
                RECORD_SENTINEL => current.push(config.record_sep),
                _ => current.push(byte),
            }
        }
    }
    fields.push(current);

    for (index, field) in fields.iter().enumerate() {
        writeln!(output, " {}\t: {}", index + 1, String::from_utf8_lossy(field))?;
    }
    output.flush()?;
    Ok(())
}
