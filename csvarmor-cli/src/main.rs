//! csvarmor - pipeline-safe CSV via sentinel substitution
//!
//! Replaces field-delimiter and record-separator bytes inside quoted fields
//! with nonprinting sentinel bytes (and back), so that ordinary Unix text
//! tools can process CSV without misreading embedded commas and newlines.

mod cli;
mod header;

use std::fs::File;
use std::io::{self, BufWriter, LineWriter, Read, Write};
use std::path::Path;
use std::process;

use clap::Parser;
use csvarmor_core::{Config, Result, StreamCopier, Translator};

use cli::CliArgs;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = match CliArgs::try_parse() {
        // clap renders its own usage text; the exit code contract is ours
        Ok(args) => args,
        Err(e) => {
            let _ = e.print();
            process::exit(1);
        }
    };

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("csvarmor: {e}");
            eprintln!("Try 'csvarmor --help' for more information.");
            process::exit(1);
        }
    };

    if let Err(e) = run(&args, &config) {
        eprintln!("csvarmor: {e}");
        process::exit(1);
    }
}

fn run(args: &CliArgs, config: &Config) -> Result<()> {
    log::debug!("mode: {:?}, files: {}", config.mode, args.files.len());

    let stdout = io::stdout().lock();
    let mut output: Box<dyn Write> = if args.line_buffered {
        Box::new(LineWriter::new(stdout))
    } else {
        Box::new(BufWriter::new(stdout))
    };

    if args.header {
        let mut input = open_first_input(args)?;
        return header::print_header(input.as_mut(), &mut *output, config);
    }

    let translator = Translator::new(config)?;
    let mut copier = StreamCopier::new(translator);

    if args.files.is_empty() {
        let mut stdin = io::stdin().lock();
        let copied = copier.copy(&mut stdin, &mut *output)?;
        log::debug!("copied {copied} bytes from stdin");
        return Ok(());
    }

    for path in &args.files {
        // Each file is an independent logical stream
        copier.reset();
        let mut file = open_input(path)?;
        let copied = copier.copy(&mut file, &mut *output)?;
        log::debug!("copied {copied} bytes from {}", path.display());
    }
    Ok(())
}

fn open_input(path: &Path) -> Result<File> {
    File::open(path)
        .map_err(|e| io::Error::new(e.kind(), format!("{}: {e}", path.display())).into())
}

fn open_first_input(args: &CliArgs) -> Result<Box<dyn Read>> {
    Ok(match args.files.first() {
        Some(path) => Box::new(open_input(path)?),
        None => Box::new(io::stdin().lock()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_open_input_reports_path() {
        let err = open_input(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn test_open_input_reads_file() {
        let mut tmp = tempfile::NamedTempFile::new().unwrap();
        tmp.write_all(b"a,\"b,c\"\n").unwrap();

        let mut file = open_input(tmp.path()).unwrap();
        let translator = Translator::new(&Config::default()).unwrap();
        let mut copier = StreamCopier::new(translator);
        let mut out = Vec::new();
        copier.copy(&mut file, &mut out).unwrap();
        assert_eq!(out, b"a,\"b\x1fc\"\n");
    }
}
