//! # Assemble
//!
//! Drives the full pipeline — lex, parse, resolve, encode — end to end and
//! renders the result into the three output formats spec §6 requires.
//! Grounded in the teacher's own `assembler::assemble` driver, generalized
//! past its single in-memory `Vec<u16>` result to also own file output,
//! since HADLoC's external interface (unlike the teacher's) specifies
//! concrete output file names and layouts.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AsmError, Warning};
use crate::lexer::tokenize;
use crate::parser::parse;
use crate::resolver::resolve;

/// A fully assembled program: the encoded bytes plus any warnings collected
/// along the way.
pub struct Assembled {
    pub bytes: Vec<u8>,
    pub warnings: Vec<Warning>,
}

/// Runs tokenize -> parse -> resolve -> encode on `source`, stopping at the
/// first error exactly as spec §5 requires (no partial results on failure).
pub fn assemble(source: &str) -> Result<Assembled, AsmError> {
    let tokens = tokenize(source)?;
    let output = parse(&tokens)?;
    let mut symbols = output.symbols;
    let bytes = resolve(output.instructions, &mut symbols)?;
    Ok(Assembled {
        bytes,
        warnings: output.warnings,
    })
}

/// The three paths a successful assembly writes, `.bin` first per spec §6.
pub struct OutputPaths {
    pub bin: PathBuf,
    pub hex_txt: PathBuf,
    pub bin_txt: PathBuf,
}

impl OutputPaths {
    pub fn for_stem(stem: &Path) -> Self {
        Self {
            bin: stem.with_extension("bin"),
            hex_txt: with_suffix(stem, "_hex.txt"),
            bin_txt: with_suffix(stem, "_bin.txt"),
        }
    }
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.file_name().map(|n| n.to_owned()).unwrap_or_default();
    name.push(suffix);
    stem.with_file_name(name)
}

#[derive(Debug)]
pub enum WriteError {
    Io(PathBuf, io::Error),
}

impl fmt::Display for WriteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteError::Io(path, err) => write!(f, "failed to write {}: {err}", path.display()),
        }
    }
}

impl std::error::Error for WriteError {}

/// Which optional listing files `write_outputs` should produce. `.bin` is
/// always written; these gate the two human-readable listings (spec §6's
/// `--hex-only`/`--bin-only` CLI flags).
pub struct ListingOptions {
    pub write_hex_txt: bool,
    pub write_bin_txt: bool,
}

impl Default for ListingOptions {
    fn default() -> Self {
        Self { write_hex_txt: true, write_bin_txt: true }
    }
}

/// Writes `.bin` plus whichever listings `options` selects under `stem`, in
/// `.bin`-first order, and returns the paths that *would* exist (callers use
/// `options` again to know which of `hex_txt`/`bin_txt` were actually
/// written).
pub fn write_outputs(
    bytes: &[u8],
    stem: &Path,
    options: &ListingOptions,
) -> Result<OutputPaths, WriteError> {
    let paths = OutputPaths::for_stem(stem);
    fs::write(&paths.bin, bytes).map_err(|e| WriteError::Io(paths.bin.clone(), e))?;
    if options.write_hex_txt {
        fs::write(&paths.hex_txt, render_hex_listing(bytes))
            .map_err(|e| WriteError::Io(paths.hex_txt.clone(), e))?;
    }
    if options.write_bin_txt {
        fs::write(&paths.bin_txt, render_bin_listing(bytes))
            .map_err(|e| WriteError::Io(paths.bin_txt.clone(), e))?;
    }
    Ok(paths)
}

/// 16-column grouped hex, with an address-header row every 512 bytes
/// (spec §6), mirroring `original_source/assembler/codewriter.py`'s
/// `write_hex` line-wrapping.
pub fn render_hex_listing(bytes: &[u8]) -> String {
    let mut out = String::new();
    for (i, chunk) in bytes.chunks(16).enumerate() {
        let addr = i * 16;
        if addr % 512 == 0 {
            out.push_str(&format!("-- 0x{addr:04X} --\n"));
        }
        let line: Vec<String> = chunk.iter().map(|b| format!("{b:02X}")).collect();
        out.push_str(&line.join(" "));
        out.push('\n');
    }
    out
}

/// One binary byte per line (spec §6).
pub fn render_bin_listing(bytes: &[u8]) -> String {
    let mut out = String::new();
    for b in bytes {
        out.push_str(&format!("{b:08b}\n"));
    }
    out
}
