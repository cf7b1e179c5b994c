//! `hadloc-asm` CLI entry point. Reads a `.hdc` source file, runs the full
//! assembler pipeline, and writes the three machine-code files spec §6
//! describes — or reports a diagnostic and exits non-zero without writing
//! anything partial.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use hadloc_asm::assemble::{assemble, write_outputs, ListingOptions};
use hadloc_asm::error::render_diagnostic;
use log::{info, warn};
use thiserror::Error;

#[derive(ClapParser, Debug)]
#[command(name = "hadloc-asm", about = "Two-pass assembler for the HADLoC 8-bit computer")]
struct Cli {
    /// Source file, must have a `.hdc` extension.
    input: PathBuf,

    /// Output file stem (default: the input file name without `.hdc`).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Skip writing `_bin.txt` (only `.bin` and `_hex.txt` are produced).
    #[arg(long)]
    hex_only: bool,

    /// Skip writing `_hex.txt` (only `.bin` and `_bin.txt` are produced).
    #[arg(long)]
    bin_only: bool,

    /// Raise the log level to debug.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("{0}: expected a .hdc file")]
    WrongExtension(PathBuf),
    #[error("{0}: {1}")]
    Io(PathBuf, std::io::Error),
    #[error("{0}: not valid UTF-8")]
    NotUtf8(PathBuf),
}

fn read_source(path: &PathBuf) -> Result<String, CliError> {
    if path.extension().and_then(|e| e.to_str()) != Some("hdc") {
        return Err(CliError::WrongExtension(path.clone()));
    }
    let bytes = fs::read(path).map_err(|e| CliError::Io(path.clone(), e))?;
    String::from_utf8(bytes).map_err(|_| CliError::NotUtf8(path.clone()))
}

fn output_stem(cli: &Cli) -> PathBuf {
    cli.output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension(""))
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let source = read_source(&cli.input)?;
    info!("assembling {}", cli.input.display());

    let assembled = assemble(&source).map_err(|err| {
        let rendered = render_diagnostic(&cli.input.to_string_lossy(), &source, &err);
        anyhow::anyhow!("{rendered}")
    })?;

    let stem = output_stem(cli);
    if cli.hex_only && cli.bin_only {
        anyhow::bail!("--hex-only and --bin-only are mutually exclusive");
    }
    let options = ListingOptions {
        write_hex_txt: !cli.bin_only,
        write_bin_txt: !cli.hex_only,
    };

    let paths = write_outputs(&assembled.bytes, &stem, &options)?;
    println!("{}", paths.bin.display());
    if options.write_hex_txt {
        println!("{}", paths.hex_txt.display());
    }
    if options.write_bin_txt {
        println!("{}", paths.bin_txt.display());
    }

    for warning in &assembled.warnings {
        warn!("{warning}");
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
