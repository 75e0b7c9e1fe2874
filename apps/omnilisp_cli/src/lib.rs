//! Thin command-line driver around [`omnilisp_grammar`].
//!
//! `main.rs` only ever calls [`run_cli`]; everything else — argument
//! parsing, dispatch, and error reporting — lives here so it can be unit
//! tested without spawning a process.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::Parser;
use omnilisp_base::{OmniError, Result};
use omnilisp_engine::pattern_cache_stats;

/// Parses OmniLisp source and prints its term tree.
#[derive(Parser, Debug)]
#[command(name = "omnilisp")]
#[command(about = "Parses OmniLisp source with the packrat reader grammar", version)]
pub struct Cli {
    /// Source file to parse. Reads stdin if omitted.
    pub file: Option<PathBuf>,

    /// Parse TEXT as a single expression instead of a whole program.
    #[arg(long, value_name = "TEXT")]
    pub expr: Option<String>,

    /// Parse TEXT in STRING output mode and print the matched text.
    #[arg(long, value_name = "TEXT")]
    pub string: Option<String>,

    /// Print pattern cache bucket/entry counts and exit.
    #[arg(long)]
    pub cache_stats: bool,
}

pub fn run_cli() -> Result<()> {
    env_logger::try_init().ok();
    let cli = Cli::parse();

    if cli.cache_stats {
        let (hits, misses, entries) = pattern_cache_stats();
        println!("hits={} misses={} entries={}", hits, misses, entries);
        return Ok(());
    }

    if let Some(text) = cli.expr {
        log::info!("parsing expression of {} bytes", text.len());
        let term = omnilisp_grammar::read_expr(text.as_bytes());
        println!("{}", term);
        return Ok(());
    }

    if let Some(text) = cli.string {
        log::info!("parsing {} bytes in STRING mode", text.len());
        let term = omnilisp_grammar::read_as_string(text.as_bytes());
        println!("{}", term);
        return Ok(());
    }

    let source = read_source(cli.file.as_deref())?;
    log::info!("parsing program of {} bytes", source.len());
    let term = omnilisp_grammar::read(&source);
    println!("{}", term);
    Ok(())
}

fn read_source(file: Option<&std::path::Path>) -> Result<Vec<u8>> {
    match file {
        Some(path) => fs::read(path).map_err(|e| OmniError::InvalidPattern(format!("{}: {}", path.display(), e))),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .map_err(|e| OmniError::InvalidPattern(format!("stdin: {}", e)))?;
            Ok(buf)
        }
    }
}
