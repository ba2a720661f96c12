//! CLI argument parsing using clap.
//!
//! `--in` and `--out` are optional at the parser level on purpose: a
//! missing required option is a pipeline misconfiguration, reported
//! with a graceful zero exit instead of clap's usage error.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stubpack")]
#[command(author, version, about = "Package a directory tree into a stub-prefixed bundle")]
pub struct Cli {
    /// Base directory to package
    #[arg(short = 'i', long = "in", value_name = "DIR")]
    pub input: Option<PathBuf>,

    /// Output bundle path
    #[arg(short = 'o', long = "out", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Compression mode: gz, bz2, or none (case-insensitive)
    #[arg(short = 'c', long = "compress", value_name = "MODE")]
    pub compress: Option<String>,

    /// Literal stub text, or a path to a stub file
    #[arg(short = 's', long = "stub", value_name = "STUB")]
    pub stub: Option<String>,

    /// Path to an ignore-rules file (newline-separated entries)
    #[arg(
        short = 'p',
        long = "pignore",
        visible_alias = "pack-ignore",
        value_name = "FILE"
    )]
    pub pignore: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}
