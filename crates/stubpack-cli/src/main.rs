//! Stubpack CLI - Command-line utility for packaging a directory tree
//! into a stub-prefixed bundle.

mod cli;
mod command;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    command::execute(&cli, &*formatter)
}
