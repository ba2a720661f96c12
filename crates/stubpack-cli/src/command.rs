//! Build command: validates arguments, assembles the pack spec, and
//! runs the build.
//!
//! Argument-level misconfiguration exits with status 0 after printing a
//! message. This tool runs inside build pipelines, and a misconfigured
//! invocation must not read as a build-system crash; genuine build
//! failures still exit non-zero.

use std::path::Path;
use std::process;

use anyhow::Result;
use stubpack_core::BuildObserver;
use stubpack_core::CompressionMode;
use stubpack_core::DEFAULT_STUB;
use stubpack_core::PackSpec;
use stubpack_core::build;

use crate::cli::Cli;
use crate::error::convert_pack_error;
use crate::output::OutputFormatter;

pub fn execute(cli: &Cli, formatter: &dyn OutputFormatter) -> Result<()> {
    let Some(input) = &cli.input else {
        graceful_exit(formatter, "missing required option --in");
    };
    let Some(output) = &cli.output else {
        graceful_exit(formatter, "missing required option --out");
    };

    let compression = match &cli.compress {
        Some(value) => match CompressionMode::parse(value) {
            Ok(mode) => Some(mode),
            Err(_) => graceful_exit(formatter, &format!("unknown compression mode: {value}")),
        },
        None => None,
    };

    let ignore = match &cli.pignore {
        Some(path) => {
            if !path.is_file() {
                graceful_exit(
                    formatter,
                    &format!("invalid ignore file: {}", path.display()),
                );
            }
            match std::fs::read_to_string(path) {
                Ok(contents) => contents.split('\n').map(String::from).collect(),
                Err(e) => graceful_exit(
                    formatter,
                    &format!("invalid ignore file {}: {e}", path.display()),
                ),
            }
        }
        None => Vec::new(),
    };

    let mut spec = PackSpec::new(input, output)
        .with_ignore(ignore)
        .with_stub(cli.stub.clone().unwrap_or_else(|| DEFAULT_STUB.to_string()));
    if let Some(mode) = compression {
        spec = spec.with_compression(mode);
    }

    let mut observer = NoticeObserver { formatter };
    let report = build(&spec, &mut observer).map_err(|e| convert_pack_error(e, input, output))?;
    formatter.format_build_result(output, &report)
}

/// Reports an argument problem and exits with the graceful status.
fn graceful_exit(formatter: &dyn OutputFormatter, message: &str) -> ! {
    formatter.format_warning(message);
    process::exit(0);
}

/// Bridges build notices to the output formatter.
struct NoticeObserver<'a> {
    formatter: &'a dyn OutputFormatter,
}

impl BuildObserver for NoticeObserver<'_> {
    fn on_overwrite(&mut self, output: &Path) {
        self.formatter.format_notice(&format!(
            "bundle {} already exists, overwriting",
            output.display()
        ));
    }

    fn on_ignored(&mut self, path: &Path, rule: &str) {
        self.formatter
            .format_notice(&format!("ignored {} (rule: {})", path.display(), rule));
    }

    fn on_inserted(&mut self, count: usize) {
        self.formatter.format_notice(&format!("added {count} files"));
    }

    fn on_compressing(&mut self, mode: CompressionMode) {
        self.formatter
            .format_notice(&format!("compressing files ({mode})"));
    }
}
