//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;
use stubpack_core::BuildReport;

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_build_result(&self, output: &Path, report: &BuildReport) -> Result<()> {
        #[derive(Serialize)]
        struct IgnoredOutput {
            path: String,
            rule: String,
        }

        #[derive(Serialize)]
        struct BuildOutput {
            output_path: String,
            files_added: usize,
            files_ignored: usize,
            overwrote: bool,
            compressed: bool,
            duration_ms: u128,
            ignored: Vec<IgnoredOutput>,
        }

        let data = BuildOutput {
            output_path: output.display().to_string(),
            files_added: report.files_added,
            files_ignored: report.files_ignored(),
            overwrote: report.overwrote,
            compressed: report.compressed,
            duration_ms: report.duration.as_millis(),
            ignored: report
                .ignored
                .iter()
                .map(|entry| IgnoredOutput {
                    path: entry.path.display().to_string(),
                    rule: entry.rule.clone(),
                })
                .collect(),
        };

        let out = JsonOutput::success("build", data);
        Self::output(&out)
    }

    fn format_notice(&self, _message: &str) {
        // Progress notices are folded into the final JSON document.
    }

    fn format_warning(&self, message: &str) {
        let out = JsonOutput::<()>::error("build", message);
        let _ = Self::output(&out);
    }

    fn format_error(&self, error: &anyhow::Error) {
        let out = JsonOutput::<()>::error("build", format!("{error:#}"));
        let _ = Self::output(&out);
    }
}
