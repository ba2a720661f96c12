//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::path::Path;
use stubpack_core::BuildReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_build_result(&self, output: &Path, report: &BuildReport) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        if self.use_colors {
            let _ = self.term.write_line(&format!(
                "{} Bundle written to {}",
                style("✓").green().bold(),
                output.display()
            ));
        } else {
            let _ = self
                .term
                .write_line(&format!("Bundle written to {}", output.display()));
        }

        let _ = self
            .term
            .write_line(&format!("  Files added: {}", report.files_added));
        let _ = self
            .term
            .write_line(&format!("  Files ignored: {}", report.files_ignored()));
        if report.compressed {
            let _ = self.term.write_line("  Compression pass: yes");
        }
        let _ = self
            .term
            .write_line(&format!("  Duration: {:.3?}", report.duration));

        if self.verbose {
            for entry in &report.ignored {
                let _ = self.term.write_line(&format!(
                    "  ignored {} (rule: {})",
                    entry.path.display(),
                    entry.rule
                ));
            }
        }

        Ok(())
    }

    fn format_notice(&self, message: &str) {
        if self.quiet {
            return;
        }
        let _ = self.term.write_line(message);
    }

    fn format_warning(&self, message: &str) {
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = term.write_line(&format!("warning: {message}"));
        }
    }

    fn format_error(&self, error: &anyhow::Error) {
        let term = Term::stderr();
        if self.use_colors {
            let _ = term.write_line(&format!("{} {error:#}", style("✗").red().bold()));
        } else {
            let _ = term.write_line(&format!("error: {error:#}"));
        }
    }
}
