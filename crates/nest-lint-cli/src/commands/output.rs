//! Per-file output formatting for lint results.

use anyhow::Result;
use miette::{NamedSource, Report};
use nest_lint_core::{FileReport, Violation, ViolationDiagnostic};

use crate::OutputFormat;

/// Prints reports as each file is checked.
pub struct Printer {
    format: OutputFormat,
    files: usize,
    flagged_files: usize,
}

impl Printer {
    /// Creates a printer for `format`.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            files: 0,
            flagged_files: 0,
        }
    }

    /// Prints one file's report. `content` is the checked source.
    pub fn print(&mut self, report: &FileReport, content: &str) -> Result<()> {
        self.files += 1;
        if !report.is_clean() {
            self.flagged_files += 1;
        }

        match self.format {
            OutputFormat::Text => print_text(report, content),
            OutputFormat::Json => println!("{}", json_line(report)?),
            OutputFormat::Compact => {
                for violation in &report.violations {
                    println!("{violation}");
                }
            }
        }
        Ok(())
    }

    /// Prints the closing summary line for text output.
    pub fn finish(&self) {
        if !matches!(self.format, OutputFormat::Text) {
            return;
        }

        let color = if self.flagged_files > 0 {
            "\x1b[31m"
        } else {
            "\x1b[32m"
        };
        println!(
            "{color}{} of {} file(s) have violations\x1b[0m",
            self.flagged_files, self.files
        );
    }
}

fn print_text(report: &FileReport, content: &str) {
    let name = report.file.display().to_string();
    for violation in &report.violations {
        println!("{}", render(violation, &name, content));
    }
}

/// Renders one violation as an annotated source snippet.
fn render(violation: &Violation, name: &str, content: &str) -> String {
    let header = format!(
        "{}:{}:{}: {}",
        name, violation.location.line, violation.location.column, violation.severity
    );
    let report = Report::new(ViolationDiagnostic::from(violation))
        .with_source_code(NamedSource::new(name, content.to_owned()));
    format!("{header}\n{report:?}")
}

fn json_line(report: &FileReport) -> Result<String> {
    Ok(serde_json::to_string(report)?)
}
