/// The reporter contract and the built-in text and JSON reporters.

use std::io::{self, Write};

use crate::error::{HarnessError, Result};
use crate::report::CompilationReportData;

/// Renders the aggregated report data. Invoked exactly once per run, after
/// every collector's post-compile hook has finished.
pub trait Reporter {
    fn generate_report(&mut self, data: &CompilationReportData) -> Result<()>;
}

/// Human-readable section dump.
pub struct TextReporter<W: Write> {
    out: W,
}

impl TextReporter<io::Stdout> {
    pub fn stdout() -> Self {
        TextReporter { out: io::stdout() }
    }
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        TextReporter { out }
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn generate_report(&mut self, data: &CompilationReportData) -> Result<()> {
        if data.is_empty() {
            writeln!(self.out, "(no report data collected)")?;
            return Ok(());
        }
        for (name, value) in data.sections() {
            writeln!(self.out, "=== {name} ===")?;
            let rendered = serde_json::to_string_pretty(value)
                .map_err(|e| HarnessError::report(e.to_string()))?;
            writeln!(self.out, "{rendered}")?;
        }
        Ok(())
    }
}

/// Pretty-printed JSON object of all sections.
pub struct JsonReporter<W: Write> {
    out: W,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout() -> Self {
        JsonReporter { out: io::stdout() }
    }
}

impl<W: Write> JsonReporter<W> {
    pub fn new(out: W) -> Self {
        JsonReporter { out }
    }
}

impl<W: Write> Reporter for JsonReporter<W> {
    fn generate_report(&mut self, data: &CompilationReportData) -> Result<()> {
        serde_json::to_writer_pretty(&mut self.out, data)
            .map_err(|e| HarnessError::report(e.to_string()))?;
        writeln!(self.out)?;
        Ok(())
    }
}
