/// Built-in collectors.
///
/// These cover the common observations a compilation harness wants out of the
/// box: the diagnostics the compiler emitted, how long it took, and the exact
/// command line that ran. Each is an ordinary `Collector`; nothing here is
/// special-cased by the runner.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

use serde::Serialize;

use crate::collector::Collector;
use crate::diagnostics::{Diagnostic, DiagnosticListener, Severity};
use crate::error::Result;
use crate::report::CompilationReportData;
use crate::task::{CompilationOutcome, CompilationTaskBuilder};

/// Shared state between the listener registered on the task and the collector
/// that reads it back after the compile.
#[derive(Default)]
struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
    outcome: Option<CompilationOutcome>,
}

impl DiagnosticListener for DiagnosticBag {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn finished(&mut self, outcome: &CompilationOutcome) {
        self.outcome = Some(outcome.clone());
    }
}

#[derive(Serialize)]
struct DiagnosticsSection {
    errors: usize,
    warnings: usize,
    notes: usize,
    success: Option<bool>,
    exit_code: Option<i32>,
    diagnostics: Vec<Diagnostic>,
}

/// Collects the compiler's diagnostics and writes a `diagnostics` section
/// with per-severity counts, the exit status, and the full list.
#[derive(Default)]
pub struct DiagnosticsCollector {
    bag: Option<Rc<RefCell<DiagnosticBag>>>,
}

impl DiagnosticsCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for DiagnosticsCollector {
    fn on_before_compile(&mut self, task: &mut CompilationTaskBuilder) -> Result<()> {
        let bag = Rc::new(RefCell::new(DiagnosticBag::default()));
        task.add_diagnostic_listener(bag.clone());
        self.bag = Some(bag);
        Ok(())
    }

    fn on_after_compile(&mut self, report: &mut CompilationReportData) -> Result<()> {
        // A missing bag means the pre-hook never ran; report nothing.
        let Some(bag) = self.bag.take() else {
            return Ok(());
        };
        let bag = bag.borrow();

        let count = |severity| {
            bag.diagnostics
                .iter()
                .filter(|d| d.severity == severity)
                .count()
        };

        report.insert_serialized(
            "diagnostics",
            &DiagnosticsSection {
                errors: count(Severity::Error),
                warnings: count(Severity::Warning),
                notes: count(Severity::Note),
                success: bag.outcome.as_ref().map(|o| o.success),
                exit_code: bag.outcome.as_ref().and_then(|o| o.exit_code),
                diagnostics: bag.diagnostics.clone(),
            },
        );
        Ok(())
    }
}

/// Records wall-clock time between its pre- and post-compile hooks into a
/// `timing` section.
#[derive(Default)]
pub struct TimingCollector {
    started: Option<Instant>,
}

impl TimingCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for TimingCollector {
    fn on_before_compile(&mut self, _task: &mut CompilationTaskBuilder) -> Result<()> {
        self.started = Some(Instant::now());
        Ok(())
    }

    fn on_after_compile(&mut self, report: &mut CompilationReportData) -> Result<()> {
        if let Some(started) = self.started.take() {
            let millis = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            report.insert_serialized("timing", &serde_json::json!({ "millis": millis }));
        }
        Ok(())
    }
}

/// Snapshots the command line as configured when its pre-compile hook runs and
/// writes it to an `invocation` section.
///
/// Register it last to see the command line every earlier collector produced.
#[derive(Default)]
pub struct InvocationCollector {
    command_line: Option<Vec<String>>,
}

impl InvocationCollector {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Collector for InvocationCollector {
    fn on_before_compile(&mut self, task: &mut CompilationTaskBuilder) -> Result<()> {
        self.command_line = Some(task.command_line());
        Ok(())
    }

    fn on_after_compile(&mut self, report: &mut CompilationReportData) -> Result<()> {
        if let Some(command_line) = self.command_line.take() {
            report.insert_serialized(
                "invocation",
                &serde_json::json!({
                    "compiler": command_line.first(),
                    "command_line": command_line,
                }),
            );
        }
        Ok(())
    }
}
