/// The orchestrator: wires collectors and a reporter around one compilation.

use tracing::debug;

use crate::collector::Collector;
use crate::error::{HarnessError, Result};
use crate::report::CompilationReportData;
use crate::reporter::Reporter;
use crate::task::CompilationTaskBuilder;

/// Sets up and executes a compilation task, integrating registered
/// `Collector`s and a `Reporter` to process and format the collected output.
#[derive(Default)]
pub struct CompilerRunner {
    collectors: Vec<Box<dyn Collector>>,
    reporter: Option<Box<dyn Reporter>>,
}

impl CompilerRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collector. Order-preserving; no dedup, no validation.
    pub fn add_collector(&mut self, collector: Box<dyn Collector>) -> &mut Self {
        self.collectors.push(collector);
        self
    }

    /// Set the reporter that generates the final output. Last call wins.
    pub fn set_reporter(&mut self, reporter: Box<dyn Reporter>) -> &mut Self {
        self.reporter = Some(reporter);
        self
    }

    /// Execute one compilation. The following steps are taken, in order:
    ///
    /// 1. Build a `CompilationTaskBuilder` from the provided argument vector.
    /// 2. Call `on_before_compile` on each collector, in registration order.
    /// 3. Build and execute the compilation task.
    /// 4. Create an empty `CompilationReportData`.
    /// 5. Call `on_after_compile` on each collector, in registration order.
    /// 6. Pass the aggregated report data to the reporter.
    ///
    /// Running without a reporter configured fails before any hook fires. Any
    /// error from a collector hook or the reporter propagates to the caller
    /// unchanged; there is no recovery or retry.
    pub fn run(&mut self, args: &[String]) -> Result<()> {
        let reporter = self
            .reporter
            .as_mut()
            .ok_or(HarnessError::MissingReporter)?;

        let mut builder = CompilationTaskBuilder::from_args(args)?;

        for collector in &mut self.collectors {
            collector.on_before_compile(&mut builder)?;
        }

        let outcome = builder.build().call()?;

        // `success` is computed but not branched on yet. Collectors that need
        // the compiler's outcome observe it through a registered listener.
        let success = outcome.success;
        debug!(success, "compilation finished");

        let mut report = CompilationReportData::new();

        for collector in &mut self.collectors {
            collector.on_after_compile(&mut report)?;
        }

        reporter.generate_report(&report)?;

        Ok(())
    }
}
