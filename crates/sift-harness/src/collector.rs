/// The collector contract: a plugin observing compilation before and after
/// execution.

use crate::error::Result;
use crate::report::CompilationReportData;
use crate::task::CompilationTaskBuilder;

/// A pluggable observer of one compilation run.
///
/// The runner invokes `on_before_compile` on every registered collector, in
/// registration order, before the compiler executes; each collector may mutate
/// the task configuration. After the compiler has exited, `on_after_compile`
/// runs in the same order against the shared report container.
///
/// A collector that needs to see compiler output registers a shared
/// `DiagnosticListener` on the builder in its pre-compile hook and reads the
/// captured state back in its post-compile hook.
pub trait Collector {
    /// Observe (and possibly mutate) the task configuration before the
    /// compiler runs.
    fn on_before_compile(&mut self, task: &mut CompilationTaskBuilder) -> Result<()>;

    /// Contribute sections to the aggregated report after the compiler has
    /// finished.
    fn on_after_compile(&mut self, report: &mut CompilationReportData) -> Result<()>;
}
