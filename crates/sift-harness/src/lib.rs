/// sift harness
///
/// A minimal extension harness around an external compiler: it invokes a
/// compilation task, lets pluggable collectors observe the task before and
/// after compilation, and hands the aggregated data to a reporter for
/// formatted output. All real compilation work belongs to the external
/// compiler; the harness only orchestrates.

pub mod collector;
pub mod collectors;
pub mod diagnostics;
pub mod error;
pub mod report;
pub mod reporter;
pub mod runner;
pub mod task;

pub use collector::Collector;
pub use collectors::{DiagnosticsCollector, InvocationCollector, TimingCollector};
pub use diagnostics::{Diagnostic, DiagnosticListener, Severity};
pub use error::{HarnessError, Result};
pub use report::CompilationReportData;
pub use reporter::{JsonReporter, Reporter, TextReporter};
pub use runner::CompilerRunner;
pub use task::{CompilationOutcome, CompilationTask, CompilationTaskBuilder};
