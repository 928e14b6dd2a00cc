/// Compilation task configuration and execution.
///
/// `CompilationTaskBuilder` wraps the raw argument vector handed to `run` into
/// a configurable task. Collectors may mutate it in their pre-compile hooks;
/// `build` then finalizes it into a one-shot `CompilationTask` that drives the
/// external compiler process.

use std::cell::RefCell;
use std::path::PathBuf;
use std::process::Command;
use std::rc::Rc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::diagnostics::{self, Diagnostic, DiagnosticListener};
use crate::error::{HarnessError, Result};

/// Shared handle to a diagnostic listener.
///
/// The harness is single-threaded (one pass, one thread), so a plain
/// `Rc<RefCell<_>>` is the whole sharing story: a collector keeps one clone
/// and registers the other on the builder.
pub type SharedListener = Rc<RefCell<dyn DiagnosticListener>>;

/// Configuration for one compilation, built from the raw argument vector.
///
/// `Debug` is implemented by hand because listeners are trait objects.
pub struct CompilationTaskBuilder {
    compiler: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    listeners: Vec<SharedListener>,
}

impl std::fmt::Debug for CompilationTaskBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompilationTaskBuilder")
            .field("compiler", &self.compiler)
            .field("args", &self.args)
            .field("current_dir", &self.current_dir)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CompilationTaskBuilder {
    /// Build a task configuration from a full argument vector.
    ///
    /// The first element names the compiler executable; everything after it is
    /// passed through verbatim in the compiler's own argument grammar.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let (compiler, rest) = args.split_first().ok_or(HarnessError::EmptyCommandLine)?;
        Ok(Self {
            compiler: compiler.clone(),
            args: rest.to_vec(),
            current_dir: None,
            listeners: Vec::new(),
        })
    }

    /// Override the compiler executable.
    pub fn compiler(&mut self, program: impl Into<String>) -> &mut Self {
        self.compiler = program.into();
        self
    }

    /// Append a single argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(&mut self, args: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the working directory for the compiler process.
    pub fn current_dir(&mut self, dir: impl Into<PathBuf>) -> &mut Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Register a listener that will receive parsed diagnostics and the final
    /// outcome. Listeners are notified in registration order.
    pub fn add_diagnostic_listener(&mut self, listener: SharedListener) -> &mut Self {
        self.listeners.push(listener);
        self
    }

    /// The compiler executable currently configured.
    pub fn compiler_program(&self) -> &str {
        &self.compiler
    }

    /// The arguments currently configured, excluding the executable.
    pub fn compiler_args(&self) -> &[String] {
        &self.args
    }

    /// The full command line as it would be executed.
    pub fn command_line(&self) -> Vec<String> {
        let mut line = Vec::with_capacity(self.args.len() + 1);
        line.push(self.compiler.clone());
        line.extend(self.args.iter().cloned());
        line
    }

    /// Finalize into an executable task.
    pub fn build(self) -> CompilationTask {
        CompilationTask {
            compiler: self.compiler,
            args: self.args,
            current_dir: self.current_dir,
            listeners: self.listeners,
        }
    }
}

/// A finalized compilation, ready to execute exactly once.
pub struct CompilationTask {
    compiler: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
    listeners: Vec<SharedListener>,
}

impl CompilationTask {
    /// Run the compiler synchronously.
    ///
    /// Captures stdout and stderr, parses stderr into diagnostics, notifies
    /// every registered listener, and returns the outcome. A compiler that
    /// exits nonzero is a normal outcome, not an error; only failing to launch
    /// the process at all is an error.
    pub fn call(self) -> Result<CompilationOutcome> {
        let mut command = Command::new(&self.compiler);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        debug!(compiler = %self.compiler, args = ?self.args, "executing compilation task");

        let started = Instant::now();
        let output = command.output().map_err(|source| HarnessError::Spawn {
            program: self.compiler.clone(),
            source,
        })?;
        let duration = started.elapsed();

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let diagnostics = diagnostics::parse_stderr(&stderr);

        let outcome = CompilationOutcome {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout,
            stderr,
            diagnostics,
            duration,
        };

        debug!(
            success = outcome.success,
            diagnostics = outcome.diagnostics.len(),
            "compilation task finished"
        );

        for listener in &self.listeners {
            let mut listener = listener.borrow_mut();
            for diagnostic in &outcome.diagnostics {
                listener.report(diagnostic);
            }
            listener.finished(&outcome);
        }

        Ok(outcome)
    }
}

/// What the compiler process produced.
#[derive(Debug, Clone)]
pub struct CompilationOutcome {
    /// True iff the compiler exited with status zero.
    pub success: bool,
    /// Raw exit code, when the platform reports one.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    /// Diagnostics parsed from stderr, in emission order.
    pub diagnostics: Vec<Diagnostic>,
    /// Wall-clock time spent in the compiler process.
    pub duration: Duration,
}
