/// Compiler diagnostics: the data type, the listener contract, and a tolerant
/// parser for the stderr conventions most compilers follow.
///
/// The harness never interprets diagnostics itself; it only carries them from
/// the compiler process to whichever listeners a collector registered.

use serde::Serialize;

use crate::task::CompilationOutcome;

/// Severity of a single compiler diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
    /// Anything the parser recognized as a diagnostic but could not classify.
    Other,
}

/// A single diagnostic emitted by the external compiler.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Source file the diagnostic points at, when the compiler said so.
    pub path: Option<String>,
    pub line: Option<u32>,
    pub column: Option<u32>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            path: None,
            line: None,
            column: None,
            message: message.into(),
        }
    }
}

/// Receives diagnostics as the compilation task observes them.
///
/// Registered on a `CompilationTaskBuilder` by a collector's pre-compile hook;
/// the same collector typically keeps the other end of the shared cell and
/// reads it back in its post-compile hook.
pub trait DiagnosticListener {
    /// Called once per parsed diagnostic, in the order they appeared.
    fn report(&mut self, diagnostic: &Diagnostic);

    /// Called once after the compiler process has exited.
    fn finished(&mut self, _outcome: &CompilationOutcome) {}
}

/// Parse a compiler's stderr stream into diagnostics.
///
/// Lines that match neither recognized shape are skipped; parsing never fails.
pub fn parse_stderr(stderr: &str) -> Vec<Diagnostic> {
    stderr.lines().filter_map(parse_line).collect()
}

/// Parse a single stderr line.
///
/// Recognizes two shapes:
/// - `path:line:col: severity: message` (gcc, clang, and javac with -Xdiags)
/// - `severity: message` or `severity[CODE]: message` (rustc headlines)
pub fn parse_line(line: &str) -> Option<Diagnostic> {
    let line = line.trim_end();
    if line.is_empty() {
        return None;
    }

    if let Some(diag) = parse_bare_severity(line) {
        return Some(diag);
    }
    parse_located(line)
}

/// `severity: message`, with an optional `[CODE]` suffix on the severity.
fn parse_bare_severity(line: &str) -> Option<Diagnostic> {
    let (head, message) = line.split_once(": ")?;
    let keyword = head.split('[').next().unwrap_or(head);
    let severity = severity_keyword(keyword)?;
    Some(Diagnostic::new(severity, message.trim()))
}

/// `path:line:col: severity: message`.
fn parse_located(line: &str) -> Option<Diagnostic> {
    let mut fields = line.splitn(4, ':');
    let path = fields.next()?.trim();
    let line_no: u32 = fields.next()?.trim().parse().ok()?;
    let col_no: u32 = fields.next()?.trim().parse().ok()?;
    let rest = fields.next()?.trim_start();

    let (head, message) = rest.split_once(':')?;
    let severity = severity_keyword(head.trim())?;

    Some(Diagnostic {
        severity,
        path: Some(path.to_string()),
        line: Some(line_no),
        column: Some(col_no),
        message: message.trim().to_string(),
    })
}

fn severity_keyword(word: &str) -> Option<Severity> {
    match word {
        "error" | "fatal error" => Some(Severity::Error),
        "warning" => Some(Severity::Warning),
        "note" | "help" | "info" => Some(Severity::Note),
        "remark" => Some(Severity::Other),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gcc_style_line() {
        let diag = parse_line("src/main.c:12:5: error: expected ';' before 'return'")
            .expect("should parse");
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.path.as_deref(), Some("src/main.c"));
        assert_eq!(diag.line, Some(12));
        assert_eq!(diag.column, Some(5));
        assert_eq!(diag.message, "expected ';' before 'return'");
    }

    #[test]
    fn parses_rustc_headline() {
        let diag = parse_line("error[E0308]: mismatched types").expect("should parse");
        assert_eq!(diag.severity, Severity::Error);
        assert!(diag.path.is_none());
        assert_eq!(diag.message, "mismatched types");
    }

    #[test]
    fn parses_bare_warning() {
        let diag = parse_line("warning: unused variable: `x`").expect("should parse");
        assert_eq!(diag.severity, Severity::Warning);
        assert_eq!(diag.message, "unused variable: `x`");
    }

    #[test]
    fn skips_unrecognized_lines() {
        assert!(parse_line("   |").is_none());
        assert!(parse_line("12 |     return x").is_none());
        assert!(parse_line("").is_none());
        assert!(parse_line("compilation terminated.").is_none());
    }

    #[test]
    fn parses_whole_stream() {
        let stderr = "\
main.c:1:1: warning: unused include\n\
   |\n\
main.c:3:9: error: boom\n\
error: aborting due to 1 previous error\n";
        let diags = parse_stderr(stderr);
        assert_eq!(diags.len(), 3);
        assert_eq!(diags[0].severity, Severity::Warning);
        assert_eq!(diags[1].severity, Severity::Error);
        assert_eq!(diags[2].severity, Severity::Error);
    }
}
