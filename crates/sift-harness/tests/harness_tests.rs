/// End-to-end tests for the harness: real subprocesses, real reporters.
///
/// These drive `/bin/sh` as the "compiler" so the suite does not depend on
/// any particular toolchain being installed.

use std::fs;

use serde_json::Value;
use tempfile::tempdir;

use sift_harness::{
    CompilerRunner, DiagnosticsCollector, InvocationCollector, JsonReporter, TextReporter,
    TimingCollector,
};

fn argv(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn full_run_produces_all_sections() {
    let dir = tempdir().expect("tempdir");
    let report_path = dir.path().join("report.json");
    let report_file = fs::File::create(&report_path).expect("create report file");

    let mut runner = CompilerRunner::new();
    runner.add_collector(Box::new(InvocationCollector::new()));
    runner.add_collector(Box::new(DiagnosticsCollector::new()));
    runner.add_collector(Box::new(TimingCollector::new()));
    runner.set_reporter(Box::new(JsonReporter::new(report_file)));

    runner
        .run(&argv(&[
            "sh",
            "-c",
            "echo 'lib.c:4:1: error: bad token' >&2; exit 1",
        ]))
        .expect("run succeeds even when the compiler fails");

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("read report"))
            .expect("valid json");

    assert_eq!(report["invocation"]["compiler"], "sh");
    assert_eq!(report["diagnostics"]["errors"], 1);
    assert_eq!(report["diagnostics"]["success"], false);
    assert_eq!(report["diagnostics"]["exit_code"], 1);
    assert!(report["timing"]["millis"].is_u64());

    let diags = report["diagnostics"]["diagnostics"]
        .as_array()
        .expect("diagnostics list");
    assert_eq!(diags[0]["path"], "lib.c");
    assert_eq!(diags[0]["line"], 4);
    assert_eq!(diags[0]["message"], "bad token");
}

#[test]
fn successful_compile_reports_zero_errors() {
    let dir = tempdir().expect("tempdir");
    let report_path = dir.path().join("report.json");
    let report_file = fs::File::create(&report_path).expect("create report file");

    let mut runner = CompilerRunner::new();
    runner.add_collector(Box::new(DiagnosticsCollector::new()));
    runner.set_reporter(Box::new(JsonReporter::new(report_file)));

    runner
        .run(&argv(&[
            "sh",
            "-c",
            "echo 'lib.c:9:2: warning: unused thing' >&2; exit 0",
        ]))
        .expect("run");

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("read report"))
            .expect("valid json");

    assert_eq!(report["diagnostics"]["success"], true);
    assert_eq!(report["diagnostics"]["errors"], 0);
    assert_eq!(report["diagnostics"]["warnings"], 1);
}

#[test]
fn compiler_arguments_pass_through_verbatim() {
    // The "compiler" is a shell one-liner that replays a source file to
    // stderr; the diagnostics collector must see the file's contents, which
    // proves the argument vector reached the subprocess untouched.
    let dir = tempdir().expect("tempdir");
    let source = dir.path().join("broken.src");
    fs::write(&source, "broken.src:1:1: error: totally broken\n").expect("write source");

    let report_path = dir.path().join("report.json");
    let report_file = fs::File::create(&report_path).expect("create report file");

    let mut runner = CompilerRunner::new();
    runner.add_collector(Box::new(DiagnosticsCollector::new()));
    runner.set_reporter(Box::new(JsonReporter::new(report_file)));

    runner
        .run(&argv(&[
            "sh",
            "-c",
            "cat \"$1\" >&2; exit 1",
            "sh",
            source.to_str().expect("utf8 path"),
        ]))
        .expect("run");

    let report: Value =
        serde_json::from_str(&fs::read_to_string(&report_path).expect("read report"))
            .expect("valid json");

    let diags = report["diagnostics"]["diagnostics"]
        .as_array()
        .expect("diagnostics list");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0]["message"], "totally broken");
    assert_eq!(diags[0]["path"], "broken.src");
}

#[test]
fn text_report_end_to_end() {
    let dir = tempdir().expect("tempdir");
    let report_path = dir.path().join("report.txt");
    let report_file = fs::File::create(&report_path).expect("create report file");

    let mut runner = CompilerRunner::new();
    runner.add_collector(Box::new(InvocationCollector::new()));
    runner.add_collector(Box::new(DiagnosticsCollector::new()));
    runner.set_reporter(Box::new(TextReporter::new(report_file)));

    runner.run(&argv(&["sh", "-c", "exit 0"])).expect("run");

    let text = fs::read_to_string(&report_path).expect("read report");
    assert!(text.contains("=== diagnostics ==="));
    assert!(text.contains("=== invocation ==="));
}
