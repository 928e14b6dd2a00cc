/// sift CLI: run a compiler under the harness with the built-in collectors.

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use sift_harness::{
    CompilerRunner, DiagnosticsCollector, InvocationCollector, JsonReporter, TextReporter,
    TimingCollector,
};

#[derive(Parser, Debug)]
#[command(name = "sift")]
#[command(about = "Runs a compiler and reports what collectors observed")]
#[command(version)]
struct Args {
    /// Report output format
    #[arg(long, value_enum, default_value = "text")]
    report: ReportFormat,

    /// Include wall-clock timing in the report
    #[arg(long)]
    timing: bool,

    /// Enable verbose harness output
    #[arg(short, long)]
    verbose: bool,

    /// Compiler executable followed by its arguments, verbatim
    #[arg(
        value_name = "COMPILER_ARGS",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        required = true
    )]
    compiler_args: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ReportFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // --verbose raises the default filter to debug; RUST_LOG still wins.
    let filter = if args.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut runner = CompilerRunner::new();
    runner.add_collector(Box::new(InvocationCollector::new()));
    runner.add_collector(Box::new(DiagnosticsCollector::new()));
    if args.timing {
        runner.add_collector(Box::new(TimingCollector::new()));
    }

    match args.report {
        ReportFormat::Text => runner.set_reporter(Box::new(TextReporter::stdout())),
        ReportFormat::Json => runner.set_reporter(Box::new(JsonReporter::stdout())),
    };

    runner
        .run(&args.compiler_args)
        .context("compilation run failed")?;
    Ok(())
}
