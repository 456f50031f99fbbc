use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use junit_report::junit;
use junit_report::report::{ReportGenerator, ReportOptions, TestSummary, DEFAULT_SIZE_LIMIT};

/// Summarize JUnit XML results as a markdown report for a CI summary panel
#[derive(Parser, Debug)]
#[command(name = "junit-report", version)]
struct Cli {
    /// Heading of the report
    title: String,

    /// Exit status of the build (0 = success)
    #[arg(allow_hyphen_values = true)]
    return_code: i32,

    /// JUnit XML files to summarize
    junit_files: Vec<PathBuf>,

    /// Maximum report size in bytes before failure details are dropped
    #[arg(long, default_value_t = DEFAULT_SIZE_LIMIT)]
    size_limit: usize,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Markdown)]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Markdown,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout carries the report, so logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let generator = ReportGenerator::new(ReportOptions {
        size_limit: cli.size_limit,
        ..Default::default()
    })?;

    let runs = cli
        .junit_files
        .iter()
        .map(|path| {
            junit::parse_file(path)
                .inspect_err(|err| {
                    tracing::error!(
                        path = %path.display(),
                        error_type = err.error_type(),
                        error = %err,
                        "Failed to read JUnit results"
                    );
                })
                .with_context(|| format!("parsing {}", path.display()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    tracing::info!(
        files = runs.len(),
        return_code = cli.return_code,
        "Generating test report"
    );

    let report = generator.generate(&cli.title, cli.return_code, &runs);

    match cli.format {
        OutputFormat::Markdown => println!("{}", report),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "summary": TestSummary::from_runs(&runs),
                "report": report,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
