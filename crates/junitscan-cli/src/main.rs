use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use junitscan::{Report, DEFAULT_REPORT_PATH};

#[derive(Debug, Parser)]
#[command(
    name = "junitscan",
    version,
    about = "Scan a JUnit-style XML test report for failures"
)]
struct Args {
    /// Report file (defaults to mocha-junit-report.xml in the working directory)
    #[arg(value_name = "REPORT")]
    report: Option<PathBuf>,
    /// Print each failed testcase's name and failure text instead of the
    /// root/failure dump
    #[arg(long)]
    names: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let path = args
        .report
        .unwrap_or_else(|| PathBuf::from(DEFAULT_REPORT_PATH));

    // Load precedes all printing: nothing reaches stdout on a bad report.
    let report = Report::load(&path)
        .with_context(|| format!("failed to load test report {}", path.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if args.names {
        report
            .render_failed_tests(&mut out)
            .context("failed to write stdout")?;
    } else {
        report
            .render_failures(&mut out)
            .context("failed to write stdout")?;
    }
    Ok(())
}
