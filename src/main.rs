// src/main.rs

use anyhow::Result;
use clap::Parser;
use std::io;
use std::time::Duration;
use update_reporter::host::SystemHost;
use update_reporter::pipeline;
use update_reporter::{process, release};

#[derive(Parser)]
#[command(name = "update-reporter")]
#[command(author, version, about = "Report a host's pending package updates as JSON", long_about = None)]
struct Cli {
    /// Path of the OS release descriptor
    #[arg(long, value_name = "PATH", default_value = release::DEFAULT_RELEASE_FILE)]
    release_file: String,

    /// Package manager invocation timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = process::DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}

fn main() -> Result<()> {
    // Initialize tracing subscriber for logging; stdout is reserved for
    // the report, so diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let report = pipeline::collect_report(
        &cli.release_file,
        Duration::from_secs(cli.timeout),
        &SystemHost,
    )?;
    report.write_to(io::stdout().lock())?;

    Ok(())
}
