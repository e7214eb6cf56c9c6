//! Command implementations for the ARGOS importer CLI
//!
//! This module contains the main command execution logic, logging setup,
//! and the final report.

use crate::cli::args::{Args, OutputFormat};
use crate::models::{IngestionReport, WarningKind};
use crate::processor::{FileDiscovery, IngestionDriver};
use crate::sink::ParquetFixSink;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use tracing::{debug, info};

/// Main command runner for the ARGOS importer
///
/// This function orchestrates the whole import:
/// 1. Set up logging and build the configuration
/// 2. List the input folder and create the output dataset
/// 3. Ingest every file into the dataset
/// 4. Finish the dataset and print the report
pub fn run(args: Args) -> Result<IngestionReport> {
    setup_logging(&args);

    info!("Starting ARGOS import");
    debug!("Command line arguments: {:?}", args);

    let config = args.to_config()?;
    debug!("Ingestion configuration: {:?}", config);

    let files = FileDiscovery::new(&args.input_folder).discover()?;
    info!(
        "Found {} entries in {}",
        files.len(),
        args.input_folder.display()
    );

    let mut sink = ParquetFixSink::create(&args.output, &config.sink)
        .with_context(|| format!("Failed to create output {}", args.output.display()))?;

    let report = IngestionDriver::new(config).run(&files, &mut sink);

    let rows = sink
        .finish()
        .with_context(|| format!("Failed to finish output {}", args.output.display()))?;
    info!("Wrote {} fixes to {}", rows, args.output.display());

    generate_final_report(&args, &report)?;

    Ok(report)
}

/// Set up structured logging based on CLI arguments
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("argos_importer={}", log_level)));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_timer(fmt::time::uptime())
                .with_writer(std::io::stderr),
        )
        .try_init();

    match result {
        Ok(()) => debug!("Logging initialized at level: {}", log_level),
        Err(e) => debug!("Logging already initialized: {}", e),
    }
}

/// Print the final report in the requested format
fn generate_final_report(args: &Args, report: &IngestionReport) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            print!("{}", render_human_report(report, &args.output));
        }
        OutputFormat::Json => {
            println!("{}", render_json_report(report)?);
        }
    }
    Ok(())
}

/// Human-readable summary of a run
pub fn render_human_report(report: &IngestionReport, output: &Path) -> String {
    let mut lines = Vec::new();

    lines.push(String::new());
    lines.push(format!("{}", "Import Summary".bright_green().bold()));
    lines.push(format!(
        "  {} {}",
        "Output:".bright_cyan(),
        output.display().to_string().bright_white()
    ));
    lines.push(format!(
        "  {} {}ms",
        "Time elapsed:".bright_cyan(),
        report.processing_time_ms.to_string().bright_white()
    ));
    lines.push(format!(
        "  {} {}",
        "Files processed:".bright_cyan(),
        report.files_processed.to_string().bright_white()
    ));
    lines.push(format!(
        "  {} {}",
        "Files skipped:".bright_cyan(),
        report.files_skipped.to_string().bright_white()
    ));
    if report.files_failed > 0 {
        lines.push(format!(
            "  {} {}",
            "Files failed:".bright_red(),
            report.files_failed.to_string().bright_red().bold()
        ));
    }
    lines.push(format!(
        "  {} {}",
        "Fixes written:".bright_cyan(),
        report.fixes_written.to_string().bright_white().bold()
    ));
    if report.records_rejected > 0 {
        lines.push(format!(
            "  {} {} ({:.1}% accepted)",
            "Records rejected:".bright_yellow(),
            report.records_rejected.to_string().bright_yellow(),
            report.success_rate()
        ));
    }

    if report.has_warnings() {
        lines.push(String::new());
        lines.push(format!(
            "{} ({})",
            "Warnings".bright_yellow().bold(),
            report.warning_count()
        ));
        for warning in &report.warnings {
            let mut location = warning.file.clone();
            if let Some(line) = warning.line_number {
                location.push_str(&format!(":{}", line));
            }
            let tag = warning
                .tag_id
                .map(|tag_id| format!(" tag {}", tag_id))
                .unwrap_or_default();
            lines.push(format!(
                "  {} [{}]{}: {}",
                location.bright_white(),
                warning_label(warning.kind),
                tag,
                warning.message
            ));
        }
    }

    lines.push(String::new());
    lines.join("\n")
}

/// JSON report for machine consumption
pub fn render_json_report(report: &IngestionReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("Failed to serialize report")
}

fn warning_label(kind: WarningKind) -> &'static str {
    match kind {
        WarningKind::Extraction => "record",
        WarningKind::SinkWrite => "write",
        WarningKind::SinkFlush => "flush",
        WarningKind::FileOpen => "open",
        WarningKind::FileRead => "read",
    }
}
