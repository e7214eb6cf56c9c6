//! Ingestion driver.
//!
//! Runs the record scanner over each input file in the order given and
//! forwards fixes to the output sink. Nothing that goes wrong with a single
//! record or a single file stops the batch; every problem becomes a
//! warning in the returned [`IngestionReport`].

pub mod discovery;

#[cfg(test)]
pub mod tests;

pub use discovery::FileDiscovery;

use crate::config::IngestConfig;
use crate::constants::WGS84_EPSG;
use crate::error::{Result, ScanError};
use crate::models::{IngestionReport, IngestionWarning, WarningKind};
use crate::parser::{RecordExtractor, RecordScanner};
use crate::sink::{FixSink, SinkSession};

use indicatif::{ProgressBar, ProgressStyle};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Drives ingestion of ARGOS files into a sink
#[derive(Debug, Clone)]
pub struct IngestionDriver {
    config: IngestConfig,
    extractor: RecordExtractor,
}

impl IngestionDriver {
    pub fn new(config: IngestConfig) -> Self {
        let extractor = RecordExtractor::from_config(&config);
        Self { config, extractor }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Discover the files in `input_folder` and ingest them
    pub fn run_folder<S: FixSink + ?Sized>(
        &self,
        input_folder: &Path,
        sink: &mut S,
    ) -> Result<IngestionReport> {
        let files = FileDiscovery::new(input_folder).discover()?;
        Ok(self.run(&files, sink))
    }

    /// Ingest the given files, in order, into `sink`
    pub fn run<S: FixSink + ?Sized>(
        &self,
        input_files: &[PathBuf],
        sink: &mut S,
    ) -> IngestionReport {
        let start_time = Instant::now();
        let mut report = IngestionReport::default();

        if let Some(spatial_reference) = &self.config.output_spatial_reference {
            debug!(
                "Output spatial reference '{}' requested; fixes are written in EPSG:{}",
                spatial_reference, WGS84_EPSG
            );
        }

        let progress = self.progress_bar(input_files.len());

        for path in input_files {
            let file_name = display_name(path);

            if self.should_skip(path, &file_name, &mut report) {
                progress.inc(1);
                continue;
            }

            info!("Working on file {}", file_name);
            progress.set_message(format!("Working on file {}", file_name));

            self.process_file(path, &file_name, sink, &mut report);
            progress.inc(1);
        }

        progress.finish_with_message("Ingestion complete");
        report.processing_time_ms = start_time.elapsed().as_millis() as u64;

        info!(
            "Processed {} files: {} fixes written, {} records rejected, {} warnings",
            report.files_processed,
            report.fixes_written,
            report.records_rejected,
            report.warning_count()
        );

        report
    }

    /// Decide whether an entry is passed over, recording why
    fn should_skip(&self, path: &Path, file_name: &str, report: &mut IngestionReport) -> bool {
        if self.config.is_excluded(file_name) {
            debug!("Skipping excluded file {}", file_name);
            report.files_skipped += 1;
            return true;
        }

        match fs::metadata(path) {
            Ok(metadata) if metadata.is_file() => false,
            Ok(_) => {
                debug!("Skipping {}: not a regular file", path.display());
                report.files_skipped += 1;
                true
            }
            Err(e) => {
                warn!("Cannot access {}: {}", path.display(), e);
                report.files_failed += 1;
                report.warnings.push(IngestionWarning::new(
                    file_name,
                    WarningKind::FileOpen,
                    e.to_string(),
                ));
                true
            }
        }
    }

    /// Scan one file and forward its fixes
    ///
    /// The file handle and the sink session both close when this returns,
    /// whichever path it returns by.
    fn process_file<S: FixSink + ?Sized>(
        &self,
        path: &Path,
        file_name: &str,
        sink: &mut S,
        report: &mut IngestionReport,
    ) {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                warn!("Failed to open {}: {}", path.display(), e);
                report.files_failed += 1;
                report.warnings.push(IngestionWarning::new(
                    file_name,
                    WarningKind::FileOpen,
                    e.to_string(),
                ));
                return;
            }
        };

        let mut scanner = RecordScanner::from_reader(BufReader::new(file), self.extractor);
        let mut session = SinkSession::open(sink, file_name);
        let mut read_failed = false;

        while let Some(result) = scanner.next() {
            match result {
                Ok(fix) => match session.append(&fix) {
                    Ok(()) => report.fixes_written += 1,
                    Err(e) => {
                        let header_line = scanner.lines_read().saturating_sub(1);
                        warn!(
                            "Error adding record {} from {} to the output: {}",
                            fix.tag_id, file_name, e
                        );
                        // Earlier fixes of a lost batch were already counted as written
                        let earlier = e.fixes_lost().saturating_sub(1);
                        report.fixes_written = report.fixes_written.saturating_sub(earlier);
                        report.records_rejected += 1 + earlier;
                        report.warnings.push(
                            IngestionWarning::new(file_name, WarningKind::SinkWrite, e.to_string())
                                .with_tag_id(fix.tag_id)
                                .with_line(header_line),
                        );
                    }
                },
                Err(ScanError::Record(e)) => {
                    warn!("Skipping record in {}: {}", file_name, e);
                    report.records_rejected += 1;
                    report
                        .warnings
                        .push(IngestionWarning::from_extraction(file_name, &e));
                }
                Err(ScanError::Io { line, source }) => {
                    warn!(
                        "Failed reading {} after line {}: {}",
                        file_name, line, source
                    );
                    read_failed = true;
                    report.warnings.push(
                        IngestionWarning::new(file_name, WarningKind::FileRead, source.to_string())
                            .with_line(line),
                    );
                }
            }
        }

        match session.commit() {
            Ok(appended) => debug!("Committed {} fixes from {}", appended, file_name),
            Err(e) => {
                warn!("Failed to flush fixes from {}: {}", file_name, e);
                let lost = e.fixes_lost();
                report.fixes_written = report.fixes_written.saturating_sub(lost);
                report.records_rejected += lost;
                report.warnings.push(IngestionWarning::new(
                    file_name,
                    WarningKind::SinkFlush,
                    e.to_string(),
                ));
            }
        }

        if read_failed {
            report.files_failed += 1;
        } else {
            report.files_processed += 1;
        }
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.config.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(len as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb
    }
}

/// File name used in warnings and progress messages
fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
