//! Integration tests for the processor module
//!
//! Tests the ingestion driver over folders of ARGOS files written to a
//! temporary directory, collecting output in a [`MemorySink`].


use crate::config::IngestConfig;
use crate::models::IngestionReport;
use crate::processor::IngestionDriver;
use crate::sink::MemorySink;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Two good datums for tag 20616
pub const FILE_A: &str = "\
20616  Date : 09.07.97 03:53:28  LC : 3  IQ : 66
      Lat1 : 34.690N  Lon1 : 76.671W  Lat2 : 34.690N  Lon2 : 76.671W
      Nb mes : 006  Nb mes>-120dB:  000  Best level : -126 dB
20616  Date : 10.07.97 01:12:44  LC : 1  IQ : 51
      Lat1 : 34.622N  Lon1 : 76.532W  Lat2 : 33.015N  Lon2 : 79.418W
      Nb mes : 004  Nb mes>-120dB:  000  Best level : -128 dB
";

/// One good datum for tag 31200 in the southern hemisphere
pub const FILE_B: &str = "\
31200  Date : 02.01.98 11:00:05  LC : 2  IQ : 58
      Lat1 : 12.500S  Lon1 : 45.250E  Lat2 : 12.400S  Lon2 : 45.100E
";

/// Create a folder holding the given files
pub fn create_input_folder(files: &[(&str, &str)]) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    for (name, contents) in files {
        fs::write(temp_dir.path().join(name), contents).unwrap();
    }
    temp_dir
}

/// Paths of `names` inside `folder`, in the order given
pub fn paths(folder: &Path, names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(|name| folder.join(name)).collect()
}

/// Run the default driver over a folder into a fresh memory sink
pub fn ingest_folder(folder: &Path) -> (IngestionReport, MemorySink) {
    let mut sink = MemorySink::new();
    let report = IngestionDriver::new(IngestConfig::default())
        .run_folder(folder, &mut sink)
        .unwrap();
    (report, sink)
}
