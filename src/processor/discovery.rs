//! File discovery for ARGOS input folders
//!
//! Lists the entries directly inside an input folder. Filtering of
//! non-data entries happens in the ingestion driver, so everything found
//! here is returned, directories included.

use crate::error::{ArgosError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File discovery component for ARGOS input folders
#[derive(Debug)]
pub struct FileDiscovery {
    input_folder: PathBuf,
}

impl FileDiscovery {
    /// Create a new file discovery instance
    pub fn new(input_folder: impl Into<PathBuf>) -> Self {
        Self {
            input_folder: input_folder.into(),
        }
    }

    pub fn input_folder(&self) -> &Path {
        &self.input_folder
    }

    /// List the folder's direct children, sorted by file name
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        if !self.input_folder.is_dir() {
            return Err(ArgosError::InputFolderNotFound {
                path: self.input_folder.clone(),
            });
        }

        debug!("Listing input folder: {}", self.input_folder.display());

        let mut entries = Vec::new();
        for entry in WalkDir::new(&self.input_folder)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| ArgosError::DirectoryTraversal {
                path: self.input_folder.clone(),
                source,
            })?;
            entries.push(entry.into_path());
        }

        debug!(
            "Found {} entries in {}",
            entries.len(),
            self.input_folder.display()
        );

        Ok(entries)
    }
}
