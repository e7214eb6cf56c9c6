//! Parquet point dataset sink
//!
//! Writes fixes to a single Parquet file with a WKT point geometry column
//! in WGS84 (EPSG:4326) plus the tag id, location class and timestamp
//! attributes. Fixes are buffered up to the configured batch size and
//! written as batches through the polars batched writer, so memory stays
//! bounded regardless of input size. A batch that fails to write is
//! dropped and reported as [`SinkError::BatchLost`].

use super::FixSink;
use crate::config::SinkConfig;
use crate::constants::columns;
use crate::error::SinkError;
use crate::models::TrackingFix;
use polars::io::parquet::write::BatchedWriter;
use polars::prelude::*;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Schema of the output point dataset
pub fn fix_schema() -> Schema {
    Schema::from_iter(vec![
        Field::new(columns::GEOMETRY.into(), DataType::String),
        Field::new(columns::TAG_ID.into(), DataType::Int64),
        Field::new(columns::LOCATION_CLASS.into(), DataType::String),
        Field::new(columns::TIMESTAMP.into(), DataType::String),
        Field::new(columns::LONGITUDE.into(), DataType::Float64),
        Field::new(columns::LATITUDE.into(), DataType::Float64),
    ])
}

/// Convert a slice of fixes into a DataFrame matching [`fix_schema`]
pub fn fixes_to_dataframe(fixes: &[TrackingFix]) -> PolarsResult<DataFrame> {
    let geometry: Vec<String> = fixes.iter().map(|f| f.geometry_wkt()).collect();
    let tag_ids: Vec<i64> = fixes.iter().map(|f| f.tag_id).collect();
    let location_classes: Vec<String> =
        fixes.iter().map(|f| f.location_class.clone()).collect();
    let timestamps: Vec<String> = fixes.iter().map(|f| f.timestamp.clone()).collect();
    let longitudes: Vec<f64> = fixes.iter().map(|f| f.longitude).collect();
    let latitudes: Vec<f64> = fixes.iter().map(|f| f.latitude).collect();

    df!(
        columns::GEOMETRY => geometry,
        columns::TAG_ID => tag_ids,
        columns::LOCATION_CLASS => location_classes,
        columns::TIMESTAMP => timestamps,
        columns::LONGITUDE => longitudes,
        columns::LATITUDE => latitudes
    )
}

/// Read a point dataset written by [`ParquetFixSink`] back into fixes
pub fn read_fixes(path: &Path) -> Result<Vec<TrackingFix>, SinkError> {
    let file = File::open(path)?;
    let df = ParquetReader::new(file).finish()?;

    let tag_ids = df.column(columns::TAG_ID)?.as_materialized_series().i64()?;
    let location_classes = df
        .column(columns::LOCATION_CLASS)?
        .as_materialized_series()
        .str()?;
    let timestamps = df.column(columns::TIMESTAMP)?.as_materialized_series().str()?;
    let longitudes = df.column(columns::LONGITUDE)?.as_materialized_series().f64()?;
    let latitudes = df.column(columns::LATITUDE)?.as_materialized_series().f64()?;

    let fixes = tag_ids
        .into_no_null_iter()
        .zip(location_classes.into_no_null_iter())
        .zip(timestamps.into_no_null_iter())
        .zip(longitudes.into_no_null_iter())
        .zip(latitudes.into_no_null_iter())
        .map(
            |((((tag_id, location_class), timestamp), longitude), latitude)| TrackingFix {
                tag_id,
                location_class: location_class.to_string(),
                timestamp: timestamp.to_string(),
                latitude,
                longitude,
            },
        )
        .collect();

    Ok(fixes)
}

/// Sink writing a Parquet point dataset
pub struct ParquetFixSink {
    path: PathBuf,
    writer: Option<BatchedWriter<File>>,
    buffer: Vec<TrackingFix>,
    batch_size: usize,
    rows_written: usize,
}

impl ParquetFixSink {
    /// Create the output file and write its schema
    ///
    /// Fails with [`SinkError::OutputExists`] if the file is already there
    /// and the configuration does not allow overwriting.
    pub fn create(path: &Path, config: &SinkConfig) -> Result<Self, SinkError> {
        if path.exists() && !config.overwrite {
            return Err(SinkError::OutputExists {
                path: path.to_path_buf(),
            });
        }

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path)?;
        let writer = ParquetWriter::new(file)
            .with_compression(config.compression.to_polars_compression())
            .with_statistics(StatisticsOptions::full())
            .with_row_group_size(Some(config.row_group_size))
            .batched(&fix_schema())?;

        debug!(
            "Created point dataset {} (compression: {:?}, batch size: {})",
            path.display(),
            config.compression,
            config.batch_size
        );

        Ok(Self {
            path: path.to_path_buf(),
            writer: Some(writer),
            buffer: Vec::with_capacity(config.batch_size.min(1024)),
            batch_size: config.batch_size.max(1),
            rows_written: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rows already handed to the Parquet writer
    pub fn rows_written(&self) -> usize {
        self.rows_written
    }

    /// Fixes waiting for the next batch
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }

    /// Write remaining fixes and the file footer
    pub fn finish(mut self) -> Result<usize, SinkError> {
        self.close()
    }

    fn close(&mut self) -> Result<usize, SinkError> {
        let Some(mut writer) = self.writer.take() else {
            return Ok(self.rows_written);
        };

        self.rows_written += write_pending(&mut writer, &mut self.buffer)?;
        writer.finish()?;

        debug!(
            "Finished point dataset {} with {} rows",
            self.path.display(),
            self.rows_written
        );
        Ok(self.rows_written)
    }
}

fn write_pending(
    writer: &mut BatchedWriter<File>,
    buffer: &mut Vec<TrackingFix>,
) -> Result<usize, SinkError> {
    if buffer.is_empty() {
        return Ok(0);
    }

    let fixes = buffer.len();
    let result = fixes_to_dataframe(buffer).and_then(|df| writer.write_batch(&df));
    buffer.clear();

    result.map_err(|source| SinkError::BatchLost { fixes, source })?;
    Ok(fixes)
}

impl FixSink for ParquetFixSink {
    fn append(&mut self, fix: &TrackingFix) -> Result<(), SinkError> {
        if self.writer.is_none() {
            return Err(SinkError::Rejected {
                reason: format!("{} is already closed", self.path.display()),
            });
        }

        self.buffer.push(fix.clone());
        if self.buffer.len() >= self.batch_size {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        if let Some(writer) = self.writer.as_mut() {
            self.rows_written += write_pending(writer, &mut self.buffer)?;
        }
        Ok(())
    }
}

impl Drop for ParquetFixSink {
    fn drop(&mut self) {
        if self.writer.is_none() {
            return;
        }
        if let Err(e) = self.close() {
            warn!(
                "Failed to finalize point dataset {}: {}",
                self.path.display(),
                e
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn fix(tag_id: i64, latitude: f64, longitude: f64) -> TrackingFix {
        TrackingFix {
            tag_id,
            location_class: "2".to_string(),
            timestamp: "09/07/97 03:53:28".to_string(),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_fixes_to_dataframe_columns() {
        let df = fixes_to_dataframe(&[fix(1, 34.69, -76.671), fix(2, -1.5, 2.5)]).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names_str(),
            vec![
                "geometry",
                "tag_id",
                "location_class",
                "timestamp",
                "longitude",
                "latitude"
            ]
        );

        let geometry = df
            .column("geometry")
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .get(0)
            .map(str::to_string);
        assert_eq!(geometry.as_deref(), Some("POINT (-76.671 34.69)"));
    }

    #[test]
    fn test_write_and_read_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("fixes.parquet");
        let config = SinkConfig {
            batch_size: 2,
            ..SinkConfig::default()
        };

        let mut sink = ParquetFixSink::create(&path, &config).unwrap();
        sink.append(&fix(1, 10.0, 20.0)).unwrap();
        sink.append(&fix(2, 11.0, 21.0)).unwrap();
        assert_eq!(sink.rows_written(), 2);
        assert_eq!(sink.pending(), 0);

        sink.append(&fix(3, 12.0, 22.0)).unwrap();
        assert_eq!(sink.pending(), 1);

        assert_eq!(sink.finish().unwrap(), 3);

        let fixes = read_fixes(&path).unwrap();
        assert_eq!(fixes.len(), 3);
        assert_eq!(fixes[0], fix(1, 10.0, 20.0));
        assert_eq!(fixes[2], fix(3, 12.0, 22.0));
    }

    #[test]
    fn test_drop_finalizes_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dropped.parquet");

        {
            let mut sink = ParquetFixSink::create(&path, &SinkConfig::default()).unwrap();
            sink.append(&fix(5, 1.0, 1.0)).unwrap();
        }

        let fixes = read_fixes(&path).unwrap();
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].tag_id, 5);
    }

    #[test]
    fn test_empty_dataset_is_readable() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.parquet");

        let sink = ParquetFixSink::create(&path, &SinkConfig::default()).unwrap();
        assert_eq!(sink.finish().unwrap(), 0);

        assert!(read_fixes(&path).unwrap().is_empty());
    }

    #[test]
    fn test_existing_output_requires_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("existing.parquet");
        std::fs::write(&path, "old").unwrap();

        let result = ParquetFixSink::create(&path, &SinkConfig::default());
        assert!(matches!(result, Err(SinkError::OutputExists { .. })));

        let config = SinkConfig {
            overwrite: true,
            ..SinkConfig::default()
        };
        let sink = ParquetFixSink::create(&path, &config).unwrap();
        sink.finish().unwrap();
        assert!(read_fixes(&path).unwrap().is_empty());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_failed_batch_is_dropped_and_reported() {
        let config = SinkConfig {
            batch_size: 2,
            overwrite: true,
            ..SinkConfig::default()
        };
        let mut sink = ParquetFixSink::create(Path::new("/dev/full"), &config).unwrap();

        sink.append(&fix(1, 1.0, 1.0)).unwrap();
        assert_eq!(sink.pending(), 1);

        let error = sink.append(&fix(2, 2.0, 2.0)).unwrap_err();
        assert!(matches!(error, SinkError::BatchLost { fixes: 2, .. }));
        assert_eq!(error.fixes_lost(), 2);
        assert_eq!(sink.pending(), 0);
        assert_eq!(sink.rows_written(), 0);

        sink.append(&fix(3, 3.0, 3.0)).unwrap();
        assert_eq!(sink.pending(), 1);

        let error = sink.flush().unwrap_err();
        assert_eq!(error.fixes_lost(), 1);
        assert_eq!(sink.pending(), 0);
    }

    #[test]
    fn test_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("out").join("fixes.parquet");

        let sink = ParquetFixSink::create(&path, &SinkConfig::default()).unwrap();
        sink.finish().unwrap();

        assert!(path.exists());
    }
}
