//! Output sinks for tracking fixes
//!
//! A sink is created once, before ingestion starts, with its schema and
//! spatial reference already fixed. The ingestion driver only appends
//! fixes and flushes at file boundaries.
//!
//! - [`parquet`] - point dataset written as a Parquet file
//! - [`memory`] - in-memory collection, used by tests and dry runs

pub mod memory;
pub mod parquet;

pub use memory::MemorySink;
pub use parquet::ParquetFixSink;

use crate::error::SinkError;
use crate::models::TrackingFix;
use tracing::warn;

/// Destination for tracking fixes
pub trait FixSink {
    /// Store one fix
    fn append(&mut self, fix: &TrackingFix) -> Result<(), SinkError>;

    /// Push any buffered fixes to the underlying store
    fn flush(&mut self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Appends scoped to one input file
///
/// Flushes the sink when committed. If the session is dropped without a
/// commit (early return, read failure) the sink is still flushed and a
/// failure is logged.
pub struct SinkSession<'a, S: FixSink + ?Sized> {
    sink: &'a mut S,
    label: String,
    appended: usize,
    committed: bool,
}

impl<'a, S: FixSink + ?Sized> SinkSession<'a, S> {
    pub fn open(sink: &'a mut S, label: impl Into<String>) -> Self {
        Self {
            sink,
            label: label.into(),
            appended: 0,
            committed: false,
        }
    }

    pub fn append(&mut self, fix: &TrackingFix) -> Result<(), SinkError> {
        self.sink.append(fix)?;
        self.appended += 1;
        Ok(())
    }

    /// Fixes accepted in this session
    pub fn appended(&self) -> usize {
        self.appended
    }

    /// Flush and close the session
    pub fn commit(mut self) -> Result<usize, SinkError> {
        self.committed = true;
        self.sink.flush()?;
        Ok(self.appended)
    }
}

impl<S: FixSink + ?Sized> Drop for SinkSession<'_, S> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        if let Err(e) = self.sink.flush() {
            warn!("Failed to flush output for {}: {}", self.label, e);
        }
    }
}
