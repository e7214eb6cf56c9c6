//! In-memory sink

use super::FixSink;
use crate::error::SinkError;
use crate::models::TrackingFix;
use std::collections::HashSet;

/// Collects fixes in a vector
///
/// Tag ids registered with [`MemorySink::rejecting`] are refused, which
/// lets callers exercise the sink-failure path.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    fixes: Vec<TrackingFix>,
    rejected_tags: HashSet<i64>,
    flushes: usize,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse every fix for the given tag
    pub fn rejecting(mut self, tag_id: i64) -> Self {
        self.rejected_tags.insert(tag_id);
        self
    }

    pub fn fixes(&self) -> &[TrackingFix] {
        &self.fixes
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Number of flushes requested so far
    pub fn flush_count(&self) -> usize {
        self.flushes
    }

    pub fn into_fixes(self) -> Vec<TrackingFix> {
        self.fixes
    }
}

impl FixSink for MemorySink {
    fn append(&mut self, fix: &TrackingFix) -> Result<(), SinkError> {
        if self.rejected_tags.contains(&fix.tag_id) {
            return Err(SinkError::Rejected {
                reason: format!("tag {} is not accepted by this sink", fix.tag_id),
            });
        }
        self.fixes.push(fix.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), SinkError> {
        self.flushes += 1;
        Ok(())
    }
}
