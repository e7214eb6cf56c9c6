//! Line scanner pairing ARGOS header lines with their location lines
//!
//! The scanner walks a file once, front to back. Lines that do not carry
//! the header marker are passed over; a header line consumes exactly the
//! next line as its location line, whatever that line contains. Each
//! datum yields one result, so a bad record never stops the scan.

use super::record::{RecordExtractor, header_tag_id};
use crate::constants::HEADER_MARKER;
use crate::error::{ExtractionCause, ExtractionError, ScanError};
use crate::models::TrackingFix;
use std::io::{self, BufRead};
use std::iter::FusedIterator;

/// Outcome of one datum
pub type ScanResult = std::result::Result<TrackingFix, ScanError>;

/// Whether a line starts a datum
pub fn is_header_line(line: &str) -> bool {
    line.contains(HEADER_MARKER)
}

/// Lazy iterator over the datums of one input
///
/// Yields fixes and per-datum errors in file order. A read error ends the
/// scan after it has been yielded.
#[derive(Debug)]
pub struct RecordScanner<I> {
    lines: I,
    extractor: RecordExtractor,
    line_number: usize,
    finished: bool,
}

impl<R: BufRead> RecordScanner<io::Lines<R>> {
    /// Scan the lines of a buffered reader
    pub fn from_reader(reader: R, extractor: RecordExtractor) -> Self {
        Self::new(reader.lines(), extractor)
    }
}

impl<I> RecordScanner<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    pub fn new(lines: I, extractor: RecordExtractor) -> Self {
        Self {
            lines,
            extractor,
            line_number: 0,
            finished: false,
        }
    }

    /// Number of lines consumed so far
    pub fn lines_read(&self) -> usize {
        self.line_number
    }

    fn read_line(&mut self) -> Option<Result<String, ScanError>> {
        if self.finished {
            return None;
        }

        match self.lines.next() {
            Some(Ok(line)) => {
                self.line_number += 1;
                Some(Ok(line))
            }
            Some(Err(source)) => {
                self.finished = true;
                Some(Err(ScanError::Io {
                    line: self.line_number,
                    source,
                }))
            }
            None => {
                self.finished = true;
                None
            }
        }
    }
}

impl<I> Iterator for RecordScanner<I>
where
    I: Iterator<Item = io::Result<String>>,
{
    type Item = ScanResult;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let header = match self.read_line()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            if !is_header_line(&header) {
                continue;
            }

            let header_line_number = self.line_number;

            let location = match self.read_line() {
                Some(Ok(line)) => line,
                Some(Err(e)) => return Some(Err(e)),
                None => {
                    let error = ExtractionError::new(
                        header_tag_id(&header),
                        ExtractionCause::TruncatedRecord,
                    )
                    .at_line(header_line_number);
                    return Some(Err(error.into()));
                }
            };

            return Some(
                self.extractor
                    .extract(&header, &location)
                    .map_err(|e| e.at_line(header_line_number).into()),
            );
        }
    }
}

impl<I> FusedIterator for RecordScanner<I> where I: Iterator<Item = io::Result<String>> {}
