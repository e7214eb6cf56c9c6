//! Scanner pairing and error containment tests

use super::{SAMPLE_ARGOS_FILE, scan_text};
use crate::error::{ExtractionCause, ScanError};
use crate::parser::{RecordExtractor, RecordScanner, is_header_line};
use std::io;

fn extraction_cause(result: &crate::parser::ScanResult) -> &ExtractionCause {
    match result {
        Err(ScanError::Record(e)) => &e.cause,
        other => panic!("Expected extraction error, got {:?}", other),
    }
}

#[test]
fn test_is_header_line() {
    assert!(is_header_line(
        "20616  Date : 09.07.97 03:53:28  LC : 3  IQ : 66"
    ));
    assert!(is_header_line("xDate :y"));
    assert!(!is_header_line("Date: 09.07.97"));
    assert!(!is_header_line("      Lat1 : 34.690N  Lon1 : 76.671W"));
}

#[test]
fn test_sample_file_yields_one_result_per_datum() {
    let results = scan_text(SAMPLE_ARGOS_FILE);

    assert_eq!(results.len(), 3);

    let first = results[0].as_ref().unwrap();
    assert_eq!(first.tag_id, 20616);
    assert_eq!(first.timestamp, "09/07/97 03:53:28");
    assert_eq!(first.location_class, "3");

    assert!(matches!(
        extraction_cause(&results[1]),
        ExtractionCause::MalformedCoordinate { .. }
    ));

    let third = results[2].as_ref().unwrap();
    assert_eq!(third.timestamp, "10/07/97 01:12:44");
    assert_eq!(third.latitude, 34.622);
    assert_eq!(third.longitude, -76.532);
}

#[test]
fn test_errors_carry_header_line_number() {
    let results = scan_text(SAMPLE_ARGOS_FILE);

    match &results[1] {
        Err(ScanError::Record(e)) => {
            assert_eq!(e.tag_id, Some(20616));
            assert_eq!(e.line_number, Some(7));
        }
        other => panic!("Expected extraction error, got {:?}", other),
    }
}

#[test]
fn test_empty_input_yields_nothing() {
    assert!(scan_text("").is_empty());
    assert!(scan_text("no datums here\njust noise\n").is_empty());
}

#[test]
fn test_trailing_header_is_truncated_record() {
    let text = "\
20616  Date : 09.07.97 03:53:28  LC : 3  IQ : 66
      Lat1 : 34.690N  Lon1 : 76.671W  Lat2 : 34.690N  Lon2 : 76.671W
20616  Date : 10.07.97 01:12:44  LC : 1  IQ : 51";

    let results = scan_text(text);

    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    match &results[1] {
        Err(ScanError::Record(e)) => {
            assert!(e.is_truncated());
            assert_eq!(e.tag_id, Some(20616));
            assert_eq!(e.line_number, Some(3));
        }
        other => panic!("Expected truncated record, got {:?}", other),
    }
}

#[test]
fn test_malformed_datum_does_not_stop_scan() {
    let text = "\
1 Date : 01.01.20 00:00:00 LC : 2
x x 45.0 x x longitudebadtoken
2 Date : 02.01.20 00:00:00 LC : 2
x x 45.0N x x 10.0E
";

    let results = scan_text(text);

    assert_eq!(results.len(), 2);
    assert_eq!(
        extraction_cause(&results[0]),
        &ExtractionCause::MalformedCoordinate {
            token: "longitudebadtoken".to_string()
        }
    );
    assert_eq!(results[1].as_ref().unwrap().tag_id, 2);
}

/// The line after a header is always consumed as its location line, even
/// when it looks like another header.
#[test]
fn test_location_line_is_never_rescanned_as_header() {
    let text = "\
1 Date : 01.01.20 00:00:00 LC : 2
2 Date : 02.01.20 00:00:00 LC : 2
x x 45.0N x x 10.0E
";

    let results = scan_text(text);

    assert_eq!(results.len(), 1);
    assert!(matches!(
        extraction_cause(&results[0]),
        ExtractionCause::MalformedCoordinate { .. }
    ));
}

#[test]
fn test_crlf_line_endings() {
    let text = "7 Date : 01.01.20 10:00:00 LC : A\r\nx x 1.5S x x 2.5E\r\n";

    let results = scan_text(text);

    let fix = results[0].as_ref().unwrap();
    assert_eq!(fix.location_class, "A");
    assert_eq!(fix.latitude, -1.5);
    assert_eq!(fix.longitude, 2.5);
}

#[test]
fn test_read_error_ends_scan() {
    let lines = vec![
        Ok("1 Date : 01.01.20 00:00:00 LC : 2".to_string()),
        Ok("x x 45.0N x x 10.0E".to_string()),
        Err(io::Error::new(io::ErrorKind::InvalidData, "bad bytes")),
        Ok("2 Date : 02.01.20 00:00:00 LC : 2".to_string()),
        Ok("x x 45.0N x x 10.0E".to_string()),
    ];

    let mut scanner = RecordScanner::new(lines.into_iter(), RecordExtractor::default());

    assert!(scanner.next().unwrap().is_ok());
    match scanner.next() {
        Some(Err(ScanError::Io { line, .. })) => assert_eq!(line, 2),
        other => panic!("Expected read error, got {:?}", other),
    }
    assert!(scanner.next().is_none());
    assert!(scanner.next().is_none());
    assert_eq!(scanner.lines_read(), 2);
}

#[test]
fn test_scanner_is_lazy() {
    let mut scanner =
        RecordScanner::from_reader(SAMPLE_ARGOS_FILE.as_bytes(), RecordExtractor::default());

    assert!(scanner.next().unwrap().is_ok());
    assert_eq!(scanner.lines_read(), 2);
}
