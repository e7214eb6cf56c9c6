//! Tests for the ARGOS parser
//!
//! Shared fixtures mirror the layout of real ARGOS DS output: each datum is
//! a header line and a location line followed by message diagnostics that
//! the scanner must pass over.

pub mod scanner_tests;

use super::{RecordExtractor, RecordScanner, ScanResult};

/// Three datums from one tag: two good fixes around an unresolved position
pub const SAMPLE_ARGOS_FILE: &str = "\
20616  Date : 09.07.97 03:53:28  LC : 3  IQ : 66
      Lat1 : 34.690N  Lon1 : 76.671W  Lat2 : 34.690N  Lon2 : 76.671W
      Nb mes : 006  Nb mes>-120dB:  000  Best level : -126 dB
      Pass duration : 302s   NOPC : 4
      Calcul freq : 401 651410.4 Hz   Altitude :    0 m
              162          136          189           66
20616  Date : 09.07.97 05:30:09  LC : B  IQ : 00
      Lat1 : ???????  Lon1 : ???????  Lat2 : ???????  Lon2 : ???????
      Nb mes : 001  Nb mes>-120dB:  000  Best level : -131 dB
      Pass duration :   0s   NOPC : 0
20616  Date : 10.07.97 01:12:44  LC : 1  IQ : 51
      Lat1 : 34.622N  Lon1 : 76.532W  Lat2 : 33.015N  Lon2 : 79.418W
      Nb mes : 004  Nb mes>-120dB:  000  Best level : -128 dB
";

/// Run the default scanner over a string
pub fn scan_text(text: &str) -> Vec<ScanResult> {
    RecordScanner::from_reader(text.as_bytes(), RecordExtractor::default()).collect()
}
