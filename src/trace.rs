//! Trace file reader
//!
//! A trace holds one access per line, `r <address>` or `w <address>`, with
//! the address in hexadecimal and an optional `0x` prefix. Blank lines are
//! skipped.

use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::io::Lines;
use std::path::Path;

use text_io::try_scan;

use crate::error::SimulatorResult;
use crate::error::TraceError;
use crate::memory::AccessType;

/// A single access taken from a trace
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TraceRecord {
    pub access_type: AccessType,
    pub address: u64,
}

impl TraceRecord {
    pub fn read(address: u64) -> Self {
        Self { access_type: AccessType::Read, address }
    }

    pub fn write(address: u64) -> Self {
        Self { access_type: AccessType::Write, address }
    }
}

/// Split a line into operation and address, reporting leftover input
fn split_record(line: &str) -> Result<(String, String, bool), text_io::Error> {
    let op: String;
    let address: String;
    let mut bytes = line.bytes();
    try_scan!(bytes => "{} {}", op, address);
    let trailing = bytes.any(|c| !c.is_ascii_whitespace());
    Ok((op, address, trailing))
}

/// Parse one trace line. Returns `Ok(None)` for blank lines.
pub fn parse_record(
    line: &str,
    line_num: usize,
) -> Result<Option<TraceRecord>, TraceError> {
    let line = line.trim().replace('\t', " ");
    if line.is_empty() {
        return Ok(None);
    }

    let (op, address, trailing) =
        split_record(&line).map_err(|e| TraceError::Malformed {
            line: line_num,
            reason: format!("{:?}", e),
        })?;

    let access_type = match op.as_str() {
        "r" => AccessType::Read,
        "w" => AccessType::Write,
        _ => {
            return Err(TraceError::UnknownOperation { line: line_num, op });
        }
    };

    if address.is_empty() || trailing {
        return Err(TraceError::Malformed {
            line: line_num,
            reason: "expected 'op address'".to_string(),
        });
    }

    let digits = address
        .strip_prefix("0x")
        .or_else(|| address.strip_prefix("0X"))
        .unwrap_or(&address);
    let address = u64::from_str_radix(digits, 16)
        .map_err(|_| TraceError::InvalidAddress { line: line_num, address })?;

    Ok(Some(TraceRecord { access_type, address }))
}

/// Streaming reader over any buffered source.
///
/// Stopping early and calling `next` again later resumes at the following
/// record, so one reader can be fed to the simulator in several chunks.
pub struct TraceReader<R> {
    lines: Lines<R>,
    line_num: usize,
}

impl<R: BufRead> TraceReader<R> {
    pub fn new(reader: R) -> Self {
        Self { lines: reader.lines(), line_num: 0 }
    }

    /// Number of lines consumed so far
    pub fn line_num(&self) -> usize {
        self.line_num
    }
}

impl TraceReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> SimulatorResult<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> Iterator for TraceReader<R> {
    type Item = Result<TraceRecord, TraceError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = self.lines.next()?;
            self.line_num += 1;

            let line = match line {
                Ok(line) => line,
                Err(source) => {
                    return Some(Err(TraceError::Io {
                        line: self.line_num,
                        source,
                    }))
                }
            };

            match parse_record(&line, self.line_num) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Read a whole trace into memory, e.g. to replay it against many caches
pub fn load_trace(path: impl AsRef<Path>) -> SimulatorResult<Vec<TraceRecord>> {
    let records =
        TraceReader::open(path)?.collect::<Result<Vec<_>, TraceError>>()?;
    Ok(records)
}
