//! Trace file access
//!
//! Traces are streamed line by line through a buffered reader, so
//! replaying a multi-gigabyte trace keeps only one line in memory.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;
use crate::parser::{parse_record, trim, Request};

/// Parse one raw line; `None` for blank lines
fn parse_line(line: &[u8]) -> Option<Result<Request>> {
    if trim(line).is_empty() {
        None
    } else {
        Some(parse_record(line))
    }
}

/// A trace file opened for replay
#[derive(Debug)]
pub struct TraceFile {
    path: PathBuf,
    reader: BufReader<File>,
    len: u64,
}

impl TraceFile {
    /// Open the trace at `path`
    ///
    /// # Errors
    /// * [`Error::Io`](crate::Error::Io) if the file cannot be opened
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let len = file.metadata()?.len();

        debug!(path = %path.display(), bytes = len, "opened trace");

        Ok(Self {
            path: path.to_path_buf(),
            reader: BufReader::new(file),
            len,
        })
    }

    /// Path the trace was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of the trace in bytes at open time
    pub fn len(&self) -> u64 {
        self.len
    }

    /// Check if the trace was empty at open time
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Parsed records, in file order. Read errors are yielded as
    /// [`Error::Io`](crate::Error::Io) and end the iteration.
    pub fn records(self) -> FileRecords {
        FileRecords {
            reader: self.reader,
            buf: Vec::new(),
            line: 0,
            done: false,
        }
    }
}

/// Iterator over the records of a [`TraceFile`].
///
/// Yields `(line_number, record)` like [`Records`].
#[derive(Debug)]
pub struct FileRecords {
    reader: BufReader<File>,
    buf: Vec<u8>,
    line: usize,
    done: bool,
}

impl Iterator for FileRecords {
    type Item = (usize, Result<Request>);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buf.clear();
            self.line += 1;

            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    if let Some(record) = parse_line(&self.buf) {
                        return Some((self.line, record));
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some((self.line, Err(e.into())));
                }
            }
        }

        None
    }
}

/// Iterator over the records of an in-memory trace.
///
/// Yields `(line_number, record)`; line numbers start at 1. Blank lines
/// are skipped silently, malformed lines are yielded as errors.
#[derive(Debug, Clone)]
pub struct Records<'a> {
    rest: &'a [u8],
    line: usize,
}

impl<'a> Records<'a> {
    /// Iterate over the lines of `data`
    pub fn new(data: &'a [u8]) -> Self {
        Self { rest: data, line: 0 }
    }
}

impl Iterator for Records<'_> {
    type Item = (usize, Result<Request>);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.rest.is_empty() {
            let data = self.rest;
            let (line, rest) = match data.iter().position(|&b| b == b'\n') {
                Some(i) => (&data[..i], &data[i + 1..]),
                None => (data, &data[data.len()..]),
            };
            self.rest = rest;
            self.line += 1;

            if let Some(record) = parse_line(line) {
                return Some((self.line, record));
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::RequestKind;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const TRACE: &[u8] = b"\
128166372003061629,web,0,Read,0,4096,41286
128166372003061630,web,0,Write,8192,512,1731

garbage
128166372003061631,web,0,Read,4096,-1,12
128166372003061632,web,0,Read,12288,4096,99";

    #[test]
    fn test_records_line_numbers() {
        let records: Vec<_> = Records::new(TRACE).collect();

        let lines: Vec<_> = records.iter().map(|(line, _)| *line).collect();
        assert_eq!(lines, vec![1, 2, 4, 5, 6]);

        assert_eq!(records[0].1.as_ref().unwrap().kind, RequestKind::Read);
        assert_eq!(records[1].1.as_ref().unwrap().kind, RequestKind::Write);
        assert!(records[2].1.is_err());
        assert!(records[3].1.is_err());
        // Last line has no trailing newline
        assert_eq!(records[4].1.as_ref().unwrap(), &Request::read(12288, 4096));
    }

    #[test]
    fn test_records_crlf() {
        let records: Vec<_> = Records::new(b"a,b,c,Read,0,1\r\na,b,c,Write,2,3\r\n").collect();

        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|(_, r)| r.is_ok()));
    }

    #[test]
    fn test_records_empty() {
        assert_eq!(Records::new(b"").count(), 0);
        assert_eq!(Records::new(b"\n\n  \n").count(), 0);
    }

    #[test]
    fn test_open_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(TRACE).unwrap();
        file.flush().unwrap();

        let trace = TraceFile::open(file.path()).unwrap();

        assert_eq!(trace.len(), TRACE.len() as u64);
        assert_eq!(trace.path(), file.path());

        let from_file: Vec<_> = trace
            .records()
            .map(|(line, r)| (line, r.ok()))
            .collect();
        let in_memory: Vec<_> = Records::new(TRACE)
            .map(|(line, r)| (line, r.ok()))
            .collect();
        assert_eq!(from_file, in_memory);
    }

    #[test]
    fn test_open_empty_file() {
        let file = NamedTempFile::new().unwrap();

        let trace = TraceFile::open(file.path()).unwrap();

        assert!(trace.is_empty());
        assert_eq!(trace.records().count(), 0);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();

        let result = TraceFile::open(dir.path().join("missing.csv"));

        assert!(matches!(result, Err(crate::Error::Io(_))));
    }
}
