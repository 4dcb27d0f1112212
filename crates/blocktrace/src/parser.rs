//! Trace record parser using nom
//!
//! Record format (one request per line, comma-separated):
//! ```text
//! timestamp,host,disk,kind,offset,length[,...]
//! 128166372003061629,web,0,Read,7014609920,24576,41286
//! ```
//!
//! Only `kind`, `offset` and `length` are used. `kind` is a read only if it
//! is exactly `Read`; every other value counts as a write.

use nom::{
    branch::alt,
    bytes::complete::take_till,
    character::complete::{char, i64 as signed, u64 as unsigned},
    combinator::{eof, map, value},
    multi::count,
    sequence::terminated,
    IResult,
};

use crate::error::{Error, Result};

/// Fields preceding `kind` that are skipped
const SKIPPED_FIELDS: usize = 3;

/// Direction of an I/O request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    /// Read request
    Read,
    /// Write request (any kind other than `Read`)
    Write,
}

/// One byte-range I/O request from a trace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    /// Read or write
    pub kind: RequestKind,
    /// Starting byte offset
    pub offset: u64,
    /// Request length in bytes
    pub length: u64,
}

impl Request {
    /// Create a read request
    pub fn read(offset: u64, length: u64) -> Self {
        Self {
            kind: RequestKind::Read,
            offset,
            length,
        }
    }

    /// Create a write request
    pub fn write(offset: u64, length: u64) -> Self {
        Self {
            kind: RequestKind::Write,
            offset,
            length,
        }
    }
}

fn field(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_till(|c| c == b',')(input)
}

fn kind(input: &[u8]) -> IResult<&[u8], RequestKind> {
    map(field, |f: &[u8]| {
        if f == b"Read" {
            RequestKind::Read
        } else {
            RequestKind::Write
        }
    })(input)
}

/// Length is the last field we need; anything after it is ignored
fn field_end(input: &[u8]) -> IResult<&[u8], ()> {
    alt((value((), char(',')), value((), eof)))(input)
}

fn record(input: &[u8]) -> IResult<&[u8], (RequestKind, u64, i64)> {
    let (input, _) = count(terminated(field, char(',')), SKIPPED_FIELDS)(input)?;
    let (input, kind) = terminated(kind, char(','))(input)?;
    let (input, offset) = terminated(unsigned, char(','))(input)?;
    let (input, length) = terminated(signed, field_end)(input)?;

    Ok((input, (kind, offset, length)))
}

/// Strip leading and trailing ASCII whitespace (including `\r`)
pub(crate) fn trim(line: &[u8]) -> &[u8] {
    let start = line
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(line.len());
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(start, |i| i + 1);
    &line[start..end]
}

/// Parse a single trace line into a [`Request`]
///
/// # Errors
/// * [`Error::Parse`] if the line has fewer than six fields, a non-numeric
///   offset or length, a negative length, or a range past `u64::MAX`
pub fn parse_record(line: &[u8]) -> Result<Request> {
    let line = trim(line);
    let (_, (kind, offset, length)) = record(line)?;

    let length = u64::try_from(length)
        .map_err(|_| Error::Parse(format!("negative request length {}", length)))?;

    if offset.checked_add(length).is_none() {
        return Err(Error::Parse(format!(
            "request range {}+{} overflows",
            offset, length
        )));
    }

    Ok(Request {
        kind,
        offset,
        length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_read() {
        let request = parse_record(b"128166372003061629,web,0,Read,7014609920,24576,41286").unwrap();

        assert_eq!(request, Request::read(7014609920, 24576));
    }

    #[test]
    fn test_parse_write() {
        let request = parse_record(b"128166372002969965,hm,1,Write,3154361344,4096,1731").unwrap();

        assert_eq!(request, Request::write(3154361344, 4096));
    }

    #[test]
    fn test_kind_is_exact_match() {
        for kind in ["read", "READ", "Reads", "", "Trim"] {
            let line = format!("t,h,0,{},0,512", kind);
            assert_eq!(
                parse_record(line.as_bytes()).unwrap().kind,
                RequestKind::Write,
                "kind {:?}",
                kind
            );
        }
    }

    #[test]
    fn test_exactly_six_fields() {
        let request = parse_record(b"t,h,0,Read,8192,0").unwrap();

        assert_eq!(request, Request::read(8192, 0));
    }

    #[test]
    fn test_trailing_whitespace() {
        let request = parse_record(b"  t,h,0,Read,1,2\r\n").unwrap();

        assert_eq!(request, Request::read(1, 2));
    }

    #[test]
    fn test_too_few_fields() {
        assert!(parse_record(b"t,h,0,Read,4096").is_err());
        assert!(parse_record(b"t,h,0,Read").is_err());
        assert!(parse_record(b"").is_err());
    }

    #[test]
    fn test_non_numeric() {
        assert!(parse_record(b"t,h,0,Read,abc,4096").is_err());
        assert!(parse_record(b"t,h,0,Read,4096,12k").is_err());
        assert!(parse_record(b"t,h,0,Read,-1,4096").is_err());
        assert!(parse_record(b"Timestamp,Hostname,DiskNumber,Type,Offset,Size,ResponseTime").is_err());
    }

    #[test]
    fn test_negative_length() {
        let err = parse_record(b"t,h,0,Read,0,-512").unwrap_err();

        assert!(err.is_malformed_record());
        assert!(err.to_string().contains("negative"));
    }

    #[test]
    fn test_range_overflow() {
        let line = format!("t,h,0,Write,{},1", u64::MAX);

        assert!(parse_record(line.as_bytes()).is_err());
    }

    #[test]
    fn test_trim() {
        assert_eq!(trim(b" \t a b \r"), b"a b");
        assert_eq!(trim(b"   "), b"");
        assert_eq!(trim(b""), b"");
    }
}
