// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! ISO 2709 (MARC exchange format) reader.
//!
//! # Record Layout
//!
//! ```text
//! ┌──────────────┬────────────────────────────┬────┬─────────────────────┬────┐
//! │ leader (24B) │ directory (12B per entry)  │ 1E │ field data          │ 1D │
//! └──────────────┴────────────────────────────┴────┴─────────────────────┴────┘
//!   0..5   record length                      entry: tag(3) len(4) start(5)
//!   12..17 base address of data                      start is relative to data
//! ```
//!
//! Field values keep their indicator bytes and trailing field terminator;
//! use [`subfield`] / [`subfields`] to pull out `$a`-style content. Field
//! bytes are decoded with the reader's [`TextEncoding`], GB18030 unless told
//! otherwise. Offsets and lengths are byte counts before decoding.

use crate::config::TextEncoding;
use crate::error::{Result, SearchError};
use std::io::{BufRead, Read};

pub const RECORD_TERMINATOR: u8 = 0x1D;
pub const FIELD_TERMINATOR: u8 = 0x1E;
pub const SUBFIELD_DELIMITER: u8 = 0x1F;

const LEADER_LEN: usize = 24;
const DIRECTORY_ENTRY_LEN: usize = 12;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leader {
    pub record_length: usize,
    pub base_address: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub tag: u16,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub leader: Leader,
    pub fields: Vec<RecordField>,
}

impl Record {
    /// Fields carrying `tag`, in record order.
    pub fn fields_with_tag(&self, tag: u16) -> impl Iterator<Item = &RecordField> {
        self.fields.iter().filter(move |f| f.tag == tag)
    }

    /// Parse one record from its raw bytes (terminator optional).
    ///
    /// `ordinal` is only used for error messages.
    pub fn parse(raw: &[u8], ordinal: usize, encoding: TextEncoding) -> Result<Self> {
        if raw.len() < LEADER_LEN {
            return Err(SearchError::marc(
                ordinal,
                format!("{} bytes is shorter than the leader", raw.len()),
            ));
        }

        let leader = Leader {
            record_length: parse_decimal(&raw[0..5], ordinal, "record length")?,
            base_address: parse_decimal(&raw[12..17], ordinal, "base address")?,
        };

        let mut pos = LEADER_LEN;
        let mut entries = Vec::new();
        loop {
            match raw.get(pos) {
                Some(&FIELD_TERMINATOR) => {
                    pos += 1;
                    break;
                }
                Some(_) if pos + DIRECTORY_ENTRY_LEN <= raw.len() => {
                    let entry = &raw[pos..pos + DIRECTORY_ENTRY_LEN];
                    let tag = parse_decimal(&entry[0..3], ordinal, "tag")? as u16;
                    let len = parse_decimal(&entry[3..7], ordinal, "field length")?;
                    let start = parse_decimal(&entry[7..12], ordinal, "field start")?;
                    entries.push((tag, len, start));
                    pos += DIRECTORY_ENTRY_LEN;
                }
                _ => {
                    return Err(SearchError::marc(ordinal, "directory is not terminated"));
                }
            }
        }

        // Data starts right after the directory terminator. This matches the
        // leader's base address in well-formed files and survives files where
        // the leader lies.
        let data = &raw[pos..];
        let mut fields = Vec::with_capacity(entries.len());
        for (tag, len, start) in entries {
            let bytes = data.get(start..start + len).ok_or_else(|| {
                let reason = format!("field {:03} [{}..{}] overruns data", tag, start, start + len);
                SearchError::marc(ordinal, reason)
            })?;
            fields.push(RecordField {
                tag,
                value: encoding.decode(bytes).into_owned(),
            });
        }

        Ok(Record { leader, fields })
    }
}

fn parse_decimal(bytes: &[u8], ordinal: usize, what: &str) -> Result<usize> {
    std::str::from_utf8(bytes)
        .ok()
        .and_then(|s| s.trim().parse::<usize>().ok())
        .ok_or_else(|| {
            SearchError::marc(
                ordinal,
                format!("{} is not a number: {:?}", what, String::from_utf8_lossy(bytes)),
            )
        })
}

/// Content of the first `code` subfield, up to the next delimiter.
pub fn subfield(value: &str, code: char) -> Option<&str> {
    subfield_pairs(value).find(|(c, _)| *c == code).map(|(_, s)| s)
}

/// Contents of every subfield, in order.
pub fn subfields(value: &str) -> Vec<&str> {
    subfield_pairs(value).map(|(_, s)| s).collect()
}

fn subfield_pairs(value: &str) -> impl Iterator<Item = (char, &str)> {
    // The chunk before the first delimiter holds the indicators.
    value
        .split(SUBFIELD_DELIMITER as char)
        .skip(1)
        .filter_map(|chunk| {
            let mut chars = chunk.chars();
            let code = chars.next()?;
            let content = chars.as_str();
            let content = match content.find(FIELD_TERMINATOR as char) {
                Some(end) => &content[..end],
                None => content,
            };
            Some((code, content))
        })
}

/// Streaming record reader.
///
/// Records are split on the record terminator. Some exports pad every record
/// with a fixed number of bytes (usually a line break); `skip` discards them.
pub struct Reader<R> {
    inner: R,
    skip: usize,
    encoding: TextEncoding,
    ordinal: usize,
    buf: Vec<u8>,
}

impl<R: BufRead> Reader<R> {
    pub fn new(inner: R) -> Self {
        Self::with_skip(inner, 0)
    }

    pub fn with_skip(inner: R, skip: usize) -> Self {
        Self {
            inner,
            skip,
            encoding: TextEncoding::default(),
            ordinal: 0,
            buf: Vec::new(),
        }
    }

    pub fn with_encoding(mut self, encoding: TextEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Read the next record, or `None` at end of input.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        self.buf.clear();
        let n = self.inner.read_until(RECORD_TERMINATOR, &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }
        if self.buf.last() != Some(&RECORD_TERMINATOR) {
            // Trailing newline or padding after the last record.
            if self.buf.iter().all(u8::is_ascii_whitespace) {
                return Ok(None);
            }
            self.ordinal += 1;
            return Err(SearchError::marc(self.ordinal, "truncated record"));
        }
        if self.skip > 0 {
            let mut discard = (&mut self.inner).take(self.skip as u64);
            std::io::copy(&mut discard, &mut std::io::sink())?;
        }

        self.ordinal += 1;
        Record::parse(&self.buf, self.ordinal, self.encoding).map(Some)
    }
}

impl<R: BufRead> Iterator for Reader<R> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        self.read_record().transpose()
    }
}

/// Encode fields into an ISO 2709 record.
///
/// Values are written as given, so callers include indicators and subfield
/// delimiters themselves; the field terminator is appended here.
pub fn encode_record(fields: &[(u16, &str)]) -> Vec<u8> {
    let raw: Vec<(u16, &[u8])> = fields.iter().map(|(tag, v)| (*tag, v.as_bytes())).collect();
    encode_record_bytes(&raw)
}

/// Like [`encode_record`], for values already in the target encoding.
pub fn encode_record_bytes(fields: &[(u16, &[u8])]) -> Vec<u8> {
    let mut directory = Vec::new();
    let mut data = Vec::new();
    for (tag, value) in fields {
        let start = data.len();
        data.extend_from_slice(value);
        data.push(FIELD_TERMINATOR);
        let len = data.len() - start;
        directory.extend_from_slice(format!("{:03}{:04}{:05}", tag, len, start).as_bytes());
    }
    directory.push(FIELD_TERMINATOR);

    let base_address = LEADER_LEN + directory.len();
    let record_length = base_address + data.len() + 1;
    let mut out = Vec::with_capacity(record_length);
    let leader = format!("{:05}nam0 22{:05}   450 ", record_length, base_address);
    out.extend_from_slice(leader.as_bytes());
    out.extend_from_slice(&directory);
    out.extend_from_slice(&data);
    out.push(RECORD_TERMINATOR);
    out
}
