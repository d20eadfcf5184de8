// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Book records and their conversion to and from index documents.

use super::marc::{subfield, Record};
use crate::types::{Document, Field};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Field names the catalog indexes under.
pub const ID_FIELD: &str = "id";
pub const YEAR_FIELD: &str = "year";
pub const TERM_FIELD: &str = "term";

// UNIMARC tags used by the conversion.
const TAG_GENERAL: u16 = 100;
const TAG_TITLE: u16 = 200;
const TAG_SUMMARY: u16 = 330;
const TAG_SUBJECT: u16 = 606;
const TAG_AUTHOR: u16 = 701;
const TAG_LOCATION: u16 = 856;

/// Publication year lives at characters 9..13 of the general data subfield.
const YEAR_CHARS: std::ops::Range<usize> = 9..13;

/// What users see when they get a search result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Catalog id, assigned on ingestion starting at 1.
    #[serde(default)]
    pub id: u32,
    pub year: i32,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub author: Vec<String>,
    #[serde(default)]
    pub url: String,
}

impl BookRecord {
    /// Convert a MARC record, or `None` if it lacks a year, a title or a
    /// subject field.
    pub fn from_marc(record: &Record) -> Option<BookRecord> {
        let mut book = BookRecord::default();
        let (mut has_year, mut has_name, mut has_terms) = (false, false, false);

        for field in &record.fields {
            let value = field.value.as_str();
            match field.tag {
                TAG_GENERAL => match parse_year(value) {
                    Some(year) => {
                        book.year = year;
                        has_year = true;
                    }
                    None => {
                        debug!(value, "dropping record with unparsable year");
                        return None;
                    }
                },
                TAG_TITLE => {
                    book.name = subfield(value, 'a').unwrap_or_default().to_string();
                    has_name = true;
                }
                TAG_SUBJECT => {
                    // Only the first `$a` is kept; a field without one still
                    // counts, with an empty term.
                    let term = subfield(value, 'a').unwrap_or_default();
                    book.terms = vec![term.to_string()];
                    has_terms = true;
                }
                TAG_SUMMARY => {
                    book.desc = subfield(value, 'a').unwrap_or_default().to_string();
                }
                TAG_AUTHOR => {
                    if let Some(author) = subfield(value, 'a').filter(|s| !s.is_empty()) {
                        book.author.push(author.to_string());
                    }
                }
                TAG_LOCATION => {
                    book.url = subfield(value, 'u').unwrap_or_default().to_string();
                }
                _ => {}
            }
        }

        if has_year && has_name && has_terms {
            Some(book)
        } else {
            debug!(
                year = book.year,
                name = %book.name,
                has_year,
                has_name,
                has_terms,
                "dropping incomplete record"
            );
            None
        }
    }

    /// The engine document for this record.
    ///
    /// All three fields are indexed; `id` is what maps results back to records.
    pub fn to_document(&self) -> Document {
        Document::new(vec![
            Field::int(ID_FIELD, i64::from(self.id)),
            Field::int(YEAR_FIELD, i64::from(self.year)),
            Field::str_list(TERM_FIELD, self.terms.iter().cloned()),
        ])
    }
}

/// Catalog id stored in an engine document.
pub fn document_record_id(doc: &Document) -> Option<u32> {
    doc.field(ID_FIELD)
        .and_then(|f| f.value().as_int())
        .and_then(|id| u32::try_from(id).ok())
}

fn parse_year(value: &str) -> Option<i32> {
    let data = subfield(value, 'a')?;
    let year: String = data
        .chars()
        .skip(YEAR_CHARS.start)
        .take(YEAR_CHARS.len())
        .collect();
    if year.chars().count() != YEAR_CHARS.len() {
        return None;
    }
    year.parse().ok()
}
