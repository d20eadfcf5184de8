//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.

#![doc(hidden)]

use crate::catalog::BookRecord;
use crate::types::{Document, Field};

/// A document shaped like a converted catalog record.
pub fn make_doc(id: i64, year: i64, terms: &[&str]) -> Document {
    Document::new(vec![
        Field::int("id", id),
        Field::int("year", year),
        Field::str_list("term", terms.iter().copied()),
    ])
}

/// A catalog record with the required fields filled in.
pub fn make_book(year: i32, name: &str, terms: &[&str]) -> BookRecord {
    BookRecord {
        year,
        name: name.to_string(),
        terms: terms.iter().map(|t| t.to_string()).collect(),
        ..BookRecord::default()
    }
}

/// The id stored in a document's `id` field.
pub fn doc_record_id(doc: &Document) -> Option<i64> {
    doc.field("id").and_then(|f| f.value().as_int())
}
