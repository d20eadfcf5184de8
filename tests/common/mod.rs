//! Shared test utilities and fixtures.

#![allow(dead_code)]

use bibdex::catalog::marc::{encode_record, SUBFIELD_DELIMITER};
use bibdex::{check_engine, DocId, Engine, SearchResult};

// Re-export canonical test utilities from bibdex::testing
pub use bibdex::testing::{doc_record_id, make_book, make_doc};

/// Ids stored in the `id` field of each returned document, in order.
pub fn record_ids(result: &SearchResult<'_>) -> Vec<i64> {
    result.docs.iter().filter_map(|d| doc_record_id(d)).collect()
}

pub fn doc_ids(raw: &[u32]) -> Vec<DocId> {
    raw.iter().copied().map(DocId).collect()
}

/// Panics with the invariant violation if the engine is malformed.
pub fn assert_engine_well_formed(engine: &Engine) {
    if let Err(err) = check_engine(engine) {
        panic!("engine failed verification: {err}");
    }
}

/// A `$a` subfield with two blank indicators, as UNIMARC data fields carry.
pub fn sub_a(content: &str) -> String {
    format!("  {}a{}", SUBFIELD_DELIMITER as char, content)
}

/// An ISO 2709 record with year, title and subject.
pub fn marc_book(year: &str, title: &str, subject: &str) -> Vec<u8> {
    encode_record(&[
        (100, &sub_a(&format!("20050101d{year}"))),
        (200, &sub_a(title)),
        (606, &sub_a(subject)),
    ])
}
