// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! In-memory inverted index over bibliographic records.
//!
//! Documents are lists of typed fields. Every value of an indexed field becomes
//! a `field:value` term with a sorted postings list of document ids. Queries
//! combine terms with MUST (intersection) and SHOULD (union) and return a page
//! of matching documents plus a total.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌─────────────┐
//! │  types.rs   │────▶│  engine.rs   │────▶│  query.rs   │
//! │ (Document,  │     │ (dictionary, │     │ (Term, Paged│
//! │  Field,Term)│     │ store, posts)│     │  Boolean)   │
//! └─────────────┘     └──────────────┘     └─────────────┘
//!        │                   │                    │
//!        ▼                   ▼                    ▼
//! ┌─────────────────────────────────────────────────────┐
//! │          postings.rs (sorted lists, merges)          │
//! └─────────────────────────────────────────────────────┘
//!                            │
//!                            ▼
//! ┌─────────────────────────────────────────────────────┐
//! │   catalog/ (MARC reader, BookRecord, year stats)    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use bibdex::{Document, Engine, Field, Page, Query};
//!
//! let mut engine = Engine::new();
//! engine.add(Document::new(vec![
//!     Field::int("year", 1990),
//!     Field::str_list("term", ["history"]),
//! ]));
//!
//! let query = Query::must(
//!     Query::term("term", "history"),
//!     Query::term("year", "1990"),
//!     Page::new(0, 10),
//! );
//! assert_eq!(engine.find(&query).total, 1);
//! ```

pub mod catalog;
pub mod config;
pub mod contracts;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod postings;
pub mod query;
pub mod store;
pub mod types;
pub mod verify;

#[doc(hidden)]
pub mod testing;

pub use catalog::{BookRecord, Catalog, FindResponse, LoadSummary, YearStat};
pub use config::{
    CatalogConfig, InputFormat, TextEncoding, DEFAULT_KEYWORD_LIMIT, DEFAULT_LIMIT,
};
pub use engine::Engine;
pub use error::{Result, SearchError};
pub use postings::{merge_must, merge_should, window, PostingList};
pub use query::{Evaluation, Page, Query, QueryRequest, Relation};
pub use types::{DocId, Document, Field, FieldValue, SearchResult, Term, TermId};
pub use verify::{check_engine, InvariantError, VerificationReport};
