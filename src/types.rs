// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the index.
//!
//! Documents are ordered lists of fields. Indexed fields expand into terms,
//! terms get dense ids from the dictionary, and each term id owns a postings
//! list of document ids.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **DocId**: assigned in strictly increasing order from 0, never reused.
//! - **TermId**: dense, assigned on first sight, never renumbered. The
//!   postings store is a `Vec` indexed by it.
//! - **Term**: equality is value equality of `(field, value)`. The dictionary
//!   is keyed on it, so two separately built terms with the same text must
//!   resolve to the same id.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// NEWTYPES
// =============================================================================

/// Type-safe document identifier.
///
/// Prevents passing a term id where a document id is expected. Ordering is
/// ingestion order, which is also postings order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for store indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

impl fmt::Display for DocId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Dense term identifier handed out by the term dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TermId(pub u32);

impl TermId {
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

// =============================================================================
// TERMS AND FIELDS
// =============================================================================

/// A `(field, value)` pair produced by an indexed field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Term {
    pub field: String,
    pub value: String,
}

impl Term {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field, self.value)
    }
}

/// Raw value carried by a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Produces exactly one term: the decimal rendering of the integer.
    Int(i64),
    /// Produces one term per element, in element order.
    StrList(Vec<String>),
}

impl FieldValue {
    /// Integer payload, if this is an integer field.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            FieldValue::Int(v) => Some(*v),
            FieldValue::StrList(_) => None,
        }
    }

    /// String list payload, if this is a string-list field.
    pub fn as_str_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::Int(_) => None,
            FieldValue::StrList(values) => Some(values),
        }
    }
}

/// A named, optionally indexed value inside a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub indexed: bool,
    pub value: FieldValue,
}

impl Field {
    /// An indexed integer field.
    pub fn int(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            indexed: true,
            value: FieldValue::Int(value),
        }
    }

    /// An indexed string-list field.
    pub fn str_list<I, S>(name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            indexed: true,
            value: FieldValue::StrList(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Mark the field as stored-only. Its terms never reach the postings store.
    pub fn stored_only(mut self) -> Self {
        self.indexed = false;
        self
    }

    #[inline]
    pub fn is_indexed(&self) -> bool {
        self.indexed
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Expand the field into terms.
    ///
    /// Duplicates inside a string list are returned as-is; postings insertion
    /// is idempotent, so a repeated value still lands once per document.
    pub fn terms(&self) -> Vec<Term> {
        match &self.value {
            FieldValue::Int(v) => vec![Term::new(self.name.clone(), v.to_string())],
            FieldValue::StrList(values) => values
                .iter()
                .map(|v| Term::new(self.name.clone(), v.clone()))
                .collect(),
        }
    }
}

/// An ordered list of fields. Immutable once handed to the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub fields: Vec<Field>,
}

impl Document {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// First field with the given name.
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

// =============================================================================
// RESULTS
// =============================================================================

/// A materialized page of documents plus the exact match count.
///
/// `total` never depends on the page window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult<'a> {
    pub docs: Vec<&'a Document>,
    pub total: usize,
}

impl SearchResult<'_> {
    pub fn empty() -> Self {
        Self {
            docs: Vec::new(),
            total: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
