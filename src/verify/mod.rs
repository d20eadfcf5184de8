// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Structural verification of a built engine.
//!
//! The runtime contracts in `contracts` fire inside individual operations in
//! debug builds. This module is the other half: walk a finished engine and
//! report the first violated invariant as a value, in any build profile.
//!
//! | Check                  | What's Guaranteed                               |
//! |------------------------|-------------------------------------------------|
//! | `EmptyPostingList`     | every dictionary term has at least one doc      |
//! | `UnsortedPostingList`  | ids strictly ascending within each list         |
//! | `DanglingDocId`        | every posted id resolves in the document store  |
//! | `DictionaryMismatch`   | one postings list per dictionary entry          |
//! | `MissingPosting`       | every indexed term of every doc is posted       |

use crate::engine::Engine;
use crate::types::{DocId, Term};
use serde::Serialize;
use thiserror::Error;

/// Error type for invariant violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("postings list for '{term}' is empty")]
    EmptyPostingList { term: Term },

    #[error("postings list for '{term}' not strictly ascending at position {position}")]
    UnsortedPostingList { term: Term, position: usize },

    #[error("postings list for '{term}' references doc {doc_id} but only {doc_count} docs exist")]
    DanglingDocId {
        term: Term,
        doc_id: DocId,
        doc_count: usize,
    },

    #[error("dictionary has {terms} terms but postings store has {lists} lists")]
    DictionaryMismatch { terms: usize, lists: usize },

    #[error("doc {doc_id} produces '{term}' but is missing from its postings list")]
    MissingPosting { term: Term, doc_id: DocId },
}

/// Counts gathered while verifying.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationReport {
    pub documents: usize,
    pub terms: usize,
    pub postings_entries: usize,
    pub longest_postings: usize,
}

/// Check every invariant of the engine.
pub fn check_engine(engine: &Engine) -> Result<VerificationReport, InvariantError> {
    let doc_count = engine.len();
    let terms = engine.dictionary().len();
    let lists = engine.postings_len();

    if terms != lists {
        return Err(InvariantError::DictionaryMismatch { terms, lists });
    }

    let mut report = VerificationReport {
        documents: doc_count,
        terms,
        ..VerificationReport::default()
    };

    for (term, term_id) in engine.dictionary().iter() {
        let ids = engine
            .posting_list_by_id(term_id)
            .map(|list| list.as_slice())
            .unwrap_or(&[]);

        if ids.is_empty() {
            return Err(InvariantError::EmptyPostingList { term: term.clone() });
        }
        for position in 1..ids.len() {
            if ids[position - 1] >= ids[position] {
                return Err(InvariantError::UnsortedPostingList {
                    term: term.clone(),
                    position,
                });
            }
        }
        if let Some(&last) = ids.last() {
            if last.as_usize() >= doc_count {
                return Err(InvariantError::DanglingDocId {
                    term: term.clone(),
                    doc_id: last,
                    doc_count,
                });
            }
        }

        report.postings_entries += ids.len();
        report.longest_postings = report.longest_postings.max(ids.len());
    }

    for (doc_id, doc) in engine.store().iter() {
        for field in doc.fields.iter().filter(|f| f.is_indexed()) {
            for term in field.terms() {
                let posted = engine
                    .posting_list(&term)
                    .is_some_and(|list| list.contains(doc_id));
                if !posted {
                    return Err(InvariantError::MissingPosting { term, doc_id });
                }
            }
        }
    }

    Ok(report)
}
