// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The index engine: ingestion plus result assembly.
//!
//! # Lifecycle
//!
//! ```text
//!   add(&mut self) ... add(&mut self)   │   find(&self)  find(&self) ...
//!   ─────────── single writer ──────────┼──────── many readers ────────
//! ```
//!
//! Ingestion needs `&mut Engine`, queries need `&Engine`, so the borrow checker
//! enforces that nothing is ingested while a query holds the engine. Readers
//! share it freely (`&Engine` or `Arc<Engine>`); queries never write to the
//! canonical postings, so no lock is needed.

use crate::dictionary::TermDictionary;
use crate::postings::PostingList;
use crate::query::{Evaluation, Query};
use crate::store::DocumentStore;
use crate::types::{DocId, Document, Field, SearchResult, Term, TermId};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::trace;

/// Term dictionary, document store and postings store in one value.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    dictionary: TermDictionary,
    store: DocumentStore,
    /// Indexed by `TermId`.
    postings: Vec<PostingList>,
}

impl Engine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingest a document and return its id.
    ///
    /// Every term of every indexed field gets the new id in its postings list.
    /// A value repeated inside a document is recorded once.
    pub fn add(&mut self, doc: Document) -> DocId {
        let terms: Vec<Term> = doc
            .fields
            .iter()
            .filter(|f| f.is_indexed())
            .flat_map(Field::terms)
            .collect();

        let id = self.store.push(doc);
        for term in terms {
            let (term_id, created) = self.dictionary.resolve_or_insert(term);
            if created {
                self.postings.push(PostingList::new());
            }
            self.postings[term_id.as_usize()].insert(id);
        }

        trace!(doc_id = id.get(), terms = self.dictionary.len(), "ingested document");
        id
    }

    /// Ingest documents in order, returning the id range they received.
    pub fn extend<I: IntoIterator<Item = Document>>(&mut self, docs: I) -> Vec<DocId> {
        docs.into_iter().map(|doc| self.add(doc)).collect()
    }

    /// Canonical postings for `term`; empty for unseen terms.
    pub fn postings(&self, term: &Term) -> &[DocId] {
        self.posting_list(term)
            .map(PostingList::as_slice)
            .unwrap_or(&[])
    }

    pub fn posting_list(&self, term: &Term) -> Option<&PostingList> {
        self.dictionary
            .get(term)
            .and_then(|id| self.postings.get(id.as_usize()))
    }

    pub fn posting_list_by_id(&self, id: TermId) -> Option<&PostingList> {
        self.postings.get(id.as_usize())
    }

    pub fn document(&self, id: DocId) -> Option<&Document> {
        self.store.get(id)
    }

    pub fn dictionary(&self) -> &TermDictionary {
        &self.dictionary
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    /// Number of postings lists (one per distinct term).
    pub fn postings_len(&self) -> usize {
        self.postings.len()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Evaluate a query without materializing documents.
    pub fn evaluate(&self, query: &Query) -> Evaluation {
        query.evaluate(self)
    }

    /// Evaluate a query and materialize its window into documents.
    pub fn find(&self, query: &Query) -> SearchResult<'_> {
        self.materialize(&self.evaluate(query))
    }

    /// Map an evaluated window back to stored documents, preserving order.
    pub fn materialize(&self, eval: &Evaluation) -> SearchResult<'_> {
        let docs = eval
            .ids
            .iter()
            .filter_map(|&id| self.store.get(id))
            .collect();
        SearchResult {
            docs,
            total: eval.total,
        }
    }

    /// Evaluate many queries concurrently against the shared engine.
    #[cfg(feature = "parallel")]
    pub fn find_batch(&self, queries: &[Query]) -> Vec<SearchResult<'_>> {
        queries.par_iter().map(|q| self.find(q)).collect()
    }

    /// Sequential version for builds without rayon.
    #[cfg(not(feature = "parallel"))]
    pub fn find_batch(&self, queries: &[Query]) -> Vec<SearchResult<'_>> {
        queries.iter().map(|q| self.find(q)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::Page;
    use crate::testing::{doc_record_id, make_doc as book};

    #[test]
    fn test_add_assigns_increasing_ids() {
        let mut engine = Engine::new();
        let a = engine.add(book(1, 1990, &["history"]));
        let b = engine.add(book(2, 1991, &["history"]));
        assert_eq!((a, b), (DocId(0), DocId(1)));
        assert_eq!(engine.len(), 2);
    }

    #[test]
    fn test_repeated_value_indexed_once() {
        let mut engine = Engine::new();
        engine.add(book(1, 1990, &["history", "history"]));
        assert_eq!(engine.postings(&Term::new("term", "history")).len(), 1);
    }

    #[test]
    fn test_unindexed_fields_are_stored_not_indexed() {
        let mut engine = Engine::new();
        let id = engine.add(Document::new(vec![
            Field::int("id", 9).stored_only(),
            Field::str_list("term", ["art"]),
        ]));
        assert!(engine.postings(&Term::new("id", "9")).is_empty());
        assert_eq!(engine.postings(&Term::new("term", "art")), &[id]);
        assert_eq!(engine.document(id).map(|d| d.fields.len()), Some(2));
    }

    #[test]
    fn test_postings_store_tracks_dictionary() {
        let mut engine = Engine::new();
        engine.add(book(1, 1990, &["a", "b"]));
        engine.add(book(2, 1990, &["b", "c"]));
        // id:1, id:2, year:1990, term:a, term:b, term:c
        assert_eq!(engine.dictionary().len(), 6);
        assert_eq!(engine.postings_len(), 6);
    }

    #[test]
    fn test_find_materializes_in_window_order() {
        let mut engine = Engine::new();
        engine.add(book(1, 1990, &["history"]));
        engine.add(book(2, 1991, &["history"]));
        engine.add(book(3, 1992, &["history"]));

        let result = engine.find(&Query::paged("term", "history", Page::new(1, 2)));
        assert_eq!(result.total, 3);
        let ids: Vec<i64> = result.docs.iter().filter_map(|d| doc_record_id(d)).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_unknown_term_is_empty_not_error() {
        let engine = Engine::new();
        let result = engine.find(&Query::paged("term", "nothing", Page::default()));
        assert_eq!(result, SearchResult::empty());
    }

    #[test]
    fn test_find_batch_matches_sequential() {
        let mut engine = Engine::new();
        for i in 0..50 {
            let parity = if i % 2 == 0 { "even" } else { "odd" };
            engine.add(book(i, 1990 + i % 5, &["shared", parity]));
        }
        let queries: Vec<Query> = (1990..1995)
            .map(|y| {
                Query::must(
                    Query::term("term", "even"),
                    Query::term("year", y.to_string()),
                    Page::new(0, 3),
                )
            })
            .collect();

        let batch = engine.find_batch(&queries);
        for (query, result) in queries.iter().zip(&batch) {
            assert_eq!(result, &engine.find(query));
        }
    }

    #[test]
    fn test_engine_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Engine>();
    }
}
