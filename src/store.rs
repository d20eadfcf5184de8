// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Document store: document id to the document given at ingestion.

use crate::contracts::check_doc_ids_dense;
use crate::types::{DocId, Document};

/// Append-only document storage.
///
/// Ids are positions, so the store is a `Vec` and lookups are an index.
/// There is no way to get a `&mut Document` back out.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    docs: Vec<Document>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `doc` under the next id and return that id.
    pub fn push(&mut self, doc: Document) -> DocId {
        let id = DocId(self.docs.len() as u32);
        self.docs.push(doc);
        check_doc_ids_dense(id.get() + 1, self.docs.len());
        id
    }

    #[inline]
    pub fn get(&self, id: DocId) -> Option<&Document> {
        self.docs.get(id.as_usize())
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Documents in id order.
    pub fn iter(&self) -> impl Iterator<Item = (DocId, &Document)> {
        self.docs
            .iter()
            .enumerate()
            .map(|(i, doc)| (DocId(i as u32), doc))
    }
}
