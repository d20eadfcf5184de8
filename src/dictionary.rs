// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Term dictionary: `(field, value)` to dense term id.

use crate::types::{Term, TermId};
use std::collections::HashMap;

/// Grow-only map from terms to ids.
///
/// Ids are handed out as `0, 1, 2, ...` in first-seen order and never change,
/// so they double as indexes into the postings store.
#[derive(Debug, Clone, Default)]
pub struct TermDictionary {
    ids: HashMap<Term, TermId>,
}

impl TermDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id for `term`, assigning the next one on first sight.
    ///
    /// The bool is `true` when the term was new.
    pub fn resolve_or_insert(&mut self, term: Term) -> (TermId, bool) {
        let next = TermId(self.ids.len() as u32);
        let mut created = false;
        let id = *self.ids.entry(term).or_insert_with(|| {
            created = true;
            next
        });
        (id, created)
    }

    /// Look up a term without creating it.
    pub fn get(&self, term: &Term) -> Option<TermId> {
        self.ids.get(term).copied()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// All terms with their ids, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&Term, TermId)> {
        self.ids.iter().map(|(term, id)| (term, *id))
    }
}
