// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Postings lists and the ordered-set merges over them.
//!
//! A postings list is a sorted `Vec<DocId>`. Insertion is a binary search plus
//! a shift; because documents arrive in id order the common case is a push.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **POSTINGS_SORTED**: ids are strictly ascending, so no duplicates.
//! 2. **INSERT_IDEMPOTENT**: inserting a present id leaves the list unchanged.
//! 3. **MERGE_READ_ONLY**: merges and windows read canonical lists through
//!    `&[DocId]` and always allocate their output. Queries share the canonical
//!    lists across threads, so nothing here may take them by `&mut`.

use crate::contracts::check_postings_sorted;
use crate::types::DocId;

/// Ordered, duplicate-free document ids for one term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostingList {
    ids: Vec<DocId>,
}

impl PostingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `id`, keeping the list sorted. Returns `false` if it was present.
    pub fn insert(&mut self, id: DocId) -> bool {
        // Fast path: ids are handed out in increasing order during ingestion.
        match self.ids.last() {
            None => {
                self.ids.push(id);
                return true;
            }
            Some(&last) if last < id => {
                self.ids.push(id);
                return true;
            }
            _ => {}
        }

        let inserted = match self.ids.binary_search(&id) {
            Ok(_) => false,
            Err(pos) => {
                self.ids.insert(pos, id);
                true
            }
        };
        check_postings_sorted(&self.ids);
        inserted
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[DocId] {
        &self.ids
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }
}

impl FromIterator<DocId> for PostingList {
    fn from_iter<I: IntoIterator<Item = DocId>>(iter: I) -> Self {
        let mut list = PostingList::new();
        for id in iter {
            list.insert(id);
        }
        list
    }
}

/// Copy out the contiguous window `[start, start + limit)`.
///
/// A `start` past the end yields an empty window.
pub fn window(ids: &[DocId], start: usize, limit: usize) -> Vec<DocId> {
    if start >= ids.len() {
        return Vec::new();
    }
    let end = start.saturating_add(limit).min(ids.len());
    ids[start..end].to_vec()
}

/// Intersection of two sorted lists.
///
/// The walk always runs to the end of the shorter list, so the returned count
/// is the exact intersection size. Only ids falling inside
/// `[start, start + limit)` of the intersection are copied out.
pub fn merge_must(
    left: &[DocId],
    right: &[DocId],
    start: usize,
    limit: usize,
) -> (Vec<DocId>, usize) {
    let end = start.saturating_add(limit);
    let mut out = Vec::with_capacity(limit.min(left.len().min(right.len())));
    let mut total = 0;
    let (mut i, mut j) = (0, 0);

    while i < left.len() && j < right.len() {
        let (a, b) = (left[i], right[j]);
        if a == b {
            if total >= start && total < end {
                out.push(a);
            }
            total += 1;
            i += 1;
            j += 1;
        } else if a < b {
            i += 1;
        } else {
            j += 1;
        }
    }

    check_postings_sorted(&out);
    (out, total)
}

/// Union of two sorted lists, each id emitted once.
///
/// The walk stops as soon as the window `[start, start + limit)` is filled.
/// The returned count is `left.len() + right.len()`, not the deduplicated
/// union size; callers report it as the total unchanged.
pub fn merge_should(
    left: &[DocId],
    right: &[DocId],
    start: usize,
    limit: usize,
) -> (Vec<DocId>, usize) {
    let total = left.len() + right.len();
    let end = start.saturating_add(limit);
    let mut out = Vec::with_capacity(limit.min(total));
    let mut emitted = 0;
    let (mut i, mut j) = (0, 0);

    while emitted < end && (i < left.len() || j < right.len()) {
        let next = match (left.get(i), right.get(j)) {
            (Some(&a), Some(&b)) if a == b => {
                i += 1;
                j += 1;
                a
            }
            (Some(&a), Some(&b)) if a < b => {
                i += 1;
                a
            }
            (Some(_), Some(&b)) => {
                j += 1;
                b
            }
            (Some(&a), None) => {
                i += 1;
                a
            }
            (None, Some(&b)) => {
                j += 1;
                b
            }
            (None, None) => break,
        };
        if emitted >= start {
            out.push(next);
        }
        emitted += 1;
    }

    check_postings_sorted(&out);
    (out, total)
}
