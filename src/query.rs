// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query algebra.
//!
//! Three variants, one recursive evaluator:
//!
//! | Variant     | Returned ids                         | `total`                     |
//! |-------------|--------------------------------------|-----------------------------|
//! | `Term`      | full postings list                   | postings size               |
//! | `PagedTerm` | `[start, start + limit)` of postings | postings size               |
//! | `Boolean`   | window of the merge                  | see `Relation`              |
//!
//! Boolean operands are always evaluated unwindowed. If either operand comes
//! back empty, the boolean query returns the other operand's full list and
//! size, for both relations. For `Should` that is the union identity. For
//! `Must` it is not an intersection: `history AND year:2099` returns every
//! `history` document. Existing consumers depend on that, so it stays.

use crate::contracts::check_window_within;
use crate::engine::Engine;
use crate::error::{Result, SearchError};
use crate::postings::{merge_must, merge_should, window};
use crate::types::{DocId, Term};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// How the two operands of a boolean query combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    /// AND. Total is the exact intersection size.
    Must,
    /// OR. Total is the sum of both operand sizes, not the deduplicated union.
    Should,
}

/// A `[start, start + limit)` window over an ordered result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Page {
    pub start: usize,
    pub limit: usize,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            start: 0,
            limit: crate::config::DEFAULT_LIMIT,
        }
    }
}

impl Page {
    pub fn new(start: usize, limit: usize) -> Self {
        Self { start, limit }
    }

    /// Everything from the first id on.
    pub fn unbounded() -> Self {
        Self {
            start: 0,
            limit: usize::MAX,
        }
    }

    /// Fail fast on negative input instead of clamping.
    pub fn checked(start: i64, limit: i64) -> Result<Self> {
        if start < 0 || limit < 0 {
            return Err(SearchError::InvalidRange { start, limit });
        }
        Ok(Self::new(start as usize, limit as usize))
    }

    /// Clamp negative input to zero, the way the query boundary does.
    pub fn clamped(start: i64, limit: i64) -> Self {
        Self::new(start.max(0) as usize, limit.max(0) as usize)
    }
}

/// Evaluated query: the returned ids and the exact match count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation {
    pub ids: Vec<DocId>,
    pub total: usize,
}

impl Evaluation {
    fn full(ids: Cow<'_, [DocId]>) -> Self {
        let ids = ids.into_owned();
        let total = ids.len();
        Self { ids, total }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "type")]
pub enum Query {
    /// One term's full postings list. Mostly used as a boolean operand.
    Term { term: Term },
    /// One term's postings, windowed. Total ignores the window.
    PagedTerm { term: Term, page: Page },
    /// Two operands combined by `relation`, windowed by `page`.
    Boolean {
        left: Box<Query>,
        right: Box<Query>,
        relation: Relation,
        page: Page,
    },
}

impl Query {
    pub fn term(field: impl Into<String>, value: impl Into<String>) -> Self {
        Query::Term {
            term: Term::new(field, value),
        }
    }

    pub fn paged(field: impl Into<String>, value: impl Into<String>, page: Page) -> Self {
        Query::PagedTerm {
            term: Term::new(field, value),
            page,
        }
    }

    pub fn boolean(left: Query, right: Query, relation: Relation, page: Page) -> Self {
        Query::Boolean {
            left: Box::new(left),
            right: Box::new(right),
            relation,
            page,
        }
    }

    pub fn must(left: Query, right: Query, page: Page) -> Self {
        Self::boolean(left, right, Relation::Must, page)
    }

    pub fn should(left: Query, right: Query, page: Page) -> Self {
        Self::boolean(left, right, Relation::Should, page)
    }

    /// Evaluate against the engine's postings.
    ///
    /// Canonical postings are only ever borrowed; every id returned here lives
    /// in a freshly allocated `Vec`.
    pub fn evaluate(&self, engine: &Engine) -> Evaluation {
        match self {
            Query::Term { term } => Evaluation::full(Cow::Borrowed(engine.postings(term))),
            Query::PagedTerm { term, page } => {
                let postings = engine.postings(term);
                let ids = window(postings, page.start, page.limit);
                check_window_within(ids.len(), page.limit, postings.len());
                Evaluation {
                    ids,
                    total: postings.len(),
                }
            }
            Query::Boolean {
                left,
                right,
                relation,
                page,
            } => evaluate_boolean(left, right, *relation, *page, engine),
        }
    }

    /// Full, unwindowed id list of this query when used as an operand.
    ///
    /// Term operands borrow the canonical list; nested boolean operands are
    /// evaluated with an unbounded page.
    fn operand<'e>(&self, engine: &'e Engine) -> Cow<'e, [DocId]> {
        match self {
            Query::Term { term } | Query::PagedTerm { term, .. } => {
                Cow::Borrowed(engine.postings(term))
            }
            Query::Boolean {
                left,
                right,
                relation,
                ..
            } => {
                let nested = evaluate_boolean(left, right, *relation, Page::unbounded(), engine);
                Cow::Owned(nested.ids)
            }
        }
    }
}

fn evaluate_boolean(
    left: &Query,
    right: &Query,
    relation: Relation,
    page: Page,
    engine: &Engine,
) -> Evaluation {
    let left = left.operand(engine);
    let right = right.operand(engine);

    if left.is_empty() {
        return Evaluation::full(right);
    }
    if right.is_empty() {
        return Evaluation::full(left);
    }

    let (ids, total) = match relation {
        Relation::Must => merge_must(&left, &right, page.start, page.limit),
        Relation::Should => merge_should(&left, &right, page.start, page.limit),
    };
    check_window_within(ids.len(), page.limit, total);
    Evaluation { ids, total }
}

/// Query parameters as they arrive from a caller.
///
/// Empty strings count as absent. Negative `start`/`limit` are clamped to 0.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub term: Option<String>,
    #[serde(default)]
    pub year: Option<String>,
    #[serde(default)]
    pub start: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl QueryRequest {
    pub fn new(term: Option<&str>, year: Option<&str>) -> Self {
        Self {
            term: term.map(str::to_string),
            year: year.map(str::to_string),
            start: None,
            limit: None,
        }
    }

    pub fn with_page(mut self, start: i64, limit: i64) -> Self {
        self.start = Some(start);
        self.limit = Some(limit);
        self
    }

    /// Resolve the page, filling gaps from `default_limit`.
    pub fn page(&self, default_limit: usize) -> Page {
        let start = self.start.unwrap_or(0);
        match self.limit {
            Some(limit) => Page::clamped(start, limit),
            None => Page::new(start.max(0) as usize, default_limit),
        }
    }

    /// Build the engine query, or `None` when there is nothing to search for.
    ///
    /// - term only: paged term query on `"term"`
    /// - year only: paged term query on `"year"`
    /// - both: `Must` of `"term"` and `"year"` term queries, paged
    pub fn to_query(&self, default_limit: usize) -> Option<Query> {
        let term = self.term.as_deref().filter(|s| !s.is_empty());
        let year = self.year.as_deref().filter(|s| !s.is_empty());
        let page = self.page(default_limit);

        match (term, year) {
            (None, None) => None,
            (Some(term), None) => Some(Query::paged("term", term, page)),
            (None, Some(year)) => Some(Query::paged("year", year, page)),
            (Some(term), Some(year)) => Some(Query::must(
                Query::term("term", term),
                Query::term("year", year),
                page,
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Document, Field};

    fn doc(term: &[&str], year: i64) -> Document {
        Document::new(vec![
            Field::int("year", year),
            Field::str_list("term", term.iter().copied()),
        ])
    }

    fn engine() -> Engine {
        let mut engine = Engine::new();
        engine.add(doc(&["history"], 1990)); // 0
        engine.add(doc(&["history", "art"], 1991)); // 1
        engine.add(doc(&["art"], 1990)); // 2
        engine.add(doc(&["history"], 1990)); // 3
        engine
    }

    fn ids(raw: &[u32]) -> Vec<DocId> {
        raw.iter().copied().map(DocId).collect()
    }

    #[test]
    fn test_term_query_is_unwindowed() {
        let eval = Query::term("term", "history").evaluate(&engine());
        assert_eq!(eval.ids, ids(&[0, 1, 3]));
        assert_eq!(eval.total, 3);
    }

    #[test]
    fn test_paged_term_total_ignores_window() {
        let engine = engine();
        let eval = Query::paged("term", "history", Page::new(1, 1)).evaluate(&engine);
        assert_eq!(eval.ids, ids(&[1]));
        assert_eq!(eval.total, 3);

        let eval = Query::paged("term", "history", Page::new(3, 5)).evaluate(&engine);
        assert!(eval.ids.is_empty());
        assert_eq!(eval.total, 3);
    }

    #[test]
    fn test_must_intersects() {
        let q = Query::must(
            Query::term("term", "history"),
            Query::term("year", "1990"),
            Page::new(0, 10),
        );
        let eval = q.evaluate(&engine());
        assert_eq!(eval.ids, ids(&[0, 3]));
        assert_eq!(eval.total, 2);
    }

    #[test]
    fn test_must_window_keeps_exact_total() {
        let q = Query::must(
            Query::term("term", "history"),
            Query::term("year", "1990"),
            Page::new(1, 1),
        );
        let eval = q.evaluate(&engine());
        assert_eq!(eval.ids, ids(&[3]));
        assert_eq!(eval.total, 2);
    }

    #[test]
    fn test_should_total_is_operand_sum() {
        let q = Query::should(
            Query::term("term", "history"),
            Query::term("term", "art"),
            Page::new(0, 10),
        );
        let eval = q.evaluate(&engine());
        assert_eq!(eval.ids, ids(&[0, 1, 2, 3]));
        assert_eq!(eval.total, 5);
    }

    #[test]
    fn test_empty_operand_returns_other_side_for_both_relations() {
        let engine = engine();
        for relation in [Relation::Must, Relation::Should] {
            let q = Query::boolean(
                Query::term("term", "history"),
                Query::term("year", "2099"),
                relation,
                Page::new(0, 1),
            );
            let eval = q.evaluate(&engine);
            assert_eq!(eval.ids, ids(&[0, 1, 3]), "{:?}", relation);
            assert_eq!(eval.total, 3);

            let flipped = Query::boolean(
                Query::term("year", "2099"),
                Query::term("term", "history"),
                relation,
                Page::new(0, 1),
            );
            assert_eq!(flipped.evaluate(&engine), eval);
        }
    }

    #[test]
    fn test_both_operands_empty() {
        let q = Query::must(
            Query::term("term", "nothing"),
            Query::term("year", "2099"),
            Page::default(),
        );
        assert_eq!(q.evaluate(&engine()), Evaluation::default());
    }

    #[test]
    fn test_nested_boolean_operand() {
        let inner = Query::should(
            Query::term("year", "1990"),
            Query::term("year", "1991"),
            Page::new(0, 1),
        );
        let q = Query::must(inner, Query::term("term", "art"), Page::new(0, 10));
        let eval = q.evaluate(&engine());
        assert_eq!(eval.ids, ids(&[1, 2]));
        assert_eq!(eval.total, 2);
    }

    #[test]
    fn test_page_checked_rejects_negative() {
        assert!(Page::checked(0, 10).is_ok());
        assert!(matches!(
            Page::checked(-1, 10),
            Err(SearchError::InvalidRange { start: -1, limit: 10 })
        ));
        assert_eq!(Page::clamped(-5, -1), Page::new(0, 0));
    }

    #[test]
    fn test_request_construction_rules() {
        assert_eq!(QueryRequest::default().to_query(50), None);
        assert_eq!(QueryRequest::new(Some(""), Some("")).to_query(50), None);

        assert_eq!(
            QueryRequest::new(Some("history"), None).to_query(50),
            Some(Query::paged("term", "history", Page::new(0, 50)))
        );
        assert_eq!(
            QueryRequest::new(None, Some("1990"))
                .with_page(5, 20)
                .to_query(50),
            Some(Query::paged("year", "1990", Page::new(5, 20)))
        );
        assert_eq!(
            QueryRequest::new(Some("history"), Some("1990")).to_query(50),
            Some(Query::must(
                Query::term("term", "history"),
                Query::term("year", "1990"),
                Page::new(0, 50),
            ))
        );
    }

    #[test]
    fn test_request_clamps_negative_page() {
        let request = QueryRequest::new(Some("history"), None).with_page(-3, -7);
        assert_eq!(request.page(50), Page::new(0, 0));
    }

    #[test]
    fn test_query_serde_shape() {
        let q = Query::paged("term", "history", Page::new(0, 10));
        let json = serde_json::to_value(&q).unwrap();
        assert_eq!(json["type"], "pagedTerm");
        let back: Query = serde_json::from_value(json).unwrap();
        assert_eq!(back, q);
    }
}
