// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The catalog: book records on top of the index engine.
//!
//! ```text
//!   MARC file ──► marc::Reader ──► BookRecord::from_marc ──┐
//!   JSON file ──► serde_json ─────────────────────────────┤
//!                                                          ▼
//!                                   Catalog::add ──► Engine::add
//!                                        │
//!                                        └──► YearStats::record
//!
//!   QueryRequest ──► Query ──► Engine::find ──► "id" field ──► BookRecord
//! ```

pub mod marc;
pub mod record;
pub mod stats;

use crate::config::{CatalogConfig, InputFormat};
use crate::engine::Engine;
use crate::error::Result;
use crate::query::QueryRequest;
use record::document_record_id;
use serde::Serialize;
use std::io::{BufRead, Read};
use tracing::{debug, info};

pub use record::BookRecord;
pub use stats::{WordCount, YearStat, YearStats};

/// Wire shape of a search response: `{"docs": [...], "total": n}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FindResponse<'a> {
    pub docs: Vec<&'a BookRecord>,
    pub total: usize,
}

impl FindResponse<'_> {
    pub fn empty() -> Self {
        Self {
            docs: Vec::new(),
            total: 0,
        }
    }
}

/// Outcome of loading a catalog file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadSummary {
    pub loaded: usize,
    /// Records dropped during conversion (missing year, title or subject).
    pub skipped: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    config: CatalogConfig,
    engine: Engine,
    /// Position `i` holds the record with catalog id `i + 1`.
    records: Vec<BookRecord>,
    stats: YearStats,
}

impl Catalog {
    pub fn new(config: CatalogConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Add a record, assigning its catalog id (the incoming `id` is ignored).
    pub fn add(&mut self, mut record: BookRecord) -> u32 {
        let id = self.records.len() as u32 + 1;
        record.id = id;
        self.stats
            .record(record.year, record.terms.iter().map(String::as_str));
        self.engine.add(record.to_document());
        self.records.push(record);
        id
    }

    /// Record by catalog id.
    pub fn record(&self, id: u32) -> Option<&BookRecord> {
        let index = usize::try_from(id).ok()?.checked_sub(1)?;
        self.records.get(index)
    }

    /// Ingest a stream in the configured input format.
    pub fn load<R: BufRead>(&mut self, reader: R) -> Result<LoadSummary> {
        match self.config.input_format {
            InputFormat::Marc => {
                let reader = marc::Reader::with_skip(reader, self.config.skip)
                    .with_encoding(self.config.encoding);
                self.load_marc(reader)
            }
            InputFormat::Json => self.load_json(reader),
        }
    }

    /// Ingest every convertible record from a MARC stream.
    pub fn load_marc<R: BufRead>(
        &mut self,
        reader: marc::Reader<R>,
    ) -> Result<LoadSummary> {
        let mut summary = LoadSummary::default();
        for record in reader {
            match BookRecord::from_marc(&record?) {
                Some(book) => {
                    self.add(book);
                    summary.loaded += 1;
                }
                None => summary.skipped += 1,
            }
        }
        info!(
            loaded = summary.loaded,
            skipped = summary.skipped,
            "ingested MARC records"
        );
        Ok(summary)
    }

    /// Ingest a JSON array of records.
    pub fn load_json<R: Read>(&mut self, reader: R) -> Result<LoadSummary> {
        let books: Vec<BookRecord> = serde_json::from_reader(reader)?;
        let loaded = books.len();
        for book in books {
            self.add(book);
        }
        info!(loaded, "ingested JSON records");
        Ok(LoadSummary { loaded, skipped: 0 })
    }

    /// Answer a request. No term and no year means no engine call at all.
    pub fn find(&self, request: &QueryRequest) -> FindResponse<'_> {
        let Some(query) = request.to_query(self.config.default_limit) else {
            debug!("request has neither term nor year");
            return FindResponse::empty();
        };
        debug!(?query, "evaluating");

        let result = self.engine.find(&query);
        let docs = result
            .docs
            .iter()
            .filter_map(|doc| document_record_id(doc))
            .filter_map(|id| self.record(id))
            .collect();
        FindResponse {
            docs,
            total: result.total,
        }
    }

    /// Year statistics capped at the configured keyword limit.
    pub fn year_report(&self) -> Vec<YearStat> {
        self.stats.report(self.config.keyword_limit)
    }

    pub fn stats(&self) -> &YearStats {
        &self.stats
    }
}
