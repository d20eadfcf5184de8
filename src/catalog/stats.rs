// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Per-year statistics: how many books, and which subject terms dominate.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCount {
    pub value: String,
    pub count: usize,
}

/// One row of the report. `year` is serialized as a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct YearStat {
    #[serde(serialize_with = "serialize_year")]
    pub year: i32,
    pub quantity: usize,
    pub keywords: Vec<WordCount>,
}

fn serialize_year<S: serde::Serializer>(year: &i32, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(year)
}

#[derive(Debug, Clone, Default)]
struct YearBucket {
    quantity: usize,
    words: HashMap<String, usize>,
}

/// Accumulates counts as records are added.
#[derive(Debug, Clone, Default)]
pub struct YearStats {
    years: BTreeMap<i32, YearBucket>,
}

impl YearStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one book published in `year` with the given subject terms.
    pub fn record<'a, I>(&mut self, year: i32, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let bucket = self.years.entry(year).or_default();
        bucket.quantity += 1;
        for term in terms {
            *bucket.words.entry(term.to_string()).or_insert(0) += 1;
        }
    }

    pub fn years(&self) -> usize {
        self.years.len()
    }

    /// Rows sorted by year, keywords by count descending (ties by value),
    /// at most `keyword_limit` keywords per year.
    pub fn report(&self, keyword_limit: usize) -> Vec<YearStat> {
        self.years
            .iter()
            .map(|(&year, bucket)| {
                let mut keywords: Vec<WordCount> = bucket
                    .words
                    .iter()
                    .map(|(value, &count)| WordCount {
                        value: value.clone(),
                        count,
                    })
                    .collect();
                keywords.sort_by(|a, b| {
                    b.count.cmp(&a.count).then_with(|| a.value.cmp(&b.value))
                });
                keywords.truncate(keyword_limit);
                YearStat {
                    year,
                    quantity: bucket.quantity,
                    keywords,
                }
            })
            .collect()
    }
}
