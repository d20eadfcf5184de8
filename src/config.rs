// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Catalog configuration.
//!
//! Loaded from an optional JSON file, then overridden by CLI flags. Every key
//! is optional; missing keys take the defaults below.

use crate::error::{Result, SearchError};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fs;
use std::path::Path;

/// Page size used when a request carries no `limit`.
pub const DEFAULT_LIMIT: usize = 50;

/// Keywords kept per year in the statistics report.
pub const DEFAULT_KEYWORD_LIMIT: usize = 100;

/// How catalog input files are encoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    /// ISO 2709 binary records.
    #[default]
    Marc,
    /// A JSON array of book records.
    Json,
}

/// Character set of MARC field data.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// Chinese national standard; a superset of GBK and ASCII.
    #[default]
    Gb18030,
    Utf8,
}

impl TextEncoding {
    /// Decode field bytes. Malformed sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> Cow<'_, str> {
        let encoding = match self {
            TextEncoding::Gb18030 => encoding_rs::GB18030,
            TextEncoding::Utf8 => encoding_rs::UTF_8,
        };
        encoding.decode_without_bom_handling(bytes).0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    pub default_limit: usize,
    pub keyword_limit: usize,
    /// Bytes discarded after every MARC record separator.
    pub skip: usize,
    pub input_format: InputFormat,
    pub encoding: TextEncoding,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            keyword_limit: DEFAULT_KEYWORD_LIMIT,
            skip: 0,
            input_format: InputFormat::Marc,
            encoding: TextEncoding::Gb18030,
        }
    }
}

impl CatalogConfig {
    /// Read a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: CatalogConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_limit == 0 {
            return Err(SearchError::Config(
                "defaultLimit must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
