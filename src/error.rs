// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use thiserror::Error;

/// Main error type for bibdex operations.
///
/// Lookups never fail: an unknown term is an empty result, not an error.
/// Everything here comes from misuse of the paging API or from reading
/// catalog input.
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("invalid page range: start={start}, limit={limit}")]
    InvalidRange { start: i64, limit: i64 },

    #[error("malformed MARC record #{record}: {reason}")]
    Marc { record: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for bibdex operations.
pub type Result<T> = std::result::Result<T, SearchError>;

impl SearchError {
    pub(crate) fn marc(record: usize, reason: impl Into<String>) -> Self {
        SearchError::Marc {
            record,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SearchError::InvalidRange {
            start: -1,
            limit: 50,
        };
        assert_eq!(err.to_string(), "invalid page range: start=-1, limit=50");

        let err = SearchError::marc(3, "directory overruns record");
        assert_eq!(
            err.to_string(),
            "malformed MARC record #3: directory overruns record"
        );
    }

    #[test]
    fn test_io_error_converts() {
        fn open() -> Result<()> {
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"))?;
            Ok(())
        }
        assert!(matches!(open(), Err(SearchError::Io(_))));
    }
}
