//! Runtime contracts for the index structures.
//!
//! Debug-mode assertions over the postings invariants. They compile to
//! nothing in release builds and fail early in tests and debug runs.
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function          | Property                                   |
//! |----------------------------|--------------------------------------------|
//! | `check_postings_sorted`    | ids strictly ascending (sorted + unique)   |
//! | `check_window_within`      | window never exceeds the reported total    |
//! | `check_doc_ids_dense`      | store holds ids `0..n` in order            |

use crate::types::DocId;

// ============================================================================
// COMPILE-TIME ASSERTIONS
// ============================================================================

const _: () = {
    // The query boundary falls back to this page size; a zero default would
    // make every unparameterized query return nothing.
    assert!(crate::config::DEFAULT_LIMIT > 0);
};

// ============================================================================
// POSTINGS CONTRACTS
// ============================================================================

/// Check that a postings list (or a merge output) is strictly ascending.
///
/// # Panics (debug builds only)
/// Panics at the first adjacent pair that is out of order or repeated.
#[inline]
pub fn check_postings_sorted(ids: &[DocId]) {
    if cfg!(debug_assertions) {
        for i in 1..ids.len() {
            debug_assert!(
                ids[i - 1] < ids[i],
                "Contract violation: postings not strictly ascending at {} ({} >= {})",
                i,
                ids[i - 1],
                ids[i]
            );
        }
    }
}

/// Check that a returned window is no larger than its page or the total.
///
/// Does not apply to the empty-operand path of boolean queries, whose window
/// is the other operand's full list.
#[inline]
pub fn check_window_within(window_len: usize, limit: usize, total: usize) {
    debug_assert!(
        window_len <= limit && window_len <= total,
        "Contract violation: window of {} exceeds limit {} or total {}",
        window_len,
        limit,
        total
    );
}

/// Check that the document store is dense: entry `i` was ingested as id `i`.
#[inline]
pub fn check_doc_ids_dense(next_id: u32, stored: usize) {
    debug_assert_eq!(
        next_id as usize, stored,
        "Contract violation: next doc id {} != stored documents {}",
        next_id, stored
    );
}
