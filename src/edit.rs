//! Edit script types and the builder that coalesces raw spans, plus the
//! error type shared across the crate.

use serde::{Deserialize, Serialize};
use std::collections::TryReserveError;
use thiserror::Error;

/// The kinds of failure a diff computation can report.
///
/// Every failure is terminal for its invocation: no partial script is ever
/// exposed. Callers decide fallback behavior, e.g. treating
/// [`DiffError::DistanceExceeded`] as "replace wholesale".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    #[error("window (offset {offset}, length {len}) exceeds the underlying sequence extent {extent}")]
    WindowOutOfBounds {
        offset: usize,
        len: usize,
        extent: usize,
    },

    /// The true edit distance provably exceeds the caller's bound.
    #[error("edit distance exceeds the requested bound of {bound}")]
    DistanceExceeded { bound: usize },

    /// The coalesced script has more edits than the caller allowed for.
    #[error("coalesced edit script does not fit in the output limit of {limit} edits")]
    OutputTooSmall { limit: usize },

    /// Working memory for the frontier buffers could not be obtained.
    #[error("could not allocate diagonal frontier storage")]
    Allocation(#[from] TryReserveError),
}

/// The operation an [`Edit`] performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EditOp {
    /// The covered elements are unchanged between A and B.
    Match,
    /// The covered elements of A are absent from B.
    Delete,
    /// The covered elements of B are absent from A.
    Insert,
}

/// One coalesced run of a single operation.
///
/// `offset` indexes into A for [`EditOp::Match`] and [`EditOp::Delete`] and
/// into B for [`EditOp::Insert`]. Finished scripts never contain zero-length
/// edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub op: EditOp,
    pub offset: usize,
    pub len: usize,
}

/// A finished, minimal edit script together with its edit distance.
///
/// Invariants, upheld by construction:
/// - edits appear in non-decreasing position order in A, then B;
/// - no two adjacent edits share an operation, and none has length zero;
/// - MATCH + DELETE lengths sum to the A window's length and MATCH + INSERT
///   lengths sum to the B window's length, so replaying the script against A
///   reproduces B exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EditScript {
    edits: Vec<Edit>,
    distance: usize,
}

impl EditScript {
    /// The coalesced edits in replay order.
    #[must_use]
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// The edit distance: the combined element count of all DELETE and
    /// INSERT edits.
    #[must_use]
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// The number of coalesced edits in the script.
    #[must_use]
    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Returns whether the script contains no edits, which happens only when
    /// both input windows were empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edit> {
        self.edits.iter()
    }

    /// Replay the script: copy MATCH runs from `a`, skip DELETE runs, and
    /// splice INSERT runs in from `b`, producing the B window's contents.
    ///
    /// `a` and `b` are the full underlying sequences; edit offsets index
    /// into them directly.
    pub fn apply_to<T: Clone>(&self, a: &[T], b: &[T]) -> Vec<T> {
        let mut out = Vec::new();
        for edit in &self.edits {
            match edit.op {
                EditOp::Match => out.extend_from_slice(&a[edit.offset..edit.offset + edit.len]),
                EditOp::Insert => out.extend_from_slice(&b[edit.offset..edit.offset + edit.len]),
                EditOp::Delete => {}
            }
        }
        out
    }
}

impl<'a> IntoIterator for &'a EditScript {
    type Item = &'a Edit;
    type IntoIter = std::slice::Iter<'a, Edit>;

    fn into_iter(self) -> Self::IntoIter {
        self.edits.iter()
    }
}

/// Accumulates the position-ordered stream of raw MATCH/DELETE/INSERT spans
/// emitted by the solver, merging adjacent spans that share an operation and
/// contiguous source ranges into single [`Edit`] records.
#[derive(Debug)]
pub struct EditScriptBuilder {
    edits: Vec<Edit>,
    limit: Option<usize>,
    a_len: usize,
    b_len: usize,
    matched: usize,
    deleted: usize,
    inserted: usize,
}

impl EditScriptBuilder {
    /// A builder for a diff of an A window of `a_len` elements against a B
    /// window of `b_len` elements, with no limit on the script size.
    pub fn new(a_len: usize, b_len: usize) -> Self {
        Self {
            edits: Vec::new(),
            limit: None,
            a_len,
            b_len,
            matched: 0,
            deleted: 0,
            inserted: 0,
        }
    }

    /// Like [`EditScriptBuilder::new`], but refuses to grow the coalesced
    /// script past `limit` edits.
    pub fn with_limit(a_len: usize, b_len: usize, limit: usize) -> Self {
        Self {
            limit: Some(limit),
            ..Self::new(a_len, b_len)
        }
    }

    /// Append a raw span. Zero-length spans are dropped; a span that
    /// continues the previous edit extends it in place.
    ///
    /// Returns [`DiffError::OutputTooSmall`] if appending would exceed the
    /// configured limit. Spans must arrive in position order; the solver's
    /// emission order guarantees this.
    pub fn push(&mut self, op: EditOp, offset: usize, len: usize) -> Result<(), DiffError> {
        if len == 0 {
            return Ok(());
        }

        match op {
            EditOp::Match => self.matched += len,
            EditOp::Delete => self.deleted += len,
            EditOp::Insert => self.inserted += len,
        }

        if let Some(last) = self.edits.last_mut() {
            // Same-op neighbors are always contiguous in the solver's output,
            // but check anyway so the builder stands on its own.
            if last.op == op && last.offset + last.len == offset {
                last.len += len;
                return Ok(());
            }
        }

        if let Some(limit) = self.limit {
            if self.edits.len() >= limit {
                return Err(DiffError::OutputTooSmall { limit });
            }
        }
        self.edits.push(Edit { op, offset, len });
        Ok(())
    }

    /// The edit distance accumulated so far.
    pub fn distance(&self) -> usize {
        self.deleted + self.inserted
    }

    /// Validate the script invariants and return the finished script.
    pub fn finish(self) -> EditScript {
        debug_assert_eq!(
            self.matched + self.deleted,
            self.a_len,
            "MATCH + DELETE spans must cover the A window"
        );
        debug_assert_eq!(
            self.matched + self.inserted,
            self.b_len,
            "MATCH + INSERT spans must cover the B window"
        );
        debug_assert!(
            self.edits.windows(2).all(|w| w[0].op != w[1].op),
            "adjacent edits must not share an operation"
        );
        debug_assert!(
            self.edits.iter().all(|e| e.len > 0),
            "finished scripts must not contain zero-length edits"
        );

        EditScript {
            edits: self.edits,
            distance: self.deleted + self.inserted,
        }
    }
}
