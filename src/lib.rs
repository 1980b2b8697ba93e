//! Shortest edit script (SES) computation over generic sequences.
//!
//! This crate implements the classic diff-engine core: given two ordered
//! sequences, it finds the minimal set of element insertions and deletions
//! (plus the matched runs) that transforms one into the other. The search is
//! Myers' O(ND) algorithm in its linear-space, divide-and-conquer form, with
//! a caller-supplied maximum-distance cutoff for early abort.
//!
//! Element representation is entirely the caller's business: the engine only
//! sees sequence lengths and an [`ElementComparer`] that answers equality
//! queries by index, so lines, tokens, bytes, or opaque host objects all
//! work. Rendering the resulting [`EditScript`] as diff text or a patch file
//! is likewise left to the caller.
//!
//! ```
//! use sesdiff::{diff_slices, EditOp};
//!
//! let a: Vec<char> = "ABCABBA".chars().collect();
//! let b: Vec<char> = "CBABAC".chars().collect();
//! let script = diff_slices(&a, &b, None).unwrap();
//!
//! assert_eq!(script.distance(), 5);
//! assert_eq!(script.apply_to(&a, &b), b);
//! assert!(script.edits().iter().any(|e| e.op == EditOp::Match));
//! ```

pub mod edit;
mod frontier;
mod myers;
pub mod sequence;

pub use edit::{DiffError, Edit, EditOp, EditScript, EditScriptBuilder};
pub use sequence::{ElementComparer, SequenceView, SliceComparer};

use logging_timer::time;

/// Compute the shortest edit script transforming the `a` window into the `b`
/// window.
///
/// `max_distance` bounds the edit distance the search will tolerate: `None`
/// means unbounded (the trivial worst case, `a.len() + b.len()`, always
/// suffices), and `Some(k)` makes the computation abort with
/// [`DiffError::DistanceExceeded`] as soon as the true distance is proven to
/// exceed `k`. A bound exactly equal to the true distance succeeds, so
/// `Some(0)` accepts elementwise-equal sequences and nothing else. Small
/// bounds also cap the work done to roughly `O(N * k)`, which is the only
/// runtime-cost control the engine offers.
///
/// On success the returned script is fully coalesced, covers both windows
/// exactly, and replays to the `b` window's contents; on failure nothing is
/// returned, never a partial script.
#[time("debug", "ses::{}")]
pub fn compute_ses<C: ElementComparer>(
    a: SequenceView,
    b: SequenceView,
    comparer: &C,
    max_distance: Option<usize>,
) -> Result<EditScript, DiffError> {
    let mut builder = EditScriptBuilder::new(a.len(), b.len());
    myers::solve(a, b, comparer, effective_bound(a, b, max_distance), &mut builder)?;
    Ok(builder.finish())
}

/// Like [`compute_ses`], but refuses to produce a script with more than
/// `max_edits` coalesced edits, failing with [`DiffError::OutputTooSmall`]
/// instead of truncating.
///
/// This mirrors callers that hand the engine a fixed-size output buffer; a
/// script always fits in `min(a.len(), b.len()) * 2 + 1` edits.
#[time("debug", "ses::{}")]
pub fn compute_ses_with_limit<C: ElementComparer>(
    a: SequenceView,
    b: SequenceView,
    comparer: &C,
    max_distance: Option<usize>,
    max_edits: usize,
) -> Result<EditScript, DiffError> {
    let mut builder = EditScriptBuilder::with_limit(a.len(), b.len(), max_edits);
    myers::solve(a, b, comparer, effective_bound(a, b, max_distance), &mut builder)?;
    Ok(builder.finish())
}

/// Compute only the edit distance between the two windows.
///
/// A single bidirectional search over the whole problem yields the distance
/// without materializing (or even visiting) the individual edits, so this is
/// cheaper than [`compute_ses`] when the script itself is not needed.
#[time("debug", "ses::{}")]
pub fn compute_distance<C: ElementComparer>(
    a: SequenceView,
    b: SequenceView,
    comparer: &C,
    max_distance: Option<usize>,
) -> Result<usize, DiffError> {
    myers::distance(a, b, comparer, effective_bound(a, b, max_distance))
}

/// Diff two in-memory slices using their elements' `PartialEq`.
///
/// Convenience wrapper over [`compute_ses`] with full-sequence windows and a
/// [`SliceComparer`].
pub fn diff_slices<T: PartialEq>(
    a: &[T],
    b: &[T],
    max_distance: Option<usize>,
) -> Result<EditScript, DiffError> {
    let comparer = SliceComparer::new(a, b);
    compute_ses(
        SequenceView::full(a.len()),
        SequenceView::full(b.len()),
        &comparer,
        max_distance,
    )
}

/// Resolve the caller's optional bound to the concrete budget the solver
/// threads through its sub-problems.
fn effective_bound(a: SequenceView, b: SequenceView, max_distance: Option<usize>) -> usize {
    let worst = a.len() + b.len();
    max_distance.map_or(worst, |d| d.min(worst))
}
