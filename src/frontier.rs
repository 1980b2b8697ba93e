//! Diagonal frontier storage for the bidirectional snake search.
//!
//! The middle-snake search indexes its furthest-reach arrays by edit-graph
//! diagonal `k = x - y`, which is signed: forward diagonals are scanned in
//! `[-d, d]` and reverse diagonals in a window centered on `delta = n - m`.
//! Rather than biasing every access by a precomputed offset, the frontier
//! wraps signed diagonals into its backing buffer Python-style, the same
//! trick as a negative-index vector. Wrapping is injective as long as the
//! diagonals touched by one search span at most `slots.len()` values, which
//! the solver guarantees when it sizes the frontier.

use crate::edit::DiffError;

/// A reusable, bounded map from diagonal index to the furthest x-coordinate
/// reached at the current search depth.
///
/// One instance covers one direction (forward or reverse) of the search. The
/// solver owns a pair of these for the duration of a top-level call and
/// resizes them per sub-problem instead of reallocating; the search never
/// reads a slot it has not written or seeded in the current invocation, so
/// stale values from earlier sub-problems are harmless.
#[derive(Debug, Default)]
pub(crate) struct DiagonalFrontier {
    slots: Vec<isize>,
}

impl DiagonalFrontier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make room for at least `diagonals` distinct diagonal indices.
    ///
    /// Grow-only: a larger buffer left over from a previous sub-problem is
    /// kept, since any window of up to `slots.len()` consecutive diagonals
    /// still maps to distinct slots.
    pub fn ensure_diagonals(&mut self, diagonals: usize) -> Result<(), DiffError> {
        if diagonals > self.slots.len() {
            self.slots
                .try_reserve(diagonals - self.slots.len())
                .map_err(DiffError::from)?;
            self.slots.resize(diagonals, 0);
        }
        Ok(())
    }

    /// Resolve a signed diagonal to a slot in the backing buffer.
    fn slot(&self, diagonal: isize) -> usize {
        let len: isize = self
            .slots
            .len()
            .try_into()
            .expect("frontier length exceeds isize::MAX");
        assert!(len > 0, "frontier used before ensure_diagonals");
        diagonal.rem_euclid(len) as usize
    }

    /// The furthest x-coordinate recorded for `diagonal`.
    pub fn get(&self, diagonal: isize) -> isize {
        self.slots[self.slot(diagonal)]
    }

    /// Record the furthest x-coordinate reached on `diagonal`.
    pub fn set(&mut self, diagonal: isize, x: isize) {
        let slot = self.slot(diagonal);
        self.slots[slot] = x;
    }
}
