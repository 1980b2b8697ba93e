//! Windows into caller-owned sequences and the equality capability the diff
//! engine consumes.
//!
//! The engine never inspects element content directly. Everything it knows
//! about the sequences flows through an [`ElementComparer`], so elements can
//! be bytes, lines, tokens, or opaque host objects.

use crate::edit::DiffError;

/// A read-only window `(offset, length)` into an externally owned sequence.
///
/// The view does not own any element storage; it only describes which slice
/// of the underlying sequence a diff computation operates on. The invariant
/// `offset + len <= extent` is checked at construction, so a view obtained
/// from [`SequenceView::new`] is always in bounds for the sequence it was
/// built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceView {
    offset: usize,
    len: usize,
}

impl SequenceView {
    /// Create a window over `len` elements starting at `offset` into a
    /// sequence of `extent` total elements.
    ///
    /// Returns [`DiffError::WindowOutOfBounds`] if the window extends past
    /// the end of the underlying sequence.
    pub fn new(offset: usize, len: usize, extent: usize) -> Result<Self, DiffError> {
        match offset.checked_add(len) {
            Some(end) if end <= extent => Ok(Self { offset, len }),
            _ => Err(DiffError::WindowOutOfBounds {
                offset,
                len,
                extent,
            }),
        }
    }

    /// A window spanning an entire sequence of `extent` elements.
    pub fn full(extent: usize) -> Self {
        Self {
            offset: 0,
            len: extent,
        }
    }

    /// The window's starting position in the underlying sequence.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// The number of elements in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns whether the window covers no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// The equality capability supplied by the caller.
///
/// `equal(a_index, b_index)` reports whether the element at `a_index` in the
/// A sequence equals the element at `b_index` in the B sequence. The engine
/// applies the window offsets itself, so both indices are absolute positions
/// into the underlying sequences and always lie within the windows handed to
/// [`compute_ses`](crate::compute_ses).
///
/// Any context the comparison needs (interning tables, case folding rules,
/// host-runtime handles) should be captured by the implementing type rather
/// than threaded through global state, which keeps independent diff
/// invocations freely reentrant.
///
/// Passing indices outside the windows is a caller programming error;
/// implementations are encouraged to index-check so it fails loudly.
pub trait ElementComparer {
    /// Compare the A element at `a_index` with the B element at `b_index`.
    fn equal(&self, a_index: usize, b_index: usize) -> bool;
}

/// Closures of the right shape are comparers, which is convenient for one-off
/// comparisons and tests.
impl<F> ElementComparer for F
where
    F: Fn(usize, usize) -> bool,
{
    fn equal(&self, a_index: usize, b_index: usize) -> bool {
        self(a_index, b_index)
    }
}

/// A comparer over two borrowed slices using the elements' `PartialEq`.
///
/// This is the common case for line or token diffs where both sequences are
/// already materialized in memory.
#[derive(Debug, Clone, Copy)]
pub struct SliceComparer<'a, T> {
    a: &'a [T],
    b: &'a [T],
}

impl<'a, T> SliceComparer<'a, T> {
    pub fn new(a: &'a [T], b: &'a [T]) -> Self {
        Self { a, b }
    }
}

impl<T: PartialEq> ElementComparer for SliceComparer<'_, T> {
    fn equal(&self, a_index: usize, b_index: usize) -> bool {
        self.a[a_index] == self.b[b_index]
    }
}
