//! The divide-and-conquer shortest edit script search.
//!
//! This follows Myers' O(ND) algorithm in its linear-space variant: a
//! bidirectional greedy search over edit-graph diagonals locates the middle
//! snake of an optimal path, the problem is split around that snake, and the
//! two halves are solved the same way. Auxiliary space is bounded by the
//! frontier arrays (`O(D)`), not by the problem size.
//!
//! The recursion is driven by an explicit worklist instead of the call
//! stack, so adversarial inputs with deep splits cannot overflow the stack.

use crate::edit::{DiffError, EditOp, EditScriptBuilder};
use crate::frontier::DiagonalFrontier;
use crate::sequence::{ElementComparer, SequenceView};
use log::{debug, trace};

/// A snake through which some optimal edit path is guaranteed to pass.
///
/// `(x, y)` is the snake's start and `(u, v)` its end, both relative to the
/// sub-problem's windows; the run `A[x..u)` matches `B[y..v)` elementwise.
#[derive(Debug, Clone, Copy)]
struct MiddleSnake {
    x: isize,
    y: isize,
    u: isize,
    v: isize,
}

/// A pending sub-window pair with the edit-distance budget it must fit in.
#[derive(Debug, Clone, Copy)]
struct SubProblem {
    a_off: usize,
    a_len: usize,
    b_off: usize,
    b_len: usize,
    budget: usize,
}

/// One unit of work for the solver loop.
///
/// MATCH spans for middle snakes are queued as tasks rather than emitted
/// eagerly so that they land between the two halves they separate, keeping
/// the span stream in position order.
#[derive(Debug, Clone, Copy)]
enum Task {
    Solve(SubProblem),
    EmitMatch { offset: usize, len: usize },
}

/// Compute the shortest edit script for `a` against `b`, streaming raw spans
/// into `builder`.
///
/// `bound` is the maximum admissible edit distance; sequences further apart
/// than that abort with [`DiffError::DistanceExceeded`] without emitting a
/// partial script (the builder contents are discarded by the caller on
/// error).
pub(crate) fn solve<C: ElementComparer>(
    a: SequenceView,
    b: SequenceView,
    comparer: &C,
    bound: usize,
    builder: &mut EditScriptBuilder,
) -> Result<(), DiffError> {
    debug!(
        "solving SES: lenA={}, lenB={}, bound={}",
        a.len(),
        b.len(),
        bound
    );

    let mut forward = DiagonalFrontier::new();
    let mut reverse = DiagonalFrontier::new();
    let mut tasks = vec![Task::Solve(SubProblem {
        a_off: a.offset(),
        a_len: a.len(),
        b_off: b.offset(),
        b_len: b.len(),
        budget: bound,
    })];

    while let Some(task) = tasks.pop() {
        match task {
            Task::EmitMatch { offset, len } => builder.push(EditOp::Match, offset, len)?,
            Task::Solve(sub) => {
                solve_one(sub, comparer, &mut forward, &mut reverse, &mut tasks, builder)?;
            }
        }
    }
    Ok(())
}

/// Compute only the edit distance for `a` against `b`.
///
/// A single middle-snake search over the whole problem already yields the
/// total distance, so no splitting or span emission happens here.
pub(crate) fn distance<C: ElementComparer>(
    a: SequenceView,
    b: SequenceView,
    comparer: &C,
    bound: usize,
) -> Result<usize, DiffError> {
    if a.is_empty() || b.is_empty() {
        let d = a.len() + b.len();
        if d > bound {
            return Err(DiffError::DistanceExceeded { bound });
        }
        return Ok(d);
    }

    let mut forward = DiagonalFrontier::new();
    let mut reverse = DiagonalFrontier::new();
    let (_snake, d) = find_middle_snake(
        comparer,
        a.offset(),
        a.len(),
        b.offset(),
        b.len(),
        bound,
        &mut forward,
        &mut reverse,
    )?;
    Ok(d)
}

/// Resolve a single sub-problem: finish it directly if it is degenerate or
/// within one edit, otherwise split it around its middle snake and queue the
/// halves.
fn solve_one<C: ElementComparer>(
    sub: SubProblem,
    comparer: &C,
    forward: &mut DiagonalFrontier,
    reverse: &mut DiagonalFrontier,
    tasks: &mut Vec<Task>,
    builder: &mut EditScriptBuilder,
) -> Result<(), DiffError> {
    let SubProblem {
        a_off,
        a_len,
        b_off,
        b_len,
        budget,
    } = sub;

    // Degenerate windows never touch the frontier machinery.
    if a_len == 0 && b_len == 0 {
        return Ok(());
    }
    if a_len == 0 {
        if b_len > budget {
            return Err(DiffError::DistanceExceeded { bound: budget });
        }
        return builder.push(EditOp::Insert, b_off, b_len);
    }
    if b_len == 0 {
        if a_len > budget {
            return Err(DiffError::DistanceExceeded { bound: budget });
        }
        return builder.push(EditOp::Delete, a_off, a_len);
    }

    let (snake, d) = find_middle_snake(
        comparer, a_off, a_len, b_off, b_len, budget, forward, reverse,
    )?;
    trace!(
        "sub-problem a=[{}, +{}), b=[{}, +{}): distance {}, snake ({}, {})..({}, {})",
        a_off, a_len, b_off, b_len, d, snake.x, snake.y, snake.u, snake.v
    );

    if d > 1 {
        let (x, y) = (snake.x as usize, snake.y as usize);
        let (u, v) = (snake.u as usize, snake.v as usize);

        // LIFO order: the left half is processed first, then the snake's
        // MATCH span, then the right half. A path with distance d splits
        // into halves of exactly ceil(d/2) and floor(d/2) edits, so those
        // are the budgets the halves get.
        tasks.push(Task::Solve(SubProblem {
            a_off: a_off + u,
            a_len: a_len - u,
            b_off: b_off + v,
            b_len: b_len - v,
            budget: d / 2,
        }));
        if u > x {
            tasks.push(Task::EmitMatch {
                offset: a_off + x,
                len: u - x,
            });
        }
        tasks.push(Task::Solve(SubProblem {
            a_off,
            a_len: x,
            b_off,
            b_len: y,
            budget: d.div_ceil(2),
        }));
        return Ok(());
    }

    if d == 0 {
        // Equal windows; d = 0 forces a_len == b_len.
        return builder.push(EditOp::Match, a_off, a_len);
    }

    // d == 1: the windows differ by exactly one element. Everything outside
    // the longest common prefix and the lone insert/delete matches, so the
    // sub-problem is finished without further splitting.
    debug_assert_eq!(a_len.abs_diff(b_len), 1);
    let prefix = (0..a_len.min(b_len))
        .take_while(|&i| comparer.equal(a_off + i, b_off + i))
        .count();
    builder.push(EditOp::Match, a_off, prefix)?;
    if b_len > a_len {
        builder.push(EditOp::Insert, b_off + prefix, 1)?;
        builder.push(EditOp::Match, a_off + prefix, a_len - prefix)?;
    } else {
        builder.push(EditOp::Delete, a_off + prefix, 1)?;
        builder.push(EditOp::Match, a_off + prefix + 1, b_len - prefix)?;
    }
    Ok(())
}

/// Run the bidirectional greedy search over `A[a_off..a_off+n)` and
/// `B[b_off..b_off+m)`, returning the middle snake and the sub-problem's
/// true edit distance, or [`DiffError::DistanceExceeded`] once the distance
/// is proven to exceed `budget`.
///
/// Both windows must be non-empty. The forward frontier expands from the
/// window origin and the reverse frontier from its far corner; at each depth
/// every reachable diagonal takes one non-diagonal step and then slides
/// along matching elements. The first overlap between the frontiers (odd
/// deltas can only meet after a forward extension, even deltas after a
/// reverse one) pins the middle snake and the distance.
#[allow(clippy::too_many_arguments)]
fn find_middle_snake<C: ElementComparer>(
    comparer: &C,
    a_off: usize,
    n: usize,
    b_off: usize,
    m: usize,
    budget: usize,
    forward: &mut DiagonalFrontier,
    reverse: &mut DiagonalFrontier,
) -> Result<(MiddleSnake, usize), DiffError> {
    debug_assert!(n > 0 && m > 0);

    let n = n as isize;
    let m = m as isize;
    let budget_i = budget as isize;
    let delta = n - m;
    let odd = delta & 1 != 0;
    let mid = (n + m) / 2 + isize::from(odd);

    // The depth loop aborts once 2d - 1 outgrows the budget, so the set of
    // diagonals either direction touches spans at most 2 * depth_cap + 3
    // consecutive values.
    let depth_cap = mid.min(budget_i / 2 + 1);
    let diagonals = (2 * depth_cap + 3) as usize;
    forward.ensure_diagonals(diagonals)?;
    reverse.ensure_diagonals(diagonals)?;

    forward.set(1, 0);
    reverse.set(delta - 1, n);

    for d in 0..=mid {
        // The shallowest distance still discoverable at this depth is
        // 2d - 1; once that exceeds the budget no admissible path exists.
        if 2 * d - 1 > budget_i {
            return Err(DiffError::DistanceExceeded { bound: budget });
        }

        // Forward extension, diagonals scanned high to low.
        let mut k = d;
        while k >= -d {
            let mut x = if k == -d || (k != d && forward.get(k - 1) < forward.get(k + 1)) {
                forward.get(k + 1)
            } else {
                forward.get(k - 1) + 1
            };
            let mut y = x - k;
            let (snake_x, snake_y) = (x, y);

            while x < n && y < m && comparer.equal(a_off + x as usize, b_off + y as usize) {
                x += 1;
                y += 1;
            }
            forward.set(k, x);

            if odd && k >= delta - (d - 1) && k <= delta + (d - 1) && x >= reverse.get(k) {
                debug_assert!((0..=n).contains(&x) && (0..=m).contains(&y));
                return Ok((
                    MiddleSnake {
                        x: snake_x,
                        y: snake_y,
                        u: x,
                        v: y,
                    },
                    (2 * d - 1) as usize,
                ));
            }
            k -= 2;
        }

        // Reverse extension on diagonals centered around delta.
        let mut k = d;
        while k >= -d {
            let kr = delta + k;
            let mut x = if k == d || (k != -d && reverse.get(kr - 1) < reverse.get(kr + 1)) {
                reverse.get(kr - 1)
            } else {
                reverse.get(kr + 1) - 1
            };
            let mut y = x - kr;
            let (snake_u, snake_v) = (x, y);

            while x > 0 && y > 0 && comparer.equal(a_off + (x - 1) as usize, b_off + (y - 1) as usize)
            {
                x -= 1;
                y -= 1;
            }
            reverse.set(kr, x);

            if !odd && kr >= -d && kr <= d && x <= forward.get(kr) {
                let dist = (2 * d) as usize;
                if dist > budget {
                    return Err(DiffError::DistanceExceeded { bound: budget });
                }
                debug_assert!((0..=n).contains(&x) && (0..=m).contains(&y));
                return Ok((
                    MiddleSnake {
                        x,
                        y,
                        u: snake_u,
                        v: snake_v,
                    },
                    dist,
                ));
            }
            k -= 2;
        }
    }

    // An overlap is guaranteed by depth (n + m) / 2 + 1 whenever the budget
    // admits it, so reaching this point means the budget was the blocker.
    Err(DiffError::DistanceExceeded { bound: budget })
}
