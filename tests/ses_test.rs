use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;
use sesdiff::{
    DiffError, Edit, EditOp, SequenceView, SliceComparer, compute_distance, compute_ses,
    compute_ses_with_limit, diff_slices,
};
use test_case::test_case;

/// Reference edit distance via the longest-common-subsequence DP:
/// distance = n + m - 2 * LCS(a, b).
fn dp_distance(a: &[u8], b: &[u8]) -> usize {
    let (n, m) = (a.len(), b.len());
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in 1..=n {
        for j in 1..=m {
            lcs[i][j] = if a[i - 1] == b[j - 1] {
                lcs[i - 1][j - 1] + 1
            } else {
                lcs[i - 1][j].max(lcs[i][j - 1])
            };
        }
    }
    n + m - 2 * lcs[n][m]
}

fn check_invariants(script: &sesdiff::EditScript, a_len: usize, b_len: usize) {
    let match_len: usize = script
        .iter()
        .filter(|e| e.op == EditOp::Match)
        .map(|e| e.len)
        .sum();
    let delete_len: usize = script
        .iter()
        .filter(|e| e.op == EditOp::Delete)
        .map(|e| e.len)
        .sum();
    let insert_len: usize = script
        .iter()
        .filter(|e| e.op == EditOp::Insert)
        .map(|e| e.len)
        .sum();

    assert_eq!(match_len + delete_len, a_len, "A window must be covered");
    assert_eq!(match_len + insert_len, b_len, "B window must be covered");
    assert_eq!(script.distance(), delete_len + insert_len);
    assert!(script.iter().all(|e| e.len > 0), "no zero-length edits");
    assert!(
        script.edits().windows(2).all(|w| w[0].op != w[1].op),
        "script must be fully coalesced"
    );
}

#[test_case("", "" ; "both empty")]
#[test_case("abc", "abc" ; "identical")]
#[test_case("abc", "" ; "delete everything")]
#[test_case("", "xyz" ; "insert everything")]
#[test_case("ABCABBA", "CBABAC" ; "myers paper example")]
#[test_case("ac", "abc" ; "single middle insert")]
#[test_case("abc", "ac" ; "single middle delete")]
#[test_case("mississippi", "miss a step" ; "mixed edits")]
fn round_trip(a: &str, b: &str) {
    let script = diff_slices(a.as_bytes(), b.as_bytes(), None).unwrap();
    check_invariants(&script, a.len(), b.len());
    assert_eq!(script.apply_to(a.as_bytes(), b.as_bytes()), b.as_bytes());
    assert_eq!(script.distance(), dp_distance(a.as_bytes(), b.as_bytes()));
}

#[test]
fn both_empty_yields_empty_script() {
    let script = diff_slices::<u8>(&[], &[], None).unwrap();
    assert!(script.is_empty());
    assert_eq!(script.distance(), 0);
}

#[test]
fn identity_is_a_single_match() {
    let script = diff_slices(b"abc", b"abc", None).unwrap();
    assert_eq!(
        script.edits(),
        &[Edit {
            op: EditOp::Match,
            offset: 0,
            len: 3
        }]
    );
    assert_eq!(script.distance(), 0);
}

#[test]
fn one_sided_windows_yield_single_edits() {
    let script = diff_slices(b"abc", b"", None).unwrap();
    assert_eq!(
        script.edits(),
        &[Edit {
            op: EditOp::Delete,
            offset: 0,
            len: 3
        }]
    );
    assert_eq!(script.distance(), 3);

    let script = diff_slices(b"", b"xyz", None).unwrap();
    assert_eq!(
        script.edits(),
        &[Edit {
            op: EditOp::Insert,
            offset: 0,
            len: 3
        }]
    );
    assert_eq!(script.distance(), 3);
}

#[test]
fn total_mismatch_is_delete_all_insert_all() {
    let script = diff_slices(b"abc", b"xyz", None).unwrap();
    assert_eq!(script.distance(), 6);
    assert_eq!(script.len(), 2);

    let mut ops: Vec<(EditOp, usize)> = script.iter().map(|e| (e.op, e.len)).collect();
    ops.sort_by_key(|(op, _)| *op == EditOp::Insert);
    assert_eq!(ops, vec![(EditOp::Delete, 3), (EditOp::Insert, 3)]);
    assert_eq!(script.apply_to(b"abc", b"xyz"), b"xyz".to_vec());
}

#[test]
fn myers_paper_example_distance() {
    let script = diff_slices(b"ABCABBA", b"CBABAC", None).unwrap();
    assert_eq!(script.distance(), 5);
    assert_eq!(script.apply_to(b"ABCABBA", b"CBABAC"), b"CBABAC".to_vec());
}

#[test]
fn zero_bound_accepts_equal_sequences() {
    let script = diff_slices(b"abc", b"abc", Some(0)).unwrap();
    assert_eq!(script.distance(), 0);
}

#[test]
fn zero_bound_rejects_unequal_sequences() {
    let err = diff_slices(b"abc", b"abd", Some(0)).unwrap_err();
    assert_eq!(err, DiffError::DistanceExceeded { bound: 0 });
}

#[test]
fn bound_below_distance_fails() {
    let err = diff_slices(b"abc", b"xyz", Some(2)).unwrap_err();
    assert!(matches!(err, DiffError::DistanceExceeded { .. }));
}

#[rstest]
#[case(b"ABCABBA".as_slice(), b"CBABAC".as_slice())]
#[case(b"abc".as_slice(), b"xyz".as_slice())]
#[case(b"ac".as_slice(), b"abc".as_slice())]
#[case(b"same".as_slice(), b"same".as_slice())]
fn bounded_failure_is_monotonic(#[case] a: &[u8], #[case] b: &[u8]) {
    let unbounded = diff_slices(a, b, None).unwrap();
    let true_distance = unbounded.distance();

    // Any bound at or above the true distance reproduces the same script.
    for bound in true_distance..true_distance + 3 {
        let script = diff_slices(a, b, Some(bound)).unwrap();
        assert_eq!(script, unbounded);
    }
    // Every bound below it fails.
    for bound in 0..true_distance {
        let err = diff_slices(a, b, Some(bound)).unwrap_err();
        assert!(matches!(err, DiffError::DistanceExceeded { .. }));
    }
}

#[test]
fn windowed_diff_uses_absolute_offsets() {
    // Diff "abc" (inside a larger A) against "ab" (inside a larger B).
    let a = b"XXabcY";
    let b = b"abZ";
    let view_a = SequenceView::new(2, 3, a.len()).unwrap();
    let view_b = SequenceView::new(0, 2, b.len()).unwrap();
    let comparer = SliceComparer::new(a.as_slice(), b.as_slice());

    let script = compute_ses(view_a, view_b, &comparer, None).unwrap();
    assert_eq!(script.distance(), 1);
    assert_eq!(
        script.edits(),
        &[
            Edit {
                op: EditOp::Match,
                offset: 2,
                len: 2
            },
            Edit {
                op: EditOp::Delete,
                offset: 4,
                len: 1
            },
        ]
    );
}

#[test]
fn out_of_bounds_window_is_rejected() {
    assert!(matches!(
        SequenceView::new(3, 4, 5),
        Err(DiffError::WindowOutOfBounds {
            offset: 3,
            len: 4,
            extent: 5
        })
    ));
}

#[test]
fn edit_limit_is_enforced() {
    // "abc" -> "ayc" coalesces to MATCH, DELETE, INSERT, MATCH.
    let a = b"abc";
    let b = b"ayc";
    let comparer = SliceComparer::new(a.as_slice(), b.as_slice());
    let view_a = SequenceView::full(a.len());
    let view_b = SequenceView::full(b.len());

    let script = compute_ses_with_limit(view_a, view_b, &comparer, None, 4).unwrap();
    assert_eq!(script.len(), 4);

    let err = compute_ses_with_limit(view_a, view_b, &comparer, None, 3).unwrap_err();
    assert_eq!(err, DiffError::OutputTooSmall { limit: 3 });
}

#[test]
fn distance_only_matches_full_computation() {
    for (a, b) in [
        (b"ABCABBA".as_slice(), b"CBABAC".as_slice()),
        (b"abc".as_slice(), b"xyz".as_slice()),
        (b"".as_slice(), b"xyz".as_slice()),
        (b"abc".as_slice(), b"".as_slice()),
        (b"same".as_slice(), b"same".as_slice()),
    ] {
        let comparer = SliceComparer::new(a, b);
        let script = diff_slices(a, b, None).unwrap();
        let distance = compute_distance(
            SequenceView::full(a.len()),
            SequenceView::full(b.len()),
            &comparer,
            None,
        )
        .unwrap();
        assert_eq!(distance, script.distance());
    }
}

#[test]
fn distance_only_honors_bound() {
    let comparer = SliceComparer::new(b"abc".as_slice(), b"xyz".as_slice());
    let err = compute_distance(
        SequenceView::full(3),
        SequenceView::full(3),
        &comparer,
        Some(2),
    )
    .unwrap_err();
    assert_eq!(err, DiffError::DistanceExceeded { bound: 2 });
}

#[test]
fn scripts_serialize_to_json() {
    let script = diff_slices(b"ac", b"abc", None).unwrap();
    let json = serde_json::to_string(&script).unwrap();
    assert!(json.contains("\"match\""));
    assert!(json.contains("\"insert\""));

    let edit: Edit = serde_json::from_str(r#"{"op":"delete","offset":4,"len":2}"#).unwrap();
    assert_eq!(
        edit,
        Edit {
            op: EditOp::Delete,
            offset: 4,
            len: 2
        }
    );
}

proptest! {
    #[test]
    fn random_sequences_round_trip(
        a in prop::collection::vec(0u8..4, 0..24),
        b in prop::collection::vec(0u8..4, 0..24),
    ) {
        let script = diff_slices(&a, &b, None).unwrap();

        prop_assert_eq!(script.apply_to(&a, &b), b.clone());

        let match_len: usize = script.iter().filter(|e| e.op == EditOp::Match).map(|e| e.len).sum();
        let delete_len: usize = script.iter().filter(|e| e.op == EditOp::Delete).map(|e| e.len).sum();
        let insert_len: usize = script.iter().filter(|e| e.op == EditOp::Insert).map(|e| e.len).sum();
        prop_assert_eq!(match_len + delete_len, a.len());
        prop_assert_eq!(match_len + insert_len, b.len());
        prop_assert!(script.iter().all(|e| e.len > 0));
        prop_assert!(script.edits().windows(2).all(|w| w[0].op != w[1].op));
    }

    #[test]
    fn short_sequences_match_dp_distance(
        a in prop::collection::vec(0u8..3, 0..10),
        b in prop::collection::vec(0u8..3, 0..10),
    ) {
        let script = diff_slices(&a, &b, None).unwrap();
        prop_assert_eq!(script.distance(), dp_distance(&a, &b));

        let comparer = SliceComparer::new(a.as_slice(), b.as_slice());
        let distance = compute_distance(
            SequenceView::full(a.len()),
            SequenceView::full(b.len()),
            &comparer,
            None,
        ).unwrap();
        prop_assert_eq!(distance, script.distance());
    }

    #[test]
    fn exact_bound_succeeds_lower_bound_fails(
        a in prop::collection::vec(0u8..3, 0..10),
        b in prop::collection::vec(0u8..3, 0..10),
    ) {
        let true_distance = dp_distance(&a, &b);

        let bounded = diff_slices(&a, &b, Some(true_distance)).unwrap();
        prop_assert_eq!(bounded.distance(), true_distance);

        if true_distance > 0 {
            let err = diff_slices(&a, &b, Some(true_distance - 1)).unwrap_err();
            let exceeded = matches!(err, DiffError::DistanceExceeded { .. });
            prop_assert!(exceeded, "expected DistanceExceeded, got {:?}", err);
        }
    }

    #[test]
    fn bound_is_exact_on_longer_sequences(
        a in prop::collection::vec(0u8..6, 0..60),
        b in prop::collection::vec(0u8..6, 0..60),
    ) {
        let true_distance = dp_distance(&a, &b);

        let bounded = diff_slices(&a, &b, Some(true_distance)).unwrap();
        prop_assert_eq!(bounded.distance(), true_distance);
        prop_assert_eq!(bounded.apply_to(&a, &b), b.clone());

        if true_distance > 0 {
            let err = diff_slices(&a, &b, Some(true_distance - 1)).unwrap_err();
            let exceeded = matches!(err, DiffError::DistanceExceeded { .. });
            prop_assert!(exceeded, "expected DistanceExceeded, got {:?}", err);
        }
    }
}
