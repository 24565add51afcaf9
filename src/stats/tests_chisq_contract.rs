// =========================================================================
// Contract tests for the contingency statistics engine.
//
// Cochran (1954) "Some methods for strengthening the common χ² tests"
// Pearson (1900) "On the criterion that a given system of deviations..."
// =========================================================================

use super::*;
use crate::data::{Dataset, Domain, Variable};

fn abc_domain() -> Domain {
    Domain::from_attributes(vec![
        Variable::categorical("A", ["a1", "a2", "a3"]),
        Variable::categorical("B", ["b1", "b2", "b3"]),
    ])
    .expect("unique names")
}

fn zipped(rows: &[(&str, usize)], cols: &[(&str, usize)]) -> Dataset {
    let expand = |counts: &[(&str, usize)]| -> Vec<String> {
        counts
            .iter()
            .flat_map(|&(label, n)| std::iter::repeat(label.to_string()).take(n))
            .collect()
    };
    let cells: Vec<[String; 2]> = expand(rows)
        .into_iter()
        .zip(expand(cols))
        .map(|(a, b)| [a, b])
        .collect();
    Dataset::from_labels(abc_domain(), &cells).expect("known labels")
}

/// Balanced 3x3 margins give expected counts of 20/3 everywhere: rule holds.
#[test]
fn cochran_passes_on_balanced_margins() {
    let data = zipped(
        &[("a1", 20), ("a2", 20), ("a3", 20)],
        &[("b1", 20), ("b2", 20), ("b3", 20)],
    );
    let chi = ChiSqStats::new(&data, "A", "B").expect("categorical");
    let expected = chi.expected.as_ref().expect("n > 0");
    assert!(expected
        .as_slice()
        .iter()
        .all(|&e| (e - 20.0 / 3.0).abs() < 1e-12));
    assert!(chi.cochran_ok, "balanced 3x3 should satisfy Cochran's rule");
}

/// Margins 10/20/30 against 20/20/20 leave three cells at 10/3 < 5: rule fails.
#[test]
fn cochran_fails_on_skewed_margins() {
    let data = zipped(
        &[("a1", 10), ("a2", 20), ("a3", 30)],
        &[("b1", 20), ("b2", 20), ("b3", 20)],
    );
    let chi = ChiSqStats::new(&data, "A", "B").expect("categorical");
    let expected = chi.expected.as_ref().expect("n > 0");
    let small = expected.as_slice().iter().filter(|&&e| e < 5.0).count();
    assert_eq!(small, 3);
    assert!(!chi.cochran_ok, "3 of 9 small cells should fail Cochran's rule");
    assert!(chi.chisq.is_finite());
}

/// The statistic is zero exactly when observed equals expected.
#[test]
fn chisq_zero_under_exact_independence() {
    let data = zipped(
        &[("a1", 4), ("a2", 4), ("a3", 4)],
        &[
            ("b1", 2),
            ("b2", 2),
            ("b1", 2),
            ("b2", 2),
            ("b1", 2),
            ("b2", 2),
        ],
    );
    let chi = ChiSqStats::new(&data, "A", "B").expect("categorical");
    assert_eq!(chi.chisq, 0.0);
    assert!((chi.p - 1.0).abs() < 1e-12);

    let dependent = zipped(&[("a1", 2), ("a2", 2)], &[("b1", 2), ("b2", 2)]);
    let chi = ChiSqStats::new(&dependent, "A", "B").expect("categorical");
    assert!(chi.chisq > 0.0);
}

/// An empty table yields NaN, never an error.
#[test]
fn empty_table_yields_nan() {
    let data = zipped(&[("?", 5)], &[("b1", 5)]);
    let chi = ChiSqStats::new(&data, "A", "B").expect("categorical");
    assert!(chi.chisq.is_nan());
    assert!(chi.p.is_nan());
}

/// Recomputing on identical inputs gives identical outputs.
#[test]
fn recomputation_is_deterministic() {
    let data = zipped(
        &[("a1", 7), ("a2", 11), ("a3", 5)],
        &[("b3", 9), ("b1", 6), ("b2", 8)],
    );
    let first = ChiSqStats::new(&data, "A", "B").expect("categorical");
    let second = ChiSqStats::new(&data, "A", "B").expect("categorical");
    assert_eq!(first.chisq.to_bits(), second.chisq.to_bits());
    assert_eq!(first.p.to_bits(), second.p.to_bits());
    assert_eq!(first.expected, second.expected);
    assert_eq!(first.residuals, second.residuals);
    assert_eq!(first.observed, second.observed);
    assert_eq!(first.cochran_ok, second.cochran_ok);
}

/// The p-value lies in [0, 1] whenever the statistic is defined.
#[test]
fn pvalue_bounded() {
    let data = zipped(
        &[("a1", 30), ("a2", 1), ("a3", 9)],
        &[("b1", 25), ("b2", 5), ("b3", 10)],
    );
    let chi = ChiSqStats::new(&data, "A", "B").expect("categorical");
    assert!((0.0..=1.0).contains(&chi.p), "p-value={} outside [0,1]", chi.p);
    assert!(chi.chisq >= 0.0);
}
