use super::*;
use crate::data::{Column, Domain, Variable};
use crate::error::SieveError;

/// Dataset whose (a, b) table equals `counts` (row-major, `cols` wide).
fn table_data(counts: &[usize], cols: usize) -> Dataset {
    let rows = counts.len() / cols;
    let mut a = Vec::new();
    let mut b = Vec::new();
    for (cell, &count) in counts.iter().enumerate() {
        for _ in 0..count {
            a.push(Some(cell / cols));
            b.push(Some(cell % cols));
        }
    }
    let domain = Domain::from_attributes(vec![
        Variable::categorical("a", (0..rows).map(|i| format!("a{i}"))),
        Variable::categorical("b", (0..cols).map(|j| format!("b{j}"))),
    ])
    .expect("unique names");
    Dataset::new(domain, vec![Column::Categorical(a), Column::Categorical(b)])
        .expect("consistent columns")
}

fn yn_data() -> Dataset {
    let domain = Domain::from_attributes(vec![
        Variable::categorical("a", ["y", "n"]),
        Variable::categorical("b", ["y", "n", "o"]),
    ])
    .expect("unique names");
    let rows: Vec<[String; 2]> = "yynny"
        .chars()
        .zip("ynyyn".chars())
        .map(|(a, b)| [a.to_string(), b.to_string()])
        .collect();
    Dataset::from_labels(domain, &rows).expect("known labels")
}

#[test]
fn test_two_by_two_statistic() {
    let data = table_data(&[10, 20, 30, 40], 2);
    let chi = ChiSqStats::new(&data, "a", "b").expect("categorical");
    let expected = chi.expected.as_ref().expect("n > 0");
    assert!((expected.get(0, 0) - 12.0).abs() < 1e-12);
    assert!((expected.get(1, 1) - 42.0).abs() < 1e-12);

    let manual = 4.0 / 12.0 + 4.0 / 18.0 + 4.0 / 28.0 + 4.0 / 42.0;
    assert!((chi.chisq - manual).abs() < 1e-12);
    assert_eq!(chi.df, 1);
    assert!(chi.p > 0.3 && chi.p < 0.4);
    assert!(chi.cochran_ok);
}

#[test]
fn test_residual_signs() {
    let data = table_data(&[10, 20, 30, 40], 2);
    let chi = ChiSqStats::new(&data, "a", "b").expect("categorical");
    let residuals = chi.residuals.as_ref().expect("n > 0");
    assert!(residuals.get(0, 0) < 0.0);
    assert!(residuals.get(0, 1) > 0.0);
    assert!((residuals.get(0, 0) + 2.0 / 12.0_f64.sqrt()).abs() < 1e-12);
}

#[test]
fn test_contributions_sum_to_statistic() {
    let data = table_data(&[5, 0, 3, 2, 7, 1], 3);
    let chi = ChiSqStats::new(&data, "a", "b").expect("categorical");
    let total = chi.contributions().expect("n > 0").sum();
    assert!((total - chi.chisq).abs() < 1e-9);
}

#[test]
fn test_sparse_pair_is_finite() {
    let chi = ChiSqStats::new(&yn_data(), "a", "b").expect("categorical");
    assert!(!chi.chisq.is_nan());
    assert!((chi.chisq - 20.0 / 9.0).abs() < 1e-12);
    assert_eq!(chi.df, 2);
    // the "o" column is empty, so expected counts of 0 exist
    assert!(!chi.cochran_ok);
}

#[test]
fn test_zero_expected_cells_contribute_nothing() {
    let chi = ChiSqStats::new(&yn_data(), "a", "b").expect("categorical");
    let expected = chi.expected.as_ref().expect("n > 0");
    let contributions = chi.contributions().expect("n > 0");
    for i in 0..2 {
        assert_eq!(expected.get(i, 2), 0.0);
        assert_eq!(contributions.get(i, 2), 0.0);
    }
    assert!(chi.chisq.is_finite());
}

#[test]
fn test_empty_table_is_nan() {
    let data = table_data(&[0, 0, 0, 0], 2);
    let chi = ChiSqStats::new(&data, "a", "b").expect("categorical");
    assert!(chi.chisq.is_nan());
    assert!(chi.p.is_nan());
    assert!(!chi.is_defined());
    assert!(chi.expected.is_none());
    assert!(chi.residuals.is_none());
    assert!(chi.contributions().is_none());
    assert!(!chi.cochran_ok);
}

#[test]
fn test_variable_without_values_is_nan() {
    let domain = Domain::new(
        vec![Variable::categorical("c1", ["a", "b", "c"])],
        Some(Variable::categorical("cls", Vec::<String>::new())),
        Vec::new(),
    )
    .expect("unique names");
    let data = Dataset::new(
        domain,
        vec![
            Column::Categorical(vec![None; 6]),
            Column::Categorical(vec![Some(1), Some(2), Some(0), Some(1), Some(0), Some(2)]),
        ],
    )
    .expect("consistent columns");
    let chi = ChiSqStats::new(&data, "c1", "cls").expect("categorical");
    assert!(chi.chisq.is_nan());
    assert_eq!(chi.observed.shape(), (3, 0));
}

#[test]
fn test_single_category_axis_is_degenerate() {
    let data = table_data(&[10, 10, 10], 3);
    let chi = ChiSqStats::new(&data, "a", "b").expect("categorical");
    assert_eq!(chi.df, 0);
    assert!(chi.chisq.abs() < 1e-12);
    assert_eq!(chi.p, 1.0);
    assert!(!chi.cochran_ok);

    let lenient = CochranRule::default().with_degenerate_valid(true);
    let chi = ChiSqStats::with_rule(&data, "a", "b", &lenient).expect("categorical");
    assert!(chi.cochran_ok);
}

#[test]
fn test_continuous_variable_rejected() {
    let domain = Domain::from_attributes(vec![
        Variable::continuous("x"),
        Variable::categorical("b", ["y", "n"]),
    ])
    .expect("unique names");
    let data = Dataset::from_labels(domain, &[["1.5", "y"]]).expect("parsable");
    let err = ChiSqStats::new(&data, "x", "b").expect_err("x is continuous");
    assert!(matches!(err, SieveError::NotCategorical { .. }));
}

#[test]
fn test_unknown_variable_rejected() {
    let err = ChiSqStats::new(&yn_data(), "a", "nope").expect_err("no such variable");
    assert!(matches!(err, SieveError::UnknownVariable { .. }));
}

#[test]
fn test_expected_count_on_small_threshold_passes_cochran() {
    // margins 15/234 x 83/166, N = 249: expected counts are exactly 5, 10, 78, 156
    let data = table_data(&[5, 10, 78, 156], 2);
    let chi = ChiSqStats::new(&data, "a", "b").expect("categorical");
    let expected = chi.expected.as_ref().expect("n > 0");
    assert_eq!(expected.as_slice(), &[5.0, 10.0, 78.0, 156.0]);
    assert!(chi.cochran_ok);
    assert_eq!(chi.chisq, 0.0);
}

#[test]
fn test_expected_count_on_min_threshold_passes_cochran() {
    // one row per cell of a 7x7 table: every expected count is exactly 1
    let data = table_data(&[1; 49], 7);
    let rule = CochranRule::default().with_max_small_fraction(1.0);
    let chi = ChiSqStats::with_rule(&data, "a", "b", &rule).expect("categorical");
    let expected = chi.expected.as_ref().expect("n > 0");
    assert!(expected.as_slice().iter().all(|&e| e == 1.0));
    assert!(chi.cochran_ok);
    assert_eq!(chi.chisq, 0.0);
    assert_eq!(chi.p, 1.0);
}
