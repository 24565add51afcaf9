//! Discretization of continuous variables.
//!
//! Contingency analysis only works on categorical columns. This module turns
//! every continuous column of a dataset into interval categories, leaving
//! categorical columns untouched. Constant columns are kept as a single
//! category rather than dropped, so one-row datasets still tabulate.
//!
//! # Example
//!
//! ```
//! use sieve::data::{Dataset, Domain, Variable};
//! use sieve::preprocessing::{discretize, EqualFreq};
//!
//! let domain = Domain::from_attributes(vec![Variable::continuous("x")]).expect("unique names");
//! let rows: Vec<[String; 1]> = (1..=8).map(|v| [v.to_string()]).collect();
//! let data = Dataset::from_labels(domain, &rows).expect("numbers parse");
//!
//! let discrete = discretize(&data, &EqualFreq::new(4)).expect("discretizes");
//! let x = discrete.variable("x").expect("kept");
//! assert_eq!(x.values(), &["< 2.5", "2.5 - 4.5", "4.5 - 6.5", "≥ 6.5"]);
//! ```

use crate::data::{Column, Dataset, Variable};
use crate::error::Result;
use crate::traits::Discretization;
use serde::{Deserialize, Serialize};

/// Default number of intervals.
pub const DEFAULT_BINS: usize = 4;

/// Equal-frequency discretization.
///
/// Places cut points so that each interval holds roughly the same number of
/// observations. When there are no more distinct values than intervals,
/// every distinct value gets its own interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualFreq {
    n: usize,
}

impl Default for EqualFreq {
    fn default() -> Self {
        Self::new(DEFAULT_BINS)
    }
}

impl EqualFreq {
    /// Creates a discretizer producing at most `n` intervals.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }

    #[must_use]
    pub fn n(&self) -> usize {
        self.n
    }
}

impl Discretization for EqualFreq {
    fn cut_points(&self, values: &[f64]) -> Vec<f64> {
        split_eq_freq(&distribution(values), self.n)
    }
}

/// Equal-width discretization between the observed minimum and maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EqualWidth {
    n: usize,
}

impl Default for EqualWidth {
    fn default() -> Self {
        Self::new(DEFAULT_BINS)
    }
}

impl EqualWidth {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self { n }
    }
}

impl Discretization for EqualWidth {
    fn cut_points(&self, values: &[f64]) -> Vec<f64> {
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if self.n < 2 || min >= max {
            return Vec::new();
        }
        let width = (max - min) / self.n as f64;
        (1..self.n).map(|k| min + width * k as f64).collect()
    }
}

/// Sorted distinct values with their counts.
fn distribution(values: &[f64]) -> Vec<(f64, f64)> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(f64::total_cmp);

    let mut dist: Vec<(f64, f64)> = Vec::new();
    for v in sorted {
        match dist.last_mut() {
            Some((last, count)) if *last == v => *count += 1.0,
            _ => dist.push((v, 1.0)),
        }
    }
    dist
}

/// Greedy equal-frequency split over a value distribution.
///
/// Each interval targets `remaining / intervals_left` observations. When a
/// value overshoots the target by less than half its own count, the cut goes
/// after it; otherwise before it.
fn split_eq_freq(dist: &[(f64, f64)], n: usize) -> Vec<f64> {
    if n >= dist.len() {
        return dist.windows(2).map(|w| (w[0].0 + w[1].0) / 2.0).collect();
    }

    let mut remaining: f64 = dist.iter().map(|&(_, k)| k).sum();
    let mut to_go = n as f64;
    let mut in_this = 0.0;
    let mut prev = dist[0].0;
    let mut in_one = remaining / to_go;
    let mut points: Vec<f64> = Vec::with_capacity(n.saturating_sub(1));

    for (i, &(v, k)) in dist.iter().enumerate() {
        if to_go <= 1.0 {
            break;
        }
        in_this += k;
        if in_this < in_one || i == 0 {
            prev = v;
            continue;
        }
        if i + 1 < dist.len() && in_this - in_one < k / 2.0 {
            let next = dist[i + 1].0;
            points.push((v + next) / 2.0);
            remaining -= in_this;
            in_this = 0.0;
            prev = next;
        } else {
            points.push((prev + v) / 2.0);
            remaining -= in_this - k;
            in_this = k;
            prev = v;
        }
        to_go -= 1.0;
        if to_go > 0.0 {
            in_one = remaining / to_go;
        }
    }

    points.dedup();
    points
}

/// Formats a cut point with at most three decimals.
fn format_cut(value: f64) -> String {
    let s = format!("{value:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Interval labels for sorted cut points.
///
/// With no cut points the single interval is labelled `fallback`.
#[must_use]
pub fn interval_labels(cuts: &[f64], fallback: &str) -> Vec<String> {
    if cuts.is_empty() {
        return vec![fallback.to_string()];
    }
    let formatted: Vec<String> = cuts.iter().map(|&c| format_cut(c)).collect();
    let mut labels = Vec::with_capacity(cuts.len() + 1);
    labels.push(format!("< {}", formatted[0]));
    for w in formatted.windows(2) {
        labels.push(format!("{} - {}", w[0], w[1]));
    }
    labels.push(format!("≥ {}", formatted[formatted.len() - 1]));
    labels
}

/// Interval code of `value`: the number of cut points not above it.
#[must_use]
pub fn interval_of(cuts: &[f64], value: f64) -> usize {
    cuts.partition_point(|&c| c <= value)
}

/// Discretizes one continuous column into a categorical variable and codes.
#[must_use]
pub fn discretize_column(
    name: &str,
    values: &[Option<f64>],
    method: &dyn Discretization,
) -> (Variable, Vec<Option<usize>>) {
    let observed: Vec<f64> = values.iter().flatten().copied().collect();
    let cuts = method.cut_points(&observed);
    let variable = Variable::categorical(name, interval_labels(&cuts, name));
    let codes = values
        .iter()
        .map(|v| v.map(|x| interval_of(&cuts, x)))
        .collect();
    (variable, codes)
}

/// Discretizes every continuous column in every role.
///
/// Categorical columns pass through unchanged; missing values stay missing.
///
/// # Errors
///
/// Returns an error only if the rebuilt dataset is inconsistent, which
/// indicates a bug in the method's cut points.
pub fn discretize(data: &Dataset, method: &dyn Discretization) -> Result<Dataset> {
    let mut columns = Vec::with_capacity(data.columns().len());
    let mut variables = Vec::with_capacity(data.columns().len());

    for (var, column) in data.domain().variables().zip(data.columns()) {
        match column {
            Column::Continuous(values) => {
                let (variable, codes) = discretize_column(var.name(), values, method);
                tracing::debug!(
                    variable = var.name(),
                    intervals = variable.n_values(),
                    "discretized continuous variable"
                );
                variables.push(variable);
                columns.push(Column::Categorical(codes));
            }
            Column::Categorical(_) => {
                variables.push(var.clone());
                columns.push(column.clone());
            }
        }
    }

    let mut replacements = variables.into_iter();
    let domain = data
        .domain()
        .map_variables(|old| replacements.next().unwrap_or_else(|| old.clone()))?;
    Dataset::with_n_rows(domain, columns, data.n_rows())
}
