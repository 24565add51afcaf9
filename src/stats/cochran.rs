//! Cochran's rule for the chi-square approximation.
//!
//! The chi-square distribution only approximates the statistic well when
//! expected counts are not too small. Cochran's rule asks that no expected
//! count falls below 1 and that at most 20% fall below 5. The outcome is
//! advisory; it never changes the statistic.

use crate::error::{Result, SieveError};
use crate::primitives::Matrix;
use serde::{Deserialize, Serialize};

/// Thresholds for Cochran's small-sample rule.
///
/// # Examples
///
/// ```
/// use sieve::primitives::Matrix;
/// use sieve::stats::CochranRule;
///
/// let rule = CochranRule::default();
/// let balanced = Matrix::from_vec(2, 2, vec![6.0, 6.0, 6.0, 6.0]).expect("2x2");
/// assert!(rule.check(&balanced));
///
/// let sparse = Matrix::from_vec(2, 2, vec![0.5, 6.0, 6.0, 6.0]).expect("2x2");
/// assert!(!rule.check(&sparse));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CochranRule {
    /// Every expected count must reach this.
    pub min_expected: f64,
    /// Expected counts below this are "small".
    pub small_expected: f64,
    /// Largest tolerated fraction of small cells.
    pub max_small_fraction: f64,
    /// Outcome reported for degenerate tables (N = 0 or an axis with fewer
    /// than two categories).
    pub degenerate_valid: bool,
}

impl Default for CochranRule {
    fn default() -> Self {
        Self {
            min_expected: 1.0,
            small_expected: 5.0,
            max_small_fraction: 0.2,
            degenerate_valid: false,
        }
    }
}

impl CochranRule {
    /// Creates the textbook rule: all cells ≥ 1, at most 20% below 5.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_min_expected(mut self, min_expected: f64) -> Self {
        self.min_expected = min_expected;
        self
    }

    #[must_use]
    pub fn with_small_expected(mut self, small_expected: f64) -> Self {
        self.small_expected = small_expected;
        self
    }

    #[must_use]
    pub fn with_max_small_fraction(mut self, max_small_fraction: f64) -> Self {
        self.max_small_fraction = max_small_fraction;
        self
    }

    #[must_use]
    pub fn with_degenerate_valid(mut self, degenerate_valid: bool) -> Self {
        self.degenerate_valid = degenerate_valid;
        self
    }

    /// Checks that thresholds are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidHyperparameter`] for a negative or NaN
    /// threshold, or a fraction outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        for (param, value) in [
            ("cochran.min_expected", self.min_expected),
            ("cochran.small_expected", self.small_expected),
        ] {
            if value.is_nan() || value < 0.0 {
                return Err(SieveError::InvalidHyperparameter {
                    param: param.to_string(),
                    value: value.to_string(),
                    constraint: ">= 0".to_string(),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.max_small_fraction) {
            return Err(SieveError::InvalidHyperparameter {
                param: "cochran.max_small_fraction".to_string(),
                value: self.max_small_fraction.to_string(),
                constraint: "in [0, 1]".to_string(),
            });
        }
        Ok(())
    }

    /// Applies the rule to a table of expected counts.
    ///
    /// An empty table is treated as degenerate.
    #[must_use]
    pub fn check(&self, expected: &Matrix<f64>) -> bool {
        let cells = expected.as_slice();
        if cells.is_empty() {
            return self.degenerate_valid;
        }
        if cells.iter().any(|&e| e < self.min_expected) {
            return false;
        }
        let small = cells.iter().filter(|&&e| e < self.small_expected).count();
        small as f64 / cells.len() as f64 <= self.max_small_fraction
    }

    /// Applies the rule, honouring the degenerate convention.
    ///
    /// `expected` is `None` when nothing was counted.
    #[must_use]
    pub fn evaluate(&self, degenerate: bool, expected: Option<&Matrix<f64>>) -> bool {
        match expected {
            Some(expected) if !degenerate => self.check(expected),
            _ => self.degenerate_valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(values: &[f64], cols: usize) -> Matrix<f64> {
        Matrix::from_vec(values.len() / cols, cols, values.to_vec()).expect("rectangular")
    }

    #[test]
    fn test_default_thresholds() {
        let rule = CochranRule::default();
        assert_eq!(rule.min_expected, 1.0);
        assert_eq!(rule.small_expected, 5.0);
        assert_eq!(rule.max_small_fraction, 0.2);
        assert!(!rule.degenerate_valid);
    }

    #[test]
    fn test_exactly_twenty_percent_small_passes() {
        // 1 of 5 cells below 5
        let expected = grid(&[4.0, 5.0, 5.0, 5.0, 5.0], 5);
        assert!(CochranRule::default().check(&expected));
    }

    #[test]
    fn test_more_than_twenty_percent_small_fails() {
        // 2 of 9 cells below 5
        let expected = grid(&[4.0, 4.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0, 6.0], 3);
        assert!(!CochranRule::default().check(&expected));
    }

    #[test]
    fn test_any_cell_below_one_fails() {
        let mut cells = vec![50.0; 25];
        cells[7] = 0.99;
        assert!(!CochranRule::default().check(&grid(&cells, 5)));
    }

    #[test]
    fn test_degenerate_convention() {
        let expected = grid(&[10.0, 10.0], 2);
        let rule = CochranRule::default();
        assert!(!rule.evaluate(true, Some(&expected)));
        assert!(!rule.evaluate(false, None));
        let lenient = rule.with_degenerate_valid(true);
        assert!(lenient.evaluate(true, Some(&expected)));
        assert!(lenient.evaluate(false, None));
        assert!(rule.evaluate(false, Some(&expected)));
    }

    #[test]
    fn test_validate() {
        assert!(CochranRule::default().validate().is_ok());
        assert!(CochranRule::default()
            .with_min_expected(-1.0)
            .validate()
            .is_err());
        assert!(CochranRule::default()
            .with_max_small_fraction(1.5)
            .validate()
            .is_err());
        assert!(CochranRule::default()
            .with_small_expected(f64::NAN)
            .validate()
            .is_err());
    }
}
