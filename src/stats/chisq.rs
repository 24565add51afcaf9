//! Chi-square statistics of a contingency table.

use super::{chi2_sf, CochranRule, ContingencyTable};
use crate::data::{Dataset, VarRef};
use crate::error::Result;
use crate::primitives::Matrix;

/// Chi-square test of independence between two categorical variables.
///
/// Computed once per (dataset, X, Y) pair and never mutated. When no row
/// contributes (N = 0), `chisq` and `p` are NaN and `expected`/`residuals`
/// are `None`; this is a result, not an error.
#[derive(Debug, Clone)]
pub struct ChiSqStats {
    /// Observed counts with margins.
    pub observed: ContingencyTable,

    /// Expected counts under independence (`None` when N = 0).
    pub expected: Option<Matrix<f64>>,

    /// Signed residuals (O − E) / √E; zero where E = 0.
    pub residuals: Option<Matrix<f64>>,

    /// Chi-square statistic Σ (O − E)² / E, or NaN when N = 0.
    pub chisq: f64,

    /// Degrees of freedom (r − 1)(c − 1).
    pub df: usize,

    /// P(χ²_df ≥ chisq), or NaN when N = 0.
    pub p: f64,

    /// Whether Cochran's rule holds for the expected counts.
    pub cochran_ok: bool,
}

impl ChiSqStats {
    /// Computes statistics for two categorical variables with the default
    /// Cochran rule.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable does not resolve or is continuous.
    pub fn new(data: &Dataset, x: impl Into<VarRef>, y: impl Into<VarRef>) -> Result<Self> {
        Self::with_rule(data, x, y, &CochranRule::default())
    }

    /// Computes statistics for two categorical variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable does not resolve or is continuous.
    pub fn with_rule(
        data: &Dataset,
        x: impl Into<VarRef>,
        y: impl Into<VarRef>,
        rule: &CochranRule,
    ) -> Result<Self> {
        let table = ContingencyTable::from_dataset(data, x, y)?;
        Ok(Self::from_table(table, rule))
    }

    /// Computes statistics from an already built table.
    #[must_use]
    pub fn from_table(observed: ContingencyTable, rule: &CochranRule) -> Self {
        let (rows, cols) = observed.shape();
        let df = rows.saturating_sub(1) * cols.saturating_sub(1);
        let expected = observed.expected();
        let cochran_ok = rule.evaluate(observed.is_degenerate(), expected.as_ref());

        let Some(exp) = expected else {
            return Self {
                observed,
                expected: None,
                residuals: None,
                chisq: f64::NAN,
                df,
                p: f64::NAN,
                cochran_ok,
            };
        };

        let obs = observed.observed();
        let residuals = Matrix::from_fn(rows, cols, |i, j| {
            let e = exp.get(i, j);
            if e == 0.0 {
                0.0
            } else {
                (obs.get(i, j) - e) / e.sqrt()
            }
        });
        let chisq: f64 = obs
            .as_slice()
            .iter()
            .zip(exp.as_slice())
            .map(|(&o, &e)| if e == 0.0 { 0.0 } else { (o - e).powi(2) / e })
            .sum();
        let p = chi2_sf(chisq, df);

        tracing::debug!(
            x = observed.x().name(),
            y = observed.y().name(),
            chisq,
            df,
            p,
            cochran_ok,
            "computed chi-square statistics"
        );

        Self {
            observed,
            expected: Some(exp),
            residuals: Some(residuals),
            chisq,
            df,
            p,
            cochran_ok,
        }
    }

    /// True when the statistic is a number, i.e. at least one row was counted.
    #[must_use]
    pub fn is_defined(&self) -> bool {
        !self.chisq.is_nan()
    }

    /// Per-cell contributions (O − E)² / E to the statistic.
    #[must_use]
    pub fn contributions(&self) -> Option<Matrix<f64>> {
        self.residuals.as_ref().map(|r| r.map(|v| v * v))
    }

    /// Grand total of counted rows.
    #[must_use]
    pub fn n(&self) -> f64 {
        self.observed.n()
    }
}

#[cfg(test)]
#[path = "chisq_tests.rs"]
mod tests;
