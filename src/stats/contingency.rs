//! Observed contingency tables.

use crate::data::{Dataset, VarRef, Variable};
use crate::error::{Result, SieveError};
use crate::primitives::Matrix;

/// Cross-tabulation of two categorical variables.
///
/// Rows are indexed by categories of X, columns by categories of Y. Rows of
/// the dataset with a missing value on either axis are not counted.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    x: Variable,
    y: Variable,
    observed: Matrix<f64>,
    row_sums: Vec<f64>,
    col_sums: Vec<f64>,
    n: f64,
}

impl ContingencyTable {
    /// Tabulates two categorical variables of a dataset.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::NotCategorical`] if either variable is
    /// continuous, or [`SieveError::UnknownVariable`] if one does not resolve.
    pub fn from_dataset(
        data: &Dataset,
        x: impl Into<VarRef>,
        y: impl Into<VarRef>,
    ) -> Result<Self> {
        let (x_var, x_codes) = data.categorical(x)?;
        let (y_var, y_codes) = data.categorical(y)?;
        Self::from_codes(x_var, x_codes, y_var, y_codes)
    }

    /// Tabulates paired category codes.
    ///
    /// # Errors
    ///
    /// Returns an error if the code slices differ in length, a variable is
    /// continuous, or a code is out of range for its variable.
    pub fn from_codes(
        x: &Variable,
        x_codes: &[Option<usize>],
        y: &Variable,
        y_codes: &[Option<usize>],
    ) -> Result<Self> {
        for var in [x, y] {
            if !var.is_categorical() {
                return Err(SieveError::NotCategorical {
                    name: var.name().to_string(),
                });
            }
        }
        if x_codes.len() != y_codes.len() {
            return Err(SieveError::dimension_mismatch(
                "paired codes",
                x_codes.len(),
                y_codes.len(),
            ));
        }

        let (n_x, n_y) = (x.n_values(), y.n_values());
        let mut observed = Matrix::zeros(n_x, n_y);
        for (&xi, &yi) in x_codes.iter().zip(y_codes) {
            let (Some(i), Some(j)) = (xi, yi) else {
                continue;
            };
            if i >= n_x || j >= n_y {
                return Err(
                    format!("Category code ({i}, {j}) outside a {n_x}x{n_y} table").into(),
                );
            }
            observed.add_at(i, j, 1.0);
        }

        let row_sums = observed.row_sums();
        let col_sums = observed.col_sums();
        let n: f64 = row_sums.iter().sum();

        tracing::debug!(
            x = x.name(),
            y = y.name(),
            rows = n_x,
            cols = n_y,
            n,
            "built contingency table"
        );

        Ok(Self {
            x: x.clone(),
            y: y.clone(),
            observed,
            row_sums,
            col_sums,
            n,
        })
    }

    /// Variable on the row axis.
    #[must_use]
    pub fn x(&self) -> &Variable {
        &self.x
    }

    /// Variable on the column axis.
    #[must_use]
    pub fn y(&self) -> &Variable {
        &self.y
    }

    /// Observed counts.
    #[must_use]
    pub fn observed(&self) -> &Matrix<f64> {
        &self.observed
    }

    #[must_use]
    pub fn row_sums(&self) -> &[f64] {
        &self.row_sums
    }

    #[must_use]
    pub fn col_sums(&self) -> &[f64] {
        &self.col_sums
    }

    /// Number of counted rows.
    #[must_use]
    pub fn n(&self) -> f64 {
        self.n
    }

    /// (categories of X, categories of Y).
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.observed.shape()
    }

    /// True when nothing was counted or an axis has fewer than two categories.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        let (rows, cols) = self.shape();
        self.n == 0.0 || rows < 2 || cols < 2
    }

    /// Expected counts under independence; `None` when N = 0.
    #[must_use]
    pub fn expected(&self) -> Option<Matrix<f64>> {
        if self.n == 0.0 {
            return None;
        }
        Some(Matrix::outer(&self.row_sums, &self.col_sums, self.n))
    }
}
