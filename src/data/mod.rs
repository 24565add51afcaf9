//! Typed tabular data for contingency analysis.
//!
//! A [`Dataset`] pairs a [`Domain`] with one [`Column`] per variable, stored
//! in domain order (class, attributes, metas). Missing cells are `None`; a
//! missing value is never a category.
//!
//! # Examples
//!
//! ```
//! use sieve::data::{Dataset, Domain, Variable};
//!
//! let domain = Domain::from_attributes(vec![
//!     Variable::categorical("a", ["y", "n"]),
//!     Variable::categorical("b", ["y", "n", "o"]),
//! ]).expect("unique names");
//! let data = Dataset::from_labels(domain, &[["y", "y"], ["n", "?"]]).expect("known labels");
//!
//! let (_, b) = data.categorical("b").expect("b is categorical");
//! assert_eq!(b, &[Some(0), None]);
//! ```

mod variable;

pub use variable::{Domain, Role, VarKind, VarRef, Variable};

use crate::error::{Result, SieveError};
use std::ops::Range;

/// Labels read as missing when parsing cells.
pub const MISSING_LABELS: [&str; 2] = ["?", ""];

/// Values of one variable across all rows.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Category codes indexing into the variable's values.
    Categorical(Vec<Option<usize>>),
    /// Real values.
    Continuous(Vec<Option<f64>>),
}

impl Column {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Categorical(codes) => codes.len(),
            Column::Continuous(values) => values.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the cell at `row` is missing.
    #[must_use]
    pub fn is_missing(&self, row: usize) -> bool {
        match self {
            Column::Categorical(codes) => codes[row].is_none(),
            Column::Continuous(values) => values[row].is_none(),
        }
    }

    fn slice(&self, range: Range<usize>) -> Self {
        match self {
            Column::Categorical(codes) => Column::Categorical(codes[range].to_vec()),
            Column::Continuous(values) => Column::Continuous(values[range].to_vec()),
        }
    }
}

/// A dense table of categorical and continuous columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    domain: Domain,
    columns: Vec<Column>,
    n_rows: usize,
}

impl Dataset {
    /// Creates a dataset from columns given in domain order.
    ///
    /// The row count is taken from the first column, so a dataset without
    /// variables has no rows; use [`Dataset::with_n_rows`] to keep them.
    /// `NaN` in a continuous column is stored as missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the column count or lengths disagree, a column's
    /// kind differs from its variable's, or a code is out of range.
    pub fn new(domain: Domain, columns: Vec<Column>) -> Result<Self> {
        let n_rows = columns.first().map_or(0, Column::len);
        Self::with_n_rows(domain, columns, n_rows)
    }

    /// Creates a dataset with an explicit row count.
    ///
    /// Every column must hold `n_rows` cells. With an empty domain the rows
    /// exist but carry no values.
    ///
    /// # Errors
    ///
    /// Same as [`Dataset::new`].
    pub fn with_n_rows(domain: Domain, mut columns: Vec<Column>, n_rows: usize) -> Result<Self> {
        if columns.len() != domain.len() {
            return Err(SieveError::dimension_mismatch(
                "columns",
                domain.len(),
                columns.len(),
            ));
        }

        for (var, column) in domain.variables().zip(columns.iter_mut()) {
            if column.len() != n_rows {
                return Err(SieveError::DimensionMismatch {
                    expected: format!("{n_rows} rows"),
                    actual: format!("{} rows in column {}", column.len(), var.name()),
                });
            }
            match column {
                Column::Categorical(codes) => {
                    if !var.is_categorical() {
                        return Err(format!(
                            "Column {} holds codes for a continuous variable",
                            var.name()
                        )
                        .into());
                    }
                    let n_values = var.n_values();
                    if let Some(code) = codes.iter().flatten().find(|&&c| c >= n_values) {
                        return Err(format!(
                            "Code {code} out of range for {} ({n_values} values)",
                            var.name()
                        )
                        .into());
                    }
                }
                Column::Continuous(values) => {
                    if var.is_categorical() {
                        return Err(SieveError::NotCategorical {
                            name: var.name().to_string(),
                        });
                    }
                    for value in values.iter_mut() {
                        if value.is_some_and(f64::is_nan) {
                            *value = None;
                        }
                    }
                }
            }
        }

        Ok(Self {
            domain,
            columns,
            n_rows,
        })
    }

    /// Parses rows of string cells, one cell per variable in domain order.
    ///
    /// `"?"` and `""` are missing; continuous cells also accept `"nan"`.
    ///
    /// # Errors
    ///
    /// Returns an error if a row has the wrong width, a categorical label is
    /// unknown, or a continuous cell does not parse.
    pub fn from_labels<R, S>(domain: Domain, rows: &[R]) -> Result<Self>
    where
        R: AsRef<[S]>,
        S: AsRef<str>,
    {
        let mut columns: Vec<Column> = domain
            .variables()
            .map(|var| {
                if var.is_categorical() {
                    Column::Categorical(Vec::with_capacity(rows.len()))
                } else {
                    Column::Continuous(Vec::with_capacity(rows.len()))
                }
            })
            .collect();

        for row in rows {
            let cells: &[S] = row.as_ref();
            if cells.len() != domain.len() {
                return Err(SieveError::dimension_mismatch(
                    "cells per row",
                    domain.len(),
                    cells.len(),
                ));
            }
            for ((var, column), cell) in domain.variables().zip(columns.iter_mut()).zip(cells) {
                let label: &str = cell.as_ref();
                let label = label.trim();
                let missing = MISSING_LABELS.contains(&label);
                match column {
                    Column::Categorical(codes) => {
                        let code = if missing {
                            None
                        } else {
                            Some(var.index_of(label).ok_or_else(|| SieveError::UnknownLabel {
                                variable: var.name().to_string(),
                                label: label.to_string(),
                            })?)
                        };
                        codes.push(code);
                    }
                    Column::Continuous(values) => {
                        let value = if missing {
                            None
                        } else {
                            let v: f64 = label.parse().map_err(|_| SieveError::UnknownLabel {
                                variable: var.name().to_string(),
                                label: label.to_string(),
                            })?;
                            Some(v)
                        };
                        values.push(value);
                    }
                }
            }
        }

        Self::with_n_rows(domain, columns, rows.len())
    }

    #[must_use]
    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Columns in domain order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Looks up a variable.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::UnknownVariable`] if the reference does not resolve.
    pub fn variable(&self, var: impl Into<VarRef>) -> Result<&Variable> {
        let idx = self.domain.resolve(&var.into())?;
        self.domain
            .get(idx)
            .ok_or_else(|| SieveError::unknown_variable(idx.to_string()))
    }

    /// Looks up a column.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::UnknownVariable`] if the reference does not resolve.
    pub fn column(&self, var: impl Into<VarRef>) -> Result<&Column> {
        let idx = self.domain.resolve(&var.into())?;
        Ok(&self.columns[idx])
    }

    /// Returns a categorical variable with its codes.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::NotCategorical`] for a continuous variable, or
    /// [`SieveError::UnknownVariable`] if the reference does not resolve.
    pub fn categorical(&self, var: impl Into<VarRef>) -> Result<(&Variable, &[Option<usize>])> {
        let idx = self.domain.resolve(&var.into())?;
        let variable = self
            .domain
            .get(idx)
            .ok_or_else(|| SieveError::unknown_variable(idx.to_string()))?;
        match &self.columns[idx] {
            Column::Categorical(codes) => Ok((variable, codes)),
            Column::Continuous(_) => Err(SieveError::NotCategorical {
                name: variable.name().to_string(),
            }),
        }
    }

    /// Keeps the rows in `range`, clamped to the table.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Self {
        let end = range.end.min(self.n_rows);
        let start = range.start.min(end);
        Self {
            domain: self.domain.clone(),
            columns: self.columns.iter().map(|c| c.slice(start..end)).collect(),
            n_rows: end - start,
        }
    }

    /// Projects onto a subset of variables, keeping their roles.
    ///
    /// # Errors
    ///
    /// Returns an error if a reference does not resolve or repeats.
    pub fn select(&self, vars: &[VarRef]) -> Result<Self> {
        let indices = vars
            .iter()
            .map(|v| self.domain.resolve(v))
            .collect::<Result<Vec<_>>>()?;
        let domain = self.domain.select(&indices)?;
        let columns = domain
            .variables()
            .map(|var| {
                let idx = self
                    .domain
                    .index_of(var.name())
                    .ok_or_else(|| SieveError::unknown_variable(var.name()))?;
                Ok(self.columns[idx].clone())
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            domain,
            columns,
            n_rows: self.n_rows,
        })
    }
}

#[cfg(test)]
#[path = "data_tests.rs"]
mod tests;
