//! Core traits for sieve preprocessing.
//!
//! Discretization methods share one seam: given the observed values of a
//! continuous variable, produce sorted cut points. Turning cut points into
//! interval labels and category codes is common to every method.

/// A method that splits a continuous variable into intervals.
///
/// # Examples
///
/// ```
/// use sieve::preprocessing::EqualWidth;
/// use sieve::traits::Discretization;
///
/// let cuts = EqualWidth::new(2).cut_points(&[0.0, 10.0]);
/// assert_eq!(cuts, vec![5.0]);
/// ```
pub trait Discretization {
    /// Sorted, strictly increasing cut points for the given values.
    ///
    /// `values` holds the non-missing observations in any order. An empty
    /// result means the variable collapses to a single interval.
    fn cut_points(&self, values: &[f64]) -> Vec<f64>;
}
