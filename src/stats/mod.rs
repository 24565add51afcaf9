//! Contingency statistics for a pair of categorical variables.
//!
//! Given a dataset and two categorical variables X and Y this module builds
//! the observed contingency table, the expected counts under independence,
//! the chi-square statistic with per-cell residuals, and Cochran's
//! small-sample validity flag.
//!
//! - [`ContingencyTable`]: observed counts with margins
//! - [`ChiSqStats`]: expected counts, residuals, statistic, p-value
//! - [`CochranRule`]: advisory check on expected counts
//! - [`chi2_sf`]: survival function of the chi-square distribution
//!
//! An empty table (N = 0) is not an error: the statistic is NaN and callers
//! must test for it.
//!
//! # Examples
//!
//! ```
//! use sieve::data::{Dataset, Domain, Variable};
//! use sieve::stats::ChiSqStats;
//!
//! let domain = Domain::from_attributes(vec![
//!     Variable::categorical("a", ["y", "n"]),
//!     Variable::categorical("b", ["y", "n", "o"]),
//! ]).expect("unique names");
//! let rows: Vec<[String; 2]> = "yynny"
//!     .chars()
//!     .zip("ynyyn".chars())
//!     .map(|(a, b)| [a.to_string(), b.to_string()])
//!     .collect();
//! let data = Dataset::from_labels(domain, &rows).expect("known labels");
//!
//! let chi = ChiSqStats::new(&data, "a", "b").expect("both categorical");
//! assert!(!chi.chisq.is_nan());
//! ```

pub mod chisq;
pub mod cochran;
pub mod contingency;
pub mod distribution;

pub use chisq::ChiSqStats;
pub use cochran::CochranRule;
pub use contingency::ContingencyTable;
pub use distribution::{chi2_sf, ln_gamma, regularized_gamma_q};

#[cfg(test)]
#[path = "tests_chisq_contract.rs"]
mod tests_chisq_contract;
