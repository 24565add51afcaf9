//! Sieve: contingency statistics for sieve diagrams in pure Rust.
//!
//! A sieve diagram draws the cross-tabulation of two categorical variables,
//! shading each cell by how far its observed count departs from the count
//! expected under independence. This crate computes everything such a view
//! needs: discretized data, observed and expected counts, Pearson residuals,
//! the chi-square test and Cochran's validity check, plus a ranking of
//! variable pairs by dependence.
//!
//! # Quick Start
//!
//! ```
//! use sieve::prelude::*;
//!
//! let domain = Domain::from_attributes(vec![
//!     Variable::categorical("A", ["a1", "a2"]),
//!     Variable::categorical("B", ["b1", "b2"]),
//! ]).unwrap();
//! let data = Dataset::from_labels(domain, &[
//!     ["a1", "b1"], ["a1", "b1"], ["a1", "b2"],
//!     ["a2", "b2"], ["a2", "b2"], ["a2", "b1"],
//! ]).unwrap();
//!
//! let stats = ChiSqStats::new(&data, "A", "B").unwrap();
//! assert_eq!(stats.df, 1);
//! assert!((stats.chisq - 2.0 / 3.0).abs() < 1e-12);
//!
//! let residuals = stats.residuals.as_ref().unwrap();
//! assert!(residuals.get(0, 0) > 0.0);
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Dense `Matrix` used for counts and residuals
//! - [`data`]: Variables, domains and typed datasets
//! - [`preprocessing`]: Discretization of continuous variables
//! - [`stats`]: Contingency tables, chi-square test, Cochran's rule
//! - [`rank`]: Ranking of variable pairs by p-value
//! - [`sieve`]: Headless sieve-diagram state (data, pair, statistics)
//! - [`config`]: JSON-loadable settings

pub mod config;
pub mod data;
pub mod error;
pub mod prelude;
pub mod preprocessing;
pub mod primitives;
pub mod rank;
pub mod sieve;
pub mod stats;
pub mod traits;

pub use error::{Result, SieveError};
pub use primitives::Matrix;
pub use traits::Discretization;
