//! Core table primitives.
//!
//! Contingency, expected and residual tables are all dense 2D grids
//! indexed by (category of X, category of Y).

mod matrix;

pub use matrix::Matrix;
