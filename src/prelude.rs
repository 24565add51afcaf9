//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use sieve::prelude::*;
//! ```

pub use crate::config::{DiscretizeMethod, SieveConfig};
pub use crate::data::{Column, Dataset, Domain, VarRef, Variable};
pub use crate::error::{Result, SieveError};
pub use crate::preprocessing::{discretize, EqualFreq, EqualWidth};
pub use crate::primitives::Matrix;
pub use crate::rank::{RankedPair, Ranking, SieveRank};
pub use crate::sieve::Sieve;
pub use crate::stats::{ChiSqStats, CochranRule, ContingencyTable};
pub use crate::traits::Discretization;
