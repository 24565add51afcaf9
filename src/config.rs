//! Configuration for the sieve pipeline.
//!
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```
//! use sieve::config::{DiscretizeMethod, SieveConfig};
//!
//! let config = SieveConfig::from_json_str(r#"{ "n_bins": 3, "cochran": { "degenerate_valid": true } }"#)
//!     .expect("valid config");
//! assert_eq!(config.n_bins, 3);
//! assert_eq!(config.method, DiscretizeMethod::EqualFreq);
//! assert!(config.cochran.degenerate_valid);
//! assert_eq!(config.cochran.small_expected, 5.0);
//! ```

use crate::error::{Result, SieveError};
use crate::preprocessing::{EqualFreq, EqualWidth, DEFAULT_BINS};
use crate::stats::CochranRule;
use crate::traits::Discretization;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How continuous variables are split into categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscretizeMethod {
    #[default]
    EqualFreq,
    EqualWidth,
}

/// Settings for discretization and the Cochran check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SieveConfig {
    /// Number of intervals for continuous variables.
    pub n_bins: usize,
    /// Discretization method.
    pub method: DiscretizeMethod,
    /// Thresholds for Cochran's rule.
    pub cochran: CochranRule,
}

impl Default for SieveConfig {
    fn default() -> Self {
        Self {
            n_bins: DEFAULT_BINS,
            method: DiscretizeMethod::default(),
            cochran: CochranRule::default(),
        }
    }
}

impl SieveConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_n_bins(mut self, n_bins: usize) -> Self {
        self.n_bins = n_bins;
        self
    }

    #[must_use]
    pub fn with_method(mut self, method: DiscretizeMethod) -> Self {
        self.method = method;
        self
    }

    #[must_use]
    pub fn with_cochran(mut self, cochran: CochranRule) -> Self {
        self.cochran = cochran;
        self
    }

    /// Checks every field.
    ///
    /// # Errors
    ///
    /// Returns [`SieveError::InvalidHyperparameter`] for fewer than two bins
    /// or an unusable Cochran threshold.
    pub fn validate(&self) -> Result<()> {
        if self.n_bins < 2 {
            return Err(SieveError::InvalidHyperparameter {
                param: "n_bins".to_string(),
                value: self.n_bins.to_string(),
                constraint: ">= 2".to_string(),
            });
        }
        self.cochran.validate()
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or a value is invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes to pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configured discretization method.
    #[must_use]
    pub fn discretizer(&self) -> Box<dyn Discretization> {
        match self.method {
            DiscretizeMethod::EqualFreq => Box::new(EqualFreq::new(self.n_bins)),
            DiscretizeMethod::EqualWidth => Box::new(EqualWidth::new(self.n_bins)),
        }
    }
}
