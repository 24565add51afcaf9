//! Headless state of a sieve diagram.
//!
//! [`Sieve`] holds what a sieve-diagram view needs between redraws: the
//! discretized input data, the selected (X, Y) pair and the statistics for
//! that pair. Rendering and event handling belong to the embedding view.
//!
//! The pair is chosen in one of two modes:
//!
//! - interactive: defaults to the first two variables (class first) and can
//!   be changed with [`Sieve::set_pair`];
//! - feature-driven: an external list of features fixes the pair to its
//!   first two entries and manual changes are refused.
//!
//! # Examples
//!
//! ```
//! use sieve::config::SieveConfig;
//! use sieve::data::{Dataset, Domain, Variable};
//! use sieve::sieve::Sieve;
//!
//! let domain = Domain::new(
//!     vec![Variable::continuous("age")],
//!     Some(Variable::categorical("survived", ["yes", "no"])),
//!     Vec::new(),
//! ).expect("unique names");
//! let data = Dataset::from_labels(domain, &[
//!     ["yes", "12"], ["no", "40"], ["yes", "8"], ["no", "51"],
//! ]).expect("parsable");
//!
//! let mut sieve = Sieve::new(SieveConfig::default()).expect("valid config");
//! sieve.set_data(Some(&data)).expect("discretizes");
//! assert_eq!(sieve.attr_x(), Some("survived"));
//! assert_eq!(sieve.attr_y(), Some("age"));
//!
//! let stats = sieve.update().expect("categorical pair").expect("pair selected");
//! assert!(stats.chisq.is_finite());
//! ```

use crate::config::SieveConfig;
use crate::data::Dataset;
use crate::error::{Result, SieveError};
use crate::preprocessing::discretize;
use crate::rank::{Ranking, SieveRank};
use crate::stats::ChiSqStats;

/// Data, pair selection and statistics of one sieve diagram.
#[derive(Debug, Clone)]
pub struct Sieve {
    config: SieveConfig,
    discrete_data: Option<Dataset>,
    attr_x: Option<String>,
    attr_y: Option<String>,
    features: Option<Vec<String>>,
    stats: Option<ChiSqStats>,
}

impl Sieve {
    /// Creates an empty diagram state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: SieveConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            discrete_data: None,
            attr_x: None,
            attr_y: None,
            features: None,
            stats: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &SieveConfig {
        &self.config
    }

    /// Replaces the input data.
    ///
    /// The data is discretized and the pair reset to the default, or to the
    /// input features when they are set and resolve. `None` clears
    /// everything.
    ///
    /// # Errors
    ///
    /// Returns an error if discretization fails.
    pub fn set_data(&mut self, data: Option<&Dataset>) -> Result<()> {
        self.stats = None;
        self.attr_x = None;
        self.attr_y = None;
        self.discrete_data = None;

        let Some(data) = data else {
            return Ok(());
        };
        let method = self.config.discretizer();
        let discrete = discretize(data, method.as_ref())?;

        {
            let mut names = discrete.domain().variables().map(|v| v.name().to_string());
            self.attr_x = names.next();
            self.attr_y = names.next().or_else(|| self.attr_x.clone());
        }
        self.discrete_data = Some(discrete);

        self.apply_features();
        Ok(())
    }

    /// Discretized copy of the input data.
    #[must_use]
    pub fn discrete_data(&self) -> Option<&Dataset> {
        self.discrete_data.as_ref()
    }

    #[must_use]
    pub fn attr_x(&self) -> Option<&str> {
        self.attr_x.as_deref()
    }

    #[must_use]
    pub fn attr_y(&self) -> Option<&str> {
        self.attr_y.as_deref()
    }

    /// Sets or clears the external feature list.
    ///
    /// With two or more features the pair follows the first two and manual
    /// selection is disabled. `None` returns to interactive mode, keeping the
    /// current pair.
    pub fn set_features(&mut self, features: Option<Vec<String>>) {
        self.features = features.filter(|f| f.len() >= 2);
        self.apply_features();
    }

    /// False while an external feature list drives the pair.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        self.features.is_none()
    }

    fn apply_features(&mut self) {
        let (Some(features), Some(data)) = (&self.features, &self.discrete_data) else {
            return;
        };
        let domain = data.domain();
        if domain.index_of(&features[0]).is_some() && domain.index_of(&features[1]).is_some() {
            self.attr_x = Some(features[0].clone());
            self.attr_y = Some(features[1].clone());
            self.stats = None;
        } else {
            tracing::warn!(
                x = features[0].as_str(),
                y = features[1].as_str(),
                "input features not present in data; keeping current pair"
            );
        }
    }

    /// Selects the pair manually.
    ///
    /// # Errors
    ///
    /// Returns an error if input features drive the pair, no data is set, or
    /// a name is unknown.
    pub fn set_pair(&mut self, x: &str, y: &str) -> Result<()> {
        if !self.is_interactive() {
            return Err("Pair is fixed by input features".into());
        }
        let data = self
            .discrete_data
            .as_ref()
            .ok_or_else(|| SieveError::from("No data"))?;
        for name in [x, y] {
            if data.domain().index_of(name).is_none() {
                return Err(SieveError::unknown_variable(name));
            }
        }
        self.attr_x = Some(x.to_string());
        self.attr_y = Some(y.to_string());
        self.stats = None;
        Ok(())
    }

    /// Recomputes statistics for the current pair.
    ///
    /// Returns `Ok(None)` when no pair is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if a selected variable cannot be tabulated.
    pub fn update(&mut self) -> Result<Option<&ChiSqStats>> {
        let (Some(data), Some(x), Some(y)) = (&self.discrete_data, &self.attr_x, &self.attr_y)
        else {
            self.stats = None;
            return Ok(None);
        };

        let stats = ChiSqStats::with_rule(data, x, y, &self.config.cochran)?;
        if !stats.cochran_ok {
            tracing::warn!(
                x = x.as_str(),
                y = y.as_str(),
                "Cochran's rule not satisfied; chi-square approximation may be unreliable"
            );
        }
        self.stats = Some(stats);
        Ok(self.stats.as_ref())
    }

    /// Statistics from the last [`update`](Self::update).
    #[must_use]
    pub fn stats(&self) -> Option<&ChiSqStats> {
        self.stats.as_ref()
    }

    /// Cochran flag from the last [`update`](Self::update).
    #[must_use]
    pub fn cochran_ok(&self) -> Option<bool> {
        self.stats.as_ref().map(|s| s.cochran_ok)
    }

    /// Ranks all pairs of the discretized data.
    #[must_use]
    pub fn rank(&self) -> Option<Ranking> {
        self.discrete_data
            .as_ref()
            .map(|data| SieveRank::new(data, self.config.cochran).rank())
    }
}
