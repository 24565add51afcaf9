//! Ranking of variable pairs by strength of association.
//!
//! Every unordered pair of categorical variables is scored by the p-value
//! of its chi-square test; the most dependent pairs come first. Pairs whose
//! statistic is undefined (nothing counted) score 2.0 so they sort after
//! every real p-value.
//!
//! # Examples
//!
//! ```
//! use sieve::data::{Dataset, Domain, Variable};
//! use sieve::rank::SieveRank;
//! use sieve::stats::CochranRule;
//!
//! let domain = Domain::from_attributes(vec![
//!     Variable::categorical("a", ["0", "1"]),
//!     Variable::categorical("b", ["0", "1"]),
//!     Variable::categorical("c", ["0", "1"]),
//! ]).expect("unique names");
//! let data = Dataset::from_labels(domain, &[
//!     ["0", "0", "1"], ["0", "0", "0"], ["1", "1", "1"], ["1", "1", "0"],
//! ]).expect("known labels");
//!
//! let ranking = SieveRank::new(&data, CochranRule::default()).rank();
//! assert_eq!(ranking.len(), 3);
//! let best = ranking.best().expect("three pairs");
//! assert_eq!((best.x.as_str(), best.y.as_str()), ("a", "b"));
//! ```

use crate::data::Dataset;
use crate::stats::{ChiSqStats, CochranRule, ContingencyTable};

/// Score given to pairs whose p-value is undefined.
pub const UNDEFINED_SCORE: f64 = 2.0;

/// Smallest p-value used when sizing bars.
const MIN_P: f64 = 1e-300;

/// One scored pair.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedPair {
    /// First variable (earlier in domain order).
    pub x: String,
    /// Second variable.
    pub y: String,
    /// p-value, or [`UNDEFINED_SCORE`].
    pub score: f64,
    /// Relative strength in [0, 1] for display.
    pub bar_length: f64,
}

impl RankedPair {
    /// True if this pair links `a` and `b`, in either order.
    #[must_use]
    pub fn links(&self, a: &str, b: &str) -> bool {
        (self.x == a && self.y == b) || (self.x == b && self.y == a)
    }
}

/// Length of the strength bar for a score: `-log10(p) / 300`, capped at 1.
#[must_use]
pub fn bar_length(score: f64) -> f64 {
    if !(0.0..=1.0).contains(&score) {
        return 0.0;
    }
    (-score.max(MIN_P).log10() / 300.0).clamp(0.0, 1.0)
}

/// Pairs sorted from most to least dependent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    pairs: Vec<RankedPair>,
}

impl Ranking {
    #[must_use]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[must_use]
    pub fn pairs(&self) -> &[RankedPair] {
        &self.pairs
    }

    /// Most dependent pair.
    #[must_use]
    pub fn best(&self) -> Option<&RankedPair> {
        self.pairs.first()
    }

    /// Rank of the pair (a, b) in either order.
    #[must_use]
    pub fn position(&self, a: &str, b: &str) -> Option<usize> {
        self.pairs.iter().position(|p| p.links(a, b))
    }

    pub fn iter(&self) -> impl Iterator<Item = &RankedPair> {
        self.pairs.iter()
    }
}

/// Scores all pairs of categorical variables in a dataset.
#[derive(Debug, Clone)]
pub struct SieveRank<'a> {
    data: &'a Dataset,
    candidates: Vec<usize>,
    rule: CochranRule,
}

impl<'a> SieveRank<'a> {
    /// Collects the categorical variables of `data`, in domain order.
    ///
    /// Continuous variables are skipped; discretize first to include them.
    #[must_use]
    pub fn new(data: &'a Dataset, rule: CochranRule) -> Self {
        let candidates = data
            .domain()
            .variables()
            .enumerate()
            .filter(|(_, v)| v.is_categorical())
            .map(|(i, _)| i)
            .collect();
        Self {
            data,
            candidates,
            rule,
        }
    }

    /// Names of the variables that take part in the ranking.
    #[must_use]
    pub fn candidates(&self) -> Vec<&str> {
        self.candidates
            .iter()
            .filter_map(|&i| self.data.domain().get(i))
            .map(|v| v.name())
            .collect()
    }

    /// Number of pairs that [`rank`](Self::rank) will score.
    #[must_use]
    pub fn n_pairs(&self) -> usize {
        let n = self.candidates.len();
        n * n.saturating_sub(1) / 2
    }

    /// p-value of the pair at domain-order indices (i, j), or
    /// [`UNDEFINED_SCORE`] when it cannot be computed.
    #[must_use]
    pub fn score(&self, i: usize, j: usize) -> f64 {
        match ContingencyTable::from_dataset(self.data, i, j) {
            Ok(table) => {
                let p = ChiSqStats::from_table(table, &self.rule).p;
                if p.is_nan() {
                    UNDEFINED_SCORE
                } else {
                    p
                }
            }
            Err(_) => UNDEFINED_SCORE,
        }
    }

    /// Scores and sorts every unordered pair. Ties keep generation order.
    #[must_use]
    pub fn rank(&self) -> Ranking {
        let domain = self.data.domain();
        let mut pairs = Vec::with_capacity(self.n_pairs());
        for (k, &i) in self.candidates.iter().enumerate() {
            for &j in &self.candidates[k + 1..] {
                let (Some(x), Some(y)) = (domain.get(i), domain.get(j)) else {
                    continue;
                };
                let score = self.score(i, j);
                pairs.push(RankedPair {
                    x: x.name().to_string(),
                    y: y.name().to_string(),
                    score,
                    bar_length: bar_length(score),
                });
            }
        }
        pairs.sort_by(|a, b| a.score.total_cmp(&b.score));
        tracing::debug!(pairs = pairs.len(), "ranked variable pairs");
        Ranking { pairs }
    }
}
