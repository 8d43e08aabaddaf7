//! Classification of coverage results
//!
//! The coverage oracle reports a confusion matrix for a tested program.
//! It is reduced to a qualitative [`Outcome`] (how completely positives
//! are covered, how much negatives are over-covered) that drives the
//! choice of constraint families, and to a score used to track the best
//! program seen so far.

use serde::{Deserialize, Serialize};
use std::fmt;


/// Coverage counts of one tested program
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConfMatrix {
    pub true_positive: usize,
    pub false_negative: usize,
    pub true_negative: usize,
    pub false_positive: usize,
}

impl ConfMatrix {
    pub fn new(
        true_positive: usize,
        false_negative: usize,
        true_negative: usize,
        false_positive: usize,
    ) -> Self {
        ConfMatrix {
            true_positive,
            false_negative,
            true_negative,
            false_positive,
        }
    }
}

impl From<(usize, usize, usize, usize)> for ConfMatrix {
    fn from((tp, fn_, tn, fp): (usize, usize, usize, usize)) -> Self {
        ConfMatrix::new(tp, fn_, tn, fp)
    }
}

impl fmt::Display for ConfMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "tp={} fn={} tn={} fp={}",
            self.true_positive, self.false_negative, self.true_negative, self.false_positive
        )
    }
}

/// How much of an example set a program entails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Coverage {
    All,
    Some,
    None,
}

impl Coverage {
    /// Combine the coverage reported by two oracles: the weaker one wins
    pub fn combine(self, other: Coverage) -> Coverage {
        match (self, other) {
            (Coverage::All, Coverage::All) => Coverage::All,
            (Coverage::None, _) | (_, Coverage::None) => Coverage::None,
            _ => Coverage::Some,
        }
    }
}

impl fmt::Display for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Coverage::All => "ALL",
            Coverage::Some => "SOME",
            Coverage::None => "NONE",
        };
        write!(f, "{}", name)
    }
}

/// Positive and negative coverage of a tested program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Outcome {
    pub positive: Coverage,
    pub negative: Coverage,
}

impl Outcome {
    pub fn new(positive: Coverage, negative: Coverage) -> Self {
        Outcome { positive, negative }
    }

    /// Complete and consistent
    pub fn is_solution(&self) -> bool {
        self.positive == Coverage::All && self.negative == Coverage::None
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.positive, self.negative)
    }
}

pub fn decide_outcome(conf_matrix: &ConfMatrix) -> Outcome {
    let positive = if conf_matrix.false_negative == 0 {
        Coverage::All
    } else if conf_matrix.true_positive == 0 {
        Coverage::None
    } else {
        Coverage::Some
    };

    // Negatives never classify as ALL: that would need the total number of
    // negatives, which a minimal tester does not report.
    let negative = if conf_matrix.false_positive == 0 {
        Coverage::None
    } else {
        Coverage::Some
    };

    Outcome::new(positive, negative)
}

/// Examples classified correctly; higher is better
pub fn calc_score(conf_matrix: &ConfMatrix) -> usize {
    conf_matrix.true_positive + conf_matrix.true_negative
}

/// Fold outcomes reported by several oracles, component-wise.
///
/// Returns `None` for an empty slice.
pub fn aggregate_outcomes(outcomes: &[Outcome]) -> Option<Outcome> {
    let (first, rest) = outcomes.split_first()?;
    Some(rest.iter().fold(*first, |acc, o| {
        Outcome::new(acc.positive.combine(o.positive), acc.negative.combine(o.negative))
    }))
}
