//! Learner configuration types.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the refinement loop
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Largest literal budget the loop escalates to
    pub max_literals: usize,
    pub max_clauses: usize,
    pub max_vars: usize,
    /// Add a generalisation constraint for programs the oracle reports as non-functional
    pub functional_test: bool,
    /// Wall-clock budget for the whole loop
    #[serde(with = "duration_secs")]
    pub timeout: Duration,
    /// Keep every improving program instead of only the latest
    pub log_best_programs: bool,
    /// Enable per-phase profiling (zero overhead when false)
    pub enable_profiling: bool,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        LearnerConfig {
            max_literals: 40,
            max_clauses: 1,
            max_vars: 6,
            functional_test: false,
            timeout: Duration::from_secs(600),
            log_best_programs: false,
            enable_profiling: false,
        }
    }
}

impl LearnerConfig {
    /// Parse a JSON settings document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(d: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(d.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        if !secs.is_finite() || secs < 0.0 {
            return Err(serde::de::Error::custom("timeout must be a non-negative number of seconds"));
        }
        Ok(Duration::from_secs_f64(secs))
    }
}
