//! JSON serialization types for learning results

use crate::outcome::{decide_outcome, ConfMatrix, Outcome};
use crate::refine::{ProgramRecord, Stats};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// JSON representation of a tested program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramJson {
    /// One entry per clause, body in evaluation order where possible
    pub clauses: Vec<String>,
    pub size: usize,
    pub conf_matrix: ConfMatrix,
    pub outcome: Outcome,
    pub score: usize,
}

impl From<&ProgramRecord> for ProgramJson {
    fn from(record: &ProgramRecord) -> Self {
        ProgramJson {
            clauses: record.clauses.iter().map(|c| c.code()).collect(),
            size: record.size,
            conf_matrix: record.conf_matrix,
            outcome: decide_outcome(&record.conf_matrix),
            score: record.score(),
        }
    }
}

/// JSON summary of run statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsJson {
    pub total_programs: usize,
    #[serde(skip_serializing_if = "IndexMap::is_empty", default)]
    pub programs_per_size: IndexMap<usize, usize>,
    pub unsafe_programs: usize,
    pub skipped_facts: usize,
    pub constraints_built: usize,
    pub ground_constraints: usize,
    pub final_size: usize,
}

impl From<&Stats> for StatsJson {
    fn from(stats: &Stats) -> Self {
        StatsJson {
            total_programs: stats.total_programs,
            programs_per_size: stats.programs_per_size.clone(),
            unsafe_programs: stats.unsafe_programs,
            skipped_facts: stats.skipped_facts,
            constraints_built: stats.constraints_built,
            ground_constraints: stats.ground_constraints,
            final_size: stats.current_size,
        }
    }
}

/// JSON representation of a learning result
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum LearnResultJson {
    Solution {
        program: ProgramJson,
        stats: StatsJson,
        time_seconds: f64,
    },
    Exhausted {
        best: Option<ProgramJson>,
        stats: StatsJson,
        time_seconds: f64,
    },
    Timeout {
        best: Option<ProgramJson>,
        stats: StatsJson,
        time_seconds: f64,
    },
}
