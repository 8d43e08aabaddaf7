//! Run statistics and best-program tracking

use crate::logic::{program_code, Clause, Program};
use crate::outcome::{calc_score, ConfMatrix};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A tested program with its coverage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramRecord {
    pub clauses: Program,
    pub conf_matrix: ConfMatrix,
    /// Number of literals, heads included
    pub size: usize,
    /// Text form, one clause per line
    pub code: String,
}

impl ProgramRecord {
    pub fn new(clauses: Program, conf_matrix: ConfMatrix) -> Self {
        let size = clauses.iter().map(Clause::size).sum();
        let code = program_code(&clauses);
        ProgramRecord {
            clauses,
            conf_matrix,
            size,
            code,
        }
    }

    pub fn score(&self) -> usize {
        calc_score(&self.conf_matrix)
    }
}

/// Counters of one learning run. Mutated only by the refinement loop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stats {
    /// Programs tested per literal budget, in budget order
    pub programs_per_size: IndexMap<usize, usize>,
    pub total_programs: usize,
    /// Candidates skipped because a clause could not be ordered
    pub unsafe_programs: usize,
    /// Enumerator facts the decoder did not use
    pub skipped_facts: usize,
    pub constraints_built: usize,
    pub ground_constraints: usize,
    /// Literal budget the loop is (or was last) working at
    pub current_size: usize,
    /// Improving programs, oldest first. Only the latest unless history is kept.
    pub best_programs: Vec<ProgramRecord>,
    pub solution: Option<ProgramRecord>,
    /// The search ended on its own: solution found or budgets exhausted
    pub completed: bool,
}

impl Stats {
    pub fn best_program(&self) -> Option<&ProgramRecord> {
        self.best_programs.last()
    }

    pub fn best_score(&self) -> Option<usize> {
        self.best_program().map(ProgramRecord::score)
    }

    pub(crate) fn enter_size(&mut self, size: usize) {
        self.current_size = size;
        self.programs_per_size.entry(size).or_insert(0);
    }

    pub(crate) fn register_program(&mut self) {
        self.total_programs += 1;
        *self.programs_per_size.entry(self.current_size).or_insert(0) += 1;
    }

    /// Record `record` as best if it beats the current best. Ties keep the
    /// earlier program.
    pub(crate) fn offer_best(&mut self, record: &ProgramRecord, keep_history: bool) -> bool {
        if self.best_score().is_some_and(|best| record.score() <= best) {
            return false;
        }
        if !keep_history {
            self.best_programs.clear();
        }
        self.best_programs.push(record.clone());
        true
    }
}
