//! The generate-test-constrain loop
//!
//! ```text
//! Sizing(k) -> Generating -> Testing -> Scoring -> Constraining -> Grounding -> Updating
//!      ^            |                       |                                     |
//!      +-- no model-+                       +-> Solved                            |
//!                   ^-----------------------------------------------------------+
//! ```
//!
//! Each iteration pulls one model from the enumerator under the current
//! literal budget, decodes and tests it, and feeds the constraints its
//! outcome implies back into the enumerator. When the enumerator has no
//! model left the budget grows by one literal, up to `max_literals`.

use super::profile::RefinementProfile;
use super::stats::{ProgramRecord, Stats};
use crate::config::LearnerConfig;
use crate::constrain::{build_constraints, ConstraintGenerator, TestedProgram};
use crate::enumerator::Enumerator;
use crate::error::{LearnError, OracleError, Result};
use crate::logic::{ground_clause, program_code, Assignment, Clause, GroundClause, GroundingKey};
use crate::model::decode_model;
use crate::oracle::CoverageOracle;
use crate::outcome::{calc_score, decide_outcome};
use indexmap::IndexSet;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Result of a learning run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LearnResult {
    /// A complete and consistent program was found
    Solution(ProgramRecord),
    /// Every literal budget was searched; best program seen, if any
    Exhausted(Option<ProgramRecord>),
    /// The wall-clock budget ran out; best program seen, if any
    Timeout(Option<ProgramRecord>),
}

impl LearnResult {
    /// The solution, else the best program seen
    pub fn program(&self) -> Option<&ProgramRecord> {
        match self {
            LearnResult::Solution(record) => Some(record),
            LearnResult::Exhausted(best) | LearnResult::Timeout(best) => best.as_ref(),
        }
    }

    pub fn code(&self) -> Option<&str> {
        self.program().map(|record| record.code.as_str())
    }

    pub fn is_solution(&self) -> bool {
        matches!(self, LearnResult::Solution(_))
    }

    /// Convert to JSON representation
    pub fn to_json(&self, stats: &Stats, time_seconds: f64) -> crate::json::LearnResultJson {
        use crate::json::{LearnResultJson, ProgramJson, StatsJson};

        let stats = StatsJson::from(stats);
        match self {
            LearnResult::Solution(record) => LearnResultJson::Solution {
                program: record.into(),
                stats,
                time_seconds,
            },
            LearnResult::Exhausted(best) => LearnResultJson::Exhausted {
                best: best.as_ref().map(ProgramJson::from),
                stats,
                time_seconds,
            },
            LearnResult::Timeout(best) => LearnResultJson::Timeout {
                best: best.as_ref().map(ProgramJson::from),
                stats,
                time_seconds,
            },
        }
    }
}

/// Outcome of one Generating..Updating pass
enum Step {
    Continue,
    /// The enumerator has no model left under the current budget
    NoModel,
    Solved(ProgramRecord),
}

/// One learning run.
///
/// Owns its configuration, statistics, collaborators and binding cache.
/// Concurrent runs need separate instances.
pub struct LearningRun {
    config: LearnerConfig,
    enumerator: Box<dyn Enumerator>,
    oracle: Box<dyn CoverageOracle>,
    generator: Box<dyn ConstraintGenerator>,
    stats: Stats,
    profile: Option<RefinementProfile>,
    /// Assignments per constraint shape, reused across iterations
    binding_cache: HashMap<GroundingKey, Vec<Assignment>>,
    elapsed: Duration,
}

impl LearningRun {
    pub fn new(
        config: LearnerConfig,
        enumerator: Box<dyn Enumerator>,
        oracle: Box<dyn CoverageOracle>,
        generator: Box<dyn ConstraintGenerator>,
    ) -> Self {
        LearningRun {
            config,
            enumerator,
            oracle,
            generator,
            stats: Stats::default(),
            profile: None,
            binding_cache: HashMap::new(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    pub fn profile(&self) -> Option<&RefinementProfile> {
        self.profile.as_ref()
    }

    /// Wall-clock time of the last call to [`learn`](Self::learn)
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Run the loop to a solution, exhaustion of the literal budgets, or timeout.
    ///
    /// An oracle timeout ends the run like the wall-clock budget does. Other
    /// enumerator and oracle failures are returned as errors.
    pub fn learn(&mut self) -> Result<LearnResult> {
        if self.config.enable_profiling {
            self.profile = Some(RefinementProfile::default());
        }
        let start_time = Instant::now();

        let mut size = 0;
        let mut next_size = true;
        let result = loop {
            if start_time.elapsed() > self.config.timeout {
                info!(size, programs = self.stats.total_programs, "timeout reached");
                break LearnResult::Timeout(self.stats.best_program().cloned());
            }

            // === Sizing ===
            let stepped = if next_size {
                if size >= self.config.max_literals {
                    info!(programs = self.stats.total_programs, "search space exhausted");
                    self.stats.completed = true;
                    break LearnResult::Exhausted(self.stats.best_program().cloned());
                }
                size += 1;
                info!(size, "searching programs");
                self.stats.enter_size(size);
                self.enumerator
                    .update_number_of_literals(size)
                    .map_err(LearnError::from)
                    .and_then(|()| self.step(size))
            } else {
                self.step(size)
            };

            match stepped {
                Ok(Step::Continue) => next_size = false,
                Ok(Step::NoModel) => next_size = true,
                Ok(Step::Solved(record)) => {
                    self.stats.completed = true;
                    break LearnResult::Solution(record);
                }
                Err(LearnError::Oracle(OracleError::Timeout)) => {
                    info!(size, "coverage oracle timed out");
                    break LearnResult::Timeout(self.stats.best_program().cloned());
                }
                Err(e) => {
                    self.elapsed = start_time.elapsed();
                    return Err(e);
                }
            }
        };

        self.elapsed = start_time.elapsed();
        if let Some(p) = self.profile.as_mut() {
            p.total_time = self.elapsed;
        }
        Ok(result)
    }

    fn step(&mut self, size: usize) -> Result<Step> {
        if let Some(p) = self.profile.as_mut() {
            p.iterations += 1;
        }

        // === Generating ===
        let t0 = self.profile.as_ref().map(|_| Instant::now());
        let model = self.enumerator.get_model(size)?;
        if let (Some(p), Some(t)) = (self.profile.as_mut(), t0) {
            p.generate_time += t.elapsed();
        }
        let Some(model) = model else {
            debug!(size, "no more models");
            return Ok(Step::NoModel);
        };

        let decoded = decode_model(&model);
        self.stats.skipped_facts += decoded.skipped.len();
        let program = decoded.clauses;

        if let Some(err) = program.iter().find_map(|clause| clause.ordered().err()) {
            warn!(error = %err, "skipping unsafe program");
            self.stats.unsafe_programs += 1;
            return Ok(Step::Continue);
        }

        // === Testing ===
        let t0 = self.profile.as_ref().map(|_| Instant::now());
        let conf_matrix = self.oracle.test(&program)?;
        self.stats.register_program();
        if let (Some(p), Some(t)) = (self.profile.as_mut(), t0) {
            p.test_time += t.elapsed();
        }

        // === Scoring ===
        let outcome = decide_outcome(&conf_matrix);
        debug!(
            size,
            program = %program_code(&program),
            %conf_matrix,
            %outcome,
            score = calc_score(&conf_matrix),
            "tested program"
        );
        let record = ProgramRecord::new(program, conf_matrix);
        if outcome.is_solution() {
            info!(code = %record.code, "solution found");
            self.stats.solution = Some(record.clone());
            return Ok(Step::Solved(record));
        }
        if self.stats.offer_best(&record, self.config.log_best_programs) {
            debug!(score = record.score(), "new best program");
        }

        // === Constraining ===
        let t0 = self.profile.as_ref().map(|_| Instant::now());
        let constraints = build_constraints(
            &self.config,
            self.generator.as_mut(),
            self.oracle.as_mut(),
            TestedProgram {
                program: &record.clauses,
                before: &decoded.before,
                min_clause: &decoded.min_clause,
                outcome,
            },
        )?;
        self.stats.constraints_built += constraints.len();
        if let (Some(p), Some(t)) = (self.profile.as_mut(), t0) {
            p.build_constraints_time += t.elapsed();
        }

        // === Grounding ===
        let t0 = self.profile.as_ref().map(|_| Instant::now());
        let ground = self.ground_constraints(&constraints)?;
        if let (Some(p), Some(t)) = (self.profile.as_mut(), t0) {
            p.ground_time += t.elapsed();
        }

        // === Updating ===
        let t0 = self.profile.as_ref().map(|_| Instant::now());
        debug!(count = ground.len(), "adding ground constraints");
        self.stats.ground_constraints += ground.len();
        self.enumerator.add_ground_clauses(ground)?;
        if let (Some(p), Some(t)) = (self.profile.as_mut(), t0) {
            p.add_constraints_time += t.elapsed();
        }

        Ok(Step::Continue)
    }

    /// Ground every constraint under each assignment the enumerator allows.
    ///
    /// Bindings are looked up with the meta literals in place; the meta
    /// literals are dropped before grounding.
    fn ground_constraints(&mut self, constraints: &IndexSet<Clause>) -> Result<Vec<GroundClause>> {
        let mut ground = IndexSet::new();

        for clause in constraints {
            let assignments = match self.binding_cache.entry(GroundingKey::of(clause)) {
                Entry::Occupied(entry) => {
                    if let Some(p) = self.profile.as_mut() {
                        p.binding_cache_hits += 1;
                    }
                    entry.into_mut()
                }
                Entry::Vacant(entry) => {
                    if let Some(p) = self.profile.as_mut() {
                        p.binding_cache_misses += 1;
                    }
                    let found = self.enumerator.find_bindings(
                        clause,
                        self.config.max_clauses,
                        self.config.max_vars,
                    )?;
                    entry.insert(found)
                }
            };

            let stripped = Clause {
                head: clause.head.clone(),
                body: clause.body.iter().filter(|lit| !lit.is_meta).cloned().collect(),
            };
            for assignment in assignments.iter() {
                ground.insert(ground_clause(&stripped, assignment));
            }
        }

        Ok(ground.into_iter().collect())
    }
}
