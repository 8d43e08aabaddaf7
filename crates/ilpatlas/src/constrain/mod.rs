//! Constraint construction
//!
//! After a program is tested its outcome selects families of constraints
//! that prune the hypothesis space: the tested program itself and every
//! program the failed test also rules out. The clause shapes of each family
//! are produced by a [`ConstraintGenerator`]; this module decides which
//! families apply and to which (sub)programs.

use crate::config::LearnerConfig;
use crate::error::{LearnError, Result};
use crate::logic::Clause;
use crate::model::{BeforeMap, MinClauseMap};
use crate::oracle::CoverageOracle;
use crate::outcome::{Coverage, Outcome};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// A family of pruning constraints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintKind {
    /// Prune specialisations of the program (it covers negatives)
    Generalisation,
    /// Prune generalisations of the program (it misses positives)
    Specialisation,
    /// Prune programs containing a clause that covers no positive
    Redundancy,
    /// Prune exactly this program
    Banish,
}

impl fmt::Display for ConstraintKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConstraintKind::Generalisation => "generalisation",
            ConstraintKind::Specialisation => "specialisation",
            ConstraintKind::Redundancy => "redundancy",
            ConstraintKind::Banish => "banish",
        };
        write!(f, "{}", name)
    }
}

/// Constraint families applied for an outcome.
///
/// A negative outcome of ALL is treated as SOME.
pub fn constraint_kinds(outcome: Outcome) -> Result<&'static [ConstraintKind]> {
    use ConstraintKind::*;

    let negative = match outcome.negative {
        Coverage::All => Coverage::Some,
        other => other,
    };
    match (outcome.positive, negative) {
        (Coverage::All, Coverage::None) => Ok(&[Banish]),
        (Coverage::All, Coverage::Some) => Ok(&[Generalisation]),
        (Coverage::Some, Coverage::None) => Ok(&[Specialisation]),
        (Coverage::Some, Coverage::Some) => Ok(&[Specialisation, Generalisation]),
        (Coverage::None, Coverage::None) => Ok(&[Specialisation, Redundancy]),
        (Coverage::None, Coverage::Some) => Ok(&[Specialisation, Redundancy, Generalisation]),
        (_, Coverage::All) => Err(LearnError::OutcomeTableMiss(outcome)),
    }
}

/// Builder of constraint clauses for each family.
///
/// Clauses returned are abstract: they carry variables (and usually meta
/// literals) and are grounded by the refinement loop before being handed
/// to the enumerator.
pub trait ConstraintGenerator: Send {
    fn generalisation_constraint(
        &mut self,
        program: &[Clause],
        before: &BeforeMap,
        min_clause: &MinClauseMap,
    ) -> Vec<Clause>;

    fn specialisation_constraint(
        &mut self,
        program: &[Clause],
        before: &BeforeMap,
        min_clause: &MinClauseMap,
    ) -> Vec<Clause>;

    fn redundancy_constraint(
        &mut self,
        program: &[Clause],
        before: &BeforeMap,
        min_clause: &MinClauseMap,
    ) -> Vec<Clause>;

    fn banish_constraint(
        &mut self,
        program: &[Clause],
        before: &BeforeMap,
        min_clause: &MinClauseMap,
    ) -> Vec<Clause>;

    /// Prune the clause without the literal the oracle found redundant
    fn redundant_literal_constraint(
        &mut self,
        clause: &Clause,
        before: &BeforeMap,
        min_clause: &MinClauseMap,
    ) -> Vec<Clause>;
}

/// A tested program and the enumerator metadata it was decoded with
#[derive(Debug, Clone, Copy)]
pub struct TestedProgram<'a> {
    pub program: &'a [Clause],
    pub before: &'a BeforeMap,
    pub min_clause: &'a MinClauseMap,
    pub outcome: Outcome,
}

fn family(
    generator: &mut dyn ConstraintGenerator,
    kind: ConstraintKind,
    program: &[Clause],
    before: &BeforeMap,
    min_clause: &MinClauseMap,
) -> Vec<Clause> {
    match kind {
        ConstraintKind::Generalisation => {
            generator.generalisation_constraint(program, before, min_clause)
        }
        ConstraintKind::Specialisation => {
            generator.specialisation_constraint(program, before, min_clause)
        }
        ConstraintKind::Redundancy => generator.redundancy_constraint(program, before, min_clause),
        ConstraintKind::Banish => generator.banish_constraint(program, before, min_clause),
    }
}

/// Every constraint a tested program gives rise to, deduplicated.
///
/// Besides the families selected by the outcome, the oracle is asked about
/// functionality (when enabled), redundant literals, redundant clauses, and
/// the consistency and completeness of each separable clause on its own.
pub fn build_constraints(
    config: &LearnerConfig,
    generator: &mut dyn ConstraintGenerator,
    oracle: &mut dyn CoverageOracle,
    tested: TestedProgram<'_>,
) -> Result<IndexSet<Clause>> {
    let TestedProgram {
        program,
        before,
        min_clause,
        outcome,
    } = tested;
    let mut constraints = IndexSet::new();

    for &kind in constraint_kinds(outcome)? {
        let new = family(generator, kind, program, before, min_clause);
        debug!(%kind, count = new.len(), "constraint family applied");
        constraints.extend(new);
    }

    if config.functional_test && oracle.is_non_functional(program)? {
        debug!("program is non-functional");
        constraints.extend(generator.generalisation_constraint(program, before, min_clause));
    }

    for clause in oracle.check_redundant_literal(program)? {
        debug!(clause = %clause, "clause has a redundant literal");
        constraints.extend(generator.redundant_literal_constraint(&clause, before, min_clause));
    }

    if oracle.check_redundant_clause(program)? {
        debug!("program has a redundant clause");
        constraints.extend(generator.generalisation_constraint(program, before, min_clause));
    }

    // Per-clause localisation
    for clause in program.iter().filter(|c| c.is_separable()) {
        let single = std::slice::from_ref(clause);
        if oracle.is_inconsistent(clause)? {
            debug!(clause = %clause, "clause is inconsistent");
            constraints.extend(generator.generalisation_constraint(single, before, min_clause));
        }
        if oracle.is_totally_incomplete(clause)? {
            debug!(clause = %clause, "clause is totally incomplete");
            constraints.extend(generator.redundancy_constraint(single, before, min_clause));
        }
    }

    // Second pass over multi-clause programs; incompleteness only when
    // every clause is separable
    if program.len() > 1 {
        for clause in program.iter().filter(|c| c.is_separable()) {
            if oracle.is_inconsistent(clause)? {
                let single = std::slice::from_ref(clause);
                constraints.extend(generator.generalisation_constraint(single, before, min_clause));
            }
        }

        if program.iter().all(Clause::is_separable) {
            for clause in program {
                if oracle.is_totally_incomplete(clause)? {
                    let single = std::slice::from_ref(clause);
                    constraints.extend(generator.redundancy_constraint(single, before, min_clause));
                }
            }
        }
    }

    debug!(count = constraints.len(), "constraints built");
    Ok(constraints)
}
