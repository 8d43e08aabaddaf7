//! ILPAtlas: generate-test-constrain search for inductive logic programming
//!
//! Given positive and negative examples, a learner searches a space of
//! logic programs for one that entails every positive and no negative
//! example. This crate implements the refinement loop at the heart of
//! that search and its data model:
//!
//! - [`logic`]: mode-annotated literals, clauses, body ordering and grounding
//! - [`model`]: decoding enumerator models into candidate programs
//! - [`outcome`]: classifying coverage into outcomes and scores
//! - [`constrain`]: choosing pruning constraints from an outcome
//! - [`refine`]: the loop itself, its statistics and profiling
//!
//! The model enumerator, the coverage oracle and the clause shapes of each
//! constraint family are collaborators supplied by the caller through the
//! [`Enumerator`], [`CoverageOracle`] and [`ConstraintGenerator`] traits.

pub mod config;
pub mod constrain;
pub mod enumerator;
pub mod error;
pub mod json;
pub mod logic;
pub mod model;
pub mod oracle;
pub mod outcome;
pub mod refine;

pub use config::LearnerConfig;
pub use error::{EnumeratorError, LearnError, OracleError, UnsafeClauseError};

// Re-export the clause model
pub use logic::{
    find_all_vars, ground_clause, ground_literal, program_code, Argument, Assignment, Clause,
    Constant, Direction, GroundClause, GroundLiteral, Literal, OrderedClause, Program, Variable,
};

pub use model::{decode_model, BeforeMap, DecodedProgram, MinClauseMap, Symbol};
pub use outcome::{aggregate_outcomes, calc_score, decide_outcome, ConfMatrix, Coverage, Outcome};

pub use constrain::{build_constraints, constraint_kinds, ConstraintGenerator, ConstraintKind};
pub use enumerator::Enumerator;
pub use oracle::{CoverageOracle, StructuralOracle};

pub use refine::{learn, LearnResult, LearningRun, ProgramRecord, RefinementProfile, Stats};
