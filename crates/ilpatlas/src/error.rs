//! Error types for ilpatlas

use crate::outcome::Outcome;
use thiserror::Error;

/// A clause whose body cannot be consumed left to right under its modes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unsafe clause {clause}: literals {literals:?} could not be ordered")]
pub struct UnsafeClauseError {
    pub clause: String,
    /// Literals left over once no remaining literal had its inputs bound
    pub literals: Vec<String>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("Coverage oracle timed out")]
    Timeout,

    #[error("Forbidden query: {0}")]
    Forbidden(String),

    #[error("Coverage oracle failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EnumeratorError {
    #[error("Enumerator failed: {0}")]
    Failed(String),
}

#[derive(Error, Debug)]
pub enum LearnError {
    #[error(transparent)]
    UnsafeClause(#[from] UnsafeClauseError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error(transparent)]
    Enumerator(#[from] EnumeratorError),

    #[error("No constraint families for outcome {0}")]
    OutcomeTableMiss(Outcome),
}

pub type Result<T> = std::result::Result<T, LearnError>;
