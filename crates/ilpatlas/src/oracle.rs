//! Coverage oracle interface
//!
//! The oracle evaluates programs against a fixed example set and background
//! theory. How entailment is computed is up to the implementation; the
//! refinement loop only consumes the answers.

use crate::error::OracleError;
use crate::logic::Clause;
use crate::outcome::ConfMatrix;

/// Evaluator of candidate programs.
///
/// Per-clause queries are only asked for separable clauses, which can be
/// evaluated without the rest of their program.
pub trait CoverageOracle: Send {
    /// Count covered and uncovered examples for a program
    fn test(&mut self, program: &[Clause]) -> Result<ConfMatrix, OracleError>;

    /// The clause alone entails some negative example
    fn is_inconsistent(&mut self, clause: &Clause) -> Result<bool, OracleError>;

    /// The clause alone entails no positive example
    fn is_totally_incomplete(&mut self, clause: &Clause) -> Result<bool, OracleError>;

    /// The program yields more than one output for some input
    fn is_non_functional(&mut self, program: &[Clause]) -> Result<bool, OracleError>;

    /// Clauses of the program containing a literal that does not affect coverage
    fn check_redundant_literal(&mut self, program: &[Clause]) -> Result<Vec<Clause>, OracleError>;

    /// Some clause of the program is implied by the others
    fn check_redundant_clause(&mut self, program: &[Clause]) -> Result<bool, OracleError>;
}

/// Oracle for a participant that may not evaluate programs on its examples.
///
/// Structural checks never report anything and `test` is refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructuralOracle;

impl CoverageOracle for StructuralOracle {
    fn test(&mut self, program: &[Clause]) -> Result<ConfMatrix, OracleError> {
        Err(OracleError::Forbidden(format!(
            "structural oracle cannot test a program of {} clauses",
            program.len()
        )))
    }

    fn is_inconsistent(&mut self, _clause: &Clause) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn is_totally_incomplete(&mut self, _clause: &Clause) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn is_non_functional(&mut self, _program: &[Clause]) -> Result<bool, OracleError> {
        Ok(false)
    }

    fn check_redundant_literal(&mut self, _program: &[Clause]) -> Result<Vec<Clause>, OracleError> {
        Ok(Vec::new())
    }

    fn check_redundant_clause(&mut self, _program: &[Clause]) -> Result<bool, OracleError> {
        Ok(false)
    }
}
