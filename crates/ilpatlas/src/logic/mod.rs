//! Clause model for hypotheses and constraints
//!
//! This module provides the value types the refinement loop works on:
//! arguments, mode-annotated literals, clauses and programs, together with
//! grounding of constraint clauses and a parser for their text form.

pub mod core;
pub mod grounding;
pub mod parser;


pub use self::core::{
    program_code, Argument, Clause, Constant, Direction, Literal, ModedLiteral, OrderedClause,
    Program, Variable, HYPOTHESIS_VAR_TYPE, INVENTED_PREFIX,
};
pub use grounding::{
    find_all_vars, ground_clause, ground_literal, Assignment, GroundClause, GroundLiteral,
    GroundingKey,
};
pub use parser::ParseError;
