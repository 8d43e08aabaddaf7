//! Value types of the clause model

pub mod clause;
pub mod literal;
pub mod term;

pub use clause::{program_code, Clause, OrderedClause, Program, INVENTED_PREFIX};
pub use literal::{Direction, Literal, ModedLiteral};
pub use term::{Argument, Constant, Variable, HYPOTHESIS_VAR_TYPE};
