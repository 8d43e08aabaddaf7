//! Model enumerator interface
//!
//! The enumerator owns the hypothesis space and the accumulated constraint
//! store. It proposes candidate models under a literal budget and knows the
//! grounding rules needed to instantiate constraint clauses.

use crate::error::EnumeratorError;
use crate::logic::{Assignment, Clause, GroundClause};
use crate::model::Symbol;

pub trait Enumerator: Send {
    /// Restrict subsequent models to programs of at most `size` literals
    fn update_number_of_literals(&mut self, size: usize) -> Result<(), EnumeratorError>;

    /// Next model under the current budget, or `None` when the budget is exhausted
    fn get_model(&mut self, size: usize) -> Result<Option<Vec<Symbol>>, EnumeratorError>;

    /// All assignments of the clause's variables allowed by the hypothesis space.
    ///
    /// The clause still carries its meta literals.
    fn find_bindings(
        &mut self,
        clause: &Clause,
        max_clauses: usize,
        max_vars: usize,
    ) -> Result<Vec<Assignment>, EnumeratorError>;

    /// Add constraints to the persistent store. Constraints are never removed.
    fn add_ground_clauses(&mut self, clauses: Vec<GroundClause>) -> Result<(), EnumeratorError>;
}
