//! Clauses and programs

use super::literal::Literal;
use super::term::{Argument, Variable};
use crate::error::UnsafeClauseError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Prefix reserved for invented predicates
pub const INVENTED_PREFIX: &str = "inv";

/// A definite clause, or a pure constraint when `head` is `None`.
///
/// Equality and hashing follow the structural identity of the literals, so
/// the body behaves as a set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    pub head: Option<Literal>,
    pub body: BTreeSet<Literal>,
}

/// A candidate program: the clauses of one generated hypothesis
pub type Program = Vec<Clause>;

impl Clause {
    pub fn new(head: Literal, body: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            head: Some(head),
            body: body.into_iter().collect(),
        }
    }

    /// Create a headless constraint clause
    pub fn constraint(body: impl IntoIterator<Item = Literal>) -> Self {
        Clause {
            head: None,
            body: body.into_iter().collect(),
        }
    }

    /// Number of literals, head included
    pub fn size(&self) -> usize {
        self.body.len() + usize::from(self.head.is_some())
    }

    /// The head predicate occurs in some body literal
    pub fn is_recursive(&self) -> bool {
        match &self.head {
            Some(head) => self.body.iter().any(|lit| lit.predicate == head.predicate),
            None => false,
        }
    }

    /// Can be tested independently of the rest of its program.
    ///
    /// Headless constraints are never separable.
    pub fn is_separable(&self) -> bool {
        match &self.head {
            Some(head) => !self.is_recursive() && !head.predicate.starts_with(INVENTED_PREFIX),
            None => false,
        }
    }

    /// Every variable in the head or body, tuples included
    pub fn all_vars(&self) -> BTreeSet<Variable> {
        let mut vars = BTreeSet::new();
        for lit in self.head.iter().chain(&self.body) {
            for arg in &lit.arguments {
                arg.collect_variables(&mut vars);
            }
        }
        vars
    }

    /// Order the body so it can be consumed left to right.
    ///
    /// Each selected literal has its inputs bound by the head inputs or by
    /// the outputs of earlier literals. Among ready literals the first
    /// non-recursive one is taken; a recursive one only when nothing else is
    /// ready.
    pub fn ordered(&self) -> Result<OrderedClause, UnsafeClauseError> {
        let head_predicate = self.head.as_ref().map(|h| h.predicate.as_str());
        let mut bound: BTreeSet<&Argument> = match &self.head {
            Some(head) => head.inputs(),
            None => BTreeSet::new(),
        };
        let mut remaining: Vec<&Literal> = self.body.iter().collect();
        let mut body = Vec::with_capacity(remaining.len());

        while !remaining.is_empty() {
            let mut selected = None;
            for (i, lit) in remaining.iter().enumerate() {
                if !lit.inputs().is_subset(&bound) {
                    continue;
                }
                selected = Some(i);
                if Some(lit.predicate.as_str()) != head_predicate {
                    break;
                }
            }

            let Some(i) = selected else {
                return Err(UnsafeClauseError {
                    clause: self.to_string(),
                    literals: remaining.iter().map(|lit| lit.moded().to_string()).collect(),
                });
            };

            let lit = remaining.remove(i);
            bound.extend(lit.outputs());
            body.push(lit.clone());
        }

        Ok(OrderedClause {
            head: self.head.clone(),
            body,
        })
    }

    /// Text form, ordered when the modes allow it
    pub fn code(&self) -> String {
        match self.ordered() {
            Ok(ordered) => ordered.to_string(),
            Err(_) => self.to_string(),
        }
    }
}

fn write_clause<'a>(
    f: &mut fmt::Formatter<'_>,
    head: Option<&Literal>,
    body: impl Iterator<Item = &'a Literal>,
) -> fmt::Result {
    if let Some(head) = head {
        write!(f, "{}", head)?;
    }
    write!(f, ":-")?;
    for (i, lit) in body.enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{}", lit)?;
    }
    Ok(())
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clause(f, self.head.as_ref(), self.body.iter())
    }
}

/// A clause whose body is in evaluation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedClause {
    pub head: Option<Literal>,
    pub body: Vec<Literal>,
}

impl fmt::Display for OrderedClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_clause(f, self.head.as_ref(), self.body.iter())
    }
}

/// Text form of a program, one clause per line
pub fn program_code(program: &[Clause]) -> String {
    program.iter().map(Clause::code).collect::<Vec<_>>().join("\n")
}
