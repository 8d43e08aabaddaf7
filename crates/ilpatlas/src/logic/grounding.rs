//! Grounding constraint clauses against variable assignments

use super::core::{Argument, Clause, Constant, Literal, Variable};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::fmt;

/// Binding of variables to constants, as produced by the enumerator
pub type Assignment = HashMap<Variable, Constant>;

/// A literal after substitution.
///
/// Variables absent from the assignment stay in place, so a partially
/// ground literal is a legal value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroundLiteral {
    pub polarity: bool,
    pub predicate: String,
    pub arguments: Vec<Argument>,
}

impl GroundLiteral {
    pub fn is_ground(&self) -> bool {
        self.arguments.iter().all(Argument::is_ground)
    }
}

impl fmt::Display for GroundLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.polarity {
            write!(f, "not ")?;
        }
        write!(f, "{}(", self.predicate)?;
        for (i, arg) in self.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", arg)?;
        }
        write!(f, ")")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroundClause {
    pub head: Option<GroundLiteral>,
    pub body: BTreeSet<GroundLiteral>,
}

impl GroundClause {
    pub fn is_ground(&self) -> bool {
        self.head.iter().chain(&self.body).all(GroundLiteral::is_ground)
    }
}

impl fmt::Display for GroundClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(head) = &self.head {
            write!(f, "{}", head)?;
        }
        write!(f, ":-")?;
        for (i, lit) in self.body.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", lit)?;
        }
        write!(f, ".")
    }
}

fn ground_argument(arg: &Argument, assignment: &Assignment) -> Argument {
    match arg {
        Argument::Variable(v) => match assignment.get(v) {
            Some(value) => Argument::Constant(value.clone()),
            None => arg.clone(),
        },
        Argument::Constant(_) => arg.clone(),
        Argument::Tuple(items) => {
            Argument::Tuple(items.iter().map(|item| ground_argument(item, assignment)).collect())
        }
    }
}

/// Substitute the bound variables of a literal
pub fn ground_literal(literal: &Literal, assignment: &Assignment) -> GroundLiteral {
    GroundLiteral {
        polarity: literal.polarity,
        predicate: literal.predicate.clone(),
        arguments: literal
            .arguments
            .iter()
            .map(|arg| ground_argument(arg, assignment))
            .collect(),
    }
}

/// Ground the head (if any) and every body literal
pub fn ground_clause(clause: &Clause, assignment: &Assignment) -> GroundClause {
    GroundClause {
        head: clause.head.as_ref().map(|h| ground_literal(h, assignment)),
        body: clause
            .body
            .iter()
            .map(|lit| ground_literal(lit, assignment))
            .collect(),
    }
}

/// Every variable appearing in the body, tuples included
pub fn find_all_vars<'a>(body: impl IntoIterator<Item = &'a Literal>) -> BTreeSet<Variable> {
    let mut vars = BTreeSet::new();
    for lit in body {
        for arg in &lit.arguments {
            arg.collect_variables(&mut vars);
        }
    }
    vars
}

/// Cache key for binding search.
///
/// Bindings of a constraint clause depend only on its variables, head
/// included, and its meta literals, not on the ordinary literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroundingKey {
    vars: BTreeSet<Variable>,
    meta: BTreeSet<(String, Vec<Argument>)>,
}

impl GroundingKey {
    pub fn of(clause: &Clause) -> Self {
        GroundingKey {
            vars: clause.all_vars(),
            meta: clause
                .body
                .iter()
                .filter(|lit| lit.is_meta)
                .map(|lit| (lit.predicate.clone(), lit.arguments.clone()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clause_var(name: &str) -> Variable {
        Variable::new(name, "Clause")
    }

    #[test]
    fn test_ground_literal_substitutes_bound_variables() {
        let lit = Literal::new(
            "body_literal",
            vec![
                Argument::Variable(clause_var("C")),
                Argument::symbol("q"),
                Argument::Tuple(vec![Argument::var("V0", "Var"), Argument::var("V1", "Var")]),
            ],
        );
        let mut assignment = Assignment::new();
        assignment.insert(clause_var("C"), Constant::Int(0));
        assignment.insert(Variable::new("V0", "Var"), Constant::Int(2));

        let ground = ground_literal(&lit, &assignment);
        assert_eq!(ground.arguments[0], Argument::int(0));
        assert_eq!(ground.arguments[1], Argument::symbol("q"));
        // V1 unbound: left in place
        assert_eq!(
            ground.arguments[2],
            Argument::Tuple(vec![Argument::int(2), Argument::var("V1", "Var")])
        );
        assert!(!ground.is_ground());
    }

    #[test]
    fn test_ground_clause_without_head() {
        let clause = Clause::constraint([Literal::new(
            "included_clause",
            vec![Argument::Variable(clause_var("C"))],
        )
        .negated()]);
        let mut assignment = Assignment::new();
        assignment.insert(clause_var("C"), Constant::Int(4));
        let ground = ground_clause(&clause, &assignment);

        assert!(ground.head.is_none());
        assert!(ground.is_ground());
        assert_eq!(ground.to_string(), ":-not included_clause(4).");
    }

    #[test]
    fn test_find_all_vars_in_tuples() {
        let body = [
            Literal::new("a", vec![Argument::Variable(clause_var("C"))]),
            Literal::new(
                "b",
                vec![Argument::Tuple(vec![Argument::var("V0", "Var"), Argument::symbol("x")])],
            ),
        ];
        let vars = find_all_vars(&body);
        assert_eq!(vars.len(), 2);
        assert!(vars.contains(&Variable::new("V0", "Var")));
    }

    #[test]
    fn test_grounding_key_ignores_ordinary_literals() {
        let c = Argument::Variable(clause_var("C"));
        let meta = Literal::meta("clause_size", vec![c.clone(), Argument::int(2)]);
        let a = Clause::constraint([meta.clone(), Literal::new("head_literal", vec![c.clone()])]);
        let b = Clause::constraint([meta, Literal::new("body_literal", vec![c.clone()])]);
        let other = Clause::constraint([
            Literal::meta("clause_size", vec![c.clone(), Argument::int(3)]),
            Literal::new("body_literal", vec![c]),
        ]);

        assert_eq!(GroundingKey::of(&a), GroundingKey::of(&b));
        assert_ne!(GroundingKey::of(&a), GroundingKey::of(&other));
    }

    #[test]
    fn test_grounding_key_separates_head_variables() {
        let body = Literal::new("b", vec![Argument::var("P", "Var")]);
        let x = Clause::new(Literal::new("h", vec![Argument::var("X", "Var")]), [body.clone()]);
        let y = Clause::new(Literal::new("h", vec![Argument::var("Y", "Var")]), [body]);

        assert_ne!(GroundingKey::of(&x), GroundingKey::of(&y));
        assert!(GroundingKey::of(&x).vars.contains(&Variable::new("X", "Var")));
    }
}
