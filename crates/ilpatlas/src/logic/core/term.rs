//! Arguments of literals: variables, constants and tuples

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Type tag carried by the variables of a hypothesis clause
pub const HYPOTHESIS_VAR_TYPE: &str = "Var";

/// A named placeholder with a declared type tag.
///
/// Two variables are the same variable only if both name and type match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Variable {
    pub name: String,
    pub ty: String,
}

impl Variable {
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Variable {
            name: name.into(),
            ty: ty.into(),
        }
    }

    /// A variable of a hypothesis clause (`A`, `B`, ...)
    pub fn hypothesis(name: impl Into<String>) -> Self {
        Variable::new(name, HYPOTHESIS_VAR_TYPE)
    }
}

/// A constant symbol
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Constant {
    Symbol(String),
    Int(i64),
}

impl Constant {
    pub fn symbol(name: impl Into<String>) -> Self {
        Constant::Symbol(name.into())
    }
}

impl From<i64> for Constant {
    fn from(value: i64) -> Self {
        Constant::Int(value)
    }
}

impl From<&str> for Constant {
    fn from(value: &str) -> Self {
        Constant::Symbol(value.to_string())
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::Symbol(s) => write!(f, "{}", s),
            Constant::Int(i) => write!(f, "{}", i),
        }
    }
}

/// An argument of a literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Argument {
    Constant(Constant),
    Variable(Variable),
    Tuple(Vec<Argument>),
}

impl Argument {
    pub fn var(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Argument::Variable(Variable::new(name, ty))
    }

    /// A hypothesis variable argument
    pub fn hvar(name: impl Into<String>) -> Self {
        Argument::Variable(Variable::hypothesis(name))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Argument::Constant(Constant::symbol(name))
    }

    pub fn int(value: i64) -> Self {
        Argument::Constant(Constant::Int(value))
    }

    pub fn as_variable(&self) -> Option<&Variable> {
        match self {
            Argument::Variable(v) => Some(v),
            _ => None,
        }
    }

    /// Collect all variables, descending into tuples
    pub fn collect_variables(&self, vars: &mut BTreeSet<Variable>) {
        match self {
            Argument::Variable(v) => {
                vars.insert(v.clone());
            }
            Argument::Constant(_) => {}
            Argument::Tuple(items) => {
                for item in items {
                    item.collect_variables(vars);
                }
            }
        }
    }

    /// Check whether the argument contains no variables
    pub fn is_ground(&self) -> bool {
        match self {
            Argument::Variable(_) => false,
            Argument::Constant(_) => true,
            Argument::Tuple(items) => items.iter().all(Argument::is_ground),
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::Variable(v) => write!(f, "{}", v.name),
            Argument::Constant(c) => write!(f, "{}", c),
            Argument::Tuple(items) => {
                write!(f, "(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", item)?;
                }
                if items.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}
