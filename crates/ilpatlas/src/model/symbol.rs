//! Raw symbols reported by the enumerator

use serde::{Deserialize, Serialize};
use std::fmt;

/// A term of an enumerator model.
///
/// Tuples are functions with an empty name, facts are functions whose
/// name is the fact's tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Number(i64),
    String(String),
    Function { name: String, arguments: Vec<Symbol> },
}

impl Symbol {
    pub fn function(name: impl Into<String>, arguments: Vec<Symbol>) -> Self {
        Symbol::Function {
            name: name.into(),
            arguments,
        }
    }

    /// A constant: a function without arguments
    pub fn atom(name: impl Into<String>) -> Self {
        Symbol::function(name, Vec::new())
    }

    pub fn tuple(items: Vec<Symbol>) -> Self {
        Symbol::function("", items)
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            Symbol::Function { name, .. } => Some(name),
            _ => None,
        }
    }

    pub fn arguments(&self) -> &[Symbol] {
        match self {
            Symbol::Function { arguments, .. } => arguments,
            _ => &[],
        }
    }

    pub fn number(&self) -> Option<i64> {
        match self {
            Symbol::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<i64> for Symbol {
    fn from(value: i64) -> Self {
        Symbol::Number(value)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Number(n) => write!(f, "{}", n),
            Symbol::String(s) => write!(f, "{:?}", s),
            Symbol::Function { name, arguments } => {
                write!(f, "{}", name)?;
                if arguments.is_empty() && !name.is_empty() {
                    return Ok(());
                }
                write!(f, "(")?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                if name.is_empty() && arguments.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
        }
    }
}
