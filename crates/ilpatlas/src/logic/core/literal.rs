//! Literals with mode-annotated arguments

use super::term::Argument;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Mode of a literal argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// `+`: must be bound before the literal is called
    In,
    /// `-`: bound by the literal
    Out,
    /// `?`: no mode declared
    Unknown,
}

impl Direction {
    pub fn symbol(&self) -> char {
        match self {
            Direction::In => '+',
            Direction::Out => '-',
            Direction::Unknown => '?',
        }
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            '+' => Some(Direction::In),
            '-' => Some(Direction::Out),
            '?' => Some(Direction::Unknown),
            _ => None,
        }
    }

    /// Parse a mode name as used in bias declarations (`in` / `out`)
    pub fn from_mode_name(name: &str) -> Option<Self> {
        match name {
            "in" => Some(Direction::In),
            "out" => Some(Direction::Out),
            _ => None,
        }
    }
}

/// A predicate applied to arguments, possibly negated.
///
/// Identity (equality, hashing, ordering) is structural over predicate and
/// arguments only: the same literal seen with different directions or
/// polarity collides in sets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Literal {
    pub predicate: String,
    pub arguments: Vec<Argument>,
    /// Aligned with `arguments`; empty when no modes are known
    pub directions: Vec<Direction>,
    pub polarity: bool,
    /// Bookkeeping literal of a constraint clause, never grounded
    pub is_meta: bool,
}

impl Literal {
    /// Create a positive literal without mode information
    pub fn new(predicate: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Literal {
            predicate: predicate.into(),
            arguments,
            directions: Vec::new(),
            polarity: true,
            is_meta: false,
        }
    }

    pub fn with_directions(
        predicate: impl Into<String>,
        arguments: Vec<Argument>,
        directions: Vec<Direction>,
    ) -> Self {
        debug_assert!(directions.is_empty() || directions.len() == arguments.len());
        Literal {
            directions,
            ..Literal::new(predicate, arguments)
        }
    }

    /// Create a meta literal (constraint bookkeeping)
    pub fn meta(predicate: impl Into<String>, arguments: Vec<Argument>) -> Self {
        Literal {
            is_meta: true,
            ..Literal::new(predicate, arguments)
        }
    }

    /// Get the complement of this literal
    pub fn negated(&self) -> Literal {
        Literal {
            polarity: !self.polarity,
            ..self.clone()
        }
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }

    /// Direction of the argument at `index` (`Unknown` when undeclared)
    pub fn direction(&self, index: usize) -> Direction {
        self.directions.get(index).copied().unwrap_or(Direction::Unknown)
    }

    fn arguments_with(&self, direction: Direction) -> BTreeSet<&Argument> {
        self.arguments
            .iter()
            .zip(&self.directions)
            .filter(|(_, d)| **d == direction)
            .map(|(arg, _)| arg)
            .collect()
    }

    /// Arguments that must be bound before this literal is called
    pub fn inputs(&self) -> BTreeSet<&Argument> {
        self.arguments_with(Direction::In)
    }

    /// Arguments bound by this literal
    pub fn outputs(&self) -> BTreeSet<&Argument> {
        self.arguments_with(Direction::Out)
    }

    /// Display with argument modes, e.g. `p(+A,-B)`
    pub fn moded(&self) -> ModedLiteral<'_> {
        ModedLiteral { literal: self }
    }
}

impl PartialEq for Literal {
    fn eq(&self, other: &Self) -> bool {
        self.predicate == other.predicate && self.arguments == other.arguments
    }
}

impl Eq for Literal {}

impl Hash for Literal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.predicate.hash(state);
        self.arguments.hash(state);
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> Ordering {
        (&self.predicate, &self.arguments).cmp(&(&other.predicate, &other.arguments))
    }
}

impl fmt::Display for Literal {
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

/// Display wrapper for Literal that shows argument modes
pub struct ModedLiteral<'a> {
    literal: &'a Literal,
}

impl<'a> fmt::Display for ModedLiteral<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.literal.directions.is_empty() {
            return write!(f, "{}", self.literal);
        }
        if !self.literal.polarity {
            write!(f, "not ")?;
        }
        write!(f, "{}(", self.literal.predicate)?;
        for (i, arg) in self.literal.arguments.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}{}", self.literal.direction(i).symbol(), arg)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn ab() -> Vec<Argument> {
        vec![Argument::hvar("A"), Argument::hvar("B")]
    }

    #[test]
    fn test_identity_ignores_directions_and_polarity() {
        let plain = Literal::new("q", ab());
        let moded = Literal::with_directions("q", ab(), vec![Direction::In, Direction::Out]);
        let negated = moded.negated();

        assert_eq!(plain, moded);
        assert_eq!(plain, negated);

        let set: HashSet<Literal> = [plain, moded, negated].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_inputs_and_outputs() {
        let lit = Literal::with_directions(
            "q",
            vec![Argument::hvar("A"), Argument::hvar("B"), Argument::hvar("C")],
            vec![Direction::In, Direction::Out, Direction::Unknown],
        );
        assert_eq!(lit.inputs().into_iter().collect::<Vec<_>>(), vec![&Argument::hvar("A")]);
        assert_eq!(lit.outputs().into_iter().collect::<Vec<_>>(), vec![&Argument::hvar("B")]);
        assert_eq!(lit.direction(7), Direction::Unknown);
    }

    #[test]
    fn test_unknown_directions_leave_arguments_free() {
        let lit = Literal::new("q", ab());
        assert!(lit.inputs().is_empty());
        assert!(lit.outputs().is_empty());
    }

    #[test]
    fn test_display() {
        let lit = Literal::with_directions("q", ab(), vec![Direction::In, Direction::Out]);
        assert_eq!(lit.to_string(), "q(A,B)");
        assert_eq!(lit.moded().to_string(), "q(+A,-B)");
        assert_eq!(lit.negated().to_string(), "not q(A,B)");
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Direction::from_mode_name("in"), Some(Direction::In));
        assert_eq!(Direction::from_mode_name("out"), Some(Direction::Out));
        assert_eq!(Direction::from_mode_name("sideways"), None);
        assert_eq!(Direction::from_symbol('-'), Some(Direction::Out));
    }
}
