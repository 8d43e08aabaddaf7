//! Decoding enumerator models into programs
//!
//! A model is an unordered collection of tagged facts:
//!
//! - `head_literal(Clause, Pred, Arity, (V0,...))`
//! - `body_literal(Clause, Pred, Arity, (V0,...))`
//! - `direction(Pred, Index, in|out)`
//! - `before(Clause1, Clause2)`
//! - `min_clause(Clause, Size)`
//!
//! Anything else is enumerator bookkeeping and is skipped. Variable symbols
//! are numbered slots; slot `i` becomes the `i`-th capital letter so that
//! structurally identical clauses compare equal whatever numbering or fact
//! order the enumerator used.

use crate::logic::{Argument, Clause, Direction, Literal, Program};
use crate::model::symbol::Symbol;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;
use tracing::trace;

/// Clause id -> clause ids that must come after it
pub type BeforeMap = BTreeMap<usize, BTreeSet<usize>>;

/// Clause id -> minimum literal count attributed to the clause
pub type MinClauseMap = BTreeMap<usize, usize>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralFact {
    pub clause_id: usize,
    pub predicate: String,
    pub arity: usize,
    /// Variable slots, in argument order
    pub slots: Vec<usize>,
}

/// A recognised model fact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelFact {
    HeadLiteral(LiteralFact),
    BodyLiteral(LiteralFact),
    Direction {
        predicate: String,
        index: usize,
        direction: Direction,
    },
    Before {
        first: usize,
        second: usize,
    },
    MinClause {
        clause_id: usize,
        size: usize,
    },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    #[error("not a fact")]
    NotAFact,
    #[error("unrecognised tag `{0}`")]
    UnknownTag(String),
    #[error("expected {expected} arguments, found {found}")]
    WrongArity { expected: usize, found: usize },
    #[error("argument {0} is not a predicate name")]
    NotAPredicate(usize),
    #[error("argument {0} is not a non-negative number")]
    NotANumber(usize),
    #[error("argument {0} is not a tuple of variable slots")]
    NotASlotTuple(usize),
    #[error("declared arity {arity} but {slots} variable slots")]
    SlotCountMismatch { arity: usize, slots: usize },
    #[error("unrecognised argument direction `{0}`")]
    UnknownDirection(String),
}

/// A model fact the decoder did not use
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Skipped fact {fact}: {reason}")]
pub struct SkippedFact {
    pub fact: String,
    pub reason: SkipReason,
}

/// Output of decoding one model
#[derive(Debug, Clone, Default)]
pub struct DecodedProgram {
    pub clauses: Program,
    pub before: BeforeMap,
    pub min_clause: MinClauseMap,
    pub skipped: Vec<SkippedFact>,
}

/// Name of the variable in slot `index`: `A`..`Z`, then `A1`..`Z1`, ...
pub fn variable_name(index: usize) -> String {
    let letter = char::from(b'A' + (index % 26) as u8);
    match index / 26 {
        0 => letter.to_string(),
        round => format!("{}{}", letter, round),
    }
}

fn predicate_name(symbol: &Symbol) -> Option<String> {
    match symbol {
        Symbol::Function { name, .. } if !name.is_empty() => Some(name.clone()),
        Symbol::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn natural(symbol: &Symbol) -> Option<usize> {
    symbol.number().and_then(|n| usize::try_from(n).ok())
}

impl ModelFact {
    /// Recognise a model fact, or say why it was skipped
    pub fn parse(symbol: &Symbol) -> Result<ModelFact, SkippedFact> {
        let skip = |reason: SkipReason| SkippedFact {
            fact: symbol.to_string(),
            reason,
        };
        let Some(tag) = symbol.name() else {
            return Err(skip(SkipReason::NotAFact));
        };
        let args = symbol.arguments();
        let arity = |expected: usize| {
            if args.len() == expected {
                Ok(())
            } else {
                Err(skip(SkipReason::WrongArity {
                    expected,
                    found: args.len(),
                }))
            }
        };
        let number = |i: usize| natural(&args[i]).ok_or_else(|| skip(SkipReason::NotANumber(i)));

        match tag {
            "head_literal" | "body_literal" => {
                arity(4)?;
                let predicate =
                    predicate_name(&args[1]).ok_or_else(|| skip(SkipReason::NotAPredicate(1)))?;
                let slots = match &args[3] {
                    Symbol::Function { arguments, .. } => arguments
                        .iter()
                        .map(natural)
                        .collect::<Option<Vec<_>>>()
                        .ok_or_else(|| skip(SkipReason::NotASlotTuple(3)))?,
                    _ => return Err(skip(SkipReason::NotASlotTuple(3))),
                };
                let declared = number(2)?;
                if declared != slots.len() {
                    return Err(skip(SkipReason::SlotCountMismatch {
                        arity: declared,
                        slots: slots.len(),
                    }));
                }
                let fact = LiteralFact {
                    clause_id: number(0)?,
                    predicate,
                    arity: declared,
                    slots,
                };
                Ok(if tag == "head_literal" {
                    ModelFact::HeadLiteral(fact)
                } else {
                    ModelFact::BodyLiteral(fact)
                })
            }
            "direction" | "direction_" => {
                arity(3)?;
                let predicate =
                    predicate_name(&args[0]).ok_or_else(|| skip(SkipReason::NotAPredicate(0)))?;
                let mode = predicate_name(&args[2]).unwrap_or_else(|| args[2].to_string());
                let direction = Direction::from_mode_name(&mode)
                    .ok_or_else(|| skip(SkipReason::UnknownDirection(mode.clone())))?;
                Ok(ModelFact::Direction {
                    predicate,
                    index: number(1)?,
                    direction,
                })
            }
            "before" => {
                arity(2)?;
                Ok(ModelFact::Before {
                    first: number(0)?,
                    second: number(1)?,
                })
            }
            "min_clause" => {
                arity(2)?;
                Ok(ModelFact::MinClause {
                    clause_id: number(0)?,
                    size: number(1)?,
                })
            }
            other => Err(skip(SkipReason::UnknownTag(other.to_string()))),
        }
    }
}

/// Decode a model into clauses plus ordering and size metadata.
///
/// Clauses come out in clause-id order. Body literals of a clause id with
/// no head literal are dropped.
pub fn decode_model(model: &[Symbol]) -> DecodedProgram {
    let mut decoded = DecodedProgram::default();
    let mut directions: HashMap<String, HashMap<usize, Direction>> = HashMap::new();
    let mut heads: BTreeMap<usize, LiteralFact> = BTreeMap::new();
    let mut bodies: BTreeMap<usize, Vec<LiteralFact>> = BTreeMap::new();

    for symbol in model {
        match ModelFact::parse(symbol) {
            Ok(ModelFact::HeadLiteral(fact)) => {
                heads.insert(fact.clause_id, fact);
            }
            Ok(ModelFact::BodyLiteral(fact)) => {
                bodies.entry(fact.clause_id).or_default().push(fact);
            }
            Ok(ModelFact::Direction {
                predicate,
                index,
                direction,
            }) => {
                directions.entry(predicate).or_default().insert(index, direction);
            }
            Ok(ModelFact::Before { first, second }) => {
                decoded.before.entry(first).or_default().insert(second);
            }
            Ok(ModelFact::MinClause { clause_id, size }) => {
                let entry = decoded.min_clause.entry(clause_id).or_insert(0);
                *entry = (*entry).max(size);
            }
            Err(skipped) => {
                trace!(%skipped, "skipping model fact");
                decoded.skipped.push(skipped);
            }
        }
    }

    let build = |fact: &LiteralFact| {
        let modes = directions.get(&fact.predicate);
        let dirs = (0..fact.arity)
            .map(|i| {
                modes
                    .and_then(|m| m.get(&i))
                    .copied()
                    .unwrap_or(Direction::Unknown)
            })
            .collect();
        let args = fact
            .slots
            .iter()
            .map(|&slot| Argument::hvar(variable_name(slot)))
            .collect();
        Literal::with_directions(fact.predicate.clone(), args, dirs)
    };

    for (clause_id, head) in &heads {
        let body = bodies.get(clause_id).into_iter().flatten().map(build);
        decoded.clauses.push(Clause::new(build(head), body));
    }
    for clause_id in bodies.keys().filter(|id| !heads.contains_key(id)) {
        trace!(clause_id, "body literals without a head literal");
    }

    decoded
}
