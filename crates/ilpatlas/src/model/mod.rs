//! Enumerator models and their decoding into programs

pub mod decode;
pub mod symbol;

pub use decode::{
    decode_model, variable_name, BeforeMap, DecodedProgram, LiteralFact, MinClauseMap,
    ModelFact, SkipReason, SkippedFact,
};
pub use symbol::Symbol;
