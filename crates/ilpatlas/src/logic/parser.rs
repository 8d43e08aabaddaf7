//! Parser for the text form of literals and clauses
//!
//! ```text
//! clause   ::= [literal] ":-" literal ("," literal)* | literal
//! literal  ::= ["not"] name ["(" arg ("," arg)* ")"]
//! arg      ::= ["+" | "-" | "?"] (tuple | integer | Variable | constant)
//! tuple    ::= "(" arg ("," arg)* [","] ")"
//! ```
//!
//! Upper-case identifiers are hypothesis variables, lower-case identifiers
//! and integers are constants.

use super::core::{Argument, Clause, Direction, Literal};
use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, multispace0, multispace1, one_of},
    combinator::{all_consuming, map, map_res, opt, recognize},
    multi::separated_list1,
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Parse error: {0}")]
pub struct ParseError(pub String);

impl Literal {
    /// Parse a literal such as `not q(+A,-B)`
    pub fn parse(input: &str) -> Result<Literal, ParseError> {
        finish(input, parse_literal)
    }
}

impl Clause {
    /// Parse a clause such as `p(A,B):-q(A,C),r(C,B)`
    pub fn parse(input: &str) -> Result<Clause, ParseError> {
        finish(input, parse_clause)
    }
}

fn finish<T>(input: &str, parser: impl FnMut(&str) -> IResult<&str, T>) -> Result<T, ParseError> {
    all_consuming(delimited(multispace0, parser, multispace0))(input)
        .map(|(_, value)| value)
        .map_err(|e| ParseError(format!("{:?}", e)))
}

fn comma(input: &str) -> IResult<&str, char> {
    delimited(multispace0, char(','), multispace0)(input)
}

fn parse_clause(input: &str) -> IResult<&str, Clause> {
    alt((
        map(
            tuple((
                opt(terminated(parse_literal, multispace0)),
                tag(":-"),
                multispace0,
                separated_list1(comma, parse_literal),
            )),
            |(head, _, _, body)| Clause {
                head,
                body: body.into_iter().collect(),
            },
        ),
        map(parse_literal, |head| Clause::new(head, [])),
    ))(input)
}

fn parse_literal(input: &str) -> IResult<&str, Literal> {
    let (input, negated) = opt(terminated(tag("not"), multispace1))(input)?;
    let (input, predicate) = parse_lower_word(input)?;
    let (input, args) = opt(delimited(
        pair(char('('), multispace0),
        separated_list1(comma, parse_moded_argument),
        pair(multispace0, char(')')),
    ))(input)?;

    let args = args.unwrap_or_default();
    let directions = if args.iter().any(|(d, _)| d.is_some()) {
        args.iter().map(|(d, _)| d.unwrap_or(Direction::Unknown)).collect()
    } else {
        Vec::new()
    };
    let arguments = args.into_iter().map(|(_, arg)| arg).collect();

    let literal = Literal::with_directions(predicate, arguments, directions);
    Ok((input, if negated.is_some() { literal.negated() } else { literal }))
}

fn parse_moded_argument(input: &str) -> IResult<&str, (Option<Direction>, Argument)> {
    pair(
        opt(map(one_of("+-?"), |c| {
            Direction::from_symbol(c).unwrap_or(Direction::Unknown)
        })),
        parse_argument,
    )(input)
}

fn parse_argument(input: &str) -> IResult<&str, Argument> {
    alt((
        parse_tuple,
        map_res(take_while1(|c: char| c.is_ascii_digit()), |digits: &str| {
            digits.parse::<i64>().map(Argument::int)
        }),
        map(parse_upper_word, |name: &str| Argument::hvar(name)),
        map(parse_lower_word, |name: &str| Argument::symbol(name)),
    ))(input)
}

fn parse_tuple(input: &str) -> IResult<&str, Argument> {
    map(
        delimited(
            pair(char('('), multispace0),
            terminated(separated_list1(comma, parse_argument), opt(comma)),
            pair(multispace0, char(')')),
        ),
        Argument::Tuple,
    )(input)
}

fn parse_upper_word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_uppercase()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}

fn parse_lower_word(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        take_while1(|c: char| c.is_ascii_lowercase()),
        take_while(|c: char| c.is_alphanumeric() || c == '_'),
    ))(input)
}
