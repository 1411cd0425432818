//! Parser implementation using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::notation::ast::Occupancy;
use crate::notation::lexer::Token;
use crate::occupancy::{Matrix, OccupancyVector};
use crate::ParseError;

/// Turn source text into a token stream chumsky can consume
fn tokens<'a>(input: &'a str) -> impl ValueInput<'a, Token = Token, Span = SimpleSpan> {
    let len = input.len();
    let token_iter = crate::notation::lexer::lex(input).map(|(tok, span)| (tok, SimpleSpan::from(span)));
    Stream::from_iter(token_iter).map((len..len).into(), |(t, s): (_, _)| (t, s))
}

/// Parse either a vector or a matrix
pub fn parse(input: &str) -> Result<Occupancy, Vec<ParseError>> {
    occupancy_parser()
        .then_ignore(end())
        .parse(tokens(input))
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Parse a vector such as `(0, 0, 6, 2, 2, 2)`
pub fn parse_vector(input: &str) -> Result<OccupancyVector, Vec<ParseError>> {
    vector_parser()
        .then_ignore(end())
        .parse(tokens(input))
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

/// Parse a matrix such as `[0 0 0 / 0 0 0 / 2 2 2]`
pub fn parse_matrix(input: &str) -> Result<Matrix, Vec<ParseError>> {
    matrix_parser()
        .then_ignore(end())
        .parse(tokens(input))
        .into_result()
        .map_err(|errs| errs.into_iter().map(|e| e.into()).collect())
}

fn occupancy_parser<'a, I>() -> impl Parser<'a, I, Occupancy, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    choice((
        vector_parser().map(Occupancy::Vector),
        matrix_parser().map(Occupancy::Matrix),
    ))
}

/// A number small enough for a cell or a count, followed by an optional comma
fn cell_parser<'a, I>() -> impl Parser<'a, I, u8, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    select! {
        Token::Number(n) => n,
    }
    .labelled("number")
    .try_map(|n: u32, span: SimpleSpan| {
        u8::try_from(n).map_err(|_| Rich::custom(span, format!("{} is too large (at most 255)", n)))
    })
    .then_ignore(just(Token::Comma).or_not())
}

fn vector_parser<'a, I>() -> impl Parser<'a, I, OccupancyVector, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    cell_parser()
        .repeated()
        .collect::<Vec<u8>>()
        .delimited_by(just(Token::ParenOpen), just(Token::ParenClose))
        .try_map(|values, span: SimpleSpan| {
            OccupancyVector::from_slice(&values).map_err(|e| Rich::custom(span, e.reason()))
        })
}

fn matrix_parser<'a, I>() -> impl Parser<'a, I, Matrix, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let row = cell_parser().repeated().collect::<Vec<u8>>();

    // [[0, 0, 0], [0, 0, 0], [2, 2, 2]]
    let nested = row
        .clone()
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
        .separated_by(just(Token::Comma))
        .at_least(1)
        .allow_trailing()
        .collect::<Vec<_>>();

    // [0 0 0 / 0 0 0 / 2 2 2]
    let flat = row
        .separated_by(just(Token::Slash).or(just(Token::Semicolon)))
        .collect::<Vec<_>>();

    choice((nested, flat))
        .delimited_by(just(Token::BracketOpen), just(Token::BracketClose))
        .try_map(|rows, span: SimpleSpan| {
            Matrix::from_rows(&rows).map_err(|e| Rich::custom(span, e.reason()))
        })
}
