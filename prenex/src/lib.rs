#![deny(clippy::disallowed_methods)]
#![deny(clippy::self_named_module_files)]
#![warn(clippy::branches_sharing_code)]
#![warn(clippy::cloned_instead_of_copied)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::equatable_if_let)]
#![warn(clippy::explicit_into_iter_loop)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::from_iter_instead_of_collect)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::implicit_clone)]
#![warn(clippy::inconsistent_struct_constructor)]
#![warn(clippy::inefficient_to_string)]
#![warn(clippy::items_after_statements)]
#![warn(clippy::manual_assert)]
#![warn(clippy::map_unwrap_or)]
#![warn(clippy::match_wildcard_for_single_variants)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::semicolon_if_nothing_returned)]
#![warn(clippy::str_to_string)]
#![warn(clippy::trivially_copy_pass_by_ref)]
#![warn(clippy::unnested_or_patterns)]
#![warn(clippy::unused_self)]

#[macro_use]
pub mod ast;
pub mod parser;
pub mod pipeline;
pub mod transform;

use ast::{Formula, Program};
use parser::{LexError, Position, Token};
use pipeline::Normalization;
use thiserror::Error;
use transform::TransformError;

pub type PrenexResult<T> = Result<T, Error>;

#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("lexer error: {0} (at offset {1})")]
    Lexer(LexError, Position),

    // The parser itself never fails, but the caller may ask for a statement that doesn't exist
    #[error("no formula found in input")]
    NoFormula,

    #[error("transformation error: {0}")]
    Transform(#[from] TransformError),
}

/// Options for running the whole pipeline on a textual input.
#[derive(Debug, Clone, Copy, Default)]
pub struct Options {
    pub parser: parser::Config,
    pub transform: transform::Config,

    /// Index of the parsed statement to normalize. The first statement is used by default.
    pub statement: usize,
}

/// Splits `input` into tokens. Fails only on unknown commands or malformed proposition arguments.
pub fn tokenize(input: &str) -> PrenexResult<Vec<(Token, Position)>> {
    parser::tokenize(input)
}

/// Parses a token sequence into a `Program`. Parse errors are recorded as diagnostics in the
/// returned program instead of aborting.
pub fn parse(tokens: Vec<(Token, Position)>, config: parser::Config) -> Program {
    parser::parse(tokens, config)
}

/// Tokenizes and parses `input`.
pub fn parse_str(input: &str, config: parser::Config) -> PrenexResult<Program> {
    let tokens = tokenize(input)?;
    Ok(parse(tokens, config))
}

/// Runs every normalization stage on `formula`.
pub fn normalize(formula: &Formula, config: transform::Config) -> PrenexResult<Normalization> {
    Ok(pipeline::run(formula, config)?)
}

/// Parses `input` and normalizes the statement selected by `options.statement`.
///
/// The parsed program is returned alongside the normalization so callers can report its
/// diagnostics.
pub fn normalize_str(input: &str, options: Options) -> PrenexResult<(Program, Normalization)> {
    let program = parse_str(input, options.parser)?;
    let formula = program
        .statements
        .get(options.statement)
        .ok_or(Error::NoFormula)?;
    log::debug!("normalizing statement {}: {}", options.statement, formula);
    let normalization = normalize(formula, options.transform)?;
    Ok((program, normalization))
}
