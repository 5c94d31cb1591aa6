//! The types for lexer and parser errors.

use crate::{
    ast::Quantifier,
    parser::{Command, Position, Token},
};
use thiserror::Error;

/// The error type for the lexer. Lexer errors are fatal and abort tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// The lexer encountered a backslash command that is not a known connective or quantifier.
    #[error("unrecognized command '\\{0}'")]
    UnknownCommand(String),

    /// The argument list of a proposition contains something other than lowercase letters,
    /// commas and whitespace.
    #[error("unexpected character '{0}' in proposition arguments")]
    MalformedArguments(char),
}

/// The error type for the parser.
///
/// These never abort parsing of the whole input. They are recorded as [`Diagnostic`]s, and the
/// parser either skips the offending tokens or drops the statement it was working on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A quantifier was not followed by the variable it binds.
    #[error("expected variable after '{0}', got '{1}'")]
    MissingBoundVariable(Quantifier, Token),

    /// A connective or quantifier is missing an operand.
    #[error("missing operand for '{0}'")]
    MissingOperand(Command),

    /// The parser encountered a token that can't start a formula. The token is skipped.
    #[error("unexpected token: '{0}'")]
    UnexpectedToken(Token),

    /// A `(` was never closed.
    #[error("missing closing parenthesis")]
    UnclosedParen,

    /// The formula is nested more deeply than the configured limit.
    #[error("formula is nested more than {0} levels deep")]
    NestingTooDeep(usize),
}

/// A parse error, together with the offset at which it happened.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{error} (at offset {position})")]
pub struct Diagnostic {
    pub error: ParseError,
    pub position: Position,
}

impl Diagnostic {
    pub fn new(error: ParseError, position: Position) -> Self {
        Self { error, position }
    }
}
