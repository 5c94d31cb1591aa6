//! A parser for first-order formulas written in a LaTeX-like notation.

mod error;
mod lexer;

pub use error::{Diagnostic, LexError, ParseError};
pub use lexer::{Command, Lexer, Position, Token};

use crate::{
    ast::{Formula, Program, Quantifier, Term},
    PrenexResult,
};

pub const DEFAULT_MAX_DEPTH: usize = 100;

/// The parser configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// The maximum nesting depth of a formula. Deeper formulas are dropped with a
    /// `NestingTooDeep` diagnostic.
    pub max_depth: usize,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH }
    }
}

/// Splits `input` into tokens, each paired with its offset. The last token is always
/// `Token::Eof`.
pub fn tokenize(input: &str) -> PrenexResult<Vec<(Token, Position)>> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        let (token, position) = lexer.next_token()?;
        let done = token == Token::Eof;
        tokens.push((token, position));
        if done {
            return Ok(tokens);
        }
    }
}

/// Parses a sequence of tokens into a `Program`. This never fails: errors are recorded as
/// diagnostics, and every statement that could be parsed is kept.
pub fn parse(tokens: Vec<(Token, Position)>, config: Config) -> Program {
    Parser::new(tokens, config).parse_program()
}

type ParseResult<T> = Result<T, Diagnostic>;

/// A parser for the formula notation.
///
/// Methods that return `Ok(None)` have reached the end of the input without finding a formula.
/// An `Err` aborts the current statement, and `parse_program` recovers from it.
pub struct Parser {
    tokens: std::vec::IntoIter<(Token, Position)>,
    current_token: Token,
    current_position: Position,
    config: Config,
    depth: usize,
    diagnostics: Vec<Diagnostic>,
}

impl Parser {
    pub fn new(tokens: Vec<(Token, Position)>, config: Config) -> Self {
        let mut tokens = tokens.into_iter();
        let (current_token, current_position) = tokens.next().unwrap_or((Token::Eof, 0));
        Parser {
            tokens,
            current_token,
            current_position,
            config,
            depth: 0,
            diagnostics: Vec::new(),
        }
    }

    /// Advances the parser one token, and returns the previous `current_token`. Once the input
    /// is exhausted, the current token stays `Token::Eof`.
    fn next_token(&mut self) -> (Token, Position) {
        use std::mem::replace;

        let (new_token, new_position) = self
            .tokens
            .next()
            .unwrap_or((Token::Eof, self.current_position));
        let old_token = replace(&mut self.current_token, new_token);
        let old_position = replace(&mut self.current_position, new_position);
        (old_token, old_position)
    }

    /// Records a problem the parser could recover from without dropping the statement.
    fn warn(&mut self, error: ParseError, position: Position) {
        let diagnostic = Diagnostic::new(error, position);
        log::warn!("{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    /// Runs `parse_func` one nesting level deeper, failing if that exceeds the configured limit.
    fn nested<T, F>(&mut self, parse_func: F) -> ParseResult<T>
    where
        F: FnOnce(&mut Self) -> ParseResult<T>,
    {
        if self.depth >= self.config.max_depth {
            let error = ParseError::NestingTooDeep(self.config.max_depth);
            return Err(Diagnostic::new(error, self.current_position));
        }
        self.depth += 1;
        let result = parse_func(self);
        self.depth -= 1;
        result
    }

    /// Parses every statement in the input.
    pub fn parse_program(mut self) -> Program {
        let mut statements = Vec::new();
        while self.current_token != Token::Eof {
            self.depth = 0;
            match self.parse_expression(0) {
                Ok(Some(statement)) => statements.push(statement),
                Ok(None) => (),
                Err(diagnostic) => {
                    log::warn!("dropping statement: {}", diagnostic);
                    self.diagnostics.push(diagnostic);
                    self.recover();
                }
            }
        }
        Program { statements, diagnostics: self.diagnostics }
    }

    /// Skips tokens until one that can start a statement.
    fn recover(&mut self) {
        while self.current_token == Token::CloseParen {
            self.next_token();
        }
    }

    /// Parses an expression whose binary connectives all have precedence at least `min_prec`.
    fn parse_expression(&mut self, min_prec: u8) -> ParseResult<Option<Formula>> {
        let Some(left) = self.parse_primary()? else {
            return Ok(None);
        };
        let outer_depth = self.depth;
        let result = self.fold_connectives(left, min_prec);
        self.depth = outer_depth;
        result.map(Some)
    }

    /// Folds connectives of precedence at least `min_prec` onto `left`. Every fold makes the tree
    /// one level deeper, so each one counts towards the nesting limit.
    fn fold_connectives(&mut self, mut left: Formula, min_prec: u8) -> ParseResult<Formula> {
        loop {
            let (command, op) = match &self.current_token {
                Token::Command(c) => match c.binary_op() {
                    Some(op) if op.precedence() >= min_prec => (*c, op),
                    _ => break,
                },
                _ => break,
            };
            let (_, op_position) = self.next_token();
            if self.depth >= self.config.max_depth {
                let error = ParseError::NestingTooDeep(self.config.max_depth);
                return Err(Diagnostic::new(error, op_position));
            }

            // Right-associative connectives may take another connective of the same precedence
            // as their right operand
            let next_min_prec = if op.is_right_associative() {
                op.precedence()
            } else {
                op.precedence() + 1
            };
            match self.nested(|p| p.parse_expression(next_min_prec))? {
                Some(right) => {
                    left = Formula::binary(op, left, right);
                    self.depth += 1;
                }
                None => {
                    self.warn(ParseError::MissingOperand(command), op_position);
                    break;
                }
            }
        }
        Ok(left)
    }

    /// Parses a quantified formula, a negation, a parenthesized expression or an atom. Stray
    /// closing parentheses and binary connectives are skipped.
    fn parse_primary(&mut self) -> ParseResult<Option<Formula>> {
        loop {
            match &self.current_token {
                Token::Command(c) => {
                    let command = *c;
                    if let Some(quantifier) = command.quantifier() {
                        return self.parse_quantifier(command, quantifier).map(Some);
                    }
                    if command == Command::Not {
                        let (_, position) = self.next_token();
                        return match self.nested(Self::parse_primary)? {
                            Some(operand) => Ok(Some(Formula::not(operand))),
                            None => {
                                let error = ParseError::MissingOperand(Command::Not);
                                Err(Diagnostic::new(error, position))
                            }
                        };
                    }
                }
                Token::OpenParen => {
                    let (_, open_position) = self.next_token();
                    let inner = self.nested(|p| p.parse_expression(0))?;
                    if self.current_token == Token::CloseParen {
                        self.next_token();
                    } else {
                        self.warn(ParseError::UnclosedParen, open_position);
                    }
                    return Ok(inner);
                }
                Token::Proposition { .. } | Token::Variable(_) => {
                    return Ok(Some(self.parse_atom()));
                }
                Token::CloseParen => (),
                Token::Eof => return Ok(None),
            }
            let (token, position) = self.next_token();
            self.warn(ParseError::UnexpectedToken(token), position);
        }
    }

    /// Parses a quantifier, its bound variable and its body. The body is a single primary, so
    /// `\forall x P(x) \land Q` quantifies only `P(x)`.
    fn parse_quantifier(
        &mut self,
        command: Command,
        quantifier: Quantifier,
    ) -> ParseResult<Formula> {
        let (_, position) = self.next_token();

        let variable = match &self.current_token {
            Token::Variable(name) => name.clone(),
            other => {
                let error = ParseError::MissingBoundVariable(quantifier, other.clone());
                return Err(Diagnostic::new(error, self.current_position));
            }
        };
        self.next_token();

        match self.nested(|p| p.parse_expression(Quantifier::PRECEDENCE + 1))? {
            Some(body) => Ok(Formula::quantified(quantifier, variable, body)),
            None => Err(Diagnostic::new(ParseError::MissingOperand(command), position)),
        }
    }

    fn parse_atom(&mut self) -> Formula {
        match self.next_token().0 {
            Token::Proposition { name, args, .. } => {
                Formula::proposition(name, args.into_iter().map(Term::Var).collect())
            }
            Token::Variable(name) => Formula::Variable(name),
            _ => unreachable!(),
        }
    }
}
