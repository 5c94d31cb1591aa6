//! A lexer for the LaTeX-like formula notation.

use crate::{
    ast::{BinaryOp, Quantifier},
    parser::LexError,
    Error, PrenexResult,
};
use std::{fmt, str::Chars, str::FromStr};

/// A token in the formula notation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The `(` token.
    OpenParen,

    /// The `)` token.
    CloseParen,

    /// A proposition: an uppercase letter followed by any number of lowercase letters, optionally
    /// followed by a parenthesized list of single-letter arguments, e.g. `P`, `Loves(x, y)`.
    ///
    /// `text` holds the proposition exactly as it was written, including the argument list.
    Proposition {
        name: String,
        args: Vec<String>,
        text: String,
    },

    /// A standalone variable, which is a single lowercase letter.
    Variable(String),

    /// A backslash command, i.e. a connective or a quantifier.
    Command(Command),

    /// A signal token to indicate the end of the input.
    Eof,
}

/// A backslash command, naming a connective or a quantifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    And,
    Or,
    Not,
    Implies,
    Iff,
    Forall,
    Exists,
}

impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "land" | "wedge" => Command::And,
            "lor" | "vee" => Command::Or,
            "neg" | "sim" => Command::Not,
            "implies" | "rightarrow" => Command::Implies,
            "iff" | "leftrightarrow" => Command::Iff,
            "forall" => Command::Forall,
            "exists" => Command::Exists,
            _ => return Err(()),
        })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.binary_op() {
            Some(op) => write!(f, "{}", op),
            None => match self.quantifier() {
                Some(q) => write!(f, "{}", q),
                None => write!(f, "\\neg"),
            },
        }
    }
}

impl Command {
    /// The binary connective denoted by this command, if any.
    pub fn binary_op(self) -> Option<BinaryOp> {
        match self {
            Command::And => Some(BinaryOp::And),
            Command::Or => Some(BinaryOp::Or),
            Command::Implies => Some(BinaryOp::Implies),
            Command::Iff => Some(BinaryOp::Iff),
            Command::Not | Command::Forall | Command::Exists => None,
        }
    }

    /// The quantifier denoted by this command, if any.
    pub fn quantifier(self) -> Option<Quantifier> {
        match self {
            Command::Forall => Some(Quantifier::Forall),
            Command::Exists => Some(Quantifier::Exists),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Token::OpenParen => write!(f, "("),
            Token::CloseParen => write!(f, ")"),
            Token::Proposition { text, .. } => write!(f, "{}", text),
            Token::Variable(name) => write!(f, "{}", name),
            Token::Command(c) => write!(f, "{}", c),
            Token::Eof => write!(f, "EOF"),
        }
    }
}

/// The offset, in characters, of a token in the source input.
pub type Position = usize;

/// A lexer for the formula notation.
pub struct Lexer<'a> {
    input: Chars<'a>,
    current_char: Option<char>,
    position: Position,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let mut input = input.chars();
        let current_char = input.next();
        Lexer { input, current_char, position: 0 }
    }

    /// Advances the lexer by one character, and returns the previous `current_char`.
    fn next_char(&mut self) -> Option<char> {
        let new = self.input.next();
        if self.current_char.is_some() {
            self.position += 1;
        }
        std::mem::replace(&mut self.current_char, new)
    }

    /// Reads characters while the given predicate returns `true`, and stores them in a `String`.
    ///
    /// At the end, `self.current_char` will be the first character that didn't satisfy the
    /// predicate.
    fn read_chars_while<P: Fn(char) -> bool>(&mut self, predicate: P) -> String {
        let mut result = String::new();
        while let Some(c) = self.current_char {
            if !predicate(c) {
                break;
            }
            result.push(c);
            self.next_char();
        }
        result
    }

    fn drop_while_whitespace(&mut self) {
        while self.current_char.is_some_and(char::is_whitespace) {
            self.next_char();
        }
    }

    /// Reads a token from the input source.
    pub fn next_token(&mut self) -> PrenexResult<(Token, Position)> {
        loop {
            self.drop_while_whitespace();
            let start_position = self.position;
            let token = match self.current_char {
                Some('(') => {
                    self.next_char();
                    Token::OpenParen
                }
                Some(')') => {
                    self.next_char();
                    Token::CloseParen
                }
                Some('\\') => self.read_command()?,
                Some(c) if c.is_ascii_uppercase() => self.read_proposition()?,
                Some(c) if c.is_ascii_lowercase() => {
                    self.next_char();
                    Token::Variable(c.to_string())
                }
                None => Token::Eof,
                Some(other) => {
                    log::warn!(
                        "ignoring unexpected character '{}' at offset {}",
                        other,
                        start_position
                    );
                    self.next_char();
                    continue;
                }
            };
            return Ok((token, start_position));
        }
    }

    /// Reads a backslash command, e.g. `\land`.
    fn read_command(&mut self) -> PrenexResult<Token> {
        let start_position = self.position;
        self.next_char(); // Consume `\`
        let word = self.read_chars_while(|c| c.is_ascii_alphabetic());
        match Command::from_str(&word) {
            Ok(command) => Ok(Token::Command(command)),
            Err(()) => Err(Error::Lexer(LexError::UnknownCommand(word), start_position)),
        }
    }

    /// Reads a proposition name and its optional argument list.
    fn read_proposition(&mut self) -> PrenexResult<Token> {
        let mut name = String::new();
        name.extend(self.next_char());
        name.push_str(&self.read_chars_while(|c| c.is_ascii_lowercase()));

        let mut text = name.clone();
        let mut args = Vec::new();
        if self.current_char == Some('(') {
            text.push('(');
            self.next_char();
            while let Some(c) = self.current_char {
                match c {
                    ')' => break,
                    c if c.is_ascii_lowercase() => args.push(c.to_string()),
                    c if c == ',' || c.is_whitespace() => (),
                    other => {
                        let e = LexError::MalformedArguments(other);
                        return Err(Error::Lexer(e, self.position));
                    }
                }
                text.push(c);
                self.next_char();
            }
            // An argument list left open at the end of the input is accepted as is
            if self.current_char == Some(')') {
                text.push(')');
                self.next_char();
            }
        }
        Ok(Token::Proposition { name, args, text })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_one(input: &str) -> PrenexResult<Token> {
        Lexer::new(input).next_token().map(|(tk, _)| tk)
    }

    fn lex_all(input: &str) -> Vec<Token> {
        let mut lex = Lexer::new(input);
        let mut result = Vec::new();
        loop {
            let tk = lex.next_token().expect("lexer error during test").0;
            if tk == Token::Eof {
                break;
            }
            result.push(tk);
        }
        result
    }

    fn prop(name: &str, args: &[&str], text: &str) -> Token {
        Token::Proposition {
            name: name.into(),
            args: args.iter().map(|&a| a.to_owned()).collect(),
            text: text.into(),
        }
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(lex_all(""), vec![]);
        assert_eq!(lex_all("   \n  \t\n "), vec![]);
    }

    #[test]
    fn test_commands_and_synonyms() {
        let input = r"\land \wedge \lor \vee \neg \sim \implies \rightarrow \iff \leftrightarrow
            \forall \exists";
        let expected = [
            Command::And,
            Command::And,
            Command::Or,
            Command::Or,
            Command::Not,
            Command::Not,
            Command::Implies,
            Command::Implies,
            Command::Iff,
            Command::Iff,
            Command::Forall,
            Command::Exists,
        ]
        .map(Token::Command);
        assert_eq!(lex_all(input), expected);

        assert_eq!(
            lex_one(r"\cup"),
            Err(Error::Lexer(LexError::UnknownCommand("cup".into()), 0))
        );
        assert!(matches!(
            lex_one(r"\ "),
            Err(Error::Lexer(LexError::UnknownCommand(s), 0)) if s.is_empty()
        ));
    }

    #[test]
    fn test_propositions() {
        let input = "P Rain Loves(x, y) Q(x,y z) R()";
        let expected = vec![
            prop("P", &[], "P"),
            prop("Rain", &[], "Rain"),
            prop("Loves", &["x", "y"], "Loves(x, y)"),
            prop("Q", &["x", "y", "z"], "Q(x,y z)"),
            prop("R", &[], "R()"),
        ];
        assert_eq!(lex_all(input), expected);

        // A space before the parenthesis ends the proposition
        assert_eq!(
            lex_all("P (x)"),
            vec![
                prop("P", &[], "P"),
                Token::OpenParen,
                Token::Variable("x".into()),
                Token::CloseParen,
            ]
        );

        assert_eq!(
            lex_one("P(x, Y)"),
            Err(Error::Lexer(LexError::MalformedArguments('Y'), 5))
        );
        assert_eq!(
            lex_one(r"A(B \land C)"),
            Err(Error::Lexer(LexError::MalformedArguments('B'), 2))
        );
    }

    #[test]
    fn test_variables_and_parens() {
        assert_eq!(
            lex_all("(x)y"),
            vec![
                Token::OpenParen,
                Token::Variable("x".into()),
                Token::CloseParen,
                Token::Variable("y".into()),
            ]
        );
    }

    #[test]
    fn test_positions() {
        let mut lex = Lexer::new(r"\forall x (P(x) \implies Q)");
        let mut positions = Vec::new();
        loop {
            let (tk, pos) = lex.next_token().unwrap();
            positions.push(pos);
            if tk == Token::Eof {
                break;
            }
        }
        assert_eq!(positions, vec![0, 8, 10, 11, 16, 25, 26, 27]);
    }

    #[test]
    fn test_unknown_characters_are_skipped() {
        assert_eq!(
            lex_all("P & 1 Q"),
            vec![prop("P", &[], "P"), prop("Q", &[], "Q")]
        );
    }
}
