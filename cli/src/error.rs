use std::{fmt, io};

pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug)]
pub enum CliError {
    MissingInput,
    PrenexError(prenex::Error),
    Io(io::Error),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CliError::MissingInput => write!(f, "no input given: pass a file, `-`, or `--expr`"),
            CliError::PrenexError(e) => write!(f, "{}", e),
            CliError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<prenex::Error> for CliError {
    fn from(e: prenex::Error) -> Self {
        Self::PrenexError(e)
    }
}
