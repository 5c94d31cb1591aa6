//! The error type for the transformation passes.

use thiserror::Error;

/// The error type for the transformation passes. Every pass other than standardization only fails
/// when the formula is nested too deeply.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    /// No fresh name could be found for a bound variable.
    #[error("could not find a fresh name for variable '{name}' after trying {limit} suffixes")]
    NamesExhausted { name: String, limit: usize },

    /// A pass recursed deeper than the configured limit.
    #[error("formula is nested more than {0} levels deep")]
    RecursionLimit(usize),
}
