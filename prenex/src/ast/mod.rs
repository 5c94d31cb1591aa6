//! The abstract syntax tree (AST) for first-order formulas.
//!
//! This module also contains the printer that renders formulas back into the LaTeX-like input
//! notation.

#[macro_use]
mod macros;
mod formula;
mod iter;
pub(crate) mod printer;

pub use formula::{BinaryOp, Formula, Program, Quantifier, Term};
pub use iter::Subformulas;
pub use printer::render;
