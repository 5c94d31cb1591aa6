//! The transformation passes that take a formula to prenex, Skolem and clausal normal forms.
//!
//! Every pass takes a formula by reference and builds a new one. Passes that need fresh names
//! (standardization and Skolemization) keep their counters in a context created for each call, so
//! two calls on independent formulas never share naming state.

mod clauses;
mod distribute;
mod error;
mod implication;
mod negation;
mod prenex;
mod skolem;
mod standardize;
mod substitution;

pub use clauses::{classify_horn, extract_clauses, literals, HornKind, HornReport};
pub use error::TransformError;

use crate::ast::{BinaryOp, Formula};
use indexmap::IndexSet;

pub type TransformResult<T> = Result<T, TransformError>;

pub const DEFAULT_MAX_DEPTH: usize = 100;

pub const DEFAULT_MAX_RENAME_SUFFIX: usize = 999;

/// The configuration shared by every pass.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    /// The maximum recursion depth of any pass. Exceeding it fails with
    /// `TransformError::RecursionLimit`.
    pub max_depth: usize,

    /// The largest numeric suffix tried when looking for a fresh variable name.
    pub max_rename_suffix: usize,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_rename_suffix: DEFAULT_MAX_RENAME_SUFFIX,
        }
    }
}

/// The recursion depth of a pass. Every recursive call goes through `deeper`, which fails once
/// the limit is reached.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Depth {
    current: usize,
    max: usize,
}

impl Depth {
    pub fn new(max: usize) -> Self {
        Self { current: 0, max }
    }

    pub fn deeper(self) -> TransformResult<Self> {
        if self.current >= self.max {
            return Err(TransformError::RecursionLimit(self.max));
        }
        Ok(Self { current: self.current + 1, ..self })
    }
}

/// Applies the transformation passes to formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct Transformer {
    config: Config,
}

impl Transformer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    fn depth(&self) -> Depth {
        Depth::new(self.config.max_depth)
    }

    /// Rewrites `A \implies B` into `\neg A \lor B`, and `A \iff B` into
    /// `(\neg A \lor B) \land (\neg B \lor A)`.
    pub fn eliminate_implication(&self, formula: &Formula) -> TransformResult<Formula> {
        implication::eliminate(formula, self.depth())
    }

    /// Moves negations inwards using De Morgan's laws and quantifier duality.
    pub fn push_negation_inward(&self, formula: &Formula) -> TransformResult<Formula> {
        negation::push_inward(formula, self.depth())
    }

    /// Collapses every chain of negations, of any length, into at most one negation.
    pub fn remove_double_negation(&self, formula: &Formula) -> TransformResult<Formula> {
        negation::remove_double(formula, self.depth())
    }

    /// Renames bound variables so that every quantifier binds a distinct name, also distinct from
    /// every free variable.
    pub fn standardize_variables(&self, formula: &Formula) -> TransformResult<Formula> {
        standardize::standardize(formula, self.depth(), self.config.max_rename_suffix)
    }

    /// Moves every quantifier to the front of the formula, preserving their relative order.
    pub fn hoist_quantifiers(&self, formula: &Formula) -> TransformResult<Formula> {
        prenex::hoist(formula, self.depth())
    }

    /// Replaces every existentially quantified variable with a Skolem constant or function.
    pub fn skolemize(&self, formula: &Formula) -> TransformResult<Formula> {
        skolem::skolemize(formula, self.depth())
    }

    /// Strips the leading universal quantifiers of a Skolemized formula.
    pub fn drop_quantifiers(&self, formula: &Formula) -> Formula {
        prenex::drop_leading_universals(formula)
    }

    /// Distributes disjunctions over conjunctions.
    pub fn distribute_to_cnf(&self, formula: &Formula) -> TransformResult<Formula> {
        distribute::distribute(formula, BinaryOp::And, self.depth())
    }

    /// Distributes conjunctions over disjunctions.
    pub fn distribute_to_dnf(&self, formula: &Formula) -> TransformResult<Formula> {
        distribute::distribute(formula, BinaryOp::Or, self.depth())
    }

    /// Discards every quantifier of `formula` and puts the remaining matrix in CNF.
    pub fn to_conjunctive_prenex(&self, formula: &Formula) -> TransformResult<Formula> {
        let matrix = prenex::strip_quantifiers(formula, self.depth())?;
        self.distribute_to_cnf(&matrix)
    }

    /// Discards every quantifier of `formula` and puts the remaining matrix in DNF.
    pub fn to_disjunctive_prenex(&self, formula: &Formula) -> TransformResult<Formula> {
        let matrix = prenex::strip_quantifiers(formula, self.depth())?;
        self.distribute_to_dnf(&matrix)
    }

    /// Returns the free variables of `formula`, in order of first occurrence.
    pub fn free_variables(&self, formula: &Formula) -> TransformResult<IndexSet<String>> {
        standardize::free_variables(formula, self.depth())
    }
}
