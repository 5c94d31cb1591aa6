use super::{substitution::substitute, Depth, TransformResult};
use crate::ast::{Formula, Quantifier, Term};

pub(super) fn skolemize(formula: &Formula, depth: Depth) -> TransformResult<Formula> {
    SkolemContext::new().skolemize(formula, &mut Vec::new(), depth)
}

/// The naming state of one Skolemization call. Constants are named `c1`, `c2`, ..., and functions
/// are named `f0`, `f1`, ..., each with its own counter.
struct SkolemContext {
    next_constant: usize,
    next_function: usize,
}

impl SkolemContext {
    fn new() -> Self {
        Self { next_constant: 1, next_function: 0 }
    }

    /// Creates the term that replaces an existential variable dominated by `universals`.
    fn fresh_term(&mut self, universals: &[String]) -> Term {
        if universals.is_empty() {
            let name = format!("c{}", self.next_constant);
            self.next_constant += 1;
            Term::App(name, Vec::new())
        } else {
            let name = format!("f{}", self.next_function);
            self.next_function += 1;
            let args = universals.iter().cloned().map(Term::Var).collect();
            Term::App(name, args)
        }
    }

    fn skolemize(
        &mut self,
        formula: &Formula,
        universals: &mut Vec<String>,
        depth: Depth,
    ) -> TransformResult<Formula> {
        Ok(match formula {
            Formula::Proposition { .. } | Formula::Variable(_) => formula.clone(),
            Formula::Not(operand) => {
                Formula::not(self.skolemize(operand, universals, depth.deeper()?)?)
            }
            Formula::Binary(op, left, right) => {
                let depth = depth.deeper()?;
                let left = self.skolemize(left, universals, depth)?;
                let right = self.skolemize(right, universals, depth)?;
                Formula::binary(*op, left, right)
            }
            Formula::Quantified(Quantifier::Forall, variable, body) => {
                universals.push(variable.clone());
                let body = self.skolemize(body, universals, depth.deeper()?);
                universals.pop();
                Formula::forall(variable.clone(), body?)
            }
            Formula::Quantified(Quantifier::Exists, variable, body) => {
                let depth = depth.deeper()?;
                let term = self.fresh_term(universals);
                log::trace!("replacing existential variable '{}' with '{}'", variable, term);
                let body = substitute(body, variable, &term, depth)?;
                self.skolemize(&body, universals, depth)?
            }
        })
    }
}
