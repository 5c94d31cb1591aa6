use super::{substitution::substitute, Depth, TransformError, TransformResult};
use crate::ast::{Formula, Term};
use ahash::AHashSet;
use indexmap::IndexSet;

/// Renames bound variables so that every quantifier binds a distinct name. Quantifiers are
/// visited outermost first, and the first binder of each name keeps it.
pub(super) fn standardize(
    formula: &Formula,
    depth: Depth,
    max_suffix: usize,
) -> TransformResult<Formula> {
    let used = free_variables(formula, depth)?.into_iter().collect();
    let mut reserved = AHashSet::new();
    for f in formula.subformulas() {
        match f {
            Formula::Variable(v) | Formula::Quantified(_, v, _) => {
                reserved.insert(v.clone());
            }
            Formula::Proposition { args, .. } => {
                for arg in args {
                    arg.visit_variables(&mut |v| {
                        reserved.insert(v.to_owned());
                    });
                }
            }
            Formula::Not(_) | Formula::Binary(..) => (),
        }
    }
    let mut standardizer = Standardizer { used, reserved, max_suffix };
    standardizer.standardize(formula, depth)
}

struct Standardizer {
    /// Names that may no longer be bound: the free variables, and every name bound so far.
    used: AHashSet<String>,

    /// Every variable name that appears anywhere in the original formula. A renamed variable
    /// never takes one of these, so it can't be captured by a binder that wasn't visited yet.
    reserved: AHashSet<String>,

    max_suffix: usize,
}

impl Standardizer {
    fn standardize(&mut self, formula: &Formula, depth: Depth) -> TransformResult<Formula> {
        Ok(match formula {
            Formula::Proposition { .. } | Formula::Variable(_) => formula.clone(),
            Formula::Not(operand) => Formula::not(self.standardize(operand, depth.deeper()?)?),
            Formula::Binary(op, left, right) => {
                let depth = depth.deeper()?;
                let left = self.standardize(left, depth)?;
                let right = self.standardize(right, depth)?;
                Formula::binary(*op, left, right)
            }
            Formula::Quantified(quantifier, variable, body) => {
                let depth = depth.deeper()?;
                let fresh = self.fresh_name(variable)?;
                let body = if fresh == *variable {
                    self.standardize(body, depth)?
                } else {
                    log::trace!("renaming bound variable '{}' to '{}'", variable, fresh);
                    let renamed = substitute(body, variable, &Term::Var(fresh.clone()), depth)?;
                    self.standardize(&renamed, depth)?
                };
                Formula::quantified(*quantifier, fresh, body)
            }
        })
    }

    /// Returns `name` if it wasn't bound yet, or else `name` followed by the smallest suffix that
    /// gives an unused name.
    fn fresh_name(&mut self, name: &str) -> TransformResult<String> {
        if self.used.insert(name.to_owned()) {
            return Ok(name.to_owned());
        }
        for suffix in 1..=self.max_suffix {
            let candidate = format!("{}{}", name, suffix);
            if !self.reserved.contains(&candidate) && self.used.insert(candidate.clone()) {
                return Ok(candidate);
            }
        }
        Err(TransformError::NamesExhausted {
            name: name.to_owned(),
            limit: self.max_suffix,
        })
    }
}

/// Returns the free variables of `formula`, in order of first occurrence.
pub(super) fn free_variables(
    formula: &Formula,
    depth: Depth,
) -> TransformResult<IndexSet<String>> {
    fn collect<'a>(
        formula: &'a Formula,
        bound: &mut Vec<&'a str>,
        acc: &mut IndexSet<String>,
        depth: Depth,
    ) -> TransformResult<()> {
        match formula {
            Formula::Variable(v) => {
                if !bound.contains(&v.as_str()) {
                    acc.insert(v.clone());
                }
            }
            Formula::Proposition { args, .. } => {
                for arg in args {
                    arg.visit_variables(&mut |v| {
                        if !bound.contains(&v) {
                            acc.insert(v.to_owned());
                        }
                    });
                }
            }
            Formula::Not(operand) => collect(operand, bound, acc, depth.deeper()?)?,
            Formula::Binary(_, left, right) => {
                let depth = depth.deeper()?;
                collect(left, bound, acc, depth)?;
                collect(right, bound, acc, depth)?;
            }
            Formula::Quantified(_, variable, body) => {
                bound.push(variable.as_str());
                let result = collect(body, bound, acc, depth.deeper()?);
                bound.pop();
                result?;
            }
        }
        Ok(())
    }

    let mut acc = IndexSet::new();
    collect(formula, &mut Vec::new(), &mut acc, depth)?;
    Ok(acc)
}
