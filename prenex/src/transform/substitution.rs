use super::{Depth, TransformResult};
use crate::ast::{Formula, Term};

/// Replaces every free occurrence of the variable `name` in `formula` by `replacement`. This
/// covers both standalone variables and proposition arguments. A quantifier that binds `name`
/// shadows it, so its body is left untouched.
pub(super) fn substitute(
    formula: &Formula,
    name: &str,
    replacement: &Term,
    depth: Depth,
) -> TransformResult<Formula> {
    Ok(match formula {
        Formula::Variable(v) if v == name => Formula::from_term(replacement.clone()),
        Formula::Variable(_) => formula.clone(),
        Formula::Proposition { name: predicate, args } => Formula::Proposition {
            name: predicate.clone(),
            args: args.iter().map(|a| a.substitute(name, replacement)).collect(),
        },
        Formula::Not(operand) => {
            Formula::not(substitute(operand, name, replacement, depth.deeper()?)?)
        }
        Formula::Binary(op, left, right) => {
            let depth = depth.deeper()?;
            let left = substitute(left, name, replacement, depth)?;
            let right = substitute(right, name, replacement, depth)?;
            Formula::binary(*op, left, right)
        }
        Formula::Quantified(_, variable, _) if variable == name => formula.clone(),
        Formula::Quantified(quantifier, variable, body) => {
            let body = substitute(body, name, replacement, depth.deeper()?)?;
            Formula::quantified(*quantifier, variable.clone(), body)
        }
    })
}
