use super::{Depth, TransformResult};
use crate::ast::{BinaryOp, Formula};

pub(super) fn eliminate(formula: &Formula, depth: Depth) -> TransformResult<Formula> {
    Ok(match formula {
        Formula::Proposition { .. } | Formula::Variable(_) => formula.clone(),
        Formula::Not(operand) => Formula::not(eliminate(operand, depth.deeper()?)?),
        Formula::Binary(op, left, right) => {
            let depth = depth.deeper()?;
            let (left, right) = (eliminate(left, depth)?, eliminate(right, depth)?);
            match op {
                BinaryOp::Implies => Formula::or(Formula::not(left), right),
                BinaryOp::Iff => {
                    let forward = Formula::or(Formula::not(left.clone()), right.clone());
                    let backward = Formula::or(Formula::not(right), left);
                    Formula::and(forward, backward)
                }
                BinaryOp::And | BinaryOp::Or => Formula::binary(*op, left, right),
            }
        }
        Formula::Quantified(quantifier, variable, body) => {
            let body = eliminate(body, depth.deeper()?)?;
            Formula::quantified(*quantifier, variable.clone(), body)
        }
    })
}
