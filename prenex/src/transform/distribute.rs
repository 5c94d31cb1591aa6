use super::{Depth, TransformResult};
use crate::ast::{BinaryOp, Formula};

/// Distributes the dual of `outer` over `outer` until no application of the dual has an
/// application of `outer` as a child. With `outer` being `And` this yields CNF, and with `Or`,
/// DNF.
pub(super) fn distribute(
    formula: &Formula,
    outer: BinaryOp,
    depth: Depth,
) -> TransformResult<Formula> {
    Ok(match formula {
        Formula::Proposition { .. } | Formula::Variable(_) => formula.clone(),
        Formula::Not(operand) => Formula::not(distribute(operand, outer, depth.deeper()?)?),
        Formula::Binary(op, left, right) => {
            let depth = depth.deeper()?;
            let left = distribute(left, outer, depth)?;
            let right = distribute(right, outer, depth)?;
            if *op == outer.dual() {
                combine(left, right, outer, depth)?
            } else {
                Formula::binary(*op, left, right)
            }
        }
        Formula::Quantified(quantifier, variable, body) => {
            let body = distribute(body, outer, depth.deeper()?)?;
            Formula::quantified(*quantifier, variable.clone(), body)
        }
    })
}

/// Joins two already distributed formulas with the dual of `outer`, pushing it below any
/// application of `outer`. The right operand is split first.
fn combine(
    left: Formula,
    right: Formula,
    outer: BinaryOp,
    depth: Depth,
) -> TransformResult<Formula> {
    Ok(match (left, right) {
        (left, Formula::Binary(op, a, b)) if op == outer => {
            let depth = depth.deeper()?;
            let a = combine(left.clone(), *a, outer, depth)?;
            let b = combine(left, *b, outer, depth)?;
            Formula::binary(outer, a, b)
        }
        (Formula::Binary(op, a, b), right) if op == outer => {
            let depth = depth.deeper()?;
            let a = combine(*a, right.clone(), outer, depth)?;
            let b = combine(*b, right, outer, depth)?;
            Formula::binary(outer, a, b)
        }
        (left, right) => Formula::binary(outer.dual(), left, right),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::render, parser::tests::parse_formula};

    /// Returns `true` if some application of `inner` has an application of `outer` as a child.
    fn has_misplaced_connective(formula: &Formula, inner: BinaryOp, outer: BinaryOp) -> bool {
        formula.subformulas().any(|f| match f {
            Formula::Binary(op, left, right) if *op == inner => {
                left.is_binary_op(outer) || right.is_binary_op(outer)
            }
            _ => false,
        })
    }

    #[test]
    fn test_cnf() {
        let cases = [
            (r"A \lor (B \land C)", r"(A \lor B) \land (A \lor C)"),
            (r"(A \land B) \lor C", r"(A \lor C) \land (B \lor C)"),
            (
                r"(A \land B) \lor (C \land D)",
                r"((A \lor C) \land (B \lor C)) \land ((A \lor D) \land (B \lor D))",
            ),
            (r"A \land (B \lor C)", r"A \land (B \lor C)"),
            (r"\neg A \lor B", r"\neg A \lor B"),
            (
                r"\forall x (P(x) \lor (Q(x) \land R(x)))",
                r"\forall x ((P(x) \lor Q(x)) \land (P(x) \lor R(x)))",
            ),
        ];
        for (input, expected) in cases {
            let got = distribute(&parse_formula(input), BinaryOp::And, Depth::new(100)).unwrap();
            assert_eq!(expected, render(&got), "while distributing `{}`", input);
            assert!(!has_misplaced_connective(&got, BinaryOp::Or, BinaryOp::And));
        }
    }

    #[test]
    fn test_dnf() {
        let cases = [
            (r"A \land (B \lor C)", r"(A \land B) \lor (A \land C)"),
            (r"(A \lor B) \land C", r"(A \land C) \lor (B \land C)"),
            (r"A \lor (B \land C)", r"A \lor (B \land C)"),
        ];
        for (input, expected) in cases {
            let got = distribute(&parse_formula(input), BinaryOp::Or, Depth::new(100)).unwrap();
            assert_eq!(expected, render(&got), "while distributing `{}`", input);
            assert!(!has_misplaced_connective(&got, BinaryOp::And, BinaryOp::Or));
        }
    }

    #[test]
    fn test_nested_distribution() {
        let input = r"A \lor (B \land (C \lor (D \land (E \lor F))))";
        let got = distribute(&parse_formula(input), BinaryOp::And, Depth::new(100)).unwrap();
        assert!(!has_misplaced_connective(&got, BinaryOp::Or, BinaryOp::And));
    }
}
