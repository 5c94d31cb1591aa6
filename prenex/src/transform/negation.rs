use super::{Depth, TransformResult};
use crate::ast::{BinaryOp, Formula};

/// Pushes every negation in `formula` as far inwards as it can go.
pub(super) fn push_inward(formula: &Formula, depth: Depth) -> TransformResult<Formula> {
    Ok(match formula {
        Formula::Proposition { .. } | Formula::Variable(_) => formula.clone(),
        Formula::Not(operand) => negate(operand, depth.deeper()?)?,
        Formula::Binary(op, left, right) => {
            let depth = depth.deeper()?;
            Formula::binary(*op, push_inward(left, depth)?, push_inward(right, depth)?)
        }
        Formula::Quantified(quantifier, variable, body) => {
            let body = push_inward(body, depth.deeper()?)?;
            Formula::quantified(*quantifier, variable.clone(), body)
        }
    })
}

/// Builds a formula equivalent to the negation of `formula`, with the negation pushed inwards.
fn negate(formula: &Formula, depth: Depth) -> TransformResult<Formula> {
    Ok(match formula {
        Formula::Proposition { .. } | Formula::Variable(_) => Formula::not(formula.clone()),
        Formula::Not(operand) => push_inward(operand, depth)?,
        Formula::Binary(op @ (BinaryOp::And | BinaryOp::Or), left, right) => {
            let depth = depth.deeper()?;
            Formula::binary(op.dual(), negate(left, depth)?, negate(right, depth)?)
        }

        // Implications should already be eliminated, so these are only rewritten below the
        // negation
        Formula::Binary(BinaryOp::Implies | BinaryOp::Iff, _, _) => {
            Formula::not(push_inward(formula, depth)?)
        }
        Formula::Quantified(quantifier, variable, body) => {
            let body = negate(body, depth.deeper()?)?;
            Formula::quantified(quantifier.dual(), variable.clone(), body)
        }
    })
}

/// Collapses every chain of negations into at most one negation.
pub(super) fn remove_double(formula: &Formula, depth: Depth) -> TransformResult<Formula> {
    Ok(match formula {
        Formula::Proposition { .. } | Formula::Variable(_) => formula.clone(),
        Formula::Not(operand) => {
            // Chains are peeled iteratively, so their length doesn't count towards the depth
            let mut current = operand.as_ref();
            let mut negated = true;
            while let Formula::Not(inner) = current {
                current = inner;
                negated = !negated;
            }
            let inner = remove_double(current, depth.deeper()?)?;
            if negated {
                Formula::not(inner)
            } else {
                inner
            }
        }
        Formula::Binary(op, left, right) => {
            let depth = depth.deeper()?;
            Formula::binary(*op, remove_double(left, depth)?, remove_double(right, depth)?)
        }
        Formula::Quantified(quantifier, variable, body) => {
            let body = remove_double(body, depth.deeper()?)?;
            Formula::quantified(*quantifier, variable.clone(), body)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::render, parser::tests::parse_formula};

    fn depth() -> Depth {
        Depth::new(100)
    }

    #[test]
    fn test_push_negation_inward() {
        let cases = [
            (r"\neg (A \land B)", r"\neg A \lor \neg B"),
            (r"\neg (A \lor B)", r"\neg A \land \neg B"),
            (r"\neg \neg A", "A"),
            (r"\neg \forall x P(x)", r"\exists x \neg P(x)"),
            (r"\neg \exists x P(x)", r"\forall x \neg P(x)"),
            (
                r"\neg \forall x (P(x) \land \neg Q(x))",
                r"\exists x (\neg P(x) \lor Q(x))",
            ),
            (r"\neg (A \implies B)", r"\neg (A \implies B)"),
            (r"A \lor \neg (B \land \neg C)", r"A \lor (\neg B \lor C)"),
        ];
        for (input, expected) in cases {
            let got = push_inward(&parse_formula(input), depth()).unwrap();
            assert_eq!(expected, render(&got), "while pushing negations in `{}`", input);
        }
    }

    #[test]
    fn test_remove_double_negation() {
        let cases = [
            (r"\neg \neg A", "A"),
            (r"\neg \neg \neg A", r"\neg A"),
            (r"\neg \neg (A \land \neg \neg \neg \neg B)", r"A \land B"),
            (r"\forall x \neg \neg P(x)", r"\forall x P(x)"),
            (r"\neg A \lor B", r"\neg A \lor B"),
        ];
        for (input, expected) in cases {
            let got = remove_double(&parse_formula(input), depth()).unwrap();
            assert_eq!(expected, render(&got), "while removing negations in `{}`", input);
            let again = remove_double(&got, depth()).unwrap();
            assert_eq!(got, again);
        }
    }

    #[test]
    fn test_long_negation_chains() {
        let mut formula = Formula::proposition("P", Vec::new());
        for _ in 0..10_000 {
            formula = Formula::not(formula);
        }
        let got = remove_double(&formula, Depth::new(3)).unwrap();
        assert_eq!(got, Formula::proposition("P", Vec::new()));

        // Dropping a formula this deep would otherwise overflow the stack
        let mut current = formula;
        while let Formula::Not(inner) = current {
            current = *inner;
        }
    }

    #[test]
    fn test_no_nested_negations() {
        let inputs = [
            r"\neg (\neg \forall x P(x) \lor \neg \neg \exists y Q(y))",
            r"\neg \neg \neg (A \land \neg (B \lor \neg C))",
        ];
        for input in inputs {
            let pushed = push_inward(&parse_formula(input), depth()).unwrap();
            let got = remove_double(&pushed, depth()).unwrap();
            assert!(!got.subformulas().any(|f| match f {
                Formula::Not(inner) => inner.is_negation() || inner.is_quantifier(),
                _ => false,
            }));
        }
    }
}
