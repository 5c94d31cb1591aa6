use super::{Depth, TransformResult};
use crate::ast::{Formula, Quantifier};

/// Removes every quantifier from `formula`, recording them in `prefix` in pre-order.
fn strip(
    formula: &Formula,
    prefix: &mut Vec<(Quantifier, String)>,
    depth: Depth,
) -> TransformResult<Formula> {
    Ok(match formula {
        Formula::Proposition { .. } | Formula::Variable(_) => formula.clone(),
        Formula::Not(operand) => Formula::not(strip(operand, prefix, depth.deeper()?)?),
        Formula::Binary(op, left, right) => {
            let depth = depth.deeper()?;
            let left = strip(left, prefix, depth)?;
            let right = strip(right, prefix, depth)?;
            Formula::binary(*op, left, right)
        }
        Formula::Quantified(quantifier, variable, body) => {
            prefix.push((*quantifier, variable.clone()));
            strip(body, prefix, depth.deeper()?)?
        }
    })
}

/// Removes every quantifier from `formula`, returning the quantifier-free matrix.
pub(super) fn strip_quantifiers(formula: &Formula, depth: Depth) -> TransformResult<Formula> {
    strip(formula, &mut Vec::new(), depth)
}

/// Moves every quantifier to the front of `formula`. The first quantifier found in pre-order
/// becomes the outermost one.
///
/// This is only equivalence-preserving once negations were pushed inwards and bound variables
/// were standardized apart.
pub(super) fn hoist(formula: &Formula, depth: Depth) -> TransformResult<Formula> {
    let mut prefix = Vec::new();
    let matrix = strip(formula, &mut prefix, depth)?;
    let result = prefix
        .into_iter()
        .rev()
        .fold(matrix, |body, (quantifier, variable)| {
            Formula::quantified(quantifier, variable, body)
        });
    Ok(result)
}

/// Strips the leading universal quantifiers of `formula`.
pub(super) fn drop_leading_universals(formula: &Formula) -> Formula {
    let mut current = formula;
    while let Formula::Quantified(Quantifier::Forall, _, body) = current {
        current = body;
    }
    current.clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::render, parser::tests::parse_formula};

    #[test]
    fn test_hoist() {
        let cases = [
            (r"\forall x P(x)", r"\forall x P(x)"),
            (
                r"\forall x P(x) \land \exists y Q(y)",
                r"\forall x \exists y (P(x) \land Q(y))",
            ),
            (
                r"(\exists z R(z) \lor \forall x \forall w S(x, w)) \land \exists y Q(y)",
                r"\exists z \forall x \forall w \exists y ((R(z) \lor S(x, w)) \land Q(y))",
            ),
            (r"\neg A \lor B", r"\neg A \lor B"),
        ];
        for (input, expected) in cases {
            let formula = parse_formula(input);
            let got = hoist(&formula, Depth::new(100)).unwrap();
            assert_eq!(expected, render(&got), "while hoisting `{}`", input);

            let original_order: Vec<_> = formula
                .subformulas()
                .filter_map(|f| match f {
                    Formula::Quantified(q, v, _) => Some((*q, v.as_str())),
                    _ => None,
                })
                .collect();
            let (prefix, matrix) = got.quantifier_prefix();
            assert_eq!(original_order, prefix);
            assert!(matrix.is_quantifier_free());
        }
    }

    #[test]
    fn test_strip_quantifiers() {
        let formula = parse_formula(r"\forall x (P(x) \lor \exists y Q(x, y))");
        let got = strip_quantifiers(&formula, Depth::new(100)).unwrap();
        assert_eq!(r"P(x) \lor Q(x, y)", render(&got));
    }

    #[test]
    fn test_drop_leading_universals() {
        let cases = [
            (r"\forall x \forall y R(x, y)", "R(x, y)"),
            (r"\forall x (P(x) \lor Q(x))", r"P(x) \lor Q(x)"),
            (r"\forall x \exists y R(x, y)", r"\exists y R(x, y)"),
            ("P", "P"),
        ];
        for (input, expected) in cases {
            let got = drop_leading_universals(&parse_formula(input));
            assert_eq!(expected, render(&got));
        }
    }
}
