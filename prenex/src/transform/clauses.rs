use crate::ast::{BinaryOp, Formula};
use std::fmt;

/// Flattens `formula` into the operands of its top-level chain of `op`, from left to right.
fn flatten(formula: &Formula, op: BinaryOp) -> Vec<&Formula> {
    let mut result = Vec::new();
    let mut stack = vec![formula];
    while let Some(current) = stack.pop() {
        match current {
            Formula::Binary(o, left, right) if *o == op => {
                stack.push(right);
                stack.push(left);
            }
            other => result.push(other),
        }
    }
    result
}

/// Splits a formula in CNF into its clauses. A formula that isn't a conjunction is a single
/// clause.
pub fn extract_clauses(formula: &Formula) -> Vec<Formula> {
    flatten(formula, BinaryOp::And).into_iter().cloned().collect()
}

/// Splits a clause into its literals. A clause that isn't a disjunction is a single literal.
pub fn literals(clause: &Formula) -> Vec<&Formula> {
    flatten(clause, BinaryOp::Or)
}

/// The kind of a clause, according to how many positive and negative literals it has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HornKind {
    /// No positive literals, at least one negative literal.
    Query,

    /// Exactly one positive literal, and no negative literals.
    Fact,

    /// Exactly one positive literal, and at least one negative literal.
    Rule,

    /// No literals at all.
    Empty,

    /// Two or more positive literals.
    NonHorn,
}

impl_str_conversion_traits!(HornKind {
    Query: "query",
    Fact: "fact",
    Rule: "rule",
    Empty: "empty",
    NonHorn: "non-horn",
});

impl HornKind {
    pub fn classify(positive: usize, negative: usize) -> Self {
        match (positive, negative) {
            (0, 0) => HornKind::Empty,
            (0, _) => HornKind::Query,
            (1, 0) => HornKind::Fact,
            (1, _) => HornKind::Rule,
            _ => HornKind::NonHorn,
        }
    }

    pub fn is_horn(self) -> bool {
        self != HornKind::NonHorn
    }

    /// A longer, human-readable description of the kind.
    pub fn description(self) -> &'static str {
        match self {
            HornKind::Query => "query (all literals negative)",
            HornKind::Fact => "fact (one positive literal)",
            HornKind::Rule => "rule (one positive literal, one or more negative literals)",
            HornKind::Empty => "empty clause",
            HornKind::NonHorn => "non-Horn (several positive literals)",
        }
    }
}

/// The Horn classification of a single clause.
///
/// Only the number of negated and non-negated literals is taken into account, never what the
/// literals themselves are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HornReport {
    pub clause: Formula,
    pub positive: usize,
    pub negative: usize,
    pub kind: HornKind,
}

impl HornReport {
    pub fn new(clause: Formula) -> Self {
        let (negative, positive): (Vec<_>, Vec<_>) =
            literals(&clause).into_iter().partition(|l| l.is_negation());
        let (positive, negative) = (positive.len(), negative.len());
        let kind = HornKind::classify(positive, negative);
        Self { clause, positive, negative, kind }
    }

    /// A clause is Horn if it has at most one positive literal.
    pub fn is_horn(&self) -> bool {
        self.positive <= 1
    }
}

impl fmt::Display for HornReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}: {}", self.clause, self.kind.description())
    }
}

/// Classifies every clause in `clauses`.
pub fn classify_horn(clauses: &[Formula]) -> Vec<HornReport> {
    clauses.iter().cloned().map(HornReport::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ast::{render, Term},
        parser::tests::parse_formula,
    };

    #[test]
    fn test_extract_clauses() {
        let formula = parse_formula(r"(A \lor B) \land (\neg C \land (D \lor \neg E))");
        let clauses: Vec<_> = extract_clauses(&formula).iter().map(render).collect();
        assert_eq!(clauses, [r"A \lor B", r"\neg C", r"D \lor \neg E"]);

        let formula = parse_formula(r"A \lor B");
        assert_eq!(extract_clauses(&formula), [formula.clone()]);
    }

    #[test]
    fn test_literals() {
        let clause = parse_formula(r"(A \lor \neg B) \lor (C \lor D)");
        let got: Vec<_> = literals(&clause).into_iter().map(render).collect();
        assert_eq!(got, ["A", r"\neg B", "C", "D"]);
    }

    #[test]
    fn test_classify() {
        let cases = [
            ((0, 3), HornKind::Query),
            ((1, 0), HornKind::Fact),
            ((1, 2), HornKind::Rule),
            ((2, 1), HornKind::NonHorn),
            ((0, 0), HornKind::Empty),
            ((3, 0), HornKind::NonHorn),
        ];
        for ((positive, negative), expected) in cases {
            assert_eq!(expected, HornKind::classify(positive, negative));
        }
        assert!(HornKind::Empty.is_horn());
        assert!(!HornKind::NonHorn.is_horn());
        assert_eq!("non-horn", HornKind::NonHorn.to_string());
        assert_eq!(Ok(HornKind::Rule), "rule".parse());
    }

    #[test]
    fn test_horn_reports() {
        let cases = [
            (r"\neg P(x) \lor Q(x)", (1, 1), HornKind::Rule),
            (r"\neg A \lor \neg B \lor \neg C", (0, 3), HornKind::Query),
            ("P", (1, 0), HornKind::Fact),
            (r"A \lor B \lor \neg C", (2, 1), HornKind::NonHorn),
        ];
        for (input, (positive, negative), kind) in cases {
            let report = HornReport::new(parse_formula(input));
            assert_eq!((positive, negative), (report.positive, report.negative));
            assert_eq!(kind, report.kind);
            assert_eq!(kind.is_horn(), report.is_horn());
        }
    }

    #[test]
    fn test_skolem_terms_do_not_affect_classification() {
        let x = Term::Var("x".to_owned());
        let skolem = Term::App("f0".to_owned(), vec![x.clone()]);
        let plain = parse_formula(r"\neg R(x, y) \lor S(y)");
        let skolemized = Formula::or(
            Formula::not(Formula::proposition("R", vec![x, skolem.clone()])),
            Formula::proposition("S", vec![skolem]),
        );
        assert_eq!(r"\neg R(x, f0(x)) \lor S(f0(x))", render(&skolemized));

        let (plain, skolemized) = (HornReport::new(plain), HornReport::new(skolemized));
        assert_eq!(plain.kind, skolemized.kind);
        assert_eq!((1, 1), (skolemized.positive, skolemized.negative));

        let constant = Formula::proposition("P", vec![Term::App("c1".to_owned(), Vec::new())]);
        assert_eq!(HornKind::Fact, HornReport::new(constant).kind);
    }
}
