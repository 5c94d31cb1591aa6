//! A printer that renders formulas back into the LaTeX-like input notation.
//!
//! Parentheses are only added where needed, with a few deliberate exceptions: binary operands of
//! `\land` and `\lor` are always parenthesized, and so is the left operand of a chain of
//! `\implies` or `\iff`. Printing is therefore stable under re-parsing.

use super::{BinaryOp, Formula, Term};
use std::fmt;

/// Renders a formula into the input notation.
pub fn render(formula: &Formula) -> String {
    formula.to_string()
}

struct LatexPrinter<'a> {
    inner: &'a mut dyn fmt::Write,
}

impl<'a> LatexPrinter<'a> {
    fn write_formula(&mut self, formula: &Formula) -> fmt::Result {
        match formula {
            Formula::Proposition { name, args } => write_application(self.inner, name, args),
            Formula::Variable(name) => write!(self.inner, "{}", name),
            Formula::Not(operand) => {
                write!(self.inner, "\\neg ")?;
                self.write_grouped(operand, operand.is_binary())
            }
            Formula::Binary(op, left, right) => {
                self.write_grouped(left, needs_parentheses(*op, left, false))?;
                write!(self.inner, " {} ", op)?;
                self.write_grouped(right, needs_parentheses(*op, right, true))
            }
            Formula::Quantified(quantifier, variable, body) => {
                // A quantifier only scopes over a single primary, so a binary body must be grouped
                write!(self.inner, "{} {} ", quantifier, variable)?;
                self.write_grouped(body, body.is_binary())
            }
        }
    }

    fn write_grouped(&mut self, formula: &Formula, parenthesize: bool) -> fmt::Result {
        if parenthesize {
            write!(self.inner, "(")?;
            self.write_formula(formula)?;
            write!(self.inner, ")")
        } else {
            self.write_formula(formula)
        }
    }
}

/// Decides whether the operand `child` of a `parent` connective must be parenthesized.
fn needs_parentheses(parent: BinaryOp, child: &Formula, is_right_child: bool) -> bool {
    let Formula::Binary(child_op, _, _) = child else {
        return false;
    };
    if child_op.precedence() != parent.precedence() {
        return true;
    }
    match parent {
        BinaryOp::Implies => !is_right_child,
        BinaryOp::Iff => *child_op != BinaryOp::Iff || !is_right_child,
        BinaryOp::And | BinaryOp::Or => true,
    }
}

fn write_application(f: &mut dyn fmt::Write, name: &str, args: &[Term]) -> fmt::Result {
    write!(f, "{}", name)?;
    if let [head, tail @ ..] = args {
        write!(f, "({}", head)?;
        for arg in tail {
            write!(f, ", {}", arg)?;
        }
        write!(f, ")")?;
    }
    Ok(())
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        LatexPrinter { inner: f }.write_formula(self)
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Var(name) => write!(f, "{}", name),
            Term::App(name, args) => write_application(f, name, args),
        }
    }
}
