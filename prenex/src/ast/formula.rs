use super::Subformulas;
use crate::parser::Diagnostic;

/// A term appearing as an argument of a proposition.
///
/// Arguments written in the input are always variables. Function applications only appear after
/// Skolemization: `App("c1", [])` is a Skolem constant, and `App("f0", [x, y])` is a Skolem
/// function applied to the universal variables that dominate the eliminated existential.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Term {
    /// A variable, e.g. `x`.
    Var(String),

    /// A function application, possibly with no arguments.
    App(String, Vec<Term>),
}

impl Term {
    /// Calls `visit` on every variable in this term, from left to right.
    pub fn visit_variables<'a>(&'a self, visit: &mut impl FnMut(&'a str)) {
        match self {
            Term::Var(v) => visit(v),
            Term::App(_, args) => args.iter().for_each(|a| a.visit_variables(visit)),
        }
    }

    /// Returns a copy of this term where every occurrence of the variable `name` is replaced by
    /// `replacement`.
    pub fn substitute(&self, name: &str, replacement: &Term) -> Term {
        match self {
            Term::Var(v) if v == name => replacement.clone(),
            Term::Var(_) => self.clone(),
            Term::App(f, args) => Term::App(
                f.clone(),
                args.iter().map(|a| a.substitute(name, replacement)).collect(),
            ),
        }
    }
}

/// A binary connective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// Conjunction, `\land`.
    And,

    /// Disjunction, `\lor`.
    Or,

    /// Implication, `\implies`.
    Implies,

    /// Biconditional, `\iff`.
    Iff,
}

impl_str_conversion_traits!(BinaryOp {
    And: "\\land",
    Or: "\\lor",
    Implies: "\\implies",
    Iff: "\\iff",
});

impl BinaryOp {
    /// The binding strength of the connective. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::And => 4,
            BinaryOp::Or => 3,
            BinaryOp::Implies => 2,
            BinaryOp::Iff => 1,
        }
    }

    /// Implications and biconditionals associate to the right; conjunctions and disjunctions to
    /// the left.
    pub fn is_right_associative(self) -> bool {
        matches!(self, BinaryOp::Implies | BinaryOp::Iff)
    }

    /// For `And` returns `Or` and vice versa. Other connectives have no dual and are returned
    /// unchanged.
    pub fn dual(self) -> Self {
        match self {
            BinaryOp::And => BinaryOp::Or,
            BinaryOp::Or => BinaryOp::And,
            other => other,
        }
    }
}

/// A quantifier, either `\forall` or `\exists`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantifier {
    Forall,
    Exists,
}

impl_str_conversion_traits!(Quantifier {
    Forall: "\\forall",
    Exists: "\\exists",
});

impl Quantifier {
    /// Quantifiers bind tighter than every connective.
    pub const PRECEDENCE: u8 = 6;

    pub fn dual(self) -> Self {
        match self {
            Quantifier::Forall => Quantifier::Exists,
            Quantifier::Exists => Quantifier::Forall,
        }
    }
}

/// A first-order formula.
///
/// Formulas are plain trees: every pass in `transform` takes a formula by reference and builds a
/// new one, so subtrees of earlier stages stay valid.
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Formula {
    /// A proposition, possibly applied to arguments, e.g. `P`, `Loves(x, y)`. Skolem constants
    /// and functions that replace a bare variable are also represented by this variant.
    Proposition { name: String, args: Vec<Term> },

    /// A standalone variable, e.g. `x`.
    Variable(String),

    /// A negation.
    Not(Box<Formula>),

    /// An application of a binary connective.
    Binary(BinaryOp, Box<Formula>, Box<Formula>),

    /// A quantified formula, binding a single variable.
    Quantified(Quantifier, String, Box<Formula>),
}

impl Formula {
    pub fn proposition(name: impl Into<String>, args: Vec<Term>) -> Self {
        Formula::Proposition { name: name.into(), args }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        Formula::Variable(name.into())
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: Formula) -> Self {
        Formula::Not(Box::new(operand))
    }

    pub fn binary(op: BinaryOp, left: Formula, right: Formula) -> Self {
        Formula::Binary(op, Box::new(left), Box::new(right))
    }

    pub fn and(left: Formula, right: Formula) -> Self {
        Self::binary(BinaryOp::And, left, right)
    }

    pub fn or(left: Formula, right: Formula) -> Self {
        Self::binary(BinaryOp::Or, left, right)
    }

    pub fn implies(left: Formula, right: Formula) -> Self {
        Self::binary(BinaryOp::Implies, left, right)
    }

    pub fn iff(left: Formula, right: Formula) -> Self {
        Self::binary(BinaryOp::Iff, left, right)
    }

    pub fn quantified(quantifier: Quantifier, variable: impl Into<String>, body: Formula) -> Self {
        Formula::Quantified(quantifier, variable.into(), Box::new(body))
    }

    pub fn forall(variable: impl Into<String>, body: Formula) -> Self {
        Self::quantified(Quantifier::Forall, variable, body)
    }

    pub fn exists(variable: impl Into<String>, body: Formula) -> Self {
        Self::quantified(Quantifier::Exists, variable, body)
    }

    /// Converts a term into a formula. Variables become `Variable` nodes, and applications become
    /// `Proposition` nodes with the same name and arguments.
    pub fn from_term(term: Term) -> Self {
        match term {
            Term::Var(name) => Formula::Variable(name),
            Term::App(name, args) => Formula::Proposition { name, args },
        }
    }

    /// Returns `true` if the formula is a proposition or a variable.
    pub fn is_atom(&self) -> bool {
        matches!(self, Formula::Proposition { .. } | Formula::Variable(_))
    }

    /// Returns `true` if the formula is an application of a binary connective.
    pub fn is_binary(&self) -> bool {
        matches!(self, Formula::Binary(..))
    }

    /// Returns `true` if the formula is an application of `op`.
    pub fn is_binary_op(&self, op: BinaryOp) -> bool {
        matches!(self, Formula::Binary(o, _, _) if *o == op)
    }

    /// Returns `true` if the formula is a negation.
    pub fn is_negation(&self) -> bool {
        matches!(self, Formula::Not(_))
    }

    pub fn is_quantifier(&self) -> bool {
        matches!(self, Formula::Quantified(..))
    }

    /// An iterator over this formula and all of its subformulas, in pre-order.
    pub fn subformulas(&self) -> Subformulas<'_> {
        Subformulas::new(self)
    }

    /// Returns `true` if no subformula is a quantifier.
    pub fn is_quantifier_free(&self) -> bool {
        !self.subformulas().any(Formula::is_quantifier)
    }

    /// Splits the formula into its leading quantifiers, outermost first, and the remaining body.
    pub fn quantifier_prefix(&self) -> (Vec<(Quantifier, &str)>, &Formula) {
        let mut prefix = Vec::new();
        let mut current = self;
        while let Formula::Quantified(q, var, body) = current {
            prefix.push((*q, var.as_str()));
            current = body;
        }
        (prefix, current)
    }
}

impl std::fmt::Debug for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

/// The result of parsing an input: every statement that could be parsed, in order, and the
/// diagnostics recorded while recovering from errors.
#[derive(Debug, Default)]
pub struct Program {
    pub statements: Vec<Formula>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    /// Returns `true` if any parse error was recovered from.
    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }
}
