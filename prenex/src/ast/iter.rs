use super::Formula;

/// A pre-order iterator over a formula and its subformulas. Left operands are visited before right
/// operands.
///
/// This uses an explicit stack, so it can walk formulas of any depth.
pub struct Subformulas<'a> {
    stack: Vec<&'a Formula>,
}

impl<'a> Subformulas<'a> {
    pub fn new(root: &'a Formula) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Subformulas<'a> {
    type Item = &'a Formula;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.stack.pop()?;
        match current {
            Formula::Not(inner) | Formula::Quantified(_, _, inner) => self.stack.push(inner),
            Formula::Binary(_, left, right) => {
                self.stack.push(right);
                self.stack.push(left);
            }
            Formula::Proposition { .. } | Formula::Variable(_) => (),
        }
        Some(current)
    }
}
