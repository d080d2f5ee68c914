use std::collections::HashMap;

use crate::{
    formula::{Atom, Formula},
    types::*,
    Universe,
};

/// Bindings of mask variables produced by [`Universe::masked_similarity`], in binding order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Assignment {
    bindings: Vec<(VariableId, FormulaId)>,
}

impl Assignment {
    pub fn new() -> Self {
        Assignment {
            bindings: Vec::new(),
        }
    }

    pub fn get(&self, variable: VariableId) -> Option<FormulaId> {
        self.bindings
            .iter()
            .find(|(v, _)| *v == variable)
            .map(|(_, f)| *f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableId, FormulaId)> + '_ {
        self.bindings.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn bind(&mut self, variable: VariableId, formula: FormulaId) {
        self.bindings.push((variable, formula));
    }

    fn truncate(&mut self, len: usize) {
        self.bindings.truncate(len);
    }
}

/// One element of the canonical pre-order traversal used by alpha-equivalence
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    Connective(ConnectiveId, usize),
    Object(ObjectId),
    Variable { variable: VariableId, quoted: bool },
}

impl Universe {
    /// Tests whether `a` and `b` are the same formula. Formulas are interned, so this is an
    /// identity check. Formulas of different universes are never syntactically equivalent; use
    /// [`structurally_equivalent`](Self::structurally_equivalent) to compare across universes.
    pub fn syntactically_equivalent(&self, a: FormulaId, b: FormulaId) -> bool {
        a == b
    }

    /// Compares `a` of this universe with `b` of `other` by shape: connectives must have the same
    /// signature and atoms the same kind and symbol.
    ///
    /// # Example
    /// ```
    /// use axiomata::{Builtin, Universe};
    ///
    /// let mut u = Universe::new();
    /// let mut v = Universe::new();
    /// let (p, q) = (u.declare_proposition("p"), v.declare_proposition("p"));
    /// let a = u.make_builtin(Builtin::Not, &[p]).unwrap();
    /// let b = v.make_builtin(Builtin::Not, &[q]).unwrap();
    /// assert!(!u.syntactically_equivalent(a, b));
    /// assert!(u.structurally_equivalent(a, &v, b));
    /// ```
    pub fn structurally_equivalent(&self, a: FormulaId, other: &Universe, b: FormulaId) -> bool {
        if self.id == other.id {
            return a == b;
        }
        let (fa, fb) = match (self.formula(a), other.formula(b)) {
            (Ok(fa), Ok(fb)) => (fa, fb),
            _ => return false,
        };
        match (fa, fb) {
            (Formula::Atomic(Atom::Object(x)), Formula::Atomic(Atom::Object(y))) => {
                let (x, y) = (&self.objects[x.index()], &other.objects[y.index()]);
                x.symbol == y.symbol && x.proposition == y.proposition
            }
            (Formula::Atomic(Atom::Variable(x)), Formula::Atomic(Atom::Variable(y))) => {
                let (x, y) = (&self.variables[x.index()], &other.variables[y.index()]);
                x.symbol() == y.symbol() && x.strictly_propositional() == y.strictly_propositional()
            }
            (Formula::Atomic(Atom::Constant(x)), Formula::Atomic(Atom::Constant(y))) => {
                let (x, y) = (&self.constants[x.index()], &other.constants[y.index()]);
                x.symbol == y.symbol && self.structurally_equivalent(x.value, other, y.value)
            }
            (
                Formula::Compound {
                    connective: ca,
                    terms: ta,
                },
                Formula::Compound {
                    connective: cb,
                    terms: tb,
                },
            ) => {
                self.connectives[ca.index()].same_signature(&other.connectives[cb.index()])
                    && ta.len() == tb.len()
                    && ta
                        .iter()
                        .zip(tb.iter())
                        .all(|(&x, &y)| self.structurally_equivalent(x, other, y))
            }
            _ => false,
        }
    }

    fn tokens(&self, formula: FormulaId, quoted: bool, out: &mut Vec<Token>) {
        match self.get(formula) {
            Formula::Atomic(Atom::Object(o)) => out.push(Token::Object(*o)),
            Formula::Atomic(Atom::Variable(v)) => out.push(Token::Variable {
                variable: *v,
                quoted,
            }),
            Formula::Atomic(Atom::Constant(c)) => {
                self.tokens(self.constants[c.index()].value, quoted, out)
            }
            Formula::Compound { connective, terms } => {
                out.push(Token::Connective(*connective, terms.len()));
                let quoted = quoted || self.connectives[connective.index()].flags().quotation;
                for &term in terms.iter() {
                    self.tokens(term, quoted, out);
                }
            }
        }
    }

    /// The free variables of a formula in order of their first occurrence, constants unfolded.
    /// Variables under a quotation connective are not free and are left out.
    ///
    /// # Example
    /// ```
    /// use axiomata::{Builtin, Universe};
    ///
    /// let mut u = Universe::new();
    /// let x = u.declare_variable("x", true);
    /// let y = u.declare_variable("y", true);
    /// let (xf, yf) = (u.variable_formula(x).unwrap(), u.variable_formula(y).unwrap());
    /// let a = u.make_builtin(Builtin::And, &[yf, xf]).unwrap();
    /// let b = u.make_builtin(Builtin::Or, &[a, yf]).unwrap();
    /// assert_eq!(u.variable_ordered_set(b), vec![y, x]);
    /// ```
    pub fn variable_ordered_set(&self, formula: FormulaId) -> Vec<VariableId> {
        if self.formula(formula).is_err() {
            return Vec::new();
        }
        let mut tokens = Vec::new();
        self.tokens(formula, false, &mut tokens);
        let mut variables = Vec::new();
        for token in tokens {
            if let Token::Variable {
                variable,
                quoted: false,
            } = token
            {
                if !variables.contains(&variable) {
                    variables.push(variable);
                }
            }
        }
        variables
    }

    /// Tests whether `a` can be obtained from `b` by a consistent renaming of free variables.
    ///
    /// # Example
    /// ```
    /// use axiomata::{Builtin, Universe};
    ///
    /// let mut u = Universe::new();
    /// let x = u.declare_variable("x", false);
    /// let y = u.declare_variable("y", false);
    /// let (x, y) = (u.variable_formula(x).unwrap(), u.variable_formula(y).unwrap());
    /// let a = u.declare_object("a");
    /// let xa = u.make_builtin(Builtin::Equal, &[x, a]).unwrap();
    /// let ya = u.make_builtin(Builtin::Equal, &[y, a]).unwrap();
    /// let xx = u.make_builtin(Builtin::Equal, &[x, x]).unwrap();
    /// let xy = u.make_builtin(Builtin::Equal, &[x, y]).unwrap();
    /// assert!(u.alpha_equivalent(xa, ya));
    /// assert!(!u.alpha_equivalent(xx, xy));
    /// ```
    pub fn alpha_equivalent(&self, a: FormulaId, b: FormulaId) -> bool {
        if a == b {
            return true;
        }
        if self.formula(a).is_err() || self.formula(b).is_err() {
            return false;
        }
        let (mut ta, mut tb) = (Vec::new(), Vec::new());
        self.tokens(a, false, &mut ta);
        self.tokens(b, false, &mut tb);
        if ta.len() != tb.len() {
            return false;
        }
        let index = |vars: Vec<VariableId>| -> HashMap<VariableId, usize> {
            vars.into_iter().enumerate().map(|(i, v)| (v, i)).collect()
        };
        let (va, vb) = (
            index(self.variable_ordered_set(a)),
            index(self.variable_ordered_set(b)),
        );
        ta.iter().zip(tb.iter()).all(|(x, y)| match (x, y) {
            (
                Token::Variable {
                    variable: x,
                    quoted: false,
                },
                Token::Variable {
                    variable: y,
                    quoted: false,
                },
            ) => va.get(x) == vb.get(y),
            (x, y) => x == y,
        })
    }

    /// Matches `candidate` against `template`, where the variables in `mask` act as pattern
    /// variables. Returns the bindings that turn `template` into `candidate`, or `None` if no
    /// binding exists.
    ///
    /// # Example
    /// ```
    /// use axiomata::{Builtin, Universe};
    ///
    /// let mut u = Universe::new();
    /// let p = u.declare_variable("P", true);
    /// let pf = u.variable_formula(p).unwrap();
    /// let pattern = u.make_builtin(Builtin::And, &[pf, pf]).unwrap();
    ///
    /// let a = u.declare_proposition("a");
    /// let b = u.declare_proposition("b");
    /// let aa = u.make_builtin(Builtin::And, &[a, a]).unwrap();
    /// let ab = u.make_builtin(Builtin::And, &[a, b]).unwrap();
    ///
    /// let assignment = u.masked_similarity(aa, pattern, &[p]).unwrap();
    /// assert_eq!(assignment.get(p), Some(a));
    /// assert!(u.masked_similarity(ab, pattern, &[p]).is_none());
    /// ```
    pub fn masked_similarity(
        &self,
        candidate: FormulaId,
        template: FormulaId,
        mask: &[VariableId],
    ) -> Option<Assignment> {
        let mut assignment = Assignment::new();
        if self.masked_similarity_with(candidate, template, mask, &mut assignment) {
            Some(assignment)
        } else {
            None
        }
    }

    /// Like [`masked_similarity`](Self::masked_similarity) but extends an existing assignment, so
    /// that several candidates can be matched with one set of bindings. On failure the assignment
    /// is left as it was.
    pub fn masked_similarity_with(
        &self,
        candidate: FormulaId,
        template: FormulaId,
        mask: &[VariableId],
        assignment: &mut Assignment,
    ) -> bool {
        if self.formula(candidate).is_err() || self.formula(template).is_err() {
            return false;
        }
        let len = assignment.len();
        let similar = self.similar(candidate, template, mask, assignment);
        if !similar {
            assignment.truncate(len);
        }
        similar
    }

    fn similar(
        &self,
        candidate: FormulaId,
        template: FormulaId,
        mask: &[VariableId],
        assignment: &mut Assignment,
    ) -> bool {
        if let Formula::Atomic(Atom::Variable(v)) = self.get(template) {
            if mask.contains(v) {
                return match assignment.get(*v) {
                    Some(bound) => self.syntactically_equivalent(bound, candidate),
                    None => {
                        assignment.bind(*v, candidate);
                        true
                    }
                };
            }
        }
        if candidate == template {
            return true;
        }
        match (self.get(candidate), self.get(template)) {
            (
                Formula::Compound {
                    connective: cc,
                    terms: tc,
                },
                Formula::Compound {
                    connective: ct,
                    terms: tt,
                },
            ) => {
                cc == ct
                    && tc.len() == tt.len()
                    && tc
                        .iter()
                        .zip(tt.iter())
                        .all(|(&c, &t)| self.similar(c, t, mask, assignment))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arity, Builtin, ConnectiveFlags, Notation};

    quickcheck! {
        fn renaming_keeps_alpha_class(n: u8, flip: bool) -> bool {
            let mut u = Universe::new();
            let x = u.declare_variable("x", true);
            let y = u.declare_variable("y", true);
            let (x, y) = (u.variable_formula(x).unwrap(), u.variable_formula(y).unwrap());
            let build = |u: &mut Universe, v: FormulaId, w: FormulaId| {
                let mut f = v;
                for i in 0..(n % 8) {
                    let other = if (i % 2 == 0) ^ flip { w } else { v };
                    f = u.make_builtin(Builtin::Implies, &[f, other]).unwrap();
                }
                f
            };
            let a = build(&mut u, x, y);
            let b = build(&mut u, y, x);
            u.alpha_equivalent(a, b) && u.alpha_equivalent(b, a)
        }
    }

    #[test]
    fn constants_unfold() {
        let mut u = Universe::new();
        let p = u.declare_proposition("p");
        let np = u.make_builtin(Builtin::Not, &[p]).unwrap();
        let c = u.declare_constant("c", np).unwrap();
        let a = u.make_builtin(Builtin::And, &[c, p]).unwrap();
        let b = u.make_builtin(Builtin::And, &[np, p]).unwrap();
        assert!(!u.syntactically_equivalent(a, b));
        assert!(u.alpha_equivalent(a, b));
    }

    #[test]
    fn quoted_variables_keep_identity() {
        let mut u = Universe::new();
        let x = u.declare_variable("x", false);
        let y = u.declare_variable("y", false);
        let (x, y) = (u.variable_formula(x).unwrap(), u.variable_formula(y).unwrap());
        let qx = u.make_builtin(Builtin::Quote, &[x]).unwrap();
        let qy = u.make_builtin(Builtin::Quote, &[y]).unwrap();
        assert!(!u.alpha_equivalent(qx, qy));
        assert!(u.variable_ordered_set(qx).is_empty());
        assert!(u.alpha_equivalent(x, y));
    }

    #[test]
    fn different_shapes() {
        let mut u = Universe::new();
        let p = u.declare_proposition("p");
        let q = u.declare_proposition("q");
        let and = u.make_builtin(Builtin::And, &[p, q]).unwrap();
        let or = u.make_builtin(Builtin::Or, &[p, q]).unwrap();
        let np = u.make_builtin(Builtin::Not, &[p]).unwrap();
        assert!(!u.alpha_equivalent(and, or));
        assert!(!u.alpha_equivalent(and, np));
        assert!(!u.alpha_equivalent(p, q));
    }

    #[test]
    fn masked_similarity_is_one_directional() {
        let mut u = Universe::new();
        let pv = u.declare_variable("P", true);
        let qv = u.declare_variable("Q", true);
        let (pf, qf) = (u.variable_formula(pv).unwrap(), u.variable_formula(qv).unwrap());
        let template = u.make_builtin(Builtin::Implies, &[pf, qf]).unwrap();
        let a = u.declare_proposition("a");
        let b = u.declare_proposition("b");
        let ab = u.make_builtin(Builtin::Implies, &[a, b]).unwrap();

        let assignment = u.masked_similarity(ab, template, &[pv, qv]).unwrap();
        assert_eq!(assignment.iter().collect::<Vec<_>>(), vec![(pv, a), (qv, b)]);
        assert!(u.masked_similarity(template, ab, &[pv, qv]).is_none());
        // unmasked variables have to match exactly
        assert!(u.masked_similarity(ab, template, &[pv]).is_none());
        assert!(u.masked_similarity(template, template, &[]).is_some());
    }

    #[test]
    fn masked_similarity_with_restores_on_failure() {
        let mut u = Universe::new();
        let pv = u.declare_variable("P", true);
        let qv = u.declare_variable("Q", true);
        let (pf, qf) = (u.variable_formula(pv).unwrap(), u.variable_formula(qv).unwrap());
        let template = u.make_builtin(Builtin::And, &[qf, pf]).unwrap();
        let a = u.declare_proposition("a");
        let b = u.declare_proposition("b");
        let ba = u.make_builtin(Builtin::And, &[b, a]).unwrap();
        let bb = u.make_builtin(Builtin::And, &[b, b]).unwrap();

        let mut assignment = Assignment::new();
        assert!(u.masked_similarity_with(a, pf, &[pv, qv], &mut assignment));
        assert!(!u.masked_similarity_with(bb, template, &[pv, qv], &mut assignment));
        assert_eq!(assignment.len(), 1);
        assert!(u.masked_similarity_with(ba, template, &[pv, qv], &mut assignment));
        assert_eq!(assignment.get(qv), Some(b));
    }

    #[test]
    fn structural_equivalence_across_universes() {
        let mut u = Universe::new();
        let mut v = Universe::new();
        let plus_u = u
            .declare_connective("+", Arity::Exact(2), Notation::Infix, ConnectiveFlags::NONE)
            .unwrap();
        let plus_v = v
            .declare_connective("+", Arity::Exact(2), Notation::Infix, ConnectiveFlags::MORPHISM)
            .unwrap();
        let (a, b) = (u.declare_object("a"), v.declare_object("a"));
        let fu = u.make_compound(plus_u, &[a, a]).unwrap();
        let fv = v.make_compound(plus_v, &[b, b]).unwrap();
        assert!(!u.structurally_equivalent(fu, &v, fv));
        let eu = u.make_builtin(Builtin::Equal, &[a, a]).unwrap();
        let ev = v.make_builtin(Builtin::Equal, &[b, b]).unwrap();
        assert!(u.structurally_equivalent(eu, &v, ev));
        assert!(u.structurally_equivalent(eu, &u, eu));
    }
}
