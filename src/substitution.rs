use std::collections::HashMap;

use crate::{
    equivalence::Assignment,
    error::Result,
    formula::{Atom, Formula, VariableState},
    types::*,
    Universe,
};

/// A `Substitution` maps formulas to formulas.
///
/// This is intended to be used together with [`Universe::substitute`].
pub trait Substitution {
    /// Get the replacement for `formula`, or `None` if it should not be replaced.
    fn substitution_opt(&self, universe: &Universe, formula: FormulaId) -> Option<FormulaId>;
}

/// Replaces formulas by syntactic equivalence, so whole sub-trees and constants can be targeted.
/// Pairs are tried in insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapSubstitution {
    pairs: Vec<(FormulaId, FormulaId)>,
}

impl MapSubstitution {
    pub fn new() -> Self {
        MapSubstitution { pairs: Vec::new() }
    }

    pub fn insert(&mut self, from: FormulaId, to: FormulaId) {
        self.pairs.push((from, to));
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl FromIterator<(FormulaId, FormulaId)> for MapSubstitution {
    fn from_iter<I: IntoIterator<Item = (FormulaId, FormulaId)>>(iter: I) -> Self {
        MapSubstitution {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl Substitution for MapSubstitution {
    fn substitution_opt(&self, universe: &Universe, formula: FormulaId) -> Option<FormulaId> {
        self.pairs
            .iter()
            .find(|(from, _)| universe.syntactically_equivalent(*from, formula))
            .map(|(_, to)| *to)
    }
}

/// Replaces a single formula
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SingleSubstitution(FormulaId, FormulaId);

impl SingleSubstitution {
    pub fn new(from: FormulaId, to: FormulaId) -> Self {
        SingleSubstitution(from, to)
    }
}

impl Substitution for SingleSubstitution {
    fn substitution_opt(&self, universe: &Universe, formula: FormulaId) -> Option<FormulaId> {
        if universe.syntactically_equivalent(self.0, formula) {
            Some(self.1)
        } else {
            None
        }
    }
}

/// Tries `first`, then `then`
pub struct ChainSubstitution<S: Substitution, T: Substitution> {
    pub first: S,
    pub then: T,
}

impl<S: Substitution, T: Substitution> Substitution for ChainSubstitution<S, T> {
    fn substitution_opt(&self, universe: &Universe, formula: FormulaId) -> Option<FormulaId> {
        self.first
            .substitution_opt(universe, formula)
            .or_else(|| self.then.substitution_opt(universe, formula))
    }
}

impl Substitution for Assignment {
    fn substitution_opt(&self, universe: &Universe, formula: FormulaId) -> Option<FormulaId> {
        universe
            .as_variable(formula)
            .and_then(|variable| self.get(variable))
    }
}

impl Universe {
    /// Builds a new formula from `formula` by applying `substitution` top-down.
    ///
    /// Open variables which the substitution does not replace are first renamed to fresh
    /// variables, so the result never captures variables of the input. Every variable of the
    /// result is locked afterwards. Subtrees under a quotation connective are kept as they are.
    ///
    /// # Errors
    /// * ArityMismatch - if a rebuilt compound violates the arity of its connective
    /// * DepthExceeded - if the result is too deep
    /// * ForeignHandle - if `formula` or a replacement belongs to another universe
    ///
    /// # Example
    /// ```
    /// use axiomata::{Builtin, SingleSubstitution, Universe};
    ///
    /// let mut u = Universe::new();
    /// let p = u.declare_proposition("p");
    /// let q = u.declare_proposition("q");
    /// let np = u.make_builtin(Builtin::Not, &[p]).unwrap();
    /// let f = u.make_builtin(Builtin::And, &[np, p]).unwrap();
    /// let g = u.substitute(f, &SingleSubstitution::new(np, q)).unwrap();
    /// assert_eq!(u.display(g).to_string(), "(q ∧ p)");
    /// ```
    pub fn substitute<S: Substitution + ?Sized>(
        &mut self,
        formula: FormulaId,
        substitution: &S,
    ) -> Result<FormulaId> {
        self.formula(formula)?;
        let mut fresh = HashMap::new();
        let result = self.rebuild(formula, substitution, &mut fresh)?;
        self.lock_variables_of(result);
        Ok(result)
    }

    fn rebuild<S: Substitution + ?Sized>(
        &mut self,
        formula: FormulaId,
        substitution: &S,
        fresh: &mut HashMap<VariableId, FormulaId>,
    ) -> Result<FormulaId> {
        if let Some(replacement) = substitution.substitution_opt(self, formula) {
            self.formula(replacement)?;
            return Ok(replacement);
        }
        match self.get(formula).clone() {
            Formula::Atomic(Atom::Variable(v)) => {
                let variable = &self.variables[v.index()];
                if variable.state() == VariableState::Locked {
                    return Ok(formula);
                }
                if let Some(&renamed) = fresh.get(&v) {
                    return Ok(renamed);
                }
                let (symbol, propositional) = (
                    variable.symbol().to_owned(),
                    variable.strictly_propositional(),
                );
                let renamed = self.fresh_variable(&symbol, propositional);
                fresh.insert(v, renamed);
                Ok(renamed)
            }
            Formula::Atomic(_) => Ok(formula),
            Formula::Compound { connective, terms } => {
                if self.connectives[connective.index()].flags().quotation {
                    return Ok(formula);
                }
                let mut rebuilt = Vec::with_capacity(terms.len());
                for &term in terms.iter() {
                    rebuilt.push(self.rebuild(term, substitution, fresh)?);
                }
                self.make_compound(connective, &rebuilt)
            }
        }
    }
}
