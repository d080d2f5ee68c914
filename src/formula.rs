use std::{
    fmt,
    panic::{self, AssertUnwindSafe},
};

use crate::{
    connective::Notation,
    error::{ArityMismatchKind, KernelError, Result},
    types::*,
    Universe,
};

/// Leaf of a formula tree
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Atom {
    Object(ObjectId),
    Variable(VariableId),
    Constant(ConstantId),
}

/// A formula node. Terms are canonical handles, so two nodes are equal exactly when the trees
/// they describe are structurally equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Formula {
    Atomic(Atom),
    Compound {
        connective: ConnectiveId,
        terms: Box<[FormulaId]>,
    },
}

#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) formula: Formula,
    pub(crate) depth: usize,
}

#[derive(Debug)]
pub(crate) struct Object {
    pub(crate) symbol: String,
    pub(crate) proposition: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VariableState {
    Open,
    Locked,
}

#[derive(Debug)]
pub struct Variable {
    symbol: String,
    strictly_propositional: bool,
    state: VariableState,
    scope: Vec<FormulaId>,
    formula: FormulaId,
}

impl Variable {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn strictly_propositional(&self) -> bool {
        self.strictly_propositional
    }

    pub fn state(&self) -> VariableState {
        self.state
    }

    /// The compound formulas that incorporated this variable while it was open
    pub fn scope(&self) -> &[FormulaId] {
        &self.scope
    }

    pub fn formula(&self) -> FormulaId {
        self.formula
    }

    pub(crate) fn lock(&mut self) {
        self.state = VariableState::Locked;
    }
}

#[derive(Debug)]
pub(crate) struct Constant {
    pub(crate) symbol: String,
    pub(crate) value: FormulaId,
}

impl Universe {
    /// Declares a simple object which is not a proposition.
    pub fn declare_object(&mut self, symbol: &str) -> FormulaId {
        self.push_object(symbol, false)
    }

    /// Declares a simple object which is a proposition.
    pub fn declare_proposition(&mut self, symbol: &str) -> FormulaId {
        self.push_object(symbol, true)
    }

    fn push_object(&mut self, symbol: &str, proposition: bool) -> FormulaId {
        self.announce("object", symbol);
        let formula = self.push_unlisted_object(symbol, proposition);
        self.list_atom(symbol, formula);
        formula
    }

    /// An object that [`Universe::lookup_symbol`] does not find
    pub(crate) fn push_unlisted_object(&mut self, symbol: &str, proposition: bool) -> FormulaId {
        let id = ObjectId::new(self.id, self.objects.len());
        self.objects.push(Object {
            symbol: symbol.to_owned(),
            proposition,
        });
        self.intern(Formula::Atomic(Atom::Object(id)))
    }

    /// Declares a named constant standing for `value`. Alpha-equivalence sees through constants,
    /// syntactic equivalence does not.
    pub fn declare_constant(&mut self, symbol: &str, value: FormulaId) -> Result<FormulaId> {
        self.formula(value)?;
        let id = ConstantId::new(self.id, self.constants.len());
        self.constants.push(Constant {
            symbol: symbol.to_owned(),
            value,
        });
        self.announce("constant", symbol);
        let formula = self.intern(Formula::Atomic(Atom::Constant(id)));
        self.list_atom(symbol, formula);
        Ok(formula)
    }

    /// Declares a new variable in the [`Open`](VariableState::Open) state.
    pub fn declare_variable(&mut self, symbol: &str, strictly_propositional: bool) -> VariableId {
        let id = self.push_unlisted_variable(symbol, strictly_propositional);
        let formula = self.variables[id.index()].formula;
        self.list_atom(symbol, formula);
        id
    }

    /// A variable that [`Universe::lookup_symbol`] does not find
    pub(crate) fn push_unlisted_variable(
        &mut self,
        symbol: &str,
        strictly_propositional: bool,
    ) -> VariableId {
        let id = VariableId::new(self.id, self.variables.len());
        let formula = FormulaId::new(self.id, self.nodes.len());
        self.variables.push(Variable {
            symbol: symbol.to_owned(),
            strictly_propositional,
            state: VariableState::Open,
            scope: Vec::new(),
            formula,
        });
        self.announce("variable", symbol);
        let interned = self.intern(Formula::Atomic(Atom::Variable(id)));
        debug_assert_eq!(interned, formula);
        id
    }

    /// Declares a variable that cannot collide with any user symbol, used for hygienic renaming.
    pub(crate) fn fresh_variable(&mut self, base: &str, strictly_propositional: bool) -> FormulaId {
        let symbol = format!("{}′{}", base, self.variables.len());
        let id = self.push_unlisted_variable(&symbol, strictly_propositional);
        self.variables[id.index()].formula
    }

    pub fn variable(&self, id: VariableId) -> Result<&Variable> {
        self.lookup(id.universe(), id.index(), &self.variables)
    }

    pub fn variable_formula(&self, id: VariableId) -> Result<FormulaId> {
        Ok(self.variable(id)?.formula)
    }

    /// Returns the variable a formula consists of, if it is a variable.
    pub fn as_variable(&self, formula: FormulaId) -> Option<VariableId> {
        match self.formula(formula) {
            Ok(Formula::Atomic(Atom::Variable(v))) => Some(*v),
            _ => None,
        }
    }

    pub fn variable_state(&self, id: VariableId) -> Result<VariableState> {
        Ok(self.variable(id)?.state)
    }

    pub fn variable_scope(&self, id: VariableId) -> Result<&[FormulaId]> {
        Ok(&self.variable(id)?.scope)
    }

    /// Locks a variable, freezing its scope. Locking a locked variable does nothing.
    pub fn lock_variable(&mut self, id: VariableId) -> Result<()> {
        self.variable(id)?;
        self.variables[id.index()].lock();
        Ok(())
    }

    /// Declares an open variable, hands its formula to `f` and locks the variable when `f`
    /// returns, whatever it returns. If `f` panics the variable is locked before the panic
    /// continues.
    ///
    /// # Example
    /// ```
    /// use axiomata::{Builtin, Universe, VariableState};
    ///
    /// let mut u = Universe::new();
    /// let p = u.declare_proposition("p");
    /// let (x, result) = u.with_variable("x", true, |u, x| {
    ///     let f = u.make_compound(u.builtin(Builtin::And), &[x, p])?;
    ///     Ok::<_, axiomata::KernelError>((x, f))
    /// }).unwrap();
    /// let x = u.as_variable(x).unwrap();
    /// assert_eq!(u.variable(x).unwrap().state(), VariableState::Locked);
    /// assert_eq!(u.variable(x).unwrap().scope(), &[result]);
    /// ```
    pub fn with_variable<T>(
        &mut self,
        symbol: &str,
        strictly_propositional: bool,
        f: impl FnOnce(&mut Universe, FormulaId) -> T,
    ) -> T {
        let id = self.declare_variable(symbol, strictly_propositional);
        let formula = self.variables[id.index()].formula;
        let result = panic::catch_unwind(AssertUnwindSafe(|| f(self, formula)));
        self.variables[id.index()].lock();
        match result {
            Ok(result) => result,
            Err(payload) => panic::resume_unwind(payload),
        }
    }

    pub(crate) fn lock_variables_of(&mut self, formula: FormulaId) {
        let mut stack = vec![formula];
        while let Some(f) = stack.pop() {
            match &self.nodes[f.index()].formula {
                Formula::Atomic(Atom::Variable(v)) => self.variables[v.index()].lock(),
                Formula::Atomic(Atom::Constant(c)) => stack.push(self.constants[c.index()].value),
                Formula::Atomic(Atom::Object(_)) => {}
                Formula::Compound { terms, .. } => stack.extend(terms.iter().copied()),
            }
        }
    }

    /// Builds the compound `connective(terms)` and returns its canonical instance. Open variables
    /// among `terms` record the compound in their scope.
    ///
    /// # Errors
    /// * ArityMismatch - if the number of terms is not accepted by the connective
    /// * DepthExceeded - if the compound would be deeper than [`Config::max_depth`](crate::Config)
    /// * ForeignHandle - if any handle belongs to another universe
    pub fn make_compound(
        &mut self,
        connective: ConnectiveId,
        terms: &[FormulaId],
    ) -> Result<FormulaId> {
        let declared = self.connective(connective)?;
        if !declared.arity().accepts(terms.len()) {
            return Err(KernelError::ArityMismatch {
                connective: declared.symbol().to_owned(),
                kind: ArityMismatchKind::Terms {
                    arity: declared.arity(),
                    found: terms.len(),
                },
            });
        }
        let mut depth = 0;
        for &term in terms {
            self.formula(term)?;
            depth = depth.max(self.nodes[term.index()].depth);
        }
        if depth + 1 > self.config.max_depth {
            return Err(KernelError::DepthExceeded {
                max_depth: self.config.max_depth,
            });
        }
        Ok(self.intern(Formula::Compound {
            connective,
            terms: terms.into(),
        }))
    }

    /// Stores `formula` unless an equal node exists. Handles in `formula` must be valid.
    pub(crate) fn intern(&mut self, formula: Formula) -> FormulaId {
        let id = match self.interner.get(&formula) {
            Some(&id) => id,
            None => {
                let depth = match &formula {
                    Formula::Atomic(_) => 0,
                    Formula::Compound { terms, .. } => {
                        1 + terms
                            .iter()
                            .map(|t| self.nodes[t.index()].depth)
                            .max()
                            .unwrap_or(0)
                    }
                };
                let id = FormulaId::new(self.id, self.nodes.len());
                self.nodes.push(Node {
                    formula: formula.clone(),
                    depth,
                });
                self.interner.insert(formula, id);
                id
            }
        };
        self.extend_scopes(id);
        id
    }

    fn extend_scopes(&mut self, id: FormulaId) {
        let terms = match &self.nodes[id.index()].formula {
            Formula::Compound { terms, .. } => terms.clone(),
            Formula::Atomic(_) => return,
        };
        for term in terms.iter() {
            if let Formula::Atomic(Atom::Variable(v)) = self.nodes[term.index()].formula {
                let variable = &mut self.variables[v.index()];
                if variable.state == VariableState::Open && !variable.scope.contains(&id) {
                    variable.scope.push(id);
                }
            }
        }
    }

    /// Shorthand for a compound of a [`Builtin`](crate::Builtin) connective.
    pub fn make_builtin(
        &mut self,
        builtin: crate::Builtin,
        terms: &[FormulaId],
    ) -> Result<FormulaId> {
        self.make_compound(self.builtin(builtin), terms)
    }

    pub fn formula(&self, id: FormulaId) -> Result<&Formula> {
        Ok(&self.lookup(id.universe(), id.index(), &self.nodes)?.formula)
    }

    /// Unchecked access for handles that came out of this universe.
    pub(crate) fn get(&self, id: FormulaId) -> &Formula {
        &self.nodes[id.index()].formula
    }

    pub fn depth(&self, id: FormulaId) -> Result<usize> {
        Ok(self.lookup(id.universe(), id.index(), &self.nodes)?.depth)
    }

    /// The head connective and terms of a compound, `None` for atoms.
    pub fn compound(&self, id: FormulaId) -> Option<(ConnectiveId, &[FormulaId])> {
        match self.formula(id) {
            Ok(Formula::Compound { connective, terms }) => Some((*connective, terms)),
            _ => None,
        }
    }

    /// The terms of a compound in order, empty for atoms
    pub fn terms(&self, id: FormulaId) -> Result<&[FormulaId]> {
        Ok(match self.formula(id)? {
            Formula::Compound { terms, .. } => terms,
            Formula::Atomic(_) => &[],
        })
    }

    /// Display symbol of an atom or of the head connective of a compound
    pub fn symbol(&self, id: FormulaId) -> Result<&str> {
        Ok(match self.formula(id)? {
            Formula::Atomic(Atom::Object(o)) => &self.objects[o.index()].symbol,
            Formula::Atomic(Atom::Variable(v)) => &self.variables[v.index()].symbol,
            Formula::Atomic(Atom::Constant(c)) => &self.constants[c.index()].symbol,
            Formula::Compound { connective, .. } => {
                self.connectives[connective.index()].symbol()
            }
        })
    }

    /// The value a constant stands for
    pub fn constant_value(&self, id: FormulaId) -> Option<FormulaId> {
        match self.formula(id) {
            Ok(Formula::Atomic(Atom::Constant(c))) => Some(self.constants[c.index()].value),
            _ => None,
        }
    }

    /// Tests whether a formula denotes a proposition: a propositional object, a strictly
    /// propositional variable, a constant whose value is a proposition or a compound of a
    /// propositional connective.
    pub fn is_proposition(&self, id: FormulaId) -> bool {
        match self.formula(id) {
            Ok(Formula::Atomic(Atom::Object(o))) => self.objects[o.index()].proposition,
            Ok(Formula::Atomic(Atom::Variable(v))) => {
                self.variables[v.index()].strictly_propositional
            }
            Ok(Formula::Atomic(Atom::Constant(c))) => {
                self.is_proposition(self.constants[c.index()].value)
            }
            Ok(Formula::Compound { connective, .. }) => {
                self.connectives[connective.index()].flags().proposition
            }
            Err(_) => false,
        }
    }

    /// Tests whether a formula is a compound of a connective flagged as a
    /// [morphism](crate::ConnectiveFlags::morphism). Constants are looked through.
    pub fn is_morphism(&self, id: FormulaId) -> bool {
        match self.formula(id) {
            Ok(Formula::Atomic(Atom::Constant(c))) => {
                self.is_morphism(self.constants[c.index()].value)
            }
            Ok(Formula::Compound { connective, .. }) => {
                self.connectives[connective.index()].flags().morphism
            }
            _ => false,
        }
    }

    /// Renders a formula in plain text using the notation of each connective.
    pub fn display(&self, formula: FormulaId) -> FormulaDisplay<'_> {
        FormulaDisplay {
            universe: self,
            formula,
        }
    }
}

pub struct FormulaDisplay<'a> {
    universe: &'a Universe,
    formula: FormulaId,
}

impl FormulaDisplay<'_> {
    fn terms(&self, f: &mut fmt::Formatter<'_>, terms: &[FormulaId]) -> fmt::Result {
        for (i, &term) in terms.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", self.universe.display(term))?;
        }
        Ok(())
    }
}

impl fmt::Display for FormulaDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let u = self.universe;
        let formula = match u.formula(self.formula) {
            Ok(formula) => formula,
            Err(_) => return f.write_str("<foreign>"),
        };
        let (connective, terms) = match formula {
            Formula::Atomic(_) => return f.write_str(u.symbol(self.formula).unwrap_or("?")),
            Formula::Compound { connective, terms } => (&u.connectives[connective.index()], terms),
        };
        let symbol = connective.symbol();
        match connective.notation() {
            Notation::FunctionCall | Notation::Prefix => {
                write!(f, "{}(", symbol)?;
                self.terms(f, terms)?;
                f.write_str(")")
            }
            Notation::Infix => write!(
                f,
                "({} {} {})",
                u.display(terms[0]),
                symbol,
                u.display(terms[1])
            ),
            Notation::Postfix => write!(f, "({}){}", u.display(terms[0]), symbol),
            Notation::Collection { open, close } => {
                write!(f, "{}", open)?;
                self.terms(f, terms)?;
                write!(f, "{}", close)
            }
        }
    }
}
