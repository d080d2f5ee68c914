use tracing::{debug, info, trace, warn};

use crate::{
    connective::Builtin,
    error::{KernelError, Result},
    formula::Formula,
    statement::{Statement, StatementKind},
    types::*,
    Universe,
};

/// Tri-state consistency of a theory. The kernel only ever moves a theory from `Undetermined`
/// to `ProvedInconsistent`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Consistency {
    ProvedConsistent,
    Undetermined,
    ProvedInconsistent,
}

/// A natural-language axiom
#[derive(Debug)]
pub struct Axiom {
    symbol: String,
    text: String,
}

impl Axiom {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A natural-language definition
#[derive(Debug)]
pub struct Definition {
    symbol: String,
    text: String,
}

impl Definition {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// An append-only sequence of statements, optionally extending a parent theory up to an
/// inclusive position limit.
#[derive(Debug)]
pub struct Theory {
    symbol: String,
    object: FormulaId,
    parent: Option<TheoryId>,
    limit: Option<usize>,
    pub(crate) statements: Vec<Statement>,
    consistency: Consistency,
    proof: Option<StatementRef>,
    stabilized: bool,
    pub(crate) rules: Vec<RuleId>,
}

impl Theory {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// The object standing for this theory inside formulas, as in `Inc(T)`
    pub fn object(&self) -> FormulaId {
        self.object
    }

    pub fn parent(&self) -> Option<TheoryId> {
        self.parent
    }

    /// Last visible position of the parent, `None` if the whole parent is visible
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    pub fn consistency(&self) -> Consistency {
        self.consistency
    }

    /// The statement which proved this theory inconsistent
    pub fn inconsistency_proof(&self) -> Option<StatementRef> {
        self.proof
    }

    pub fn stabilized(&self) -> bool {
        self.stabilized
    }

    /// Rules included into this theory
    pub fn rules(&self) -> &[RuleId] {
        &self.rules
    }
}

/// One theory in a [`TheoryChain`] together with the last position visible through the chain
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainLink {
    pub theory: TheoryId,
    pub limit: Option<usize>,
}

impl ChainLink {
    pub fn contains(&self, position: usize) -> bool {
        self.limit.map_or(true, |limit| position <= limit)
    }
}

/// Iterator over a theory and its ancestors, see [`Universe::chain`]
#[derive(Clone)]
pub struct TheoryChain<'a> {
    universe: &'a Universe,
    next: Option<ChainLink>,
}

impl Iterator for TheoryChain<'_> {
    type Item = ChainLink;

    fn next(&mut self) -> Option<ChainLink> {
        let link = self.next?;
        let theory = &self.universe.theories[link.theory.index()];
        self.next = theory.parent.map(|parent| ChainLink {
            theory: parent,
            limit: theory.limit,
        });
        Some(link)
    }
}

impl Universe {
    /// Declares a new theory without parent.
    pub fn declare_theory(&mut self, symbol: &str) -> TheoryId {
        self.push_theory(symbol.to_owned(), None, None)
    }

    fn push_theory(
        &mut self,
        symbol: String,
        parent: Option<TheoryId>,
        limit: Option<usize>,
    ) -> TheoryId {
        let id = TheoryId::new(self.id, self.theories.len());
        let object = self.push_unlisted_object(&symbol, false);
        self.announce("theory", &symbol);
        self.theories.push(Theory {
            symbol,
            object,
            parent,
            limit,
            statements: Vec::new(),
            consistency: Consistency::Undetermined,
            proof: None,
            stabilized: false,
            rules: Vec::new(),
        });
        id
    }

    /// Creates a child theory of `parent`. The child sees the parent's statements up to and
    /// including position `limit`, or all of them (including later ones) if `limit` is `None`.
    ///
    /// # Errors
    /// * InvalidLimit - if `limit` is not a position of `parent`
    pub fn extend(&mut self, parent: TheoryId, limit: Option<usize>) -> Result<TheoryId> {
        let theory = self.theory(parent)?;
        if let Some(limit) = limit {
            if limit >= theory.statements.len() {
                return Err(KernelError::InvalidLimit {
                    theory: theory.symbol.clone(),
                    limit,
                    length: theory.statements.len(),
                });
            }
        }
        let children = self
            .theories
            .iter()
            .filter(|t| t.parent == Some(parent))
            .count();
        let symbol = format!("{}.{}", theory.symbol, children + 1);
        Ok(self.push_theory(symbol, Some(parent), limit))
    }

    pub fn theory(&self, id: TheoryId) -> Result<&Theory> {
        self.lookup(id.universe(), id.index(), &self.theories)
    }

    /// Finds the most recently declared theory with the given symbol.
    pub fn lookup_theory(&self, symbol: &str) -> Option<TheoryId> {
        self.theories
            .iter()
            .rposition(|t| t.symbol == symbol)
            .map(|index| TheoryId::new(self.id, index))
    }

    fn theory_mut(&mut self, id: TheoryId) -> Result<&mut Theory> {
        self.theory(id)?;
        Ok(&mut self.theories[id.index()])
    }

    /// Iterates over `theory` and then its ancestors. Each link carries the last position of that
    /// theory visible from `theory`. The iterator is lazy, finite and can be restarted by cloning.
    ///
    /// # Example
    /// ```
    /// use axiomata::{ChainLink, Universe};
    ///
    /// let mut u = Universe::new();
    /// let t = u.declare_theory("T");
    /// u.take_note(t, "first").unwrap();
    /// u.take_note(t, "second").unwrap();
    /// let child = u.extend(t, Some(0)).unwrap();
    /// let links: Vec<_> = u.chain(child).unwrap().collect();
    /// assert_eq!(links, vec![
    ///     ChainLink { theory: child, limit: None },
    ///     ChainLink { theory: t, limit: Some(0) },
    /// ]);
    /// ```
    pub fn chain(&self, theory: TheoryId) -> Result<TheoryChain<'_>> {
        self.theory(theory)?;
        Ok(TheoryChain {
            universe: self,
            next: Some(ChainLink {
                theory,
                limit: None,
            }),
        })
    }

    /// Tests whether `statement` is visible from `theory`.
    pub fn is_visible(&self, theory: TheoryId, statement: StatementRef) -> bool {
        if self.statement(statement).is_err() {
            return false;
        }
        match self.chain(theory) {
            Ok(mut chain) => chain
                .any(|link| link.theory == statement.theory && link.contains(statement.position)),
            Err(_) => false,
        }
    }

    /// All statements visible from `theory`: its own first, then those of each ancestor.
    pub fn visible_statements(
        &self,
        theory: TheoryId,
    ) -> Result<impl Iterator<Item = (StatementRef, &Statement)> + '_> {
        Ok(self.chain(theory)?.flat_map(move |link| {
            self.theories[link.theory.index()]
                .statements
                .iter()
                .take_while(move |s| link.contains(s.position))
                .map(move |s| (StatementRef::new(link.theory, s.position), s))
        }))
    }

    pub fn statement(&self, statement: StatementRef) -> Result<&Statement> {
        let theory = self.theory(statement.theory)?;
        theory
            .statements
            .get(statement.position)
            .ok_or_else(|| KernelError::UnknownStatement {
                theory: theory.symbol.clone(),
                position: statement.position,
            })
    }

    pub fn statements(&self, theory: TheoryId) -> Result<&[Statement]> {
        Ok(&self.theory(theory)?.statements)
    }

    /// The statements an inferred statement was derived from, in argument order
    pub fn premises(&self, statement: StatementRef) -> Result<Vec<StatementRef>> {
        Ok(self.statement(statement)?.premises().collect())
    }

    pub(crate) fn append_statement(&mut self, theory: TheoryId, kind: StatementKind) -> StatementRef {
        if let Some(formula) = match kind {
            StatementKind::Inferred { formula, .. } | StatementKind::Hypothesis { formula, .. } => {
                Some(formula)
            }
            _ => None,
        } {
            self.lock_variables_of(formula);
        }
        let sequence = self.next_sequence();
        let echo = self.config.echo_statements;
        let t = &mut self.theories[theory.index()];
        let position = t.statements.len();
        if echo {
            info!(theory = %t.symbol, position, ?kind, "statement");
        } else {
            debug!(theory = %t.symbol, position, ?kind, "statement");
        }
        t.statements.push(Statement {
            position,
            sequence,
            kind,
        });
        StatementRef::new(theory, position)
    }

    pub fn consistency(&self, theory: TheoryId) -> Result<Consistency> {
        Ok(self.theory(theory)?.consistency)
    }

    /// The theory `T` if `formula` is `Inc(T)`.
    pub fn inconsistency_target(&self, formula: FormulaId) -> Option<TheoryId> {
        let (connective, terms) = self.compound(formula)?;
        if connective != self.builtin(Builtin::Inconsistent) {
            return None;
        }
        self.theories
            .iter()
            .position(|t| t.object == terms[0])
            .map(|index| TheoryId::new(self.id, index))
    }

    /// Builds `Inc(theory)`.
    pub fn inconsistency_of(&mut self, theory: TheoryId) -> Result<FormulaId> {
        let object = self.theory(theory)?.object;
        Ok(self.intern(Formula::Compound {
            connective: self.builtin(Builtin::Inconsistent),
            terms: vec![object].into_boxed_slice(),
        }))
    }

    /// Records that `theory` is inconsistent. `proof` has to be an inferred statement of
    /// `Inc(theory)`. Marking an inconsistent theory again does nothing.
    ///
    /// # Errors
    /// * InvalidTransition - if the theory was proved consistent
    /// * PremiseValidity - if `proof` does not prove `Inc(theory)`
    pub fn mark_inconsistent(&mut self, theory: TheoryId, proof: StatementRef) -> Result<()> {
        let target = self.statement(proof)?.proved().and_then(|f| self.inconsistency_target(f));
        let t = self.theory(theory)?;
        if target != Some(theory) {
            return Err(KernelError::validity(
                "inconsistency",
                None,
                format!(
                    "statement {} of `{}` does not prove the inconsistency of `{}`",
                    proof.position,
                    self.theory(proof.theory)?.symbol,
                    t.symbol
                ),
            ));
        }
        let consistency = t.consistency;
        match consistency {
            Consistency::ProvedInconsistent => Ok(()),
            Consistency::Undetermined => {
                warn!(theory = %t.symbol, position = proof.position, "theory proved inconsistent");
                let t = self.theory_mut(theory)?;
                t.consistency = Consistency::ProvedInconsistent;
                t.proof = Some(proof);
                Ok(())
            }
            from => Err(KernelError::InvalidTransition {
                theory: t.symbol.clone(),
                from,
                to: Consistency::ProvedInconsistent,
            }),
        }
    }

    /// Requests a change of consistency. Only the move to `ProvedInconsistent` backed by a proof
    /// is allowed, requesting the current state does nothing.
    pub fn transition_consistency(
        &mut self,
        theory: TheoryId,
        to: Consistency,
        proof: Option<StatementRef>,
    ) -> Result<()> {
        let t = self.theory(theory)?;
        let from = t.consistency;
        if from == to {
            return Ok(());
        }
        match (to, proof) {
            (Consistency::ProvedInconsistent, Some(proof)) => self.mark_inconsistent(theory, proof),
            _ => Err(KernelError::InvalidTransition {
                theory: t.symbol.clone(),
                from,
                to,
            }),
        }
    }

    /// Forbids any further axiom or definition inclusion in `theory`.
    pub fn stabilize(&mut self, theory: TheoryId) -> Result<()> {
        let t = self.theory_mut(theory)?;
        if t.stabilized {
            warn!(theory = %t.symbol, "theory is already stabilized");
        }
        t.stabilized = true;
        Ok(())
    }

    pub fn declare_axiom(&mut self, symbol: &str, text: &str) -> AxiomId {
        let id = AxiomId::new(self.id, self.axioms.len());
        self.announce("axiom", symbol);
        self.axioms.push(Axiom {
            symbol: symbol.to_owned(),
            text: text.to_owned(),
        });
        id
    }

    pub fn axiom(&self, id: AxiomId) -> Result<&Axiom> {
        self.lookup(id.universe(), id.index(), &self.axioms)
    }

    pub fn declare_definition(&mut self, symbol: &str, text: &str) -> DefinitionId {
        let id = DefinitionId::new(self.id, self.definitions.len());
        self.announce("definition", symbol);
        self.definitions.push(Definition {
            symbol: symbol.to_owned(),
            text: text.to_owned(),
        });
        id
    }

    pub fn definition(&self, id: DefinitionId) -> Result<&Definition> {
        self.lookup(id.universe(), id.index(), &self.definitions)
    }

    fn check_open(&self, theory: TheoryId) -> Result<()> {
        let t = self.theory(theory)?;
        if t.stabilized {
            return Err(KernelError::Stabilized {
                theory: t.symbol.clone(),
            });
        }
        Ok(())
    }

    /// Appends an axiom inclusion to `theory`.
    ///
    /// # Errors
    /// * Stabilized - if the theory is stabilized
    pub fn include_axiom(&mut self, theory: TheoryId, axiom: AxiomId) -> Result<StatementRef> {
        self.axiom(axiom)?;
        self.check_open(theory)?;
        Ok(self.append_statement(
            theory,
            StatementKind::AxiomInclusion {
                axiom,
                locked: false,
            },
        ))
    }

    /// Appends a definition inclusion to `theory`.
    ///
    /// # Errors
    /// * Stabilized - if the theory is stabilized
    pub fn include_definition(
        &mut self,
        theory: TheoryId,
        definition: DefinitionId,
    ) -> Result<StatementRef> {
        self.definition(definition)?;
        self.check_open(theory)?;
        Ok(self.append_statement(
            theory,
            StatementKind::DefinitionInclusion {
                definition,
                locked: false,
            },
        ))
    }

    /// Locks an axiom or definition inclusion, after which it can no longer be interpreted.
    pub fn lock_inclusion(&mut self, inclusion: StatementRef) -> Result<()> {
        self.statement(inclusion)?;
        let t = &mut self.theories[inclusion.theory.index()];
        match &mut t.statements[inclusion.position].kind {
            StatementKind::AxiomInclusion { locked, .. }
            | StatementKind::DefinitionInclusion { locked, .. } => {
                trace!(theory = %t.symbol, position = inclusion.position, "inclusion locked");
                *locked = true;
                Ok(())
            }
            _ => Err(KernelError::NotAnInclusion {
                theory: t.symbol.clone(),
                position: inclusion.position,
            }),
        }
    }

    pub fn take_note(&mut self, theory: TheoryId, text: &str) -> Result<StatementRef> {
        self.theory(theory)?;
        Ok(self.append_statement(
            theory,
            StatementKind::Note {
                text: text.to_owned(),
            },
        ))
    }

    pub fn open_section(
        &mut self,
        theory: TheoryId,
        title: &str,
        level: usize,
    ) -> Result<StatementRef> {
        self.theory(theory)?;
        Ok(self.append_statement(
            theory,
            StatementKind::Section {
                title: title.to_owned(),
                level,
            },
        ))
    }
}
