use tracing::debug;

use crate::{
    error::{KernelError, Result},
    rules::StandardRule,
    statement::StatementKind,
    types::*,
    Universe,
};

/// The result of [`Universe::pose_hypothesis`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PosedHypothesis {
    /// The hypothesis statement in the posing theory
    pub statement: StatementRef,
    /// The theory in which the hypothesis is assumed
    pub child: TheoryId,
    /// The hypothetical formula, proved in `child`
    pub assumption: StatementRef,
}

impl Universe {
    /// Poses `formula` as a hypothesis in `theory`.
    ///
    /// A hypothesis statement is appended to `theory` and a child theory is created that sees
    /// `theory` up to and including that statement. The child gets a fresh axiom stating
    /// `formula`, which is interpreted once and then locked. The child is stabilized, so the only
    /// way to add to it is by inference.
    ///
    /// Deriving `Inc(child)` in the child and then in `theory` allows to conclude the negation
    /// of `formula` with [`StandardRule::ProofByRefutation1`] and related rules.
    ///
    /// # Errors
    /// * NotAProposition - if `formula` is not a proposition
    ///
    /// # Example
    /// ```
    /// use axiomata::{Builtin, Consistency, StandardRule, Universe};
    ///
    /// let mut u = Universe::new();
    /// let t = u.declare_theory("T");
    /// let p = u.declare_proposition("p");
    /// let not_p = u.make_builtin(Builtin::Not, &[p]).unwrap();
    /// let h = u.pose_hypothesis(t, not_p).unwrap();
    /// assert_eq!(u.statement(h.assumption).unwrap().proved(), Some(not_p));
    /// assert_eq!(u.theory(h.child).unwrap().parent(), Some(t));
    /// assert_eq!(u.consistency(h.child).unwrap(), Consistency::Undetermined);
    /// ```
    pub fn pose_hypothesis(&mut self, theory: TheoryId, formula: FormulaId) -> Result<PosedHypothesis> {
        self.theory(theory)?;
        self.formula(formula)?;
        if !self.is_proposition(formula) {
            return Err(KernelError::NotAProposition {
                formula: self.display(formula).to_string(),
            });
        }

        let child = TheoryId::new(self.id, self.theories.len());
        let statement = self.append_statement(theory, StatementKind::Hypothesis { formula, child });
        let created = self.extend(theory, Some(statement.position))?;
        debug_assert_eq!(created, child);

        let symbol = format!("{}.hypothesis", self.theory(child)?.symbol());
        let text = self.display(formula).to_string();
        let axiom = self.declare_axiom(&symbol, &text);
        let inclusion = self.include_axiom(child, axiom)?;
        let assumption = self
            .include_standard(child, StandardRule::AxiomInterpretation)?
            .infer(self, &[inclusion.into(), formula.into()])?;
        self.lock_inclusion(inclusion)?;
        self.stabilize(child)?;
        debug!(
            theory = %self.theory(theory)?.symbol(),
            child = %self.theory(child)?.symbol(),
            hypothesis = %text,
            "hypothesis posed"
        );
        Ok(PosedHypothesis {
            statement,
            child,
            assumption,
        })
    }
}
