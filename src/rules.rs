//! The inference rules every universe declares.
//!
//! Pattern variables: `P`, `Q`, `R`, `S` stand for propositions, `X`, `Y` for arbitrary formulas
//! and `T` for the object of a theory.

use crate::{
    connective::Builtin,
    error::{KernelError, Result},
    formula::Formula,
    rule::{Declaration, Inclusion, Parameter, Premise, Premises},
    substitution::{MapSubstitution, SingleSubstitution},
    theory::Consistency,
    types::*,
    Universe,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StandardRule {
    /// `P ⟹ Q ⊢ P ⟹ (P ∧ Q)`
    Absorption,
    /// `axiom, P ⊢ P`
    AxiomInterpretation,
    /// `P ⟺ Q ⊢ P ⟹ Q`
    BiconditionalElimination1,
    /// `P ⟺ Q ⊢ Q ⟹ P`
    BiconditionalElimination2,
    /// `P ⟹ Q, Q ⟹ P ⊢ P ⟺ Q`
    BiconditionalIntroduction,
    /// `P ∧ Q ⊢ P`
    ConjunctionElimination1,
    /// `P ∧ Q ⊢ Q`
    ConjunctionElimination2,
    /// `P, Q ⊢ P ∧ Q`
    ConjunctionIntroduction,
    /// `P ⟹ Q, R ⟹ S, P ∨ R ⊢ Q ∨ S`
    ConstructiveDilemma,
    /// `definition, X = Y ⊢ X = Y`
    DefinitionInterpretation,
    /// `P ⟹ Q, R ⟹ S, ¬Q ∨ ¬S ⊢ ¬P ∨ ¬R`
    DestructiveDilemma,
    /// `P, Q ⊢ Q ∨ P` where `Q` is any proposition
    DisjunctionIntroduction1,
    /// `P, Q ⊢ P ∨ Q` where `Q` is any proposition
    DisjunctionIntroduction2,
    /// `P ∨ Q, ¬P ∨ R ⊢ Q ∨ R`
    DisjunctiveResolution,
    /// `P ∨ Q, ¬P ⊢ Q`
    DisjunctiveSyllogism1,
    /// `P ∨ Q, ¬Q ⊢ P`
    DisjunctiveSyllogism2,
    /// `¬¬P ⊢ P`
    DoubleNegationElimination,
    /// `P ⊢ ¬¬P`
    DoubleNegationIntroduction,
    /// `X = Y ⊢ Y = X`
    EqualityCommutativity,
    /// `P, X = Y ⊢ P[X := Y]`
    EqualTermsSubstitution,
    /// `P ⟹ Q, Q ⟹ R ⊢ P ⟹ R`
    HypotheticalSyllogism,
    /// `P, ¬P, T ⊢ Inc(T)` with the premises taken from `T`
    InconsistencyIntroduction1,
    /// `X = Y, X ≠ Y, T ⊢ Inc(T)` with the premises taken from `T`
    InconsistencyIntroduction2,
    /// `X ≠ X, T ⊢ Inc(T)` with the premise taken from `T`
    InconsistencyIntroduction3,
    /// `P ⟹ Q, P ⊢ Q`
    ModusPonens,
    /// `P ⟹ Q, ¬Q ⊢ ¬P`
    ModusTollens,
    /// `P ⊢ P` if the decision procedure of the head connective of `P` accepts `P`
    ProceduralInterpretation,
    /// `hypothesis ¬P, Inc(T) ⊢ P` where `T` is the hypothesis theory
    ProofByContradiction1,
    /// `hypothesis X ≠ Y, Inc(T) ⊢ X = Y` where `T` is the hypothesis theory
    ProofByContradiction2,
    /// `hypothesis P, Inc(T) ⊢ ¬P` where `T` is the hypothesis theory
    ProofByRefutation1,
    /// `hypothesis X = Y, Inc(T) ⊢ X ≠ Y` where `T` is the hypothesis theory
    ProofByRefutation2,
    /// `P, ⟨v₁, …, vₙ⟩ ⊢ P[x₁ := v₁, …, xₙ := vₙ]` where `x₁, …, xₙ` are the variables of `P` in
    /// order of occurrence
    VariableSubstitution,
}

impl StandardRule {
    pub const ALL: [StandardRule; 32] = [
        StandardRule::Absorption,
        StandardRule::AxiomInterpretation,
        StandardRule::BiconditionalElimination1,
        StandardRule::BiconditionalElimination2,
        StandardRule::BiconditionalIntroduction,
        StandardRule::ConjunctionElimination1,
        StandardRule::ConjunctionElimination2,
        StandardRule::ConjunctionIntroduction,
        StandardRule::ConstructiveDilemma,
        StandardRule::DefinitionInterpretation,
        StandardRule::DestructiveDilemma,
        StandardRule::DisjunctionIntroduction1,
        StandardRule::DisjunctionIntroduction2,
        StandardRule::DisjunctiveResolution,
        StandardRule::DisjunctiveSyllogism1,
        StandardRule::DisjunctiveSyllogism2,
        StandardRule::DoubleNegationElimination,
        StandardRule::DoubleNegationIntroduction,
        StandardRule::EqualityCommutativity,
        StandardRule::EqualTermsSubstitution,
        StandardRule::HypotheticalSyllogism,
        StandardRule::InconsistencyIntroduction1,
        StandardRule::InconsistencyIntroduction2,
        StandardRule::InconsistencyIntroduction3,
        StandardRule::ModusPonens,
        StandardRule::ModusTollens,
        StandardRule::ProceduralInterpretation,
        StandardRule::ProofByContradiction1,
        StandardRule::ProofByContradiction2,
        StandardRule::ProofByRefutation1,
        StandardRule::ProofByRefutation2,
        StandardRule::VariableSubstitution,
    ];

    pub fn name(self) -> &'static str {
        use StandardRule::*;
        match self {
            Absorption => "absorption",
            AxiomInterpretation => "axiom_interpretation",
            BiconditionalElimination1 => "biconditional_elimination_1",
            BiconditionalElimination2 => "biconditional_elimination_2",
            BiconditionalIntroduction => "biconditional_introduction",
            ConjunctionElimination1 => "conjunction_elimination_1",
            ConjunctionElimination2 => "conjunction_elimination_2",
            ConjunctionIntroduction => "conjunction_introduction",
            ConstructiveDilemma => "constructive_dilemma",
            DefinitionInterpretation => "definition_interpretation",
            DestructiveDilemma => "destructive_dilemma",
            DisjunctionIntroduction1 => "disjunction_introduction_1",
            DisjunctionIntroduction2 => "disjunction_introduction_2",
            DisjunctiveResolution => "disjunctive_resolution",
            DisjunctiveSyllogism1 => "disjunctive_syllogism_1",
            DisjunctiveSyllogism2 => "disjunctive_syllogism_2",
            DoubleNegationElimination => "double_negation_elimination",
            DoubleNegationIntroduction => "double_negation_introduction",
            EqualityCommutativity => "equality_commutativity",
            EqualTermsSubstitution => "equal_terms_substitution",
            HypotheticalSyllogism => "hypothetical_syllogism",
            InconsistencyIntroduction1 => "inconsistency_introduction_1",
            InconsistencyIntroduction2 => "inconsistency_introduction_2",
            InconsistencyIntroduction3 => "inconsistency_introduction_3",
            ModusPonens => "modus_ponens",
            ModusTollens => "modus_tollens",
            ProceduralInterpretation => "procedural_interpretation",
            ProofByContradiction1 => "proof_by_contradiction_1",
            ProofByContradiction2 => "proof_by_contradiction_2",
            ProofByRefutation1 => "proof_by_refutation_1",
            ProofByRefutation2 => "proof_by_refutation_2",
            VariableSubstitution => "variable_substitution",
        }
    }
}

struct Patterns {
    mask: [VariableId; 7],
    p: FormulaId,
    q: FormulaId,
    r: FormulaId,
    s: FormulaId,
    x: FormulaId,
    y: FormulaId,
    t: FormulaId,
}

impl Universe {
    pub fn standard_rule(&self, rule: StandardRule) -> RuleId {
        RuleId::new(self.id, rule as usize)
    }

    /// Makes a standard rule usable in `theory`.
    pub fn include_standard(&mut self, theory: TheoryId, rule: StandardRule) -> Result<Inclusion> {
        self.include_rule(theory, self.standard_rule(rule))
    }

    fn pattern_variable(&mut self, symbol: &str, propositional: bool) -> (VariableId, FormulaId) {
        let id = self.push_unlisted_variable(symbol, propositional);
        (id, self.variables[id.index()].formula())
    }

    fn op(&mut self, builtin: Builtin, terms: &[FormulaId]) -> FormulaId {
        self.intern(Formula::Compound {
            connective: self.builtin(builtin),
            terms: terms.into(),
        })
    }

    /// Declares all of [`StandardRule::ALL`] in order, right after the builtin connectives.
    pub(crate) fn declare_standard_rules(&mut self) {
        let (pv, p) = self.pattern_variable("P", true);
        let (qv, q) = self.pattern_variable("Q", true);
        let (rv, r) = self.pattern_variable("R", true);
        let (sv, s) = self.pattern_variable("S", true);
        let (xv, x) = self.pattern_variable("X", false);
        let (yv, y) = self.pattern_variable("Y", false);
        let (tv, t) = self.pattern_variable("T", false);
        let patterns = Patterns {
            mask: [pv, qv, rv, sv, xv, yv, tv],
            p,
            q,
            r,
            s,
            x,
            y,
            t,
        };
        for rule in StandardRule::ALL {
            let declaration = self.standard_declaration(rule, &patterns);
            let id = self.push_rule(declaration.mask(patterns.mask));
            debug_assert_eq!(id, self.standard_rule(rule));
        }
    }

    fn standard_declaration(&mut self, rule: StandardRule, v: &Patterns) -> Declaration {
        use Builtin::*;
        use StandardRule::*;
        let Patterns {
            p, q, r, s, x, y, t, ..
        } = *v;
        let name = rule.name();
        match rule {
            Absorption => {
                let p_and_q = self.op(And, &[p, q]);
                Declaration::new(name, self.op(Implies, &[p, p_and_q]))
                    .premise(self.op(Implies, &[p, q]))
            }
            AxiomInterpretation => Declaration::new(name, p)
                .parameter(Parameter::axiom_inclusion())
                .formula(p),
            BiconditionalElimination1 => {
                Declaration::new(name, self.op(Implies, &[p, q])).premise(self.op(Iff, &[p, q]))
            }
            BiconditionalElimination2 => {
                Declaration::new(name, self.op(Implies, &[q, p])).premise(self.op(Iff, &[p, q]))
            }
            BiconditionalIntroduction => Declaration::new(name, self.op(Iff, &[p, q]))
                .premise(self.op(Implies, &[p, q]))
                .premise(self.op(Implies, &[q, p])),
            ConjunctionElimination1 => Declaration::new(name, p).premise(self.op(And, &[p, q])),
            ConjunctionElimination2 => Declaration::new(name, q).premise(self.op(And, &[p, q])),
            ConjunctionIntroduction => Declaration::new(name, self.op(And, &[p, q]))
                .premise(p)
                .premise(q),
            ConstructiveDilemma => Declaration::new(name, self.op(Or, &[q, s]))
                .premise(self.op(Implies, &[p, q]))
                .premise(self.op(Implies, &[r, s]))
                .premise(self.op(Or, &[p, r])),
            DefinitionInterpretation => {
                let x_equal_y = self.op(Equal, &[x, y]);
                Declaration::new(name, x_equal_y)
                    .parameter(Parameter::definition_inclusion())
                    .formula(x_equal_y)
            }
            DestructiveDilemma => {
                let (not_p, not_q) = (self.op(Not, &[p]), self.op(Not, &[q]));
                let (not_r, not_s) = (self.op(Not, &[r]), self.op(Not, &[s]));
                Declaration::new(name, self.op(Or, &[not_p, not_r]))
                    .premise(self.op(Implies, &[p, q]))
                    .premise(self.op(Implies, &[r, s]))
                    .premise(self.op(Or, &[not_q, not_s]))
            }
            DisjunctionIntroduction1 => Declaration::new(name, self.op(Or, &[q, p]))
                .premise(p)
                .formula(q),
            DisjunctionIntroduction2 => Declaration::new(name, self.op(Or, &[p, q]))
                .premise(p)
                .formula(q),
            DisjunctiveResolution => {
                let not_p = self.op(Not, &[p]);
                Declaration::new(name, self.op(Or, &[q, r]))
                    .premise(self.op(Or, &[p, q]))
                    .premise(self.op(Or, &[not_p, r]))
            }
            DisjunctiveSyllogism1 => Declaration::new(name, q)
                .premise(self.op(Or, &[p, q]))
                .premise(self.op(Not, &[p])),
            DisjunctiveSyllogism2 => Declaration::new(name, p)
                .premise(self.op(Or, &[p, q]))
                .premise(self.op(Not, &[q])),
            DoubleNegationElimination => {
                let not_p = self.op(Not, &[p]);
                Declaration::new(name, p).premise(self.op(Not, &[not_p]))
            }
            DoubleNegationIntroduction => {
                let not_p = self.op(Not, &[p]);
                Declaration::new(name, self.op(Not, &[not_p])).premise(p)
            }
            EqualityCommutativity => {
                Declaration::new(name, self.op(Equal, &[y, x])).premise(self.op(Equal, &[x, y]))
            }
            EqualTermsSubstitution => Declaration::new(name, p)
                .premise(p)
                .premise(self.op(Equal, &[x, y]))
                .construct(substitute_equal_terms),
            HypotheticalSyllogism => Declaration::new(name, self.op(Implies, &[p, r]))
                .premise(self.op(Implies, &[p, q]))
                .premise(self.op(Implies, &[q, r])),
            InconsistencyIntroduction1 => Declaration::new(name, self.op(Inconsistent, &[t]))
                .parameter(Parameter::proved(p).within(2))
                .parameter(Parameter::proved(self.op(Not, &[p])).within(2))
                .parameter(Parameter::theory(t)),
            InconsistencyIntroduction2 => Declaration::new(name, self.op(Inconsistent, &[t]))
                .parameter(Parameter::proved(self.op(Equal, &[x, y])).within(2))
                .parameter(Parameter::proved(self.op(Unequal, &[x, y])).within(2))
                .parameter(Parameter::theory(t)),
            InconsistencyIntroduction3 => Declaration::new(name, self.op(Inconsistent, &[t]))
                .parameter(Parameter::proved(self.op(Unequal, &[x, x])).within(1))
                .parameter(Parameter::theory(t)),
            ModusPonens => Declaration::new(name, q)
                .premise(self.op(Implies, &[p, q]))
                .premise(p),
            ModusTollens => Declaration::new(name, self.op(Not, &[p]))
                .premise(self.op(Implies, &[p, q]))
                .premise(self.op(Not, &[q])),
            ProceduralInterpretation => Declaration::new(name, p)
                .formula(p)
                .validate(decided_by_connective),
            ProofByContradiction1 => Declaration::new(name, p)
                .parameter(Parameter::hypothesis(self.op(Not, &[p])))
                .premise(self.op(Inconsistent, &[t]))
                .validate(refuted_hypothesis),
            ProofByContradiction2 => Declaration::new(name, self.op(Equal, &[x, y]))
                .parameter(Parameter::hypothesis(self.op(Unequal, &[x, y])))
                .premise(self.op(Inconsistent, &[t]))
                .validate(refuted_hypothesis),
            ProofByRefutation1 => Declaration::new(name, self.op(Not, &[p]))
                .parameter(Parameter::hypothesis(p))
                .premise(self.op(Inconsistent, &[t]))
                .validate(refuted_hypothesis),
            ProofByRefutation2 => Declaration::new(name, self.op(Unequal, &[x, y]))
                .parameter(Parameter::hypothesis(self.op(Equal, &[x, y])))
                .premise(self.op(Inconsistent, &[t]))
                .validate(refuted_hypothesis),
            VariableSubstitution => Declaration::new(name, p)
                .premise(p)
                .parameter(Parameter::any_formula())
                .validate(matching_tuple)
                .construct(substitute_variables),
        }
    }
}

fn rule_name(u: &Universe, premises: &Premises) -> String {
    u.rule(premises.rule())
        .map(|rule| rule.name().to_owned())
        .unwrap_or_default()
}

fn premise_formula(u: &Universe, premises: &Premises, index: usize) -> Result<FormulaId> {
    premises.formula(index).ok_or_else(|| {
        KernelError::syntax(rule_name(u, premises), Some(index), "expected a formula")
    })
}

/// The hypothesis child must be the theory proved inconsistent.
fn refuted_hypothesis(u: &Universe, premises: &Premises) -> Result<()> {
    let child = match premises.get(0) {
        Some(Premise::Hypothesis { child, .. }) => *child,
        _ => {
            return Err(KernelError::syntax(
                rule_name(u, premises),
                Some(0),
                "expected a hypothesis",
            ))
        }
    };
    let refuted = u.inconsistency_target(premise_formula(u, premises, 1)?);
    let symbol = u.theory(child)?.symbol();
    if refuted != Some(child) {
        return Err(KernelError::validity(
            rule_name(u, premises),
            Some(1),
            format!("the inconsistency of `{}` is not proved", symbol),
        ));
    }
    if u.consistency(child)? != Consistency::ProvedInconsistent {
        return Err(KernelError::validity(
            rule_name(u, premises),
            Some(1),
            format!("`{}` is not proved inconsistent", symbol),
        ));
    }
    Ok(())
}

fn decided_by_connective(u: &Universe, premises: &Premises) -> Result<()> {
    let formula = premise_formula(u, premises, 0)?;
    let procedure = u
        .compound(formula)
        .and_then(|(connective, _)| u.connective(connective).ok()?.procedure().cloned());
    match procedure {
        Some(procedure) if procedure(u, formula) => Ok(()),
        Some(_) => Err(KernelError::validity(
            rule_name(u, premises),
            Some(0),
            format!("`{}` was rejected by the decision procedure", u.display(formula)),
        )),
        None => Err(KernelError::validity(
            rule_name(u, premises),
            Some(0),
            format!("`{}` has no decision procedure", u.display(formula)),
        )),
    }
}

fn tuple_terms(u: &Universe, premises: &Premises) -> Result<Vec<FormulaId>> {
    let tuple = premise_formula(u, premises, 1)?;
    match u.compound(tuple) {
        Some((connective, terms)) if connective == u.builtin(Builtin::Tuple) => Ok(terms.to_vec()),
        _ => Err(KernelError::syntax(
            rule_name(u, premises),
            Some(1),
            format!("`{}` is not a tuple", u.display(tuple)),
        )),
    }
}

fn matching_tuple(u: &Universe, premises: &Premises) -> Result<()> {
    let values = tuple_terms(u, premises)?;
    let variables = u.variable_ordered_set(premise_formula(u, premises, 0)?);
    if values.len() != variables.len() {
        return Err(KernelError::syntax(
            rule_name(u, premises),
            Some(1),
            format!(
                "expected {} values, found {}",
                variables.len(),
                values.len()
            ),
        ));
    }
    for (variable, value) in variables.into_iter().zip(values) {
        let variable = u.variable(variable)?;
        if variable.strictly_propositional() && !u.is_proposition(value) {
            return Err(KernelError::syntax(
                rule_name(u, premises),
                Some(1),
                format!(
                    "`{}` cannot replace the propositional variable `{}`",
                    u.display(value),
                    variable.symbol()
                ),
            ));
        }
    }
    Ok(())
}

fn substitute_variables(u: &mut Universe, premises: &Premises) -> Result<FormulaId> {
    let formula = premise_formula(u, premises, 0)?;
    let values = tuple_terms(u, premises)?;
    let substitution = u
        .variable_ordered_set(formula)
        .into_iter()
        .zip(values)
        .map(|(variable, value)| Ok((u.variable_formula(variable)?, value)))
        .collect::<Result<MapSubstitution>>()?;
    u.substitute(formula, &substitution)
}

fn substitute_equal_terms(u: &mut Universe, premises: &Premises) -> Result<FormulaId> {
    let formula = premise_formula(u, premises, 0)?;
    let equality = premise_formula(u, premises, 1)?;
    let (from, to) = match u.compound(equality) {
        Some((_, [from, to])) => (*from, *to),
        _ => {
            return Err(KernelError::syntax(
                rule_name(u, premises),
                Some(1),
                "expected an equality",
            ))
        }
    };
    u.substitute(formula, &SingleSubstitution::new(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Arity, ConnectiveFlags, Notation, StatementRef};
    use std::sync::Arc;

    struct Session {
        u: Universe,
        t: TheoryId,
    }

    impl Session {
        fn new() -> Self {
            let mut u = Universe::new();
            let t = u.declare_theory("T");
            Session { u, t }
        }

        fn assume(&mut self, formula: FormulaId) -> StatementRef {
            let axiom = self.u.declare_axiom("A", "assumed");
            let inclusion = self.u.include_axiom(self.t, axiom).unwrap();
            self.apply(
                StandardRule::AxiomInterpretation,
                &[inclusion.into(), formula.into()],
            )
            .unwrap()
        }

        fn apply(
            &mut self,
            rule: StandardRule,
            arguments: &[crate::Argument],
        ) -> Result<StatementRef> {
            self.u
                .include_standard(self.t, rule)?
                .infer(&mut self.u, arguments)
        }

        fn proved(&self, statement: StatementRef) -> String {
            let formula = self.u.statement(statement).unwrap().proved().unwrap();
            self.u.display(formula).to_string()
        }

        fn op(&mut self, builtin: Builtin, terms: &[FormulaId]) -> FormulaId {
            self.u.make_builtin(builtin, terms).unwrap()
        }
    }

    #[test]
    fn rules_are_declared_in_order() {
        let u = Universe::new();
        for rule in StandardRule::ALL {
            assert_eq!(u.rule(u.standard_rule(rule)).unwrap().name(), rule.name());
        }
    }

    #[test]
    fn propositional_rules() {
        let mut s = Session::new();
        let p = s.u.declare_proposition("p");
        let q = s.u.declare_proposition("q");
        let r = s.u.declare_proposition("r");
        let p_q = s.op(Builtin::Implies, &[p, q]);
        let q_r = s.op(Builtin::Implies, &[q, r]);
        let a = s.assume(p_q);
        let b = s.assume(q_r);
        let c = s.assume(p);

        let pr = s
            .apply(StandardRule::HypotheticalSyllogism, &[a.into(), b.into()])
            .unwrap();
        assert_eq!(s.proved(pr), "(p ⟹ r)");
        let absorbed = s.apply(StandardRule::Absorption, &[a.into()]).unwrap();
        assert_eq!(s.proved(absorbed), "(p ⟹ (p ∧ q))");
        let and = s
            .apply(StandardRule::ConjunctionIntroduction, &[c.into(), c.into()])
            .unwrap();
        assert_eq!(s.proved(and), "(p ∧ p)");
        let or = s
            .apply(StandardRule::DisjunctionIntroduction1, &[c.into(), r.into()])
            .unwrap();
        assert_eq!(s.proved(or), "(r ∨ p)");
        let nn = s
            .apply(StandardRule::DoubleNegationIntroduction, &[c.into()])
            .unwrap();
        assert_eq!(s.proved(nn), "¬(¬(p))");
        let back = s
            .apply(StandardRule::DoubleNegationElimination, &[nn.into()])
            .unwrap();
        assert_eq!(s.proved(back), "p");
        let q_proved = s
            .apply(StandardRule::ModusPonens, &[a.into(), c.into()])
            .unwrap();
        let q_p = s.op(Builtin::Implies, &[q, p]);
        let iff_left = s.assume(q_p);
        let iff = s
            .apply(
                StandardRule::BiconditionalIntroduction,
                &[a.into(), iff_left.into()],
            )
            .unwrap();
        assert_eq!(s.proved(iff), "(p ⟺ q)");
        let eliminated = s
            .apply(StandardRule::BiconditionalElimination2, &[iff.into()])
            .unwrap();
        assert_eq!(s.proved(eliminated), "(q ⟹ p)");
        assert_eq!(s.proved(q_proved), "q");
    }

    #[test]
    fn disjunctions_and_dilemmas() {
        let mut s = Session::new();
        let p = s.u.declare_proposition("p");
        let q = s.u.declare_proposition("q");
        let r = s.u.declare_proposition("r");
        let w = s.u.declare_proposition("w");
        let not_p = s.op(Builtin::Not, &[p]);
        let not_q = s.op(Builtin::Not, &[q]);
        let p_or_q = s.op(Builtin::Or, &[p, q]);
        let a = s.assume(p_or_q);
        let b = s.assume(not_p);
        let c = s.assume(not_q);
        let first = s
            .apply(StandardRule::DisjunctiveSyllogism1, &[a.into(), b.into()])
            .unwrap();
        assert_eq!(s.proved(first), "q");
        let second = s
            .apply(StandardRule::DisjunctiveSyllogism2, &[a.into(), c.into()])
            .unwrap();
        assert_eq!(s.proved(second), "p");

        let not_p_or_r = s.op(Builtin::Or, &[not_p, r]);
        let d = s.assume(not_p_or_r);
        let resolved = s
            .apply(StandardRule::DisjunctiveResolution, &[a.into(), d.into()])
            .unwrap();
        assert_eq!(s.proved(resolved), "(q ∨ r)");

        let p_q = s.op(Builtin::Implies, &[p, q]);
        let r_w = s.op(Builtin::Implies, &[r, w]);
        let p_or_r = s.op(Builtin::Or, &[p, r]);
        let (e, f, g) = (s.assume(p_q), s.assume(r_w), s.assume(p_or_r));
        let dilemma = s
            .apply(
                StandardRule::ConstructiveDilemma,
                &[e.into(), f.into(), g.into()],
            )
            .unwrap();
        assert_eq!(s.proved(dilemma), "(q ∨ w)");

        let not_w = s.op(Builtin::Not, &[w]);
        let not_q_or_not_w = s.op(Builtin::Or, &[not_q, not_w]);
        let h = s.assume(not_q_or_not_w);
        let destructive = s
            .apply(
                StandardRule::DestructiveDilemma,
                &[e.into(), f.into(), h.into()],
            )
            .unwrap();
        assert_eq!(s.proved(destructive), "(¬(p) ∨ ¬(r))");
        let tollens = s
            .apply(StandardRule::ModusTollens, &[e.into(), c.into()])
            .unwrap();
        assert_eq!(s.proved(tollens), "¬(p)");
    }

    #[test]
    fn equalities() {
        let mut s = Session::new();
        let a = s.u.declare_object("a");
        let b = s.u.declare_object("b");
        let f = s
            .u
            .declare_connective("f", Arity::Exact(1), Notation::FunctionCall, ConnectiveFlags::NONE)
            .unwrap();
        let fa = s.u.make_compound(f, &[a]).unwrap();
        let a_b = s.op(Builtin::Equal, &[a, b]);
        let fa_a = s.op(Builtin::Equal, &[fa, a]);
        let eq = s.assume(a_b);
        let subject = s.assume(fa_a);
        let swapped = s
            .apply(StandardRule::EqualityCommutativity, &[eq.into()])
            .unwrap();
        assert_eq!(s.proved(swapped), "(b = a)");
        let replaced = s
            .apply(
                StandardRule::EqualTermsSubstitution,
                &[subject.into(), eq.into()],
            )
            .unwrap();
        assert_eq!(s.proved(replaced), "(f(b) = b)");

        let definition = s.u.declare_definition("D", "a is b");
        let inclusion = s.u.include_definition(s.t, definition).unwrap();
        let interpreted = s
            .apply(
                StandardRule::DefinitionInterpretation,
                &[inclusion.into(), a_b.into()],
            )
            .unwrap();
        assert_eq!(s.proved(interpreted), "(a = b)");
        let err = s
            .apply(
                StandardRule::DefinitionInterpretation,
                &[inclusion.into(), a.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_syntax());
    }

    #[test]
    fn variable_substitution() {
        let mut s = Session::new();
        let a = s.u.declare_object("a");
        let b = s.u.declare_object("b");
        let x = s.u.declare_variable("x", false);
        let y = s.u.declare_variable("y", false);
        let (x, y) = (
            s.u.variable_formula(x).unwrap(),
            s.u.variable_formula(y).unwrap(),
        );
        let general = s.op(Builtin::Unequal, &[y, x]);
        let statement = s.assume(general);
        let values = s.op(Builtin::Tuple, &[a, b]);
        let instance = s
            .apply(
                StandardRule::VariableSubstitution,
                &[statement.into(), values.into()],
            )
            .unwrap();
        assert_eq!(s.proved(instance), "(a ≠ b)");

        let short = s.op(Builtin::Tuple, &[a]);
        let err = s
            .apply(
                StandardRule::VariableSubstitution,
                &[statement.into(), short.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_syntax());
        let err = s
            .apply(
                StandardRule::VariableSubstitution,
                &[statement.into(), a.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_syntax());
    }

    #[test]
    fn procedural_interpretation() {
        let mut s = Session::new();
        let less = s
            .u
            .declare_decided_connective(
                "<",
                Arity::Exact(2),
                Notation::Infix,
                ConnectiveFlags::PROPOSITION,
                Arc::new(|u: &Universe, f: FormulaId| {
                    let terms = u.compound(f).map(|(_, terms)| terms.to_vec());
                    let digits = terms.map(|terms| {
                        terms
                            .iter()
                            .filter_map(|&t| u.symbol(t).ok()?.parse::<u32>().ok())
                            .collect::<Vec<_>>()
                    });
                    matches!(digits.as_deref(), Some([a, b]) if a < b)
                }),
            )
            .unwrap();
        let one = s.u.declare_object("1");
        let two = s.u.declare_object("2");
        let true_claim = s.u.make_compound(less, &[one, two]).unwrap();
        let false_claim = s.u.make_compound(less, &[two, one]).unwrap();
        let proved = s
            .apply(StandardRule::ProceduralInterpretation, &[true_claim.into()])
            .unwrap();
        assert_eq!(s.proved(proved), "(1 < 2)");
        let err = s
            .apply(StandardRule::ProceduralInterpretation, &[false_claim.into()])
            .unwrap_err();
        assert!(err.is_premise_validity());

        let p = s.u.declare_proposition("p");
        let err = s
            .apply(StandardRule::ProceduralInterpretation, &[p.into()])
            .unwrap_err();
        assert!(err.is_premise_validity());
    }

    #[test]
    fn inconsistency_in_the_same_theory() {
        let mut s = Session::new();
        let p = s.u.declare_proposition("p");
        let not_p = s.op(Builtin::Not, &[p]);
        let a = s.assume(p);
        let b = s.assume(not_p);
        let t = s.t;
        let inc = s
            .apply(
                StandardRule::InconsistencyIntroduction1,
                &[a.into(), b.into(), t.into()],
            )
            .unwrap();
        assert_eq!(s.proved(inc), "Inc(T)");
        assert_eq!(
            s.u.consistency(t).unwrap(),
            Consistency::ProvedInconsistent
        );
        assert_eq!(s.u.theory(t).unwrap().inconsistency_proof(), Some(inc));

        // proving it again keeps the first proof
        let again = s
            .apply(
                StandardRule::InconsistencyIntroduction1,
                &[a.into(), b.into(), t.into()],
            )
            .unwrap();
        assert_ne!(again, inc);
        assert_eq!(s.u.theory(t).unwrap().inconsistency_proof(), Some(inc));
    }

    #[test]
    fn self_inequality() {
        let mut s = Session::new();
        let a = s.u.declare_object("a");
        let a_a = s.op(Builtin::Unequal, &[a, a]);
        let statement = s.assume(a_a);
        let t = s.t;
        s.apply(
            StandardRule::InconsistencyIntroduction3,
            &[statement.into(), t.into()],
        )
        .unwrap();
        assert_eq!(
            s.u.consistency(t).unwrap(),
            Consistency::ProvedInconsistent
        );
    }

    #[test]
    fn unrelated_theories_can_demonstrate_inconsistency() {
        let mut s = Session::new();
        let p = s.u.declare_proposition("p");
        let not_p = s.op(Builtin::Not, &[p]);
        let other = s.u.declare_theory("U");
        let axiom = s.u.declare_axiom("A", "p");
        let inclusion = s.u.include_axiom(other, axiom).unwrap();
        let interpretation = s
            .u
            .include_standard(other, StandardRule::AxiomInterpretation)
            .unwrap();
        let a = interpretation
            .infer(&mut s.u, &[inclusion.into(), p.into()])
            .unwrap();
        let b = interpretation
            .infer(&mut s.u, &[inclusion.into(), not_p.into()])
            .unwrap();
        // `U` does not extend `T`, the premises only have to be visible in `U`
        let inc = s
            .apply(
                StandardRule::InconsistencyIntroduction1,
                &[a.into(), b.into(), other.into()],
            )
            .unwrap();
        assert_eq!(inc.theory, s.t);
        assert_eq!(s.proved(inc), "Inc(U)");
        assert_eq!(
            s.u.consistency(other).unwrap(),
            Consistency::ProvedInconsistent
        );
        assert_eq!(s.u.theory(other).unwrap().inconsistency_proof(), Some(inc));
        assert_eq!(s.u.consistency(s.t).unwrap(), Consistency::Undetermined);

        // premises proved in `T` are not visible in `U`
        let c = s.assume(p);
        let d = s.assume(not_p);
        let third = s.u.declare_theory("V");
        let err = s
            .apply(
                StandardRule::InconsistencyIntroduction1,
                &[c.into(), d.into(), third.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_validity());
        assert_eq!(s.u.consistency(third).unwrap(), Consistency::Undetermined);
    }

    #[test]
    fn conjunction_and_biconditional_elimination() {
        let mut s = Session::new();
        let p = s.u.declare_proposition("p");
        let q = s.u.declare_proposition("q");
        let p_and_q = s.op(Builtin::And, &[p, q]);
        let p_or_q = s.op(Builtin::Or, &[p, q]);
        let p_iff_q = s.op(Builtin::Iff, &[p, q]);
        let p_implies_q = s.op(Builtin::Implies, &[p, q]);
        let (and, or) = (s.assume(p_and_q), s.assume(p_or_q));
        let (iff, implication) = (s.assume(p_iff_q), s.assume(p_implies_q));

        let left = s
            .apply(StandardRule::ConjunctionElimination1, &[and.into()])
            .unwrap();
        assert_eq!(s.proved(left), "p");
        let right = s
            .apply(StandardRule::ConjunctionElimination2, &[and.into()])
            .unwrap();
        assert_eq!(s.proved(right), "q");
        let forward = s
            .apply(StandardRule::BiconditionalElimination1, &[iff.into()])
            .unwrap();
        assert_eq!(s.proved(forward), "(p ⟹ q)");

        let before = s.u.statements(s.t).unwrap().len();
        for rule in [
            StandardRule::ConjunctionElimination1,
            StandardRule::ConjunctionElimination2,
        ] {
            let err = s.apply(rule, &[or.into()]).unwrap_err();
            assert!(err.is_premise_syntax(), "{:?}", err);
        }
        let err = s
            .apply(StandardRule::BiconditionalElimination1, &[implication.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
        let err = s
            .apply(StandardRule::ConjunctionElimination1, &[p_and_q.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
        assert_eq!(s.u.statements(s.t).unwrap().len(), before);
    }

    #[test]
    fn disjunction_introduction_on_the_right() {
        let mut s = Session::new();
        let p = s.u.declare_proposition("p");
        let r = s.u.declare_proposition("r");
        let a = s.u.declare_object("a");
        let given = s.assume(p);
        let or = s
            .apply(StandardRule::DisjunctionIntroduction2, &[given.into(), r.into()])
            .unwrap();
        assert_eq!(s.proved(or), "(p ∨ r)");

        // the added disjunct has to be a proposition
        let err = s
            .apply(StandardRule::DisjunctionIntroduction2, &[given.into(), a.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
        let err = s
            .apply(
                StandardRule::DisjunctionIntroduction2,
                &[given.into(), given.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_syntax());
        // `p` is not proved, only declared
        let err = s
            .apply(StandardRule::DisjunctionIntroduction2, &[p.into(), r.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
    }

    #[test]
    fn proof_by_contradiction_of_a_negation() {
        let mut s = Session::new();
        let p = s.u.declare_proposition("p");
        let q = s.u.declare_proposition("q");
        let not_p = s.op(Builtin::Not, &[p]);
        let not_q = s.op(Builtin::Not, &[q]);
        let given = s.assume(p);
        let h = s.u.pose_hypothesis(s.t, not_p).unwrap();
        let inc = s
            .apply(
                StandardRule::InconsistencyIntroduction1,
                &[given.into(), h.assumption.into(), h.child.into()],
            )
            .unwrap();
        let proved = s
            .apply(
                StandardRule::ProofByContradiction1,
                &[h.statement.into(), inc.into()],
            )
            .unwrap();
        assert_eq!(s.proved(proved), "p");
        assert_eq!(s.u.premises(proved).unwrap(), vec![h.statement, inc]);

        // a hypothesis that is not a negation
        let positive = s.u.pose_hypothesis(s.t, q).unwrap();
        let err = s
            .apply(
                StandardRule::ProofByContradiction1,
                &[positive.statement.into(), inc.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_syntax());
        // a hypothesis whose theory was never proved inconsistent
        let open = s.u.pose_hypothesis(s.t, not_q).unwrap();
        let err = s
            .apply(
                StandardRule::ProofByContradiction1,
                &[open.statement.into(), inc.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_validity());
        assert_eq!(
            s.u.consistency(open.child).unwrap(),
            Consistency::Undetermined
        );
    }

    #[test]
    fn proof_by_refutation_of_an_equality() {
        let mut s = Session::new();
        let a = s.u.declare_object("a");
        let b = s.u.declare_object("b");
        let a_b = s.op(Builtin::Equal, &[a, b]);
        let not_a_b = s.op(Builtin::Unequal, &[a, b]);
        let given = s.assume(not_a_b);
        let h = s.u.pose_hypothesis(s.t, a_b).unwrap();
        let inc = s
            .apply(
                StandardRule::InconsistencyIntroduction2,
                &[h.assumption.into(), given.into(), h.child.into()],
            )
            .unwrap();
        let refuted = s
            .apply(
                StandardRule::ProofByRefutation2,
                &[h.statement.into(), inc.into()],
            )
            .unwrap();
        assert_eq!(s.proved(refuted), "(a ≠ b)");

        // the hypothesis has to be an equality
        let unequal = s.u.pose_hypothesis(s.t, not_a_b).unwrap();
        let err = s
            .apply(
                StandardRule::ProofByRefutation2,
                &[unequal.statement.into(), inc.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_syntax());
        // and its own theory has to be the inconsistent one
        let b_a = s.op(Builtin::Equal, &[b, a]);
        let other = s.u.pose_hypothesis(s.t, b_a).unwrap();
        let err = s
            .apply(
                StandardRule::ProofByRefutation2,
                &[other.statement.into(), inc.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_validity());
    }

    #[test]
    fn self_inequality_needs_the_same_term() {
        let mut s = Session::new();
        let a = s.u.declare_object("a");
        let b = s.u.declare_object("b");
        let a_b = s.op(Builtin::Unequal, &[a, b]);
        let a_a = s.op(Builtin::Equal, &[a, a]);
        let (different, equal) = (s.assume(a_b), s.assume(a_a));
        let t = s.t;
        for premise in [different, equal] {
            let err = s
                .apply(
                    StandardRule::InconsistencyIntroduction3,
                    &[premise.into(), t.into()],
                )
                .unwrap_err();
            assert!(err.is_premise_syntax(), "{:?}", err);
        }
        // `a ≠ a` proved elsewhere is not visible in `T`
        let not_a_a = s.op(Builtin::Unequal, &[a, a]);
        let other = s.u.declare_theory("U");
        let axiom = s.u.declare_axiom("B", "a is not a");
        let inclusion = s.u.include_axiom(other, axiom).unwrap();
        let elsewhere = s
            .u
            .include_standard(other, StandardRule::AxiomInterpretation)
            .unwrap()
            .infer(&mut s.u, &[inclusion.into(), not_a_a.into()])
            .unwrap();
        let err = s
            .apply(
                StandardRule::InconsistencyIntroduction3,
                &[elsewhere.into(), t.into()],
            )
            .unwrap_err();
        assert!(err.is_premise_validity());
        assert_eq!(s.u.consistency(t).unwrap(), Consistency::Undetermined);
    }
}
