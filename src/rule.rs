use std::fmt;

use tracing::trace;

use crate::{
    connective::Procedure,
    equivalence::Assignment,
    error::{KernelError, Result},
    statement::{Argument, StatementKind},
    theory::Consistency,
    types::*,
    Universe,
};

/// Builds the conclusion of a rule from its checked premises
pub type Construct = fn(&mut Universe, &Premises) -> Result<FormulaId>;

/// Additional premise checks of a rule, run after the patterns matched
pub type Validate = fn(&Universe, &Premises) -> Result<()>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    /// An inferred statement, matched on its formula
    Proved,
    /// Any formula, it does not have to be proved
    Formula,
    /// A hypothesis statement, matched on the hypothetical formula
    Hypothesis,
    AxiomInclusion,
    DefinitionInclusion,
    /// A theory, matched on its object
    Theory,
}

impl fmt::Display for ParameterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParameterKind::Proved => "a proved statement",
            ParameterKind::Formula => "a formula",
            ParameterKind::Hypothesis => "a hypothesis",
            ParameterKind::AxiomInclusion => "an axiom inclusion",
            ParameterKind::DefinitionInclusion => "a definition inclusion",
            ParameterKind::Theory => "a theory",
        })
    }
}

/// Where a statement argument has to be visible
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The theory the rule is included in
    Current,
    /// The theory passed as the argument with this index. It can be any theory of the universe.
    TheoryArgument(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Parameter {
    kind: ParameterKind,
    pattern: Option<FormulaId>,
    scope: Scope,
}

impl Parameter {
    fn new(kind: ParameterKind, pattern: Option<FormulaId>) -> Self {
        Parameter {
            kind,
            pattern,
            scope: Scope::Current,
        }
    }

    pub fn proved(pattern: FormulaId) -> Self {
        Self::new(ParameterKind::Proved, Some(pattern))
    }

    pub fn formula(pattern: FormulaId) -> Self {
        Self::new(ParameterKind::Formula, Some(pattern))
    }

    /// A formula of any shape
    pub fn any_formula() -> Self {
        Self::new(ParameterKind::Formula, None)
    }

    pub fn hypothesis(pattern: FormulaId) -> Self {
        Self::new(ParameterKind::Hypothesis, Some(pattern))
    }

    pub fn axiom_inclusion() -> Self {
        Self::new(ParameterKind::AxiomInclusion, None)
    }

    pub fn definition_inclusion() -> Self {
        Self::new(ParameterKind::DefinitionInclusion, None)
    }

    pub fn theory(pattern: FormulaId) -> Self {
        Self::new(ParameterKind::Theory, Some(pattern))
    }

    /// Takes the statement from the theory passed as argument `argument` instead of the current
    /// theory.
    pub fn within(mut self, argument: usize) -> Self {
        self.scope = Scope::TheoryArgument(argument);
        self
    }

    pub fn kind(&self) -> ParameterKind {
        self.kind
    }

    pub fn pattern(&self) -> Option<FormulaId> {
        self.pattern
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }
}

/// A resolved argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Premise {
    Proved {
        statement: StatementRef,
        formula: FormulaId,
    },
    Hypothesis {
        statement: StatementRef,
        formula: FormulaId,
        child: TheoryId,
    },
    Axiom {
        statement: StatementRef,
        axiom: AxiomId,
    },
    Definition {
        statement: StatementRef,
        definition: DefinitionId,
    },
    Formula(FormulaId),
    Theory {
        theory: TheoryId,
        object: FormulaId,
    },
}

impl Premise {
    /// The formula that is matched against the parameter pattern
    pub fn formula(&self) -> Option<FormulaId> {
        match *self {
            Premise::Proved { formula, .. }
            | Premise::Hypothesis { formula, .. }
            | Premise::Formula(formula) => Some(formula),
            Premise::Theory { object, .. } => Some(object),
            Premise::Axiom { .. } | Premise::Definition { .. } => None,
        }
    }

    pub fn statement(&self) -> Option<StatementRef> {
        match *self {
            Premise::Proved { statement, .. }
            | Premise::Hypothesis { statement, .. }
            | Premise::Axiom { statement, .. }
            | Premise::Definition { statement, .. } => Some(statement),
            Premise::Formula(_) | Premise::Theory { .. } => None,
        }
    }
}

/// Premises that passed [`Inclusion::check_premises`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Premises {
    rule: RuleId,
    theory: TheoryId,
    premises: Vec<Premise>,
    assignment: Assignment,
}

impl Premises {
    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// The theory the conclusion will be appended to
    pub fn theory(&self) -> TheoryId {
        self.theory
    }

    pub fn get(&self, index: usize) -> Option<&Premise> {
        self.premises.get(index)
    }

    pub fn formula(&self, index: usize) -> Option<FormulaId> {
        self.premises.get(index).and_then(Premise::formula)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Premise> + '_ {
        self.premises.iter()
    }

    /// Joint bindings of the mask variables over all premises
    pub fn assignment(&self) -> &Assignment {
        &self.assignment
    }
}

/// An inference rule, as declared with [`Universe::declare_rule`].
///
/// ```
/// use axiomata::{Arity, ConnectiveFlags, Declaration, Notation, Universe};
///
/// let mut u = Universe::new();
/// let implies = u
///     .declare_connective("implies", Arity::Exact(2), Notation::Infix, ConnectiveFlags::PROPOSITION)
///     .unwrap();
/// let a = u.declare_variable("A", false);
/// let b = u.declare_variable("B", false);
/// let (af, bf) = (u.variable_formula(a).unwrap(), u.variable_formula(b).unwrap());
/// let a_implies_b = u.make_compound(implies, &[af, bf]).unwrap();
///
/// let modus_ponens = u
///     .declare_rule(
///         Declaration::new("modus_ponens", bf)
///             .mask([a, b])
///             .premise(a_implies_b)
///             .premise(af),
///     )
///     .unwrap();
/// assert_eq!(u.rule(modus_ponens).unwrap().parameters().len(), 2);
/// ```
#[derive(Clone)]
pub struct Declaration {
    name: String,
    mask: Vec<VariableId>,
    parameters: Vec<Parameter>,
    conclusion: FormulaId,
    construct: Construct,
    validate: Option<Validate>,
    procedure: Option<Procedure>,
}

impl Declaration {
    /// A rule concluding `conclusion` with the mask variables replaced by their bindings
    pub fn new(name: &str, conclusion: FormulaId) -> Self {
        Declaration {
            name: name.to_owned(),
            mask: Vec::new(),
            parameters: Vec::new(),
            conclusion,
            construct: instantiate,
            validate: None,
            procedure: None,
        }
    }

    pub fn mask(mut self, variables: impl IntoIterator<Item = VariableId>) -> Self {
        self.mask.extend(variables);
        self
    }

    pub fn parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Adds a proved statement parameter
    pub fn premise(self, pattern: FormulaId) -> Self {
        self.parameter(Parameter::proved(pattern))
    }

    /// Adds a formula parameter
    pub fn formula(self, pattern: FormulaId) -> Self {
        self.parameter(Parameter::formula(pattern))
    }

    pub fn construct(mut self, construct: Construct) -> Self {
        self.construct = construct;
        self
    }

    pub fn validate(mut self, validate: Validate) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Every conclusion has to be accepted by `procedure`
    pub fn procedure(mut self, procedure: Procedure) -> Self {
        self.procedure = Some(procedure);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mask_variables(&self) -> &[VariableId] {
        &self.mask
    }

    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn conclusion(&self) -> FormulaId {
        self.conclusion
    }
}

impl fmt::Debug for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Declaration")
            .field("name", &self.name)
            .field("mask", &self.mask)
            .field("parameters", &self.parameters)
            .field("conclusion", &self.conclusion)
            .field("validated", &self.validate.is_some())
            .field("decided", &self.procedure.is_some())
            .finish()
    }
}

/// The default [`Construct`]: substitutes the joint assignment into the conclusion pattern.
pub fn instantiate(universe: &mut Universe, premises: &Premises) -> Result<FormulaId> {
    let conclusion = universe.rule(premises.rule())?.conclusion;
    universe.substitute(conclusion, premises.assignment())
}

/// A rule bound to a theory
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Inclusion {
    theory: TheoryId,
    rule: RuleId,
}

impl Inclusion {
    pub fn theory(&self) -> TheoryId {
        self.theory
    }

    pub fn rule(&self) -> RuleId {
        self.rule
    }

    /// Checks `arguments` against the parameters of the rule.
    ///
    /// # Errors
    /// * PremiseSyntax - wrong number of arguments, an argument of the wrong kind, a handle
    /// that cannot be resolved, a formula that does not match its pattern or a propositional mask
    /// variable bound to something that is not a proposition
    /// * PremiseValidity - a statement that is not visible where it has to be, premises that bind
    /// a mask variable differently or a failed rule-specific check
    /// * LockedResource - an axiom or definition inclusion that is locked
    pub fn check_premises(&self, universe: &Universe, arguments: &[Argument]) -> Result<Premises> {
        let declaration = universe.rule(self.rule)?;
        let current = universe.theory(self.theory)?;
        let name = declaration.name.as_str();
        trace!(rule = name, theory = %current.symbol(), "checking premises");
        if arguments.len() != declaration.parameters.len() {
            return Err(KernelError::syntax(
                name,
                None,
                format!(
                    "expected {} arguments, found {}",
                    declaration.parameters.len(),
                    arguments.len()
                ),
            ));
        }

        let mut premises = Vec::with_capacity(arguments.len());
        for (i, (parameter, &argument)) in declaration.parameters.iter().zip(arguments).enumerate()
        {
            let premise = resolve(universe, name, i, parameter.kind, argument)?;
            if let (Some(pattern), Some(formula)) = (parameter.pattern, premise.formula()) {
                let bindings = universe
                    .masked_similarity(formula, pattern, &declaration.mask)
                    .ok_or_else(|| {
                        KernelError::syntax(
                            name,
                            Some(i),
                            format!(
                                "`{}` does not have the shape `{}`",
                                universe.display(formula),
                                universe.display(pattern)
                            ),
                        )
                    })?;
                for (variable, value) in bindings.iter() {
                    if universe.variables[variable.index()].strictly_propositional()
                        && !universe.is_proposition(value)
                    {
                        return Err(KernelError::syntax(
                            name,
                            Some(i),
                            format!("`{}` is not a proposition", universe.display(value)),
                        ));
                    }
                }
            }
            premises.push(premise);
        }

        let mut assignment = Assignment::new();
        for (i, (parameter, premise)) in declaration.parameters.iter().zip(&premises).enumerate() {
            if let Some(statement) = premise.statement() {
                let scope = match parameter.scope {
                    Scope::Current => self.theory,
                    Scope::TheoryArgument(j) => match premises.get(j) {
                        Some(Premise::Theory { theory, .. }) => *theory,
                        _ => {
                            return Err(KernelError::syntax(
                                name,
                                Some(j),
                                "expected a theory to look up premises in",
                            ))
                        }
                    },
                };
                if !universe.is_visible(scope, statement) {
                    return Err(KernelError::validity(
                        name,
                        Some(i),
                        format!(
                            "statement {} of `{}` is not visible from `{}`",
                            statement.position,
                            universe.theory(statement.theory)?.symbol(),
                            universe.theory(scope)?.symbol()
                        ),
                    ));
                }
                check_unlocked(universe, statement)?;
            }
            if let (Some(pattern), Some(formula)) = (parameter.pattern, premise.formula()) {
                if !universe.masked_similarity_with(
                    formula,
                    pattern,
                    &declaration.mask,
                    &mut assignment,
                ) {
                    return Err(KernelError::validity(
                        name,
                        Some(i),
                        format!(
                            "`{}` does not agree with the preceding premises",
                            universe.display(formula)
                        ),
                    ));
                }
            }
        }

        let premises = Premises {
            rule: self.rule,
            theory: self.theory,
            premises,
            assignment,
        };
        if let Some(validate) = declaration.validate {
            validate(universe, &premises)?;
        }
        Ok(premises)
    }

    /// Checks the premises, builds the conclusion and appends it to the theory as an inferred
    /// statement. Nothing is appended if any step fails. If the conclusion is `Inc(T)`, `T` is
    /// marked inconsistent.
    pub fn infer(&self, universe: &mut Universe, arguments: &[Argument]) -> Result<StatementRef> {
        let premises = self.check_premises(universe, arguments)?;
        let declaration = universe.rule(self.rule)?;
        let name = declaration.name.clone();
        let construct = declaration.construct;
        let procedure = declaration.procedure.clone();

        let formula = construct(universe, &premises)?;
        if !universe.is_proposition(formula) {
            return Err(KernelError::NotAProposition {
                formula: universe.display(formula).to_string(),
            });
        }
        if let Some(procedure) = procedure {
            if !procedure(universe, formula) {
                return Err(KernelError::validity(
                    name,
                    None,
                    format!("`{}` was rejected by the decision procedure", universe.display(formula)),
                ));
            }
        }
        let target = universe.inconsistency_target(formula);
        if let Some(target) = target {
            let t = universe.theory(target)?;
            if t.consistency() == Consistency::ProvedConsistent {
                return Err(KernelError::InvalidTransition {
                    theory: t.symbol().to_owned(),
                    from: Consistency::ProvedConsistent,
                    to: Consistency::ProvedInconsistent,
                });
            }
        }

        let statement = universe.append_statement(
            self.theory,
            StatementKind::Inferred {
                formula,
                rule: self.rule,
                arguments: arguments.to_vec(),
            },
        );
        if let Some(target) = target {
            universe.mark_inconsistent(target, statement)?;
        }
        Ok(statement)
    }
}

fn describe(argument: Argument) -> &'static str {
    match argument {
        Argument::Statement(_) => "a statement",
        Argument::Formula(_) => "a formula",
        Argument::Theory(_) => "a theory",
    }
}

fn resolve(
    universe: &Universe,
    rule: &str,
    index: usize,
    kind: ParameterKind,
    argument: Argument,
) -> Result<Premise> {
    let unresolved = |e: KernelError| KernelError::syntax(rule, Some(index), e.to_string());
    match (kind, argument) {
        (ParameterKind::Formula, Argument::Formula(formula)) => {
            universe.formula(formula).map_err(unresolved)?;
            Ok(Premise::Formula(formula))
        }
        (ParameterKind::Theory, Argument::Theory(theory)) => {
            let object = universe.theory(theory).map_err(unresolved)?.object();
            Ok(Premise::Theory { theory, object })
        }
        (_, Argument::Statement(statement)) => {
            match (kind, universe.statement(statement).map_err(unresolved)?.kind()) {
                (ParameterKind::Proved, StatementKind::Inferred { formula, .. }) => {
                    Ok(Premise::Proved {
                        statement,
                        formula: *formula,
                    })
                }
                (ParameterKind::Hypothesis, StatementKind::Hypothesis { formula, child }) => {
                    Ok(Premise::Hypothesis {
                        statement,
                        formula: *formula,
                        child: *child,
                    })
                }
                (ParameterKind::AxiomInclusion, StatementKind::AxiomInclusion { axiom, .. }) => {
                    Ok(Premise::Axiom {
                        statement,
                        axiom: *axiom,
                    })
                }
                (
                    ParameterKind::DefinitionInclusion,
                    StatementKind::DefinitionInclusion { definition, .. },
                ) => Ok(Premise::Definition {
                    statement,
                    definition: *definition,
                }),
                _ => Err(KernelError::syntax(
                    rule,
                    Some(index),
                    format!(
                        "expected {}, statement {} is not one",
                        kind, statement.position
                    ),
                )),
            }
        }
        _ => Err(KernelError::syntax(
            rule,
            Some(index),
            format!("expected {}, found {}", kind, describe(argument)),
        )),
    }
}

fn check_unlocked(universe: &Universe, statement: StatementRef) -> Result<()> {
    let resource = match universe.statement(statement)?.kind() {
        StatementKind::AxiomInclusion {
            axiom,
            locked: true,
        } => format!("axiom `{}`", universe.axiom(*axiom)?.symbol()),
        StatementKind::DefinitionInclusion {
            definition,
            locked: true,
        } => format!("definition `{}`", universe.definition(*definition)?.symbol()),
        _ => return Ok(()),
    };
    Err(KernelError::LockedResource {
        resource: format!(
            "{} included at position {} of `{}`",
            resource,
            statement.position,
            universe.theory(statement.theory)?.symbol()
        ),
    })
}

impl Universe {
    /// Declares an inference rule. Its mask variables are locked.
    pub fn declare_rule(&mut self, declaration: Declaration) -> Result<RuleId> {
        self.formula(declaration.conclusion)?;
        for parameter in declaration.parameters.iter() {
            if let Some(pattern) = parameter.pattern {
                self.formula(pattern)?;
            }
        }
        for &variable in declaration.mask.iter() {
            self.variable(variable)?;
        }
        Ok(self.push_rule(declaration))
    }

    pub(crate) fn push_rule(&mut self, declaration: Declaration) -> RuleId {
        for variable in declaration.mask.iter() {
            self.variables[variable.index()].lock();
        }
        self.announce("rule", &declaration.name);
        let id = RuleId::new(self.id, self.rules.len());
        self.rules.push(declaration);
        id
    }

    pub fn rule(&self, id: RuleId) -> Result<&Declaration> {
        self.lookup(id.universe(), id.index(), &self.rules)
    }

    /// Makes `rule` usable in `theory`.
    pub fn include_rule(&mut self, theory: TheoryId, rule: RuleId) -> Result<Inclusion> {
        self.rule(rule)?;
        self.theory(theory)?;
        let rules = &mut self.theories[theory.index()].rules;
        if !rules.contains(&rule) {
            rules.push(rule);
        }
        Ok(Inclusion { theory, rule })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Builtin, KernelError};

    struct Fixture {
        u: Universe,
        theory: TheoryId,
        inclusion: Inclusion,
        p: FormulaId,
        q: FormulaId,
    }

    /// A theory with `p` and `p ∧ q` proved and a rule `P ∧ Q, P ⊢ Q`
    fn fixture() -> Fixture {
        let mut u = Universe::new();
        let pv = u.declare_variable("P", true);
        let qv = u.declare_variable("Q", true);
        let (pf, qf) = (u.variable_formula(pv).unwrap(), u.variable_formula(qv).unwrap());
        let pattern = u.make_builtin(Builtin::And, &[pf, qf]).unwrap();
        let rule = u
            .declare_rule(
                Declaration::new("strip", qf)
                    .mask([pv, qv])
                    .premise(pattern)
                    .premise(pf),
            )
            .unwrap();

        let p = u.declare_proposition("p");
        let q = u.declare_proposition("q");
        let theory = u.declare_theory("T");
        let inclusion = u.include_rule(theory, rule).unwrap();
        Fixture {
            u,
            theory,
            inclusion,
            p,
            q,
        }
    }

    fn assume(u: &mut Universe, theory: TheoryId, formula: FormulaId) -> StatementRef {
        let axiom = u.declare_axiom("A", "assumption");
        let inclusion = u.include_axiom(theory, axiom).unwrap();
        u.include_standard(theory, crate::StandardRule::AxiomInterpretation)
            .unwrap()
            .infer(u, &[inclusion.into(), formula.into()])
            .unwrap()
    }

    #[test]
    fn mask_variables_are_locked() {
        let f = fixture();
        let rule = f.u.rule(f.inclusion.rule()).unwrap();
        for &v in rule.mask_variables() {
            assert_eq!(
                f.u.variable(v).unwrap().state(),
                crate::VariableState::Locked
            );
        }
        assert_eq!(f.u.theory(f.theory).unwrap().rules(), &[f.inclusion.rule()]);
    }

    #[test]
    fn inference() {
        let mut f = fixture();
        let pq = f.u.make_builtin(Builtin::And, &[f.p, f.q]).unwrap();
        let a = assume(&mut f.u, f.theory, pq);
        let b = assume(&mut f.u, f.theory, f.p);
        let c = f.inclusion.infer(&mut f.u, &[a.into(), b.into()]).unwrap();
        let statement = f.u.statement(c).unwrap();
        assert_eq!(statement.proved(), Some(f.q));
        assert_eq!(statement.rule(), Some(f.inclusion.rule()));
        assert_eq!(f.u.premises(c).unwrap(), vec![a, b]);
        assert!(a.position < c.position && b.position < c.position);
    }

    #[test]
    fn argument_count_and_kind() {
        let mut f = fixture();
        let a = assume(&mut f.u, f.theory, f.p);
        let before = f.u.statements(f.theory).unwrap().len();
        let err = f.inclusion.infer(&mut f.u, &[a.into()]).unwrap_err();
        assert!(err.is_premise_syntax());
        let err = f
            .inclusion
            .infer(&mut f.u, &[f.theory.into(), a.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
        // an axiom inclusion is a statement but not a proved one
        let axiom = f.u.declare_axiom("B", "b");
        let inclusion = f.u.include_axiom(f.theory, axiom).unwrap();
        let err = f
            .inclusion
            .infer(&mut f.u, &[inclusion.into(), a.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
        assert_eq!(f.u.statements(f.theory).unwrap().len(), before + 1);
    }

    #[test]
    fn shape_mismatch_is_syntax() {
        let mut f = fixture();
        let a = assume(&mut f.u, f.theory, f.p);
        let err = f.inclusion.infer(&mut f.u, &[a.into(), a.into()]).unwrap_err();
        assert!(err.is_premise_syntax());
    }

    #[test]
    fn non_propositional_binding_is_syntax() {
        let mut f = fixture();
        let x = f.u.declare_object("x");
        // `x ∧ q` is well formed but binds `P` to an object
        let xq = f.u.make_builtin(Builtin::And, &[x, f.q]).unwrap();
        let s = f.u.declare_theory("S");
        let source = f.u.include_rule(s, f.inclusion.rule()).unwrap();
        let axiom = f.u.declare_axiom("odd", "odd");
        let inclusion = f.u.include_axiom(s, axiom).unwrap();
        // interpretation requires a proposition, and `x ∧ q` is one
        let xq_statement = f
            .u
            .include_standard(s, crate::StandardRule::AxiomInterpretation)
            .unwrap()
            .infer(&mut f.u, &[inclusion.into(), xq.into()])
            .unwrap();
        let err = source
            .infer(&mut f.u, &[xq_statement.into(), xq_statement.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
    }

    #[test]
    fn disagreeing_premises_are_invalid() {
        let mut f = fixture();
        let pq = f.u.make_builtin(Builtin::And, &[f.p, f.q]).unwrap();
        let a = assume(&mut f.u, f.theory, pq);
        let b = assume(&mut f.u, f.theory, f.q);
        let err = f.inclusion.infer(&mut f.u, &[a.into(), b.into()]).unwrap_err();
        assert!(err.is_premise_validity());
    }

    #[test]
    fn invisible_premises_are_invalid() {
        let mut f = fixture();
        let other = f.u.declare_theory("U");
        let pq = f.u.make_builtin(Builtin::And, &[f.p, f.q]).unwrap();
        let a = assume(&mut f.u, other, pq);
        let b = assume(&mut f.u, f.theory, f.p);
        let err = f.inclusion.infer(&mut f.u, &[a.into(), b.into()]).unwrap_err();
        assert!(err.is_premise_validity());
    }

    #[test]
    fn locked_inclusions() {
        let mut u = Universe::new();
        let t = u.declare_theory("T");
        let p = u.declare_proposition("p");
        let axiom = u.declare_axiom("A", "p holds");
        let inclusion = u.include_axiom(t, axiom).unwrap();
        let interpretation = u
            .include_standard(t, crate::StandardRule::AxiomInterpretation)
            .unwrap();
        interpretation
            .infer(&mut u, &[inclusion.into(), p.into()])
            .unwrap();
        u.lock_inclusion(inclusion).unwrap();
        assert!(matches!(
            interpretation.infer(&mut u, &[inclusion.into(), p.into()]),
            Err(KernelError::LockedResource { .. })
        ));
    }

    #[test]
    fn decision_procedures_gate_conclusions() {
        let mut u = Universe::new();
        let pv = u.declare_variable("P", true);
        let pf = u.variable_formula(pv).unwrap();
        let p = u.declare_proposition("p");
        let q = u.declare_proposition("q");
        let only_p: Procedure = std::sync::Arc::new(move |_: &Universe, f: FormulaId| f == p);
        let rule = u
            .declare_rule(
                Declaration::new("echo", pf)
                    .mask([pv])
                    .formula(pf)
                    .procedure(only_p),
            )
            .unwrap();
        let t = u.declare_theory("T");
        let echo = u.include_rule(t, rule).unwrap();
        assert!(echo.infer(&mut u, &[p.into()]).is_ok());
        assert!(echo
            .infer(&mut u, &[q.into()])
            .unwrap_err()
            .is_premise_validity());
        assert_eq!(u.statements(t).unwrap().len(), 1);
    }

    #[test]
    fn foreign_arguments_are_syntax_errors() {
        let mut f = fixture();
        let mut other = Universe::new();
        let foreign = other.declare_proposition("p");
        let a = assume(&mut f.u, f.theory, f.p);
        let err = f
            .inclusion
            .infer(&mut f.u, &[foreign.into(), a.into()])
            .unwrap_err();
        assert!(err.is_premise_syntax());
    }
}
