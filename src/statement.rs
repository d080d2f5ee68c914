use crate::types::*;

/// An entry of a theory
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
    pub(crate) position: usize,
    pub(crate) sequence: u64,
    pub(crate) kind: StatementKind,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatementKind {
    /// Makes an axiom available to the theory. The axiom is turned into a formula by
    /// [`StandardRule::AxiomInterpretation`](crate::StandardRule::AxiomInterpretation).
    AxiomInclusion { axiom: AxiomId, locked: bool },
    DefinitionInclusion { definition: DefinitionId, locked: bool },
    /// A formula derived by applying `rule` to `arguments`
    Inferred {
        formula: FormulaId,
        rule: RuleId,
        arguments: Vec<Argument>,
    },
    /// Assumes `formula` in the child theory `child`
    Hypothesis { formula: FormulaId, child: TheoryId },
    Note { text: String },
    Section { title: String, level: usize },
}

/// An argument passed to an inference rule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Argument {
    Statement(StatementRef),
    Formula(FormulaId),
    Theory(TheoryId),
}

impl From<StatementRef> for Argument {
    fn from(statement: StatementRef) -> Self {
        Argument::Statement(statement)
    }
}

impl From<FormulaId> for Argument {
    fn from(formula: FormulaId) -> Self {
        Argument::Formula(formula)
    }
}

impl From<TheoryId> for Argument {
    fn from(theory: TheoryId) -> Self {
        Argument::Theory(theory)
    }
}

impl Statement {
    pub fn position(&self) -> usize {
        self.position
    }

    /// Creation order across all theories of a universe
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn kind(&self) -> &StatementKind {
        &self.kind
    }

    /// The formula this statement asserts to be proved in its theory
    pub fn proved(&self) -> Option<FormulaId> {
        match self.kind {
            StatementKind::Inferred { formula, .. } => Some(formula),
            _ => None,
        }
    }

    /// The formula this statement mentions, proved or hypothetical
    pub fn formula(&self) -> Option<FormulaId> {
        match self.kind {
            StatementKind::Inferred { formula, .. } | StatementKind::Hypothesis { formula, .. } => {
                Some(formula)
            }
            _ => None,
        }
    }

    /// The statements this statement was derived from
    pub fn premises(&self) -> impl Iterator<Item = StatementRef> + '_ {
        let arguments: &[Argument] = match &self.kind {
            StatementKind::Inferred { arguments, .. } => arguments,
            _ => &[],
        };
        arguments.iter().filter_map(|argument| match argument {
            Argument::Statement(s) => Some(*s),
            _ => None,
        })
    }

    pub fn rule(&self) -> Option<RuleId> {
        match self.kind {
            StatementKind::Inferred { rule, .. } => Some(rule),
            _ => None,
        }
    }
}
