use thiserror::Error;

use crate::{
    connective::{Arity, Notation},
    theory::Consistency,
};

/// Result type used throughout the kernel
pub type Result<T, E = KernelError> = std::result::Result<T, E>;

/// How a compound formula or a connective declaration violates an arity constraint
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArityMismatchKind {
    #[error("expected {arity} terms, found {found}")]
    Terms { arity: Arity, found: usize },
    #[error("{notation} notation cannot be used with arity {arity}")]
    Notation { notation: Notation, arity: Arity },
}

/// An error which is produced when an operation of the kernel is rejected.
///
/// [`PremiseSyntax`](KernelError::PremiseSyntax) means the arguments of a rule have the wrong
/// shape. [`PremiseValidity`](KernelError::PremiseValidity) means they are well formed but do not
/// establish what the rule requires.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KernelError {
    #[error("arity mismatch for connective `{connective}`: {kind}")]
    ArityMismatch {
        connective: String,
        #[source]
        kind: ArityMismatchKind,
    },

    #[error("premise syntax error in rule `{rule}`: {reason}")]
    PremiseSyntax {
        rule: String,
        parameter: Option<usize>,
        reason: String,
    },

    #[error("premise validity error in rule `{rule}`: {reason}")]
    PremiseValidity {
        rule: String,
        parameter: Option<usize>,
        reason: String,
    },

    #[error("theory `{theory}` cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        theory: String,
        from: Consistency,
        to: Consistency,
    },

    #[error("{resource} is locked")]
    LockedResource { resource: String },

    /// A handle was issued by another universe
    #[error("handle does not belong to this universe")]
    ForeignHandle,

    #[error("theory `{theory}` has no statement at position {position}")]
    UnknownStatement { theory: String, position: usize },

    #[error("statement {position} of theory `{theory}` is not an axiom or definition inclusion")]
    NotAnInclusion { theory: String, position: usize },

    #[error("limit {limit} is out of range for theory `{theory}` with {length} statements")]
    InvalidLimit {
        theory: String,
        limit: usize,
        length: usize,
    },

    #[error("theory `{theory}` is stabilized")]
    Stabilized { theory: String },

    #[error("formula `{formula}` is not a proposition")]
    NotAProposition { formula: String },

    #[error("formula `{formula}` is not a variable")]
    NotAVariable { formula: String },

    #[error("formula exceeds the maximum depth of {max_depth}")]
    DepthExceeded { max_depth: usize },
}

impl KernelError {
    pub fn syntax(rule: impl Into<String>, parameter: Option<usize>, reason: impl Into<String>) -> Self {
        KernelError::PremiseSyntax {
            rule: rule.into(),
            parameter,
            reason: reason.into(),
        }
    }

    pub fn validity(
        rule: impl Into<String>,
        parameter: Option<usize>,
        reason: impl Into<String>,
    ) -> Self {
        KernelError::PremiseValidity {
            rule: rule.into(),
            parameter,
            reason: reason.into(),
        }
    }

    pub fn is_premise_syntax(&self) -> bool {
        matches!(self, KernelError::PremiseSyntax { .. })
    }

    pub fn is_premise_validity(&self) -> bool {
        matches!(self, KernelError::PremiseValidity { .. })
    }
}
