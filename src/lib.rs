//! `axiomata` is a kernel for building formal theories and checking derivations in them. Every
//! derived statement is justified by an inference rule applied to premises that are visible in
//! its theory, so a theory only ever contains what its axioms, definitions and rules allow.
//!
//! # Main data structures
//! Everything lives in a [`Universe`], which owns the connectives, formulas, variables, rules
//! and theories. All of them are referred to by small `Copy` handles like [`FormulaId`] or
//! [`TheoryId`] which only resolve in the universe that issued them.
//!
//! ## Formulas
//! A formula is either an atom (an object, a variable or a constant) or a compound of a
//! [`Connective`] applied to other formulas. Formulas are hash-consed: building the same formula
//! twice returns the same handle, so syntactic equality is handle equality. Connectives carry a
//! [`Notation`] used for display and an [`Arity`] checked on construction.
//!
//! Variables start out open and collect the formulas built from them. Once a variable appears in
//! a statement or a rule it is locked, and [`Universe::substitute`] renames open variables it
//! does not replace, so substitution never captures variables.
//!
//! ## Theories
//! A [`Theory`] is an append-only list of [`Statement`]s: axiom and definition inclusions,
//! inferred formulas, hypotheses, notes and section titles. A theory can extend another theory,
//! seeing its statements up to some position. A theory whose inconsistency is derived, that is
//! a statement `Inc(T)`, is marked [`Consistency::ProvedInconsistent`].
//!
//! ## Rules
//! An inference rule is a [`Declaration`] with parameters and a conclusion pattern built from
//! mask variables. An [`Inclusion`] of a rule in a theory checks arguments against the parameters
//! and, if they fit, appends the instantiated conclusion. A set of propositional and equational
//! rules is declared in every universe, see [`StandardRule`].
//!
//! ```
//! use axiomata::{Builtin, StandardRule, Universe};
//!
//! let mut u = Universe::new();
//! let t = u.declare_theory("T");
//! let p = u.declare_proposition("p");
//! let q = u.declare_proposition("q");
//! let p_implies_q = u.make_builtin(Builtin::Implies, &[p, q]).unwrap();
//!
//! let axiom = u.declare_axiom("A", "if p then q, and p");
//! let inclusion = u.include_axiom(t, axiom).unwrap();
//! let interpretation = u.include_standard(t, StandardRule::AxiomInterpretation).unwrap();
//! let a = interpretation.infer(&mut u, &[inclusion.into(), p_implies_q.into()]).unwrap();
//! let b = interpretation.infer(&mut u, &[inclusion.into(), p.into()]).unwrap();
//!
//! let modus_ponens = u.include_standard(t, StandardRule::ModusPonens).unwrap();
//! let c = modus_ponens.infer(&mut u, &[a.into(), b.into()]).unwrap();
//! assert_eq!(u.statement(c).unwrap().proved(), Some(q));
//! ```

#[cfg(feature = "serialization")]
extern crate nom;
#[cfg(test)]
#[macro_use]
extern crate quickcheck;

pub mod config;
mod connective;
mod equivalence;
pub mod error;
mod formula;
mod hypothesis;
mod rule;
mod rules;
#[cfg(feature = "serialization")]
pub mod serialization;
mod statement;
mod substitution;
mod theory;
mod types;
mod universe;

pub use config::Config;
pub use connective::{Arity, Builtin, Connective, ConnectiveFlags, Notation, Procedure};
pub use equivalence::Assignment;
pub use error::{ArityMismatchKind, KernelError, Result};
pub use formula::{Atom, Formula, FormulaDisplay, Variable, VariableState};
pub use hypothesis::PosedHypothesis;
pub use rule::{
    instantiate, Construct, Declaration, Inclusion, Parameter, ParameterKind, Premise, Premises,
    Scope, Validate,
};
pub use rules::StandardRule;
pub use statement::{Argument, Statement, StatementKind};
pub use substitution::{ChainSubstitution, MapSubstitution, SingleSubstitution, Substitution};
pub use theory::{Axiom, ChainLink, Consistency, Definition, Theory, TheoryChain};
pub use types::*;
pub use universe::Universe;
