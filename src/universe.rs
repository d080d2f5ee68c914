use std::collections::HashMap;

use tracing::{debug, info};

use crate::{
    config::Config,
    connective::{Builtin, Connective},
    error::{KernelError, Result},
    formula::{Constant, Formula, Node, Object, Variable},
    rule::Declaration,
    theory::{Axiom, Definition, Theory},
    types::*,
};

/// The universe of discourse: owns every connective, object, variable, formula, axiom,
/// definition, inference rule and theory of one formal system.
///
/// All handles returned by a universe are tagged with its [`UniverseId`] and are rejected with
/// [`KernelError::ForeignHandle`] by any other universe. Mutation requires `&mut Universe`, so a
/// universe shared between threads has to be wrapped in a lock by the caller.
///
/// ```
/// use axiomata::{Builtin, Universe};
///
/// let mut u = Universe::new();
/// let p = u.declare_proposition("p");
/// let q = u.declare_proposition("q");
/// let a = u.make_compound(u.builtin(Builtin::Implies), &[p, q]).unwrap();
/// let b = u.make_compound(u.builtin(Builtin::Implies), &[p, q]).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(u.display(a).to_string(), "(p ⟹ q)");
/// ```
pub struct Universe {
    pub(crate) id: UniverseId,
    pub(crate) config: Config,
    pub(crate) connectives: Vec<Connective>,
    pub(crate) connective_symbols: HashMap<String, ConnectiveId>,
    pub(crate) nodes: Vec<Node>,
    pub(crate) interner: HashMap<Formula, FormulaId>,
    pub(crate) objects: Vec<Object>,
    pub(crate) variables: Vec<Variable>,
    pub(crate) constants: Vec<Constant>,
    pub(crate) atoms: HashMap<String, FormulaId>,
    pub(crate) axioms: Vec<Axiom>,
    pub(crate) definitions: Vec<Definition>,
    pub(crate) rules: Vec<Declaration>,
    pub(crate) theories: Vec<Theory>,
    pub(crate) sequence: u64,
}

impl Universe {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let mut universe = Universe {
            id: UniverseId::fresh(),
            config,
            connectives: Vec::new(),
            connective_symbols: HashMap::new(),
            nodes: Vec::new(),
            interner: HashMap::new(),
            objects: Vec::new(),
            variables: Vec::new(),
            constants: Vec::new(),
            atoms: HashMap::new(),
            axioms: Vec::new(),
            definitions: Vec::new(),
            rules: Vec::new(),
            theories: Vec::new(),
            sequence: 0,
        };
        for builtin in Builtin::ALL {
            universe.push_connective(Connective::builtin(builtin));
        }
        universe.declare_standard_rules();
        universe
    }

    pub fn id(&self) -> UniverseId {
        self.id
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Finds the most recently declared object, variable or constant with the given symbol.
    /// Theory objects, the pattern variables of the standard rules and variables made up by
    /// substitution are not found.
    pub fn lookup_symbol(&self, symbol: &str) -> Option<FormulaId> {
        self.atoms.get(symbol).copied()
    }

    pub(crate) fn lookup<'a, T>(
        &self,
        universe: UniverseId,
        index: usize,
        arena: &'a [T],
    ) -> Result<&'a T> {
        if universe != self.id {
            return Err(KernelError::ForeignHandle);
        }
        arena.get(index).ok_or(KernelError::ForeignHandle)
    }

    pub(crate) fn next_sequence(&mut self) -> u64 {
        self.sequence += 1;
        self.sequence
    }

    pub(crate) fn announce(&self, kind: &str, symbol: &str) {
        if self.config.echo_declarations {
            info!(kind, symbol, "declared");
        } else {
            debug!(kind, symbol, "declared");
        }
    }

    pub(crate) fn list_atom(&mut self, symbol: &str, formula: FormulaId) {
        self.atoms.insert(symbol.to_owned(), formula);
    }
}

impl Default for Universe {
    fn default() -> Self {
        Self::new()
    }
}
