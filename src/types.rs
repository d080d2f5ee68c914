use std::sync::atomic::{AtomicU32, Ordering};

/// Identifies one [`Universe`](crate::Universe). Every handle carries the id of the universe that
/// issued it, so handles can never be confused between two universes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UniverseId(u32);

impl UniverseId {
    pub(crate) fn fresh() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        UniverseId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

macro_rules! handle {
    ($($(#[$meta:meta])* $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
            pub struct $name {
                universe: UniverseId,
                index: u32,
            }

            impl $name {
                pub(crate) fn new(universe: UniverseId, index: usize) -> Self {
                    $name {
                        universe,
                        index: index as u32,
                    }
                }

                /// The universe this handle belongs to.
                pub fn universe(self) -> UniverseId {
                    self.universe
                }

                /// Position of the referenced entry in declaration order.
                pub fn index(self) -> usize {
                    self.index as usize
                }
            }
        )*
    };
}

handle! {
    /// Handle of a declared connective.
    ConnectiveId;
    /// Handle of a canonical (interned) formula.
    FormulaId;
    /// Handle of a simple object.
    ObjectId;
    /// Handle of a free variable.
    VariableId;
    /// Handle of a named constant.
    ConstantId;
    /// Handle of a natural-language axiom.
    AxiomId;
    /// Handle of a natural-language definition.
    DefinitionId;
    /// Handle of a declared inference rule.
    RuleId;
    /// Handle of a theory (derivation).
    TheoryId;
}

/// Addresses one statement: the owning theory and the statement's position in it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StatementRef {
    pub theory: TheoryId,
    pub position: usize,
}

impl StatementRef {
    pub fn new(theory: TheoryId, position: usize) -> Self {
        StatementRef { theory, position }
    }
}
