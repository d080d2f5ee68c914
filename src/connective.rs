use std::{fmt, sync::Arc};

use crate::{
    error::{ArityMismatchKind, KernelError, Result},
    types::*,
    Universe,
};

/// An external decision procedure. It is handed a formula and answers whether the formula holds.
pub type Procedure = Arc<dyn Fn(&Universe, FormulaId) -> bool + Send + Sync>;

/// The number of terms a connective accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Arity {
    Exact(usize),
    Range { min: usize, max: Option<usize> },
    Unbounded,
}

impl Arity {
    /// Tests whether a compound with `n` terms satisfies this arity.
    ///
    /// # Example
    /// ```
    /// use axiomata::Arity;
    ///
    /// assert!(Arity::Exact(2).accepts(2));
    /// assert!(!Arity::Exact(2).accepts(3));
    /// assert!(Arity::Range { min: 1, max: None }.accepts(7));
    /// assert!(!Arity::Range { min: 1, max: Some(2) }.accepts(0));
    /// assert!(Arity::Unbounded.accepts(0));
    /// ```
    pub fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(arity) => n == arity,
            Arity::Range { min, max } => n >= min && max.map_or(true, |max| n <= max),
            Arity::Unbounded => true,
        }
    }

    /// The only term count this arity accepts, if there is exactly one
    pub fn fixed(self) -> Option<usize> {
        match self {
            Arity::Exact(n) => Some(n),
            Arity::Range { min, max: Some(max) } if min == max => Some(min),
            _ => None,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Range { min, max: Some(max) } => write!(f, "{}..={}", min, max),
            Arity::Range { min, max: None } => write!(f, "{}..", min),
            Arity::Unbounded => f.write_str("any"),
        }
    }
}

/// How compounds of a connective are written
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Notation {
    /// `s(a, b)`
    FunctionCall,
    /// `(a s b)`
    Infix,
    /// `s(a)`
    Prefix,
    /// `(a)s`
    Postfix,
    /// `{a, b}` with the given delimiters
    Collection { open: char, close: char },
}

impl Notation {
    /// The term count this notation can render, if it can only render one
    pub fn required_arity(self) -> Option<usize> {
        match self {
            Notation::Infix => Some(2),
            Notation::Prefix | Notation::Postfix => Some(1),
            Notation::FunctionCall | Notation::Collection { .. } => None,
        }
    }
}

impl fmt::Display for Notation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notation::FunctionCall => f.write_str("function-call"),
            Notation::Infix => f.write_str("infix"),
            Notation::Prefix => f.write_str("prefix"),
            Notation::Postfix => f.write_str("postfix"),
            Notation::Collection { open, close } => write!(f, "collection {}{}", open, close),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "use-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConnectiveFlags {
    /// Compounds of this connective are propositions
    pub proposition: bool,
    /// Compounds of this connective denote morphisms, see [`Universe::is_morphism`]
    pub morphism: bool,
    /// Terms are references to formulas, their variables are never renamed
    pub quotation: bool,
}

impl ConnectiveFlags {
    pub const NONE: ConnectiveFlags = ConnectiveFlags {
        proposition: false,
        morphism: false,
        quotation: false,
    };
    pub const PROPOSITION: ConnectiveFlags = ConnectiveFlags {
        proposition: true,
        morphism: false,
        quotation: false,
    };
    pub const MORPHISM: ConnectiveFlags = ConnectiveFlags {
        proposition: false,
        morphism: true,
        quotation: false,
    };
    pub const QUOTATION: ConnectiveFlags = ConnectiveFlags {
        proposition: false,
        morphism: false,
        quotation: true,
    };
}

#[derive(Clone)]
pub struct Connective {
    symbol: String,
    arity: Arity,
    notation: Notation,
    flags: ConnectiveFlags,
    procedure: Option<Procedure>,
}

impl Connective {
    pub(crate) fn new(
        symbol: String,
        arity: Arity,
        notation: Notation,
        flags: ConnectiveFlags,
        procedure: Option<Procedure>,
    ) -> Result<Self> {
        if let Some(required) = notation.required_arity() {
            if arity.fixed() != Some(required) {
                return Err(KernelError::ArityMismatch {
                    connective: symbol,
                    kind: ArityMismatchKind::Notation { notation, arity },
                });
            }
        }
        Ok(Connective {
            symbol,
            arity,
            notation,
            flags,
            procedure,
        })
    }

    pub(crate) fn builtin(builtin: Builtin) -> Self {
        let (symbol, arity, notation, flags) = builtin.declaration();
        Connective {
            symbol: symbol.to_owned(),
            arity,
            notation,
            flags,
            procedure: None,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn arity(&self) -> Arity {
        self.arity
    }

    pub fn notation(&self) -> Notation {
        self.notation
    }

    pub fn flags(&self) -> ConnectiveFlags {
        self.flags
    }

    pub fn procedure(&self) -> Option<&Procedure> {
        self.procedure.as_ref()
    }

    /// Compares everything but the decision procedure. Used to relate connectives of different
    /// universes.
    pub fn same_signature(&self, other: &Connective) -> bool {
        self.symbol == other.symbol
            && self.arity == other.arity
            && self.notation == other.notation
            && self.flags == other.flags
    }
}

impl fmt::Debug for Connective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Connective")
            .field("symbol", &self.symbol)
            .field("arity", &self.arity)
            .field("notation", &self.notation)
            .field("flags", &self.flags)
            .field("decided", &self.procedure.is_some())
            .finish()
    }
}

/// Connectives every universe declares before anything else, in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Builtin {
    Implies,
    And,
    Or,
    Not,
    Iff,
    Equal,
    Unequal,
    /// `Inc(T)`: theory `T` is inconsistent
    Inconsistent,
    Tuple,
    Quote,
}

impl Builtin {
    pub const ALL: [Builtin; 10] = [
        Builtin::Implies,
        Builtin::And,
        Builtin::Or,
        Builtin::Not,
        Builtin::Iff,
        Builtin::Equal,
        Builtin::Unequal,
        Builtin::Inconsistent,
        Builtin::Tuple,
        Builtin::Quote,
    ];

    pub fn symbol(self) -> &'static str {
        self.declaration().0
    }

    pub(crate) fn declaration(self) -> (&'static str, Arity, Notation, ConnectiveFlags) {
        use Builtin::*;
        match self {
            Implies => ("⟹", Arity::Exact(2), Notation::Infix, ConnectiveFlags::PROPOSITION),
            And => ("∧", Arity::Exact(2), Notation::Infix, ConnectiveFlags::PROPOSITION),
            Or => ("∨", Arity::Exact(2), Notation::Infix, ConnectiveFlags::PROPOSITION),
            Not => ("¬", Arity::Exact(1), Notation::Prefix, ConnectiveFlags::PROPOSITION),
            Iff => ("⟺", Arity::Exact(2), Notation::Infix, ConnectiveFlags::PROPOSITION),
            Equal => ("=", Arity::Exact(2), Notation::Infix, ConnectiveFlags::PROPOSITION),
            Unequal => ("≠", Arity::Exact(2), Notation::Infix, ConnectiveFlags::PROPOSITION),
            Inconsistent => (
                "Inc",
                Arity::Exact(1),
                Notation::FunctionCall,
                ConnectiveFlags::PROPOSITION,
            ),
            Tuple => (
                "tuple",
                Arity::Unbounded,
                Notation::Collection {
                    open: '⟨',
                    close: '⟩',
                },
                ConnectiveFlags::NONE,
            ),
            Quote => (
                "quote",
                Arity::Exact(1),
                Notation::FunctionCall,
                ConnectiveFlags::QUOTATION,
            ),
        }
    }
}

impl Universe {
    /// Declares a new connective.
    ///
    /// # Errors
    /// * ArityMismatch - if `notation` can only render a fixed number of terms and `arity` does not
    /// guarantee exactly that number
    ///
    /// # Example
    /// ```
    /// use axiomata::{Arity, ConnectiveFlags, KernelError, Notation, Universe};
    ///
    /// let mut u = Universe::new();
    /// let plus = u
    ///     .declare_connective("+", Arity::Exact(2), Notation::Infix, ConnectiveFlags::NONE)
    ///     .unwrap();
    /// assert_eq!(u.connective(plus).unwrap().symbol(), "+");
    ///
    /// let bad = u.declare_connective(
    ///     "++",
    ///     Arity::Range { min: 2, max: None },
    ///     Notation::Infix,
    ///     ConnectiveFlags::NONE,
    /// );
    /// assert!(matches!(bad, Err(KernelError::ArityMismatch { .. })));
    /// ```
    pub fn declare_connective(
        &mut self,
        symbol: &str,
        arity: Arity,
        notation: Notation,
        flags: ConnectiveFlags,
    ) -> Result<ConnectiveId> {
        let connective = Connective::new(symbol.to_owned(), arity, notation, flags, None)?;
        Ok(self.push_connective(connective))
    }

    /// Declares a connective bound to a decision procedure, see
    /// [`StandardRule::ProceduralInterpretation`](crate::StandardRule::ProceduralInterpretation).
    pub fn declare_decided_connective(
        &mut self,
        symbol: &str,
        arity: Arity,
        notation: Notation,
        flags: ConnectiveFlags,
        procedure: Procedure,
    ) -> Result<ConnectiveId> {
        let connective =
            Connective::new(symbol.to_owned(), arity, notation, flags, Some(procedure))?;
        Ok(self.push_connective(connective))
    }

    pub(crate) fn push_connective(&mut self, connective: Connective) -> ConnectiveId {
        let id = ConnectiveId::new(self.id, self.connectives.len());
        self.announce("connective", connective.symbol());
        self.connective_symbols
            .insert(connective.symbol().to_owned(), id);
        self.connectives.push(connective);
        id
    }

    pub fn connective(&self, id: ConnectiveId) -> Result<&Connective> {
        self.lookup(id.universe(), id.index(), &self.connectives)
    }

    /// Returns the handle of a built-in connective.
    pub fn builtin(&self, builtin: Builtin) -> ConnectiveId {
        ConnectiveId::new(self.id, builtin as usize)
    }

    /// Finds the most recently declared connective with the given symbol.
    pub fn lookup_connective(&self, symbol: &str) -> Option<ConnectiveId> {
        self.connective_symbols.get(symbol).copied()
    }
}
