use std::cell::Cell;

use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, multispace0, multispace1},
    combinator::{all_consuming, opt},
    error::{context, ErrorKind, ParseError},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};

use crate::{connective::Notation, error::KernelError, types::*, Universe};

use super::error::{or_fail, Error, GreedyError};

type PResult<'a, O> = IResult<&'a str, O, GreedyError<&'a str>>;

/// A formula as written, before its symbols are looked up
#[derive(Clone, Debug, PartialEq, Eq)]
enum Tree<'a> {
    Symbol(&'a str),
    /// Function call, prefix, infix and postfix applications
    Compound(&'a str, Vec<Tree<'a>>),
    Collection(ConnectiveId, Vec<Tree<'a>>),
}

/// Reads formulas in the notation produced by [`Universe::display`].
///
/// Any connective may also be written as a function call, so `(p ⟹ q)` and `⟹(p, q)` are the
/// same formula.
///
/// Nesting deeper than [`Config::max_depth`](crate::Config) stops the descent, so the input is
/// never nested further than the formula built from it could be.
struct FormulaParser {
    collections: Vec<(char, char, ConnectiveId)>,
    max_depth: usize,
    too_deep: Cell<bool>,
}

impl FormulaParser {
    fn new(universe: &Universe) -> Self {
        let collections = universe
            .connectives
            .iter()
            .enumerate()
            .filter_map(|(index, connective)| match connective.notation() {
                Notation::Collection { open, close } => {
                    Some((open, close, ConnectiveId::new(universe.id(), index)))
                }
                _ => None,
            })
            .collect();
        FormulaParser {
            collections,
            max_depth: universe.config().max_depth,
            too_deep: Cell::new(false),
        }
    }

    fn reserved(&self, c: char) -> bool {
        c.is_whitespace()
            || "(),".contains(c)
            || self
                .collections
                .iter()
                .any(|&(open, close, _)| c == open || c == close)
    }

    fn parse<'a>(&self, input: &'a str) -> Result<Tree<'a>, Error> {
        let parsed = all_consuming(delimited(
            multispace0,
            |i| self.formula(i, 0),
            multispace0,
        ))(input);
        match parsed {
            Ok((_, tree)) => Ok(tree),
            Err(_) if self.too_deep.get() => Err(KernelError::DepthExceeded {
                max_depth: self.max_depth,
            }
            .into()),
            Err(e) => Err(e.into()),
        }
    }

    /// A formula nested inside `depth` compounds
    fn formula<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Tree<'a>> {
        if depth > self.max_depth {
            self.too_deep.set(true);
            return Err(nom::Err::Failure(GreedyError::from_error_kind(
                input,
                ErrorKind::TooLarge,
            )));
        }
        alt((
            context("collection", |i| self.collection(i, depth)),
            context("group", |i| self.group(i, depth)),
            context("symbol", |i| self.call_or_symbol(i, depth)),
        ))(input)
    }

    fn token<'a>(&self, input: &'a str) -> PResult<'a, &'a str> {
        take_while1(|c: char| !self.reserved(c))(input)
    }

    /// Terms of a compound nested inside `depth` compounds
    fn terms<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Vec<Tree<'a>>> {
        delimited(
            multispace0,
            separated_list0(tuple((multispace0, char(','), multispace0)), |i| {
                self.formula(i, depth + 1)
            }),
            multispace0,
        )(input)
    }

    fn call_or_symbol<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Tree<'a>> {
        let (input, symbol) = self.token(input)?;
        let (input, terms) =
            opt(delimited(char('('), |i| self.terms(i, depth), char(')')))(input)?;
        Ok((
            input,
            match terms {
                Some(terms) => Tree::Compound(symbol, terms),
                None => Tree::Symbol(symbol),
            },
        ))
    }

    /// `(a)s` or `(a s b)`
    fn group<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Tree<'a>> {
        let (input, first) =
            preceded(tuple((char('('), multispace0)), |i| self.formula(i, depth + 1))(input)?;
        let (rest, postfix) =
            opt(preceded(tuple((multispace0, char(')'))), |i| self.token(i)))(input)?;
        if let Some(symbol) = postfix {
            return Ok((rest, Tree::Compound(symbol, vec![first])));
        }
        let (input, (_, symbol, _, second, _, _)) = tuple((
            multispace1,
            |i| self.token(i),
            multispace1,
            |i| self.formula(i, depth + 1),
            multispace0,
            char(')'),
        ))(input)?;
        Ok((input, Tree::Compound(symbol, vec![first, second])))
    }

    fn collection<'a>(&self, input: &'a str, depth: usize) -> PResult<'a, Tree<'a>> {
        for &(open, close, connective) in self.collections.iter() {
            if let Some(rest) = input.strip_prefix(open) {
                let (rest, terms) =
                    or_fail(terminated(|i| self.terms(i, depth), char(close)))(rest)?;
                return Ok((rest, Tree::Collection(connective, terms)));
            }
        }
        Err(nom::Err::Error(GreedyError::from_error_kind(
            input,
            ErrorKind::Char,
        )))
    }

    fn resolve(&self, universe: &mut Universe, tree: &Tree) -> Result<FormulaId, Error> {
        let (connective, terms) = match tree {
            Tree::Symbol(symbol) => {
                return universe
                    .lookup_symbol(symbol)
                    .or_else(|| {
                        let theory = universe.lookup_theory(symbol)?;
                        Some(universe.theory(theory).ok()?.object())
                    })
                    .ok_or_else(|| Error::UnknownSymbol(symbol.to_string()))
            }
            Tree::Compound(symbol, terms) => (
                universe
                    .lookup_connective(symbol)
                    .ok_or_else(|| Error::UnknownSymbol(symbol.to_string()))?,
                terms,
            ),
            Tree::Collection(connective, terms) => (*connective, terms),
        };
        let terms = terms
            .iter()
            .map(|term| self.resolve(universe, term))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(universe.make_compound(connective, &terms)?)
    }
}

/// Parses `input` and builds the formula it denotes in `universe`. Atoms are looked up with
/// [`Universe::lookup_symbol`], falling back to the objects of theories found with
/// [`Universe::lookup_theory`]. Connectives are looked up with [`Universe::lookup_connective`].
///
/// # Example
/// ```
/// use axiomata::serialization::parse_formula;
/// use axiomata::{Builtin, Universe};
///
/// let mut u = Universe::new();
/// let p = u.declare_proposition("p");
/// let q = u.declare_proposition("q");
/// let np = u.make_builtin(Builtin::Not, &[p]).unwrap();
/// let f = u.make_builtin(Builtin::Implies, &[np, q]).unwrap();
/// assert_eq!(parse_formula(&mut u, "(¬(p) ⟹ q)").unwrap(), f);
/// ```
pub fn parse_formula(universe: &mut Universe, input: &str) -> Result<FormulaId, Error> {
    let parser = FormulaParser::new(universe);
    let tree = parser.parse(input)?;
    parser.resolve(universe, &tree)
}
