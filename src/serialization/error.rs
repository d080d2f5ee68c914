use std::fmt::{self, Display};

use nom::{
    error::{ContextError, ErrorKind, ParseError},
    IResult, Parser,
};
use thiserror::Error;

use crate::KernelError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),
    #[error(transparent)]
    Kernel(#[from] KernelError),
    #[error("formatting failed")]
    Fmt(#[from] fmt::Error),
}

impl<'a> From<nom::Err<GreedyError<&'a str>>> for Error {
    fn from(error: nom::Err<GreedyError<&'a str>>) -> Self {
        match error {
            nom::Err::Incomplete(_) => Error::Parse("incomplete input".to_owned()),
            nom::Err::Error(e) | nom::Err::Failure(e) => Error::Parse(e.to_string()),
        }
    }
}

/// A parse error that keeps the alternative which got furthest into the input
#[derive(Debug)]
pub struct GreedyError<I>(Vec<(I, GreedyErrorKind)>);

#[derive(Debug)]
enum GreedyErrorKind {
    Context(&'static str),
    Nom(ErrorKind),
    Char(char),
}

pub trait Length {
    fn length(&self) -> usize;
}

impl Length for &str {
    fn length(&self) -> usize {
        self.len()
    }
}

impl Display for GreedyError<&str> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (input, error)) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let near: String = input.chars().take(20).collect();
            match error {
                GreedyErrorKind::Context(context) => write!(f, "in {}", context)?,
                GreedyErrorKind::Nom(kind) => write!(f, "{:?}", kind)?,
                GreedyErrorKind::Char(c) => write!(f, "expected `{}`", c)?,
            }
            if near.is_empty() {
                f.write_str(" at end of input")?;
            } else {
                write!(f, " at `{}`", near)?;
            }
        }
        Ok(())
    }
}

impl<I> ParseError<I> for GreedyError<I>
where
    I: Length,
{
    fn from_error_kind(input: I, kind: ErrorKind) -> Self {
        Self(vec![(input, GreedyErrorKind::Nom(kind))])
    }

    fn append(input: I, kind: ErrorKind, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Nom(kind)));
        other
    }

    fn from_char(input: I, c: char) -> Self {
        Self(vec![(input, GreedyErrorKind::Char(c))])
    }

    fn or(self, other: Self) -> Self {
        if self.0[0].0.length() < other.0[0].0.length() {
            self
        } else {
            other
        }
    }
}

impl<I> ContextError<I> for GreedyError<I> {
    fn add_context(input: I, ctx: &'static str, mut other: Self) -> Self {
        other.0.push((input, GreedyErrorKind::Context(ctx)));
        other
    }
}

/// Turns recoverable errors of `f` into failures, so `alt` stops trying alternatives.
pub fn or_fail<I, O, E: ParseError<I>, F>(mut f: F) -> impl FnMut(I) -> IResult<I, O, E>
where
    F: Parser<I, O, E>,
{
    move |input| {
        f.parse(input).map_err(|error| match error {
            nom::Err::Error(e) => nom::Err::Failure(e),
            e => e,
        })
    }
}
