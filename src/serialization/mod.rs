//! Plain-text reading and writing of formulas and theories.

mod error;
mod parser;
mod report;

pub use error::*;
pub use parser::*;
pub use report::*;
