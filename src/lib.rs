//! Expression core of a Lox interpreter: a recursive-descent parser that
//! builds an [`ast::Expression`] from lex items, and a tree-walking
//! [`interpret::Interpreter`] that reduces it to a [`interpret::Value`].

pub mod ast;
pub mod config;
pub mod interpret;
pub mod lex;
pub mod parse;
pub mod report;
pub mod span;
pub mod token;

use log::{debug, trace};
use thiserror::Error;

use crate::config::Config;
use crate::interpret::{Interpreter, Value};
use crate::parse::ParseError;
use crate::report::Reporter;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Runtime(#[from] interpret::Error),
}

/// Lexes, parses and evaluates `input` as a single expression.
///
/// Lex and parse faults have already reached `reporter` when they are
/// returned; runtime faults are left to the caller.
pub fn run(input: &str, config: &Config, reporter: &mut dyn Reporter) -> Result<Value, Error> {
    let items = lex::lex(input, reporter)?;
    for item in &items {
        debug!("{} - {:?}: {:?}", item.span, item.token, item.lexeme);
    }

    let expr = parse::parse(&items, reporter, config.max_depth)?;
    trace!("{:?}", &expr);

    let value = Interpreter::new(config.max_depth).evaluate(&expr)?;
    Ok(value)
}
