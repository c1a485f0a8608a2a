//! Diagnostic sink shared by the lexer and the parser.
//!
//! The sink is passed in explicitly so that callers decide how faults are
//! shown and whether "an error happened" is tracked across inputs.

use std::fmt;

use log::error;

use crate::token::{LexItem, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Location {
    AtEnd,
    At(String),
    Nowhere,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub location: Location,
    pub message: String,
}

impl Diagnostic {
    pub fn at_line(line: usize, message: impl Into<String>) -> Self {
        Diagnostic {
            line,
            location: Location::Nowhere,
            message: message.into(),
        }
    }

    pub fn at_item(item: &LexItem, message: impl Into<String>) -> Self {
        let location = match item.token {
            Token::Eof => Location::AtEnd,
            _ => Location::At(item.lexeme.clone()),
        };
        Diagnostic {
            line: item.line,
            location,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Location::AtEnd => write!(f, "[line {}] Error at end: {}", self.line, self.message),
            Location::At(lexeme) => write!(
                f,
                "[line {}] Error at '{}': {}",
                self.line, lexeme, self.message
            ),
            Location::Nowhere => write!(f, "[line {}] Error: {}", self.line, self.message),
        }
    }
}

pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);

    fn had_error(&self) -> bool;
}

/// Writes every diagnostic to the `log` error stream.
#[derive(Debug, Default)]
pub struct LogReporter {
    had_error: bool,
}

impl LogReporter {
    pub fn new() -> Self {
        Self::default()
    }

    // The REPL keeps going after a bad line
    pub fn reset(&mut self) {
        self.had_error = false;
    }
}

impl Reporter for LogReporter {
    fn report(&mut self, diagnostic: Diagnostic) {
        error!("{}", diagnostic);
        self.had_error = true;
    }

    fn had_error(&self) -> bool {
        self.had_error
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Default)]
pub struct Diagnostics {
    pub items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<&str> {
        self.items.iter().map(|d| d.message.as_str()).collect()
    }
}

impl Reporter for Diagnostics {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    fn had_error(&self) -> bool {
        !self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::span::Span;
    use pretty_assertions::assert_eq;

    #[test]
    fn formats_each_location() {
        let star = LexItem::new(Token::Star, "*", Span::one(0), 3);
        let eof = LexItem::eof(1, 4);

        assert_eq!(
            Diagnostic::at_item(&star, "Expect expression.").to_string(),
            "[line 3] Error at '*': Expect expression."
        );
        assert_eq!(
            Diagnostic::at_item(&eof, "Expect ')' after expression.").to_string(),
            "[line 4] Error at end: Expect ')' after expression."
        );
        assert_eq!(
            Diagnostic::at_line(1, "Unexpected character.").to_string(),
            "[line 1] Error: Unexpected character."
        );
    }

    #[test]
    fn log_reporter_tracks_and_resets() {
        let mut reporter = LogReporter::new();
        assert!(!reporter.had_error());

        reporter.report(Diagnostic::at_line(1, "boom"));
        assert!(reporter.had_error());

        reporter.reset();
        assert!(!reporter.had_error());
    }

    #[test]
    fn diagnostics_collects_in_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.report(Diagnostic::at_line(1, "first"));
        diagnostics.report(Diagnostic::at_line(2, "second"));

        assert!(diagnostics.had_error());
        assert_eq!(diagnostics.messages(), vec!["first", "second"]);
    }
}
