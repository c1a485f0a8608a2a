use thiserror::Error;

use crate::report::Diagnostic;
use crate::span::Span;
use crate::token::LexItem;

pub const EXPECT_EXPRESSION: &str = "Expect expression.";
pub const EXPECT_RIGHT_PAREN: &str = "Expect ')' after expression.";
pub const EXPECT_END: &str = "Expect end of expression.";
pub const NESTED_TOO_DEEPLY: &str = "Expression nested too deeply.";
pub const UNEXPECTED_CHARACTER: &str = "Unexpected character.";
pub const UNTERMINATED_STRING: &str = "Unterminated string.";
pub const INVALID_NUMBER: &str = "Invalid number literal.";

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character `{ch}` at line {line}")]
    UnexpectedCharacter { ch: char, line: usize },

    #[error("String starts at line {0} is not closed")]
    UnterminatedString(usize),

    // digit runs from the lexer always parse; kept so a malformed literal is a
    // fault rather than a panic
    #[error("Unable to parse to number at position {0} on line {1}")]
    ParseToNumber(Span, usize),

    #[error("Unexpected token `{}` at line {}: {1}", .0.token, .0.line)]
    UnexpectedToken(Box<LexItem>, &'static str),

    #[error("Expression at line {} is deeper than {1} levels", .0.line)]
    TooDeep(Box<LexItem>, usize),

    #[error("Token stream is not terminated by an end-of-input marker")]
    MissingEof,
}

impl ParseError {
    pub fn message(&self) -> &'static str {
        use ParseError::*;
        match self {
            UnexpectedCharacter { .. } => UNEXPECTED_CHARACTER,
            UnterminatedString(_) => UNTERMINATED_STRING,
            ParseToNumber(..) => INVALID_NUMBER,
            UnexpectedToken(_, message) => *message,
            TooDeep(..) => NESTED_TOO_DEEPLY,
            MissingEof => "Missing end of input.",
        }
    }

    /// The form handed to the error sink, `None` for faults that are not the
    /// user's doing.
    pub fn to_diagnostic(&self) -> Option<Diagnostic> {
        use ParseError::*;
        match self {
            UnexpectedCharacter { line, .. } | UnterminatedString(line) | ParseToNumber(_, line) => {
                Some(Diagnostic::at_line(*line, self.message()))
            }
            UnexpectedToken(item, message) => Some(Diagnostic::at_item(item, *message)),
            TooDeep(item, _) => Some(Diagnostic::at_item(item, self.message())),
            MissingEof => None,
        }
    }
}
