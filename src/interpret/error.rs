use thiserror::Error;

use super::value::Value;
use crate::token::LexItem;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("[line {}] Operand of `{}` must be a number, got {} `{1}`", .0.line, .0.lexeme, .1.type_name())]
    OperandMustBeNumber(LexItem, Value),

    #[error("[line {}] Operands of `{}` must be numbers, got `{1}` and `{2}`", .0.line, .0.lexeme)]
    OperandsMustBeNumbers(LexItem, Value, Value),

    #[error("[line {}] Operands of `{}` must be two numbers or two strings, got {} and {}", .0.line, .0.lexeme, .1.type_name(), .2.type_name())]
    OperandsMustBeNumbersOrStrings(LexItem, Value, Value),

    #[error("[line {}] Unknown operator `{}`", .0.line, .0.lexeme)]
    UnknownOperation(LexItem),

    #[error("Expression is nested deeper than {0} levels")]
    TooDeep(usize),
}
