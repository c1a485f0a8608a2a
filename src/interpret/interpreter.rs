use log::trace;

use super::error::Error;
use super::value::Value;
use crate::ast::*;
use crate::config::DEFAULT_MAX_DEPTH;
use crate::token::{LexItem, Token};

/// Tree-walking evaluator.
///
/// Holds no state besides its depth limit, so one instance can evaluate any
/// number of trees, in any order, from any thread.
#[derive(Debug, Clone, Copy)]
pub struct Interpreter {
    max_depth: usize,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

impl Interpreter {
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn evaluate(&self, expr: &Expression) -> Result<Value, Error> {
        let value = self.interpret_expr(expr, 0)?;
        trace!("{} => {:?}", expr, value);
        Ok(value)
    }

    // `depth` counts the operator and group nodes above `expr`, the same
    // measure the parser bounds, so a parsed tree never trips the check
    fn interpret_expr(&self, expr: &Expression, depth: usize) -> Result<Value, Error> {
        let level = depth + 1;
        match expr {
            Expression::Literal(value) => Ok(value.clone()),
            _ if level > self.max_depth => Err(Error::TooDeep(self.max_depth)),
            Expression::Group(inner) => self.interpret_expr(inner, level),
            Expression::UnaryOp(node) => self.interpret_unary_op(node, level),
            Expression::BinaryOp(node) => self.interpret_binary_op(node, level),
        }
    }

    fn interpret_unary_op(
        &self,
        UnaryOpNode { op, operand }: &UnaryOpNode,
        depth: usize,
    ) -> Result<Value, Error> {
        let res = self.interpret_expr(operand, depth)?;
        match op.token {
            Token::Bang => Ok(Value::Bool(!res.is_truthy())),
            Token::Minus => match res.get_number() {
                Some(v) => Ok(Value::Number(-v)),
                None => Err(Error::OperandMustBeNumber(op.clone(), res)),
            },
            _ => Err(Error::UnknownOperation(op.clone())),
        }
    }

    fn interpret_binary_op(
        &self,
        BinaryOpNode { lhs, op, rhs }: &BinaryOpNode,
        depth: usize,
    ) -> Result<Value, Error> {
        let lhs_val = self.interpret_expr(lhs, depth)?;
        let rhs_val = self.interpret_expr(rhs, depth)?;

        match op.token {
            Token::Plus => interpret_add(op, lhs_val, rhs_val),
            Token::Minus | Token::Star | Token::Slash => binary_number(op, lhs_val, rhs_val),
            Token::Greater | Token::GreaterEqual | Token::Less | Token::LessEqual => {
                interpret_ordering(op, lhs_val, rhs_val)
            }
            Token::EqualEqual => Ok(Value::Bool(lhs_val == rhs_val)),
            Token::BangEqual => Ok(Value::Bool(lhs_val != rhs_val)),
            _ => Err(Error::UnknownOperation(op.clone())),
        }
    }
}

fn interpret_add(op: &LexItem, lhs: Value, rhs: Value) -> Result<Value, Error> {
    match (lhs, rhs) {
        (Value::Number(l), Value::Number(r)) => Ok(Value::Number(l + r)),
        (Value::Str(l), Value::Str(r)) => Ok(Value::Str(l + &r)),
        (lhs, rhs) => Err(Error::OperandsMustBeNumbersOrStrings(op.clone(), lhs, rhs)),
    }
}

fn binary_number(op: &LexItem, lhs: Value, rhs: Value) -> Result<Value, Error> {
    let (Some(l), Some(r)) = (lhs.get_number(), rhs.get_number()) else {
        return Err(Error::OperandsMustBeNumbers(op.clone(), lhs, rhs));
    };

    // division by zero follows IEEE 754 and yields an infinity or NaN
    let v = match op.token {
        Token::Minus => l - r,
        Token::Star => l * r,
        Token::Slash => l / r,
        _ => return Err(Error::UnknownOperation(op.clone())),
    };
    Ok(Value::Number(v))
}

fn interpret_ordering(op: &LexItem, lhs: Value, rhs: Value) -> Result<Value, Error> {
    let (Some(l), Some(r)) = (lhs.get_number(), rhs.get_number()) else {
        return Err(Error::OperandsMustBeNumbers(op.clone(), lhs, rhs));
    };

    let v = match op.token {
        Token::Greater => l > r,
        Token::GreaterEqual => l >= r,
        Token::Less => l < r,
        Token::LessEqual => l <= r,
        _ => return Err(Error::UnknownOperation(op.clone())),
    };
    Ok(Value::Bool(v))
}
