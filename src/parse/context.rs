use crate::token::{LexItem, Token};

use super::error::{ParseError, NESTED_TOO_DEEPLY};

/// Cursor over a lex item slice that ends with `Eof`.
///
/// The cursor only moves forward and never moves past the terminator.
pub struct Context<'a> {
    items: &'a [LexItem],
    curr_pos: usize,
    depth: usize,
    max_depth: usize,
}

impl<'a> Context<'a> {
    pub fn new(items: &'a [LexItem], max_depth: usize) -> Result<Self, ParseError> {
        match items.last() {
            Some(li) if li.token == Token::Eof => Ok(Self {
                items,
                curr_pos: 0,
                depth: 0,
                max_depth,
            }),
            _ => Err(ParseError::MissingEof),
        }
    }

    pub fn peek(&self) -> &'a LexItem {
        // `new` guarantees a non-empty slice and `advance` stops at the last item
        &self.items[self.curr_pos]
    }

    pub fn previous(&self) -> &'a LexItem {
        &self.items[self.curr_pos.saturating_sub(1)]
    }

    pub fn is_at_end(&self) -> bool {
        self.peek().token == Token::Eof
    }

    pub fn advance(&mut self) -> &'a LexItem {
        if !self.is_at_end() {
            self.curr_pos += 1;
        }
        self.previous()
    }

    pub fn check(&self, token: Token) -> bool {
        !self.is_at_end() && self.peek().token == token
    }

    /// Consumes the current item if it is one of `match_tokens`.
    pub fn match_tokens(&mut self, match_tokens: &[Token]) -> Option<&'a LexItem> {
        if match_tokens.iter().any(|t| self.check(*t)) {
            Some(self.advance())
        } else {
            None
        }
    }

    pub fn consume(
        &mut self,
        token: Token,
        message: &'static str,
    ) -> Result<&'a LexItem, ParseError> {
        if self.check(token) {
            return Ok(self.advance());
        }
        Err(ParseError::UnexpectedToken(
            Box::new(self.peek().clone()),
            message,
        ))
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Enters a group or unary operand. Bounds the parser's own recursion
    /// before the finished subtree can be measured.
    pub fn descend(&mut self) -> Result<(), ParseError> {
        if self.depth >= self.max_depth {
            return Err(ParseError::TooDeep(
                Box::new(self.peek().clone()),
                self.max_depth,
            ));
        }
        self.depth += 1;
        Ok(())
    }

    pub fn ascend(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}
