use crate::ast::*;
use crate::interpret::Value;
use crate::report::Reporter;
use crate::token::{LexItem, Literal, Token};

use super::context::Context;
use super::error::{ParseError, EXPECT_END, EXPECT_EXPRESSION, EXPECT_RIGHT_PAREN};

/// Parses one expression spanning every item before `Eof`.
///
/// A syntax fault is handed to `reporter` once and returned, the caller gets
/// no tree in that case. Trees higher than `max_depth` are rejected, so every
/// tree returned here can be walked, printed and dropped within that bound.
pub fn parse(
    items: &[LexItem],
    reporter: &mut dyn Reporter,
    max_depth: usize,
) -> Result<Expression, ParseError> {
    Context::new(items, max_depth)
        .and_then(|mut state| parse_complete(&mut state))
        .inspect_err(|err| {
            if let Some(diagnostic) = err.to_diagnostic() {
                reporter.report(diagnostic);
            }
        })
}

/// An expression and its height: the most operator and group nodes met on
/// any path from it down to a literal.
struct Parsed {
    expr: Expression,
    height: usize,
}

fn bounded(
    state: &Context,
    item: &LexItem,
    expr: Expression,
    height: usize,
) -> Result<Parsed, ParseError> {
    if height > state.max_depth() {
        return Err(ParseError::TooDeep(
            Box::new(item.clone()),
            state.max_depth(),
        ));
    }
    Ok(Parsed { expr, height })
}

fn parse_complete(state: &mut Context) -> Result<Expression, ParseError> {
    let parsed = parse_expr(state)?;
    if !state.is_at_end() {
        return Err(ParseError::UnexpectedToken(
            Box::new(state.peek().clone()),
            EXPECT_END,
        ));
    }
    Ok(parsed.expr)
}

fn parse_expr(state: &mut Context) -> Result<Parsed, ParseError> {
    parse_equality(state)
}

fn parse_equality(state: &mut Context) -> Result<Parsed, ParseError> {
    parse_recursive_binary(
        state,
        &[Token::BangEqual, Token::EqualEqual],
        parse_comparison,
    )
}

fn parse_comparison(state: &mut Context) -> Result<Parsed, ParseError> {
    parse_recursive_binary(
        state,
        &[
            Token::Greater,
            Token::GreaterEqual,
            Token::Less,
            Token::LessEqual,
        ],
        parse_term,
    )
}

fn parse_term(state: &mut Context) -> Result<Parsed, ParseError> {
    parse_recursive_binary(state, &[Token::Minus, Token::Plus], parse_factor)
}

fn parse_factor(state: &mut Context) -> Result<Parsed, ParseError> {
    parse_recursive_binary(state, &[Token::Slash, Token::Star], parse_unary)
}

// Left-associative: each new operator takes the tree built so far as its lhs,
// so a flat chain grows one level per operator
fn parse_recursive_binary<F>(
    state: &mut Context,
    match_tokens: &'static [Token],
    lower_fn: F,
) -> Result<Parsed, ParseError>
where
    F: Fn(&mut Context) -> Result<Parsed, ParseError>,
{
    let mut lhs = lower_fn(state)?;

    while let Some(op) = state.match_tokens(match_tokens) {
        let rhs = lower_fn(state)?;
        let height = 1 + lhs.height.max(rhs.height);
        let expr = Expression::BinaryOp(BinaryOpNode {
            lhs: Box::new(lhs.expr),
            op: op.clone(),
            rhs: Box::new(rhs.expr),
        });
        lhs = bounded(state, op, expr, height)?;
    }

    Ok(lhs)
}

fn parse_unary(state: &mut Context) -> Result<Parsed, ParseError> {
    let Some(op) = state.match_tokens(&[Token::Bang, Token::Minus]) else {
        return parse_primary(state);
    };

    state.descend()?;
    let operand = parse_unary(state)?;
    state.ascend();

    let expr = Expression::UnaryOp(UnaryOpNode {
        op: op.clone(),
        operand: Box::new(operand.expr),
    });
    bounded(state, op, expr, operand.height + 1)
}

fn parse_primary(state: &mut Context) -> Result<Parsed, ParseError> {
    let li = state.peek();
    let value = match li.token {
        Token::False => Value::Bool(false),
        Token::True => Value::Bool(true),
        Token::Nil => Value::Nil,
        Token::Number | Token::String => literal_value(li)?,
        Token::LeftParen => return parse_group(state),
        _ => {
            return Err(ParseError::UnexpectedToken(
                Box::new(li.clone()),
                EXPECT_EXPRESSION,
            ))
        }
    };
    state.advance();
    Ok(Parsed {
        expr: Expression::Literal(value),
        height: 0,
    })
}

fn literal_value(li: &LexItem) -> Result<Value, ParseError> {
    match &li.literal {
        Some(Literal::Number(num)) => Ok(Value::Number(*num)),
        Some(Literal::Str(s)) => Ok(Value::Str(s.clone())),
        None => Err(ParseError::UnexpectedToken(
            Box::new(li.clone()),
            EXPECT_EXPRESSION,
        )),
    }
}

fn parse_group(state: &mut Context) -> Result<Parsed, ParseError> {
    let paren = state.consume(Token::LeftParen, EXPECT_EXPRESSION)?;
    state.descend()?;
    let inner = parse_expr(state)?;
    state.consume(Token::RightParen, EXPECT_RIGHT_PAREN)?;
    state.ascend();

    let expr = Expression::Group(Box::new(inner.expr));
    bounded(state, paren, expr, inner.height + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::lex;
    use crate::parse::error::NESTED_TOO_DEEPLY;
    use crate::report::{Diagnostics, Location};
    use crate::span::Span;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const MAX_DEPTH: usize = 64;

    fn parse_str(input: &str) -> (Result<Expression, ParseError>, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let items = lex(input, &mut diagnostics).unwrap();
        let result = parse(&items, &mut diagnostics, MAX_DEPTH);
        (result, diagnostics)
    }

    fn print_tree(input: &str) -> String {
        let (result, diagnostics) = parse_str(input);
        assert!(!diagnostics.had_error(), "{:?}", diagnostics);
        result.unwrap().to_string()
    }

    #[rstest]
    #[case("1 - 2 - 3", "(- (- 1 2) 3)")]
    #[case("8 / 4 / 2", "(/ (/ 8 4) 2)")]
    #[case("1 + 2 * 3", "(+ 1 (* 2 3))")]
    #[case("(1 + 2) * 3", "(* (group (+ 1 2)) 3)")]
    #[case("1 < 2 == 3 >= 4", "(== (< 1 2) (>= 3 4))")]
    #[case("1 == 2 != 3", "(!= (== 1 2) 3)")]
    #[case("!!true", "(! (! true))")]
    #[case("- - 5", "(- (- 5))")]
    #[case("-2 * -3", "(* (- 2) (- 3))")]
    #[case("\"a\" + nil", "(+ \"a\" nil)")]
    #[case("((false))", "(group (group false))")]
    fn builds_tree(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(print_tree(input), expected);
    }

    #[rstest]
    #[case("(1 + 2", "Expect ')' after expression.", Location::AtEnd)]
    #[case("(1 2)", "Expect ')' after expression.", Location::At("2".to_string()))]
    #[case("", "Expect expression.", Location::AtEnd)]
    #[case("*", "Expect expression.", Location::At("*".to_string()))]
    #[case("1 +", "Expect expression.", Location::AtEnd)]
    #[case("1 2", "Expect end of expression.", Location::At("2".to_string()))]
    #[case("1;", "Expect end of expression.", Location::At(";".to_string()))]
    fn reports_syntax_fault(
        #[case] input: &str,
        #[case] message: &str,
        #[case] location: Location,
    ) {
        let (result, diagnostics) = parse_str(input);

        let err = result.unwrap_err();
        assert_eq!(err.message(), message);
        assert_eq!(diagnostics.items.len(), 1);
        assert_eq!(diagnostics.items[0].message, message);
        assert_eq!(diagnostics.items[0].location, location);
    }

    #[test]
    fn tree_outlives_tokens() {
        let tree = {
            let (result, _) = parse_str("(1 + 2) * 3");
            result.unwrap()
        };
        assert_eq!(tree.to_string(), "(* (group (+ 1 2)) 3)");
    }

    #[test]
    fn nesting_is_bounded() {
        let ok = format!("{}1{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(parse_str(&ok).0.is_ok());

        let too_deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        let (result, diagnostics) = parse_str(&too_deep);
        assert!(matches!(result, Err(ParseError::TooDeep(_, MAX_DEPTH))));
        assert_eq!(diagnostics.messages(), vec![NESTED_TOO_DEEPLY]);

        let (result, _) = parse_str(&"-".repeat(MAX_DEPTH + 1));
        assert!(matches!(result, Err(ParseError::TooDeep(..))));
    }

    #[test]
    fn flat_chain_counts_one_level_per_operator() {
        // n terms fold into n - 1 binary nodes
        let at_limit = vec!["1"; MAX_DEPTH + 1].join(" + ");
        assert!(parse_str(&at_limit).0.is_ok());

        let over_limit = vec!["1"; MAX_DEPTH + 2].join(" + ");
        let (result, diagnostics) = parse_str(&over_limit);
        assert!(matches!(result, Err(ParseError::TooDeep(ref op, MAX_DEPTH)) if op.lexeme == "+"));
        assert_eq!(diagnostics.messages(), vec![NESTED_TOO_DEEPLY]);
    }

    #[test]
    fn group_height_includes_its_contents() {
        // one group around a chain that alone sits exactly at the limit
        let chain = vec!["1"; MAX_DEPTH + 1].join(" * ");
        let (result, _) = parse_str(&format!("({})", chain));
        assert!(matches!(result, Err(ParseError::TooDeep(ref paren, _)) if paren.lexeme == "("));
    }

    #[test]
    fn long_chain_is_rejected_without_recursion() {
        let chain = vec!["1"; 100_000].join("+");
        let (result, diagnostics) = parse_str(&chain);

        assert!(matches!(result, Err(ParseError::TooDeep(..))));
        assert_eq!(diagnostics.items.len(), 1);
    }

    #[test]
    fn missing_terminator_is_not_reported() {
        let mut diagnostics = Diagnostics::new();
        let items = vec![LexItem::new(Token::Nil, "nil", Span::new(0, 2), 1)];

        let result = parse(&items, &mut diagnostics, MAX_DEPTH);
        assert_eq!(result, Err(ParseError::MissingEof));
        assert!(!diagnostics.had_error());
    }

    #[test]
    fn reports_line_of_offending_token() {
        let (_, diagnostics) = parse_str("1 +\n\n)");
        assert_eq!(
            diagnostics.items[0].to_string(),
            "[line 3] Error at ')': Expect expression."
        );
    }
}
