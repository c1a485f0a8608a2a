use phf::phf_map;

use crate::parse::ParseError;
use crate::report::Reporter;
use crate::span::Span;
use crate::token::{LexItem, Literal, Token};

static KEYWORDS: phf::Map<&'static str, Token> = phf_map! {
    "and" => Token::And,
    "class" => Token::Class,
    "else" => Token::Else,
    "false" => Token::False,
    "for" => Token::For,
    "fun" => Token::Fun,
    "if" => Token::If,
    "nil" => Token::Nil,
    "or" => Token::Or,
    "print" => Token::Print,
    "return" => Token::Return,
    "super" => Token::Super,
    "this" => Token::This,
    "true" => Token::True,
    "var" => Token::Var,
    "while" => Token::While,
};

/// Turns source text into lex items terminated by a single `Eof`.
///
/// Stops at the first fault, which is also handed to `reporter`.
pub fn lex(input: &str, reporter: &mut dyn Reporter) -> Result<Vec<LexItem>, ParseError> {
    lex_items(input).inspect_err(|err| {
        if let Some(diagnostic) = err.to_diagnostic() {
            reporter.report(diagnostic);
        }
    })
}

fn is_identifier_start(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphabetic()
}

fn is_identifier_char(c: u8) -> bool {
    c == b'_' || c.is_ascii_alphanumeric()
}

fn lex_items(input: &str) -> Result<Vec<LexItem>, ParseError> {
    let bytes = input.as_bytes();
    let mut curr_offset = 0;
    let mut line = 1;
    let mut result = vec![];

    while let Some(&c) = bytes.get(curr_offset) {
        match c {
            b'(' => result.push(single(input, Token::LeftParen, curr_offset, line)),
            b')' => result.push(single(input, Token::RightParen, curr_offset, line)),
            b'{' => result.push(single(input, Token::LeftBrace, curr_offset, line)),
            b'}' => result.push(single(input, Token::RightBrace, curr_offset, line)),
            b',' => result.push(single(input, Token::Comma, curr_offset, line)),
            b'.' => result.push(single(input, Token::Dot, curr_offset, line)),
            b';' => result.push(single(input, Token::Semicolon, curr_offset, line)),
            b'+' => result.push(single(input, Token::Plus, curr_offset, line)),
            b'-' => result.push(single(input, Token::Minus, curr_offset, line)),
            b'*' => result.push(single(input, Token::Star, curr_offset, line)),
            b'!' => result.push(one_or_two(
                input,
                &mut curr_offset,
                line,
                Token::Bang,
                Token::BangEqual,
            )),
            b'=' => result.push(one_or_two(
                input,
                &mut curr_offset,
                line,
                Token::Equal,
                Token::EqualEqual,
            )),
            b'>' => result.push(one_or_two(
                input,
                &mut curr_offset,
                line,
                Token::Greater,
                Token::GreaterEqual,
            )),
            b'<' => result.push(one_or_two(
                input,
                &mut curr_offset,
                line,
                Token::Less,
                Token::LessEqual,
            )),
            b'/' => {
                if bytes.get(curr_offset + 1) == Some(&b'/') {
                    // comment runs until the end of the line, the newline itself is lexed next
                    while let Some(&n) = bytes.get(curr_offset + 1) {
                        if n == b'\n' {
                            break;
                        }
                        curr_offset += 1;
                    }
                } else {
                    result.push(single(input, Token::Slash, curr_offset, line));
                }
            }
            b' ' | b'\t' | b'\r' => {
                // skip
            }
            b'\n' => line += 1,
            b'"' => result.push(lex_string(input, &mut curr_offset, &mut line)?),
            c if c.is_ascii_digit() => result.push(lex_number(input, &mut curr_offset, line)?),
            c if is_identifier_start(c) => {
                result.push(lex_keyword_or_identifier(input, &mut curr_offset, line))
            }
            _ => {
                let ch = input[curr_offset..]
                    .chars()
                    .next()
                    .unwrap_or(char::REPLACEMENT_CHARACTER);
                return Err(ParseError::UnexpectedCharacter { ch, line });
            }
        }
        curr_offset += 1;
    }

    result.push(LexItem::eof(curr_offset, line));
    Ok(result)
}

fn single(input: &str, token: Token, offset: usize, line: usize) -> LexItem {
    let span = Span::one(offset);
    LexItem::new(token, span.str_from_source(input), span, line)
}

fn one_or_two(
    input: &str,
    offset: &mut usize,
    line: usize,
    one: Token,
    two: Token,
) -> LexItem {
    if input.as_bytes().get(*offset + 1) == Some(&b'=') {
        let span = Span::two(*offset);
        *offset += 1;
        LexItem::new(two, span.str_from_source(input), span, line)
    } else {
        single(input, one, *offset, line)
    }
}

fn lex_string(input: &str, offset: &mut usize, line: &mut usize) -> Result<LexItem, ParseError> {
    let bytes = input.as_bytes();
    let start_offset = *offset;
    let start_line = *line;

    loop {
        *offset += 1;
        match bytes.get(*offset) {
            None => return Err(ParseError::UnterminatedString(start_line)),
            Some(b'"') => break,
            Some(b'\n') => *line += 1,
            Some(_) => {}
        }
    }

    let span = Span::new(start_offset, *offset);
    // strip the surrounding quotes
    let value = &input[start_offset + 1..*offset];
    Ok(
        LexItem::new(Token::String, span.str_from_source(input), span, start_line)
            .with_literal(Literal::Str(value.to_string())),
    )
}

fn lex_number(input: &str, offset: &mut usize, line: usize) -> Result<LexItem, ParseError> {
    let bytes = input.as_bytes();
    let start_offset = *offset;

    skip_digits(bytes, offset);

    // a trailing '.' without digits after it does not belong to the number
    let has_fraction = bytes.get(*offset + 1) == Some(&b'.')
        && bytes.get(*offset + 2).is_some_and(|c| c.is_ascii_digit());
    if has_fraction {
        *offset += 1;
        skip_digits(bytes, offset);
    }

    let span = Span::new(start_offset, *offset);
    let source = span.str_from_source(input);
    match source.parse::<f64>() {
        Err(_) => Err(ParseError::ParseToNumber(span, line)),
        Ok(num) => {
            Ok(LexItem::new(Token::Number, source, span, line).with_literal(Literal::Number(num)))
        }
    }
}

fn skip_digits(bytes: &[u8], offset: &mut usize) {
    while let Some(c) = bytes.get(*offset + 1) {
        if !c.is_ascii_digit() {
            break;
        }
        *offset += 1;
    }
}

fn lex_keyword_or_identifier(input: &str, offset: &mut usize, line: usize) -> LexItem {
    let bytes = input.as_bytes();
    let start_offset = *offset;

    while let Some(&c) = bytes.get(*offset + 1) {
        if !is_identifier_char(c) {
            break;
        }
        *offset += 1;
    }

    let span = Span::new(start_offset, *offset);
    let source = span.str_from_source(input);
    let token = KEYWORDS.get(source).copied().unwrap_or(Token::Identifier);
    LexItem::new(token, source, span, line)
}
