use crate::value::{Radix, Value};

use std::fmt;

use proc_macro2::{Delimiter, Literal, Spacing, TokenStream, TokenTree};

#[derive(Debug)]
struct Parser {
    tokens: Vec<TokenTree>,
    index: usize,
}

#[derive(Debug)]
pub enum ParseError {
    ExpectedStringLiteral(Literal),
    UnexpectedToken(TokenTree),
    UnexpectedChar(char),
    UnexpectedDelimiter(Delimiter),
    UnexpectedEnd,
    TrailingTokens,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::ExpectedStringLiteral(lit) => {
                write!(f, "expected a string literal, found `{}`", lit)
            }
            ParseError::UnexpectedToken(token) => write!(f, "unexpected token `{}`", token),
            ParseError::UnexpectedChar(c) => write!(f, "unexpected character `{}`", c),
            ParseError::UnexpectedDelimiter(delim) => {
                write!(f, "unexpected delimiter {:?}", delim)
            }
            ParseError::UnexpectedEnd => f.write_str("unexpected end of input"),
            ParseError::TrailingTokens => f.write_str("expected a single form"),
        }
    }
}

impl Parser {
    fn new(tokens: Vec<TokenTree>) -> Self {
        Parser { tokens, index: 0 }
    }

    fn next_token(&mut self) -> Option<&TokenTree> {
        let token = self.tokens.get(self.index)?;
        self.index += 1;
        Some(token)
    }

    fn token(&mut self) -> Result<&TokenTree, ParseError> {
        self.next_token().ok_or(ParseError::UnexpectedEnd)
    }

    fn peek(&self) -> Option<&TokenTree> {
        self.tokens.get(self.index)
    }

    fn eat_token(&mut self) {
        assert!(self.index < self.tokens.len());
        self.index += 1;
    }

    fn parse(&mut self) -> Result<Value, ParseError> {
        match self.token()? {
            TokenTree::Punct(punct) => match punct.as_char() {
                '#' => self.parse_octothorpe(),
                ',' => Ok(Value::Unquoted(self.token()?.clone())),
                c @ ('!' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | ':' | '<' | '='
                | '>' | '?' | '@' | '^' | '_' | '~') => match punct.spacing() {
                    Spacing::Joint => Ok(Value::Symbol(self.parse_identifier(c.to_string()))),
                    Spacing::Alone => match (c, self.peek()) {
                        ('-', Some(TokenTree::Literal(lit))) => {
                            let lit = lit.clone();
                            self.eat_token();
                            Ok(Value::Negated(lit))
                        }
                        (':', Some(TokenTree::Ident(_))) => {
                            Ok(Value::Symbol(self.parse_identifier(c.to_string())))
                        }
                        _ => Ok(Value::Symbol(c.to_string())),
                    },
                },
                c => Err(ParseError::UnexpectedChar(c)),
            },
            TokenTree::Literal(literal) => Ok(literal_value(literal)),
            TokenTree::Ident(ident) => Ok(Value::Symbol(ident.to_string())),
            TokenTree::Group(group) => match group.delimiter() {
                Delimiter::Parenthesis => parse_elements(group.stream()).map(Value::List),
                delim => Err(ParseError::UnexpectedDelimiter(delim)),
            },
        }
    }

    fn parse_identifier(&mut self, prefix: String) -> String {
        let mut identifier = prefix;
        while let Some(token) = self.peek() {
            match token {
                TokenTree::Punct(punct) => match punct.as_char() {
                    '!' | '$' | '%' | '&' | '*' | '+' | '-' | '.' | '/' | ':' | '<' | '=' | '>'
                    | '?' | '@' | '^' | '~' => {
                        identifier.push(punct.as_char());
                        let spacing = punct.spacing();
                        self.eat_token();
                        match spacing {
                            Spacing::Joint => {}
                            Spacing::Alone => break,
                        }
                    }
                    _ => break,
                },
                TokenTree::Ident(part) => {
                    identifier.push_str(&part.to_string());
                    self.eat_token();
                    break;
                }
                _ => break,
            }
        }
        identifier
    }

    // `#(...)` is a vector, `#c(...)` a complex literal, `#b101`, `#o17`
    // and `#xff` radix literals, and `#"..."` a symbol that is not a valid
    // Rust identifier.
    fn parse_octothorpe(&mut self) -> Result<Value, ParseError> {
        let token = self.token()?.clone();
        match &token {
            TokenTree::Literal(lit) => Ok(Value::Symbol(string_literal(lit)?)),
            TokenTree::Ident(ident) => {
                let name = ident.to_string();
                if name == "c" {
                    if let Some(TokenTree::Group(group)) = self.peek() {
                        if group.delimiter() == Delimiter::Parenthesis {
                            let parts = parse_elements(group.stream())?;
                            self.eat_token();
                            return Ok(Value::Complex(parts));
                        }
                    }
                }
                let radix = match name.get(..1) {
                    Some("b") => Radix::Binary,
                    Some("o") => Radix::Octal,
                    Some("x") => Radix::Hex,
                    _ => return Err(ParseError::UnexpectedToken(token.clone())),
                };
                match name.get(1..) {
                    Some(digits) if !digits.is_empty() => Ok(Value::Radix(radix, digits.into())),
                    _ => Err(ParseError::UnexpectedToken(token.clone())),
                }
            }
            TokenTree::Group(group) => match group.delimiter() {
                Delimiter::Parenthesis => parse_elements(group.stream()).map(Value::Vector),
                delim => Err(ParseError::UnexpectedDelimiter(delim)),
            },
            TokenTree::Punct(punct) => Err(ParseError::UnexpectedChar(punct.as_char())),
        }
    }
}

fn literal_value(lit: &Literal) -> Value {
    let s = lit.to_string();
    if let Some(interior) = s.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Value::String(interior.into())
    } else if let Some(interior) = s.strip_prefix('\'').and_then(|s| s.strip_suffix('\'')) {
        Value::Char(interior.into())
    } else {
        Value::Literal(lit.clone())
    }
}

fn string_literal(lit: &Literal) -> Result<String, ParseError> {
    match literal_value(lit) {
        Value::String(s) => Ok(s),
        _ => Err(ParseError::ExpectedStringLiteral(lit.clone())),
    }
}

fn parse_elements(tokens: TokenStream) -> Result<Vec<Value>, ParseError> {
    let mut elements = vec![];
    let mut parser = Parser::new(tokens.into_iter().collect());
    while parser.peek().is_some() {
        elements.push(parser.parse()?);
    }
    Ok(elements)
}

pub fn parse(tokens: TokenStream) -> Result<Value, ParseError> {
    let mut parser = Parser::new(tokens.into_iter().collect());
    let value = parser.parse()?;
    match parser.peek() {
        None => Ok(value),
        Some(_) => Err(ParseError::TrailingTokens),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_message(input: &str) -> String {
        let tokens: TokenStream = input.parse().unwrap();
        parse(tokens).unwrap_err().to_string()
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(error_message("#1"), "expected a string literal, found `1`");
        assert_eq!(error_message("#zz"), "unexpected token `zz`");
        assert_eq!(error_message("#"), "unexpected end of input");
        assert_eq!(error_message("[a]"), "unexpected delimiter Bracket");
        assert_eq!(error_message("(a) b"), "expected a single form");
        assert_eq!(error_message("(a #!)"), "unexpected character `!`");
    }

    #[test]
    fn test_parse_forms() {
        let tokens: TokenStream = "(a #(1) #c(0 1) #xff \"s\")".parse().unwrap();
        match parse(tokens).unwrap() {
            Value::List(elements) => assert_eq!(elements.len(), 5),
            other => panic!("expected a list, got {:?}", other),
        }
    }
}
