//! License expression grammar.
//!
//! Identifiers are never checked against a list of known licenses; anything
//! shaped like one (ASCII alphanumerics, `.`, `-`, optional trailing `+`) is
//! accepted. Keywords are case-sensitive.

use thiserror::Error;

/// Deepest parenthesis nesting the parser accepts.
pub const MAX_DEPTH: usize = 64;

#[derive(Error, Debug, PartialEq)]
pub enum ExpressionError {
    #[error("unexpected character {0:?}")]
    UnexpectedChar(char),
    #[error("malformed identifier {0:?}")]
    MalformedId(String),
    #[error("unexpected {0}")]
    UnexpectedToken(String),
    #[error("unexpected end of expression")]
    UnexpectedEnd,
    #[error("expression nested deeper than {0} levels")]
    TooDeep(usize),
}

/// Parsed license expression.
///
/// `And` and `Or` hold every operand of a run of the same operator, so tree
/// depth follows parenthesis nesting rather than expression length.
#[derive(Debug, Clone, PartialEq)]
pub enum LicenseExpr {
    License {
        id: String,
        or_later: bool,
        exception: Option<String>,
    },
    And(Vec<LicenseExpr>),
    Or(Vec<LicenseExpr>),
}

impl LicenseExpr {
    /// Bare identifier without operators, suffix or exception.
    pub fn as_single_id(&self) -> Option<&str> {
        match self {
            LicenseExpr::License {
                id,
                or_later: false,
                exception: None,
            } => Some(id),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Clone)]
enum Token {
    Id(String),
    And,
    Or,
    With,
    LParen,
    RParen,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Id(id) => write!(f, "identifier {:?}", id),
            Token::And => write!(f, "AND"),
            Token::Or => write!(f, "OR"),
            Token::With => write!(f, "WITH"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
        }
    }
}

fn is_id_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '.' || c == '-'
}

fn tokenize(expr: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = expr.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        if c == '(' {
            tokens.push(Token::LParen);
            chars.next();
        } else if c == ')' {
            tokens.push(Token::RParen);
            chars.next();
        } else if is_id_char(c) || c == '+' {
            let mut s = String::new();
            while let Some(&c) = chars.peek() {
                if !is_id_char(c) && c != '+' {
                    break;
                }
                s.push(c);
                chars.next();
            }
            let token = match s.as_str() {
                "AND" => Token::And,
                "OR" => Token::Or,
                "WITH" => Token::With,
                _ => {
                    // `+` is only legal once, as the final character.
                    let body = s.strip_suffix('+').unwrap_or(&s);
                    if body.is_empty() || body.contains('+') {
                        return Err(ExpressionError::MalformedId(s));
                    }
                    Token::Id(s)
                }
            };
            tokens.push(token);
        } else {
            return Err(ExpressionError::UnexpectedChar(c));
        }
    }
    Ok(tokens)
}

/// Recursive descent parser.
///
/// Grammar (AND binds tighter than OR):
/// ```text
/// expr      := or_expr
/// or_expr   := and_expr ( "OR" and_expr )*
/// and_expr  := with_expr ( "AND" with_expr )*
/// with_expr := "(" expr ")" | license ( "WITH" exception )?
/// ```
struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl ExprParser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn parse_or(&mut self) -> Result<LicenseExpr, ExpressionError> {
        let mut operands = vec![self.parse_and()?];
        while matches!(self.peek(), Some(Token::Or)) {
            self.consume();
            operands.push(self.parse_and()?);
        }
        Ok(if operands.len() == 1 {
            operands.remove(0)
        } else {
            LicenseExpr::Or(operands)
        })
    }

    fn parse_and(&mut self) -> Result<LicenseExpr, ExpressionError> {
        let mut operands = vec![self.parse_atom()?];
        while matches!(self.peek(), Some(Token::And)) {
            self.consume();
            operands.push(self.parse_atom()?);
        }
        Ok(if operands.len() == 1 {
            operands.remove(0)
        } else {
            LicenseExpr::And(operands)
        })
    }

    fn parse_atom(&mut self) -> Result<LicenseExpr, ExpressionError> {
        match self.consume() {
            Some(Token::LParen) => {
                if self.depth == MAX_DEPTH {
                    return Err(ExpressionError::TooDeep(MAX_DEPTH));
                }
                self.depth += 1;
                let inner = self.parse_or()?;
                self.depth -= 1;
                match self.consume() {
                    Some(Token::RParen) => Ok(inner),
                    Some(other) => Err(ExpressionError::UnexpectedToken(other.to_string())),
                    None => Err(ExpressionError::UnexpectedEnd),
                }
            }
            Some(Token::Id(raw)) => {
                let or_later = raw.ends_with('+');
                let id = if or_later {
                    raw.trim_end_matches('+').to_string()
                } else {
                    raw
                };
                let exception = if matches!(self.peek(), Some(Token::With)) {
                    self.consume();
                    match self.consume() {
                        Some(Token::Id(exc)) if !exc.ends_with('+') => Some(exc),
                        Some(other) => {
                            return Err(ExpressionError::UnexpectedToken(other.to_string()))
                        }
                        None => return Err(ExpressionError::UnexpectedEnd),
                    }
                } else {
                    None
                };
                Ok(LicenseExpr::License {
                    id,
                    or_later,
                    exception,
                })
            }
            Some(other) => Err(ExpressionError::UnexpectedToken(other.to_string())),
            None => Err(ExpressionError::UnexpectedEnd),
        }
    }
}

/// Parse a complete expression; leftover tokens are an error.
pub fn parse(expr: &str) -> Result<LicenseExpr, ExpressionError> {
    let tokens = tokenize(expr)?;
    let mut parser = ExprParser {
        tokens,
        pos: 0,
        depth: 0,
    };
    let parsed = parser.parse_or()?;
    match parser.consume() {
        None => Ok(parsed),
        Some(extra) => Err(ExpressionError::UnexpectedToken(extra.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> LicenseExpr {
        LicenseExpr::License {
            id: name.to_string(),
            or_later: false,
            exception: None,
        }
    }

    #[test]
    fn test_single_identifiers() {
        for s in ["MIT", "LGPL-2.0", "Apache-2.0", "BSD-2-Clause", "0BSD"] {
            assert_eq!(parse(s), Ok(id(s)));
        }
    }

    #[test]
    fn test_or_later_with_exception() {
        assert_eq!(
            parse("(GPL-2.0+ WITH Bison-exception-2.2)"),
            Ok(LicenseExpr::License {
                id: "GPL-2.0".to_string(),
                or_later: true,
                exception: Some("Bison-exception-2.2".to_string()),
            })
        );
    }

    #[test]
    fn test_and_binds_tighter_than_or() {
        assert_eq!(
            parse("MIT OR ISC AND BSD-3-Clause"),
            Ok(LicenseExpr::Or(vec![
                id("MIT"),
                LicenseExpr::And(vec![id("ISC"), id("BSD-3-Clause")]),
            ]))
        );
    }

    #[test]
    fn test_nested_groups() {
        assert!(parse("LGPL-2.0 OR (ISC AND BSD-3-Clause+)").is_ok());
        assert!(parse("((MIT))").is_ok());
        assert!(parse("Apache-2.0 OR ISC OR MIT").is_ok());
    }

    #[test]
    fn test_rejects_free_text() {
        assert!(parse("this is empty, hi").is_err());
        assert!(parse("asdf MIT asdf").is_err());
        assert!(parse("Public Domain").is_err());
        assert!(parse("http://example.com/foo").is_err());
    }

    #[test]
    fn test_rejects_malformed_expressions() {
        assert_eq!(parse("(MIT OR ISC"), Err(ExpressionError::UnexpectedEnd));
        assert!(parse("MIT OR ISC)").is_err());
        assert!(parse("MIT OR").is_err());
        assert!(parse("AND MIT").is_err());
        assert!(parse("MIT and ISC").is_err());
        assert!(parse("MIT WITH").is_err());
        assert!(parse("(MIT) WITH Foo").is_err());
        assert!(parse("GPL+2.0").is_err());
        assert!(parse("+").is_err());
        assert!(parse("").is_err());
        assert_eq!(parse("MIT_X11"), Err(ExpressionError::UnexpectedChar('_')));
    }

    #[test]
    fn test_nesting_depth_is_bounded() {
        let nested = |depth: usize| format!("{}MIT{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(parse(&nested(MAX_DEPTH)), Ok(id("MIT")));
        assert_eq!(
            parse(&nested(MAX_DEPTH + 1)),
            Err(ExpressionError::TooDeep(MAX_DEPTH))
        );
        assert_eq!(
            parse(&"(".repeat(100_000)),
            Err(ExpressionError::TooDeep(MAX_DEPTH))
        );
    }

    #[test]
    fn test_long_flat_expressions() {
        let ors = vec!["MIT"; 100_000].join(" OR ");
        match parse(&ors) {
            Ok(LicenseExpr::Or(operands)) => assert_eq!(operands.len(), 100_000),
            other => panic!("unexpected parse: {other:?}"),
        }
        let groups = vec!["(ISC AND MIT)"; 10_000].join(" OR ");
        assert!(parse(&groups).is_ok());
    }

    #[test]
    fn test_runs_of_one_operator_are_flat() {
        assert_eq!(
            parse("Apache-2.0 OR ISC OR MIT"),
            Ok(LicenseExpr::Or(vec![id("Apache-2.0"), id("ISC"), id("MIT")]))
        );
        assert_eq!(
            parse("(ISC AND MIT) AND BSD-2-Clause"),
            Ok(LicenseExpr::And(vec![
                LicenseExpr::And(vec![id("ISC"), id("MIT")]),
                id("BSD-2-Clause"),
            ]))
        );
    }

    #[test]
    fn test_as_single_id() {
        assert_eq!(parse("Public-Domain").unwrap().as_single_id(), Some("Public-Domain"));
        assert_eq!(parse("GPL-2.0+").unwrap().as_single_id(), None);
        assert_eq!(parse("MIT OR ISC").unwrap().as_single_id(), None);
    }
}
