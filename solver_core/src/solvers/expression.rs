//! # Arithmetic Expression Evaluator
//!
//! A whitelisted-grammar evaluator for expressions in one variable `x`.
//! Input is tokenized against a fixed character set and then evaluated by
//! recursive descent; nothing is ever compiled or executed as code.
//!
//! ## Grammar
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary | implicit)*
//! implicit:= unary starting with 'x' or '('     (2x, 3(x + 1), (x)(x))
//! unary   := ('+' | '-') unary | power
//! power   := primary ('^' unary)?               (right associative)
//! primary := number | 'x' | '(' expr ')'
//! ```
//!
//! `×` and `÷` are accepted as aliases of `*` and `/`. Unary minus binds
//! looser than `^`, so `-2^2 = -4`.

use crate::errors::{CalcError, CalcResult};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    X,
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl Token {
    fn describe(&self) -> String {
        match self {
            Token::Number(v) => v.to_string(),
            Token::X => "x".to_string(),
            Token::Plus => "+".to_string(),
            Token::Minus => "-".to_string(),
            Token::Star => "*".to_string(),
            Token::Slash => "/".to_string(),
            Token::Caret => "^".to_string(),
            Token::LParen => "(".to_string(),
            Token::RParen => ")".to_string(),
        }
    }
}

fn invalid(expr: &str, reason: impl Into<String>) -> CalcError {
    CalcError::invalid_input("expression", expr, reason)
}

fn tokenize(expr: &str) -> CalcResult<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '0'..='9' | '.' => {
                let mut literal = String::new();
                while let Some(&(_, c)) = chars.peek() {
                    if c.is_ascii_digit() || c == '.' {
                        literal.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                let value: f64 = literal.parse().map_err(|_| {
                    invalid(expr, format!("Malformed number '{}' at position {}", literal, pos))
                })?;
                tokens.push(Token::Number(value));
            }
            _ => {
                let token = match ch {
                    'x' | 'X' => Token::X,
                    '+' => Token::Plus,
                    '-' | '−' => Token::Minus,
                    '*' | '×' => Token::Star,
                    '/' | '÷' => Token::Slash,
                    '^' => Token::Caret,
                    '(' => Token::LParen,
                    ')' => Token::RParen,
                    other => {
                        return Err(invalid(
                            expr,
                            format!("Unsupported character '{}' at position {}", other, pos),
                        ))
                    }
                };
                tokens.push(token);
                chars.next();
            }
        }
    }
    Ok(tokens)
}

/// Nesting limit for parentheses, signs and exponents combined.
pub const MAX_DEPTH: usize = 256;

struct Evaluator<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    x: f64,
}

impl<'a> Evaluator<'a> {
    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn consume(&mut self, token: Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn parse_expr(&mut self) -> CalcResult<f64> {
        let mut value = self.parse_term()?;
        loop {
            if self.consume(Token::Plus) {
                value += self.parse_term()?;
            } else if self.consume(Token::Minus) {
                value -= self.parse_term()?;
            } else {
                break;
            }
        }
        Ok(value)
    }

    fn parse_term(&mut self) -> CalcResult<f64> {
        let mut value = self.parse_unary()?;
        loop {
            match self.peek() {
                Some(Token::Star) => {
                    self.pos += 1;
                    value *= self.parse_unary()?;
                }
                Some(Token::Slash) => {
                    self.pos += 1;
                    let divisor = self.parse_unary()?;
                    if divisor == 0.0 {
                        return Err(CalcError::undefined(
                            self.source,
                            "division by zero",
                        ));
                    }
                    value /= divisor;
                }
                Some(Token::X) | Some(Token::LParen) => {
                    value *= self.parse_unary()?;
                }
                _ => break,
            }
        }
        Ok(value)
    }

    fn parse_unary(&mut self) -> CalcResult<f64> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(invalid(self.source, "Expression is nested too deeply"));
        }

        let value = if self.consume(Token::Minus) {
            self.parse_unary().map(|v| -v)
        } else if self.consume(Token::Plus) {
            self.parse_unary()
        } else {
            self.parse_power()
        };
        self.depth -= 1;
        value
    }

    fn parse_power(&mut self) -> CalcResult<f64> {
        let base = self.parse_primary()?;
        if self.consume(Token::Caret) {
            let exponent = self.parse_unary()?;
            Ok(base.powf(exponent))
        } else {
            Ok(base)
        }
    }

    fn parse_primary(&mut self) -> CalcResult<f64> {
        let position = self.pos;
        match self.peek() {
            Some(Token::Number(v)) => {
                self.pos += 1;
                Ok(v)
            }
            Some(Token::X) => {
                self.pos += 1;
                Ok(self.x)
            }
            Some(Token::LParen) => {
                self.pos += 1;
                let value = self.parse_expr()?;
                if !self.consume(Token::RParen) {
                    return Err(invalid(self.source, "Missing closing parenthesis"));
                }
                Ok(value)
            }
            Some(other) => Err(invalid(
                self.source,
                format!("Unexpected '{}' at token {}", other.describe(), position + 1),
            )),
            None => Err(invalid(self.source, "Expression ends unexpectedly")),
        }
    }
}

/// Evaluate `expr` with the variable `x` bound to `x`.
///
/// ```rust
/// use solver_core::solvers::expression::evaluate;
///
/// assert_eq!(evaluate("2x^2 + 3x - 1", 2.0).unwrap(), 13.0);
/// assert!(evaluate("x; drop()", 1.0).is_err());
/// ```
pub fn evaluate(expr: &str, x: f64) -> CalcResult<f64> {
    let tokens = tokenize(expr)?;
    if tokens.is_empty() {
        return Err(invalid(expr, "Expression is empty"));
    }

    let mut evaluator = Evaluator {
        source: expr,
        tokens,
        pos: 0,
        depth: 0,
        x,
    };
    let value = evaluator.parse_expr()?;

    if let Some(extra) = evaluator.peek() {
        return Err(invalid(
            expr,
            format!("Unexpected '{}' after end of expression", extra.describe()),
        ));
    }
    if !value.is_finite() {
        return Err(CalcError::undefined(expr, "result is not a finite number"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2 + 3 * 4", 0.0).unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4", 0.0).unwrap(), 20.0);
        assert_eq!(evaluate("10 - 4 - 3", 0.0).unwrap(), 3.0);
        assert_eq!(evaluate("2 ^ 3 ^ 2", 0.0).unwrap(), 512.0);
        assert_eq!(evaluate("-2^2", 0.0).unwrap(), -4.0);
        assert_eq!(evaluate("2^-1", 0.0).unwrap(), 0.5);
    }

    #[test]
    fn test_variable_and_implicit_multiplication() {
        assert_eq!(evaluate("3x", 4.0).unwrap(), 12.0);
        assert_eq!(evaluate("2(x + 1)", 4.0).unwrap(), 10.0);
        assert_eq!(evaluate("(x - 1)(x + 1)", 3.0).unwrap(), 8.0);
        assert_eq!(evaluate("X * X", -3.0).unwrap(), 9.0);
    }

    #[test]
    fn test_unicode_operators() {
        assert_eq!(evaluate("6 × 7 ÷ 2", 0.0).unwrap(), 21.0);
        assert_eq!(evaluate("5 − 2", 0.0).unwrap(), 3.0);
    }

    #[test]
    fn test_rejects_foreign_characters() {
        let err = evaluate("x + alert(1)", 1.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("Unsupported character 'a'"));
        assert!(evaluate("x; 1", 1.0).is_err());
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(evaluate("", 1.0).is_err());
        assert!(evaluate("2 +", 1.0).is_err());
        assert!(evaluate("(2 + 3", 1.0).is_err());
        assert!(evaluate("2 + 3)", 1.0).is_err());
        assert!(evaluate("1.2.3", 1.0).is_err());
        assert!(evaluate("* 2", 1.0).is_err());
    }

    #[test]
    fn test_undefined_results() {
        let err = evaluate("1 / (x - 2)", 2.0).unwrap_err();
        assert_eq!(err.error_code(), "UNDEFINED");
        assert!(evaluate("(0 - 8) ^ 0.5", 0.0).is_err());
    }

    #[test]
    fn test_nesting_limit() {
        let nested = format!("{}x{}", "(".repeat(100), ")".repeat(100));
        assert_eq!(evaluate(&nested, 2.0).unwrap(), 2.0);

        let too_deep = format!("{}1{}", "(".repeat(1000), ")".repeat(1000));
        let err = evaluate(&too_deep, 0.0).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        assert!(err.to_string().contains("nested too deeply"));

        assert!(evaluate(&format!("{}1", "-".repeat(1000)), 0.0).is_err());
        assert!(evaluate(&format!("2{}", "^2".repeat(1000)), 0.0).is_err());
    }
}
