//! Arithmetic expression evaluator.
//!
//! Pipeline: sanitize → tokenize → parse (recursive descent) → evaluate.
//!
//! Only `number | + | - | * | / | ( | )` survive sanitization; everything else
//! (spaces included) is dropped before tokenizing. The grammar, lowest
//! precedence first:
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/') unary)*
//! unary   := ('+' | '-') unary | primary
//! primary := NUMBER | '(' expr ')'
//! ```
//!
//! Binary operators are left-associative. Division by zero is an explicit
//! [`EvaluationError::DivideByZero`] rather than an IEEE infinity.

use crate::model::{EvaluationError, Operator};

/// Parsed arithmetic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Numeric literal.
    Number(f64),
    /// Unary minus.
    Negate(Box<Expr>),
    /// Left-associative binary operation.
    BinaryOp {
        /// Operator applied to the operands.
        op: Operator,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Token {
    Number(f64),
    Op(Operator),
    LParen,
    RParen,
}

/// Evaluate `expression` and render the result as its canonical decimal string.
///
/// # Errors
///
/// Returns an [`EvaluationError`] for empty, malformed or unbalanced input,
/// for division by zero, and for results that overflow `f64`.
pub fn evaluate(expression: &str) -> Result<String, EvaluationError> {
    evaluate_value(expression).map(format_number)
}

/// Evaluate `expression` to a finite `f64`.
pub fn evaluate_value(expression: &str) -> Result<f64, EvaluationError> {
    let expr = parse(expression)?;
    eval(&expr)
}

/// Keep only digits, `.`, `+ - * /` and parentheses.
pub fn sanitize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '*' | '/' | '(' | ')' | '.'))
        .collect()
}

/// Sanitize and parse `input` into an expression tree.
pub fn parse(input: &str) -> Result<Expr, EvaluationError> {
    let sanitized = sanitize(input);
    let tokens = tokenize(&sanitized)?;
    if tokens.is_empty() {
        return Err(EvaluationError::Empty);
    }
    check_balance(&tokens)?;

    let (expr, pos) = parse_add_sub(&tokens, 0)?;
    if pos < tokens.len() {
        return Err(EvaluationError::malformed(format!(
            "unexpected {} after complete expression",
            describe(&tokens[pos])
        )));
    }
    Ok(expr)
}

/// Walk the tree and compute its value.
pub fn eval(expr: &Expr) -> Result<f64, EvaluationError> {
    let value = match expr {
        Expr::Number(n) => *n,
        Expr::Negate(inner) => -eval(inner)?,
        Expr::BinaryOp { op, left, right } => {
            let l = eval(left)?;
            let r = eval(right)?;
            match op {
                Operator::Add => l + r,
                Operator::Subtract => l - r,
                Operator::Multiply => l * r,
                Operator::Divide => {
                    if r == 0.0 {
                        return Err(EvaluationError::DivideByZero);
                    }
                    l / r
                }
            }
        }
    };

    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvaluationError::Overflow)
    }
}

/// Render a finite value the way the display shows it.
///
/// Integral values have no fractional part (`5`, not `5.0`); negative zero
/// renders as `0`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    value.to_string()
}

fn tokenize(input: &str) -> Result<Vec<Token>, EvaluationError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        match c {
            '0'..='9' | '.' => {
                let mut end = start;
                while let Some(&(i, d)) = chars.peek() {
                    if d.is_ascii_digit() || d == '.' {
                        end = i + d.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                let literal = &input[start..end];
                if literal.matches('.').count() > 1 {
                    return Err(EvaluationError::malformed(format!(
                        "invalid number '{literal}'"
                    )));
                }
                let value = literal.parse::<f64>().map_err(|_| {
                    EvaluationError::malformed(format!("invalid number '{literal}'"))
                })?;
                tokens.push(Token::Number(value));
            }
            '(' => {
                tokens.push(Token::LParen);
                chars.next();
            }
            ')' => {
                tokens.push(Token::RParen);
                chars.next();
            }
            other => {
                // Sanitization leaves only operator symbols here.
                let op = Operator::from_symbol(other).ok_or_else(|| {
                    EvaluationError::malformed(format!("unexpected character '{other}'"))
                })?;
                tokens.push(Token::Op(op));
                chars.next();
            }
        }
    }

    Ok(tokens)
}

fn check_balance(tokens: &[Token]) -> Result<(), EvaluationError> {
    let mut depth: usize = 0;
    for token in tokens {
        match token {
            Token::LParen => depth += 1,
            Token::RParen => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(EvaluationError::UnbalancedParentheses)?;
            }
            _ => {}
        }
    }
    if depth == 0 {
        Ok(())
    } else {
        Err(EvaluationError::UnbalancedParentheses)
    }
}

// Lowest precedence: addition and subtraction
fn parse_add_sub(tokens: &[Token], pos: usize) -> Result<(Expr, usize), EvaluationError> {
    let (mut left, mut pos) = parse_mul_div(tokens, pos)?;

    while let Some(Token::Op(op @ (Operator::Add | Operator::Subtract))) = tokens.get(pos) {
        let (right, new_pos) = parse_mul_div(tokens, pos + 1)?;
        left = Expr::BinaryOp {
            op: *op,
            left: Box::new(left),
            right: Box::new(right),
        };
        pos = new_pos;
    }

    Ok((left, pos))
}

fn parse_mul_div(tokens: &[Token], pos: usize) -> Result<(Expr, usize), EvaluationError> {
    let (mut left, mut pos) = parse_unary(tokens, pos)?;

    while let Some(Token::Op(op @ (Operator::Multiply | Operator::Divide))) = tokens.get(pos) {
        let (right, new_pos) = parse_unary(tokens, pos + 1)?;
        left = Expr::BinaryOp {
            op: *op,
            left: Box::new(left),
            right: Box::new(right),
        };
        pos = new_pos;
    }

    Ok((left, pos))
}

// Prefix sign, binds tighter than * and /
fn parse_unary(tokens: &[Token], pos: usize) -> Result<(Expr, usize), EvaluationError> {
    match tokens.get(pos) {
        Some(Token::Op(Operator::Subtract)) => {
            let (inner, new_pos) = parse_unary(tokens, pos + 1)?;
            Ok((Expr::Negate(Box::new(inner)), new_pos))
        }
        Some(Token::Op(Operator::Add)) => parse_unary(tokens, pos + 1),
        _ => parse_primary(tokens, pos),
    }
}

fn parse_primary(tokens: &[Token], pos: usize) -> Result<(Expr, usize), EvaluationError> {
    match tokens.get(pos) {
        None => Err(EvaluationError::malformed("unexpected end of expression")),
        Some(Token::Number(n)) => Ok((Expr::Number(*n), pos + 1)),
        Some(Token::LParen) => {
            let (inner, new_pos) = parse_add_sub(tokens, pos + 1)?;
            match tokens.get(new_pos) {
                Some(Token::RParen) => Ok((inner, new_pos + 1)),
                Some(other) => Err(EvaluationError::malformed(format!(
                    "expected ')' but found {}",
                    describe(other)
                ))),
                None => Err(EvaluationError::UnbalancedParentheses),
            }
        }
        Some(other) => Err(EvaluationError::malformed(format!(
            "expected a number but found {}",
            describe(other)
        ))),
    }
}

fn describe(token: &Token) -> String {
    match token {
        Token::Number(n) => format!("number {}", format_number(*n)),
        Token::Op(op) => format!("operator '{op}'"),
        Token::LParen => "'('".to_string(),
        Token::RParen => "')'".to_string(),
    }
}
