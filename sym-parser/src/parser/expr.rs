//! The expression grammar: precedence climbing over the unary and primary parsers.
//!
//! Implicit multiplication is treated as an invisible operator at the same precedence as `*`. It
//! is only inserted when a number literal or a reserved constant is directly followed by the
//! start of another operand, so `3x` is `3 * x` while `3 - x` stays a subtraction and `x y` is
//! rejected.

use super::{
    ast::{Binary, Call, ConstKind, Derivative, Expr, LitConst, LitNum, LitSym, Literal, Paren, Unary},
    error::{kind, Error},
    op::{Associativity, BinOp, BinOpKind, Precedence, UnaryOp, UnaryOpKind},
    Parse,
    Parser,
};
use crate::tokenizer::TokenKind;

/// The built-in functions that take exactly one argument.
const UNARY_FUNCTIONS: [&str; 8] = ["exp", "ln", "sin", "cos", "tan", "sec", "csc", "cot"];

/// Returns the name and arity of the given built-in function, or [`None`] if the name is not
/// reserved.
fn builtin_arity(name: &str) -> Option<(&'static str, usize)> {
    if name == "log" {
        Some(("log", 2))
    } else {
        UNARY_FUNCTIONS.iter()
            .find(|func| **func == name)
            .map(|func| (*func, 1))
    }
}

/// Returns true if the given token kind can begin an operand.
fn starts_operand(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Name | TokenKind::Int | TokenKind::Float | TokenKind::OpenParen,
    )
}

/// Returns true if the expression can act as the left-hand side of an implicit multiplication,
/// i.e. its final token is a number literal or a reserved constant.
fn implicit_head(expr: &Expr) -> bool {
    match expr {
        Expr::Literal(Literal::Number(_) | Literal::Constant(_)) => true,
        Expr::Binary(binary) => implicit_head(&binary.rhs),
        Expr::Unary(unary) => implicit_head(&unary.operand),
        _ => false,
    }
}

/// Parses an expression, consuming operators whose precedence is at least `min`.
fn parse_expr_prec(input: &mut Parser, min: Precedence) -> Result<Expr, Error> {
    let mut lhs = parse_unary_or_lower(input)?;

    loop {
        let Some((token_kind, token_span)) = input.peek_token()
            .map(|token| (token.kind, token.span.clone()))
        else {
            break;
        };

        if let Some(op_kind) = BinOpKind::from_token(token_kind) {
            if op_kind.precedence() < min {
                break;
            }
            input.next_token()?;

            // a right-associative operator may consume another operator of the same precedence
            // on its right-hand side; a left-associative operator may not
            let rhs_min = match op_kind.associativity() {
                Associativity::Right => op_kind.precedence(),
                Associativity::Left => op_kind.precedence().next(),
            };
            let rhs = parse_expr_prec(input, rhs_min)?;

            let span = lhs.span().start..rhs.span().end;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op: BinOp { kind: op_kind, implicit: false, span: token_span },
                rhs: Box::new(rhs),
                span,
            });
        } else if starts_operand(token_kind)
            && Precedence::Factor >= min
            && implicit_head(&lhs)
        {
            let rhs = parse_expr_prec(input, Precedence::Factor.next())?;

            let span = lhs.span().start..rhs.span().end;
            let op_span = lhs.span().end..rhs.span().start;
            lhs = Expr::Binary(Binary {
                lhs: Box::new(lhs),
                op: BinOp { kind: BinOpKind::Mul, implicit: true, span: op_span },
                rhs: Box::new(rhs),
                span,
            });
        } else {
            break;
        }
    }

    Ok(lhs)
}

/// Parses a unary expression, or any expression that binds tighter.
fn parse_unary_or_lower(input: &mut Parser) -> Result<Expr, Error> {
    if input.peek_token().map(|token| token.kind) == Some(TokenKind::Sub) {
        let op_token = input.next_token()?;
        let operand = parse_unary_or_lower(input)?;
        let span = op_token.span.start..operand.span().end;
        return Ok(Expr::Unary(Unary {
            op: UnaryOp { kind: UnaryOpKind::Neg, span: op_token.span },
            operand: Box::new(operand),
            span,
        }));
    }

    parse_primary(input)
}

/// Parses a primary expression: a literal, a parenthesized expression, a function call, or a
/// derivative.
fn parse_primary(input: &mut Parser) -> Result<Expr, Error> {
    let token = input.next_token()?;

    match token.kind {
        TokenKind::Int | TokenKind::Float => Ok(Expr::Literal(Literal::Number(LitNum {
            // the tokenizer only accepts lexemes `f64` can parse
            value: token.lexeme.parse().unwrap(),
            span: token.span,
        }))),
        TokenKind::Name => {
            if let Some(const_kind) = ConstKind::from_name(token.lexeme) {
                return Ok(Expr::Literal(Literal::Constant(LitConst {
                    kind: const_kind,
                    span: token.span,
                })));
            }

            if token.lexeme == "d" && derivative_ahead(input) {
                return parse_derivative(input, token.span);
            }

            if input.peek_token().map(|next| next.kind) == Some(TokenKind::OpenParen) {
                return parse_call(input, LitSym {
                    name: token.lexeme.to_string(),
                    span: token.span,
                });
            }

            Ok(Expr::Literal(Literal::Symbol(LitSym {
                name: token.lexeme.to_string(),
                span: token.span,
            })))
        },
        TokenKind::OpenParen => {
            if input.peek_token().map(|next| next.kind) == Some(TokenKind::CloseParen) {
                let close = input.next_token()?;
                return Err(Error::new(
                    vec![token.span.start..close.span.end],
                    kind::EmptyParenthesis,
                ));
            }

            let inner = parse_expr_prec(input, Precedence::Comma)?;
            match input.next_token() {
                Ok(next) if next.kind == TokenKind::CloseParen => Ok(Expr::Paren(Paren {
                    inner: Box::new(inner),
                    span: token.span.start..next.span.end,
                })),
                Ok(next) => Err(Error::new(vec![next.span], kind::UnexpectedToken {
                    expected: &[TokenKind::CloseParen],
                    found: next.kind,
                })),
                Err(_) => Err(Error::new(vec![token.span], kind::UnclosedParenthesis {
                    opening: true,
                })),
            }
        },
        TokenKind::Unknown => Err(Error::new(vec![token.span], kind::InvalidCharacter)),
        _ => Err(Error::new(vec![token.span], kind::UnexpectedToken {
            expected: &[
                TokenKind::Int,
                TokenKind::Float,
                TokenKind::Name,
                TokenKind::OpenParen,
                TokenKind::Sub,
            ],
            found: token.kind,
        })),
    }
}

/// After consuming a `d` name token, returns true if the following tokens spell out the rest of
/// a Leibniz derivative: `/`, a name beginning with `d` with at least one more character, and an
/// opening parenthesis.
fn derivative_ahead(input: &Parser) -> bool {
    let Some(div) = input.peek_token() else { return false };
    let Some(dvar) = input.peek_token_nth(1) else { return false };
    let Some(open) = input.peek_token_nth(2) else { return false };

    div.kind == TokenKind::Div
        && dvar.kind == TokenKind::Name
        && dvar.lexeme.len() > 1
        && dvar.lexeme.starts_with('d')
        && open.kind == TokenKind::OpenParen
}

/// Parses the remainder of a derivative, after the `d` name token has been consumed and
/// [`derivative_ahead`] has confirmed the form.
fn parse_derivative(input: &mut Parser, d_span: std::ops::Range<usize>) -> Result<Expr, Error> {
    input.next_token()?; // `/`
    let dvar = input.next_token()?;
    let open = input.next_token()?; // `(`

    let body = parse_expr_prec(input, Precedence::Comma)?;
    match input.next_token() {
        Ok(next) if next.kind == TokenKind::CloseParen => Ok(Expr::Derivative(Derivative {
            var: LitSym {
                name: dvar.lexeme[1..].to_string(),
                span: dvar.span.start + 1..dvar.span.end,
            },
            body: Box::new(body),
            span: d_span.start..next.span.end,
        })),
        Ok(next) => Err(Error::new(vec![next.span], kind::UnexpectedToken {
            expected: &[TokenKind::CloseParen],
            found: next.kind,
        })),
        Err(_) => Err(Error::new(vec![open.span], kind::UnclosedParenthesis {
            opening: true,
        })),
    }
}

/// Parses the argument list of a function call, after the name has been consumed, and checks the
/// arity of built-in functions.
fn parse_call(input: &mut Parser, name: LitSym) -> Result<Expr, Error> {
    let open = input.next_token()?; // `(`

    if input.peek_token().map(|next| next.kind) == Some(TokenKind::CloseParen) {
        let close = input.next_token()?;
        return Err(Error::new(
            vec![open.span.start..close.span.end],
            kind::EmptyParenthesis,
        ));
    }

    let mut args = Vec::new();
    let close_span = loop {
        // individual arguments bind tighter than the commas that separate them
        args.push(parse_expr_prec(input, Precedence::Eq)?);

        match input.next_token() {
            Ok(next) if next.kind == TokenKind::Comma => continue,
            Ok(next) if next.kind == TokenKind::CloseParen => break next.span,
            Ok(next) => return Err(Error::new(vec![next.span], kind::UnexpectedToken {
                expected: &[TokenKind::Comma, TokenKind::CloseParen],
                found: next.kind,
            })),
            Err(_) => return Err(Error::new(vec![open.span], kind::UnclosedParenthesis {
                opening: true,
            })),
        }
    };

    let span = name.span.start..close_span.end;
    if let Some((builtin, expected)) = builtin_arity(&name.name) {
        if args.len() != expected {
            return Err(Error::new(vec![span], kind::WrongArity {
                name: builtin,
                expected,
                given: args.len(),
            }));
        }
    }

    Ok(Expr::Call(Call {
        name,
        args,
        span,
        paren_span: open.span.start..close_span.end,
    }))
}

impl Parse for Expr {
    fn parse(input: &mut Parser) -> Result<Self, Error> {
        parse_expr_prec(input, Precedence::Comma)
    }
}
