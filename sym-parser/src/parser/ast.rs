//! The abstract syntax tree produced by the parser.
//!
//! Every node records the region of the source code it was parsed from, so that errors found
//! while working with the tree can point back into the source.

use super::op::{BinOp, UnaryOp};
use std::ops::Range;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The names of the built-in constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ConstKind {
    Pi,
    E,
    I,
}

impl ConstKind {
    /// Returns the constant with the given name, if it is reserved.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "pi" => Some(Self::Pi),
            "e" => Some(Self::E),
            "i" => Some(Self::I),
            _ => None,
        }
    }
}

/// A number literal, such as `2` or `3.14`. Integers and floating-point numbers are both
/// represented here as `f64`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitNum {
    /// The value of the number literal.
    pub value: f64,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A symbol literal, such as `x` or `velocity`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitSym {
    /// The name of the symbol.
    pub name: String,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A reserved constant, such as `pi` or `e`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LitConst {
    /// Which constant this is.
    pub kind: ConstKind,

    /// The region of the source code that this literal was parsed from.
    pub span: Range<usize>,
}

/// A literal: a number, a free symbol, or a reserved constant.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Literal {
    Number(LitNum),
    Symbol(LitSym),
    Constant(LitConst),
}

impl Literal {
    /// Returns the span of the literal.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Number(num) => num.span.clone(),
            Self::Symbol(sym) => sym.span.clone(),
            Self::Constant(constant) => constant.span.clone(),
        }
    }
}

/// A parenthesized expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Paren {
    /// The expression inside the parentheses.
    pub inner: Box<Expr>,

    /// The region of the source code of this expression, including the parentheses.
    pub span: Range<usize>,
}

/// A unary expression, such as `-x`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Unary {
    /// The operator of the unary expression.
    pub op: UnaryOp,

    /// The operand of the unary expression.
    pub operand: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

/// A binary expression, such as `1 + 2`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Binary {
    /// The left-hand side of the binary expression.
    pub lhs: Box<Expr>,

    /// The operator of the binary expression.
    pub op: BinOp,

    /// The right-hand side of the binary expression.
    pub rhs: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

/// A function call, such as `sin(x)` or `f(x, y)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The name of the function.
    pub name: LitSym,

    /// The arguments of the call.
    pub args: Vec<Expr>,

    /// The region of the source code that this call was parsed from.
    pub span: Range<usize>,

    /// The region of the source code of the parentheses around the arguments.
    pub paren_span: Range<usize>,
}

/// A derivative written in Leibniz notation, such as `d/dx(x^2)`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Derivative {
    /// The variable to differentiate with respect to.
    pub var: LitSym,

    /// The expression to differentiate.
    pub body: Box<Expr>,

    /// The region of the source code that this expression was parsed from.
    pub span: Range<usize>,
}

/// Any expression.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// A literal value.
    Literal(Literal),

    /// A parenthesized expression.
    Paren(Paren),

    /// A unary expression.
    Unary(Unary),

    /// A binary expression.
    Binary(Binary),

    /// A function call.
    Call(Call),

    /// A derivative.
    Derivative(Derivative),
}

impl Expr {
    /// Returns the span of the expression.
    pub fn span(&self) -> Range<usize> {
        match self {
            Self::Literal(literal) => literal.span(),
            Self::Paren(paren) => paren.span.clone(),
            Self::Unary(unary) => unary.span.clone(),
            Self::Binary(binary) => binary.span.clone(),
            Self::Call(call) => call.span.clone(),
            Self::Derivative(derivative) => derivative.span.clone(),
        }
    }

    /// If the expression is a parenthesized expression, returns the innermost expression within,
    /// recursively unwrapping nested parentheses.
    pub fn innermost(&self) -> &Expr {
        match self {
            Self::Paren(paren) => paren.inner.innermost(),
            expr => expr,
        }
    }
}
