//! The term representation the rewrite engine manipulates.
//!
//! The [`Expr`](sym_parser::parser::ast::Expr) type from `sym_parser` is convenient for parsing,
//! but awkward for algebraic manipulation: it drags source spans around, keeps parentheses as
//! nodes, and distinguishes calls from operators. This module defines a separate [`Expr`], the
//! *term* type that the whole engine works on.
//!
//! A term is a finite tree. Atoms are numbers, named constants, free symbols, built-in function
//! tags, and pattern placeholders; the only interior node is [`Op`], a binary operator. Unary
//! operators such as [`OpKind::Negative`] store their operand on the left and [`Expr::Empty`] on
//! the right. A function application `sin(x)` is `Op { Function, Func(Sin), x }`, so that the
//! function being applied is itself a subterm a rewrite rule can match against.
//!
//! # Structural identity
//!
//! [`Expr`] implements a *total* structural order, and its `==` is defined as that order
//! reporting equality. The order is lexicographic: first on the variant, then on the payload,
//! recursing through operator nodes. Numeric values are compared with [`f64::total_cmp`] (the
//! engine never produces NaN; numeric folding routes anything non-finite to
//! [`Constant::Undefined`]).
//!
//! Everything downstream leans on this order: the rewrite cache, the search's closed set, and
//! its traceback map are all keyed by it, and neighbor sets iterate in it, which is what makes
//! two runs of the simplifier on the same input produce the same trace.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use sym_parser::parser::{ast, op::{BinOpKind, UnaryOpKind}};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A pattern variable, one of the letters `a` through `z`. Placeholders only appear inside
/// rewrite-rule templates; a term built by the parser or by substitution never contains one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Placeholder(u8);

impl Placeholder {
    /// Creates the placeholder for the given lowercase letter. Returns [`None`] for any other
    /// character.
    pub fn from_letter(letter: char) -> Option<Self> {
        letter.is_ascii_lowercase().then(|| Self(letter as u8 - b'a'))
    }

    /// The letter this placeholder is written as.
    pub fn letter(self) -> char {
        (b'a' + self.0) as char
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Common constant and transcendental values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Constant {
    /// The result of an undefined operation, such as division by zero. Prints as `N/A`.
    Undefined,
    Pi,
    E,
    I,
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "N/A"),
            Self::Pi => write!(f, "pi"),
            Self::E => write!(f, "e"),
            Self::I => write!(f, "i"),
        }
    }
}

/// The identity of a built-in function, used as the left child of an [`OpKind::Function`] node.
///
/// [`Func::Ln`] is never produced by the parser (`ln(x)` desugars to `log(x, e)` at parse time),
/// but it remains part of the term language so rules and callers can still name it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Func {
    Exp,
    Ln,
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exp => write!(f, "exp"),
            Self::Ln => write!(f, "ln"),
            Self::Sin => write!(f, "sin"),
            Self::Cos => write!(f, "cos"),
            Self::Tan => write!(f, "tan"),
            Self::Sec => write!(f, "sec"),
            Self::Csc => write!(f, "csc"),
            Self::Cot => write!(f, "cot"),
        }
    }
}

/// The operation performed by an [`Op`] node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OpKind {
    /// Function application: the left child is the function (a [`Func`] tag, a symbol, or a
    /// placeholder), the right child is the argument.
    Function,

    /// An argument tuple for multi-argument function application.
    Comma,

    /// Equality, used to write rewrite rules.
    Equality,

    /// `lhs + rhs`
    Sum,

    /// `lhs - rhs`
    Difference,

    /// `-lhs` (unary)
    Negative,

    /// `lhs * rhs`
    Product,

    /// `lhs / rhs`
    Quotient,

    /// `1/lhs` (unary)
    Reciprocal,

    /// `lhs` raised to the power of `rhs`
    Exponent,

    /// Logarithm of `lhs` using base `rhs`.
    Logarithm,

    /// Derivative of `rhs` with respect to the variable `lhs`.
    Derivative,

    /// Integral of `lhs` with respect to `rhs`.
    Integral,

    /// Differential of `lhs` for integration.
    Differential,
}

/// A binary or unary operator node. Unary operators store their operand in `lhs` and
/// [`Expr::Empty`] in `rhs`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Op {
    /// The operation this node performs.
    pub kind: OpKind,

    /// The left operand.
    pub lhs: Box<Expr>,

    /// The right operand, or [`Expr::Empty`] for unary operators.
    pub rhs: Box<Expr>,
}

/// A term of the algebra: an atom, or an operator node owning both children.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Expr {
    /// The absent operand of a unary operator. Only ever appears as the `rhs` of an [`Op`].
    Empty,

    /// An operator node.
    Op(Op),

    /// A built-in function identity.
    Func(Func),

    /// A named constant.
    Constant(Constant),

    /// A numeric literal.
    Value(f64),

    /// A free variable.
    Symbol(String),

    /// A pattern variable. Only appears inside rule templates.
    Placeholder(Placeholder),
}

impl Expr {
    /// Builds a binary operator node.
    pub fn binary(kind: OpKind, lhs: Expr, rhs: Expr) -> Self {
        Self::Op(Op {
            kind,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        })
    }

    /// Builds a unary operator node, with [`Expr::Empty`] as the right operand.
    pub fn unary(kind: OpKind, operand: Expr) -> Self {
        Self::binary(kind, operand, Self::Empty)
    }

    /// Builds the application of a built-in function to an argument.
    pub fn apply(func: Func, argument: Expr) -> Self {
        Self::binary(OpKind::Function, Self::Func(func), argument)
    }

    /// If the expression is a numeric literal, returns its value.
    pub fn as_value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }

    /// If the expression is a free symbol, returns its name.
    pub fn as_symbol(&self) -> Option<&str> {
        match self {
            Self::Symbol(name) => Some(name),
            _ => None,
        }
    }

    /// Returns the total number of operator nodes in the expression. This is the quantity the
    /// simplifier minimizes.
    pub fn op_count(&self) -> usize {
        match self {
            Self::Op(op) => 1 + op.lhs.op_count() + op.rhs.op_count(),
            _ => 0,
        }
    }

    /// Returns the set of unique placeholders appearing in the expression.
    pub fn placeholders(&self) -> BTreeSet<Placeholder> {
        fn collect(expr: &Expr, set: &mut BTreeSet<Placeholder>) {
            match expr {
                Expr::Op(op) => {
                    collect(&op.lhs, set);
                    collect(&op.rhs, set);
                },
                Expr::Placeholder(placeholder) => {
                    set.insert(*placeholder);
                },
                _ => {},
            }
        }

        let mut set = BTreeSet::new();
        collect(self, &mut set);
        set
    }

    /// The position of the variant in the structural order, compared before any payload.
    fn tag(&self) -> u8 {
        match self {
            Self::Empty => 0,
            Self::Op(_) => 1,
            Self::Func(_) => 2,
            Self::Constant(_) => 3,
            Self::Value(_) => 4,
            Self::Symbol(_) => 5,
            Self::Placeholder(_) => 6,
        }
    }
}

/// The total structural order described in the [module-level documentation](self).
impl Ord for Expr {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Empty, Self::Empty) => Ordering::Equal,
            (Self::Op(lhs), Self::Op(rhs)) => lhs.kind.cmp(&rhs.kind)
                .then_with(|| lhs.lhs.cmp(&rhs.lhs))
                .then_with(|| lhs.rhs.cmp(&rhs.rhs)),
            (Self::Func(lhs), Self::Func(rhs)) => lhs.cmp(rhs),
            (Self::Constant(lhs), Self::Constant(rhs)) => lhs.cmp(rhs),
            (Self::Value(lhs), Self::Value(rhs)) => lhs.total_cmp(rhs),
            (Self::Symbol(lhs), Self::Symbol(rhs)) => lhs.cmp(rhs),
            (Self::Placeholder(lhs), Self::Placeholder(rhs)) => lhs.cmp(rhs),
            (lhs, rhs) => lhs.tag().cmp(&rhs.tag()),
        }
    }
}

impl PartialOrd for Expr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Expr {}

/// Prints the term in the surface syntax the parser accepts. Binary operators are always
/// parenthesized, so the output never depends on precedence.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Op(op) => match op.kind {
                OpKind::Function => write!(f, "{}({})", op.lhs, op.rhs),
                OpKind::Comma => write!(f, "{}, {}", op.lhs, op.rhs),
                OpKind::Equality => write!(f, "{} = {}", op.lhs, op.rhs),
                OpKind::Sum => write!(f, "({} + {})", op.lhs, op.rhs),
                OpKind::Difference => write!(f, "({} - {})", op.lhs, op.rhs),
                OpKind::Negative => write!(f, "(-{})", op.lhs),
                OpKind::Product => write!(f, "({} * {})", op.lhs, op.rhs),
                OpKind::Quotient => write!(f, "({} / {})", op.lhs, op.rhs),
                OpKind::Reciprocal => write!(f, "(1/{})", op.lhs),
                OpKind::Exponent => write!(f, "({} ^ {})", op.lhs, op.rhs),
                OpKind::Logarithm => write!(f, "log({}, {})", op.lhs, op.rhs),
                OpKind::Derivative => write!(f, "d/d{}({})", op.lhs, op.rhs),
                OpKind::Integral => write!(f, "int({}, {})", op.lhs, op.rhs),
                OpKind::Differential => write!(f, "d{}", op.lhs),
            },
            Self::Func(func) => write!(f, "{}", func),
            Self::Constant(constant) => write!(f, "{}", constant),
            Self::Value(value) => write!(f, "{}", value),
            Self::Symbol(name) => write!(f, "{}", name),
            Self::Placeholder(placeholder) => write!(f, "{}", placeholder),
        }
    }
}

impl From<ast::Expr> for Expr {
    fn from(expr: ast::Expr) -> Self {
        match expr {
            ast::Expr::Literal(literal) => match literal {
                ast::Literal::Number(num) => Self::Value(num.value),
                ast::Literal::Symbol(sym) => Self::Symbol(sym.name),
                ast::Literal::Constant(constant) => Self::Constant(match constant.kind {
                    ast::ConstKind::Pi => Constant::Pi,
                    ast::ConstKind::E => Constant::E,
                    ast::ConstKind::I => Constant::I,
                }),
            },
            ast::Expr::Paren(paren) => Self::from(*paren.inner),
            ast::Expr::Unary(unary) => match unary.op.kind {
                UnaryOpKind::Neg => Self::unary(OpKind::Negative, Self::from(*unary.operand)),
            },
            ast::Expr::Binary(binary) => {
                let kind = match binary.op.kind {
                    BinOpKind::Exp => OpKind::Exponent,
                    BinOpKind::Mul => OpKind::Product,
                    BinOpKind::Div => OpKind::Quotient,
                    BinOpKind::Add => OpKind::Sum,
                    BinOpKind::Sub => OpKind::Difference,
                    BinOpKind::Eq => OpKind::Equality,
                    BinOpKind::Comma => OpKind::Comma,
                };
                Self::binary(kind, Self::from(*binary.lhs), Self::from(*binary.rhs))
            },
            ast::Expr::Call(call) => Self::from_call(call),
            ast::Expr::Derivative(derivative) => Self::binary(
                OpKind::Derivative,
                Self::Symbol(derivative.var.name),
                Self::from(*derivative.body),
            ),
        }
    }
}

impl Expr {
    /// Converts a function call from the AST. Built-in functions become their dedicated term
    /// forms; anything else becomes a generic function application with its arguments folded
    /// into a comma tuple.
    fn from_call(call: ast::Call) -> Self {
        // the parser has already checked the arity of built-in functions
        let mut args: Vec<Expr> = call.args.into_iter().map(Self::from).collect();

        match call.name.name.as_str() {
            "exp" => Self::apply(Func::Exp, args.remove(0)),
            // `ln(x)` is sugar for `log(x, e)`
            "ln" => Self::binary(OpKind::Logarithm, args.remove(0), Self::Constant(Constant::E)),
            "log" => {
                let base = args.pop().expect("parser enforces arity of `log`");
                Self::binary(OpKind::Logarithm, args.remove(0), base)
            },
            "sin" => Self::apply(Func::Sin, args.remove(0)),
            "cos" => Self::apply(Func::Cos, args.remove(0)),
            "tan" => Self::apply(Func::Tan, args.remove(0)),
            "sec" => Self::apply(Func::Sec, args.remove(0)),
            "csc" => Self::apply(Func::Csc, args.remove(0)),
            "cot" => Self::apply(Func::Cot, args.remove(0)),
            name => {
                let name = Self::Symbol(name.to_string());
                let mut tuple = args.pop().expect("calls have at least one argument");
                while let Some(arg) = args.pop() {
                    tuple = Self::binary(OpKind::Comma, arg, tuple);
                }
                Self::binary(OpKind::Function, name, tuple)
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    /// Parse the given expression and return the [`Expr`] representation.
    fn parse_expr(input: &str) -> Expr {
        let ast = sym_parser::Parser::new(input)
            .try_parse_full::<ast::Expr>()
            .unwrap();
        Expr::from(ast)
    }

    #[test]
    fn conversion() {
        assert_eq!(parse_expr("x + 0"), Expr::binary(
            OpKind::Sum,
            Expr::Symbol("x".to_string()),
            Expr::Value(0.0),
        ));

        assert_eq!(parse_expr("-x"), Expr::unary(
            OpKind::Negative,
            Expr::Symbol("x".to_string()),
        ));

        assert_eq!(parse_expr("sin(x)"), Expr::apply(
            Func::Sin,
            Expr::Symbol("x".to_string()),
        ));
    }

    #[test]
    fn ln_desugars_to_log() {
        assert_eq!(parse_expr("ln(x)"), Expr::binary(
            OpKind::Logarithm,
            Expr::Symbol("x".to_string()),
            Expr::Constant(Constant::E),
        ));
    }

    #[test]
    fn derivative_conversion() {
        assert_eq!(parse_expr("d/dx(x^2)"), Expr::binary(
            OpKind::Derivative,
            Expr::Symbol("x".to_string()),
            Expr::binary(
                OpKind::Exponent,
                Expr::Symbol("x".to_string()),
                Expr::Value(2.0),
            ),
        ));
    }

    #[test]
    fn generic_calls_fold_into_tuples() {
        assert_eq!(parse_expr("f(x, y, z)"), Expr::binary(
            OpKind::Function,
            Expr::Symbol("f".to_string()),
            Expr::binary(
                OpKind::Comma,
                Expr::Symbol("x".to_string()),
                Expr::binary(
                    OpKind::Comma,
                    Expr::Symbol("y".to_string()),
                    Expr::Symbol("z".to_string()),
                ),
            ),
        ));
    }

    #[test]
    fn op_count() {
        assert_eq!(parse_expr("x").op_count(), 0);
        assert_eq!(parse_expr("x + 0").op_count(), 1);
        assert_eq!(parse_expr("x * 1 + 0 * y").op_count(), 3);
        assert_eq!(parse_expr("sin(x)^2 + cos(x)^2").op_count(), 5);
        assert_eq!(parse_expr("-x").op_count(), 1);
    }

    #[test]
    fn structural_order_is_total() {
        let mut exprs = vec![
            parse_expr("x + y"),
            parse_expr("y"),
            parse_expr("2"),
            parse_expr("pi"),
            parse_expr("x * y"),
            Expr::Empty,
        ];
        exprs.sort();

        // variant tags order before payloads: Empty < Op < Constant < Value < Symbol
        assert_eq!(exprs[0], Expr::Empty);
        assert!(matches!(exprs[1], Expr::Op(_)));
        assert!(matches!(exprs[2], Expr::Op(_)));
        assert_eq!(exprs[3], Expr::Constant(Constant::Pi));
        assert_eq!(exprs[4], Expr::Value(2.0));
        assert_eq!(exprs[5], Expr::Symbol("y".to_string()));
    }

    #[test]
    fn equality_follows_the_order() {
        assert_eq!(parse_expr("x + y"), parse_expr("x + y"));
        assert_ne!(parse_expr("x + y"), parse_expr("y + x"));
        assert_eq!(Expr::Value(1.0), Expr::Value(1.0));
        assert_ne!(Expr::Value(1.0), Expr::Value(2.0));
    }

    #[test]
    fn placeholders_of_a_closed_term_are_empty() {
        assert!(parse_expr("sin(x)^2 + cos(x)^2").placeholders().is_empty());
    }

    #[test]
    fn printed_form() {
        assert_eq!(parse_expr("x + 0").to_string(), "(x + 0)");
        assert_eq!(parse_expr("3x").to_string(), "(3 * x)");
        assert_eq!(parse_expr("-x").to_string(), "(-x)");
        assert_eq!(parse_expr("sin(x)").to_string(), "sin(x)");
        assert_eq!(parse_expr("log(x, b)").to_string(), "log(x, b)");
        assert_eq!(parse_expr("ln(x)").to_string(), "log(x, e)");
        assert_eq!(parse_expr("d/dx(x^2)").to_string(), "d/dx((x ^ 2))");
        assert_eq!(Expr::Constant(Constant::Undefined).to_string(), "N/A");
        assert_eq!(Expr::Value(2.5).to_string(), "2.5");
        assert_eq!(Expr::Value(5.0).to_string(), "5");
    }
}
