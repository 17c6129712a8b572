//! The bundled rule catalog.
//!
//! Rules are written as equalities in the same surface syntax the parser accepts, and are
//! parsed once, on first use. Within a rule, every symbol whose name is a single lowercase
//! letter is converted into the corresponding [`Placeholder`], so `x + 0 = x` relates *any*
//! term to itself plus zero, not just the symbol `x`.
//!
//! Every rule is bidirectional. A direction is only applicable if its source template binds
//! every placeholder its target mentions; `log(x, b) = log(x, y) / log(b, y)` can collapse a
//! change of base (right to left), but can never introduce an arbitrary intermediate base `y`
//! (left to right). Bootstrapping asserts that at least one direction of every rule is
//! applicable.

use crate::expr::{Expr, Op, OpKind, Placeholder};
use once_cell::sync::Lazy;
use sym_parser::parser::ast;
use sym_parser::Parser;

/// A rewrite rule: a pair of templates declaring that any instantiation of one may be rewritten
/// into the same instantiation of the other.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub source: Expr,
    pub target: Expr,
}

/// The rule catalog, written in surface syntax.
const RULES: &[&str] = &[
    // associativity of addition
    "(x + y) + z = x + (y + z)",

    // associativity of multiplication
    "(x * y) * z = x * (y * z)",

    // commutativity of addition
    "x + y = y + x",

    // commutativity of multiplication
    "x * y = y * x",

    // distributivity of multiplication over addition
    "a * (x + y) = a * x + a * y",

    // additive identity
    "x + 0 = x",

    // multiplicative identity
    "x * 1 = x",

    // multiplicative kernel
    "x * 0 = 0",

    // additive inverse
    "x + (-x) = 0",
    "-x = 0 - x",
    "x + (-y) = x - y",

    // multiplicative inverse
    "x * (x^-1) = 1",
    "1/x = 1 / x",
    "x * (1/y) = x / y",

    "x + x = x * 2",
    "x * x = x ^ 2",

    //
    //  exponentiation and logarithms
    //

    "log(x * y, b) = log(x, b) + log(y, b)",

    // change of base
    "log(x, b) = log(x, y) / log(b, y)",

    "b ^ log(x, b) = x",

    // exponentiation identity
    "b ^ x * b ^ y = b ^ (x + y)",

    "(b ^ x) ^ y = b ^ (x * y)",

    // distributivity over multiplication
    "(x * y) ^ n = (x ^ n) * (y ^ n)",

    "x ^ 0 = 1",

    "x ^ 1 = x",

    "log(1, x) = 0",

    // function equivalence
    "log(x, e) = ln(x)",
    "log(x, y) = ln(x) / ln(y)",

    "e ^ x = exp(x)",
    "a ^ x = exp(x * ln(a))",

    //
    //  complex numbers
    //

    // fundamental property of i
    "i ^ 2 = -1",
    // euler's formula
    "e ^ (i * x) = cos(x) + i * sin(x)",

    //
    //  trigonometry
    //

    "sin(0) = 0",
    "cos(0) = 1",
    "sin(pi/2) = 1",
    "cos(pi/2) = 0",

    "tan(x) = sin(x) / cos(x)",
    "sec(x) = 1 / cos(x)",
    "csc(x) = 1 / sin(x)",
    "cot(x) = 1 / tan(x)",
    "1 = sin(x) ^ 2 + cos(x) ^ 2",

    "sin(-x) = -sin(x)",
    "cos(-x) = cos(x)",
    "tan(-x) = -tan(x)",

    "sin(pi/2 - x) = cos(x)",
    "cos(pi/2 - x) = sin(x)",
    "tan(pi/2 - x) = cot(x)",

    "sin(pi - x) = sin(x)",
    "cos(pi - x) = -cos(x)",
    "tan(pi - x) = -tan(x)",

    "sin(2pi - x) = sin(-x)",
    "cos(2pi - x) = cos(-x)",
    "tan(2pi - x) = tan(-x)",

    "sin(x + y) = sin(x) * cos(y) + cos(x) * sin(y)",

    "sin(x - y) = sin(x) * cos(y) - cos(x) * sin(y)",

    "cos(x + y) = cos(x) * cos(y) - sin(x) * sin(y)",
    "cos(x - y) = cos(x) * cos(y) + sin(x) * sin(y)",

    "sin(2pi + x) = sin(x)",
    "cos(2pi + x) = cos(x)",
    "tan(2pi + x) = tan(x)",

    "sin(2x) = 2 * sin(x) * cos(x)",
    "cos(2x) = cos(x) ^ 2 - sin(x) ^ 2",
    "cos(2x) = 2 * cos(x) ^ 2 - 1",

    "sin(3x) = 3 * sin(x) - 4 * sin(x) ^ 3",
    "cos(3x) = 4 * cos(x) ^ 3 - 3 * cos(x)",

    "sin(x) ^ 2 = (1 - cos(2x)) / 2",
    "cos(x) ^ 2 = (1 + cos(2x)) / 2",

    //
    //  differentiation
    //

    "d/dx(f + g) = d/dx(f) + d/dx(g)",
    "d/dx(f - g) = d/dx(f) - d/dx(g)",

    // product rule
    "d/dx(f * g) = d/dx(f) * g + f * d/dx(g)",

    // quotient rule
    "d/dx(f / g) = (d/dx(f) * g - f * d/dx(g)) / g^2",

    // power rule
    "d/dx(x) = 1",
    "d/dx(x ^ r) = r * x ^ (r - 1)",

    "d/dx(ln(x)) = 1/x",
    "d/dx(ln(f)) = d/dx(f) / x",
    "d/dx(exp(x)) = exp(x)",
    "d/dx(exp(f)) = d/dx(f) * exp(f)",

    "d/dx(sin(x)) = cos(x)",
    "d/dx(cos(x)) = -sin(x)",
    "d/dx(tan(x)) = sec(x) ^ 2",

    "d/dx(sin(f)) = d/dx(f) * cos(f)",
    "d/dx(cos(f)) = d/dx(f) * -sin(f)",
    "d/dx(tan(f)) = d/dx(f) * sec(f) ^ 2",
];

/// Converts a parsed rule side into a template: every symbol named by a single lowercase letter
/// becomes the corresponding placeholder.
pub(crate) fn to_template(expr: Expr) -> Expr {
    match expr {
        Expr::Op(op) => Expr::Op(Op {
            kind: op.kind,
            lhs: Box::new(to_template(*op.lhs)),
            rhs: Box::new(to_template(*op.rhs)),
        }),
        Expr::Symbol(name) => {
            let mut letters = name.chars();
            match (letters.next().and_then(Placeholder::from_letter), letters.next()) {
                (Some(placeholder), None) => Expr::Placeholder(placeholder),
                _ => Expr::Symbol(name),
            }
        },
        other => other,
    }
}

static CATALOG: Lazy<Vec<Rule>> = Lazy::new(|| {
    RULES.iter()
        .map(|line| {
            let ast = Parser::new(line)
                .try_parse_full::<ast::Expr>()
                .unwrap_or_else(|_| panic!("rule `{}` must parse", line));

            let Expr::Op(op) = Expr::from(ast) else {
                panic!("rule `{}` must be an equality", line);
            };
            if op.kind != OpKind::Equality {
                panic!("rule `{}` must be an equality", line);
            }

            let rule = Rule {
                source: to_template(*op.lhs),
                target: to_template(*op.rhs),
            };

            // at least one direction must bind every placeholder the other side mentions
            let source_placeholders = rule.source.placeholders();
            let target_placeholders = rule.target.placeholders();
            assert!(
                source_placeholders.is_superset(&target_placeholders)
                    || target_placeholders.is_superset(&source_placeholders),
                "rule `{}` has no applicable direction",
                line,
            );

            rule
        })
        .collect()
});

/// Returns the rule catalog, parsing it on first use.
pub fn rules() -> &'static [Rule] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use crate::expr::{Constant, Placeholder};
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn catalog_bootstraps() {
        assert_eq!(rules().len(), RULES.len());
    }

    #[test]
    fn single_letter_symbols_become_placeholders() {
        // "x + 0 = x"
        let rule = rules().iter()
            .find(|rule| rule.target == Expr::Placeholder(Placeholder::from_letter('x').unwrap()))
            .unwrap();

        assert_eq!(rule.source, Expr::binary(
            OpKind::Sum,
            Expr::Placeholder(Placeholder::from_letter('x').unwrap()),
            Expr::Value(0.0),
        ));
    }

    #[test]
    fn reserved_names_survive_template_conversion() {
        // `e` and `pi` are constants, never placeholders; multi-letter names stay symbols
        assert_eq!(to_template(Expr::Constant(Constant::E)), Expr::Constant(Constant::E));
        assert_eq!(
            to_template(Expr::Symbol("foo".to_string())),
            Expr::Symbol("foo".to_string()),
        );
        assert_eq!(
            to_template(Expr::Symbol("q".to_string())),
            Expr::Placeholder(Placeholder::from_letter('q').unwrap()),
        );
    }

    #[test]
    fn every_rule_has_an_applicable_direction() {
        for rule in rules() {
            let source = rule.source.placeholders();
            let target = rule.target.placeholders();
            assert!(
                source.is_superset(&target) || target.is_superset(&source),
                "rule `{} = {}` has no applicable direction",
                rule.source,
                rule.target,
            );
        }
    }

    #[test]
    fn templates_only_use_placeholders_for_letters() {
        // the catalog never leaves a single-letter symbol unconverted
        for rule in rules() {
            for template in [&rule.source, &rule.target] {
                fn check(expr: &Expr) {
                    match expr {
                        Expr::Op(op) => {
                            check(&op.lhs);
                            check(&op.rhs);
                        },
                        Expr::Symbol(name) => assert!(name.len() > 1),
                        _ => {},
                    }
                }
                check(template);
            }
        }
    }
}
