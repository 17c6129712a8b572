//! Unification of a term against a rule template.

use crate::expr::Expr;
use std::collections::BTreeMap;

/// An environment mapping placeholders to the subterms they were bound to during matching.
pub type Bindings = BTreeMap<crate::expr::Placeholder, Expr>;

/// Matches two expressions against each other, binding placeholders to the subterms they line up
/// with. Returns true if the expressions match; `bindings` is updated with the new bindings on
/// success and left untouched on failure.
///
/// Matching is symmetric: a placeholder on either side binds the subterm on the other. In
/// practice the engine always passes a closed term on the left and a template on the right; the
/// symmetric case only arises when two templates are compared with each other.
///
/// A placeholder that already has a binding must match it again on re-encounter, so a template
/// like `a + a` only matches terms whose two operands are structurally equal.
pub fn match_exprs(lhs: &Expr, rhs: &Expr, bindings: &mut Bindings) -> bool {
    let mut scratch = bindings.clone();
    if match_r(lhs, rhs, &mut scratch) {
        *bindings = scratch;
        true
    } else {
        false
    }
}

fn match_r(lhs: &Expr, rhs: &Expr, bindings: &mut Bindings) -> bool {
    match (lhs, rhs) {
        // two placeholders match only if they are the same placeholder
        (Expr::Placeholder(lhs), Expr::Placeholder(rhs)) => lhs == rhs,
        (Expr::Placeholder(placeholder), other) | (other, Expr::Placeholder(placeholder)) => {
            match bindings.get(placeholder).cloned() {
                // a bound placeholder must match its binding again; the recursion runs under a
                // scratch copy that is only committed on success
                Some(bound) => {
                    let mut scratch = bindings.clone();
                    if match_r(&bound, other, &mut scratch) {
                        *bindings = scratch;
                        true
                    } else {
                        false
                    }
                },
                None => {
                    bindings.insert(*placeholder, other.clone());
                    true
                },
            }
        },
        (Expr::Op(lhs), Expr::Op(rhs)) => {
            if lhs.kind != rhs.kind {
                return false;
            }

            // both children must match under one environment; commit only on joint success
            let mut scratch = bindings.clone();
            if match_r(&lhs.lhs, &rhs.lhs, &mut scratch) && match_r(&lhs.rhs, &rhs.rhs, &mut scratch) {
                *bindings = scratch;
                true
            } else {
                false
            }
        },
        (Expr::Empty, Expr::Empty) => true,
        (Expr::Func(lhs), Expr::Func(rhs)) => lhs == rhs,
        (Expr::Constant(lhs), Expr::Constant(rhs)) => lhs == rhs,
        (Expr::Value(lhs), Expr::Value(rhs)) => lhs == rhs,
        (Expr::Symbol(lhs), Expr::Symbol(rhs)) => lhs == rhs,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Placeholder;
    use crate::rewrite::substitute::substitute;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> Expr {
        let ast = sym_parser::Parser::new(input)
            .try_parse_full::<sym_parser::parser::ast::Expr>()
            .unwrap();
        Expr::from(ast)
    }

    /// Parse a template: every single-letter symbol becomes a placeholder.
    fn parse_template(input: &str) -> Expr {
        crate::rewrite::rules::to_template(parse_expr(input))
    }

    fn placeholder(letter: char) -> Placeholder {
        Placeholder::from_letter(letter).unwrap()
    }

    #[test]
    fn placeholders_bind_subterms() {
        let term = parse_expr("sin(foo) + 0");
        let pattern = parse_template("x + 0");

        let mut bindings = Bindings::new();
        assert!(match_exprs(&term, &pattern, &mut bindings));
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[&placeholder('x')], parse_expr("sin(foo)"));
    }

    /// Matching then substituting the same pattern reproduces the original term.
    #[test]
    fn match_soundness() {
        for (term, pattern) in [
            ("(foo + bar) + baz", "(x + y) + z"),
            ("sin(foo)^2 + cos(foo)^2", "sin(x) ^ 2 + cos(x) ^ 2"),
            ("log(foo * bar, 10)", "log(x * y, b)"),
        ] {
            let term = parse_expr(term);
            let pattern = parse_template(pattern);

            let mut bindings = Bindings::new();
            assert!(match_exprs(&term, &pattern, &mut bindings));
            assert_eq!(substitute(&pattern, &bindings), term);
        }
    }

    #[test]
    fn bound_placeholders_must_match_again() {
        // `x + x` requires both operands to be structurally equal
        let pattern = parse_template("x + x");

        let mut bindings = Bindings::new();
        assert!(match_exprs(&parse_expr("foo + foo"), &pattern, &mut bindings));
        assert_eq!(bindings[&placeholder('x')], parse_expr("foo"));

        let mut bindings = Bindings::new();
        assert!(!match_exprs(&parse_expr("foo + bar"), &pattern, &mut bindings));
        assert!(bindings.is_empty());
    }

    #[test]
    fn failed_match_leaves_bindings_untouched() {
        let pattern = parse_template("x * (y + z)");
        let term = parse_expr("foo * bar");

        let mut bindings = Bindings::new();
        bindings.insert(placeholder('q'), parse_expr("qux"));

        // the match binds `x` before failing on the right operand, but none of that
        // may leak into the caller's environment
        assert!(!match_exprs(&term, &pattern, &mut bindings));
        assert_eq!(bindings.len(), 1);
        assert_eq!(bindings[&placeholder('q')], parse_expr("qux"));
    }

    #[test]
    fn match_is_deterministic() {
        let term = parse_expr("(foo + bar) * baz");
        let pattern = parse_template("x * y");

        let mut first = Bindings::new();
        let mut second = Bindings::new();
        assert!(match_exprs(&term, &pattern, &mut first));
        assert!(match_exprs(&term, &pattern, &mut second));
        assert_eq!(first, second);
    }

    #[test]
    fn matching_is_symmetric() {
        // the closed term may appear on either side
        let term = parse_expr("foo + 0");
        let pattern = parse_template("x + 0");

        let mut bindings = Bindings::new();
        assert!(match_exprs(&pattern, &term, &mut bindings));
        assert_eq!(bindings[&placeholder('x')], parse_expr("foo"));
    }

    #[test]
    fn distinct_placeholders_stay_distinct() {
        // two placeholders match each other only when they are the same letter
        let mut bindings = Bindings::new();
        assert!(!match_exprs(
            &Expr::Placeholder(placeholder('a')),
            &Expr::Placeholder(placeholder('b')),
            &mut bindings,
        ));
        assert!(match_exprs(
            &Expr::Placeholder(placeholder('a')),
            &Expr::Placeholder(placeholder('a')),
            &mut bindings,
        ));
    }
}
