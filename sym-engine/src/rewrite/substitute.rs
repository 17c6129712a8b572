//! Instantiation of a rule template with the bindings produced by the matcher.

use crate::expr::{Expr, Op};
use super::matcher::Bindings;

/// Replaces every placeholder in the template with the subterm it is bound to, producing a
/// closed term.
///
/// Every placeholder in the template must be bound; the rule expander only applies a rule
/// direction after checking that the match covered the template's placeholder set, so an
/// unbound placeholder here is a programming error and panics.
pub fn substitute(template: &Expr, bindings: &Bindings) -> Expr {
    match template {
        Expr::Placeholder(placeholder) => bindings.get(placeholder)
            .cloned()
            .unwrap_or_else(|| panic!("placeholder `{}` must be bound before substitution", placeholder)),
        Expr::Op(op) => Expr::Op(Op {
            kind: op.kind,
            lhs: Box::new(substitute(&op.lhs, bindings)),
            rhs: Box::new(substitute(&op.rhs, bindings)),
        }),
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use crate::expr::Placeholder;
    use pretty_assertions::assert_eq;
    use super::*;

    fn parse_expr(input: &str) -> Expr {
        let ast = sym_parser::Parser::new(input)
            .try_parse_full::<sym_parser::parser::ast::Expr>()
            .unwrap();
        Expr::from(ast)
    }

    fn parse_template(input: &str) -> Expr {
        crate::rewrite::rules::to_template(parse_expr(input))
    }

    #[test]
    fn replaces_placeholders() {
        let template = parse_template("x * y + x * z");

        let mut bindings = Bindings::new();
        bindings.insert(Placeholder::from_letter('x').unwrap(), parse_expr("foo"));
        bindings.insert(Placeholder::from_letter('y').unwrap(), parse_expr("bar + 1"));
        bindings.insert(Placeholder::from_letter('z').unwrap(), parse_expr("sin(baz)"));

        assert_eq!(
            substitute(&template, &bindings),
            parse_expr("foo * (bar + 1) + foo * sin(baz)"),
        );
    }

    /// A fully-bound substitution leaves no placeholder behind.
    #[test]
    fn result_is_closed() {
        let template = parse_template("b ^ (x + y)");

        let mut bindings = Bindings::new();
        for letter in ['b', 'x', 'y'] {
            bindings.insert(Placeholder::from_letter(letter).unwrap(), parse_expr("q + 1"));
        }

        assert!(substitute(&template, &bindings).placeholders().is_empty());
    }

    #[test]
    #[should_panic(expected = "must be bound")]
    fn unbound_placeholder_panics() {
        let template = parse_template("x + y");
        let mut bindings = Bindings::new();
        bindings.insert(Placeholder::from_letter('x').unwrap(), parse_expr("foo"));
        substitute(&template, &bindings);
    }
}
