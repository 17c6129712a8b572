//! Enumeration of every term reachable in one rewrite step.

use crate::expr::{Constant, Expr, Op, OpKind};
use std::collections::{BTreeMap, BTreeSet};
use super::{match_exprs, rules, substitute, Bindings};

/// Enumerates the terms reachable from a given term by exactly one rewrite step: a rule applied
/// in either direction, at the root or at any subterm position, or a numeric fold of an operator
/// whose operands are both literals.
///
/// Expansion is memoized. The cache is keyed by the term's structural identity and lives as long
/// as the `Expander`; the search constructs one per call, so no term is expanded twice within a
/// single simplification.
#[derive(Debug, Default)]
pub struct Expander {
    cache: BTreeMap<Expr, BTreeSet<Expr>>,
}

impl Expander {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every term reachable from `expr` in one rewrite step.
    ///
    /// The returned set iterates in the structural order of [`Expr`], so the order in which the
    /// search discovers neighbors is the same on every run.
    pub fn expand(&mut self, expr: &Expr) -> BTreeSet<Expr> {
        if let Some(cached) = self.cache.get(expr) {
            return cached.clone();
        }

        let mut out = BTreeSet::new();

        for rule in rules() {
            apply_rule(expr, &rule.source, &rule.target, &mut out);
            apply_rule(expr, &rule.target, &rule.source, &mut out);
        }

        if let Expr::Op(op) = expr {
            // rewrite each child and re-insert it into the enclosing term
            for lhs in self.expand(&op.lhs) {
                out.insert(Expr::Op(Op {
                    kind: op.kind,
                    lhs: Box::new(lhs),
                    rhs: op.rhs.clone(),
                }));
            }
            for rhs in self.expand(&op.rhs) {
                out.insert(Expr::Op(Op {
                    kind: op.kind,
                    lhs: op.lhs.clone(),
                    rhs: Box::new(rhs),
                }));
            }

            fold_values(op, &mut out);
        }

        self.cache.insert(expr.clone(), out.clone());
        out
    }
}

/// Applies one direction of a rule to the root of `expr`, inserting the rewritten term into
/// `out` if the rule matches.
fn apply_rule(expr: &Expr, source: &Expr, target: &Expr, out: &mut BTreeSet<Expr>) {
    // a direction whose target mentions placeholders the source does not bind would leave them
    // unbound during substitution
    let source_placeholders = source.placeholders();
    if !source_placeholders.is_superset(&target.placeholders()) {
        return;
    }

    let mut bindings = Bindings::new();
    if match_exprs(expr, source, &mut bindings) && bindings.len() == source_placeholders.len() {
        out.insert(substitute(target, &bindings));
    }
}

/// When both operands of an arithmetic operator are numeric literals, inserts the folded result.
///
/// A difference that would fold negative instead folds to the negation of a nonnegative
/// literal. Division by zero and non-finite powers fold to [`Constant::Undefined`], which keeps
/// NaN out of the term order.
fn fold_values(op: &Op, out: &mut BTreeSet<Expr>) {
    let (Some(lhs), Some(rhs)) = (op.lhs.as_value(), op.rhs.as_value()) else {
        return;
    };

    match op.kind {
        OpKind::Sum => {
            out.insert(Expr::Value(lhs + rhs));
        },
        OpKind::Difference => {
            if lhs < rhs {
                out.insert(Expr::unary(OpKind::Negative, Expr::Value(rhs - lhs)));
            } else {
                out.insert(Expr::Value(lhs - rhs));
            }
        },
        OpKind::Product => {
            out.insert(Expr::Value(lhs * rhs));
        },
        OpKind::Quotient => {
            out.insert(if rhs == 0.0 {
                Expr::Constant(Constant::Undefined)
            } else {
                Expr::Value(lhs / rhs)
            });
        },
        OpKind::Exponent => {
            let value = lhs.powf(rhs);
            out.insert(if value.is_finite() {
                Expr::Value(value)
            } else {
                Expr::Constant(Constant::Undefined)
            });
        },
        _ => {},
    }
}
