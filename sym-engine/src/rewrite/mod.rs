//! Pattern matching, substitution, and one-step rewriting.
//!
//! A rewrite [`Rule`](rules::Rule) is a pair of templates: terms that may contain
//! [`Placeholder`](crate::expr::Placeholder) atoms standing for arbitrary subterms. The
//! [`matcher`] unifies a concrete term against a template, accumulating a binding for each
//! placeholder; [`substitute`](substitute::substitute) instantiates the opposite template with
//! those bindings. The [`Expander`](expand::Expander) drives both over the whole rule catalog,
//! in both directions and at every subterm position, to enumerate everything reachable from a
//! term in exactly one rewrite step.

pub mod expand;
pub mod matcher;
pub mod rules;
pub mod substitute;

pub use expand::Expander;
pub use matcher::{match_exprs, Bindings};
pub use rules::{rules, Rule};
pub use substitute::substitute;
