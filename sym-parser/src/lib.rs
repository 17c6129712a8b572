//! Tokenizer and parser for textbook algebraic notation.
//!
//! The entry point is [`Parser`](parser::Parser). It tokenizes the full source up front using
//! [`tokenizer`], then parses it into the spanned AST defined in [`parser::ast`]:
//!
//! ```
//! use sym_parser::parser::{ast::Expr, Parser};
//!
//! let ast = Parser::new("3x + sin(y)^2").try_parse_full::<Expr>().unwrap();
//! ```
//!
//! The AST keeps the source spans of everything it parses, so errors found later (or reported by
//! the parser itself) can point back into the source code.

pub mod parser;
pub mod tokenizer;

pub use parser::Parser;
