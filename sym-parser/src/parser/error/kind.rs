//! The kinds of errors that can occur while parsing, each implementing
//! [`sym_error::ErrorKind`] to render itself as a report.

use crate::tokenizer::TokenKind;
use ariadne::Fmt;
use sym_error::{ErrorKind, EXPR};

/// The end of the source code was reached unexpectedly.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedEof;

impl ErrorKind for UnexpectedEof {
    fn message(&self) -> String {
        "unexpected end of input".to_string()
    }

    fn labels(&self) -> Vec<String> {
        vec![format!("you might need to add another {} here", "expression".fg(EXPR))]
    }
}

/// The end of the source code was expected, but something else was found.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedEof;

impl ErrorKind for ExpectedEof {
    fn message(&self) -> String {
        "expected end of input".to_string()
    }

    fn labels(&self) -> Vec<String> {
        vec![format!("I could not understand the remaining {} here", "expression".fg(EXPR))]
    }
}

/// An unexpected token was encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct UnexpectedToken {
    /// The token(s) that were expected.
    pub expected: &'static [TokenKind],

    /// The token that was found.
    pub found: TokenKind,
}

impl ErrorKind for UnexpectedToken {
    fn message(&self) -> String {
        "unexpected token".to_string()
    }

    fn labels(&self) -> Vec<String> {
        vec![format!(
            "expected one of: {}",
            self.expected
                .iter()
                .map(|kind| format!("{:?}", kind))
                .collect::<Vec<_>>()
                .join(", "),
        )]
    }

    fn help(&self) -> Option<String> {
        Some(format!("found {:?}", self.found))
    }
}

/// A character that is not part of the grammar was encountered.
#[derive(Debug, Clone, PartialEq)]
pub struct InvalidCharacter;

impl ErrorKind for InvalidCharacter {
    fn message(&self) -> String {
        "invalid character".to_string()
    }

    fn labels(&self) -> Vec<String> {
        vec!["this character cannot be used here".to_string()]
    }
}

/// A parenthesis was not closed.
#[derive(Debug, Clone, PartialEq)]
pub struct UnclosedParenthesis {
    /// Whether the parenthesis was an opening parenthesis `(`. Otherwise, the parenthesis was a
    /// closing parenthesis `)`.
    pub opening: bool,
}

impl ErrorKind for UnclosedParenthesis {
    fn message(&self) -> String {
        "unclosed parenthesis".to_string()
    }

    fn labels(&self) -> Vec<String> {
        vec!["this parenthesis is not closed".to_string()]
    }

    fn help(&self) -> Option<String> {
        Some(if self.opening {
            "add a closing parenthesis `)` somewhere after this".to_string()
        } else {
            "add an opening parenthesis `(` somewhere before this".to_string()
        })
    }
}

/// There was no expression inside a pair of parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyParenthesis;

impl ErrorKind for EmptyParenthesis {
    fn message(&self) -> String {
        "missing expression inside parenthesis".to_string()
    }

    fn labels(&self) -> Vec<String> {
        vec!["add an expression here".to_string()]
    }
}

/// A built-in function was called with the wrong number of arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct WrongArity {
    /// The name of the function.
    pub name: &'static str,

    /// The number of arguments the function takes.
    pub expected: usize,

    /// The number of arguments that were given.
    pub given: usize,
}

impl ErrorKind for WrongArity {
    fn message(&self) -> String {
        format!("wrong number of arguments for `{}`", self.name)
    }

    fn labels(&self) -> Vec<String> {
        vec![format!(
            "this call provides {} argument{}",
            self.given,
            if self.given == 1 { "" } else { "s" },
        )]
    }

    fn help(&self) -> Option<String> {
        Some(format!(
            "`{}` takes exactly {} argument{}",
            self.name,
            self.expected,
            if self.expected == 1 { "" } else { "s" },
        ))
    }
}
