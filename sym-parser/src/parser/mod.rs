pub mod ast;
pub mod error;
pub mod expr;
pub mod op;

use crate::tokenizer::{tokenize_complete, Token};
use error::{kind, Error};
use std::ops::Range;

/// Any type that can be parsed from a stream of tokens.
pub trait Parse: Sized {
    /// Parses a value of this type from the given parser.
    fn parse(input: &mut Parser) -> Result<Self, Error>;
}

/// A high-level parser for algebraic notation. This is the type to use to parse an arbitrary
/// piece of source code into an abstract syntax tree.
#[derive(Debug, Clone)]
pub struct Parser<'source> {
    /// The tokens that this parser is currently parsing.
    tokens: Box<[Token<'source>]>,

    /// The index of the **next** token to be parsed.
    cursor: usize,
}

impl<'source> Parser<'source> {
    /// Create a new parser for the given source.
    pub fn new(source: &'source str) -> Self {
        Self {
            tokens: tokenize_complete(source),
            cursor: 0,
        }
    }

    /// Creates an error that points at the current token, or the end of the source code if the
    /// cursor is at the end of the stream.
    pub fn error(&self, kind: impl sym_error::ErrorKind + 'static) -> Error {
        Error::new(vec![self.span()], kind)
    }

    /// Returns a span pointing at the end of the source code.
    pub fn eof_span(&self) -> Range<usize> {
        self.tokens.last().map_or(0..0, |token| token.span.end..token.span.end)
    }

    /// Returns the span of the next significant token, or the end of the source code if there is
    /// none.
    pub fn span(&self) -> Range<usize> {
        self.peek_token()
            .map_or(self.eof_span(), |token| token.span.clone())
    }

    /// Returns the next significant token without advancing the cursor. Returns [`None`] if the
    /// remaining tokens are all insignificant, or if the cursor is at the end of the stream.
    pub fn peek_token(&self) -> Option<&Token<'source>> {
        self.tokens[self.cursor..].iter().find(|token| !token.is_ignore())
    }

    /// Returns the `n`th significant token ahead of the cursor (`peek_token_nth(0)` is
    /// equivalent to [`peek_token`](Self::peek_token)). The cursor is not moved.
    pub fn peek_token_nth(&self, n: usize) -> Option<&Token<'source>> {
        self.tokens[self.cursor..]
            .iter()
            .filter(|token| !token.is_ignore())
            .nth(n)
    }

    /// Returns the next significant token to be parsed, then advances the cursor past it.
    ///
    /// Returns an EOF error if there are no more tokens.
    pub fn next_token(&mut self) -> Result<Token<'source>, Error> {
        while self.cursor < self.tokens.len() {
            let token = &self.tokens[self.cursor];
            self.cursor += 1;
            if token.is_ignore() {
                continue;
            } else {
                // cloning is cheap: only Range<_> is cloned
                return Ok(token.clone());
            }
        }

        Err(Error::new(vec![self.eof_span()], kind::UnexpectedEof))
    }

    /// Speculatively parses a value from the given stream of tokens.
    ///
    /// If parsing is successful, the stream is advanced past the consumed tokens and the parsed
    /// value is returned. Otherwise, the stream is left unchanged and an error is returned.
    pub fn try_parse<T: Parse>(&mut self) -> Result<T, Error> {
        let start = self.cursor;
        T::parse(self).map_err(|err| {
            self.cursor = start;
            err
        })
    }

    /// Parses a value from the given stream of tokens, requiring that the entire stream is
    /// consumed in the process.
    pub fn try_parse_full<T: Parse>(&mut self) -> Result<T, Error> {
        let value = self.try_parse::<T>()?;
        match self.peek_token() {
            Some(token) => Err(Error::new(vec![token.span.clone()], kind::ExpectedEof)),
            None => Ok(value),
        }
    }
}
