use std::ops::Index;

use log::debug;

use super::lexer::Lexer;
use super::token::{Token, TokenKind};
use crate::error::LexError;

/// Every token of one source buffer, materialized before parsing.
///
/// Only built by draining a [`Lexer`], so it always ends with exactly one
/// EOF token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenBuffer<'src> {
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenBuffer<'src> {
    pub fn from_lexer(mut lexer: Lexer<'src>) -> Result<Self, LexError> {
        let mut buffer = Self { tokens: Vec::new() };
        loop {
            let token = lexer.next_token()?;
            buffer.push(token);
            if token.is(TokenKind::Eof) {
                break;
            }
        }
        debug!("tokenized {} tokens", buffer.len());
        Ok(buffer)
    }

    fn push(&mut self, token: Token<'src>) {
        self.tokens.push(token);
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Never true: the EOF sentinel is always present.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'src>> {
        self.tokens.iter()
    }

    pub fn eof(&self) -> &Token<'src> {
        &self.tokens[self.tokens.len() - 1]
    }
}

impl<'src> Index<usize> for TokenBuffer<'src> {
    type Output = Token<'src>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.tokens[index]
    }
}

impl<'a, 'src> IntoIterator for &'a TokenBuffer<'src> {
    type Item = &'a Token<'src>;
    type IntoIter = std::slice::Iter<'a, Token<'src>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Drains a fresh lexer over `source`.
pub fn tokenize(source: &str) -> Result<TokenBuffer<'_>, LexError> {
    TokenBuffer::from_lexer(Lexer::new(source))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_eof_at_the_end() {
        let buffer = tokenize("let a = b |> c\n").unwrap();
        let eofs = buffer.iter().filter(|t| t.is(TokenKind::Eof)).count();
        assert_eq!(eofs, 1);
        assert!(buffer.eof().is(TokenKind::Eof));
        assert_eq!(buffer.len(), 7);
        assert_eq!(buffer[buffer.len() - 1], *buffer.eof());
    }

    #[test]
    fn empty_source_still_has_eof() {
        let buffer = tokenize("   \n").unwrap();
        assert_eq!(buffer.len(), 1);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.eof().line(), 2);
    }

    #[test]
    fn lex_error_aborts_buffering() {
        let err = tokenize("let a = 1\nlet b = #").unwrap_err();
        assert_eq!(err, LexError { character: '#', line: 2 });
    }
}
