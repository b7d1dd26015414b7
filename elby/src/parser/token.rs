use std::fmt;

use crate::span::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Eof,
    // Literals
    Identifier,
    Number,
    // Keywords
    Let,
    // Operators
    Pipe,     // |>
    Arrow,    // ->
    Equality, // ==
    Assign,   // =
    // Punctuation
    LBrace,   // {
    RBrace,   // }
    LParen,   // (
    RParen,   // )
}

impl TokenKind {
    /// Human readable description, used for the "expected ..." part of diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Eof => "end of input",
            Self::Identifier => "symbol",
            Self::Number => "number",
            Self::Let => "'let'",
            Self::Pipe => "'|>'",
            Self::Arrow => "'->'",
            Self::Equality => "'=='",
            Self::Assign => "'='",
            Self::LBrace => "'{'",
            Self::RBrace => "'}'",
            Self::LParen => "'('",
            Self::RParen => "')'",
        }
    }
}

/// Keywords, matched against a whole identifier run.
pub const KEYWORDS: &[(&str, TokenKind)] = &[("let", TokenKind::Let)];

/// Two-character operators. Tried before the single-character table.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("|>", TokenKind::Pipe),
    ("->", TokenKind::Arrow),
    ("==", TokenKind::Equality),
];

pub const PUNCTUATION: &[(char, TokenKind)] = &[
    ('{', TokenKind::LBrace),
    ('}', TokenKind::RBrace),
    ('(', TokenKind::LParen),
    (')', TokenKind::RParen),
    ('=', TokenKind::Assign),
];

pub fn keyword_or_identifier(text: &str) -> TokenKind {
    KEYWORDS
        .iter()
        .find(|(spelling, _)| *spelling == text)
        .map(|(_, kind)| *kind)
        .unwrap_or(TokenKind::Identifier)
}

/// Decoded value carried by identifier and number tokens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Literal<'src> {
    None,
    Str(&'src str),
    Number(f64),
}

/// One lexical unit. The lexeme borrows the source buffer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub span: Span,
    pub lexeme: &'src str,
    pub value: Literal<'src>,
}

impl<'src> Token<'src> {
    pub fn line(&self) -> usize {
        self.span.line
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn as_str(&self) -> Option<&'src str> {
        match self.value {
            Literal::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self.value {
            Literal::Number(n) => Some(n),
            _ => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.value) {
            (TokenKind::Eof, _) => write!(f, "EOF"),
            (TokenKind::Identifier, Literal::Str(name)) => write!(f, "ID({})", name),
            (TokenKind::Number, Literal::Number(n)) => write!(f, "NUM({:.6})", n),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
