use std::fmt;

use thiserror::Error;

/// A character outside every token rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unexpected character {character:?} at line {line}")]
pub struct LexError {
    pub character: char,
    pub line: usize,
}

/// Grammar production a parse error was raised from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Production {
    Program,
    Statement,
    Call,
    Primary,
    Function,
}

impl Production {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Program => "program",
            Self::Statement => "statement",
            Self::Call => "call",
            Self::Primary => "primary",
            Self::Function => "function",
        }
    }
}

impl fmt::Display for Production {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The first token that did not fit the active production.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{production} at line {line}: got unexpected {found}{}", expected_suffix(.expected))]
pub struct ParseError {
    pub production: Production,
    pub line: usize,
    /// Rendering of the offending token, e.g. `ID(x)` or `'}'`.
    pub found: String,
    pub expected: Option<&'static str>,
}

fn expected_suffix(expected: &Option<&'static str>) -> String {
    match expected {
        Some(what) => format!(" (expected {})", what),
        None => String::new(),
    }
}

#[derive(Error, Debug)]
pub enum FrontendError {
    #[error("Lexer error: {0}")]
    Lex(#[from] LexError),

    #[error("Syntax error: {0}")]
    Parse(#[from] ParseError),

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}
