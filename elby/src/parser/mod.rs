pub mod buffer;
pub mod lexer;
pub mod parser;
pub mod token;

use std::fs;
use std::path::Path;

use crate::error::FrontendError;
use crate::ir::ast::Ast;

pub use buffer::{TokenBuffer, tokenize};
pub use parser::parse_tokens;

/// Runs both phases over `source` and hands the tree to `f`.
///
/// The tree borrows the token buffer, so it cannot outlive this call.
pub fn parse_source<R>(source: &str, f: impl FnOnce(&Ast<'_>) -> R) -> Result<R, FrontendError> {
    let tokens = tokenize(source)?;
    let ast = parse_tokens(&tokens)?;
    Ok(f(&ast))
}

pub fn read_source(path: impl AsRef<Path>) -> Result<String, FrontendError> {
    Ok(fs::read_to_string(path)?)
}
