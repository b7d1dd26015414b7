//! Front end of the elby scripting language: lexer, recursive-descent
//! parser, arena syntax tree and visitor dispatch.
//!
//! ```text
//! source --Lexer--> TokenBuffer --parse_tokens--> Ast --dispatch--> Visitor
//! ```

pub mod backends;
pub mod error;
pub mod ir;
pub mod parser;
pub mod span;

pub use error::{FrontendError, LexError, ParseError, Production};
pub use ir::{Ast, Node, NodeId, NodeKind, Visitor, dispatch};
pub use parser::{TokenBuffer, parse_source, parse_tokens, tokenize};
