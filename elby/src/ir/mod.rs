pub mod ast;
pub mod visit;

pub use ast::{Ast, Node, NodeId, NodeKind};
pub use visit::{Visitor, dispatch};
