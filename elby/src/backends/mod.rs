pub mod dot;
pub mod tree;

use crate::ir::ast::Ast;

/// Turns a parsed tree into text.
pub trait Backend {
    fn render(&mut self, ast: &Ast<'_>) -> String;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendType {
    Dot,
    Tree,
}

impl BackendType {
    pub fn all() -> Vec<Self> {
        vec![Self::Dot, Self::Tree]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dot => "dot",
            Self::Tree => "tree",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Dot => "Graphviz digraph, one node per tree node",
            Self::Tree => "Indented outline of the tree",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().into_iter().find(|b| b.name() == name)
    }

    pub fn create(&self) -> Box<dyn Backend> {
        match self {
            Self::Dot => Box::new(dot::DotRenderer::new()),
            Self::Tree => Box::new(tree::TreePrinter::new()),
        }
    }
}
