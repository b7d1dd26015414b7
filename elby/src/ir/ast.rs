use std::fmt;

use crate::parser::token::Token;

/// Index of a node in its tree's arena. Ids grow in creation order, so they
/// double as stable labels when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id_{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// 42
    Constant,
    /// x
    Reference,
    /// a |> b
    BinaryOp { left: NodeId, right: NodeId },
    /// { statements }
    FunctionDefinition { body: NodeId },
    /// (callee args...)
    FunctionCall { callee: NodeId, args: Option<NodeId> },
    /// One argument of a call and the rest of the list.
    ExpressionList { expr: NodeId, next: Option<NodeId> },
    /// let x = initializer
    VariableDefinition { initializer: NodeId },
    /// One statement and the next cell. Both are empty on the sentinel
    /// that ends every list.
    StatementList {
        statement: Option<NodeId>,
        next: Option<NodeId>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node<'a> {
    pub id: NodeId,
    /// Token anchoring the node's source location: the literal for
    /// constants and references, the operator for binary ops, the symbol
    /// for definitions, the opening bracket for calls and functions.
    pub token: &'a Token<'a>,
    pub kind: NodeKind,
}

impl<'a> Node<'a> {
    pub fn is_sentinel(&self) -> bool {
        matches!(
            self.kind,
            NodeKind::StatementList {
                statement: None,
                next: None
            }
        )
    }
}

/// A parsed program. Owns every node; tokens are borrowed from the buffer
/// the tree was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Ast<'a> {
    nodes: Vec<Node<'a>>,
    root: NodeId,
}

impl<'a> Ast<'a> {
    /// The top-level statement list.
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node<'a> {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: Option<NodeId>) -> Option<&Node<'a>> {
        id.and_then(|id| self.nodes.get(id.0))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node<'a>> {
        self.nodes.iter()
    }

    /// Statements of the list starting at `list`, in source order.
    pub fn statements(&self, list: NodeId) -> Statements<'_, 'a> {
        Statements {
            ast: self,
            cell: Some(list),
        }
    }

    /// Arguments of the list starting at `list`, in source order.
    pub fn arguments(&self, list: Option<NodeId>) -> Arguments<'_, 'a> {
        Arguments { ast: self, cell: list }
    }
}

pub struct Statements<'t, 'a> {
    ast: &'t Ast<'a>,
    cell: Option<NodeId>,
}

impl Iterator for Statements<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.ast.get(self.cell)?;
        match node.kind {
            NodeKind::StatementList { statement, next } => {
                self.cell = next;
                statement
            }
            _ => None,
        }
    }
}

pub struct Arguments<'t, 'a> {
    ast: &'t Ast<'a>,
    cell: Option<NodeId>,
}

impl Iterator for Arguments<'_, '_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let node = self.ast.get(self.cell)?;
        match node.kind {
            NodeKind::ExpressionList { expr, next } => {
                self.cell = next;
                Some(expr)
            }
            _ => None,
        }
    }
}

/// Arena the parser allocates into. Turned into an [`Ast`] only when the
/// whole parse succeeded; dropping it releases every node at once.
#[derive(Debug, Default)]
pub struct AstBuilder<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> AstBuilder<'a> {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn alloc(&mut self, token: &'a Token<'a>, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { id, token, kind });
        id
    }

    /// Fills in a statement cell allocated as a sentinel, turning it into a
    /// link of the chain.
    pub fn link_statement(&mut self, cell: NodeId, statement: NodeId, next: NodeId) {
        self.nodes[cell.0].kind = NodeKind::StatementList {
            statement: Some(statement),
            next: Some(next),
        };
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn finish(self, root: NodeId) -> Ast<'a> {
        Ast {
            nodes: self.nodes,
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::buffer::tokenize;

    #[test]
    fn ids_follow_allocation_order() {
        let buffer = tokenize("a 1").unwrap();
        let tokens = buffer.as_slice();
        let mut builder = AstBuilder::new();
        let a = builder.alloc(&tokens[0], NodeKind::Reference);
        let one = builder.alloc(&tokens[1], NodeKind::Constant);
        assert!(a < one);
        assert_eq!(one.index(), 1);
        assert_eq!(one.to_string(), "id_1");
    }

    #[test]
    fn statement_chain_iterates_in_order() {
        let buffer = tokenize("a b").unwrap();
        let tokens = buffer.as_slice();
        let empty = NodeKind::StatementList {
            statement: None,
            next: None,
        };

        let mut builder = AstBuilder::new();
        let head = builder.alloc(&tokens[0], empty);
        let a = builder.alloc(&tokens[0], NodeKind::Reference);
        let second = builder.alloc(&tokens[1], empty);
        builder.link_statement(head, a, second);
        let b = builder.alloc(&tokens[1], NodeKind::Reference);
        let sentinel = builder.alloc(&tokens[2], empty);
        builder.link_statement(second, b, sentinel);
        let ast = builder.finish(head);

        assert_eq!(ast.statements(ast.root()).collect::<Vec<_>>(), vec![a, b]);
        assert!(ast.node(sentinel).is_sentinel());
        assert!(!ast.node(head).is_sentinel());
        assert_eq!(ast.len(), 5);
    }

    #[test]
    fn missing_argument_list_is_empty() {
        let buffer = tokenize("x").unwrap();
        let mut builder = AstBuilder::new();
        let x = builder.alloc(&buffer[0], NodeKind::Reference);
        let ast = builder.finish(x);
        assert_eq!(ast.arguments(None).count(), 0);
        assert!(ast.get(None).is_none());
    }
}
