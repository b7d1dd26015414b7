use super::Backend;
use crate::ir::ast::{Ast, Node, NodeId, NodeKind};
use crate::ir::visit::{Visitor, dispatch};

/// Renders a tree as a Graphviz digraph.
///
/// Every non-sentinel node becomes `id_N [label = "<token>"]`; edges carry
/// the role of the child (`=`, `fn`, `arg`, `stmt`, `next`, `body`).
pub struct DotRenderer {
    out: String,
}

impl DotRenderer {
    pub fn new() -> Self {
        Self { out: String::new() }
    }

    fn declare(&mut self, node: &Node<'_>) {
        let label = node.token.to_string().replace('\\', "\\\\").replace('"', "\\\"");
        self.out
            .push_str(&format!("\t{} [label = \"{}\"]\n", node.id, label));
    }

    fn edge(&mut self, from: NodeId, to: NodeId, label: Option<&str>) {
        match label {
            Some(label) => self
                .out
                .push_str(&format!("\t{} -> {} [label = \"{}\"]\n", from, to, label)),
            None => self.out.push_str(&format!("\t{} -> {}\n", from, to)),
        }
    }
}

impl Default for DotRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for DotRenderer {
    fn render(&mut self, ast: &Ast<'_>) -> String {
        self.out.clear();
        self.out.push_str("digraph G {\n");
        self.out
            .push_str("\tgraph [fontname = \"monospace\" ordering = out];\n");
        self.out.push_str("\tnode [fontname = \"monospace\"];\n");
        self.out.push_str("\tedge [fontname = \"monospace\"];\n");
        self.out.push('\n');

        dispatch(self, ast, Some(ast.root()));

        self.out.push_str("}\n");
        std::mem::take(&mut self.out)
    }
}

impl<'a> Visitor<'a> for DotRenderer {
    fn visit_constant(&mut self, _ast: &Ast<'a>, node: &Node<'a>) {
        self.declare(node);
    }

    fn visit_reference(&mut self, _ast: &Ast<'a>, node: &Node<'a>) {
        self.declare(node);
    }

    fn visit_binary_op(&mut self, ast: &Ast<'a>, node: &Node<'a>, left: NodeId, right: NodeId) {
        self.declare(node);
        self.edge(node.id, left, None);
        self.edge(node.id, right, None);

        dispatch(self, ast, Some(left));
        dispatch(self, ast, Some(right));
    }

    fn visit_function_definition(&mut self, ast: &Ast<'a>, node: &Node<'a>, body: NodeId) {
        self.declare(node);
        if !ast.node(body).is_sentinel() {
            self.edge(node.id, body, Some("body"));
        }

        dispatch(self, ast, Some(body));
    }

    fn visit_function_call(
        &mut self,
        ast: &Ast<'a>,
        node: &Node<'a>,
        callee: NodeId,
        args: Option<NodeId>,
    ) {
        self.declare(node);
        self.edge(node.id, callee, Some("fn"));
        for arg in ast.arguments(args) {
            self.edge(node.id, arg, Some("arg"));
        }

        dispatch(self, ast, Some(callee));
        for arg in ast.arguments(args) {
            dispatch(self, ast, Some(arg));
        }
    }

    fn visit_variable_definition(&mut self, ast: &Ast<'a>, node: &Node<'a>, initializer: NodeId) {
        self.declare(node);
        self.edge(node.id, initializer, Some("="));

        dispatch(self, ast, Some(initializer));
    }

    /// Walks the whole chain from this cell, so later cells are never
    /// dispatched on their own.
    fn visit_statement_list(
        &mut self,
        ast: &Ast<'a>,
        node: &Node<'a>,
        _statement: Option<NodeId>,
        _next: Option<NodeId>,
    ) {
        let mut cell = Some(node);
        while let Some(current) = cell {
            let NodeKind::StatementList {
                statement: Some(statement),
                next,
            } = current.kind
            else {
                break;
            };

            self.declare(current);
            self.edge(current.id, statement, Some("stmt"));
            cell = ast.get(next).filter(|n| !n.is_sentinel());
            if let Some(next) = cell {
                self.edge(current.id, next.id, Some("next"));
            }

            dispatch(self, ast, Some(statement));
        }
    }
}
