use super::ast::{Ast, Node, NodeId, NodeKind};

/// Callbacks for walking an [`Ast`].
///
/// Every method defaults to a no-op. [`dispatch`] calls `visit_node` and
/// then the method matching the node's variant, and never descends on its
/// own: an implementation that wants the children calls `dispatch` on them
/// itself, in whichever order it needs.
pub trait Visitor<'a> {
    /// Called for every dispatched node before the variant method.
    fn visit_node(&mut self, _ast: &Ast<'a>, _node: &Node<'a>) {}

    fn visit_constant(&mut self, _ast: &Ast<'a>, _node: &Node<'a>) {}

    fn visit_reference(&mut self, _ast: &Ast<'a>, _node: &Node<'a>) {}

    fn visit_binary_op(&mut self, _ast: &Ast<'a>, _node: &Node<'a>, _left: NodeId, _right: NodeId) {}

    fn visit_function_definition(&mut self, _ast: &Ast<'a>, _node: &Node<'a>, _body: NodeId) {}

    fn visit_function_call(
        &mut self,
        _ast: &Ast<'a>,
        _node: &Node<'a>,
        _callee: NodeId,
        _args: Option<NodeId>,
    ) {
    }

    fn visit_expression_list(
        &mut self,
        _ast: &Ast<'a>,
        _node: &Node<'a>,
        _expr: NodeId,
        _next: Option<NodeId>,
    ) {
    }

    fn visit_variable_definition(&mut self, _ast: &Ast<'a>, _node: &Node<'a>, _initializer: NodeId) {}

    /// Sentinel cells arrive here too, with both slots empty.
    fn visit_statement_list(
        &mut self,
        _ast: &Ast<'a>,
        _node: &Node<'a>,
        _statement: Option<NodeId>,
        _next: Option<NodeId>,
    ) {
    }
}

/// Single-level double dispatch. An empty `node` is ignored, which lets
/// visitors pass optional child slots straight through.
pub fn dispatch<'a, V>(visitor: &mut V, ast: &Ast<'a>, node: Option<NodeId>)
where
    V: Visitor<'a> + ?Sized,
{
    let Some(node) = ast.get(node) else {
        return;
    };

    visitor.visit_node(ast, node);

    match node.kind {
        NodeKind::Constant => visitor.visit_constant(ast, node),
        NodeKind::Reference => visitor.visit_reference(ast, node),
        NodeKind::BinaryOp { left, right } => visitor.visit_binary_op(ast, node, left, right),
        NodeKind::FunctionDefinition { body } => {
            visitor.visit_function_definition(ast, node, body)
        }
        NodeKind::FunctionCall { callee, args } => {
            visitor.visit_function_call(ast, node, callee, args)
        }
        NodeKind::ExpressionList { expr, next } => {
            visitor.visit_expression_list(ast, node, expr, next)
        }
        NodeKind::VariableDefinition { initializer } => {
            visitor.visit_variable_definition(ast, node, initializer)
        }
        NodeKind::StatementList { statement, next } => {
            visitor.visit_statement_list(ast, node, statement, next)
        }
    }
}
