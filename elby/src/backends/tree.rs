use super::Backend;
use crate::ir::ast::{Ast, Node, NodeId};
use crate::ir::visit::{Visitor, dispatch};

/// Indented outline, two spaces per level. Statement and argument chains
/// are flattened so siblings share a level.
pub struct TreePrinter {
    out: String,
    depth: usize,
}

impl TreePrinter {
    pub fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn line(&mut self, text: &str) {
        for _ in 0..self.depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn nested(&mut self, ast: &Ast<'_>, children: &[Option<NodeId>]) {
        self.depth += 1;
        for child in children {
            dispatch(self, ast, *child);
        }
        self.depth -= 1;
    }
}

impl Default for TreePrinter {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for TreePrinter {
    fn render(&mut self, ast: &Ast<'_>) -> String {
        self.out.clear();
        self.depth = 0;
        dispatch(self, ast, Some(ast.root()));
        std::mem::take(&mut self.out)
    }
}

impl<'a> Visitor<'a> for TreePrinter {
    fn visit_constant(&mut self, _ast: &Ast<'a>, node: &Node<'a>) {
        let value = node.token.as_number().unwrap_or_default();
        self.line(&format!("num {}", value));
    }

    fn visit_reference(&mut self, _ast: &Ast<'a>, node: &Node<'a>) {
        self.line(&format!("ref {}", node.token.lexeme));
    }

    fn visit_binary_op(&mut self, ast: &Ast<'a>, node: &Node<'a>, left: NodeId, right: NodeId) {
        self.line(node.token.lexeme);
        self.nested(ast, &[Some(left), Some(right)]);
    }

    fn visit_function_definition(&mut self, ast: &Ast<'a>, _node: &Node<'a>, body: NodeId) {
        self.line("fn");
        self.nested(ast, &[Some(body)]);
    }

    fn visit_function_call(
        &mut self,
        ast: &Ast<'a>,
        _node: &Node<'a>,
        callee: NodeId,
        args: Option<NodeId>,
    ) {
        self.line("call");
        let children: Vec<_> = std::iter::once(callee)
            .chain(ast.arguments(args))
            .map(Some)
            .collect();
        self.nested(ast, &children);
    }

    fn visit_variable_definition(&mut self, ast: &Ast<'a>, node: &Node<'a>, initializer: NodeId) {
        self.line(&format!("let {}", node.token.lexeme));
        self.nested(ast, &[Some(initializer)]);
    }

    fn visit_statement_list(
        &mut self,
        ast: &Ast<'a>,
        node: &Node<'a>,
        _statement: Option<NodeId>,
        _next: Option<NodeId>,
    ) {
        for statement in ast.statements(node.id) {
            dispatch(self, ast, Some(statement));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{parse_tokens, tokenize};

    fn render(source: &str) -> String {
        let tokens = tokenize(source).unwrap();
        let ast = parse_tokens(&tokens).unwrap();
        TreePrinter::new().render(&ast)
    }

    #[test]
    fn outline_of_nested_program() {
        let out = render("let a = b |> { (add c) }\nlet b = ({ } a 2)");
        let expected = "\
let a
  |>
    ref b
    fn
      call
        ref add
        ref c
let b
  call
    fn
    ref a
    num 2
";
        assert_eq!(out, expected);
    }

    #[test]
    fn empty_program_renders_nothing() {
        assert_eq!(render(""), "");
    }

    #[test]
    fn long_programs_render_flat() {
        let out = render(&"a\n".repeat(100_000));
        assert_eq!(out.lines().count(), 100_000);
        assert!(out.lines().all(|line| line == "ref a"));

        let out = render(&format!("(f {})", "1 ".repeat(50_000)));
        assert_eq!(out.lines().count(), 50_002);
        assert_eq!(out.lines().last(), Some("  num 1"));
    }

    #[test]
    fn left_associative_pipes_nest_to_the_left() {
        let out = render("a |> b |> c");
        assert_eq!(out, "|>\n  |>\n    ref a\n    ref b\n  ref c\n");
    }
}
