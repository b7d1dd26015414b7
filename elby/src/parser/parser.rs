use log::{debug, trace};

use super::buffer::TokenBuffer;
use super::token::{Token, TokenKind};
use crate::error::{ParseError, Production};
use crate::ir::ast::{Ast, AstBuilder, NodeId, NodeKind};

/// Parses a full program.
///
/// ```text
/// Program       := StatementList EOF
/// StatementList := Statement* (until EOF or '}')
/// Statement     := 'let' ID '=' Expression | Expression
/// Expression    := Call ('|>' Call)*
/// Call          := '(' Expression ArgList? ')' | Primary
/// ArgList       := Expression ArgList?
/// Primary       := NUMBER | ID | '{' StatementList '}'
/// ```
///
/// The first unexpected token aborts the parse; nodes allocated so far are
/// dropped with the arena.
pub fn parse_tokens<'a>(tokens: &'a TokenBuffer<'a>) -> Result<Ast<'a>, ParseError> {
    Parser::new(tokens.as_slice()).parse_program()
}

struct Parser<'a> {
    tokens: &'a [Token<'a>],
    position: usize,
    nodes: AstBuilder<'a>,
}

impl<'a> Parser<'a> {
    fn new(tokens: &'a [Token<'a>]) -> Self {
        Self {
            tokens,
            position: 0,
            nodes: AstBuilder::new(),
        }
    }

    fn parse_program(mut self) -> Result<Ast<'a>, ParseError> {
        debug!("parsing {} tokens", self.tokens.len());

        let root = self.parse_statement_list()?;
        if !self.check(TokenKind::Eof) {
            return Err(self.unexpected(Production::Program, Some(TokenKind::Eof.describe())));
        }

        debug!("parsed {} nodes", self.nodes.len());
        Ok(self.nodes.finish(root))
    }

    /// Builds the chain front to back: each cell is allocated as a sentinel
    /// and linked once its statement has been parsed.
    fn parse_statement_list(&mut self) -> Result<NodeId, ParseError> {
        let head = self.empty_cell();
        let mut cell = head;

        while !self.at_list_end() {
            let statement = self.parse_statement()?;
            let next = self.empty_cell();
            self.nodes.link_statement(cell, statement, next);
            cell = next;
        }

        Ok(head)
    }

    fn parse_statement(&mut self) -> Result<NodeId, ParseError> {
        if !self.check(TokenKind::Let) {
            return self.parse_expression();
        }

        self.advance(); // consume 'let'
        let symbol = self.expect(TokenKind::Identifier, Production::Statement)?;
        self.expect(TokenKind::Assign, Production::Statement)?;
        let initializer = self.parse_expression()?;

        Ok(self
            .nodes
            .alloc(symbol, NodeKind::VariableDefinition { initializer }))
    }

    fn parse_expression(&mut self) -> Result<NodeId, ParseError> {
        self.parse_pipe()
    }

    fn parse_pipe(&mut self) -> Result<NodeId, ParseError> {
        let mut left = self.parse_call()?;

        while self.check(TokenKind::Pipe) {
            let op = self.advance(); // consume '|>'
            let right = self.parse_call()?;
            left = self.nodes.alloc(op, NodeKind::BinaryOp { left, right });
        }

        Ok(left)
    }

    fn parse_call(&mut self) -> Result<NodeId, ParseError> {
        if !self.check(TokenKind::LParen) {
            return self.parse_primary();
        }

        let open = self.advance(); // consume '('
        let callee = self.parse_expression()?;
        let args = if self.starts_expression() {
            Some(self.parse_arg_list()?)
        } else {
            None
        };
        self.expect(TokenKind::RParen, Production::Call)?;

        Ok(self.nodes.alloc(open, NodeKind::FunctionCall { callee, args }))
    }

    /// Parses the arguments in a loop, then links the cells back to front
    /// so each one points at the cell after it.
    fn parse_arg_list(&mut self) -> Result<NodeId, ParseError> {
        let first = self.current();
        let expr = self.parse_expression()?;

        let mut rest = Vec::new();
        while self.starts_expression() {
            let token = self.current();
            rest.push((token, self.parse_expression()?));
        }

        let mut next = None;
        for (token, arg) in rest.into_iter().rev() {
            next = Some(self.nodes.alloc(token, NodeKind::ExpressionList { expr: arg, next }));
        }

        Ok(self.nodes.alloc(first, NodeKind::ExpressionList { expr, next }))
    }

    fn parse_primary(&mut self) -> Result<NodeId, ParseError> {
        let token = self.current();
        match token.kind {
            TokenKind::Number => {
                self.advance();
                Ok(self.nodes.alloc(token, NodeKind::Constant))
            }
            TokenKind::Identifier => {
                self.advance();
                Ok(self.nodes.alloc(token, NodeKind::Reference))
            }
            TokenKind::LBrace => {
                self.advance(); // consume '{'
                let body = self.parse_statement_list()?;
                self.expect(TokenKind::RBrace, Production::Function)?;
                Ok(self
                    .nodes
                    .alloc(token, NodeKind::FunctionDefinition { body }))
            }
            _ => Err(self.unexpected(Production::Primary, Some("expression"))),
        }
    }

    // Helpers

    fn empty_cell(&mut self) -> NodeId {
        let token = self.current();
        self.nodes.alloc(
            token,
            NodeKind::StatementList {
                statement: None,
                next: None,
            },
        )
    }

    fn at_list_end(&self) -> bool {
        self.check(TokenKind::Eof) || self.check(TokenKind::RBrace)
    }

    fn starts_expression(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Number | TokenKind::Identifier | TokenKind::LBrace | TokenKind::LParen
        )
    }

    fn current(&self) -> &'a Token<'a> {
        let tokens = self.tokens;
        &tokens[self.position]
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().is(kind)
    }

    /// Moves past the current token and returns it. The cursor never moves
    /// beyond the trailing EOF.
    fn advance(&mut self) -> &'a Token<'a> {
        let eaten = self.current();
        if self.position + 1 < self.tokens.len() {
            self.position += 1;
        }
        trace!("ate {}, got {}", eaten, self.current());
        eaten
    }

    fn expect(
        &mut self,
        kind: TokenKind,
        production: Production,
    ) -> Result<&'a Token<'a>, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.unexpected(production, Some(kind.describe())))
        }
    }

    fn unexpected(&self, production: Production, expected: Option<&'static str>) -> ParseError {
        let token = self.current();
        debug!("{} failed at line {} on {}", production, token.line(), token);
        ParseError {
            production,
            line: token.line(),
            found: token.to_string(),
            expected,
        }
    }
}
