//! Statement-level parsing: blocks, the statement dispatcher, and the
//! individual statement forms.
//!
//! The statement grammar is newline-sensitive: every statement is closed
//! by at least one end-of-line token, already partially consumed by the
//! expression engine when the statement ends in an expression.

use ifjc_lex::TokenKind;
use ifjc_util::Result;

use crate::ast::{Node, NodeKind};
use crate::Parser;

impl<'a> Parser<'a> {
    /// `{ ⏎+ statements }`
    pub(crate) fn parse_block(&mut self) -> Result<Node> {
        let mut block = Node::new(NodeKind::Block);

        self.expect(TokenKind::LBrace)?;
        self.expect_eol()?;

        while self.starts_statement() {
            self.parse_statement(&mut block)?;
        }

        // A stray `else` gets its own message; it is still a syntax error.
        if self.is_keyword("else") {
            return Err(self.syntax_error_here("unexpected 'else'"));
        }

        self.expect(TokenKind::RBrace)?;
        Ok(block)
    }

    fn starts_statement(&self) -> bool {
        matches!(self.current().kind, TokenKind::Ident | TokenKind::Gid)
            || self.is_keyword("var")
            || self.is_keyword("return")
            || self.is_keyword("if")
            || self.is_keyword("while")
            || self.is_keyword("Ifj")
    }

    /// Parses one statement and appends its node(s) to the block.
    ///
    /// An `if` appends two siblings (the `If` and its `Else`).
    fn parse_statement(&mut self, block: &mut Node) -> Result<()> {
        if matches!(self.current().kind, TokenKind::Ident | TokenKind::Gid) {
            let stmt = self.parse_sid_statement()?;
            block.push(stmt);
            return Ok(());
        }

        if self.is_keyword("var") {
            block.push(self.parse_var_statement()?);
        } else if self.is_keyword("return") {
            block.push(self.parse_return_statement()?);
        } else if self.is_keyword("while") {
            block.push(self.parse_while_statement()?);
        } else if self.is_keyword("if") {
            let (if_node, else_node) = self.parse_if_statement()?;
            block.push(if_node);
            block.push(else_node);
        } else if self.is_keyword("Ifj") {
            let call = self.parse_builtin_call()?;
            self.expect_eol()?;
            block.push(call);
        } else {
            return Err(self.syntax_error("statement"));
        }

        Ok(())
    }

    /// `var IDENT ( "=" expr )? ⏎+`
    ///
    /// A GID is accepted after `var` as well; whether it may be declared
    /// here is a semantic question (the analyzer rejects it with code 4).
    fn parse_var_statement(&mut self) -> Result<Node> {
        self.advance()?; // var

        let name = match self.current().kind {
            TokenKind::Ident | TokenKind::Gid => self.advance()?,
            _ => return Err(self.syntax_error("identifier after 'var'")),
        };
        let mut decl = Node::with_token(NodeKind::VarDecl, name);

        if self.current().kind == TokenKind::Assign {
            self.advance()?;
            let init = self.parse_expression()?;
            let mut assign = Node::new(NodeKind::Assign);
            assign.push(init);
            decl.push(assign);
        }

        self.expect_eol()?;
        Ok(decl)
    }

    /// `return expr? ⏎+`
    fn parse_return_statement(&mut self) -> Result<Node> {
        self.advance()?; // return

        let mut ret = Node::new(NodeKind::Return);
        if self.starts_expression() {
            ret.push(self.parse_expression()?);
        }

        self.expect_eol()?;
        Ok(ret)
    }

    /// `if ( expr ) block else block ⏎+`
    ///
    /// Returns the `If` node and its `Else` sibling.
    fn parse_if_statement(&mut self) -> Result<(Node, Node)> {
        self.advance()?; // if

        let mut if_node = Node::new(NodeKind::If);

        self.expect(TokenKind::LParen)?;
        if_node.push(self.parse_expression()?);
        self.expect(TokenKind::RParen)?;

        if_node.push(self.parse_block()?);

        if !self.is_keyword("else") {
            return Err(self.syntax_error("'else' after if block"));
        }
        self.advance()?;

        let mut else_node = Node::new(NodeKind::Else);
        else_node.push(self.parse_block()?);

        self.expect_eol()?;
        Ok((if_node, else_node))
    }

    /// `while ( expr ) block ⏎+`
    fn parse_while_statement(&mut self) -> Result<Node> {
        self.advance()?; // while

        let mut while_node = Node::new(NodeKind::While);

        self.expect(TokenKind::LParen)?;
        while_node.push(self.parse_expression()?);
        self.expect(TokenKind::RParen)?;

        while_node.push(self.parse_block()?);

        self.expect_eol()?;
        Ok(while_node)
    }

    /// `(IDENT|GID) ( "=" expr | "(" arg-list ")" )? ⏎+`
    fn parse_sid_statement(&mut self) -> Result<Node> {
        let id = self.advance()?;

        match self.current().kind {
            TokenKind::Assign => {
                self.advance()?;
                let value = self.parse_expression()?;
                let mut assign = Node::with_token(NodeKind::Assign, id);
                assign.push(value);
                self.expect_eol()?;
                Ok(assign)
            }
            TokenKind::LParen => {
                self.advance()?;
                let mut call = Node::with_token(NodeKind::Call, id);
                self.parse_arg_list(&mut call)?;
                self.expect(TokenKind::RParen)?;
                self.expect_eol()?;
                Ok(call)
            }
            _ => {
                let kind = if id.kind == TokenKind::Gid {
                    NodeKind::Gid
                } else {
                    NodeKind::Identifier
                };
                self.expect_eol()?;
                Ok(Node::with_token(kind, id))
            }
        }
    }

    /// `Ifj . IDENT ( arg-list )`
    ///
    /// Builds a `Call` with no token: the first child is the qualified
    /// `FuncName`, the remaining children are the arguments.
    pub(crate) fn parse_builtin_call(&mut self) -> Result<Node> {
        let ifj = self.expect_keyword("Ifj")?;
        self.expect(TokenKind::Dot)?;
        let name = self.expect(TokenKind::Ident)?;

        let mut func_name = Node::new(NodeKind::FuncName);
        func_name.push(Node::with_token(NodeKind::Identifier, ifj));
        func_name.push(Node::with_token(NodeKind::Identifier, name));

        let mut call = Node::new(NodeKind::Call);
        call.push(func_name);

        self.expect(TokenKind::LParen)?;
        self.parse_arg_list(&mut call)?;
        self.expect(TokenKind::RParen)?;

        Ok(call)
    }

    /// `ε | expr ( "," ⏎? expr )*` — arguments appended to `call`.
    fn parse_arg_list(&mut self, call: &mut Node) -> Result<()> {
        if self.current().kind == TokenKind::RParen {
            return Ok(());
        }

        loop {
            let arg = self.parse_expression()?;
            call.push(arg);

            if self.current().kind == TokenKind::Comma {
                self.advance()?;
                self.eat_eol_any()?;
            } else {
                return Ok(());
            }
        }
    }

    /// Returns true if the lookahead can start an expression.
    fn starts_expression(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Ident
                | TokenKind::Gid
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Hex
                | TokenKind::Str
                | TokenKind::LParen
        ) || self.is_keyword("null")
            || self.is_keyword("Num")
            || self.is_keyword("String")
            || self.is_keyword("Null")
            || self.is_keyword("Ifj")
    }

    /// Syntax error with a fixed message (no "expected" prefix).
    pub(crate) fn syntax_error_here(&self, message: &str) -> ifjc_util::CompileError {
        ifjc_util::CompileError::Syntax {
            message: message.to_string(),
            span: self.current().span,
        }
    }
}
