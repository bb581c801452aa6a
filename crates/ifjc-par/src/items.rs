//! Declaration-level parsing: prologue, class, function definitions.

use ifjc_lex::TokenKind;
use ifjc_util::Result;

use crate::ast::{Node, NodeKind};
use crate::Parser;

impl<'a> Parser<'a> {
    /// Parses the mandatory prologue: `import "ifj25" for Ifj`.
    pub(crate) fn parse_prolog(&mut self) -> Result<Node> {
        let mut prolog = Node::new(NodeKind::Prolog);

        self.expect_keyword("import")?;
        self.eat_eol_any()?;

        if self.current().kind != TokenKind::Str || self.current().text() != "ifj25" {
            return Err(self.syntax_error("string \"ifj25\""));
        }
        let lang = self.advance()?;
        prolog.push(Node::with_token(NodeKind::Literal, lang));

        self.expect_keyword("for")?;
        self.eat_eol_any()?;

        let ifj = self.expect_keyword("Ifj")?;
        prolog.push(Node::with_token(NodeKind::Identifier, ifj));

        self.expect_eol()?;
        Ok(prolog)
    }

    /// Parses the single class: `class Program { function-defs }`.
    pub(crate) fn parse_class(&mut self) -> Result<Node> {
        let mut class = Node::new(NodeKind::Class);

        self.expect_keyword("class")?;

        if self.current().kind != TokenKind::Ident || self.current().text() != "Program" {
            return Err(self.syntax_error("class name 'Program'"));
        }
        let name = self.advance()?;
        class.push(Node::with_token(NodeKind::Identifier, name));

        self.expect(TokenKind::LBrace)?;
        self.expect_eol()?;

        let mut functions = Node::new(NodeKind::Functions);
        while self.is_keyword("static") {
            functions.push(self.parse_function_def()?);
        }
        class.push(functions);

        self.expect(TokenKind::RBrace)?;
        Ok(class)
    }

    /// Parses one `static` definition: a function, a getter, or a setter,
    /// told apart by the token after the name.
    fn parse_function_def(&mut self) -> Result<Node> {
        let mut def = Node::new(NodeKind::FunctionDef);

        self.expect_keyword("static")?;
        let name = self.expect(TokenKind::Ident)?;
        def.push(Node::with_token(NodeKind::Identifier, name));

        let kind = match self.current().kind {
            TokenKind::LParen => self.parse_function_kind()?,
            TokenKind::LBrace => self.parse_getter_kind()?,
            TokenKind::Assign => self.parse_setter_kind()?,
            _ => return Err(self.syntax_error("'(', '{' or '=' after function name")),
        };
        def.push(kind);

        Ok(def)
    }

    /// `( param-list ) block ⏎+`
    fn parse_function_kind(&mut self) -> Result<Node> {
        let mut function = Node::new(NodeKind::Function);

        self.expect(TokenKind::LParen)?;
        function.push(self.parse_param_list()?);
        self.expect(TokenKind::RParen)?;

        function.push(self.parse_block()?);
        self.expect_eol()?;

        Ok(function)
    }

    /// `block ⏎+`
    fn parse_getter_kind(&mut self) -> Result<Node> {
        let mut getter = Node::new(NodeKind::Getter);
        getter.push(self.parse_block()?);
        self.expect_eol()?;
        Ok(getter)
    }

    /// `= ( IDENT ) block ⏎+`
    fn parse_setter_kind(&mut self) -> Result<Node> {
        let mut setter = Node::new(NodeKind::Setter);

        self.expect(TokenKind::Assign)?;
        self.expect(TokenKind::LParen)?;
        let param = self.expect(TokenKind::Ident)?;
        setter.push(Node::with_token(NodeKind::Identifier, param));
        self.expect(TokenKind::RParen)?;

        setter.push(self.parse_block()?);
        self.expect_eol()?;

        Ok(setter)
    }

    /// `ε | IDENT ( "," ⏎? IDENT )*`
    fn parse_param_list(&mut self) -> Result<Node> {
        let mut params = Node::new(NodeKind::ParamList);

        if self.current().kind == TokenKind::RParen {
            return Ok(params);
        }

        let first = self.expect(TokenKind::Ident)?;
        params.push(Node::with_token(NodeKind::Identifier, first));

        while self.current().kind == TokenKind::Comma {
            self.advance()?;
            self.eat_eol_any()?;
            let param = self.expect(TokenKind::Ident)?;
            params.push(Node::with_token(NodeKind::Identifier, param));
        }

        Ok(params)
    }
}
