//! ifjc-par - Syntactic analyzer for IFJ25.
//!
//! A recursive-descent parser drives the statement and declaration
//! grammar, pulling one token at a time from the lexer and building the
//! uniform AST of [`ast::Node`]. Expression context is delegated to the
//! operator-precedence engine in [`expr`], which parses with a 9x9
//! precedence table and hands the first post-expression token back so the
//! newline-sensitive statement grammar can resume.
//!
//! The parser is stateless apart from the single lookahead token. On the
//! first grammar mismatch it returns `CompileError::Syntax`; a lexer error
//! token surfaces as `CompileError::Lexical` at the pull site.

pub mod ast;
mod expr;
mod items;
mod stmt;

pub use ast::{Node, NodeKind};

use ifjc_lex::{Lexer, Token, TokenKind};
use ifjc_util::{CompileError, Result};

/// Recursive-descent parser over a pull-based token stream.
///
/// # Example
///
/// ```
/// use ifjc_par::Parser;
///
/// let source = "import \"ifj25\" for Ifj\nclass Program {\n}\n";
/// let ast = Parser::new(source).unwrap().parse_program().unwrap();
/// assert_eq!(ast.children.len(), 2);
/// ```
pub struct Parser<'a> {
    /// Token source.
    lexer: Lexer<'a>,

    /// Single lookahead token.
    current: Token,
}

impl<'a> Parser<'a> {
    /// Creates a parser and pulls the first token.
    pub fn new(source: &'a str) -> Result<Self> {
        let mut lexer = Lexer::new(source);
        let current = pull(&mut lexer)?;
        Ok(Self { lexer, current })
    }

    /// Parses a complete program: prologue, class, EOF.
    pub fn parse_program(&mut self) -> Result<Node> {
        let mut root = Node::new(NodeKind::Program);

        let prolog = self.parse_prolog()?;
        let class = self.parse_class()?;
        root.push(prolog);
        root.push(class);

        self.eat_eol_any()?;
        self.expect(TokenKind::Eof)?;

        Ok(root)
    }

    /// Consumes the current token and returns it; the next token becomes
    /// the lookahead.
    pub(crate) fn advance(&mut self) -> Result<Token> {
        let next = pull(&mut self.lexer)?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    /// Current lookahead token.
    pub(crate) fn current(&self) -> &Token {
        &self.current
    }

    /// Consumes a token of the expected kind or fails with a syntax error.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            self.advance()
        } else {
            Err(self.syntax_error(&format!("'{}'", kind.symbol_name())))
        }
    }

    /// Consumes the given reserved word or fails with a syntax error.
    pub(crate) fn expect_keyword(&mut self, word: &str) -> Result<Token> {
        if self.current.is_keyword(word) {
            self.advance()
        } else {
            Err(self.syntax_error(&format!("'{}'", word)))
        }
    }

    /// Returns true if the lookahead is the given reserved word.
    pub(crate) fn is_keyword(&self, word: &str) -> bool {
        self.current.is_keyword(word)
    }

    /// Consumes zero or more end-of-line tokens.
    pub(crate) fn eat_eol_any(&mut self) -> Result<()> {
        while self.current.kind == TokenKind::Eol {
            self.advance()?;
        }
        Ok(())
    }

    /// Consumes at least one end-of-line token, then any further ones.
    pub(crate) fn expect_eol(&mut self) -> Result<()> {
        if self.current.kind != TokenKind::Eol {
            return Err(self.syntax_error("end of line"));
        }
        self.eat_eol_any()
    }

    /// Builds a syntax error naming the expected symbol and the observed
    /// token class.
    pub(crate) fn syntax_error(&self, expected: &str) -> CompileError {
        CompileError::Syntax {
            message: format!("expected {}, found {}", expected, describe(&self.current)),
            span: self.current.span,
        }
    }
}

/// Pulls the next token, converting lexer error tokens into the lexical
/// error that aborts compilation.
fn pull(lexer: &mut Lexer<'_>) -> Result<Token> {
    let token = lexer.next_token();
    if token.kind == TokenKind::Error {
        return Err(CompileError::Lexical {
            message: token.text().to_string(),
            span: token.span,
        });
    }
    Ok(token)
}

/// Human-readable description of a token for error messages.
fn describe(token: &Token) -> String {
    match token.kind {
        TokenKind::Ident
        | TokenKind::Gid
        | TokenKind::Keyword
        | TokenKind::Int
        | TokenKind::Float
        | TokenKind::Hex => format!("{} '{}'", token.kind.symbol_name(), token.text()),
        TokenKind::Str => "string".to_string(),
        TokenKind::Eol | TokenKind::Eof | TokenKind::Error => {
            token.kind.symbol_name().to_string()
        }
        _ => format!("'{}'", token.kind.symbol_name()),
    }
}
