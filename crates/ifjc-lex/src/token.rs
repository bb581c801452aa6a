//! Token definitions for the IFJ25 lexer.

use std::fmt;

use ifjc_util::Span;

/// The reserved words of IFJ25.
///
/// A lexed identifier whose text matches one of these becomes a
/// `TokenKind::Keyword` token (the lexeme is kept, since the parser
/// distinguishes keywords by text).
pub const KEYWORDS: &[&str] = &[
    "class", "if", "else", "is", "null", "return", "var", "while", "static", "import", "for",
    "Num", "String", "Null", "Ifj",
];

/// Returns true if `text` is a reserved word.
///
/// # Examples
///
/// ```
/// use ifjc_lex::token::is_reserved;
///
/// assert!(is_reserved("while"));
/// assert!(is_reserved("Ifj"));
/// assert!(!is_reserved("main"));
/// ```
pub fn is_reserved(text: &str) -> bool {
    KEYWORDS.contains(&text)
}

/// Token kind produced by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    // Identifiers & literals
    /// Identifier: `[A-Za-z][A-Za-z0-9_]*`, not a reserved word.
    Ident,
    /// Global identifier: `__` followed by `[A-Za-z0-9][A-Za-z0-9_]*`.
    Gid,
    /// Reserved word; the lexeme tells which one.
    Keyword,
    /// Decimal integer literal.
    Int,
    /// Floating-point literal (fraction and/or exponent).
    Float,
    /// Hexadecimal integer literal (`0x...`).
    Hex,
    /// String literal (single- or multi-line), escapes already processed.
    Str,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `=`
    Assign,
    /// `==`
    EqEq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,

    // Punctuation
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `,`
    Comma,
    /// `.`
    Dot,
    /// `;`
    Semicolon,
    /// `:`
    Colon,
    /// `?`
    Question,

    // Special
    /// End of line (also produced for line comments).
    Eol,
    /// End of file; stable once reached.
    Eof,
    /// Lexical error; the lexeme carries a short message.
    Error,
}

impl TokenKind {
    /// Human-readable name for diagnostics.
    pub fn symbol_name(self) -> &'static str {
        match self {
            TokenKind::Ident => "identifier",
            TokenKind::Gid => "global identifier",
            TokenKind::Keyword => "keyword",
            TokenKind::Int => "integer",
            TokenKind::Float => "float",
            TokenKind::Hex => "hexadecimal",
            TokenKind::Str => "string",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Assign => "=",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Le => "<=",
            TokenKind::Gt => ">",
            TokenKind::Ge => ">=",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Dot => ".",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Question => "?",
            TokenKind::Eol => "end of line",
            TokenKind::Eof => "end of file",
            TokenKind::Error => "error",
        }
    }

    /// Returns true for kinds whose tokens always carry a lexeme.
    pub fn carries_text(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::Gid
                | TokenKind::Keyword
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::Hex
                | TokenKind::Str
                | TokenKind::Error
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol_name())
    }
}

/// A lexical token: a kind, an optional owned lexeme, and its location.
///
/// The lexeme is owned by the token. When a token moves into an AST node
/// the node takes the token whole, so the text is allocated exactly once.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: Option<String>,
    pub span: Span,
}

impl Token {
    /// Creates a token without a lexeme.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self {
            kind,
            lexeme: None,
            span,
        }
    }

    /// Creates a token carrying a lexeme.
    pub fn with_text(kind: TokenKind, lexeme: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            lexeme: Some(lexeme.into()),
            span,
        }
    }

    /// The token's text, or `""` for kinds without one.
    ///
    /// # Examples
    ///
    /// ```
    /// use ifjc_lex::token::{Token, TokenKind};
    /// use ifjc_util::Span;
    ///
    /// let tok = Token::with_text(TokenKind::Ident, "main", Span::DUMMY);
    /// assert_eq!(tok.text(), "main");
    /// ```
    pub fn text(&self) -> &str {
        self.lexeme.as_deref().unwrap_or("")
    }

    /// Returns true if this token is the given reserved word.
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text() == word
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words() {
        for kw in KEYWORDS {
            assert!(is_reserved(kw));
        }
        assert!(!is_reserved("Program"));
        assert!(!is_reserved("main"));
        assert!(!is_reserved("ifj"));
    }

    #[test]
    fn test_is_keyword() {
        let tok = Token::with_text(TokenKind::Keyword, "while", Span::DUMMY);
        assert!(tok.is_keyword("while"));
        assert!(!tok.is_keyword("if"));

        let ident = Token::with_text(TokenKind::Ident, "while_loop", Span::DUMMY);
        assert!(!ident.is_keyword("while"));
    }

    #[test]
    fn test_carries_text() {
        assert!(TokenKind::Ident.carries_text());
        assert!(TokenKind::Str.carries_text());
        assert!(!TokenKind::Plus.carries_text());
        assert!(!TokenKind::Eof.carries_text());
    }

    #[test]
    fn test_symbol_names() {
        assert_eq!(TokenKind::Le.symbol_name(), "<=");
        assert_eq!(TokenKind::Eol.symbol_name(), "end of line");
    }
}
