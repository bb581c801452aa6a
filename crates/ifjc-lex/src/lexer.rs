//! Main lexer implementation for IFJ25.
//!
//! The lexer is an explicit finite state machine driven one character at a
//! time by a [`Cursor`]. Each call to [`Lexer::next_token`] re-enters the
//! start state, first consuming insignificant whitespace and comments:
//!
//! - spaces, tabs and carriage returns are skipped,
//! - a newline produces an `Eol` token,
//! - a line comment (`// ...`) is equivalent to a newline,
//! - a block comment (`/* ... */`, nesting allowed) is invisible
//!   whitespace; leaving it unterminated is a lexical error.
//!
//! Lexical errors are returned as `Error` tokens carrying a short message;
//! the lexer advances past the offending input so callers could in
//! principle resynchronize, although the front end aborts on the first one.

use ifjc_util::Span;

use crate::cursor::Cursor;
use crate::token::{is_reserved, Token, TokenKind};

/// States of the lexer automaton.
///
/// `Start` is re-entered after every emitted token. The numeric states
/// encode the literal sublanguage (`0`, `0x...`, fraction, exponent); the
/// string states distinguish ordinary content, escapes, and the quote-run
/// bookkeeping of multi-line literals.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    PreGid,
    Gid,
    Ident,
    SingleZero,
    PreHex,
    Hex,
    PreFloat,
    Float,
    PreExp,
    Exp,
    Int,
    InString,
    Esc,
    MultilineString,
    MultiQuote1,
    MultiQuote2,
}

/// Result of skipping whitespace: did we cross a newline boundary?
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Ws {
    None,
    Eol,
}

/// The IFJ25 lexer.
///
/// # Example
///
/// ```
/// use ifjc_lex::{Lexer, TokenKind};
///
/// let mut lexer = Lexer::new("var x = 42");
/// assert_eq!(lexer.next_token().kind, TokenKind::Keyword);
/// assert_eq!(lexer.next_token().kind, TokenKind::Ident);
/// assert_eq!(lexer.next_token().kind, TokenKind::Assign);
/// assert_eq!(lexer.next_token().kind, TokenKind::Int);
/// assert_eq!(lexer.next_token().kind, TokenKind::Eof);
/// ```
pub struct Lexer<'a> {
    /// Character cursor over the source.
    cursor: Cursor<'a>,

    /// Start byte position of the current token.
    token_start: usize,

    /// Start line of the current token.
    token_start_line: u32,

    /// Start column of the current token.
    token_start_column: u32,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            token_start: 0,
            token_start_line: 1,
            token_start_column: 1,
        }
    }

    /// Returns the next token from the source.
    ///
    /// Ownership of the token's lexeme transfers to the caller. `Eof` is
    /// stable: once the input is exhausted every further call returns it
    /// again.
    pub fn next_token(&mut self) -> Token {
        match self.skip_whitespace_and_comments() {
            Ok(Ws::Eol) => {
                return Token::new(TokenKind::Eol, self.span_here());
            }
            Ok(Ws::None) => {}
            Err(message) => {
                return self.error_token(message);
            }
        }

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return Token::new(TokenKind::Eof, self.token_span());
        }

        let mut state = State::Start;
        // Escape-processed string content; identifiers and numbers slice
        // the source directly instead.
        let mut buf = String::new();

        loop {
            let c = self.cursor.current_char();

            match state {
                State::Start => match c {
                    '0' => {
                        self.cursor.advance();
                        state = State::SingleZero;
                    }
                    '1'..='9' => {
                        self.cursor.advance();
                        state = State::Int;
                    }
                    'a'..='z' | 'A'..='Z' => {
                        self.cursor.advance();
                        state = State::Ident;
                    }
                    '_' => {
                        self.cursor.advance();
                        if self.cursor.current_char() == '_' {
                            self.cursor.advance();
                            state = State::PreGid;
                        } else {
                            return self.error_token("identifiers cannot start with a single '_'");
                        }
                    }
                    '"' => {
                        self.cursor.advance();
                        if self.cursor.current_char() == '"' && self.cursor.peek_char(1) == '"' {
                            self.cursor.advance();
                            self.cursor.advance();
                            self.skip_multiline_opening_line();
                            state = State::MultilineString;
                        } else {
                            state = State::InString;
                        }
                    }
                    _ => return self.lex_operator(),
                },

                State::PreGid => {
                    if c.is_ascii_alphanumeric() {
                        self.cursor.advance();
                        state = State::Gid;
                    } else {
                        return self.error_token("invalid character after '__'");
                    }
                }

                State::Gid => {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        self.cursor.advance();
                    } else {
                        let text = self.cursor.slice_from(self.token_start);
                        return self.text_token(TokenKind::Gid, text.to_string());
                    }
                }

                State::Ident => {
                    if c.is_ascii_alphanumeric() || c == '_' {
                        self.cursor.advance();
                    } else {
                        let text = self.cursor.slice_from(self.token_start);
                        let kind = if is_reserved(text) {
                            TokenKind::Keyword
                        } else {
                            TokenKind::Ident
                        };
                        return self.text_token(kind, text.to_string());
                    }
                }

                State::SingleZero => match c {
                    'x' | 'X' => {
                        self.cursor.advance();
                        state = State::PreHex;
                    }
                    '.' => {
                        self.cursor.advance();
                        state = State::PreFloat;
                    }
                    'e' | 'E' => {
                        self.cursor.advance();
                        state = State::PreExp;
                    }
                    _ => {
                        return self.text_token(TokenKind::Int, "0".to_string());
                    }
                },

                State::PreHex => {
                    if c.is_ascii_hexdigit() {
                        self.cursor.advance();
                        state = State::Hex;
                    } else {
                        return self.error_token("invalid hexadecimal literal");
                    }
                }

                State::Hex => {
                    if c.is_ascii_hexdigit() {
                        self.cursor.advance();
                    } else {
                        let text = self.cursor.slice_from(self.token_start);
                        return self.text_token(TokenKind::Hex, text.to_string());
                    }
                }

                State::Int => match c {
                    '0'..='9' => {
                        self.cursor.advance();
                    }
                    '.' => {
                        self.cursor.advance();
                        state = State::PreFloat;
                    }
                    'e' | 'E' => {
                        self.cursor.advance();
                        state = State::PreExp;
                    }
                    _ => {
                        let text = self.cursor.slice_from(self.token_start);
                        return self.text_token(TokenKind::Int, text.to_string());
                    }
                },

                State::PreFloat => {
                    if c.is_ascii_digit() {
                        self.cursor.advance();
                        state = State::Float;
                    } else {
                        return self.error_token("invalid fraction in float literal");
                    }
                }

                State::Float => match c {
                    '0'..='9' => {
                        self.cursor.advance();
                    }
                    'e' | 'E' => {
                        self.cursor.advance();
                        state = State::PreExp;
                    }
                    _ => {
                        let text = self.cursor.slice_from(self.token_start);
                        return self.text_token(TokenKind::Float, text.to_string());
                    }
                },

                State::PreExp => {
                    if c == '+' || c == '-' {
                        self.cursor.advance();
                    }
                    if self.cursor.current_char().is_ascii_digit() {
                        self.cursor.advance();
                        state = State::Exp;
                    } else {
                        return self.error_token("invalid exponent in float literal");
                    }
                }

                State::Exp => {
                    if c.is_ascii_digit() {
                        self.cursor.advance();
                    } else {
                        let text = self.cursor.slice_from(self.token_start);
                        return self.text_token(TokenKind::Float, text.to_string());
                    }
                }

                State::InString => {
                    if self.cursor.is_at_end() || c == '\n' {
                        return self.error_token("unterminated string literal");
                    }
                    match c {
                        '"' => {
                            self.cursor.advance();
                            return self.text_token(TokenKind::Str, buf);
                        }
                        '\\' => {
                            self.cursor.advance();
                            state = State::Esc;
                        }
                        _ if (c as u32) <= 31 => {
                            return self.error_token("invalid control character in string");
                        }
                        _ => {
                            buf.push(c);
                            self.cursor.advance();
                        }
                    }
                }

                State::Esc => {
                    if self.cursor.is_at_end() {
                        return self.error_token("unterminated escape sequence");
                    }
                    match c {
                        'n' => {
                            buf.push('\n');
                            self.cursor.advance();
                            state = State::InString;
                        }
                        'r' => {
                            buf.push('\r');
                            self.cursor.advance();
                            state = State::InString;
                        }
                        't' => {
                            buf.push('\t');
                            self.cursor.advance();
                            state = State::InString;
                        }
                        '\\' => {
                            buf.push('\\');
                            self.cursor.advance();
                            state = State::InString;
                        }
                        '"' => {
                            buf.push('"');
                            self.cursor.advance();
                            state = State::InString;
                        }
                        'x' => {
                            self.cursor.advance();
                            let h1 = self.cursor.current_char().to_digit(16);
                            let h2 = self.cursor.peek_char(1).to_digit(16);
                            match (h1, h2) {
                                (Some(hi), Some(lo)) => {
                                    self.cursor.advance();
                                    self.cursor.advance();
                                    // \xHH inserts the value as one code unit.
                                    let value = (hi << 4) | lo;
                                    buf.push(char::from_u32(value).unwrap_or('\u{FFFD}'));
                                    state = State::InString;
                                }
                                _ => {
                                    return self.error_token("invalid hex escape in string");
                                }
                            }
                        }
                        _ => {
                            return self.error_token("invalid escape sequence in string");
                        }
                    }
                }

                State::MultilineString => {
                    if self.cursor.is_at_end() {
                        return self.error_token("unterminated multi-line string");
                    }
                    match c {
                        '"' => {
                            self.cursor.advance();
                            state = State::MultiQuote1;
                        }
                        '\r' => {
                            self.cursor.advance();
                        }
                        _ => {
                            buf.push(c);
                            self.cursor.advance();
                        }
                    }
                }

                State::MultiQuote1 => {
                    if c == '"' {
                        self.cursor.advance();
                        state = State::MultiQuote2;
                    } else {
                        // A lone quote inside the literal is kept verbatim.
                        buf.push('"');
                        state = State::MultilineString;
                    }
                }

                State::MultiQuote2 => {
                    if c == '"' {
                        self.cursor.advance();
                        trim_multiline_close(&mut buf);
                        return self.text_token(TokenKind::Str, buf);
                    }
                    // A double-quote run of two is kept verbatim.
                    buf.push('"');
                    buf.push('"');
                    state = State::MultilineString;
                }
            }
        }
    }

    /// Lexes operators and punctuation from the start state.
    fn lex_operator(&mut self) -> Token {
        let c = self.cursor.current_char();
        self.cursor.advance();

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '=' => {
                if self.cursor.match_char('=') {
                    TokenKind::EqEq
                } else {
                    TokenKind::Assign
                }
            }
            '<' => {
                if self.cursor.match_char('=') {
                    TokenKind::Le
                } else {
                    TokenKind::Lt
                }
            }
            '>' => {
                if self.cursor.match_char('=') {
                    TokenKind::Ge
                } else {
                    TokenKind::Gt
                }
            }
            '!' => {
                if self.cursor.match_char('=') {
                    TokenKind::NotEq
                } else {
                    return self.error_token("unexpected '!' (did you mean '!='?)");
                }
            }
            _ => {
                return self.error_token("unexpected character");
            }
        };

        Token::new(kind, self.token_span())
    }

    /// Skips whitespace and comments before a token.
    ///
    /// Returns `Ws::Eol` when a newline or line comment was crossed. A
    /// block comment is invisible: it neither produces an EOL nor
    /// suppresses a following newline.
    fn skip_whitespace_and_comments(&mut self) -> Result<Ws, &'static str> {
        loop {
            match self.cursor.current_char() {
                ' ' | '\t' | '\r' => {
                    self.cursor.advance();
                }
                '\n' => {
                    self.mark_token_start();
                    self.cursor.advance();
                    return Ok(Ws::Eol);
                }
                '/' => match self.cursor.peek_char(1) {
                    '/' => {
                        self.mark_token_start();
                        while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                            self.cursor.advance();
                        }
                        // Consume the newline so a line comment is exactly
                        // one EOL.
                        if !self.cursor.is_at_end() {
                            self.cursor.advance();
                        }
                        return Ok(Ws::Eol);
                    }
                    '*' => {
                        self.mark_token_start();
                        self.cursor.advance();
                        self.cursor.advance();
                        self.skip_block_comment()?;
                    }
                    _ => return Ok(Ws::None),
                },
                _ => return Ok(Ws::None),
            }
        }
    }

    /// Skips a block comment body; the opening `/*` is already consumed.
    ///
    /// Nested comments must be closed at matching depth.
    fn skip_block_comment(&mut self) -> Result<(), &'static str> {
        let mut depth: u32 = 1;

        while depth > 0 {
            if self.cursor.is_at_end() {
                return Err("unterminated block comment");
            }

            if self.cursor.current_char() == '/' && self.cursor.peek_char(1) == '*' {
                self.cursor.advance();
                self.cursor.advance();
                depth += 1;
            } else if self.cursor.current_char() == '*' && self.cursor.peek_char(1) == '/' {
                self.cursor.advance();
                self.cursor.advance();
                depth -= 1;
            } else {
                self.cursor.advance();
            }
        }

        Ok(())
    }

    /// Discards the opening line of a multi-line string when it contains
    /// only whitespace after the `"""` delimiter.
    fn skip_multiline_opening_line(&mut self) {
        let mut offset = 0;
        loop {
            match self.cursor.peek_char(offset) {
                ' ' | '\t' | '\r' => offset += 1,
                '\n' => {
                    self.cursor.advance_n(offset + 1);
                    return;
                }
                _ => return,
            }
        }
    }

    /// Records the current cursor location as the token start.
    fn mark_token_start(&mut self) {
        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();
    }

    /// Span from the recorded token start to the current position.
    fn token_span(&self) -> Span {
        Span::new(
            self.token_start,
            self.cursor.position(),
            self.token_start_line,
            self.token_start_column,
        )
    }

    /// Zero-width span at the recorded token start.
    fn span_here(&self) -> Span {
        Span::new(
            self.token_start,
            self.token_start,
            self.token_start_line,
            self.token_start_column,
        )
    }

    fn text_token(&self, kind: TokenKind, text: String) -> Token {
        Token::with_text(kind, text, self.token_span())
    }

    /// Builds an error token. The cursor has already advanced past the
    /// offending input, so a caller that wanted to resynchronize could.
    fn error_token(&mut self, message: &'static str) -> Token {
        if !self.cursor.is_at_end() {
            self.cursor.advance();
        }
        Token::with_text(TokenKind::Error, message, self.token_span())
    }
}

/// Strips the closing-line whitespace of a multi-line string.
///
/// The closing delimiter's line contributes nothing to the value: its
/// leading whitespace and the newline immediately before it are removed.
/// When the delimiter follows other text on the same line, nothing is
/// stripped.
fn trim_multiline_close(buf: &mut String) {
    let tail_start = match buf.rfind('\n') {
        Some(idx) => idx,
        None => return,
    };
    if buf[tail_start + 1..].chars().all(|c| c == ' ' || c == '\t') {
        buf.truncate(tail_start);
    }
}

/// Iterator over tokens, ending after the first `Eof`.
impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            None
        } else {
            Some(token)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let kind = tok.kind;
            out.push(kind);
            if kind == TokenKind::Eof || kind == TokenKind::Error {
                return out;
            }
        }
    }

    fn single(source: &str) -> Token {
        Lexer::new(source).next_token()
    }

    #[test]
    fn test_keywords_and_identifiers() {
        let mut lexer = Lexer::new("var x while whileX Ifj");
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Keyword);
        assert_eq!(tok.text(), "var");

        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Ident);
        assert_eq!(tok.text(), "x");

        assert_eq!(lexer.next_token().kind, TokenKind::Keyword);
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().kind, TokenKind::Keyword);
    }

    #[test]
    fn test_gid() {
        let tok = single("__counter");
        assert_eq!(tok.kind, TokenKind::Gid);
        assert_eq!(tok.text(), "__counter");

        let tok = single("__9lives");
        assert_eq!(tok.kind, TokenKind::Gid);
    }

    #[test]
    fn test_single_underscore_is_error() {
        assert_eq!(single("_x").kind, TokenKind::Error);
        assert_eq!(single("_").kind, TokenKind::Error);
    }

    #[test]
    fn test_double_underscore_alone_is_error() {
        assert_eq!(single("__").kind, TokenKind::Error);
        assert_eq!(single("__ x").kind, TokenKind::Error);
    }

    #[test]
    fn test_bare_zero() {
        let tok = single("0");
        assert_eq!(tok.kind, TokenKind::Int);
        assert_eq!(tok.text(), "0");
    }

    #[test]
    fn test_integers() {
        let tok = single("1234");
        assert_eq!(tok.kind, TokenKind::Int);
        assert_eq!(tok.text(), "1234");
    }

    #[test]
    fn test_hex() {
        let tok = single("0x1Af");
        assert_eq!(tok.kind, TokenKind::Hex);
        assert_eq!(tok.text(), "0x1Af");

        assert_eq!(single("0x").kind, TokenKind::Error);
        assert_eq!(single("0xg").kind, TokenKind::Error);
    }

    #[test]
    fn test_floats() {
        let tok = single("3.25");
        assert_eq!(tok.kind, TokenKind::Float);
        assert_eq!(tok.text(), "3.25");

        let tok = single("1e10");
        assert_eq!(tok.kind, TokenKind::Float);

        let tok = single("2.5E-3");
        assert_eq!(tok.kind, TokenKind::Float);
        assert_eq!(tok.text(), "2.5E-3");

        let tok = single("0.5");
        assert_eq!(tok.kind, TokenKind::Float);

        let tok = single("0e4");
        assert_eq!(tok.kind, TokenKind::Float);
    }

    #[test]
    fn test_bad_floats() {
        assert_eq!(single("3.").kind, TokenKind::Error);
        assert_eq!(single("1e").kind, TokenKind::Error);
        assert_eq!(single("1e+").kind, TokenKind::Error);
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("+ - * / = == != < <= > >="),
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Assign,
                TokenKind::EqEq,
                TokenKind::NotEq,
                TokenKind::Lt,
                TokenKind::Le,
                TokenKind::Gt,
                TokenKind::Ge,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds("(){},.;:?"),
            vec![
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Dot,
                TokenKind::Semicolon,
                TokenKind::Colon,
                TokenKind::Question,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_lone_bang_is_error() {
        assert_eq!(single("!x").kind, TokenKind::Error);
    }

    #[test]
    fn test_newline_is_eol() {
        assert_eq!(
            kinds("a\nb"),
            vec![
                TokenKind::Ident,
                TokenKind::Eol,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_crlf() {
        assert_eq!(
            kinds("a\r\nb"),
            vec![
                TokenKind::Ident,
                TokenKind::Eol,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_line_comment_is_eol() {
        assert_eq!(
            kinds("a // comment\nb"),
            vec![
                TokenKind::Ident,
                TokenKind::Eol,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_line_comment_at_eof() {
        assert_eq!(
            kinds("a // trailing"),
            vec![TokenKind::Ident, TokenKind::Eol, TokenKind::Eof]
        );
    }

    #[test]
    fn test_block_comment_is_invisible() {
        assert_eq!(
            kinds("a /* hidden */ b"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_block_comment_then_newline_is_single_eol() {
        assert_eq!(
            kinds("a /* c */\nb"),
            vec![
                TokenKind::Ident,
                TokenKind::Eol,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_nested_block_comment() {
        assert_eq!(
            kinds("a /* outer /* inner */ still */ b"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let tok = single("/* never closed");
        assert_eq!(tok.kind, TokenKind::Error);
        assert_eq!(tok.text(), "unterminated block comment");
    }

    #[test]
    fn test_slash_is_division() {
        assert_eq!(
            kinds("a / b"),
            vec![
                TokenKind::Ident,
                TokenKind::Slash,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_simple_string() {
        let tok = single("\"hello\"");
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "hello");
    }

    #[test]
    fn test_empty_string() {
        let tok = single("\"\" x");
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "");
    }

    #[test]
    fn test_string_escapes() {
        let tok = single(r#""a\nb\tc\\d\"e""#);
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "a\nb\tc\\d\"e");
    }

    #[test]
    fn test_hex_escape() {
        let tok = single(r#""\x41\x20\x42""#);
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "A B");

        assert_eq!(single(r#""\x4""#).kind, TokenKind::Error);
        assert_eq!(single(r#""\xZZ""#).kind, TokenKind::Error);
    }

    #[test]
    fn test_bad_escape() {
        assert_eq!(single(r#""\q""#).kind, TokenKind::Error);
    }

    #[test]
    fn test_unterminated_string() {
        assert_eq!(single("\"abc\ndef\"").kind, TokenKind::Error);
        assert_eq!(single("\"abc").kind, TokenKind::Error);
    }

    #[test]
    fn test_control_char_in_string() {
        assert_eq!(single("\"a\u{01}b\"").kind, TokenKind::Error);
    }

    #[test]
    fn test_multiline_string_basic() {
        let tok = single("\"\"\"\nfirst\nsecond\n\"\"\"");
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "first\nsecond");
    }

    #[test]
    fn test_multiline_opening_line_elided_when_blank() {
        let tok = single("\"\"\"   \nbody\n\"\"\"");
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "body");
    }

    #[test]
    fn test_multiline_opening_content_kept() {
        let tok = single("\"\"\"head\ntail\n\"\"\"");
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "head\ntail");
    }

    #[test]
    fn test_multiline_closing_indent_stripped() {
        let tok = single("\"\"\"\nbody\n    \"\"\"");
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "body");
    }

    #[test]
    fn test_multiline_quote_runs_preserved() {
        let tok = single("\"\"\"\nsay \"hi\" and \"\"twice\"\"\n\"\"\"");
        assert_eq!(tok.kind, TokenKind::Str);
        assert_eq!(tok.text(), "say \"hi\" and \"\"twice\"\"");
    }

    #[test]
    fn test_multiline_unterminated() {
        let tok = single("\"\"\"\nnever closed");
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn test_eof_is_stable() {
        let mut lexer = Lexer::new("a");
        assert_eq!(lexer.next_token().kind, TokenKind::Ident);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn test_spans() {
        let mut lexer = Lexer::new("ab\n  cd");
        let a = lexer.next_token();
        assert_eq!((a.span.line, a.span.column), (1, 1));
        let _eol = lexer.next_token();
        let c = lexer.next_token();
        assert_eq!((c.span.line, c.span.column), (2, 3));
        assert_eq!(c.span.start, 5);
        assert_eq!(c.span.end, 7);
    }

    #[test]
    fn test_unexpected_character() {
        let tok = single("@");
        assert_eq!(tok.kind, TokenKind::Error);
    }

    #[test]
    fn test_iterator_stops_at_eof() {
        let tokens: Vec<Token> = Lexer::new("a + b").collect();
        assert_eq!(tokens.len(), 3);
    }
}
