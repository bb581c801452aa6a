//! ifjc-lex - Lexical analyzer for IFJ25.
//!
//! Transforms source text into a stream of [`Token`]s on demand. The lexer
//! is an explicit state machine over a character [`Cursor`]; newlines are
//! significant and surface as `Eol` tokens, line comments count as
//! newlines, and block comments (nesting allowed) are invisible
//! whitespace.
//!
//! The one public operation is [`Lexer::next_token`]. Ownership of a
//! token's lexeme transfers to the caller; `Eof` is stable and can be
//! requested repeatedly.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use cursor::Cursor;
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
