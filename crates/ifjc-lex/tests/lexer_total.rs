//! Property tests for the lexer's totality guarantees.
//!
//! For any input the lexer must terminate in an `Eof` or `Error` token,
//! and text-bearing token kinds must always carry a lexeme.

use proptest::prelude::*;

use ifjc_lex::{Lexer, TokenKind};

/// Upper bound on tokens for any input in these tests; generated inputs
/// are short, so hitting it means the lexer stopped making progress.
const TOKEN_LIMIT: usize = 4096;

fn lex_all(source: &str) -> Vec<ifjc_lex::Token> {
    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();
    for _ in 0..TOKEN_LIMIT {
        let tok = lexer.next_token();
        let kind = tok.kind;
        tokens.push(tok);
        if kind == TokenKind::Eof || kind == TokenKind::Error {
            return tokens;
        }
    }
    panic!("lexer did not terminate within {} tokens", TOKEN_LIMIT);
}

proptest! {
    #[test]
    fn lexer_is_total_on_any_input(source in ".{0,200}") {
        let tokens = lex_all(&source);
        let last = tokens.last().unwrap();
        prop_assert!(last.kind == TokenKind::Eof || last.kind == TokenKind::Error);
    }

    #[test]
    fn text_kinds_always_carry_a_lexeme(source in "[ -~\n]{0,200}") {
        for tok in lex_all(&source) {
            if tok.kind.carries_text() {
                prop_assert!(tok.lexeme.is_some(), "{:?} missing lexeme", tok.kind);
            }
        }
    }

    #[test]
    fn identifier_streams_roundtrip(words in prop::collection::vec("[a-z][a-z0-9]{0,8}", 0..20)) {
        let source = words.join(" ");
        let tokens = lex_all(&source);
        let lexed: Vec<String> = tokens
            .iter()
            .filter(|t| matches!(t.kind, TokenKind::Ident | TokenKind::Keyword))
            .map(|t| t.text().to_string())
            .collect();
        prop_assert_eq!(lexed, words);
    }
}
