//! Expression parsing with an operator-precedence (PSA) engine.
//!
//! Expressions are parsed bottom-up with a 9x9 precedence table over the
//! operand groups below, building AST nodes during handle reduction. The
//! engine owns its stack per invocation; between expressions it holds no
//! state.
//!
//! # Precedence groups
//!
//! | Group | Members |
//! |-------|---------|
//! | MD    | `*` `/` |
//! | AS    | `+` `-` |
//! | REL   | `<` `<=` `>` `>=` |
//! | IS    | `is` |
//! | EQ    | `==` `!=` |
//! | ID    | identifiers, GIDs, literals, `null` and the type names |
//! | `(` / `)` | parentheses |
//! | `$`   | end marker |
//!
//! # End-of-expression inference
//!
//! `;` always terminates (it is consumed, and the token after it is handed
//! back). EOF, a statement-level token, and an unmatched `)` terminate and
//! are handed back. A newline terminates unless it directly follows an
//! operator, `is`, or `(`, in which case it is whitespace.

use ifjc_lex::{Token, TokenKind};
use ifjc_util::{CompileError, Result};

use crate::ast::{Node, NodeKind};
use crate::Parser;

/// Precedence group of a stack or input symbol. The discriminants index
/// the precedence table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PrecGroup {
    MulDiv = 0,
    AddSub = 1,
    Rel = 2,
    Is = 3,
    Eq = 4,
    Operand = 5,
    LParen = 6,
    RParen = 7,
    End = 8,
}

/// Relation between the stack-top terminal and the input symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Relation {
    /// `<` — shift with a marker.
    Lt,
    /// `>` — reduce the topmost handle.
    Gt,
    /// `=` — shift without a marker (matching parenthesis).
    Eq,
    /// `·` — syntax error.
    Err,
}

use Relation::{Eq as EQ, Err as UD, Gt as GT, Lt as LT};

/// The 9x9 precedence table; rows are the stack-top terminal, columns the
/// input group, in `PrecGroup` discriminant order.
const PREC_TABLE: [[Relation; 9]; 9] = [
    //         MD  AS  REL IS  EQ  ID  (   )   $
    /* MD  */ [GT, GT, GT, GT, GT, LT, LT, GT, GT],
    /* AS  */ [LT, GT, GT, GT, GT, LT, LT, GT, GT],
    /* REL */ [LT, LT, GT, GT, GT, LT, LT, GT, GT],
    /* IS  */ [LT, LT, LT, GT, GT, LT, LT, GT, GT],
    /* EQ  */ [LT, LT, LT, LT, GT, LT, LT, GT, GT],
    /* ID  */ [GT, GT, GT, GT, GT, UD, LT, GT, GT],
    /* (   */ [LT, LT, LT, LT, LT, LT, LT, EQ, UD],
    /* )   */ [GT, GT, GT, GT, GT, UD, UD, GT, GT],
    /* $   */ [LT, LT, LT, LT, LT, LT, LT, UD, EQ],
];

/// A symbol on the PSA stack.
#[derive(Debug)]
enum StackEntry {
    /// A shifted terminal, carrying the AST leaf for operands and the
    /// operator node for operators.
    Terminal {
        group: PrecGroup,
        node: Option<Node>,
    },
    /// A reduced (logical) expression. `None` only for the empty argument
    /// list of a call.
    Nonterm { node: Option<Node> },
    /// Handle boundary inserted before a `<` shift.
    Marker,
}

/// Engine-internal result type.
type PsaResult<T> = std::result::Result<T, PsaError>;

/// Engine-internal failure, converted by [`Parser::parse_expression`].
enum PsaError {
    /// The table or a reduction rejected the input (exit code 2).
    Syntax(&'static str),
    /// Stack/grammar inconsistency (exit code 99).
    Internal(&'static str),
    /// A lexical error pulled mid-expression; passed through unchanged.
    Fatal(CompileError),
}

/// Maps a token to its precedence group. Tokens foreign to expressions map
/// to `End` so the statement grammar can resume on them.
fn token_to_group(token: &Token) -> PrecGroup {
    match token.kind {
        TokenKind::Star | TokenKind::Slash => PrecGroup::MulDiv,
        TokenKind::Plus | TokenKind::Minus => PrecGroup::AddSub,
        TokenKind::Lt | TokenKind::Le | TokenKind::Gt | TokenKind::Ge => PrecGroup::Rel,
        TokenKind::EqEq | TokenKind::NotEq => PrecGroup::Eq,
        TokenKind::LParen => PrecGroup::LParen,
        TokenKind::RParen => PrecGroup::RParen,
        TokenKind::Ident
        | TokenKind::Gid
        | TokenKind::Int
        | TokenKind::Float
        | TokenKind::Hex
        | TokenKind::Str => PrecGroup::Operand,
        TokenKind::Keyword => match token.text() {
            "is" => PrecGroup::Is,
            "null" | "Num" | "String" | "Null" => PrecGroup::Operand,
            _ => PrecGroup::End,
        },
        _ => PrecGroup::End,
    }
}

/// Builds the AST leaf for a shifted token, or `None` for parentheses.
fn make_leaf(token: Token) -> Option<Node> {
    match token.kind {
        TokenKind::Int | TokenKind::Float | TokenKind::Hex | TokenKind::Str => {
            Some(Node::with_token(NodeKind::Literal, token))
        }
        TokenKind::Ident => Some(Node::with_token(NodeKind::Identifier, token)),
        TokenKind::Gid => Some(Node::with_token(NodeKind::Gid, token)),
        TokenKind::Keyword => {
            if token.text() == "is" {
                Some(Node::with_token(NodeKind::Expr, token))
            } else {
                // null, Num, String, Null: operands, always-valid literals
                Some(Node::with_token(NodeKind::Literal, token))
            }
        }
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Lt
        | TokenKind::Le
        | TokenKind::Gt
        | TokenKind::Ge
        | TokenKind::EqEq
        | TokenKind::NotEq => Some(Node::with_token(NodeKind::Expr, token)),
        _ => None,
    }
}

fn is_binary_group(group: PrecGroup) -> bool {
    matches!(
        group,
        PrecGroup::MulDiv | PrecGroup::AddSub | PrecGroup::Rel | PrecGroup::Is | PrecGroup::Eq
    )
}

/// Group of the topmost terminal, skipping nonterminals and markers.
fn top_terminal_group(stack: &[StackEntry]) -> Option<PrecGroup> {
    stack.iter().rev().find_map(|entry| match entry {
        StackEntry::Terminal { group, .. } => Some(*group),
        _ => None,
    })
}

/// Inserts a marker directly above the topmost terminal, so nonterminals
/// above it become part of the next handle.
fn insert_marker(stack: &mut Vec<StackEntry>) {
    let mut index = stack.len();
    for (i, entry) in stack.iter().enumerate().rev() {
        if matches!(entry, StackEntry::Terminal { .. }) {
            index = i + 1;
            break;
        }
    }
    stack.insert(index, StackEntry::Marker);
}

/// True when the stack holds exactly `[$ E]`.
fn is_end_with_expr(stack: &[StackEntry]) -> bool {
    stack.len() == 2
        && matches!(
            stack[0],
            StackEntry::Terminal {
                group: PrecGroup::End,
                ..
            }
        )
        && matches!(stack[1], StackEntry::Nonterm { .. })
}

/// Reduces the topmost handle (symbols above the newest marker).
///
/// Accepted handles, topmost symbol first:
/// - `[ID]` → `E -> ID`
/// - `[) E (]` → `E -> ( E )`
/// - `[E op E]` → `E -> E op E`, building an `Expr` node
/// - `[E ID]` → call form `E -> E ( E )`, building a `Call` node
/// - `[) (]` → empty argument list, a nonterminal with no node
fn reduce_handle(stack: &mut Vec<StackEntry>, paren_depth: &mut usize) -> PsaResult<()> {
    let mut handle: Vec<StackEntry> = Vec::new();

    loop {
        let entry = stack
            .pop()
            .ok_or(PsaError::Internal("handle reduction on an empty stack"))?;
        if matches!(entry, StackEntry::Marker) {
            break;
        }
        if handle.len() >= 3 {
            return Err(PsaError::Internal("oversized handle"));
        }
        handle.push(entry);
    }

    match &mut handle[..] {
        // E -> ID
        [StackEntry::Terminal {
            group: PrecGroup::Operand,
            node,
        }] => {
            let node = node
                .take()
                .ok_or(PsaError::Internal("operand shifted without a leaf"))?;
            stack.push(StackEntry::Nonterm { node: Some(node) });
            Ok(())
        }

        // E -> ( E )
        [StackEntry::Terminal {
            group: PrecGroup::RParen,
            ..
        }, StackEntry::Nonterm { node }, StackEntry::Terminal {
            group: PrecGroup::LParen,
            ..
        }] => {
            let node = node.take().ok_or(PsaError::Syntax("empty parentheses"))?;
            *paren_depth = paren_depth.saturating_sub(1);
            stack.push(StackEntry::Nonterm { node: Some(node) });
            Ok(())
        }

        // E -> E op E
        [StackEntry::Nonterm { node: right }, StackEntry::Terminal { group, node: op }, StackEntry::Nonterm { node: left }]
            if is_binary_group(*group) =>
        {
            let mut op = op
                .take()
                .ok_or(PsaError::Internal("operator shifted without a node"))?;
            let left = left.take().ok_or(PsaError::Syntax("missing left operand"))?;
            let right = right
                .take()
                .ok_or(PsaError::Syntax("missing right operand"))?;
            op.push(left);
            op.push(right);
            stack.push(StackEntry::Nonterm { node: Some(op) });
            Ok(())
        }

        // Call form: E -> E ( E ), handle [E ID]
        [StackEntry::Nonterm { node: arg }, StackEntry::Terminal {
            group: PrecGroup::Operand,
            node: callee,
        }] => {
            let callee = callee
                .take()
                .ok_or(PsaError::Internal("callee shifted without a leaf"))?;
            let token = callee
                .token
                .ok_or(PsaError::Internal("callee leaf without a token"))?;

            let mut call = Node::with_token(NodeKind::Call, token);
            if let Some(arg) = arg.take() {
                call.push(arg);
            }
            stack.push(StackEntry::Nonterm { node: Some(call) });
            Ok(())
        }

        // Empty argument list: () -> nonterminal with no node
        [StackEntry::Terminal {
            group: PrecGroup::RParen,
            ..
        }, StackEntry::Terminal {
            group: PrecGroup::LParen,
            ..
        }] => {
            *paren_depth = paren_depth.saturating_sub(1);
            stack.push(StackEntry::Nonterm { node: None });
            Ok(())
        }

        _ => Err(PsaError::Syntax("malformed expression")),
    }
}

impl<'a> Parser<'a> {
    /// Parses one expression and returns its AST root.
    ///
    /// A built-in `Ifj.*` call is recognized here, before the precedence
    /// engine takes over. On return, the lookahead token is the first
    /// token after the expression.
    pub(crate) fn parse_expression(&mut self) -> Result<Node> {
        if self.is_keyword("Ifj") {
            return self.parse_builtin_call();
        }

        let span = self.current().span;
        self.psa_parse().map_err(|err| match err {
            PsaError::Syntax(message) => CompileError::Syntax {
                message: message.to_string(),
                span,
            },
            PsaError::Internal(message) => {
                CompileError::Internal(format!("expression parser: {message}"))
            }
            PsaError::Fatal(err) => err,
        })
    }

    /// The table-driven shift/reduce loop.
    fn psa_parse(&mut self) -> PsaResult<Node> {
        let mut stack: Vec<StackEntry> = vec![StackEntry::Terminal {
            group: PrecGroup::End,
            node: None,
        }];

        // Input already exhausted before the first operand.
        let first = token_to_group(self.current());
        if first == PrecGroup::End || first == PrecGroup::RParen {
            return Err(PsaError::Syntax("expected expression"));
        }

        // True once the end of the expression was inferred; from then on
        // the input reads as '$' and no more tokens are consumed.
        let mut ended = false;
        // Whether the last consumed token allows a newline to continue the
        // expression (operator, `is`, or an opening parenthesis).
        let mut continues_over_eol = false;
        // Open parentheses currently on the stack; an unmatched ')'
        // belongs to the statement grammar, not to this expression.
        let mut paren_depth: usize = 0;

        loop {
            if !ended {
                match self.current().kind {
                    TokenKind::Eol => {
                        if continues_over_eol {
                            while self.current().kind == TokenKind::Eol {
                                self.advance().map_err(PsaError::Fatal)?;
                            }
                            continue;
                        }
                        ended = true;
                    }
                    TokenKind::Semicolon => {
                        self.advance().map_err(PsaError::Fatal)?;
                        ended = true;
                    }
                    TokenKind::RParen if paren_depth == 0 => {
                        ended = true;
                    }
                    _ => {
                        if token_to_group(self.current()) == PrecGroup::End {
                            ended = true;
                        }
                    }
                }
            }

            let g_input = if ended {
                PrecGroup::End
            } else {
                token_to_group(self.current())
            };

            // Termination: [$ E] against '$' accepts.
            if g_input == PrecGroup::End && is_end_with_expr(&stack) {
                return match stack.pop() {
                    Some(StackEntry::Nonterm { node: Some(node) }) => Ok(node),
                    Some(StackEntry::Nonterm { node: None }) => {
                        Err(PsaError::Syntax("expression denotes no value"))
                    }
                    _ => Err(PsaError::Internal("accept without a nonterminal")),
                };
            }

            let g_stack = top_terminal_group(&stack)
                .ok_or(PsaError::Internal("no terminal on the stack"))?;

            match PREC_TABLE[g_stack as usize][g_input as usize] {
                Relation::Lt => {
                    if ended {
                        return Err(PsaError::Internal("shift past the end of expression"));
                    }
                    insert_marker(&mut stack);
                    self.shift(&mut stack, &mut paren_depth, &mut continues_over_eol)?;
                }
                Relation::Eq => {
                    if ended {
                        return Err(PsaError::Syntax("unbalanced parentheses"));
                    }
                    self.shift(&mut stack, &mut paren_depth, &mut continues_over_eol)?;
                }
                Relation::Gt => {
                    reduce_handle(&mut stack, &mut paren_depth)?;
                }
                Relation::Err => {
                    return Err(PsaError::Syntax("malformed expression"));
                }
            }
        }
    }

    /// Shifts the current token onto the stack and advances the lexer.
    fn shift(
        &mut self,
        stack: &mut Vec<StackEntry>,
        paren_depth: &mut usize,
        continues_over_eol: &mut bool,
    ) -> PsaResult<()> {
        let token = self.advance().map_err(PsaError::Fatal)?;
        let group = token_to_group(&token);

        *continues_over_eol = is_binary_group(group) || group == PrecGroup::LParen;
        if group == PrecGroup::LParen {
            *paren_depth += 1;
        }

        let node = make_leaf(token);
        stack.push(StackEntry::Terminal { group, node });
        Ok(())
    }
}
