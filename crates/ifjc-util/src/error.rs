//! Error taxonomy for the IFJ25 front end.
//!
//! Every fallible front-end function returns [`CompileError`] through the
//! [`Result`] alias. The variants map one-to-one onto the process exit
//! codes required by the assignment; the "print and exit" policy itself
//! lives in the driver binary, nowhere else.

use thiserror::Error;

use crate::span::Span;

/// A fatal front-end error carrying its taxonomy category.
///
/// The front end does not recover: the first error produced aborts
/// compilation. Variants that originate from a concrete source location
/// carry a [`Span`]; purely structural errors (e.g. a missing `main`) do
/// not.
#[derive(Debug, Error)]
pub enum CompileError {
    /// Lexical error (exit code 1).
    #[error("lexical error at {span}: {message}")]
    Lexical { message: String, span: Span },

    /// Syntactic error from the parser or the precedence engine (exit code 2).
    #[error("syntax error at {span}: {message}")]
    Syntax { message: String, span: Span },

    /// Undefined name, wrong use of a name, or missing `main` (exit code 3).
    #[error("semantic error: {0}")]
    Undefined(String),

    /// Redefinition, duplicate parameter or duplicate variable (exit code 4).
    #[error("semantic error: {0}")]
    Redefinition(String),

    /// Wrong argument count or identifier-kind mismatch (exit code 5).
    #[error("semantic error: {0}")]
    Arity(String),

    /// Static type incompatibility (exit code 6).
    ///
    /// Reserved for the type-inference extension; the analyzer in this
    /// repository never produces it.
    #[error("type error: {0}")]
    Type(String),

    /// Other semantic errors (exit code 10).
    #[error("semantic error: {0}")]
    Semantic(String),

    /// Internal error: invariant violation or resource exhaustion (exit code 99).
    #[error("internal error: {0}")]
    Internal(String),
}

impl CompileError {
    /// Process exit code for this error category.
    ///
    /// # Examples
    ///
    /// ```
    /// use ifjc_util::{CompileError, Span};
    ///
    /// let err = CompileError::Lexical {
    ///     message: "unexpected character".into(),
    ///     span: Span::point(1, 1),
    /// };
    /// assert_eq!(err.exit_code(), 1);
    /// ```
    pub fn exit_code(&self) -> i32 {
        match self {
            CompileError::Lexical { .. } => 1,
            CompileError::Syntax { .. } => 2,
            CompileError::Undefined(_) => 3,
            CompileError::Redefinition(_) => 4,
            CompileError::Arity(_) => 5,
            CompileError::Type(_) => 6,
            CompileError::Semantic(_) => 10,
            CompileError::Internal(_) => 99,
        }
    }

    /// Shorthand for an internal-invariant failure.
    pub fn internal(message: impl Into<String>) -> Self {
        CompileError::Internal(message.into())
    }
}

/// Result type alias used throughout the front end.
pub type Result<T> = std::result::Result<T, CompileError>;
