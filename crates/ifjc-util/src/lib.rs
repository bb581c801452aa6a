//! ifjc-util - Shared infrastructure for the IFJ25 front end.
//!
//! This crate holds the pieces every compiler phase needs: source spans,
//! the typed error taxonomy, and the hashed ordered-map alias used by the
//! symbol table. It deliberately has no knowledge of tokens, AST nodes or
//! symbols - those belong to the phase crates.

pub mod error;
pub mod span;

pub use error::{CompileError, Result};
pub use span::Span;

use std::hash::BuildHasherDefault;

// Re-export commonly used types
pub use rustc_hash::FxHashMap;
pub use rustc_hash::FxHashSet;

/// Insertion-ordered map hashed with `FxHasher`.
///
/// The symbol table requires insertion order to be observable (symbols are
/// reported and freed in declaration order), so a plain hash map is not
/// enough.
pub type FxIndexMap<K, V> = indexmap::IndexMap<K, V, BuildHasherDefault<rustc_hash::FxHasher>>;
