//! ifjc-sem - Semantic analysis for IFJ25.
//!
//! Two passes over the finished AST sharing one scoped symbol table:
//! function registration first, then name resolution and scope checking.
//! Built-in `Ifj.*` calls are resolved against a static registry. The
//! analyzer never modifies the AST; all of its effects land in the symbol
//! table it returns.

pub mod analysis;
pub mod builtins;
pub mod symtable;
pub mod types;

pub use analysis::analyze;
pub use builtins::BuiltinInfo;
pub use symtable::{func_key, getter_key, setter_key, FuncInfo, SymInfo, SymTable, VarInfo};
pub use types::TypeMask;
