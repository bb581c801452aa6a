//! Scoped symbol table with overload-aware keys.
//!
//! Scopes live in a contiguous arena (`Vec`) used as a stack: entering a
//! block pushes a scope whose parent is referenced by index, leaving pops
//! and frees it. Index 0 is the global scope, created first and freed
//! last. Each scope is an insertion-ordered map.
//!
//! Overload support lives entirely in the key: normal functions are
//! stored under `name$arity`, getters under `get:name`, setters under
//! `set:name`. Variable keys are raw identifiers, which can never contain
//! `$` or `:`, so the namespaces are disjoint by construction.

use ifjc_util::FxIndexMap;

use crate::types::TypeMask;

/// Key for a normal function overload: `name$arity`.
///
/// # Examples
///
/// ```
/// use ifjc_sem::func_key;
///
/// assert_eq!(func_key("add", 2), "add$2");
/// assert_eq!(func_key("main", 0), "main$0");
/// ```
pub fn func_key(name: &str, arity: usize) -> String {
    format!("{name}${arity}")
}

/// Key for a getter; distinct from every arity-0 function key.
pub fn getter_key(name: &str) -> String {
    format!("get:{name}")
}

/// Key for a setter; logically arity 1.
pub fn setter_key(name: &str) -> String {
    format!("set:{name}")
}

/// Variable symbol data.
#[derive(Clone, Debug, PartialEq)]
pub struct VarInfo {
    pub is_global: bool,
    pub type_mask: TypeMask,
}

/// Function symbol data (functions, getters, setters, built-ins).
#[derive(Clone, Debug, PartialEq)]
pub struct FuncInfo {
    pub arity: usize,
    pub param_masks: Vec<TypeMask>,
    pub ret_mask: TypeMask,
    pub declared: bool,
    pub defined: bool,
    pub is_getter: bool,
    pub is_setter: bool,
    pub is_builtin: bool,
}

impl FuncInfo {
    /// A user function definition with unconstrained types.
    pub fn defined_with_arity(arity: usize) -> Self {
        Self {
            arity,
            param_masks: Vec::new(),
            ret_mask: TypeMask::ALL,
            declared: true,
            defined: true,
            is_getter: false,
            is_setter: false,
            is_builtin: false,
        }
    }

    /// A forward declaration created at a call site.
    pub fn forward_with_arity(arity: usize) -> Self {
        Self {
            defined: false,
            ..Self::defined_with_arity(arity)
        }
    }
}

/// Symbol information: a variable or a function.
#[derive(Clone, Debug, PartialEq)]
pub enum SymInfo {
    Var(VarInfo),
    Func(FuncInfo),
}

impl SymInfo {
    /// A local or global variable with the given mask.
    pub fn var(is_global: bool, type_mask: TypeMask) -> Self {
        SymInfo::Var(VarInfo {
            is_global,
            type_mask,
        })
    }

    pub fn is_var(&self) -> bool {
        matches!(self, SymInfo::Var(_))
    }

    pub fn as_func(&self) -> Option<&FuncInfo> {
        match self {
            SymInfo::Func(f) => Some(f),
            SymInfo::Var(_) => None,
        }
    }
}

/// One lexical scope: an ordered map plus the enclosing scope's index.
#[derive(Debug)]
struct Scope {
    symbols: FxIndexMap<String, SymInfo>,
    parent: Option<usize>,
}

/// The scoped symbol table.
///
/// # Examples
///
/// ```
/// use ifjc_sem::{SymInfo, SymTable, TypeMask};
///
/// let mut table = SymTable::new();
/// table.insert("x", SymInfo::var(true, TypeMask::ALL));
///
/// table.enter_scope();
/// table.insert("y", SymInfo::var(false, TypeMask::ALL));
/// assert!(table.find("x").is_some()); // outer scopes are visible
/// assert!(table.find_local("x").is_none()); // but not local
/// table.exit_scope();
///
/// assert!(table.find("y").is_none()); // freed with its scope
/// ```
#[derive(Debug)]
pub struct SymTable {
    scopes: Vec<Scope>,
}

impl SymTable {
    /// Creates a table holding only the global scope.
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope {
                symbols: FxIndexMap::default(),
                parent: None,
            }],
        }
    }

    /// Pushes a fresh innermost scope.
    pub fn enter_scope(&mut self) {
        let parent = Some(self.scopes.len() - 1);
        self.scopes.push(Scope {
            symbols: FxIndexMap::default(),
            parent,
        });
    }

    /// Pops and frees the innermost scope. The global scope stays.
    pub fn exit_scope(&mut self) {
        debug_assert!(self.scopes.len() > 1, "attempted to pop the global scope");
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Number of live scopes (1 = only the global scope).
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// True when the innermost scope is the global scope.
    pub fn in_global_scope(&self) -> bool {
        self.scopes.len() == 1
    }

    /// Inserts into the innermost scope. Returns false if the key is
    /// already present there.
    pub fn insert(&mut self, key: impl Into<String>, sym: SymInfo) -> bool {
        let scope = self.scopes.last_mut().expect("global scope always exists");
        let key = key.into();
        if scope.symbols.contains_key(&key) {
            return false;
        }
        scope.symbols.insert(key, sym);
        true
    }

    /// Inserts into the global scope regardless of the current scope.
    pub fn insert_global(&mut self, key: impl Into<String>, sym: SymInfo) -> bool {
        let scope = &mut self.scopes[0];
        let key = key.into();
        if scope.symbols.contains_key(&key) {
            return false;
        }
        scope.symbols.insert(key, sym);
        true
    }

    /// Scoped lookup: walks from the innermost scope outward.
    pub fn find(&self, key: &str) -> Option<&SymInfo> {
        let mut index = Some(self.scopes.len() - 1);
        while let Some(i) = index {
            let scope = &self.scopes[i];
            if let Some(sym) = scope.symbols.get(key) {
                return Some(sym);
            }
            index = scope.parent;
        }
        None
    }

    /// Lookup restricted to the innermost scope (same-scope duplicate
    /// detection).
    pub fn find_local(&self, key: &str) -> Option<&SymInfo> {
        self.scopes.last().and_then(|s| s.symbols.get(key))
    }

    /// Lookup restricted to the global scope.
    pub fn find_global(&self, key: &str) -> Option<&SymInfo> {
        self.scopes[0].symbols.get(key)
    }

    /// Mutable lookup in the global scope (used to mark definitions).
    pub fn find_global_mut(&mut self, key: &str) -> Option<&mut SymInfo> {
        self.scopes[0].symbols.get_mut(key)
    }

    /// Global symbols in insertion order.
    pub fn global_symbols(&self) -> impl Iterator<Item = (&str, &SymInfo)> {
        self.scopes[0].symbols.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl Default for SymTable {
    fn default() -> Self {
        Self::new()
    }
}
