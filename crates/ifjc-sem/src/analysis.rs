//! The semantic analyzer.
//!
//! Two passes over the AST, sharing one [`SymTable`] threaded through an
//! [`Analyzer`] context:
//!
//! - **Pass A** walks the tree and registers every function definition in
//!   the global scope under its overload key. A second definition with
//!   the same key is a redefinition (code 4).
//! - **Pass B** resolves names statement by statement: blocks push and
//!   pop scopes, parameters and variables become local symbols, calls are
//!   checked against user functions (with lazy forward declarations, so
//!   definition order does not matter) or the built-in registry.
//!
//! After pass B every registered function must be defined and `main` with
//! arity 0 must exist (code 3 otherwise). The analyzer never mutates the
//! AST.

use ifjc_lex::TokenKind;
use ifjc_par::{Node, NodeKind};
use ifjc_util::{CompileError, Result};

use crate::builtins;
use crate::symtable::{func_key, getter_key, setter_key, FuncInfo, SymInfo, SymTable};
use crate::types::TypeMask;

/// Runs both analysis passes and returns the global symbol table.
///
/// # Examples
///
/// ```
/// use ifjc_par::Parser;
/// use ifjc_sem::analyze;
///
/// let source = "import \"ifj25\" for Ifj\nclass Program {\nstatic main() {\nreturn 0\n}\n}\n";
/// let ast = Parser::new(source).unwrap().parse_program().unwrap();
/// let table = analyze(&ast).unwrap();
/// assert!(table.find_global("main$0").is_some());
/// ```
pub fn analyze(root: &Node) -> Result<SymTable> {
    let mut analyzer = Analyzer::new();
    analyzer.register_functions(root)?;
    analyzer.resolve(root)?;
    analyzer.finish()
}

/// Analysis context: the scoped symbol table plus nothing else. All
/// mutable state is local to one `analyze` call.
struct Analyzer {
    table: SymTable,
}

impl Analyzer {
    fn new() -> Self {
        Self {
            table: SymTable::new(),
        }
    }

    // ------------------------------------------------------------------
    // Pass A - function registration
    // ------------------------------------------------------------------

    fn register_functions(&mut self, node: &Node) -> Result<()> {
        if node.kind == NodeKind::FunctionDef {
            return self.register_function_def(node);
        }
        for child in &node.children {
            self.register_functions(child)?;
        }
        Ok(())
    }

    fn register_function_def(&mut self, def: &Node) -> Result<()> {
        let name_node = def
            .child(0)
            .ok_or_else(|| CompileError::internal("function definition without a name"))?;
        let name = name_node.text();
        let kind_node = def
            .child(1)
            .ok_or_else(|| CompileError::internal("function definition without a kind"))?;

        let (key, info) = match kind_node.kind {
            NodeKind::Function => {
                let arity = kind_node.child(0).map(|p| p.children.len()).unwrap_or(0);
                (func_key(name, arity), FuncInfo::defined_with_arity(arity))
            }
            NodeKind::Getter => {
                let mut info = FuncInfo::defined_with_arity(0);
                info.is_getter = true;
                (getter_key(name), info)
            }
            NodeKind::Setter => {
                let mut info = FuncInfo::defined_with_arity(1);
                info.is_setter = true;
                (setter_key(name), info)
            }
            _ => return Err(CompileError::internal("unknown function kind")),
        };

        match self.table.find_global_mut(&key) {
            Some(SymInfo::Func(existing)) => {
                if existing.defined {
                    return Err(CompileError::Redefinition(format!(
                        "redefinition of {}",
                        describe_func_key(&key)
                    )));
                }
                // A forward declaration from a call site is now satisfied.
                existing.defined = true;
                existing.is_getter = info.is_getter;
                existing.is_setter = info.is_setter;
            }
            Some(_) => {
                return Err(CompileError::internal(
                    "function key collided with a variable",
                ))
            }
            None => {
                self.table.insert_global(key, SymInfo::Func(info));
            }
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Pass B - name resolution and scope checking
    // ------------------------------------------------------------------

    fn resolve(&mut self, node: &Node) -> Result<()> {
        match node.kind {
            NodeKind::Program
            | NodeKind::Functions
            | NodeKind::Statements => {
                for child in &node.children {
                    self.resolve(child)?;
                }
                Ok(())
            }

            // The prologue and the class name are fixed words, not names
            // to resolve.
            NodeKind::Prolog => Ok(()),
            NodeKind::Class => match node.child(1) {
                Some(functions) => self.resolve(functions),
                None => Ok(()),
            },

            NodeKind::FunctionDef => self.resolve_function_def(node),
            NodeKind::Block => self.resolve_block(node),
            NodeKind::VarDecl => self.resolve_var_decl(node),
            NodeKind::Assign => self.resolve_assign(node),
            NodeKind::Call => self.resolve_call(node),

            NodeKind::If | NodeKind::While => {
                let cond = node
                    .child(0)
                    .ok_or_else(|| CompileError::internal("control node without a condition"))?;
                self.resolve(cond)?;
                let body = node
                    .child(1)
                    .ok_or_else(|| CompileError::internal("control node without a body"))?;
                self.resolve_block(body)
            }
            NodeKind::Else => {
                let body = node
                    .child(0)
                    .ok_or_else(|| CompileError::internal("else without a body"))?;
                self.resolve_block(body)
            }

            NodeKind::Return => match node.child(0) {
                Some(expr) => self.resolve(expr),
                None => Ok(()),
            },

            NodeKind::Expr => {
                for child in &node.children {
                    self.resolve(child)?;
                }
                Ok(())
            }

            NodeKind::Identifier => self.check_identifier(node),
            NodeKind::Gid => self.read_gid(node.text()),

            // Literals are always valid; the remaining kinds are handled
            // by their parents.
            NodeKind::Literal
            | NodeKind::FuncName
            | NodeKind::ParamList
            | NodeKind::ArgList
            | NodeKind::Function
            | NodeKind::Getter
            | NodeKind::Setter => Ok(()),
        }
    }

    fn resolve_function_def(&mut self, def: &Node) -> Result<()> {
        let kind_node = def
            .child(1)
            .ok_or_else(|| CompileError::internal("function definition without a kind"))?;

        let (params, body): (&[Node], Option<&Node>) = match kind_node.kind {
            NodeKind::Function => {
                let params = kind_node
                    .child(0)
                    .map(|p| p.children.as_slice())
                    .unwrap_or(&[]);
                (params, kind_node.child(1))
            }
            NodeKind::Getter => (&[], kind_node.child(0)),
            NodeKind::Setter => {
                let param = kind_node
                    .child(0)
                    .ok_or_else(|| CompileError::internal("setter without a parameter"))?;
                (std::slice::from_ref(param), kind_node.child(1))
            }
            _ => return Err(CompileError::internal("unknown function kind")),
        };

        // Parameters and the body statements share one function scope;
        // nested blocks push their own.
        self.table.enter_scope();
        let result = self.resolve_function_scope(params, body);
        self.table.exit_scope();
        result
    }

    fn resolve_function_scope(&mut self, params: &[Node], body: Option<&Node>) -> Result<()> {
        for param in params {
            let name = param.text();
            if self.table.find_local(name).is_some() {
                return Err(CompileError::Redefinition(format!(
                    "duplicate parameter '{name}'"
                )));
            }
            self.table.insert(name, SymInfo::var(false, TypeMask::ALL));
        }

        if let Some(body) = body {
            for stmt in &body.children {
                self.resolve(stmt)?;
            }
        }
        Ok(())
    }

    fn resolve_block(&mut self, block: &Node) -> Result<()> {
        self.table.enter_scope();
        let mut result = Ok(());
        for stmt in &block.children {
            result = self.resolve(stmt);
            if result.is_err() {
                break;
            }
        }
        self.table.exit_scope();
        result
    }

    fn resolve_var_decl(&mut self, decl: &Node) -> Result<()> {
        let token = decl
            .token
            .as_ref()
            .ok_or_else(|| CompileError::internal("variable declaration without a name"))?;
        let name = token.text();

        if token.kind == TokenKind::Gid && !self.table.in_global_scope() {
            return Err(CompileError::Redefinition(format!(
                "global identifier '{name}' cannot be declared with 'var' in a local scope"
            )));
        }

        if self.table.find_local(name).is_some() {
            return Err(CompileError::Redefinition(format!(
                "duplicate variable '{name}' in the same scope"
            )));
        }

        let is_global = self.table.in_global_scope();
        self.table
            .insert(name, SymInfo::var(is_global, TypeMask::ALL));

        // Optional initializer: child is an Assign wrapping the expression.
        if let Some(assign) = decl.child(0) {
            if let Some(init) = assign.child(0) {
                self.resolve(init)?;
            }
        }
        Ok(())
    }

    /// Assignment targets, in lookup order: a variable in scope, a setter,
    /// or a new implicit global. GID targets always resolve globally.
    fn resolve_assign(&mut self, assign: &Node) -> Result<()> {
        let token = match assign.token.as_ref() {
            Some(token) => token,
            // Initializer wrapper inside VarDecl; already handled there.
            None => {
                for child in &assign.children {
                    self.resolve(child)?;
                }
                return Ok(());
            }
        };
        let name = token.text().to_string();
        let expr = assign
            .child(0)
            .ok_or_else(|| CompileError::internal("assignment without a right-hand side"))?;

        if token.kind == TokenKind::Gid {
            if self.table.find_global(&name).is_none() {
                self.table
                    .insert_global(name, SymInfo::var(true, TypeMask::ALL));
            }
            return self.resolve(expr);
        }

        if self.table.find(&name).is_some() {
            return self.resolve(expr);
        }

        if self.table.find_global(&setter_key(&name)).is_some() {
            // Semantically a setter call; only the value expression needs
            // checking.
            return self.resolve(expr);
        }

        self.table
            .insert_global(name, SymInfo::var(true, TypeMask::ALL));
        self.resolve(expr)
    }

    fn resolve_call(&mut self, call: &Node) -> Result<()> {
        if call.token.is_none() {
            return self.resolve_builtin_call(call);
        }

        let name = call.text().to_string();
        let argc = call.children.len();

        for arg in &call.children {
            self.resolve(arg)?;
        }

        let key = func_key(&name, argc);
        match self.table.find_global(&key) {
            Some(SymInfo::Func(_)) => Ok(()),
            Some(_) => Err(CompileError::Undefined(format!(
                "'{name}' is not a function"
            ))),
            None => {
                // Lazy forward declaration so definition order does not
                // matter; it must be satisfied by the end of pass B.
                self.table
                    .insert_global(key, SymInfo::Func(FuncInfo::forward_with_arity(argc)));
                Ok(())
            }
        }
    }

    fn resolve_builtin_call(&mut self, call: &Node) -> Result<()> {
        let func_name = call.child(0).filter(|n| n.kind == NodeKind::FuncName);
        let func_name =
            func_name.ok_or_else(|| CompileError::internal("call without a callee"))?;

        let namespace = func_name.child(0).map(|n| n.text()).unwrap_or("");
        let member = func_name.child(1).map(|n| n.text()).unwrap_or("");
        let full = format!("{namespace}.{member}");

        let args = &call.children[1..];
        for arg in args {
            self.resolve(arg)?;
        }

        if builtins::lookup(&full, args.len()).is_some() {
            return Ok(());
        }

        if builtins::exists(&full) {
            Err(CompileError::Undefined(format!(
                "built-in '{full}' called with wrong number of arguments"
            )))
        } else {
            Err(CompileError::Undefined(format!("unknown built-in '{full}'")))
        }
    }

    /// An identifier read must resolve to a variable in scope, a
    /// zero-argument function, or a getter.
    fn check_identifier(&self, node: &Node) -> Result<()> {
        let name = node.text();
        if self.table.find(name).is_some() {
            return Ok(());
        }
        if self.table.find_global(&func_key(name, 0)).is_some() {
            return Ok(());
        }
        if self.table.find_global(&getter_key(name)).is_some() {
            return Ok(());
        }
        Err(CompileError::Undefined(format!(
            "undefined identifier '{name}'"
        )))
    }

    /// Reading a GID creates it on first use, starting as null.
    fn read_gid(&mut self, name: &str) -> Result<()> {
        if self.table.find_global(name).is_none() {
            self.table
                .insert_global(name.to_string(), SymInfo::var(true, TypeMask::NULL));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Final checks
    // ------------------------------------------------------------------

    fn finish(self) -> Result<SymTable> {
        for (key, sym) in self.table.global_symbols() {
            if let SymInfo::Func(func) = sym {
                if !func.defined {
                    return Err(CompileError::Undefined(format!(
                        "{} is called but never defined",
                        describe_func_key(key)
                    )));
                }
            }
        }

        let main_defined = self
            .table
            .find_global(&func_key("main", 0))
            .and_then(SymInfo::as_func)
            .map(|f| f.defined)
            .unwrap_or(false);
        if !main_defined {
            return Err(CompileError::Undefined(
                "missing 'main' function with no parameters".to_string(),
            ));
        }

        debug_assert_eq!(self.table.depth(), 1, "unbalanced scope stack");
        Ok(self.table)
    }
}

/// Human-readable description of an overload key for error messages.
fn describe_func_key(key: &str) -> String {
    if let Some(name) = key.strip_prefix("get:") {
        return format!("getter '{name}'");
    }
    if let Some(name) = key.strip_prefix("set:") {
        return format!("setter '{name}'");
    }
    match key.rsplit_once('$') {
        Some((name, arity)) => format!("function '{name}' with {arity} parameter(s)"),
        None => format!("'{key}'"),
    }
}
