//! Static registry of the `Ifj.*` built-in functions.
//!
//! Each entry describes arity (a negative sentinel marks a variadic),
//! return type mask, and per-argument type masks. For a variadic entry the
//! single argument mask applies to every actual argument.

use crate::types::TypeMask;

/// Description of one built-in function.
#[derive(Debug)]
pub struct BuiltinInfo {
    /// Fully-qualified name, e.g. `"Ifj.readInt"`.
    pub name: &'static str,
    /// Parameter count; `-1` for variadic.
    pub arity: i32,
    /// Return type mask.
    pub ret_mask: TypeMask,
    /// Per-argument type masks (one shared mask for variadics).
    pub arg_masks: &'static [TypeMask],
}

/// The built-in table.
pub const BUILTINS: &[BuiltinInfo] = &[
    BuiltinInfo {
        name: "Ifj.readInt",
        arity: 0,
        ret_mask: TypeMask::NUM,
        arg_masks: &[],
    },
    BuiltinInfo {
        name: "Ifj.readDouble",
        arity: 0,
        ret_mask: TypeMask::NUM,
        arg_masks: &[],
    },
    BuiltinInfo {
        name: "Ifj.readString",
        arity: 0,
        ret_mask: TypeMask::STRING,
        arg_masks: &[],
    },
    // Ifj.write is variadic, takes any type, returns null.
    BuiltinInfo {
        name: "Ifj.write",
        arity: -1,
        ret_mask: TypeMask::NULL,
        arg_masks: &[TypeMask::ALL],
    },
    BuiltinInfo {
        name: "Ifj.length",
        arity: 1,
        ret_mask: TypeMask::NUM,
        arg_masks: &[TypeMask::STRING],
    },
    BuiltinInfo {
        name: "Ifj.substr",
        arity: 3,
        ret_mask: TypeMask::STRING,
        arg_masks: &[TypeMask::STRING, TypeMask::NUM, TypeMask::NUM],
    },
    BuiltinInfo {
        name: "Ifj.ord",
        arity: 2,
        ret_mask: TypeMask::NUM,
        arg_masks: &[TypeMask::STRING, TypeMask::NUM],
    },
    BuiltinInfo {
        name: "Ifj.chr",
        arity: 1,
        ret_mask: TypeMask::STRING,
        arg_masks: &[TypeMask::NUM],
    },
];

/// Looks up a built-in by name and actual argument count.
///
/// A variadic entry matches any count. Returns `None` both for an unknown
/// name and for a known name with the wrong arity.
///
/// # Examples
///
/// ```
/// use ifjc_sem::builtins;
///
/// assert!(builtins::lookup("Ifj.write", 5).is_some());
/// assert!(builtins::lookup("Ifj.length", 1).is_some());
/// assert!(builtins::lookup("Ifj.length", 2).is_none());
/// assert!(builtins::lookup("Ifj.bogus", 0).is_none());
/// ```
pub fn lookup(name: &str, argc: usize) -> Option<&'static BuiltinInfo> {
    BUILTINS
        .iter()
        .find(|b| b.name == name)
        .filter(|b| b.arity < 0 || b.arity as usize == argc)
}

/// Returns true if any built-in has the given name, regardless of arity.
pub fn exists(name: &str) -> bool {
    BUILTINS.iter().any(|b| b.name == name)
}
