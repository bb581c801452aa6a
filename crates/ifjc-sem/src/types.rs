//! Coarse type masks.
//!
//! The front end tracks types only as sets over {NUM, STRING, NULL, BOOL},
//! encoded as a bit set. `ALL` stands in wherever a type is unknown or
//! unconstrained; real inference belongs to a later extension.

use std::fmt;
use std::ops::BitOr;

/// A set of coarse value types.
///
/// # Examples
///
/// ```
/// use ifjc_sem::TypeMask;
///
/// let mask = TypeMask::NUM | TypeMask::NULL;
/// assert!(mask.contains(TypeMask::NUM));
/// assert!(!mask.contains(TypeMask::STRING));
/// assert!(TypeMask::ALL.contains(mask));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TypeMask(u8);

impl TypeMask {
    /// The empty set.
    pub const EMPTY: TypeMask = TypeMask(0);
    /// Numbers (integers and doubles are not distinguished).
    pub const NUM: TypeMask = TypeMask(0b0001);
    /// Strings.
    pub const STRING: TypeMask = TypeMask(0b0010);
    /// The `null` value.
    pub const NULL: TypeMask = TypeMask(0b0100);
    /// Booleans (comparison results).
    pub const BOOL: TypeMask = TypeMask(0b1000);
    /// Unknown or unconstrained.
    pub const ALL: TypeMask = TypeMask(0b1111);

    /// Set union, usable in constant context.
    pub const fn union(self, other: TypeMask) -> TypeMask {
        TypeMask(self.0 | other.0)
    }

    /// Returns true if every member of `other` is in `self`.
    pub const fn contains(self, other: TypeMask) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if the sets share at least one member.
    pub const fn intersects(self, other: TypeMask) -> bool {
        self.0 & other.0 != 0
    }

    /// Returns true for the empty set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for TypeMask {
    type Output = TypeMask;

    fn bitor(self, rhs: TypeMask) -> TypeMask {
        self.union(rhs)
    }
}

impl fmt::Display for TypeMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("never");
        }
        let mut first = true;
        for (mask, name) in [
            (TypeMask::NUM, "Num"),
            (TypeMask::STRING, "String"),
            (TypeMask::NULL, "Null"),
            (TypeMask::BOOL, "Bool"),
        ] {
            if self.contains(mask) {
                if !first {
                    f.write_str("|")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}
