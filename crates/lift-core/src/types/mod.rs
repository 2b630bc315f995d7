//! Type system for the LIFT programming language
//!
//! This module provides:
//! - Internal type representation (`Type`)
//! - Type environment / symbol table (`TypeEnv`)
//! - Type checker (`TypeChecker`)
//!
//! Types are compared structurally, never by identity; the `Error` type is a
//! sentinel assigned after a reported error and compares compatible with
//! everything so one mistake does not cascade into a chain of diagnostics.

mod checker;
mod env;
mod error;

pub use checker::{TypeCheckResult, TypeChecker};
pub use env::{Binding, BindingKind, StructInfo, TypeEnv};
pub use error::{TypeError, TypeErrorKind};

use std::fmt;

/// A unique identifier for struct definitions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StructId(pub u32);

impl fmt::Display for StructId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "struct#{}", self.0)
    }
}

/// Internal type representation used by the type checker
///
/// This is distinct from `TypeAnnotation` in the AST, which represents the
/// syntactic form of types as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// 64-bit signed integer
    Int,

    /// 64-bit floating point
    Float,

    /// UTF-8 string
    String,

    /// Boolean
    Bool,

    /// The unit type (functions that return nothing)
    Unit,

    /// An integer range produced by the built-in `range(int, int)`
    Range,

    /// Homogeneous list type
    List(Box<Type>),

    /// A named struct type
    Struct {
        /// Struct definition ID
        id: StructId,
        /// Name for error messages
        name: String,
    },

    /// Function type
    Function {
        /// Parameter types
        params: Vec<Type>,
        /// Return type
        ret: Box<Type>,
    },

    /// An error type (used to continue type checking after errors)
    Error,
}

impl Type {
    /// Create a function type
    #[must_use]
    pub fn function(params: Vec<Type>, ret: Type) -> Self {
        Self::Function {
            params,
            ret: Box::new(ret),
        }
    }

    /// Create a list type
    #[must_use]
    pub fn list(element: Type) -> Self {
        Self::List(Box::new(element))
    }

    /// Create a struct type
    #[must_use]
    pub fn struct_type(id: StructId, name: impl Into<String>) -> Self {
        Self::Struct {
            id,
            name: name.into(),
        }
    }

    /// Returns true if this is a numeric type (int or float)
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Type::Int | Type::Float)
    }

    /// Returns true if this is a function type
    #[must_use]
    pub const fn is_function(&self) -> bool {
        matches!(self, Type::Function { .. })
    }

    /// Returns true if this is the error type
    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self, Type::Error)
    }

    /// Structural type equality
    ///
    /// Two types are equal if their shapes match: same primitive, same
    /// struct, or same function signature. The error sentinel compares equal
    /// to everything so an already-reported error never produces follow-on
    /// mismatches.
    #[must_use]
    pub fn structurally_equals(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Error, _) | (_, Type::Error) => true,
            (Type::Int, Type::Int)
            | (Type::Float, Type::Float)
            | (Type::String, Type::String)
            | (Type::Bool, Type::Bool)
            | (Type::Unit, Type::Unit)
            | (Type::Range, Type::Range) => true,
            (Type::List(a), Type::List(b)) => a.structurally_equals(b),
            (
                Type::Function {
                    params: p1,
                    ret: r1,
                },
                Type::Function {
                    params: p2,
                    ret: r2,
                },
            ) => {
                p1.len() == p2.len()
                    && p1
                        .iter()
                        .zip(p2.iter())
                        .all(|(a, b)| a.structurally_equals(b))
                    && r1.structurally_equals(r2)
            }
            (
                Type::Struct {
                    id: id1, name: n1, ..
                },
                Type::Struct {
                    id: id2, name: n2, ..
                },
            ) => id1 == id2 || n1 == n2,
            _ => false,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Int => write!(f, "int"),
            Type::Float => write!(f, "float"),
            Type::String => write!(f, "string"),
            Type::Bool => write!(f, "bool"),
            Type::Unit => write!(f, "()"),
            Type::Range => write!(f, "range"),
            Type::Error => write!(f, "<error>"),
            Type::List(t) => write!(f, "[{t}]"),
            Type::Function { params, ret } => {
                write!(f, "(")?;
                for (i, p) in params.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{p}")?;
                }
                write!(f, ") => {ret}")
            }
            Type::Struct { name, .. } => write!(f, "{name}"),
        }
    }
}

impl Default for Type {
    fn default() -> Self {
        Type::Unit
    }
}
