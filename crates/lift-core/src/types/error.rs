//! Type error definitions for the LIFT type checker

use super::Type;
use crate::lexer::Span;
use std::fmt;

/// A type error with source location
#[derive(Debug, Clone)]
pub struct TypeError {
    /// The kind of error
    pub kind: TypeErrorKind,
    /// Primary source location
    pub span: Span,
}

impl TypeError {
    /// Create a new type error
    #[must_use]
    pub fn new(kind: TypeErrorKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create a type mismatch error
    #[must_use]
    pub fn mismatch(expected: Type, found: Type, span: Span) -> Self {
        Self::new(TypeErrorKind::TypeMismatch { expected, found }, span)
    }

    /// Create an undefined reference error
    #[must_use]
    pub fn undefined(name: impl Into<String>, span: Span) -> Self {
        Self::new(TypeErrorKind::UndefinedReference(name.into()), span)
    }

    /// Returns true if this diagnostic is a warning rather than an error
    #[must_use]
    pub const fn is_warning(&self) -> bool {
        matches!(self.kind, TypeErrorKind::NonExhaustiveMatch)
    }
}

impl fmt::Display for TypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.span)
    }
}

impl std::error::Error for TypeError {}

/// The kind of type error
#[derive(Debug, Clone)]
pub enum TypeErrorKind {
    /// Type mismatch: expected one type, found another
    TypeMismatch {
        /// Expected type
        expected: Type,
        /// Actual type found
        found: Type,
    },

    /// Name not found in any enclosing scope
    UndefinedReference(String),

    /// Type name not found
    UndefinedType(String),

    /// Assignment to a name that is not a mutable variable
    ImmutableAssignment(String),

    /// Two declarations of the same name in one scope
    DuplicateDefinition(String),

    /// Attempted to call a non-function
    NotCallable(Type),

    /// Wrong number of arguments in a function call
    ArityMismatch {
        /// Expected number of arguments
        expected: usize,
        /// Actual number provided
        found: usize,
    },

    /// Struct literal missing a declared field
    MissingField {
        /// Struct name
        struct_name: String,
        /// Missing field name
        field: String,
    },

    /// Struct literal initializing a field twice
    DuplicateField(String),

    /// Struct literal naming a field the struct does not declare
    UnknownField {
        /// Struct name
        struct_name: String,
        /// Unknown field name
        field: String,
    },

    /// Field access on a type without that field
    NoSuchField {
        /// The type being accessed
        ty: Type,
        /// The field name
        field: String,
    },

    /// Match arm result type differs from the first arm's
    MatchArmTypeMismatch {
        /// Type of the first arm
        expected: Type,
        /// Type of the offending arm
        found: Type,
    },

    /// Match without a wildcard arm (warning)
    NonExhaustiveMatch,

    /// Binary operator not supported for operand types
    InvalidBinaryOp {
        /// The operator
        op: &'static str,
        /// Left operand type
        left: Type,
        /// Right operand type
        right: Type,
    },

    /// Unary operator not supported for operand type
    InvalidUnaryOp {
        /// The operator
        op: &'static str,
        /// Operand type
        operand: Type,
    },

    /// Attempted to index a non-indexable type
    NotIndexable(Type),

    /// Invalid index type (lists take int indices)
    InvalidIndexType {
        /// The type being indexed
        container: Type,
        /// The index type used
        index: Type,
    },

    /// For-loop iterable is neither a range nor a list
    NotIterable(Type),

    /// Return type doesn't match the function declaration
    ReturnTypeMismatch {
        /// Expected return type
        expected: Type,
        /// Actual return type
        found: Type,
    },

    /// Return statement outside of any function
    ReturnOutsideFunction,

    /// A type could not be determined without an annotation
    CannotInfer(String),
}

impl fmt::Display for TypeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeErrorKind::TypeMismatch { expected, found } => {
                write!(f, "type mismatch: expected `{expected}`, found `{found}`")
            }
            TypeErrorKind::UndefinedReference(name) => {
                write!(f, "undefined reference `{name}`")
            }
            TypeErrorKind::UndefinedType(name) => {
                write!(f, "undefined type `{name}`")
            }
            TypeErrorKind::ImmutableAssignment(name) => {
                write!(f, "cannot assign to immutable binding `{name}`")
            }
            TypeErrorKind::DuplicateDefinition(name) => {
                write!(f, "duplicate definition of `{name}`")
            }
            TypeErrorKind::NotCallable(ty) => {
                write!(f, "type `{ty}` is not callable")
            }
            TypeErrorKind::ArityMismatch { expected, found } => {
                write!(
                    f,
                    "wrong number of arguments: expected {expected}, found {found}"
                )
            }
            TypeErrorKind::MissingField { struct_name, field } => {
                write!(f, "missing field `{field}` in struct `{struct_name}`")
            }
            TypeErrorKind::DuplicateField(name) => {
                write!(f, "duplicate field `{name}`")
            }
            TypeErrorKind::UnknownField { struct_name, field } => {
                write!(
                    f,
                    "unknown field `{field}` in struct literal for `{struct_name}`"
                )
            }
            TypeErrorKind::NoSuchField { ty, field } => {
                write!(f, "type `{ty}` has no field `{field}`")
            }
            TypeErrorKind::MatchArmTypeMismatch { expected, found } => {
                write!(
                    f,
                    "match arms have incompatible types: expected `{expected}`, found `{found}`"
                )
            }
            TypeErrorKind::NonExhaustiveMatch => {
                write!(f, "match is not exhaustive; consider adding a `_` arm")
            }
            TypeErrorKind::InvalidBinaryOp { op, left, right } => {
                write!(f, "cannot apply `{op}` to `{left}` and `{right}`")
            }
            TypeErrorKind::InvalidUnaryOp { op, operand } => {
                write!(f, "cannot apply `{op}` to `{operand}`")
            }
            TypeErrorKind::NotIndexable(ty) => {
                write!(f, "type `{ty}` cannot be indexed")
            }
            TypeErrorKind::InvalidIndexType { container, index } => {
                write!(f, "cannot index `{container}` with `{index}`")
            }
            TypeErrorKind::NotIterable(ty) => {
                write!(f, "type `{ty}` is not iterable")
            }
            TypeErrorKind::ReturnTypeMismatch { expected, found } => {
                write!(
                    f,
                    "return type mismatch: expected `{expected}`, found `{found}`"
                )
            }
            TypeErrorKind::ReturnOutsideFunction => {
                write!(f, "`return` outside of function")
            }
            TypeErrorKind::CannotInfer(name) => {
                write!(f, "cannot determine type of `{name}` without an annotation")
            }
        }
    }
}
