//! Type annotation AST nodes for the LIFT programming language

use crate::lexer::Span;

use super::{Ident, Spanned};

/// A type annotation in source code
///
/// This is the syntactic form of a type as written by the user; the checker
/// resolves it into the internal [`crate::types::Type`] representation.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAnnotation {
    /// The kind of type
    pub kind: TypeAnnotationKind,
    /// Source location
    pub span: Span,
}

impl TypeAnnotation {
    /// Create a new type annotation
    #[must_use]
    pub fn new(kind: TypeAnnotationKind, span: Span) -> Self {
        Self { kind, span }
    }

    /// Create a simple named type (e.g., int, Point)
    #[must_use]
    pub fn named(name: impl Into<String>, span: Span) -> Self {
        Self::new(TypeAnnotationKind::Named(Ident::new(name, span)), span)
    }
}

impl Spanned for TypeAnnotation {
    fn span(&self) -> Span {
        self.span
    }
}

/// The kind of type annotation
#[derive(Debug, Clone, PartialEq)]
pub enum TypeAnnotationKind {
    /// A named type: the primitives (int, float, string, bool) or a struct
    Named(Ident),

    /// A list type ([T])
    List(Box<TypeAnnotation>),

    /// A function type ((A, B) => C)
    Function {
        /// Parameter types
        params: Vec<TypeAnnotation>,
        /// Return type
        ret: Box<TypeAnnotation>,
    },
}
