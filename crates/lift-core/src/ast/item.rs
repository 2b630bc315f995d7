//! Top-level item AST nodes for the LIFT programming language

use crate::lexer::Span;

use super::{Block, Ident, Param, Spanned, TypeAnnotation};

/// A complete source file / compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Unit {
    /// The top-level items in this unit
    pub items: Vec<Item>,
    /// Source location of the entire unit
    pub span: Span,
}

impl Unit {
    /// Create a new unit from items
    #[must_use]
    pub fn new(items: Vec<Item>, span: Span) -> Self {
        Self { items, span }
    }

    /// All function declarations in this unit
    pub fn functions(&self) -> impl Iterator<Item = &Function> {
        self.items.iter().filter_map(|item| match &item.kind {
            ItemKind::Function(func) => Some(func),
            _ => None,
        })
    }

    /// All struct declarations in this unit
    pub fn structs(&self) -> impl Iterator<Item = &StructDef> {
        self.items.iter().filter_map(|item| match &item.kind {
            ItemKind::Struct(def) => Some(def),
            _ => None,
        })
    }
}

impl Spanned for Unit {
    fn span(&self) -> Span {
        self.span
    }
}

/// A top-level item
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// The kind of item
    pub kind: ItemKind,
    /// Source location
    pub span: Span,
}

impl Item {
    /// Create a new item
    #[must_use]
    pub fn new(kind: ItemKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl Spanned for Item {
    fn span(&self) -> Span {
        self.span
    }
}

/// The kind of top-level item
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// A named function declaration
    Function(Function),
    /// A struct declaration
    Struct(StructDef),
    /// An import declaration; parsed for grammar completeness, resolution
    /// happens outside this crate
    Import(Import),
    /// A top-level statement (let/const bindings, expression statements, ...)
    Stmt(super::Stmt),
}

/// A named function declaration
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name
    pub name: Ident,
    /// Parameters, in declaration order
    pub params: Vec<Param>,
    /// Declared return type; `None` means the function returns nothing
    pub return_type: Option<TypeAnnotation>,
    /// Function body
    pub body: Block,
    /// Source location
    pub span: Span,
}

impl Function {
    /// Create a new function
    #[must_use]
    pub fn new(
        name: Ident,
        params: Vec<Param>,
        return_type: Option<TypeAnnotation>,
        body: Block,
        span: Span,
    ) -> Self {
        Self {
            name,
            params,
            return_type,
            body,
            span,
        }
    }
}

impl Spanned for Function {
    fn span(&self) -> Span {
        self.span
    }
}

/// A struct declaration
#[derive(Debug, Clone, PartialEq)]
pub struct StructDef {
    /// Struct name
    pub name: Ident,
    /// Fields, in declaration order
    pub fields: Vec<StructField>,
    /// Source location
    pub span: Span,
}

impl StructDef {
    /// Create a new struct definition
    #[must_use]
    pub fn new(name: Ident, fields: Vec<StructField>, span: Span) -> Self {
        Self { name, fields, span }
    }
}

impl Spanned for StructDef {
    fn span(&self) -> Span {
        self.span
    }
}

/// A field in a struct declaration
#[derive(Debug, Clone, PartialEq)]
pub struct StructField {
    /// Field name
    pub name: Ident,
    /// Field type
    pub ty: TypeAnnotation,
    /// Source location
    pub span: Span,
}

impl StructField {
    /// Create a new struct field
    #[must_use]
    pub fn new(name: Ident, ty: TypeAnnotation, span: Span) -> Self {
        Self { name, ty, span }
    }
}

impl Spanned for StructField {
    fn span(&self) -> Span {
        self.span
    }
}

/// An import declaration (`import name;`)
#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    /// The imported unit name
    pub name: Ident,
    /// Source location
    pub span: Span,
}

impl Spanned for Import {
    fn span(&self) -> Span {
        self.span
    }
}
