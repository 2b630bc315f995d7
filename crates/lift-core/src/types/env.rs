//! Type environment / symbol table for the LIFT type checker
//!
//! Manages the scope stack, name bindings, and struct definitions. Scopes
//! form an explicit stack (innermost last) mirroring block nesting; lookup
//! walks the stack from innermost to outermost.

use std::collections::HashMap;

use crate::lexer::Span;

use super::{StructId, Type};

/// What kind of thing a name is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindingKind {
    /// A `let` binding; may be reassigned
    Variable,
    /// A `const` binding
    Constant,
    /// A named function
    Function,
    /// A struct type name
    StructType,
}

/// A name binding: kind, type, and where it was declared
#[derive(Debug, Clone)]
pub struct Binding {
    /// What kind of binding this is
    pub kind: BindingKind,
    /// The binding's type
    pub ty: Type,
    /// Where the binding was declared
    pub span: Span,
}

impl Binding {
    /// Create a new binding
    #[must_use]
    pub fn new(kind: BindingKind, ty: Type, span: Span) -> Self {
        Self { kind, ty, span }
    }

    /// Returns true if the bound name may appear on the left of `=`
    #[must_use]
    pub const fn is_assignable(&self) -> bool {
        matches!(self.kind, BindingKind::Variable)
    }
}

/// Information about a struct definition
#[derive(Debug, Clone)]
pub struct StructInfo {
    /// Struct name
    pub name: String,

    /// Fields with their types
    pub fields: HashMap<String, Type>,

    /// Declaration order of fields
    pub field_order: Vec<String>,

    /// Where the struct was declared
    pub span: Span,
}

/// A single scope containing name bindings
#[derive(Debug, Clone, Default)]
struct Scope {
    bindings: HashMap<String, Binding>,
}

/// Type environment managing scopes and struct definitions
#[derive(Debug, Clone)]
pub struct TypeEnv {
    /// Stack of scopes (innermost last); the bottom is the program scope
    scopes: Vec<Scope>,

    /// Struct definitions by ID
    structs: HashMap<StructId, StructInfo>,

    /// Map from struct names to IDs
    struct_names: HashMap<String, StructId>,

    /// Counter for generating struct IDs
    next_struct_id: u32,

    /// Current function return type (None if not in a function)
    current_return_type: Option<Type>,
}

impl Default for TypeEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeEnv {
    /// Create a new type environment with only the program scope
    #[must_use]
    pub fn new() -> Self {
        Self {
            scopes: vec![Scope::default()],
            structs: HashMap::new(),
            struct_names: HashMap::new(),
            next_struct_id: 0,
            current_return_type: None,
        }
    }

    /// Enter a new scope
    pub fn enter_scope(&mut self) {
        self.scopes.push(Scope::default());
    }

    /// Exit the current scope
    pub fn exit_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Get the current scope depth
    #[must_use]
    pub fn scope_depth(&self) -> usize {
        self.scopes.len()
    }

    /// Define a name in the current scope
    pub fn define(&mut self, name: impl Into<String>, binding: Binding) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.bindings.insert(name.into(), binding);
        }
    }

    /// Look up a name (searches from innermost to outermost scope)
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&Binding> {
        for scope in self.scopes.iter().rev() {
            if let Some(binding) = scope.bindings.get(name) {
                return Some(binding);
            }
        }
        None
    }

    /// Check if a name exists in the current scope (not parent scopes)
    #[must_use]
    pub fn exists_in_current_scope(&self, name: &str) -> bool {
        self.scopes
            .last()
            .is_some_and(|s| s.bindings.contains_key(name))
    }

    /// Register a new struct definition
    pub fn define_struct(&mut self, info: StructInfo) -> StructId {
        let id = StructId(self.next_struct_id);
        self.next_struct_id += 1;

        self.struct_names.insert(info.name.clone(), id);
        self.structs.insert(id, info);

        id
    }

    /// Replace the fields of an already-registered struct
    ///
    /// Struct names are declared before their fields are resolved so that
    /// fields may reference structs declared later in the unit.
    pub fn set_struct_fields(
        &mut self,
        id: StructId,
        fields: HashMap<String, Type>,
        field_order: Vec<String>,
    ) {
        if let Some(info) = self.structs.get_mut(&id) {
            info.fields = fields;
            info.field_order = field_order;
        }
    }

    /// Look up a struct by ID
    #[must_use]
    pub fn get_struct(&self, id: StructId) -> Option<&StructInfo> {
        self.structs.get(&id)
    }

    /// Look up a struct by name
    #[must_use]
    pub fn lookup_struct(&self, name: &str) -> Option<(StructId, &StructInfo)> {
        self.struct_names
            .get(name)
            .and_then(|&id| self.structs.get(&id).map(|info| (id, info)))
    }

    /// Set the current function's return type
    pub fn set_return_type(&mut self, ty: Option<Type>) {
        self.current_return_type = ty;
    }

    /// Get the current function's return type
    #[must_use]
    pub fn get_return_type(&self) -> Option<&Type> {
        self.current_return_type.as_ref()
    }

    /// Check if we're currently inside a function
    #[must_use]
    pub fn in_function(&self) -> bool {
        self.current_return_type.is_some()
    }
}
