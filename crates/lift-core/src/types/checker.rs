//! Type checker for the LIFT programming language
//!
//! Performs static type analysis on the AST, resolving every name against
//! the scope stack and validating every expression's type. The checker
//! never mutates the AST: resolved types are recorded in a side table keyed
//! by [`ExprId`]. Every rule violation appends one diagnostic and
//! substitutes the error type at that node, so a whole unit is always
//! checked end to end.

use std::collections::{HashMap, HashSet};

use crate::ast::{
    BinOp, Block, ElseBranch, Expr, ExprId, ExprKind, FieldInit, Function, Ident, ItemKind,
    Literal, MatchArm, Param, Pattern, PatternKind, Stmt, StmtKind, StructDef, TypeAnnotation,
    TypeAnnotationKind, UnaryOp, Unit,
};
use crate::lexer::Span;

use super::env::{Binding, BindingKind, StructInfo, TypeEnv};
use super::error::{TypeError, TypeErrorKind};
use super::Type;

/// Result of type checking one unit
#[derive(Debug, Clone)]
pub struct TypeCheckResult {
    /// Resolved type of every expression, keyed by its parser-assigned id
    pub types: HashMap<ExprId, Type>,

    /// Collected errors and warnings, in detection order
    pub errors: Vec<TypeError>,

    /// Whether type checking succeeded (no errors; warnings don't count)
    pub success: bool,
}

/// Type checker for LIFT programs
pub struct TypeChecker {
    /// Type environment (scope stack + struct registry)
    env: TypeEnv,

    /// Collected type errors
    errors: Vec<TypeError>,

    /// Resolved expression types
    types: HashMap<ExprId, Type>,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    /// Create a new type checker
    #[must_use]
    pub fn new() -> Self {
        let mut checker = Self {
            env: TypeEnv::new(),
            errors: Vec::new(),
            types: HashMap::new(),
        };
        checker.register_builtins();
        checker
    }

    /// The environment after checking
    ///
    /// Once `check_unit` returns, the program scope holds every top-level
    /// binding with its resolved signature, and the struct registry holds
    /// every declared struct's field types.
    #[must_use]
    pub fn env(&self) -> &TypeEnv {
        &self.env
    }

    /// Register built-in function signatures
    ///
    /// Bodies live outside this crate; only the signatures participate in
    /// checking.
    fn register_builtins(&mut self) {
        let builtins = [
            ("println", Type::function(vec![Type::String], Type::Unit)),
            ("print", Type::function(vec![Type::String], Type::Unit)),
            ("len", Type::function(vec![Type::String], Type::Int)),
            (
                "range",
                Type::function(vec![Type::Int, Type::Int], Type::Range),
            ),
        ];
        for (name, ty) in builtins {
            self.env
                .define(name, Binding::new(BindingKind::Function, ty, Span::dummy()));
        }
    }

    /// Type check a complete unit
    pub fn check_unit(&mut self, unit: &Unit) -> TypeCheckResult {
        // First pass: declare all struct names so fields and signatures may
        // reference structs declared later in the unit
        for item in &unit.items {
            if let ItemKind::Struct(def) = &item.kind {
                self.declare_struct(def);
            }
        }

        // Second pass: resolve struct fields and register function
        // signatures (enables forward references and mutual recursion)
        for item in &unit.items {
            match &item.kind {
                ItemKind::Struct(def) => self.resolve_struct_fields(def),
                ItemKind::Function(func) => self.register_function(func),
                _ => {}
            }
        }

        // Third pass: check bodies and top-level statements in order
        for item in &unit.items {
            match &item.kind {
                ItemKind::Function(func) => self.check_function(func),
                ItemKind::Stmt(stmt) => self.check_stmt(stmt),
                ItemKind::Struct(_) | ItemKind::Import(_) => {}
            }
        }

        let success = !self.errors.iter().any(|e| !e.is_warning());
        TypeCheckResult {
            types: std::mem::take(&mut self.types),
            errors: std::mem::take(&mut self.errors),
            success,
        }
    }

    // ==================== Declaration Registration ====================

    /// Declare a struct name, fields to be filled in later
    fn declare_struct(&mut self, def: &StructDef) {
        if self.env.lookup_struct(&def.name.name).is_some() {
            self.errors.push(TypeError::new(
                TypeErrorKind::DuplicateDefinition(def.name.name.clone()),
                def.name.span,
            ));
            return;
        }

        let id = self.env.define_struct(StructInfo {
            name: def.name.name.clone(),
            fields: HashMap::new(),
            field_order: Vec::new(),
            span: def.span,
        });

        // The struct name is also a binding in the program scope, so that
        // assigning to it reports ImmutableAssignment rather than an
        // undefined reference
        self.env.define(
            &def.name.name,
            Binding::new(
                BindingKind::StructType,
                Type::struct_type(id, &def.name.name),
                def.name.span,
            ),
        );
    }

    /// Resolve a struct's declared field types
    fn resolve_struct_fields(&mut self, def: &StructDef) {
        let Some((id, _)) = self.env.lookup_struct(&def.name.name) else {
            return;
        };

        let mut fields = HashMap::new();
        let mut field_order = Vec::new();
        for field in &def.fields {
            let ty = self.resolve_type_annotation(&field.ty);
            if fields.insert(field.name.name.clone(), ty).is_some() {
                self.errors.push(TypeError::new(
                    TypeErrorKind::DuplicateDefinition(field.name.name.clone()),
                    field.name.span,
                ));
                continue;
            }
            field_order.push(field.name.name.clone());
        }

        self.env.set_struct_fields(id, fields, field_order);
    }

    /// Register a function's signature in the program scope
    fn register_function(&mut self, func: &Function) {
        if self.env.exists_in_current_scope(&func.name.name) {
            self.errors.push(TypeError::new(
                TypeErrorKind::DuplicateDefinition(func.name.name.clone()),
                func.name.span,
            ));
            return;
        }

        let params: Vec<Type> = func
            .params
            .iter()
            .map(|p| self.resolve_param_type(p))
            .collect();
        let ret = func
            .return_type
            .as_ref()
            .map_or(Type::Unit, |t| self.resolve_type_annotation(t));

        self.env.define(
            &func.name.name,
            Binding::new(
                BindingKind::Function,
                Type::function(params, ret),
                func.name.span,
            ),
        );
    }

    /// Resolve a declared parameter's type
    fn resolve_param_type(&mut self, param: &Param) -> Type {
        match &param.ty {
            Some(ty) => self.resolve_type_annotation(ty),
            None => {
                // Named-function parameters always carry annotations (the
                // parser requires them); this is the lambda-parameter case
                self.errors.push(TypeError::new(
                    TypeErrorKind::CannotInfer(param.name.name.clone()),
                    param.span,
                ));
                Type::Error
            }
        }
    }

    // ==================== Item Checking ====================

    /// Check a function body against its signature
    fn check_function(&mut self, func: &Function) {
        let declared_ret = func
            .return_type
            .as_ref()
            .map_or(Type::Unit, |t| self.resolve_type_annotation(t));

        self.env.enter_scope();
        self.env.set_return_type(Some(declared_ret));

        for param in &func.params {
            let param_ty = self.resolve_param_type(param);
            self.env.define(
                &param.name.name,
                Binding::new(BindingKind::Variable, param_ty, param.span),
            );
        }

        self.check_block(&func.body);

        self.env.set_return_type(None);
        self.env.exit_scope();
    }

    // ==================== Statement Checking ====================

    /// Check a block, giving it its own scope
    fn check_block(&mut self, block: &Block) {
        self.env.enter_scope();
        for stmt in &block.stmts {
            self.check_stmt(stmt);
        }
        self.env.exit_scope();
    }

    /// Type check a statement
    fn check_stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::Let {
                name,
                mutable,
                ty,
                value,
            } => self.check_let(name, *mutable, ty.as_ref(), value),

            StmtKind::Expr(expr) => {
                self.check_expr(expr);
            }

            StmtKind::Assign { target, value } => self.check_assign(target, value),

            StmtKind::If {
                cond,
                then_block,
                else_branch,
            } => {
                let cond_ty = self.check_expr(cond);
                if !cond_ty.structurally_equals(&Type::Bool) {
                    self.errors
                        .push(TypeError::mismatch(Type::Bool, cond_ty, cond.span));
                }

                self.check_block(then_block);
                match else_branch {
                    Some(ElseBranch::Block(block)) => self.check_block(block),
                    Some(ElseBranch::If(nested)) => self.check_stmt(nested),
                    None => {}
                }
            }

            StmtKind::While { cond, body } => {
                let cond_ty = self.check_expr(cond);
                if !cond_ty.structurally_equals(&Type::Bool) {
                    self.errors
                        .push(TypeError::mismatch(Type::Bool, cond_ty, cond.span));
                }
                self.check_block(body);
            }

            StmtKind::For {
                binding,
                iterable,
                body,
            } => {
                let iter_ty = self.check_expr(iterable);
                let elem_ty = self.iterator_element_type(&iter_ty, iterable.span);

                self.env.enter_scope();
                self.env.define(
                    &binding.name,
                    Binding::new(BindingKind::Variable, elem_ty, binding.span),
                );
                self.check_block(body);
                self.env.exit_scope();
            }

            StmtKind::Return(value) => {
                let value_ty = value.as_ref().map_or(Type::Unit, |e| self.check_expr(e));

                if let Some(expected) = self.env.get_return_type().cloned() {
                    if !value_ty.structurally_equals(&expected) {
                        self.errors.push(TypeError::new(
                            TypeErrorKind::ReturnTypeMismatch {
                                expected,
                                found: value_ty,
                            },
                            stmt.span,
                        ));
                    }
                } else {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::ReturnOutsideFunction,
                        stmt.span,
                    ));
                }
            }

            StmtKind::Block(block) => self.check_block(block),
        }
    }

    /// Check a `let`/`const` binding
    fn check_let(&mut self, name: &Ident, mutable: bool, ty: Option<&TypeAnnotation>, value: &Expr) {
        let value_ty = self.check_expr(value);
        let declared = ty.map(|t| self.resolve_type_annotation(t));

        let final_ty = if let Some(declared) = declared {
            if !value_ty.structurally_equals(&declared) {
                self.errors
                    .push(TypeError::mismatch(declared.clone(), value_ty, value.span));
            }
            declared
        } else {
            value_ty
        };

        // Shadowing in an inner scope is legal; redeclaring within the same
        // scope is not
        if self.env.exists_in_current_scope(&name.name) {
            self.errors.push(TypeError::new(
                TypeErrorKind::DuplicateDefinition(name.name.clone()),
                name.span,
            ));
        }

        let kind = if mutable {
            BindingKind::Variable
        } else {
            BindingKind::Constant
        };
        self.env
            .define(&name.name, Binding::new(kind, final_ty, name.span));
    }

    /// Check an assignment statement
    fn check_assign(&mut self, target: &Expr, value: &Expr) {
        let target_ty = self.check_expr(target);
        let value_ty = self.check_expr(value);

        // Mutability is decided by the root binding of the target: plain
        // identifiers directly, field/index targets through their base
        if let Some(root) = root_ident(target) {
            if let Some(binding) = self.env.lookup(&root.name) {
                if !binding.is_assignable() {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::ImmutableAssignment(root.name.clone()),
                        target.span,
                    ));
                }
            }
            // An unresolved root was already reported by check_expr
        }

        if !value_ty.structurally_equals(&target_ty) {
            self.errors
                .push(TypeError::mismatch(target_ty, value_ty, value.span));
        }
    }

    // ==================== Expression Checking ====================

    /// Type check an expression, recording its resolved type
    fn check_expr(&mut self, expr: &Expr) -> Type {
        let ty = self.check_expr_kind(expr);
        self.types.insert(expr.id, ty.clone());
        ty
    }

    fn check_expr_kind(&mut self, expr: &Expr) -> Type {
        match &expr.kind {
            ExprKind::Literal(lit) => literal_type(lit),

            ExprKind::Ident(name) => {
                if let Some(binding) = self.env.lookup(&name.name) {
                    binding.ty.clone()
                } else {
                    self.errors.push(TypeError::undefined(&name.name, expr.span));
                    Type::Error
                }
            }

            ExprKind::Binary { left, op, right } => {
                let left_ty = self.check_expr(left);
                let right_ty = self.check_expr(right);
                self.check_binary_op(*op, &left_ty, &right_ty, expr.span)
            }

            ExprKind::Unary { op, expr: operand } => {
                let operand_ty = self.check_expr(operand);
                self.check_unary_op(*op, &operand_ty, expr.span)
            }

            ExprKind::Paren(inner) => self.check_expr(inner),

            ExprKind::Call { callee, args } => {
                let callee_ty = self.check_expr(callee);
                // All argument expressions are checked before the call shape
                // is validated, so diagnostics inside surplus arguments are
                // still produced
                let arg_tys: Vec<(Type, Span)> = args
                    .iter()
                    .map(|a| (self.check_expr(a), a.span))
                    .collect();
                self.check_call(&callee_ty, &arg_tys, expr.span)
            }

            ExprKind::Field { expr: obj, field } => {
                let obj_ty = self.check_expr(obj);
                self.check_field_access(&obj_ty, field, expr.span)
            }

            ExprKind::Index { expr: container, index } => {
                let container_ty = self.check_expr(container);
                let index_ty = self.check_expr(index);
                self.check_index(&container_ty, &index_ty, expr.span)
            }

            ExprKind::List(elems) => self.check_list(elems),

            ExprKind::Lambda { params, body } => self.check_lambda(params, body),

            ExprKind::Match { scrutinee, arms } => self.check_match(scrutinee, arms, expr.span),

            ExprKind::StructLiteral { name, fields } => {
                self.check_struct_literal(name, fields, expr.span)
            }
        }
    }

    /// Check a binary operation
    fn check_binary_op(&mut self, op: BinOp, left: &Type, right: &Type, span: Span) -> Type {
        // An already-reported error operand never produces a second
        // diagnostic; the result shape is still known for boolean operators
        if left.is_error() || right.is_error() {
            return match op {
                BinOp::Eq
                | BinOp::Ne
                | BinOp::Lt
                | BinOp::Le
                | BinOp::Gt
                | BinOp::Ge
                | BinOp::And
                | BinOp::Or => Type::Bool,
                _ => Type::Error,
            };
        }

        match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod => {
                match (left, right) {
                    (Type::Int, Type::Int) => Type::Int,
                    (Type::Float, Type::Float) => Type::Float,
                    // String concatenation
                    (Type::String, Type::String) if op == BinOp::Add => Type::String,
                    // No implicit int <-> float coercion
                    _ if left.is_numeric() && right.is_numeric() => {
                        self.errors
                            .push(TypeError::mismatch(left.clone(), right.clone(), span));
                        Type::Error
                    }
                    _ => {
                        self.errors.push(TypeError::new(
                            TypeErrorKind::InvalidBinaryOp {
                                op: op.as_str(),
                                left: left.clone(),
                                right: right.clone(),
                            },
                            span,
                        ));
                        Type::Error
                    }
                }
            }

            BinOp::Eq | BinOp::Ne => {
                if !left.structurally_equals(right) {
                    self.errors
                        .push(TypeError::mismatch(left.clone(), right.clone(), span));
                }
                Type::Bool
            }

            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                if !left.structurally_equals(right) {
                    self.errors
                        .push(TypeError::mismatch(left.clone(), right.clone(), span));
                } else if !(left.is_numeric() || matches!(left, Type::String)) {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::InvalidBinaryOp {
                            op: op.as_str(),
                            left: left.clone(),
                            right: right.clone(),
                        },
                        span,
                    ));
                }
                Type::Bool
            }

            BinOp::And | BinOp::Or => {
                if !left.structurally_equals(&Type::Bool) {
                    self.errors
                        .push(TypeError::mismatch(Type::Bool, left.clone(), span));
                }
                if !right.structurally_equals(&Type::Bool) {
                    self.errors
                        .push(TypeError::mismatch(Type::Bool, right.clone(), span));
                }
                Type::Bool
            }

            BinOp::BitOr | BinOp::BitXor | BinOp::BitAnd => {
                if matches!(left, Type::Int) && matches!(right, Type::Int) {
                    Type::Int
                } else {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::InvalidBinaryOp {
                            op: op.as_str(),
                            left: left.clone(),
                            right: right.clone(),
                        },
                        span,
                    ));
                    Type::Error
                }
            }
        }
    }

    /// Check a unary operation
    fn check_unary_op(&mut self, op: UnaryOp, operand: &Type, span: Span) -> Type {
        if operand.is_error() {
            return match op {
                UnaryOp::Not => Type::Bool,
                UnaryOp::BitNot => Type::Int,
                UnaryOp::Neg => Type::Error,
            };
        }

        match op {
            UnaryOp::Neg => {
                if operand.is_numeric() {
                    operand.clone()
                } else {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::InvalidUnaryOp {
                            op: op.as_str(),
                            operand: operand.clone(),
                        },
                        span,
                    ));
                    Type::Error
                }
            }
            UnaryOp::Not => {
                if matches!(operand, Type::Bool) {
                    Type::Bool
                } else {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::InvalidUnaryOp {
                            op: op.as_str(),
                            operand: operand.clone(),
                        },
                        span,
                    ));
                    Type::Error
                }
            }
            UnaryOp::BitNot => {
                if matches!(operand, Type::Int) {
                    Type::Int
                } else {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::InvalidUnaryOp {
                            op: op.as_str(),
                            operand: operand.clone(),
                        },
                        span,
                    ));
                    Type::Error
                }
            }
        }
    }

    /// Check a function call
    fn check_call(&mut self, callee: &Type, args: &[(Type, Span)], span: Span) -> Type {
        match callee {
            Type::Function { params, ret } => {
                if params.len() != args.len() {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::ArityMismatch {
                            expected: params.len(),
                            found: args.len(),
                        },
                        span,
                    ));
                    return Type::Error;
                }

                for (param, (arg, arg_span)) in params.iter().zip(args.iter()) {
                    if !arg.structurally_equals(param) {
                        self.errors
                            .push(TypeError::mismatch(param.clone(), arg.clone(), *arg_span));
                    }
                }

                (**ret).clone()
            }
            Type::Error => Type::Error,
            _ => {
                self.errors.push(TypeError::new(
                    TypeErrorKind::NotCallable(callee.clone()),
                    span,
                ));
                Type::Error
            }
        }
    }

    /// Check a field access
    fn check_field_access(&mut self, obj: &Type, field: &Ident, span: Span) -> Type {
        match obj {
            Type::Struct { id, .. } => {
                if let Some(ty) = self
                    .env
                    .get_struct(*id)
                    .and_then(|info| info.fields.get(&field.name))
                {
                    ty.clone()
                } else {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::NoSuchField {
                            ty: obj.clone(),
                            field: field.name.clone(),
                        },
                        span,
                    ));
                    Type::Error
                }
            }
            Type::Error => Type::Error,
            _ => {
                self.errors.push(TypeError::new(
                    TypeErrorKind::NoSuchField {
                        ty: obj.clone(),
                        field: field.name.clone(),
                    },
                    span,
                ));
                Type::Error
            }
        }
    }

    /// Check an index access
    fn check_index(&mut self, container: &Type, index: &Type, span: Span) -> Type {
        match container {
            Type::List(elem) => {
                if !index.structurally_equals(&Type::Int) {
                    self.errors.push(TypeError::new(
                        TypeErrorKind::InvalidIndexType {
                            container: container.clone(),
                            index: index.clone(),
                        },
                        span,
                    ));
                }
                (**elem).clone()
            }
            Type::Error => Type::Error,
            _ => {
                self.errors.push(TypeError::new(
                    TypeErrorKind::NotIndexable(container.clone()),
                    span,
                ));
                Type::Error
            }
        }
    }

    /// Check a list literal; elements must share one type
    fn check_list(&mut self, elems: &[Expr]) -> Type {
        let mut elem_ty: Option<Type> = None;

        for elem in elems {
            let ty = self.check_expr(elem);
            match &elem_ty {
                Some(expected) => {
                    if !ty.structurally_equals(expected) {
                        self.errors
                            .push(TypeError::mismatch(expected.clone(), ty, elem.span));
                    }
                }
                None => elem_ty = Some(ty),
            }
        }

        // The element type of an empty literal is pinned by the binding's
        // annotation; the error sentinel compares equal to anything
        Type::list(elem_ty.unwrap_or(Type::Error))
    }

    /// Check an anonymous function
    fn check_lambda(&mut self, params: &[Param], body: &Expr) -> Type {
        self.env.enter_scope();

        let param_tys: Vec<Type> = params
            .iter()
            .map(|param| {
                let ty = self.resolve_param_type(param);
                self.env.define(
                    &param.name.name,
                    Binding::new(BindingKind::Variable, ty.clone(), param.span),
                );
                ty
            })
            .collect();

        let ret = self.check_expr(body);
        self.env.exit_scope();

        Type::function(param_tys, ret)
    }

    /// Check a match expression
    fn check_match(&mut self, scrutinee: &Expr, arms: &[MatchArm], span: Span) -> Type {
        let scrutinee_ty = self.check_expr(scrutinee);
        let mut result_ty: Option<Type> = None;

        for arm in arms {
            self.check_pattern(&arm.pattern, &scrutinee_ty);

            let arm_ty = self.check_expr(&arm.body);
            match &result_ty {
                Some(expected) => {
                    if !arm_ty.structurally_equals(expected) {
                        self.errors.push(TypeError::new(
                            TypeErrorKind::MatchArmTypeMismatch {
                                expected: expected.clone(),
                                found: arm_ty,
                            },
                            arm.body.span,
                        ));
                    }
                }
                None => result_ty = Some(arm_ty),
            }
        }

        if !arms.iter().any(|arm| arm.pattern.is_wildcard()) {
            self.errors
                .push(TypeError::new(TypeErrorKind::NonExhaustiveMatch, span));
        }

        result_ty.unwrap_or(Type::Error)
    }

    /// Check a pattern against the scrutinee's type
    fn check_pattern(&mut self, pattern: &Pattern, expected: &Type) {
        match &pattern.kind {
            PatternKind::Wildcard => {}
            PatternKind::Literal(lit) => {
                let lit_ty = literal_type(lit);
                if !lit_ty.structurally_equals(expected) {
                    self.errors
                        .push(TypeError::mismatch(expected.clone(), lit_ty, pattern.span));
                }
            }
        }
    }

    /// Check a struct literal
    fn check_struct_literal(&mut self, name: &Ident, fields: &[FieldInit], span: Span) -> Type {
        let Some((id, info)) = self.env.lookup_struct(&name.name) else {
            self.errors.push(TypeError::new(
                TypeErrorKind::UndefinedType(name.name.clone()),
                name.span,
            ));
            // Field values still get checked so their own errors surface
            for field in fields {
                self.check_expr(&field.value);
            }
            return Type::Error;
        };
        let struct_name = info.name.clone();
        let expected_fields = info.fields.clone();
        let field_order = info.field_order.clone();

        let mut seen = HashSet::new();
        for field in fields {
            let field_name = &field.name.name;

            if !seen.insert(field_name.clone()) {
                self.errors.push(TypeError::new(
                    TypeErrorKind::DuplicateField(field_name.clone()),
                    field.name.span,
                ));
                self.check_expr(&field.value);
                continue;
            }

            let value_ty = self.check_expr(&field.value);
            if let Some(expected) = expected_fields.get(field_name) {
                if !value_ty.structurally_equals(expected) {
                    self.errors
                        .push(TypeError::mismatch(expected.clone(), value_ty, field.span));
                }
            } else {
                self.errors.push(TypeError::new(
                    TypeErrorKind::UnknownField {
                        struct_name: struct_name.clone(),
                        field: field_name.clone(),
                    },
                    field.name.span,
                ));
            }
        }

        // Every declared field must be initialized exactly once
        for field_name in &field_order {
            if !seen.contains(field_name) {
                self.errors.push(TypeError::new(
                    TypeErrorKind::MissingField {
                        struct_name: struct_name.clone(),
                        field: field_name.clone(),
                    },
                    span,
                ));
            }
        }

        Type::struct_type(id, struct_name)
    }

    // ==================== Helpers ====================

    /// Element type of a for-loop iterable
    fn iterator_element_type(&mut self, iter_ty: &Type, span: Span) -> Type {
        match iter_ty {
            Type::Range => Type::Int,
            Type::List(elem) => (**elem).clone(),
            Type::Error => Type::Error,
            _ => {
                self.errors.push(TypeError::new(
                    TypeErrorKind::NotIterable(iter_ty.clone()),
                    span,
                ));
                Type::Error
            }
        }
    }

    /// Resolve a syntactic type annotation to an internal type
    fn resolve_type_annotation(&mut self, annotation: &TypeAnnotation) -> Type {
        match &annotation.kind {
            TypeAnnotationKind::Named(name) => match name.name.as_str() {
                "int" => Type::Int,
                "float" => Type::Float,
                "string" => Type::String,
                "bool" => Type::Bool,
                other => {
                    if let Some((id, info)) = self.env.lookup_struct(other) {
                        Type::struct_type(id, info.name.clone())
                    } else {
                        self.errors.push(TypeError::new(
                            TypeErrorKind::UndefinedType(other.to_string()),
                            annotation.span,
                        ));
                        Type::Error
                    }
                }
            },
            TypeAnnotationKind::List(elem) => Type::list(self.resolve_type_annotation(elem)),
            TypeAnnotationKind::Function { params, ret } => {
                let params = params
                    .iter()
                    .map(|p| self.resolve_type_annotation(p))
                    .collect();
                let ret = self.resolve_type_annotation(ret);
                Type::function(params, ret)
            }
        }
    }
}

/// The type of a literal value
const fn literal_type(lit: &Literal) -> Type {
    match lit {
        Literal::Int(_) => Type::Int,
        Literal::Float(_) => Type::Float,
        Literal::String(_) => Type::String,
        Literal::Bool(_) => Type::Bool,
    }
}

/// The root identifier of an assignment target, if any
///
/// `x`, `p.x`, and `xs[0].y` all root at their base identifier.
fn root_ident(expr: &Expr) -> Option<&Ident> {
    match &expr.kind {
        ExprKind::Ident(ident) => Some(ident),
        ExprKind::Field { expr, .. } | ExprKind::Index { expr, .. } => root_ident(expr),
        ExprKind::Paren(inner) => root_ident(inner),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn check(source: &str) -> TypeCheckResult {
        let parsed = Parser::parse(source);
        assert!(
            parsed.errors.is_empty(),
            "parse errors: {:?}",
            parsed.errors
        );
        TypeChecker::new().check_unit(&parsed.unit)
    }

    fn error_kinds(result: &TypeCheckResult) -> Vec<&TypeErrorKind> {
        result.errors.iter().map(|e| &e.kind).collect()
    }

    #[test]
    fn literal_types_resolve() {
        let result = check("let a = 1; let b = 1.5; let c = \"s\"; let d = true;");
        assert!(result.success, "errors: {:?}", result.errors);
    }

    #[test]
    fn annotation_match_and_mismatch() {
        assert!(check("let x: int = 42;").success);

        let result = check("let x: int = 3.14;");
        assert!(!result.success);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch {
                expected: Type::Int,
                found: Type::Float
            }
        ));
    }

    #[test]
    fn no_implicit_numeric_coercion() {
        let result = check("let x = 1 + 2.0;");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn string_concatenation() {
        assert!(check(r#"let s = "a" + "b";"#).success);
        assert!(!check(r#"let s = "a" - "b";"#).success);
    }

    #[test]
    fn undefined_references_are_independent() {
        let result = check("let a = missing1; let b = missing2;");
        assert_eq!(result.errors.len(), 2);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::UndefinedReference(n) if n == "missing1"
        ));
        assert!(matches!(
            error_kinds(&result)[1],
            TypeErrorKind::UndefinedReference(n) if n == "missing2"
        ));
        assert_ne!(result.errors[0].span, result.errors[1].span);
    }

    #[test]
    fn const_reassignment_is_one_error() {
        let result = check("const c = 1; c = 2;");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::ImmutableAssignment(n) if n == "c"
        ));
    }

    #[test]
    fn let_reassignment_is_fine() {
        assert!(check("let x = 1; x = 2;").success);
    }

    #[test]
    fn assignment_type_must_match() {
        let result = check("let x = 1; x = \"s\";");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn shadowing_restores_outer_binding() {
        // The inner block shadows x with a string; after the block pops, the
        // outer int binding is what assignment resolves against
        let result = check("func f() { let x = 1; { let x = \"s\"; x = \"t\"; } x = 2; }");
        assert!(result.success, "errors: {:?}", result.errors);
    }

    #[test]
    fn duplicate_definition_in_same_scope() {
        let result = check("let x = 1; let x = 2;");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::DuplicateDefinition(n) if n == "x"
        ));
    }

    #[test]
    fn function_call_checks() {
        assert!(check("func add(a: int, b: int): int { return a + b; } let s = add(1, 2);").success);

        let result = check("func add(a: int, b: int): int { return a + b; } let s = add(1, 2, 3);");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::ArityMismatch {
                expected: 2,
                found: 3
            }
        ));
    }

    #[test]
    fn arity_mismatch_still_checks_arguments() {
        // The undefined reference inside the surplus argument is reported
        // alongside the arity error
        let result = check("func f(a: int) { } func g() { f(1, missing); }");
        assert_eq!(result.errors.len(), 2);
        assert!(error_kinds(&result)
            .iter()
            .any(|k| matches!(k, TypeErrorKind::UndefinedReference(n) if n == "missing")));
        assert!(error_kinds(&result)
            .iter()
            .any(|k| matches!(k, TypeErrorKind::ArityMismatch { .. })));
    }

    #[test]
    fn argument_type_mismatch() {
        let result = check("func f(a: int) { } func g() { f(\"s\"); }");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch {
                expected: Type::Int,
                found: Type::String
            }
        ));
    }

    #[test]
    fn calling_a_non_function() {
        let result = check("let x = 1; let y = x();");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::NotCallable(Type::Int)
        ));
    }

    #[test]
    fn forward_references_between_functions() {
        assert!(check(
            "func even(n: int): bool { return odd(n - 1); } \
             func odd(n: int): bool { return even(n - 1); }"
        )
        .success);
    }

    #[test]
    fn struct_literal_complete() {
        assert!(check(
            "struct Point { x: int, y: int } let p = Point { x: 1, y: 2 }; let a = p.x;"
        )
        .success);
    }

    #[test]
    fn struct_missing_field() {
        let result = check("struct Point { x: int, y: int } let p = Point { x: 1 };");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::MissingField { field, .. } if field == "y"
        ));
    }

    #[test]
    fn struct_duplicate_field() {
        let result = check("struct Point { x: int, y: int } let p = Point { x: 1, x: 2, y: 3 };");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::DuplicateField(n) if n == "x"
        ));
    }

    #[test]
    fn struct_unknown_field() {
        let result = check("struct Point { x: int } let p = Point { x: 1, z: 2 };");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::UnknownField { field, .. } if field == "z"
        ));
    }

    #[test]
    fn struct_field_type_mismatch() {
        let result = check("struct Point { x: int } let p = Point { x: \"s\" };");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn field_access_on_non_struct() {
        let result = check("let x = 1; let y = x.field;");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::NoSuchField { .. }
        ));
    }

    #[test]
    fn structs_may_reference_each_other() {
        assert!(check(
            "struct Line { from: Point, to: Point } struct Point { x: int, y: int } \
             let l = Line { from: Point { x: 0, y: 0 }, to: Point { x: 1, y: 1 } };"
        )
        .success);
    }

    #[test]
    fn match_arms_unify() {
        assert!(check("let x = 1; let s = match x { 1 => \"one\", _ => \"other\" };").success);

        let result = check("let x = 1; let s = match x { 1 => \"one\", _ => 2 };");
        assert!(!result.success);
        assert!(error_kinds(&result)
            .iter()
            .any(|k| matches!(k, TypeErrorKind::MatchArmTypeMismatch { .. })));
    }

    #[test]
    fn match_pattern_must_match_scrutinee() {
        let result = check("let x = 1; let s = match x { \"one\" => 1, _ => 2 };");
        assert!(error_kinds(&result)
            .iter()
            .any(|k| matches!(k, TypeErrorKind::TypeMismatch { .. })));
    }

    #[test]
    fn non_exhaustive_match_is_a_warning() {
        let result = check("let x = 1; let s = match x { 1 => \"one\" };");
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].is_warning());
        // Warnings alone don't fail checking
        assert!(result.success);
    }

    #[test]
    fn while_condition_must_be_bool() {
        assert!(check("func f() { while true { } }").success);

        let result = check("func f() { while 1 { } }");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch {
                expected: Type::Bool,
                found: Type::Int
            }
        ));
    }

    #[test]
    fn if_condition_must_be_bool() {
        let result = check("func f() { if 1 { } }");
        assert!(!result.success);
    }

    #[test]
    fn for_over_range_binds_int() {
        assert!(check("func f() { for i in range(0, 10) { let x = i + 1; } }").success);
    }

    #[test]
    fn for_over_list_binds_element_type() {
        assert!(check("func f() { for s in [\"a\", \"b\"] { let t = s + \"!\"; } }").success);
    }

    #[test]
    fn for_over_non_iterable() {
        let result = check("func f() { for i in 42 { } }");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::NotIterable(Type::Int)
        ));
    }

    #[test]
    fn return_type_checked() {
        assert!(check("func f(): int { return 1; }").success);

        let result = check("func f(): int { return \"s\"; }");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::ReturnTypeMismatch {
                expected: Type::Int,
                found: Type::String
            }
        ));
    }

    #[test]
    fn bare_return_in_typed_function() {
        let result = check("func f(): int { return; }");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::ReturnTypeMismatch { .. }
        ));
    }

    #[test]
    fn return_without_declared_type_is_unit() {
        assert!(check("func f() { return; }").success);

        let result = check("func f() { return 1; }");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::ReturnTypeMismatch {
                expected: Type::Unit,
                found: Type::Int
            }
        ));
    }

    #[test]
    fn bitwise_requires_int() {
        assert!(check("let x = 1 & 2 | 4 ^ 8; let y = ~x;").success);

        let result = check("let x = 1.5 & 2.0;");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::InvalidBinaryOp { op: "&", .. }
        ));
    }

    #[test]
    fn logical_requires_bool() {
        let result = check("let x = 1 && true;");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch {
                expected: Type::Bool,
                found: Type::Int
            }
        ));
    }

    #[test]
    fn comparison_yields_bool() {
        assert!(check("let b: bool = 1 < 2;").success);

        let result = check("let b = 1 < \"s\";");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch { .. }
        ));
    }

    #[test]
    fn unary_operator_types() {
        assert!(check("let a = -1; let b = -1.5; let c = !true; let d = ~7;").success);
        assert!(!check("let a = -true;").success);
        assert!(!check("let a = !1;").success);
        assert!(!check("let a = ~1.5;").success);
    }

    #[test]
    fn error_type_suppresses_cascades() {
        // `missing` is undefined; the arithmetic and comparison around it
        // must not produce further diagnostics
        let result = check("let x = missing + 1 < 2;");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::UndefinedReference(_)
        ));
    }

    #[test]
    fn lambda_with_annotations() {
        assert!(check("let double: (int) => int = (x: int) => x * 2;").success);
    }

    #[test]
    fn lambda_param_without_annotation_cannot_infer() {
        let result = check("let f = (x) => x;");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::CannotInfer(n) if n == "x"
        ));
    }

    #[test]
    fn lambda_can_be_called() {
        assert!(check("const inc = (x: int) => x + 1; let y = inc(41);").success);
    }

    #[test]
    fn list_elements_must_agree() {
        assert!(check("let xs = [1, 2, 3];").success);

        let result = check("let xs = [1, \"two\"];");
        assert_eq!(result.errors.len(), 1);
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch {
                expected: Type::Int,
                found: Type::String
            }
        ));
    }

    #[test]
    fn empty_list_takes_annotated_type() {
        assert!(check("let xs: [int] = [];").success);
    }

    #[test]
    fn list_indexing() {
        assert!(check("let xs = [1, 2]; let x: int = xs[0];").success);

        let result = check("let xs = [1, 2]; let x = xs[\"zero\"];");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::InvalidIndexType { .. }
        ));

        let result = check("let n = 1; let x = n[0];");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::NotIndexable(Type::Int)
        ));
    }

    #[test]
    fn builtins_are_registered() {
        assert!(check("func f() { println(\"hi\"); let n = len(\"abc\"); }").success);

        let result = check("func f() { println(1); }");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::TypeMismatch {
                expected: Type::String,
                found: Type::Int
            }
        ));
    }

    #[test]
    fn undefined_type_annotation() {
        let result = check("let x: Widget = 1;");
        assert!(matches!(
            error_kinds(&result)[0],
            TypeErrorKind::UndefinedType(n) if n == "Widget"
        ));
    }

    #[test]
    fn assigning_to_a_function_name() {
        let result = check("func f() { } func g() { f = g; }");
        assert!(error_kinds(&result)
            .iter()
            .any(|k| matches!(k, TypeErrorKind::ImmutableAssignment(n) if n == "f")));
    }

    #[test]
    fn resolved_signatures_survive_checking() {
        let parsed = Parser::parse(
            "struct Point { x: int, y: int } func dist(a: Point, b: Point): float { return 0.0; }",
        );
        let mut checker = TypeChecker::new();
        let result = checker.check_unit(&parsed.unit);
        assert!(result.success);

        let dist = checker.env().lookup("dist").expect("dist binding");
        assert!(matches!(&dist.ty, Type::Function { params, ret }
            if params.len() == 2 && **ret == Type::Float));

        let (_, point) = checker.env().lookup_struct("Point").expect("Point struct");
        assert_eq!(point.field_order, vec!["x".to_string(), "y".to_string()]);
        assert_eq!(point.fields.get("x"), Some(&Type::Int));
    }

    #[test]
    fn types_side_table_is_populated() {
        let parsed = Parser::parse("let x = 1 + 2;");
        assert!(parsed.errors.is_empty());
        let result = TypeChecker::new().check_unit(&parsed.unit);
        assert!(result.success);
        // 1, 2, and 1 + 2 all have recorded types
        assert_eq!(result.types.len(), 3);
        assert!(result.types.values().all(|t| *t == Type::Int));
    }
}
