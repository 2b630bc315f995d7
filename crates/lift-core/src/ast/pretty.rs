//! Pretty printing for AST nodes
//!
//! Implements Display for AST nodes to produce human-readable LIFT syntax.

use std::fmt::{self, Display, Formatter};

use super::{
    BinOp, Block, ElseBranch, Expr, ExprKind, FieldInit, Function, Ident, Import, Item, ItemKind,
    Literal, MatchArm, Param, Pattern, PatternKind, Stmt, StmtKind, StructDef, StructField,
    TypeAnnotation, TypeAnnotationKind, UnaryOp, Unit,
};

fn write_comma_separated<T: Display>(f: &mut Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl Display for Ident {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl Display for BinOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for UnaryOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Int(n) => write!(f, "{n}"),
            Literal::Float(x) => {
                if x.fract() == 0.0 && x.is_finite() {
                    write!(f, "{x:.1}")
                } else {
                    write!(f, "{x}")
                }
            }
            Literal::String(s) => {
                write!(f, "\"")?;
                for c in s.chars() {
                    match c {
                        '\n' => write!(f, "\\n")?,
                        '\t' => write!(f, "\\t")?,
                        '\\' => write!(f, "\\\\")?,
                        '"' => write!(f, "\\\"")?,
                        _ => write!(f, "{c}")?,
                    }
                }
                write!(f, "\"")
            }
            Literal::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl Display for TypeAnnotation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            TypeAnnotationKind::Named(name) => write!(f, "{name}"),
            TypeAnnotationKind::List(elem) => write!(f, "[{elem}]"),
            TypeAnnotationKind::Function { params, ret } => {
                write!(f, "(")?;
                write_comma_separated(f, params)?;
                write!(f, ") => {ret}")
            }
        }
    }
}

impl Display for Param {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => write!(f, "{}: {ty}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl Display for Pattern {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            PatternKind::Wildcard => write!(f, "_"),
            PatternKind::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

impl Display for MatchArm {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} => {}", self.pattern, self.body)
    }
}

impl Display for FieldInit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(lit) => write!(f, "{lit}"),
            ExprKind::Ident(name) => write!(f, "{name}"),
            ExprKind::Binary { left, op, right } => write!(f, "{left} {op} {right}"),
            ExprKind::Unary { op, expr } => write!(f, "{op}{expr}"),
            ExprKind::Paren(inner) => write!(f, "({inner})"),
            ExprKind::Call { callee, args } => {
                write!(f, "{callee}(")?;
                write_comma_separated(f, args)?;
                write!(f, ")")
            }
            ExprKind::Field { expr, field } => write!(f, "{expr}.{field}"),
            ExprKind::Index { expr, index } => write!(f, "{expr}[{index}]"),
            ExprKind::List(elems) => {
                write!(f, "[")?;
                write_comma_separated(f, elems)?;
                write!(f, "]")
            }
            ExprKind::Lambda { params, body } => {
                write!(f, "(")?;
                write_comma_separated(f, params)?;
                write!(f, ") => {body}")
            }
            ExprKind::Match { scrutinee, arms } => {
                write!(f, "match {scrutinee} {{ ")?;
                for (i, arm) in arms.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arm}")?;
                }
                write!(f, " }}")
            }
            ExprKind::StructLiteral { name, fields } => {
                write!(f, "{name} {{ ")?;
                write_comma_separated(f, fields)?;
                write!(f, " }}")
            }
        }
    }
}

impl Display for Block {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{{")?;
        for stmt in &self.stmts {
            for line in stmt.to_string().lines() {
                writeln!(f, "    {line}")?;
            }
        }
        write!(f, "}}")
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            StmtKind::Let {
                name,
                mutable,
                ty,
                value,
            } => {
                let keyword = if *mutable { "let" } else { "const" };
                match ty {
                    Some(ty) => write!(f, "{keyword} {name}: {ty} = {value};"),
                    None => write!(f, "{keyword} {name} = {value};"),
                }
            }
            StmtKind::Expr(expr) => write!(f, "{expr};"),
            StmtKind::Assign { target, value } => write!(f, "{target} = {value};"),
            StmtKind::If {
                cond,
                then_block,
                else_branch,
            } => {
                write!(f, "if {cond} {then_block}")?;
                match else_branch {
                    Some(ElseBranch::Block(block)) => write!(f, " else {block}"),
                    Some(ElseBranch::If(stmt)) => write!(f, " else {stmt}"),
                    None => Ok(()),
                }
            }
            StmtKind::While { cond, body } => write!(f, "while {cond} {body}"),
            StmtKind::For {
                binding,
                iterable,
                body,
            } => write!(f, "for {binding} in {iterable} {body}"),
            StmtKind::Return(Some(expr)) => write!(f, "return {expr};"),
            StmtKind::Return(None) => write!(f, "return;"),
            StmtKind::Block(block) => write!(f, "{block}"),
        }
    }
}

impl Display for Function {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "func {}(", self.name)?;
        write_comma_separated(f, &self.params)?;
        write!(f, ")")?;
        if let Some(ret) = &self.return_type {
            write!(f, ": {ret}")?;
        }
        write!(f, " {}", self.body)
    }
}

impl Display for StructField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

impl Display for StructDef {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "struct {} {{", self.name)?;
        for field in &self.fields {
            writeln!(f, "    {field},")?;
        }
        write!(f, "}}")
    }
}

impl Display for Import {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "import {};", self.name)
    }
}

impl Display for Item {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ItemKind::Function(func) => write!(f, "{func}"),
            ItemKind::Struct(def) => write!(f, "{def}"),
            ItemKind::Import(import) => write!(f, "{import}"),
            ItemKind::Stmt(stmt) => write!(f, "{stmt}"),
        }
    }
}

impl Display for Unit {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (i, item) in self.items.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(f, "{item}")?;
        }
        Ok(())
    }
}
