//! Stage-spanning diagnostics for the LIFT front end
//!
//! Lexing, parsing, and checking each recover locally and report through
//! their own error types; this module converts all of them into one uniform
//! [`Diagnostic`] record with line/column positions, merges them, and sorts
//! them by source position. The record shape is the stable contract for any
//! downstream reporter or CLI.

use crate::lexer::{LineIndex, Span};
use crate::parser::Parser;
use crate::types::{TypeCheckResult, TypeChecker};

pub use crate::ast::Unit;

/// How serious a diagnostic is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The unit is invalid
    Error,
    /// Suspicious but acceptable
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A line/column region of a source unit (1-indexed, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiagnosticSpan {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// A single diagnostic from any pipeline stage
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Error or warning
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    /// Where in the source the problem is
    pub span: DiagnosticSpan,
    /// Which source unit the diagnostic belongs to
    pub source_unit: String,
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}:{}: {}: {}",
            self.source_unit, self.span.start_line, self.span.start_col, self.severity, self.message
        )
    }
}

/// The result of running the whole front end over one source unit
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The parsed unit (malformed regions are absent)
    pub unit: Unit,
    /// The checker's output, including the expression type side table
    pub check: TypeCheckResult,
    /// All diagnostics from all stages, sorted by source position
    pub diagnostics: Vec<Diagnostic>,
}

impl Analysis {
    /// True when the unit lexed, parsed, and checked without errors
    /// (warnings are allowed)
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.diagnostics
            .iter()
            .all(|d| d.severity != Severity::Error)
    }
}

/// Run lexer, parser, and type checker over one named source unit
///
/// Every stage recovers locally, so the returned diagnostics are the maximal
/// set for the unit. Empty diagnostics implies success.
#[must_use]
pub fn analyze(name: &str, source: &str) -> Analysis {
    let parsed = Parser::parse(source);
    let check = TypeChecker::new().check_unit(&parsed.unit);

    let index = LineIndex::new(source);
    let mut diagnostics = Vec::new();

    for err in &parsed.lex_errors {
        diagnostics.push(convert(name, &index, err.span, Severity::Error, &err.error));
    }
    for err in &parsed.errors {
        diagnostics.push(convert(name, &index, err.span, Severity::Error, &err.kind));
    }
    for err in &check.errors {
        let severity = if err.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        };
        diagnostics.push(convert(name, &index, err.span, severity, &err.kind));
    }

    diagnostics.sort_by_key(|d| (d.span.start_line, d.span.start_col));

    Analysis {
        unit: parsed.unit,
        check,
        diagnostics,
    }
}

fn convert(
    name: &str,
    index: &LineIndex,
    span: Span,
    severity: Severity,
    message: &dyn std::fmt::Display,
) -> Diagnostic {
    let start = index.location(span.start);
    let end = index.location(span.end);
    Diagnostic {
        severity,
        message: message.to_string(),
        span: DiagnosticSpan {
            start_line: start.line,
            start_col: start.column,
            end_line: end.line,
            end_col: end.column,
        },
        source_unit: name.to_string(),
    }
}
