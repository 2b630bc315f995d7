//! LIFT Core - Compiler front end for the LIFT programming language
//!
//! This crate provides the front-end pipeline:
//! - Lexer: Tokenization of source code
//! - AST: Abstract syntax tree definitions
//! - Parser: AST construction from the token stream
//! - Type Checker: Static type analysis with scope resolution
//! - Diagnostics: Uniform error/warning records for all stages
//!
//! Data flows strictly forward (text → tokens → AST → typed AST); each
//! stage recovers from errors locally, so a single [`diagnostics::analyze`]
//! call yields every diagnostic a source unit has to offer.
//!
//! ```
//! use lift_core::diagnostics::analyze;
//!
//! let analysis = analyze(
//!     "demo.lift",
//!     "func square(n: int): int { return n * n; }\nlet nine = square(3);\n",
//! );
//! assert!(analysis.diagnostics.is_empty());
//! ```

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Lexer module - tokenization of LIFT source code
pub mod lexer;

/// Abstract Syntax Tree - parsed representation of LIFT source code
pub mod ast;

/// Parser module - converts tokens into AST
pub mod parser;

/// Type system module - type checking and scope resolution
pub mod types;

/// Diagnostics module - uniform reporting across all stages
pub mod diagnostics;

/// Convenience re-export of lexer
pub use lexer::Lexer;

/// Convenience re-export of parser
pub use parser::Parser;

/// Convenience re-export of type checker
pub use types::TypeChecker;

/// Convenience re-export of the pipeline entry point
pub use diagnostics::{analyze, Analysis, Diagnostic, Severity};
