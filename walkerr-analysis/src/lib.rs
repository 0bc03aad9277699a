//! walkerr-analysis: summarizes which package-level error values each
//! function can return, one call hop deep, and reports one diagnostic per
//! function that declares an `error` result.
//!
//! - Syntax: host-neutral syntax model plus a generic pre-order walk
//! - Symbols & types: resolver seam, method sets, the error-capability test
//! - Engine: extractor, return-site walker, summary table, join & render
//! - Go: tree-sitter-go frontend with lexical name resolution
//! - Pipeline: batch driver over many independent units (rayon)

pub mod analyzer;
pub mod diagnostic;
pub mod extract;
pub mod frontend;
pub mod go;
pub mod join;
pub mod observer;
pub mod pipeline;
pub mod summary;
pub mod symbols;
pub mod syntax;
pub mod types;
pub mod visit;
pub mod walker;

pub use analyzer::{AnalyzerOptions, ErrorFlowAnalyzer};
pub use diagnostic::{Diagnostic, DiagnosticSink};
pub use frontend::{Frontend, ParsedUnit};
pub use go::GoFrontend;
pub use observer::TracingEventHandler;
pub use pipeline::{Pipeline, UnitReport};
pub use symbols::{QualifiedName, Symbol, SymbolId, SymbolKind, SymbolResolver, SymbolTable};
