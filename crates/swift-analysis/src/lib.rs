//! Swift syntax analysis
//!
//! Builds on the `swift-grammar` handle to parse Swift source files and report
//! what an editor needs from a syntax tree: diagnostics for ERROR and MISSING
//! nodes, a document outline, and editable documents that reparse
//! incrementally.
//!
//! # Example
//!
//! ```rust
//! use swift_analysis::{SwiftAnalyzer, SymbolKind};
//! use std::path::Path;
//!
//! let analyzer = SwiftAnalyzer::new().unwrap();
//!
//! let source = r#"
//! class Person {
//!     var name: String
//!     init(name: String) {
//!         self.name = name
//!     }
//! }
//! "#;
//!
//! let file = analyzer.analyze_source(source, Path::new("Person.swift")).unwrap();
//! assert!(!file.has_errors);
//! assert_eq!(file.outline.find("Person").unwrap().kind, SymbolKind::Class);
//! ```

mod analyzer;
mod config;
pub mod diagnostics;
mod document;
mod error;
mod metrics;
mod outline;

pub use analyzer::{FileSyntax, ProjectSyntax, SwiftAnalyzer};
pub use config::AnalysisConfig;
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use document::{ChangedRange, SwiftDocument};
pub use error::{AnalysisError, AnalysisResult};
pub use metrics::ParseMetrics;
pub use outline::{Outline, Symbol, SymbolKind};
