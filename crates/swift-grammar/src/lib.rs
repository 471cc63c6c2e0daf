//! Swift grammar binding
//!
//! This crate is the Rust side of the `tree_sitter_swift` C ABI. The header in
//! `bindings/c/tree_sitter_swift.h` declares the accessor for C and C++
//! consumers; [`ffi`] declares the same symbol for Rust, and [`SwiftGrammar`]
//! wraps the returned pointer in a non-owning, thread-safe handle.
//!
//! The grammar tables and the parse engine are not part of this crate: the
//! generated parser comes from `tree-sitter-swift` and the engine from
//! `tree-sitter`.
//!
//! # Example
//!
//! ```rust
//! use swift_grammar::SwiftGrammar;
//!
//! let grammar = SwiftGrammar::load().unwrap();
//! let mut parser = grammar.new_parser().unwrap();
//!
//! let tree = parser.parse("struct Point { var x: Int }", None).unwrap();
//! assert!(!tree.root_node().has_error());
//! ```

// The generated parser defining `tree_sitter_swift` lives in this crate's
// native library; nothing else references it by path.
extern crate tree_sitter_swift as _;

mod error;
pub mod ffi;
mod grammar;
pub mod linkage;

pub use error::{GrammarError, Result};
pub use grammar::{language, GrammarInfo, SwiftGrammar, FILE_EXTENSIONS, LANGUAGE_NAME};
