//! Error types for the grammar binding.

use thiserror::Error;

/// Result type alias for grammar operations.
pub type Result<T> = std::result::Result<T, GrammarError>;

/// Failures that can surface when validating or using the grammar handle.
///
/// The raw C accessor has no error channel; these are raised by the Rust
/// side when it checks what the accessor returned.
#[derive(Error, Debug)]
pub enum GrammarError {
    /// `tree_sitter_swift` returned a null pointer
    #[error("tree_sitter_swift returned a null language pointer")]
    NullLanguage,

    /// The generated parser was built for an ABI the linked engine cannot load
    #[error("Swift grammar ABI version {found} is outside the supported range {min}..={max}")]
    IncompatibleVersion {
        /// ABI version reported by the grammar
        found: usize,
        /// Oldest ABI version the engine accepts
        min: usize,
        /// Newest ABI version the engine accepts
        max: usize,
    },

    /// A C or C++ translation unit resolved the symbol to a different grammar
    #[error("{unit} translation unit resolved tree_sitter_swift to a different grammar")]
    LinkageMismatch {
        /// Language mode of the unit ("C" or "C++")
        unit: &'static str,
    },

    /// The parse engine refused the grammar
    #[error("Failed to assign Swift grammar to parser: {0}")]
    Language(#[from] tree_sitter::LanguageError),
}
