use std::path::PathBuf;
use swift_grammar::GrammarError;
use thiserror::Error;

/// Errors that can occur during analysis
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Failed to read file
    #[error("IO error reading {0}: {1}")]
    Io(PathBuf, #[source] std::io::Error),

    /// Syntax error in source code (only with `reject_syntax_errors`)
    #[error("Syntax error in {0}:{1}:{2}: {3}")]
    Syntax(PathBuf, usize, usize, String),

    /// File too large
    #[error("File {0} exceeds maximum size ({1} bytes)")]
    FileTooLarge(PathBuf, usize),

    /// Parsing timeout
    #[error("Parsing {0} exceeded timeout")]
    Timeout(PathBuf),

    /// Edit range does not fit the document
    #[error("Invalid edit {start}..{end} for document of {len} bytes")]
    InvalidEdit {
        start: usize,
        end: usize,
        len: usize,
    },

    /// Grammar could not be loaded or assigned
    #[error(transparent)]
    Grammar(#[from] GrammarError),

    /// Worker pool could not be created
    #[error("Failed to create thread pool: {0}")]
    ThreadPool(String),

    /// Generic parsing error
    #[error("Parse error in {0}: {1}")]
    Parse(PathBuf, String),
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;
