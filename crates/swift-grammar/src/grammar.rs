//! Process-wide handle to the Swift grammar and its metadata

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::OnceLock;
use tree_sitter::{Language, Parser, LANGUAGE_VERSION, MIN_COMPATIBLE_LANGUAGE_VERSION};

use crate::error::{GrammarError, Result};
use crate::ffi;

/// Language identifier used in logs and metadata
pub const LANGUAGE_NAME: &str = "swift";

/// File extensions handled by the grammar
pub const FILE_EXTENSIONS: &[&str] = &[".swift"];

static LANGUAGE: OnceLock<Language> = OnceLock::new();

/// Get the tree-sitter Language for Swift
///
/// The first call wraps the pointer returned by `tree_sitter_swift`; every
/// later call, from any thread, returns the same instance.
pub fn language() -> &'static Language {
    LANGUAGE.get_or_init(|| {
        debug!("Wrapping tree_sitter_swift grammar handle");
        // SAFETY: the accessor returns a pointer to a static, immutable
        // TSLanguage that lives for the whole process.
        unsafe { Language::from_raw(ffi::tree_sitter_swift() as *const _) }
    })
}

/// Non-owning handle to the Swift grammar.
///
/// Copying the handle never copies the grammar; all handles refer to the
/// single definition owned by the generated parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwiftGrammar {
    language: &'static Language,
}

impl SwiftGrammar {
    /// Handle without validation; the grammar is assumed to be well formed.
    pub fn new() -> Self {
        Self {
            language: language(),
        }
    }

    /// Handle after checking the pointer and the ABI version.
    pub fn load() -> Result<Self> {
        ffi::raw_language().ok_or(GrammarError::NullLanguage)?;

        let grammar = Self::new();
        let found = grammar.abi_version();
        if !grammar.is_compatible() {
            return Err(GrammarError::IncompatibleVersion {
                found,
                min: MIN_COMPATIBLE_LANGUAGE_VERSION,
                max: LANGUAGE_VERSION,
            });
        }

        debug!("Loaded {LANGUAGE_NAME} grammar with ABI version {found}");
        Ok(grammar)
    }

    pub fn language(&self) -> &'static Language {
        self.language
    }

    pub fn name(&self) -> &'static str {
        LANGUAGE_NAME
    }

    pub fn file_extensions(&self) -> &'static [&'static str] {
        FILE_EXTENSIONS
    }

    /// ABI version the grammar tables were generated for
    pub fn abi_version(&self) -> usize {
        self.language.version()
    }

    /// Whether the linked parse engine can load this grammar
    pub fn is_compatible(&self) -> bool {
        (MIN_COMPATIBLE_LANGUAGE_VERSION..=LANGUAGE_VERSION).contains(&self.abi_version())
    }

    pub fn node_kind_count(&self) -> usize {
        self.language.node_kind_count()
    }

    pub fn node_kind(&self, id: u16) -> Option<&'static str> {
        self.language.node_kind_for_id(id)
    }

    /// Numeric id of a node kind, or `None` if the grammar has no such kind
    pub fn kind_id(&self, kind: &str, named: bool) -> Option<u16> {
        let id = self.language.id_for_node_kind(kind, named);
        (id != 0).then_some(id)
    }

    pub fn is_named(&self, id: u16) -> bool {
        self.language.node_kind_is_named(id)
    }

    /// Sorted, de-duplicated names of all visible named node kinds
    pub fn named_node_kinds(&self) -> Vec<&'static str> {
        let kinds: BTreeSet<&'static str> = (0..self.node_kind_count())
            .filter_map(|id| u16::try_from(id).ok())
            .filter(|&id| {
                self.language.node_kind_is_named(id) && self.language.node_kind_is_visible(id)
            })
            .filter_map(|id| self.language.node_kind_for_id(id))
            .collect();
        kinds.into_iter().collect()
    }

    pub fn field_count(&self) -> usize {
        self.language.field_count()
    }

    /// Field names in id order. Field ids start at 1.
    pub fn field_names(&self) -> Vec<&'static str> {
        (1..=self.field_count())
            .filter_map(|id| u16::try_from(id).ok())
            .filter_map(|id| self.language.field_name_for_id(id))
            .collect()
    }

    pub fn field_id(&self, name: &str) -> Option<u16> {
        self.language.field_id_for_name(name).map(u16::from)
    }

    /// Create a parser already set to this grammar
    pub fn new_parser(&self) -> Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(self.language)?;
        Ok(parser)
    }

    /// Snapshot of the grammar metadata
    pub fn info(&self) -> GrammarInfo {
        GrammarInfo {
            name: LANGUAGE_NAME.to_string(),
            abi_version: self.abi_version(),
            node_kind_count: self.node_kind_count(),
            field_count: self.field_count(),
            named_node_kinds: self
                .named_node_kinds()
                .into_iter()
                .map(str::to_string)
                .collect(),
            field_names: self.field_names().into_iter().map(str::to_string).collect(),
            file_extensions: FILE_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }
}

impl Default for SwiftGrammar {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable description of the grammar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarInfo {
    pub name: String,
    pub abi_version: usize,
    pub node_kind_count: usize,
    pub field_count: usize,
    pub named_node_kinds: Vec<String>,
    pub field_names: Vec<String>,
    pub file_extensions: Vec<String>,
}
