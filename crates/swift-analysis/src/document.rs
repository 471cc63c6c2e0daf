//! Editable Swift documents with incremental reparsing

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use swift_grammar::SwiftGrammar;
use tree_sitter::{InputEdit, Parser, Point, Tree};

use crate::diagnostics::{self, Diagnostic};
use crate::error::{AnalysisError, AnalysisResult};
use crate::outline::Outline;

/// Region whose syntax changed after an edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedRange {
    pub start_byte: usize,
    pub end_byte: usize,
    /// 1-based
    pub start_line: usize,
    /// 1-based
    pub end_line: usize,
}

/// A source buffer together with its current syntax tree.
///
/// Edits are applied to a copy of the old tree before reparsing so unchanged
/// subtrees are reused. A failed reparse leaves source and tree untouched.
pub struct SwiftDocument {
    path: PathBuf,
    source: String,
    tree: Tree,
    parser: Parser,
}

impl SwiftDocument {
    pub fn open(path: impl Into<PathBuf>, source: impl Into<String>) -> AnalysisResult<Self> {
        let path = path.into();
        let source = source.into();
        let mut parser = SwiftGrammar::load()?.new_parser()?;

        let tree = parser
            .parse(&source, None)
            .ok_or_else(|| AnalysisError::Parse(path.clone(), "Failed to parse".to_string()))?;

        debug!("Opened {} ({} bytes)", path.display(), source.len());
        Ok(Self {
            path,
            source,
            tree,
            parser,
        })
    }

    /// Bound every later reparse; `None` removes the limit
    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        let micros = timeout.map_or(0, |t| u64::try_from(t.as_micros()).unwrap_or(u64::MAX));
        self.parser.set_timeout_micros(micros);
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn has_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    pub fn diagnostics(&self, limit: usize) -> Vec<Diagnostic> {
        diagnostics::collect(self.tree.root_node(), self.source.as_bytes(), limit)
    }

    pub fn outline(&self, include_docs: bool) -> Outline {
        Outline::build(self.tree.root_node(), self.source.as_bytes(), include_docs)
    }

    /// Replace `start..old_end` (byte offsets) with `new_text` and reparse.
    ///
    /// Both offsets must lie on char boundaries. Returns the ranges whose
    /// syntax differs from before the edit.
    pub fn edit(
        &mut self,
        start: usize,
        old_end: usize,
        new_text: &str,
    ) -> AnalysisResult<Vec<ChangedRange>> {
        let len = self.source.len();
        if start > old_end
            || old_end > len
            || !self.source.is_char_boundary(start)
            || !self.source.is_char_boundary(old_end)
        {
            return Err(AnalysisError::InvalidEdit {
                start,
                end: old_end,
                len,
            });
        }

        let mut new_source = String::with_capacity(len - (old_end - start) + new_text.len());
        new_source.push_str(&self.source[..start]);
        new_source.push_str(new_text);
        new_source.push_str(&self.source[old_end..]);

        let new_end = start + new_text.len();
        let input_edit = InputEdit {
            start_byte: start,
            old_end_byte: old_end,
            new_end_byte: new_end,
            start_position: point_at(&self.source, start),
            old_end_position: point_at(&self.source, old_end),
            new_end_position: point_at(&new_source, new_end),
        };
        trace!("Applying edit to {}: {:?}", self.path.display(), input_edit);

        let mut old_tree = self.tree.clone();
        old_tree.edit(&input_edit);
        let new_tree = match self.parser.parse(&new_source, Some(&old_tree)) {
            Some(tree) => tree,
            None => return Err(self.parse_failed("Failed to reparse")),
        };

        let changed = old_tree
            .changed_ranges(&new_tree)
            .map(|range| ChangedRange {
                start_byte: range.start_byte,
                end_byte: range.end_byte,
                start_line: range.start_point.row + 1,
                end_line: range.end_point.row + 1,
            })
            .collect();

        self.source = new_source;
        self.tree = new_tree;
        Ok(changed)
    }

    /// Swap in entirely new text and parse it from scratch
    pub fn replace(&mut self, source: impl Into<String>) -> AnalysisResult<()> {
        let source = source.into();
        let tree = match self.parser.parse(&source, None) {
            Some(tree) => tree,
            None => return Err(self.parse_failed("Failed to parse")),
        };
        self.source = source;
        self.tree = tree;
        Ok(())
    }

    fn parse_failed(&mut self, message: &str) -> AnalysisError {
        // An interrupted parse would otherwise resume on the next call
        self.parser.reset();
        if self.parser.timeout_micros() > 0 {
            AnalysisError::Timeout(self.path.clone())
        } else {
            AnalysisError::Parse(self.path.clone(), message.to_string())
        }
    }
}

/// Row/column of a byte offset; columns count bytes
fn point_at(text: &str, byte: usize) -> Point {
    let before = &text.as_bytes()[..byte];
    let row = before.iter().filter(|&&b| b == b'\n').count();
    let column = match before.iter().rposition(|&b| b == b'\n') {
        Some(newline) => byte - newline - 1,
        None => byte,
    };
    Point { row, column }
}
