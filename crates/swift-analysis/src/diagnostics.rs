//! Syntax diagnostics from ERROR and MISSING nodes

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

const SNIPPET_LEN: usize = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticKind {
    /// Text the grammar could not place (an `ERROR` node)
    Unexpected,
    /// Token the parser inserted to recover (a zero-width missing node)
    Missing,
}

/// A syntax problem located in the source.
///
/// Lines and columns are 1-based; columns count bytes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
    pub start_byte: usize,
    pub end_byte: usize,
}

impl Diagnostic {
    fn from_node(node: Node, kind: DiagnosticKind, message: String) -> Self {
        let start = node.start_position();
        let end = node.end_position();
        Self {
            kind,
            message,
            line: start.row + 1,
            column: start.column + 1,
            end_line: end.row + 1,
            end_column: end.column + 1,
            start_byte: node.start_byte(),
            end_byte: node.end_byte(),
        }
    }
}

/// Collect up to `limit` diagnostics below `root`, in source order.
///
/// Subtrees without errors are skipped, and nothing inside an `ERROR` node
/// is reported separately.
pub fn collect(root: Node, source: &[u8], limit: usize) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    if limit == 0 || !root.has_error() {
        return diagnostics;
    }

    let mut cursor = root.walk();
    loop {
        let node = cursor.node();

        let descend = if node.is_missing() {
            diagnostics.push(Diagnostic::from_node(
                node,
                DiagnosticKind::Missing,
                format!("missing `{}`", node.kind()),
            ));
            false
        } else if node.is_error() {
            let message = match snippet(node, source) {
                Some(text) => format!("unexpected `{text}`"),
                None => "unexpected syntax".to_string(),
            };
            diagnostics.push(Diagnostic::from_node(
                node,
                DiagnosticKind::Unexpected,
                message,
            ));
            false
        } else {
            node.has_error()
        };

        if diagnostics.len() >= limit {
            break;
        }

        if descend && cursor.goto_first_child() {
            continue;
        }

        loop {
            if cursor.goto_next_sibling() {
                break;
            }
            if !cursor.goto_parent() {
                return diagnostics;
            }
        }
    }

    diagnostics
}

/// First line of the node's text, shortened for messages
fn snippet(node: Node, source: &[u8]) -> Option<String> {
    let text = node.utf8_text(source).ok()?;
    let line = text.lines().map(str::trim).find(|l| !l.is_empty())?;
    if line.chars().count() > SNIPPET_LEN {
        let short: String = line.chars().take(SNIPPET_LEN).collect();
        Some(format!("{short}..."))
    } else {
        Some(line.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swift_grammar::SwiftGrammar;

    fn diagnose(source: &str, limit: usize) -> Vec<Diagnostic> {
        let mut parser = SwiftGrammar::new().new_parser().unwrap();
        let tree = parser.parse(source, None).unwrap();
        collect(tree.root_node(), source.as_bytes(), limit)
    }

    #[test]
    fn test_valid_source_has_no_diagnostics() {
        let source = "import Foundation\n\nstruct Point {\n    var x: Int\n}\n";
        assert!(diagnose(source, 100).is_empty());
    }

    #[test]
    fn test_error_is_located() {
        let source = "let a = 1\nlet b = 2\nlet c = )\n";
        let diagnostics = diagnose(source, 100);

        assert!(!diagnostics.is_empty());
        assert!(diagnostics.iter().any(|d| d.line == 3));
        assert!(diagnostics.iter().all(|d| d.line >= 2));
        assert!(diagnostics.iter().all(|d| d.column >= 1));
    }

    #[test]
    fn test_unclosed_body() {
        let diagnostics = diagnose("class Broken {\n    func run() {\n", 100);
        assert!(!diagnostics.is_empty());
        assert!(diagnostics.iter().all(|d| d.start_byte <= d.end_byte));
    }

    #[test]
    fn test_limit_is_respected() {
        let source = "let a = )\nlet b = )\nlet c = )\nlet d = )\n";
        assert_eq!(diagnose(source, 1).len(), 1);
        assert!(diagnose(source, 0).is_empty());
    }

    #[test]
    fn test_snippet_uses_first_line() {
        let mut parser = SwiftGrammar::new().new_parser().unwrap();

        let source = "\n  let x = 1\nlet y = 2\n";
        let tree = parser.parse(source, None).unwrap();
        assert_eq!(
            snippet(tree.root_node(), source.as_bytes()).as_deref(),
            Some("let x = 1")
        );

        let long = format!("let {} = 1\n", "v".repeat(60));
        let tree = parser.parse(&long, None).unwrap();
        let text = snippet(tree.root_node(), long.as_bytes()).unwrap();
        assert!(text.ends_with("..."));
        assert_eq!(text.chars().count(), SNIPPET_LEN + 3);
    }
}
