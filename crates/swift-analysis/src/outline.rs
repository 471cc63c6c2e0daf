//! Document outline (editor symbols) for Swift source

use serde::{Deserialize, Serialize};
use tree_sitter::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    Import,
    Class,
    Struct,
    Enum,
    Actor,
    Protocol,
    Extension,
    Function,
    Method,
    Initializer,
    Deinitializer,
    Subscript,
    Property,
    EnumCase,
    TypeAlias,
}

impl SymbolKind {
    /// Kinds that can hold member declarations
    pub fn is_container(self) -> bool {
        matches!(
            self,
            Self::Class | Self::Struct | Self::Enum | Self::Actor | Self::Protocol | Self::Extension
        )
    }
}

/// One declaration in the outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Symbol {
    pub name: String,
    pub kind: SymbolKind,
    pub visibility: String,
    pub line_start: usize,
    pub line_end: usize,
    pub doc_comment: Option<String>,
    pub children: Vec<Symbol>,
}

impl Symbol {
    fn new(name: impl Into<String>, kind: SymbolKind, node: Node, visibility: String) -> Self {
        Self {
            name: name.into(),
            kind,
            visibility,
            line_start: node.start_position().row + 1,
            line_end: node.end_position().row + 1,
            doc_comment: None,
            children: Vec::new(),
        }
    }

    pub fn child(&self, name: &str) -> Option<&Symbol> {
        self.children.iter().find(|c| c.name == name)
    }
}

/// Symbols of one file, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outline {
    pub symbols: Vec<Symbol>,
}

impl Outline {
    /// Build the outline of a parsed file
    pub fn build(root: Node, source: &[u8], include_docs: bool) -> Self {
        let builder = OutlineBuilder {
            source,
            include_docs,
        };
        Self {
            symbols: builder.visit_members(root, false),
        }
    }

    /// Depth-first iteration over every symbol
    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        let mut stack: Vec<&Symbol> = self.symbols.iter().rev().collect();
        std::iter::from_fn(move || {
            let symbol = stack.pop()?;
            stack.extend(symbol.children.iter().rev());
            Some(symbol)
        })
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// First symbol with this name anywhere in the tree
    pub fn find(&self, name: &str) -> Option<&Symbol> {
        self.iter().find(|s| s.name == name)
    }

    pub fn of_kind(&self, kind: SymbolKind) -> Vec<&Symbol> {
        self.iter().filter(|s| s.kind == kind).collect()
    }

    pub fn imports(&self) -> Vec<&str> {
        self.symbols
            .iter()
            .filter(|s| s.kind == SymbolKind::Import)
            .map(|s| s.name.as_str())
            .collect()
    }
}

struct OutlineBuilder<'a> {
    source: &'a [u8],
    include_docs: bool,
}

impl<'a> OutlineBuilder<'a> {
    fn node_text(&self, node: Node) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    fn visit_members(&self, parent: Node, in_type: bool) -> Vec<Symbol> {
        let mut symbols = Vec::new();
        let mut cursor = parent.walk();
        for child in parent.named_children(&mut cursor) {
            symbols.extend(self.visit_declaration(child, in_type));
        }
        symbols
    }

    fn visit_declaration(&self, node: Node, in_type: bool) -> Vec<Symbol> {
        let symbol = match node.kind() {
            "import_declaration" => self.visit_import(node),
            // class, struct, enum, actor and extension share this node kind
            "class_declaration" => self.named(node, self.type_kind(node)),
            "protocol_declaration" => self.named(node, SymbolKind::Protocol),
            "function_declaration" | "protocol_function_declaration" => {
                let kind = if in_type {
                    SymbolKind::Method
                } else {
                    SymbolKind::Function
                };
                self.named(node, kind)
            }
            "init_declaration" => Some(self.fixed(node, "init", SymbolKind::Initializer)),
            "deinit_declaration" => Some(self.fixed(node, "deinit", SymbolKind::Deinitializer)),
            "subscript_declaration" => Some(self.fixed(node, "subscript", SymbolKind::Subscript)),
            "property_declaration" | "protocol_property_declaration" => {
                return self.visit_property(node);
            }
            "typealias_declaration" => self.named(node, SymbolKind::TypeAlias),
            "enum_entry" => return self.visit_enum_entry(node),
            _ => None,
        };

        symbol
            .map(|mut symbol| {
                if symbol.kind.is_container() {
                    if let Some(body) = node.child_by_field_name("body") {
                        symbol.children = self.visit_members(body, true);
                    }
                }
                symbol
            })
            .into_iter()
            .collect()
    }

    fn visit_import(&self, node: Node) -> Option<Symbol> {
        let mut cursor = node.walk();
        let path = node
            .named_children(&mut cursor)
            .find(|c| c.kind() == "identifier")
            .map(|c| self.node_text(c))?;
        Some(Symbol::new(
            path,
            SymbolKind::Import,
            node,
            self.visibility(node),
        ))
    }

    fn type_kind(&self, node: Node) -> SymbolKind {
        match self.declaration_keyword(node).as_deref() {
            Some("struct") => SymbolKind::Struct,
            Some("enum") => SymbolKind::Enum,
            Some("actor") => SymbolKind::Actor,
            Some("extension") => SymbolKind::Extension,
            _ => SymbolKind::Class,
        }
    }

    /// One symbol per bound name: `var a = 1, b = 2` and `let (c, d) = ...`
    /// both declare two properties
    fn visit_property(&self, node: Node) -> Vec<Symbol> {
        let visibility = self.visibility(node);
        let doc_comment = self.doc_comment(node);

        let mut names = Vec::new();
        let mut cursor = node.walk();
        for pattern in node.children_by_field_name("name", &mut cursor) {
            let before = names.len();
            self.bound_names(pattern, &mut names);
            if names.len() == before {
                let text = self.node_text(pattern);
                if !text.is_empty() {
                    names.push(text);
                }
            }
        }

        names
            .into_iter()
            .map(|name| {
                let mut symbol =
                    Symbol::new(name, SymbolKind::Property, node, visibility.clone());
                symbol.doc_comment = doc_comment.clone();
                symbol
            })
            .collect()
    }

    /// Identifiers bound by a pattern, descending into tuple patterns
    fn bound_names(&self, pattern: Node, names: &mut Vec<String>) {
        if let Some(ident) = pattern.child_by_field_name("bound_identifier") {
            names.push(self.node_text(ident));
            return;
        }

        let mut cursor = pattern.walk();
        for child in pattern.named_children(&mut cursor) {
            match child.kind() {
                "pattern" => self.bound_names(child, names),
                // `(x: a, y: b)` labels are followed by a colon
                "simple_identifier"
                    if child.next_sibling().map(|n| n.kind()) != Some(":") =>
                {
                    names.push(self.node_text(child));
                }
                _ => {}
            }
        }
    }

    fn visit_enum_entry(&self, node: Node) -> Vec<Symbol> {
        let visibility = self.visibility(node);
        let doc_comment = self.doc_comment(node);
        let mut cursor = node.walk();
        node.children_by_field_name("name", &mut cursor)
            .map(|name| {
                let mut symbol = Symbol::new(
                    self.node_text(name),
                    SymbolKind::EnumCase,
                    node,
                    visibility.clone(),
                );
                symbol.doc_comment = doc_comment.clone();
                symbol
            })
            .collect()
    }

    /// Symbol named by the node's `name` field
    fn named(&self, node: Node, kind: SymbolKind) -> Option<Symbol> {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.node_text(n))
            .filter(|n| !n.is_empty())?;
        let mut symbol = Symbol::new(name, kind, node, self.visibility(node));
        symbol.doc_comment = self.doc_comment(node);
        Some(symbol)
    }

    fn fixed(&self, node: Node, name: &str, kind: SymbolKind) -> Symbol {
        let mut symbol = Symbol::new(name, kind, node, self.visibility(node));
        symbol.doc_comment = self.doc_comment(node);
        symbol
    }

    /// Keyword that selects class/struct/enum/actor/extension
    fn declaration_keyword(&self, node: Node) -> Option<String> {
        if let Some(kind) = node.child_by_field_name("declaration_kind") {
            return Some(self.node_text(kind));
        }
        let mut cursor = node.walk();
        let keyword = node
            .children(&mut cursor)
            .map(|c| c.kind())
            .find(|k| matches!(*k, "class" | "struct" | "enum" | "actor" | "extension"));
        keyword.map(str::to_string)
    }

    fn visibility(&self, node: Node) -> String {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "modifiers" {
                continue;
            }
            let mut inner = child.walk();
            for modifier in child.children(&mut inner) {
                if modifier.kind() == "visibility_modifier" {
                    let text = self.node_text(modifier);
                    // `private(set)` and friends only narrow the setter
                    if text.contains('(') {
                        continue;
                    }
                    return text;
                }
            }
        }
        "internal".to_string() // Swift default visibility
    }

    /// `///` lines or a `/** */` block directly above the declaration
    fn doc_comment(&self, node: Node) -> Option<String> {
        if !self.include_docs {
            return None;
        }

        let mut lines = Vec::new();
        let mut next_row = node.start_position().row;
        let mut current = node.prev_sibling();

        while let Some(prev) = current {
            if prev.end_position().row + 1 < next_row {
                break;
            }
            let text = self.node_text(prev);
            match prev.kind() {
                "comment" if text.starts_with("///") => {
                    lines.push(text.trim_start_matches('/').trim().to_string());
                }
                "multiline_comment" if text.starts_with("/**") && lines.is_empty() => {
                    let body = text.trim_start_matches("/**").trim_end_matches("*/");
                    let block: Vec<&str> = body
                        .lines()
                        .map(|l| l.trim().trim_start_matches('*').trim())
                        .filter(|l| !l.is_empty())
                        .collect();
                    return (!block.is_empty()).then(|| block.join("\n"));
                }
                _ => break,
            }
            next_row = prev.start_position().row;
            current = prev.prev_sibling();
        }

        if lines.is_empty() {
            None
        } else {
            lines.reverse();
            Some(lines.join("\n"))
        }
    }
}
