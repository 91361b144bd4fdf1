//! Python syntax access through tree-sitter.

use crate::{CellCheckError, Result};
use tree_sitter::{Language, Node, Parser, Tree};

/// A tree-sitter parser loaded with the Python grammar.
pub struct PythonSyntax {
    parser: Parser,
}

impl PythonSyntax {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_python::LANGUAGE.into();
        let mut parser = Parser::new();
        parser
            .set_language(&language)
            .map_err(|e| CellCheckError::Grammar(e.to_string()))?;
        Ok(Self { parser })
    }

    /// Parse `source` as Python 3.
    ///
    /// Rejects trees with error or missing nodes, Python 2 statements the
    /// grammar still accepts (`print x`, `exec code`, `print >>f, x`) and
    /// `del` of something that is not a target.
    pub fn parse(&mut self, source: &str) -> Result<Tree> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or(CellCheckError::Syntax { line: 1 })?;

        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_row(root).unwrap_or(0) + 1;
            return Err(CellCheckError::Syntax { line });
        }
        if let Some(row) = first_rejected_row(root) {
            return Err(CellCheckError::Syntax { line: row + 1 });
        }
        Ok(tree)
    }

    /// Parse `source` keeping whatever tree-sitter recovers from errors.
    pub fn parse_lenient(&mut self, source: &str) -> Option<Tree> {
        self.parser.parse(source, None)
    }
}

fn first_error_row(node: Node) -> Option<usize> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if child.has_error() || child.is_missing() {
            if let Some(row) = first_error_row(child) {
                return Some(row);
            }
        }
    }
    None
}

/// Node kinds the grammar parses but Python 3 does not.
const PYTHON2_ONLY: [&str; 3] = ["print_statement", "exec_statement", "chevron"];

fn first_rejected_row(node: Node) -> Option<usize> {
    let rejected = PYTHON2_ONLY.contains(&node.kind())
        || (node.kind() == "del_statement" && !deletes_targets(node));
    if rejected {
        return Some(node.start_position().row);
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if let Some(row) = first_rejected_row(child) {
            return Some(row);
        }
    }
    None
}

fn deletes_targets(del: Node) -> bool {
    let mut cursor = del.walk();
    let all = del.named_children(&mut cursor).all(is_del_target);
    all
}

fn is_del_target(node: Node) -> bool {
    match node.kind() {
        "identifier" | "attribute" | "subscript" | "comment" => true,
        "expression_list" | "tuple" | "list" | "parenthesized_expression" => {
            let mut cursor = node.walk();
            let all = node.named_children(&mut cursor).all(is_del_target);
            all
        }
        _ => false,
    }
}

/// Source text covered by `node`.
pub(crate) fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    &source[node.start_byte()..node.end_byte()]
}

/// A byte range of the source to be replaced with new text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Edit {
    pub start: usize,
    pub end: usize,
    pub replacement: &'static str,
}

impl Edit {
    pub fn covering(node: Node, replacement: &'static str) -> Self {
        Self {
            start: node.start_byte(),
            end: node.end_byte(),
            replacement,
        }
    }

    pub fn covers(&self, node: Node) -> bool {
        self.start == node.start_byte() && self.end == node.end_byte()
    }
}

/// Render `source[start..end]` with every edit inside that range applied.
///
/// Edits must be sorted by start offset and must not overlap.
pub(crate) fn render_range(source: &str, start: usize, end: usize, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(end.saturating_sub(start));
    let mut cursor = start;
    for edit in edits.iter().filter(|e| e.start >= start && e.end <= end) {
        if edit.start < cursor {
            continue;
        }
        out.push_str(&source[cursor..edit.start]);
        out.push_str(edit.replacement);
        cursor = edit.end;
    }
    out.push_str(&source[cursor..end]);
    out
}
