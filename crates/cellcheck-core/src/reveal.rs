//! Removes `reveal_type(...)` calls from code about to be executed.
//!
//! `reveal_type` only exists for the checker; calling it at runtime would
//! fail, so the host runs the code with each call replaced by `None`.

use crate::syntax::{node_text, render_range, Edit};
use crate::PythonSyntax;
use tree_sitter::Node;

const REVEAL_TYPE: &str = "reveal_type";

/// Replace every well-formed `reveal_type(...)` call in `source` with `None`.
pub fn strip_reveal_type(syntax: &mut PythonSyntax, source: &str) -> String {
    if !source.contains(REVEAL_TYPE) {
        return source.to_string();
    }
    let Some(tree) = syntax.parse_lenient(source) else {
        return source.to_string();
    };

    let mut edits = Vec::new();
    collect_calls(tree.root_node(), source, &mut edits);
    render_range(source, 0, source.len(), &edits)
}

fn collect_calls(node: Node, source: &str, edits: &mut Vec<Edit>) {
    if node.kind() == "call" && !node.has_error() {
        let is_reveal = node
            .child_by_field_name("function")
            .is_some_and(|f| f.kind() == "identifier" && node_text(f, source) == REVEAL_TYPE);
        if is_reveal {
            edits.push(Edit::covering(node, "None"));
            return;
        }
    }
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        collect_calls(child, source, edits);
    }
}
