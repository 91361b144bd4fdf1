//! Renders a pruned module back into history buffer text.

use crate::syntax::{render_range, Edit};
use tree_sitter::Node;

/// Render every top-level statement of `module` with `edits` applied.
///
/// Each statement is emitted on its own line(s) in source order and ends with
/// a newline. Comments, statements that were already `pass`, and bare
/// expression statements are dropped. A statement replaced wholesale by an
/// edit is emitted as its replacement and is only dropped by the next
/// rewrite.
pub(crate) fn render_module(module: Node, source: &str, edits: &[Edit]) -> String {
    let mut out = String::with_capacity(source.len());
    let mut cursor = module.walk();

    for statement in module.named_children(&mut cursor) {
        if !edits.iter().any(|e| e.covers(statement)) && is_redundant(statement) {
            continue;
        }
        let text = render_range(source, statement.start_byte(), statement.end_byte(), edits);
        out.push_str(text.trim_end());
        out.push('\n');
    }

    out
}

fn is_redundant(statement: Node) -> bool {
    match statement.kind() {
        "comment" | "pass_statement" => true,
        "expression_statement" => {
            let mut cursor = statement.walk();
            let binds = statement
                .named_children(&mut cursor)
                .any(|c| matches!(c.kind(), "assignment" | "augmented_assignment"));
            !binds
        }
        _ => false,
    }
}
