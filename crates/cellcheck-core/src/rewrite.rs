//! Prunes superseded declarations from the history buffer.

use crate::serialize::render_module;
use crate::symbols::{type_alias_name, SymbolExtractor};
use crate::syntax::{node_text, Edit};
use crate::{CellCheckError, PythonSyntax, Result};
use cellcheck_types::SymbolSet;
use tracing::{debug, trace};
use tree_sitter::Node;

/// Placeholder substituted for pruned statements and collapsed bodies.
pub(crate) const NO_OP: &str = "pass";

/// Rewrite `buffer` so that no declaration of a name in `purge` survives.
///
/// Purged definitions and assignments become `pass`; every other function
/// reached keeps only its signature. Fails with
/// [`CellCheckError::HistorySyntax`] when the buffer no longer parses.
pub fn prune_history(syntax: &mut PythonSyntax, buffer: &str, purge: &SymbolSet) -> Result<String> {
    let tree = syntax.parse(buffer).map_err(|e| match e {
        CellCheckError::Syntax { line } => CellCheckError::HistorySyntax { line },
        other => other,
    })?;

    let mut planner = PrunePlanner {
        source: buffer,
        purge,
        edits: Vec::new(),
    };
    planner.visit(tree.root_node());
    debug!(
        target: "cellcheck::rewrite",
        "Pruning {} names with {} edits",
        purge.len(),
        planner.edits.len()
    );

    Ok(render_module(tree.root_node(), buffer, &planner.edits))
}

struct PrunePlanner<'a> {
    source: &'a str,
    purge: &'a SymbolSet,
    /// Non-overlapping, in document order.
    edits: Vec<Edit>,
}

impl PrunePlanner<'_> {
    fn visit(&mut self, node: Node) {
        match node.kind() {
            "function_definition" | "class_definition" => self.definition(node, node),
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.definition(node, definition);
                }
            }
            "type_alias_statement" => {
                if type_alias_name(node, self.source).is_some_and(|n| self.purge.callables.contains(n)) {
                    self.edits.push(Edit::covering(node, NO_OP));
                }
            }
            "expression_statement" => {
                let bound = SymbolExtractor::replacing().statement_symbols(node, self.source);
                // Only variables and annotations are compared; statements never bind callables.
                if bound.overlaps(self.purge) {
                    trace!(target: "cellcheck::rewrite", "Pruning statement: {}", node_text(node, self.source));
                    self.edits.push(Edit::covering(node, NO_OP));
                }
            }
            _ => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit(child);
                }
            }
        }
    }

    /// `statement` is the definition itself or its decorated wrapper.
    fn definition(&mut self, statement: Node, definition: Node) {
        let Some(name) = definition.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name, self.source);

        if self.purge.callables.contains(name) {
            trace!(target: "cellcheck::rewrite", "Pruning definition of {}", name);
            self.edits.push(Edit::covering(statement, NO_OP));
            return;
        }

        // Classes are kept whole; functions only need their signature.
        if definition.kind() == "function_definition" {
            if let Some(body) = definition.child_by_field_name("body") {
                if node_text(body, self.source).trim() != NO_OP {
                    self.edits.push(Edit::covering(body, NO_OP));
                }
            }
        }
    }
}
