//! Classifies the names a fragment binds.

use crate::syntax::node_text;
use cellcheck_types::{SymbolCategory, SymbolSet};
use tree_sitter::Node;

/// Walks module-level statements and records every bound name.
///
/// Compound statements (`if`, `for`, `with`, `try`, ...) are descended into;
/// function and class bodies are not, since they never bind module names.
#[derive(Debug, Clone, Copy, Default)]
pub struct SymbolExtractor {
    /// Also collect the root name of `obj.attr = ...` and `obj[k] = ...`.
    replace: bool,
}

impl SymbolExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extractor used when matching history statements against purge sets.
    pub fn replacing() -> Self {
        Self { replace: true }
    }

    pub fn extract(&self, root: Node, source: &str) -> SymbolSet {
        let mut symbols = SymbolSet::new();
        self.visit(root, source, &mut symbols);
        symbols
    }

    /// Names bound by a single `expression_statement`.
    pub fn statement_symbols(&self, statement: Node, source: &str) -> SymbolSet {
        let mut symbols = SymbolSet::new();
        let mut cursor = statement.walk();
        for child in statement.named_children(&mut cursor) {
            self.record_assignment(child, source, &mut symbols);
        }
        symbols
    }

    fn visit(&self, node: Node, source: &str, symbols: &mut SymbolSet) {
        match node.kind() {
            "function_definition" | "class_definition" => {
                if let Some(name) = node.child_by_field_name("name") {
                    symbols.insert(SymbolCategory::Callable, node_text(name, source));
                }
            }
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.visit(definition, source, symbols);
                }
            }
            "type_alias_statement" => {
                if let Some(name) = type_alias_name(node, source) {
                    symbols.insert(SymbolCategory::Callable, name);
                }
            }
            "expression_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.record_assignment(child, source, symbols);
                }
            }
            _ => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit(child, source, symbols);
                }
            }
        }
    }

    fn record_assignment(&self, node: Node, source: &str, symbols: &mut SymbolSet) {
        match node.kind() {
            "assignment" => {
                let category = if node.child_by_field_name("type").is_some() {
                    SymbolCategory::AnnotatedVariable
                } else {
                    SymbolCategory::Variable
                };
                if let Some(left) = node.child_by_field_name("left") {
                    self.collect_targets(left, source, category, symbols);
                }
                // a = b = value
                if let Some(right) = node.child_by_field_name("right") {
                    if matches!(right.kind(), "assignment" | "augmented_assignment") {
                        self.record_assignment(right, source, symbols);
                    }
                }
            }
            "augmented_assignment" => {
                if let Some(left) = node.child_by_field_name("left") {
                    self.collect_targets(left, source, SymbolCategory::Variable, symbols);
                }
            }
            _ => {}
        }
    }

    fn collect_targets(
        &self,
        target: Node,
        source: &str,
        category: SymbolCategory,
        symbols: &mut SymbolSet,
    ) {
        match target.kind() {
            "identifier" | "keyword_identifier" => {
                symbols.insert(category, node_text(target, source));
            }
            "pattern_list" | "tuple_pattern" | "list_pattern" | "tuple" | "list"
            | "expression_list" | "list_splat_pattern" | "list_splat"
            | "parenthesized_expression" => {
                let mut cursor = target.walk();
                for child in target.named_children(&mut cursor) {
                    self.collect_targets(child, source, category, symbols);
                }
            }
            "attribute" if self.replace => {
                if let Some(object) = target.child_by_field_name("object") {
                    self.collect_targets(object, source, category, symbols);
                }
            }
            "subscript" if self.replace => {
                if let Some(value) = target.child_by_field_name("value") {
                    self.collect_targets(value, source, category, symbols);
                }
            }
            _ => {}
        }
    }
}

/// Name bound by `type Alias = ...`.
pub(crate) fn type_alias_name<'s>(node: Node, source: &'s str) -> Option<&'s str> {
    let left = node.child_by_field_name("left")?;
    let text = node_text(left, source).trim();
    let is_identifier = !text.is_empty()
        && text.chars().all(|c| c.is_alphanumeric() || c == '_')
        && !text.starts_with(|c: char| c.is_ascii_digit());
    is_identifier.then_some(text)
}
