use crate::coords;
use crate::position::PositionIndex;
use crate::symbols::{DocumentSymbols, Resolution, SymbolTable, resolver};
use grove_syntax::{NodeId, NodeKind, NodeRef, SourceRange, SyntaxTree};
use lsp_types::{DocumentHighlight, DocumentHighlightKind, Position, Range};
use std::sync::Arc;

/// Definition, references and highlights for one document at a time.
pub struct NavigationEngine<'a> {
    table: &'a SymbolTable,
    index: PositionIndex,
    pinned: Option<Arc<DocumentSymbols>>,
}

impl<'a> NavigationEngine<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            index: PositionIndex::from_config(table.config()),
            pinned: None,
        }
    }

    /// Answers from `symbols` rather than the registry's current table.
    pub fn with_symbols(mut self, symbols: Arc<DocumentSymbols>) -> Self {
        self.pinned = Some(symbols);
        self
    }

    fn symbols(&self, tree: &SyntaxTree) -> Arc<DocumentSymbols> {
        match &self.pinned {
            Some(symbols) => Arc::clone(symbols),
            None => self.table.snapshot_or_empty(tree.document()),
        }
    }

    pub fn definition(&self, tree: &SyntaxTree, position: Position) -> Option<Range> {
        let node = self.index.find_node_ref_at(tree, position)?;
        let symbols = self.symbols(tree);
        let target = self.table.resolve_in(tree, &symbols, node.id(), true)?;
        coords::to_editor_range(target_range(tree, &symbols, target)?)
    }

    /// Every node in the document that resolves to the same declaration as
    /// the node under the cursor.
    pub fn references(
        &self,
        tree: &SyntaxTree,
        position: Position,
        include_declaration: bool,
    ) -> Vec<Range> {
        self.occurrences(tree, position, true)
            .into_iter()
            .filter(|(_, is_declaration)| include_declaration || !is_declaration)
            .filter_map(|(node, _)| coords::to_editor_range(node.range()))
            .collect()
    }

    pub fn document_highlights(
        &self,
        tree: &SyntaxTree,
        position: Position,
    ) -> Vec<DocumentHighlight> {
        self.occurrences(tree, position, false)
            .into_iter()
            .filter_map(|(node, is_declaration)| {
                let range = coords::to_editor_range(node.range())?;
                let kind = if is_declaration || is_write(node) {
                    DocumentHighlightKind::WRITE
                } else {
                    DocumentHighlightKind::READ
                };
                Some(DocumentHighlight {
                    range,
                    kind: Some(kind),
                })
            })
            .collect()
    }

    /// Nodes resolving to the cursor's target, each flagged when it is the
    /// declaring node itself. Declaration expressions are skipped since
    /// their left-hand variable already stands for them.
    fn occurrences<'t>(
        &self,
        tree: &'t SyntaxTree,
        position: Position,
        strict: bool,
    ) -> Vec<(NodeRef<'t>, bool)> {
        let Some(node) = self.index.find_node_ref_at(tree, position) else {
            return Vec::new();
        };
        let symbols = self.symbols(tree);
        let ctx = self.table.context(tree, &symbols);
        let Some(target) = resolver::resolve(ctx, node, strict) else {
            return Vec::new();
        };
        let declaring = declaring_node(&symbols, target);

        let found: Vec<_> = tree
            .descendants()
            .filter(|n| !matches!(n.kind(), NodeKind::Declaration(_)))
            .filter(|n| resolver::resolve(ctx, *n, strict) == Some(target))
            .map(|n| (n, Some(n.id()) == declaring))
            .collect();
        tracing::debug!(
            "{} occurrences of {:?} in {}",
            found.len(),
            target,
            tree.document()
        );
        found
    }
}

fn declaring_node(symbols: &DocumentSymbols, target: Resolution) -> Option<NodeId> {
    match target {
        Resolution::Declaration(id) => symbols.declaration(id).map(|d| d.node),
        Resolution::Anchor(node) => Some(node),
    }
}

fn target_range(
    tree: &SyntaxTree,
    symbols: &DocumentSymbols,
    target: Resolution,
) -> Option<SourceRange> {
    match target {
        Resolution::Declaration(id) => symbols.declaration(id).map(|d| d.range),
        Resolution::Anchor(node) => tree.get(node).map(|n| n.range()),
    }
}

/// Left operand of an assignment.
fn is_write(node: NodeRef<'_>) -> bool {
    match node.parent().map(|p| p.kind()) {
        Some(NodeKind::Binary(binary)) => binary.op.is_assignment() && binary.left == node.id(),
        _ => false,
    }
}
