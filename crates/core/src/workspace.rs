//! Per-document tree store.
//!
//! Each document keeps its latest tree together with the symbols built from
//! it. Builds run before the map is touched and queries clone the pair out
//! of the map, so no map guard is held while either runs.

use crate::config::GroveConfig;
use crate::error::{GroveError, Result};
use crate::features::{HoverEngine, NavigationEngine};
use crate::inference::TypeInferencer;
use crate::position::PositionIndex;
use crate::symbols::{DocumentSymbols, RegistryStats, Resolution, SymbolTable};
use dashmap::DashMap;
use grove_syntax::{DocumentId, NodeId, SyntaxTree};
use lsp_types::{DocumentHighlight, Hover, Position, Range};
use rayon::prelude::*;
use std::sync::Arc;

/// A tree and the symbols built from that same tree.
#[derive(Debug)]
pub struct DocumentState {
    pub tree: Arc<SyntaxTree>,
    pub symbols: Arc<DocumentSymbols>,
}

pub struct Workspace {
    documents: DashMap<DocumentId, Arc<DocumentState>>,
    table: SymbolTable,
    index: PositionIndex,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(GroveConfig::default())
    }
}

impl Workspace {
    pub fn new(config: GroveConfig) -> Self {
        Self {
            documents: DashMap::new(),
            index: PositionIndex::from_config(&config),
            table: SymbolTable::new(config),
        }
    }

    pub fn config(&self) -> &GroveConfig {
        self.table.config()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.table
    }

    /// Replaces the document's tree and rebuilds its symbols.
    pub fn update(&self, tree: SyntaxTree) -> RegistryStats {
        self.store(Arc::new(tree))
    }

    /// Updates several documents in parallel.
    pub fn update_many(&self, trees: Vec<SyntaxTree>) -> RegistryStats {
        let count = trees.len();
        let stats = trees
            .into_par_iter()
            .map(|tree| self.update(tree))
            .reduce(RegistryStats::default, RegistryStats::merge);
        tracing::info!("Indexed {} documents ({} declarations)", count, stats.total());
        stats
    }

    fn store(&self, tree: Arc<SyntaxTree>) -> RegistryStats {
        let symbols = self.table.build_snapshot(&tree);
        let stats = symbols.stats();
        let document = tree.document().clone();
        tracing::debug!("Updated {} ({} declarations)", document, stats.total());
        self.documents.insert(document, Arc::new(DocumentState { tree, symbols }));
        stats
    }

    pub fn close(&self, document: &DocumentId) {
        self.documents.remove(document);
        self.table.clear(document);
        tracing::debug!("Closed {}", document);
    }

    /// Current tree and symbols of the document.
    pub fn state(&self, document: &DocumentId) -> Option<Arc<DocumentState>> {
        self.documents.get(document).map(|entry| Arc::clone(&entry))
    }

    pub fn tree(&self, document: &DocumentId) -> Option<Arc<SyntaxTree>> {
        self.state(document).map(|state| Arc::clone(&state.tree))
    }

    pub fn documents(&self) -> Vec<DocumentId> {
        self.documents.iter().map(|e| e.key().clone()).collect()
    }

    /// Rebuilds the symbols of an already stored tree.
    pub fn rebuild(&self, document: &DocumentId) -> Result<RegistryStats> {
        let state = self
            .state(document)
            .ok_or_else(|| GroveError::UnknownDocument(document.to_string()))?;
        Ok(self.store(Arc::clone(&state.tree)))
    }

    pub fn find_node_at(&self, document: &DocumentId, position: Position) -> Option<NodeId> {
        let state = self.state(document)?;
        self.index.find_node_at(&state.tree, position.line, position.character)
    }

    /// Resolves the node under the cursor with the configured strictness.
    pub fn resolve_at(&self, document: &DocumentId, position: Position) -> Option<Resolution> {
        let state = self.state(document)?;
        let node = self.index.find_node_at(&state.tree, position.line, position.character)?;
        let strict = self.config().strict_resolution;
        self.table.resolve_in(&state.tree, &state.symbols, node, strict)
    }

    pub fn type_at(&self, document: &DocumentId, position: Position) -> Option<String> {
        let state = self.state(document)?;
        let node = self.index.find_node_at(&state.tree, position.line, position.character)?;
        let inferencer = TypeInferencer::new(&self.table).with_symbols(Arc::clone(&state.symbols));
        Some(inferencer.infer_type(&state.tree, node))
    }

    fn navigation(&self, state: &DocumentState) -> NavigationEngine<'_> {
        NavigationEngine::new(&self.table).with_symbols(Arc::clone(&state.symbols))
    }

    pub fn definition(&self, document: &DocumentId, position: Position) -> Option<Range> {
        let state = self.state(document)?;
        self.navigation(&state).definition(&state.tree, position)
    }

    pub fn references(
        &self,
        document: &DocumentId,
        position: Position,
        include_declaration: bool,
    ) -> Vec<Range> {
        let Some(state) = self.state(document) else {
            return Vec::new();
        };
        self.navigation(&state).references(&state.tree, position, include_declaration)
    }

    pub fn document_highlights(
        &self,
        document: &DocumentId,
        position: Position,
    ) -> Vec<DocumentHighlight> {
        let Some(state) = self.state(document) else {
            return Vec::new();
        };
        self.navigation(&state).document_highlights(&state.tree, position)
    }

    pub fn hover(&self, document: &DocumentId, position: Position) -> Option<Hover> {
        let state = self.state(document)?;
        HoverEngine::new(&self.table)
            .with_symbols(Arc::clone(&state.symbols))
            .hover(&state.tree, position)
    }

    pub fn stats(&self) -> RegistryStats {
        self.table.registry().stats_total()
    }
}
