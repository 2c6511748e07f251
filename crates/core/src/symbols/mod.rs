//! Symbol table: declaration registration and reference resolution.

mod builder;
pub mod declaration;
pub mod registry;
pub(crate) mod resolver;
pub mod scope;

pub use declaration::{Declaration, DeclarationId, DeclarationKind, Resolution};
pub use registry::{DocumentSymbols, RegistryStats, SymbolRegistry};
pub use scope::{Scope, ScopeId, ScopeKind, ScopeTree};

use crate::config::GroveConfig;
use crate::context::SemanticContext;
use builder::SymbolBuilder;
use grove_syntax::{DocumentId, NodeId, SyntaxTree};
use rayon::prelude::*;
use std::sync::Arc;

/// Registry plus the tunables that resolution depends on.
#[derive(Debug, Default)]
pub struct SymbolTable {
    registry: SymbolRegistry,
    config: GroveConfig,
}

impl SymbolTable {
    pub fn new(config: GroveConfig) -> Self {
        Self {
            registry: SymbolRegistry::new(),
            config,
        }
    }

    pub fn config(&self) -> &GroveConfig {
        &self.config
    }

    pub fn registry(&self) -> &SymbolRegistry {
        &self.registry
    }

    /// Rebuilds the document's symbols from scratch. Prior state for the
    /// document is replaced in one step.
    pub fn build(&self, tree: &SyntaxTree) -> RegistryStats {
        self.build_snapshot(tree).stats()
    }

    /// Like [`SymbolTable::build`], but hands back the installed table so a
    /// caller can keep serving it alongside the tree it came from.
    pub fn build_snapshot(&self, tree: &SyntaxTree) -> Arc<DocumentSymbols> {
        let symbols = SymbolBuilder::build(tree);
        self.registry.install(tree.document().clone(), symbols)
    }

    pub fn build_all(&self, trees: &[&SyntaxTree]) -> RegistryStats {
        trees
            .par_iter()
            .map(|tree| self.build(tree))
            .reduce(RegistryStats::default, RegistryStats::merge)
    }

    /// Declaration denoted by `node`. With `strict == false` an unresolved
    /// node resolves to itself.
    pub fn resolve(&self, tree: &SyntaxTree, node: NodeId, strict: bool) -> Option<Resolution> {
        let symbols = self.snapshot_or_empty(tree.document());
        self.resolve_in(tree, &symbols, node, strict)
    }

    /// Resolves against `symbols` instead of the registry's current table.
    pub fn resolve_in(
        &self,
        tree: &SyntaxTree,
        symbols: &DocumentSymbols,
        node: NodeId,
        strict: bool,
    ) -> Option<Resolution> {
        let node = tree.get(node)?;
        resolver::resolve(self.context(tree, symbols), node, strict)
    }

    pub fn context<'a>(
        &'a self,
        tree: &'a SyntaxTree,
        symbols: &'a DocumentSymbols,
    ) -> SemanticContext<'a> {
        SemanticContext::new(tree, symbols, &self.config)
    }

    pub fn snapshot(&self, document: &DocumentId) -> Option<Arc<DocumentSymbols>> {
        self.registry.snapshot(document)
    }

    /// Snapshot, or an empty table for documents never built.
    pub fn snapshot_or_empty(&self, document: &DocumentId) -> Arc<DocumentSymbols> {
        self.snapshot(document).unwrap_or_default()
    }

    pub fn declaration(&self, document: &DocumentId, id: DeclarationId) -> Option<Declaration> {
        self.registry.declaration(document, id)
    }

    pub fn clear(&self, document: &DocumentId) {
        self.registry.clear(document);
    }

    pub fn clear_all(&self) {
        self.registry.clear_all();
    }

    pub fn stats(&self, document: &DocumentId) -> RegistryStats {
        self.registry.stats(document)
    }
}
