use crate::config::GroveConfig;
use crate::symbols::DocumentSymbols;
use grove_syntax::{NodeId, NodeRef, SyntaxTree};

/// Everything a semantic query reads: one tree, the symbols built from it,
/// and the tunables. Resolution and inference call into each other, so the
/// context also carries the current nesting depth.
#[derive(Clone, Copy)]
pub struct SemanticContext<'a> {
    pub tree: &'a SyntaxTree,
    pub symbols: &'a DocumentSymbols,
    pub config: &'a GroveConfig,
    depth: usize,
}

impl<'a> SemanticContext<'a> {
    pub fn new(
        tree: &'a SyntaxTree,
        symbols: &'a DocumentSymbols,
        config: &'a GroveConfig,
    ) -> Self {
        Self {
            tree,
            symbols,
            config,
            depth: 0,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<NodeRef<'a>> {
        self.tree.get(id)
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// One level deeper, or `None` once `max_inference_depth` is reached.
    pub fn descend(self) -> Option<Self> {
        if self.depth >= self.config.max_inference_depth {
            tracing::trace!("inference depth limit {} reached", self.depth);
            return None;
        }
        Some(Self {
            depth: self.depth + 1,
            ..self
        })
    }
}
