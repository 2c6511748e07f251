//! Static type inference over the syntax tree.
//!
//! Types are display strings such as `java.util.List<java.lang.Integer>`.
//! Inference never fails: anything unknown is `java.lang.Object`.

pub mod strategy;
pub mod types;

use crate::context::SemanticContext;
use crate::symbols::{Declaration, DeclarationId, DeclarationKind, DocumentSymbols, SymbolTable};
use grove_syntax::{NodeId, NodeKind, SyntaxTree};
use once_cell::sync::Lazy;
use std::sync::Arc;
use strategy::InferStrategy;

static EXPRESSION_INFERRER: Lazy<Box<dyn InferStrategy>> =
    Lazy::new(|| Box::new(strategy::build_expression_inferrer()));

/// Runs the strategy chain one level deeper than `ctx`.
pub(crate) fn infer_expression(ctx: SemanticContext<'_>, id: NodeId) -> Option<String> {
    let ctx = ctx.descend()?;
    let node = ctx.node(id)?;
    EXPRESSION_INFERRER.infer(node, ctx)
}

/// Declared type, else the type of the initializer. Untyped for-loop
/// variables take the element type of the iterated collection.
pub(crate) fn declaration_type(
    ctx: SemanticContext<'_>,
    declaration: &Declaration,
) -> Option<String> {
    if let Some(ty) = &declaration.declared_type {
        return Some(ty.to_string());
    }
    match declaration.kind {
        DeclarationKind::Variable | DeclarationKind::Field | DeclarationKind::Property => {
            declaration
                .initializer
                .and_then(|init| infer_expression(ctx, init))
        }
        DeclarationKind::Parameter => {
            if let Some(default) = declaration.initializer {
                return infer_expression(ctx, default);
            }
            loop_element_type(ctx, declaration.node)
        }
        _ => None,
    }
}

fn loop_element_type(ctx: SemanticContext<'_>, parameter: NodeId) -> Option<String> {
    let parent = ctx.node(parameter)?.parent()?;
    let NodeKind::For {
        variable,
        collection,
        ..
    } = parent.kind()
    else {
        return None;
    };
    if *variable != parameter {
        return None;
    }
    let collection_type = infer_expression(ctx, *collection)?;
    let (_, arguments) = collection_type.split_once('<')?;
    let element = arguments.strip_suffix('>')?;
    // Only single-argument collections have an obvious element type.
    (!element.contains(',')).then(|| element.trim().to_string())
}

/// Public entry point for type queries against a built document.
pub struct TypeInferencer<'a> {
    table: &'a SymbolTable,
    pinned: Option<Arc<DocumentSymbols>>,
}

impl<'a> TypeInferencer<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            pinned: None,
        }
    }

    /// Infers against `symbols` rather than the registry's current table.
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

    pub fn infer_type(&self, tree: &SyntaxTree, node: NodeId) -> String {
        let symbols = self.symbols(tree);
        let ctx = self.table.context(tree, &symbols);
        infer_expression(ctx, node).unwrap_or_else(|| types::OBJECT.to_string())
    }

    pub fn declaration_type(&self, tree: &SyntaxTree, id: DeclarationId) -> String {
        let symbols = self.symbols(tree);
        let ctx = self.table.context(tree, &symbols);
        symbols
            .declaration(id)
            .and_then(|declaration| declaration_type(ctx, declaration))
            .unwrap_or_else(|| types::OBJECT.to_string())
    }
}
