use crate::coords;
use crate::inference::TypeInferencer;
use crate::position::PositionIndex;
use crate::symbols::{Declaration, DeclarationKind, DocumentSymbols, Resolution, SymbolTable};
use grove_syntax::{NodeKind, SyntaxTree};
use lsp_types::{Hover, HoverContents, MarkupContent, MarkupKind, Position};
use std::sync::Arc;

pub struct HoverEngine<'a> {
    table: &'a SymbolTable,
    index: PositionIndex,
    pinned: Option<Arc<DocumentSymbols>>,
}

impl<'a> HoverEngine<'a> {
    pub fn new(table: &'a SymbolTable) -> Self {
        Self {
            table,
            index: PositionIndex::from_config(table.config()),
            pinned: None,
        }
    }

    pub fn with_symbols(mut self, symbols: Arc<DocumentSymbols>) -> Self {
        self.pinned = Some(symbols);
        self
    }

    /// Markdown describing the declaration under the cursor, or the inferred
    /// type of a plain expression.
    pub fn hover(&self, tree: &SyntaxTree, position: Position) -> Option<Hover> {
        let node = self.index.find_node_ref_at(tree, position)?;
        let symbols = match &self.pinned {
            Some(symbols) => Arc::clone(symbols),
            None => self.table.snapshot_or_empty(tree.document()),
        };
        let inferencer = TypeInferencer::new(self.table).with_symbols(Arc::clone(&symbols));

        let body = match self.table.resolve_in(tree, &symbols, node.id(), true) {
            Some(Resolution::Declaration(id)) => {
                let declaration = symbols.declaration(id)?;
                let ty = inferencer.declaration_type(tree, id);
                describe(tree, declaration, &ty)
            }
            _ => format!("```groovy\n{}\n```", inferencer.infer_type(tree, node.id())),
        };

        Some(Hover {
            contents: HoverContents::Markup(MarkupContent {
                kind: MarkupKind::Markdown,
                value: body,
            }),
            range: coords::to_editor_range(node.range()),
        })
    }
}

fn describe(tree: &SyntaxTree, declaration: &Declaration, ty: &str) -> String {
    let signature = match declaration.kind {
        DeclarationKind::Method => method_signature(tree, declaration, ty),
        DeclarationKind::Class => class_signature(tree, declaration),
        DeclarationKind::Import => format!("import {}", ty),
        _ => format!("{} {}", ty, declaration.name),
    };
    let mut text = format!("```groovy\n{}\n```", signature);
    if let Some(owner) = &declaration.owner {
        text.push_str(&format!("\n\n*{}* of `{}`", declaration.kind.label(), owner));
    } else {
        text.push_str(&format!("\n\n*{}*", declaration.kind.label()));
    }
    text
}

fn method_signature(tree: &SyntaxTree, declaration: &Declaration, ty: &str) -> String {
    let Some(NodeKind::Method(method)) = tree.get(declaration.node).map(|n| n.kind()) else {
        return format!("{} {}()", ty, declaration.name);
    };
    let parameters: Vec<String> = method
        .parameters
        .iter()
        .filter_map(|p| match tree.get(*p)?.kind() {
            NodeKind::Parameter(param) => Some(match &param.declared_type {
                Some(t) => format!("{} {}", t, param.name),
                None => param.name.clone(),
            }),
            _ => None,
        })
        .collect();
    let return_type = match (&method.return_type, method.is_constructor) {
        (_, true) => String::new(),
        (Some(t), false) => format!("{} ", t),
        (None, false) => "def ".to_string(),
    };
    format!("{}{}({})", return_type, declaration.name, parameters.join(", "))
}

fn class_signature(tree: &SyntaxTree, declaration: &Declaration) -> String {
    let mut signature = format!("class {}", declaration.name);
    if let Some(NodeKind::Class(class)) = tree.get(declaration.node).map(|n| n.kind()) {
        if let Some(parent) = &class.super_class {
            signature.push_str(&format!(" extends {}", parent));
        }
        if !class.interfaces.is_empty() {
            let interfaces: Vec<String> = class.interfaces.iter().map(|i| i.to_string()).collect();
            signature.push_str(&format!(" implements {}", interfaces.join(", ")));
        }
    }
    signature
}
