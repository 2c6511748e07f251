use super::InferStrategy;
use crate::context::SemanticContext;
use grove_syntax::{NodeKind, NodeRef};

/// A class used as an expression (`Math.max`, `String.class`) denotes that
/// class.
pub struct TypeRefInfer;

impl InferStrategy for TypeRefInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::ClassRef(class_ref) = node.kind() else {
            return None;
        };
        let symbols = ctx.symbols;
        let name = class_ref
            .class
            .and_then(|c| symbols.declaration_for_node(c))
            .or_else(|| symbols.find_class(&class_ref.type_name.name))
            .map(|d| d.name.clone())
            .unwrap_or_else(|| class_ref.type_name.to_string());
        Some(name)
    }
}

pub struct CastInfer;

impl InferStrategy for CastInfer {
    fn infer(&self, node: NodeRef<'_>, _ctx: SemanticContext<'_>) -> Option<String> {
        match node.kind() {
            NodeKind::Cast { type_name, .. } => Some(type_name.to_string()),
            _ => None,
        }
    }
}
