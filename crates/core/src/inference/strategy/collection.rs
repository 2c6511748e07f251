use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::{infer_expression, types};
use grove_syntax::{NodeKind, NodeRef};

/// List literals carry their element type when every element agrees; map
/// literals are always `LinkedHashMap`.
pub struct CollectionInfer;

impl InferStrategy for CollectionInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        match node.kind() {
            NodeKind::List { elements } if elements.is_empty() => Some(types::LIST.to_string()),
            NodeKind::List { elements } => {
                let mut element_types = elements.iter().map(|e| {
                    infer_expression(ctx, *e)
                        .map(|t| types::boxed(&t).to_string())
                        .unwrap_or_else(|| types::OBJECT.to_string())
                });
                let first = element_types.next()?;
                let element = if element_types.all(|t| t == first) {
                    first
                } else {
                    types::OBJECT.to_string()
                };
                Some(format!("{}<{}>", types::LIST, element))
            }
            NodeKind::Map { .. } => Some(types::MAP_LITERAL.to_string()),
            _ => None,
        }
    }
}
