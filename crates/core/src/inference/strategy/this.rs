use super::InferStrategy;
use crate::context::SemanticContext;
use crate::symbols::resolver;
use grove_syntax::{NodeKind, NodeRef};

/// `this` is the enclosing class, `super` its declared superclass.
pub struct ThisInfer;

impl InferStrategy for ThisInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::Variable(variable) = node.kind() else {
            return None;
        };
        match variable.name.as_str() {
            "this" => resolver::enclosing_class(ctx, node).map(|c| c.name.clone()),
            "super" => {
                let class = resolver::enclosing_class(ctx, node)?;
                match resolver::superclass(ctx, class) {
                    Some(parent) => Some(parent.name.clone()),
                    None => resolver::superclass_name(ctx, class).map(|t| t.to_string()),
                }
            }
            _ => None,
        }
    }
}
