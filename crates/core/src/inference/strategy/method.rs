use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::{infer_expression, types};
use crate::symbols::resolver;
use grove_syntax::{NodeKind, NodeRef};

/// Methods inherited from `Object` first, then the declared return type of
/// the first method in the document with the call's name.
pub struct MethodCallInfer;

impl InferStrategy for MethodCallInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::MethodCall(call) = node.kind() else {
            return None;
        };

        if let Some(ty) = types::OBJECT_METHODS.get(call.name.as_str()) {
            return Some(ty.to_string());
        }

        if call.name == "clone" {
            return match call.receiver {
                Some(receiver) => infer_expression(ctx, receiver),
                None => resolver::enclosing_class(ctx, node).map(|c| c.name.clone()),
            };
        }

        let methods = ctx.symbols.find_methods(&call.name);
        let method = methods.first()?;
        method.declared_type.as_ref().map(|t| t.to_string())
    }
}
