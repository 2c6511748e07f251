use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::declaration_type;
use crate::symbols::resolver;
use grove_syntax::{NodeKind, NodeRef};

/// Variable references: the explicit type on the node, else the type of the
/// declaration it resolves to.
pub struct LocalVarInfer;

impl InferStrategy for LocalVarInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::Variable(variable) = node.kind() else {
            return None;
        };
        if let Some(ty) = &variable.declared_type {
            return Some(ty.to_string());
        }
        let id = resolver::resolve_variable(ctx, node, variable)?;
        declaration_type(ctx, ctx.symbols.declaration(id)?)
    }
}
