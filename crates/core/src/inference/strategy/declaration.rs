use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::{declaration_type, infer_expression};
use grove_syntax::{NodeKind, NodeRef};

/// Declaration-like nodes take the type of what they declare.
pub struct DeclarationInfer;

impl InferStrategy for DeclarationInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        match node.kind() {
            NodeKind::Declaration(decl) => {
                let target = ctx.node(decl.target)?;
                match target.kind() {
                    NodeKind::Variable(variable) => match &variable.declared_type {
                        Some(ty) => Some(ty.to_string()),
                        None => decl.value.and_then(|v| infer_expression(ctx, v)),
                    },
                    _ => None,
                }
            }
            NodeKind::Class(_)
            | NodeKind::Method(_)
            | NodeKind::Field(_)
            | NodeKind::Property(_)
            | NodeKind::Parameter(_)
            | NodeKind::Import(_) => {
                declaration_type(ctx, ctx.symbols.declaration_for_node(node.id())?)
            }
            NodeKind::ExpressionStatement { expression } => infer_expression(ctx, *expression),
            _ => None,
        }
    }
}
