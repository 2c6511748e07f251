use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::{declaration_type, infer_expression};
use crate::symbols::{Resolution, resolver};
use grove_syntax::{NodeKind, NodeRef};

pub struct FieldAccessInfer;

impl InferStrategy for FieldAccessInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::PropertyAccess(access) = node.kind() else {
            return None;
        };
        match resolver::resolve_property(ctx, access)? {
            Resolution::Declaration(id) => declaration_type(ctx, ctx.symbols.declaration(id)?),
            Resolution::Anchor(member) => infer_expression(ctx, member),
        }
    }
}
