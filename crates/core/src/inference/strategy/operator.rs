use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::{infer_expression, types};
use grove_syntax::{BinaryOp, NodeKind, NodeRef};

pub struct BinaryInfer;

impl InferStrategy for BinaryInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::Binary(binary) = node.kind() else {
            return None;
        };
        let op = binary.op.compound_base().unwrap_or(binary.op);

        let ty = match op {
            BinaryOp::Assign => {
                let right = infer_expression(ctx, binary.right);
                return Some(right.unwrap_or_else(|| types::OBJECT.to_string()));
            }
            BinaryOp::Subscript => types::OBJECT,
            BinaryOp::Compare => types::INT,
            BinaryOp::Find => types::MATCHER,
            BinaryOp::Match | BinaryOp::In | BinaryOp::InstanceOf => types::BOOLEAN,
            op if op.is_comparison() || op.is_logical() => types::BOOLEAN,
            op => {
                let left = infer_expression(ctx, binary.left);
                let right = infer_expression(ctx, binary.right);
                let concatenates = op == BinaryOp::Add
                    && [&left, &right]
                        .into_iter()
                        .flatten()
                        .any(|side| types::is_string_like(side));
                match (left, right) {
                    _ if concatenates => types::STRING,
                    (Some(left), Some(right)) => {
                        types::promote(&left, &right).unwrap_or(types::OBJECT)
                    }
                    _ => types::OBJECT,
                }
            }
        };
        Some(ty.to_string())
    }
}

/// Both branches agree, or promote numerically, or fall back to Object.
pub struct TernaryInfer;

impl InferStrategy for TernaryInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::Ternary {
            then_value,
            else_value,
            ..
        } = node.kind()
        else {
            return None;
        };
        let then_type = infer_expression(ctx, *then_value);
        let else_type = infer_expression(ctx, *else_value);
        let ty = match (then_type, else_type) {
            (Some(a), Some(b)) if a == b => a,
            (Some(a), Some(b)) => types::promote(&a, &b)
                .unwrap_or(types::OBJECT)
                .to_string(),
            _ => types::OBJECT.to_string(),
        };
        Some(ty)
    }
}
