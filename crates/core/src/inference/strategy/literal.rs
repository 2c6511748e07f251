use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::types;
use grove_syntax::{LiteralKind, NodeKind, NodeRef};

pub struct LiteralInfer;

impl InferStrategy for LiteralInfer {
    fn infer(&self, node: NodeRef<'_>, _ctx: SemanticContext<'_>) -> Option<String> {
        let ty = match node.kind() {
            NodeKind::Constant(constant) => match constant.kind {
                LiteralKind::Int => types::INT,
                LiteralKind::Long => types::LONG,
                LiteralKind::BigInteger => types::BIG_INTEGER,
                LiteralKind::Float => types::FLOAT,
                LiteralKind::Double => types::DOUBLE,
                LiteralKind::BigDecimal => types::BIG_DECIMAL,
                LiteralKind::String => types::STRING,
                LiteralKind::Char => types::CHAR,
                LiteralKind::Boolean => types::BOOLEAN,
                // null fits any reference type
                LiteralKind::Null => types::OBJECT,
            },
            NodeKind::GString { .. } => types::GSTRING,
            NodeKind::Closure(_) => types::CLOSURE,
            _ => return None,
        };
        Some(ty.to_string())
    }
}
