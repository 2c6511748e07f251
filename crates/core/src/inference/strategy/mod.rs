//! Inference strategies using the combinator pattern.
//!
//! Each strategy implements [`InferStrategy`] for the node kinds it
//! understands and returns `None` for the rest, so strategies chain with
//! `or_else()`.

mod collection;
mod combinator;
mod declaration;
mod field;
mod literal;
mod local;
mod method;
mod new_expr;
mod operator;
mod this;
mod type_ref;

pub use collection::CollectionInfer;
pub use combinator::OrElse;
pub use declaration::DeclarationInfer;
pub use field::FieldAccessInfer;
pub use literal::LiteralInfer;
pub use local::LocalVarInfer;
pub use method::MethodCallInfer;
pub use new_expr::NewExprInfer;
pub use operator::{BinaryInfer, TernaryInfer};
pub use this::ThisInfer;
pub use type_ref::{CastInfer, TypeRefInfer};

use crate::context::SemanticContext;
use grove_syntax::NodeRef;

/// A type inference strategy.
pub trait InferStrategy: Send + Sync {
    /// Type of the node as a display string, or `None` if this strategy does
    /// not apply.
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String>;

    /// If `self` returns `None`, try `other`.
    fn or_else<S: InferStrategy>(self, other: S) -> OrElse<Self, S>
    where
        Self: Sized,
    {
        OrElse::new(self, other)
    }
}

/// The default expression inferrer, strategies in priority order.
pub fn build_expression_inferrer() -> impl InferStrategy {
    ThisInfer
        .or_else(LiteralInfer)
        .or_else(CollectionInfer)
        .or_else(NewExprInfer)
        .or_else(TypeRefInfer)
        .or_else(CastInfer)
        .or_else(LocalVarInfer)
        .or_else(FieldAccessInfer)
        .or_else(MethodCallInfer)
        .or_else(BinaryInfer)
        .or_else(TernaryInfer)
        .or_else(DeclarationInfer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GroveConfig;
    use crate::symbols::DocumentSymbols;
    use grove_syntax::{DocumentId, LiteralKind, ModuleNode, SourceRange, TreeBuilder};

    struct AlwaysNone;
    impl InferStrategy for AlwaysNone {
        fn infer(&self, _: NodeRef<'_>, _: SemanticContext<'_>) -> Option<String> {
            None
        }
    }

    struct Always(&'static str);
    impl InferStrategy for Always {
        fn infer(&self, _: NodeRef<'_>, _: SemanticContext<'_>) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[test]
    fn test_or_else_order() {
        let mut b = TreeBuilder::new(DocumentId::parse("file:///s.groovy").unwrap());
        let one = b.constant(LiteralKind::Int, "1", SourceRange::new(1, 1, 1, 2));
        let root = b.module(
            ModuleNode {
                statements: vec![one],
                ..Default::default()
            },
            SourceRange::new(1, 1, 1, 2),
        );
        let tree = b.finish(root).unwrap();
        let symbols = DocumentSymbols::new();
        let config = GroveConfig::default();
        let ctx = SemanticContext::new(&tree, &symbols, &config);
        let node = tree.get(one).unwrap();

        assert_eq!(AlwaysNone.or_else(Always("b")).infer(node, ctx).as_deref(), Some("b"));
        assert_eq!(Always("a").or_else(Always("b")).infer(node, ctx).as_deref(), Some("a"));
        assert_eq!(AlwaysNone.or_else(AlwaysNone).infer(node, ctx), None);
        assert_eq!(build_expression_inferrer().infer(node, ctx).as_deref(), Some("int"));
    }
}
