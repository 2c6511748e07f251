use super::InferStrategy;
use crate::context::SemanticContext;
use grove_syntax::NodeRef;

/// Or-else combinator: try first, then second if first returns None.
pub struct OrElse<A, B> {
    first: A,
    second: B,
}

impl<A, B> OrElse<A, B> {
    pub fn new(first: A, second: B) -> Self {
        Self { first, second }
    }
}

impl<A: InferStrategy, B: InferStrategy> InferStrategy for OrElse<A, B> {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        self.first
            .infer(node, ctx)
            .or_else(|| self.second.infer(node, ctx))
    }
}
