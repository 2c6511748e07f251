use super::InferStrategy;
use crate::context::SemanticContext;
use crate::inference::types;
use grove_syntax::{NodeKind, NodeRef, TypeName};

/// `new T(...)`. Well-known collection names are qualified; otherwise an
/// import alias or a class declared in the document supplies the name.
pub struct NewExprInfer;

impl InferStrategy for NewExprInfer {
    fn infer(&self, node: NodeRef<'_>, ctx: SemanticContext<'_>) -> Option<String> {
        let NodeKind::ConstructorCall(call) = node.kind() else {
            return None;
        };
        let written = &call.type_name;

        if let Some(fqn) = types::COLLECTION_CONSTRUCTORS.get(written.name.as_str()) {
            return Some(TypeName::generic(*fqn, written.arguments.clone()).to_string());
        }

        let symbols = ctx.symbols;
        let qualified = call
            .class
            .and_then(|c| symbols.declaration_for_node(c))
            .map(|d| d.name.clone())
            .or_else(|| {
                symbols
                    .find_import(&written.name)
                    .and_then(|i| i.declared_type.as_ref())
                    .map(|t| t.name.clone())
            })
            .or_else(|| symbols.find_class(&written.name).map(|d| d.name.clone()));

        Some(match qualified {
            Some(name) => TypeName::generic(name, written.arguments.clone()).to_string(),
            None => written.to_string(),
        })
    }
}
