//! Maps a node to the declaration it denotes.

use super::declaration::{Declaration, DeclarationId, Resolution};
use crate::context::SemanticContext;
use crate::inference::{self, types};
use grove_syntax::{NodeId, NodeKind, NodeRef, PropertyAccessNode, TypeName, VariableNode};
use std::collections::HashSet;

pub(crate) fn resolve(
    ctx: SemanticContext<'_>,
    node: NodeRef<'_>,
    strict: bool,
) -> Option<Resolution> {
    let resolved = match node.kind() {
        NodeKind::Class(_)
        | NodeKind::Method(_)
        | NodeKind::Field(_)
        | NodeKind::Property(_)
        | NodeKind::Parameter(_)
        | NodeKind::Import(_) => declared_by(ctx, node.id()).map(Resolution::Declaration),
        NodeKind::Variable(variable) => {
            resolve_variable(ctx, node, variable).map(Resolution::Declaration)
        }
        NodeKind::MethodCall(call) => ctx
            .symbols
            .find_methods(&call.name)
            .first()
            .map(|d| Resolution::Declaration(d.id)),
        NodeKind::ClassRef(class_ref) => {
            resolve_class(ctx, class_ref.class, &class_ref.type_name).map(Resolution::Declaration)
        }
        NodeKind::ConstructorCall(call) => {
            resolve_class(ctx, call.class, &call.type_name).map(Resolution::Declaration)
        }
        NodeKind::PropertyAccess(access) => resolve_property(ctx, access),
        NodeKind::Declaration(decl) => match ctx.node(decl.target).map(|t| t.kind()) {
            Some(NodeKind::Variable(_)) => {
                declared_by(ctx, decl.target).map(Resolution::Declaration)
            }
            _ => None,
        },
        _ => None,
    };

    match resolved {
        Some(resolution) => Some(resolution),
        None if strict => None,
        None => {
            tracing::trace!("No declaration for {} {}; anchoring", node.kind().label(), node.id());
            Some(Resolution::Anchor(node.id()))
        }
    }
}

fn declared_by(ctx: SemanticContext<'_>, node: NodeId) -> Option<DeclarationId> {
    ctx.symbols.declaration_for_node(node).map(|d| d.id)
}

pub(crate) fn resolve_variable(
    ctx: SemanticContext<'_>,
    node: NodeRef<'_>,
    variable: &VariableNode,
) -> Option<DeclarationId> {
    if let Some(id) = variable.binding.and_then(|b| declared_by(ctx, b)) {
        return Some(id);
    }

    match variable.name.as_str() {
        "this" => return enclosing_class(ctx, node).map(|c| c.id),
        "super" => {
            return enclosing_class(ctx, node)
                .and_then(|c| superclass(ctx, c))
                .map(|c| c.id);
        }
        _ => {}
    }

    let scopes = ctx.symbols.scopes();
    if let Some(id) = scopes
        .enclosing_scope(node)
        .and_then(|scope| scopes.lookup(scope, &variable.name))
    {
        return Some(id);
    }

    let symbols = ctx.symbols;
    if let Some(found) = symbols
        .find_variable(&variable.name)
        .or_else(|| symbols.find_import(&variable.name))
        .or_else(|| symbols.find_class(&variable.name))
    {
        return Some(found.id);
    }

    let class = enclosing_class(ctx, node)?;
    find_member_in_hierarchy(ctx, class, &variable.name).map(|d| d.id)
}

fn resolve_class(
    ctx: SemanticContext<'_>,
    bound: Option<NodeId>,
    type_name: &TypeName,
) -> Option<DeclarationId> {
    if let Some(id) = bound.and_then(|b| declared_by(ctx, b)) {
        return Some(id);
    }
    let symbols = ctx.symbols;
    symbols
        .find_class(&type_name.name)
        .or_else(|| {
            let import = symbols.find_import(&type_name.name)?;
            let target = import.declared_type.as_ref()?;
            symbols.find_class(&target.name).or(Some(import))
        })
        .map(|d| d.id)
}

pub(crate) fn resolve_property(
    ctx: SemanticContext<'_>,
    access: &PropertyAccessNode,
) -> Option<Resolution> {
    let receiver_type = inference::infer_expression(ctx, access.receiver)?;
    let class = ctx.symbols.find_class(types::erasure(&receiver_type))?;

    if let Some(member) = find_member_in_hierarchy(ctx, class, &access.property) {
        return Some(Resolution::Declaration(member.id));
    }

    if let Some(getter) = find_getter(ctx, class, &access.property) {
        return Some(Resolution::Declaration(getter.id));
    }

    // Members the builder never saw, e.g. when the class node was linked
    // after the table was built.
    let class_node = ctx.node(class.node)?;
    let member = class_node
        .class_members()
        .filter_map(Result::ok)
        .find(|m| m.name() == Some(access.property.as_str()))?;
    Some(match declared_by(ctx, member.id()) {
        Some(id) => Resolution::Declaration(id),
        None => Resolution::Anchor(member.id()),
    })
}

/// `getName()` / `isName()` declared on the class.
fn find_getter<'s>(
    ctx: SemanticContext<'s>,
    class: &Declaration,
    property: &str,
) -> Option<&'s Declaration> {
    let mut chars = property.chars();
    let first = chars.next()?;
    let capitalized: String = first.to_uppercase().chain(chars).collect();
    ["get", "is"].iter().find_map(|prefix| {
        ctx.symbols
            .find_methods(&format!("{prefix}{capitalized}"))
            .into_iter()
            .find(|m| m.owner.as_deref() == Some(class.name.as_str()))
    })
}

/// Class declaration whose scope contains the node.
pub(crate) fn enclosing_class<'s>(
    ctx: SemanticContext<'s>,
    node: NodeRef<'_>,
) -> Option<&'s Declaration> {
    let scopes = ctx.symbols.scopes();
    let scope = scopes.enclosing_scope(node)?;
    let name = scopes.find_enclosing_class(scope)?;
    ctx.symbols.find_class(name)
}

pub(crate) fn superclass<'s>(
    ctx: SemanticContext<'s>,
    class: &Declaration,
) -> Option<&'s Declaration> {
    let super_name = superclass_name(ctx, class)?;
    ctx.symbols.find_class(&super_name.name)
}

pub(crate) fn superclass_name<'s>(
    ctx: SemanticContext<'s>,
    class: &Declaration,
) -> Option<&'s TypeName> {
    match ctx.node(class.node)?.kind() {
        NodeKind::Class(node) => node.super_class.as_ref(),
        _ => None,
    }
}

/// Field or property on the class or one of its superclasses. The walk is
/// bounded by `max_hierarchy_depth` and stops on cycles.
pub(crate) fn find_member_in_hierarchy<'s>(
    ctx: SemanticContext<'s>,
    class: &'s Declaration,
    name: &str,
) -> Option<&'s Declaration> {
    let mut visited = HashSet::new();
    let mut current = Some(class);
    for _ in 0..ctx.config.max_hierarchy_depth {
        let class = current?;
        if !visited.insert(class.id) {
            tracing::debug!("Superclass cycle at {}", class.name);
            return None;
        }
        if let Some(member) = ctx.symbols.find_member(&class.name, name) {
            return Some(member);
        }
        current = superclass(ctx, class);
    }
    None
}
