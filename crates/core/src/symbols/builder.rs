//! One pass over a tree that registers every declaration and opens the
//! lexical scopes.

use super::declaration::{Declaration, DeclarationKind};
use super::registry::DocumentSymbols;
use super::scope::{ScopeId, ScopeKind};
use grove_syntax::{NodeKind, NodeRef, SyntaxTree, TypeName};

pub(crate) struct SymbolBuilder {
    symbols: DocumentSymbols,
}

impl SymbolBuilder {
    pub(crate) fn build(tree: &SyntaxTree) -> DocumentSymbols {
        let mut builder = Self {
            symbols: DocumentSymbols::new(),
        };
        let root = tree.root();
        let scope = builder
            .symbols
            .scopes_mut()
            .register_scope(root.id(), None, ScopeKind::Module);
        builder.visit_children(root, scope);

        let stats = builder.symbols.stats();
        tracing::debug!(
            "Built symbols for {}: {} classes, {} methods, {} variables, {} parameters, {} scopes",
            tree.document(),
            stats.classes,
            stats.methods,
            stats.variables,
            stats.parameters,
            stats.scopes
        );
        builder.symbols
    }

    fn visit_children(&mut self, node: NodeRef<'_>, scope: ScopeId) {
        for child in node.children() {
            self.visit(child, scope);
        }
    }

    fn open(&mut self, node: NodeRef<'_>, parent: ScopeId, kind: ScopeKind) -> ScopeId {
        self.symbols
            .scopes_mut()
            .register_scope(node.id(), Some(parent), kind)
    }

    fn enclosing_class(&self, scope: ScopeId) -> Option<String> {
        self.symbols
            .scopes()
            .find_enclosing_class(scope)
            .map(str::to_string)
    }

    fn register(&mut self, scope: ScopeId, scope_name: &str, declaration: Declaration) {
        let id = self.symbols.add(declaration);
        self.symbols.scopes_mut().add_symbol(scope, scope_name, id);
    }

    fn visit(&mut self, node: NodeRef<'_>, scope: ScopeId) {
        match node.kind() {
            NodeKind::Class(class) => {
                let declaration = Declaration::new(
                    DeclarationKind::Class,
                    class.name.as_str(),
                    node.id(),
                    node.range(),
                )
                .with_type(Some(TypeName::new(class.name.as_str())));
                self.register(scope, class.simple_name(), declaration);

                let class_scope = self.open(node, scope, ScopeKind::Class(class.name.clone()));
                for member in node.class_members() {
                    match member {
                        Ok(member) => self.visit(member, class_scope),
                        Err(err) => {
                            tracing::debug!("Skipping unlinked member {}", err);
                        }
                    }
                }
            }
            NodeKind::Method(method) => {
                let owner = self.enclosing_class(scope);
                let return_type = if method.is_constructor {
                    owner.as_deref().map(TypeName::new)
                } else {
                    method.return_type.clone()
                };
                let declaration = Declaration::new(
                    DeclarationKind::Method,
                    method.name.as_str(),
                    node.id(),
                    node.range(),
                )
                .with_type(return_type)
                .with_owner(owner);
                self.symbols.add_method(declaration);

                let method_scope = self.open(node, scope, ScopeKind::Method);
                self.visit_children(node, method_scope);
            }
            NodeKind::Field(field) => {
                let declaration = Declaration::new(
                    DeclarationKind::Field,
                    field.name.as_str(),
                    node.id(),
                    node.range(),
                )
                .with_type(field.declared_type.clone())
                .with_owner(self.enclosing_class(scope))
                .with_initializer(field.initializer);
                self.register(scope, &field.name, declaration);
                self.visit_children(node, scope);
            }
            NodeKind::Property(property) => {
                let declaration = Declaration::new(
                    DeclarationKind::Property,
                    property.name.as_str(),
                    node.id(),
                    node.range(),
                )
                .with_type(property.declared_type.clone())
                .with_owner(self.enclosing_class(scope))
                .with_initializer(property.initializer);
                self.register(scope, &property.name, declaration);
                self.visit_children(node, scope);
            }
            NodeKind::Import(import) => {
                let declaration = Declaration::new(
                    DeclarationKind::Import,
                    import.visible_name(),
                    node.id(),
                    node.range(),
                )
                .with_type((!import.is_star).then(|| TypeName::new(import.target.as_str())));
                self.register(scope, import.visible_name(), declaration);
            }
            NodeKind::Parameter(parameter) => {
                let declaration = Declaration::new(
                    DeclarationKind::Parameter,
                    parameter.name.as_str(),
                    node.id(),
                    node.range(),
                )
                .with_type(parameter.declared_type.clone())
                .with_initializer(parameter.default_value);
                self.register(scope, &parameter.name, declaration);
                self.visit_children(node, scope);
            }
            NodeKind::Declaration(decl) => {
                if let Some(value) = decl.value.and_then(|v| node.tree().get(v)) {
                    self.visit(value, scope);
                }
                let Some(target) = node.tree().get(decl.target) else {
                    return;
                };
                match target.kind() {
                    NodeKind::Variable(variable) => {
                        let declaration = Declaration::new(
                            DeclarationKind::Variable,
                            variable.name.as_str(),
                            target.id(),
                            target.range(),
                        )
                        .with_type(variable.declared_type.clone())
                        .with_initializer(decl.value);
                        self.register(scope, &variable.name, declaration);
                    }
                    other => {
                        tracing::trace!("Skipping multi-target declaration ({})", other.label());
                        self.visit(target, scope);
                    }
                }
            }
            NodeKind::Block(_) => {
                let block_scope = self.open(node, scope, ScopeKind::Block);
                self.visit_children(node, block_scope);
            }
            NodeKind::Closure(_) => {
                let closure_scope = self.open(node, scope, ScopeKind::Closure);
                self.visit_children(node, closure_scope);
            }
            NodeKind::For { .. } => {
                let loop_scope = self.open(node, scope, ScopeKind::Loop);
                self.visit_children(node, loop_scope);
            }
            _ => self.visit_children(node, scope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_syntax::{
        ClassMember, ClassNode, ClassOrigin, DocumentId, LinkError, LiteralKind, MethodNode,
        ModuleNode, SourceRange, TreeBuilder,
    };

    fn r(sl: u32, sc: u32, el: u32, ec: u32) -> SourceRange {
        SourceRange::new(sl, sc, el, ec)
    }

    #[test]
    fn test_registers_class_members_and_locals() {
        let mut b = TreeBuilder::new(DocumentId::parse("file:///b.groovy").unwrap());
        let string = Some(TypeName::new("java.lang.String"));
        let name = b.property("name", string, None, r(2, 5, 2, 16));
        let p = b.parameter("greeting", None, r(3, 14, 3, 22));
        let x = b.variable("x", r(4, 13, 4, 14));
        let one = b.constant(LiteralKind::Int, "1", r(4, 17, 4, 18));
        let decl = b.declaration(x, Some(one), r(4, 9, 4, 18));
        let body = b.block(vec![decl], r(3, 24, 5, 6));
        let method = b.method(
            MethodNode {
                parameters: vec![p],
                body: Some(body),
                ..MethodNode::new("greet")
            },
            r(3, 5, 5, 6),
        );
        let class = b.class(
            ClassNode {
                members: vec![ClassMember::Linked(name), ClassMember::Linked(method)],
                ..ClassNode::new("demo.Person")
            },
            r(1, 1, 6, 2),
        );
        let root = b.module(
            ModuleNode {
                classes: vec![class],
                ..Default::default()
            },
            r(1, 1, 6, 2),
        );
        let tree = b.finish(root).unwrap();
        let symbols = SymbolBuilder::build(&tree);

        assert!(symbols.find_class("demo.Person").is_some());
        assert_eq!(
            symbols.find_property("demo.Person", "name").map(|d| d.node),
            Some(name)
        );
        let greet = symbols.find_methods("greet");
        assert_eq!(greet.len(), 1);
        assert_eq!(greet[0].owner.as_deref(), Some("demo.Person"));
        assert_eq!(symbols.find_parameter("greeting").map(|d| d.node), Some(p));
        let local = symbols.find_variable("x").unwrap();
        assert_eq!(local.node, x);
        assert_eq!(local.initializer, Some(one));
        assert!(local.is_dynamic());

        // module, class, method, block
        assert_eq!(symbols.scopes().len(), 4);
        let block_scope = symbols.scopes().scope_of(body).unwrap();
        assert_eq!(symbols.scopes().lookup(block_scope, "x"), Some(local.id));
        assert!(symbols.scopes().lookup(block_scope, "greeting").is_some());
        assert_eq!(
            symbols.scopes().find_enclosing_class(block_scope),
            Some("demo.Person")
        );
    }

    #[test]
    fn test_unlinked_members_are_skipped() {
        let mut b = TreeBuilder::new(DocumentId::parse("file:///bin.groovy").unwrap());
        let ok = b.field("size", Some(TypeName::new("int")), None, SourceRange::synthetic());
        let class = b.class(
            ClassNode {
                members: vec![
                    ClassMember::Unlinked(LinkError::new(
                        "lib.Widget",
                        "renderer",
                        "type lib.Renderer not on classpath",
                    )),
                    ClassMember::Linked(ok),
                ],
                origin: ClassOrigin::Binary,
                ..ClassNode::new("lib.Widget")
            },
            SourceRange::synthetic(),
        );
        let root = b.module(
            ModuleNode {
                classes: vec![class],
                ..Default::default()
            },
            SourceRange::synthetic(),
        );
        let tree = b.finish(root).unwrap();
        let symbols = SymbolBuilder::build(&tree);

        assert!(symbols.find_field("lib.Widget", "size").is_some());
        assert!(symbols.find_member("lib.Widget", "renderer").is_none());
        assert_eq!(symbols.stats().fields, 1);
    }

    #[test]
    fn test_tuple_declarations_are_skipped() {
        let mut b = TreeBuilder::new(DocumentId::parse("file:///t.groovy").unwrap());
        let a = b.variable("a", r(1, 6, 1, 7));
        let c = b.variable("c", r(1, 9, 1, 10));
        let tuple = b.add(NodeKind::Tuple { elements: vec![a, c] }, r(1, 5, 1, 11));
        let list = b.list(Vec::new(), r(1, 14, 1, 16));
        let decl = b.declaration(tuple, Some(list), r(1, 1, 1, 16));
        let root = b.module(
            ModuleNode {
                statements: vec![decl],
                ..Default::default()
            },
            r(1, 1, 1, 16),
        );
        let tree = b.finish(root).unwrap();
        let symbols = SymbolBuilder::build(&tree);
        assert_eq!(symbols.stats().variables, 0);
    }

    #[test]
    fn test_build_is_idempotent() {
        let mut b = TreeBuilder::new(DocumentId::parse("file:///i.groovy").unwrap());
        let x = b.variable("x", r(1, 5, 1, 6));
        let decl = b.declaration(x, None, r(1, 1, 1, 6));
        let root = b.module(
            ModuleNode {
                statements: vec![decl],
                ..Default::default()
            },
            r(1, 1, 1, 6),
        );
        let tree = b.finish(root).unwrap();
        assert_eq!(SymbolBuilder::build(&tree).stats(), SymbolBuilder::build(&tree).stats());
    }
}
