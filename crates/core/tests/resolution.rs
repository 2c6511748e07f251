mod common;

use common::{doc, r, script, script_fixture, zoo_fixture};
use grove_core::{DeclarationKind, GroveConfig, Resolution, SymbolTable};
use grove_syntax::{
    ClassMember, ClassNode, ClassOrigin, ImportNode, LinkError, MethodNode, ModuleNode,
    NodeId, TreeBuilder, TypeName,
};

fn declaration_of(resolution: Option<Resolution>) -> grove_core::DeclarationId {
    match resolution {
        Some(Resolution::Declaration(id)) => id,
        other => panic!("expected a declaration, got {:?}", other),
    }
}

#[test]
fn test_reference_two_lines_later_resolves_to_lhs() {
    for bound in [true, false] {
        let f = script_fixture("scenario_a", bound);
        let table = SymbolTable::default();
        table.build(&f.tree);

        let from_lhs = declaration_of(table.resolve(&f.tree, f.x, true));
        let from_use = declaration_of(table.resolve(&f.tree, f.x_ref, true));
        assert_eq!(from_lhs, from_use, "binding attached: {bound}");

        let declaration = table.declaration(f.tree.document(), from_use).unwrap();
        assert_eq!(declaration.kind, DeclarationKind::Variable);
        assert_eq!(declaration.node, f.x);
        assert_eq!(declaration.initializer, Some(f.one));
    }
}

#[test]
fn test_declaration_expression_resolves_to_its_variable() {
    let f = script_fixture("self_resolution", true);
    let table = SymbolTable::default();
    table.build(&f.tree);

    let via_expression = table.resolve(&f.tree, f.x_decl, true);
    let via_target = table.resolve(&f.tree, f.x, true);
    assert!(via_expression.is_some());
    assert_eq!(via_expression, via_target);
}

#[test]
fn test_declaring_nodes_resolve_to_themselves() {
    let f = zoo_fixture("declaring_nodes");
    let table = SymbolTable::default();
    table.build(&f.tree);
    let document = f.tree.document();

    for node in [f.animal, f.dog, f.name, f.age, f.bark] {
        let id = declaration_of(table.resolve(&f.tree, node, true));
        assert_eq!(table.declaration(document, id).unwrap().node, node);
    }
}

#[test]
fn test_this_and_inherited_members() {
    let f = zoo_fixture("this_and_super");
    let table = SymbolTable::default();
    table.build(&f.tree);
    let document = f.tree.document();

    let this_decl = declaration_of(table.resolve(&f.tree, f.this_ref, true));
    assert_eq!(table.declaration(document, this_decl).unwrap().name, "zoo.Dog");

    // `name` inside Dog.bark() is inherited from Animal.
    let name_decl = declaration_of(table.resolve(&f.tree, f.name_ref, true));
    assert_eq!(table.declaration(document, name_decl).unwrap().node, f.name);
}

#[test]
fn test_property_access_uses_receiver_type() {
    let f = zoo_fixture("property_access");
    let table = SymbolTable::default();
    table.build(&f.tree);
    let document = f.tree.document();

    let inherited = declaration_of(table.resolve(&f.tree, f.name_access, true));
    assert_eq!(table.declaration(document, inherited).unwrap().node, f.name);

    let own = declaration_of(table.resolve(&f.tree, f.age_access, true));
    let age = table.declaration(document, own).unwrap();
    assert_eq!(age.node, f.age);
    assert_eq!(age.owner.as_deref(), Some("zoo.Dog"));
}

#[test]
fn test_constructor_call_resolves_to_class() {
    let f = zoo_fixture("constructor");
    let table = SymbolTable::default();
    table.build(&f.tree);

    let id = declaration_of(table.resolve(&f.tree, f.new_dog, true));
    assert_eq!(table.declaration(f.tree.document(), id).unwrap().node, f.dog);
}

#[test]
fn test_strictness_controls_anchor_fallback() {
    let mut b = TreeBuilder::new(doc("anchor"));
    let unknown = b.variable("mystery", r(1, 1, 1, 8));
    let tree = script(b, vec![unknown], r(1, 1, 1, 8));
    let table = SymbolTable::default();
    table.build(&tree);

    assert_eq!(table.resolve(&tree, unknown, true), None);
    assert_eq!(
        table.resolve(&tree, unknown, false),
        Some(Resolution::Anchor(unknown))
    );
    // A node that can never denote a declaration.
    assert_eq!(table.resolve(&tree, tree.root().id(), true), None);
}

#[test]
fn test_same_local_name_in_two_methods() {
    // def first() { def v = 1; v }
    // def second() { def v = 2; v }
    let mut b = TreeBuilder::new(doc("collision"));
    let mut methods = Vec::new();
    let mut expectations = Vec::new();
    for (line, name) in [(1u32, "first"), (2u32, "second")] {
        let v = b.variable("v", r(line, 20, line, 21));
        let value = b.constant(grove_syntax::LiteralKind::Int, "1", r(line, 24, line, 25));
        let decl = b.declaration(v, Some(value), r(line, 16, line, 25));
        let use_site = b.variable("v", r(line, 27, line, 28));
        let body = b.block(vec![decl, use_site], r(line, 14, line, 30));
        let method = b.method(
            MethodNode {
                body: Some(body),
                ..MethodNode::new(name)
            },
            r(line, 1, line, 30),
        );
        methods.push(method);
        expectations.push((v, use_site));
    }
    let root = b.module(
        ModuleNode {
            methods,
            ..Default::default()
        },
        r(1, 1, 2, 30),
    );
    let tree = b.finish(root).unwrap();
    let table = SymbolTable::default();
    table.build(&tree);

    for (declared, used) in expectations {
        let id = declaration_of(table.resolve(&tree, used, true));
        assert_eq!(table.declaration(tree.document(), id).unwrap().node, declared);
    }
}

#[test]
fn test_method_call_takes_first_overload() {
    let mut b = TreeBuilder::new(doc("overloads"));
    let p = b.parameter("s", Some(TypeName::new("java.lang.String")), r(2, 10, 2, 18));
    let first = b.method(MethodNode::new("log"), r(1, 1, 1, 12));
    let second = b.method(
        MethodNode {
            parameters: vec![p],
            ..MethodNode::new("log")
        },
        r(2, 1, 2, 20),
    );
    let call = b.method_call(None, "log", Vec::new(), r(3, 1, 3, 6));
    let root = b.module(
        ModuleNode {
            methods: vec![first, second],
            statements: vec![call],
            ..Default::default()
        },
        r(1, 1, 3, 6),
    );
    let tree = b.finish(root).unwrap();
    let table = SymbolTable::default();
    table.build(&tree);

    let id = declaration_of(table.resolve(&tree, call, true));
    assert_eq!(table.declaration(tree.document(), id).unwrap().node, first);
}

#[test]
fn test_unlinked_binary_members_do_not_break_resolution() {
    let mut b = TreeBuilder::new(doc("binary"));
    let size = b.field("size", Some(TypeName::new("int")), None, r(1, 1, 1, 2));
    let widget = b.class(
        ClassNode {
            members: vec![
                ClassMember::Unlinked(LinkError::new("lib.Widget", "skin", "lib.Skin not found")),
                ClassMember::Linked(size),
            ],
            origin: ClassOrigin::Binary,
            ..ClassNode::new("lib.Widget")
        },
        r(1, 1, 1, 2),
    );
    let w = b.variable("w", r(2, 14, 2, 15));
    let new_widget =
        b.constructor_call(TypeName::new("Widget"), Some(widget), Vec::new(), r(2, 18, 2, 30));
    let w_decl = b.declaration(w, Some(new_widget), r(2, 1, 2, 30));
    let w_ref = b.reference("w", Some(w), r(3, 1, 3, 2));
    let skin = b.property_access(w_ref, "skin", r(3, 1, 3, 7));
    let w_ref2 = b.reference("w", Some(w), r(4, 1, 4, 2));
    let size_access = b.property_access(w_ref2, "size", r(4, 1, 4, 7));
    let root = b.module(
        ModuleNode {
            classes: vec![widget],
            statements: vec![w_decl, skin, size_access],
            ..Default::default()
        },
        r(1, 1, 4, 7),
    );
    let tree = b.finish(root).unwrap();
    let table = SymbolTable::default();
    let stats = table.build(&tree);
    assert_eq!(stats.fields, 1);

    assert_eq!(table.resolve(&tree, skin, true), None);
    let id = declaration_of(table.resolve(&tree, size_access, true));
    assert_eq!(table.declaration(tree.document(), id).unwrap().node, size);
}

#[test]
fn test_superclass_cycle_terminates() {
    // class A extends B {}  class B extends A {}  with a lookup of a missing member.
    let mut b = TreeBuilder::new(doc("cycle"));
    let missing = b.variable("ghost", r(2, 20, 2, 25));
    let body = b.block(vec![missing], r(2, 18, 2, 27));
    let method = b.method(
        MethodNode {
            body: Some(body),
            ..MethodNode::new("m")
        },
        r(2, 10, 2, 27),
    );
    let a = b.class(
        ClassNode {
            super_class: Some(TypeName::new("B")),
            members: vec![ClassMember::Linked(method)],
            ..ClassNode::new("A")
        },
        r(1, 1, 3, 2),
    );
    let b_class = b.class(
        ClassNode {
            super_class: Some(TypeName::new("A")),
            ..ClassNode::new("B")
        },
        r(4, 1, 4, 20),
    );
    let root = b.module(
        ModuleNode {
            classes: vec![a, b_class],
            ..Default::default()
        },
        r(1, 1, 4, 20),
    );
    let tree = b.finish(root).unwrap();
    let table = SymbolTable::new(GroveConfig {
        max_hierarchy_depth: 1000,
        ..GroveConfig::default()
    });
    table.build(&tree);
    assert_eq!(table.resolve(&tree, missing, true), None);
}

#[test]
fn test_import_alias_resolves_to_import() {
    let mut b = TreeBuilder::new(doc("imports"));
    let chm = ImportNode::aliased("java.util.concurrent.ConcurrentHashMap", "CHM");
    let import = b.import(chm, r(1, 1, 1, 50));
    let class_ref = b.class_ref(TypeName::new("CHM"), None, r(2, 1, 2, 4));
    let root = b.module(
        ModuleNode {
            imports: vec![import],
            statements: vec![class_ref],
            ..Default::default()
        },
        r(1, 1, 2, 4),
    );
    let tree = b.finish(root).unwrap();
    let table = SymbolTable::default();
    table.build(&tree);

    let id = declaration_of(table.resolve(&tree, class_ref, true));
    let import_decl = table.declaration(tree.document(), id).unwrap();
    assert_eq!(import_decl.kind, DeclarationKind::Import);
    assert_eq!(import_decl.node, import);
}

#[test]
fn test_unbuilt_document_resolves_nothing() {
    let f = script_fixture("never_built", true);
    let table = SymbolTable::default();
    assert_eq!(table.resolve(&f.tree, f.x_ref, true), None);
    assert_eq!(table.resolve(&f.tree, NodeId::new(9999), false), None);
}

#[test]
fn test_build_all_builds_documents_in_parallel() {
    let fixtures: Vec<_> = (0..8)
        .map(|i| script_fixture(&format!("parallel_{i}"), i % 2 == 0))
        .collect();
    let trees: Vec<_> = fixtures.iter().map(|f| &f.tree).collect();
    let table = SymbolTable::default();
    let stats = table.build_all(&trees);
    assert_eq!(stats.variables, 16);

    for f in &fixtures {
        let lhs = table.resolve(&f.tree, f.x, true);
        assert!(lhs.is_some());
        assert_eq!(lhs, table.resolve(&f.tree, f.x_ref, true));
    }
    assert_eq!(table.registry().stats_total().variables, 16);
}
