use grove_syntax::{
    ClassMember, ClassNode, DocumentId, LiteralKind, MethodNode, ModuleNode, NodeId,
    SourceRange, SyntaxTree, TreeBuilder, TypeName,
};

pub fn doc(name: &str) -> DocumentId {
    DocumentId::parse(&format!("file:///workspace/{name}.groovy")).unwrap()
}

pub fn r(start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> SourceRange {
    SourceRange::new(start_line, start_col, end_line, end_col)
}

/// Wraps top-level statements in a module node and finishes the tree.
pub fn script(mut b: TreeBuilder, statements: Vec<NodeId>, range: SourceRange) -> SyntaxTree {
    let root = b.module(
        ModuleNode {
            statements,
            ..Default::default()
        },
        range,
    );
    b.finish(root).unwrap()
}

/// ```groovy
/// def x = 1
/// def y = "a" + 1
/// println(x)
/// ```
#[allow(dead_code)]
pub struct ScriptFixture {
    pub tree: SyntaxTree,
    pub x: NodeId,
    pub x_decl: NodeId,
    pub one: NodeId,
    pub y: NodeId,
    pub sum: NodeId,
    pub call: NodeId,
    pub x_ref: NodeId,
}

/// `bind_reference` controls whether the front end attached a binding to the
/// `x` on line 3.
#[allow(dead_code)]
pub fn script_fixture(name: &str, bind_reference: bool) -> ScriptFixture {
    let mut b = TreeBuilder::new(doc(name));
    let x = b.variable("x", r(1, 5, 1, 6));
    let one = b.constant(LiteralKind::Int, "1", r(1, 9, 1, 10));
    let x_decl = b.declaration(x, Some(one), r(1, 1, 1, 10));

    let y = b.variable("y", r(2, 5, 2, 6));
    let a = b.constant(LiteralKind::String, "\"a\"", r(2, 9, 2, 12));
    let one_b = b.constant(LiteralKind::Int, "1", r(2, 15, 2, 16));
    let sum = b.binary(grove_syntax::BinaryOp::Add, a, one_b, r(2, 9, 2, 16));
    let y_decl = b.declaration(y, Some(sum), r(2, 1, 2, 16));

    let binding = bind_reference.then_some(x);
    let x_ref = b.reference("x", binding, r(3, 9, 3, 10));
    let call = b.method_call(None, "println", vec![x_ref], r(3, 1, 3, 11));

    let tree = script(b, vec![x_decl, y_decl, call], r(1, 1, 3, 11));
    ScriptFixture {
        tree,
        x,
        x_decl,
        one,
        y,
        sum,
        call,
        x_ref,
    }
}

/// ```groovy
/// class Animal {
///     String name
/// }
/// class Dog extends Animal {
///     int age
///     def bark() {
///         def me = this
///         println(name)
///     }
/// }
/// def rex = new Dog()
/// rex.name
/// rex.age
/// ```
#[allow(dead_code)]
pub struct ZooFixture {
    pub tree: SyntaxTree,
    pub animal: NodeId,
    pub name: NodeId,
    pub dog: NodeId,
    pub age: NodeId,
    pub bark: NodeId,
    pub bark_body: NodeId,
    pub me: NodeId,
    pub this_ref: NodeId,
    pub name_ref: NodeId,
    pub rex: NodeId,
    pub new_dog: NodeId,
    pub rex_ref_bound: NodeId,
    pub name_access: NodeId,
    pub rex_ref_unbound: NodeId,
    pub age_access: NodeId,
}

#[allow(dead_code)]
pub fn zoo_fixture(name: &str) -> ZooFixture {
    let mut b = TreeBuilder::new(doc(name));

    let name = b.property(
        "name",
        Some(TypeName::new("java.lang.String")),
        None,
        r(2, 5, 2, 16),
    );
    let animal = b.class(
        ClassNode {
            members: vec![ClassMember::Linked(name)],
            ..ClassNode::new("zoo.Animal")
        },
        r(1, 1, 3, 2),
    );

    let age = b.property("age", Some(TypeName::new("int")), None, r(5, 5, 5, 12));
    let me = b.variable("me", r(7, 13, 7, 15));
    let this_ref = b.variable("this", r(7, 18, 7, 22));
    let me_decl = b.declaration(me, Some(this_ref), r(7, 9, 7, 22));
    let name_ref = b.variable("name", r(8, 17, 8, 21));
    let println = b.method_call(None, "println", vec![name_ref], r(8, 9, 8, 22));
    let bark_body = b.block(vec![me_decl, println], r(6, 16, 9, 6));
    let bark = b.method(
        MethodNode {
            body: Some(bark_body),
            ..MethodNode::new("bark")
        },
        r(6, 5, 9, 6),
    );
    let dog = b.class(
        ClassNode {
            super_class: Some(TypeName::new("Animal")),
            members: vec![ClassMember::Linked(age), ClassMember::Linked(bark)],
            ..ClassNode::new("zoo.Dog")
        },
        r(4, 1, 10, 2),
    );

    let rex = b.variable("rex", r(11, 5, 11, 8));
    let new_dog = b.constructor_call(TypeName::new("Dog"), None, Vec::new(), r(11, 11, 11, 20));
    let rex_decl = b.declaration(rex, Some(new_dog), r(11, 1, 11, 20));
    let rex_ref_bound = b.reference("rex", Some(rex), r(12, 1, 12, 4));
    let name_access = b.property_access(rex_ref_bound, "name", r(12, 1, 12, 9));
    let rex_ref_unbound = b.variable("rex", r(13, 1, 13, 4));
    let age_access = b.property_access(rex_ref_unbound, "age", r(13, 1, 13, 8));

    let root = b.module(
        ModuleNode {
            classes: vec![animal, dog],
            statements: vec![rex_decl, name_access, age_access],
            ..Default::default()
        },
        r(1, 1, 13, 8),
    );
    let tree = b.finish(root).unwrap();

    ZooFixture {
        tree,
        animal,
        name,
        dog,
        age,
        bark,
        bark_body,
        me,
        this_ref,
        name_ref,
        rex,
        new_dog,
        rex_ref_bound,
        name_access,
        rex_ref_unbound,
        age_access,
    }
}
