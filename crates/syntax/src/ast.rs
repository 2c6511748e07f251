//! Node kinds and their kind-specific children.

use crate::error::LinkError;
use crate::tree::NodeId;
use crate::types::TypeName;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Module(ModuleNode),
    Class(ClassNode),
    Method(MethodNode),
    Field(FieldNode),
    Property(PropertyNode),
    Import(ImportNode),
    Parameter(ParameterNode),
    Block(BlockNode),
    ExpressionStatement {
        expression: NodeId,
    },
    Return {
        expression: Option<NodeId>,
    },
    If {
        condition: NodeId,
        then_branch: NodeId,
        else_branch: Option<NodeId>,
    },
    While {
        condition: NodeId,
        body: NodeId,
    },
    /// `for (variable in collection) body`; `variable` is a parameter node.
    For {
        variable: NodeId,
        collection: NodeId,
        body: NodeId,
    },
    Declaration(DeclarationNode),
    Binary(BinaryNode),
    Variable(VariableNode),
    MethodCall(MethodCallNode),
    PropertyAccess(PropertyAccessNode),
    ConstructorCall(ConstructorCallNode),
    ClassRef(ClassRefNode),
    List {
        elements: Vec<NodeId>,
    },
    Map {
        entries: Vec<NodeId>,
    },
    MapEntry {
        key: NodeId,
        value: NodeId,
    },
    Constant(ConstantNode),
    /// String-interpolation template: `"Hello ${name}"`.
    GString {
        strings: Vec<String>,
        values: Vec<NodeId>,
    },
    Closure(ClosureNode),
    /// Multi-target left-hand side: `def (a, b) = ...`.
    Tuple {
        elements: Vec<NodeId>,
    },
    Ternary {
        condition: NodeId,
        then_value: NodeId,
        else_value: NodeId,
    },
    Cast {
        type_name: TypeName,
        expression: NodeId,
    },
}

impl NodeKind {
    /// Children in source order. Class members that failed to link are not
    /// children.
    pub fn children(&self) -> Vec<NodeId> {
        match self {
            NodeKind::Module(m) => m
                .imports
                .iter()
                .chain(&m.classes)
                .chain(&m.methods)
                .chain(&m.statements)
                .copied()
                .collect(),
            NodeKind::Class(c) => c.members.iter().filter_map(ClassMember::node).collect(),
            NodeKind::Method(m) => m.parameters.iter().copied().chain(m.body).collect(),
            NodeKind::Field(f) => f.initializer.into_iter().collect(),
            NodeKind::Property(p) => p.initializer.into_iter().collect(),
            NodeKind::Import(_) => Vec::new(),
            NodeKind::Parameter(p) => p.default_value.into_iter().collect(),
            NodeKind::Block(b) => b.statements.clone(),
            NodeKind::ExpressionStatement { expression } => vec![*expression],
            NodeKind::Return { expression } => expression.iter().copied().collect(),
            NodeKind::If {
                condition,
                then_branch,
                else_branch,
            } => [Some(*condition), Some(*then_branch), *else_branch]
                .into_iter()
                .flatten()
                .collect(),
            NodeKind::While { condition, body } => vec![*condition, *body],
            NodeKind::For {
                variable,
                collection,
                body,
            } => vec![*variable, *collection, *body],
            NodeKind::Declaration(d) => std::iter::once(d.target).chain(d.value).collect(),
            NodeKind::Binary(b) => vec![b.left, b.right],
            NodeKind::Variable(_) => Vec::new(),
            NodeKind::MethodCall(c) => c.receiver.iter().chain(&c.arguments).copied().collect(),
            NodeKind::PropertyAccess(p) => vec![p.receiver],
            NodeKind::ConstructorCall(c) => c.arguments.clone(),
            NodeKind::ClassRef(_) => Vec::new(),
            NodeKind::List { elements } => elements.clone(),
            NodeKind::Map { entries } => entries.clone(),
            NodeKind::MapEntry { key, value } => vec![*key, *value],
            NodeKind::Constant(_) => Vec::new(),
            NodeKind::GString { values, .. } => values.clone(),
            NodeKind::Closure(c) => c.parameters.iter().copied().chain([c.body]).collect(),
            NodeKind::Tuple { elements } => elements.clone(),
            NodeKind::Ternary {
                condition,
                then_value,
                else_value,
            } => vec![*condition, *then_value, *else_value],
            NodeKind::Cast { expression, .. } => vec![*expression],
        }
    }

    /// Short stable label, used in logs and hover text.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Module(_) => "module",
            NodeKind::Class(_) => "class",
            NodeKind::Method(m) if m.is_constructor => "constructor",
            NodeKind::Method(_) => "method",
            NodeKind::Field(_) => "field",
            NodeKind::Property(_) => "property",
            NodeKind::Import(_) => "import",
            NodeKind::Parameter(_) => "parameter",
            NodeKind::Block(_) => "block",
            NodeKind::ExpressionStatement { .. } => "expression_statement",
            NodeKind::Return { .. } => "return",
            NodeKind::If { .. } => "if",
            NodeKind::While { .. } => "while",
            NodeKind::For { .. } => "for",
            NodeKind::Declaration(_) => "declaration",
            NodeKind::Binary(_) => "binary",
            NodeKind::Variable(_) => "variable",
            NodeKind::MethodCall(_) => "method_call",
            NodeKind::PropertyAccess(_) => "property_access",
            NodeKind::ConstructorCall(_) => "constructor_call",
            NodeKind::ClassRef(_) => "class_ref",
            NodeKind::List { .. } => "list",
            NodeKind::Map { .. } => "map",
            NodeKind::MapEntry { .. } => "map_entry",
            NodeKind::Constant(_) => "constant",
            NodeKind::GString { .. } => "gstring",
            NodeKind::Closure(_) => "closure",
            NodeKind::Tuple { .. } => "tuple",
            NodeKind::Ternary { .. } => "ternary",
            NodeKind::Cast { .. } => "cast",
        }
    }

    /// Declared name for declaration-like nodes and references.
    pub fn name(&self) -> Option<&str> {
        match self {
            NodeKind::Class(c) => Some(&c.name),
            NodeKind::Method(m) => Some(&m.name),
            NodeKind::Field(f) => Some(&f.name),
            NodeKind::Property(p) => Some(&p.name),
            NodeKind::Import(i) => Some(i.visible_name()),
            NodeKind::Parameter(p) => Some(&p.name),
            NodeKind::Variable(v) => Some(&v.name),
            NodeKind::MethodCall(c) => Some(&c.name),
            NodeKind::PropertyAccess(p) => Some(&p.property),
            NodeKind::ConstructorCall(c) => Some(&c.type_name.name),
            NodeKind::ClassRef(c) => Some(&c.type_name.name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleNode {
    pub imports: Vec<NodeId>,
    pub classes: Vec<NodeId>,
    pub methods: Vec<NodeId>,
    pub statements: Vec<NodeId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ClassOrigin {
    #[default]
    Source,
    /// Loaded from bytecode or a decompiled stub.
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassMember {
    Linked(NodeId),
    Unlinked(LinkError),
}

impl ClassMember {
    pub fn node(&self) -> Option<NodeId> {
        match self {
            ClassMember::Linked(id) => Some(*id),
            ClassMember::Unlinked(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassNode {
    /// Fully qualified name.
    pub name: String,
    pub super_class: Option<TypeName>,
    pub interfaces: Vec<TypeName>,
    pub members: Vec<ClassMember>,
    pub origin: ClassOrigin,
}

impl ClassNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            super_class: None,
            interfaces: Vec::new(),
            members: Vec::new(),
            origin: ClassOrigin::Source,
        }
    }

    pub fn simple_name(&self) -> &str {
        self.name.rsplit('.').next().unwrap_or(&self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodNode {
    pub name: String,
    /// `None` for `def` methods.
    pub return_type: Option<TypeName>,
    pub parameters: Vec<NodeId>,
    pub body: Option<NodeId>,
    pub is_constructor: bool,
    pub is_static: bool,
}

impl MethodNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            return_type: None,
            parameters: Vec::new(),
            body: None,
            is_constructor: false,
            is_static: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNode {
    pub name: String,
    pub declared_type: Option<TypeName>,
    pub initializer: Option<NodeId>,
    pub is_static: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyNode {
    pub name: String,
    pub declared_type: Option<TypeName>,
    pub initializer: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportNode {
    /// Imported class, or package for star imports.
    pub target: String,
    pub alias: Option<String>,
    pub is_star: bool,
    pub is_static: bool,
}

impl ImportNode {
    pub fn class(target: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            alias: None,
            is_star: false,
            is_static: false,
        }
    }

    pub fn aliased(target: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            alias: Some(alias.into()),
            ..Self::class(target)
        }
    }

    /// Name under which the import is visible in the file: the alias, the
    /// simple class name, or the target itself for star imports.
    pub fn visible_name(&self) -> &str {
        if let Some(alias) = &self.alias {
            return alias;
        }
        if self.is_star {
            return &self.target;
        }
        self.target.rsplit('.').next().unwrap_or(&self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterNode {
    pub name: String,
    pub declared_type: Option<TypeName>,
    pub default_value: Option<NodeId>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockNode {
    pub statements: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclarationNode {
    /// A variable node, or a tuple for multi-target declarations.
    pub target: NodeId,
    pub value: Option<NodeId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// `<=>`
    Compare,
    And,
    Or,
    BitAnd,
    BitOr,
    BitXor,
    LeftShift,
    RightShift,
    UnsignedRightShift,
    Assign,
    AddAssign,
    SubtractAssign,
    MultiplyAssign,
    DivideAssign,
    ModuloAssign,
    In,
    InstanceOf,
    /// `=~`
    Find,
    /// `==~`
    Match,
    /// `a[b]`
    Subscript,
}

impl BinaryOp {
    const TOKENS: &'static [(&'static str, BinaryOp)] = &[
        ("+", BinaryOp::Add),
        ("-", BinaryOp::Subtract),
        ("*", BinaryOp::Multiply),
        ("/", BinaryOp::Divide),
        ("%", BinaryOp::Modulo),
        ("**", BinaryOp::Power),
        ("==", BinaryOp::Equal),
        ("!=", BinaryOp::NotEqual),
        ("<", BinaryOp::Less),
        ("<=", BinaryOp::LessEqual),
        (">", BinaryOp::Greater),
        (">=", BinaryOp::GreaterEqual),
        ("<=>", BinaryOp::Compare),
        ("&&", BinaryOp::And),
        ("||", BinaryOp::Or),
        ("&", BinaryOp::BitAnd),
        ("|", BinaryOp::BitOr),
        ("^", BinaryOp::BitXor),
        ("<<", BinaryOp::LeftShift),
        (">>", BinaryOp::RightShift),
        (">>>", BinaryOp::UnsignedRightShift),
        ("=", BinaryOp::Assign),
        ("+=", BinaryOp::AddAssign),
        ("-=", BinaryOp::SubtractAssign),
        ("*=", BinaryOp::MultiplyAssign),
        ("/=", BinaryOp::DivideAssign),
        ("%=", BinaryOp::ModuloAssign),
        ("in", BinaryOp::In),
        ("instanceof", BinaryOp::InstanceOf),
        ("=~", BinaryOp::Find),
        ("==~", BinaryOp::Match),
        ("[", BinaryOp::Subscript),
    ];

    pub fn from_token(token: &str) -> Option<Self> {
        Self::TOKENS
            .iter()
            .find(|(t, _)| *t == token)
            .map(|(_, op)| *op)
    }

    pub fn token(self) -> &'static str {
        Self::TOKENS
            .iter()
            .find(|(_, op)| *op == self)
            .map(|(t, _)| *t)
            .unwrap_or("?")
    }

    pub fn is_comparison(self) -> bool {
        matches!(
            self,
            BinaryOp::Equal
                | BinaryOp::NotEqual
                | BinaryOp::Less
                | BinaryOp::LessEqual
                | BinaryOp::Greater
                | BinaryOp::GreaterEqual
        )
    }

    pub fn is_logical(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }

    /// Arithmetic operator behind a compound assignment: `+=` -> `+`.
    pub fn compound_base(self) -> Option<BinaryOp> {
        match self {
            BinaryOp::AddAssign => Some(BinaryOp::Add),
            BinaryOp::SubtractAssign => Some(BinaryOp::Subtract),
            BinaryOp::MultiplyAssign => Some(BinaryOp::Multiply),
            BinaryOp::DivideAssign => Some(BinaryOp::Divide),
            BinaryOp::ModuloAssign => Some(BinaryOp::Modulo),
            _ => None,
        }
    }

    /// Whether the left operand is written to.
    pub fn is_assignment(self) -> bool {
        self == BinaryOp::Assign || self.compound_base().is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryNode {
    pub op: BinaryOp,
    pub left: NodeId,
    pub right: NodeId,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableNode {
    pub name: String,
    /// `None` for dynamically typed (`def`) variables and plain references.
    pub declared_type: Option<TypeName>,
    /// Declaring node as attached by the parser. A declaration's own
    /// left-hand side binds to itself.
    pub binding: Option<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodCallNode {
    /// `None` for implicit-this calls such as `println x`.
    pub receiver: Option<NodeId>,
    pub name: String,
    pub arguments: Vec<NodeId>,
    pub safe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyAccessNode {
    pub receiver: NodeId,
    pub property: String,
    pub safe: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructorCallNode {
    /// Type as written, possibly an import alias.
    pub type_name: TypeName,
    /// Class declared in the same document, when the parser linked it.
    pub class: Option<NodeId>,
    pub arguments: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRefNode {
    pub type_name: TypeName,
    pub class: Option<NodeId>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Int,
    Long,
    BigInteger,
    Float,
    Double,
    BigDecimal,
    String,
    Char,
    Boolean,
    Null,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstantNode {
    pub kind: LiteralKind,
    /// Source text of the literal.
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClosureNode {
    pub parameters: Vec<NodeId>,
    pub body: NodeId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary_op_tokens() {
        assert_eq!(BinaryOp::from_token("<=>"), Some(BinaryOp::Compare));
        assert_eq!(BinaryOp::from_token("==~"), Some(BinaryOp::Match));
        assert_eq!(BinaryOp::AddAssign.token(), "+=");
        assert_eq!(BinaryOp::from_token("?:"), None);
    }

    #[test]
    fn test_compound_assignment() {
        assert_eq!(BinaryOp::MultiplyAssign.compound_base(), Some(BinaryOp::Multiply));
        assert!(BinaryOp::ModuloAssign.is_assignment());
        assert!(BinaryOp::Assign.is_assignment());
        assert!(!BinaryOp::Equal.is_assignment());
    }

    #[test]
    fn test_import_visible_name() {
        assert_eq!(ImportNode::class("java.util.ArrayList").visible_name(), "ArrayList");
        assert_eq!(
            ImportNode::aliased("java.util.ArrayList", "AL").visible_name(),
            "AL"
        );
        let star = ImportNode {
            is_star: true,
            ..ImportNode::class("java.util")
        };
        assert_eq!(star.visible_name(), "java.util");
    }

    #[test]
    fn test_unlinked_members_are_not_children() {
        let class = NodeKind::Class(ClassNode {
            members: vec![
                ClassMember::Linked(NodeId::new(3)),
                ClassMember::Unlinked(LinkError::new("Foo", "bar", "missing type")),
            ],
            ..ClassNode::new("Foo")
        });
        assert_eq!(class.children(), vec![NodeId::new(3)]);
    }
}
