//! Bottom-up construction of syntax trees.
//!
//! Front ends create leaves first and then the nodes that own them; parent
//! links, depths and declaration self-bindings are computed once by
//! [`TreeBuilder::finish`].

use crate::ast::*;
use crate::document::DocumentId;
use crate::error::TreeError;
use crate::range::SourceRange;
use crate::tree::{NodeId, SyntaxNode, SyntaxTree};
use crate::types::TypeName;

pub struct TreeBuilder {
    document: DocumentId,
    nodes: Vec<(NodeKind, SourceRange)>,
}

impl TreeBuilder {
    pub fn new(document: DocumentId) -> Self {
        Self {
            document,
            nodes: Vec::new(),
        }
    }

    pub fn add(&mut self, kind: NodeKind, range: SourceRange) -> NodeId {
        let id = NodeId::from_index(self.nodes.len());
        self.nodes.push((kind, range));
        id
    }

    // --- Convenience constructors ---

    pub fn constant(&mut self, kind: LiteralKind, text: &str, range: SourceRange) -> NodeId {
        self.add(
            NodeKind::Constant(ConstantNode {
                kind,
                text: text.to_string(),
            }),
            range,
        )
    }

    /// A variable that is declared (or referenced) without a type.
    pub fn variable(&mut self, name: &str, range: SourceRange) -> NodeId {
        self.add(
            NodeKind::Variable(VariableNode {
                name: name.to_string(),
                declared_type: None,
                binding: None,
            }),
            range,
        )
    }

    pub fn typed_variable(&mut self, name: &str, ty: TypeName, range: SourceRange) -> NodeId {
        self.add(
            NodeKind::Variable(VariableNode {
                name: name.to_string(),
                declared_type: Some(ty),
                binding: None,
            }),
            range,
        )
    }

    /// A variable reference bound to its declaring node by the parser.
    pub fn reference(&mut self, name: &str, binding: Option<NodeId>, range: SourceRange) -> NodeId {
        self.add(
            NodeKind::Variable(VariableNode {
                name: name.to_string(),
                declared_type: None,
                binding,
            }),
            range,
        )
    }

    pub fn declaration(
        &mut self,
        target: NodeId,
        value: Option<NodeId>,
        range: SourceRange,
    ) -> NodeId {
        self.add(NodeKind::Declaration(DeclarationNode { target, value }), range)
    }

    pub fn binary(
        &mut self,
        op: BinaryOp,
        left: NodeId,
        right: NodeId,
        range: SourceRange,
    ) -> NodeId {
        self.add(NodeKind::Binary(BinaryNode { op, left, right }), range)
    }

    pub fn method_call(
        &mut self,
        receiver: Option<NodeId>,
        name: &str,
        arguments: Vec<NodeId>,
        range: SourceRange,
    ) -> NodeId {
        self.add(
            NodeKind::MethodCall(MethodCallNode {
                receiver,
                name: name.to_string(),
                arguments,
                safe: false,
            }),
            range,
        )
    }

    pub fn property_access(
        &mut self,
        receiver: NodeId,
        property: &str,
        range: SourceRange,
    ) -> NodeId {
        self.add(
            NodeKind::PropertyAccess(PropertyAccessNode {
                receiver,
                property: property.to_string(),
                safe: false,
            }),
            range,
        )
    }

    pub fn constructor_call(
        &mut self,
        type_name: TypeName,
        class: Option<NodeId>,
        arguments: Vec<NodeId>,
        range: SourceRange,
    ) -> NodeId {
        self.add(
            NodeKind::ConstructorCall(ConstructorCallNode {
                type_name,
                class,
                arguments,
            }),
            range,
        )
    }

    pub fn class_ref(
        &mut self,
        type_name: TypeName,
        class: Option<NodeId>,
        range: SourceRange,
    ) -> NodeId {
        self.add(NodeKind::ClassRef(ClassRefNode { type_name, class }), range)
    }

    pub fn list(&mut self, elements: Vec<NodeId>, range: SourceRange) -> NodeId {
        self.add(NodeKind::List { elements }, range)
    }

    pub fn map(&mut self, entries: Vec<NodeId>, range: SourceRange) -> NodeId {
        self.add(NodeKind::Map { entries }, range)
    }

    pub fn map_entry(&mut self, key: NodeId, value: NodeId, range: SourceRange) -> NodeId {
        self.add(NodeKind::MapEntry { key, value }, range)
    }

    pub fn statement(&mut self, expression: NodeId, range: SourceRange) -> NodeId {
        self.add(NodeKind::ExpressionStatement { expression }, range)
    }

    pub fn block(&mut self, statements: Vec<NodeId>, range: SourceRange) -> NodeId {
        self.add(NodeKind::Block(BlockNode { statements }), range)
    }

    pub fn parameter(
        &mut self,
        name: &str,
        declared_type: Option<TypeName>,
        range: SourceRange,
    ) -> NodeId {
        self.add(
            NodeKind::Parameter(ParameterNode {
                name: name.to_string(),
                declared_type,
                default_value: None,
            }),
            range,
        )
    }

    pub fn closure(&mut self, parameters: Vec<NodeId>, body: NodeId, range: SourceRange) -> NodeId {
        self.add(NodeKind::Closure(ClosureNode { parameters, body }), range)
    }

    pub fn method(&mut self, method: MethodNode, range: SourceRange) -> NodeId {
        self.add(NodeKind::Method(method), range)
    }

    pub fn field(
        &mut self,
        name: &str,
        declared_type: Option<TypeName>,
        initializer: Option<NodeId>,
        range: SourceRange,
    ) -> NodeId {
        self.add(
            NodeKind::Field(FieldNode {
                name: name.to_string(),
                declared_type,
                initializer,
                is_static: false,
            }),
            range,
        )
    }

    pub fn property(
        &mut self,
        name: &str,
        declared_type: Option<TypeName>,
        initializer: Option<NodeId>,
        range: SourceRange,
    ) -> NodeId {
        self.add(
            NodeKind::Property(PropertyNode {
                name: name.to_string(),
                declared_type,
                initializer,
            }),
            range,
        )
    }

    pub fn class(&mut self, class: ClassNode, range: SourceRange) -> NodeId {
        self.add(NodeKind::Class(class), range)
    }

    pub fn import(&mut self, import: ImportNode, range: SourceRange) -> NodeId {
        self.add(NodeKind::Import(import), range)
    }

    pub fn module(&mut self, module: ModuleNode, range: SourceRange) -> NodeId {
        self.add(NodeKind::Module(module), range)
    }

    /// Validates the arena and freezes it into a [`SyntaxTree`].
    pub fn finish(self, root: NodeId) -> Result<SyntaxTree, TreeError> {
        let TreeBuilder {
            document,
            nodes: mut raw,
        } = self;
        let len = raw.len();

        match raw.get(root.index()) {
            Some((NodeKind::Module(_), _)) => {}
            _ => return Err(TreeError::RootNotModule(root)),
        }

        let mut parents: Vec<Option<NodeId>> = vec![None; len];
        for (index, (kind, _)) in raw.iter().enumerate() {
            let parent = NodeId::from_index(index);
            for child in kind.children() {
                if child.index() >= len {
                    return Err(TreeError::UnknownNode { parent, child });
                }
                if child == root {
                    return Err(TreeError::RootHasParent(root));
                }
                if parents[child.index()].is_some() {
                    return Err(TreeError::SharedChild(child));
                }
                parents[child.index()] = Some(parent);
            }
        }

        for (index, (kind, _)) in raw.iter().enumerate() {
            let node = NodeId::from_index(index);
            let target = match kind {
                NodeKind::Variable(v) => v.binding,
                NodeKind::ConstructorCall(c) => c.class,
                NodeKind::ClassRef(c) => c.class,
                _ => None,
            };
            if let Some(target) = target {
                if target.index() >= len {
                    return Err(TreeError::DanglingBinding { node, target });
                }
            }
        }

        // A declaration's left-hand side is its own binding.
        let self_bound: Vec<NodeId> = raw
            .iter()
            .filter_map(|(kind, _)| match kind {
                NodeKind::Declaration(d) => Some(d.target),
                _ => None,
            })
            .collect();
        for target in self_bound {
            if let (NodeKind::Variable(v), _) = &mut raw[target.index()] {
                if v.binding.is_none() {
                    v.binding = Some(target);
                }
            }
        }

        let mut depths = vec![0u32; len];
        let mut reached = vec![false; len];
        reached[root.index()] = true;
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let depth = depths[id.index()];
            for child in raw[id.index()].0.children() {
                depths[child.index()] = depth + 1;
                reached[child.index()] = true;
                stack.push(child);
            }
        }

        // Detached subtrees are tolerated, but their parent chains must end.
        for index in (0..len).filter(|&i| !reached[i]) {
            let mut current = parents[index];
            let mut steps = 0;
            while let Some(parent) = current {
                steps += 1;
                if steps > len {
                    return Err(TreeError::Cycle(NodeId::from_index(index)));
                }
                current = parents[parent.index()];
            }
        }

        let nodes = raw
            .into_iter()
            .zip(parents)
            .zip(depths)
            .map(|(((kind, range), parent), depth)| SyntaxNode {
                kind,
                range,
                parent,
                depth,
            })
            .collect();

        Ok(SyntaxTree {
            document,
            nodes,
            root,
        })
    }
}
