use crate::ast::{ClassMember, NodeKind};
use crate::document::DocumentId;
use crate::error::LinkError;
use crate::range::SourceRange;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of a node in its tree's arena.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    pub const fn index(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn from_index(index: usize) -> Self {
        Self(u32::try_from(index).unwrap_or(u32::MAX))
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    pub(crate) kind: NodeKind,
    pub(crate) range: SourceRange,
    pub(crate) parent: Option<NodeId>,
    pub(crate) depth: u32,
}

/// A finished, immutable tree for one document.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub(crate) document: DocumentId,
    pub(crate) nodes: Vec<SyntaxNode>,
    pub(crate) root: NodeId,
}

impl SyntaxTree {
    pub fn document(&self) -> &DocumentId {
        &self.document
    }

    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: self.root,
        }
    }

    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes in the arena, including unreachable ones.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the module has no content at all.
    pub fn is_empty(&self) -> bool {
        self.root().kind().children().is_empty()
    }

    /// Pre-order walk over every node reachable from the root.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            tree: self,
            stack: vec![self.root],
        }
    }
}

/// Borrowed handle to a node, in the spirit of `tree_sitter::Node`.
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t SyntaxTree,
    id: NodeId,
}

impl<'t> NodeRef<'t> {
    fn data(&self) -> &'t SyntaxNode {
        &self.tree.nodes[self.id.index()]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'t SyntaxTree {
        self.tree
    }

    pub fn kind(&self) -> &'t NodeKind {
        &self.data().kind
    }

    pub fn range(&self) -> SourceRange {
        self.data().range
    }

    /// Distance from the root; the root has depth zero.
    pub fn depth(&self) -> u32 {
        self.data().depth
    }

    pub fn name(&self) -> Option<&'t str> {
        self.kind().name()
    }

    pub fn parent(&self) -> Option<NodeRef<'t>> {
        self.data().parent.and_then(|p| self.tree.get(p))
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        self.kind()
            .children()
            .into_iter()
            .filter_map(move |id| tree.get(id))
    }

    /// Parent, grandparent, ... up to the root.
    pub fn ancestors(self) -> impl Iterator<Item = NodeRef<'t>> + 't {
        std::iter::successors(self.parent(), |n| n.parent())
    }

    /// Members of a class node. Links that failed are reported as errors so
    /// that callers can skip them; non-class nodes yield nothing.
    pub fn class_members(self) -> impl Iterator<Item = Result<NodeRef<'t>, &'t LinkError>> + 't {
        let tree = self.tree;
        let members: &'t [ClassMember] = match self.kind() {
            NodeKind::Class(class) => &class.members,
            _ => &[],
        };
        members.iter().filter_map(move |m| match m {
            ClassMember::Linked(id) => tree.get(*id).map(Ok),
            ClassMember::Unlinked(err) => Some(Err(err)),
        })
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", &self.kind().label())
            .field("range", &self.range())
            .finish()
    }
}

pub struct Descendants<'t> {
    tree: &'t SyntaxTree,
    stack: Vec<NodeId>,
}

impl<'t> Iterator for Descendants<'t> {
    type Item = NodeRef<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(id) = self.stack.pop() {
            let Some(node) = self.tree.get(id) else {
                continue;
            };
            let mut children = node.kind().children();
            children.reverse();
            self.stack.extend(children);
            return Some(node);
        }
        None
    }
}
