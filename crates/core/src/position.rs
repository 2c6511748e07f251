//! Position index: the most specific node at a cursor.
//!
//! Every reachable node whose range contains the position becomes a
//! candidate `(node, size, priority, depth)`; the candidates are reduced by a
//! total order. Smaller ranges win, then the higher [`NodePriority`], then the
//! deeper node, then the lower node id.

use crate::config::GroveConfig;
use crate::coords::{self, DEFAULT_MULTI_LINE_WEIGHT};
use grove_syntax::{NodeId, NodeKind, NodeRef, SyntaxTree};
use lsp_types::Position;
use std::cmp::Ordering;

/// Tie-break rank for nodes that project onto the same source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodePriority {
    Literal,
    Reference,
    Call,
    Declaration,
    Definition,
}

impl NodePriority {
    pub fn of(kind: &NodeKind) -> Self {
        match kind {
            NodeKind::Method(_)
            | NodeKind::Class(_)
            | NodeKind::Field(_)
            | NodeKind::Property(_)
            | NodeKind::Constant(_)
            | NodeKind::GString { .. } => NodePriority::Definition,
            NodeKind::Declaration(_) | NodeKind::Binary(_) => NodePriority::Declaration,
            NodeKind::MethodCall(_) => NodePriority::Call,
            NodeKind::Variable(_) => NodePriority::Reference,
            _ => NodePriority::Literal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candidate {
    id: NodeId,
    size: i64,
    priority: NodePriority,
    depth: u32,
}

impl Candidate {
    /// `Greater` means more specific.
    fn specificity(&self, other: &Self) -> Ordering {
        other
            .size
            .cmp(&self.size)
            .then(self.priority.cmp(&other.priority))
            .then(self.depth.cmp(&other.depth))
            .then(other.id.cmp(&self.id))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PositionIndex {
    multi_line_weight: i64,
}

impl Default for PositionIndex {
    fn default() -> Self {
        Self::new(DEFAULT_MULTI_LINE_WEIGHT)
    }
}

impl PositionIndex {
    pub fn new(multi_line_weight: i64) -> Self {
        Self { multi_line_weight }
    }

    pub fn from_config(config: &GroveConfig) -> Self {
        Self::new(config.multi_line_weight)
    }

    /// Most specific node containing the zero-based `(line, character)`.
    pub fn find_node_at(&self, tree: &SyntaxTree, line: u32, character: u32) -> Option<NodeId> {
        self.find_node_ref_at(tree, Position::new(line, character))
            .map(|n| n.id())
    }

    pub fn find_node_ref_at<'t>(
        &self,
        tree: &'t SyntaxTree,
        position: Position,
    ) -> Option<NodeRef<'t>> {
        if tree.is_empty() {
            return None;
        }
        let best = self
            .candidates(tree, position)
            .max_by(|a, b| a.specificity(b))?;
        tree.get(best.id)
    }

    /// All nodes containing the position, most specific first.
    pub fn nodes_at(&self, tree: &SyntaxTree, line: u32, character: u32) -> Vec<NodeId> {
        let mut candidates: Vec<Candidate> = self
            .candidates(tree, Position::new(line, character))
            .collect();
        candidates.sort_by(|a, b| b.specificity(a));
        candidates.into_iter().map(|c| c.id).collect()
    }

    fn candidates<'t>(
        &self,
        tree: &'t SyntaxTree,
        position: Position,
    ) -> impl Iterator<Item = Candidate> + 't {
        let weight = self.multi_line_weight;
        tree.descendants()
            .filter(move |node| coords::contains(node.range(), position))
            .map(move |node| Candidate {
                id: node.id(),
                size: coords::range_size(node.range(), weight),
                priority: NodePriority::of(node.kind()),
                depth: node.depth(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grove_syntax::{
        BinaryOp, DocumentId, LiteralKind, ModuleNode, SourceRange, TreeBuilder,
    };

    fn r(sl: u32, sc: u32, el: u32, ec: u32) -> SourceRange {
        SourceRange::new(sl, sc, el, ec)
    }

    fn builder() -> TreeBuilder {
        TreeBuilder::new(DocumentId::parse("file:///pos.groovy").unwrap())
    }

    #[test]
    fn test_priority_order() {
        assert!(NodePriority::Definition > NodePriority::Declaration);
        assert!(NodePriority::Declaration > NodePriority::Call);
        assert!(NodePriority::Call > NodePriority::Reference);
        assert!(NodePriority::Reference > NodePriority::Literal);
    }

    #[test]
    fn test_smallest_node_wins() {
        // x = y + 1
        let mut b = builder();
        let x = b.variable("x", r(1, 1, 1, 2));
        let y = b.variable("y", r(1, 5, 1, 6));
        let one = b.constant(LiteralKind::Int, "1", r(1, 9, 1, 10));
        let sum = b.binary(BinaryOp::Add, y, one, r(1, 5, 1, 10));
        let assign = b.binary(BinaryOp::Assign, x, sum, r(1, 1, 1, 10));
        let stmt = b.statement(assign, r(1, 1, 1, 10));
        let root = b.module(
            ModuleNode {
                statements: vec![stmt],
                ..Default::default()
            },
            r(1, 1, 1, 10),
        );
        let tree = b.finish(root).unwrap();
        let index = PositionIndex::default();

        assert_eq!(index.find_node_at(&tree, 0, 4), Some(y));
        assert_eq!(index.find_node_at(&tree, 0, 8), Some(one));
        // Between `y` and `+`: only the sum and its ancestors cover it.
        assert_eq!(index.find_node_at(&tree, 0, 6), Some(sum));
        // Statement and assignment share a range: the binary expression wins.
        assert_eq!(index.find_node_at(&tree, 0, 2), Some(assign));
        assert_eq!(index.find_node_at(&tree, 3, 0), None);
    }

    #[test]
    fn test_invalid_ranges_are_skipped() {
        let mut b = builder();
        let broken = b.variable("broken", r(2, 9, 2, 3));
        let synthetic = b.variable("synthetic", SourceRange::synthetic());
        let root = b.module(
            ModuleNode {
                statements: vec![broken, synthetic],
                ..Default::default()
            },
            SourceRange::synthetic(),
        );
        let tree = b.finish(root).unwrap();
        let index = PositionIndex::default();
        assert_eq!(index.find_node_at(&tree, 1, 4), None);
        assert!(index.nodes_at(&tree, 1, 4).is_empty());
    }

    #[test]
    fn test_nodes_at_orders_most_specific_first() {
        let mut b = builder();
        let x = b.variable("x", r(1, 1, 1, 2));
        let stmt = b.statement(x, r(1, 1, 1, 2));
        let block = b.block(vec![stmt], r(1, 1, 1, 2));
        let root = b.module(
            ModuleNode {
                statements: vec![block],
                ..Default::default()
            },
            r(1, 1, 1, 2),
        );
        let tree = b.finish(root).unwrap();
        let ids = PositionIndex::default().nodes_at(&tree, 0, 0);
        // Same range everywhere: the reference outranks the rest, then depth.
        assert_eq!(ids, vec![x, stmt, block, root]);
    }

    #[test]
    fn test_empty_tree_has_no_node() {
        let mut b = builder();
        let root = b.module(ModuleNode::default(), r(1, 1, 1, 1));
        let tree = b.finish(root).unwrap();
        assert!(tree.is_empty());
        assert_eq!(PositionIndex::default().find_node_at(&tree, 0, 0), None);
    }
}
