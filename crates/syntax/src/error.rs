use crate::tree::NodeId;
use thiserror::Error;

/// Structural problems detected while finishing a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("node {child} referenced by {parent} does not exist")]
    UnknownNode { parent: NodeId, child: NodeId },
    #[error("node {0} has more than one parent")]
    SharedChild(NodeId),
    #[error("binding on {node} points to missing node {target}")]
    DanglingBinding { node: NodeId, target: NodeId },
    #[error("root {0} is not a module node")]
    RootNotModule(NodeId),
    #[error("root {0} is referenced as a child of another node")]
    RootHasParent(NodeId),
    #[error("node {0} is part of a parent cycle")]
    Cycle(NodeId),
}

/// A class member that could not be linked, typically because a binary
/// class refers to a type missing from the classpath.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot link member `{member}` of `{owner}`: {reason}")]
pub struct LinkError {
    pub owner: String,
    pub member: String,
    pub reason: String,
}

impl LinkError {
    pub fn new(
        owner: impl Into<String>,
        member: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            owner: owner.into(),
            member: member.into(),
            reason: reason.into(),
        }
    }
}
