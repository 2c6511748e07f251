//! Immutable syntax tree consumed by the grove semantic model.
//!
//! Trees are produced by an external front end through [`TreeBuilder`] and
//! never mutated afterwards. Nodes live in a per-tree arena and refer to each
//! other through [`NodeId`] values, including the parser-supplied binding
//! from a variable reference to its declaring node.

pub mod ast;
pub mod builder;
pub mod document;
pub mod error;
pub mod range;
pub mod tree;
pub mod types;

pub use ast::*;
pub use builder::TreeBuilder;
pub use document::DocumentId;
pub use error::{LinkError, TreeError};
pub use range::{SourcePosition, SourceRange};
pub use tree::{Descendants, NodeId, NodeRef, SyntaxNode, SyntaxTree};
pub use types::TypeName;
