//! Semantic model for Groovy documents: position lookup, symbol
//! registration and resolution, and static type inference over trees
//! produced by an external front end.

pub mod config;
pub mod context;
pub mod coords;
pub mod error;
pub mod features;
pub mod inference;
pub mod logging;
pub mod position;
pub mod symbols;
pub mod workspace;

pub use config::GroveConfig;
pub use context::SemanticContext;
pub use error::{GroveError, Result};
pub use inference::TypeInferencer;
pub use position::{NodePriority, PositionIndex};
pub use symbols::{Declaration, DeclarationId, DeclarationKind, Resolution, SymbolTable};
pub use workspace::{DocumentState, Workspace};
