//! Editor-facing queries built on the semantic model.

pub mod hover;
pub mod navigation;

pub use hover::HoverEngine;
pub use navigation::NavigationEngine;
