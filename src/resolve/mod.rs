//! Node resolution module
//!
//! Turns raw element handles into semantically meaningful component
//! nodes by combining host-page queries with framework introspection.

pub mod node;
pub mod walker;

pub use node::{ComponentNode, NodeKind, ParentInfo, KEY_COMPUTED_STYLES};
pub use walker::ComponentWalker;
