//! irlink_core: Core utilities shared by the IR linker crates.
//!
//! Provides stable identifiers, name interning, and the insertion-ordered
//! collections the dependency index is built from.

pub mod collections;
pub mod ids;
pub mod intern;

// Re-export commonly used types
pub use collections::{OrderedGroups, OrderedSet};
pub use ids::{DeclId, ModuleId, NamespaceId};
pub use intern::{Name, NameInterner};
