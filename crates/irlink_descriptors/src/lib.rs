//! irlink_descriptors: Resolved declaration descriptions.
//!
//! The linker never resolves anything itself. It asks a
//! [`DeclarationResolver`] for the semantic shape of a declaration: what it
//! is, where it lives, what it overrides, and what it inherits from.
//! [`DescriptorStore`] is an in-memory resolver over explicitly built
//! modules, namespaces and declarations.

mod resolver;
mod store;
mod types;

pub use resolver::{DeclarationResolver, SuperClassifiers};
pub use store::{DeclarationBuilder, DescriptorStore};
pub use types::{ClassKind, Container, DeclFlags, DeclKind, Declaration, Module, Namespace};
