//! irlink_linker: Dependency collection for the IR linking phase.
//!
//! Given the symbols a linking unit still has unbound, works out the full
//! set of external declarations that must be loaded (adding overridden
//! functions and supertypes) and groups them module -> namespace ->
//! top-level declaration, so each module's metadata can be read lazily.
//!
//! The usual entry point is [`Linker`]; [`DependenciesCollector`] exposes
//! the individual phases.

mod collector;
mod index;
mod linker;
mod loader;

pub use collector::DependenciesCollector;
pub use index::DependencyIndex;
pub use linker::Linker;
pub use loader::{load_dependencies, LoadReport, MetadataDeserializer};

pub use irlink_diagnostics::{LinkError, Result};
