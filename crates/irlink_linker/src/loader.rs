//! Driving a metadata deserializer over a finished index.

use crate::index::DependencyIndex;
use irlink_core::{DeclId, ModuleId, NamespaceId};
use irlink_diagnostics::Result;
use tracing::{debug, info};

/// Reads the bodies of external declarations from a module's metadata.
pub trait MetadataDeserializer {
    /// Materialize `declarations` from one package fragment of `module`.
    /// Returns how many declarations were actually loaded.
    fn load_package(
        &mut self,
        module: ModuleId,
        namespace: NamespaceId,
        declarations: &[DeclId],
    ) -> Result<usize>;
}

impl<F> MetadataDeserializer for F
where
    F: FnMut(ModuleId, NamespaceId, &[DeclId]) -> Result<usize>,
{
    fn load_package(
        &mut self,
        module: ModuleId,
        namespace: NamespaceId,
        declarations: &[DeclId],
    ) -> Result<usize> {
        self(module, namespace, declarations)
    }
}

/// Totals of one [`load_dependencies`] run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub modules: usize,
    pub namespaces: usize,
    pub declarations: usize,
}

/// Hand every touched package fragment to `deserializer`, module by module
/// in index order. The first error stops the walk.
pub fn load_dependencies<D>(index: &DependencyIndex, deserializer: &mut D) -> Result<LoadReport>
where
    D: MetadataDeserializer + ?Sized,
{
    let mut report = LoadReport::default();
    for &module in index.dependency_modules() {
        report.modules += 1;
        for &namespace in index.package_fragments_of(module) {
            let declarations = index.top_level_declarations_of(namespace);
            let loaded = deserializer.load_package(module, namespace, declarations)?;
            debug!(%module, %namespace, requested = declarations.len(), loaded, "package loaded");
            report.namespaces += 1;
            report.declarations += loaded;
        }
    }
    info!(
        modules = report.modules,
        namespaces = report.namespaces,
        declarations = report.declarations,
        "dependencies loaded"
    );
    Ok(report)
}
