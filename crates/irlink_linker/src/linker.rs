//! Linker orchestration: options, collection, exclusion, loading.

use crate::collector::DependenciesCollector;
use crate::index::DependencyIndex;
use crate::loader::{load_dependencies, LoadReport, MetadataDeserializer};
use irlink_descriptors::DeclarationResolver;
use irlink_diagnostics::Result;
use irlink_options::LinkOptions;
use irlink_symbols::SymbolTable;
use tracing::{debug, instrument};

/// Entry point for dependency collection of one linking unit.
///
/// A `Linker` holds no per-unit state; each call to [`Linker::collect`]
/// uses a fresh collector, so units linked in parallel only need their own
/// symbol tables.
#[derive(Debug, Clone, Default)]
pub struct Linker {
    options: LinkOptions,
}

impl Linker {
    pub fn new(options: LinkOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LinkOptions {
        &self.options
    }

    /// Expand the unbound symbols of `table` and index their top-level
    /// owners, leaving out modules listed in `excludedModules`.
    #[instrument(skip_all)]
    pub fn collect<R>(&self, table: &mut SymbolTable, resolver: &R) -> Result<DependencyIndex>
    where
        R: DeclarationResolver + ?Sized,
    {
        let mut collector = DependenciesCollector::with_options(resolver, &self.options);
        collector.collect(table)?;
        let mut index = collector.into_index();

        if !self.options.excluded_modules().is_empty() {
            for module in index.dependency_modules().to_vec() {
                let name = resolver.module_name(module);
                if self.options.is_excluded(&name) {
                    debug!(module = %name, "excluded module dropped from index");
                    index.remove_module(module);
                }
            }
        }
        Ok(index)
    }

    /// Collect, then feed every touched package fragment to `deserializer`.
    pub fn link<R, D>(
        &self,
        table: &mut SymbolTable,
        resolver: &R,
        deserializer: &mut D,
    ) -> Result<LoadReport>
    where
        R: DeclarationResolver + ?Sized,
        D: MetadataDeserializer + ?Sized,
    {
        let index = self.collect(table, resolver)?;
        load_dependencies(&index, deserializer)
    }
}
