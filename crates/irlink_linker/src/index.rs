//! The module -> namespace -> top-level declaration index.

use irlink_core::{DeclId, ModuleId, NamespaceId, OrderedGroups, OrderedSet};
use rustc_hash::FxHashMap;

/// External top-level declarations a linking unit depends on, grouped by
/// module and package fragment.
///
/// All three levels keep first-seen order and hold no duplicates. A
/// namespace is only ever listed under one module.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    modules: OrderedSet<ModuleId>,
    fragments: OrderedGroups<ModuleId, NamespaceId>,
    declarations: OrderedGroups<NamespaceId, DeclId>,
    owners: FxHashMap<NamespaceId, ModuleId>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a top-level declaration.
    ///
    /// Returns `Ok(true)` if the declaration was new, `Ok(false)` if it was
    /// already indexed, and `Err(owner)` without touching the index if the
    /// namespace was previously registered under a different module.
    pub(crate) fn insert(
        &mut self,
        module: ModuleId,
        namespace: NamespaceId,
        decl: DeclId,
    ) -> std::result::Result<bool, ModuleId> {
        match self.owners.get(&namespace) {
            Some(&owner) if owner != module => return Err(owner),
            Some(_) => {}
            None => {
                self.owners.insert(namespace, module);
            }
        }
        self.modules.insert(module);
        self.fragments.insert(module, namespace);
        Ok(self.declarations.insert(namespace, decl))
    }

    /// Drop a module together with all of its namespaces and declarations.
    pub(crate) fn remove_module(&mut self, module: ModuleId) -> bool {
        if !self.modules.remove(&module) {
            return false;
        }
        if let Some(namespaces) = self.fragments.remove_group(&module) {
            for namespace in namespaces.iter() {
                self.declarations.remove_group(namespace);
                self.owners.remove(namespace);
            }
        }
        true
    }

    /// Every module that contributes at least one declaration.
    pub fn dependency_modules(&self) -> &[ModuleId] {
        self.modules.as_slice()
    }

    /// Package fragments of `module` that contribute declarations. Empty if
    /// the module was never touched.
    pub fn package_fragments_of(&self, module: ModuleId) -> &[NamespaceId] {
        self.fragments.get(&module)
    }

    /// Top-level declarations needed from `namespace`. Empty if the
    /// namespace was never touched.
    pub fn top_level_declarations_of(&self, namespace: NamespaceId) -> &[DeclId] {
        self.declarations.get(&namespace)
    }

    /// The module a registered namespace was filed under.
    pub fn module_of(&self, namespace: NamespaceId) -> Option<ModuleId> {
        self.owners.get(&namespace).copied()
    }

    pub fn contains(&self, namespace: NamespaceId, decl: DeclId) -> bool {
        self.top_level_declarations_of(namespace).contains(&decl)
    }

    /// Walk the index in order as `(module, namespace, declarations)`.
    pub fn iter(&self) -> impl Iterator<Item = (ModuleId, NamespaceId, &[DeclId])> + '_ {
        self.modules.iter().flat_map(move |&module| {
            self.package_fragments_of(module)
                .iter()
                .map(move |&namespace| (module, namespace, self.top_level_declarations_of(namespace)))
        })
    }

    /// Number of indexed top-level declarations.
    pub fn len(&self) -> usize {
        self.declarations.member_count()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_untouched_keys_are_empty() {
        let index = DependencyIndex::new();
        assert!(index.is_empty());
        assert!(index.package_fragments_of(ModuleId(0)).is_empty());
        assert!(index.top_level_declarations_of(NamespaceId(0)).is_empty());
        assert_eq!(index.module_of(NamespaceId(0)), None);
    }

    #[test]
    fn test_grouping_keeps_first_seen_order() {
        let mut index = DependencyIndex::new();
        index.insert(ModuleId(1), NamespaceId(10), DeclId(100)).unwrap();
        index.insert(ModuleId(0), NamespaceId(20), DeclId(200)).unwrap();
        index.insert(ModuleId(1), NamespaceId(11), DeclId(101)).unwrap();
        index.insert(ModuleId(1), NamespaceId(10), DeclId(102)).unwrap();
        assert_eq!(index.insert(ModuleId(1), NamespaceId(10), DeclId(100)), Ok(false));

        assert_eq!(index.dependency_modules(), &[ModuleId(1), ModuleId(0)]);
        assert_eq!(index.package_fragments_of(ModuleId(1)), &[NamespaceId(10), NamespaceId(11)]);
        assert_eq!(index.top_level_declarations_of(NamespaceId(10)), &[DeclId(100), DeclId(102)]);
        assert_eq!(index.len(), 4);
    }

    #[test]
    fn test_namespace_cannot_move_between_modules() {
        let mut index = DependencyIndex::new();
        index.insert(ModuleId(0), NamespaceId(5), DeclId(1)).unwrap();
        assert_eq!(index.insert(ModuleId(1), NamespaceId(5), DeclId(2)), Err(ModuleId(0)));
        assert_eq!(index.dependency_modules(), &[ModuleId(0)]);
        assert!(!index.contains(NamespaceId(5), DeclId(2)));
    }

    #[test]
    fn test_remove_module() {
        let mut index = DependencyIndex::new();
        index.insert(ModuleId(0), NamespaceId(1), DeclId(1)).unwrap();
        index.insert(ModuleId(2), NamespaceId(3), DeclId(4)).unwrap();

        assert!(index.remove_module(ModuleId(0)));
        assert!(!index.remove_module(ModuleId(0)));
        assert_eq!(index.dependency_modules(), &[ModuleId(2)]);
        assert!(index.top_level_declarations_of(NamespaceId(1)).is_empty());
        assert_eq!(index.module_of(NamespaceId(1)), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_iter_flattens_in_order() {
        let mut index = DependencyIndex::new();
        index.insert(ModuleId(0), NamespaceId(0), DeclId(0)).unwrap();
        index.insert(ModuleId(0), NamespaceId(1), DeclId(1)).unwrap();
        index.insert(ModuleId(1), NamespaceId(2), DeclId(2)).unwrap();

        let walked: Vec<_> = index.iter().map(|(m, ns, decls)| (m, ns, decls.to_vec())).collect();
        assert_eq!(
            walked,
            vec![
                (ModuleId(0), NamespaceId(0), vec![DeclId(0)]),
                (ModuleId(0), NamespaceId(1), vec![DeclId(1)]),
                (ModuleId(1), NamespaceId(2), vec![DeclId(2)]),
            ]
        );
    }
}
