//! Closure expansion and top-level indexing over the unbound symbols.
//!
//! Phases run in a fixed order, each consuming the previous one's output:
//!
//! 1. local-symbol check: type/value parameters and locals must be bound;
//! 2. override expansion: every function transitively overridden by an
//!    unbound function becomes needed;
//! 3. supertype expansion: every class ancestor of an unbound class
//!    becomes needed;
//! 4. indexing: each unbound symbol is mapped to its top-level owner and
//!    filed under namespace and module.
//!
//! Both expansions walk a snapshot of the unbound set and collect their
//! discoveries separately; the table is only written once a pass is done.

use crate::index::DependencyIndex;
use irlink_core::{DeclId, ModuleId, NamespaceId, OrderedSet};
use irlink_descriptors::{Container, DeclarationResolver, Declaration};
use irlink_diagnostics::{LinkError, Result, SymbolRef};
use irlink_options::{LinkOptions, DEFAULT_MAX_CONTAINMENT_DEPTH};
use irlink_symbols::{SymbolKind, SymbolTable};
use rustc_hash::FxHashSet;
use tracing::{debug, info, instrument, trace};

/// What the immediate container of a declaration turned out to be.
enum ContainerShape<'a> {
    Namespace(NamespaceId),
    Class(&'a Declaration),
    Module(ModuleId),
    Other(&'a Declaration),
}

/// Single-use collector of a linking unit's external dependencies.
pub struct DependenciesCollector<'r, R: ?Sized> {
    resolver: &'r R,
    max_containment_depth: u32,
    record_skipped: bool,
    index: DependencyIndex,
    skipped_accessors: Vec<DeclId>,
}

impl<'r, R: DeclarationResolver + ?Sized> DependenciesCollector<'r, R> {
    pub fn new(resolver: &'r R) -> Self {
        Self {
            resolver,
            max_containment_depth: DEFAULT_MAX_CONTAINMENT_DEPTH,
            record_skipped: true,
            index: DependencyIndex::new(),
            skipped_accessors: Vec::new(),
        }
    }

    pub fn with_options(resolver: &'r R, options: &LinkOptions) -> Self {
        Self {
            max_containment_depth: options.max_containment_depth(),
            record_skipped: options.record_skipped_accessors(),
            ..Self::new(resolver)
        }
    }

    /// Run every phase against `table`.
    ///
    /// On error the table may already contain symbols added by the
    /// expansion phases, except for a failed local-symbol check, which
    /// happens before anything is touched.
    #[instrument(skip_all, fields(unbound = table.unbound_count()))]
    pub fn collect(&mut self, table: &mut SymbolTable) -> Result<()> {
        self.check_local_symbols_bound(table)?;
        let functions = self.expand_overridden_functions(table)?;
        let classes = self.expand_super_classes(table)?;
        self.index_top_level_declarations(table)?;
        info!(
            added_functions = functions,
            added_classes = classes,
            modules = self.index.dependency_modules().len(),
            declarations = self.index.len(),
            skipped = self.skipped_accessors.len(),
            "dependencies collected"
        );
        Ok(())
    }

    /// Fail if any type parameter, value parameter or local variable is
    /// still unbound. Read-only.
    pub fn check_local_symbols_bound(&self, table: &SymbolTable) -> Result<()> {
        let offending: Vec<SymbolRef> = SymbolKind::LOCAL
            .iter()
            .flat_map(|&kind| table.unbound_symbols(kind))
            .map(|symbol| {
                SymbolRef::new(
                    symbol.kind.describe(),
                    symbol.decl,
                    self.resolver.qualified_name(symbol.decl),
                )
            })
            .collect();
        if offending.is_empty() {
            Ok(())
        } else {
            Err(LinkError::UnboundLocalSymbols { symbols: offending })
        }
    }

    /// Declare every function transitively overridden by an unbound
    /// function as needed. Returns how many symbols were added.
    pub fn expand_overridden_functions(&self, table: &mut SymbolTable) -> Result<usize> {
        let roots = table.unbound(SymbolKind::Function).snapshot();
        let mut newly_needed = OrderedSet::new();
        for root in roots {
            let mut visited = FxHashSet::default();
            visited.insert(root);
            self.visit_overridden(root, &mut visited, &mut newly_needed)?;
        }
        Ok(merge(table, SymbolKind::Function, &newly_needed))
    }

    fn visit_overridden(
        &self,
        function: DeclId,
        visited: &mut FxHashSet<DeclId>,
        newly_needed: &mut OrderedSet<DeclId>,
    ) -> Result<()> {
        for &overridden in self.resolver.overridden(function)? {
            if !visited.insert(overridden) {
                continue;
            }
            trace!(%function, %overridden, "overridden function reached");
            newly_needed.insert(overridden);
            self.visit_overridden(overridden, visited, newly_needed)?;
        }
        Ok(())
    }

    /// Declare every class-like ancestor of an unbound class as needed.
    /// Returns how many symbols were added.
    pub fn expand_super_classes(&self, table: &mut SymbolTable) -> Result<usize> {
        let roots = table.unbound(SymbolKind::Class).snapshot();
        let mut newly_needed = OrderedSet::new();
        for root in roots {
            for supertype in self.resolver.super_classifiers(root)? {
                let supertype = supertype?;
                if self.resolver.declaration(supertype)?.kind.is_class() {
                    trace!(class = %root, %supertype, "supertype reached");
                    newly_needed.insert(supertype);
                }
            }
        }
        Ok(merge(table, SymbolKind::Class, &newly_needed))
    }

    /// File the top-level owner of every unbound external symbol.
    pub fn index_top_level_declarations(&mut self, table: &SymbolTable) -> Result<()> {
        for kind in SymbolKind::EXTERNAL {
            for &decl in table.unbound(kind) {
                match self.top_level_owner(kind, decl)? {
                    Some((owner, namespace)) => self.register(owner, namespace)?,
                    None => {
                        if self.record_skipped {
                            self.skipped_accessors.push(decl);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Follow enclosing classes up to the declaration a namespace owns.
    /// `None` means the symbol is deliberately left out of the index.
    fn top_level_owner(&self, kind: SymbolKind, decl: DeclId) -> Result<Option<(DeclId, NamespaceId)>> {
        let mut current = self.resolver.declaration(decl)?;
        let mut depth = 0;
        loop {
            match self.classify_container(current)? {
                ContainerShape::Namespace(namespace) => return Ok(Some((current.id, namespace))),
                ContainerShape::Class(parent) => {
                    depth += 1;
                    if depth > self.max_containment_depth {
                        return Err(LinkError::ContainmentTooDeep {
                            symbol: self.symbol_ref(kind, decl),
                            limit: self.max_containment_depth,
                        });
                    }
                    current = parent;
                }
                // Interop accessors are synthesized straight into the module.
                // They should map to the class of their extension receiver,
                // which is not tracked here; they are left out of the index.
                ContainerShape::Module(module) if current.is_synthesized_accessor() => {
                    debug!(
                        accessor = %self.resolver.qualified_name(current.id),
                        module = %self.resolver.module_name(module),
                        "synthesized accessor skipped"
                    );
                    return Ok(None);
                }
                ContainerShape::Module(module) => {
                    return Err(LinkError::UnexpectedContainer {
                        symbol: self.symbol_ref(kind, decl),
                        found: format!("module {}", self.resolver.module_name(module)),
                    });
                }
                ContainerShape::Other(parent) => {
                    return Err(LinkError::UnexpectedContainer {
                        symbol: self.symbol_ref(kind, decl),
                        found: self.resolver.describe(parent.id).to_string(),
                    });
                }
            }
        }
    }

    fn classify_container(&self, decl: &Declaration) -> Result<ContainerShape<'r>> {
        Ok(match decl.container {
            Container::Namespace(namespace) => ContainerShape::Namespace(namespace),
            Container::Module(module) => ContainerShape::Module(module),
            Container::Declaration(parent) => {
                let parent = self.resolver.declaration(parent)?;
                if parent.kind.is_class() {
                    ContainerShape::Class(parent)
                } else {
                    ContainerShape::Other(parent)
                }
            }
        })
    }

    fn register(&mut self, decl: DeclId, namespace: NamespaceId) -> Result<()> {
        let module = self.resolver.module_of(namespace)?;
        match self.index.insert(module, namespace, decl) {
            Ok(true) => {
                trace!(%module, %namespace, %decl, "top-level declaration indexed");
                Ok(())
            }
            Ok(false) => Ok(()),
            Err(first) => Err(LinkError::NamespaceModuleConflict {
                namespace: self.resolver.namespace_name(namespace),
                first: self.resolver.module_name(first),
                second: self.resolver.module_name(module),
            }),
        }
    }

    fn symbol_ref(&self, kind: SymbolKind, decl: DeclId) -> SymbolRef {
        SymbolRef::new(kind.describe(), decl, self.resolver.qualified_name(decl))
    }

    pub fn index(&self) -> &DependencyIndex {
        &self.index
    }

    pub fn into_index(self) -> DependencyIndex {
        self.index
    }

    /// Synthesized accessors that were left out of the index, in the order
    /// they were met.
    pub fn skipped_accessors(&self) -> &[DeclId] {
        &self.skipped_accessors
    }
}

fn merge(table: &mut SymbolTable, kind: SymbolKind, newly_needed: &OrderedSet<DeclId>) -> usize {
    let mut added = 0;
    for &decl in newly_needed {
        if table.declare_needed(kind, decl) {
            debug!(%kind, %decl, "dependency added by expansion");
            added += 1;
        }
    }
    added
}
