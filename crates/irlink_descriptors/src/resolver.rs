//! The resolver boundary.

use crate::types::{Container, Declaration, Module, Namespace};
use irlink_core::{DeclId, ModuleId, NameInterner, NamespaceId};
use irlink_diagnostics::{Result, SymbolRef};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;

/// Maximum number of containers followed when rendering a qualified name.
const MAX_NAME_DEPTH: usize = 64;

/// Turns declaration ids into resolved descriptions.
///
/// Implementations own the descriptions; lookups hand out borrows. A failed
/// lookup is the resolver's own failure and is passed through unchanged by
/// the linker.
pub trait DeclarationResolver {
    fn declaration(&self, id: DeclId) -> Result<&Declaration>;

    fn namespace(&self, id: NamespaceId) -> Result<&Namespace>;

    fn module(&self, id: ModuleId) -> Result<&Module>;

    /// The interner the descriptions' names were created with.
    fn names(&self) -> &NameInterner;

    /// Declarations directly overridden by a function.
    fn overridden(&self, function: DeclId) -> Result<&[DeclId]> {
        Ok(&self.declaration(function)?.overridden)
    }

    /// Every direct and indirect supertype of `class`, each exactly once,
    /// produced lazily in breadth-first order.
    fn super_classifiers(&self, class: DeclId) -> Result<SuperClassifiers<'_, Self>> {
        let decl = self.declaration(class)?;
        Ok(SuperClassifiers::new(self, class, &decl.supertypes))
    }

    /// The module a namespace belongs to.
    fn module_of(&self, namespace: NamespaceId) -> Result<ModuleId> {
        Ok(self.namespace(namespace)?.module)
    }

    fn module_name(&self, id: ModuleId) -> String {
        match self.module(id) {
            Ok(module) => format!("<{}>", self.names().resolve(module.name)),
            Err(_) => id.to_string(),
        }
    }

    fn namespace_name(&self, id: NamespaceId) -> String {
        match self.namespace(id) {
            Ok(ns) if self.names().resolve(ns.fq_name).is_empty() => "<root>".to_string(),
            Ok(ns) => self.names().resolve(ns.fq_name).to_string(),
            Err(_) => id.to_string(),
        }
    }

    /// Render `org.example.Outer.Inner.f` for a declaration. Unknown links in
    /// the chain are rendered by id rather than failing.
    fn qualified_name(&self, id: DeclId) -> String {
        let names = self.names();
        let mut segments: Vec<String> = Vec::new();
        let mut current = id;
        for _ in 0..MAX_NAME_DEPTH {
            let decl = match self.declaration(current) {
                Ok(decl) => decl,
                Err(_) => {
                    segments.push(current.to_string());
                    break;
                }
            };
            segments.push(names.resolve(decl.name).to_string());
            match decl.container {
                Container::Declaration(parent) => current = parent,
                Container::Namespace(ns) => {
                    let prefix = self.namespace_name(ns);
                    if prefix != "<root>" {
                        segments.push(prefix);
                    }
                    break;
                }
                Container::Module(module) => {
                    segments.push(self.module_name(module));
                    break;
                }
            }
        }
        segments.reverse();
        segments.join(".")
    }

    /// Render a declaration for diagnostics, using its own kind.
    fn describe(&self, id: DeclId) -> SymbolRef {
        let kind = match self.declaration(id) {
            Ok(decl) => decl.kind.describe(),
            Err(_) => "declaration",
        };
        SymbolRef::new(kind, id, self.qualified_name(id))
    }
}

/// Lazy transitive walk over a class's supertypes.
///
/// Each classifier is produced once even when reachable along several
/// paths. The root itself is never produced. After a failed lookup the
/// error is produced once and the walk stops.
pub struct SuperClassifiers<'a, R: ?Sized> {
    resolver: &'a R,
    queue: VecDeque<DeclId>,
    seen: FxHashSet<DeclId>,
    failed: bool,
}

impl<'a, R: DeclarationResolver + ?Sized> SuperClassifiers<'a, R> {
    pub fn new(resolver: &'a R, root: DeclId, direct: &[DeclId]) -> Self {
        let mut seen = FxHashSet::default();
        seen.insert(root);
        let mut queue = VecDeque::with_capacity(direct.len());
        for &supertype in direct {
            if seen.insert(supertype) {
                queue.push_back(supertype);
            }
        }
        Self {
            resolver,
            queue,
            seen,
            failed: false,
        }
    }
}

impl<'a, R: DeclarationResolver + ?Sized> Iterator for SuperClassifiers<'a, R> {
    type Item = Result<DeclId>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let id = self.queue.pop_front()?;
        match self.resolver.declaration(id) {
            Ok(decl) => {
                for &supertype in &decl.supertypes {
                    if self.seen.insert(supertype) {
                        self.queue.push_back(supertype);
                    }
                }
                Some(Ok(id))
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}
