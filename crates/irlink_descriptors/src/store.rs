//! In-memory descriptor storage.

use crate::resolver::DeclarationResolver;
use crate::types::{ClassKind, Container, DeclFlags, DeclKind, Declaration, Module, Namespace};
use irlink_core::{DeclId, ModuleId, NameInterner, NamespaceId};
use irlink_diagnostics::{LinkError, Result};

/// Description of a declaration that has not been added to a store yet.
#[derive(Debug, Clone)]
pub struct DeclarationBuilder {
    name: String,
    kind: DeclKind,
    container: Container,
    flags: DeclFlags,
    overridden: Vec<DeclId>,
    supertypes: Vec<DeclId>,
}

impl DeclarationBuilder {
    pub fn new(name: impl Into<String>, kind: DeclKind, container: Container) -> Self {
        Self {
            name: name.into(),
            kind,
            container,
            flags: DeclFlags::NONE,
            overridden: Vec::new(),
            supertypes: Vec::new(),
        }
    }

    pub fn class(name: impl Into<String>, container: Container) -> Self {
        Self::new(name, DeclKind::Class(ClassKind::Class), container)
    }

    pub fn interface(name: impl Into<String>, container: Container) -> Self {
        Self::new(name, DeclKind::Class(ClassKind::Interface), container)
    }

    pub fn function(name: impl Into<String>, container: Container) -> Self {
        Self::new(name, DeclKind::Function, container)
    }

    pub fn field(name: impl Into<String>, container: Container) -> Self {
        Self::new(name, DeclKind::Field, container)
    }

    pub fn flags(mut self, flags: DeclFlags) -> Self {
        self.flags |= flags;
        self
    }

    pub fn overrides(mut self, overridden: impl IntoIterator<Item = DeclId>) -> Self {
        self.overridden.extend(overridden);
        self
    }

    pub fn extends(mut self, supertypes: impl IntoIterator<Item = DeclId>) -> Self {
        self.supertypes.extend(supertypes);
        self
    }
}

/// Owns modules, namespaces and declarations, addressed by dense ids.
#[derive(Debug, Default)]
pub struct DescriptorStore {
    names: NameInterner,
    modules: Vec<Module>,
    namespaces: Vec<Namespace>,
    declarations: Vec<Declaration>,
}

impl DescriptorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that interns into an existing interner.
    pub fn with_interner(names: NameInterner) -> Self {
        Self {
            names,
            ..Self::default()
        }
    }

    pub fn add_module(&mut self, name: &str) -> ModuleId {
        let id = ModuleId(self.modules.len() as u32);
        let name = self.names.intern(name);
        self.modules.push(Module { id, name });
        id
    }

    /// Add a package fragment named `fq_name` to `module`. Pass `""` for the
    /// root namespace.
    pub fn add_namespace(&mut self, module: ModuleId, fq_name: &str) -> NamespaceId {
        let id = NamespaceId(self.namespaces.len() as u32);
        let fq_name = self.names.intern(fq_name);
        self.namespaces.push(Namespace { id, fq_name, module });
        id
    }

    pub fn add(&mut self, builder: DeclarationBuilder) -> DeclId {
        let id = DeclId(self.declarations.len() as u32);
        let name = self.names.intern(&builder.name);
        self.declarations.push(Declaration {
            id,
            name,
            kind: builder.kind,
            flags: builder.flags,
            container: builder.container,
            overridden: builder.overridden,
            supertypes: builder.supertypes,
        });
        id
    }

    /// Record a supertype after the fact, for hierarchies that refer forward.
    pub fn add_supertype(&mut self, class: DeclId, supertype: DeclId) -> Result<()> {
        let decl = self
            .declarations
            .get_mut(class.index())
            .ok_or(LinkError::UnknownDeclaration(class))?;
        if !decl.supertypes.contains(&supertype) {
            decl.supertypes.push(supertype);
        }
        Ok(())
    }

    /// Record an overridden function after the fact.
    pub fn add_overridden(&mut self, function: DeclId, overridden: DeclId) -> Result<()> {
        let decl = self
            .declarations
            .get_mut(function.index())
            .ok_or(LinkError::UnknownDeclaration(function))?;
        if !decl.overridden.contains(&overridden) {
            decl.overridden.push(overridden);
        }
        Ok(())
    }

    /// Look up a declaration by its simple name. Returns the first match.
    pub fn find(&self, name: &str) -> Option<DeclId> {
        let name = self.names.get(name)?;
        self.declarations
            .iter()
            .find(|decl| decl.name == name)
            .map(|decl| decl.id)
    }

    pub fn declarations(&self) -> &[Declaration] {
        &self.declarations
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

impl DeclarationResolver for DescriptorStore {
    fn declaration(&self, id: DeclId) -> Result<&Declaration> {
        self.declarations
            .get(id.index())
            .ok_or(LinkError::UnknownDeclaration(id))
    }

    fn namespace(&self, id: NamespaceId) -> Result<&Namespace> {
        self.namespaces
            .get(id.index())
            .ok_or(LinkError::UnknownNamespace(id))
    }

    fn module(&self, id: ModuleId) -> Result<&Module> {
        self.modules.get(id.index()).ok_or(LinkError::UnknownModule(id))
    }

    fn names(&self) -> &NameInterner {
        &self.names
    }
}
