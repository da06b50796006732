//! Declaration, namespace and module descriptions.

use irlink_core::{DeclId, ModuleId, Name, NamespaceId};
use std::fmt;

bitflags::bitflags! {
    /// Properties of a declaration that matter while linking.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct DeclFlags: u32 {
        const NONE          = 0;
        /// Created by the compiler rather than written in source.
        const SYNTHESIZED   = 1 << 0;
        /// Generated to expose a platform getter/setter pair as a property.
        const INTEROP       = 1 << 1;
        const ABSTRACT      = 1 << 2;
        const OVERRIDE      = 1 << 3;
        const EXTENSION     = 1 << 4;
        const EXTERNAL      = 1 << 5;

        const SYNTHETIC_INTEROP = Self::SYNTHESIZED.bits() | Self::INTEROP.bits();
    }
}

/// The flavor of a class-like declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClassKind {
    Class,
    Interface,
    EnumClass,
    Object,
    AnnotationClass,
}

/// What a declaration is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Class(ClassKind),
    Constructor,
    EnumEntry,
    Field,
    Function,
    /// A getter or setter belonging to a property.
    PropertyAccessor,
    TypeParameter,
    ValueParameter,
    LocalVariable,
    TypeAlias,
}

impl DeclKind {
    #[inline]
    pub fn is_class(self) -> bool {
        matches!(self, DeclKind::Class(_))
    }

    pub fn describe(self) -> &'static str {
        match self {
            DeclKind::Class(ClassKind::Class) => "class",
            DeclKind::Class(ClassKind::Interface) => "interface",
            DeclKind::Class(ClassKind::EnumClass) => "enum class",
            DeclKind::Class(ClassKind::Object) => "object",
            DeclKind::Class(ClassKind::AnnotationClass) => "annotation class",
            DeclKind::Constructor => "constructor",
            DeclKind::EnumEntry => "enum entry",
            DeclKind::Field => "field",
            DeclKind::Function => "function",
            DeclKind::PropertyAccessor => "property accessor",
            DeclKind::TypeParameter => "type parameter",
            DeclKind::ValueParameter => "value parameter",
            DeclKind::LocalVariable => "local variable",
            DeclKind::TypeAlias => "type alias",
        }
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// The immediate owner of a declaration.
///
/// Well-formed external declarations live in a namespace or inside another
/// declaration. A module as direct owner only happens for synthesized
/// interop accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Container {
    Namespace(NamespaceId),
    Declaration(DeclId),
    Module(ModuleId),
}

/// A resolved declaration.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Unique identifier for this declaration.
    pub id: DeclId,
    /// Simple (unqualified) name.
    pub name: Name,
    pub kind: DeclKind,
    pub flags: DeclFlags,
    pub container: Container,
    /// Declarations this one directly overrides. Only functions and
    /// property accessors have any.
    pub overridden: Vec<DeclId>,
    /// Direct supertypes. Only classes have any; entries may be any
    /// classifier, including type parameters and type aliases.
    pub supertypes: Vec<DeclId>,
}

impl Declaration {
    /// A getter/setter the compiler generated for platform interop.
    pub fn is_synthesized_accessor(&self) -> bool {
        self.kind == DeclKind::PropertyAccessor && self.flags.contains(DeclFlags::SYNTHESIZED)
    }
}

/// A package fragment: a named scope within exactly one module.
#[derive(Debug, Clone)]
pub struct Namespace {
    pub id: NamespaceId,
    /// Fully qualified name, e.g. `org.example`. The root namespace has an
    /// empty name.
    pub fq_name: Name,
    /// The module this fragment belongs to.
    pub module: ModuleId,
}

/// A compilation unit.
#[derive(Debug, Clone)]
pub struct Module {
    pub id: ModuleId,
    pub name: Name,
}
