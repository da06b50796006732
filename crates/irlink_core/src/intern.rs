//! Name interning for declarations, namespaces and modules.
//!
//! Names are only needed for diagnostics and lookups by embedders, but a
//! single store can hold tens of thousands of them, so each unique string
//! is kept once and referenced by a `u32` handle.

use lasso::{Spur, ThreadedRodeo};
use std::fmt;
use std::sync::Arc;

/// An interned name. Comparing two `Name`s is an integer comparison.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Name(Spur);

impl Name {
    #[inline]
    pub fn as_spur(self) -> Spur {
        self.0
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

/// Thread-safe name interner.
///
/// Cloning shares the underlying storage, so a descriptor store and the
/// diagnostics that render its names can hold the same interner.
#[derive(Clone)]
pub struct NameInterner {
    rodeo: Arc<ThreadedRodeo>,
}

impl NameInterner {
    pub fn new() -> Self {
        Self {
            rodeo: Arc::new(ThreadedRodeo::new()),
        }
    }

    /// Intern a name, returning the existing handle if it was seen before.
    #[inline]
    pub fn intern(&self, s: &str) -> Name {
        Name(self.rodeo.get_or_intern(s))
    }

    /// Look up a name without interning it.
    #[inline]
    pub fn get(&self, s: &str) -> Option<Name> {
        self.rodeo.get(s).map(Name)
    }

    #[inline]
    pub fn resolve(&self, name: Name) -> &str {
        self.rodeo.resolve(&name.0)
    }

    /// Join a sequence of names with `.`, e.g. `org.example.Outer.Inner`.
    pub fn join<I>(&self, parts: I) -> String
    where
        I: IntoIterator<Item = Name>,
    {
        let mut out = String::new();
        for part in parts {
            let text = self.resolve(part);
            if text.is_empty() {
                continue;
            }
            if !out.is_empty() {
                out.push('.');
            }
            out.push_str(text);
        }
        out
    }

    pub fn len(&self) -> usize {
        self.rodeo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rodeo.is_empty()
    }
}

impl Default for NameInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for NameInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NameInterner")
            .field("len", &self.len())
            .finish()
    }
}
