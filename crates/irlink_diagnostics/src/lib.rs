//! irlink_diagnostics: Error reporting for the IR linker.
//!
//! Every failure the dependency collector can report is an internal
//! consistency violation: something an earlier phase should have ruled
//! out. Errors therefore carry the full identity of the symbols involved
//! (kind, id and qualified name) so the upstream defect can be found.

use irlink_core::{DeclId, ModuleId, NamespaceId};
use std::fmt;
use thiserror::Error;

/// Linker result type
pub type Result<T> = std::result::Result<T, LinkError>;

/// A rendered reference to a symbol, as it appears in error messages.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SymbolRef {
    /// Human readable symbol kind, e.g. `"function"`.
    pub kind: &'static str,
    pub decl: DeclId,
    /// Fully qualified name, e.g. `org.example.Outer.f`.
    pub name: String,
}

impl SymbolRef {
    pub fn new(kind: &'static str, decl: DeclId, name: impl Into<String>) -> Self {
        Self {
            kind,
            decl,
            name: name.into(),
        }
    }
}

impl fmt::Display for SymbolRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.name, self.decl)
    }
}

/// Render a list of symbols as `a, b, c`.
pub fn join_symbols(symbols: &[SymbolRef]) -> String {
    symbols
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Linker errors
#[derive(Debug, Error)]
pub enum LinkError {
    /// Type parameters, value parameters and local variables are always
    /// bound while the IR is built; any left over is an upstream defect.
    #[error("unbound local symbols at dependency collection: {}", join_symbols(.symbols))]
    UnboundLocalSymbols { symbols: Vec<SymbolRef> },

    #[error("namespace or class expected as container of {symbol}, found {found}")]
    UnexpectedContainer { symbol: SymbolRef, found: String },

    #[error("namespace {namespace} reported in module {first} and in module {second}")]
    NamespaceModuleConflict {
        namespace: String,
        first: String,
        second: String,
    },

    #[error("containment chain of {symbol} exceeds {limit} levels")]
    ContainmentTooDeep { symbol: SymbolRef, limit: u32 },

    #[error("no description for declaration {0}")]
    UnknownDeclaration(DeclId),

    #[error("no description for namespace {0}")]
    UnknownNamespace(NamespaceId),

    #[error("no description for module {0}")]
    UnknownModule(ModuleId),

    #[error("failed to load metadata for {namespace} in {module}: {message}")]
    Metadata {
        module: String,
        namespace: String,
        message: String,
    },
}

impl LinkError {
    /// Whether this error reports a broken invariant of the linker's input,
    /// as opposed to a lookup failure of one of its collaborators.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            LinkError::UnboundLocalSymbols { .. }
                | LinkError::UnexpectedContainer { .. }
                | LinkError::NamespaceModuleConflict { .. }
                | LinkError::ContainmentTooDeep { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_ref_display() {
        let symbol = SymbolRef::new("function", DeclId(7), "org.A.f");
        assert_eq!(symbol.to_string(), "function org.A.f (decl#7)");
    }

    #[test]
    fn test_unbound_locals_message_lists_every_symbol() {
        let err = LinkError::UnboundLocalSymbols {
            symbols: vec![
                SymbolRef::new("type parameter", DeclId(1), "org.Box.T"),
                SymbolRef::new("local variable", DeclId(2), "org.run.x"),
            ],
        };
        let message = err.to_string();
        assert!(message.contains("type parameter org.Box.T (decl#1)"), "{message}");
        assert!(message.contains("local variable org.run.x (decl#2)"), "{message}");
        assert!(err.is_invariant_violation());
    }

    #[test]
    fn test_unexpected_container_message() {
        let err = LinkError::UnexpectedContainer {
            symbol: SymbolRef::new("field", DeclId(3), "value"),
            found: "function org.run".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "namespace or class expected as container of field value (decl#3), found function org.run"
        );
    }

    #[test]
    fn test_lookup_failures_are_not_invariant_violations() {
        assert!(!LinkError::UnknownDeclaration(DeclId(4)).is_invariant_violation());
        assert!(!LinkError::UnknownNamespace(NamespaceId(0)).is_invariant_violation());
    }
}
