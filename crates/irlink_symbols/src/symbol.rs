//! Symbol and symbol table definitions.

use irlink_core::{DeclId, OrderedSet};
use rustc_hash::FxHashSet;
use std::fmt;
use tracing::trace;

/// The kind of declaration a symbol refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SymbolKind {
    Class,
    Constructor,
    EnumEntry,
    Field,
    Function,
    TypeParameter,
    ValueParameter,
    LocalVariable,
}

impl SymbolKind {
    pub const ALL: [SymbolKind; 8] = [
        SymbolKind::Class,
        SymbolKind::Constructor,
        SymbolKind::EnumEntry,
        SymbolKind::Field,
        SymbolKind::Function,
        SymbolKind::TypeParameter,
        SymbolKind::ValueParameter,
        SymbolKind::LocalVariable,
    ];

    /// Kinds that may legitimately refer to declarations of other modules.
    pub const EXTERNAL: [SymbolKind; 5] = [
        SymbolKind::Class,
        SymbolKind::Constructor,
        SymbolKind::EnumEntry,
        SymbolKind::Field,
        SymbolKind::Function,
    ];

    /// Kinds that are always bound while the IR is built.
    pub const LOCAL: [SymbolKind; 3] = [
        SymbolKind::TypeParameter,
        SymbolKind::ValueParameter,
        SymbolKind::LocalVariable,
    ];

    #[inline]
    pub fn is_local(self) -> bool {
        matches!(
            self,
            SymbolKind::TypeParameter | SymbolKind::ValueParameter | SymbolKind::LocalVariable
        )
    }

    pub fn describe(self) -> &'static str {
        match self {
            SymbolKind::Class => "class",
            SymbolKind::Constructor => "constructor",
            SymbolKind::EnumEntry => "enum entry",
            SymbolKind::Field => "field",
            SymbolKind::Function => "function",
            SymbolKind::TypeParameter => "type parameter",
            SymbolKind::ValueParameter => "value parameter",
            SymbolKind::LocalVariable => "local variable",
        }
    }

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A typed reference to a declaration.
///
/// Identity is the pair of kind and declaration id: two symbols for the
/// same declaration are the same symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol {
    pub kind: SymbolKind,
    pub decl: DeclId,
}

impl Symbol {
    pub fn new(kind: SymbolKind, decl: DeclId) -> Self {
        Self { kind, decl }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.decl)
    }
}

/// Per-kind bookkeeping of referenced declarations.
///
/// Unbound sets keep first-reference order so that everything derived
/// from them is deterministic.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    unbound: [OrderedSet<DeclId>; 8],
    bound: [FxHashSet<DeclId>; 8],
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            unbound: std::array::from_fn(|_| OrderedSet::new()),
            bound: std::array::from_fn(|_| FxHashSet::default()),
        }
    }

    /// Record a reference to `decl`. The symbol stays unbound until
    /// [`SymbolTable::bind`] is called for it.
    pub fn reference(&mut self, kind: SymbolKind, decl: DeclId) -> Symbol {
        self.declare_needed(kind, decl);
        Symbol::new(kind, decl)
    }

    /// Mark `decl` as needed. Idempotent: returns `true` only when the
    /// symbol was neither bound nor already needed.
    pub fn declare_needed(&mut self, kind: SymbolKind, decl: DeclId) -> bool {
        if self.bound[kind.slot()].contains(&decl) {
            return false;
        }
        let added = self.unbound[kind.slot()].insert(decl);
        if added {
            trace!(%kind, %decl, "symbol needed");
        }
        added
    }

    /// Mark a symbol as backed by a materialized declaration.
    /// Returns `true` if it was unbound before.
    pub fn bind(&mut self, kind: SymbolKind, decl: DeclId) -> bool {
        self.bound[kind.slot()].insert(decl);
        self.unbound[kind.slot()].remove(&decl)
    }

    pub fn is_bound(&self, kind: SymbolKind, decl: DeclId) -> bool {
        self.bound[kind.slot()].contains(&decl)
    }

    pub fn is_unbound(&self, kind: SymbolKind, decl: DeclId) -> bool {
        self.unbound[kind.slot()].contains(&decl)
    }

    /// Unbound declarations of one kind, in first-reference order.
    pub fn unbound(&self, kind: SymbolKind) -> &OrderedSet<DeclId> {
        &self.unbound[kind.slot()]
    }

    pub fn unbound_symbols(&self, kind: SymbolKind) -> impl Iterator<Item = Symbol> + '_ {
        self.unbound[kind.slot()]
            .iter()
            .map(move |&decl| Symbol::new(kind, decl))
    }

    /// Total number of unbound symbols over all kinds.
    pub fn unbound_count(&self) -> usize {
        self.unbound.iter().map(OrderedSet::len).sum()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_needed_is_idempotent() {
        let mut table = SymbolTable::new();
        assert!(table.declare_needed(SymbolKind::Function, DeclId(1)));
        assert!(!table.declare_needed(SymbolKind::Function, DeclId(1)));
        assert_eq!(table.unbound(SymbolKind::Function).len(), 1);
        assert_eq!(table.unbound_count(), 1);
    }

    #[test]
    fn test_kinds_are_tracked_separately() {
        let mut table = SymbolTable::new();
        table.reference(SymbolKind::Class, DeclId(3));
        table.reference(SymbolKind::Constructor, DeclId(3));
        assert!(table.is_unbound(SymbolKind::Class, DeclId(3)));
        assert!(table.is_unbound(SymbolKind::Constructor, DeclId(3)));
        assert!(!table.is_unbound(SymbolKind::Field, DeclId(3)));
        assert_eq!(table.unbound_count(), 2);
    }

    #[test]
    fn test_bind_removes_from_unbound() {
        let mut table = SymbolTable::new();
        table.reference(SymbolKind::Field, DeclId(1));
        table.reference(SymbolKind::Field, DeclId(2));
        table.reference(SymbolKind::Field, DeclId(3));

        assert!(table.bind(SymbolKind::Field, DeclId(2)));
        assert!(!table.bind(SymbolKind::Field, DeclId(2)));
        assert!(table.is_bound(SymbolKind::Field, DeclId(2)));
        assert_eq!(table.unbound(SymbolKind::Field).as_slice(), &[DeclId(1), DeclId(3)]);
    }

    #[test]
    fn test_bound_symbols_are_never_needed_again() {
        let mut table = SymbolTable::new();
        table.bind(SymbolKind::Function, DeclId(9));
        assert!(!table.declare_needed(SymbolKind::Function, DeclId(9)));
        assert!(table.unbound(SymbolKind::Function).is_empty());
    }

    #[test]
    fn test_unbound_symbols_keep_reference_order() {
        let mut table = SymbolTable::new();
        for id in [5, 2, 8, 2] {
            table.reference(SymbolKind::Class, DeclId(id));
        }
        let symbols: Vec<_> = table.unbound_symbols(SymbolKind::Class).collect();
        assert_eq!(
            symbols,
            vec![
                Symbol::new(SymbolKind::Class, DeclId(5)),
                Symbol::new(SymbolKind::Class, DeclId(2)),
                Symbol::new(SymbolKind::Class, DeclId(8)),
            ]
        );
    }

    #[test]
    fn test_local_kinds() {
        for kind in SymbolKind::LOCAL {
            assert!(kind.is_local());
        }
        for kind in SymbolKind::EXTERNAL {
            assert!(!kind.is_local());
        }
        assert_eq!(SymbolKind::ALL.len(), SymbolKind::LOCAL.len() + SymbolKind::EXTERNAL.len());
    }
}
