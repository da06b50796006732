//! irlink_symbols: Symbol table of references made by a linking unit.
//!
//! The IR builder records every declaration it refers to as a symbol. A
//! symbol stays unbound until its declaration is materialized; the unbound
//! subset is what the dependency collector works from.

mod symbol;

pub use symbol::{Symbol, SymbolKind, SymbolTable};
