//! micac-sem - Semantic Analysis
//!
//! A single pre-order walk over the AST that resolves names through a
//! scoped symbol table, propagates types, validates every rule the
//! language imposes, and rebuilds the program as a decorated tree
//! ([`hir`]) for the IR generator.
//!
//! The checker never stops early: it accumulates diagnostics for the
//! whole program so one run surfaces many errors. What it does stop is
//! cascades - an expression whose type already resolved to
//! [`Type::Error`] is poisoned, and no further diagnostic is issued
//! against it at its parent.

pub mod hir;
mod check;
mod dump;
mod scope;
mod types;

pub use check::check_program;
pub use dump::dump_typed;
pub use scope::{ScopeKind, SymbolInfo, SymbolTable};
pub use types::{binary_op_type, unary_op_type, Type, BUILTIN_TYPE_NAMES};
