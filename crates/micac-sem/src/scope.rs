//! Lexically scoped symbol table.
//!
//! A stack of insertion-ordered frames. `define` checks only the
//! innermost frame for redefinition; `lookup` walks from innermost
//! outward, so globals and function symbols stay visible in every
//! inner scope. Pushes and pops must stay balanced around each scoped
//! construct - the checker owns that discipline.

use indexmap::IndexMap;
use micac_util::Symbol;

use crate::types::Type;

/// Whether a symbol lives at the top level or inside a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Global,
    Local,
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScopeKind::Global => f.write_str("global"),
            ScopeKind::Local => f.write_str("local"),
        }
    }
}

/// What the checker records about a declared name.
#[derive(Debug, Clone)]
pub struct SymbolInfo {
    pub name: Symbol,
    pub ty: Type,
    /// Variables and parameters may be assigned; constants and
    /// functions may not.
    pub writeable: bool,
    /// Only functions may be called.
    pub callable: bool,
    pub scope: ScopeKind,
    /// Parameter names and types, in order; empty for non-callables.
    pub params: Vec<(Symbol, Type)>,
}

impl SymbolInfo {
    /// A plain value symbol (constant or variable).
    pub fn value(name: Symbol, ty: Type, writeable: bool) -> Self {
        Self {
            name,
            ty,
            writeable,
            callable: false,
            scope: ScopeKind::Local,
            params: Vec::new(),
        }
    }

    /// A function symbol; `ty` is the declared return type.
    pub fn function(name: Symbol, ty: Type, params: Vec<(Symbol, Type)>) -> Self {
        Self {
            name,
            ty,
            writeable: false,
            callable: true,
            scope: ScopeKind::Local,
            params,
        }
    }
}

/// The scope stack.
pub struct SymbolTable {
    frames: Vec<IndexMap<Symbol, SymbolInfo>>,
}

impl SymbolTable {
    /// A table with only the global frame.
    pub fn new() -> Self {
        Self {
            frames: vec![IndexMap::new()],
        }
    }

    /// The scope kind a definition made right now would get.
    pub fn current_scope(&self) -> ScopeKind {
        if self.frames.len() == 1 {
            ScopeKind::Global
        } else {
            ScopeKind::Local
        }
    }

    pub fn push_scope(&mut self) {
        self.frames.push(IndexMap::new());
    }

    /// Pops the innermost frame. The global frame is never popped.
    pub fn pop_scope(&mut self) {
        debug_assert!(self.frames.len() > 1, "attempted to pop the global frame");
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Defines a symbol in the innermost frame, stamping its scope
    /// kind. Returns false (and leaves the frame untouched) when the
    /// name is already defined in that frame.
    pub fn define(&mut self, mut info: SymbolInfo) -> bool {
        info.scope = self.current_scope();
        // frames is never empty: the global frame stays put.
        let Some(frame) = self.frames.last_mut() else {
            return false;
        };
        if frame.contains_key(&info.name) {
            return false;
        }
        frame.insert(info.name, info);
        true
    }

    /// Looks a name up, innermost frame first.
    pub fn lookup(&self, name: Symbol) -> Option<&SymbolInfo> {
        self.frames.iter().rev().find_map(|frame| frame.get(&name))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
