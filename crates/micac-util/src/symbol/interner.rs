//! String interner implementation using DashMap for concurrent access.
//!
//! The table is initialised lazily on first use; initialisation
//! pre-interns every known keyword so the `KW_*`/`TY_*` constants in
//! the parent module resolve to the right strings.
//!
//! Interned strings are allocated on the heap and leaked to obtain
//! `'static` references. The set of unique strings in a compilation is
//! bounded by the source text, so nothing is ever reclaimed.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::LazyLock;

use ahash::RandomState;
use dashmap::DashMap;

use super::{Symbol, KNOWN};

/// Global string table instance.
pub(crate) static TABLE: LazyLock<StringTable> = LazyLock::new(|| {
    let table = StringTable::new();
    table.initialize_known();
    table
});

/// Thread-safe string table.
///
/// Two maps are kept in lockstep: `indices` answers "has this string
/// been interned, and as what index?", `strings` answers the reverse
/// lookup used by `Symbol::as_str`.
pub(crate) struct StringTable {
    indices: DashMap<&'static str, u32, RandomState>,
    strings: DashMap<u32, &'static str, RandomState>,
    next_index: AtomicU32,
}

impl StringTable {
    fn new() -> Self {
        Self {
            indices: DashMap::with_capacity_and_hasher(256, RandomState::new()),
            strings: DashMap::with_capacity_and_hasher(256, RandomState::new()),
            next_index: AtomicU32::new(KNOWN.len() as u32),
        }
    }

    /// Pre-intern the known keyword set. Must run exactly once, before
    /// any other interning, so that keyword indices match the constants
    /// in the parent module.
    fn initialize_known(&self) {
        for (index, &text) in KNOWN.iter().enumerate() {
            self.indices.insert(text, index as u32);
            self.strings.insert(index as u32, text);
        }
    }

    /// Intern a string.
    ///
    /// Fast path is a single lock-free lookup. On a miss the string is
    /// copied once and both maps are updated; if two threads race on
    /// the same new string the entry API makes one of them win and the
    /// loser's copy is abandoned.
    pub(crate) fn intern(&self, string: &str) -> Symbol {
        if let Some(index) = self.indices.get(string) {
            return Symbol::from_index(*index);
        }

        let owned: &'static str = Box::leak(string.to_owned().into_boxed_str());
        match self.indices.entry(owned) {
            dashmap::mapref::entry::Entry::Occupied(entry) => Symbol::from_index(*entry.get()),
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                let index = self.next_index.fetch_add(1, Ordering::Relaxed);
                entry.insert(index);
                self.strings.insert(index, owned);
                Symbol::from_index(index)
            }
        }
    }

    /// Reverse lookup by index.
    ///
    /// Only `Symbol` can hold an index, and every `Symbol` comes out of
    /// `intern` or the pre-interned constants, so the entry exists.
    pub(crate) fn get(&self, index: u32) -> &'static str {
        *self
            .strings
            .get(&index)
            .expect("symbol index missing from string table")
    }
}
