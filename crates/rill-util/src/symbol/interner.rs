//! Global string table backing the [`Symbol`] type.
//!
//! The table is an index-stable set of leaked string slices. Symbol indices
//! are positions in the set, so both directions - string to symbol and
//! symbol to string - are O(1).

use std::hash::BuildHasherDefault;
use std::sync::{LazyLock, Mutex, MutexGuard};

use indexmap::IndexSet;
use rustc_hash::FxHasher;

use super::{Symbol, RESERVED};

type FxIndexSet = IndexSet<&'static str, BuildHasherDefault<FxHasher>>;

/// The process-global string table.
pub static STRING_TABLE: LazyLock<StringTable> = LazyLock::new(StringTable::new);

/// Index-stable interning table.
///
/// Keywords and builtin names are inserted first so their indices match the
/// `KW_*` / `ID_*` constants in the parent module.
pub struct StringTable {
    set: Mutex<FxIndexSet>,
}

impl StringTable {
    fn new() -> Self {
        let mut set = FxIndexSet::default();
        for &s in RESERVED {
            set.insert(s);
        }
        Self {
            set: Mutex::new(set),
        }
    }

    fn lock(&self) -> MutexGuard<'_, FxIndexSet> {
        // A poisoned table is still index-consistent; keep going.
        self.set.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Intern a string, returning its symbol.
    pub(crate) fn intern(&self, string: &str) -> Symbol {
        let mut set = self.lock();
        if let Some(index) = set.get_index_of(string) {
            return Symbol {
                index: index as u32,
            };
        }
        let leaked: &'static str = Box::leak(string.to_owned().into_boxed_str());
        let (index, _) = set.insert_full(leaked);
        Symbol {
            index: index as u32,
        }
    }

    /// Look up the string for a symbol, if the index is valid.
    pub(crate) fn get(&self, symbol: Symbol) -> Option<&'static str> {
        self.lock().get_index(symbol.index as usize).copied()
    }

    /// Number of interned strings.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// The table always contains the reserved symbols.
    pub fn is_empty(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_precede_user_strings() {
        let user = STRING_TABLE.intern("definitely_not_reserved");
        assert!(user.index >= RESERVED.len() as u32);
    }

    #[test]
    fn test_get_out_of_range() {
        let bogus = Symbol { index: u32::MAX };
        assert_eq!(STRING_TABLE.get(bogus), None);
    }

    #[test]
    fn test_len_counts_reserved() {
        assert!(STRING_TABLE.len() >= RESERVED.len());
        assert!(!STRING_TABLE.is_empty());
    }
}
