//! Symbol module - string interning for identifiers.
//!
//! UXF documents repeat the same strings constantly: ttype names, field
//! names, and map/table keys all tend to recur across many records. A
//! [`Symbol`] is a 4-byte handle to an interned string, making repeated
//! comparisons (e.g. "is this field's vtype the `PriceList` ttype?") an
//! integer compare instead of a string compare.
//!
//! The interner is process-global and thread-safe (backed by `dashmap`),
//! so multiple documents can be loaded concurrently on separate threads.
//!
//! # Examples
//!
//! ```
//! use uxf_util::symbol::Symbol;
//!
//! let a = Symbol::intern("PriceList");
//! let b = Symbol::intern("PriceList");
//! let c = Symbol::intern("Customer");
//!
//! assert_eq!(a, b);
//! assert_ne!(a, c);
//! assert_eq!(a.as_str(), "PriceList");
//! ```

use dashmap::DashMap;
use std::fmt;
use std::sync::{OnceLock, RwLock};

fn interner() -> &'static Interner {
    static INTERNER: OnceLock<Interner> = OnceLock::new();
    INTERNER.get_or_init(Interner::default)
}

#[derive(Default)]
struct Interner {
    /// string -> index, for interning lookups.
    indices: DashMap<&'static str, u32>,
    /// index -> string, for `Symbol::as_str`. Grows append-only so that
    /// readers never need to lock more than the slot they're reading.
    strings: RwLock<Vec<&'static str>>,
}

impl Interner {
    fn intern(&self, s: &str) -> u32 {
        if let Some(idx) = self.indices.get(s) {
            return *idx;
        }
        // Leak the string once; symbols live for the process lifetime
        // (finite process runtime, memory bounded by distinct identifier
        // count).
        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let mut strings = self.strings.write().unwrap();
        // Re-check under the write lock in case another thread raced us.
        if let Some(idx) = self.indices.get(leaked) {
            return *idx;
        }
        let idx = strings.len() as u32;
        strings.push(leaked);
        self.indices.insert(leaked, idx);
        idx
    }

    fn resolve(&self, idx: u32) -> &'static str {
        self.strings.read().unwrap()[idx as usize]
    }
}

/// A handle to an interned string.
///
/// Cheap to copy, compare, and hash. Use [`Symbol::as_str`] to recover the
/// text when building output.
#[derive(Clone, Copy, Eq, PartialEq, Hash)]
pub struct Symbol(u32);

impl Symbol {
    /// Intern `s`, returning the same `Symbol` for equal strings.
    pub fn intern(s: &str) -> Self {
        Symbol(interner().intern(s))
    }

    /// The interned text.
    pub fn as_str(&self) -> &'static str {
        interner().resolve(self.0)
    }

    /// True if this symbol's text equals `s`, without requiring `s` itself
    /// to already be interned.
    pub fn eq_str(&self, s: &str) -> bool {
        self.as_str() == s
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({:?})", self.as_str())
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for Symbol {
    fn from(s: &str) -> Self {
        Symbol::intern(s)
    }
}

impl From<String> for Symbol {
    fn from(s: String) -> Self {
        Symbol::intern(&s)
    }
}

impl PartialOrd for Symbol {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Symbol {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_str().cmp(other.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_text_interns_to_same_symbol() {
        let a = Symbol::intern("Quantity");
        let b = Symbol::intern("Quantity");
        assert_eq!(a, b);
    }

    #[test]
    fn different_text_interns_differently() {
        let a = Symbol::intern("Quantity");
        let b = Symbol::intern("Price");
        assert_ne!(a, b);
    }

    #[test]
    fn as_str_recovers_original_text() {
        let sym = Symbol::intern("Description");
        assert_eq!(sym.as_str(), "Description");
    }

    #[test]
    fn eq_str_compares_without_interning() {
        let sym = Symbol::intern("ID");
        assert!(sym.eq_str("ID"));
        assert!(!sym.eq_str("id"));
    }

    #[test]
    fn ordering_is_lexicographic_on_text() {
        let a = Symbol::intern("Alpha");
        let b = Symbol::intern("Beta");
        assert!(a < b);
    }
}
