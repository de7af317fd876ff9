
use std::fmt;

use derive_more::{From, Display};
use internment::Intern;

/// An interned name. Symbols are `Copy`, compare by pointer, and resolve to
/// their text for as long as the process lives, so terms built from them may
/// be shared across threads.
#[derive(Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Display)]
pub struct Symbol(Intern<String>);

impl Symbol {
    pub fn as_str(&self) -> &'static str {
        self.0.as_ref()
    }
}

impl From<&str> for Symbol {
    fn from(text: &str) -> Self {
        Symbol(Intern::from_ref(text))
    }
}

impl Default for Symbol {
    /// The throwaway binder name, rendered as `_`.
    fn default() -> Self {
        "_".into()
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), f)
    }
}

/// A per-name de Bruijn offset: 0 selects the innermost binder of that name,
/// each step outward through same-named binders adds one.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, From, Display)]
pub struct Index(usize);

impl Index {
    /// The same name one binder further out.
    pub fn succ(self) -> Index {
        Index(self.0 + 1)
    }

    /// Apply a signed displacement. Callers keep the invariant that a free
    /// occurrence is never shifted below zero.
    pub fn offset(self, amount: isize) -> Index {
        Index((self.0 as isize + amount) as usize)
    }

    pub fn value(self) -> usize {
        self.0
    }
}
