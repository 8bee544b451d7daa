//! String interner for identifier deduplication.
//!
//! Identifiers scanned out of constructor sources are interned into a pool and
//! referenced by `Atom` (a u32 index). Dependency names, alias names and
//! property names repeat heavily within one source, so comparisons during
//! usage analysis become integer comparisons.

use rustc_hash::FxHashMap;
use serde::Serialize;
use std::sync::Arc;

/// Handle to an interned identifier.
///
/// Equality on atoms is equality on the underlying text within one
/// [`Interner`]. Atom 0 is always the empty string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Default, PartialOrd, Ord)]
pub struct Atom(pub u32);

impl Atom {
    pub const NONE: Atom = Atom(0);

    #[inline]
    pub fn is_none(self) -> bool {
        self == Atom::NONE
    }

    #[inline]
    pub fn index(self) -> u32 {
        self.0
    }
}

/// Names that occur in nearly every constructor source.
const PRELUDE: &[&str] = &[
    "this",
    "prototype",
    "constructor",
    "function",
    "return",
    "var",
    "let",
    "const",
    "new",
    "undefined",
    "null",
    "true",
    "false",
    "console",
    "log",
];

/// Identifier pool owned by one parsed source.
///
/// ```
/// use fuzzyioc_common::interner::Interner;
/// let mut interner = Interner::new();
/// let repo = interner.intern("repo");
/// assert_eq!(interner.intern("repo"), repo);
/// assert_eq!(interner.resolve(repo), "repo");
/// ```
#[derive(Clone, Debug)]
pub struct Interner {
    atoms: FxHashMap<Arc<str>, Atom>,
    /// Indexed by atom; slot 0 holds "".
    texts: Vec<Arc<str>>,
}

impl Default for Interner {
    fn default() -> Self {
        Self::new()
    }
}

impl Interner {
    pub fn new() -> Self {
        let empty: Arc<str> = Arc::from("");
        let mut atoms = FxHashMap::default();
        atoms.insert(Arc::clone(&empty), Atom::NONE);
        let mut texts = Vec::with_capacity(64);
        texts.push(empty);
        Interner { atoms, texts }
    }

    /// The atom for `text`, allocating one on first sight.
    #[inline]
    pub fn intern(&mut self, text: &str) -> Atom {
        if let Some(atom) = self.lookup(text) {
            return atom;
        }
        let atom = Atom(self.texts.len() as u32);
        let shared: Arc<str> = Arc::from(text);
        self.atoms.insert(Arc::clone(&shared), atom);
        self.texts.push(shared);
        atom
    }

    /// The atom for `text` if it has already been interned.
    #[inline]
    pub fn lookup(&self, text: &str) -> Option<Atom> {
        self.atoms.get(text).copied()
    }

    /// Text of `atom`, or "" for an atom from another interner.
    #[inline]
    pub fn resolve(&self, atom: Atom) -> &str {
        self.try_resolve(atom).unwrap_or_default()
    }

    #[inline]
    pub fn try_resolve(&self, atom: Atom) -> Option<&str> {
        self.texts.get(atom.index() as usize).map(AsRef::as_ref)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.texts.len()
    }

    /// True while only the empty string is present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.texts.len() == 1
    }

    pub fn intern_common(&mut self) {
        for text in PRELUDE {
            self.intern(text);
        }
    }
}
