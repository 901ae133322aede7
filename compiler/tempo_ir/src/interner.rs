//! String interner for script identifiers.
//!
//! Interning happens while the tree is built, possibly on a background
//! compile thread, while the audio or UI thread resolves names for display.
//! A single `RwLock` keeps reads cheap; writes only happen for new names.

use super::Name;
use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::Arc;

/// Backing storage for interned strings.
struct InternTable {
    /// Map from string content to table index.
    map: FxHashMap<&'static str, u32>,
    /// Storage for string contents, indexed by `Name::raw()`.
    strings: Vec<&'static str>,
}

impl InternTable {
    fn with_empty() -> Self {
        let empty: &'static str = "";
        let mut map = FxHashMap::default();
        map.insert(empty, 0);
        InternTable {
            map,
            strings: vec![empty],
        }
    }
}

/// Interner mapping identifier strings to [`Name`]s.
///
/// Strings are leaked on insertion: identifiers live as long as the engine
/// that compiled them, and the set of distinct identifiers in a script is
/// small and bounded.
pub struct StringInterner {
    table: RwLock<InternTable>,
}

impl StringInterner {
    /// Create a new interner with the language keywords and callback names
    /// pre-interned.
    pub fn new() -> Self {
        let interner = StringInterner {
            table: RwLock::new(InternTable::with_empty()),
        };
        interner.pre_intern_keywords();
        interner
    }

    /// Intern a string, returning its Name.
    ///
    /// # Panics
    /// Panics if more than `u32::MAX` distinct identifiers are interned.
    pub fn intern(&self, s: &str) -> Name {
        {
            let guard = self.table.read();
            if let Some(&index) = guard.map.get(s) {
                return Name::from_raw(index);
            }
        }

        let mut guard = self.table.write();

        // Another writer may have inserted it between the two locks.
        if let Some(&index) = guard.map.get(s) {
            return Name::from_raw(index);
        }

        let leaked: &'static str = Box::leak(s.to_owned().into_boxed_str());
        let index = u32::try_from(guard.strings.len())
            .unwrap_or_else(|_| panic!("identifier table exceeded u32::MAX entries"));
        guard.strings.push(leaked);
        guard.map.insert(leaked, index);
        Name::from_raw(index)
    }

    /// Look up the string for a Name.
    ///
    /// Names from a different interner resolve to the empty string rather
    /// than panicking; they can only come from host misuse.
    pub fn lookup(&self, name: Name) -> &'static str {
        let guard = self.table.read();
        guard.strings.get(name.index()).copied().unwrap_or("")
    }

    /// Look up a string without interning it.
    pub fn get(&self, s: &str) -> Option<Name> {
        self.table.read().map.get(s).copied().map(Name::from_raw)
    }

    /// Number of interned strings, including the empty string.
    pub fn len(&self) -> usize {
        self.table.read().strings.len()
    }

    /// Check if only the empty string is interned.
    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    fn pre_intern_keywords(&self) {
        const KEYWORDS: &[&str] = &[
            // Declarations
            "var",
            "reg",
            "const",
            "global",
            "local",
            "inline",
            "function",
            // Control flow
            "if",
            "else",
            "while",
            "for",
            "break",
            "continue",
            "return",
            // Literals
            "true",
            "false",
            "undefined",
            // Host callbacks
            "onInit",
            "onNoteOn",
            "onNoteOff",
            "onController",
            "onTimer",
            "onControl",
            // Built-in API classes
            "Console",
            "Math",
            "Engine",
            // Built-in properties
            "length",
        ];

        for kw in KEYWORDS {
            self.intern(kw);
        }
    }
}

impl Default for StringInterner {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for StringInterner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StringInterner")
            .field("len", &self.len())
            .finish()
    }
}

/// Reference-counted interner handle.
///
/// The engine, the tree builder and native API tables all intern into the
/// same table; cloning the handle shares it.
#[derive(Clone, Debug, Default)]
pub struct SharedInterner(Arc<StringInterner>);

impl SharedInterner {
    /// Create a fresh shared interner.
    pub fn new() -> Self {
        SharedInterner(Arc::new(StringInterner::new()))
    }
}

impl std::ops::Deref for SharedInterner {
    type Target = StringInterner;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests;
