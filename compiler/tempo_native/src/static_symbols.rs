//! Backend for entry points already linked into the host.
//!
//! Hosts without a C toolchain, and tests, register `extern "C"` functions
//! by name. "Compiling" a snippet looks its symbol up; the code text is only
//! used for the debug signature.

use std::ffi::c_void;
use std::ptr::NonNull;

use rustc_hash::FxHashMap;

use crate::code::{CompileError, NativeCode, SnippetCompiler, SnippetSource};

#[derive(Clone, Debug, Default)]
pub struct StaticSymbols {
    symbols: FxHashMap<String, NonNull<c_void>>,
}

impl StaticSymbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `entry` under `name`. A null entry is ignored.
    ///
    /// The entry must have the C shape `void f(void*, ...)` with as many
    /// pointer arguments as the declaring script gives it.
    #[must_use]
    pub fn symbol(mut self, name: impl Into<String>, entry: *const c_void) -> Self {
        if let Some(entry) = NonNull::new(entry.cast_mut()) {
            self.symbols.insert(name.into(), entry);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl SnippetCompiler for StaticSymbols {
    fn compile(&self, source: &SnippetSource<'_>) -> Result<NativeCode, CompileError> {
        self.symbols
            .get(source.symbol)
            .map(|entry| NativeCode::from_static(*entry))
            .ok_or_else(|| CompileError::SymbolMissing {
                symbol: source.symbol.to_string(),
            })
    }
}
