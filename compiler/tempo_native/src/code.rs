//! Compiled code handles and the compiler seam.

use std::ffi::c_void;
use std::fmt;
use std::ptr::NonNull;

/// Why a snippet did not produce a callable entry point.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    #[error("the native compiler `{program}` could not be started: {reason}")]
    CompilerUnavailable { program: String, reason: String },
    #[error("error at compiling external C function {symbol}:\n{diagnostics}")]
    Rejected { symbol: String, diagnostics: String },
    #[error("the compiled code could not be loaded: {reason}")]
    LoadFailed { reason: String },
    #[error("the function {symbol} couldn't be found in the compiled code")]
    SymbolMissing { symbol: String },
    #[error("native functions take at most {max} arguments, {symbol} declares {count}")]
    UnsupportedArity {
        symbol: String,
        count: usize,
        max: usize,
    },
    #[error("i/o error while compiling: {0}")]
    Io(#[from] std::io::Error),
}

/// Source handed to a [`SnippetCompiler`].
#[derive(Clone, Copy, Debug)]
pub struct SnippetSource<'a> {
    /// Symbol to resolve after compilation.
    pub symbol: &'a str,
    /// C source of the snippet, without the prelude.
    pub code: &'a str,
}

/// Embedded compiler seam.
///
/// Compilation is synchronous and happens on the thread that builds the
/// declaring node. Implementations never cache failures; the caller records
/// the outcome and does not retry.
pub trait SnippetCompiler {
    fn compile(&self, source: &SnippetSource<'_>) -> Result<NativeCode, CompileError>;
}

/// Owned handle to compiled machine code.
///
/// Keeps whatever owns the code (a loaded shared object) alive for as long
/// as the entry point may be called. The entry point's type is erased; it is
/// re-typed per call by [`Arity`](crate::Arity).
pub struct NativeCode {
    entry: NonNull<c_void>,
    _owner: Option<libloading::Library>,
}

impl NativeCode {
    /// Wrap an entry point from a library that must stay loaded.
    pub(crate) fn from_library(entry: NonNull<c_void>, library: libloading::Library) -> Self {
        NativeCode {
            entry,
            _owner: Some(library),
        }
    }

    /// Wrap an entry point linked into the host binary.
    pub(crate) fn from_static(entry: NonNull<c_void>) -> Self {
        NativeCode {
            entry,
            _owner: None,
        }
    }

    /// Erased entry point.
    #[inline]
    pub fn entry(&self) -> NonNull<c_void> {
        self.entry
    }
}

impl fmt::Debug for NativeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeCode")
            .field("entry", &self.entry)
            .field("loaded", &self._owner.is_some())
            .finish()
    }
}
