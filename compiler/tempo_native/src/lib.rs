//! Tempo Native - compile short C snippets and call them from scripts.
//!
//! A script may declare a function whose body is C source. The snippet is
//! compiled once, when the declaring node is built, by a [`SnippetCompiler`].
//! The resulting [`NativeCode`] is a signature-erased entry point; at call
//! time it is re-typed by argument count (0–4) and invoked with one opaque
//! pointer per evaluated argument.
//!
//! # Safety Boundary
//!
//! All `unsafe` in the workspace lives in this crate, in two places:
//! - [`cc`]: loading the compiled shared object and resolving the symbol
//! - [`arity`]: casting the erased entry point to its fixed-arity C type
//!
//! The bridge checks argument counts and nothing else. A snippet whose C
//! signature disagrees with its declaration is undefined behaviour; the
//! declaration is trusted the same way a C header is.

mod arity;
mod cc;
mod code;
mod function;
mod static_symbols;

pub use arity::{Arity, MAX_NATIVE_ARGS};
pub use cc::CcCompiler;
pub use code::{CompileError, NativeCode, SnippetCompiler, SnippetSource};
pub use function::{CompileState, NativeDecl, NativeFunction};
pub use static_symbols::StaticSymbols;
