//! Declared native functions.
//!
//! A `NativeFunction` is created once per script declaration. Construction
//! runs the compiler; the outcome is recorded in [`CompileState`] and never
//! revisited, so a snippet that failed to compile fails every call.

use std::fmt;

use tempo_value::{
    arity_mismatch, uncompiled_function, unsupported_native_return, EvalError, Value,
};

use crate::arity::{self, Arity, MAX_NATIVE_ARGS};
use crate::code::{CompileError, NativeCode, SnippetCompiler, SnippetSource};

/// What a script declared.
#[derive(Clone, Debug, Default)]
pub struct NativeDecl {
    pub name: String,
    /// The C signature returns something other than `void`.
    pub has_return_type: bool,
    pub arguments: Vec<String>,
    pub comment: String,
    /// Full C source of the function, signature included.
    pub code: String,
}

/// Lifecycle of the compiled snippet: `Uncompiled → Compiling →
/// {CompiledOk, CompileFailed}`.
///
/// [`NativeFunction::compile`] runs the whole lifecycle synchronously, so
/// after construction `state()` only ever reports one of the two terminal
/// states. The transitions are traced at `trace` level.
#[derive(Debug)]
pub enum CompileState {
    Uncompiled,
    Compiling,
    CompiledOk(NativeCode),
    CompileFailed(CompileError),
}

impl CompileState {
    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, CompileState::CompiledOk(_))
    }
}

/// A script-declared C function.
pub struct NativeFunction {
    decl: NativeDecl,
    signature: String,
    arity: Option<Arity>,
    state: CompileState,
}

impl NativeFunction {
    /// Record the declaration and compile it with `compiler`.
    ///
    /// Never fails: a failed compilation is kept in the state and reported
    /// by each call attempt.
    pub fn compile(compiler: &dyn SnippetCompiler, decl: NativeDecl) -> Self {
        let signature = derive_signature(&decl.code, &decl.name);
        let arity = Arity::from_count(decl.arguments.len());
        tracing::trace!(function = %decl.name, "native snippet uncompiled");
        let state = run_compiler(compiler, &decl, arity);
        NativeFunction {
            decl,
            signature,
            arity,
            state,
        }
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn arguments(&self) -> &[String] {
        &self.decl.arguments
    }

    pub fn comment(&self) -> &str {
        &self.decl.comment
    }

    pub fn has_return_type(&self) -> bool {
        self.decl.has_return_type
    }

    /// Signature text taken from the code, e.g. `gain(void* in, void* out)`.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn state(&self) -> &CompileState {
        &self.state
    }

    /// Check everything a call needs except the arguments themselves.
    ///
    /// Call sites run this before evaluating arguments so a dead snippet
    /// does not evaluate its argument expressions.
    pub fn check_callable(&self) -> Result<(Arity, &NativeCode), EvalError> {
        let CompileState::CompiledOk(code) = &self.state else {
            return Err(uncompiled_function(&self.decl.name));
        };
        if self.decl.has_return_type {
            return Err(unsupported_native_return(&self.decl.name));
        }
        match self.arity {
            Some(arity) => Ok((arity, code)),
            None => Err(uncompiled_function(&self.decl.name)),
        }
    }

    /// Invoke the snippet with one pointer per value. The return is ignored.
    pub fn call(&self, args: &mut [Value]) -> Result<(), EvalError> {
        let (arity, code) = self.check_callable()?;
        if args.len() != arity.count() {
            return Err(arity_mismatch(&self.decl.name, arity.count(), args.len()));
        }
        tracing::trace!(function = %self.decl.name, args = args.len(), "native call");
        // SAFETY: `code` came from a compiler for this declaration, whose
        // argument count is `arity`, and `args` has exactly that many values.
        unsafe { arity::invoke(code.entry(), arity, args) };
        Ok(())
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("signature", &self.signature)
            .field("compiled", &self.state.is_ok())
            .finish_non_exhaustive()
    }
}

/// Drive a declaration from `Compiling` to its terminal state.
fn run_compiler(
    compiler: &dyn SnippetCompiler,
    decl: &NativeDecl,
    arity: Option<Arity>,
) -> CompileState {
    if arity.is_none() {
        let error = CompileError::UnsupportedArity {
            symbol: decl.name.clone(),
            count: decl.arguments.len(),
            max: MAX_NATIVE_ARGS,
        };
        tracing::warn!(function = %decl.name, %error, "native snippet rejected");
        return CompileState::CompileFailed(error);
    }

    tracing::trace!(function = %decl.name, "native snippet compiling");
    let source = SnippetSource {
        symbol: &decl.name,
        code: &decl.code,
    };
    match compiler.compile(&source) {
        Ok(code) => {
            tracing::debug!(function = %decl.name, "native snippet compiled");
            CompileState::CompiledOk(code)
        }
        Err(error) => {
            tracing::warn!(function = %decl.name, %error, "native snippet failed to compile");
            CompileState::CompileFailed(error)
        }
    }
}

/// Text after the return type up to and including the first `)`.
///
/// Falls back to `name()` when the code has no recognisable signature.
fn derive_signature(code: &str, name: &str) -> String {
    let trimmed = code.trim_start();
    let after_type = trimmed
        .split_once(char::is_whitespace)
        .map_or(trimmed, |(_, rest)| rest.trim_start());
    match after_type.find(')') {
        Some(end) => after_type[..=end].to_string(),
        None => format!("{name}()"),
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap for clarity"
)]
mod tests;
