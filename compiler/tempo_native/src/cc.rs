//! System C compiler backend.
//!
//! Writes the snippet behind a small prelude into a scratch directory,
//! builds it as a shared object with the host C compiler (`$CC`, falling
//! back to `cc`) and loads it with `libloading`. The scratch directory is
//! removed once the library is mapped.

use std::ffi::{c_void, OsString};
use std::path::Path;
use std::process::Command;
use std::ptr::NonNull;

use crate::code::{CompileError, NativeCode, SnippetCompiler, SnippetSource};

/// Prepended to every snippet.
const PRELUDE: &str = "#include <math.h>\n";

const DEFAULT_FLAGS: &[&str] = &["-shared", "-fPIC", "-O2"];

/// Compiles snippets with an external C compiler.
#[derive(Clone, Debug)]
pub struct CcCompiler {
    program: OsString,
    flags: Vec<String>,
}

impl CcCompiler {
    /// Use `$CC` if set, otherwise `cc`.
    pub fn new() -> Self {
        let program = std::env::var_os("CC").unwrap_or_else(|| OsString::from("cc"));
        Self::with_program(program)
    }

    pub fn with_program(program: impl Into<OsString>) -> Self {
        CcCompiler {
            program: program.into(),
            flags: DEFAULT_FLAGS.iter().map(|f| (*f).to_string()).collect(),
        }
    }

    /// Append an extra compiler flag (e.g. `-ffast-math`).
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.flags.push(flag.into());
        self
    }

    fn build(&self, source_path: &Path, output_path: &Path, symbol: &str) -> Result<(), CompileError> {
        let output = Command::new(&self.program)
            .args(&self.flags)
            .arg("-o")
            .arg(output_path)
            .arg(source_path)
            .arg("-lm")
            .output()
            .map_err(|e| CompileError::CompilerUnavailable {
                program: self.program.to_string_lossy().into_owned(),
                reason: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(CompileError::Rejected {
                symbol: symbol.to_string(),
                diagnostics: String::from_utf8_lossy(&output.stderr).trim_end().to_string(),
            })
        }
    }
}

impl Default for CcCompiler {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetCompiler for CcCompiler {
    #[tracing::instrument(level = "debug", skip_all, fields(symbol = source.symbol))]
    fn compile(&self, source: &SnippetSource<'_>) -> Result<NativeCode, CompileError> {
        let scratch = tempfile::tempdir()?;
        let source_path = scratch.path().join("snippet.c");
        let output_path = scratch
            .path()
            .join(format!("snippet{}", std::env::consts::DLL_SUFFIX));

        std::fs::write(&source_path, format!("{PRELUDE}{}\n", source.code))?;
        self.build(&source_path, &output_path, source.symbol)?;

        // SAFETY: the library was just produced from the snippet; its
        // initialisers are whatever the snippet declares, which the script
        // author controls the same way they control the snippet body.
        let library = unsafe { libloading::Library::new(&output_path) }.map_err(|e| {
            CompileError::LoadFailed {
                reason: e.to_string(),
            }
        })?;

        // SAFETY: the symbol is only read as an address here; it is re-typed
        // by arity at call time.
        let address = unsafe { library.get::<*mut c_void>(source.symbol.as_bytes()) }
            .map(|symbol| *symbol)
            .map_err(|_| CompileError::SymbolMissing {
                symbol: source.symbol.to_string(),
            })?;

        let entry = NonNull::new(address).ok_or_else(|| CompileError::SymbolMissing {
            symbol: source.symbol.to_string(),
        })?;

        tracing::debug!(symbol = source.symbol, "native snippet loaded");
        Ok(NativeCode::from_library(entry, library))
    }
}
