//! `EngineBuilder` and the configuration it produces.

use std::fmt;
use std::rc::Rc;

use tempo_ir::SharedInterner;
use tempo_native::{CcCompiler, SnippetCompiler};

use super::Engine;
use crate::diagnostics::{log_reporter, SharedErrorReporter};
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::root::Root;

/// Default bound on nested function and callback frames.
pub const DEFAULT_MAX_CALL_DEPTH: usize = 512;

/// Engine-wide settings.
#[derive(Clone)]
pub struct EngineConfig {
    /// Nested function/callback frames allowed before a call fails with
    /// a recursion-limit error.
    pub max_call_depth: usize,
    /// Receives every error that aborts a top-level evaluation.
    pub reporter: SharedErrorReporter,
    /// Output of `Console.print`.
    pub print_handler: SharedPrintHandler,
    /// Compiles native snippets when they are declared.
    pub snippet_compiler: Rc<dyn SnippetCompiler>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_call_depth: DEFAULT_MAX_CALL_DEPTH,
            reporter: log_reporter(),
            print_handler: stdout_handler(),
            snippet_compiler: Rc::new(CcCompiler::new()),
        }
    }
}

impl fmt::Debug for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineConfig")
            .field("max_call_depth", &self.max_call_depth)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Engine`].
#[derive(Default)]
pub struct EngineBuilder {
    config: EngineConfig,
    interner: Option<SharedInterner>,
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.config.max_call_depth = depth;
        self
    }

    #[must_use]
    pub fn reporter(mut self, reporter: SharedErrorReporter) -> Self {
        self.config.reporter = reporter;
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.config.print_handler = handler;
        self
    }

    #[must_use]
    pub fn snippet_compiler(mut self, compiler: impl SnippetCompiler + 'static) -> Self {
        self.config.snippet_compiler = Rc::new(compiler);
        self
    }

    /// Share an interner with the script front end. A fresh one is created
    /// otherwise.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    pub fn build(self) -> Engine {
        let config = self.config;
        let root = Root::new(
            self.interner.unwrap_or_default(),
            config.max_call_depth,
            Rc::clone(&config.snippet_compiler),
            config.print_handler.clone(),
        );
        Engine { root, config }
    }
}
