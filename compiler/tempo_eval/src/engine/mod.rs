//! The engine facade: host entry points around a [`Root`].
//!
//! Each entry point is a top-level evaluation boundary. An error that
//! escapes it has been raised by some node inside; the engine reports it
//! once through the configured [`ErrorReporter`](crate::ErrorReporter),
//! logs it, and hands it back to the host. Nothing is retried and the
//! engine stays usable.

mod builder;

use tempo_value::{arity_mismatch, callback_not_found, function_not_found, ControlSignal, EvalResult, Value};

use crate::ast::Stmt;
use crate::function::CallSiteId;
use crate::root::Root;
use crate::scope::Scope;

pub use builder::{EngineBuilder, EngineConfig, DEFAULT_MAX_CALL_DEPTH};

/// One script instance.
///
/// Single-threaded: the host must not evaluate against one engine from two
/// threads at once. Dropping the engine releases every function body.
#[derive(Debug)]
pub struct Engine {
    root: Root,
    config: EngineConfig,
}

impl Engine {
    pub fn new() -> Self {
        EngineBuilder::new().build()
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Binding and storage access for the script front end and the host.
    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run top-level script code. Returns the value of a top-level `return`,
    /// or `undefined`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn execute(&self, body: &Stmt) -> EvalResult {
        let scope = Scope::new(&self.root);
        let mut return_value = Value::Undefined;
        let outcome = body.perform(&scope, &mut return_value).map(|signal| {
            if signal == ControlSignal::Return {
                return_value
            } else {
                Value::Undefined
            }
        });
        self.finish(outcome)
    }

    /// Invoke the callback named `name` with host-supplied arguments.
    pub fn invoke_callback(&self, name: &str, args: &[Value]) -> EvalResult {
        let _span = tracing::debug_span!("callback", name, args = args.len()).entered();
        let outcome = match self.root.callback(name) {
            Some(callback) if callback.parameter_names().len() != args.len() => Err(
                arity_mismatch(name, callback.parameter_names().len(), args.len()),
            ),
            Some(callback) => callback
                .invoke(&Scope::new(&self.root), args)
                .map_err(|error| error.with_context(name)),
            None => Err(callback_not_found(name)),
        };
        self.finish(outcome)
    }

    /// Call the inline function named `name` from the host.
    pub fn call_function(&self, name: &str, args: &[Value]) -> EvalResult {
        let _span = tracing::debug_span!("host_call", name, args = args.len()).entered();
        let outcome = match self.root.function(name) {
            Some(function) if function.parameter_count() != args.len() => Err(arity_mismatch(
                name,
                function.parameter_count(),
                args.len(),
            )),
            Some(function) => function
                .invoke(&Scope::new(&self.root), CallSiteId::HOST, args)
                .map_err(|error| error.with_context(function.signature())),
            None => Err(function_not_found(name)),
        };
        self.finish(outcome)
    }

    fn finish(&self, outcome: EvalResult) -> EvalResult {
        if let Err(error) = &outcome {
            tracing::debug!(%error, "evaluation aborted");
            self.config.reporter.report(error);
        }
        outcome
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
