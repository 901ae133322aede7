//! Tempo Eval - tree-walking evaluation core of the tempo script engine.
//!
//! Scripts attach behaviour to an audio graph: parameter automation, UI
//! callbacks, DSP glue. The front end builds a tree of [`Expr`] and [`Stmt`]
//! nodes once; the host then triggers evaluation by running the script body
//! or invoking named callbacks, and reads or writes named storage.
//!
//! # Architecture
//!
//! - [`Root`]: owns every storage tier and the tables of functions,
//!   callbacks, native snippets and API classes
//! - [`Scope`]: root plus the active frame, threaded through evaluation
//! - [`VarRef`]: an identifier bound to exactly one storage tier
//! - [`FunctionInstance`]: inline function with one shared call frame
//! - [`CallbackInstance`]: host entry point with per-invocation locals
//! - [`ApiClass`]: host API table resolved by index at call sites
//! - [`Engine`]: top-level evaluation boundary and error reporting
//!
//! Native snippets come from `tempo_native`; values and errors from
//! `tempo_value`.
//!
//! # Threading
//!
//! An engine is single-threaded and unsynchronised. Values are `Send +
//! Sync`, so results can be handed to other threads, but evaluation against
//! one engine must be serialised by the host.

mod api;
mod ast;
mod callback;
mod debug;
mod diagnostics;
mod engine;
mod eval;
mod function;
mod operators;
mod print_handler;
mod reference;
mod register;
mod root;
mod scope;
mod stack;
mod tracing_setup;

pub use api::{console_class, math_class, ApiClass, ApiClassBuilder};
pub use ast::{
    ApiCall, ConstObjectCall, Expr, ExprKind, InlineCall, NativeCall, Stmt, StmtKind,
    MAX_API_ARGS, MAX_OBJECT_ARGS,
};
pub use callback::CallbackInstance;
pub use debug::{DebugEntry, DebugInfo, DebugKind};
pub use diagnostics::{
    buffer_reporter, log_reporter, silent_reporter, ErrorReporter, SharedErrorReporter,
};
pub use engine::{Engine, EngineBuilder, EngineConfig, DEFAULT_MAX_CALL_DEPTH};
pub use function::{CallSiteId, FunctionInstance};
pub use operators::{evaluate_binary, evaluate_unary};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use reference::VarRef;
pub use register::{RegisterIndex, VarRegister};
pub use root::Root;
pub use scope::{Frame, Scope};
pub use stack::ensure_sufficient_stack;
pub use tracing_setup::init_tracing;

pub use tempo_ir::{BinaryOp, CodeLocation, LogicalOp, Name, SharedInterner, UnaryOp};
pub use tempo_native::{CcCompiler, CompileState, NativeDecl, NativeFunction, StaticSymbols};
pub use tempo_value::{ControlSignal, EvalError, EvalErrorKind, EvalResult, Value};

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap for clarity"
)]
mod tests;
