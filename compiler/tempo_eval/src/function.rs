//! Inline functions and their shared call frame.
//!
//! A `FunctionInstance` is created once when the script is built and shared
//! by every call site that targets it. It owns exactly one call frame: the
//! results array the parameter references read from, and the id of the call
//! site that installed it.
//!
//! # Re-entrancy
//!
//! The frame is per instance, not per invocation. A nested call of the same
//! instance (recursion, or a call that re-enters through another function)
//! overwrites the frame, and the outer invocation reads the inner arguments
//! from then on. The frame is cleared only when the outermost active
//! invocation completes, so the outer body keeps running against the
//! overwritten values instead of failing on a cleared frame.
//!
//! ```text
//! inline function f(n) { if (n == 1) { f(2); return n; } return 0; }
//! f(1)    // 2: the inner call left n = 2 in the shared frame
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use tempo_ir::{Name, StringInterner};
use tempo_value::{ControlSignal, EvalResult, PropertyBag, Value};

use crate::ast::Stmt;
use crate::scope::{Frame, Scope};

/// Identity of a call expression targeting a function instance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CallSiteId(u32);

impl CallSiteId {
    /// Calls made by the host rather than from script code.
    pub const HOST: CallSiteId = CallSiteId(0);
}

#[derive(Debug, Default)]
struct CallFrame {
    results: Vec<Value>,
    active_call: Option<CallSiteId>,
}

/// A user-defined inline function.
pub struct FunctionInstance {
    name: Name,
    parameters: Vec<Name>,
    parameter_text: Vec<&'static str>,
    /// `name(a, b)`, shown by the debugger.
    signature: String,
    comment: RefCell<String>,
    body: RefCell<Option<Rc<Stmt>>>,
    frame: RefCell<CallFrame>,
    /// Number of invocations currently running.
    depth: Cell<usize>,
    next_call_site: Cell<u32>,
    locals: RefCell<PropertyBag>,
    last_return_value: RefCell<Value>,
}

impl FunctionInstance {
    pub(crate) fn new(interner: &StringInterner, name: Name, parameters: Vec<Name>) -> Rc<Self> {
        let parameter_text: Vec<&'static str> =
            parameters.iter().map(|p| interner.lookup(*p)).collect();
        let signature = format!("{}({})", interner.lookup(name), parameter_text.join(", "));
        Rc::new(FunctionInstance {
            name,
            frame: RefCell::new(CallFrame {
                results: vec![Value::Undefined; parameters.len()],
                active_call: None,
            }),
            parameters,
            parameter_text,
            signature,
            comment: RefCell::new(String::new()),
            body: RefCell::new(None),
            depth: Cell::new(0),
            next_call_site: Cell::new(1),
            locals: RefCell::new(PropertyBag::new()),
            last_return_value: RefCell::new(Value::Undefined),
        })
    }

    #[inline]
    pub fn name(&self) -> Name {
        self.name
    }

    pub fn parameters(&self) -> &[Name] {
        &self.parameters
    }

    /// Parameter names as written in the declaration.
    pub fn parameter_names(&self) -> &[&'static str] {
        &self.parameter_text
    }

    #[inline]
    pub fn parameter_count(&self) -> usize {
        self.parameters.len()
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn comment(&self) -> String {
        self.comment.borrow().clone()
    }

    pub fn set_comment(&self, comment: impl Into<String>) {
        *self.comment.borrow_mut() = comment.into();
    }

    /// Install the body. Bodies are attached after the instance exists so
    /// they can call the function they belong to.
    pub fn set_body(&self, body: Stmt) {
        *self.body.borrow_mut() = Some(Rc::new(body));
    }

    pub fn has_body(&self) -> bool {
        self.body.borrow().is_some()
    }

    /// Drop the body, breaking instance → body → call site → instance cycles.
    pub(crate) fn release_body(&self) {
        self.body.borrow_mut().take();
    }

    pub(crate) fn allocate_call_site(&self) -> CallSiteId {
        let id = self.next_call_site.get();
        self.next_call_site.set(id.wrapping_add(1).max(1));
        CallSiteId(id)
    }

    /// Call site whose arguments the frame currently holds.
    pub fn active_call(&self) -> Option<CallSiteId> {
        self.frame.borrow().active_call
    }

    /// Whether any invocation is running.
    pub fn is_active(&self) -> bool {
        self.depth.get() > 0
    }

    /// Live argument `index`, or `None` outside an active call.
    pub(crate) fn read_parameter(&self, index: usize) -> Option<Value> {
        let frame = self.frame.borrow();
        frame.active_call?;
        Some(frame.results.get(index).cloned().unwrap_or_default())
    }

    pub fn local(&self, name: Name) -> Value {
        self.locals.borrow().get(name)
    }

    pub(crate) fn set_local(&self, name: Name, value: Value) {
        self.locals.borrow_mut().set(name, value);
    }

    /// Result of the most recent completed invocation.
    pub fn last_return_value(&self) -> Value {
        self.last_return_value.borrow().clone()
    }

    /// Bind `args` into the shared frame and perform the body.
    ///
    /// `args` were evaluated in the caller's scope; their count matches the
    /// parameter count (checked when the call site was built).
    pub(crate) fn invoke(&self, scope: &Scope<'_>, site: CallSiteId, args: &[Value]) -> EvalResult {
        let body_scope = scope.enter(Frame::Function(self))?;
        tracing::trace!(
            function = %self.signature,
            depth = body_scope.depth(),
            nested = self.is_active(),
            "inline call"
        );

        let body = self.body.borrow().clone();
        let result = {
            let _frame = self.install(site, args);
            let mut return_value = Value::Undefined;
            let signal = match &body {
                Some(body) => body.perform(&body_scope, &mut return_value)?,
                None => ControlSignal::Normal,
            };
            if signal == ControlSignal::Return {
                return_value
            } else {
                Value::Undefined
            }
        };

        *self.last_return_value.borrow_mut() = result.clone();
        Ok(result)
    }

    fn install(&self, site: CallSiteId, args: &[Value]) -> FrameGuard<'_> {
        {
            let mut frame = self.frame.borrow_mut();
            frame.active_call = Some(site);
            for (slot, value) in frame.results.iter_mut().zip(args) {
                *slot = value.clone();
            }
        }
        self.depth.set(self.depth.get() + 1);
        FrameGuard { function: self }
    }
}

/// Leaves the frame on drop, including when the body fails.
struct FrameGuard<'f> {
    function: &'f FunctionInstance,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let function = self.function;
        let depth = function.depth.get().saturating_sub(1);
        function.depth.set(depth);
        if depth == 0 {
            let mut frame = function.frame.borrow_mut();
            frame.results.fill(Value::Undefined);
            frame.active_call = None;
        }
    }
}

impl fmt::Debug for FunctionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionInstance")
            .field("signature", &self.signature)
            .field("depth", &self.depth.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap for clarity"
)]
