//! Host-triggered callbacks.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tempo_ir::{Name, StringInterner};
use tempo_value::{ControlSignal, EvalResult, PropertyBag, Value};

use crate::ast::Stmt;
use crate::scope::{Frame, Scope};

/// A named entry point the host invokes (`onNoteOn`, `onControl`, ...).
///
/// Each invocation starts with an empty local-property bag, so `local`
/// variables never leak from one event to the next. Parameters hold the
/// values the host passed to the current (or most recent) invocation.
pub struct CallbackInstance {
    name: Name,
    display_name: String,
    parameter_names: Vec<Name>,
    parameters: RefCell<Vec<Value>>,
    locals: RefCell<PropertyBag>,
    body: RefCell<Option<Rc<Stmt>>>,
}

impl CallbackInstance {
    pub(crate) fn new(interner: &StringInterner, name: Name, parameter_names: Vec<Name>) -> Rc<Self> {
        Rc::new(CallbackInstance {
            name,
            display_name: interner.lookup(name).to_string(),
            parameters: RefCell::new(vec![Value::Undefined; parameter_names.len()]),
            parameter_names,
            locals: RefCell::new(PropertyBag::new()),
            body: RefCell::new(None),
        })
    }

    pub fn name(&self) -> Name {
        self.name
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn parameter_names(&self) -> &[Name] {
        &self.parameter_names
    }

    pub fn set_body(&self, body: Stmt) {
        *self.body.borrow_mut() = Some(Rc::new(body));
    }

    pub(crate) fn release_body(&self) {
        self.body.borrow_mut().take();
    }

    pub(crate) fn parameter(&self, index: usize) -> Value {
        self.parameters
            .borrow()
            .get(index)
            .cloned()
            .unwrap_or_default()
    }

    pub fn local(&self, name: Name) -> Value {
        self.locals.borrow().get(name)
    }

    pub(crate) fn set_local(&self, name: Name, value: Value) {
        self.locals.borrow_mut().set(name, value);
    }

    /// Run the body with `args` bound to the parameters.
    pub(crate) fn invoke(&self, scope: &Scope<'_>, args: &[Value]) -> EvalResult {
        let body_scope = scope.enter(Frame::Callback(self))?;

        self.locals.borrow_mut().clear();
        {
            let mut parameters = self.parameters.borrow_mut();
            parameters.fill(Value::Undefined);
            for (slot, value) in parameters.iter_mut().zip(args) {
                *slot = value.clone();
            }
        }

        let Some(body) = self.body.borrow().clone() else {
            return Ok(Value::Undefined);
        };
        let mut return_value = Value::Undefined;
        match body.perform(&body_scope, &mut return_value)? {
            ControlSignal::Return => Ok(return_value),
            _ => Ok(Value::Undefined),
        }
    }
}

impl fmt::Debug for CallbackInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackInstance")
            .field("name", &self.display_name)
            .field("parameters", &self.parameter_names.len())
            .finish_non_exhaustive()
    }
}
