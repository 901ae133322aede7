//! Resolved variable references.
//!
//! Every identifier in a script is bound to exactly one storage tier while
//! the tree is built. The binding is a closed enum: evaluation matches on
//! the tag and goes straight to the storage, with no name lookup except for
//! the property-bag tiers (globals and locals), which hash an interned
//! `Name`.
//!
//! Function and callback tiers hold `Weak` handles. The instance owns the
//! body that contains the reference; a strong handle would keep every
//! instance alive forever.

use std::rc::{Rc, Weak};

use tempo_ir::Name;
use tempo_value::{
    dangling_function, parameter_outside_call, read_only_reference, EvalError, EvalResult, Value,
};

use crate::callback::CallbackInstance;
use crate::function::FunctionInstance;
use crate::register::RegisterIndex;
use crate::root::Root;
use crate::scope::Scope;

/// A variable reference bound to one storage tier.
#[derive(Clone, Debug)]
pub enum VarRef {
    /// Slot in the root's variable register.
    Register(RegisterIndex),
    /// Property of the engine-wide global bag.
    Global(Name),
    /// `var` inside an inline function; persists across its invocations.
    Local {
        function: Weak<FunctionInstance>,
        name: Name,
    },
    /// `local` inside a callback; cleared at every invocation.
    CallbackLocal {
        callback: Weak<CallbackInstance>,
        name: Name,
    },
    /// Argument of the active invocation of an inline function. Read-only.
    Parameter {
        function: Weak<FunctionInstance>,
        index: usize,
        name: Name,
    },
    /// Argument the host passed to the current callback. Read-only.
    CallbackParameter {
        callback: Weak<CallbackInstance>,
        index: usize,
        name: Name,
    },
}

impl VarRef {
    pub fn local(function: &Rc<FunctionInstance>, name: Name) -> Self {
        VarRef::Local {
            function: Rc::downgrade(function),
            name,
        }
    }

    pub fn callback_local(callback: &Rc<CallbackInstance>, name: Name) -> Self {
        VarRef::CallbackLocal {
            callback: Rc::downgrade(callback),
            name,
        }
    }

    /// Parameter `index` of `function`; `None` if it has fewer parameters.
    pub fn parameter(function: &Rc<FunctionInstance>, index: usize) -> Option<Self> {
        let name = *function.parameters().get(index)?;
        Some(VarRef::Parameter {
            function: Rc::downgrade(function),
            index,
            name,
        })
    }

    /// Parameter `index` of `callback`; `None` if it has fewer parameters.
    pub fn callback_parameter(callback: &Rc<CallbackInstance>, index: usize) -> Option<Self> {
        let name = *callback.parameter_names().get(index)?;
        Some(VarRef::CallbackParameter {
            callback: Rc::downgrade(callback),
            index,
            name,
        })
    }

    /// Identifier the reference was bound from.
    pub fn name(&self, root: &Root) -> Name {
        match self {
            VarRef::Register(index) => root.registers().name(*index).unwrap_or(Name::EMPTY),
            VarRef::Global(name)
            | VarRef::Local { name, .. }
            | VarRef::CallbackLocal { name, .. }
            | VarRef::Parameter { name, .. }
            | VarRef::CallbackParameter { name, .. } => *name,
        }
    }

    /// Whether `set` can succeed.
    pub fn is_writable(&self) -> bool {
        !matches!(
            self,
            VarRef::Parameter { .. } | VarRef::CallbackParameter { .. }
        )
    }

    pub fn get(&self, scope: &Scope<'_>) -> EvalResult {
        let root = scope.root();
        match self {
            VarRef::Register(index) => Ok(root.registers().get(*index)),
            VarRef::Global(name) => Ok(root.global(*name)),
            VarRef::Local { function, name } => Ok(live(function, *name, root)?.local(*name)),
            VarRef::CallbackLocal { callback, name } => {
                Ok(live(callback, *name, root)?.local(*name))
            }
            VarRef::Parameter {
                function,
                index,
                name,
            } => live(function, *name, root)?
                .read_parameter(*index)
                .ok_or_else(|| parameter_outside_call(root.interner().lookup(*name))),
            VarRef::CallbackParameter {
                callback,
                index,
                name,
            } => Ok(live(callback, *name, root)?.parameter(*index)),
        }
    }

    pub fn set(&self, scope: &Scope<'_>, value: Value) -> Result<(), EvalError> {
        let root = scope.root();
        match self {
            VarRef::Register(index) => root.registers().set(*index, value),
            VarRef::Global(name) => root.set_global(*name, value),
            VarRef::Local { function, name } => live(function, *name, root)?.set_local(*name, value),
            VarRef::CallbackLocal { callback, name } => {
                live(callback, *name, root)?.set_local(*name, value);
            }
            VarRef::Parameter { name, .. } | VarRef::CallbackParameter { name, .. } => {
                return Err(read_only_reference(root.interner().lookup(*name)));
            }
        }
        Ok(())
    }
}

fn live<T>(handle: &Weak<T>, name: Name, root: &Root) -> Result<Rc<T>, EvalError> {
    handle
        .upgrade()
        .ok_or_else(|| dangling_function(root.interner().lookup(name)))
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap for clarity"
)]
