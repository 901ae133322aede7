//! Call-site nodes.
//!
//! Each call node pins its target when it is built: an inline call holds
//! the function instance, a static API call holds the class and the
//! resolved function slot, a native call holds the compiled snippet. Only
//! [`ConstObjectCall`] defers resolution to its first evaluation, because
//! the object it calls may not exist until the script has run.

use std::cell::OnceCell;
use std::rc::Rc;

use tempo_ir::Name;
use tempo_native::NativeFunction;
use tempo_value::{FunctionSlot, NativeRef};

use crate::function::{CallSiteId, FunctionInstance};
use crate::reference::VarRef;

use super::Expr;

/// Argument ceiling of a static API call.
pub const MAX_API_ARGS: usize = 5;

/// Argument ceiling of a lazily resolved object call.
pub const MAX_OBJECT_ARGS: usize = 4;

/// `f(a, b)` where `f` is an inline function.
#[derive(Debug)]
pub struct InlineCall {
    pub(crate) function: Rc<FunctionInstance>,
    pub(crate) args: Vec<Expr>,
    pub(crate) site: CallSiteId,
}

impl InlineCall {
    pub fn function(&self) -> &Rc<FunctionInstance> {
        &self.function
    }

    pub fn site(&self) -> CallSiteId {
        self.site
    }
}

/// `Class.function(...)` on a host API class.
#[derive(Debug)]
pub struct ApiCall {
    pub(crate) class: NativeRef,
    pub(crate) function: Name,
    pub(crate) slot: FunctionSlot,
    pub(crate) args: Vec<Expr>,
}

impl ApiCall {
    pub fn slot(&self) -> FunctionSlot {
        self.slot
    }
}

/// `object.function(...)` where `object` is a stored native object.
#[derive(Debug)]
pub struct ConstObjectCall {
    pub(crate) target: VarRef,
    pub(crate) function: Name,
    pub(crate) args: Vec<Expr>,
    /// Set on the first successful resolution and never cleared.
    pub(crate) resolved: OnceCell<(NativeRef, FunctionSlot)>,
}

impl ConstObjectCall {
    /// Whether a previous evaluation has resolved the target.
    pub fn is_resolved(&self) -> bool {
        self.resolved.get().is_some()
    }
}

/// Call of a script-declared C function.
#[derive(Debug)]
pub struct NativeCall {
    pub(crate) function: Rc<NativeFunction>,
    pub(crate) args: Vec<Expr>,
}
