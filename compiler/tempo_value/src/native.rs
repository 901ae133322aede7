//! Contract for host-provided API objects.

use std::fmt;

use tempo_ir::Name;

use crate::{EvalResult, Value};

/// Position and arity of one function in a native object's table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FunctionSlot {
    /// Index passed back to [`NativeObject::call_function`].
    pub index: usize,
    /// Number of arguments the function expects.
    pub num_args: usize,
}

/// A fixed native object exposing callable functions by a stable table.
///
/// Call sites look a function up once, keep the returned [`FunctionSlot`],
/// and from then on call by index. Implementations must keep indices stable
/// for the lifetime of the object.
pub trait NativeObject: Send + Sync {
    /// Class name shown in diagnostics and debugger type columns.
    fn class_name(&self) -> &str;

    /// Resolve a function by name.
    fn function_slot(&self, name: Name) -> Option<FunctionSlot>;

    /// Invoke the function at `index`.
    ///
    /// `args.len()` always equals the `num_args` of the resolved slot.
    fn call_function(&self, index: usize, args: &[Value]) -> EvalResult;

    /// Constant exposed by the class (e.g. `Math.PI`), folded into the tree
    /// when the script is built.
    fn constant(&self, _name: Name) -> Option<Value> {
        None
    }
}

impl fmt::Debug for dyn NativeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeObject({})", self.class_name())
    }
}
