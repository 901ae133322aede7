//! Tempo Value - runtime data shared by every part of the script engine.
//!
//! This crate provides:
//! - The Dynamic Value (`Value`) and its shared heap payloads
//! - `PropertyBag`, the `Name → Value` map behind globals, locals and objects
//! - The `NativeObject` contract host API objects implement
//! - Control-flow signals and located evaluation errors
//!
//! # Ownership
//!
//! Values never point back into the syntax tree. Heap payloads (strings,
//! arrays, objects, native objects) are `Arc`-shared: copying a `Value`
//! copies the tag and bumps a reference count, so storage tiers hold copies
//! rather than pointers into each other.

mod errors;
mod native;
mod property_bag;
mod signal;
mod value;

pub use errors::{
    arity_mismatch, callback_not_found, dangling_function, function_not_found, native_error,
    not_a_native_object, object_missing, parameter_outside_call, property_of_undefined,
    read_only_reference, recursion_limit, too_many_arguments, undefined_api_function,
    uncompiled_function, unsupported_native_return, EvalError, EvalErrorKind, EvalResult,
    StmtResult,
};
pub use native::{FunctionSlot, NativeObject};
pub use property_bag::PropertyBag;
pub use signal::ControlSignal;
pub use value::{ArrayRef, Heap, NativeRef, ObjectRef, Value};
