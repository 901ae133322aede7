//! Evaluation errors.
//!
//! Every failure inside the evaluation core is an `EvalError`: a structured
//! [`EvalErrorKind`], the rendered message and, once a node has claimed it,
//! the source location of that node. Errors propagate with `?` up to the
//! top-level evaluation boundary, which reports them to the host.
//!
//! Factory functions (e.g. `arity_mismatch()`) are the public constructors.
//! They are `#[cold]` so the hot evaluation paths stay small.

use std::fmt;

use tempo_ir::CodeLocation;

use crate::{ControlSignal, Value};

/// Result of evaluating an expression.
pub type EvalResult = Result<Value, EvalError>;

/// Result of performing a statement.
pub type StmtResult = Result<ControlSignal, EvalError>;

/// Typed error category.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalErrorKind {
    // Binding
    /// Native object has no function with this name.
    UndefinedApiFunction { class: String, function: String },
    /// Call site passes a different number of arguments than the callee takes.
    ArityMismatch {
        function: String,
        expected: usize,
        got: usize,
    },
    /// Call site exceeds the fixed argument ceiling of its dispatch path.
    TooManyArguments { max: usize, got: usize },
    /// The slot a lazy API call targets holds no object.
    ObjectMissing { name: String },
    /// The slot a lazy API call targets holds a non-API value.
    NotANativeObject { type_name: String },
    /// Host asked for a callback that was never defined.
    UndefinedCallback { name: String },
    /// Host asked for an inline function that was never defined.
    UndefinedFunction { name: String },

    // Call safety
    /// Parameter read while its function has no active invocation.
    ParameterOutsideCall { name: String },
    /// A reference outlived the function or callback instance it points to.
    DanglingFunction { name: String },
    /// Native snippet never compiled; calls fail without retrying.
    UncompiledFunction { name: String },
    /// Native snippet declared a return type, which the bridge cannot marshal.
    UnsupportedNativeReturn { name: String },
    /// Write through a read-only reference (parameters).
    ReadOnlyReference { name: String },
    /// Nested call depth exceeded the configured limit.
    RecursionLimit { depth: usize },

    // Access
    /// Member read on `undefined`.
    PropertyOfUndefined { property: String },

    /// Error raised by a native API implementation.
    Native { message: String },

    /// Catch-all for host-constructed errors.
    Custom { message: String },
}

impl fmt::Display for EvalErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UndefinedApiFunction { class, function } => {
                write!(f, "function {function} not found in {class}")
            }
            Self::ArityMismatch {
                function,
                expected,
                got,
            } => {
                let arg_word = if *expected == 1 {
                    "argument"
                } else {
                    "arguments"
                };
                write!(f, "{function} expects {expected} {arg_word}, got {got}")
            }
            Self::TooManyArguments { max, got } => {
                write!(f, "too many arguments: at most {max} supported, got {got}")
            }
            Self::ObjectMissing { name } => write!(f, "object {name} does not exist"),
            Self::NotANativeObject { type_name } => {
                write!(f, "{type_name} is not an API object")
            }
            Self::UndefinedCallback { name } => write!(f, "callback {name} is not defined"),
            Self::UndefinedFunction { name } => write!(f, "function {name} is not defined"),
            Self::ParameterOutsideCall { name } => write!(
                f,
                "accessing parameter reference {name} outside the function call"
            ),
            Self::DanglingFunction { name } => write!(f, "{name} belongs to a function that no longer exists"),
            Self::UncompiledFunction { name } => {
                write!(f, "trying to call uncompiled function {name}")
            }
            Self::UnsupportedNativeReturn { name } => write!(
                f,
                "native function {name} declares a return value, which is not supported"
            ),
            Self::ReadOnlyReference { name } => write!(f, "cannot assign to {name}"),
            Self::RecursionLimit { depth } => {
                write!(f, "maximum call depth exceeded (limit: {depth})")
            }
            Self::PropertyOfUndefined { property } => {
                write!(f, "cannot read property {property} of undefined")
            }
            Self::Native { message } | Self::Custom { message } => write!(f, "{message}"),
        }
    }
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    /// Structured error category.
    pub kind: EvalErrorKind,
    /// Human-readable message, equal to `kind.to_string()` for factory errors.
    pub message: String,
    /// Location of the innermost node that raised or claimed the error.
    pub location: Option<CodeLocation>,
    /// Callback or function the failing evaluation ran in.
    pub context: Option<String>,
}

impl EvalError {
    /// Create an error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            kind: EvalErrorKind::Custom {
                message: message.clone(),
            },
            message,
            location: None,
            context: None,
        }
    }

    fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            message,
            location: None,
            context: None,
        }
    }

    /// Attach a location unless a more specific one is already present.
    #[must_use]
    pub fn with_location(mut self, location: CodeLocation) -> Self {
        if self.location.is_none() {
            self.location = Some(location);
        }
        self
    }

    /// Attach the evaluation context unless one is already present.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if self.context.is_none() {
            self.context = Some(context.into());
        }
        self
    }

    /// Whether a node location has been attached.
    #[inline]
    pub fn is_located(&self) -> bool {
        self.location.is_some()
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(context) = &self.context {
            write!(f, "{context}: ")?;
        }
        match self.location {
            Some(location) if location.is_known() => write!(f, "{location}: {}", self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for EvalError {}

// Binding Errors

/// Native object has no function with this name.
#[cold]
pub fn undefined_api_function(class: &str, function: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedApiFunction {
        class: class.to_string(),
        function: function.to_string(),
    })
}

/// Argument count differs from the callee's expected count.
#[cold]
pub fn arity_mismatch(function: &str, expected: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ArityMismatch {
        function: function.to_string(),
        expected,
        got,
    })
}

/// Argument count exceeds the dispatch ceiling.
#[cold]
pub fn too_many_arguments(max: usize, got: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooManyArguments { max, got })
}

/// Lazy API call target holds nothing.
#[cold]
pub fn object_missing(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ObjectMissing {
        name: name.to_string(),
    })
}

/// Lazy API call target holds a non-API value.
#[cold]
pub fn not_a_native_object(type_name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotANativeObject {
        type_name: type_name.to_string(),
    })
}

/// Host invoked an unknown callback.
#[cold]
pub fn callback_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedCallback {
        name: name.to_string(),
    })
}

/// Host invoked an unknown inline function.
#[cold]
pub fn function_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UndefinedFunction {
        name: name.to_string(),
    })
}

// Call-Safety Errors

/// Parameter read outside an active call.
#[cold]
pub fn parameter_outside_call(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ParameterOutsideCall {
        name: name.to_string(),
    })
}

/// Reference to a torn-down instance.
#[cold]
pub fn dangling_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DanglingFunction {
        name: name.to_string(),
    })
}

/// Call through a native snippet that failed to compile.
#[cold]
pub fn uncompiled_function(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UncompiledFunction {
        name: name.to_string(),
    })
}

/// Call through a native snippet that declares a return value.
#[cold]
pub fn unsupported_native_return(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnsupportedNativeReturn {
        name: name.to_string(),
    })
}

/// Assignment through a read-only reference.
#[cold]
pub fn read_only_reference(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ReadOnlyReference {
        name: name.to_string(),
    })
}

/// Call depth limit exceeded.
#[cold]
pub fn recursion_limit(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursionLimit { depth })
}

// Access Errors

/// Member read on `undefined`.
#[cold]
pub fn property_of_undefined(property: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::PropertyOfUndefined {
        property: property.to_string(),
    })
}

/// Error raised by a native API implementation.
#[cold]
pub fn native_error(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Native {
        message: message.into(),
    })
}
