//! Host API classes.
//!
//! An [`ApiClass`] is a fixed table of native functions and constants built
//! once by the host. Call sites resolve a function to its [`FunctionSlot`]
//! when the tree is built and call by index afterwards.
//!
//! ```text
//! let synth = ApiClass::builder("Synth", &interner)
//!     .function("noteOn", 2, |args| { ... })
//!     .constant("MAX_VOICES", 64.0)
//!     .build();
//! ```

mod builtins;

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tempo_ir::{Name, StringInterner};
use tempo_value::{native_error, EvalResult, FunctionSlot, NativeObject, Value};

pub use builtins::{console_class, math_class};

type ApiCallable = Box<dyn Fn(&[Value]) -> EvalResult + Send + Sync>;

struct ApiFunction {
    name: Name,
    num_args: usize,
    callable: ApiCallable,
}

/// Native object backed by Rust closures.
pub struct ApiClass {
    name: String,
    functions: Vec<ApiFunction>,
    slots: FxHashMap<Name, usize>,
    constants: FxHashMap<Name, Value>,
}

impl ApiClass {
    pub fn builder<'i>(name: &str, interner: &'i StringInterner) -> ApiClassBuilder<'i> {
        ApiClassBuilder {
            interner,
            class: ApiClass {
                name: name.to_string(),
                functions: Vec::new(),
                slots: FxHashMap::default(),
                constants: FxHashMap::default(),
            },
        }
    }

    pub fn function_count(&self) -> usize {
        self.functions.len()
    }
}

impl NativeObject for ApiClass {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn function_slot(&self, name: Name) -> Option<FunctionSlot> {
        let index = *self.slots.get(&name)?;
        Some(FunctionSlot {
            index,
            num_args: self.functions[index].num_args,
        })
    }

    fn call_function(&self, index: usize, args: &[Value]) -> EvalResult {
        let function = self.functions.get(index).ok_or_else(|| {
            native_error(format!("{} has no function at index {index}", self.name))
        })?;
        (function.callable)(args)
    }

    fn constant(&self, name: Name) -> Option<Value> {
        self.constants.get(&name).cloned()
    }
}

impl fmt::Debug for ApiClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClass")
            .field("name", &self.name)
            .field("functions", &self.functions.iter().map(|f| f.name).collect::<Vec<_>>())
            .field("constants", &self.constants.len())
            .finish()
    }
}

/// Builder for [`ApiClass`].
pub struct ApiClassBuilder<'i> {
    interner: &'i StringInterner,
    class: ApiClass,
}

impl ApiClassBuilder<'_> {
    /// Add a function taking exactly `num_args` arguments. Re-adding a name
    /// replaces the earlier entry's slot.
    #[must_use]
    pub fn function(
        mut self,
        name: &str,
        num_args: usize,
        callable: impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static,
    ) -> Self {
        let name = self.interner.intern(name);
        let index = self.class.functions.len();
        self.class.functions.push(ApiFunction {
            name,
            num_args,
            callable: Box::new(callable),
        });
        self.class.slots.insert(name, index);
        self
    }

    #[must_use]
    pub fn constant(mut self, name: &str, value: impl Into<Value>) -> Self {
        let name = self.interner.intern(name);
        self.class.constants.insert(name, value.into());
        self
    }

    pub fn build(self) -> Arc<ApiClass> {
        Arc::new(self.class)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap for clarity"
)]
