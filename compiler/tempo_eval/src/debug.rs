//! Introspection for the host's debugger panel.

use tempo_native::NativeFunction;
use tempo_value::Value;

use crate::function::FunctionInstance;

/// What the debugger shows for one object: a name column, a value column
/// and a type column.
pub trait DebugInfo {
    fn debug_name(&self) -> String;
    fn debug_value(&self) -> String;
    fn debug_data_type(&self) -> String;

    /// Documentation shown next to the entry. Empty for plain variables.
    fn debug_description(&self) -> String {
        String::new()
    }
}

/// Documentation comment followed by a `Parameters:` line.
fn function_doc<'a>(comment: &str, parameters: impl IntoIterator<Item = &'a str>) -> String {
    let parameters: Vec<&str> = parameters.into_iter().collect();
    let comment = comment.trim();
    match (comment.is_empty(), parameters.is_empty()) {
        (_, true) => comment.to_string(),
        (true, false) => format!("Parameters: {}", parameters.join(", ")),
        (false, false) => format!("{comment}\nParameters: {}", parameters.join(", ")),
    }
}

impl DebugInfo for FunctionInstance {
    /// Signature, e.g. `add(a, b)`.
    fn debug_name(&self) -> String {
        self.signature().to_string()
    }

    fn debug_value(&self) -> String {
        self.last_return_value().to_string()
    }

    fn debug_data_type(&self) -> String {
        self.last_return_value().type_name().to_string()
    }

    fn debug_description(&self) -> String {
        function_doc(&self.comment(), self.parameter_names().iter().copied())
    }
}

impl DebugInfo for NativeFunction {
    fn debug_name(&self) -> String {
        self.signature().to_string()
    }

    fn debug_value(&self) -> String {
        if self.state().is_ok() {
            String::from("compiled")
        } else {
            String::from("uncompiled")
        }
    }

    fn debug_data_type(&self) -> String {
        String::from("C function")
    }

    fn debug_description(&self) -> String {
        function_doc(self.comment(), self.arguments().iter().map(String::as_str))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DebugKind {
    Register,
    Global,
    InlineFunction,
    NativeFunction,
}

/// One row of the debugger panel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DebugEntry {
    pub kind: DebugKind,
    pub name: String,
    pub value: String,
    pub data_type: String,
    /// Comment and parameter list for functions; empty for variables.
    pub description: String,
}

impl DebugEntry {
    pub fn variable(kind: DebugKind, name: &str, value: &Value) -> Self {
        DebugEntry {
            kind,
            name: name.to_string(),
            value: value.to_string(),
            data_type: value.type_name().to_string(),
            description: String::new(),
        }
    }

    pub fn from_info(kind: DebugKind, info: &dyn DebugInfo) -> Self {
        DebugEntry {
            kind,
            name: info.debug_name(),
            value: info.debug_value(),
            data_type: info.debug_data_type(),
            description: info.debug_description(),
        }
    }
}
