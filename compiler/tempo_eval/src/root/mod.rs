//! The root object: everything a script instance owns.
//!
//! Holds the register table, the global bag, and the tables of inline
//! functions, callbacks, native snippets and API classes. The script front
//! end populates it through the binding methods in `binding.rs` while it
//! builds the tree; afterwards evaluation only reads the tables and mutates
//! the storage tiers.

mod binding;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use tempo_ir::{Name, SharedInterner};
use tempo_native::{NativeFunction, SnippetCompiler};
use tempo_value::{NativeObject, NativeRef, PropertyBag, Value};

use crate::api::{console_class, math_class};
use crate::callback::CallbackInstance;
use crate::debug::{DebugEntry, DebugKind};
use crate::function::FunctionInstance;
use crate::print_handler::SharedPrintHandler;
use crate::register::{RegisterIndex, VarRegister};

pub struct Root {
    interner: SharedInterner,
    max_call_depth: usize,
    snippet_compiler: Rc<dyn SnippetCompiler>,
    registers: VarRegister,
    globals: RefCell<PropertyBag>,
    functions: RefCell<FxHashMap<Name, Rc<FunctionInstance>>>,
    callbacks: RefCell<FxHashMap<Name, Rc<CallbackInstance>>>,
    natives: RefCell<FxHashMap<Name, Rc<NativeFunction>>>,
    /// API classes, stored as `Value::Native`.
    api_classes: RefCell<FxHashMap<Name, Value>>,
    length: Name,
}

impl Root {
    pub(crate) fn new(
        interner: SharedInterner,
        max_call_depth: usize,
        snippet_compiler: Rc<dyn SnippetCompiler>,
        print_handler: SharedPrintHandler,
    ) -> Self {
        let length = interner.intern("length");
        let root = Root {
            max_call_depth,
            snippet_compiler,
            registers: VarRegister::new(),
            globals: RefCell::new(PropertyBag::new()),
            functions: RefCell::default(),
            callbacks: RefCell::default(),
            natives: RefCell::default(),
            api_classes: RefCell::default(),
            length,
            interner,
        };
        root.register_api_class(console_class(&root.interner, print_handler));
        root.register_api_class(math_class(&root.interner));
        root
    }

    #[inline]
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    /// Intern `text`.
    pub fn name(&self, text: &str) -> Name {
        self.interner.intern(text)
    }

    #[inline]
    pub fn max_call_depth(&self) -> usize {
        self.max_call_depth
    }

    #[inline]
    pub(crate) fn length_name(&self) -> Name {
        self.length
    }

    pub(crate) fn snippet_compiler(&self) -> &dyn SnippetCompiler {
        &*self.snippet_compiler
    }

    // Storage tiers

    pub fn registers(&self) -> &VarRegister {
        &self.registers
    }

    pub fn register(&self, index: RegisterIndex) -> Value {
        self.registers.get(index)
    }

    pub fn set_register(&self, index: RegisterIndex, value: Value) {
        self.registers.set(index, value);
    }

    pub fn global(&self, name: Name) -> Value {
        self.globals.borrow().get(name)
    }

    pub fn set_global(&self, name: Name, value: Value) {
        self.globals.borrow_mut().set(name, value);
    }

    // Tables

    pub fn function(&self, name: &str) -> Option<Rc<FunctionInstance>> {
        let name = self.interner.get(name)?;
        self.functions.borrow().get(&name).cloned()
    }

    pub fn callback(&self, name: &str) -> Option<Rc<CallbackInstance>> {
        let name = self.interner.get(name)?;
        self.callbacks.borrow().get(&name).cloned()
    }

    pub fn native_function(&self, name: &str) -> Option<Rc<NativeFunction>> {
        let name = self.interner.get(name)?;
        self.natives.borrow().get(&name).cloned()
    }

    /// Make `class` callable from scripts under its class name. Replaces a
    /// class registered under the same name.
    pub fn register_api_class(&self, class: Arc<dyn NativeObject>) -> Value {
        let name = self.interner.intern(class.class_name());
        let value = Value::native(class);
        self.api_classes.borrow_mut().insert(name, value.clone());
        value
    }

    pub fn api_class(&self, name: &str) -> Option<NativeRef> {
        let name = self.interner.get(name)?;
        self.api_classes
            .borrow()
            .get(&name)
            .and_then(Value::as_native)
            .cloned()
    }

    /// Variables and functions for the debugger panel, in a stable order:
    /// registers in slot order, then globals, inline functions and native
    /// functions sorted by name.
    pub fn debug_entries(&self) -> Vec<DebugEntry> {
        let interner = &self.interner;
        let mut entries: Vec<DebugEntry> = self
            .registers
            .entries()
            .into_iter()
            .map(|(name, value)| DebugEntry::variable(DebugKind::Register, interner.lookup(name), &value))
            .collect();

        let mut globals: Vec<DebugEntry> = self
            .globals
            .borrow()
            .iter()
            .map(|(name, value)| DebugEntry::variable(DebugKind::Global, interner.lookup(name), value))
            .collect();
        globals.sort_by(|a, b| a.name.cmp(&b.name));
        entries.extend(globals);

        let mut functions: Vec<DebugEntry> = self
            .functions
            .borrow()
            .values()
            .map(|f| DebugEntry::from_info(DebugKind::InlineFunction, &**f))
            .collect();
        functions.sort_by(|a, b| a.name.cmp(&b.name));
        entries.extend(functions);

        let mut natives: Vec<DebugEntry> = self
            .natives
            .borrow()
            .values()
            .map(|f| DebugEntry::from_info(DebugKind::NativeFunction, &**f))
            .collect();
        natives.sort_by(|a, b| a.name.cmp(&b.name));
        entries.extend(natives);

        entries
    }

    /// Drop every function and callback body.
    pub(crate) fn release_bodies(&self) {
        for function in self.functions.borrow().values() {
            function.release_body();
        }
        for callback in self.callbacks.borrow().values() {
            callback.release_body();
        }
    }
}

impl Drop for Root {
    fn drop(&mut self) {
        self.release_bodies();
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Root")
            .field("registers", &self.registers.len())
            .field("globals", &self.globals.borrow().len())
            .field("functions", &self.functions.borrow().len())
            .field("callbacks", &self.callbacks.borrow().len())
            .field("natives", &self.natives.borrow().len())
            .finish_non_exhaustive()
    }
}
