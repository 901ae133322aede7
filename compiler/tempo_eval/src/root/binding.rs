//! Binding methods used while a script's tree is built.
//!
//! These resolve identifiers to storage tiers and call targets to the
//! objects they call, once. Errors here are binding errors: they carry the
//! location of the construct being built and abort building, not
//! evaluation.

use std::cell::OnceCell;
use std::rc::Rc;

use tempo_ir::CodeLocation;
use tempo_native::{NativeDecl, NativeFunction, MAX_NATIVE_ARGS};
use tempo_value::{
    arity_mismatch, object_missing, too_many_arguments, undefined_api_function, EvalError,
};

use super::Root;
use crate::ast::{
    ApiCall, ConstObjectCall, Expr, ExprKind, InlineCall, NativeCall, MAX_API_ARGS,
    MAX_OBJECT_ARGS,
};
use crate::callback::CallbackInstance;
use crate::function::FunctionInstance;
use crate::reference::VarRef;
use crate::register::RegisterIndex;

impl Root {
    /// Reserve (or find) the register slot for `name`.
    pub fn declare_register(&self, name: &str) -> RegisterIndex {
        self.registers.declare(self.interner.intern(name))
    }

    /// Reference to the register slot for `name`, declaring it if needed.
    pub fn register_ref(&self, name: &str) -> VarRef {
        VarRef::Register(self.declare_register(name))
    }

    pub fn global_ref(&self, name: &str) -> VarRef {
        VarRef::Global(self.interner.intern(name))
    }

    /// Create an inline function. Its body is attached afterwards with
    /// [`FunctionInstance::set_body`], so the body can call it.
    pub fn define_function(&self, name: &str, parameters: &[&str]) -> Rc<FunctionInstance> {
        let name = self.interner.intern(name);
        let parameters = parameters.iter().map(|p| self.interner.intern(p)).collect();
        let function = FunctionInstance::new(&self.interner, name, parameters);
        self.functions.borrow_mut().insert(name, Rc::clone(&function));
        function
    }

    pub fn define_callback(&self, name: &str, parameters: &[&str]) -> Rc<CallbackInstance> {
        let name = self.interner.intern(name);
        let parameters = parameters.iter().map(|p| self.interner.intern(p)).collect();
        let callback = CallbackInstance::new(&self.interner, name, parameters);
        self.callbacks.borrow_mut().insert(name, Rc::clone(&callback));
        callback
    }

    /// Compile a script-declared C function.
    ///
    /// Compilation happens here, synchronously. A failure is logged and
    /// recorded on the returned function; every call through it then fails.
    pub fn declare_native(&self, decl: NativeDecl) -> Rc<NativeFunction> {
        let name = self.interner.intern(&decl.name);
        let function = Rc::new(NativeFunction::compile(self.snippet_compiler(), decl));
        self.natives.borrow_mut().insert(name, Rc::clone(&function));
        function
    }

    /// `function(args)` for an inline function.
    pub fn inline_call(
        &self,
        function: &Rc<FunctionInstance>,
        args: Vec<Expr>,
        location: CodeLocation,
    ) -> Result<Expr, EvalError> {
        if args.len() != function.parameter_count() {
            let name = self.interner.lookup(function.name());
            return Err(
                arity_mismatch(name, function.parameter_count(), args.len()).with_location(location)
            );
        }
        let call = InlineCall {
            function: Rc::clone(function),
            site: function.allocate_call_site(),
            args,
        };
        Ok(Expr::new(ExprKind::Call(call), location))
    }

    /// `Class.function(args)` against a registered API class.
    ///
    /// The function slot is resolved now. The argument count is checked
    /// against the slot when the call is evaluated.
    pub fn api_call(
        &self,
        class: &str,
        function: &str,
        args: Vec<Expr>,
        location: CodeLocation,
    ) -> Result<Expr, EvalError> {
        if args.len() > MAX_API_ARGS {
            return Err(too_many_arguments(MAX_API_ARGS, args.len()).with_location(location));
        }
        let object = self
            .api_class(class)
            .ok_or_else(|| object_missing(class).with_location(location))?;
        let function_name = self.interner.intern(function);
        let slot = object
            .function_slot(function_name)
            .ok_or_else(|| undefined_api_function(class, function).with_location(location))?;
        let call = ApiCall {
            class: object,
            function: function_name,
            slot,
            args,
        };
        Ok(Expr::new(ExprKind::ApiCall(call), location))
    }

    /// `Class.CONSTANT`, folded to its value now.
    pub fn api_constant(
        &self,
        class: &str,
        constant: &str,
        location: CodeLocation,
    ) -> Result<Expr, EvalError> {
        let object = self
            .api_class(class)
            .ok_or_else(|| object_missing(class).with_location(location))?;
        let value = object
            .constant(self.interner.intern(constant))
            .ok_or_else(|| {
                EvalError::new(format!("constant {constant} not found in {class}"))
                    .with_location(location)
            })?;
        Ok(Expr::new(ExprKind::ApiConstant(value), location))
    }

    /// `target.function(args)` where `target` will hold a native object.
    ///
    /// Nothing is resolved now: the object may only be created by the script
    /// itself. The first evaluation that finds it resolves and memoises it.
    pub fn const_object_call(
        &self,
        target: VarRef,
        function: &str,
        args: Vec<Expr>,
        location: CodeLocation,
    ) -> Result<Expr, EvalError> {
        if args.len() > MAX_OBJECT_ARGS {
            return Err(too_many_arguments(MAX_OBJECT_ARGS, args.len()).with_location(location));
        }
        let call = ConstObjectCall {
            target,
            function: self.interner.intern(function),
            args,
            resolved: OnceCell::new(),
        };
        Ok(Expr::new(ExprKind::ConstObjectCall(call), location))
    }

    /// Call of a compiled native snippet.
    pub fn native_call(
        &self,
        function: &Rc<NativeFunction>,
        args: Vec<Expr>,
        location: CodeLocation,
    ) -> Result<Expr, EvalError> {
        if args.len() > MAX_NATIVE_ARGS {
            return Err(too_many_arguments(MAX_NATIVE_ARGS, args.len()).with_location(location));
        }
        if args.len() != function.arguments().len() {
            return Err(
                arity_mismatch(function.name(), function.arguments().len(), args.len())
                    .with_location(location),
            );
        }
        let call = NativeCall {
            function: Rc::clone(function),
            args,
        };
        Ok(Expr::new(ExprKind::NativeCall(call), location))
    }
}
