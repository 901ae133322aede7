use smallvec::SmallVec;
use tempo_native::MAX_NATIVE_ARGS;
use tempo_value::{
    arity_mismatch, not_a_native_object, object_missing, undefined_api_function, EvalError,
    EvalResult, FunctionSlot, NativeRef, Value,
};

use crate::ast::{
    ApiCall, ConstObjectCall, Expr, InlineCall, NativeCall, MAX_API_ARGS, MAX_OBJECT_ARGS,
};
use crate::scope::Scope;

/// Evaluate call arguments left to right in the caller's scope.
fn evaluate_args<const N: usize>(
    args: &[Expr],
    scope: &Scope<'_>,
) -> Result<SmallVec<[Value; N]>, EvalError> {
    args.iter().map(|arg| arg.evaluate(scope)).collect()
}

impl InlineCall {
    pub(crate) fn evaluate(&self, scope: &Scope<'_>) -> EvalResult {
        let args = evaluate_args::<4>(&self.args, scope)?;
        self.function.invoke(scope, self.site, &args)
    }
}

impl ApiCall {
    pub(crate) fn evaluate(&self, scope: &Scope<'_>) -> EvalResult {
        if self.args.len() != self.slot.num_args {
            let interner = scope.root().interner();
            let function = format!("{}.{}", self.class.class_name(), interner.lookup(self.function));
            return Err(arity_mismatch(&function, self.slot.num_args, self.args.len()));
        }
        let args = evaluate_args::<MAX_API_ARGS>(&self.args, scope)?;
        self.class.call_function(self.slot.index, &args)
    }
}

impl ConstObjectCall {
    pub(crate) fn evaluate(&self, scope: &Scope<'_>) -> EvalResult {
        let (object, slot) = self.resolve(scope)?;
        let args = evaluate_args::<MAX_OBJECT_ARGS>(&self.args, scope)?;
        object.call_function(slot.index, &args)
    }

    /// Look the target up, memoising only a successful resolution. A failed
    /// attempt leaves the node unresolved and the next evaluation retries.
    fn resolve(&self, scope: &Scope<'_>) -> Result<&(NativeRef, FunctionSlot), EvalError> {
        if let Some(resolved) = self.resolved.get() {
            return Ok(resolved);
        }

        let root = scope.root();
        let interner = root.interner();
        let object = match self.target.get(scope)? {
            Value::Native(object) => object,
            Value::Undefined => {
                return Err(object_missing(interner.lookup(self.target.name(root))));
            }
            other => return Err(not_a_native_object(other.type_name())),
        };
        let function = interner.lookup(self.function);
        let slot = object
            .function_slot(self.function)
            .ok_or_else(|| undefined_api_function(object.class_name(), function))?;
        if slot.num_args != self.args.len() {
            return Err(arity_mismatch(function, slot.num_args, self.args.len()));
        }

        tracing::trace!(class = object.class_name(), function, index = slot.index, "object call resolved");
        Ok(self.resolved.get_or_init(|| (object, slot)))
    }
}

impl NativeCall {
    pub(crate) fn evaluate(&self, scope: &Scope<'_>) -> EvalResult {
        // A dead snippet fails before its arguments are evaluated.
        self.function.check_callable()?;
        let mut args = evaluate_args::<MAX_NATIVE_ARGS>(&self.args, scope)?;
        self.function.call(&mut args)?;
        Ok(Value::Undefined)
    }
}
