//! Classes every engine registers.

use std::sync::Arc;

use tempo_ir::StringInterner;
use tempo_value::{EvalResult, Value};

use super::ApiClass;
use crate::print_handler::SharedPrintHandler;

/// `Console.print(value)`.
pub fn console_class(interner: &StringInterner, output: SharedPrintHandler) -> Arc<ApiClass> {
    ApiClass::builder("Console", interner)
        .function("print", 1, move |args| {
            if let Some(value) = args.first() {
                output.println(&value.to_string());
            }
            Ok(Value::Undefined)
        })
        .build()
}

/// `Math`: the numeric helpers DSP glue code reaches for.
pub fn math_class(interner: &StringInterner) -> Arc<ApiClass> {
    fn unary(f: fn(f64) -> f64) -> impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static {
        move |args: &[Value]| Ok(Value::Number(f(args.first().map_or(f64::NAN, Value::to_number))))
    }
    fn binary(f: fn(f64, f64) -> f64) -> impl Fn(&[Value]) -> EvalResult + Send + Sync + 'static {
        move |args: &[Value]| {
            let arg = |i: usize| args.get(i).map_or(f64::NAN, Value::to_number);
            Ok(Value::Number(f(arg(0), arg(1))))
        }
    }

    ApiClass::builder("Math", interner)
        .constant("PI", std::f64::consts::PI)
        .constant("E", std::f64::consts::E)
        .constant("SQRT2", std::f64::consts::SQRT_2)
        .function("abs", 1, unary(f64::abs))
        .function("sqrt", 1, unary(f64::sqrt))
        .function("sin", 1, unary(f64::sin))
        .function("cos", 1, unary(f64::cos))
        .function("tan", 1, unary(f64::tan))
        .function("exp", 1, unary(f64::exp))
        .function("log", 1, unary(f64::ln))
        .function("floor", 1, unary(f64::floor))
        .function("ceil", 1, unary(f64::ceil))
        .function("round", 1, unary(f64::round))
        .function("pow", 2, binary(f64::powf))
        .function("min", 2, binary(f64::min))
        .function("max", 2, binary(f64::max))
        .function("range", 3, |args| {
            let arg = |i: usize| args.get(i).map_or(f64::NAN, Value::to_number);
            let (low, high) = (arg(1).min(arg(2)), arg(1).max(arg(2)));
            Ok(Value::Number(arg(0).max(low).min(high)))
        })
        .build()
}
