//! The Dynamic Value.
//!
//! # Heap payloads
//!
//! Strings are immutable and shared. Arrays and objects are shared *and*
//! mutable: every copy of an array value sees pushes made through any other
//! copy, which is what script code expects from reference types. Native
//! objects are host-owned API objects behind the [`NativeObject`] contract.
//!
//! # Conversions
//!
//! The scripting language is loosely typed. `to_number`, `is_truthy`,
//! `loosely_equals` and `Display` implement the coercions operators rely on.

mod heap;

use std::fmt;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::{NativeObject, PropertyBag};

pub use heap::Heap;

/// Shared, mutable array payload.
pub type ArrayRef = Heap<RwLock<Vec<Value>>>;
/// Shared, mutable object payload.
pub type ObjectRef = Heap<RwLock<PropertyBag>>;
/// Shared host API object.
pub type NativeRef = Heap<dyn NativeObject>;

/// Runtime value of the scripting language.
#[derive(Clone, Default)]
pub enum Value {
    /// The `undefined` value; also the result of reading absent storage.
    #[default]
    Undefined,
    /// Numeric value (all script numbers are doubles).
    Number(f64),
    /// Boolean value.
    Bool(bool),
    /// Immutable string.
    Str(Heap<str>),
    /// Reference to a shared array.
    Array(ArrayRef),
    /// Reference to a shared script object.
    Object(ObjectRef),
    /// Reference to a host API object.
    Native(NativeRef),
}

// Factory Methods

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl AsRef<str>) -> Self {
        Value::Str(Heap::from_arc(Arc::from(s.as_ref())))
    }

    /// Create an array value owning `items`.
    #[inline]
    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Heap::new(RwLock::new(items)))
    }

    /// Create an object value owning `properties`.
    #[inline]
    pub fn object(properties: PropertyBag) -> Self {
        Value::Object(Heap::new(RwLock::new(properties)))
    }

    /// Wrap a host API object.
    ///
    /// The host usually keeps its own `Arc` to the object; the value shares it.
    #[inline]
    pub fn native(object: Arc<dyn NativeObject>) -> Self {
        Value::Native(Heap::from_arc(object))
    }
}

// Inspection

impl Value {
    #[inline]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// The number payload, without coercion.
    #[inline]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// The string payload, without coercion.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// The native object payload.
    #[inline]
    pub fn as_native(&self) -> Option<&NativeRef> {
        match self {
            Value::Native(object) => Some(object),
            _ => None,
        }
    }

    /// Data-type label used in diagnostics and the debugger.
    pub fn type_name(&self) -> &str {
        match self {
            Value::Undefined => "undefined",
            Value::Number(_) => "number",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Native(object) => object.class_name(),
        }
    }
}

// Coercions

impl Value {
    /// Numeric coercion.
    ///
    /// `undefined` and non-numeric strings become NaN, booleans become 0/1,
    /// the empty string becomes 0, reference types become NaN.
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Number(n) => *n,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Str(s) => parse_number(s),
            Value::Undefined | Value::Array(_) | Value::Object(_) | Value::Native(_) => f64::NAN,
        }
    }

    /// Integer coercion for bitwise operators: truncate, then wrap modulo
    /// 2^32. NaN and the infinities become 0.
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_possible_wrap,
        reason = "value is integral and in [0, 2^32) before the casts"
    )]
    pub fn to_int(&self) -> i32 {
        let n = self.to_number();
        if !n.is_finite() {
            return 0;
        }
        n.trunc().rem_euclid(4_294_967_296.0) as u32 as i32
    }

    /// Truthiness for conditions and logical operators.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Undefined => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Str(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) | Value::Native(_) => true,
        }
    }

    /// Script `==`: heap references compare by identity, strings by content,
    /// mixed primitives through numeric coercion.
    pub fn loosely_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Undefined, _) | (_, Value::Undefined) => false,
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Heap::ptr_eq(a, b),
            (Value::Array(_) | Value::Object(_) | Value::Native(_), _)
            | (_, Value::Array(_) | Value::Object(_) | Value::Native(_)) => false,
            _ => self.to_number() == other.to_number(),
        }
    }
}

/// Strict structural equality used by host code and tests.
///
/// Unlike [`Value::loosely_equals`] it never coerces: `Number(1.0)` is not
/// equal to `Bool(true)`.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => **a == **b,
            (Value::Array(a), Value::Array(b)) => Heap::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Heap::ptr_eq(a, b),
            (Value::Native(a), Value::Native(b)) => Heap::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

/// Script string-to-number rules: decimal and exponent forms, and the
/// spelled-out `Infinity`. Rust-only spellings (`inf`, `nan`) are NaN.
fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    if trimmed.strip_prefix(['+', '-']).unwrap_or(trimmed) == "Infinity" {
        return if trimmed.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }
    let numeric = trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'+' | b'-' | b'e' | b'E'));
    if numeric {
        trimmed.parse().unwrap_or(f64::NAN)
    } else {
        f64::NAN
    }
}

fn fmt_number(n: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if n.is_nan() {
        write!(f, "NaN")
    } else if n.is_infinite() {
        write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "integral and below 1e15, exactly representable"
        )]
        let int = n as i64;
        write!(f, "{int}")
    } else {
        write!(f, "{n}")
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Number(n) => fmt_number(*n, f),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => write!(f, "{}", &**s),
            Value::Array(items) => {
                write!(f, "[")?;
                for (i, item) in items.read().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }
            Value::Object(properties) => write!(f, "Object({})", properties.read().len()),
            Value::Native(object) => write!(f, "{}", object.class_name()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "Undefined"),
            Value::Number(n) => write!(f, "Number({n})"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Str(s) => write!(f, "Str({:?})", &**s),
            Value::Array(items) => f.debug_tuple("Array").field(&*items.read()).finish(),
            Value::Object(properties) => f.debug_tuple("Object").field(&*properties.read()).finish(),
            Value::Native(object) => write!(f, "Native({})", object.class_name()),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "test assertions use unwrap for clarity"
)]
