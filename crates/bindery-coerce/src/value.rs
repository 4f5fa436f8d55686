//! Script value contract
//!
//! The coercion engine reads script values through [`ScriptValue`] and never
//! mutates them. Embedders implement the trait for their own value type;
//! [`Value`] is a plain implementation used by hosts without one and by the
//! tests.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use bindery_types::{builtins, NativeType};
use once_cell::sync::Lazy;

use crate::number::{parse_number, Number};

/// Shared handle to a script value
pub type ValueRef = Arc<dyn ScriptValue>;

static NIL: Lazy<ValueRef> = Lazy::new(|| Arc::new(Value::Nil));

/// The closed set of script value tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `nil`
    Nil,
    /// `true` / `false`
    Boolean,
    /// Integer or float number
    Number,
    /// Byte string
    Text,
    /// Table
    Table,
    /// Function or closure
    Function,
    /// Opaque wrapped native object
    Userdata,
    /// Coroutine
    Thread,
}

impl ValueKind {
    /// Script-side type name
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Nil => "nil",
            ValueKind::Boolean => "boolean",
            ValueKind::Number => "number",
            ValueKind::Text => "string",
            ValueKind::Table => "table",
            ValueKind::Function => "function",
            ValueKind::Userdata => "userdata",
            ValueKind::Thread => "thread",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Read-only view of a script value
pub trait ScriptValue: fmt::Debug + Send + Sync {
    /// Variant tag
    fn kind(&self) -> ValueKind;

    /// Truthiness: everything except `nil` and `false` is true
    fn to_boolean(&self) -> bool;

    /// Numeric value of a number, or the numeric parse of a text value
    fn to_number(&self) -> Option<Number>;

    /// Raw bytes of a text value
    fn text_bytes(&self) -> Option<&[u8]>;

    /// String form of the value (`tostring` semantics)
    fn to_text(&self) -> String;

    /// Sequence length of a table, 0 for everything else
    fn length(&self) -> usize;

    /// Element at a 1-based index; nil when absent
    fn index(&self, index: usize) -> ValueRef;

    /// The wrapped native object of a userdata value
    fn userdata(&self) -> Option<&NativeObject>;

    /// Native type that represents this value when passed through as-is
    fn representation_type(&self) -> NativeType;

    /// Whether this value is `nil`
    fn is_nil(&self) -> bool {
        self.kind() == ValueKind::Nil
    }
}

/// The shared `nil` value
pub fn nil() -> ValueRef {
    NIL.clone()
}

// ============================================================================
// NativeObject
// ============================================================================

/// A native object wrapped as userdata, tagged with its runtime type
#[derive(Clone)]
pub struct NativeObject {
    ty: NativeType,
    payload: Arc<dyn Any + Send + Sync>,
}

impl NativeObject {
    /// Wrap `value` as an instance of `ty`
    pub fn new<T: Any + Send + Sync>(ty: &NativeType, value: T) -> Self {
        NativeObject {
            ty: ty.clone(),
            payload: Arc::new(value),
        }
    }

    /// Runtime type of the object
    pub fn native_type(&self) -> &NativeType {
        &self.ty
    }

    /// Borrow the payload as `T`
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.payload.downcast_ref::<T>()
    }

    /// Whether both handles refer to the same object
    pub fn ptr_eq(&self, other: &NativeObject) -> bool {
        Arc::ptr_eq(&self.payload, &other.payload)
    }
}

impl fmt::Debug for NativeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeObject({})", self.ty)
    }
}

// ============================================================================
// Value
// ============================================================================

/// Plain script value
#[derive(Debug, Clone)]
pub enum Value {
    /// `nil`
    Nil,
    /// Boolean
    Boolean(bool),
    /// Integer number
    Integer(i64),
    /// Float number
    Float(f64),
    /// Byte string, not necessarily valid UTF-8
    Text(Arc<[u8]>),
    /// Sequence table, stored 0-based, addressed 1-based
    Table(Arc<Vec<ValueRef>>),
    /// Named function
    Function(Arc<str>),
    /// Wrapped native object
    Userdata(NativeObject),
    /// Coroutine id
    Thread(u64),
}

impl Value {
    /// Text value from a string
    pub fn text(s: &str) -> Self {
        Value::Text(Arc::from(s.as_bytes()))
    }

    /// Text value from raw bytes
    pub fn bytes(b: &[u8]) -> Self {
        Value::Text(Arc::from(b))
    }

    /// Sequence table from values
    pub fn table(items: Vec<Value>) -> Self {
        Value::Table(Arc::new(items.into_iter().map(Value::into_ref).collect()))
    }

    /// Userdata wrapping a native object
    pub fn userdata(obj: NativeObject) -> Self {
        Value::Userdata(obj)
    }

    /// Move into a shared handle
    pub fn into_ref(self) -> ValueRef {
        Arc::new(self)
    }
}

impl ScriptValue for Value {
    fn kind(&self) -> ValueKind {
        match self {
            Value::Nil => ValueKind::Nil,
            Value::Boolean(_) => ValueKind::Boolean,
            Value::Integer(_) | Value::Float(_) => ValueKind::Number,
            Value::Text(_) => ValueKind::Text,
            Value::Table(_) => ValueKind::Table,
            Value::Function(_) => ValueKind::Function,
            Value::Userdata(_) => ValueKind::Userdata,
            Value::Thread(_) => ValueKind::Thread,
        }
    }

    fn to_boolean(&self) -> bool {
        !matches!(self, Value::Nil | Value::Boolean(false))
    }

    fn to_number(&self) -> Option<Number> {
        match self {
            Value::Integer(i) => Some(Number::Integer(*i)),
            Value::Float(f) => Some(Number::Float(*f)),
            Value::Text(bytes) => parse_number(bytes),
            _ => None,
        }
    }

    fn text_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Text(bytes) => Some(&bytes[..]),
            _ => None,
        }
    }

    fn to_text(&self) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Boolean(b) => b.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Float(f) => Number::Float(*f).to_string(),
            Value::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            Value::Table(items) => format!("table: {:p}", Arc::as_ptr(items)),
            Value::Function(name) => format!("function: {}", name),
            Value::Userdata(obj) => format!("userdata: {}", obj.native_type()),
            Value::Thread(id) => format!("thread: {}", id),
        }
    }

    fn length(&self) -> usize {
        match self {
            Value::Table(items) => items.len(),
            _ => 0,
        }
    }

    fn index(&self, index: usize) -> ValueRef {
        match self {
            Value::Table(items) if index >= 1 => {
                items.get(index - 1).cloned().unwrap_or_else(nil)
            }
            _ => nil(),
        }
    }

    fn userdata(&self) -> Option<&NativeObject> {
        match self {
            Value::Userdata(obj) => Some(obj),
            _ => None,
        }
    }

    fn representation_type(&self) -> NativeType {
        match self {
            Value::Nil => builtins::object(),
            Value::Boolean(_) => builtins::boxed(bindery_types::Primitive::Boolean),
            Value::Integer(_) | Value::Float(_) => builtins::number(),
            Value::Text(_) => builtins::text(),
            Value::Table(_) => builtins::table(),
            Value::Function(_) => builtins::function(),
            Value::Userdata(obj) => obj.native_type().clone(),
            Value::Thread(_) => builtins::thread(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i as i64)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::text(s)
    }
}
