//! Values on the native side of the boundary

use std::sync::Arc;

use bindery_types::NativeType;

use crate::value::{NativeObject, ValueRef};

/// A native array built from a script table
#[derive(Debug, Clone, PartialEq)]
pub struct NativeArray {
    /// Element type
    pub element: NativeType,
    /// Elements, 0-based
    pub items: Vec<NativeValue>,
}

impl NativeArray {
    /// Number of elements
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the array has no elements
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Result of coercing a script value to a native type
#[derive(Debug, Clone)]
pub enum NativeValue {
    /// The native null reference
    Null,
    /// `boolean` / `Boolean`
    Boolean(bool),
    /// `byte` / `Byte`
    Byte(i8),
    /// `char` / `Character`
    Char(u16),
    /// `short` / `Short`
    Short(i16),
    /// `int` / `Integer`
    Int(i32),
    /// `long` / `Long`
    Long(i64),
    /// `float` / `Float`
    Float(f32),
    /// `double` / `Double`
    Double(f64),
    /// Decoded text
    Text(String),
    /// Raw byte sequence
    Bytes(Vec<u8>),
    /// Freshly built array
    Array(NativeArray),
    /// Unwrapped native object
    Object(NativeObject),
    /// Script value passed through unchanged
    Script(ValueRef),
}

impl NativeValue {
    /// Whether this is the null reference
    pub fn is_null(&self) -> bool {
        matches!(self, NativeValue::Null)
    }

    /// Extract an `int`
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            NativeValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract a `long`
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NativeValue::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// Extract a `double`
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            NativeValue::Double(d) => Some(*d),
            _ => None,
        }
    }

    /// Extract text
    pub fn as_str(&self) -> Option<&str> {
        match self {
            NativeValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Extract an array
    pub fn as_array(&self) -> Option<&NativeArray> {
        match self {
            NativeValue::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Extract a native object
    pub fn as_object(&self) -> Option<&NativeObject> {
        match self {
            NativeValue::Object(o) => Some(o),
            _ => None,
        }
    }

    /// Get type name for debugging
    pub fn type_name(&self) -> &'static str {
        match self {
            NativeValue::Null => "null",
            NativeValue::Boolean(_) => "boolean",
            NativeValue::Byte(_) => "byte",
            NativeValue::Char(_) => "char",
            NativeValue::Short(_) => "short",
            NativeValue::Int(_) => "int",
            NativeValue::Long(_) => "long",
            NativeValue::Float(_) => "float",
            NativeValue::Double(_) => "double",
            NativeValue::Text(_) => "String",
            NativeValue::Bytes(_) => "byte[]",
            NativeValue::Array(_) => "array",
            NativeValue::Object(_) => "object",
            NativeValue::Script(_) => "script",
        }
    }
}

impl PartialEq for NativeValue {
    fn eq(&self, other: &Self) -> bool {
        use NativeValue::*;
        match (self, other) {
            (Null, Null) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Byte(a), Byte(b)) => a == b,
            (Char(a), Char(b)) => a == b,
            (Short(a), Short(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Long(a), Long(b)) => a == b,
            (Float(a), Float(b)) => a == b,
            (Double(a), Double(b)) => a == b,
            (Text(a), Text(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Array(a), Array(b)) => a == b,
            (Object(a), Object(b)) => a.ptr_eq(b),
            (Script(a), Script(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}
