//! Coercion strategies
//!
//! One strategy is chosen per target type when the registry is populated.
//! Each strategy answers two questions about a script value: how well it
//! matches the target ([`Coercion::score`]), and what native value it
//! becomes ([`Coercion::convert`]).

use std::fmt;
use std::sync::Arc;

use bindery_types::{builtins, distance, NativeType, Primitive};

use crate::error::{CoerceError, CoerceResult};
use crate::native::{NativeArray, NativeValue};
use crate::number::Number;
use crate::score::{Score, TEXT_TO_NUMBER_PENALTY};
use crate::value::{ScriptValue, ValueKind, ValueRef};

/// Numeric target widths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericTarget {
    /// 8-bit signed
    Byte,
    /// 16-bit unsigned
    Char,
    /// 16-bit signed
    Short,
    /// 32-bit signed
    Int,
    /// 64-bit signed
    Long,
    /// Single precision
    Float,
    /// Double precision
    Double,
}

impl NumericTarget {
    /// Numeric target for a primitive, `None` for `boolean`
    pub fn from_primitive(p: Primitive) -> Option<Self> {
        match p {
            Primitive::Boolean => None,
            Primitive::Byte => Some(NumericTarget::Byte),
            Primitive::Char => Some(NumericTarget::Char),
            Primitive::Short => Some(NumericTarget::Short),
            Primitive::Int => Some(NumericTarget::Int),
            Primitive::Long => Some(NumericTarget::Long),
            Primitive::Float => Some(NumericTarget::Float),
            Primitive::Double => Some(NumericTarget::Double),
        }
    }

    /// Keyword name of the target width
    pub fn name(self) -> &'static str {
        match self {
            NumericTarget::Byte => "byte",
            NumericTarget::Char => "char",
            NumericTarget::Short => "short",
            NumericTarget::Int => "int",
            NumericTarget::Long => "long",
            NumericTarget::Float => "float",
            NumericTarget::Double => "double",
        }
    }
}

/// Text target forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextTarget {
    /// Decoded character text
    Text,
    /// Raw byte sequence
    Bytes,
}

/// Array strategy: target `T[]`, with the element strategy resolved up front
#[derive(Debug, Clone)]
pub struct ArrayCoercion {
    element_type: NativeType,
    element: Arc<Coercion>,
}

impl ArrayCoercion {
    /// Array strategy for `element_type` using `element` for each element
    pub fn new(element_type: NativeType, element: Arc<Coercion>) -> Self {
        ArrayCoercion {
            element_type,
            element,
        }
    }

    /// Element type of the target array
    pub fn element_type(&self) -> &NativeType {
        &self.element_type
    }

    /// Strategy used for each element
    pub fn element(&self) -> &Coercion {
        &self.element
    }
}

/// A coercion strategy
#[derive(Debug, Clone)]
pub enum Coercion {
    /// `boolean` and `Boolean`
    Boolean,
    /// Integer and floating widths, primitive or boxed
    Numeric(NumericTarget),
    /// Text and byte sequences
    Text(TextTarget),
    /// Arrays
    Array(ArrayCoercion),
    /// Any other class or interface, by exact requested type
    Object(NativeType),
}

impl Coercion {
    /// How well `value` matches this strategy's target. Never fails:
    /// `Score::UNCOERCIBLE` is the "no" answer.
    pub fn score(&self, value: &dyn ScriptValue) -> Score {
        match self {
            Coercion::Boolean => score_boolean(value),
            Coercion::Numeric(target) => score_numeric(*target, value),
            Coercion::Text(target) => score_text(*target, value),
            Coercion::Array(array) => score_array(array, value),
            Coercion::Object(target) => score_object(target, value),
        }
    }

    /// Convert `value` to the native form of this strategy's target.
    ///
    /// Values that score `UNCOERCIBLE` are rejected with
    /// [`CoerceError::Uncoercible`] instead of being converted.
    pub fn convert(&self, value: &ValueRef) -> CoerceResult<NativeValue> {
        if !self.score(value.as_ref()).is_coercible() {
            return Err(CoerceError::Uncoercible {
                value: value.kind().to_string(),
                target: self.target_name(),
            });
        }
        match self {
            Coercion::Boolean => Ok(NativeValue::Boolean(value.to_boolean())),
            Coercion::Numeric(target) => convert_numeric(*target, value.as_ref(), self),
            Coercion::Text(target) => convert_text(*target, value.as_ref(), self),
            Coercion::Array(array) => convert_array(array, value),
            Coercion::Object(_) => Ok(convert_object(value)),
        }
    }

    /// Name of the target type, for diagnostics
    pub fn target_name(&self) -> String {
        match self {
            Coercion::Boolean => "boolean".to_string(),
            Coercion::Numeric(target) => target.name().to_string(),
            Coercion::Text(TextTarget::Text) => builtins::text().name().to_string(),
            Coercion::Text(TextTarget::Bytes) => builtins::bytes().name().to_string(),
            Coercion::Array(array) => format!("{}[]", array.element_type),
            Coercion::Object(target) => target.name().to_string(),
        }
    }
}

impl fmt::Display for Coercion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coercion::Boolean => f.write_str("BoolCoercion()"),
            Coercion::Numeric(target) => write!(f, "NumericCoercion({})", target.name()),
            Coercion::Text(_) => write!(f, "TextCoercion({})", self.target_name()),
            Coercion::Array(array) => write!(f, "ArrayCoercion({})", array.element_type),
            Coercion::Object(target) => write!(f, "ObjectCoercion({})", target),
        }
    }
}

// ============================================================================
// Boolean
// ============================================================================

fn score_boolean(value: &dyn ScriptValue) -> Score {
    // Every value has a truthiness, so anything is a weak match
    if value.kind() == ValueKind::Boolean {
        Score::EXACT
    } else {
        Score::new(1)
    }
}

// ============================================================================
// Numeric
// ============================================================================

fn score_numeric(target: NumericTarget, value: &dyn ScriptValue) -> Score {
    let penalty = match value.kind() {
        ValueKind::Number => 0,
        ValueKind::Text => TEXT_TO_NUMBER_PENALTY,
        _ => return Score::UNCOERCIBLE,
    };
    let Some(number) = value.to_number() else {
        return Score::UNCOERCIBLE;
    };
    let base = match number {
        Number::Integer(i) => score_integral(target, i),
        Number::Float(d) => score_floating(target, d),
    };
    base + Score::new(penalty)
}

fn score_integral(target: NumericTarget, i: i64) -> Score {
    let fits_byte = i8::try_from(i).is_ok();
    let fits_char = u16::try_from(i).is_ok();
    let fits_short = i16::try_from(i).is_ok();
    let fits_int = i32::try_from(i).is_ok();

    // 0 at the value's own width, 1 when it would also fit a narrower one
    match target {
        NumericTarget::Byte if fits_byte => Score::EXACT,
        NumericTarget::Char if fits_char => Score::new(fits_byte as u32),
        NumericTarget::Short if fits_short => Score::new(fits_byte as u32),
        NumericTarget::Int if fits_int => {
            Score::new((fits_byte || fits_char || fits_short) as u32)
        }
        NumericTarget::Long | NumericTarget::Float => Score::new(1),
        NumericTarget::Double => Score::new(2),
        _ => Score::WRONG_TYPE,
    }
}

fn score_floating(target: NumericTarget, d: f64) -> Score {
    match target {
        NumericTarget::Long if exact_long(d) => Score::EXACT,
        NumericTarget::Float if exact_float(d) => Score::EXACT,
        // Integral-looking doubles are "nicer" numbers than a double needs
        NumericTarget::Double if exact_long(d) || exact_float(d) => Score::new(1),
        NumericTarget::Double => Score::EXACT,
        _ => Score::WRONG_TYPE,
    }
}

fn exact_long(d: f64) -> bool {
    // 2^63 is the first double above i64::MAX
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    d.fract() == 0.0 && (-LIMIT..LIMIT).contains(&d)
}

fn exact_float(d: f64) -> bool {
    (d as f32) as f64 == d
}

fn convert_numeric(
    target: NumericTarget,
    value: &dyn ScriptValue,
    strategy: &Coercion,
) -> CoerceResult<NativeValue> {
    let number = value.to_number().ok_or_else(|| CoerceError::Uncoercible {
        value: value.kind().to_string(),
        target: strategy.target_name(),
    })?;
    Ok(match target {
        NumericTarget::Byte => NativeValue::Byte(number.as_i64() as i8),
        NumericTarget::Char => NativeValue::Char(number.as_i64() as u16),
        NumericTarget::Short => NativeValue::Short(number.as_i64() as i16),
        NumericTarget::Int => NativeValue::Int(number.as_i64() as i32),
        NumericTarget::Long => NativeValue::Long(number.as_i64()),
        NumericTarget::Float => NativeValue::Float(number.as_f64() as f32),
        NumericTarget::Double => NativeValue::Double(number.as_f64()),
    })
}

// ============================================================================
// Text
// ============================================================================

fn score_text(target: TextTarget, value: &dyn ScriptValue) -> Score {
    match value.kind() {
        ValueKind::Text => {
            let valid = value
                .text_bytes()
                .map(|b| std::str::from_utf8(b).is_ok())
                .unwrap_or(false);
            match (valid, target) {
                (true, TextTarget::Text) => Score::EXACT,
                (true, TextTarget::Bytes) => Score::new(1),
                (false, TextTarget::Bytes) => Score::EXACT,
                (false, TextTarget::Text) => Score::WRONG_TYPE,
            }
        }
        ValueKind::Nil => Score::NULL_VALUE,
        _ => match target {
            TextTarget::Text => Score::WRONG_TYPE,
            TextTarget::Bytes => Score::UNCOERCIBLE,
        },
    }
}

fn convert_text(
    target: TextTarget,
    value: &dyn ScriptValue,
    strategy: &Coercion,
) -> CoerceResult<NativeValue> {
    if value.is_nil() {
        return Ok(NativeValue::Null);
    }
    match target {
        TextTarget::Text => Ok(NativeValue::Text(value.to_text())),
        TextTarget::Bytes => value
            .text_bytes()
            .map(|b| NativeValue::Bytes(b.to_vec()))
            .ok_or_else(|| CoerceError::Uncoercible {
                value: value.kind().to_string(),
                target: strategy.target_name(),
            }),
    }
}

// ============================================================================
// Array
// ============================================================================

fn score_array(array: &ArrayCoercion, value: &dyn ScriptValue) -> Score {
    match value.kind() {
        // One-element sample, not a full scan
        ValueKind::Table if value.length() == 0 => Score::EXACT,
        ValueKind::Table => array.element.score(value.index(1).as_ref()),
        ValueKind::Userdata => {
            let elem = value
                .userdata()
                .and_then(|obj| obj.native_type().element_type().cloned());
            Score::from_distance(distance(&array.element_type, elem.as_ref()))
        }
        ValueKind::Nil => Score::NULL_VALUE,
        _ => Score::UNCOERCIBLE,
    }
}

fn convert_array(array: &ArrayCoercion, value: &ValueRef) -> CoerceResult<NativeValue> {
    match value.kind() {
        ValueKind::Table => {
            let n = value.length();
            let mut items = Vec::with_capacity(n);
            for index in 1..=n {
                let item = array
                    .element
                    .convert(&value.index(index))
                    .map_err(|_| CoerceError::ElementUncoercible {
                        index,
                        target: array.element_type.name().to_string(),
                    })?;
                items.push(item);
            }
            Ok(NativeValue::Array(NativeArray {
                element: array.element_type.clone(),
                items,
            }))
        }
        ValueKind::Userdata => Ok(value
            .userdata()
            .map(|obj| NativeValue::Object(obj.clone()))
            .unwrap_or(NativeValue::Null)),
        _ => Ok(NativeValue::Null),
    }
}

// ============================================================================
// Object
// ============================================================================

fn score_object(target: &NativeType, value: &dyn ScriptValue) -> Score {
    let natural = match value.kind() {
        ValueKind::Number => match value.to_number() {
            Some(Number::Integer(i)) if i32::try_from(i).is_ok() => builtins::boxed(Primitive::Int),
            Some(Number::Integer(_)) => builtins::boxed(Primitive::Long),
            _ => builtins::boxed(Primitive::Double),
        },
        ValueKind::Boolean => builtins::boxed(Primitive::Boolean),
        ValueKind::Text => builtins::text(),
        ValueKind::Userdata => match value.userdata() {
            Some(obj) => obj.native_type().clone(),
            None => return Score::UNCOERCIBLE,
        },
        ValueKind::Nil => return Score::NULL_VALUE,
        _ => value.representation_type(),
    };
    Score::from_distance(distance(target, Some(&natural)))
}

/// Convert for the object strategy. A wrapped object that cannot satisfy the
/// target never reaches here: the score guard in [`Coercion::convert`]
/// returns `CoerceError::Uncoercible` for it rather than null.
fn convert_object(value: &ValueRef) -> NativeValue {
    match value.kind() {
        ValueKind::Number => match value.to_number() {
            Some(Number::Integer(i)) => match i32::try_from(i) {
                Ok(small) => NativeValue::Int(small),
                Err(_) => NativeValue::Long(i),
            },
            Some(Number::Float(d)) => NativeValue::Double(d),
            None => NativeValue::Null,
        },
        ValueKind::Boolean => NativeValue::Boolean(value.to_boolean()),
        ValueKind::Text => NativeValue::Text(value.to_text()),
        // Assignability to the target was established by the score guard
        ValueKind::Userdata => value
            .userdata()
            .map(|obj| NativeValue::Object(obj.clone()))
            .unwrap_or(NativeValue::Null),
        ValueKind::Nil => NativeValue::Null,
        _ => NativeValue::Script(value.clone()),
    }
}
