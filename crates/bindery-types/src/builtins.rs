//! Well-known native types
//!
//! The root `Object`, the primitives and their boxed wrappers, text,
//! the byte sequence, and the classes that represent script-side values
//! (tables, functions, threads) when they cross into the native side as-is.
//!
//! ```text
//! Object
//! ├── Number ── Byte, Short, Integer, Long, Float, Double
//! ├── Boolean, Character          (Comparable)
//! ├── String                      (Comparable, CharSequence)
//! ├── T[]                         (every array type)
//! └── Table, Function, Thread
//! ```

use once_cell::sync::Lazy;

use crate::ty::{NativeType, Primitive, TypeKind};

static OBJECT: Lazy<NativeType> =
    Lazy::new(|| NativeType::new("Object", TypeKind::Class, None, Vec::new()));
static COMPARABLE: Lazy<NativeType> = Lazy::new(|| NativeType::interface("Comparable", &[]));
static CHAR_SEQUENCE: Lazy<NativeType> = Lazy::new(|| NativeType::interface("CharSequence", &[]));
static NUMBER: Lazy<NativeType> = Lazy::new(|| NativeType::class("Number", None, &[]));
static TEXT: Lazy<NativeType> =
    Lazy::new(|| NativeType::class("String", None, &[comparable(), char_sequence()]));

static TABLE: Lazy<NativeType> = Lazy::new(|| NativeType::class("Table", None, &[]));
static FUNCTION: Lazy<NativeType> = Lazy::new(|| NativeType::class("Function", None, &[]));
static THREAD: Lazy<NativeType> = Lazy::new(|| NativeType::class("Thread", None, &[]));

static PRIMITIVES: Lazy<Vec<NativeType>> = Lazy::new(|| {
    Primitive::ALL
        .iter()
        .map(|&p| NativeType::new(p.name(), TypeKind::Primitive(p), None, Vec::new()))
        .collect()
});

static WRAPPERS: Lazy<Vec<NativeType>> = Lazy::new(|| {
    Primitive::ALL
        .iter()
        .map(|&p| {
            let superclass = if p.is_numeric() && p != Primitive::Char {
                number()
            } else {
                object()
            };
            NativeType::class(p.wrapper_name(), Some(&superclass), &[comparable()])
        })
        .collect()
});

fn slot(p: Primitive) -> usize {
    Primitive::ALL
        .iter()
        .position(|&q| q == p)
        .unwrap_or_default()
}

/// The root of every class hierarchy
pub fn object() -> NativeType {
    OBJECT.clone()
}

/// The `Comparable` interface
pub fn comparable() -> NativeType {
    COMPARABLE.clone()
}

/// The `CharSequence` interface
pub fn char_sequence() -> NativeType {
    CHAR_SEQUENCE.clone()
}

/// Abstract base of the numeric wrappers
pub fn number() -> NativeType {
    NUMBER.clone()
}

/// The text type
pub fn text() -> NativeType {
    TEXT.clone()
}

/// The raw byte sequence type, `byte[]`
pub fn bytes() -> NativeType {
    NativeType::array_of(&primitive(Primitive::Byte))
}

/// The unboxed primitive type
pub fn primitive(p: Primitive) -> NativeType {
    PRIMITIVES[slot(p)].clone()
}

/// The boxed wrapper class of a primitive
pub fn boxed(p: Primitive) -> NativeType {
    WRAPPERS[slot(p)].clone()
}

/// Native representation of script tables
pub fn table() -> NativeType {
    TABLE.clone()
}

/// Native representation of script functions
pub fn function() -> NativeType {
    FUNCTION.clone()
}

/// Native representation of script threads (coroutines)
pub fn thread() -> NativeType {
    THREAD.clone()
}

/// If `ty` is a primitive or a boxed wrapper, the primitive it carries
pub fn unboxed(ty: &NativeType) -> Option<Primitive> {
    ty.as_primitive().or_else(|| {
        Primitive::ALL
            .iter()
            .copied()
            .find(|&p| WRAPPERS[slot(p)] == *ty)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_singletons() {
        assert_eq!(object(), object());
        assert_eq!(text(), text());
        assert_eq!(bytes(), bytes());
        assert_eq!(boxed(Primitive::Int), boxed(Primitive::Int));
        assert_ne!(boxed(Primitive::Int), primitive(Primitive::Int));
    }

    #[test]
    fn test_wrapper_hierarchy() {
        assert_eq!(boxed(Primitive::Int).superclass(), Some(&number()));
        assert_eq!(boxed(Primitive::Double).superclass(), Some(&number()));
        assert_eq!(boxed(Primitive::Boolean).superclass(), Some(&object()));
        assert_eq!(boxed(Primitive::Char).superclass(), Some(&object()));
        assert_eq!(number().superclass(), Some(&object()));
        assert!(object().superclass().is_none());
        assert!(primitive(Primitive::Int).superclass().is_none());
    }

    #[test]
    fn test_unboxed() {
        assert_eq!(unboxed(&boxed(Primitive::Long)), Some(Primitive::Long));
        assert_eq!(unboxed(&primitive(Primitive::Char)), Some(Primitive::Char));
        assert_eq!(unboxed(&text()), None);
    }

    #[test]
    fn test_bytes_is_byte_array() {
        assert_eq!(bytes().element_type(), Some(&primitive(Primitive::Byte)));
        assert_eq!(bytes().name(), "byte[]");
    }
}
