//! Core type descriptors for the native type surface

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, OnceLock};

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::builtins;
use crate::error::TypeError;
use crate::member::Members;

static NEXT_TYPE_ID: AtomicU32 = AtomicU32::new(1);

/// Interned array types, keyed by element type
static ARRAY_TYPES: Lazy<DashMap<TypeId, NativeType>> = Lazy::new(DashMap::new);

/// Process-unique identifier for a native type
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypeId(u32);

impl TypeId {
    fn next() -> Self {
        TypeId(NEXT_TYPE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Primitive (unboxed) native types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// `boolean`
    Boolean,
    /// `byte` (signed 8-bit)
    Byte,
    /// `char` (unsigned 16-bit)
    Char,
    /// `short` (signed 16-bit)
    Short,
    /// `int` (signed 32-bit)
    Int,
    /// `long` (signed 64-bit)
    Long,
    /// `float` (IEEE 754 single precision)
    Float,
    /// `double` (IEEE 754 double precision)
    Double,
}

impl Primitive {
    /// All primitive types, in widening order after `Boolean`
    pub const ALL: [Primitive; 8] = [
        Primitive::Boolean,
        Primitive::Byte,
        Primitive::Char,
        Primitive::Short,
        Primitive::Int,
        Primitive::Long,
        Primitive::Float,
        Primitive::Double,
    ];

    /// Keyword name of the primitive
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Boolean => "boolean",
            Primitive::Byte => "byte",
            Primitive::Char => "char",
            Primitive::Short => "short",
            Primitive::Int => "int",
            Primitive::Long => "long",
            Primitive::Float => "float",
            Primitive::Double => "double",
        }
    }

    /// Name of the boxed wrapper class
    pub fn wrapper_name(self) -> &'static str {
        match self {
            Primitive::Boolean => "Boolean",
            Primitive::Byte => "Byte",
            Primitive::Char => "Character",
            Primitive::Short => "Short",
            Primitive::Int => "Integer",
            Primitive::Long => "Long",
            Primitive::Float => "Float",
            Primitive::Double => "Double",
        }
    }

    /// Whether this primitive is numeric (everything except `boolean`)
    pub fn is_numeric(self) -> bool {
        !matches!(self, Primitive::Boolean)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shape of a native type
#[derive(Debug, Clone)]
pub enum TypeKind {
    /// A primitive value type
    Primitive(Primitive),
    /// A concrete or abstract class
    Class,
    /// An interface
    Interface,
    /// An array of the given element type
    Array(NativeType),
}

struct TypeData {
    id: TypeId,
    name: String,
    kind: TypeKind,
    superclass: Option<NativeType>,
    interfaces: Vec<NativeType>,
    members: OnceLock<Members>,
}

/// Handle to a native type descriptor.
///
/// Cheap to clone. Equality and hashing use the process-unique [`TypeId`],
/// so two handles are equal iff they denote the same native type.
#[derive(Clone)]
pub struct NativeType(Arc<TypeData>);

impl NativeType {
    pub(crate) fn new(
        name: impl Into<String>,
        kind: TypeKind,
        superclass: Option<NativeType>,
        interfaces: Vec<NativeType>,
    ) -> Self {
        NativeType(Arc::new(TypeData {
            id: TypeId::next(),
            name: name.into(),
            kind,
            superclass,
            interfaces,
            members: OnceLock::new(),
        }))
    }

    /// Create a class type. Without an explicit superclass the class
    /// extends the root `Object`.
    pub fn class(name: &str, superclass: Option<&NativeType>, interfaces: &[NativeType]) -> Self {
        let superclass = superclass.cloned().unwrap_or_else(builtins::object);
        NativeType::new(name, TypeKind::Class, Some(superclass), interfaces.to_vec())
    }

    /// Create an interface type extending the given interfaces
    pub fn interface(name: &str, extends: &[NativeType]) -> Self {
        NativeType::new(name, TypeKind::Interface, None, extends.to_vec())
    }

    /// The primitive type descriptor for `p`
    pub fn primitive(p: Primitive) -> Self {
        builtins::primitive(p)
    }

    /// The array type whose elements are `element`.
    ///
    /// Array types are interned: the same element type always yields the
    /// same descriptor.
    pub fn array_of(element: &NativeType) -> Self {
        if let Some(existing) = ARRAY_TYPES.get(&element.id()) {
            return existing.clone();
        }
        let created = NativeType::new(
            format!("{}[]", element.name()),
            TypeKind::Array(element.clone()),
            Some(builtins::object()),
            Vec::new(),
        );
        ARRAY_TYPES
            .entry(element.id())
            .or_insert(created)
            .clone()
    }

    /// Type id
    pub fn id(&self) -> TypeId {
        self.0.id
    }

    /// Fully qualified name
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Trailing component of the name after the last scoping separator
    /// (`.`, `$` or `::`)
    pub fn simple_name(&self) -> &str {
        simple_name(&self.0.name)
    }

    /// Shape of this type
    pub fn kind(&self) -> &TypeKind {
        &self.0.kind
    }

    /// Direct superclass, `None` for the root, interfaces and primitives
    pub fn superclass(&self) -> Option<&NativeType> {
        self.0.superclass.as_ref()
    }

    /// Directly implemented (or extended, for interfaces) interfaces
    pub fn interfaces(&self) -> &[NativeType] {
        &self.0.interfaces
    }

    /// Element type if this is an array type
    pub fn element_type(&self) -> Option<&NativeType> {
        match &self.0.kind {
            TypeKind::Array(element) => Some(element),
            _ => None,
        }
    }

    /// Primitive kind if this is a primitive type
    pub fn as_primitive(&self) -> Option<Primitive> {
        match self.0.kind {
            TypeKind::Primitive(p) => Some(p),
            _ => None,
        }
    }

    /// Whether this is an array type
    pub fn is_array(&self) -> bool {
        matches!(self.0.kind, TypeKind::Array(_))
    }

    /// Whether this is an interface
    pub fn is_interface(&self) -> bool {
        matches!(self.0.kind, TypeKind::Interface)
    }

    /// Whether this is a primitive type
    pub fn is_primitive(&self) -> bool {
        matches!(self.0.kind, TypeKind::Primitive(_))
    }

    /// Declared members, if any were declared
    pub fn members(&self) -> Option<&Members> {
        self.0.members.get()
    }

    /// Attach the declared members of this type. Members can be declared
    /// only once.
    pub fn declare(&self, members: Members) -> Result<(), TypeError> {
        self.0
            .members
            .set(members)
            .map_err(|_| TypeError::DuplicateMembers {
                type_name: self.name().to_string(),
            })
    }
}

impl PartialEq for NativeType {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for NativeType {}

impl Hash for NativeType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NativeType({})", self.0.name)
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.name)
    }
}

/// Strip outer qualification from a type name
pub fn simple_name(name: &str) -> &str {
    let cut = name
        .rfind(|c: char| c == '.' || c == '$' || c == ':')
        .map(|i| i + 1)
        .unwrap_or(0);
    &name[cut..]
}
