//! Bindery Native Type Model
//!
//! Type descriptors, member declarations, reflection and inheritance
//! distance for the statically-typed side of the Bindery interop layer.

#![warn(missing_docs)]

pub mod builtins;
pub mod error;
pub mod hierarchy;
pub mod member;
pub mod reflect;
pub mod ty;

pub use error::TypeError;
pub use hierarchy::{distance, is_assignable, UNREACHABLE};
pub use member::{
    Access, ClassBuilder, ConstructorInfo, FieldInfo, Members, MethodInfo, Modifiers, NestedType,
    CONSTRUCTOR_NAME,
};
pub use ty::{NativeType, Primitive, TypeId, TypeKind};
