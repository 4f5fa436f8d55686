//! Member declarations: fields, methods, constructors and nested types

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::TypeError;
use crate::ty::{NativeType, TypeId};

/// Reserved name under which constructors are exposed. It is not a legal
/// member identifier, so it can never collide with a declared method.
pub const CONSTRUCTOR_NAME: &str = "<init>";

// ============================================================================
// Modifiers
// ============================================================================

/// Modifier flags for class members
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Public visibility
    pub is_public: bool,
    /// Private visibility
    pub is_private: bool,
    /// Protected visibility
    pub is_protected: bool,
    /// Static member
    pub is_static: bool,
    /// Final (read-only) member
    pub is_final: bool,
}

impl Modifiers {
    /// Public instance member
    pub fn public() -> Self {
        Modifiers {
            is_public: true,
            ..Default::default()
        }
    }

    /// Private instance member
    pub fn private() -> Self {
        Modifiers {
            is_private: true,
            ..Default::default()
        }
    }

    /// Protected instance member
    pub fn protected() -> Self {
        Modifiers {
            is_protected: true,
            ..Default::default()
        }
    }

    /// Same visibility, marked static
    pub fn with_static(mut self) -> Self {
        self.is_static = true;
        self
    }

    /// Same visibility, marked final
    pub fn with_final(mut self) -> Self {
        self.is_final = true;
        self
    }
}

// ============================================================================
// Fields
// ============================================================================

/// Access-check policy the host applies to a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No access checks
    Open,
    /// Checked, but the check can be relaxed
    Relaxable,
    /// Checked, and relaxing the check is refused
    Sealed,
}

/// Field information for reflection
pub struct FieldInfo {
    /// Field name
    pub name: String,
    /// Declared field type
    pub ty: NativeType,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Declaring type
    pub declaring: TypeId,
    /// Name of the declaring type
    pub declaring_name: String,
    access: Access,
    relaxed: AtomicBool,
}

impl FieldInfo {
    /// Access policy of this field
    pub fn access(&self) -> Access {
        self.access
    }

    /// Whether reads and writes currently pass access checks
    pub fn is_accessible(&self) -> bool {
        self.access == Access::Open || self.relaxed.load(Ordering::Acquire)
    }

    /// Relax access checks so the field can be read and written reflectively
    pub fn relax_access(&self) -> Result<(), TypeError> {
        match self.access {
            Access::Open => Ok(()),
            Access::Relaxable => {
                self.relaxed.store(true, Ordering::Release);
                Ok(())
            }
            Access::Sealed => Err(TypeError::AccessDenied {
                type_name: self.declaring_name.clone(),
                field: self.name.clone(),
            }),
        }
    }
}

impl fmt::Debug for FieldInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldInfo")
            .field("name", &self.name)
            .field("ty", &self.ty)
            .field("declaring", &self.declaring_name)
            .field("access", &self.access)
            .finish()
    }
}

// ============================================================================
// Methods and constructors
// ============================================================================

/// Method information for reflection
#[derive(Debug, Clone)]
pub struct MethodInfo {
    /// Method name
    pub name: String,
    /// Parameter types, in order
    pub parameters: Vec<NativeType>,
    /// Return type, `None` for void
    pub return_type: Option<NativeType>,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Declaring type
    pub declaring: TypeId,
    /// Name of the declaring type
    pub declaring_name: String,
}

impl MethodInfo {
    /// Whether `other` has the same name and parameter list
    pub fn same_signature(&self, other: &MethodInfo) -> bool {
        self.name == other.name && self.parameters == other.parameters
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}(", self.declaring_name, self.name)?;
        write_params(f, &self.parameters)?;
        f.write_str(")")
    }
}

/// Constructor information for reflection
#[derive(Debug, Clone)]
pub struct ConstructorInfo {
    /// Parameter types, in order
    pub parameters: Vec<NativeType>,
    /// Modifier flags
    pub modifiers: Modifiers,
    /// Declaring type
    pub declaring: TypeId,
    /// Name of the declaring type
    pub declaring_name: String,
}

impl fmt::Display for ConstructorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}(", self.declaring_name)?;
        write_params(f, &self.parameters)?;
        f.write_str(")")
    }
}

fn write_params(f: &mut fmt::Formatter<'_>, params: &[NativeType]) -> fmt::Result {
    for (i, p) in params.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", p)?;
    }
    Ok(())
}

/// A member type declared inside another type
#[derive(Debug, Clone)]
pub struct NestedType {
    /// The nested type
    pub ty: NativeType,
    /// Modifier flags
    pub modifiers: Modifiers,
}

/// Everything a type declares itself (inherited members excluded)
#[derive(Debug, Default)]
pub struct Members {
    /// Declared fields
    pub fields: Vec<Arc<FieldInfo>>,
    /// Declared methods
    pub methods: Vec<Arc<MethodInfo>>,
    /// Declared constructors
    pub constructors: Vec<Arc<ConstructorInfo>>,
    /// Declared member types
    pub nested: Vec<NestedType>,
}

// ============================================================================
// ClassBuilder
// ============================================================================

/// Declares a class or interface together with its members.
///
/// The type handle exists from the start, so members may refer to the type
/// being declared:
///
/// ```
/// use bindery_types::{ClassBuilder, Modifiers};
///
/// let node = ClassBuilder::class("demo.Node", None, &[]);
/// let this = node.handle();
/// let node = node
///     .field("next", &this, Modifiers::public())
///     .method("setNext", &[this.clone()], None, Modifiers::public())
///     .build()
///     .unwrap();
/// assert_eq!(node.members().unwrap().fields.len(), 1);
/// ```
pub struct ClassBuilder {
    ty: NativeType,
    members: Members,
    error: Option<TypeError>,
}

impl ClassBuilder {
    /// Start a class. Without a superclass it extends `Object`.
    pub fn class(name: &str, superclass: Option<&NativeType>, interfaces: &[NativeType]) -> Self {
        Self::wrap(NativeType::class(name, superclass, interfaces))
    }

    /// Start an interface
    pub fn interface(name: &str, extends: &[NativeType]) -> Self {
        Self::wrap(NativeType::interface(name, extends))
    }

    fn wrap(ty: NativeType) -> Self {
        ClassBuilder {
            ty,
            members: Members::default(),
            error: None,
        }
    }

    /// Handle of the type under construction
    pub fn handle(&self) -> NativeType {
        self.ty.clone()
    }

    fn check_name(&mut self, name: &str) -> bool {
        let valid = !name.is_empty() && name != CONSTRUCTOR_NAME;
        if !valid && self.error.is_none() {
            self.error = Some(TypeError::InvalidName {
                type_name: self.ty.name().to_string(),
                name: name.to_string(),
            });
        }
        valid
    }

    /// Declare a field with no access checks
    pub fn field(self, name: &str, ty: &NativeType, modifiers: Modifiers) -> Self {
        self.field_with_access(name, ty, modifiers, Access::Open)
    }

    /// Declare a field with the given access policy
    pub fn field_with_access(
        mut self,
        name: &str,
        ty: &NativeType,
        modifiers: Modifiers,
        access: Access,
    ) -> Self {
        if self.check_name(name) {
            self.members.fields.push(Arc::new(FieldInfo {
                name: name.to_string(),
                ty: ty.clone(),
                modifiers,
                declaring: self.ty.id(),
                declaring_name: self.ty.name().to_string(),
                access,
                relaxed: AtomicBool::new(false),
            }));
        }
        self
    }

    /// Declare a method
    pub fn method(
        mut self,
        name: &str,
        parameters: &[NativeType],
        return_type: Option<&NativeType>,
        modifiers: Modifiers,
    ) -> Self {
        if self.check_name(name) {
            self.members.methods.push(Arc::new(MethodInfo {
                name: name.to_string(),
                parameters: parameters.to_vec(),
                return_type: return_type.cloned(),
                modifiers,
                declaring: self.ty.id(),
                declaring_name: self.ty.name().to_string(),
            }));
        }
        self
    }

    /// Declare a constructor
    pub fn constructor(mut self, parameters: &[NativeType], modifiers: Modifiers) -> Self {
        self.members.constructors.push(Arc::new(ConstructorInfo {
            parameters: parameters.to_vec(),
            modifiers,
            declaring: self.ty.id(),
            declaring_name: self.ty.name().to_string(),
        }));
        self
    }

    /// Declare a member type
    pub fn nested(mut self, ty: &NativeType, modifiers: Modifiers) -> Self {
        self.members.nested.push(NestedType {
            ty: ty.clone(),
            modifiers,
        });
        self
    }

    /// Attach the collected members and return the finished type
    pub fn build(self) -> Result<NativeType, TypeError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        self.ty.declare(self.members)?;
        Ok(self.ty)
    }
}
