//! Class surfaces
//!
//! A [`ClassSurface`] is the script-visible projection of a native type:
//! public fields by name, public methods grouped into overload sets by name,
//! public constructors under [`CONSTRUCTOR_NAME`], and public member types
//! by simple name. Each projection is built on first use, exactly once.

use std::fmt;
use std::sync::{Arc, OnceLock};

use bindery_types::reflect::{
    public_constructors, public_fields, public_member_types, public_methods,
};
use bindery_types::{ConstructorInfo, FieldInfo, MethodInfo, NativeType, CONSTRUCTOR_NAME};
use dashmap::DashMap;
use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;

static SURFACES: Lazy<DashMap<NativeType, Arc<ClassSurface>>> = Lazy::new(DashMap::new);

// ============================================================================
// Invocable members
// ============================================================================

/// A method or constructor that can be selected for a call
#[derive(Debug, Clone)]
pub enum Invocable {
    /// A method
    Method(Arc<MethodInfo>),
    /// A constructor
    Constructor(Arc<ConstructorInfo>),
}

impl Invocable {
    /// Declared parameter types
    pub fn parameters(&self) -> &[NativeType] {
        match self {
            Invocable::Method(m) => &m.parameters,
            Invocable::Constructor(c) => &c.parameters,
        }
    }

    /// Member name; constructors report [`CONSTRUCTOR_NAME`]
    pub fn name(&self) -> &str {
        match self {
            Invocable::Method(m) => &m.name,
            Invocable::Constructor(_) => CONSTRUCTOR_NAME,
        }
    }

    /// Parameter count
    pub fn arity(&self) -> usize {
        self.parameters().len()
    }

    /// The method, if this is one
    pub fn as_method(&self) -> Option<&Arc<MethodInfo>> {
        match self {
            Invocable::Method(m) => Some(m),
            Invocable::Constructor(_) => None,
        }
    }

    /// The constructor, if this is one
    pub fn as_constructor(&self) -> Option<&Arc<ConstructorInfo>> {
        match self {
            Invocable::Constructor(c) => Some(c),
            Invocable::Method(_) => None,
        }
    }
}

impl fmt::Display for Invocable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocable::Method(m) => write!(f, "{}", m),
            Invocable::Constructor(c) => write!(f, "{}", c),
        }
    }
}

/// All members sharing one name
#[derive(Debug, Clone)]
pub enum Overloads {
    /// Exactly one candidate, bound directly
    Single(Invocable),
    /// Several candidates in declaration order; chosen at call time
    Many {
        /// Shared member name
        name: String,
        /// Candidates in declaration order
        candidates: Vec<Invocable>,
    },
}

impl Overloads {
    fn from_candidates(name: &str, mut candidates: Vec<Invocable>) -> Option<Self> {
        match candidates.len() {
            0 => None,
            1 => candidates.pop().map(Overloads::Single),
            _ => Some(Overloads::Many {
                name: name.to_string(),
                candidates,
            }),
        }
    }

    /// Shared member name
    pub fn name(&self) -> &str {
        match self {
            Overloads::Single(member) => member.name(),
            Overloads::Many { name, .. } => name,
        }
    }

    /// Candidates in declaration order
    pub fn candidates(&self) -> &[Invocable] {
        match self {
            Overloads::Single(member) => std::slice::from_ref(member),
            Overloads::Many { candidates, .. } => candidates,
        }
    }

    /// Number of candidates
    pub fn len(&self) -> usize {
        self.candidates().len()
    }

    /// Always false; an overload set has at least one candidate
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether resolution is deferred to call time
    pub fn is_overloaded(&self) -> bool {
        matches!(self, Overloads::Many { .. })
    }
}

// ============================================================================
// ClassSurface
// ============================================================================

/// Script-visible projection of one native type
pub struct ClassSurface {
    ty: NativeType,
    fields: OnceLock<FxHashMap<String, Arc<FieldInfo>>>,
    methods: OnceLock<FxHashMap<String, Overloads>>,
    constructors: OnceLock<Option<Overloads>>,
    nested: OnceLock<FxHashMap<String, NativeType>>,
}

impl ClassSurface {
    /// Empty surface for `ty`; projections are built on demand
    pub fn new(ty: &NativeType) -> Self {
        ClassSurface {
            ty: ty.clone(),
            fields: OnceLock::new(),
            methods: OnceLock::new(),
            constructors: OnceLock::new(),
            nested: OnceLock::new(),
        }
    }

    /// The projected type
    pub fn native_type(&self) -> &NativeType {
        &self.ty
    }

    /// Public field by name
    pub fn field(&self, name: &str) -> Option<&Arc<FieldInfo>> {
        self.fields().get(name)
    }

    /// Methods named `name`; [`CONSTRUCTOR_NAME`] yields the constructors
    pub fn method(&self, name: &str) -> Option<&Overloads> {
        if name == CONSTRUCTOR_NAME {
            return self.constructors();
        }
        self.methods().get(name)
    }

    /// Public constructors
    pub fn constructors(&self) -> Option<&Overloads> {
        self.constructors
            .get_or_init(|| {
                let candidates: Vec<_> = public_constructors(&self.ty)
                    .into_iter()
                    .map(Invocable::Constructor)
                    .collect();
                log::debug!("{}: {} constructors", self.ty, candidates.len());
                Overloads::from_candidates(CONSTRUCTOR_NAME, candidates)
            })
            .as_ref()
    }

    /// Public member type by simple name
    pub fn nested_type(&self, name: &str) -> Option<&NativeType> {
        self.nested().get(name)
    }

    /// Field names, sorted
    pub fn field_names(&self) -> Vec<&str> {
        sorted_keys(self.fields())
    }

    /// Method names, sorted; constructors are not listed
    pub fn method_names(&self) -> Vec<&str> {
        sorted_keys(self.methods())
    }

    /// Nested type names, sorted
    pub fn nested_names(&self) -> Vec<&str> {
        sorted_keys(self.nested())
    }

    fn fields(&self) -> &FxHashMap<String, Arc<FieldInfo>> {
        self.fields.get_or_init(|| {
            let mut map = FxHashMap::default();
            for field in public_fields(&self.ty) {
                if let Err(e) = field.relax_access() {
                    log::warn!("{}: omitting field {}: {}", self.ty, field.name, e);
                    continue;
                }
                map.insert(field.name.clone(), field);
            }
            log::debug!("{}: {} fields", self.ty, map.len());
            map
        })
    }

    fn methods(&self) -> &FxHashMap<String, Overloads> {
        self.methods.get_or_init(|| {
            // Group by name keeping first-seen order within each group
            let mut groups: FxHashMap<String, Vec<Invocable>> = FxHashMap::default();
            for method in public_methods(&self.ty) {
                groups
                    .entry(method.name.clone())
                    .or_default()
                    .push(Invocable::Method(method));
            }
            let map: FxHashMap<_, _> = groups
                .into_iter()
                .filter_map(|(name, candidates)| {
                    Overloads::from_candidates(&name, candidates).map(|o| (name, o))
                })
                .collect();
            log::debug!("{}: {} method names", self.ty, map.len());
            map
        })
    }

    fn nested(&self) -> &FxHashMap<String, NativeType> {
        self.nested.get_or_init(|| {
            let map: FxHashMap<_, _> = public_member_types(&self.ty)
                .into_iter()
                .map(|t| (t.simple_name().to_string(), t))
                .collect();
            log::debug!("{}: {} member types", self.ty, map.len());
            map
        })
    }
}

impl fmt::Debug for ClassSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassSurface").field("ty", &self.ty).finish()
    }
}

fn sorted_keys<V>(map: &FxHashMap<String, V>) -> Vec<&str> {
    let mut names: Vec<&str> = map.keys().map(String::as_str).collect();
    names.sort_unstable();
    names
}

/// The memoized surface of `ty`; every caller gets the same instance
pub fn surface_for(ty: &NativeType) -> Arc<ClassSurface> {
    if let Some(found) = SURFACES.get(ty) {
        return found.value().clone();
    }
    SURFACES
        .entry(ty.clone())
        .or_insert_with(|| Arc::new(ClassSurface::new(ty)))
        .value()
        .clone()
}
