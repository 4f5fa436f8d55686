//! Coercion registry
//!
//! Process-wide map from a native type to its coercion strategy. Primitive,
//! wrapper, text and byte-sequence entries are seeded up front; array and
//! object entries are created on first lookup and kept for the life of the
//! process.

use std::sync::Arc;

use bindery_types::{builtins, NativeType, Primitive};
use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::coercion::{ArrayCoercion, Coercion, NumericTarget, TextTarget};
use crate::error::CoerceResult;
use crate::native::NativeValue;
use crate::score::Score;
use crate::value::{ScriptValue, ValueRef};

static GLOBAL: Lazy<CoercionRegistry> = Lazy::new(CoercionRegistry::new);

/// Type-to-strategy cache
pub struct CoercionRegistry {
    entries: DashMap<NativeType, Arc<Coercion>>,
}

impl CoercionRegistry {
    /// Registry seeded with the primitive, wrapper, text and byte-sequence
    /// strategies
    pub fn new() -> Self {
        let entries = DashMap::new();
        for p in Primitive::ALL {
            let strategy = Arc::new(match NumericTarget::from_primitive(p) {
                Some(target) => Coercion::Numeric(target),
                None => Coercion::Boolean,
            });
            entries.insert(builtins::primitive(p), strategy.clone());
            entries.insert(builtins::boxed(p), strategy);
        }
        entries.insert(builtins::text(), Arc::new(Coercion::Text(TextTarget::Text)));
        entries.insert(builtins::bytes(), Arc::new(Coercion::Text(TextTarget::Bytes)));
        CoercionRegistry { entries }
    }

    /// Strategy for `ty`, creating and caching one on first request.
    ///
    /// Never fails: arrays get an array strategy over their element's
    /// strategy, everything else falls back to the object strategy.
    pub fn lookup(&self, ty: &NativeType) -> Arc<Coercion> {
        if let Some(found) = self.entries.get(ty) {
            return found.value().clone();
        }

        // Built outside the map lock; the element lookup may insert too
        let built = match ty.element_type() {
            Some(element) => {
                let element_strategy = self.lookup(element);
                Coercion::Array(ArrayCoercion::new(element.clone(), element_strategy))
            }
            None => Coercion::Object(ty.clone()),
        };

        let entry = self
            .entries
            .entry(ty.clone())
            .or_insert_with(|| {
                log::debug!("created {} for {}", built, ty);
                Arc::new(built)
            });
        entry.value().clone()
    }

    /// Score `value` against `ty`
    pub fn score(&self, value: &dyn ScriptValue, ty: &NativeType) -> Score {
        self.lookup(ty).score(value)
    }

    /// Convert `value` to `ty`
    pub fn convert(&self, value: &ValueRef, ty: &NativeType) -> CoerceResult<NativeValue> {
        self.lookup(ty).convert(value)
    }

    /// Whether a strategy for `ty` is cached
    pub fn contains(&self, ty: &NativeType) -> bool {
        self.entries.contains_key(ty)
    }

    /// Number of cached strategies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty (never true once constructed)
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for CoercionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry
pub fn global() -> &'static CoercionRegistry {
    &GLOBAL
}

/// Strategy for `ty` from the process-wide registry
pub fn lookup(ty: &NativeType) -> Arc<Coercion> {
    GLOBAL.lookup(ty)
}

/// Score `value` against `ty` using the process-wide registry
pub fn score(value: &dyn ScriptValue, ty: &NativeType) -> Score {
    GLOBAL.score(value, ty)
}

/// Convert `value` to `ty` using the process-wide registry
pub fn convert(value: &ValueRef, ty: &NativeType) -> CoerceResult<NativeValue> {
    GLOBAL.convert(value, ty)
}
