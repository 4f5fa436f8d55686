//! Reflective enumeration of public members
//!
//! Each query walks the declaring type first, then its superclass chain,
//! then its interfaces, and reports only public members. Results keep that
//! walk order, which is also the declaration order used for deterministic
//! overload ordering.
//!
//! - Fields: a field hidden by a same-named field in a subtype is reported
//!   once, the most-derived declaration.
//! - Methods: an overridden method (same name and parameter list) is
//!   reported once, the most-derived declaration.
//! - Constructors are never inherited.
//! - Member types are reported once each, inherited ones included.

use std::sync::Arc;

use rustc_hash::FxHashSet;

use crate::member::{ConstructorInfo, FieldInfo, MethodInfo};
use crate::ty::{NativeType, TypeId};

/// All types reachable from `ty` through superclass and interface edges,
/// `ty` first, each visited once
pub fn lineage(ty: &NativeType) -> Vec<NativeType> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    collect_lineage(ty, &mut seen, &mut out);
    out
}

fn collect_lineage(ty: &NativeType, seen: &mut FxHashSet<TypeId>, out: &mut Vec<NativeType>) {
    if !seen.insert(ty.id()) {
        return;
    }
    out.push(ty.clone());
    if let Some(parent) = ty.superclass() {
        collect_lineage(parent, seen, out);
    }
    for iface in ty.interfaces() {
        collect_lineage(iface, seen, out);
    }
}

/// Public fields, declared and inherited
pub fn public_fields(ty: &NativeType) -> Vec<Arc<FieldInfo>> {
    let mut names = FxHashSet::default();
    let mut out = Vec::new();
    for t in lineage(ty) {
        let Some(members) = t.members() else { continue };
        for field in &members.fields {
            if field.modifiers.is_public && names.insert(field.name.clone()) {
                out.push(field.clone());
            }
        }
    }
    out
}

/// Public methods, declared and inherited, overrides collapsed
pub fn public_methods(ty: &NativeType) -> Vec<Arc<MethodInfo>> {
    let mut out: Vec<Arc<MethodInfo>> = Vec::new();
    for t in lineage(ty) {
        let Some(members) = t.members() else { continue };
        for method in &members.methods {
            if method.modifiers.is_public && !out.iter().any(|m| m.same_signature(method)) {
                out.push(method.clone());
            }
        }
    }
    out
}

/// Public constructors declared by `ty` itself
pub fn public_constructors(ty: &NativeType) -> Vec<Arc<ConstructorInfo>> {
    ty.members()
        .map(|m| {
            m.constructors
                .iter()
                .filter(|c| c.modifiers.is_public)
                .cloned()
                .collect()
        })
        .unwrap_or_default()
}

/// Public member types, declared and inherited
pub fn public_member_types(ty: &NativeType) -> Vec<NativeType> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for t in lineage(ty) {
        let Some(members) = t.members() else { continue };
        for nested in &members.nested {
            if nested.modifiers.is_public && seen.insert(nested.ty.id()) {
                out.push(nested.ty.clone());
            }
        }
    }
    out
}
