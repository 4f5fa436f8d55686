//! Inheritance distance between native types
//!
//! `distance(target, candidate)` counts superclass / interface edges from
//! `candidate` up to `target`, taking the shortest path through the DAG.
//! Walking past the root yields [`UNREACHABLE`]. Results are memoized per
//! `(target, candidate)` pair for the process lifetime; the hierarchy never
//! changes once a type exists.

use dashmap::DashMap;
use once_cell::sync::Lazy;

use crate::ty::{NativeType, TypeId};

/// Distance reported when `target` is not an ancestor of `candidate`
pub const UNREACHABLE: u32 = 0x10000;

static MEMO: Lazy<DashMap<(TypeId, TypeId), u32>> = Lazy::new(DashMap::new);

/// Number of inheritance levels between `target` and `candidate`.
///
/// `candidate` is optional so that callers can pass "the array element type
/// of something that may not be an array" directly; `None` is unreachable.
pub fn distance(target: &NativeType, candidate: Option<&NativeType>) -> u32 {
    let Some(candidate) = candidate else {
        return UNREACHABLE;
    };
    if target == candidate {
        return 0;
    }

    let key = (target.id(), candidate.id());
    if let Some(hit) = MEMO.get(&key) {
        return *hit;
    }

    let mut best = step(distance(target, candidate.superclass()));
    for iface in candidate.interfaces() {
        best = best.min(step(distance(target, Some(iface))));
    }

    // Concurrent walkers compute the same value; first insert wins
    *MEMO.entry(key).or_insert(best)
}

fn step(d: u32) -> u32 {
    d.saturating_add(1).min(UNREACHABLE)
}

/// Whether a value of type `candidate` can be used where `target` is expected
pub fn is_assignable(target: &NativeType, candidate: &NativeType) -> bool {
    distance(target, Some(candidate)) < UNREACHABLE
}
