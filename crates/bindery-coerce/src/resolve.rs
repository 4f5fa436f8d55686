//! Overload resolution and argument binding
//!
//! A candidate's total is the sum of its per-argument scores. The candidate
//! with the strictly lowest finite total wins; ties and "nothing fits" are
//! reported to the caller rather than guessed at.

use bindery_types::{FieldInfo, NativeType};

use crate::config::{InteropConfig, TieBreak};
use crate::error::{CoerceError, CoerceResult, ResolveError, ResolveResult};
use crate::native::NativeValue;
use crate::registry;
use crate::score::{Score, MAX_ARITY};
use crate::surface::{Invocable, Overloads};
use crate::value::ValueRef;

/// The selected member and its total score
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    /// Winning candidate
    pub member: &'a Invocable,
    /// Its summed argument score
    pub score: Score,
}

/// Overload resolver
#[derive(Debug, Clone, Default)]
pub struct Resolver {
    config: InteropConfig,
}

impl Resolver {
    /// Resolver with the given settings. A `max_arity` above [`MAX_ARITY`]
    /// is clamped to it.
    pub fn new(mut config: InteropConfig) -> Self {
        if config.max_arity > MAX_ARITY {
            log::warn!(
                "max-arity {} exceeds the limit of {}; clamping",
                config.max_arity,
                MAX_ARITY
            );
            config.max_arity = MAX_ARITY;
        }
        Resolver { config }
    }

    /// Active settings
    pub fn config(&self) -> &InteropConfig {
        &self.config
    }

    /// Pick the best candidate of `overloads` for `args`
    pub fn resolve<'a>(
        &self,
        overloads: &'a Overloads,
        args: &[ValueRef],
    ) -> ResolveResult<Resolved<'a>> {
        let arity = args.len();
        if arity > self.config.max_arity {
            return Err(ResolveError::ArityTooLarge {
                arity,
                max: self.config.max_arity,
            });
        }

        let mut best = Score::UNCOERCIBLE;
        let mut tied: Vec<&'a Invocable> = Vec::new();
        for candidate in overloads.candidates() {
            // Fixed arity only
            if candidate.arity() != arity {
                continue;
            }
            let total = score_arguments(candidate.parameters(), args);
            if !total.is_coercible() {
                continue;
            }
            if total < best {
                best = total;
                tied.clear();
                tied.push(candidate);
            } else if total == best {
                tied.push(candidate);
            }
        }

        let member = match (tied.as_slice(), self.config.tie_break) {
            ([], _) => {
                log::trace!("{}/{}: no match", overloads.name(), arity);
                return Err(ResolveError::NoMatchingOverload {
                    name: overloads.name().to_string(),
                    arity,
                });
            }
            ([only], _) => *only,
            ([first, ..], TieBreak::DeclarationOrder) => *first,
            (all, TieBreak::Reject) => {
                log::trace!("{}/{}: {} tied at {}", overloads.name(), arity, all.len(), best);
                return Err(ResolveError::AmbiguousOverload {
                    name: overloads.name().to_string(),
                    score: best.get(),
                    candidates: all.iter().map(|c| c.to_string()).collect(),
                });
            }
        };
        log::trace!("{}/{}: chose {} at {}", overloads.name(), arity, member, best);
        Ok(Resolved {
            member,
            score: best,
        })
    }
}

/// Resolve with the default settings (ties rejected)
pub fn resolve_overload<'a>(
    overloads: &'a Overloads,
    args: &[ValueRef],
) -> ResolveResult<Resolved<'a>> {
    Resolver::default().resolve(overloads, args)
}

/// Summed score of `args` against `params`, stopping at the first
/// uncoercible argument. Lengths must match.
pub fn score_arguments(params: &[NativeType], args: &[ValueRef]) -> Score {
    if params.len() != args.len() {
        return Score::UNCOERCIBLE;
    }
    let registry = registry::global();
    let mut total = Score::EXACT;
    for (param, arg) in params.iter().zip(args) {
        total = total + registry.score(arg.as_ref(), param);
        if !total.is_coercible() {
            break;
        }
    }
    total
}

/// Convert `args` for a call to `member`
pub fn bind_arguments(member: &Invocable, args: &[ValueRef]) -> CoerceResult<Vec<NativeValue>> {
    let params = member.parameters();
    if params.len() != args.len() {
        return Err(CoerceError::ArityMismatch {
            expected: params.len(),
            actual: args.len(),
        });
    }
    let registry = registry::global();
    params
        .iter()
        .zip(args)
        .map(|(param, arg)| registry.convert(arg, param))
        .collect()
}

/// Convert `value` for a store into `field`
pub fn bind_field(field: &FieldInfo, value: &ValueRef) -> CoerceResult<NativeValue> {
    if field.modifiers.is_final {
        return Err(CoerceError::ReadOnlyField {
            field: field.name.clone(),
        });
    }
    registry::convert(value, &field.ty)
}
