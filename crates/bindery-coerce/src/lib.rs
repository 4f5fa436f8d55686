//! Bindery Coercion Engine
//!
//! Ranks and converts dynamic script values for a statically-typed native
//! surface, and picks the best member of an overload set for a call.
//!
//! - [`registry`] maps each native type to a [`Coercion`] strategy.
//! - [`surface_for`] projects a native type into fields, overload sets,
//!   constructors and member types.
//! - [`Resolver`] sums per-argument [`Score`]s to choose among overloads.
//!
//! # Example
//!
//! ```ignore
//! use bindery_coerce::{resolve_overload, surface_for, Value};
//!
//! let surface = surface_for(&calc_type);
//! let add = surface.method("add").unwrap();
//! let args = vec![Value::from(2).into_ref(), Value::text("3").into_ref()];
//! let chosen = resolve_overload(add, &args)?;
//! let native_args = bindery_coerce::bind_arguments(chosen.member, &args)?;
//! ```

#![warn(missing_docs)]

pub mod coercion;
pub mod config;
pub mod error;
pub mod native;
pub mod number;
pub mod registry;
pub mod resolve;
pub mod score;
pub mod surface;
pub mod value;

pub use coercion::{ArrayCoercion, Coercion, NumericTarget, TextTarget};
pub use config::{InteropConfig, TieBreak};
pub use error::{CoerceError, CoerceResult, ConfigError, ResolveError, ResolveResult};
pub use native::{NativeArray, NativeValue};
pub use number::{parse_number, Number};
pub use registry::CoercionRegistry;
pub use resolve::{
    bind_arguments, bind_field, resolve_overload, score_arguments, Resolved, Resolver,
};
pub use score::{Score, MAX_ARGUMENT_SCORE, MAX_ARITY, TEXT_TO_NUMBER_PENALTY};
pub use surface::{surface_for, ClassSurface, Invocable, Overloads};
pub use value::{nil, NativeObject, ScriptValue, Value, ValueKind, ValueRef};
