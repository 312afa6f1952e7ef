//! Dynamic value protocol and runtime for tether-generated adapters.
//!
//! This crate provides everything the generated adapter source links against:
//! the [`Value`] enum carrying script-side data, the [`CallError`] taxonomy
//! surfaced on the dynamic call path, the [`FromValue`]/[`IntoValue`]
//! conversion traits adapters use to cross the bridge, and the [`Builtins`]
//! registry an embedding engine populates with adapted callables.
//!
//! It also exports [`to_callable`], the marker function the generator scans
//! for. The marker is a placeholder so a project compiles before generation
//! runs; the generator's emitter substitutes each marker call with the
//! concrete adapter for the wrapped function's signature.

#![deny(clippy::unwrap_used)]

pub mod builtins;
pub mod convert;
pub mod error;
pub mod marker;
pub mod value;

pub use builtins::{Builtins, Callable};
pub use convert::{FromValue, IntoValue};
pub use error::{CallError, Error};
pub use marker::to_callable;
pub use value::Value;
