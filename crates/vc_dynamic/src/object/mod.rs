//! The dynamic object model.
//!
//! A [`DynamicObject`] is a shared, loosely typed bag of named [`Value`]s
//! with an optional [`TypeInfo`](crate::info::TypeInfo). An object with a
//! single property named `""` is a *wrapped value*: a scalar or an array
//! that travels on its own.

// -----------------------------------------------------------------------------
// Modules

mod coerce;
mod dynamic_object;
mod error;
mod property;
mod value;

// -----------------------------------------------------------------------------
// Exports

pub use dynamic_object::{DynamicObject, ObjectId, ObserverId, PropertyChanged};
pub use error::AmbiguousMemberError;
pub use property::{Property, PropertySet};
pub use value::{Value, ValueKind};

/// Name of the single property of a wrapped value.
pub const WRAPPED_VALUE: &str = "";
