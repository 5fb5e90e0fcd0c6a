//! Serializable type descriptors.
//!
//! A [`TypeInfo`] is the part of a type that travels with a
//! [`DynamicObject`](crate::object::DynamicObject): enough structure for the
//! receiving side to find a matching type through a
//! [`TypeResolver`](crate::resolver::TypeResolver), and nothing that only
//! makes sense inside one process.

// -----------------------------------------------------------------------------
// Modules

mod scalar_kind;
mod type_info;

// -----------------------------------------------------------------------------
// Exports

pub use scalar_kind::ScalarKind;
pub use type_info::{PropertyInfo, TypeInfo};
