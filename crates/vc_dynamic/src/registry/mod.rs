//! Type registries.
//!
//! A [`TypeRegistry`] indexes [`TypeHandle`](crate::handle::TypeHandle)s by
//! [`TypeId`](core::any::TypeId), by full name and by short name, which is
//! what a [`DefaultTypeResolver`](crate::resolver::DefaultTypeResolver)
//! searches when it turns a descriptor back into a type.
//!
//! ## auto_register
//!
//! With the `auto_register` feature (enabled by default), every type
//! deriving `Reflect` with `#[reflect(auto_register)]` is collected through
//! [`inventory`] and added by [`TypeRegistry::auto_register`]. The global
//! registry behind the default resolver does this on first use.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod registry_arc;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use registry_arc::TypeRegistryArc;
pub use type_registry::TypeRegistry;
