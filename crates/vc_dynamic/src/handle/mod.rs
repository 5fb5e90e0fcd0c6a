//! Runtime type handles.
//!
//! A [`TypeHandle`] is the runtime stand-in for a Rust type: its
//! [`TypeInfo`](crate::info::TypeInfo) descriptor plus a [`TypeShape`] that
//! tells the mapper how to take values of the type apart and how to build
//! them again.

// -----------------------------------------------------------------------------
// Modules

mod cell;
mod shape;
mod type_handle;
mod type_ref;

// -----------------------------------------------------------------------------
// Exports

pub use shape::{
    CollectionKind, CollectionShape, EnumShape, GroupingShape, MapShape, MemberInfo, OptionShape,
    PairShape, ScalarShape, SharedShape, StructShape, TypeShape, VariantInfo,
};
pub use type_handle::TypeHandle;
pub use type_ref::TypeRef;
