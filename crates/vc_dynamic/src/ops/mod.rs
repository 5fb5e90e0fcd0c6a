//! Kind-specific views of reflected values.
//!
//! [`Reflect::reflect_ref`](crate::Reflect::reflect_ref) returns a
//! [`ReflectRef`], which tells the caller what kind of value it holds and
//! hands out the matching trait object.

// -----------------------------------------------------------------------------
// Modules

mod collection_ops;
mod enum_ops;
mod grouping_ops;
mod kind;
mod map_ops;
mod shared_ops;
mod struct_ops;

// -----------------------------------------------------------------------------
// Exports

pub use collection_ops::Collection;
pub use enum_ops::Enum;
pub use grouping_ops::Grouping;
pub use kind::{ReflectKind, ReflectMut, ReflectRef};
pub use map_ops::{Map, Pair};
pub use shared_ops::Shared;
pub use struct_ops::{MemberIter, Struct};
