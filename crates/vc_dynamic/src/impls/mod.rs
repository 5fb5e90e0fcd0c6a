//! [`Reflect`](crate::Reflect) and [`Typed`](crate::Typed) for built-in
//! types, and the value types the mapper produces on its own.

// -----------------------------------------------------------------------------
// Modules

mod collections;
mod grouping;
mod maps;
mod option;
mod pair;
mod primitives;
mod record;
mod shared;

// -----------------------------------------------------------------------------
// Exports

pub use grouping::Grouping;
pub use pair::KeyValuePair;
pub use record::Record;
pub use shared::SharedCell;

pub(crate) use pair::pair_type_info;

// -----------------------------------------------------------------------------
// Helpers

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::Reflect;

/// Unboxes every item as `T`, failing on the first mismatch.
pub(crate) fn take_all<T: Reflect>(items: Vec<Box<dyn Reflect>>) -> Option<Vec<T>> {
    items.into_iter().map(|item| item.take::<T>().ok()).collect()
}
