use alloc::boxed::Box;

use crate::Reflect;

/// A sequence or set of items.
///
/// Covers boxed slices, `Vec`, `VecDeque`, `LinkedList` and the standard
/// sets. The concrete kind is described by the type's
/// [`CollectionShape`](crate::handle::CollectionShape).
pub trait Collection: Reflect {
    fn len(&self) -> usize;

    /// Iterates over the items in storage order.
    fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_>;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
