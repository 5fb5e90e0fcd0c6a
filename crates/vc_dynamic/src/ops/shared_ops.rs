use crate::Reflect;

/// A reference-counted value that may be reachable from several places.
///
/// Values that share an [`identity`](Shared::identity) are mapped to the
/// same [`DynamicObject`](crate::object::DynamicObject), which is how
/// sharing and cycles survive a round trip.
pub trait Shared: Reflect {
    /// Address of the shared allocation.
    fn identity(&self) -> usize;

    /// Calls `f` with the shared value.
    fn with_inner(&self, f: &mut dyn FnMut(&dyn Reflect));

    /// Calls `f` with mutable access to the shared value.
    ///
    /// Returns `false` without calling `f` when the wrapper has no interior
    /// mutability.
    fn with_inner_mut(&self, f: &mut dyn FnMut(&mut dyn Reflect)) -> bool;
}
