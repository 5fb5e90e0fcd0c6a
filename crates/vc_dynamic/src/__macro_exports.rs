//! Items used by the code generated by `#[derive(Reflect)]`.
//!
//! Not part of the public API.

pub use alloc::boxed::Box;
pub use alloc::sync::Arc;
pub use alloc::vec;
pub use alloc::vec::Vec;

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::Typed;
    use crate::registry::TypeRegistry;

    /// A registration submitted by `#[reflect(auto_register)]`.
    pub struct AutoRegistration(pub fn(&mut TypeRegistry));

    inventory::collect!(AutoRegistration);

    #[inline]
    pub fn register_type<T: Typed>(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }

    pub(crate) fn register_types(registry: &mut TypeRegistry) {
        for registration in inventory::iter::<AutoRegistration> {
            (registration.0)(registry);
        }
    }
}
