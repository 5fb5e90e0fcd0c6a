use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;
use std::sync::LazyLock;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::registry::TypeRegistry;

/// A shared [`TypeRegistry`].
#[derive(Clone, Default)]
pub struct TypeRegistryArc {
    internal: Arc<RwLock<TypeRegistry>>,
}

static GLOBAL: LazyLock<TypeRegistryArc> = LazyLock::new(|| {
    let mut registry = TypeRegistry::new();
    registry.auto_register();
    TypeRegistryArc::new(registry)
});

impl TypeRegistryArc {
    #[inline]
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// The process-wide registry used by the built-in resolver.
    ///
    /// Holds the scalar types and, with the `auto_register` feature, every
    /// type marked `#[reflect(auto_register)]`. Types registered here later
    /// become visible to the built-in resolver immediately.
    #[inline]
    pub fn global() -> &'static TypeRegistryArc {
        &GLOBAL
    }

    #[inline]
    pub fn read(&self) -> RwLockReadGuard<'_, TypeRegistry> {
        self.internal.read()
    }

    #[inline]
    pub fn write(&self) -> RwLockWriteGuard<'_, TypeRegistry> {
        self.internal.write()
    }
}

impl From<TypeRegistry> for TypeRegistryArc {
    #[inline]
    fn from(registry: TypeRegistry) -> Self {
        Self::new(registry)
    }
}

impl fmt::Debug for TypeRegistryArc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.read();
        let mut names: Vec<&str> = registry.full_names().collect();
        names.sort_unstable();
        f.debug_list().entries(names).finish()
    }
}
