use alloc::sync::Arc;
use core::fmt;

use crate::handle::TypeHandle;
use crate::reflection::Typed;

/// A reference from one shape to the handle of another type.
///
/// Static references are resolved lazily, which is what lets a type refer
/// to itself (`struct Node { next: Option<Arc<RwLock<Node>>> }`).
#[derive(Clone)]
pub enum TypeRef {
    Static(fn() -> Arc<TypeHandle>),
    Resolved(Arc<TypeHandle>),
}

impl TypeRef {
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self::Static(TypeHandle::of::<T>)
    }

    /// Returns the referenced handle.
    #[inline]
    pub fn get(&self) -> Arc<TypeHandle> {
        match self {
            Self::Static(f) => f(),
            Self::Resolved(handle) => Arc::clone(handle),
        }
    }
}

impl From<Arc<TypeHandle>> for TypeRef {
    #[inline]
    fn from(handle: Arc<TypeHandle>) -> Self {
        Self::Resolved(handle)
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static(_) => f.write_str("TypeRef::Static"),
            Self::Resolved(handle) => write!(f, "TypeRef::Resolved({})", handle.full_name()),
        }
    }
}
