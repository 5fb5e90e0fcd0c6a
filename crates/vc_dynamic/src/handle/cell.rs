//! Process-wide cache of [`TypeHandle`]s.
//!
//! Generic impls share one `static`, so the cache is a [`TypeIdMap`] behind
//! a lock rather than a `OnceLock` per type.

use alloc::sync::Arc;
use core::any::TypeId;

use parking_lot::RwLock;
use vc_utils::TypeIdMap;

use crate::handle::TypeHandle;
use crate::reflection::Typed;

static HANDLES: RwLock<TypeIdMap<Arc<TypeHandle>>> = RwLock::new(TypeIdMap::new());

pub(super) fn handle_of<T: Typed>() -> Arc<TypeHandle> {
    let type_id = TypeId::of::<T>();
    if let Some(handle) = HANDLES.read().get(&type_id) {
        return Arc::clone(handle);
    }

    // Built without holding the lock: descriptors of generic and anonymous
    // types ask for the handles of their arguments and members.
    let built = Arc::new(TypeHandle::build::<T>());
    Arc::clone(HANDLES.write().get_or_insert(type_id, || built))
}
