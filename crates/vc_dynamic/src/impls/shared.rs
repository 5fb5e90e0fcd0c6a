use alloc::boxed::Box;
use alloc::sync::Arc;

use parking_lot::RwLock;

use crate::handle::{SharedShape, TypeHandle, TypeRef, TypeShape};
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef, Shared};
use crate::registry::TypeRegistry;
use crate::{Reflect, Typed};

/// A shared, mutable value: the wrapper to use for graphs with cycles.
///
/// Both `Arc<T>` and `Arc<RwLock<T>>` are mapped transparently: the dynamic
/// object carries the descriptor of `T`, and every reference to the same
/// allocation becomes the same object. Only `SharedCell` can be rebuilt
/// from a cyclic graph, because its value is allocated before its members
/// are filled in.
pub type SharedCell<T> = Arc<RwLock<T>>;

// -----------------------------------------------------------------------------
// Arc<T>

impl<T: Typed> Reflect for Arc<T> {
    #[inline]
    fn type_handle(&self) -> Arc<TypeHandle> {
        TypeHandle::of::<Self>()
    }

    #[inline]
    fn represented_type_info(&self) -> Option<TypeInfo> {
        (**self).represented_type_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Shared(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque
    }
}

impl<T: Typed> Shared for Arc<T> {
    #[inline]
    fn identity(&self) -> usize {
        Arc::as_ptr(self) as usize
    }

    fn with_inner(&self, f: &mut dyn FnMut(&dyn Reflect)) {
        f(&**self);
    }

    #[inline]
    fn with_inner_mut(&self, _f: &mut dyn FnMut(&mut dyn Reflect)) -> bool {
        false
    }
}

impl<T: Typed> Typed for Arc<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn type_shape() -> TypeShape {
        TypeShape::Shared(SharedShape::new(
            TypeRef::of::<T>(),
            false,
            |value| Some(Box::new(Arc::new(value.take::<T>().ok()?)) as Box<dyn Reflect>),
            |wrapper| {
                let shared = wrapper.downcast_ref::<Arc<T>>()?;
                Some(Box::new(Arc::clone(shared)) as Box<dyn Reflect>)
            },
        ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

// -----------------------------------------------------------------------------
// Arc<RwLock<T>>

impl<T: Typed> Reflect for Arc<RwLock<T>> {
    #[inline]
    fn type_handle(&self) -> Arc<TypeHandle> {
        TypeHandle::of::<Self>()
    }

    #[inline]
    fn represented_type_info(&self) -> Option<TypeInfo> {
        self.read().represented_type_info()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Shared(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque
    }
}

impl<T: Typed> Shared for Arc<RwLock<T>> {
    #[inline]
    fn identity(&self) -> usize {
        Arc::as_ptr(self) as usize
    }

    fn with_inner(&self, f: &mut dyn FnMut(&dyn Reflect)) {
        f(&*self.read());
    }

    fn with_inner_mut(&self, f: &mut dyn FnMut(&mut dyn Reflect)) -> bool {
        f(&mut *self.write());
        true
    }
}

impl<T: Typed> Typed for Arc<RwLock<T>> {
    fn type_info() -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn type_shape() -> TypeShape {
        TypeShape::Shared(SharedShape::new(
            TypeRef::of::<T>(),
            true,
            |value| {
                let cell: SharedCell<T> = Arc::new(RwLock::new(value.take::<T>().ok()?));
                Some(Box::new(cell) as Box<dyn Reflect>)
            },
            |wrapper| {
                let shared = wrapper.downcast_ref::<SharedCell<T>>()?;
                Some(Box::new(Arc::clone(shared)) as Box<dyn Reflect>)
            },
        ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::sync::Arc;

    use parking_lot::RwLock;

    use crate::handle::{TypeHandle, TypeShape};
    use crate::info::TypeInfo;
    use crate::ops::ReflectRef;
    use crate::Reflect;

    #[test]
    fn shared_wrappers_are_transparent() {
        assert_eq!(TypeInfo::of::<Arc<u8>>(), TypeInfo::of::<u8>());
        assert_eq!(TypeInfo::of::<Arc<RwLock<u8>>>(), TypeInfo::of::<u8>());
    }

    #[test]
    fn share_clones_the_allocation() {
        let cell = Arc::new(RwLock::new(5_i32));
        let handle = TypeHandle::of::<Arc<RwLock<i32>>>();
        let TypeShape::Shared(shape) = handle.shape() else {
            panic!("expected a shared shape");
        };
        assert!(shape.is_interior_mutable());

        let shared = shape.share(&cell).unwrap();
        let shared = shared.take::<Arc<RwLock<i32>>>().unwrap();
        assert!(Arc::ptr_eq(&cell, &shared));

        let ReflectRef::Shared(view) = cell.reflect_ref() else {
            panic!("expected a shared view");
        };
        assert_eq!(view.identity(), Arc::as_ptr(&cell) as usize);
        assert!(view.with_inner_mut(&mut |value| {
            *value.downcast_mut::<i32>().unwrap() = 6;
        }));
        assert_eq!(*cell.read(), 6);
    }
}
