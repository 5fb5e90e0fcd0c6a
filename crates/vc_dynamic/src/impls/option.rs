use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;

use crate::handle::{OptionShape, TypeHandle, TypeRef, TypeShape};
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::TypeRegistry;
use crate::{Reflect, Typed};

impl<T: Typed> Reflect for Option<T> {
    #[inline]
    fn type_handle(&self) -> Arc<TypeHandle> {
        TypeHandle::of::<Self>()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Option(self.as_ref().map(|value| value as &dyn Reflect))
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque
    }
}

impl<T: Typed> Typed for Option<T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new("Option")
            .with_namespace("core::option")
            .with_generic_arguments(vec![TypeInfo::of::<T>()])
    }

    fn type_shape() -> TypeShape {
        TypeShape::Option(OptionShape::new(
            TypeRef::of::<T>(),
            || Box::new(None::<T>) as Box<dyn Reflect>,
            |value| {
                let value = value.take::<T>().ok()?;
                Some(Box::new(Some(value)) as Box<dyn Reflect>)
            },
        ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use crate::handle::{TypeHandle, TypeShape};
    use crate::info::TypeInfo;

    #[test]
    fn option_shape_builds_both_variants() {
        let handle = TypeHandle::of::<Option<u8>>();
        assert_eq!(handle.full_name(), "core::option::Option<u8>");

        let TypeShape::Option(shape) = handle.shape() else {
            panic!("expected an option shape");
        };
        assert_eq!(shape.inner().type_info(), &TypeInfo::of::<u8>());

        let none = shape.build_none();
        assert_eq!(none.downcast_ref::<Option<u8>>(), Some(&None));

        let some = shape.build_some(Box::new(3_u8)).unwrap();
        assert_eq!(some.downcast_ref::<Option<u8>>(), Some(&Some(3)));
        assert!(shape.build_some(Box::new(3_i8)).is_none());
    }
}
