use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use crate::handle::{GroupingShape, TypeHandle, TypeRef, TypeShape};
use crate::impls::take_all;
use crate::info::TypeInfo;
use crate::ops::{self, ReflectMut, ReflectRef};
use crate::registry::TypeRegistry;
use crate::{Reflect, Typed};

/// A key with the elements grouped under it.
///
/// Mapped to an object with the properties `Key` and `Elements`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Grouping<K, T> {
    pub key: K,
    pub elements: Vec<T>,
}

impl<K, T> Grouping<K, T> {
    #[inline]
    pub const fn new(key: K, elements: Vec<T>) -> Self {
        Self { key, elements }
    }
}

impl<K: Typed, T: Typed> Reflect for Grouping<K, T> {
    #[inline]
    fn type_handle(&self) -> Arc<TypeHandle> {
        TypeHandle::of::<Self>()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Grouping(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque
    }
}

impl<K: Typed, T: Typed> ops::Grouping for Grouping<K, T> {
    #[inline]
    fn key(&self) -> &dyn Reflect {
        &self.key
    }

    fn elements(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.elements.iter().map(|element| element as &dyn Reflect))
    }
}

impl<K: Typed, T: Typed> Typed for Grouping<K, T> {
    fn type_info() -> TypeInfo {
        TypeInfo::new("Grouping")
            .with_namespace("vc_dynamic")
            .with_generic_arguments(vec![TypeInfo::of::<K>(), TypeInfo::of::<T>()])
    }

    fn type_shape() -> TypeShape {
        TypeShape::Grouping(GroupingShape::new(
            TypeRef::of::<K>(),
            TypeRef::of::<T>(),
            |key, elements| {
                let grouping = Grouping::new(key.take::<K>().ok()?, take_all::<T>(elements)?);
                Some(Box::new(grouping) as Box<dyn Reflect>)
            },
        ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<T>();
    }
}
