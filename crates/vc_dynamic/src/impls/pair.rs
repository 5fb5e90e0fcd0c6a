use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec;

use crate::handle::{PairShape, TypeHandle, TypeRef, TypeShape};
use crate::info::TypeInfo;
use crate::ops::{Pair, ReflectMut, ReflectRef};
use crate::registry::TypeRegistry;
use crate::{Reflect, Typed};

const NAMESPACE: &str = "vc_dynamic";

/// A key and a value, mapped to an object with exactly the properties
/// `Key` and `Value`.
///
/// Dictionary entries travel in this form.
///
/// # Examples
///
/// ```
/// use vc_dynamic::{impls::KeyValuePair, mapper::DynamicObjectMapper};
///
/// let mapper = DynamicObjectMapper::new();
/// let object = mapper.map_object(&KeyValuePair::new(String::from("K1"), String::from("V1")));
/// assert_eq!(object.property_names(), ["Key", "Value"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyValuePair<K, V> {
    pub key: K,
    pub value: V,
}

impl<K, V> KeyValuePair<K, V> {
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Self { key, value }
    }

    #[inline]
    pub fn into_tuple(self) -> (K, V) {
        (self.key, self.value)
    }
}

impl<K, V> From<(K, V)> for KeyValuePair<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Self { key, value }
    }
}

/// Descriptor of `KeyValuePair<key, value>` for handles only known at runtime.
pub(crate) fn pair_type_info(key: TypeInfo, value: TypeInfo) -> TypeInfo {
    TypeInfo::new("KeyValuePair")
        .with_namespace(NAMESPACE)
        .with_generic_arguments(vec![key, value])
}

impl<K: Typed, V: Typed> Reflect for KeyValuePair<K, V> {
    #[inline]
    fn type_handle(&self) -> Arc<TypeHandle> {
        TypeHandle::of::<Self>()
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Pair(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque
    }
}

impl<K: Typed, V: Typed> Pair for KeyValuePair<K, V> {
    #[inline]
    fn key(&self) -> &dyn Reflect {
        &self.key
    }

    #[inline]
    fn value(&self) -> &dyn Reflect {
        &self.value
    }
}

impl<K: Typed, V: Typed> Typed for KeyValuePair<K, V> {
    fn type_info() -> TypeInfo {
        pair_type_info(TypeInfo::of::<K>(), TypeInfo::of::<V>())
    }

    fn type_shape() -> TypeShape {
        TypeShape::Pair(PairShape::new(
            TypeRef::of::<K>(),
            TypeRef::of::<V>(),
            |key, value| {
                let pair = KeyValuePair::new(key.take::<K>().ok()?, value.take::<V>().ok()?);
                Some(Box::new(pair) as Box<dyn Reflect>)
            },
        ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<K>();
        registry.register::<V>();
    }
}
