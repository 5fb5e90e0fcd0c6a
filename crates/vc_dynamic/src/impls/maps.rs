use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec;
use std::collections::HashMap;

use crate::handle::{MapShape, TypeRef, TypeShape};
use crate::info::TypeInfo;
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::TypeRegistry;
use crate::{Reflect, Typed};

macro_rules! impl_map {
    ($($ty:ident [$($bound:tt)*] => $namespace:literal, sorted: $sorted:literal;)*) => {
        $(
            impl<K: Typed $($bound)*, V: Typed> Reflect for $ty<K, V> {
                impl_reflect_cast_fn!(Map);
            }

            impl<K: Typed $($bound)*, V: Typed> Map for $ty<K, V> {
                #[inline]
                fn len(&self) -> usize {
                    <$ty<K, V>>::len(self)
                }

                fn iter_entries(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                    Box::new(
                        self.iter()
                            .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                    )
                }
            }

            impl<K: Typed $($bound)*, V: Typed> Typed for $ty<K, V> {
                fn type_info() -> TypeInfo {
                    TypeInfo::new(stringify!($ty))
                        .with_namespace($namespace)
                        .with_generic_arguments(vec![TypeInfo::of::<K>(), TypeInfo::of::<V>()])
                }

                fn type_shape() -> TypeShape {
                    TypeShape::Map(MapShape::new(
                        $sorted,
                        TypeRef::of::<K>(),
                        TypeRef::of::<V>(),
                        |entries| {
                            let mut map = <$ty<K, V>>::new();
                            for (key, value) in entries {
                                map.insert(key.take::<K>().ok()?, value.take::<V>().ok()?);
                            }
                            Some(Box::new(map) as Box<dyn Reflect>)
                        },
                    ))
                }

                fn register_dependencies(registry: &mut TypeRegistry) {
                    registry.register::<K>();
                    registry.register::<V>();
                }
            }
        )*
    };
}

impl_map! {
    HashMap [+ Eq + core::hash::Hash] => "std::collections", sorted: false;
    BTreeMap [+ Ord] => "alloc::collections", sorted: true;
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use std::collections::HashMap;

    use crate::handle::{TypeHandle, TypeShape};
    use crate::ops::ReflectRef;
    use crate::Reflect;

    #[test]
    fn map_shape_builds_from_entries() {
        let handle = TypeHandle::of::<HashMap<String, u32>>();
        assert_eq!(
            handle.full_name(),
            "std::collections::HashMap<alloc::string::String, u32>"
        );
        let TypeShape::Map(shape) = handle.shape() else {
            panic!("expected a map shape");
        };
        assert!(!shape.is_sorted());

        let entries = vec![(
            Box::new(String::from("a")) as Box<dyn Reflect>,
            Box::new(1_u32) as Box<dyn Reflect>,
        )];
        let built = shape.build(entries).unwrap();
        let map = built.downcast_ref::<HashMap<String, u32>>().unwrap();
        assert_eq!(map.get("a"), Some(&1));
    }

    #[test]
    fn entries_are_visited() {
        let map = BTreeMap::from([(1_u8, 'a'), (2, 'b')]);
        let ReflectRef::Map(view) = map.reflect_ref() else {
            panic!("expected a map view");
        };
        let keys: Vec<_> = view
            .iter_entries()
            .map(|(key, _)| *key.downcast_ref::<u8>().unwrap())
            .collect();
        assert_eq!(keys, [1, 2]);
    }
}
