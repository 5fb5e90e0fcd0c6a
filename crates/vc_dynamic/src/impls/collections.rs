use alloc::boxed::Box;
use alloc::collections::{BTreeSet, LinkedList, VecDeque};
use alloc::vec;
use alloc::vec::Vec;
use std::collections::HashSet;

use crate::handle::{CollectionKind, CollectionShape, TypeRef, TypeShape};
use crate::impls::take_all;
use crate::info::TypeInfo;
use crate::ops::Collection;
use crate::reflection::impl_reflect_cast_fn;
use crate::registry::TypeRegistry;
use crate::{Reflect, Typed};

macro_rules! impl_collection {
    ($($ty:ident [$($bound:tt)*] => $namespace:literal, $kind:ident;)*) => {
        $(
            impl<T: Typed $($bound)*> Reflect for $ty<T> {
                impl_reflect_cast_fn!(Collection);
            }

            impl<T: Typed $($bound)*> Collection for $ty<T> {
                #[inline]
                fn len(&self) -> usize {
                    <$ty<T>>::len(self)
                }

                fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
                    Box::new(self.iter().map(|item| item as &dyn Reflect))
                }
            }

            impl<T: Typed $($bound)*> Typed for $ty<T> {
                fn type_info() -> TypeInfo {
                    TypeInfo::new(stringify!($ty))
                        .with_namespace($namespace)
                        .with_generic_arguments(vec![TypeInfo::of::<T>()])
                }

                fn type_shape() -> TypeShape {
                    TypeShape::Collection(CollectionShape::new(
                        CollectionKind::$kind,
                        TypeRef::of::<T>(),
                        |items| {
                            let items = take_all::<T>(items)?;
                            Some(Box::new(items.into_iter().collect::<$ty<T>>()) as Box<dyn Reflect>)
                        },
                    ))
                }

                fn register_dependencies(registry: &mut TypeRegistry) {
                    registry.register::<T>();
                }
            }
        )*
    };
}

impl_collection! {
    Vec [] => "alloc::vec", List;
    VecDeque [] => "alloc::collections", Queue;
    LinkedList [] => "alloc::collections", LinkedList;
    HashSet [+ Eq + core::hash::Hash] => "std::collections", HashSet;
    BTreeSet [+ Ord] => "alloc::collections", SortedSet;
}

// -----------------------------------------------------------------------------
// Arrays

impl<T: Typed> Reflect for Box<[T]> {
    impl_reflect_cast_fn!(Collection);
}

impl<T: Typed> Collection for Box<[T]> {
    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn iter_items(&self) -> Box<dyn Iterator<Item = &dyn Reflect> + '_> {
        Box::new(self.iter().map(|item| item as &dyn Reflect))
    }
}

impl<T: Typed> Typed for Box<[T]> {
    fn type_info() -> TypeInfo {
        TypeInfo::as_array_of(TypeInfo::of::<T>())
    }

    fn type_shape() -> TypeShape {
        TypeShape::Collection(CollectionShape::new(
            CollectionKind::Array,
            TypeRef::of::<T>(),
            |items| {
                let items: Vec<T> = take_all(items)?;
                Some(Box::new(items.into_boxed_slice()) as Box<dyn Reflect>)
            },
        ))
    }

    fn register_dependencies(registry: &mut TypeRegistry) {
        registry.register::<T>();
    }
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeSet;

    use crate::handle::{CollectionKind, TypeHandle, TypeShape};
    use crate::ops::ReflectRef;
    use crate::Reflect;

    #[test]
    fn sets_rebuild_from_items() {
        let handle = TypeHandle::of::<BTreeSet<i64>>();
        assert_eq!(handle.full_name(), "alloc::collections::BTreeSet<i64>");
        let TypeShape::Collection(shape) = handle.shape() else {
            panic!("expected a collection shape");
        };
        assert_eq!(shape.kind(), CollectionKind::SortedSet);

        let built = shape
            .build(vec![Box::new(3_i64) as Box<dyn Reflect>, Box::new(1_i64), Box::new(3_i64)])
            .unwrap();
        let set = built.downcast_ref::<BTreeSet<i64>>().unwrap();
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), [1, 3]);
    }

    #[test]
    fn arrays_are_boxed_slices() {
        let array: Box<[u16]> = vec![4, 5].into_boxed_slice();
        let ReflectRef::Collection(view) = array.reflect_ref() else {
            panic!("expected a collection view");
        };
        assert_eq!(view.len(), 2);
        assert_eq!(array.type_handle().full_name(), "[u16]");
        assert!(array.type_handle().type_info().is_array());
    }

    #[test]
    fn mismatched_items_are_rejected() {
        let handle = TypeHandle::of::<Vec<u8>>();
        let TypeShape::Collection(shape) = handle.shape() else {
            panic!("expected a collection shape");
        };
        let items = vec![Box::new(1_u8) as Box<dyn Reflect>, Box::new(String::from("x"))];
        assert!(shape.build(items).is_none());
    }
}
