use alloc::boxed::Box;
use alloc::string::String;

use crate::handle::{ScalarShape, TypeShape};
use crate::info::{ScalarKind, TypeInfo};
use crate::object::Value;
use crate::ops::ReflectMut;
use crate::{Reflect, Typed};

// Scalars are handed out by value: `reflect_ref` converts instead of borrowing.
macro_rules! impl_scalar {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Reflect for $ty {
                #[inline]
                fn type_handle(&self) -> ::alloc::sync::Arc<crate::handle::TypeHandle> {
                    crate::handle::TypeHandle::of::<Self>()
                }

                #[inline]
                fn reflect_ref(&self) -> crate::ops::ReflectRef<'_> {
                    crate::ops::ReflectRef::Scalar(Value::from(self.clone()))
                }

                #[inline]
                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Opaque
                }
            }

            impl Typed for $ty {
                fn type_info() -> TypeInfo {
                    ScalarKind::$kind.type_info()
                }

                fn type_shape() -> TypeShape {
                    TypeShape::Scalar(ScalarShape::new(ScalarKind::$kind, |value| {
                        match value {
                            Value::$kind(v) => Some(Box::new(v) as Box<dyn Reflect>),
                            _ => None,
                        }
                    }))
                }
            }
        )*
    };
}

impl_scalar! {
    bool => Bool,
    char => Char,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    i128 => I128,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    u128 => U128,
    f32 => F32,
    f64 => F64,
    String => String,
}

// `isize` and `usize` travel as 64-bit values.
macro_rules! impl_pointer_sized {
    ($($ty:ty => $kind:ident via $variant:ident as $wide:ty),* $(,)?) => {
        $(
            impl Reflect for $ty {
                #[inline]
                fn type_handle(&self) -> ::alloc::sync::Arc<crate::handle::TypeHandle> {
                    crate::handle::TypeHandle::of::<Self>()
                }

                #[inline]
                fn reflect_ref(&self) -> crate::ops::ReflectRef<'_> {
                    crate::ops::ReflectRef::Scalar(Value::$variant(*self as $wide))
                }

                #[inline]
                fn reflect_mut(&mut self) -> ReflectMut<'_> {
                    ReflectMut::Opaque
                }
            }

            impl Typed for $ty {
                fn type_info() -> TypeInfo {
                    ScalarKind::$kind.type_info()
                }

                fn type_shape() -> TypeShape {
                    TypeShape::Scalar(ScalarShape::new(ScalarKind::$kind, |value| {
                        match value {
                            Value::$variant(v) => <$ty>::try_from(v)
                                .ok()
                                .map(|v| Box::new(v) as Box<dyn Reflect>),
                            _ => None,
                        }
                    }))
                }
            }
        )*
    };
}

impl_pointer_sized! {
    isize => Isize via I64 as i64,
    usize => Usize via U64 as u64,
}

impl Reflect for () {
    #[inline]
    fn type_handle(&self) -> ::alloc::sync::Arc<crate::handle::TypeHandle> {
        crate::handle::TypeHandle::of::<Self>()
    }

    #[inline]
    fn reflect_ref(&self) -> crate::ops::ReflectRef<'_> {
        crate::ops::ReflectRef::Scalar(Value::Null)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Opaque
    }
}

impl Typed for () {
    fn type_info() -> TypeInfo {
        ScalarKind::Unit.type_info()
    }

    fn type_shape() -> TypeShape {
        TypeShape::Scalar(ScalarShape::new(ScalarKind::Unit, |value| {
            value.is_null().then(|| Box::new(()) as Box<dyn Reflect>)
        }))
    }
}

#[cfg(test)]
mod tests {
    use crate::handle::TypeHandle;
    use crate::info::TypeInfo;
    use crate::object::Value;
    use crate::ops::ReflectRef;
    use crate::{Reflect, Typed};

    #[test]
    fn scalars_report_their_value() {
        let ReflectRef::Scalar(value) = 'q'.reflect_ref() else {
            panic!("char is a scalar");
        };
        assert_eq!(value, Value::Char('q'));

        let ReflectRef::Scalar(value) = (-5_isize).reflect_ref() else {
            panic!("isize is a scalar");
        };
        assert_eq!(value, Value::I64(-5));
    }

    #[test]
    fn scalar_shapes_build_exact_types() {
        let handle = TypeHandle::of::<usize>();
        let shape = handle.shape().as_scalar().unwrap();
        let built = shape.build(Value::U64(9)).unwrap();
        assert_eq!(built.downcast_ref::<usize>(), Some(&9));
        assert!(shape.build(Value::I64(9)).is_none());
        assert_eq!(String::type_info(), TypeInfo::new("String").with_namespace("alloc::string"));
    }
}
