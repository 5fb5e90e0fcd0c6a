use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::{Any, TypeId};

use crate::handle::TypeHandle;
use crate::info::TypeInfo;
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// An object-safe view of a value that the mapper can traverse.
///
/// `Reflect` is what the mapper sees of a value: its runtime
/// [`TypeHandle`] and a borrowed, kind-specific view through
/// [`reflect_ref`](Reflect::reflect_ref) and
/// [`reflect_mut`](Reflect::reflect_mut).
///
/// It is implemented for the scalar types, `Option`, the standard
/// collections, `Arc` and `Arc<RwLock<T>>`, and for user types through
/// [`derive::Reflect`](crate::derive::Reflect).
///
/// # Type Identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` returns the id of the box.
/// Use [`Reflect::ty_id`] instead:
///
/// ```
/// use vc_dynamic::Reflect;
/// use core::any::TypeId;
///
/// let value: Box<dyn Reflect> = 7_u8.into_boxed_reflect();
/// assert_eq!(value.ty_id(), TypeId::of::<u8>());
/// ```
///
/// # Downcasting
///
/// ```
/// use vc_dynamic::Reflect;
///
/// let value: Box<dyn Reflect> = String::from("K1").into_boxed_reflect();
/// assert_eq!(value.downcast_ref::<String>().map(String::as_str), Some("K1"));
/// assert_eq!(value.take::<String>().ok().as_deref(), Some("K1"));
/// ```
pub trait Reflect: Send + Sync + Any {
    /// Casts this value to a `&dyn Reflect`.
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    /// Boxes this value as a `Box<dyn Reflect>`.
    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Returns the handle of the concrete type of this value.
    fn type_handle(&self) -> Arc<TypeHandle>;

    /// Returns the descriptor of the type this value stands for.
    ///
    /// This is the descriptor of its own type, except for values like
    /// [`Record`](crate::impls::Record) that stand in for a type that does
    /// not exist in this process.
    #[inline]
    fn represented_type_info(&self) -> Option<TypeInfo> {
        Some(self.type_handle().type_info().clone())
    }

    /// Returns a kind-specific, immutable view of this value.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Returns a kind-specific, mutable view of this value.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the box, handing it back unchanged on a type mismatch.
    #[inline]
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            match <Box<dyn Any>>::downcast::<T>(self) {
                Ok(value) => Ok(value),
                Err(_) => unreachable!("type is already checked"),
            }
        } else {
            Err(self)
        }
    }

    /// Moves the value out of the box, handing it back on a type mismatch.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl core::fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "dyn Reflect<{}>", self.type_handle().type_path())
    }
}

// -----------------------------------------------------------------------------
// Auxiliary macro

/// Implements the handle and view methods of [`Reflect`] for a type whose
/// kind has no mutable view.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn type_handle(&self) -> ::alloc::sync::Arc<$crate::handle::TypeHandle> {
            $crate::handle::TypeHandle::of::<Self>()
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::Opaque
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
