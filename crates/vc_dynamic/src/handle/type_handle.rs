use alloc::string::String;
use alloc::sync::Arc;
use core::any::TypeId;
use core::fmt;

use crate::handle::{StructShape, TypeShape, cell};
use crate::impls::Record;
use crate::info::TypeInfo;
use crate::reflection::Typed;

/// The runtime handle of a type.
///
/// Handles of Rust types are created once per type and shared:
/// [`TypeHandle::of`] always returns the same `Arc` for the same `T`.
/// Resolvers may also create *synthesized* handles, which describe a type
/// that does not exist in this process and materialize it as a
/// [`Record`].
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_dynamic::handle::TypeHandle;
///
/// let a = TypeHandle::of::<Vec<String>>();
/// let b = TypeHandle::of::<Vec<String>>();
/// assert!(Arc::ptr_eq(&a, &b));
/// assert_eq!(a.full_name(), "alloc::vec::Vec<alloc::string::String>");
/// ```
pub struct TypeHandle {
    type_id: TypeId,
    type_path: &'static str,
    type_info: TypeInfo,
    shape: TypeShape,
    synthesized: bool,
}

impl TypeHandle {
    /// Returns the shared handle of `T`.
    #[inline]
    pub fn of<T: Typed>() -> Arc<TypeHandle> {
        cell::handle_of::<T>()
    }

    pub(super) fn build<T: Typed>() -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_path: core::any::type_name::<T>(),
            type_info: T::type_info(),
            shape: T::type_shape(),
            synthesized: false,
        }
    }

    /// Creates a handle for a structural type that only exists as a
    /// descriptor. Values of it are [`Record`]s.
    pub fn synthesized(type_info: TypeInfo, shape: StructShape) -> Self {
        Self {
            type_id: TypeId::of::<Record>(),
            type_path: core::any::type_name::<Record>(),
            type_info,
            shape: TypeShape::Struct(shape),
            synthesized: true,
        }
    }

    /// The [`TypeId`] of the values this handle builds.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The Rust type name, as reported by [`core::any::type_name`].
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.type_path
    }

    #[inline]
    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    #[inline]
    pub fn shape(&self) -> &TypeShape {
        &self.shape
    }

    #[inline]
    pub fn full_name(&self) -> String {
        self.type_info.full_name()
    }

    /// Returns `true` for handles created by [`TypeHandle::synthesized`].
    #[inline]
    pub fn is_synthesized(&self) -> bool {
        self.synthesized
    }

    /// Returns `true` if the handle describes an anonymous struct.
    #[inline]
    pub fn is_anonymous(&self) -> bool {
        self.type_info.is_anonymous()
            || matches!(&self.shape, TypeShape::Struct(shape) if shape.is_anonymous())
    }

    /// Names of the struct members, empty for other shapes.
    pub fn member_names(&self) -> impl Iterator<Item = &str> {
        self.shape
            .as_struct()
            .into_iter()
            .flat_map(|shape| shape.members().iter().map(|member| member.name()))
    }
}

impl fmt::Debug for TypeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeHandle")
            .field("type_path", &self.type_path)
            .field("full_name", &self.type_info.full_name())
            .field("kind", &self.shape.kind())
            .field("synthesized", &self.synthesized)
            .finish()
    }
}
