use crate::Reflect;
use crate::handle::TypeShape;
use crate::info::TypeInfo;
use crate::registry::TypeRegistry;

/// Static type information of a reflected type.
///
/// `type_info` and `type_shape` are only called once per type: the result
/// is cached in the type's [`TypeHandle`](crate::handle::TypeHandle).
/// Prefer [`TypeHandle::of`](crate::handle::TypeHandle::of) and
/// [`TypeInfo::of`] over calling them directly.
///
/// # Examples
///
/// ```
/// use vc_dynamic::{Typed, handle::TypeShape, info::ScalarKind};
///
/// assert_eq!(i16::type_info().name(), "i16");
/// assert!(matches!(
///     i16::type_shape(),
///     TypeShape::Scalar(shape) if shape.kind() == ScalarKind::I16
/// ));
/// ```
pub trait Typed: Reflect + Sized {
    /// Builds the descriptor of this type.
    fn type_info() -> TypeInfo;

    /// Builds the structural shape of this type.
    fn type_shape() -> TypeShape;

    /// Registers the types this type is built from.
    ///
    /// Called by [`TypeRegistry::register`] after the type itself has been
    /// added, so recursive types terminate.
    #[inline]
    fn register_dependencies(_registry: &mut TypeRegistry) {}
}
