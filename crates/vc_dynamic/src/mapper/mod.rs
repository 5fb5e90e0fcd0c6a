//! The bidirectional mapping between reflected values and dynamic objects.
//!
//! [`DynamicObjectMapper::map_object`] walks a value through
//! [`Reflect`] and produces a [`DynamicObject`] graph. [`map`] and
//! [`map_to`] go the other way, building a value of a known type or of the
//! type the object's descriptor resolves to.
//!
//! Shared values (`Arc<T>`, `Arc<RwLock<T>>`) keep their identity in both
//! directions, within a single call: two references to one allocation
//! become one object, and one object becomes one allocation. Cycles are
//! supported through [`SharedCell`](crate::impls::SharedCell).
//!
//! [`map`]: DynamicObjectMapper::map
//! [`map_to`]: DynamicObjectMapper::map_to

// -----------------------------------------------------------------------------
// Modules

mod error;
mod from_dynamic;
mod members;
mod path;
mod settings;
mod to_dynamic;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Exports

pub use error::MappingError;
pub use members::{AllMembers, DataContractMembers, MemberProvider};
pub use path::{MemberPath, PathSegment};
pub use settings::{EnumFormat, MapperSettings};

// -----------------------------------------------------------------------------
// DynamicObjectMapper

use alloc::boxed::Box;
use alloc::sync::Arc;
use core::fmt;

use crate::handle::TypeHandle;
use crate::info::TypeInfo;
use crate::object::{DynamicObject, Value};
use crate::resolver::{TypeResolver, default_resolver};
use crate::{Reflect, Typed};

use from_dynamic::FromDynamic;
use to_dynamic::ToDynamic;

/// Maps values to dynamic objects and back.
///
/// A mapper holds only configuration: the resolver used to find the type
/// of an object, the [`MapperSettings`] and the [`MemberProvider`]. It can
/// be shared between threads.
///
/// # Examples
///
/// ```
/// use vc_dynamic::derive::Reflect;
/// use vc_dynamic::mapper::DynamicObjectMapper;
/// use vc_dynamic::object::Value;
///
/// #[derive(Reflect, Debug, PartialEq)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mapper = DynamicObjectMapper::new();
///
/// let object = mapper.map_object(&Point { x: 1, y: 2 });
/// assert_eq!(object.get("x"), Some(Value::I32(1)));
///
/// object.set("y", 5_i64);
/// let point: Point = mapper.map(&object).unwrap();
/// assert_eq!(point, Point { x: 1, y: 5 });
/// ```
pub struct DynamicObjectMapper<P = AllMembers> {
    resolver: Arc<dyn TypeResolver>,
    settings: MapperSettings,
    members: P,
}

impl DynamicObjectMapper {
    /// Creates a mapper using the process-wide [`default_resolver`].
    #[inline]
    pub fn new() -> Self {
        Self::with_resolver(default_resolver())
    }

    pub fn with_resolver(resolver: Arc<dyn TypeResolver>) -> Self {
        Self {
            resolver,
            settings: MapperSettings::default(),
            members: AllMembers,
        }
    }
}

impl Default for DynamicObjectMapper {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<P: MemberProvider> DynamicObjectMapper<P> {
    #[inline]
    pub fn with_settings(mut self, settings: MapperSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Replaces the strategy choosing which struct members are mapped.
    pub fn with_member_provider<Q: MemberProvider>(self, members: Q) -> DynamicObjectMapper<Q> {
        DynamicObjectMapper {
            resolver: self.resolver,
            settings: self.settings,
            members,
        }
    }

    #[inline]
    pub fn settings(&self) -> &MapperSettings {
        &self.settings
    }

    #[inline]
    pub fn resolver(&self) -> &Arc<dyn TypeResolver> {
        &self.resolver
    }

    #[inline]
    pub fn member_provider(&self) -> &P {
        &self.members
    }

    /// Maps a value to a dynamic object.
    ///
    /// Scalars, enums, options and collections become wrapped values;
    /// structs, pairs and groupings become objects with one property per
    /// member.
    #[inline]
    pub fn map_object(&self, value: &dyn Reflect) -> DynamicObject {
        self.map_object_as(value, None)
    }

    /// Maps a value to a dynamic object carrying `declared` as its type.
    pub fn map_object_as(&self, value: &dyn Reflect, declared: Option<&TypeInfo>) -> DynamicObject {
        ToDynamic::new(self).map_root(value, declared)
    }

    /// Maps a dynamic object to a value of type `T`.
    pub fn map<T: Typed>(&self, object: &DynamicObject) -> Result<T, MappingError> {
        let handle = TypeHandle::of::<T>();
        let value = self.map_to(object, Some(&handle))?;
        take_as(value, &handle)
    }

    /// Maps a dynamic object to a value of the type `target` describes.
    ///
    /// Without a target, the object's own descriptor is resolved. Untyped
    /// objects become a [`Record`](crate::impls::Record), untyped wrapped
    /// scalars their natural Rust type.
    pub fn map_to(
        &self,
        object: &DynamicObject,
        target: Option<&Arc<TypeHandle>>,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        FromDynamic::new(self).map_root(object, target)
    }

    /// Maps a single dynamic value to a value of type `T`.
    pub fn map_value<T: Typed>(&self, value: &Value) -> Result<T, MappingError> {
        let handle = TypeHandle::of::<T>();
        let built = FromDynamic::new(self).map_root_value(value, &handle)?;
        take_as(built, &handle)
    }
}

fn take_as<T: Typed>(value: Box<dyn Reflect>, handle: &TypeHandle) -> Result<T, MappingError> {
    value.take::<T>().map_err(|_| MappingError::Rejected {
        type_name: handle.full_name(),
        path: MemberPath::root(handle.type_info().short_name()),
    })
}

impl<P: fmt::Debug> fmt::Debug for DynamicObjectMapper<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicObjectMapper")
            .field("settings", &self.settings)
            .field("members", &self.members)
            .finish_non_exhaustive()
    }
}
