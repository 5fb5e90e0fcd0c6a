use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;

use vc_utils::hash::{HashMap, HashSet};

use crate::Reflect;
use crate::handle::{SharedShape, StructShape, TypeHandle, TypeShape};
use crate::impls::Record;
use crate::info::ScalarKind;
use crate::mapper::{DynamicObjectMapper, MappingError, MemberPath, MemberProvider};
use crate::object::{DynamicObject, PropertySet, Value, ValueKind};
use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Natural types

macro_rules! natural_handles {
    ($($kind:ident => $ty:ty),* $(,)?) => {
        /// The type a scalar of `kind` becomes when nothing else is known.
        fn scalar_handle(kind: ScalarKind) -> Arc<TypeHandle> {
            match kind {
                $(ScalarKind::$kind => TypeHandle::of::<$ty>(),)*
            }
        }

        fn scalar_list_handle(kind: ScalarKind) -> Arc<TypeHandle> {
            match kind {
                $(ScalarKind::$kind => TypeHandle::of::<Vec<$ty>>(),)*
            }
        }
    };
}

natural_handles! {
    Unit => (),
    Bool => bool,
    Char => char,
    I8 => i8,
    I16 => i16,
    I32 => i32,
    I64 => i64,
    I128 => i128,
    Isize => isize,
    U8 => u8,
    U16 => u16,
    U32 => u32,
    U64 => u64,
    U128 => u128,
    Usize => usize,
    F32 => f32,
    F64 => f64,
    String => String,
}

// -----------------------------------------------------------------------------
// FromDynamic

/// One dynamic → object traversal.
///
/// Shared targets are cached per source object and target type, so every
/// reference to the same object yields the same allocation. `in_progress`
/// holds the objects whose value is being built, which is how cycles
/// through unshared values are detected.
pub(super) struct FromDynamic<'a, P> {
    mapper: &'a DynamicObjectMapper<P>,
    shared: HashMap<(usize, TypeId), Box<dyn Reflect>>,
    in_progress: HashSet<usize>,
    path: MemberPath,
}

impl<'a, P: MemberProvider> FromDynamic<'a, P> {
    pub(super) fn new(mapper: &'a DynamicObjectMapper<P>) -> Self {
        Self {
            mapper,
            shared: HashMap::default(),
            in_progress: HashSet::default(),
            path: MemberPath::new(),
        }
    }

    pub(super) fn map_root(
        &mut self,
        object: &DynamicObject,
        target: Option<&Arc<TypeHandle>>,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        let handle = match target {
            Some(handle) => Arc::clone(handle),
            None => self.target_of(object)?,
        };
        self.path = MemberPath::root(handle.type_info().short_name());
        self.object_to(object, &handle)
    }

    pub(super) fn map_root_value(
        &mut self,
        value: &Value,
        target: &Arc<TypeHandle>,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        self.path = MemberPath::root(target.type_info().short_name());
        self.value_to(value, target)
    }

    // -------------------------------------------------------------------------
    // Errors

    fn incompatible(&self, handle: &TypeHandle, found: &Value) -> MappingError {
        MappingError::Incompatible {
            expected: handle.full_name(),
            found: found.kind().to_string(),
            path: self.path.clone(),
        }
    }

    fn rejected(&self, handle: &TypeHandle) -> MappingError {
        MappingError::Rejected {
            type_name: handle.full_name(),
            path: self.path.clone(),
        }
    }

    fn cycle(&self, type_name: String) -> MappingError {
        MappingError::Cycle {
            type_name,
            path: self.path.clone(),
        }
    }

    fn missing(&self, handle: &TypeHandle, name: &str) -> MappingError {
        MappingError::MissingProperty {
            name: String::from(name),
            type_name: handle.full_name(),
            path: self.path.clone(),
        }
    }

    // -------------------------------------------------------------------------
    // Target selection

    /// Finds the type an object describes, looking through untyped wrappers.
    fn target_of(&self, object: &DynamicObject) -> Result<Arc<TypeHandle>, MappingError> {
        let mut current = object.clone();
        let mut unwrapped = HashSet::<usize>::default();
        loop {
            if let Some(type_info) = current.type_info() {
                return self
                    .mapper
                    .resolver()
                    .resolve_type(&type_info)
                    .map_err(|source| MappingError::Resolution {
                        source,
                        path: self.path.clone(),
                    });
            }
            if !unwrapped.insert(current.id().as_usize()) {
                return Err(self.cycle(String::from("wrapped value")));
            }
            current = match current.wrapped_value() {
                None => return Ok(TypeHandle::of::<Record>()),
                Some(Value::Object(inner)) => inner,
                Some(value) => {
                    return match value.kind() {
                        ValueKind::Scalar(kind) => Ok(scalar_handle(kind)),
                        _ => Err(MappingError::UnknownTarget {
                            path: self.path.clone(),
                        }),
                    };
                }
            };
        }
    }

    /// Builds an untyped value, as found in the properties of open structs.
    fn natural_value(&mut self, value: &Value) -> Result<Box<dyn Reflect>, MappingError> {
        match value {
            Value::Null => Ok(Box::new(())),
            Value::Object(object) => {
                let handle = self.target_of(object)?;
                self.object_to(object, &handle)
            }
            Value::Array(items) => {
                let kinds: HashSet<_> = items.iter().map(Value::kind).collect();
                let mut kinds = kinds.into_iter();
                match (kinds.next(), kinds.next()) {
                    (Some(ValueKind::Scalar(kind)), None) => {
                        self.value_to(value, &scalar_list_handle(kind))
                    }
                    (None | Some(ValueKind::Object), None) => {
                        self.value_to(value, &TypeHandle::of::<Vec<Record>>())
                    }
                    _ => Err(MappingError::UnknownTarget {
                        path: self.path.clone(),
                    }),
                }
            }
            scalar => match scalar.kind() {
                ValueKind::Scalar(kind) => self.value_to(scalar, &scalar_handle(kind)),
                _ => Err(MappingError::UnknownTarget {
                    path: self.path.clone(),
                }),
            },
        }
    }

    // -------------------------------------------------------------------------
    // Objects

    fn object_to(
        &mut self,
        object: &DynamicObject,
        handle: &Arc<TypeHandle>,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        match handle.shape() {
            TypeShape::Shared(shape) => self.shared_from_object(object, handle, shape),
            TypeShape::Struct(shape) if !object.is_wrapped_value() => {
                self.guarded(object, handle, |this| this.build_struct(object, handle, shape))
            }
            TypeShape::Pair(shape) => {
                let properties = object.properties();
                let key = self.required(&properties, "Key", handle, &shape.key())?;
                let value = self.required(&properties, "Value", handle, &shape.value())?;
                shape.build(key, value).ok_or_else(|| self.rejected(handle))
            }
            TypeShape::Grouping(shape) => {
                let properties = object.properties();
                let key = self.required(&properties, "Key", handle, &shape.key())?;
                let Some(elements) = properties.get("Elements") else {
                    return Err(self.missing(handle, "Elements"));
                };
                self.path.push_member("Elements");
                let elements = self.items_to(elements, handle, &shape.element());
                self.path.pop();
                shape.build(key, elements?).ok_or_else(|| self.rejected(handle))
            }
            TypeShape::Option(shape) if !object.is_wrapped_value() => {
                let inner = self.object_to(object, &shape.inner())?;
                shape.build_some(inner).ok_or_else(|| self.rejected(handle))
            }
            _ => match object.wrapped_value() {
                Some(value) => self.guarded(object, handle, |this| this.value_to(&value, handle)),
                None => Err(MappingError::Incompatible {
                    expected: handle.full_name(),
                    found: String::from("object"),
                    path: self.path.clone(),
                }),
            },
        }
    }

    /// Runs `build` with `object` marked as in progress.
    fn guarded(
        &mut self,
        object: &DynamicObject,
        handle: &TypeHandle,
        build: impl FnOnce(&mut Self) -> Result<Box<dyn Reflect>, MappingError>,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        let id = object.id().as_usize();
        if !self.in_progress.insert(id) {
            return Err(self.cycle(handle.full_name()));
        }
        let result = build(self);
        self.in_progress.remove(&id);
        result
    }

    fn required(
        &mut self,
        properties: &PropertySet,
        name: &str,
        owner: &TypeHandle,
        handle: &Arc<TypeHandle>,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        match properties.get(name) {
            Some(value) => self.member_to(name, value, handle),
            None => Err(self.missing(owner, name)),
        }
    }

    fn member_to(
        &mut self,
        name: &str,
        value: &Value,
        handle: &Arc<TypeHandle>,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        self.path.push_member(name);
        let result = self.value_to(value, handle);
        self.path.pop();
        result
    }

    fn build_struct(
        &mut self,
        object: &DynamicObject,
        handle: &Arc<TypeHandle>,
        shape: &StructShape,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        let properties = object.properties();

        if let Some(mut value) = shape.build_default() {
            if handle.is_synthesized()
                && let Some(record) = value.downcast_mut::<Record>()
            {
                record.set_type_info(Some(handle.type_info().clone()));
            }
            self.populate_struct(&mut *value, &properties, handle, shape)?;
            return Ok(value);
        }

        if !shape.has_member_constructor() {
            return Err(MappingError::Unconstructible {
                type_name: handle.full_name(),
                path: self.path.clone(),
            });
        }

        let mut values = Vec::with_capacity(shape.members().len());
        for member in shape.members() {
            let member_handle = member.type_handle();
            let included = self.mapper.member_provider().include(shape, member);
            let value = match properties.get(member.name()) {
                Some(value) if included => self.member_to(member.name(), value, &member_handle)?,
                _ => match member_handle.shape() {
                    TypeShape::Option(option) => option.build_none(),
                    _ => return Err(self.missing(handle, member.name())),
                },
            };
            values.push(value);
        }
        match shape.build_from_members(values) {
            Some(Some(value)) => Ok(value),
            _ => Err(self.rejected(handle)),
        }
    }

    fn populate_struct(
        &mut self,
        target: &mut dyn Reflect,
        properties: &PropertySet,
        handle: &TypeHandle,
        shape: &StructShape,
    ) -> Result<(), MappingError> {
        let ReflectMut::Struct(target) = target.reflect_mut() else {
            return Err(self.rejected(handle));
        };

        for property in properties {
            let name = property.name();
            let value = match shape.member(name) {
                Some(member) if self.mapper.member_provider().include(shape, member) => {
                    self.member_to(name, property.value(), &member.type_handle())?
                }
                None if shape.is_open() => {
                    self.path.push_member(name);
                    let value = self.natural_value(property.value());
                    self.path.pop();
                    value?
                }
                _ => {
                    log::debug!("`{}` has no mapped member `{name}`, skipping it", handle.full_name());
                    continue;
                }
            };
            if target.set_member(name, value).is_err() {
                self.path.push_member(name);
                let error = self.rejected(handle);
                self.path.pop();
                return Err(error);
            }
        }
        Ok(())
    }

    fn shared_from_object(
        &mut self,
        object: &DynamicObject,
        handle: &Arc<TypeHandle>,
        shape: &SharedShape,
    ) -> Result<Box<dyn Reflect>, MappingError> {
        let key = (object.id().as_usize(), handle.type_id());
        if let Some(existing) = self.shared.get(&key) {
            log::trace!("reusing the value built for object {:#x}", key.0);
            return shape.share(&**existing).ok_or_else(|| self.rejected(handle));
        }

        let inner = shape.inner();
        if shape.is_interior_mutable()
            && !object.is_wrapped_value()
            && let TypeShape::Struct(inner_shape) = inner.shape()
            && let Some(default) = inner_shape.build_default()
        {
            // The shell is cached before its members are built, so that
            // references back to this object share it.
            let wrapper = shape.wrap(default).ok_or_else(|| self.rejected(handle))?;
            let shell = shape.share(&*wrapper).ok_or_else(|| self.rejected(handle))?;
            self.shared.insert(key, wrapper);

            let properties = object.properties();
            let mut result = Ok(());
            if let ReflectRef::Shared(view) = shell.reflect_ref() {
                view.with_inner_mut(&mut |value| {
                    result = self.populate_struct(value, &properties, &inner, inner_shape);
                });
            }
            result?;
            return Ok(shell);
        }

        let value = self.object_to(object, &inner)?;
        let wrapper = shape.wrap(value).ok_or_else(|| self.rejected(handle))?;
        let shared = shape.share(&*wrapper).ok_or_else(|| self.rejected(handle))?;
        self.shared.insert(key, wrapper);
        Ok(shared)
    }

    // -------------------------------------------------------------------------
    // Values

    fn items_to(
        &mut self,
        value: &Value,
        owner: &TypeHandle,
        item: &Arc<TypeHandle>,
    ) -> Result<Vec<Box<dyn Reflect>>, MappingError> {
        let Value::Array(items) = value else {
            return Err(MappingError::Incompatible {
                expected: owner.full_name(),
                found: value.kind().to_string(),
                path: self.path.clone(),
            });
        };
        let mut built = Vec::with_capacity(items.len());
        for (index, entry) in items.iter().enumerate() {
            self.path.push_index(index);
            let result = self.value_to(entry, item);
            self.path.pop();
            built.push(result?);
        }
        Ok(built)
    }

    fn value_to(&mut self, value: &Value, handle: &Arc<TypeHandle>) -> Result<Box<dyn Reflect>, MappingError> {
        if let Value::Object(object) = value
            && object.is_wrapped_value()
            && !matches!(handle.shape(), TypeShape::Shared(_))
        {
            return self.object_to(object, handle);
        }

        match handle.shape() {
            TypeShape::Scalar(shape) => {
                let coerced = value
                    .coerce(shape.kind())
                    .ok_or_else(|| self.incompatible(handle, value))?;
                shape.build(coerced).ok_or_else(|| self.rejected(handle))
            }
            TypeShape::Enum(shape) => {
                let index = match value {
                    Value::String(name) => shape.index_of_name(name),
                    other => match other.coerce(ScalarKind::I64) {
                        Some(Value::I64(discriminant)) => shape.index_of_discriminant(discriminant),
                        _ => None,
                    },
                };
                let index = index.ok_or_else(|| self.incompatible(handle, value))?;
                shape.build(index).ok_or_else(|| self.rejected(handle))
            }
            TypeShape::Option(shape) => {
                if value.is_null() {
                    return Ok(shape.build_none());
                }
                let inner = self.value_to(value, &shape.inner())?;
                shape.build_some(inner).ok_or_else(|| self.rejected(handle))
            }
            TypeShape::Collection(shape) => {
                let items = self.items_to(value, handle, &shape.item())?;
                shape.build(items).ok_or_else(|| self.rejected(handle))
            }
            TypeShape::Map(shape) => {
                let Value::Array(entries) = value else {
                    return Err(self.incompatible(handle, value));
                };
                let (key_handle, value_handle) = (shape.key(), shape.value());
                let mut built = Vec::with_capacity(entries.len());
                for (index, entry) in entries.iter().enumerate() {
                    self.path.push_index(index);
                    let result = self.entry_to(entry, handle, &key_handle, &value_handle);
                    self.path.pop();
                    built.push(result?);
                }
                shape.build(built).ok_or_else(|| self.rejected(handle))
            }
            TypeShape::Shared(shape) => match value {
                Value::Object(object) => self.shared_from_object(object, handle, shape),
                other => {
                    let inner = self.value_to(other, &shape.inner())?;
                    let wrapper = shape.wrap(inner).ok_or_else(|| self.rejected(handle))?;
                    Ok(wrapper)
                }
            },
            TypeShape::Struct(_) | TypeShape::Pair(_) | TypeShape::Grouping(_) => match value {
                Value::Object(object) => self.object_to(object, handle),
                other => Err(self.incompatible(handle, other)),
            },
        }
    }

    fn entry_to(
        &mut self,
        entry: &Value,
        map: &TypeHandle,
        key: &Arc<TypeHandle>,
        value: &Arc<TypeHandle>,
    ) -> Result<(Box<dyn Reflect>, Box<dyn Reflect>), MappingError> {
        let Value::Object(entry) = entry else {
            return Err(self.incompatible(map, entry));
        };
        let properties = entry.properties();
        let key = self.required(&properties, "Key", map, key)?;
        let value = self.required(&properties, "Value", map, value)?;
        Ok((key, value))
    }
}
