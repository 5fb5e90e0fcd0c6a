use alloc::string::String;
use alloc::vec::Vec;

use vc_utils::hash::HashMap;

use crate::Reflect;
use crate::handle::TypeShape;
use crate::impls::pair_type_info;
use crate::info::TypeInfo;
use crate::mapper::{DynamicObjectMapper, EnumFormat, MemberProvider};
use crate::object::{DynamicObject, PropertySet, Value, WRAPPED_VALUE};
use crate::ops::{ReflectRef, Shared};

/// One object → dynamic traversal.
///
/// `seen` maps the allocation of every shared wrapper visited so far to the
/// object produced for it.
pub(super) struct ToDynamic<'a, P> {
    mapper: &'a DynamicObjectMapper<P>,
    seen: HashMap<usize, DynamicObject>,
}

impl<'a, P: MemberProvider> ToDynamic<'a, P> {
    pub(super) fn new(mapper: &'a DynamicObjectMapper<P>) -> Self {
        Self {
            mapper,
            seen: HashMap::default(),
        }
    }

    pub(super) fn map_root(&mut self, value: &dyn Reflect, declared: Option<&TypeInfo>) -> DynamicObject {
        match value.reflect_ref() {
            ReflectRef::Shared(shared) => self.map_shared(shared, declared),
            ReflectRef::Option(None) => {
                let type_info = declared.cloned().or_else(|| value.represented_type_info());
                DynamicObject::wrap_value(type_info, Value::Null)
            }
            ReflectRef::Option(Some(inner)) => self.map_root(inner, declared),
            _ => {
                let object = DynamicObject::new();
                self.populate(&object, value, declared);
                object
            }
        }
    }

    fn map_shared(&mut self, shared: &dyn Shared, declared: Option<&TypeInfo>) -> DynamicObject {
        let identity = shared.identity();
        if let Some(object) = self.seen.get(&identity) {
            log::trace!("reusing the object of shared value {identity:#x}");
            return object.clone();
        }

        // Registered before populating, so that cycles end here.
        let object = DynamicObject::new();
        self.seen.insert(identity, object.clone());
        shared.with_inner(&mut |inner| self.populate(&object, inner, declared));
        object
    }

    fn populate(&mut self, object: &DynamicObject, value: &dyn Reflect, declared: Option<&TypeInfo>) {
        object.set_type_info(declared.cloned().or_else(|| value.represented_type_info()));

        match value.reflect_ref() {
            ReflectRef::Struct(target) => {
                let handle = value.type_handle();
                let shape = handle.shape().as_struct();
                for (name, member) in target.iter_members() {
                    let included = match shape.and_then(|shape| Some((shape, shape.member(name)?))) {
                        Some((shape, info)) => self.mapper.member_provider().include(shape, info),
                        None => true,
                    };
                    if included {
                        object.set(name, self.map_value(member));
                    }
                }
            }
            ReflectRef::Pair(pair) => {
                object.set("Key", self.map_value(pair.key()));
                object.set("Value", self.map_value(pair.value()));
            }
            ReflectRef::Grouping(grouping) => {
                object.set("Key", self.map_value(grouping.key()));
                let elements: Vec<Value> = grouping
                    .elements()
                    .map(|element| self.map_value(element))
                    .collect();
                object.set("Elements", elements);
            }
            _ => {
                object.set(WRAPPED_VALUE, self.map_value(value));
            }
        }
    }

    fn map_value(&mut self, value: &dyn Reflect) -> Value {
        match value.reflect_ref() {
            ReflectRef::Scalar(scalar) => scalar,
            ReflectRef::Enum(variant) => match self.mapper.settings().enum_format {
                EnumFormat::Name => Value::String(String::from(variant.variant_name())),
                EnumFormat::Value => Value::I64(variant.discriminant()),
            },
            ReflectRef::Option(None) => Value::Null,
            ReflectRef::Option(Some(inner)) => self.map_value(inner),
            ReflectRef::Collection(collection) => {
                Value::Array(collection.iter_items().map(|item| self.map_value(item)).collect())
            }
            ReflectRef::Map(map) => {
                let handle = value.type_handle();
                let entry_type = match handle.shape() {
                    TypeShape::Map(shape) => Some(pair_type_info(
                        shape.key().type_info().clone(),
                        shape.value().type_info().clone(),
                    )),
                    _ => None,
                };
                let entries = map
                    .iter_entries()
                    .map(|(key, value)| {
                        let entry = DynamicObject::from_parts(entry_type.clone(), PropertySet::new());
                        entry.set("Key", self.map_value(key));
                        entry.set("Value", self.map_value(value));
                        Value::Object(entry)
                    })
                    .collect();
                Value::Array(entries)
            }
            ReflectRef::Shared(shared) => Value::Object(self.map_shared(shared, None)),
            ReflectRef::Struct(_) | ReflectRef::Pair(_) | ReflectRef::Grouping(_) => {
                let object = DynamicObject::new();
                self.populate(&object, value, None);
                Value::Object(object)
            }
        }
    }
}
