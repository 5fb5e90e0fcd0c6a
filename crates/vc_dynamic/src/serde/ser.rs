use alloc::vec::Vec;
use core::cell::RefCell;

use serde::ser::{Serialize, SerializeMap, Serializer};
use vc_utils::hash::{HashMap, HashSet};

use super::{ID, NAME, PROPERTIES, REF, TYPE, VALUE, VALUES};
use crate::object::{DynamicObject, Property, PropertySet, Value, ValueKind, WRAPPED_VALUE};

// -----------------------------------------------------------------------------
// Reference counting

/// Numbers, in order of first appearance, the objects reachable more than
/// once from `root`.
fn shared_ids(root: &DynamicObject) -> HashMap<usize, u64> {
    fn visit_object(object: &DynamicObject, visits: &mut HashMap<usize, u32>, order: &mut Vec<usize>) {
        let key = object.id().as_usize();
        let count = visits.entry(key).or_insert(0);
        *count += 1;
        if *count > 1 {
            return;
        }
        order.push(key);
        for property in &object.properties() {
            visit_value(property.value(), visits, order);
        }
    }

    fn visit_value(value: &Value, visits: &mut HashMap<usize, u32>, order: &mut Vec<usize>) {
        match value {
            Value::Array(items) => {
                for item in items {
                    visit_value(item, visits, order);
                }
            }
            Value::Object(object) => visit_object(object, visits, order),
            _ => {}
        }
    }

    let mut visits = HashMap::default();
    let mut order = Vec::new();
    visit_object(root, &mut visits, &mut order);

    order
        .into_iter()
        .filter(|key| visits.get(key).is_some_and(|count| *count > 1))
        .zip(1..)
        .collect()
}

struct WriteContext {
    ids: HashMap<usize, u64>,
    written: RefCell<HashSet<usize>>,
}

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for DynamicObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let context = WriteContext {
            ids: shared_ids(self),
            written: RefCell::new(HashSet::default()),
        };
        ObjectRef {
            object: self,
            context: &context,
        }
        .serialize(serializer)
    }
}

struct ObjectRef<'a> {
    object: &'a DynamicObject,
    context: &'a WriteContext,
}

impl Serialize for ObjectRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let key = self.object.id().as_usize();
        let id = self.context.ids.get(&key).copied();

        if let Some(id) = id
            && !self.context.written.borrow_mut().insert(key)
        {
            let mut map = serializer.serialize_map(Some(1))?;
            map.serialize_entry(REF, &id)?;
            return map.end();
        }

        let (type_info, properties) = self.object.snapshot();
        let wrapped = match properties.iter().next() {
            Some(property) if properties.len() == 1 && property.name() == WRAPPED_VALUE => {
                Some(property.value())
            }
            _ => None,
        };

        let len = 1 + usize::from(id.is_some()) + usize::from(type_info.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(id) = id {
            map.serialize_entry(ID, &id)?;
        }
        if let Some(type_info) = &type_info {
            map.serialize_entry(TYPE, type_info)?;
        }
        match wrapped {
            Some(Value::Array(items)) => map.serialize_entry(VALUES, &ItemsRef {
                items,
                context: self.context,
            })?,
            Some(value) => map.serialize_entry(VALUE, &ValueRef {
                value,
                context: self.context,
            })?,
            None => map.serialize_entry(PROPERTIES, &PropertiesRef {
                properties: &properties,
                context: self.context,
            })?,
        }
        map.end()
    }
}

struct PropertiesRef<'a> {
    properties: &'a PropertySet,
    context: &'a WriteContext,
}

impl Serialize for PropertiesRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.properties.iter().map(|property| PropertyRef {
            property,
            context: self.context,
        }))
    }
}

struct PropertyRef<'a> {
    property: &'a Property,
    context: &'a WriteContext,
}

impl Serialize for PropertyRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.property.value();
        let scalar = match value.kind() {
            ValueKind::Scalar(kind) => Some(kind.type_info()),
            _ => None,
        };

        let mut map = serializer.serialize_map(Some(2 + usize::from(scalar.is_some())))?;
        map.serialize_entry(NAME, self.property.name())?;
        if let Some(type_info) = &scalar {
            map.serialize_entry(TYPE, type_info)?;
        }
        map.serialize_entry(VALUE, &ValueRef {
            value,
            context: self.context,
        })?;
        map.end()
    }
}

struct ItemsRef<'a> {
    items: &'a [Value],
    context: &'a WriteContext,
}

impl Serialize for ItemsRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter().map(|value| ValueRef {
            value,
            context: self.context,
        }))
    }
}

struct ValueRef<'a> {
    value: &'a Value,
    context: &'a WriteContext,
}

impl Serialize for ValueRef<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Char(value) => serializer.serialize_char(*value),
            Value::I8(value) => serializer.serialize_i8(*value),
            Value::I16(value) => serializer.serialize_i16(*value),
            Value::I32(value) => serializer.serialize_i32(*value),
            Value::I64(value) => serializer.serialize_i64(*value),
            Value::I128(value) => serializer.serialize_i128(*value),
            Value::U8(value) => serializer.serialize_u8(*value),
            Value::U16(value) => serializer.serialize_u16(*value),
            Value::U32(value) => serializer.serialize_u32(*value),
            Value::U64(value) => serializer.serialize_u64(*value),
            Value::U128(value) => serializer.serialize_u128(*value),
            Value::F32(value) => serializer.serialize_f32(*value),
            Value::F64(value) => serializer.serialize_f64(*value),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(items) => ItemsRef {
                items,
                context: self.context,
            }
            .serialize(serializer),
            Value::Object(object) => ObjectRef {
                object,
                context: self.context,
            }
            .serialize(serializer),
        }
    }
}
