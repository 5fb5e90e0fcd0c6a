use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use serde::de::{self, Deserialize, DeserializeSeed, Deserializer, MapAccess, SeqAccess, Visitor};
use vc_utils::hash::HashMap;

use super::{ID, NAME, PROPERTIES, REF, TYPE, VALUE, VALUES};
use crate::info::{ScalarKind, TypeInfo};
use crate::object::{DynamicObject, Value, WRAPPED_VALUE};
use crate::serde::MalformedPayloadError;

const FIELDS: &[&str] = &[ID, REF, TYPE, VALUE, VALUES, PROPERTIES];
const PROPERTY_FIELDS: &[&str] = &[NAME, TYPE, VALUE];

// -----------------------------------------------------------------------------
// Entry points

#[derive(Default)]
struct ReadContext {
    objects: RefCell<HashMap<u64, DynamicObject>>,
}

/// A [`DeserializeSeed`] reading one dynamic object graph.
///
/// Objects written with an `Id` are remembered for the rest of the graph,
/// so `Ref`s to them produce the same object.
#[derive(Default)]
pub struct DynamicObjectSeed {
    context: ReadContext,
}

impl DynamicObjectSeed {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<'de> DeserializeSeed<'de> for DynamicObjectSeed {
    type Value = DynamicObject;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<DynamicObject, D::Error> {
        ObjectSeed {
            context: &self.context,
        }
        .deserialize(deserializer)
    }
}

impl<'de> Deserialize<'de> for DynamicObject {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        DynamicObjectSeed::new().deserialize(deserializer)
    }
}

/// Reads a dynamic object, reporting format errors as
/// [`MalformedPayloadError`].
///
/// # Examples
///
/// ```
/// use vc_dynamic::object::Value;
/// use vc_dynamic::serde::read_dynamic_object;
///
/// let json = r#"{"Properties":[{"Name":"Age","Type":{"Name":"u8"},"Value":36}]}"#;
/// let object = read_dynamic_object(&mut serde_json::Deserializer::from_str(json)).unwrap();
/// assert_eq!(object.get("Age"), Some(Value::U8(36)));
///
/// let json = r#"{"Value":1,"Values":[1]}"#;
/// assert!(read_dynamic_object(&mut serde_json::Deserializer::from_str(json)).is_err());
/// ```
pub fn read_dynamic_object<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DynamicObject, MalformedPayloadError> {
    DynamicObjectSeed::new()
        .deserialize(deserializer)
        .map_err(MalformedPayloadError::new)
}

// -----------------------------------------------------------------------------
// Coercion

fn coerce_value<E: de::Error>(value: Value, type_info: Option<&TypeInfo>) -> Result<Value, E> {
    let Some(kind) = type_info.and_then(ScalarKind::from_type_info) else {
        return Ok(value);
    };
    match value.coerce(kind) {
        Some(coerced) => Ok(coerced),
        None if value.is_null() => Ok(value),
        None => Err(E::custom(format_args!("a {} value does not fit `{kind}`", value.kind()))),
    }
}

/// The element descriptor of an array or of a single-argument generic.
fn element_type(type_info: &TypeInfo) -> Option<&TypeInfo> {
    type_info.element_type().or_else(|| match type_info.generic_arguments() {
        [element] => Some(element),
        _ => None,
    })
}

fn coerce_items(items: Vec<Value>, type_info: &mut Option<TypeInfo>) -> Vec<Value> {
    let Some(kind) = type_info
        .as_ref()
        .and_then(element_type)
        .and_then(ScalarKind::from_type_info)
    else {
        return items;
    };

    let coerced: Option<Vec<Value>> = items
        .iter()
        .map(|item| match item {
            Value::Null => Some(Value::Null),
            item => item.coerce(kind),
        })
        .collect();
    if let Some(coerced) = coerced {
        return coerced;
    }

    if items.iter().all(|item| matches!(item, Value::String(_) | Value::Null)) {
        log::warn!("array items do not fit `{kind}`, keeping them as strings");
        *type_info = type_info.take().map(|info| {
            let string = ScalarKind::String.type_info();
            if info.is_array() {
                TypeInfo::as_array_of(string)
            } else {
                info.with_generic_arguments(alloc::vec![string])
            }
        });
    }
    items
}

// -----------------------------------------------------------------------------
// Objects

struct ObjectSeed<'c> {
    context: &'c ReadContext,
}

impl<'de> DeserializeSeed<'de> for ObjectSeed<'_> {
    type Value = DynamicObject;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<DynamicObject, D::Error> {
        deserializer.deserialize_map(ObjectVisitor {
            context: self.context,
        })
    }
}

enum Payload {
    Scalar(Value),
    Items(Vec<Value>),
    Properties(Vec<(String, Option<TypeInfo>, Value)>),
}

struct ObjectVisitor<'c> {
    context: &'c ReadContext,
}

impl<'de> Visitor<'de> for ObjectVisitor<'_> {
    type Value = DynamicObject;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a dynamic object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<DynamicObject, A::Error> {
        // Created first, so that references inside the payload can reach it.
        let object = DynamicObject::new();
        let mut type_info: Option<TypeInfo> = None;
        let mut payload: Option<Payload> = None;
        let mut has_id = false;

        while let Some(key) = map.next_key::<String>()? {
            let key = key.as_str();
            if matches!(key, VALUE | VALUES | PROPERTIES) && payload.is_some() {
                return Err(de::Error::custom(
                    "expected exactly one of `Value`, `Values` and `Properties`",
                ));
            }
            match key {
                REF => {
                    if has_id || type_info.is_some() || payload.is_some() {
                        return Err(de::Error::custom("`Ref` must be the only key of a reference"));
                    }
                    let id: u64 = map.next_value()?;
                    let target = self.context.objects.borrow().get(&id).cloned();
                    let Some(target) = target else {
                        return Err(de::Error::custom(format_args!("reference to unknown object {id}")));
                    };
                    if let Some(extra) = map.next_key::<String>()? {
                        return Err(de::Error::custom(format_args!(
                            "`Ref` must be the only key of a reference, found `{extra}`"
                        )));
                    }
                    return Ok(target);
                }
                ID => {
                    if has_id {
                        return Err(de::Error::duplicate_field(ID));
                    }
                    has_id = true;
                    let id: u64 = map.next_value()?;
                    let previous = self.context.objects.borrow_mut().insert(id, object.clone());
                    if previous.is_some() {
                        return Err(de::Error::custom(format_args!("object id {id} is used twice")));
                    }
                }
                TYPE => {
                    if type_info.is_some() {
                        return Err(de::Error::duplicate_field(TYPE));
                    }
                    type_info = Some(map.next_value()?);
                }
                VALUE => {
                    let value = map.next_value_seed(ValueSeed {
                        context: self.context,
                    })?;
                    payload = Some(Payload::Scalar(value));
                }
                VALUES => {
                    let items = map.next_value_seed(ItemsSeed {
                        context: self.context,
                    })?;
                    payload = Some(Payload::Items(items));
                }
                PROPERTIES => {
                    let properties = map.next_value_seed(PropertiesSeed {
                        context: self.context,
                    })?;
                    payload = Some(Payload::Properties(properties));
                }
                other => return Err(de::Error::unknown_field(other, FIELDS)),
            }
        }

        let Some(payload) = payload else {
            return Err(de::Error::custom(
                "expected exactly one of `Value`, `Values` and `Properties`",
            ));
        };

        match payload {
            Payload::Scalar(value) => {
                let value = coerce_value::<A::Error>(value, type_info.as_ref())?;
                object.set(WRAPPED_VALUE, value);
            }
            Payload::Items(items) => {
                let items = coerce_items(items, &mut type_info);
                object.set(WRAPPED_VALUE, Value::Array(items));
            }
            Payload::Properties(properties) => {
                for (name, property_type, value) in properties {
                    let value = coerce_value::<A::Error>(value, property_type.as_ref())?;
                    object
                        .add(name, value)
                        .map_err(<A::Error as de::Error>::custom)?;
                }
            }
        }
        object.set_type_info(type_info);
        Ok(object)
    }
}

// -----------------------------------------------------------------------------
// Properties

struct PropertiesSeed<'c> {
    context: &'c ReadContext,
}

impl<'de> DeserializeSeed<'de> for PropertiesSeed<'_> {
    type Value = Vec<(String, Option<TypeInfo>, Value)>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_seq(self)
    }
}

impl<'de> Visitor<'de> for PropertiesSeed<'_> {
    type Value = Vec<(String, Option<TypeInfo>, Value)>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of properties")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut properties = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(property) = seq.next_element_seed(PropertySeed {
            context: self.context,
        })? {
            properties.push(property);
        }
        Ok(properties)
    }
}

struct PropertySeed<'c> {
    context: &'c ReadContext,
}

impl<'de> DeserializeSeed<'de> for PropertySeed<'_> {
    type Value = (String, Option<TypeInfo>, Value);

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for PropertySeed<'_> {
    type Value = (String, Option<TypeInfo>, Value);

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a property with a `Name` and a `Value`")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut name: Option<String> = None;
        let mut type_info: Option<TypeInfo> = None;
        let mut value: Option<Value> = None;

        while let Some(key) = map.next_key::<String>()? {
            match key.as_str() {
                NAME if name.is_some() => return Err(de::Error::duplicate_field(NAME)),
                NAME => name = Some(map.next_value()?),
                TYPE if type_info.is_some() => return Err(de::Error::duplicate_field(TYPE)),
                TYPE => type_info = Some(map.next_value()?),
                VALUE if value.is_some() => return Err(de::Error::duplicate_field(VALUE)),
                VALUE => {
                    value = Some(map.next_value_seed(ValueSeed {
                        context: self.context,
                    })?);
                }
                other => return Err(de::Error::unknown_field(other, PROPERTY_FIELDS)),
            }
        }

        let name = name.ok_or_else(|| de::Error::missing_field(NAME))?;
        let value = value.ok_or_else(|| de::Error::missing_field(VALUE))?;
        Ok((name, type_info, value))
    }
}

// -----------------------------------------------------------------------------
// Values

struct ItemsSeed<'c> {
    context: &'c ReadContext,
}

impl<'de> DeserializeSeed<'de> for ItemsSeed<'_> {
    type Value = Vec<Value>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Vec<Value>, D::Error> {
        deserializer.deserialize_seq(ValueVisitor {
            context: self.context,
        })
        .and_then(|value| match value {
            Value::Array(items) => Ok(items),
            _ => Err(de::Error::custom("expected a sequence of values")),
        })
    }
}

struct ValueSeed<'c> {
    context: &'c ReadContext,
}

impl<'de> DeserializeSeed<'de> for ValueSeed<'_> {
    type Value = Value;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        deserializer.deserialize_any(ValueVisitor {
            context: self.context,
        })
    }
}

struct ValueVisitor<'c> {
    context: &'c ReadContext,
}

impl<'de> Visitor<'de> for ValueVisitor<'_> {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a scalar, a sequence or a dynamic object")
    }

    #[inline]
    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    #[inline]
    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Value, E> {
        Ok(Value::I64(value))
    }

    #[inline]
    fn visit_i128<E: de::Error>(self, value: i128) -> Result<Value, E> {
        Ok(Value::I128(value))
    }

    #[inline]
    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Value, E> {
        Ok(Value::U64(value))
    }

    #[inline]
    fn visit_u128<E: de::Error>(self, value: u128) -> Result<Value, E> {
        Ok(Value::U128(value))
    }

    #[inline]
    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Value, E> {
        Ok(Value::F64(value))
    }

    #[inline]
    fn visit_char<E: de::Error>(self, value: char) -> Result<Value, E> {
        Ok(Value::Char(value))
    }

    #[inline]
    fn visit_str<E: de::Error>(self, value: &str) -> Result<Value, E> {
        Ok(Value::String(String::from(value)))
    }

    #[inline]
    fn visit_string<E: de::Error>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    #[inline]
    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    #[inline]
    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        ValueSeed {
            context: self.context,
        }
        .deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or_default());
        while let Some(item) = seq.next_element_seed(ValueSeed {
            context: self.context,
        })? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        ObjectVisitor {
            context: self.context,
        }
        .visit_map(map)
        .map(Value::Object)
    }
}
