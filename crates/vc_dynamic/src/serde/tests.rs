use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;

use parking_lot::RwLock;

use super::{MalformedPayloadError, read_dynamic_object};
use crate::derive::Reflect;
use crate::impls::SharedCell;
use crate::info::TypeInfo;
use crate::mapper::{DynamicObjectMapper, MappingError};
use crate::object::{DynamicObject, Value, WRAPPED_VALUE};
use crate::registry::{TypeRegistry, TypeRegistryArc};
use crate::resolver::DefaultTypeResolver;

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(default)]
struct Item {
    name: String,
    price: f64,
    tags: Vec<String>,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
enum Size {
    Small = 1,
    Large = 2,
}

#[derive(Reflect, Debug, PartialEq)]
struct Parcel {
    id: u64,
    note: Option<String>,
    size: Size,
    items: Vec<Item>,
}

#[derive(Reflect, Default)]
#[reflect(default)]
struct Peer {
    name: String,
    next: Option<SharedCell<Peer>>,
}

fn mapper() -> DynamicObjectMapper {
    let mut registry = TypeRegistry::new();
    registry.register::<Parcel>();
    registry.register::<Peer>();
    let resolver = DefaultTypeResolver::new(TypeRegistryArc::new(registry));
    DynamicObjectMapper::with_resolver(Arc::new(resolver))
}

fn parcel() -> Parcel {
    Parcel {
        id: 12,
        note: Some(String::from("fragile")),
        size: Size::Large,
        items: vec![
            Item {
                name: String::from("lamp"),
                price: 24.5,
                tags: vec![String::from("light")],
            },
            Item {
                name: String::from("cord"),
                price: 3.0,
                tags: Vec::new(),
            },
        ],
    }
}

fn read_json(json: &str) -> Result<DynamicObject, MalformedPayloadError> {
    read_dynamic_object(&mut serde_json::Deserializer::from_str(json))
}

#[test]
fn composites_survive_json() {
    let mapper = mapper();
    let json = serde_json::to_string(&mapper.map_object(&parcel())).unwrap();
    assert!(json.starts_with(r#"{"Type":{"Name":"Parcel""#));

    let object: DynamicObject = serde_json::from_str(&json).unwrap();
    assert_eq!(object.type_info(), Some(TypeInfo::of::<Parcel>()));
    assert_eq!(object.get("id"), Some(Value::U64(12)));
    assert_eq!(mapper.map::<Parcel>(&object).unwrap(), parcel());
}

#[test]
fn composites_survive_ron() {
    let mapper = mapper();
    let text = ron::to_string(&mapper.map_object(&parcel())).unwrap();
    let object: DynamicObject = ron::from_str(&text).unwrap();
    assert_eq!(mapper.map::<Parcel>(&object).unwrap(), parcel());
}

#[test]
fn scalar_properties_keep_their_type() {
    let json = r#"{"Properties":[
        {"Name":"Small","Type":{"Name":"u8"},"Value":7},
        {"Name":"Wide","Type":{"Name":"i128"},"Value":-3},
        {"Name":"Plain","Value":7},
        {"Name":"Missing","Value":null}
    ]}"#;
    let object = read_json(json).unwrap();
    assert_eq!(object.type_info(), None);
    assert_eq!(object.get("Small"), Some(Value::U8(7)));
    assert_eq!(object.get("Wide"), Some(Value::I128(-3)));
    assert_eq!(object.get("Plain"), Some(Value::U64(7)));
    assert_eq!(object.get("Missing"), Some(Value::Null));
}

#[test]
fn shared_objects_are_written_once() {
    let child = DynamicObject::new();
    child.set("Name", "child");
    let parent = DynamicObject::new();
    parent.set("Left", child.clone());
    parent.set("Right", child.clone());

    let json = serde_json::to_string(&parent).unwrap();
    assert_eq!(json.matches(r#""Id":1"#).count(), 1);
    assert_eq!(json.matches(r#"{"Ref":1}"#).count(), 1);

    let object = read_json(&json).unwrap();
    let left = object.get("Left").unwrap();
    let right = object.get("Right").unwrap();
    assert!(left.as_object().unwrap().ptr_eq(right.as_object().unwrap()));
    assert!(!left.as_object().unwrap().ptr_eq(&child));
}

#[test]
fn cycles_survive_json() {
    let mapper = mapper();
    let a = Arc::new(RwLock::new(Peer {
        name: String::from("a"),
        next: None,
    }));
    let b = Arc::new(RwLock::new(Peer {
        name: String::from("b"),
        next: Some(Arc::clone(&a)),
    }));
    a.write().next = Some(Arc::clone(&b));

    let json = serde_json::to_string(&mapper.map_object(&a)).unwrap();
    a.write().next = None;
    assert!(json.starts_with(r#"{"Id":1,"#));
    assert!(json.contains(r#"{"Ref":1}"#));

    let object = read_json(&json).unwrap();
    let next = object.get("next").unwrap();
    let back = next.as_object().unwrap().get("next").unwrap();
    assert!(back.as_object().unwrap().ptr_eq(&object));

    let root: SharedCell<Peer> = mapper.map(&object).unwrap();
    let b = root.read().next.clone().unwrap();
    assert_eq!(b.read().name, "b");
    assert!(Arc::ptr_eq(&root, b.read().next.as_ref().unwrap()));
    root.write().next = None;

    object.remove("next");
}

#[test]
fn self_wrapping_payloads_fail_to_map() {
    let mapper = mapper();
    let object = read_json(r#"{"Id":1,"Value":{"Ref":1}}"#).unwrap();
    let inner = object.wrapped_value().unwrap();
    assert!(inner.as_object().unwrap().ptr_eq(&object));

    assert!(matches!(
        mapper.map_to(&object, None),
        Err(MappingError::Cycle { .. })
    ));
    assert!(matches!(
        mapper.map::<Option<u8>>(&object),
        Err(MappingError::Cycle { .. })
    ));

    object.remove(WRAPPED_VALUE);
}

#[test]
fn mistyped_string_arrays_are_retyped() {
    let json = r#"{
        "Type":{"Name":"Vec","Namespace":"alloc::vec","IsGeneric":true,"GenericArguments":[{"Name":"i32"}]},
        "Values":["a","b",null]
    }"#;
    let object = read_json(json).unwrap();
    assert_eq!(object.type_info(), Some(TypeInfo::of::<Vec<String>>()));
    assert_eq!(
        object.wrapped_value(),
        Some(Value::Array(vec![Value::from("a"), Value::from("b"), Value::Null])),
    );

    // Mixed items keep the declared type.
    let json = r#"{
        "Type":{"Name":"Vec","Namespace":"alloc::vec","IsGeneric":true,"GenericArguments":[{"Name":"i32"}]},
        "Values":[1,"b"]
    }"#;
    let object = read_json(json).unwrap();
    assert_eq!(object.type_info(), Some(TypeInfo::of::<Vec<i32>>()));
}

#[test]
fn malformed_payloads_are_rejected() {
    let cases = [
        r#"{"Value":1,"Values":[1]}"#,
        r#"{"Type":{"Name":"u8"}}"#,
        r#"{"Value":1,"Extra":2}"#,
        r#"{"Properties":[{"Name":"A","Value":{"Ref":4}}]}"#,
        r#"{"Properties":[{"Name":"A","Type":{"Name":"u8"},"Value":300}]}"#,
        r#"{"Properties":[{"Name":"A","Value":1},{"Name":"A","Value":2}]}"#,
        r#"{"Properties":[{"Value":1}]}"#,
        r#"{"Id":1,"Properties":[{"Name":"A","Value":{"Id":1,"Value":0}}]}"#,
        r#"[1,2]"#,
    ];
    for json in cases {
        let error = read_json(json).unwrap_err();
        assert!(
            error.to_string().starts_with("malformed dynamic object payload"),
            "{json}: {error}",
        );
    }
}
