use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use std::collections::HashMap;

use parking_lot::RwLock;

use crate::derive::Reflect;
use crate::handle::{MemberInfo, StructShape};
use crate::impls::{Grouping, KeyValuePair, Record, SharedCell};
use crate::info::{PropertyInfo, TypeInfo};
use crate::mapper::{
    DataContractMembers, DynamicObjectMapper, EnumFormat, MapperSettings, MappingError, MemberPath,
};
use crate::object::{DynamicObject, Value, WRAPPED_VALUE};
use crate::registry::{TypeRegistry, TypeRegistryArc};
use crate::resolver::{DefaultTypeResolver, ResolutionError};

// -----------------------------------------------------------------------------
// Fixtures

#[derive(Reflect, Debug, Default, Clone, PartialEq)]
#[reflect(default)]
struct Line {
    sku: String,
    quantity: u32,
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
enum Status {
    Open = 1,
    Shipped = 2,
}

#[derive(Reflect, Debug, PartialEq)]
struct Order {
    id: u64,
    customer: Option<String>,
    lines: Vec<Line>,
    status: Status,
    tags: BTreeSet<String>,
    totals: BTreeMap<String, f64>,
}

#[derive(Reflect, Default)]
#[reflect(default)]
struct Node {
    name: String,
    next: Option<SharedCell<Node>>,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default, anonymous)]
struct Anon {
    a: i32,
    b: String,
}

#[derive(Reflect, Debug, Default, PartialEq)]
#[reflect(default, data_contract)]
struct Account {
    #[reflect(data_member)]
    name: String,
    password: String,
}

#[derive(Reflect, Debug, Default)]
#[reflect(default)]
struct Holder {
    line: Line,
}

#[derive(Reflect, Debug, PartialEq)]
struct Batch {
    first: Arc<Line>,
    second: Arc<Line>,
}

fn mapper() -> DynamicObjectMapper {
    let mut registry = TypeRegistry::new();
    registry.register::<Order>();
    registry.register::<Node>();
    registry.register::<Anon>();
    let resolver = DefaultTypeResolver::new(TypeRegistryArc::new(registry));
    DynamicObjectMapper::with_resolver(Arc::new(resolver))
}

fn order() -> Order {
    Order {
        id: 7,
        customer: Some(String::from("Ada")),
        lines: vec![
            Line {
                sku: String::from("A-1"),
                quantity: 2,
            },
            Line {
                sku: String::from("B-2"),
                quantity: 1,
            },
        ],
        status: Status::Shipped,
        tags: ["gift", "express"].into_iter().map(String::from).collect(),
        totals: [(String::from("net"), 10.5), (String::from("tax"), 2.0)]
            .into_iter()
            .collect(),
    }
}

// -----------------------------------------------------------------------------
// Scalars

#[test]
fn scalars_round_trip() {
    let mapper = mapper();

    let object = mapper.map_object(&42_i32);
    assert!(object.is_wrapped_value());
    assert_eq!(object.type_info(), Some(TypeInfo::of::<i32>()));
    assert_eq!(mapper.map::<i32>(&object), Ok(42));

    let object = mapper.map_object(&String::from("text"));
    assert_eq!(mapper.map::<String>(&object).as_deref(), Ok("text"));

    assert_eq!(mapper.map::<f64>(&mapper.map_object(&2.5_f64)), Ok(2.5));
    assert_eq!(mapper.map::<char>(&mapper.map_object(&'x')), Ok('x'));
    assert_eq!(mapper.map::<bool>(&mapper.map_object(&true)), Ok(true));
    assert_eq!(mapper.map::<()>(&mapper.map_object(&())), Ok(()));
}

#[test]
fn options_round_trip() {
    let mapper = mapper();

    let none = mapper.map_object(&None::<i32>);
    assert_eq!(none.wrapped_value(), Some(Value::Null));
    assert_eq!(none.type_info(), Some(TypeInfo::of::<Option<i32>>()));
    assert_eq!(mapper.map::<Option<i32>>(&none), Ok(None));

    let some = mapper.map_object(&Some(5_i32));
    assert_eq!(mapper.map::<Option<i32>>(&some), Ok(Some(5)));

    let declared = TypeInfo::of::<Option<Line>>();
    let none = mapper.map_object_as(&None::<Line>, Some(&declared));
    assert_eq!(none.type_info(), Some(declared));
}

#[test]
fn untyped_scalars_become_their_natural_type() {
    let mapper = mapper();
    let object = DynamicObject::wrap_value(None, 3_u16);
    let value = mapper.map_to(&object, None).unwrap();
    assert_eq!(value.downcast_ref::<u16>(), Some(&3));

    let object = DynamicObject::wrap_value(None, Value::Null);
    assert!(matches!(
        mapper.map_to(&object, None),
        Err(MappingError::UnknownTarget { .. })
    ));
}

#[test]
fn values_are_coerced() {
    let mapper = mapper();
    assert_eq!(mapper.map_value::<u8>(&Value::I64(200)), Ok(200));
    assert_eq!(mapper.map_value::<f32>(&Value::I32(3)), Ok(3.0));
    assert_eq!(mapper.map_value::<char>(&Value::from("z")), Ok('z'));
    assert_eq!(mapper.map_value::<Vec<u16>>(&Value::from(vec![1_i32, 2])), Ok(vec![1, 2]));

    let error = mapper.map_value::<u8>(&Value::I64(300)).unwrap_err();
    assert!(matches!(error, MappingError::Incompatible { .. }));
}

// -----------------------------------------------------------------------------
// Composites

#[test]
fn composites_round_trip() {
    let mapper = mapper();
    let object = mapper.map_object(&order());

    assert_eq!(
        object.property_names(),
        ["id", "customer", "lines", "status", "tags", "totals"]
    );
    assert_eq!(object.get("status"), Some(Value::from("Shipped")));

    let lines = object.get("lines").unwrap();
    let lines = lines.as_array().unwrap();
    assert_eq!(lines.len(), 2);
    let first = lines[0].as_object().unwrap();
    assert_eq!(first.type_info(), Some(TypeInfo::of::<Line>()));
    assert_eq!(first.get("sku"), Some(Value::from("A-1")));

    assert_eq!(mapper.map::<Order>(&object), Ok(order()));

    // The descriptor alone is enough to find the type.
    let value = mapper.map_to(&object, None).unwrap();
    assert_eq!(value.take::<Order>().ok(), Some(order()));
}

#[test]
fn missing_optional_members_are_none() {
    let mapper = mapper();
    let object = mapper.map_object(&order());
    object.remove("customer");
    let order = mapper.map::<Order>(&object).unwrap();
    assert_eq!(order.customer, None);

    object.remove("lines");
    assert_eq!(
        mapper.map::<Order>(&object).unwrap_err(),
        MappingError::MissingProperty {
            name: String::from("lines"),
            type_name: TypeInfo::of::<Order>().full_name(),
            path: crate::mapper::MemberPath::root("Order"),
        }
    );
}

#[test]
fn errors_carry_the_member_path() {
    let mapper = mapper();
    let mut order = order();
    order.lines.push(Line::default());
    let object = mapper.map_object(&order);

    let lines = object.get("lines").unwrap();
    lines.as_array().unwrap()[2].as_object().unwrap().set("sku", 5_i32);

    let error = mapper.map::<Order>(&object).unwrap_err();
    let MappingError::Incompatible { expected, found, path } = error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(expected, "alloc::string::String");
    assert_eq!(found, "i32");
    assert_eq!(path.to_string(), "Order.lines[2].sku");
}

#[test]
fn enum_formats() {
    let settings = MapperSettings::default().with_enum_format(EnumFormat::Value);
    let mapper = mapper().with_settings(settings);

    let object = mapper.map_object(&Status::Shipped);
    assert_eq!(object.wrapped_value(), Some(Value::I64(2)));
    assert_eq!(mapper.map::<Status>(&object), Ok(Status::Shipped));

    // Names are accepted whatever the setting.
    let object = DynamicObject::wrap_value(None, "Open");
    assert_eq!(mapper.map::<Status>(&object), Ok(Status::Open));

    let object = DynamicObject::wrap_value(None, "Lost");
    assert!(matches!(
        mapper.map::<Status>(&object),
        Err(MappingError::Incompatible { .. })
    ));
}

#[test]
fn dictionaries_preserve_every_pair() {
    let mapper = mapper();
    let scores: HashMap<String, i32> = [("a", 1), ("b", 2), ("c", 3)]
        .into_iter()
        .map(|(key, value)| (String::from(key), value))
        .collect();

    let object = mapper.map_object(&scores);
    let entries = object.wrapped_value().unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 3);
    for entry in entries {
        let entry = entry.as_object().unwrap();
        assert_eq!(entry.property_names(), ["Key", "Value"]);
        assert_eq!(entry.type_info().unwrap().name(), "KeyValuePair");
    }

    assert_eq!(mapper.map::<HashMap<String, i32>>(&object), Ok(scores));
}

#[test]
fn pairs_and_groupings() {
    let mapper = mapper();

    let pair = KeyValuePair::new(String::from("K1"), String::from("V1"));
    let object = mapper.map_object(&pair);
    assert_eq!(object.property_names(), ["Key", "Value"]);
    assert_eq!(object.get("Key"), Some(Value::from("K1")));
    assert_eq!(object.get("Value"), Some(Value::from("V1")));
    assert_eq!(mapper.map::<KeyValuePair<String, String>>(&object), Ok(pair));

    let group = Grouping {
        key: 'a',
        elements: vec![String::from("apple"), String::from("avocado")],
    };
    let object = mapper.map_object(&group);
    assert_eq!(object.property_names(), ["Key", "Elements"]);
    assert_eq!(mapper.map::<Grouping<char, String>>(&object), Ok(group));
}

// -----------------------------------------------------------------------------
// Members

#[test]
fn data_contracts_keep_data_members() {
    let account = Account {
        name: String::from("ada"),
        password: String::from("secret"),
    };

    let all = mapper().map_object(&account);
    assert_eq!(all.property_names(), ["name", "password"]);

    let contract = mapper().with_member_provider(DataContractMembers);
    let object = contract.map_object(&account);
    assert_eq!(object.property_names(), ["name"]);

    all.set("name", "eve");
    let read = contract.map::<Account>(&all).unwrap();
    assert_eq!(read.name, "eve");
    assert_eq!(read.password, "");
}

#[test]
fn closures_choose_members() {
    let mapper = mapper().with_member_provider(|_: &StructShape, member: &MemberInfo| {
        member.name() != "quantity"
    });
    let object = mapper.map_object(&Line {
        sku: String::from("A-1"),
        quantity: 3,
    });
    assert_eq!(object.property_names(), ["sku"]);
}

// -----------------------------------------------------------------------------
// Anonymous types and records

fn renamed(object: &DynamicObject) -> TypeInfo {
    TypeInfo::new("<>f__AnonymousType3")
        .anonymous()
        .with_properties(vec![
            PropertyInfo::new("b", TypeInfo::of::<String>()),
            PropertyInfo::new("a", TypeInfo::of::<i32>()),
        ])
        .with_namespace(object.type_info().unwrap().namespace().unwrap_or_default())
}

#[test]
fn anonymous_types_resolve_structurally() {
    let mapper = mapper();
    let anon = Anon {
        a: 4,
        b: String::from("four"),
    };
    let object = mapper.map_object(&anon);
    assert!(object.type_info().unwrap().is_anonymous());

    object.set_type_info(Some(renamed(&object)));
    let value = mapper.map_to(&object, None).unwrap();
    assert_eq!(value.take::<Anon>().ok(), Some(anon));
}

#[test]
fn unknown_anonymous_types_become_records() {
    let mapper = mapper();
    let object = DynamicObject::with_type(
        TypeInfo::new("<>f__AnonymousType9").anonymous().with_properties(vec![
            PropertyInfo::new("X", TypeInfo::of::<f64>()),
            PropertyInfo::new("Y", TypeInfo::of::<f64>()),
        ]),
    );
    object.set("X", 1.5_f64);
    object.set("Y", 2_i32);

    let value = mapper.map_to(&object, None).unwrap();
    let record = value.downcast_ref::<Record>().unwrap();
    assert_eq!(record.get_as::<f64>("X"), Some(&1.5));
    assert_eq!(record.get_as::<f64>("Y"), Some(&2.0));

    // The record maps back to an object of the original type.
    let back = mapper.map_object(record);
    assert_eq!(back.type_info(), object.type_info());
    assert_eq!(back.get("Y"), Some(Value::F64(2.0)));
}

#[test]
fn untyped_objects_become_records() {
    let mapper = mapper();
    let nested = DynamicObject::new();
    nested.set("Inner", true);

    let object = DynamicObject::new();
    object.set("A", 1_i32);
    object.set("B", "x");
    object.set("C", vec![1_u8, 2]);
    object.set("D", nested);

    let value = mapper.map_to(&object, None).unwrap();
    let record = value.downcast_ref::<Record>().unwrap();
    assert_eq!(record.names().collect::<Vec<_>>(), ["A", "B", "C", "D"]);
    assert_eq!(record.get_as::<i32>("A"), Some(&1));
    assert_eq!(record.get_as::<Vec<u8>>("C"), Some(&vec![1, 2]));
    let inner = record.get_as::<Record>("D").unwrap();
    assert_eq!(inner.get_as::<bool>("Inner"), Some(&true));
}

#[test]
fn unknown_descriptors_fail_to_resolve() {
    let mapper = mapper();
    let object = DynamicObject::with_type(TypeInfo::new("Missing").with_namespace("nowhere"));
    object.set("A", 1_i32);

    let error = mapper.map_to(&object, None).unwrap_err();
    assert_eq!(
        error,
        MappingError::Resolution {
            source: ResolutionError::NotFound {
                type_name: String::from("nowhere::Missing"),
            },
            path: MemberPath::new(),
        }
    );
}

#[test]
fn nested_resolution_errors_carry_their_path() {
    let resolver = DefaultTypeResolver::new(TypeRegistryArc::new(TypeRegistry::new()))
        .with_record_fallback(false);
    let mapper = DynamicObjectMapper::with_resolver(Arc::new(resolver));

    let nested = DynamicObject::with_type(
        TypeInfo::new("<>f__AnonymousType5")
            .anonymous()
            .with_properties(vec![PropertyInfo::new("X", TypeInfo::of::<i32>())]),
    );
    nested.set("X", 1_i32);
    let object = DynamicObject::new();
    object.set("D", nested);

    let error = mapper.map_to(&object, None).unwrap_err();
    assert_eq!(
        error.path().to_string(),
        alloc::format!("{}.D", TypeInfo::of::<Record>().short_name())
    );
    let MappingError::Resolution { source, .. } = error else {
        panic!("unexpected error: {error}");
    };
    assert!(matches!(source, ResolutionError::NotFound { .. }));
}

// -----------------------------------------------------------------------------
// Shared and cyclic graphs

fn ring() -> (SharedCell<Node>, SharedCell<Node>) {
    let a = Arc::new(RwLock::new(Node {
        name: String::from("a"),
        next: None,
    }));
    let b = Arc::new(RwLock::new(Node {
        name: String::from("b"),
        next: Some(Arc::clone(&a)),
    }));
    a.write().next = Some(Arc::clone(&b));
    (a, b)
}

#[test]
fn cycles_map_to_dynamic_objects() {
    let mapper = mapper();
    let (a, _b) = ring();
    let object = mapper.map_object(&a);

    assert_eq!(object.type_info(), Some(TypeInfo::of::<Node>()));
    let b = object.get("next").unwrap();
    let b = b.as_object().unwrap();
    assert_eq!(b.get("name"), Some(Value::from("b")));
    let back = b.get("next").unwrap();
    assert!(back.as_object().unwrap().ptr_eq(&object));

    // Structural equality and formatting terminate.
    assert_eq!(object, object.clone());
    assert!(alloc::format!("{object:?}").contains("<cycle>"));

    a.write().next = None;
}

#[test]
fn cycles_map_back_to_shared_cells() {
    let mapper = mapper();
    let (a, _b) = ring();
    let object = mapper.map_object(&a);
    a.write().next = None;

    let root: SharedCell<Node> = mapper.map(&object).unwrap();
    let b = root.read().next.clone().unwrap();
    assert_eq!(b.read().name, "b");
    let again = b.read().next.clone().unwrap();
    assert!(Arc::ptr_eq(&root, &again));

    root.write().next = None;
}

#[test]
fn cycles_through_values_are_reported() {
    let mapper = mapper();
    let holder = mapper.map_object(&Holder::default());
    holder.set("line", holder.clone());

    let error = mapper.map::<Holder>(&holder).unwrap_err();
    let MappingError::Cycle { type_name, path } = error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(type_name, TypeInfo::of::<Line>().full_name());
    assert_eq!(path.to_string(), "Holder.line");

    // `Arc<T>` is only built once its value is complete.
    let batch = mapper.map_object(&Batch {
        first: Arc::new(Line::default()),
        second: Arc::new(Line::default()),
    });
    batch.set("first", batch.clone());
    assert!(matches!(
        mapper.map::<Batch>(&batch),
        Err(MappingError::Cycle { .. })
    ));
}

#[test]
fn cycles_through_shared_cells_are_rebuilt() {
    let mapper = mapper();
    let node = mapper.map_object(&Node::default());
    node.set("next", node.clone());

    let cell: SharedCell<Node> = mapper.map(&node).unwrap();
    let next = cell.read().next.clone().unwrap();
    assert!(Arc::ptr_eq(&cell, &next));
    cell.write().next = None;
}

#[test]
fn identity_is_kept_within_a_call() {
    let mapper = mapper();
    let line = Arc::new(Line {
        sku: String::from("A-1"),
        quantity: 1,
    });
    let batch = Batch {
        first: Arc::clone(&line),
        second: Arc::clone(&line),
    };

    let object = mapper.map_object(&batch);
    let first = object.get("first").unwrap();
    let second = object.get("second").unwrap();
    assert!(first.as_object().unwrap().ptr_eq(second.as_object().unwrap()));

    let back: Batch = mapper.map(&object).unwrap();
    assert!(Arc::ptr_eq(&back.first, &back.second));
    assert_eq!(*back.first, *line);

    // Caches do not outlive a call.
    let again: Batch = mapper.map(&object).unwrap();
    assert!(!Arc::ptr_eq(&back.first, &again.first));
    let other = mapper.map_object(&batch);
    assert!(!other.ptr_eq(&object));
    let other_first = other.get("first").unwrap();
    assert!(!other_first.as_object().unwrap().ptr_eq(first.as_object().unwrap()));
}

fn line(sku: &str, quantity: u32) -> Arc<Line> {
    Arc::new(Line {
        sku: String::from(sku),
        quantity,
    })
}

#[test]
fn separate_graphs_share_nothing() {
    let mapper = mapper();
    let left = Batch {
        first: line("L-1", 1),
        second: line("L-2", 2),
    };
    let right = Batch {
        first: line("R-1", 3),
        second: line("R-2", 4),
    };

    let left_object = mapper.map_object(&left);
    let right_object = mapper.map_object(&right);
    for name in ["first", "second"] {
        let from_left = left_object.get(name).unwrap();
        let from_right = right_object.get(name).unwrap();
        assert!(!from_left.as_object().unwrap().ptr_eq(from_right.as_object().unwrap()));
    }
    let right_first = right_object.get("first").unwrap();
    assert_eq!(right_first.as_object().unwrap().get("sku"), Some(Value::from("R-1")));

    let left_back: Batch = mapper.map(&left_object).unwrap();
    let right_back: Batch = mapper.map(&right_object).unwrap();
    assert_eq!(left_back, left);
    assert_eq!(right_back, right);
    assert!(!Arc::ptr_eq(&left_back.first, &right_back.first));
    assert!(!Arc::ptr_eq(&left_back.second, &right_back.second));
}

#[test]
fn declared_types_apply_to_shared_roots() {
    let mapper = mapper();
    let declared = TypeInfo::new("Declared").with_namespace("elsewhere");
    let shared = line("A-1", 1);

    let object = mapper.map_object_as(&shared, Some(&declared));
    assert_eq!(object.type_info(), Some(declared.clone()));
    assert_eq!(object.get("sku"), Some(Value::from("A-1")));

    let object = mapper.map_object_as(&Some(Arc::clone(&shared)), Some(&declared));
    assert_eq!(object.type_info(), Some(declared.clone()));

    // Only the root takes the declared type.
    let batch = Batch {
        first: Arc::clone(&shared),
        second: shared,
    };
    let object = mapper.map_object_as(&batch, Some(&declared));
    assert_eq!(object.type_info(), Some(declared));
    let first = object.get("first").unwrap();
    assert_eq!(first.as_object().unwrap().type_info(), Some(TypeInfo::of::<Line>()));
}

#[test]
fn wrapped_value_cycles_are_reported() {
    let mapper = mapper();

    let untyped = DynamicObject::new();
    untyped.set(WRAPPED_VALUE, untyped.clone());
    assert!(matches!(
        mapper.map_to(&untyped, None),
        Err(MappingError::Cycle { .. })
    ));

    let typed = DynamicObject::wrap_value(Some(TypeInfo::of::<i32>()), Value::Null);
    typed.set(WRAPPED_VALUE, typed.clone());
    let error = mapper.map::<i32>(&typed).unwrap_err();
    let MappingError::Cycle { type_name, path } = error else {
        panic!("unexpected error: {error}");
    };
    assert_eq!(type_name, "i32");
    assert_eq!(path.to_string(), "i32");

    // Two objects wrapping each other.
    let a = DynamicObject::new();
    let b = DynamicObject::wrap_value(None, a.clone());
    a.set(WRAPPED_VALUE, b.clone());
    assert!(matches!(mapper.map_to(&a, None), Err(MappingError::Cycle { .. })));
    assert!(matches!(
        mapper.map::<Vec<i32>>(&b),
        Err(MappingError::Cycle { .. })
    ));

    untyped.remove(WRAPPED_VALUE);
    typed.remove(WRAPPED_VALUE);
    a.remove(WRAPPED_VALUE);
}
